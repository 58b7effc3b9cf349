use crate::files::{UploadError, UploadItem, items_from_json, items_from_multipart};
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::json;

fn item(name: &str, data: &str) -> UploadItem {
    UploadItem {
        filename: name.into(),
        data: data.as_bytes().to_vec(),
    }
}

#[test]
fn json_list_with_text_and_base64() {
    let payload = json!({
        "files": [
            { "filename": "a.log", "content": "hello" },
            { "filename": "b.txt", "content": "d29ybGQ=", "base64": true },
            { "filename": "c.csv", "text": "x;y" }
        ]
    });

    let items = items_from_json(&payload);

    assert_eq!(
        items,
        vec![item("a.log", "hello"), item("b.txt", "world"), item("c.csv", "x;y")]
    );
}

#[test]
fn json_single_object() {
    let items = items_from_json(&json!({ "filename": "one.log", "text": "body" }));

    assert_eq!(items, vec![item("one.log", "body")]);
}

#[test]
fn json_names_are_sanitized() {
    let payload = json!({
        "files": [
            { "filename": "../../evil", "content": "x" },
            { "filename": "bin.exe", "content": "x" },
            { "filename": "", "content": "x" },
            { "filename": "empty.log", "content": "" }
        ]
    });

    let items = items_from_json(&payload);

    assert_eq!(items, vec![item("evil.log", "x")]);
}

#[test]
fn invalid_base64_is_kept_as_text() {
    let payload = json!({ "files": [{ "filename": "a.log", "content": "not base64!", "base64": 1 }] });

    assert_eq!(items_from_json(&payload), vec![item("a.log", "not base64!")]);
}

#[test]
fn json_without_files_is_empty() {
    assert!(items_from_json(&json!({ "filename": "a.log" })).is_empty());
    assert!(items_from_json(&json!([])).is_empty());
}

#[tokio::test]
async fn multipart_parts_become_items() {
    let body = "--XYZ\r\n\
        Content-Disposition: form-data; name=\"file\"; filename=\"dir/N1.log\"\r\n\
        Content-Type: text/plain\r\n\r\n\
        line one\r\n\
        --XYZ\r\n\
        Content-Disposition: form-data; name=\"file\"; filename=\"skip.exe\"\r\n\r\n\
        binary\r\n\
        --XYZ\r\n\
        Content-Disposition: form-data; name=\"note\"\r\n\r\n\
        just a field\r\n\
        --XYZ--\r\n";

    let items = items_from_multipart(Bytes::from(body), "multipart/form-data; boundary=XYZ")
        .await
        .unwrap();

    assert_eq!(items, vec![item("N1.log", "line one")]);
}

#[tokio::test]
async fn multipart_without_boundary_is_rejected() {
    let err = items_from_multipart(Bytes::new(), "multipart/form-data")
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::MissingBoundary));
}

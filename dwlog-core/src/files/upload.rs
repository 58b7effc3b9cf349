use crate::files::store::{base_name, has_allowed_extension};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Extension given to JSON uploads that have none.
const DEFAULT_EXTENSION: &str = "log";

/// A validated file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("missing multipart boundary")]
    MissingBoundary,

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] multer::Error),
}

/// Items from a JSON upload body.
///
/// Accepts `{files: [{filename, content|text, base64?}]}` or a single
/// `{filename, content|text}` object. Names without an extension get
/// `.log`; other extensions must be allowed. Empty content is skipped and
/// content that is not valid base64 is stored as text.
pub fn items_from_json(payload: &Value) -> Vec<UploadItem> {
    let items: Vec<&Value> = match payload.get("files").and_then(Value::as_array) {
        Some(files) => files.iter().collect(),
        None if is_single_item(payload) => vec![payload],
        None => Vec::new(),
    };

    items.into_iter().filter_map(json_item).collect()
}

fn is_single_item(payload: &Value) -> bool {
    let has = |key: &str| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };
    has("filename") && (has("content") || has("text"))
}

fn json_item(item: &Value) -> Option<UploadItem> {
    let raw_name = match item.get("filename")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let name = base_name(&raw_name)?;

    let filename = match Path::new(name).extension() {
        None => format!("{name}.{DEFAULT_EXTENSION}"),
        Some(_) if has_allowed_extension(name) => name.to_string(),
        Some(_) => return None,
    };

    let content = [item.get("content"), item.get("text")]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())?;

    let data = if is_truthy(item.get("base64")) {
        STANDARD
            .decode(content.trim())
            .unwrap_or_else(|_| content.as_bytes().to_vec())
    } else {
        content.as_bytes().to_vec()
    };

    if data.is_empty() {
        return None;
    }

    Some(UploadItem { filename, data })
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Items from a `multipart/form-data` body.
///
/// Every part with a file name counts; the extension must already be an
/// allowed one.
pub async fn items_from_multipart(
    body: Bytes,
    content_type: &str,
) -> Result<Vec<UploadItem>, UploadError> {
    let boundary =
        multer::parse_boundary(content_type).map_err(|_| UploadError::MissingBoundary)?;
    let stream = futures_util::stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut items = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.file_name().and_then(base_name).map(str::to_string) else {
            continue;
        };
        if !has_allowed_extension(&name) {
            continue;
        }

        let data = field.bytes().await?;
        if data.is_empty() {
            continue;
        }

        items.push(UploadItem {
            filename: name,
            data: data.to_vec(),
        });
    }

    Ok(items)
}

use integration_tests::harness::TestServer;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};

#[test]
fn user_administration_round_trip() {
    let srv = TestServer::start();

    assert_eq!(srv.get_json("/api/admin/users"), json!({ "users": [] }));

    let created = srv
        .post_json(
            "/api/admin/users/create",
            &json!({ "username": "marta", "email": "marta@example.com", "role": "admin" }),
        )
        .send()
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().unwrap();
    let id = created["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["user"]["role"], "admin");
    assert_eq!(created["user"]["active"], true);

    let duplicate = srv
        .post_json(
            "/api/admin/users/create",
            &json!({ "username": "other", "email": "marta@example.com" }),
        )
        .send()
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let updated: Value = srv
        .post_json(
            "/api/admin/users/update",
            &json!({ "username": "marta", "active": false }),
        )
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(updated["user"]["active"], false);
    assert_eq!(updated["user"]["id"], id.as_str());

    let login: Value = srv
        .post_json("/api/auth/login", &json!({ "username": "marta" }))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(login["ok"], true);

    let deleted = srv
        .post_json("/api/admin/users/delete", &json!({ "id": id }))
        .send()
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let again = srv
        .post_json("/api/admin/users/delete", &json!({ "id": id }))
        .send()
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[test]
fn missing_fields_are_bad_requests() {
    let srv = TestServer::start();

    let create = srv
        .post_json("/api/admin/users/create", &json!({ "email": "x@example.com" }))
        .send()
        .unwrap();
    let delete = srv
        .post_json("/api/admin/users/delete", &json!({}))
        .send()
        .unwrap();

    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
    assert_eq!(delete.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn corrupt_users_file_is_an_internal_error() {
    let srv = TestServer::start();
    let users = srv.root().join("backend/users.json");
    std::fs::create_dir_all(users.parent().unwrap()).unwrap();
    std::fs::write(&users, "{not json").unwrap();

    let res = srv.get("/api/admin/users").send().unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().unwrap();
    assert!(body["detail"].as_str().unwrap().contains("users.json"));
}

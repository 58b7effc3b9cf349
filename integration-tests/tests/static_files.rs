use integration_tests::harness::TestServer;
use reqwest::StatusCode;

#[test]
fn root_serves_the_dashboard() {
    let srv = TestServer::start();

    let res = srv.get("/").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/html; charset=utf-8");
    assert!(res.text().unwrap().contains("dwlog dashboard"));
}

#[test]
fn pages_answer_with_and_without_extension() {
    let srv = TestServer::start();

    for path in ["/stats", "/stats.html"] {
        let res = srv.get(path).send().unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert!(res.text().unwrap().contains("Statistics"));
    }
}

#[test]
fn missing_page_is_not_found() {
    let srv = TestServer::start();

    let res = srv.get("/admin").send().unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[test]
fn assets_are_streamed_with_their_type() {
    let srv = TestServer::start();

    let res = srv.get("/assets/app.js").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.contains("javascript"), "{content_type}");
    assert!(res.text().unwrap().contains("/api/stats/header"));
}

#[test]
fn head_has_no_body() {
    let srv = TestServer::start();

    let res = srv.head("/index.html").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.bytes().unwrap().is_empty());
}

#[test]
fn traversal_and_private_dirs_are_rejected() {
    let srv = TestServer::start();
    std::fs::create_dir_all(srv.root().join("web/backend")).unwrap();
    std::fs::write(srv.root().join("web/backend/secret.txt"), "secret").unwrap();

    for path in [
        "/backend/secret.txt",
        "/assets/%2e%2e/%2e%2e/DW/CS0BE.log",
        "/assets/../../DW/CS0BE.log",
    ] {
        let res = srv.get(path).send().unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

use crate::static_files::{ResolveError, resolve_page, resolve_static_path};
use std::fs;
use tempfile::{TempDir, tempdir};

fn web_root() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("index.html"), "<html></html>").unwrap();
    fs::write(root.join("favicon.ico"), "ico").unwrap();
    fs::create_dir_all(root.join("assets/js")).unwrap();
    fs::write(root.join("assets/js/app.js"), "js").unwrap();
    fs::create_dir(root.join("backend")).unwrap();
    fs::write(root.join("backend/users.json"), "[]").unwrap();
    dir
}

#[test]
fn top_level_files_resolve() {
    let root = web_root();

    let path = resolve_static_path(root.path(), "/favicon.ico").unwrap();

    assert!(path.ends_with("favicon.ico"));
}

#[test]
fn public_directories_resolve() {
    let root = web_root();

    let path = resolve_static_path(root.path(), "/assets/js/app.js").unwrap();

    assert!(path.ends_with("assets/js/app.js"));
}

#[test]
fn percent_encoded_paths_are_decoded_once() {
    let root = web_root();
    fs::write(root.path().join("assets/my file.css"), "css").unwrap();

    assert!(resolve_static_path(root.path(), "/assets/my%20file.css").is_ok());
    assert_eq!(
        resolve_static_path(root.path(), "/assets/%252e%252e/index.html"),
        Err(ResolveError::NotFound)
    );
}

#[test]
fn other_directories_are_forbidden() {
    let root = web_root();

    assert_eq!(
        resolve_static_path(root.path(), "/backend/users.json"),
        Err(ResolveError::Forbidden)
    );
}

#[test]
fn traversal_is_forbidden() {
    let root = web_root();

    assert_eq!(
        resolve_static_path(root.path(), "/assets/../../etc/passwd"),
        Err(ResolveError::Forbidden)
    );
    assert_eq!(
        resolve_static_path(root.path(), "/%2e%2e/secret"),
        Err(ResolveError::Forbidden)
    );
}

#[test]
fn directories_and_missing_files_are_not_found() {
    let root = web_root();

    assert_eq!(
        resolve_static_path(root.path(), "/assets"),
        Err(ResolveError::NotFound)
    );
    assert_eq!(
        resolve_static_path(root.path(), "/nope.txt"),
        Err(ResolveError::NotFound)
    );
    assert_eq!(resolve_static_path(root.path(), "/"), Err(ResolveError::NotFound));
}

#[test]
fn relative_request_path_is_bad() {
    let root = web_root();

    assert_eq!(
        resolve_static_path(root.path(), "favicon.ico"),
        Err(ResolveError::BadPath)
    );
}

#[test]
fn pages_must_exist() {
    let root = web_root();

    assert!(resolve_page(root.path(), "index.html").is_ok());
    assert_eq!(
        resolve_page(root.path(), "admin.html"),
        Err(ResolveError::NotFound)
    );
}

use crate::files::{FileStore, UploadItem, base_name, has_allowed_extension};
use std::fs;
use tempfile::tempdir;

#[test]
fn base_name_strips_directories() {
    assert_eq!(base_name("../../etc/passwd"), Some("passwd"));
    assert_eq!(base_name("C:\\logs\\node.log"), Some("node.log"));
    assert_eq!(base_name(" node.log "), Some("node.log"));
    assert_eq!(base_name("dir/"), None);
    assert_eq!(base_name(".."), None);
    assert_eq!(base_name(""), None);
}

#[test]
fn extension_check_is_case_insensitive() {
    assert!(has_allowed_extension("a.LOG"));
    assert!(has_allowed_extension("a.csv"));
    assert!(!has_allowed_extension("a.exe"));
    assert!(!has_allowed_extension("log"));
}

#[test]
fn list_only_shows_allowed_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.log"), "12345").unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::write(dir.path().join("c.exe"), "").unwrap();

    let files = FileStore::new(dir.path()).list();

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.log"]);
    assert_eq!(files[1].size, Some(5));
    assert!(files[1].mtime.is_some());
}

#[test]
fn missing_directory_lists_nothing() {
    let dir = tempdir().unwrap();

    assert_eq!(FileStore::new(dir.path().join("nope")).count(), 0);
}

#[test]
fn save_creates_directory_and_overwrites() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("DW"));

    let first = store.save_all(vec![UploadItem {
        filename: "n.log".into(),
        data: b"old".to_vec(),
    }]);
    let second = store.save_all(vec![UploadItem {
        filename: "n.log".into(),
        data: b"new".to_vec(),
    }]);

    assert_eq!(first, vec!["n.log"]);
    assert_eq!(second, vec!["n.log"]);
    assert_eq!(fs::read_to_string(store.dir().join("n.log")).unwrap(), "new");
}

#[test]
fn delete_only_touches_allowed_regular_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let src = root.join("DW");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.log"), "x").unwrap();
    fs::write(src.join("keep.exe"), "x").unwrap();
    fs::create_dir(src.join("folder.log")).unwrap();
    fs::write(root.join("outside.log"), "x").unwrap();
    let store = FileStore::new(&src);

    let deleted = store.delete(&[
        "a.log",
        "keep.exe",
        "folder.log",
        "../outside.log",
        "missing.log",
    ]);

    assert_eq!(deleted, vec!["a.log"]);
    assert!(src.join("keep.exe").exists());
    assert!(src.join("folder.log").is_dir());
    assert!(root.join("outside.log").exists());
}

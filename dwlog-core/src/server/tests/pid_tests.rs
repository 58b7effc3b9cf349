use crate::server::{remove_pid, write_pid};
use std::fs;
use tempfile::tempdir;

#[test]
fn writes_current_pid_creating_parent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run/dwlog.pid");

    write_pid(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written.trim(), std::process::id().to_string());
}

#[test]
fn remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dwlog.pid");
    write_pid(&path).unwrap();

    remove_pid(&path);
    remove_pid(&path);

    assert!(!path.exists());
}

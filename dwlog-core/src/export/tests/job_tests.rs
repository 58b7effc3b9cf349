use crate::export::{JobId, JobRegistry, JobStatus};
use std::path::PathBuf;

#[test]
fn new_jobs_are_queued() {
    let registry = JobRegistry::new();

    let id = registry.create();
    let job = registry.get(&id).unwrap();

    assert_eq!(job.status, JobStatus::Queued);
    assert_eq!(job.percent, 0);
    assert!(job.output_path.is_none());
}

#[test]
fn job_ids_are_unique() {
    let registry = JobRegistry::new();

    let a = registry.create();
    let b = registry.create();

    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
}

#[test]
fn progress_moves_to_running_below_100() {
    let registry = JobRegistry::new();
    let id = registry.create();

    assert!(registry.progress(&id, 100, "writing"));

    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Running);
    assert_eq!(job.percent, 99);
}

#[test]
fn terminal_states_are_final() {
    let registry = JobRegistry::new();
    let id = registry.create();
    registry.complete(&id, PathBuf::from("/tmp/x.zip"), "done");

    assert!(!registry.fail(&id, "late failure"));
    assert!(!registry.progress(&id, 50, "late progress"));

    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Done);
    assert_eq!(job.percent, 100);
    assert_eq!(job.message, "done");
}

#[test]
fn failed_jobs_keep_their_percent() {
    let registry = JobRegistry::new();
    let id = registry.create();
    registry.progress(&id, 40, "writing");

    registry.fail(&id, "disk full");

    let snapshot = registry.get(&id).unwrap().snapshot();
    assert_eq!(snapshot.status, JobStatus::Error);
    assert_eq!(snapshot.percent, 40);
    assert_eq!(snapshot.message, "disk full");
}

#[test]
fn unknown_jobs_are_not_updated() {
    let registry = JobRegistry::new();

    assert!(!registry.progress(&JobId::new(), 10, "x"));
    assert!(registry.is_empty());
}

#[test]
fn job_id_round_trips_through_text() {
    let id = JobId::new();

    let parsed: JobId = id.to_string().parse().unwrap();

    assert_eq!(parsed, id);
    assert_eq!(id.short().len(), 8);
    assert!(id.to_string().starts_with(&id.short()));
    assert!("not-a-uuid".parse::<JobId>().is_err());
}

#[test]
fn status_serializes_lowercase() {
    let registry = JobRegistry::new();
    let id = registry.create();

    let json = serde_json::to_value(registry.get(&id).unwrap().snapshot()).unwrap();

    assert_eq!(json["status"], "queued");
    assert_eq!(json["percent"], 0);
}

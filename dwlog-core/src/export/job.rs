use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight characters, used in artifact names.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl Serialize for JobId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Error,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub id: JobId,
    pub status: JobStatus,
    pub percent: u8,
    pub message: String,
    /// Set once the archive is complete.
    pub output_path: Option<PathBuf>,
}

impl ExportJob {
    fn queued(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            percent: 0,
            message: "queued".to_string(),
            output_path: None,
        }
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            status: self.status,
            percent: self.percent,
            message: self.message.clone(),
        }
    }

    /// The archive, if the job finished and it is still on disk.
    pub fn download_path(&self) -> Option<&PathBuf> {
        if self.status != JobStatus::Done {
            return None;
        }
        self.output_path.as_ref().filter(|p| p.is_file())
    }
}

/// Body of the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub percent: u8,
    pub message: String,
}

/// Process-wide job table.
///
/// Jobs are never removed. The lock is only held to copy or patch metadata.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<JobId, ExportJob>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<JobId, ExportJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self) -> JobId {
        let id = JobId::new();
        self.table().insert(id, ExportJob::queued(id));
        id
    }

    pub fn get(&self, id: &JobId) -> Option<ExportJob> {
        self.table().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Applies `patch` unless the job is unknown or already terminal.
    /// Returns whether the patch ran.
    pub fn update<F>(&self, id: &JobId, patch: F) -> bool
    where
        F: FnOnce(&mut ExportJob),
    {
        let mut table = self.table();
        match table.get_mut(id) {
            Some(job) if !job.status.is_terminal() => {
                patch(job);
                true
            }
            _ => false,
        }
    }

    pub fn progress(&self, id: &JobId, percent: u8, message: impl Into<String>) -> bool {
        let message = message.into();
        self.update(id, |job| {
            job.status = JobStatus::Running;
            job.percent = percent.min(99);
            job.message = message;
        })
    }

    pub fn complete(&self, id: &JobId, output: PathBuf, message: impl Into<String>) -> bool {
        let message = message.into();
        self.update(id, |job| {
            job.status = JobStatus::Done;
            job.percent = 100;
            job.message = message;
            job.output_path = Some(output);
        })
    }

    pub fn fail(&self, id: &JobId, message: impl Into<String>) -> bool {
        let message = message.into();
        self.update(id, |job| {
            job.status = JobStatus::Error;
            job.message = message;
        })
    }
}

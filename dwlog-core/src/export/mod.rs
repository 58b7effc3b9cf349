//! Asynchronous CSV/ZIP export.
//!
//! A request resolves to an [`ExportTable`], which a worker streams to
//! `<BASE>_<stamp>_<id8>.csv`, packs into a `.zip` next to it and removes.
//! Progress is published through the shared [`JobRegistry`].
//!
//! queued -> running -> done
//!                   \-> error

mod dataset;
mod error;
mod job;
mod worker;
mod writer;

#[cfg(test)]
mod tests;

pub use dataset::{DatasetKind, ExportTable, build_table};
pub use error::ExportError;
pub use job::{ExportJob, JobId, JobRegistry, JobSnapshot, JobStatus};
pub use worker::{ExportEngine, ExportRequest};
pub use writer::{PROGRESS_EVERY, artifact_stem, compress_csv, progress_percent, write_csv};

use crate::conf::ExportMode;
use crate::corpus::scan_corpus;
use crate::export::writer::{
    artifact_stem, compress_csv, progress_percent, remove_leftover, write_csv,
};
use crate::export::{DatasetKind, ExportError, JobId, JobRegistry, build_table};
use chrono::Local;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// A parsed `/export/start` body.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub kind: DatasetKind,
    pub payload: Value,
}

impl ExportRequest {
    /// `{type, data}`; a missing or non-string type is an unknown dataset,
    /// a missing `data` an empty object.
    pub fn from_json(body: &Value) -> Self {
        let kind = body
            .get("type")
            .and_then(Value::as_str)
            .map(DatasetKind::parse)
            .unwrap_or(DatasetKind::Unknown);

        let payload = match body.get("data") {
            Some(data @ Value::Object(_)) => data.clone(),
            _ => Value::Object(Default::default()),
        };

        Self { kind, payload }
    }
}

/// Owns the job table and runs export workers.
#[derive(Debug, Clone)]
pub struct ExportEngine {
    registry: Arc<JobRegistry>,
    source_dir: PathBuf,
    export_dir: PathBuf,
    mode: ExportMode,
}

impl ExportEngine {
    pub fn new(source_dir: PathBuf, export_dir: PathBuf, mode: ExportMode) -> Self {
        Self {
            registry: Arc::new(JobRegistry::new()),
            source_dir,
            export_dir,
            mode,
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    /// Registers a job and starts it.
    ///
    /// In [`ExportMode::Async`] this returns as soon as the worker is
    /// spawned. In [`ExportMode::Inline`] it waits, so the job is already
    /// terminal when the id comes back.
    pub async fn start(&self, request: ExportRequest) -> JobId {
        let id = self.registry.create();
        tracing::info!(job_id = %id, kind = %request.kind, mode = ?self.mode, "export job queued");

        let engine = self.clone();
        let handle = tokio::task::spawn_blocking(move || engine.run(id, request));

        if self.mode == ExportMode::Inline
            && let Err(e) = handle.await
        {
            self.registry
                .fail(&id, format!("export failed: {}", ExportError::Worker(e.to_string())));
        }

        id
    }

    /// Runs one job to a terminal state. Never panics on export faults.
    pub fn run(&self, id: JobId, request: ExportRequest) {
        let started = Instant::now();

        match self.execute(&id, &request) {
            Ok(path) => {
                let secs = started.elapsed().as_secs();
                tracing::info!(job_id = %id, path = %path.display(), secs, "export job done");
                self.registry
                    .complete(&id, path, format!("export completed in {secs}s"));
            }
            Err(e) => {
                tracing::warn!(job_id = %id, error = %e, "export job failed");
                self.registry.fail(&id, format!("export failed: {e}"));
            }
        }
    }

    fn execute(&self, id: &JobId, request: &ExportRequest) -> Result<PathBuf, ExportError> {
        self.registry.progress(id, 2, "preparing export");

        fs::create_dir_all(&self.export_dir).map_err(|source| ExportError::CreateDir {
            path: self.export_dir.clone(),
            source,
        })?;

        let table = build_table(request.kind, &request.payload, || {
            scan_corpus(&self.source_dir)
        })?;

        let stem = artifact_stem(request.kind.base_name(), Local::now(), id);
        let csv_path = self.export_dir.join(format!("{stem}.csv"));
        let zip_path = self.export_dir.join(format!("{stem}.zip"));

        let result = write_csv(&csv_path, &table, |written, total| {
            self.registry.progress(
                id,
                progress_percent(written, total),
                format!("exporting rows {written}/{total}"),
            );
        });
        if let Err(e) = result {
            remove_leftover(&csv_path);
            return Err(e);
        }

        self.registry.progress(id, 99, "compressing");
        compress_csv(&csv_path, &zip_path)?;

        Ok(zip_path)
    }
}

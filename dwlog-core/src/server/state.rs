use crate::conf::DwlogConfig;
use crate::export::ExportEngine;
use crate::files::FileStore;
use crate::users::UserStore;
use std::fs;

/// Everything a request handler can reach.
#[derive(Debug)]
pub struct AppState {
    pub config: DwlogConfig,
    pub files: FileStore,
    pub users: UserStore,
    pub exports: ExportEngine,
}

impl AppState {
    pub fn new(config: DwlogConfig) -> Self {
        let paths = &config.paths;

        Self {
            files: FileStore::new(paths.source_dir.clone()),
            users: UserStore::new(paths.users_file.clone()),
            exports: ExportEngine::new(
                paths.source_dir.clone(),
                paths.export_dir.clone(),
                config.export.mode,
            ),
            config,
        }
    }

    /// Creates the source and export directories. Failures are logged;
    /// the affected endpoints report them per request.
    pub fn prepare_dirs(&self) {
        for dir in [&self.config.paths.source_dir, &self.config.paths.export_dir] {
            if let Err(e) = fs::create_dir_all(dir) {
                tracing::warn!(error = %e, dir = %dir.display(), "failed to create directory");
            }
        }
    }
}

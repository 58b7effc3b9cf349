use crate::files::UploadItem;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Extensions the file store lists, accepts and deletes.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["log", "txt", "csv"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtime: Option<i64>,
}

/// Last path component of a client-supplied name, with either separator.
/// `None` for blank names and `.`/`..`.
pub fn base_name(raw: &str) -> Option<&str> {
    let name = raw.trim().rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

pub fn has_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// The source directory seen as a flat file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files with an allowed extension, sorted by name. A missing directory
    /// lists nothing.
    pub fn list(&self) -> Vec<SourceFile> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut files: Vec<SourceFile> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !has_allowed_extension(&name) {
                    return None;
                }

                let meta = entry.metadata().ok();
                let mtime = meta
                    .as_ref()
                    .and_then(|m| m.modified().ok())
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_secs() as i64);

                Some(SourceFile {
                    name,
                    size: meta.as_ref().map(|m| m.len()),
                    mtime,
                })
            })
            .collect();

        files.sort_by(|a, b| a.name.cmp(&b.name));
        files
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Writes every item, overwriting same-named files. Failed writes are
    /// logged and skipped. Returns the names actually written.
    pub fn save_all(&self, items: Vec<UploadItem>) -> Vec<String> {
        if items.is_empty() {
            return Vec::new();
        }

        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::warn!(error = %e, dir = %self.dir.display(), "cannot create source directory");
            return Vec::new();
        }

        let mut saved = Vec::new();
        for item in items {
            let dst = self.dir.join(&item.filename);
            match fs::write(&dst, &item.data) {
                Ok(()) => {
                    tracing::info!(file = %item.filename, bytes = item.data.len(), "source file saved");
                    saved.push(item.filename);
                }
                Err(e) => {
                    tracing::warn!(error = %e, file = %dst.display(), "failed to save upload");
                }
            }
        }
        saved
    }

    /// Deletes the named files. Names are reduced to their base name and
    /// must carry an allowed extension and point at a regular file.
    pub fn delete<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut deleted = Vec::new();

        for raw in names {
            let Some(name) = base_name(raw.as_ref()) else {
                continue;
            };
            if !has_allowed_extension(name) {
                continue;
            }

            let path = self.dir.join(name);
            let is_file = fs::symlink_metadata(&path).is_ok_and(|m| m.is_file());
            if !is_file {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!(file = name, "source file deleted");
                    deleted.push(name.to_string());
                }
                Err(e) => tracing::warn!(error = %e, file = %path.display(), "failed to delete"),
            }
        }

        deleted
    }
}

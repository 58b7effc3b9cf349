use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Upper bound for request bodies (uploads, export payloads).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DwlogConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the API listens on, e.g. `0.0.0.0:9000`.
    pub listen: String,

    /// Optional number of worker threads - default is decided by Pingora.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Optional pid file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Filesystem layout. Relative entries are resolved against the directory
/// of the config file at load time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory holding the node log files.
    pub source_dir: PathBuf,
    pub export_dir: PathBuf,
    pub users_file: PathBuf,
    /// HTML pages and `assets/`.
    pub web_root: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub mode: ExportMode,
}

/// How export jobs run relative to the request that starts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Background worker; the client polls for progress.
    #[default]
    Async,
    /// The start request waits for the archive.
    Inline,
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Async => f.write_str("async"),
            Self::Inline => f.write_str("inline"),
        }
    }
}

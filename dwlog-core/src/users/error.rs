use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("user already exists")]
    Duplicate,

    #[error("user not found")]
    NotFound,

    #[error("failed to access users file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("users file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

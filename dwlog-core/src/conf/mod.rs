mod error;
mod loader;
mod types;


pub use error::ConfigError;
pub use loader::{CONFIG_FILE_NAME, load_config, parse_config};
pub use types::{
    DEFAULT_MAX_BODY_BYTES, DwlogConfig, ExportConfig, ExportMode, PathsConfig, ServerConfig,
};

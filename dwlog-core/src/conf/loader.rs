use crate::conf::ConfigError;
use crate::conf::types::DwlogConfig;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Entry file looked up when [`load_config`] is given a directory.
pub const CONFIG_FILE_NAME: &str = "dwlog.hcl";

/// Load and validate a config.
///
/// `path` is either the HCL file itself or a directory containing
/// `dwlog.hcl`. Relative paths inside the file are resolved against the
/// file's directory.
pub fn load_config(path: &Path) -> Result<DwlogConfig, ConfigError> {
    let file = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    let text = fs::read_to_string(&file).map_err(|e| ConfigError::read_file(&file, e))?;
    let base = file.parent().unwrap_or_else(|| Path::new("."));

    parse_config(&text, &file, base)
}

/// Parse config text. `origin` only shows up in errors.
pub fn parse_config(text: &str, origin: &Path, base: &Path) -> Result<DwlogConfig, ConfigError> {
    let mut config: DwlogConfig =
        hcl::from_str(text).map_err(|e| ConfigError::parse(origin, e))?;

    validate(&config)?;
    resolve_paths(&mut config, base);

    Ok(config)
}

fn validate(config: &DwlogConfig) -> Result<(), ConfigError> {
    let listen = config.server.listen.trim();
    listen
        .parse::<SocketAddr>()
        .map_err(|source| ConfigError::InvalidListen {
            listen: listen.to_string(),
            source,
        })?;

    if config.server.threads == Some(0) {
        return Err(ConfigError::InvalidThreads);
    }

    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::InvalidBodyLimit);
    }

    let paths = &config.paths;
    for (field, value) in [
        ("source_dir", &paths.source_dir),
        ("export_dir", &paths.export_dir),
        ("users_file", &paths.users_file),
        ("web_root", &paths.web_root),
    ] {
        if value.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { field });
        }
    }

    Ok(())
}

fn resolve_paths(config: &mut DwlogConfig, base: &Path) {
    let paths = &mut config.paths;
    for path in [
        &mut paths.source_dir,
        &mut paths.export_dir,
        &mut paths.users_file,
        &mut paths.web_root,
    ] {
        *path = resolve(base, path);
    }

    if let Some(pid_file) = config.server.pid_file.as_mut() {
        *pid_file = resolve(base, pid_file);
    }

    config.server.listen = config.server.listen.trim().to_string();
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

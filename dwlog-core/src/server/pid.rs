use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Writes the current process id to `path`, creating its directory.
pub fn write_pid(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create pid directory {}", parent.display()))?;
    }

    fs::write(path, format!("{}\n", std::process::id()))
        .with_context(|| format!("failed to write pid file {}", path.display()))
}

/// Removes the pid file. A file that is already gone is not an error.
pub fn remove_pid(path: &Path) {
    if let Err(e) = fs::remove_file(path)
        && e.kind() != io::ErrorKind::NotFound
    {
        tracing::warn!(error = %e, pid_file = %path.display(), "failed to remove pid file");
    }
}

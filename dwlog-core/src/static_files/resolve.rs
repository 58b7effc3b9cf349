use std::path::{Component, Path, PathBuf};

/// Sub-directories of the web root that may be served. Anything else is
/// only reachable when it sits directly in the root.
const PUBLIC_DIRS: [&str; 2] = ["assets", "exports"];

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError {
    NotFound,
    Forbidden,
    BadPath,
}

/// A page file directly under the web root.
pub fn resolve_page(web_root: &Path, file: &str) -> Result<PathBuf, ResolveError> {
    let path = web_root.join(file);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ResolveError::NotFound)
    }
}

/// Maps a request path to a file under `base_dir`.
///
/// The path is percent-decoded once. Traversal, absolute components and
/// directories other than [`PUBLIC_DIRS`] are rejected, and the
/// canonicalized target must stay inside `base_dir`.
pub fn resolve_static_path(base_dir: &Path, request_path: &str) -> Result<PathBuf, ResolveError> {
    // Sanity checks
    if !request_path.starts_with('/') {
        return Err(ResolveError::BadPath);
    }

    // Percent-decode ONCE
    let decoded = percent_encoding::percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ResolveError::BadPath)?;

    // Strip leading slash after decoding
    let decoded = decoded.trim_start_matches('/');
    if decoded.is_empty() {
        return Err(ResolveError::NotFound);
    }

    let relative_path = PathBuf::from(decoded);

    // Path component validation (no traversal, no absolute paths)
    let mut normals = Vec::new();
    for component in relative_path.components() {
        match component {
            Component::Normal(part) => normals.push(part),
            Component::CurDir => {}
            _ => return Err(ResolveError::Forbidden),
        }
    }

    // Only top-level files or the public sub-directories
    if normals.len() > 1 {
        let first = normals[0].to_str().unwrap_or_default();
        if !PUBLIC_DIRS.contains(&first) {
            return Err(ResolveError::Forbidden);
        }
    }

    // Canonicalize base dir and target
    let base_canon = base_dir
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;

    let target_canon = base_dir
        .join(&relative_path)
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;

    // Enforce containment
    if !target_canon.starts_with(&base_canon) {
        return Err(ResolveError::Forbidden);
    }

    // Must be a regular file
    if !target_canon.is_file() {
        return Err(ResolveError::NotFound);
    }

    Ok(target_canon)
}

use crate::corpus::metrics::parse_metric_row;
use crate::corpus::parse::parse_line;
use crate::corpus::types::{Corpus, MetricName};
use glob::{MatchOptions, Pattern, glob_with};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of the files that make up the corpus.
pub const SOURCE_EXTENSION: &str = "log";

/// Enumerates the `*.log` files in `dir`, sorted by path.
///
/// The extension match is case-insensitive. A missing directory or an
/// unusable pattern yields an empty list.
pub fn discover_sources(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let pattern = format!(
        "{}/*.{SOURCE_EXTENSION}",
        Pattern::escape(&dir.to_string_lossy())
    );
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let Ok(entries) = glob_with(&pattern, options) else {
        tracing::warn!(pattern, "invalid source glob pattern");
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    paths
}

/// Reads a file as text, replacing invalid UTF-8 instead of failing.
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parses one file's content into a corpus fragment.
pub fn scan_content(content: &str, file_name: &str) -> Corpus {
    let mut corpus = Corpus::default();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if MetricName::for_line(line).is_some() {
            corpus.metric_lines += 1;
            if let Some(row) = parse_metric_row(line, file_name) {
                corpus.metrics.push(row);
            }
        }

        if let Some(record) = parse_line(line, file_name) {
            corpus.push(record);
        }
    }

    corpus
}

/// Scans every source file in `dir` into one corpus.
///
/// Unreadable files still count towards [`Corpus::files`] but contribute no
/// records; the scan never fails.
pub fn scan_corpus(dir: &Path) -> Corpus {
    let mut corpus = Corpus::default();

    for path in discover_sources(dir) {
        corpus.files += 1;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match read_lossy(&path) {
            Ok(content) => corpus.extend(scan_content(&content, &file_name)),
            Err(e) => {
                tracing::debug!(error = %e, file = %path.display(), "skipping unreadable source file");
            }
        }
    }

    tracing::debug!(
        files = corpus.files,
        alarms = corpus.alarms.len(),
        notifications = corpus.notifications.len(),
        restarts = corpus.restarts.len(),
        metrics = corpus.metrics.len(),
        "corpus scanned"
    );

    corpus
}

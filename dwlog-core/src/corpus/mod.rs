//! Log corpus parsing.
//!
//! Source files mix four historical line layouts. Each line runs through
//! [`parse_line`], which tries the layouts in priority order and produces
//! at most one typed record. Metric lines are picked up separately by
//! [`parse_metric_row`]. [`scan_corpus`] drives both over every `*.log`
//! file of a directory.
//!
//! source dir
//! discover_sources
//! read_lossy
//! parse_line / parse_metric_row
//! Corpus

mod duration;
mod metrics;
mod parse;
mod scanner;
mod types;

#[cfg(test)]
mod tests;

pub use duration::parse_duration;
pub use metrics::parse_metric_row;
pub use parse::parse_line;
pub use scanner::{SOURCE_EXTENSION, discover_sources, read_lossy, scan_content, scan_corpus};
pub use types::*;

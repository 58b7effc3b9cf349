//! Chart-ready aggregates over a [`Corpus`](crate::corpus::Corpus).

mod aggregation;
mod summary;

#[cfg(test)]
mod tests;

pub use aggregation::{
    ChartSeries, DEFAULT_TOP_N, MAX_TOP_N, NOT_AVAILABLE, Tally, TopN, duration_by_key,
    saturated_count, severity_distribution, top_counts,
};
pub use summary::{ChartsSummary, HeaderStats, charts_summary, header_stats};

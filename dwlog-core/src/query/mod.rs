//! Drill-down filters over the parsed collections.
//!
//! Every query preserves scan order and truncates to its [`Limit`], except
//! [`RestartQuery`], which orders newest first before truncating.

mod filter;
mod node;

#[cfg(test)]
mod tests;

pub use filter::{
    DateRange, EVENT_LIMIT, EventQuery, Limit, MAX_LIMIT, METRIC_LIMIT, MetricQuery, NodeFilter,
    RESTART_LIMIT, RestartQuery,
};
pub use node::{NodeSummary, node_summary};

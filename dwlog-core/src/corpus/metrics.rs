use crate::corpus::types::{MetricName, MetricRow};
use once_cell::sync::Lazy;
use regex::Regex;

static COLUMN_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid column gap regex"));

const MIN_FIELDS: usize = 6;

/// Parse a statistics line such as
/// `Total downtime;0s;12s;0s;12s;3s` or the column-aligned variant.
///
/// Lines without a known metric prefix, or with fewer than six columns, yield `None`.
pub fn parse_metric_row(line: &str, file_name: &str) -> Option<MetricRow> {
    let line = line.trim();
    MetricName::for_line(line)?;

    let fields: Vec<&str> = if line.contains(';') {
        line.split(';').map(str::trim).collect()
    } else {
        COLUMN_GAP.split(line).map(str::trim).collect()
    };

    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(MetricRow {
        file_name: file_name.to_string(),
        metric: fields[0].to_string(),
        node_upgrade: fields[1].to_string(),
        node_manual: fields[2].to_string(),
        node_spontaneous: fields[3].to_string(),
        all_node_restarts: fields[4].to_string(),
        partial_outages: fields[5].to_string(),
    })
}

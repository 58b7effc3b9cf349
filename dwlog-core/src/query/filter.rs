use crate::corpus::{AlarmEvent, MetricRow, RestartEvent};
use crate::stats::saturated_count;
use chrono::NaiveDateTime;
use std::cmp::Reverse;

pub const MAX_LIMIT: usize = 10_000;

/// Default page size of the alarm and notification queries.
pub const EVENT_LIMIT: usize = 200;
pub const RESTART_LIMIT: usize = 1_000;
pub const METRIC_LIMIT: usize = 2_000;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MIDNIGHT: &str = "00:00:00";
const SOURCE_SUFFIX: &str = ".log";

/// Maximum number of returned items, clamped to `[1, MAX_LIMIT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(usize);

impl Limit {
    pub fn new(n: usize) -> Self {
        Self(n.clamp(1, MAX_LIMIT))
    }

    /// Missing or unparseable input yields `default`; integers past `i64`
    /// saturate.
    pub fn from_param(raw: Option<&str>, default: usize) -> Self {
        let parsed = raw.map(str::trim).and_then(|r| match r.parse::<i64>() {
            Ok(n) => Some(usize::try_from(n.max(0)).unwrap_or(usize::MAX)),
            Err(_) => saturated_count(r),
        });
        Self::new(parsed.unwrap_or(default))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// Restricts results to one source file.
///
/// Accepts both `CS0BE` and `CS0BE.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFilter {
    base: String,
    log_name: String,
}

impl NodeFilter {
    /// `None` when the node parameter is blank.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        let base = strip_source_suffix(raw).trim();
        if base.is_empty() {
            return None;
        }

        Some(Self {
            base: base.to_string(),
            log_name: format!("{base}{SOURCE_SUFFIX}"),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// The node's source file name, `<base>.log`.
    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let file_name = file_name.trim();
        !file_name.is_empty() && (file_name == self.base || file_name == self.log_name)
    }
}

fn strip_source_suffix(name: &str) -> &str {
    let cut = name.len().saturating_sub(SOURCE_SUFFIX.len());
    match name.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(SOURCE_SUFFIX) => &name[..cut],
        _ => name,
    }
}

/// Inclusive `[from, to]` bound on ISO dates, compared as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<String>,
    to: Option<String>,
}

impl DateRange {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: non_blank(from),
            to: non_blank(to),
        }
    }

    /// Records without a date are never excluded.
    pub fn contains(&self, date_iso: &str) -> bool {
        let date = date_iso.trim();
        if date.is_empty() {
            return true;
        }
        if self.from.as_deref().is_some_and(|from| date < from) {
            return false;
        }
        if self.to.as_deref().is_some_and(|to| date > to) {
            return false;
        }
        true
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Filter for the alarm and notification collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Stored upper-cased.
    pub severity: Option<String>,
    pub node: Option<NodeFilter>,
    pub range: DateRange,
    pub limit: Limit,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            severity: None,
            node: None,
            range: DateRange::default(),
            limit: Limit::new(EVENT_LIMIT),
        }
    }
}

impl EventQuery {
    pub fn with_severity(mut self, severity: Option<&str>) -> Self {
        self.severity = non_blank(severity).map(|s| s.to_uppercase());
        self
    }

    fn matches(&self, event: &AlarmEvent) -> bool {
        if let Some(severity) = &self.severity
            && event.severity.trim().to_uppercase() != *severity
        {
            return false;
        }
        if let Some(node) = &self.node
            && !node.matches(&event.file_name)
        {
            return false;
        }
        self.range.contains(&event.date_iso)
    }

    pub fn apply(&self, events: &[AlarmEvent]) -> Vec<AlarmEvent> {
        events
            .iter()
            .filter(|e| self.matches(e))
            .take(self.limit.get())
            .cloned()
            .collect()
    }
}

/// Filter for restart records; results come back newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartQuery {
    /// Stored whitespace-free and lower-cased.
    pub type_reason: Option<String>,
    pub node: Option<NodeFilter>,
    pub range: DateRange,
    pub limit: Limit,
}

impl Default for RestartQuery {
    fn default() -> Self {
        Self {
            type_reason: None,
            node: None,
            range: DateRange::default(),
            limit: Limit::new(RESTART_LIMIT),
        }
    }
}

impl RestartQuery {
    pub fn with_type_reason(mut self, type_reason: Option<&str>) -> Self {
        self.type_reason = non_blank(type_reason).map(|t| squash(&t));
        self
    }

    fn matches(&self, restart: &RestartEvent) -> bool {
        if let Some(type_reason) = &self.type_reason
            && squash(&restart.type_reason) != *type_reason
        {
            return false;
        }
        if let Some(node) = &self.node
            && !node.matches(&restart.file_name)
        {
            return false;
        }
        self.range.contains(&restart.date_iso)
    }

    pub fn apply(&self, restarts: &[RestartEvent]) -> Vec<RestartEvent> {
        let mut out: Vec<RestartEvent> = restarts
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        // Stable: equal timestamps keep scan order. Unparseable ones are
        // `None` and end up last.
        out.sort_by_key(|r| Reverse(restart_timestamp(r)));
        out.truncate(self.limit.get());
        out
    }
}

/// Combined `dateIso time` of a restart, `None` when it does not parse.
pub(crate) fn restart_timestamp(restart: &RestartEvent) -> Option<NaiveDateTime> {
    let time = match restart.time.trim() {
        "" => MIDNIGHT,
        t => t,
    };
    let raw = format!("{} {time}", restart.date_iso.trim());
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).ok()
}

fn squash(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Filter for pre-aggregated metric rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricQuery {
    /// Stored normalized, see [`MetricQuery::with_metric`].
    pub metric: Option<String>,
    pub node: Option<NodeFilter>,
    pub limit: Limit,
}

impl Default for MetricQuery {
    fn default() -> Self {
        Self {
            metric: None,
            node: None,
            limit: Limit::new(METRIC_LIMIT),
        }
    }
}

impl MetricQuery {
    /// Whitespace runs collapse to one space and case is ignored, so
    /// `total  DOWNTIME` selects `Total downtime`.
    pub fn with_metric(mut self, metric: Option<&str>) -> Self {
        self.metric = non_blank(metric).map(|m| collapse(&m));
        self
    }

    fn matches(&self, row: &MetricRow) -> bool {
        if let Some(node) = &self.node
            && !node.matches(&row.file_name)
        {
            return false;
        }
        match &self.metric {
            Some(metric) => collapse(&row.metric) == *metric,
            None => true,
        }
    }

    pub fn apply(&self, rows: &[MetricRow]) -> Vec<MetricRow> {
        rows.iter()
            .filter(|r| self.matches(r))
            .take(self.limit.get())
            .cloned()
            .collect()
    }
}

fn collapse(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

use crate::corpus::parse_duration;
use indexmap::IndexMap;
use serde::Serialize;
use std::str::FromStr;

/// Label used for blank keys.
pub const NOT_AVAILABLE: &str = "N/D";

pub const DEFAULT_TOP_N: usize = 5;
pub const MAX_TOP_N: usize = 20;

/// Parallel label / value arrays, the shape chart widgets consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// Size of a top-N chart, clamped to `[1, MAX_TOP_N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopN(usize);

impl TopN {
    pub fn new(n: usize) -> Self {
        Self(n.clamp(1, MAX_TOP_N))
    }

    /// Lenient query-string form: missing or garbage falls back to the default.
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(|r| r.parse().ok()).unwrap_or_default()
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(DEFAULT_TOP_N)
    }
}

impl FromStr for TopN {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(n) => Ok(Self::new(usize::try_from(n.max(0)).unwrap_or(usize::MAX))),
            Err(e) => saturated_count(s).map(Self::new).ok_or(e),
        }
    }
}

/// An integer too large for `i64`, saturated: `usize::MAX`, or 0 when
/// negative. `None` unless `raw` is an optionally signed run of ASCII digits.
pub fn saturated_count(raw: &str) -> Option<usize> {
    let (digits, saturated) = match raw.strip_prefix('-') {
        Some(rest) => (rest, 0),
        None => (raw.strip_prefix('+').unwrap_or(raw), usize::MAX),
    };

    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(saturated)
}

/// Insertion-ordered accumulator.
///
/// Keys keep the position of their first appearance, so a stable sort by
/// value leaves equal totals in encounter order.
#[derive(Debug, Default)]
pub struct Tally {
    totals: IndexMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, amount: u64) {
        let total = self.totals.entry(label_for(key)).or_insert(0);
        *total = total.saturating_add(amount);
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Descending by total; `limit` of `None` keeps every key.
    pub fn into_series(self, limit: Option<usize>) -> ChartSeries {
        let mut entries: Vec<(String, u64)> = self.totals.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        let (labels, data) = entries.into_iter().unzip();
        ChartSeries { labels, data }
    }
}

fn label_for(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        key.to_string()
    }
}

/// Counts occurrences of `key(item)` and keeps the `n` most frequent.
pub fn top_counts<T, F>(items: &[T], key: F, n: TopN) -> ChartSeries
where
    F: Fn(&T) -> &str,
{
    let mut tally = Tally::new();
    for item in items {
        tally.add(key(item), 1);
    }
    tally.into_series(Some(n.get()))
}

/// Full distribution of upper-cased severities, most frequent first.
pub fn severity_distribution<T, F>(items: &[T], severity: F) -> ChartSeries
where
    F: Fn(&T) -> &str,
{
    let mut tally = Tally::new();
    for item in items {
        tally.add(&severity(item).trim().to_uppercase(), 1);
    }
    tally.into_series(None)
}

/// Sums parsed durations (seconds) per key and keeps the `n` largest.
pub fn duration_by_key<T, K, D>(items: &[T], key: K, duration: D, n: TopN) -> ChartSeries
where
    K: Fn(&T) -> &str,
    D: Fn(&T) -> &str,
{
    let mut tally = Tally::new();
    for item in items {
        tally.add(key(item), parse_duration(duration(item)));
    }
    tally.into_series(Some(n.get()))
}

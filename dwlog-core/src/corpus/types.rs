use serde::{Deserialize, Serialize};
use std::fmt;

/// Record type tag carried by alarm and notification lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "AL")]
    Alarm,
    #[serde(rename = "EV")]
    Notification,
}

impl EventKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AL" => Some(Self::Alarm),
            "EV" => Some(Self::Notification),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alarm => "AL",
            Self::Notification => "EV",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `AL` (alarm) or `EV` (notification) line.
///
/// Both kinds share this shape; they only differ in the collection they land in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmEvent {
    pub file_name: String,
    pub date_iso: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub severity: String,
    pub object: String,
    pub title: String,
    pub detail: String,
}

pub type NotificationEvent = AlarmEvent;

/// A node restart occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartEvent {
    pub file_name: String,
    pub date_iso: String,
    pub time: String,
    pub type_reason: String,
    pub value: String,
    pub comment: String,
    /// Free text, see [`crate::corpus::parse_duration`].
    pub duration: String,
}

/// A pre-aggregated statistics line found in the source file.
///
/// Value columns stay raw strings: node exports format them inconsistently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRow {
    pub file_name: String,
    pub metric: String,
    pub node_upgrade: String,
    pub node_manual: String,
    pub node_spontaneous: String,
    pub all_node_restarts: String,
    pub partial_outages: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricName {
    NumberOfOutages,
    TotalDowntime,
    DowntimePerDay,
    DowntimePerOutage,
}

impl MetricName {
    pub const ALL: [MetricName; 4] = [
        MetricName::NumberOfOutages,
        MetricName::TotalDowntime,
        MetricName::DowntimePerDay,
        MetricName::DowntimePerOutage,
    ];

    /// Line prefix that identifies the metric in a source file.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::NumberOfOutages => "Number Of outages",
            Self::TotalDowntime => "Total downtime",
            Self::DowntimePerDay => "Downtime per day",
            Self::DowntimePerOutage => "Downtime per outage",
        }
    }

    pub fn for_line(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| line.starts_with(m.prefix()))
    }
}

/// Output of the record parser for a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    Alarm(AlarmEvent),
    Notification(NotificationEvent),
    Restart(RestartEvent),
}

/// Every record parsed out of the source directory at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Number of `*.log` files that were enumerated (readable or not).
    pub files: usize,
    pub alarms: Vec<AlarmEvent>,
    pub notifications: Vec<NotificationEvent>,
    pub restarts: Vec<RestartEvent>,
    pub metrics: Vec<MetricRow>,
    /// Lines carrying a metric prefix, including those too short to become a row.
    pub metric_lines: usize,
}

impl Corpus {
    pub fn push(&mut self, record: ParsedRecord) {
        match record {
            ParsedRecord::Alarm(ev) => self.alarms.push(ev),
            ParsedRecord::Notification(ev) => self.notifications.push(ev),
            ParsedRecord::Restart(ev) => self.restarts.push(ev),
        }
    }

    /// Merge another corpus in, keeping insertion order.
    pub fn extend(&mut self, other: Corpus) {
        self.files += other.files;
        self.alarms.extend(other.alarms);
        self.notifications.extend(other.notifications);
        self.restarts.extend(other.restarts);
        self.metrics.extend(other.metrics);
        self.metric_lines += other.metric_lines;
    }
}

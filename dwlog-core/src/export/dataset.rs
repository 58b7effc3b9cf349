use crate::corpus::{Corpus, MetricName};
use crate::export::ExportError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

const EVENT_HEADERS: [&str; 8] = [
    "File Name",
    "Data",
    "Ora",
    "Type",
    "Sev",
    "Oggetto",
    "Descrizione",
    "Dettaglio",
];
const EVENT_FIELDS: [&str; 8] = [
    "fileName", "dateIso", "time", "type", "severity", "object", "title", "detail",
];

const METRIC_HEADERS: [&str; 7] = [
    "File Name",
    "Metric",
    "NodeUpgrade",
    "NodeManual",
    "NodeSpontaneous",
    "AllNodeRestarts",
    "PartialOutages",
];
const METRIC_FIELDS: [&str; 7] = [
    "fileName",
    "metric",
    "nodeUpgrade",
    "nodeManual",
    "nodeSpontaneous",
    "allNodeRestarts",
    "partialOutages",
];

const RESTART_HEADERS: [&str; 7] = [
    "File Name",
    "Data",
    "Ora",
    "Tipo/Ragione",
    "Valore",
    "Commento",
    "Durata",
];
const RESTART_FIELDS: [&str; 7] = [
    "fileName",
    "dateIso",
    "time",
    "typeReason",
    "value",
    "comment",
    "duration",
];

const LEGACY_RESTART_HEADERS: [&str; 9] = [
    "File Name",
    "Timestamp (UTC)",
    "RestartType/Reason",
    "SwVersion",
    "SwRelease",
    "RCS Downtime",
    "Appl. Downtime",
    "TN Downtime",
    "RATs Downtime",
];
const LEGACY_RESTART_FIELDS: [&str; 9] = [
    "fileName",
    "timestamp",
    "restartTypeReason",
    "swVersion",
    "swRelease",
    "rcsDowntime",
    "applDowntime",
    "tnDowntime",
    "ratsDowntime",
];

/// Key whose presence marks the current restart layout.
const RESTART_SNIFF_KEY: &str = "typeReason";

/// What a client asked to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Lga,
    Lge,
    Lgd,
    LgdRestarts,
    OutagesCount,
    DowntimeCount,
    Unknown,
}

impl DatasetKind {
    /// Case-insensitive; anything unrecognised is [`DatasetKind::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "LGA" => Self::Lga,
            "LGE" => Self::Lge,
            "LGD" => Self::Lgd,
            "LGD_RESTARTS" => Self::LgdRestarts,
            "OUTAGES_COUNT" => Self::OutagesCount,
            "DOWNTIME_COUNT" => Self::DowntimeCount,
            _ => Self::Unknown,
        }
    }

    /// Prefix of the generated file names.
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Lga => "LGA",
            Self::Lge => "LGE",
            Self::Lgd => "LGD",
            Self::LgdRestarts => "LGD_RESTARTS",
            Self::OutagesCount => "OUTAGES_COUNT",
            Self::DowntimeCount => "DOWNTIME_COUNT",
            Self::Unknown => "DATA",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

/// Header row plus data rows, every cell already rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    fn project(headers: &[&str], fields: &[&str], items: &[Value]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: items
                .iter()
                .map(|item| fields.iter().map(|f| field(item, f)).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolve a dataset to a table.
///
/// `payload` is the client's `data` object. When it carries no records for
/// the requested kind, `load_corpus` is called once and the server's own
/// records are exported instead.
pub fn build_table<F>(
    kind: DatasetKind,
    payload: &Value,
    load_corpus: F,
) -> Result<ExportTable, ExportError>
where
    F: FnOnce() -> Corpus,
{
    let table = match kind {
        DatasetKind::Lga => {
            let items = records_or(payload, "lga", || {
                serde_json::to_value(load_corpus().alarms)
            })?;
            ExportTable::project(&EVENT_HEADERS, &EVENT_FIELDS, &items)
        }
        DatasetKind::Lge => {
            let items = records_or(payload, "lge", || {
                serde_json::to_value(load_corpus().notifications)
            })?;
            ExportTable::project(&EVENT_HEADERS, &EVENT_FIELDS, &items)
        }
        DatasetKind::Lgd => {
            let items = records_or(payload, "lgd", || {
                serde_json::to_value(load_corpus().metrics)
            })?;
            ExportTable::project(&METRIC_HEADERS, &METRIC_FIELDS, &items)
        }
        DatasetKind::LgdRestarts => match payload_records(payload, "lgdRestarts") {
            Some(items) if has_current_layout(&items) => {
                ExportTable::project(&RESTART_HEADERS, &RESTART_FIELDS, &items)
            }
            Some(items) => {
                ExportTable::project(&LEGACY_RESTART_HEADERS, &LEGACY_RESTART_FIELDS, &items)
            }
            None => {
                let items = as_records(serde_json::to_value(load_corpus().restarts)?);
                ExportTable::project(&RESTART_HEADERS, &RESTART_FIELDS, &items)
            }
        },
        DatasetKind::OutagesCount => {
            let items = records_or(payload, "lgd", || {
                serde_json::to_value(load_corpus().metrics)
            })?;
            group_partial_outages(
                &items,
                MetricName::NumberOfOutages,
                "PartialOutages Value",
            )
        }
        DatasetKind::DowntimeCount => {
            let items = records_or(payload, "lgd", || {
                serde_json::to_value(load_corpus().metrics)
            })?;
            group_partial_outages(
                &items,
                MetricName::TotalDowntime,
                "PartialOutages Downtime",
            )
        }
        DatasetKind::Unknown => ExportTable {
            headers: vec!["No data".to_string()],
            rows: Vec::new(),
        },
    };

    Ok(table)
}

/// Non-empty array at `payload[key]`.
fn payload_records(payload: &Value, key: &str) -> Option<Vec<Value>> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .cloned()
}

fn records_or<F>(payload: &Value, key: &str, fallback: F) -> Result<Vec<Value>, ExportError>
where
    F: FnOnce() -> serde_json::Result<Value>,
{
    match payload_records(payload, key) {
        Some(items) => Ok(items),
        None => Ok(as_records(fallback()?)),
    }
}

fn as_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn has_current_layout(items: &[Value]) -> bool {
    items
        .iter()
        .any(|item| item.as_object().is_some_and(|o| o.contains_key(RESTART_SNIFF_KEY)))
}

/// Counts metric rows of one kind per `partialOutages` value.
fn group_partial_outages(items: &[Value], metric: MetricName, value_header: &str) -> ExportTable {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();

    for item in items {
        if field(item, "metric") != metric.prefix() {
            continue;
        }
        groups
            .entry(field(item, "partialOutages"))
            .or_default()
            .push(field(item, "fileName"));
    }

    ExportTable {
        headers: vec![
            value_header.to_string(),
            "Count".to_string(),
            "File Names".to_string(),
        ],
        rows: groups
            .into_iter()
            .map(|(value, files)| vec![value, files.len().to_string(), files.join(", ")])
            .collect(),
    }
}

/// Cell text of `item[key]`: strings verbatim, missing or null empty,
/// anything else as JSON.
fn field(item: &Value, key: &str) -> String {
    match item.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

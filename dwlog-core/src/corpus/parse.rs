use crate::corpus::types::{AlarmEvent, EventKind, ParsedRecord, RestartEvent};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

static TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("valid time regex"));

static COMBINED_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})\s+([0-9]{2}:[0-9]{2}:[0-9]{2})$")
        .expect("valid timestamp regex")
});

static LEGACY_SPACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})\s+([0-9]{2}:[0-9]{2}:[0-9]{2})\s+(AL|EV)\s+([*mMw])\s+(.+)$")
        .expect("valid legacy row regex")
});

/// One layout attempt: a typed record, or `None` to fall through to the next.
type LineParser = fn(&str, &str) -> Option<ParsedRecord>;

/// Layouts in priority order.
const PARSERS: &[LineParser] = &[
    parse_split_timestamp,
    parse_combined_timestamp,
    parse_legacy_spaced,
];

/// Classify a raw log line.
///
/// Returns `None` for blank lines, `=` separators and anything no layout
/// recognises. The parser never fails.
pub fn parse_line(line: &str, file_name: &str) -> Option<ParsedRecord> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('=') {
        return None;
    }

    PARSERS.iter().find_map(|parser| parser(line, file_name))
}

/// `YYYY-MM-DD;HH:MM:SS;TYPE;...`
///
/// `AL`/`EV` become alarms/notifications; any other type with at least six
/// fields is a restart (`type/reason;value;comment;duration`).
fn parse_split_timestamp(line: &str, file_name: &str) -> Option<ParsedRecord> {
    let fields = split_fields(line)?;
    if fields.len() < 3 || !DATE.is_match(fields[0]) || !TIME.is_match(fields[1]) {
        return None;
    }

    let tag = fields[2].trim().to_ascii_uppercase();
    if let Some(kind) = EventKind::from_tag(&tag) {
        let event = AlarmEvent {
            file_name: file_name.to_string(),
            date_iso: fields[0].to_string(),
            time: fields[1].to_string(),
            kind,
            severity: field(&fields, 3),
            object: field(&fields, 4),
            title: field(&fields, 5),
            detail: field(&fields, 6),
        };
        return Some(event_record(event));
    }

    if fields.len() < 6 {
        return None;
    }

    Some(ParsedRecord::Restart(RestartEvent {
        file_name: file_name.to_string(),
        date_iso: fields[0].to_string(),
        time: fields[1].to_string(),
        type_reason: field(&fields, 2),
        value: field(&fields, 3),
        comment: field(&fields, 4),
        duration: field(&fields, 5),
    }))
}

/// `YYYY-MM-DD HH:MM:SS;type/reason;value;comment;duration`
fn parse_combined_timestamp(line: &str, file_name: &str) -> Option<ParsedRecord> {
    let fields = split_fields(line)?;
    if fields.len() < 5 {
        return None;
    }
    let caps = COMBINED_TIMESTAMP.captures(fields[0])?;

    Some(ParsedRecord::Restart(RestartEvent {
        file_name: file_name.to_string(),
        date_iso: caps.get(1)?.as_str().to_string(),
        time: caps.get(2)?.as_str().to_string(),
        type_reason: field(&fields, 1),
        value: field(&fields, 2),
        comment: field(&fields, 3),
        duration: field(&fields, 4),
    }))
}

/// `YYYY-MM-DD HH:MM:SS AL|EV <sev> <title...>` with a single-char severity.
fn parse_legacy_spaced(line: &str, file_name: &str) -> Option<ParsedRecord> {
    let caps = LEGACY_SPACED.captures(line)?;
    let kind = EventKind::from_tag(caps.get(3)?.as_str())?;

    let event = AlarmEvent {
        file_name: file_name.to_string(),
        date_iso: caps.get(1)?.as_str().to_string(),
        time: caps.get(2)?.as_str().to_string(),
        kind,
        severity: caps.get(4)?.as_str().to_string(),
        object: String::new(),
        title: caps.get(5)?.as_str().trim().to_string(),
        detail: String::new(),
    };

    Some(event_record(event))
}

fn split_fields(line: &str) -> Option<Vec<&str>> {
    line.contains(';')
        .then(|| line.split(';').map(str::trim).collect())
}

fn field(fields: &[&str], idx: usize) -> String {
    fields.get(idx).map(|f| f.to_string()).unwrap_or_default()
}

fn event_record(event: AlarmEvent) -> ParsedRecord {
    match event.kind {
        EventKind::Alarm => ParsedRecord::Alarm(event),
        EventKind::Notification => ParsedRecord::Notification(event),
    }
}

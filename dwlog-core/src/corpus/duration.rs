use once_cell::sync::Lazy;
use regex::Regex;

static CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2}):([0-9]{2})$").expect("valid clock regex"));

static LEADING_SECONDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s*s\b").expect("valid leading seconds regex"));

static HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*h").expect("valid hours regex"));
static MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*m").expect("valid minutes regex"));
static SECONDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*s").expect("valid seconds regex"));

/// Converts a free-form duration into seconds.
///
/// Accepted shapes, first match wins:
/// - `H:MM:SS` / `HH:MM:SS`
/// - a leading `<n>s`, anything after it ignored (`1229s (20m29s)` is 1229)
/// - `<n>h`, `<n>m`, `<n>s` tokens anywhere, summed
///
/// Never fails: anything else is 0.
pub fn parse_duration(raw: &str) -> u64 {
    let raw = raw.trim().to_lowercase();
    if raw.is_empty() {
        return 0;
    }

    if let Some(caps) = CLOCK.captures(&raw) {
        let h = number(caps.get(1).map(|m| m.as_str()));
        let m = number(caps.get(2).map(|m| m.as_str()));
        let s = number(caps.get(3).map(|m| m.as_str()));
        return h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(s);
    }

    if let Some(caps) = LEADING_SECONDS.captures(&raw) {
        return number(caps.get(1).map(|m| m.as_str()));
    }

    let unit = |re: &Regex| number(re.captures(&raw).and_then(|c| c.get(1)).map(|m| m.as_str()));

    unit(&HOURS)
        .saturating_mul(3600)
        .saturating_add(unit(&MINUTES).saturating_mul(60))
        .saturating_add(unit(&SECONDS))
}

fn number(digits: Option<&str>) -> u64 {
    digits.and_then(|d| d.parse().ok()).unwrap_or(0)
}

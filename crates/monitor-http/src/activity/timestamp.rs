use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Fields that may carry a transaction timestamp, highest priority first.
pub const TIMESTAMP_FIELDS: [&str; 5] = [
    "timestamp",
    "block_timestamp",
    "created_at",
    "time",
    "block_time",
];

/// Epoch values above this are taken to be milliseconds.
const MILLISECONDS_THRESHOLD: u64 = 1_000_000_000_000;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Interprets one timestamp field value.
///
/// Digit-only strings and non-negative integers are epoch seconds, or epoch
/// milliseconds above 10^12. Other strings are ISO-8601; a trailing `Z` means
/// UTC and values without an offset are read as UTC. Empty, zero and
/// non-scalar values yield `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) if !text.is_empty() => {
            if text.bytes().all(|b| b.is_ascii_digit()) {
                text.parse::<u64>().ok().and_then(from_epoch)
            } else {
                parse_iso8601(text)
            }
        }
        Value::Number(number) => number.as_u64().and_then(from_epoch),
        _ => None,
    }
}

fn from_epoch(value: u64) -> Option<DateTime<Utc>> {
    if value == 0 {
        return None;
    }
    let millis = if value > MILLISECONDS_THRESHOLD {
        value
    } else {
        value.checked_mul(1000)?
    };
    DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
}

fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    let normalized = match text.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => text.to_string(),
    };

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Latest timestamp across a transaction list.
///
/// For each transaction the first field in [`TIMESTAMP_FIELDS`] that parses is
/// used; fields that fail to parse are skipped, as are items that are not objects.
pub fn latest_activity(transactions: &[Value]) -> Option<DateTime<Utc>> {
    transactions
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|transaction| {
            TIMESTAMP_FIELDS
                .iter()
                .find_map(|field| transaction.get(*field).and_then(parse_timestamp))
        })
        .max()
}

/// Whole minutes from `latest` to `now`, rounded down. Future timestamps count as zero.
pub fn minutes_since(latest: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - latest).num_minutes()).unwrap_or(0)
}

//! Persisted journal entry

use chrono::{DateTime, NaiveDateTime, Utc};
use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One classified journal entry
///
/// Reads are lenient field by field: a malformed id, timestamp or tag
/// degrades that field instead of failing the whole journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,

    /// Creation time, stored as RFC 3339 UTC
    #[serde(default = "Utc::now", deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub text: String,

    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: ClassificationResult,
}

impl JournalEntry {
    pub fn new(id: u64, text: impl Into<String>, tags: ClassificationResult) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            text: text.into(),
            tags,
        }
    }
}

/// Naive layouts written by older journals; read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored timestamp; `None` when no known layout matches
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = raw.as_str().and_then(parse_timestamp);
    if parsed.is_none() {
        tracing::debug!("Unreadable entry timestamp {}, using current time", raw);
    }
    Ok(parsed.unwrap_or_else(Utc::now))
}

/// Accepts a number or a numeric string; anything else reads as 0
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let id = match &raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if id.is_none() {
        tracing::debug!("Unreadable entry id {}, using 0", raw);
    }
    Ok(id.unwrap_or(0))
}

/// Parses each tag with the label's lenient `FromStr`; unrecognized or
/// missing tags read as `Unknown`
fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<ClassificationResult, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;

    let mood = raw
        .get("mood")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(MoodLabel::Unknown);
    let energy = raw
        .get("energy")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(EnergyLabel::Unknown);

    Ok(ClassificationResult::new(mood, energy))
}

// Metric domain model - categories, stored records and score field access
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Data categories exposed by the vendor API, one stored document each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Profile,
    Cycles,
    Recovery,
    Sleep,
    Workouts,
}

impl MetricCategory {
    /// Fetch order used by the data download.
    pub const ALL: [MetricCategory; 5] = [
        MetricCategory::Profile,
        MetricCategory::Cycles,
        MetricCategory::Recovery,
        MetricCategory::Sleep,
        MetricCategory::Workouts,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricCategory::Profile => "profile",
            MetricCategory::Cycles => "cycles",
            MetricCategory::Recovery => "recovery",
            MetricCategory::Sleep => "sleep",
            MetricCategory::Workouts => "workouts",
        }
    }

    /// Path of the category below the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            MetricCategory::Profile => "user/profile/basic",
            MetricCategory::Cycles => "cycle",
            MetricCategory::Recovery => "recovery",
            MetricCategory::Sleep => "activity/sleep",
            MetricCategory::Workouts => "activity/workout",
        }
    }

    /// Collections accept a `limit` query parameter, the profile does not.
    pub fn is_collection(&self) -> bool {
        !matches!(self, MetricCategory::Profile)
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dot-separated path to a numeric field inside a record's score object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    pub fn lookup<'a>(&self, object: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        rest.iter()
            .try_fold(object.get(first)?, |value, segment| value.get(segment))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// One scored observation taken from a stored document.
#[derive(Debug, Clone)]
pub struct MetricRecord {
    pub created_at: String,
    /// Parsed `created_at`, still in the offset the record was written in.
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub score: Map<String, Value>,
}

impl MetricRecord {
    /// Returns `None` for records without a score object (pending or unscorable).
    pub fn from_json(record: &Value) -> Option<Self> {
        let score = record.get("score")?.as_object()?.clone();
        let created_at = record
            .get("created_at")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let timestamp = parse_timestamp(&created_at);

        Some(Self {
            created_at,
            timestamp,
            score,
        })
    }

    /// Numeric value at `path`, zero when the field is missing or not a number.
    pub fn value(&self, path: &FieldPath) -> f64 {
        path.lookup(&self.score)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Chronological ordering key; records without a parsed timestamp sort first.
    pub fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.timestamp.map(|ts| ts.with_timezone(&Utc))
    }

    /// Short `MM/DD` display form in the record's own offset, or the first
    /// five characters of the raw string.
    pub fn label(&self) -> String {
        match self.timestamp {
            Some(ts) => ts.format("%m/%d").to_string(),
            None => self.created_at.chars().take(5).collect(),
        }
    }
}

/// Accepts RFC 3339, naive ISO date-times (taken as UTC) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

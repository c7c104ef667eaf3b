//! Job posting record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown (and sorted on) when a job has no category or company tag.
pub const UNKNOWN: &str = "Unknown";

/// A single job posting from the recruiting API.
///
/// Only `id` is required on the wire. Fields the API adds later are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Stable identifier, unique within one fetched page.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Posting title.
    #[serde(default)]
    pub name: String,
    /// Creation timestamp. `None` when missing or unparseable.
    #[serde(default, with = "created_at_format")]
    pub created_at: Option<DateTime<Utc>>,
    /// Name/value tags; `category` and `company` live here.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    /// Free-text description (renderer only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Skills list (renderer only).
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    /// Date ranges such as the start date (renderer only).
    #[serde(default, deserialize_with = "null_as_default")]
    pub ranges_date: Vec<DateRange>,
}

/// A name/value tag attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// A skill attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

/// A named date range (e.g. the start date window).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_max: Option<String>,
}

impl Job {
    /// Create a job with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
            tags: Vec::new(),
            summary: None,
            skills: Vec::new(),
            ranges_date: Vec::new(),
        }
    }

    /// Set the creation timestamp from a string (RFC 3339 or `YYYY-MM-DD`).
    pub fn with_created_at(mut self, created_at: &str) -> Self {
        self.created_at = parse_timestamp(created_at);
        self
    }

    /// Append a tag.
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }

    /// Value of the first tag whose name matches case-insensitively.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.tags
            .iter()
            .find(|t| t.name.to_lowercase() == name)
            .and_then(|t| t.value.as_deref())
    }

    /// The job's category tag, if any.
    pub fn category(&self) -> Option<&str> {
        self.tag_value("category")
    }

    /// The job's company tag, if any.
    pub fn company(&self) -> Option<&str> {
        self.tag_value("company")
    }

    /// Category used for sorting and display.
    pub fn category_or_unknown(&self) -> &str {
        self.category().unwrap_or(UNKNOWN)
    }

    /// Start of the first date range, if it parses.
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.ranges_date
            .first()
            .and_then(|r| r.value_min.as_deref())
            .and_then(parse_timestamp)
    }
}

/// Parse the timestamp shapes the recruiting API produces.
///
/// Accepts RFC 3339, ISO 8601 with a `+0000` style offset, naive
/// date-times (taken as UTC) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Ids arrive as strings from most boards and as integers from some.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

mod created_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_timestamp))
    }
}

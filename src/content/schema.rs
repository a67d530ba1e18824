//! Post schema validation
//!
//! Turns a raw front-matter mapping into a [`PostRecord`], coercing the
//! publication date from any of the representations authors use.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::{Mapping, Value};

use super::post::PostRecord;
use super::slug::is_valid_slug;
use crate::error::SchemaError;

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const PUB_DATE: &str = "pubDate";
pub const SLUG: &str = "slug";

/// Offset-less date/time formats, read as UTC
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A publication date as supplied by the author, before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// A textual timestamp
    Text(String),
    /// Milliseconds since the Unix epoch
    EpochMillis(f64),
    /// An already-typed date
    Date(DateTime<Utc>),
}

impl DateInput {
    /// Take a date input from a YAML value, if it has a coercible shape
    fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(DateInput::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(DateInput::EpochMillis),
            _ => None,
        }
    }

    /// Coerce into the canonical date type
    pub fn coerce(&self) -> Option<DateTime<Utc>> {
        match self {
            DateInput::Text(s) => parse_date_string(s),
            DateInput::EpochMillis(ms) if ms.is_finite() => {
                DateTime::from_timestamp_millis(ms.trunc() as i64)
            }
            DateInput::EpochMillis(_) => None,
            DateInput::Date(dt) => Some(*dt),
        }
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        DateInput::Date(dt)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        DateInput::EpochMillis(ms as f64)
    }
}

/// Validate a raw front-matter mapping into a post record
pub fn validate(entry: &str, raw: &Mapping) -> Result<PostRecord, SchemaError> {
    let title = required_string(entry, raw, TITLE)?;
    let description = required_string(entry, raw, DESCRIPTION)?;

    let date_value = raw.get(PUB_DATE).ok_or_else(|| SchemaError::MissingField {
        entry: entry.to_string(),
        field: PUB_DATE,
    })?;
    let pub_date = DateInput::from_yaml(date_value).ok_or_else(|| SchemaError::InvalidDate {
        entry: entry.to_string(),
        field: PUB_DATE,
        value: describe(date_value),
    })?;

    let slug = required_string(entry, raw, SLUG)?;

    build(entry, title, description, pub_date, slug)
}

/// Build a post record from typed parts, enforcing the same invariants as [`validate`]
pub fn build(
    entry: &str,
    title: impl Into<String>,
    description: impl Into<String>,
    pub_date: impl Into<DateInput>,
    slug: impl Into<String>,
) -> Result<PostRecord, SchemaError> {
    let pub_date = pub_date.into();
    let pub_date = pub_date.coerce().ok_or_else(|| SchemaError::InvalidDate {
        entry: entry.to_string(),
        field: PUB_DATE,
        value: match &pub_date {
            DateInput::Text(s) => s.clone(),
            DateInput::EpochMillis(ms) => ms.to_string(),
            DateInput::Date(dt) => dt.to_rfc3339(),
        },
    })?;

    let slug = slug.into();
    if !is_valid_slug(&slug) {
        return Err(SchemaError::InvalidSlug {
            entry: entry.to_string(),
            slug,
        });
    }

    Ok(PostRecord {
        title: title.into(),
        description: description.into(),
        pub_date,
        slug,
    })
}

fn required_string(
    entry: &str,
    raw: &Mapping,
    field: &'static str,
) -> Result<String, SchemaError> {
    match raw.get(field) {
        None => Err(SchemaError::MissingField {
            entry: entry.to_string(),
            field,
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::WrongType {
            entry: entry.to_string(),
            field,
            expected: "string",
            found: type_name(other),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| type_name(value).to_string())
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

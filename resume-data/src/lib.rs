//! JSON entry feed for the resume timeline.
//!
//! The feed is either a bare array of entries or an object carrying an
//! `entries` array. Dates may be `YYYY-MM-DD`, `YYYY-MM` or RFC 3339; an end
//! date that is `null`, absent or `"present"` marks the entry as ongoing.

use chrono::{DateTime, NaiveDate, Utc};
use resume_core::{Entry, TimelineError};
use serde_json::Value;
use tracing::debug;

/// Read entries from a JSON string.
pub fn parse_entries_str(feed_json: &str) -> Result<Vec<Entry>, TimelineError> {
    let value: Value =
        serde_json::from_str(feed_json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    parse_entries_value(&value)
}

/// Read entries from a `serde_json::Value`, keeping feed order.
pub fn parse_entries_value(feed: &Value) -> Result<Vec<Entry>, TimelineError> {
    let items = match feed {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("entries")
            .and_then(Value::as_array)
            .ok_or_else(|| TimelineError::Parse("Expected an `entries` array".to_string()))?,
        other => {
            return Err(TimelineError::Parse(format!(
                "Expected an array or object, received {}",
                value_kind(other)
            )))
        }
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(entries = entries.len(), "parsed entry feed");
    Ok(entries)
}

fn parse_entry(index: usize, item: &Value) -> Result<Entry, TimelineError> {
    let title = text_field(item, "title").ok_or(TimelineError::MissingData {
        index,
        field: "title",
    })?;

    let from_text = item
        .get("from")
        .and_then(Value::as_str)
        .ok_or(TimelineError::MissingData {
            index,
            field: "from",
        })?;
    let from = parse_moment(from_text).ok_or_else(|| invalid_date(index, "from", from_text))?;

    let to = match item.get("to") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if is_present_marker(text) => None,
        Some(Value::String(text)) => {
            Some(parse_moment(text).ok_or_else(|| invalid_date(index, "to", text))?)
        }
        Some(other) => {
            return Err(TimelineError::Parse(format!(
                "Entry {index}: `to` must be a string or null, received {}",
                value_kind(other)
            )))
        }
    };

    Ok(Entry {
        title,
        institution: text_field(item, "institution").unwrap_or_default(),
        location: text_field(item, "location").unwrap_or_default(),
        from,
        to,
    })
}

fn text_field(item: &Value, field: &str) -> Option<String> {
    item.get(field)
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
}

/// Only the literal word marks an open end; a blank string is a bad date.
fn is_present_marker(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("present")
}

fn invalid_date(index: usize, field: &str, text: &str) -> TimelineError {
    TimelineError::Parse(format!("Entry {index}: invalid `{field}` date {text:?}"))
}

/// Date-only values land on midnight UTC.
fn parse_moment(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    parse_datetime(value)
        .or_else(|| parse_date(value).and_then(midnight))
        .or_else(|| parse_month(value).and_then(midnight))
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

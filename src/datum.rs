use chrono::{DateTime, NaiveDate, Utc};
use derive_deref::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// Field holding an alert's status.
pub const STATUS_KEY: &str = "status";

/// One row of list data. The shape is owned by whoever fetched it; readers
/// only look up the fields they are configured with.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Datum(Map<String, Value>);

impl Datum {
  pub fn new(fields: Map<String, Value>) -> Self {
    Datum(fields)
  }

  /// Looks up a dotted path such as `branch.name` through nested objects.
  pub fn lookup(&self, path: &str) -> Option<&Value> {
    let mut parts = path.split('.');
    let mut current = self.0.get(parts.next()?)?;
    for part in parts {
      current = current.as_object()?.get(part)?;
    }
    Some(current)
  }

  /// The display text of the value at `path`. Nulls, objects and arrays have no text.
  pub fn text(&self, path: &str) -> Option<String> {
    match self.lookup(path)? {
      Value::String(s) => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      Value::Bool(b) => Some(b.to_string()),
      Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
  }

  pub fn alert_status(&self) -> Option<AlertStatus> {
    self.0.get(STATUS_KEY)?.as_str()?.parse().ok()
  }

  /// Whether any string value, at any depth, contains `needle` ignoring case.
  pub fn matches(&self, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    self.0.values().any(|value| value_matches(value, &needle))
  }

  /// The calendar date (UTC) of the RFC 3339 timestamp at `path`.
  pub fn date(&self, path: &str) -> Option<NaiveDate> {
    let raw = self.lookup(path)?.as_str()?;
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc).date_naive())
  }
}

impl From<Map<String, Value>> for Datum {
  fn from(fields: Map<String, Value>) -> Self {
    Datum(fields)
  }
}

fn value_matches(value: &Value, needle: &str) -> bool {
  match value {
    Value::String(s) => s.to_lowercase().contains(needle),
    Value::Array(items) => items.iter().any(|v| value_matches(v, needle)),
    Value::Object(fields) => fields.values().any(|v| value_matches(v, needle)),
    _ => false,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
  Active,
  Dismissed,
  Silenced,
}

/// Formats an RFC 3339 timestamp for people, e.g. `Jan 1, 2024 00:00:00 UTC`.
/// Values that do not parse are returned unchanged.
pub fn fmt_date_time(raw: &str) -> String {
  match DateTime::parse_from_rfc3339(raw) {
    Ok(dt) => dt.with_timezone(&Utc).format("%b %-d, %Y %H:%M:%S UTC").to_string(),
    Err(_) => raw.to_string(),
  }
}

/// Joins the text of each present key with `separator`.
pub fn fmt_values(datum: &Datum, keys: &[String], separator: &str) -> String {
  keys.iter().filter_map(|key| datum.text(key)).collect::<Vec<_>>().join(separator)
}

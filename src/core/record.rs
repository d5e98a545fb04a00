//! Loosely-typed account records.
//!
//! Upstream responses are arbitrary JSON objects. They are kept as maps of
//! [`FieldValue`] so that date/time fields can be carried as real chrono values
//! and re-emitted as ISO-8601 text when the response is serialized.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::errors::OtfError;

pub type Record = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    Time(NaiveTime),
    List(Vec<FieldValue>),
    Map(Record),
    /// Raw bytes have no JSON form; serializing one fails the whole response.
    Binary(Vec<u8>),
}

impl FieldValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Record> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::UInt(u) => Some(*u as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Converts decoded JSON, promoting date-like strings to chrono values.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => parse_temporal(&s).unwrap_or(FieldValue::String(s)),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from_json).collect())
            }
            Value::Object(map) => FieldValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

fn parse_temporal(s: &str) -> Option<FieldValue> {
    // Cheap pre-check: every form we accept starts with a 4-digit year.
    let bytes = s.as_bytes();
    if bytes.len() < 10 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(FieldValue::DateTime(dt));
    }
    if s.len() == 10 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(FieldValue::Date(d));
        }
    }
    None
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::UInt(u) => serializer.serialize_u64(*u),
            FieldValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            FieldValue::Float(f) => Err(S::Error::custom(format!(
                "float value {f} is not JSON serializable"
            ))),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::DateTime(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            FieldValue::Time(t) => serializer.serialize_str(&t.format("%H:%M:%S%.f").to_string()),
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Map(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
            FieldValue::Binary(bytes) => Err(S::Error::custom(format!(
                "binary value of {} bytes is not JSON serializable",
                bytes.len()
            ))),
        }
    }
}

/// Strips a `{"data": ...}` envelope if present.
#[must_use]
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decodes a single upstream object.
///
/// # Errors
///
/// Returns `OtfError::UnexpectedResponse` if the payload is not an object.
pub fn record_from_json(value: Value) -> Result<Record, OtfError> {
    match FieldValue::from_json(unwrap_data(value)) {
        FieldValue::Map(record) => Ok(record),
        other => Err(OtfError::UnexpectedResponse(format!(
            "expected an object, got {}",
            kind_name(&other)
        ))),
    }
}

/// Decodes a list of upstream objects.
///
/// # Errors
///
/// Returns `OtfError::UnexpectedResponse` if the payload is not an array of objects.
pub fn records_from_json(value: Value) -> Result<Vec<Record>, OtfError> {
    match FieldValue::from_json(unwrap_data(value)) {
        FieldValue::List(items) => items
            .into_iter()
            .map(|item| match item {
                FieldValue::Map(record) => Ok(record),
                other => Err(OtfError::UnexpectedResponse(format!(
                    "expected an array of objects, found {}",
                    kind_name(&other)
                ))),
            })
            .collect(),
        other => Err(OtfError::UnexpectedResponse(format!(
            "expected an array, got {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Null => "null",
        FieldValue::Bool(_) => "bool",
        FieldValue::Int(_) | FieldValue::UInt(_) | FieldValue::Float(_) => "number",
        FieldValue::String(_) | FieldValue::DateTime(_) | FieldValue::Date(_) | FieldValue::Time(_) => {
            "string"
        }
        FieldValue::List(_) => "array",
        FieldValue::Map(_) => "object",
        FieldValue::Binary(_) => "bytes",
    }
}

//! Convenience view over class-like records (classes, bookings, performance summaries).

use serde::Serialize;

use crate::core::record::{FieldValue, Record};

const NESTED_CLASS_KEYS: &[&str] = &["otf_class", "class", "otfClass"];
const CLASS_NAME_KEYS: &[&str] = &["name", "class_name", "className"];
const STARTS_AT_KEYS: &[&str] = &["starts_at", "starts_at_local", "start_time", "startsAt", "startDateTime"];
const COACH_KEYS: &[&str] = &["coach", "instructor"];
const STUDIO_KEYS: &[&str] = &["studio"];
const FIRST_NAME_KEYS: &[&str] = &["first_name", "firstName"];
const LAST_NAME_KEYS: &[&str] = &["last_name", "lastName"];

/// The shapes a coach field arrives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachInfo {
    PlainName(String),
    StructuredName {
        first: Option<String>,
        last: Option<String>,
    },
    Absent,
}

impl CoachInfo {
    #[must_use]
    pub fn from_field(value: Option<&FieldValue>) -> Self {
        match value {
            Some(FieldValue::String(name)) => CoachInfo::PlainName(name.clone()),
            Some(FieldValue::Map(coach)) => CoachInfo::StructuredName {
                first: lookup(coach, FIRST_NAME_KEYS).and_then(string_of),
                last: lookup(coach, LAST_NAME_KEYS).and_then(string_of),
            },
            _ => CoachInfo::Absent,
        }
    }
}

/// Display name for a coach, or `None` when nothing usable is present.
#[must_use]
pub fn resolve_coach_name(coach: &CoachInfo) -> Option<String> {
    match coach {
        CoachInfo::PlainName(name) => Some(name.clone()),
        CoachInfo::StructuredName { first, last } => {
            let joined = [first.as_deref(), last.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (!joined.is_empty()).then_some(joined)
        }
        CoachInfo::Absent => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlattenedRecord {
    pub class_name: Option<String>,
    pub starts_at: Option<FieldValue>,
    pub coach: Option<String>,
    pub studio_name: Option<String>,
    pub raw: Record,
}

#[must_use]
pub fn flatten_record(record: &Record) -> FlattenedRecord {
    let nested = lookup(record, NESTED_CLASS_KEYS).and_then(FieldValue::as_map);
    let find = |keys: &[&str]| {
        lookup(record, keys).or_else(|| nested.and_then(|class| lookup(class, keys)))
    };

    let studio_name = find(STUDIO_KEYS)
        .and_then(FieldValue::as_map)
        .and_then(|studio| lookup(studio, &["name", "studio_name", "studioName"]))
        .and_then(string_of);

    FlattenedRecord {
        class_name: find(CLASS_NAME_KEYS).and_then(string_of),
        starts_at: find(STARTS_AT_KEYS).cloned(),
        coach: resolve_coach_name(&CoachInfo::from_field(find(COACH_KEYS))),
        studio_name,
        raw: record.clone(),
    }
}

#[must_use]
pub fn flatten_records(records: &[Record]) -> Vec<FlattenedRecord> {
    records.iter().map(flatten_record).collect()
}

/// First present, non-null value among `keys`.
fn lookup<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a FieldValue> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn string_of(value: &FieldValue) -> Option<String> {
    value.as_str().map(ToString::to_string)
}

//! Canonical JSON text for before/after/meta captures, and its lenient rendering.
//!
//! Encoding is strict: a value that cannot be represented as JSON is an error,
//! raised while the audit record is being built. Rendering is total: stored
//! text that no longer parses is shown as-is.

use crate::domain::errors::{DomainError, DomainResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Shown in place of a snapshot that was never captured.
pub const PLACEHOLDER: &str = "—";

/// Serialized snapshot, guaranteed to be well-formed JSON with sorted object keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|err| DomainError::Serialization(err.to_string()))?;
        let text = serde_json::to_string(&canonicalize(value))
            .map_err(|err| DomainError::Serialization(err.to_string()))?;
        Ok(Self(text))
    }

    pub fn encode_optional<T: Serialize + ?Sized>(value: Option<&T>) -> DomainResult<Option<Self>> {
        value.map(Self::encode).transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Snapshot> for String {
    fn from(value: Snapshot) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotDisplay {
    Pretty(String),
    Raw(String),
    Absent,
}

impl SnapshotDisplay {
    pub fn kind(&self) -> &'static str {
        match self {
            SnapshotDisplay::Pretty(_) => "pretty",
            SnapshotDisplay::Raw(_) => "raw",
            SnapshotDisplay::Absent => "absent",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SnapshotDisplay::Pretty(text) | SnapshotDisplay::Raw(text) => text,
            SnapshotDisplay::Absent => PLACEHOLDER,
        }
    }
}

/// Re-indents `text` when it parses as JSON, otherwise hands it back untouched.
pub fn decode_for_display(text: &str) -> SnapshotDisplay {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => match serde_json::to_string_pretty(&canonicalize(value)) {
            Ok(pretty) => SnapshotDisplay::Pretty(pretty),
            Err(_) => SnapshotDisplay::Raw(text.to_string()),
        },
        Err(_) => SnapshotDisplay::Raw(text.to_string()),
    }
}

pub fn display_field(text: Option<&str>) -> SnapshotDisplay {
    text.map_or(SnapshotDisplay::Absent, decode_for_display)
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, canonicalize(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

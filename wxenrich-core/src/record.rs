//! Flat enriched output record
//!
//! One record is built per input message, handed to the caller, and
//! discarded. Keys follow the downstream naming convention: identifying
//! tags are prefixed `t_`, measured and derived numeric fields `f_`, and
//! the timestamp is plain `time`.
//!
//! A field whose formula was not applicable is *absent* from the record,
//! not present-with-null; serialization therefore omits the key entirely.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single enriched-record value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// Message timestamp, passed through from the sensor reading
    Time(DateTime<Utc>),
    /// Tag value such as the model identifier
    Str(String),
    /// Integer value such as the sensor ID
    Int(i64),
    /// Measured or derived quantity
    Float(f64),
}

impl Value {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

/// Flat mapping of field name to value, built fresh per input message
///
/// Backed by a `BTreeMap` so serialization order is deterministic; the
/// consumer does not care about order, determinism just makes identical
/// inputs produce identical output bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EnrichedRecord(BTreeMap<String, Value>);

impl EnrichedRecord {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `time` field
    pub fn set_time(&mut self, time: DateTime<Utc>) {
        self.0.insert("time".into(), Value::Time(time));
    }

    /// Set a tag field (caller supplies the `t_`-prefixed key)
    pub fn set_tag(&mut self, key: &str, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Set a measurement field (caller supplies the `f_`-prefixed key)
    pub fn set_field(&mut self, key: &str, value: f64) {
        self.0.insert(key.into(), Value::Float(value));
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the record carries the named field at all
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

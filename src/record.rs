//! Typed input boundary for raw prediction requests.
//!
//! A request arrives as a loosely typed field→value mapping (a JSON object in
//! practice). [`RawValue`] pins each value down to one of three shapes at the
//! boundary so that the encoder can report `MissingFeature`/`TypeMismatch`
//! before any encoding logic runs.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single raw field value: an integer code, a float, or free text.
///
/// Deserializes untagged from JSON scalars, so `2`, `2.5` and `"2"` map to
/// `Int(2)`, `Float(2.5)` and `Text("2")` respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Interpret the value as a number, if possible.
    ///
    /// Text is accepted when it parses as a float, mirroring how the training
    /// exports tolerate stringified numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Int(i) => Some(*i as f64),
            RawValue::Float(f) => Some(*f),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Canonical comparable label for categorical matching.
    ///
    /// Training-time levels were recorded as integer strings, so integer
    /// values render without a decimal point and integral floats collapse to
    /// the same form (`2`, `2.0` and `"2"` all compare as `"2"`).
    pub fn canonical_label(&self) -> Cow<'_, str> {
        match self {
            RawValue::Int(i) => Cow::Owned(i.to_string()),
            RawValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Cow::Owned((*f as i64).to_string())
                } else {
                    Cow::Owned(f.to_string())
                }
            }
            RawValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

/// One raw prediction request: a field→value mapping.
///
/// Backed by a `BTreeMap`, so two records with the same entries are equal and
/// encode identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Look up a field value.
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }

    /// Remove a field, returning its value if present.
    pub fn remove(&mut self, field: &str) -> Option<RawValue> {
        self.fields.remove(field)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

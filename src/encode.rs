//! Raw-record encoding: one-hot expansion with dropped baseline, zero-fill
//! for absent columns, fixed output order.
//!
//! The single most important invariant in the crate lives here: for every
//! input that does not fail with [`InputError`], the output vector has
//! exactly one slot per [`Schema::encoded_columns`] entry, in that order.
//! The frozen model weights are only meaningful against that layout.

use crate::record::RawRecord;
use crate::schema::Schema;

/// Per-request input validation failures.
///
/// These are recovered at the pipeline boundary and returned to the caller;
/// they never abort the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// A required numeric field was absent from the record.
    #[error("missing required numeric field: {0}")]
    MissingFeature(String),

    /// A numeric field's value could not be interpreted as a number.
    #[error("field {field} is not numeric: got {value:?}")]
    TypeMismatch { field: String, value: String },
}

/// Encode one raw record into the schema's fixed column order.
///
/// Numeric fields are copied verbatim (scaling happens later). Each
/// categorical field expands to one 0/1 indicator per non-baseline level.
/// An absent categorical field, the baseline level, and an unknown level all
/// encode as all-zero indicators; unknown levels are additionally logged at
/// debug level. This fallback is deliberate: it reproduces the training-time
/// "align to fixed columns, fill missing with zero" behavior, and rejecting
/// unknown levels would change what the service accepts.
pub fn encode(record: &RawRecord, schema: &Schema) -> Result<Vec<f64>, InputError> {
    let mut out = Vec::with_capacity(schema.num_encoded());

    for field in schema.numeric_fields() {
        let value = record
            .get(field)
            .ok_or_else(|| InputError::MissingFeature(field.clone()))?;
        let number = value.as_number().ok_or_else(|| InputError::TypeMismatch {
            field: field.clone(),
            value: value.canonical_label().into_owned(),
        })?;
        out.push(number);
    }

    for field in schema.categorical_fields() {
        let label = record.get(field.name()).map(|v| v.canonical_label());

        if let Some(label) = label.as_deref() {
            if !field.knows(label) {
                tracing::debug!(
                    field = field.name(),
                    label,
                    "unknown categorical level, encoding as baseline"
                );
            }
        }

        for level in field.indicator_levels() {
            let hit = label.as_deref() == Some(level);
            out.push(if hit { 1.0 } else { 0.0 });
        }
    }

    debug_assert_eq!(out.len(), schema.num_encoded());
    Ok(out)
}

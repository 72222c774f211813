//! Serde document types for the JSON artifact files.
//!
//! The training side exports two small JSON documents (scaler statistics and
//! model parameters). Depending on the exporter, numeric values may arrive as
//! JSON numbers or as stringified numbers ("1.5", "1.5E0"), so scalars go
//! through a tolerant deserializer instead of plain `f64`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an f64 that may be a JSON number or a stringified number.
fn f64_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    let value = Value::deserialize(deserializer)?;
    value_to_f64(&value).map_err(SerdeError::custom)
}

/// Deserialize a sequence of f64s, each a number or a stringified number.
fn f64_seq<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .iter()
        .map(|v| value_to_f64(v).map_err(SerdeError::custom))
        .collect()
}

fn value_to_f64(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number out of f64 range: {n}")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("cannot parse number from string: {s:?}")),
        other => Err(format!("expected number or string, got {other}")),
    }
}

/// Scaler artifact document: frozen standardization statistics.
///
/// `feature_names`, `mean` and `scale` are parallel arrays, one entry per
/// numeric field, in the schema's numeric field order.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerDoc {
    pub feature_names: Vec<String>,
    #[serde(deserialize_with = "f64_seq")]
    pub mean: Vec<f64>,
    /// Per-field standard deviation. `std` is accepted as an alias.
    #[serde(deserialize_with = "f64_seq", alias = "std")]
    pub scale: Vec<f64>,
}

/// Model artifact document: frozen linear coefficients.
///
/// `columns` must list the encoded columns in exactly the order the weights
/// were trained against; `weights` is parallel to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDoc {
    pub columns: Vec<String>,
    #[serde(deserialize_with = "f64_seq")]
    pub weights: Vec<f64>,
    #[serde(deserialize_with = "f64_any", alias = "intercept")]
    pub bias: f64,
}

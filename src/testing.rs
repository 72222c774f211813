//! Shared fixtures for unit tests, integration tests and benches.
//!
//! The reference artifacts are synthetic but shaped like a real training
//! export: plausible standardization statistics for the five numeric fields
//! and logistic-regression coefficients over the 21 encoded columns.

use crate::artifacts::{ArtifactStore, ModelParams, ScalerParams};
use crate::pipeline::Pipeline;
use crate::record::RawRecord;
use crate::schema::Schema;

/// Standardization statistics for the reference schema's numeric fields:
/// `age, trestbps, chol, thalach, oldpeak`.
pub const REFERENCE_STATS: [(f64, f64); 5] = [
    (54.37, 9.08),
    (131.62, 17.54),
    (246.26, 51.83),
    (149.65, 22.91),
    (1.04, 1.16),
];

/// Coefficients for the reference schema's 21 encoded columns, in encoded
/// column order.
pub const REFERENCE_WEIGHTS: [f64; 21] = [
    0.15,  // age
    0.22,  // trestbps
    0.18,  // chol
    -0.35, // thalach
    0.42,  // oldpeak
    -0.85, // sex_0
    0.61,  // cp_1
    0.94,  // cp_2
    0.77,  // cp_3
    0.05,  // fbs_1
    0.21,  // restecg_1
    0.34,  // restecg_2
    0.66,  // exang_1
    0.48,  // slope_1
    -0.31, // slope_2
    0.79,  // ca_1
    1.12,  // ca_2
    1.35,  // ca_3
    0.88,  // ca_4
    0.27,  // thal_2
    0.96,  // thal_3
];

/// Bias of the reference model.
pub const REFERENCE_BIAS: f64 = -0.41;

/// Artifact store holding the reference statistics and coefficients.
pub fn reference_artifacts(schema: &Schema) -> ArtifactStore {
    ArtifactStore::from_parts(
        ScalerParams::new(REFERENCE_STATS.to_vec()),
        ModelParams::new(REFERENCE_WEIGHTS.to_vec(), REFERENCE_BIAS),
        schema,
    )
    .expect("reference artifacts match the reference schema")
}

/// A ready-to-use pipeline over the reference schema and artifacts.
pub fn reference_pipeline() -> Pipeline {
    let schema = Schema::reference();
    let artifacts = reference_artifacts(&schema);
    Pipeline::new(schema, artifacts)
}

/// A complete, well-formed record over the reference schema.
pub fn sample_record() -> RawRecord {
    RawRecord::new()
        .with("age", 55)
        .with("trestbps", 120)
        .with("chol", 200)
        .with("thalach", 150)
        .with("oldpeak", 1.0)
        .with("sex", 1)
        .with("cp", 2)
        .with("fbs", 0)
        .with("restecg", 0)
        .with("exang", 0)
        .with("slope", 1)
        .with("ca", 0)
        .with("thal", 2)
}

/// The reference scaler artifact as a JSON document.
pub fn reference_scaler_json() -> String {
    let schema = Schema::reference();
    serde_json::json!({
        "feature_names": schema.numeric_fields(),
        "mean": REFERENCE_STATS.iter().map(|(m, _)| *m).collect::<Vec<_>>(),
        "scale": REFERENCE_STATS.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
    })
    .to_string()
}

/// The reference model artifact as a JSON document.
pub fn reference_model_json() -> String {
    let schema = Schema::reference();
    serde_json::json!({
        "columns": schema.encoded_columns(),
        "weights": REFERENCE_WEIGHTS.to_vec(),
        "bias": REFERENCE_BIAS,
    })
    .to_string()
}

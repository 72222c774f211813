//! Frozen training artifacts: scaler statistics and model parameters.
//!
//! The [`ArtifactStore`] is loaded once at process start, validated against
//! the [`Schema`] as a single atomic unit, and never mutated afterwards. Any
//! load or validation failure is an [`ArtifactError`]: the process must not
//! begin serving on a partial or corrupt store, and these errors are never
//! surfaced per-request.

mod format;

pub use format::{ModelDoc, ScalerDoc};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::schema::Schema;

/// Startup-fatal artifact failures.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("I/O error reading {artifact}: {source}")]
    Io {
        artifact: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {artifact} document: {source}")]
    Json {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{artifact} column {index}: expected {expected:?}, got {got:?}")]
    ColumnMismatch {
        artifact: &'static str,
        index: usize,
        expected: String,
        got: String,
    },

    #[error("{artifact} {what} length {got} does not match schema ({expected})")]
    LengthMismatch {
        artifact: &'static str,
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{artifact} {what}[{index}] is not finite")]
    NonFinite {
        artifact: &'static str,
        what: &'static str,
        index: usize,
    },
}

const SCALER: &str = "scaler";
const MODEL: &str = "model";

/// Frozen `(mean, std)` per numeric field, in schema numeric field order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerParams {
    stats: Vec<(f64, f64)>,
}

impl ScalerParams {
    /// Wrap per-field statistics. Validation against a schema happens in
    /// [`ArtifactStore::from_parts`].
    pub fn new(stats: Vec<(f64, f64)>) -> Self {
        Self { stats }
    }

    /// Number of numeric fields covered.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether no statistics are present.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// `(mean, std)` pairs in numeric field order.
    pub fn stats(&self) -> &[(f64, f64)] {
        &self.stats
    }
}

/// Frozen linear coefficients: one weight per encoded column plus a bias.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    weights: Box<[f64]>,
    bias: f64,
}

impl ModelParams {
    /// Wrap weights and bias. Validation against a schema happens in
    /// [`ArtifactStore::from_parts`].
    pub fn new(weights: impl Into<Box<[f64]>>, bias: f64) -> Self {
        Self {
            weights: weights.into(),
            bias,
        }
    }

    /// Weights in encoded column order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The scalar bias (intercept).
    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Number of weighted columns.
    pub fn num_columns(&self) -> usize {
        self.weights.len()
    }
}

/// Immutable store of all frozen parameters the pipeline needs.
///
/// Construct once at startup via [`ArtifactStore::load`] (files) or
/// [`ArtifactStore::from_parts`] (in-memory), share by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    scaler: ScalerParams,
    model: ModelParams,
}

impl ArtifactStore {
    /// Load both artifact files and validate them against the schema as one
    /// atomic unit.
    pub fn load(
        scaler_path: impl AsRef<Path>,
        model_path: impl AsRef<Path>,
        schema: &Schema,
    ) -> Result<Self, ArtifactError> {
        let scaler = open(scaler_path.as_ref(), SCALER)?;
        let model = open(model_path.as_ref(), MODEL)?;
        Self::from_readers(scaler, model, schema)
    }

    /// Load both artifacts from readers (tests, embedded bytes, blob stores).
    pub fn from_readers<R1: Read, R2: Read>(
        scaler: R1,
        model: R2,
        schema: &Schema,
    ) -> Result<Self, ArtifactError> {
        let scaler_doc: ScalerDoc =
            serde_json::from_reader(scaler).map_err(|source| ArtifactError::Json {
                artifact: SCALER,
                source,
            })?;
        let model_doc: ModelDoc =
            serde_json::from_reader(model).map_err(|source| ArtifactError::Json {
                artifact: MODEL,
                source,
            })?;
        Self::from_docs(scaler_doc, model_doc, schema)
    }

    /// Validate parsed documents and construct the store.
    pub fn from_docs(
        scaler: ScalerDoc,
        model: ModelDoc,
        schema: &Schema,
    ) -> Result<Self, ArtifactError> {
        check_names(SCALER, &scaler.feature_names, schema.numeric_fields())?;
        check_len(SCALER, "mean", scaler.mean.len(), schema.num_numeric())?;
        check_len(SCALER, "scale", scaler.scale.len(), schema.num_numeric())?;

        check_names(MODEL, &model.columns, schema.encoded_columns())?;
        check_len(MODEL, "weights", model.weights.len(), schema.num_encoded())?;

        let stats = scaler.mean.into_iter().zip(scaler.scale).collect();
        Self::from_parts(
            ScalerParams::new(stats),
            ModelParams::new(model.weights, model.bias),
            schema,
        )
    }

    /// Construct from in-memory parameters, with the same validation the
    /// file loaders apply: lengths must match the schema and every parameter
    /// must be finite.
    pub fn from_parts(
        scaler: ScalerParams,
        model: ModelParams,
        schema: &Schema,
    ) -> Result<Self, ArtifactError> {
        check_len(SCALER, "stats", scaler.len(), schema.num_numeric())?;
        check_len(MODEL, "weights", model.num_columns(), schema.num_encoded())?;

        for (index, (mean, std)) in scaler.stats().iter().enumerate() {
            check_finite(SCALER, "mean", index, *mean)?;
            check_finite(SCALER, "scale", index, *std)?;
        }
        for (index, weight) in model.weights().iter().enumerate() {
            check_finite(MODEL, "weights", index, *weight)?;
        }
        check_finite(MODEL, "bias", 0, model.bias())?;

        tracing::info!(
            numeric_fields = scaler.len(),
            encoded_columns = model.num_columns(),
            "loaded frozen model artifacts"
        );

        Ok(Self { scaler, model })
    }

    /// Frozen standardization statistics.
    pub fn scaler(&self) -> &ScalerParams {
        &self.scaler
    }

    /// Frozen linear coefficients.
    pub fn model(&self) -> &ModelParams {
        &self.model
    }
}

fn open(path: &Path, artifact: &'static str) -> Result<BufReader<File>, ArtifactError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ArtifactError::Io { artifact, source })
}

fn check_names(
    artifact: &'static str,
    got: &[String],
    expected: &[String],
) -> Result<(), ArtifactError> {
    check_len(artifact, "columns", got.len(), expected.len())?;
    for (index, (g, e)) in got.iter().zip(expected).enumerate() {
        if g != e {
            return Err(ArtifactError::ColumnMismatch {
                artifact,
                index,
                expected: e.clone(),
                got: g.clone(),
            });
        }
    }
    Ok(())
}

fn check_len(
    artifact: &'static str,
    what: &'static str,
    got: usize,
    expected: usize,
) -> Result<(), ArtifactError> {
    if got != expected {
        return Err(ArtifactError::LengthMismatch {
            artifact,
            what,
            expected,
            got,
        });
    }
    Ok(())
}

fn check_finite(
    artifact: &'static str,
    what: &'static str,
    index: usize,
    value: f64,
) -> Result<(), ArtifactError> {
    if !value.is_finite() {
        return Err(ArtifactError::NonFinite {
            artifact,
            what,
            index,
        });
    }
    Ok(())
}

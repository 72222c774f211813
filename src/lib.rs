//! cardiorisk: deterministic serving core for a frozen linear classifier.
//!
//! This crate reproduces, at inference time, the exact feature
//! transformation a heart-disease risk model was trained with: one-hot
//! expansion with a dropped baseline into a fixed 21-column order, zero-fill
//! for absent columns, standardization of the numeric columns with frozen
//! statistics, and a final linear-plus-sigmoid scoring step. Any drift
//! between training-time and inference-time encoding silently corrupts
//! predictions, so the pipeline is built around one invariant: every encoded
//! vector matches [`Schema::encoded_columns`] in length and order.
//!
//! # Quick start
//!
//! ```no_run
//! use cardiorisk::{ArtifactStore, Pipeline, RawRecord, Schema};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::reference();
//! let artifacts = ArtifactStore::load("scaler.json", "model.json", &schema)?;
//! let pipeline = Pipeline::new(schema, artifacts);
//!
//! let record = RawRecord::new()
//!     .with("age", 55)
//!     .with("trestbps", 120)
//!     .with("chol", 200)
//!     .with("thalach", 150)
//!     .with("oldpeak", 1.0)
//!     .with("cp", 2);
//! let prediction = pipeline.infer(&record)?;
//! println!("{}", serde_json::to_string(&prediction.response())?);
//! # Ok(())
//! # }
//! ```
//!
//! Transport (HTTP routing, status codes) and model training are out of
//! scope; the crate exposes typed results and leaves wire conventions to the
//! surrounding service.

pub mod artifacts;
pub mod encode;
pub mod pipeline;
pub mod record;
pub mod scale;
pub mod schema;
pub mod score;
pub mod testing;

pub use artifacts::{ArtifactError, ArtifactStore, ModelParams, ScalerParams};
pub use encode::InputError;
pub use pipeline::Pipeline;
pub use record::{RawRecord, RawValue};
pub use schema::{CategoricalField, Schema};
pub use score::{Prediction, PredictionResponse};

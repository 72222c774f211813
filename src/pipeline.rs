//! The inference pipeline: encode → scale → score.
//!
//! A [`Pipeline`] owns the immutable schema and artifact store and exposes a
//! stateless `infer` over them. All shared state is frozen at construction,
//! so one pipeline instance serves any number of threads without locks.

use rayon::prelude::*;

use crate::artifacts::ArtifactStore;
use crate::encode::{encode, InputError};
use crate::record::RawRecord;
use crate::scale::scale_in_place;
use crate::schema::Schema;
use crate::score::{score, Prediction};

/// Stateless composition of encoder, scaler and scorer over a frozen
/// schema and artifact store.
#[derive(Debug, Clone)]
pub struct Pipeline {
    schema: Schema,
    artifacts: ArtifactStore,
}

impl Pipeline {
    /// Create a pipeline from a schema and a validated artifact store.
    ///
    /// # Panics
    ///
    /// Panics if the store's parameter shapes do not match the schema (a
    /// store loaded via [`ArtifactStore::load`] against the same schema
    /// always matches).
    pub fn new(schema: Schema, artifacts: ArtifactStore) -> Self {
        assert_eq!(
            artifacts.scaler().len(),
            schema.num_numeric(),
            "scaler statistics do not match schema numeric fields"
        );
        assert_eq!(
            artifacts.model().num_columns(),
            schema.num_encoded(),
            "model weights do not match schema encoded columns"
        );

        Self { schema, artifacts }
    }

    /// The schema this pipeline encodes against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The frozen artifacts this pipeline scores with.
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Run one record through encode → scale → score.
    ///
    /// Strictly sequential; an encoder failure short-circuits before the
    /// scaler or scorer run. Identical input always yields a bit-identical
    /// result.
    pub fn infer(&self, record: &RawRecord) -> Result<Prediction, InputError> {
        let mut vector = encode(record, &self.schema)?;
        scale_in_place(&mut vector, self.artifacts.scaler());
        Ok(score(&vector, self.artifacts.model()))
    }

    /// Run a batch of records sequentially, preserving order.
    ///
    /// Each record gets its own result; one bad record does not fail the
    /// batch.
    pub fn infer_batch(&self, records: &[RawRecord]) -> Vec<Result<Prediction, InputError>> {
        records.iter().map(|record| self.infer(record)).collect()
    }

    /// Run a batch of records in parallel with rayon, preserving order.
    pub fn par_infer_batch(&self, records: &[RawRecord]) -> Vec<Result<Prediction, InputError>> {
        records
            .par_iter()
            .map(|record| self.infer(record))
            .collect()
    }
}

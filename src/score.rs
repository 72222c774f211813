//! Linear scoring: logit accumulation, sigmoid transform, 0.5 threshold.

use serde::{Deserialize, Serialize};

use crate::artifacts::ModelParams;

/// Sigmoid function: 1 / (1 + exp(-x)).
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A binary prediction with its class-1 probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class: 1 iff `probability >= 0.5`.
    pub label: u8,
    /// Class-1 probability in `[0, 1]`, unrounded.
    pub probability: f64,
}

impl Prediction {
    /// The wire-facing view of this prediction.
    pub fn response(&self) -> PredictionResponse {
        PredictionResponse {
            prediction: self.label,
            risk_probability: round4(self.probability),
        }
    }
}

/// Response body shape exposed to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: u8,
    /// Class-1 probability rounded to 4 decimal places.
    pub risk_probability: f64,
}

/// Round to 4 decimal places, half away from zero.
#[inline]
fn round4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}

/// Score a scaled encoded vector against the frozen linear model.
///
/// The logit is `bias + Σ weight[i] * vector[i]`, accumulated in encoded
/// column order; summation order is fixed so repeated calls are
/// bit-identical.
pub fn score(vector: &[f64], params: &ModelParams) -> Prediction {
    debug_assert_eq!(
        vector.len(),
        params.num_columns(),
        "encoded vector length {} does not match model columns {}",
        vector.len(),
        params.num_columns()
    );

    let mut logit = params.bias();
    for (weight, value) in params.weights().iter().zip(vector) {
        logit += weight * value;
    }

    let probability = sigmoid(logit);
    Prediction {
        label: u8::from(probability >= 0.5),
        probability,
    }
}

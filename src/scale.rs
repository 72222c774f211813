//! Standardization of the numeric prefix of an encoded vector.

use crate::artifacts::ScalerParams;

/// Standardize the numeric positions of `vector` in place.
///
/// The first `params.len()` slots hold the numeric fields (schema order);
/// each becomes `(v - mean) / std` with that field's frozen statistics.
/// Indicator positions are left untouched. A field whose stored `std` is
/// zero (or otherwise degenerate) passes through unscaled rather than
/// dividing by zero.
///
/// Pure arithmetic in a fixed operation order: identical input and identical
/// parameters yield bit-identical output on every call.
pub fn scale_in_place(vector: &mut [f64], params: &ScalerParams) {
    debug_assert!(
        vector.len() >= params.len(),
        "encoded vector shorter than scaler statistics: {} < {}",
        vector.len(),
        params.len()
    );

    for (value, &(mean, std)) in vector.iter_mut().zip(params.stats()) {
        if std != 0.0 {
            *value = (*value - mean) / std;
        }
    }
}

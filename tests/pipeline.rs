//! End-to-end pipeline tests over the reference schema and artifacts.

use approx::assert_abs_diff_eq;
use rstest::rstest;

use cardiorisk::score::sigmoid;
use cardiorisk::testing::{
    reference_pipeline, sample_record, REFERENCE_BIAS, REFERENCE_STATS, REFERENCE_WEIGHTS,
};
use cardiorisk::{encode, InputError, RawRecord, Schema};

fn numeric_only_record() -> RawRecord {
    RawRecord::new()
        .with("age", 55)
        .with("trestbps", 120)
        .with("chol", 200)
        .with("thalach", 150)
        .with("oldpeak", 1.0)
}

// ---------------------------------------------------------------------------
// Scenario A: full record, known levels
// ---------------------------------------------------------------------------

#[test]
fn full_record_encodes_expected_indicators() {
    let schema = Schema::reference();
    let encoded = encode::encode(&sample_record(), &schema).expect("valid record");

    assert_eq!(encoded.len(), 21);
    assert_eq!(&encoded[..5], &[55.0, 120.0, 200.0, 150.0, 1.0]);

    // sex=1, fbs=0, restecg=0, exang=0, ca=0 are all baseline levels and
    // cp=2, slope=1, thal=2 each set exactly one indicator.
    let set: Vec<&str> = schema.encoded_columns()[5..]
        .iter()
        .zip(&encoded[5..])
        .filter(|(_, &v)| v == 1.0)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(set, ["cp_2", "slope_1", "thal_2"]);
    assert!(encoded[5..].iter().all(|&v| v == 0.0 || v == 1.0));
}

#[test]
fn full_record_prediction_is_well_formed() {
    let pipeline = reference_pipeline();
    let prediction = pipeline.infer(&sample_record()).expect("valid record");

    assert!(prediction.label == 0 || prediction.label == 1);
    assert!((0.0..=1.0).contains(&prediction.probability));

    let response = prediction.response();
    assert_eq!(response.prediction, prediction.label);
    // Rounded to 4 decimal places: no residue beyond the 4th digit.
    assert_eq!(
        response.risk_probability,
        (response.risk_probability * 1e4).round() / 1e4
    );
    assert_abs_diff_eq!(
        response.risk_probability,
        prediction.probability,
        epsilon = 5e-5
    );
}

#[test]
fn full_record_prediction_matches_hand_computation() {
    let pipeline = reference_pipeline();
    let prediction = pipeline.infer(&sample_record()).expect("valid record");

    let schema = Schema::reference();
    let mut encoded = encode::encode(&sample_record(), &schema).expect("valid record");
    for (value, (mean, std)) in encoded.iter_mut().zip(REFERENCE_STATS) {
        *value = (*value - mean) / std;
    }
    let mut logit = REFERENCE_BIAS;
    for (weight, value) in REFERENCE_WEIGHTS.iter().zip(&encoded) {
        logit += weight * value;
    }

    assert_eq!(prediction.probability.to_bits(), sigmoid(logit).to_bits());
    assert_eq!(prediction.label, u8::from(sigmoid(logit) >= 0.5));
}

// ---------------------------------------------------------------------------
// Scenario B: missing numeric field
// ---------------------------------------------------------------------------

#[test]
fn missing_age_fails_before_scoring() {
    let pipeline = reference_pipeline();
    let mut record = sample_record();
    record.remove("age");

    let err = pipeline.infer(&record).unwrap_err();
    assert_eq!(err, InputError::MissingFeature("age".into()));
}

#[test]
fn non_numeric_field_reports_field_and_value() {
    let pipeline = reference_pipeline();
    let record = sample_record().with("oldpeak", "n/a");

    let err = pipeline.infer(&record).unwrap_err();
    assert_eq!(
        err,
        InputError::TypeMismatch {
            field: "oldpeak".into(),
            value: "n/a".into(),
        }
    );
}

// ---------------------------------------------------------------------------
// Scenario C: highest ca level
// ---------------------------------------------------------------------------

#[test]
fn ca_4_sets_only_its_indicator() {
    let schema = Schema::reference();
    let encoded = encode::encode(&sample_record().with("ca", 4), &schema).expect("valid record");

    for level in ["1", "2", "3", "4"] {
        let index = schema.column_index(&format!("ca_{level}")).unwrap();
        let expected = if level == "4" { 1.0 } else { 0.0 };
        assert_eq!(encoded[index], expected, "ca_{level}");
    }
}

// ---------------------------------------------------------------------------
// Scenario D: insertion order independence
// ---------------------------------------------------------------------------

#[test]
fn key_insertion_order_does_not_change_result() {
    let pipeline = reference_pipeline();

    let forward = sample_record();
    let mut reversed = RawRecord::new();
    for (field, value) in [
        ("thal", 2),
        ("ca", 0),
        ("slope", 1),
        ("exang", 0),
        ("restecg", 0),
        ("fbs", 0),
        ("cp", 2),
        ("sex", 1),
        ("thalach", 150),
        ("chol", 200),
        ("trestbps", 120),
        ("age", 55),
    ] {
        reversed.insert(field, value);
    }
    reversed.insert("oldpeak", 1.0);

    let a = pipeline.infer(&forward).expect("valid record");
    let b = pipeline.infer(&reversed).expect("valid record");
    assert_eq!(a.label, b.label);
    assert_eq!(a.probability.to_bits(), b.probability.to_bits());
}

// ---------------------------------------------------------------------------
// Encoding invariants
// ---------------------------------------------------------------------------

#[test]
fn omitting_every_categorical_field_zero_fills() {
    let schema = Schema::reference();
    let encoded = encode::encode(&numeric_only_record(), &schema).expect("valid record");
    assert_eq!(encoded.len(), 21);
    assert!(encoded[5..].iter().all(|&v| v == 0.0));
}

#[rstest]
#[case("sex", 1)]
#[case("cp", 0)]
#[case("fbs", 0)]
#[case("restecg", 0)]
#[case("exang", 0)]
#[case("slope", 0)]
#[case("ca", 0)]
#[case("thal", 1)]
fn baseline_level_equals_omitted_field(#[case] field: &str, #[case] baseline: i64) {
    let schema = Schema::reference();
    let omitted = encode::encode(&numeric_only_record(), &schema).expect("valid record");
    let explicit = encode::encode(&numeric_only_record().with(field, baseline), &schema)
        .expect("valid record");
    assert_eq!(omitted, explicit, "field {field}");
}

#[rstest]
#[case("sex", 7)]
#[case("cp", 9)]
#[case("restecg", 5)]
#[case("ca", 6)]
#[case("thal", 0)]
fn unknown_level_encodes_as_baseline(#[case] field: &str, #[case] unknown: i64) {
    let schema = Schema::reference();
    let baseline = encode::encode(&numeric_only_record(), &schema).expect("valid record");
    let fallback = encode::encode(&numeric_only_record().with(field, unknown), &schema)
        .expect("valid record");
    assert_eq!(baseline, fallback, "field {field}");
}

// ---------------------------------------------------------------------------
// Monotonicity
// ---------------------------------------------------------------------------

#[test]
fn increasing_a_positive_weight_feature_never_lowers_risk() {
    // chol carries a positive coefficient and a positive std, so raising it
    // (all else fixed) must not decrease the probability.
    let pipeline = reference_pipeline();

    let mut previous = f64::MIN;
    for chol in [150, 200, 250, 300, 400, 550] {
        let record = sample_record().with("chol", chol);
        let probability = pipeline.infer(&record).expect("valid record").probability;
        assert!(
            probability >= previous,
            "probability dropped at chol={chol}: {probability} < {previous}"
        );
        previous = probability;
    }
}

#[test]
fn increasing_a_negative_weight_feature_never_raises_risk() {
    let pipeline = reference_pipeline();

    let mut previous = f64::MAX;
    for thalach in [100, 120, 140, 160, 190] {
        let record = sample_record().with("thalach", thalach);
        let probability = pipeline.infer(&record).expect("valid record").probability;
        assert!(
            probability <= previous,
            "probability rose at thalach={thalach}: {probability} > {previous}"
        );
        previous = probability;
    }
}

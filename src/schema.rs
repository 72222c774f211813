//! Fixed tabular schema: field names, categorical levels, and the encoded
//! column order that the frozen model weights are aligned with.
//!
//! The schema is pure data. It is built once at startup and shared read-only
//! with every component; nothing in the inference path mutates it.

/// A categorical field with its known levels and dropped baseline level.
///
/// Levels are canonical string labels, matching how training-time levels were
/// recorded. The baseline level gets no indicator column: it is implied by all
/// of the field's indicators being zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalField {
    name: String,
    levels: Vec<String>,
    baseline: String,
}

impl CategoricalField {
    /// Create a categorical field.
    ///
    /// # Panics
    ///
    /// Panics if `baseline` is not one of `levels`, or if `levels` contains
    /// duplicates.
    pub fn new(
        name: impl Into<String>,
        levels: impl IntoIterator<Item = impl Into<String>>,
        baseline: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        let baseline = baseline.into();

        assert!(
            levels.contains(&baseline),
            "baseline level {baseline:?} of field {name:?} is not a known level"
        );
        for (i, level) in levels.iter().enumerate() {
            assert!(
                !levels[..i].contains(level),
                "duplicate level {level:?} in field {name:?}"
            );
        }

        Self {
            name,
            levels,
            baseline,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All known levels, in declaration order.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// The dropped baseline level.
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Levels that get an indicator column, in declaration order.
    pub fn indicator_levels(&self) -> impl Iterator<Item = &str> {
        self.levels
            .iter()
            .filter(move |level| **level != self.baseline)
            .map(String::as_str)
    }

    /// Whether `label` is one of the known levels (baseline included).
    pub fn knows(&self, label: &str) -> bool {
        self.levels.iter().any(|level| level == label)
    }

    /// Number of indicator columns this field contributes.
    pub fn num_indicators(&self) -> usize {
        self.levels.len() - 1
    }
}

/// Immutable description of the model's input space.
///
/// Holds the ordered numeric fields, the ordered categorical fields, and the
/// derived `encoded_columns` sequence: numeric fields first, then one
/// `{field}_{level}` indicator column per non-baseline level of each
/// categorical field. Every encoded vector and the frozen weight vector use
/// exactly this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    numeric_fields: Vec<String>,
    categorical_fields: Vec<CategoricalField>,
    encoded_columns: Vec<String>,
}

impl Schema {
    /// Build a schema from its parts. The encoded column order is derived
    /// here and never changes afterwards.
    ///
    /// # Panics
    ///
    /// Panics if a field name appears twice across the numeric and
    /// categorical sets.
    pub fn new(
        numeric_fields: impl IntoIterator<Item = impl Into<String>>,
        categorical_fields: Vec<CategoricalField>,
    ) -> Self {
        let numeric_fields: Vec<String> = numeric_fields.into_iter().map(Into::into).collect();

        for (i, name) in numeric_fields.iter().enumerate() {
            assert!(
                !numeric_fields[..i].contains(name),
                "duplicate numeric field {name:?}"
            );
        }
        for field in &categorical_fields {
            assert!(
                !numeric_fields.iter().any(|n| n == field.name()),
                "field {:?} is both numeric and categorical",
                field.name()
            );
        }

        let mut encoded_columns =
            Vec::with_capacity(numeric_fields.len() + categorical_fields.len());
        encoded_columns.extend(numeric_fields.iter().cloned());
        for field in &categorical_fields {
            for level in field.indicator_levels() {
                encoded_columns.push(format!("{}_{}", field.name(), level));
            }
        }

        Self {
            numeric_fields,
            categorical_fields,
            encoded_columns,
        }
    }

    /// The reference heart-disease schema: 5 numeric fields and 8 categorical
    /// fields expanding to 21 encoded columns.
    pub fn reference() -> Self {
        Self::new(
            ["age", "trestbps", "chol", "thalach", "oldpeak"],
            vec![
                CategoricalField::new("sex", ["0", "1"], "1"),
                CategoricalField::new("cp", ["0", "1", "2", "3"], "0"),
                CategoricalField::new("fbs", ["0", "1"], "0"),
                CategoricalField::new("restecg", ["0", "1", "2"], "0"),
                CategoricalField::new("exang", ["0", "1"], "0"),
                CategoricalField::new("slope", ["0", "1", "2"], "0"),
                CategoricalField::new("ca", ["0", "1", "2", "3", "4"], "0"),
                CategoricalField::new("thal", ["1", "2", "3"], "1"),
            ],
        )
    }

    /// Ordered numeric field names. These occupy encoded positions
    /// `0..numeric_fields().len()`.
    pub fn numeric_fields(&self) -> &[String] {
        &self.numeric_fields
    }

    /// Ordered categorical fields.
    pub fn categorical_fields(&self) -> &[CategoricalField] {
        &self.categorical_fields
    }

    /// The fixed encoded column order.
    pub fn encoded_columns(&self) -> &[String] {
        &self.encoded_columns
    }

    /// Total number of encoded positions.
    #[inline]
    pub fn num_encoded(&self) -> usize {
        self.encoded_columns.len()
    }

    /// Number of numeric positions (the prefix of every encoded vector).
    #[inline]
    pub fn num_numeric(&self) -> usize {
        self.numeric_fields.len()
    }

    /// Position of an encoded column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.encoded_columns.iter().position(|c| c == name)
    }
}

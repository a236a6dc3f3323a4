//! Feature preprocessing: standardization and one-hot encoding.
//!
//! A [`Preprocessor`] is fitted once, on the training rows only, and then
//! applied identically to every future row. Fitting never sees test-set
//! statistics, and the transform is immutable after fitting.

use ndarray::Array2;

use crate::pipeline::schema::{CustomerRecord, CATEGORICAL_FEATURES, NUMERIC_FEATURES};

/// Per-column standardization to zero mean and unit variance.
///
/// Columns with zero variance keep a scale of 1.0 so constant features
/// (and boundary values like a zero balance) transform without dividing
/// by zero.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    fn fit(columns: &[Vec<f64>]) -> Self {
        let mut means = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());
        for column in columns {
            let n = column.len().max(1) as f64;
            let mean = column.iter().sum::<f64>() / n;
            let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();
            means.push(mean);
            scales.push(if std > 0.0 { std } else { 1.0 });
        }
        Self { means, scales }
    }

    fn transform_into(&self, values: &[f64], out: &mut Vec<f64>) {
        for (i, v) in values.iter().enumerate() {
            out.push((v - self.means[i]) / self.scales[i]);
        }
    }
}

/// Fixed-width one-hot encoding over the categories observed during fit.
///
/// Category order is sorted per column, so the encoding width and layout
/// are deterministic for a given fit set. A value not seen during fitting
/// encodes to an all-zero block rather than failing.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    fn fit(columns: &[Vec<&str>]) -> Self {
        let categories = columns
            .iter()
            .map(|column| {
                let mut seen: Vec<String> = Vec::new();
                for value in column {
                    if !seen.iter().any(|s| s == value) {
                        seen.push((*value).to_string());
                    }
                }
                seen.sort();
                seen
            })
            .collect();
        Self { categories }
    }

    fn transform_into(&self, values: &[&str], out: &mut Vec<f64>) {
        for (i, value) in values.iter().enumerate() {
            for category in &self.categories[i] {
                out.push(if category == value { 1.0 } else { 0.0 });
            }
        }
    }

    fn width(&self) -> usize {
        self.categories.iter().map(|c| c.len()).sum()
    }
}

/// The fitted transform from raw feature columns to a numeric matrix:
/// standardized numeric block first, then the one-hot categorical blocks.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    scaler: StandardScaler,
    encoder: OneHotEncoder,
}

impl Preprocessor {
    /// Fit the scaler and encoder on the given rows (the training split).
    pub fn fit(records: &[CustomerRecord]) -> Self {
        let mut numeric_columns: Vec<Vec<f64>> =
            vec![Vec::with_capacity(records.len()); NUMERIC_FEATURES.len()];
        let mut categorical_columns: Vec<Vec<&str>> =
            vec![Vec::with_capacity(records.len()); CATEGORICAL_FEATURES.len()];

        for record in records {
            for (i, v) in record.numeric_values().iter().enumerate() {
                numeric_columns[i].push(*v);
            }
            for (i, v) in record.categorical_values().iter().enumerate() {
                categorical_columns[i].push(*v);
            }
        }

        Self {
            scaler: StandardScaler::fit(&numeric_columns),
            encoder: OneHotEncoder::fit(&categorical_columns),
        }
    }

    /// Width of the transformed feature vector.
    pub fn n_features(&self) -> usize {
        NUMERIC_FEATURES.len() + self.encoder.width()
    }

    /// Transform a single record into its feature vector.
    pub fn transform_row(&self, record: &CustomerRecord) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.n_features());
        self.scaler.transform_into(&record.numeric_values(), &mut out);
        self.encoder
            .transform_into(&record.categorical_values(), &mut out);
        out
    }

    /// Transform a slice of records into an `(n_rows, n_features)` matrix.
    pub fn transform(&self, records: &[CustomerRecord]) -> Array2<f64> {
        let n_features = self.n_features();
        let mut data = Vec::with_capacity(records.len() * n_features);
        for record in records {
            data.extend(self.transform_row(record));
        }
        Array2::from_shape_vec((records.len(), n_features), data)
            .expect("row width is fixed by the fitted transform")
    }
}

//! Training pipeline: deterministic split, balanced weights, joint fit.
//!
//! The preprocessor and the forest are fitted together on the 80% train
//! partition and bundled into one [`FittedModel`]; the learned scaling and
//! encoding are applied identically at inference time. The 20% hold-out is
//! only used to report an informational accuracy figure.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::ChurnError;
use crate::pipeline::forest::{ForestConfig, RandomForest};
use crate::pipeline::preprocess::Preprocessor;
use crate::pipeline::schema::{CleanedDataset, CustomerRecord, LABEL_COLUMN};

/// Fraction of rows held out from fitting.
const TEST_RATIO: f64 = 0.2;

/// A fitted preprocessor and classifier from one training run.
///
/// The two are logically inseparable and never mutated after fitting.
#[derive(Debug, Clone)]
pub struct FittedModel {
    preprocessor: Preprocessor,
    forest: RandomForest,
    holdout_accuracy: f64,
}

impl FittedModel {
    /// Churn probability in [0, 1] for one record.
    pub fn predict_proba(&self, record: &CustomerRecord) -> f64 {
        let features = self.preprocessor.transform_row(record);
        self.forest.predict_proba(&features)
    }

    /// Accuracy on the 20% hold-out partition, in [0, 1]. Informational only.
    pub fn holdout_accuracy(&self) -> f64 {
        self.holdout_accuracy
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }
}

/// Deterministic 80/20 split of row indices for a given seed.
///
/// Exposed so a conformance test can reconstruct the exact partitions.
pub fn train_test_split(n_rows: usize, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * TEST_RATIO).round() as usize;
    let test = indices.split_off(n_rows - n_test);
    (indices, test)
}

/// Balanced class weights: `n_samples / (n_classes * class_count)`, so the
/// minority class (typically churners) is weighted inversely to frequency.
fn balanced_class_weights(labels: &[bool]) -> [f64; 2] {
    let n = labels.len() as f64;
    let n_pos = labels.iter().filter(|&&l| l).count() as f64;
    let n_neg = n - n_pos;
    [n / (2.0 * n_neg), n / (2.0 * n_pos)]
}

/// Train a [`FittedModel`] on the cleaned dataset.
///
/// Fails with [`ChurnError::Training`] if the label column is absent or
/// fewer than two label classes are present.
pub fn train_model(
    dataset: &CleanedDataset,
    config: &ForestConfig,
) -> Result<FittedModel, ChurnError> {
    let labels = dataset.labels().ok_or_else(|| {
        ChurnError::Training(format!("label column '{}' not found in dataset", LABEL_COLUMN))
    })?;

    let (train_idx, test_idx) = train_test_split(dataset.len(), config.seed);

    let train_records: Vec<CustomerRecord> = train_idx
        .iter()
        .map(|&i| dataset.records()[i].clone())
        .collect();
    let train_labels: Vec<bool> = train_idx.iter().map(|&i| labels[i]).collect();

    let n_churned = train_labels.iter().filter(|&&l| l).count();
    if n_churned == 0 || n_churned == train_labels.len() {
        return Err(ChurnError::Training(
            "training split contains a single label class; a classifier over one class is undefined"
                .to_string(),
        ));
    }

    // Fit strictly on the train partition: scaling statistics, category
    // vocabulary, and trees never see the hold-out rows.
    let preprocessor = Preprocessor::fit(&train_records);
    let x_train = preprocessor.transform(&train_records);

    let class_weights = balanced_class_weights(&train_labels);
    let sample_weights: Vec<f64> = train_labels
        .iter()
        .map(|&l| class_weights[l as usize])
        .collect();

    let forest = RandomForest::fit(x_train.view(), &train_labels, &sample_weights, config);

    let holdout_accuracy = accuracy_on(&preprocessor, &forest, dataset, labels, &test_idx);

    Ok(FittedModel {
        preprocessor,
        forest,
        holdout_accuracy,
    })
}

fn accuracy_on(
    preprocessor: &Preprocessor,
    forest: &RandomForest,
    dataset: &CleanedDataset,
    labels: &[bool],
    rows: &[usize],
) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let correct = rows
        .iter()
        .filter(|&&row| {
            let features = preprocessor.transform_row(&dataset.records()[row]);
            let predicted = forest.predict_proba(&features) > 0.5;
            predicted == labels[row]
        })
        .count();
    correct as f64 / rows.len() as f64
}

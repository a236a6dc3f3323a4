//! Integration tests for the training pipeline

use churnscope::error::ChurnError;
use churnscope::pipeline::{load_dataset, train_model, train_test_split, ForestConfig};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

fn small_config() -> ForestConfig {
    ForestConfig {
        n_trees: 15,
        max_depth: 8,
        seed: 42,
        ..Default::default()
    }
}

#[test]
fn test_training_succeeds_on_valid_dataset() {
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 80);
    let dataset = load_dataset(&path).unwrap();

    let model = train_model(&dataset, &small_config()).unwrap();

    assert_eq!(model.n_trees(), 15);
    assert!((0.0..=1.0).contains(&model.holdout_accuracy()));
}

#[test]
fn test_training_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 80);
    let dataset = load_dataset(&path).unwrap();

    let model_a = train_model(&dataset, &small_config()).unwrap();
    let model_b = train_model(&dataset, &small_config()).unwrap();

    for record in dataset.records().iter().take(20) {
        assert_eq!(
            model_a.predict_proba(record),
            model_b.predict_proba(record),
            "two training runs must agree for customer {}",
            record.customer_id
        );
    }
    assert_eq!(model_a.holdout_accuracy(), model_b.holdout_accuracy());
}

#[test]
fn test_split_reconstruction_matches_training() {
    // The conformance split: same n and seed reproduce the exact partitions.
    let (train, test) = train_test_split(200, 42);
    let (train_again, test_again) = train_test_split(200, 42);
    assert_eq!(train, train_again);
    assert_eq!(test, test_again);
    assert_eq!(train.len() + test.len(), 200);
    assert_eq!(test.len(), 40);
}

#[test]
fn test_missing_label_column_is_training_error() {
    let dir = TempDir::new().unwrap();
    let path = common::write_unlabeled_churn_csv(&dir, 40);
    let dataset = load_dataset(&path).unwrap();

    let err = train_model(&dataset, &small_config()).unwrap_err();
    match err {
        ChurnError::Training(message) => assert!(message.contains("exited")),
        other => panic!("expected Training error, got {:?}", other),
    }
}

#[test]
fn test_single_label_class_is_training_error() {
    let dir = TempDir::new().unwrap();
    let path = common::write_single_class_csv(&dir, 40);
    let dataset = load_dataset(&path).unwrap();

    let err = train_model(&dataset, &small_config()).unwrap_err();
    assert!(matches!(err, ChurnError::Training(_)));
}

#[test]
fn test_model_separates_generated_classes() {
    // The fixture is strongly separable; the hold-out should be mostly right.
    let dir = TempDir::new().unwrap();
    let path = common::write_churn_csv(&dir, 200);
    let dataset = load_dataset(&path).unwrap();

    let config = ForestConfig {
        n_trees: 30,
        max_depth: 10,
        seed: 42,
        ..Default::default()
    };
    let model = train_model(&dataset, &config).unwrap();

    assert!(
        model.holdout_accuracy() > 0.7,
        "hold-out accuracy unexpectedly low: {}",
        model.holdout_accuracy()
    );
}

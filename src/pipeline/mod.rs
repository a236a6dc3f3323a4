//! Pipeline module - data loading, preprocessing, training, and queries

pub mod forest;
pub mod inference;
pub mod loader;
pub mod preprocess;
pub mod schema;
pub mod stats;
pub mod training;

pub use forest::{ForestConfig, RandomForest};
pub use inference::{parse_customer_id, predict, ModelContext, PredictionResult, RiskLevel};
pub use loader::load_dataset;
pub use preprocess::Preprocessor;
pub use schema::{CleanedDataset, CustomerRecord};
pub use stats::{summarize, ChurnSummary};
pub use training::{train_model, train_test_split, FittedModel};

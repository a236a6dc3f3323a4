//! Aggregate churn-rate statistics over the full cleaned dataset.

use serde::Serialize;

use crate::error::ChurnError;
use crate::pipeline::schema::{CleanedDataset, LABEL_COLUMN};

/// Count and share of one label class.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassShare {
    pub count: usize,
    /// Percentage of the total, in [0, 100].
    pub percentage: f64,
}

/// Churn distribution over the entire dataset (not just the train split).
///
/// Ephemeral: recomputed on demand, percentages sum to 100 within
/// floating-point tolerance.
#[derive(Debug, Clone, Serialize)]
pub struct ChurnSummary {
    pub total: usize,
    pub retained: ClassShare,
    pub churned: ClassShare,
}

/// Compute the churn distribution. Pure function of the dataset; repeated
/// calls return identical results while the dataset is unchanged.
pub fn summarize(dataset: &CleanedDataset) -> Result<ChurnSummary, ChurnError> {
    let labels = dataset.labels().ok_or_else(|| {
        ChurnError::Training(format!("label column '{}' not found in dataset", LABEL_COLUMN))
    })?;

    let total = labels.len();
    let churned = labels.iter().filter(|&&l| l).count();
    let retained = total - churned;

    let percentage = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    };

    Ok(ChurnSummary {
        total,
        retained: ClassShare {
            count: retained,
            percentage: percentage(retained),
        },
        churned: ClassShare {
            count: churned,
            percentage: percentage(churned),
        },
    })
}

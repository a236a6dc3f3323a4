//! Per-customer inference: lookup, probability scoring, recommendation.

use serde::Serialize;

use crate::error::ChurnError;
use crate::pipeline::schema::{CleanedDataset, CustomerRecord};
use crate::pipeline::training::FittedModel;

/// Churn probability above this percentage is treated as high risk.
/// A fixed decision boundary, not recalibrated from data; exactly 50.00
/// is low risk.
const HIGH_RISK_THRESHOLD: f64 = 50.0;

/// The immutable query context: the cleaned dataset with its identifier
/// index, plus the fitted model. Built once at startup and shared read-only
/// by inference and statistics.
#[derive(Debug)]
pub struct ModelContext {
    pub dataset: CleanedDataset,
    pub model: FittedModel,
}

impl ModelContext {
    pub fn new(dataset: CleanedDataset, model: FittedModel) -> Self {
        Self { dataset, model }
    }
}

/// Discrete retention recommendation derived from the probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    HighRisk,
    LowRisk,
}

impl RiskLevel {
    /// Apply the fixed decision boundary to a probability percentage:
    /// strictly above 50 is high risk, exactly 50.00 is low risk.
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskLevel::HighRisk
        } else {
            RiskLevel::LowRisk
        }
    }

    /// Suggested retention actions for this risk category.
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::HighRisk => &[
                "Offer a personal account manager",
                "Make a tailored special offer",
                "Run a dissatisfaction survey",
            ],
            RiskLevel::LowRisk => &[
                "Thank the customer for their loyalty",
                "Offer a loyalty programme",
                "Cross-sell additional services",
            ],
        }
    }
}

/// Display snapshot of the queried customer's attributes.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub age: f64,
    pub credit_score: f64,
    pub balance: f64,
    pub num_of_products: u32,
    pub is_active_member: bool,
    pub geography: String,
    pub gender: String,
}

impl From<&CustomerRecord> for CustomerProfile {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            age: record.age,
            credit_score: record.credit_score,
            balance: record.balance,
            num_of_products: record.num_of_products,
            is_active_member: record.is_active_member,
            geography: record.geography.clone(),
            gender: record.gender.clone(),
        }
    }
}

/// One prediction, recomputed per query and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub customer_id: i64,
    /// Churn probability as a percentage in [0, 100].
    pub probability: f64,
    pub risk: RiskLevel,
    pub profile: CustomerProfile,
}

/// Parse a textual customer identifier.
///
/// Fails with [`ChurnError::InvalidIdentifier`] before any lookup happens.
pub fn parse_customer_id(input: &str) -> Result<i64, ChurnError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ChurnError::InvalidIdentifier(input.trim().to_string()))
}

/// Predict churn for one customer already present in the dataset.
///
/// Pure query: mutates neither the dataset, the index, nor the model, so
/// repeated calls return identical results.
pub fn predict(ctx: &ModelContext, customer_id: i64) -> Result<PredictionResult, ChurnError> {
    let row = ctx
        .dataset
        .row_of(customer_id)
        .ok_or(ChurnError::CustomerNotFound(customer_id))?;

    let record = &ctx.dataset.records()[row];
    let probability = ctx.model.predict_proba(record) * 100.0;
    let risk = RiskLevel::from_probability(probability);

    Ok(PredictionResult {
        customer_id,
        probability,
        risk,
        profile: CustomerProfile::from(record),
    })
}

//! Typed record schema for the cleaned dataset.
//!
//! The feature partition below is a static contract between the preprocessor
//! and the training pipeline: numeric columns are standardized, categorical
//! columns are one-hot encoded. Changing the source schema means changing
//! this partition, not discovering new columns at run time.

use std::collections::HashMap;

use serde::Serialize;

/// Numeric feature columns, standardized to zero mean / unit variance.
pub const NUMERIC_FEATURES: [&str; 7] = [
    "creditscore",
    "age",
    "tenure",
    "balance",
    "numofproducts",
    "hascrcard",
    "isactivemember",
];

/// Categorical feature columns, expanded to one-hot indicator blocks.
pub const CATEGORICAL_FEATURES: [&str; 2] = ["geography", "gender"];

/// Column holding the churn label (1 = churned).
pub const LABEL_COLUMN: &str = "exited";

/// Column holding the unique customer identifier.
pub const ID_COLUMN: &str = "customerid";

/// Non-feature columns dropped at load time when present.
pub const DROP_COLUMNS: [&str; 3] = ["RowNumber", "Surname", "EstimatedSalary"];

/// One customer row after cleaning. Field types encode the schema the
/// pipeline relies on: `tenure` is integral with blanks already filled,
/// flags are booleans, categoricals are free-form strings.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRecord {
    pub customer_id: i64,
    pub credit_score: f64,
    pub geography: String,
    pub gender: String,
    pub age: f64,
    pub tenure: i64,
    pub balance: f64,
    pub num_of_products: u32,
    pub has_cr_card: bool,
    pub is_active_member: bool,
}

impl CustomerRecord {
    /// Raw numeric feature values in `NUMERIC_FEATURES` order.
    pub fn numeric_values(&self) -> [f64; NUMERIC_FEATURES.len()] {
        [
            self.credit_score,
            self.age,
            self.tenure as f64,
            self.balance,
            self.num_of_products as f64,
            self.has_cr_card as u8 as f64,
            self.is_active_member as u8 as f64,
        ]
    }

    /// Categorical feature values in `CATEGORICAL_FEATURES` order.
    pub fn categorical_values(&self) -> [&str; CATEGORICAL_FEATURES.len()] {
        [self.geography.as_str(), self.gender.as_str()]
    }
}

/// The cleaned dataset: one `CustomerRecord` per source row, the churn
/// labels when the label column was present, and a bijective
/// identifier-to-row-index map.
///
/// Immutable once built; inference and statistics only ever read it.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    records: Vec<CustomerRecord>,
    labels: Option<Vec<bool>>,
    index: HashMap<i64, usize>,
}

impl CleanedDataset {
    /// Build a dataset from cleaned records, rejecting duplicate identifiers.
    pub fn new(
        records: Vec<CustomerRecord>,
        labels: Option<Vec<bool>>,
    ) -> Result<Self, i64> {
        let mut index = HashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            if index.insert(record.customer_id, row).is_some() {
                return Err(record.customer_id);
            }
        }
        Ok(Self {
            records,
            labels,
            index,
        })
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    /// Churn labels, one per record, if the source carried the label column.
    pub fn labels(&self) -> Option<&[bool]> {
        self.labels.as_deref()
    }

    /// Row index for a customer identifier.
    pub fn row_of(&self, customer_id: i64) -> Option<usize> {
        self.index.get(&customer_id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

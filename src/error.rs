//! Error types for the churn prediction pipeline.
//!
//! Startup errors (`DataSource`, `Training`) are fatal: the dataset and the
//! model are fixed for the lifetime of a run, so there is nothing to retry.
//! Query errors (`CustomerNotFound`, `InvalidIdentifier`) are local to one
//! query and never affect subsequent queries.

use thiserror::Error;

/// Errors that can occur while loading data, training, or answering queries.
#[derive(Debug, Error)]
pub enum ChurnError {
    /// The input file is unreadable, malformed, or missing a required column.
    ///
    /// Fatal at startup; no interactive surface is created after this.
    #[error("data source error: {0}")]
    DataSource(String),

    /// The dataset cannot support training: the label column is absent or
    /// fewer than two label classes are present.
    ///
    /// Fatal at startup, like `DataSource`.
    #[error("training error: {0}")]
    Training(String),

    /// The queried identifier is not present in the loaded dataset.
    ///
    /// Recoverable: reported to the caller, no state change.
    #[error("customer with id {0} not found")]
    CustomerNotFound(i64),

    /// The identifier input did not parse as an integer.
    ///
    /// Recoverable: reported before any lookup is attempted.
    #[error("invalid customer id '{0}': expected an integer")]
    InvalidIdentifier(String),
}

impl ChurnError {
    /// Whether this error aborts the whole run (as opposed to a single query).
    pub fn is_fatal(&self) -> bool {
        matches!(self, ChurnError::DataSource(_) | ChurnError::Training(_))
    }
}

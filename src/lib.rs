//! Churnscope: Bank Customer Churn Prediction Library
//!
//! A library for predicting whether a bank customer will churn, using a
//! random forest classifier over standardized and one-hot encoded features,
//! with per-customer inference and aggregate churn statistics.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

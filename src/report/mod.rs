//! Report module - rendering predictions and churn statistics

pub mod distribution;
pub mod export;
pub mod prediction;

pub use distribution::*;
pub use export::*;
pub use prediction::*;

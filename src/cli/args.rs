//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Churnscope - Predict bank customer churn from a customer records file
#[derive(Parser, Debug)]
#[command(name = "churnscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file with customer records (header row required)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Predict churn for a single customer id and exit.
    /// Without this flag (and without --stats) an interactive session starts.
    #[arg(short = 'c', long)]
    pub customer_id: Option<String>,

    /// Print the churn distribution over the full dataset and exit
    #[arg(long, default_value = "false")]
    pub stats: bool,

    /// Random seed for the train/test split and the forest
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of trees in the random forest
    #[arg(long, default_value = "100", value_parser = validate_trees)]
    pub trees: usize,

    /// Maximum depth of each tree
    #[arg(long, default_value = "16")]
    pub max_depth: usize,

    /// Export one-shot query results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// Whether the invocation answers one query and exits instead of
    /// starting the interactive session.
    pub fn is_one_shot(&self) -> bool {
        self.customer_id.is_some() || self.stats
    }

    /// Reject flag combinations that would silently lose output: both
    /// queries share one --export path, so the second write would
    /// overwrite the first.
    pub fn validate(&self) -> Result<(), String> {
        if self.export.is_some() && self.customer_id.is_some() && self.stats {
            return Err(
                "--export accepts a single query; pass either --customer-id or --stats, not both"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Validator for the tree count
fn validate_trees(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("tree count must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

//! Churnscope: Bank Customer Churn Prediction CLI
//!
//! Loads a customer records file, trains a random forest churn model, and
//! answers per-customer predictions and aggregate churn statistics, either
//! as one-shot queries or through an interactive session.

mod cli;
mod error;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::{main_menu, prompt_customer_id, Cli, MenuChoice};
use pipeline::{
    load_dataset, parse_customer_id, predict, summarize, train_model, ForestConfig, ModelContext,
};
use report::{display_distribution, display_prediction, export_json};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_info,
    print_query_error, print_step_header, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(message) = cli.validate() {
        anyhow::bail!(message);
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, cli.seed, cli.trees);

    // Step 1: Load and clean the dataset. Fatal on failure: no query
    // surface exists until the data is in memory.
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading customer records...");
    let dataset = match load_dataset(&cli.input) {
        Ok(dataset) => dataset,
        Err(err) => {
            // Clear the spinner line so the fatal error prints cleanly.
            spinner.finish_and_clear();
            return Err(err.into());
        }
    };
    finish_with_success(&spinner, "Dataset loaded");
    println!(
        "      Customers: {}",
        style(dataset.len()).yellow().bold()
    );
    print_info(&format!("Load took {:.2?}", step_start.elapsed()));

    // Step 2: Train the model. Also fatal: the model is fixed for the run.
    print_step_header(2, "Train Model");
    let step_start = Instant::now();
    let config = ForestConfig {
        n_trees: cli.trees,
        max_depth: cli.max_depth,
        seed: cli.seed,
        ..Default::default()
    };
    let spinner = create_spinner("Fitting preprocessor and random forest...");
    let model = match train_model(&dataset, &config) {
        Ok(model) => model,
        Err(err) => {
            spinner.finish_and_clear();
            return Err(err.into());
        }
    };
    finish_with_success(&spinner, "Model trained");
    println!(
        "      Hold-out accuracy: {}",
        style(format!("{:.1}%", model.holdout_accuracy() * 100.0)).yellow()
    );
    print_info(&format!("Training took {:.2?}", step_start.elapsed()));

    let ctx = ModelContext::new(dataset, model);

    if cli.is_one_shot() {
        run_one_shot(&cli, &ctx)?;
    } else {
        run_session(&ctx)?;
    }

    print_completion();
    Ok(())
}

/// Answer the query named on the command line and exit.
fn run_one_shot(cli: &Cli, ctx: &ModelContext) -> Result<()> {
    if let Some(raw_id) = &cli.customer_id {
        let customer_id = parse_customer_id(raw_id)?;
        let result = predict(ctx, customer_id)?;
        display_prediction(&result);
        if let Some(path) = &cli.export {
            export_json(&result, path)?;
            print_success(&format!("Prediction exported to {}", path.display()));
        }
    }

    if cli.stats {
        let summary = summarize(&ctx.dataset)?;
        display_distribution(&summary);
        if let Some(path) = &cli.export {
            export_json(&summary, path)?;
            print_success(&format!("Distribution exported to {}", path.display()));
        }
    }

    Ok(())
}

/// Interactive query loop. Query errors are shown inline and never end
/// the session; prior results stay on screen.
fn run_session(ctx: &ModelContext) -> Result<()> {
    loop {
        println!();
        match main_menu()? {
            MenuChoice::Predict => {
                let raw_id = prompt_customer_id()?;
                match parse_customer_id(&raw_id).and_then(|id| predict(ctx, id)) {
                    Ok(result) => display_prediction(&result),
                    Err(err) => print_query_error(&err.to_string()),
                }
            }
            MenuChoice::Statistics => match summarize(&ctx.dataset) {
                Ok(summary) => display_distribution(&summary),
                Err(err) => print_query_error(&err.to_string()),
            },
            MenuChoice::Quit => break,
        }
    }
    Ok(())
}

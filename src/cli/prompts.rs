//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Input, Select};

/// Actions available in the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Predict,
    Statistics,
    Quit,
}

/// Show the main action menu.
pub fn main_menu() -> Result<MenuChoice> {
    let choice = Select::new()
        .with_prompt("Choose an action")
        .items(&[
            "Predict customer churn",
            "Show churn statistics",
            "Quit",
        ])
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => MenuChoice::Predict,
        1 => MenuChoice::Statistics,
        _ => MenuChoice::Quit,
    })
}

/// Prompt for a customer identifier. Returned as text; validation happens
/// in the inference layer so malformed input is reported, not crashed on.
pub fn prompt_customer_id() -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Enter customer id")
        .interact_text()?;
    Ok(input)
}

//! Rendering of a single prediction result.

use console::style;

use crate::pipeline::{PredictionResult, RiskLevel};

/// Format a boolean flag the way the profile card expects it.
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Print the probability, recommendation, action list, and customer profile.
pub fn display_prediction(result: &PredictionResult) {
    println!();
    println!(
        "    {} {}",
        style("🔮").cyan(),
        style(format!("PREDICTION FOR CUSTOMER {}", result.customer_id))
            .white()
            .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let probability = format!("{:.2}%", result.probability);
    match result.risk {
        RiskLevel::HighRisk => {
            println!(
                "      Churn probability: {}",
                style(probability).red().bold()
            );
            println!(
                "      Recommendation:    {}",
                style("high risk of churn").red().bold()
            );
        }
        RiskLevel::LowRisk => {
            println!(
                "      Churn probability: {}",
                style(probability).green().bold()
            );
            println!(
                "      Recommendation:    {}",
                style("low risk of churn").green().bold()
            );
        }
    }

    println!();
    println!("      Recommended actions:");
    for (i, action) in result.risk.actions().iter().enumerate() {
        println!("        {}. {}", i + 1, action);
    }

    let profile = &result.profile;
    println!();
    println!("      Customer profile:");
    println!("        {} Age:             {}", style("•").dim(), profile.age);
    println!(
        "        {} Credit score:    {}",
        style("•").dim(),
        profile.credit_score
    );
    println!(
        "        {} Balance:         {:.2}",
        style("•").dim(),
        profile.balance
    );
    println!(
        "        {} Products:        {}",
        style("•").dim(),
        profile.num_of_products
    );
    println!(
        "        {} Active member:   {}",
        style("•").dim(),
        yes_no(profile.is_active_member)
    );
    println!(
        "        {} Geography:       {}",
        style("•").dim(),
        profile.geography
    );
    println!(
        "        {} Gender:          {}",
        style("•").dim(),
        profile.gender
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "yes");
        assert_eq!(yes_no(false), "no");
    }
}

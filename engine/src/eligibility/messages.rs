//! Condition Messages
//!
//! Human-readable explanations attached to every pass/fail condition so the
//! UI can show why a household did or did not qualify. Each message carries
//! a stable label (used by the translation layer downstream) and a default
//! English text.

use serde::{Deserialize, Serialize};

/// One condition explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Stable translation label, e.g. "eligibility_message.income"
    pub label: String,
    /// Default English text
    pub text: String,
}

impl Message {
    pub fn new(label: &str, text: String) -> Self {
        Self {
            label: format!("eligibility_message.{label}"),
            text,
        }
    }
}

/// Household makes ${income} per year which must be no more than ${max_income}
pub fn income(income: f64, max_income: i64) -> Message {
    Message::new(
        "income",
        format!(
            "Household makes ${} per year which must be no more than ${}",
            income.round() as i64,
            max_income
        ),
    )
}

/// Income limit lookup failed, eligibility cannot be confirmed
pub fn income_limit_unknown() -> Message {
    Message::new(
        "income_limit_lookup_failed",
        "Unable to determine income limits for your household".to_string(),
    )
}

/// Household presumed eligible based on other benefits
pub fn presumed_eligibility() -> Message {
    Message::new(
        "presumptive_eligibility",
        "Presumed eligibility based on other benefits".to_string(),
    )
}

/// Household resources must not exceed ${asset_limit}
pub fn assets(asset_limit: i64) -> Message {
    Message::new(
        "assets",
        format!("Household resources must not exceed ${asset_limit}"),
    )
}

/// Must have a child between the given ages
pub fn child(min_age: u32, max_age: u32) -> Message {
    Message::new(
        "child",
        format!("Must have a child between the ages of {min_age} and {max_age}"),
    )
}

/// Someone in the household must be at least this old
pub fn older_than(min_age: u32) -> Message {
    Message::new(
        "older_than",
        format!("Someone in the household must be at least {min_age} years old"),
    )
}

/// Household must not have the named benefit
pub fn must_not_have_benefit(benefit_name: &str) -> Message {
    Message::new(
        "not_have_benefit",
        format!("Household must not have {benefit_name}"),
    )
}

/// Must live in an eligible location
pub fn location() -> Message {
    Message::new("location", "Must live in an eligible location".to_string())
}

/// Someone in the household must be pregnant
pub fn is_pregnant() -> Message {
    Message::new(
        "pregnant",
        "Someone in the household must be pregnant".to_string(),
    )
}

/// Household must carry one of the named expense kinds
pub fn has_expense(expense_name: &str) -> Message {
    Message::new(
        "expense",
        format!("Household must have a {expense_name} expense"),
    )
}

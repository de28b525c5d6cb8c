//! Urgent-Need Resources
//!
//! Crisis resources (food banks, eviction help, diaper banks) surfaced
//! alongside benefit programs. Unlike programs, these are binary: a resource
//! either applies to the household or it does not, and it carries no dollar
//! value.
//!
//! Every resource passes through the same cross-cutting gates, composed
//! around its named predicates:
//!
//! 1. The household flagged the matching need type
//! 2. The resource is active
//! 3. County allow-list (empty list = everywhere)
//! 4. Required expense types, matched case-insensitively (empty = none)
//! 5. Every named predicate passes
//!
//! Missing data degrades a resource to "not shown", mirroring how programs
//! degrade to missing.

use thiserror::Error;
use tracing::warn;

use crate::dependency::{fields, Dependencies};
use crate::models::program::{NeedType, UrgentNeed};
use crate::models::screen::{ExpenseKind, IncomeFilter, Period, Screen};

/// Registry errors for need predicates
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NeedError {
    #[error("unknown need function '{0}'")]
    UnknownNeedFunction(String),
}

/// A named predicate over the household snapshot
pub trait NeedPredicate {
    /// Tracker fields this predicate needs
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    fn passes(&self, screen: &Screen) -> bool;
}

/// At least one child under four (counting pregnancies)
struct ChildUnderFour;

impl NeedPredicate for ChildUnderFour {
    fn dependencies(&self) -> &'static [&'static str] {
        &[fields::AGE, fields::RELATIONSHIP]
    }

    fn passes(&self, screen: &Screen) -> bool {
        screen.num_children(0, 3, true) > 0
    }
}

/// Household pays rent
struct HasRent;

impl NeedPredicate for HasRent {
    fn dependencies(&self) -> &'static [&'static str] {
        &[fields::EXPENSES]
    }

    fn passes(&self, screen: &Screen) -> bool {
        screen.has_expense(&[ExpenseKind::Rent])
    }
}

/// Household pays a mortgage
struct HasMortgage;

impl NeedPredicate for HasMortgage {
    fn dependencies(&self) -> &'static [&'static str] {
        &[fields::EXPENSES]
    }

    fn passes(&self, screen: &Screen) -> bool {
        screen.has_expense(&[ExpenseKind::Mortgage])
    }
}

/// Gross income at or below the poverty guideline
struct LowIncome;

// 2024 federal poverty guideline
const FPL_BASE: i64 = 15_060;
const FPL_PER_PERSON: i64 = 5_380;

impl NeedPredicate for LowIncome {
    fn dependencies(&self) -> &'static [&'static str] {
        &[
            fields::HOUSEHOLD_SIZE,
            fields::INCOME_AMOUNT,
            fields::INCOME_FREQUENCY,
        ]
    }

    fn passes(&self, screen: &Screen) -> bool {
        let limit =
            FPL_BASE + FPL_PER_PERSON * screen.household_size.saturating_sub(1) as i64;
        screen.calc_gross_income(Period::Yearly, &[IncomeFilter::All]) <= limit as f64
    }
}

/// Registry: predicate for a configured function name
pub fn need_predicate(name: &str) -> Result<Box<dyn NeedPredicate>, NeedError> {
    match name {
        "child_under_four" => Ok(Box::new(ChildUnderFour)),
        "has_rent" => Ok(Box::new(HasRent)),
        "has_mortgage" => Ok(Box::new(HasMortgage)),
        "low_income" => Ok(Box::new(LowIncome)),
        _ => Err(NeedError::UnknownNeedFunction(name.to_string())),
    }
}

/// One resource's cross-cutting gates composed around its predicates
pub struct GatedRule {
    counties: Vec<String>,
    required_expense_types: Vec<String>,
    predicates: Vec<Box<dyn NeedPredicate>>,
}

impl GatedRule {
    /// Resolve a resource's named functions into a runnable rule
    pub fn for_need(need: &UrgentNeed) -> Result<Self, NeedError> {
        let predicates = need
            .functions
            .iter()
            .map(|name| need_predicate(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            counties: need.counties.clone(),
            required_expense_types: need
                .required_expense_types
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            predicates,
        })
    }

    /// Whether the resource applies; `None` when required data is missing
    pub fn eligible(&self, screen: &Screen, tracker: &Dependencies) -> Option<bool> {
        if !self.counties.is_empty() {
            if tracker.has(&[fields::COUNTY]) {
                return None;
            }
            let county = screen.county.as_deref().unwrap_or("");
            if !self.counties.iter().any(|c| c == county) {
                return Some(false);
            }
        }

        if !self.required_expense_types.is_empty() {
            if tracker.has(&[fields::EXPENSES]) {
                return None;
            }
            let present = screen.expense_type_names();
            let any = self
                .required_expense_types
                .iter()
                .any(|required| present.contains(&required.as_str()));
            if !any {
                return Some(false);
            }
        }

        for predicate in &self.predicates {
            if tracker.has(predicate.dependencies()) {
                return None;
            }
            if !predicate.passes(screen) {
                return Some(false);
            }
        }

        Some(true)
    }
}

/// One applicable resource, ready for the results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgentNeedResult {
    pub code: String,
    pub name: String,
    pub need_type: NeedType,
}

/// All resources that apply to this household, in catalog order
///
/// Resources whose need type the household did not flag are skipped without
/// evaluation; configuration errors skip the one resource and keep going.
pub fn eligible_urgent_needs(
    screen: &Screen,
    needs: &[UrgentNeed],
    tracker: &Dependencies,
) -> Vec<UrgentNeedResult> {
    let mut results = Vec::new();

    for need in needs {
        if !need.active || !need.need_type.is_flagged(&screen.needs) {
            continue;
        }
        let rule = match GatedRule::for_need(need) {
            Ok(rule) => rule,
            Err(e) => {
                warn!(need = %need.code, error = %e, "skipping misconfigured urgent need");
                continue;
            }
        };
        if rule.eligible(screen, tracker) == Some(true) {
            results.push(UrgentNeedResult {
                code: need.code.clone(),
                name: need.name.clone(),
                need_type: need.need_type,
            });
        }
    }

    results
}

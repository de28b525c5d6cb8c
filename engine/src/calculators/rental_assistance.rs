//! Emergency rental assistance.
//!
//! Renters at or below 50% of the county Area Median Income. AMI limits come
//! from the injected `IncomeLimits` provider; a lookup failure degrades to a
//! failed "income limit unknown" condition so the rest of the evaluation is
//! unaffected.

use tracing::warn;

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility};
use crate::income_limits::AmiPercent;
use crate::models::screen::{ExpenseKind, IncomeFilter, Period};

use super::{EvalContext, RuleCalculator};

/// Months of rent covered by the benefit
const MONTHS_COVERED: f64 = 3.0;

#[derive(Debug)]
pub struct RentalAssistance;

impl RuleCalculator for RentalAssistance {
    fn dependencies(&self) -> &'static [&'static str] {
        &[
            fields::COUNTY,
            fields::HOUSEHOLD_SIZE,
            fields::INCOME_AMOUNT,
            fields::INCOME_FREQUENCY,
            fields::EXPENSES,
        ]
    }

    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility) {
        e.condition(
            ctx.screen.has_expense(&[ExpenseKind::Rent]),
            messages::has_expense("rent"),
        );

        let county = ctx.screen.county.as_deref().unwrap_or("");
        match ctx.income_limits.ami_limit(
            county,
            AmiPercent::P50,
            &ctx.program.fpl.period,
            ctx.screen.household_size,
        ) {
            Ok(limit) => {
                let income = ctx
                    .screen
                    .calc_gross_income(Period::Yearly, &[IncomeFilter::All]);
                e.condition(income <= limit as f64, messages::income(income, limit));
            }
            Err(err) => {
                warn!(county, error = %err, "AMI limit lookup failed");
                e.condition(false, messages::income_limit_unknown());
            }
        }
    }

    fn household_value(&self, ctx: &EvalContext) -> i64 {
        let monthly_rent = ctx
            .screen
            .calc_expenses(Period::Monthly, &[ExpenseKind::Rent]);
        (monthly_rent * MONTHS_COVERED).trunc() as i64
    }
}

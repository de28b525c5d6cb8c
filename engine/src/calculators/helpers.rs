//! Shared condition helpers used across rule calculators.

use crate::eligibility::{messages, Eligibility};
use crate::models::screen::{IncomeFilter, Period};

use super::EvalContext;

/// Record the standard FPL income condition: gross household income at or
/// below `fpl_percent` of the program's poverty guideline.
///
/// Returns whether the condition passed, like `Eligibility::condition`.
pub fn check_fpl_income(ctx: &EvalContext, e: &mut Eligibility, fpl_percent: f64) -> bool {
    let limit =
        (ctx.program.fpl.get_limit(ctx.screen.household_size) as f64 * fpl_percent) as i64;
    let income = ctx.screen.calc_gross_income(Period::Yearly, &[IncomeFilter::All]);
    e.condition(income <= limit as f64, messages::income(income, limit))
}

/// Clamp a by-household-size standard table lookup
///
/// Index 0 is a household of one; oversized households take the last entry.
pub fn by_size(table: &[i64], household_size: u32) -> i64 {
    let idx = (household_size.max(1) as usize - 1).min(table.len() - 1);
    table[idx]
}

//! Free and reduced-price school meals.
//!
//! Household-level program: at least one school-age child and gross income
//! at or below 185% FPL. The value is a fixed per-child annual amount.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility};

use super::helpers::check_fpl_income;
use super::{EvalContext, RuleCalculator};

const MIN_AGE: u32 = 4;
const MAX_AGE: u32 = 18;
const MAX_FPL_PERCENT: f64 = 1.85;
/// Annual value per qualifying child
const VALUE_PER_CHILD: i64 = 680;

#[derive(Debug)]
pub struct SchoolLunch;

impl RuleCalculator for SchoolLunch {
    fn dependencies(&self) -> &'static [&'static str] {
        &[
            fields::HOUSEHOLD_SIZE,
            fields::AGE,
            fields::RELATIONSHIP,
            fields::INCOME_AMOUNT,
            fields::INCOME_FREQUENCY,
        ]
    }

    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility) {
        let school_age = ctx.screen.num_children(MIN_AGE, MAX_AGE, false);
        e.condition(school_age > 0, messages::child(MIN_AGE, MAX_AGE));
        check_fpl_income(ctx, e, MAX_FPL_PERCENT);
    }

    fn household_value(&self, ctx: &EvalContext) -> i64 {
        ctx.screen.num_children(MIN_AGE, MAX_AGE, false) as i64 * VALUE_PER_CHILD
    }
}

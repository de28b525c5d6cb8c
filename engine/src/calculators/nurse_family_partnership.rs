//! Nurse home-visiting program for first-time parents.
//!
//! A service program rather than a cash benefit, so the dollar value stays
//! at zero; eligibility still matters for the results page.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility, Message};

use super::helpers::check_fpl_income;
use super::{EvalContext, RuleCalculator};

const MAX_FPL_PERCENT: f64 = 2.0;

#[derive(Debug)]
pub struct NurseFamilyPartnership;

impl RuleCalculator for NurseFamilyPartnership {
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
        let pregnant = ctx.screen.members.iter().any(|m| m.is_pregnant);
        e.condition(pregnant, messages::is_pregnant());

        // First pregnancy: no existing children in the household
        e.condition(
            ctx.screen.num_children(0, 18, false) == 0,
            Message::new(
                "first_child",
                "Must be expecting your first child".to_string(),
            ),
        );

        check_fpl_income(ctx, e, MAX_FPL_PERCENT);
    }
}

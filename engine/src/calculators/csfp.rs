//! Commodity Supplemental Food Program.
//!
//! Monthly food package for low-income seniors. Income is checked at the
//! household level; age is a member-level condition, so each senior in the
//! household receives their own package.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility, MemberEligibility};
use crate::models::screen::HouseholdMember;

use super::helpers::check_fpl_income;
use super::{EvalContext, RuleCalculator};

const MIN_AGE: u32 = 60;
const MAX_FPL_PERCENT: f64 = 1.3;
/// Annual value of the monthly food package, per senior
const MEMBER_VALUE: i64 = 360;

#[derive(Debug)]
pub struct CommoditySupplementalFood;

impl RuleCalculator for CommoditySupplementalFood {
    fn dependencies(&self) -> &'static [&'static str] {
        &[
            fields::HOUSEHOLD_SIZE,
            fields::AGE,
            fields::INCOME_AMOUNT,
            fields::INCOME_FREQUENCY,
        ]
    }

    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility) {
        check_fpl_income(ctx, e, MAX_FPL_PERCENT);
    }

    fn has_member_rules(&self) -> bool {
        true
    }

    fn member_eligible(&self, _ctx: &EvalContext, member: &HouseholdMember, e: &mut MemberEligibility) {
        e.condition(member.age.unwrap_or(0) >= MIN_AGE, messages::older_than(MIN_AGE));
    }

    fn member_value(&self, _ctx: &EvalContext, _member: &HouseholdMember) -> i64 {
        MEMBER_VALUE
    }
}

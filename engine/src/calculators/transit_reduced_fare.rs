//! Reduced transit fares for seniors and riders with disabilities.
//!
//! Only offered in the transit district's service counties. Member-level:
//! each qualifying rider gets the discount. Households already enrolled are
//! excluded.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility, Message, MemberEligibility};
use crate::models::screen::{HouseholdMember, InsuranceKind};

use super::{EvalContext, RuleCalculator};

const SERVICE_COUNTIES: [&str; 7] = [
    "Adams",
    "Arapahoe",
    "Boulder",
    "Broomfield",
    "Denver",
    "Douglas",
    "Jefferson",
];

const MIN_SENIOR_AGE: u32 = 65;
/// Annual value of the discounted fares, per rider
const MEMBER_VALUE: i64 = 250;

#[derive(Debug)]
pub struct TransitReducedFare;

impl RuleCalculator for TransitReducedFare {
    fn dependencies(&self) -> &'static [&'static str] {
        &[fields::COUNTY, fields::AGE, fields::INSURANCE]
    }

    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility) {
        let in_district = ctx
            .screen
            .county
            .as_deref()
            .map(|c| SERVICE_COUNTIES.contains(&c))
            .unwrap_or(false);
        e.condition(in_district, messages::location());
        e.condition(
            !ctx.screen.has_benefit(&ctx.program.code),
            messages::must_not_have_benefit(&ctx.program.name),
        );
    }

    fn has_member_rules(&self) -> bool {
        true
    }

    fn member_eligible(&self, _ctx: &EvalContext, member: &HouseholdMember, e: &mut MemberEligibility) {
        let qualifies = member.age.unwrap_or(0) >= MIN_SENIOR_AGE
            || member.has_disability
            || member.visually_impaired
            || member.insurance.has_any(&[InsuranceKind::Medicare]);
        e.condition(
            qualifies,
            Message::new(
                "reduced_fare",
                format!("Must be {MIN_SENIOR_AGE} or older, have a disability, or have Medicare"),
            ),
        );
    }

    fn member_value(&self, _ctx: &EvalContext, _member: &HouseholdMember) -> i64 {
        MEMBER_VALUE
    }
}

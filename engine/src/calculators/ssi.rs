//! Supplemental Security Income.
//!
//! Member-level program: each aged, blind, or disabled member is assessed
//! against the individual federal benefit rate, after the general income
//! disregard. Existing SSI payments are excluded from countable income so
//! current recipients are not counted against themselves.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility, Message, MemberEligibility};
use crate::models::screen::{HouseholdMember, IncomeFilter, IncomeKind, Period};

use super::{EvalContext, RuleCalculator};

/// Individual federal benefit rate, dollars/month
const FBR_MONTHLY: i64 = 943;
/// General income disregard, dollars/month
const DISREGARD_MONTHLY: f64 = 20.0;
const ASSET_LIMIT_INDIVIDUAL: i64 = 2_000;
const ASSET_LIMIT_COUPLE: i64 = 3_000;

#[derive(Debug)]
pub struct Ssi;

fn countable_monthly(member: &HouseholdMember) -> f64 {
    let gross = member.calc_gross_income_excluding(
        Period::Monthly,
        &[IncomeFilter::All],
        &[IncomeKind::Ssi],
    );
    (gross - DISREGARD_MONTHLY).max(0.0)
}

impl RuleCalculator for Ssi {
    fn dependencies(&self) -> &'static [&'static str] {
        &[
            fields::AGE,
            fields::HOUSEHOLD_ASSETS,
            fields::INCOME_AMOUNT,
            fields::INCOME_FREQUENCY,
        ]
    }

    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility) {
        let has_spouse = ctx.screen.members.iter().any(|m| m.relationship.is_spouse());
        let limit = if has_spouse {
            ASSET_LIMIT_COUPLE
        } else {
            ASSET_LIMIT_INDIVIDUAL
        };
        let assets = ctx.screen.household_assets.unwrap_or(0.0);
        e.condition(assets <= limit as f64, messages::assets(limit));
    }

    fn has_member_rules(&self) -> bool {
        true
    }

    fn member_eligible(&self, _ctx: &EvalContext, member: &HouseholdMember, e: &mut MemberEligibility) {
        let qualifies = member.has_disability
            || member.visually_impaired
            || member.age.unwrap_or(0) >= 65;
        e.condition(
            qualifies,
            Message::new(
                "aged_blind_disabled",
                "Must be 65 or older, blind, or have a disability".to_string(),
            ),
        );

        let countable = countable_monthly(member);
        e.condition(
            countable < FBR_MONTHLY as f64,
            messages::income(countable * 12.0, FBR_MONTHLY * 12),
        );
    }

    fn member_value(&self, _ctx: &EvalContext, member: &HouseholdMember) -> i64 {
        let monthly = (FBR_MONTHLY as f64 - countable_monthly(member)).max(0.0);
        (monthly * 12.0).trunc() as i64
    }
}

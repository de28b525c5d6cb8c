//! Utility bill payment assistance with presumptive eligibility.
//!
//! A household already receiving (or computed eligible for) energy
//! assistance is presumed eligible without an income check; otherwise the
//! standard 200% FPL test applies. The read of the energy-assistance result
//! is declared via `reads_programs` so the orchestrator evaluates the
//! upstream program first.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility};

use super::helpers::check_fpl_income;
use super::{EvalContext, RuleCalculator};

const UPSTREAM_PROGRAM: &str = "energy_assistance";
const MAX_FPL_PERCENT: f64 = 2.0;
const ANNUAL_VALUE: i64 = 300;

#[derive(Debug)]
pub struct UtilityBillPay;

impl RuleCalculator for UtilityBillPay {
    fn dependencies(&self) -> &'static [&'static str] {
        &[
            fields::HOUSEHOLD_SIZE,
            fields::INCOME_AMOUNT,
            fields::INCOME_FREQUENCY,
        ]
    }

    fn reads_programs(&self) -> &'static [&'static str] {
        &[UPSTREAM_PROGRAM]
    }

    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility) {
        let presumed = ctx.screen.has_benefit(UPSTREAM_PROGRAM)
            || ctx.results.is_eligible(UPSTREAM_PROGRAM);
        if presumed {
            e.condition(true, messages::presumed_eligibility());
        } else {
            check_fpl_income(ctx, e, MAX_FPL_PERCENT);
        }
    }

    fn household_value(&self, _ctx: &EvalContext) -> i64 {
        ANNUAL_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::testing::{earning, member, program, screen, Fixture};
    use crate::calculators::evaluate_program;
    use crate::models::screen::Relationship;

    #[test]
    fn test_existing_benefit_presumes_eligibility_despite_income() {
        // Income well over 200% FPL; the presumptive path must skip the
        // income test entirely
        let mut s = screen(vec![earning(
            member(1, 40, Relationship::HeadOfHousehold),
            10_000.0,
        )]);
        s.existing_benefits.push(UPSTREAM_PROGRAM.to_string());
        let fixture = Fixture::new(s, program("utility_bill_pay"));

        let e = evaluate_program(&UtilityBillPay, &fixture.ctx()).unwrap();
        assert!(e.eligible());
        let labels: Vec<&str> = e.pass_messages().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["eligibility_message.presumptive_eligibility"]);
    }

    #[test]
    fn test_computed_upstream_eligibility_presumes_too() {
        let s = screen(vec![earning(
            member(1, 40, Relationship::HeadOfHousehold),
            10_000.0,
        )]);
        let mut fixture = Fixture::new(s, program("utility_bill_pay"));
        let mut upstream = crate::eligibility::Eligibility::new();
        upstream.condition(true, None);
        fixture.results.insert(UPSTREAM_PROGRAM, upstream);

        let e = evaluate_program(&UtilityBillPay, &fixture.ctx()).unwrap();
        assert!(e.eligible());
    }

    #[test]
    fn test_without_presumption_income_test_applies() {
        let s = screen(vec![earning(
            member(1, 40, Relationship::HeadOfHousehold),
            10_000.0,
        )]);
        let fixture = Fixture::new(s, program("utility_bill_pay"));

        let e = evaluate_program(&UtilityBillPay, &fixture.ctx()).unwrap();
        assert!(!e.eligible());
        assert_eq!(e.value(), 0);
    }
}

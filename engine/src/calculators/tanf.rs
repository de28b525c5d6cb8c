//! Cash assistance for families with dependent children.
//!
//! Eligibility compares gross monthly income against a need standard table
//! keyed by household size; the benefit is the monthly grant standard for
//! that size, annualized.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility};
use crate::models::screen::{IncomeFilter, Period};

use super::helpers::by_size;
use super::{EvalContext, RuleCalculator};

/// Monthly need standard, index 0 = household of one
const NEED_STANDARD: [i64; 8] = [331, 439, 510, 588, 661, 716, 770, 821];
/// Monthly grant standard, index 0 = household of one
const GRANT_STANDARD: [i64; 8] = [128, 170, 198, 228, 256, 277, 298, 318];

#[derive(Debug)]
pub struct Tanf;

impl RuleCalculator for Tanf {
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
        // Pregnant members count as a dependent child
        let has_child = ctx.screen.num_children(0, 17, true) > 0;
        e.condition(has_child, messages::child(0, 17));

        let need = by_size(&NEED_STANDARD, ctx.screen.household_size);
        let monthly = ctx
            .screen
            .calc_gross_income(Period::Monthly, &[IncomeFilter::All]);
        e.condition(
            monthly <= need as f64,
            messages::income(monthly * 12.0, need * 12),
        );
    }

    fn household_value(&self, ctx: &EvalContext) -> i64 {
        by_size(&GRANT_STANDARD, ctx.screen.household_size) * 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::testing::{earning, member, program, screen, Fixture};
    use crate::calculators::evaluate_program;
    use crate::models::screen::Relationship;

    #[test]
    fn test_zero_income_family_with_child_is_eligible() {
        let s = screen(vec![
            member(1, 28, Relationship::HeadOfHousehold),
            member(2, 4, Relationship::Child),
        ]);
        let fixture = Fixture::new(s, program("tanf"));

        let e = evaluate_program(&Tanf, &fixture.ctx()).unwrap();
        assert!(e.eligible());
        assert_eq!(e.value(), 170 * 12);
        assert!(e.fail_messages().is_empty());
    }

    #[test]
    fn test_income_over_need_standard_fails_but_all_conditions_recorded() {
        let s = screen(vec![
            earning(member(1, 28, Relationship::HeadOfHousehold), 2_500.0),
            member(2, 4, Relationship::Child),
        ]);
        let fixture = Fixture::new(s, program("tanf"));

        let e = evaluate_program(&Tanf, &fixture.ctx()).unwrap();
        assert!(!e.eligible());
        assert_eq!(e.value(), 0);
        assert_eq!(e.condition_count(), 2);
        assert_eq!(e.pass_messages().len(), 1); // the child condition
    }

    #[test]
    fn test_pregnancy_satisfies_the_child_condition() {
        let mut head = member(1, 24, Relationship::HeadOfHousehold);
        head.is_pregnant = true;
        let fixture = Fixture::new(screen(vec![head]), program("tanf"));

        let e = evaluate_program(&Tanf, &fixture.ctx()).unwrap();
        assert!(e.eligible());
    }
}

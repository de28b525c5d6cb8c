//! Home weatherization assistance.
//!
//! Income at or below 200% FPL for households paying for their housing
//! (rent or mortgage). Value is the average annual energy saving.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility};
use crate::models::screen::ExpenseKind;

use super::helpers::check_fpl_income;
use super::{EvalContext, RuleCalculator};

const MAX_FPL_PERCENT: f64 = 2.0;
const ANNUAL_VALUE: i64 = 350;

#[derive(Debug)]
pub struct WeatherizationAssistance;

impl RuleCalculator for WeatherizationAssistance {
    fn dependencies(&self) -> &'static [&'static str] {
        &[
            fields::HOUSEHOLD_SIZE,
            fields::INCOME_AMOUNT,
            fields::INCOME_FREQUENCY,
            fields::EXPENSES,
        ]
    }

    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility) {
        check_fpl_income(ctx, e, MAX_FPL_PERCENT);
        e.condition(
            ctx.screen
                .has_expense(&[ExpenseKind::Rent, ExpenseKind::Mortgage]),
            messages::has_expense("rent or mortgage"),
        );
    }

    fn household_value(&self, _ctx: &EvalContext) -> i64 {
        ANNUAL_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::testing::{member, program, screen, Fixture};
    use crate::calculators::evaluate_program;
    use crate::models::screen::{Expense, Frequency, Relationship};

    #[test]
    fn test_renter_under_income_limit_is_eligible() {
        let mut s = screen(vec![member(1, 33, Relationship::HeadOfHousehold)]);
        s.expenses.push(Expense {
            kind: ExpenseKind::Rent,
            amount: 900.0,
            frequency: Frequency::Monthly,
            member_id: None,
        });
        let fixture = Fixture::new(s, program("weatherization_assistance"));

        let e = evaluate_program(&WeatherizationAssistance, &fixture.ctx()).unwrap();
        assert!(e.eligible());
        assert_eq!(e.value(), ANNUAL_VALUE);
    }

    #[test]
    fn test_no_housing_expense_fails() {
        let fixture = Fixture::new(
            screen(vec![member(1, 33, Relationship::HeadOfHousehold)]),
            program("weatherization_assistance"),
        );

        let e = evaluate_program(&WeatherizationAssistance, &fixture.ctx()).unwrap();
        assert!(!e.eligible());
    }
}

//! Seasonal heating-bill assistance.
//!
//! Income at or below 160% FPL plus a home-energy expense. The benefit is a
//! flat annual payment toward the heating bill.

use crate::dependency::fields;
use crate::eligibility::{messages, Eligibility};
use crate::models::screen::ExpenseKind;

use super::helpers::check_fpl_income;
use super::{EvalContext, RuleCalculator};

const MAX_FPL_PERCENT: f64 = 1.6;
const ANNUAL_VALUE: i64 = 400;

const ENERGY_EXPENSES: [ExpenseKind; 3] = [
    ExpenseKind::Heating,
    ExpenseKind::Cooling,
    ExpenseKind::Electricity,
];

#[derive(Debug)]
pub struct EnergyAssistance;

impl RuleCalculator for EnergyAssistance {
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
            ctx.screen.has_expense(&ENERGY_EXPENSES),
            messages::has_expense("home energy"),
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
    fn test_heating_expense_and_low_income_qualify() {
        let mut s = screen(vec![member(1, 50, Relationship::HeadOfHousehold)]);
        s.expenses.push(Expense {
            kind: ExpenseKind::Heating,
            amount: 90.0,
            frequency: Frequency::Monthly,
            member_id: None,
        });
        let fixture = Fixture::new(s, program("energy_assistance"));

        let e = evaluate_program(&EnergyAssistance, &fixture.ctx()).unwrap();
        assert!(e.eligible());
        assert_eq!(e.value(), ANNUAL_VALUE);
    }

    #[test]
    fn test_no_energy_expense_fails() {
        let fixture = Fixture::new(
            screen(vec![member(1, 50, Relationship::HeadOfHousehold)]),
            program("energy_assistance"),
        );

        let e = evaluate_program(&EnergyAssistance, &fixture.ctx()).unwrap();
        assert!(!e.eligible());
        assert_eq!(e.value(), 0);
    }
}

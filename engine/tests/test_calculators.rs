//! Rule-calculator scenarios through the public evaluation protocol.

mod common;

use benefits_screener_engine::calculators::{evaluate_program, rule_calculator, EvalContext, ProgramResults};
use benefits_screener_engine::dependency::Dependencies;
use benefits_screener_engine::income_limits::StaticIncomeLimits;
use benefits_screener_engine::models::program::Program;
use benefits_screener_engine::models::screen::{ExpenseKind, Relationship, Screen};
use common::{earning, expense, member, rule_program, screen};

struct Fixture {
    screen: Screen,
    program: Program,
    tracker: Dependencies,
    results: ProgramResults,
    limits: StaticIncomeLimits,
}

impl Fixture {
    fn new(screen: Screen, code: &str) -> Self {
        let tracker = Dependencies::for_screen(&screen);
        Self {
            screen,
            program: rule_program(code, "cash"),
            tracker,
            results: ProgramResults::new(),
            limits: StaticIncomeLimits::new(),
        }
    }

    fn ctx(&self) -> EvalContext<'_> {
        EvalContext {
            screen: &self.screen,
            program: &self.program,
            tracker: &self.tracker,
            results: &self.results,
            income_limits: &self.limits,
        }
    }
}

#[test]
fn test_zero_income_single_adult_passes_every_income_test() {
    let fixture = Fixture::new(
        screen(vec![member(1, 30, Relationship::HeadOfHousehold)]),
        "utility_bill_pay",
    );
    let calc = rule_calculator("utility_bill_pay").unwrap();

    let e = evaluate_program(calc.as_ref(), &fixture.ctx()).unwrap();
    assert!(e.eligible());
    assert!(e.fail_messages().is_empty());
    assert!(e.value() > 0);
}

#[test]
fn test_skipped_income_details_degrade_to_missing() {
    let mut s = screen(vec![member(1, 30, Relationship::HeadOfHousehold)]);
    s.skipped_income_details = true;
    let fixture = Fixture::new(s, "tanf");
    let calc = rule_calculator("tanf").unwrap();

    assert!(evaluate_program(calc.as_ref(), &fixture.ctx()).is_none());
}

#[test]
fn test_presumptive_chain_across_programs() {
    // First compute energy assistance, then feed its result to the
    // downstream bill-pay program the way the orchestrator does
    let mut s = screen(vec![earning(member(1, 45, Relationship::HeadOfHousehold), 1_200.0)]);
    s.expenses.push(expense(ExpenseKind::Heating, 100.0));

    let mut fixture = Fixture::new(s, "energy_assistance");
    let upstream = rule_calculator("energy_assistance").unwrap();
    let e = evaluate_program(upstream.as_ref(), &fixture.ctx()).unwrap();
    assert!(e.eligible());
    fixture.results.insert("energy_assistance", e);

    fixture.program = rule_program("utility_bill_pay", "utilities");
    let downstream = rule_calculator("utility_bill_pay").unwrap();
    let e = evaluate_program(downstream.as_ref(), &fixture.ctx()).unwrap();
    assert!(e.eligible());
    let labels: Vec<&str> = e.pass_messages().iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["eligibility_message.presumptive_eligibility"]);
}

#[test]
fn test_member_level_program_reports_per_member_breakdown() {
    let s = screen(vec![
        member(1, 72, Relationship::HeadOfHousehold),
        member(2, 40, Relationship::Child),
    ]);
    let fixture = Fixture::new(s, "csfp");
    let calc = rule_calculator("csfp").unwrap();

    let e = evaluate_program(calc.as_ref(), &fixture.ctx()).unwrap();
    assert!(e.eligible());
    assert_eq!(e.members().len(), 2);
    assert!(e.member_eligible(1));
    assert!(!e.member_eligible(2));
    assert_eq!(e.value(), e.member_value(1));
}

#[test]
fn test_every_registered_calculator_evaluates_a_complete_screen() {
    // Per-program isolation: no registered calculator may panic on an
    // ordinary complete household
    let mut s = screen(vec![
        earning(member(1, 35, Relationship::HeadOfHousehold), 1_500.0),
        member(2, 8, Relationship::Child),
    ]);
    s.expenses.push(expense(ExpenseKind::Rent, 1_000.0));
    s.expenses.push(expense(ExpenseKind::Heating, 70.0));

    for name in [
        "tanf",
        "ssi",
        "school_lunch",
        "csfp",
        "nurse_family_partnership",
        "energy_assistance",
        "utility_bill_pay",
        "weatherization_assistance",
        "transit_reduced_fare",
        "rental_assistance",
    ] {
        let fixture = Fixture::new(s.clone(), name);
        let calc = rule_calculator(name).unwrap();
        let e = evaluate_program(calc.as_ref(), &fixture.ctx());
        assert!(e.is_some(), "calculator {name} should have complete data");
        let e = e.unwrap();
        if !e.eligible() {
            assert_eq!(e.value(), 0, "calculator {name} must zero ineligible values");
        }
    }
}

#[test]
fn test_insurance_dependency_gates_transit_fare() {
    let s = screen(vec![member(1, 70, Relationship::HeadOfHousehold)]);
    let mut fixture = Fixture::new(s, "transit_reduced_fare");
    fixture.tracker = Dependencies::from_fields(["insurance"]);
    let calc = rule_calculator("transit_reduced_fare").unwrap();

    assert!(evaluate_program(calc.as_ref(), &fixture.ctx()).is_none());
}

//! Shared builders for integration tests.

#![allow(dead_code)]

use uuid::Uuid;

use benefits_screener_engine::models::program::{
    CalculatorKind, FplYear, Program, ProgramCatalog, ProgramCategory,
};
use benefits_screener_engine::models::screen::{
    Expense, ExpenseKind, Frequency, HouseholdMember, IncomeKind, IncomeStream, Insurance,
    Relationship, Screen, UrgentNeedFlags,
};

pub fn member(id: u32, age: u32, relationship: Relationship) -> HouseholdMember {
    HouseholdMember {
        id,
        frontend_id: Uuid::new_v4(),
        age: Some(age),
        relationship,
        has_disability: false,
        visually_impaired: false,
        is_veteran: false,
        is_pregnant: false,
        is_student: false,
        insurance: Insurance::default(),
        income_streams: vec![],
    }
}

pub fn earning(mut member: HouseholdMember, monthly_wages: f64) -> HouseholdMember {
    member.income_streams.push(IncomeStream {
        kind: IncomeKind::Wages,
        amount: monthly_wages,
        frequency: Frequency::Monthly,
    });
    member
}

pub fn screen(members: Vec<HouseholdMember>) -> Screen {
    Screen {
        white_label: "co".to_string(),
        county: Some("Denver".to_string()),
        zipcode: Some("80014".to_string()),
        household_size: members.len() as u32,
        household_assets: Some(0.0),
        members,
        expenses: vec![],
        needs: UrgentNeedFlags::default(),
        existing_benefits: vec![],
        skipped_income_details: false,
        skipped_expense_details: false,
    }
}

pub fn expense(kind: ExpenseKind, monthly: f64) -> Expense {
    Expense {
        kind,
        amount: monthly,
        frequency: Frequency::Monthly,
        member_id: None,
    }
}

pub fn rule_program(code: &str, category: &str) -> Program {
    Program {
        code: code.to_string(),
        name: code.to_string(),
        white_label: "co".to_string(),
        category: category.to_string(),
        calculator: CalculatorKind::Rule {
            name: code.to_string(),
        },
        fpl: fpl_2024(),
        active: true,
        legal_status_required: vec![],
        required_programs: vec![],
        excludes_programs: vec![],
        warnings: vec![],
        value_format: None,
    }
}

pub fn pe_program(code: &str, category: &str) -> Program {
    let mut program = rule_program(code, category);
    program.calculator = CalculatorKind::PolicyEngine;
    program
}

pub fn category(code: &str, cap_calculator: Option<&str>) -> ProgramCategory {
    ProgramCategory {
        code: code.to_string(),
        name: code.to_string(),
        icon: "icon".to_string(),
        priority: 0,
        tax_category: false,
        cap_calculator: cap_calculator.map(str::to_string),
    }
}

pub fn catalog(programs: Vec<Program>, categories: Vec<ProgramCategory>) -> ProgramCatalog {
    ProgramCatalog {
        white_label: "co".to_string(),
        programs,
        categories,
    }
}

pub fn fpl_2024() -> FplYear {
    FplYear {
        period: "2024".to_string(),
        base: 15_060,
        per_person: 5_380,
    }
}

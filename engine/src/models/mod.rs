//! Domain models
//!
//! - `screen`: the household snapshot being evaluated (members, incomes, expenses)
//! - `program`: the static program catalog (programs, categories, urgent needs, warnings)

pub mod program;
pub mod screen;

pub use program::{
    CalculatorKind, FplYear, Program, ProgramCatalog, ProgramCategory, UrgentNeed, WarningMessage,
};
pub use screen::{
    Expense, ExpenseKind, Frequency, HouseholdMember, IncomeKind, IncomeStream, Insurance,
    InsuranceKind, Period, Relationship, Screen, UrgentNeedFlags,
};

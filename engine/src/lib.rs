//! Benefits Screener Engine
//!
//! Deterministic benefits-eligibility screening: evaluates one household
//! snapshot against a catalog of benefit programs and crisis resources.
//!
//! # Architecture
//!
//! - **models**: Domain types (Screen, Program, catalog configuration)
//! - **dependency**: Missing-data tracker gating every calculator
//! - **eligibility**: Condition-accumulating result type and messages
//! - **calculators**: Rule-based program calculators and their registry
//! - **policyengine**: Request/response mapping and client for the external
//!   PolicyEngine microsimulation
//! - **income_limits**: County AMI limit providers
//! - **categories**: Category grouping and value caps
//! - **urgent_needs**: Crisis-resource rule engine
//! - **warnings**: Program warning-message engine
//! - **orchestrator**: Evaluation entry point and snapshots
//!
//! # Critical Invariants
//!
//! 1. All benefit values are i64 (whole dollars per year)
//! 2. Missing data makes a program missing, never ineligible
//! 3. Ineligible results always carry a zero value
//! 4. Evaluation is deterministic for a fixed household and catalog

// Module declarations
pub mod cache;
pub mod calculators;
pub mod categories;
pub mod dependency;
pub mod eligibility;
pub mod income_limits;
pub mod models;
pub mod orchestrator;
pub mod policyengine;
pub mod urgent_needs;
pub mod warnings;

// Re-exports for convenience
pub use calculators::{
    evaluate_program, rule_calculator, CalculatorError, EvalContext, ProgramResults,
    RuleCalculator,
};
pub use categories::{cap_calculator, capped_total, CapCalculator, CapError, CategoryCap};
pub use dependency::Dependencies;
pub use eligibility::{Eligibility, MemberEligibility, Message};
pub use income_limits::{
    AmiPercent, CachedIncomeLimits, IncomeLimitError, IncomeLimits, StaticIncomeLimits,
};
pub use models::{
    program::{CalculatorKind, FplYear, Program, ProgramCatalog, ProgramCategory, UrgentNeed},
    screen::{Expense, HouseholdMember, IncomeStream, Screen, UrgentNeedFlags},
};
pub use orchestrator::{
    evaluate, urgent_need_results, CategoryResult, EligibilitySnapshot, EvaluationOutcome,
    ProgramResult,
};
pub use policyengine::{PeApiConfig, PolicyEngineClient, PolicyEngineError};
pub use urgent_needs::{NeedError, UrgentNeedResult};
pub use warnings::{program_warnings, warning_calculator, WarningError, WarningResult};

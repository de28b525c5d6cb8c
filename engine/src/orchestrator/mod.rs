//! Eligibility Orchestrator
//!
//! The evaluation entry point: takes a household snapshot and a program
//! catalog, runs every active program through its calculator, and produces
//! the result records the presentation layer consumes.

pub mod engine;
pub mod snapshot;

pub use engine::{
    evaluate, urgent_need_results, CategoryResult, EvaluationOutcome, MemberResult, ProgramResult,
};
pub use snapshot::{EligibilitySnapshot, ProgramSnapshot};

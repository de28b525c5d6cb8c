//! Rule-Based Program Calculators
//!
//! One calculator per locally-coded program, sharing the `RuleCalculator`
//! trait. The evaluation protocol:
//!
//! 1. Dependency gate: if the tracker is missing any declared field, the
//!    program is *missing* (excluded from results), never ineligible.
//! 2. Household conditions accumulate into an `Eligibility`; all conditions
//!    are evaluated, there is no early exit.
//! 3. Member conditions run per member for programs with member-level rules.
//! 4. Values are computed only for eligible results.
//!
//! Ordering between calculators is declared, not implicit: a calculator
//! that reads another program's computed eligibility (presumptive
//! eligibility) lists that program in `reads_programs()`, and the
//! orchestrator topologically sorts on those declarations.

pub mod helpers;

mod csfp;
mod energy_assistance;
mod nurse_family_partnership;
mod rental_assistance;
mod school_lunch;
mod ssi;
mod tanf;
mod transit_reduced_fare;
mod utility_bill_pay;
mod weatherization;

use std::collections::HashMap;

use thiserror::Error;

use crate::dependency::Dependencies;
use crate::eligibility::{Eligibility, MemberEligibility};
use crate::income_limits::IncomeLimits;
use crate::models::program::Program;
use crate::models::screen::{HouseholdMember, Screen};

pub use csfp::CommoditySupplementalFood;
pub use energy_assistance::EnergyAssistance;
pub use nurse_family_partnership::NurseFamilyPartnership;
pub use rental_assistance::RentalAssistance;
pub use school_lunch::SchoolLunch;
pub use ssi::Ssi;
pub use tanf::Tanf;
pub use transit_reduced_fare::TransitReducedFare;
pub use utility_bill_pay::UtilityBillPay;
pub use weatherization::WeatherizationAssistance;

/// Registry and declaration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculatorError {
    /// A program references a rule calculator that is not registered
    #[error("unknown rule calculator '{0}'")]
    UnknownCalculator(String),

    /// `reads_programs` declarations form a cycle
    #[error("dependency cycle involving program '{0}'")]
    DependencyCycle(String),
}

/// Already-computed per-program results, readable by downstream calculators
#[derive(Debug, Default)]
pub struct ProgramResults {
    map: HashMap<String, Eligibility>,
}

impl ProgramResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: &str, eligibility: Eligibility) {
        self.map.insert(code.to_string(), eligibility);
    }

    pub fn get(&self, code: &str) -> Option<&Eligibility> {
        self.map.get(code)
    }

    /// Whether a previously-computed program came out eligible
    ///
    /// An absent program reads as not eligible; the orchestrator's ordering
    /// guarantees declared reads are computed first.
    pub fn is_eligible(&self, code: &str) -> bool {
        self.map.get(code).map(|e| e.eligible()).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Eligibility)> {
        self.map.iter()
    }
}

/// Everything a rule calculator may consult
pub struct EvalContext<'a> {
    pub screen: &'a Screen,
    pub program: &'a Program,
    pub tracker: &'a Dependencies,
    pub results: &'a ProgramResults,
    pub income_limits: &'a dyn IncomeLimits,
}

/// The shared calculator contract
pub trait RuleCalculator: std::fmt::Debug {
    /// Tracker fields this calculator needs; any missing one means the
    /// program cannot be calculated
    fn dependencies(&self) -> &'static [&'static str];

    /// Program codes whose computed eligibility this calculator reads
    fn reads_programs(&self) -> &'static [&'static str] {
        &[]
    }

    /// Accumulate household-level conditions
    fn household_eligible(&self, ctx: &EvalContext, e: &mut Eligibility);

    /// Whether this program assesses members individually
    fn has_member_rules(&self) -> bool {
        false
    }

    /// Accumulate member-level conditions (only called when
    /// `has_member_rules` is true)
    fn member_eligible(&self, _ctx: &EvalContext, _member: &HouseholdMember, _e: &mut MemberEligibility) {
    }

    /// Annual household-level value, dollars (only called when eligible)
    fn household_value(&self, _ctx: &EvalContext) -> i64 {
        0
    }

    /// Annual member-level value, dollars (only called for eligible members)
    fn member_value(&self, _ctx: &EvalContext, _member: &HouseholdMember) -> i64 {
        0
    }
}

/// Registry: rule calculator for a registry name
///
/// An unmapped name is a configuration error the orchestrator skips and
/// logs, never a runtime panic mid-evaluation.
pub fn rule_calculator(name: &str) -> Result<Box<dyn RuleCalculator>, CalculatorError> {
    match name {
        "tanf" => Ok(Box::new(Tanf)),
        "ssi" => Ok(Box::new(Ssi)),
        "school_lunch" => Ok(Box::new(SchoolLunch)),
        "csfp" => Ok(Box::new(CommoditySupplementalFood)),
        "nurse_family_partnership" => Ok(Box::new(NurseFamilyPartnership)),
        "energy_assistance" => Ok(Box::new(EnergyAssistance)),
        "utility_bill_pay" => Ok(Box::new(UtilityBillPay)),
        "weatherization_assistance" => Ok(Box::new(WeatherizationAssistance)),
        "transit_reduced_fare" => Ok(Box::new(TransitReducedFare)),
        "rental_assistance" => Ok(Box::new(RentalAssistance)),
        _ => Err(CalculatorError::UnknownCalculator(name.to_string())),
    }
}

/// Run the full evaluation protocol for one calculator
///
/// Returns `None` when the dependency gate fails: the program is missing,
/// not ineligible.
pub fn evaluate_program(calc: &dyn RuleCalculator, ctx: &EvalContext) -> Option<Eligibility> {
    if ctx.tracker.has(calc.dependencies()) {
        return None;
    }

    let mut e = Eligibility::new();
    calc.household_eligible(ctx, &mut e);

    if calc.has_member_rules() {
        for member in &ctx.screen.members {
            let mut m = MemberEligibility::new(member.id, member.frontend_id);
            calc.member_eligible(ctx, member, &mut m);
            if m.eligible() {
                m.set_value(calc.member_value(ctx, member));
            }
            e.add_member(m);
        }
    }

    if e.eligible() {
        e.set_household_value(calc.household_value(ctx));
    }

    Some(e)
}

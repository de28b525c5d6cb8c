//! Program Catalog
//!
//! Static configuration for one jurisdiction: the benefit programs, their
//! categories, the urgent-need resources, and the warning messages attached
//! to programs. Created by import tooling; strictly read-only during
//! evaluation.

use serde::{Deserialize, Serialize};

use crate::models::screen::UrgentNeedFlags;

/// Which evaluation path a program takes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculatorKind {
    /// Modeled by the external PolicyEngine microsimulation
    PolicyEngine,
    /// Hand-coded rule calculator, dispatched by registry name
    Rule { name: String },
}

/// Federal poverty guideline table for one year
///
/// The guideline is linear in household size: a first-person base plus a
/// fixed increment per additional person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FplYear {
    /// Calculation period, e.g. "2024"
    pub period: String,
    /// Guideline for a household of one, dollars/year
    pub base: i64,
    /// Increment per additional member, dollars/year
    pub per_person: i64,
}

impl FplYear {
    /// Poverty guideline for a household of `household_size`
    pub fn get_limit(&self, household_size: u32) -> i64 {
        let extra = household_size.saturating_sub(1) as i64;
        self.base + self.per_person * extra
    }
}

/// One benefit program definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Stable program code, e.g. "co_energy_assistance"
    pub code: String,
    pub name: String,
    /// Jurisdiction ("white label") this program belongs to
    pub white_label: String,
    /// Category this program is grouped under
    pub category: String,
    pub calculator: CalculatorKind,
    pub fpl: FplYear,
    pub active: bool,
    /// Legal statuses that qualify; passed through to the result record
    pub legal_status_required: Vec<String>,
    /// Programs that must accompany this one (presentation metadata)
    pub required_programs: Vec<String>,
    /// Programs that cannot be combined with this one
    pub excludes_programs: Vec<String>,
    /// Warning calculators to evaluate when the program is eligible
    pub warnings: Vec<WarningMessage>,
    /// Display format hint for the value, e.g. "monthly"
    pub value_format: Option<String>,
}

/// A category grouping programs for presentation and value capping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCategory {
    pub code: String,
    pub name: String,
    pub icon: String,
    /// Display ordering; lower sorts first
    pub priority: i32,
    /// Tax-credit categories get distinct presentation treatment
    pub tax_category: bool,
    /// Named cap calculator; `None` means no cap (pass-through)
    pub cap_calculator: Option<String>,
}

/// Crisis-need classification for urgent-need resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedType {
    Food,
    BabySupplies,
    Housing,
    MentalHealth,
    ChildDev,
    Funeral,
    FamilyPlanning,
    JobResources,
    DentalCare,
    LegalServices,
    VeteranServices,
    Savings,
}

impl NeedType {
    /// Whether the household flagged this need on the immediate-needs page
    pub fn is_flagged(&self, flags: &UrgentNeedFlags) -> bool {
        match self {
            NeedType::Food => flags.food,
            NeedType::BabySupplies => flags.baby_supplies,
            NeedType::Housing => flags.housing,
            NeedType::MentalHealth => flags.mental_health,
            NeedType::ChildDev => flags.child_dev,
            NeedType::Funeral => flags.funeral,
            NeedType::FamilyPlanning => flags.family_planning,
            NeedType::JobResources => flags.job_resources,
            NeedType::DentalCare => flags.dental_care,
            NeedType::LegalServices => flags.legal_services,
            NeedType::VeteranServices => flags.veteran_services,
            NeedType::Savings => flags.savings,
        }
    }
}

/// An urgent-need (crisis resource) definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgentNeed {
    pub code: String,
    pub name: String,
    pub white_label: String,
    pub need_type: NeedType,
    pub active: bool,
    /// Counties where this resource applies; empty means all counties
    pub counties: Vec<String>,
    /// Expense type names (case-insensitive) at least one of which the
    /// household must carry; empty means no expense requirement
    pub required_expense_types: Vec<String>,
    /// Named predicate functions, all of which must pass; empty means the
    /// cross-cutting gates alone decide
    pub functions: Vec<String>,
}

/// A UI warning message gated by a named calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningMessage {
    /// Registry name of the calculator deciding whether to show this warning
    pub calculator: String,
    pub message: String,
    /// Counties where the warning applies; empty means all
    pub counties: Vec<String>,
    /// Legal statuses the warning concerns; passed through to the result
    #[serde(default)]
    pub legal_status_required: Vec<String>,
}

/// The complete per-jurisdiction catalog handed to the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCatalog {
    pub white_label: String,
    pub programs: Vec<Program>,
    pub categories: Vec<ProgramCategory>,
}

impl ProgramCatalog {
    /// Active programs, in catalog declaration order
    pub fn active_programs(&self) -> impl Iterator<Item = &Program> {
        self.programs.iter().filter(|p| p.active)
    }

    pub fn category(&self, code: &str) -> Option<&ProgramCategory> {
        self.categories.iter().find(|c| c.code == code)
    }
}

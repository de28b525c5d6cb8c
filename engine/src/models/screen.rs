//! Household Snapshot ("Screen")
//!
//! The unit of evaluation: one household's demographic, income, and expense
//! data as submitted through the screener. A `Screen` owns its members,
//! income streams, and expenses, and exposes the read-only derived
//! aggregates that calculators consume.
//!
//! # Critical Invariants
//!
//! 1. All benefit values produced from this data are i64 whole dollars/year
//! 2. A `Screen` is never mutated during an evaluation (all accessors `&self`)
//! 3. `household_size` should equal the member count; mismatch degrades to
//!    "cannot calculate" via the dependency tracker, never to a wrong answer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// How often an income stream or expense recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Semimonthly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Number of occurrences per year
    pub fn per_year(&self) -> f64 {
        match self {
            Frequency::Weekly => 52.0,
            Frequency::Biweekly => 26.0,
            Frequency::Semimonthly => 24.0,
            Frequency::Monthly => 12.0,
            Frequency::Yearly => 1.0,
        }
    }
}

/// Reporting period for derived aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Monthly,
    Yearly,
}

impl Period {
    fn from_yearly(&self, yearly: f64) -> f64 {
        match self {
            Period::Monthly => yearly / 12.0,
            Period::Yearly => yearly,
        }
    }
}

/// Typed income stream categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    Wages,
    SelfEmployment,
    Unemployment,
    ChildSupport,
    Alimony,
    Pension,
    SocialSecurityRetirement,
    SocialSecurityDisability,
    Ssi,
    VeteransBenefits,
    Investment,
    Rental,
    GiftsOrContributions,
}

impl IncomeKind {
    /// Earned income comes from work; everything else is unearned
    pub fn is_earned(&self) -> bool {
        matches!(self, IncomeKind::Wages | IncomeKind::SelfEmployment)
    }
}

/// Selector for income aggregation
///
/// Mirrors the category strings the screener uses ("all", "earned",
/// "unearned", or specific types) as a typed filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeFilter {
    All,
    Earned,
    Unearned,
    Kind(IncomeKind),
}

impl IncomeFilter {
    fn matches(&self, kind: IncomeKind) -> bool {
        match self {
            IncomeFilter::All => true,
            IncomeFilter::Earned => kind.is_earned(),
            IncomeFilter::Unearned => !kind.is_earned(),
            IncomeFilter::Kind(k) => *k == kind,
        }
    }
}

/// A single income stream belonging to a household member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStream {
    pub kind: IncomeKind,
    /// Amount per `frequency` occurrence, in dollars
    pub amount: f64,
    pub frequency: Frequency,
}

impl IncomeStream {
    pub fn yearly(&self) -> f64 {
        self.amount * self.frequency.per_year()
    }
}

/// Typed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Rent,
    Mortgage,
    SubsidizedRent,
    Heating,
    Cooling,
    Electricity,
    Water,
    Telephone,
    ChildCare,
    ChildSupport,
    Medical,
    PropertyTax,
    HoaFees,
    HomeownersInsurance,
    Dental,
    Other,
}

impl ExpenseKind {
    /// Canonical lowercase name, used for case-insensitive config matching
    pub fn name(&self) -> &'static str {
        match self {
            ExpenseKind::Rent => "rent",
            ExpenseKind::Mortgage => "mortgage",
            ExpenseKind::SubsidizedRent => "subsidized_rent",
            ExpenseKind::Heating => "heating",
            ExpenseKind::Cooling => "cooling",
            ExpenseKind::Electricity => "electricity",
            ExpenseKind::Water => "water",
            ExpenseKind::Telephone => "telephone",
            ExpenseKind::ChildCare => "child_care",
            ExpenseKind::ChildSupport => "child_support",
            ExpenseKind::Medical => "medical",
            ExpenseKind::PropertyTax => "property_tax",
            ExpenseKind::HoaFees => "hoa_fees",
            ExpenseKind::HomeownersInsurance => "homeowners_insurance",
            ExpenseKind::Dental => "dental",
            ExpenseKind::Other => "other",
        }
    }
}

/// A recurring household expense
///
/// Expenses live on the screen; `member_id` ties member-scoped expenses
/// (medical, child support paid) to a specific person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub kind: ExpenseKind,
    /// Amount per `frequency` occurrence, in dollars
    pub amount: f64,
    pub frequency: Frequency,
    pub member_id: Option<u32>,
}

impl Expense {
    pub fn yearly(&self) -> f64 {
        self.amount * self.frequency.per_year()
    }
}

/// Relationship of a member to the head of household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    HeadOfHousehold,
    Spouse,
    DomesticPartner,
    Child,
    StepChild,
    FosterChild,
    Grandchild,
    Parent,
    Sibling,
    Relative,
    Unrelated,
}

impl Relationship {
    /// Spouse-like relationships form a marital unit with the head
    pub fn is_spouse(&self) -> bool {
        matches!(self, Relationship::Spouse | Relationship::DomesticPartner)
    }

    /// Child-like relationships that can be claimed as dependents
    pub fn is_child(&self) -> bool {
        matches!(
            self,
            Relationship::Child
                | Relationship::StepChild
                | Relationship::FosterChild
                | Relationship::Grandchild
        )
    }
}

/// Health insurance coverage kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceKind {
    None,
    Employer,
    Private,
    Medicaid,
    Medicare,
    Chp,
    Emergency,
    FamilyPlanning,
    Va,
}

/// A member's insurance coverage set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Insurance {
    pub kinds: Vec<InsuranceKind>,
}

impl Insurance {
    pub fn has_any(&self, kinds: &[InsuranceKind]) -> bool {
        self.kinds.iter().any(|k| kinds.contains(k))
    }

    /// No coverage at all, or explicitly marked uninsured
    pub fn is_uninsured(&self) -> bool {
        self.kinds.is_empty() || self.kinds.iter().all(|k| *k == InsuranceKind::None)
    }
}

/// One person in the household
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdMember {
    /// Stable numeric id, used as the person key in PolicyEngine payloads
    pub id: u32,
    /// Id exposed to the presentation layer
    pub frontend_id: Uuid,
    /// Missing age degrades affected programs to "cannot calculate"
    pub age: Option<u32>,
    pub relationship: Relationship,
    pub has_disability: bool,
    pub visually_impaired: bool,
    pub is_veteran: bool,
    pub is_pregnant: bool,
    pub is_student: bool,
    pub insurance: Insurance,
    pub income_streams: Vec<IncomeStream>,
}

impl HouseholdMember {
    /// Gross income for this member over `period`, restricted by `filters`
    pub fn calc_gross_income(&self, period: Period, filters: &[IncomeFilter]) -> f64 {
        self.calc_gross_income_excluding(period, filters, &[])
    }

    /// Gross income with specific kinds excluded (e.g. SSI disregards)
    pub fn calc_gross_income_excluding(
        &self,
        period: Period,
        filters: &[IncomeFilter],
        exclude: &[IncomeKind],
    ) -> f64 {
        let yearly: f64 = self
            .income_streams
            .iter()
            .filter(|s| !exclude.contains(&s.kind))
            .filter(|s| filters.iter().any(|f| f.matches(s.kind)))
            .map(|s| s.yearly())
            .sum();
        period.from_yearly(yearly)
    }

    /// Whether this member belongs in the primary tax filing unit
    ///
    /// Head, spouse/partner, and dependents (children under 19, or student
    /// children under 24) file together; other adults are modeled as a
    /// separate filing unit.
    pub fn is_in_tax_unit(&self) -> bool {
        if self.relationship == Relationship::HeadOfHousehold || self.relationship.is_spouse() {
            return true;
        }
        if self.relationship.is_child() {
            let age = self.age.unwrap_or(0);
            return age < 19 || (self.is_student && age < 24);
        }
        false
    }
}

/// Crisis-need flags gathered on the immediate-needs page
///
/// Each flag gates which urgent-need resources are even considered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UrgentNeedFlags {
    pub food: bool,
    pub baby_supplies: bool,
    pub housing: bool,
    pub mental_health: bool,
    pub child_dev: bool,
    pub funeral: bool,
    pub family_planning: bool,
    pub job_resources: bool,
    pub dental_care: bool,
    pub legal_services: bool,
    pub veteran_services: bool,
    pub savings: bool,
}

/// The household snapshot being evaluated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    /// Jurisdiction ("white label") code, e.g. "co", "il", "ma"
    pub white_label: String,
    pub county: Option<String>,
    pub zipcode: Option<String>,
    pub household_size: u32,
    /// Total countable assets; `None` means the household skipped the question
    pub household_assets: Option<f64>,
    pub members: Vec<HouseholdMember>,
    pub expenses: Vec<Expense>,
    pub needs: UrgentNeedFlags,
    /// Program codes the household reports already receiving
    pub existing_benefits: Vec<String>,
    /// Household explicitly declined to provide income details
    pub skipped_income_details: bool,
    /// Household explicitly declined to provide expense details
    pub skipped_expense_details: bool,
}

impl Screen {
    /// Gross household income over `period`, restricted by `filters`
    pub fn calc_gross_income(&self, period: Period, filters: &[IncomeFilter]) -> f64 {
        self.calc_gross_income_excluding(period, filters, &[])
    }

    /// Gross household income with specific kinds excluded
    pub fn calc_gross_income_excluding(
        &self,
        period: Period,
        filters: &[IncomeFilter],
        exclude: &[IncomeKind],
    ) -> f64 {
        self.members
            .iter()
            .map(|m| m.calc_gross_income_excluding(period, filters, exclude))
            .sum()
    }

    /// Total household expenses over `period` for the given kinds
    pub fn calc_expenses(&self, period: Period, kinds: &[ExpenseKind]) -> f64 {
        let yearly: f64 = self
            .expenses
            .iter()
            .filter(|e| kinds.contains(&e.kind))
            .map(|e| e.yearly())
            .sum();
        period.from_yearly(yearly)
    }

    /// Expenses scoped to one member (medical, child support paid, ...)
    pub fn calc_member_expenses(&self, member_id: u32, period: Period, kinds: &[ExpenseKind]) -> f64 {
        let yearly: f64 = self
            .expenses
            .iter()
            .filter(|e| e.member_id == Some(member_id))
            .filter(|e| kinds.contains(&e.kind))
            .map(|e| e.yearly())
            .sum();
        period.from_yearly(yearly)
    }

    /// Whether the household has at least one expense of the given kinds
    pub fn has_expense(&self, kinds: &[ExpenseKind]) -> bool {
        self.expenses.iter().any(|e| kinds.contains(&e.kind))
    }

    /// Canonical lowercase names of all expense kinds present
    pub fn expense_type_names(&self) -> Vec<&'static str> {
        self.expenses.iter().map(|e| e.kind.name()).collect()
    }

    /// Number of children within `[min_age, max_age]`, optionally counting
    /// unborn children of pregnant members
    pub fn num_children(&self, min_age: u32, max_age: u32, include_pregnant: bool) -> u32 {
        let mut count = 0;
        for member in &self.members {
            if member.relationship.is_child() {
                if let Some(age) = member.age {
                    if age >= min_age && age <= max_age {
                        count += 1;
                    }
                }
            }
            if include_pregnant && member.is_pregnant && min_age == 0 {
                count += 1;
            }
        }
        count
    }

    /// Number of members at or above `min_age`
    pub fn num_adults(&self, min_age: u32) -> u32 {
        self.members
            .iter()
            .filter(|m| m.age.unwrap_or(0) >= min_age)
            .count() as u32
    }

    /// Whether the household already receives the named benefit
    pub fn has_benefit(&self, code: &str) -> bool {
        self.existing_benefits.iter().any(|b| b == code)
    }

    pub fn get_member(&self, id: u32) -> Option<&HouseholdMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn head(&self) -> Option<&HouseholdMember> {
        self.members
            .iter()
            .find(|m| m.relationship == Relationship::HeadOfHousehold)
    }

    /// Spouse pairing map: member id -> id of their spouse, if any
    ///
    /// Only the head/spouse pair is modeled; entries are reciprocal so
    /// marital-unit derivation must guard against double-registration.
    pub fn relationship_map(&self) -> HashMap<u32, Option<u32>> {
        let mut map: HashMap<u32, Option<u32>> = HashMap::new();
        let head_id = self.head().map(|h| h.id);
        let spouse_id = self
            .members
            .iter()
            .find(|m| m.relationship.is_spouse())
            .map(|m| m.id);

        for member in &self.members {
            let partner = if Some(member.id) == head_id {
                spouse_id
            } else if Some(member.id) == spouse_id {
                head_id
            } else {
                None
            };
            map.insert(member.id, partner);
        }
        map
    }

    /// Members of the primary tax filing unit, in declaration order
    pub fn main_tax_unit_members(&self) -> Vec<&HouseholdMember> {
        self.members.iter().filter(|m| m.is_in_tax_unit()).collect()
    }

    /// Members filing outside the primary unit, in declaration order
    pub fn secondary_tax_unit_members(&self) -> Vec<&HouseholdMember> {
        self.members.iter().filter(|m| !m.is_in_tax_unit()).collect()
    }
}

//! PolicyEngine Input Variables
//!
//! Each input is a small self-contained unit: a PolicyEngine variable name,
//! a target unit, the screen fields it depends on, and a **pure function**
//! from household data to the value written into the payload. Inputs are
//! stateless and referentially transparent: the same screen always maps to
//! the same value, which is what makes the request builder's conflict
//! detection meaningful.

use serde_json::{json, Value};

use crate::models::screen::{
    ExpenseKind, HouseholdMember, IncomeFilter, Period, Screen,
};

/// Where an input's value lands, with its evaluation function
///
/// Tax-unit inputs are evaluated twice, once per filing unit, against that
/// unit's member slice.
#[derive(Clone, Copy)]
pub enum PeTarget {
    /// One value per household member
    Member(fn(&Screen, &HouseholdMember) -> Value),
    /// One value per tax filing unit
    TaxUnit(fn(&Screen, &[&HouseholdMember]) -> Value),
    /// One value for the SPM unit (whole household)
    SpmUnit(fn(&Screen) -> Value),
    /// One value for the household unit
    Household(fn(&Screen) -> Value),
}

impl std::fmt::Debug for PeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PeTarget::Member(_) => "Member",
            PeTarget::TaxUnit(_) => "TaxUnit",
            PeTarget::SpmUnit(_) => "SpmUnit",
            PeTarget::Household(_) => "Household",
        };
        f.write_str(name)
    }
}

/// A PolicyEngine input variable
#[derive(Debug, Clone, Copy)]
pub struct PeInput {
    /// PolicyEngine variable name
    pub field: &'static str,
    /// Screen fields this input needs (dependency-tracker names)
    pub dependencies: &'static [&'static str],
    pub target: PeTarget,
}

// --- Member-level inputs ---

pub fn age() -> PeInput {
    PeInput {
        field: "age",
        dependencies: &["age"],
        target: PeTarget::Member(|_, m| json!(m.age.unwrap_or(0))),
    }
}

pub fn is_disabled() -> PeInput {
    PeInput {
        field: "is_disabled",
        dependencies: &[],
        target: PeTarget::Member(|_, m| json!(m.has_disability)),
    }
}

pub fn is_pregnant() -> PeInput {
    PeInput {
        field: "is_pregnant",
        dependencies: &[],
        target: PeTarget::Member(|_, m| json!(m.is_pregnant)),
    }
}

pub fn medical_expenses() -> PeInput {
    PeInput {
        field: "medical_out_of_pocket_expenses",
        dependencies: &[],
        target: PeTarget::Member(|s, m| {
            json!(s.calc_member_expenses(m.id, Period::Yearly, &[ExpenseKind::Medical]))
        }),
    }
}

pub fn child_support_expense() -> PeInput {
    PeInput {
        field: "child_support_expense",
        dependencies: &[],
        target: PeTarget::Member(|s, m| {
            json!(s.calc_member_expenses(m.id, Period::Yearly, &[ExpenseKind::ChildSupport]))
        }),
    }
}

pub fn property_tax_expense() -> PeInput {
    PeInput {
        field: "real_estate_taxes",
        dependencies: &[],
        target: PeTarget::Member(|s, m| {
            json!(s.calc_member_expenses(m.id, Period::Yearly, &[ExpenseKind::PropertyTax]))
        }),
    }
}

pub fn member_employment_income() -> PeInput {
    PeInput {
        field: "employment_income",
        dependencies: &["income_amount", "income_frequency"],
        target: PeTarget::Member(|_, m| {
            json!(m.calc_gross_income(Period::Yearly, &[IncomeFilter::Earned]))
        }),
    }
}

// --- Tax-unit inputs ---

pub fn tax_unit_earned_income() -> PeInput {
    PeInput {
        field: "tax_unit_earned_income",
        dependencies: &["income_amount", "income_frequency"],
        target: PeTarget::TaxUnit(|_, members| {
            let total: f64 = members
                .iter()
                .map(|m| m.calc_gross_income(Period::Yearly, &[IncomeFilter::Earned]))
                .sum();
            json!(total)
        }),
    }
}

// --- SPM-unit inputs ---

pub fn snap_earned_income() -> PeInput {
    PeInput {
        field: "snap_earned_income",
        dependencies: &["income_amount", "income_frequency"],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_gross_income(Period::Yearly, &[IncomeFilter::Earned]))
        }),
    }
}

pub fn snap_unearned_income() -> PeInput {
    PeInput {
        field: "snap_unearned_income",
        dependencies: &["income_amount", "income_frequency"],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_gross_income(Period::Yearly, &[IncomeFilter::Unearned]))
        }),
    }
}

pub fn snap_assets() -> PeInput {
    PeInput {
        field: "snap_assets",
        dependencies: &["household_assets"],
        target: PeTarget::SpmUnit(|s| json!(s.household_assets.unwrap_or(0.0) as i64)),
    }
}

pub fn housing_cost() -> PeInput {
    PeInput {
        field: "housing_cost",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_expenses(
                Period::Yearly,
                &[
                    ExpenseKind::Rent,
                    ExpenseKind::Mortgage,
                    ExpenseKind::SubsidizedRent
                ]
            ) as i64)
        }),
    }
}

pub fn has_phone_expense() -> PeInput {
    PeInput {
        field: "has_phone_expense",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| json!(s.has_expense(&[ExpenseKind::Telephone]))),
    }
}

pub fn has_heating_cooling_expense() -> PeInput {
    PeInput {
        field: "has_heating_cooling_expense",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.has_expense(&[ExpenseKind::Heating, ExpenseKind::Cooling]))
        }),
    }
}

pub fn heating_cooling_expense() -> PeInput {
    PeInput {
        field: "heating_cooling_expense",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_expenses(Period::Yearly, &[ExpenseKind::Heating, ExpenseKind::Cooling]))
        }),
    }
}

pub fn water_expense() -> PeInput {
    PeInput {
        field: "water_expense",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_expenses(Period::Yearly, &[ExpenseKind::Water]))
        }),
    }
}

pub fn phone_expense() -> PeInput {
    PeInput {
        field: "phone_expense",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_expenses(Period::Yearly, &[ExpenseKind::Telephone]))
        }),
    }
}

pub fn childcare_expenses() -> PeInput {
    PeInput {
        field: "childcare_expenses",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_expenses(Period::Yearly, &[ExpenseKind::ChildCare]))
        }),
    }
}

pub fn hoa_fees() -> PeInput {
    PeInput {
        field: "hoa_fees",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_expenses(Period::Yearly, &[ExpenseKind::HoaFees]))
        }),
    }
}

pub fn homeowners_insurance() -> PeInput {
    PeInput {
        field: "homeowners_insurance",
        dependencies: &[],
        target: PeTarget::SpmUnit(|s| {
            json!(s.calc_expenses(Period::Yearly, &[ExpenseKind::HomeownersInsurance]))
        }),
    }
}

pub fn snap_emergency_allotment() -> PeInput {
    PeInput {
        field: "snap_emergency_allotment",
        dependencies: &[],
        // Emergency allotments ended; always false
        target: PeTarget::SpmUnit(|_| json!(false)),
    }
}

// --- Household-level inputs ---

pub fn state_code() -> PeInput {
    PeInput {
        field: "state_code",
        dependencies: &[],
        target: PeTarget::Household(|s| json!(s.white_label.to_uppercase())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::screen::{
        Frequency, IncomeKind, IncomeStream, Insurance, Relationship, UrgentNeedFlags,
    };
    use uuid::Uuid;

    fn screen() -> Screen {
        Screen {
            white_label: "co".to_string(),
            county: Some("Denver".to_string()),
            zipcode: Some("80014".to_string()),
            household_size: 1,
            household_assets: Some(1_500.0),
            members: vec![HouseholdMember {
                id: 1,
                frontend_id: Uuid::new_v4(),
                age: Some(32),
                relationship: Relationship::HeadOfHousehold,
                has_disability: true,
                visually_impaired: false,
                is_veteran: false,
                is_pregnant: false,
                is_student: false,
                insurance: Insurance::default(),
                income_streams: vec![IncomeStream {
                    kind: IncomeKind::Wages,
                    amount: 1_000.0,
                    frequency: Frequency::Monthly,
                }],
            }],
            expenses: vec![],
            needs: UrgentNeedFlags::default(),
            existing_benefits: vec![],
            skipped_income_details: false,
            skipped_expense_details: false,
        }
    }

    #[test]
    fn test_member_inputs_are_pure() {
        let s = screen();
        let input = age();
        let PeTarget::Member(f) = input.target else {
            panic!("age is a member input");
        };
        // Same screen, same value, twice
        assert_eq!(f(&s, &s.members[0]), json!(32));
        assert_eq!(f(&s, &s.members[0]), json!(32));
    }

    #[test]
    fn test_spm_income_split() {
        let s = screen();
        let PeTarget::SpmUnit(earned) = snap_earned_income().target else {
            panic!("spm input");
        };
        let PeTarget::SpmUnit(unearned) = snap_unearned_income().target else {
            panic!("spm input");
        };
        assert_eq!(earned(&s), json!(12_000.0));
        assert_eq!(unearned(&s), json!(0.0));
    }

    #[test]
    fn test_state_code_uppercases_white_label() {
        let s = screen();
        let PeTarget::Household(f) = state_code().target else {
            panic!("household input");
        };
        assert_eq!(f(&s), json!("CO"));
    }
}

//! PolicyEngine Result Extraction
//!
//! Turns the nested response back into a per-program `Eligibility`. The
//! shape of the extraction depends on where PolicyEngine computes the
//! program: SPM unit (SNAP), per member (Medicaid, WIC), or per tax unit
//! (tax credits). Eligibility follows the benefit value: a zero benefit is
//! an ineligible household, because PolicyEngine already applied the
//! program rules.

use crate::eligibility::{Eligibility, MemberEligibility};
use crate::models::screen::Screen;

use super::request::{MAIN_TAX_UNIT, SECONDARY_TAX_UNIT};
use super::response::PeResponse;

/// How to read one program's result out of a response
#[derive(Debug, Clone, Copy)]
pub enum PeResultExtractor {
    /// Monthly SPM-unit benefit, annualized (e.g. SNAP)
    SpmMonthly { variable: &'static str },
    /// Yearly SPM-unit benefit taken as-is
    SpmYearly { variable: &'static str },
    /// Per-member enrollment flag with a fixed per-member annual value
    /// (e.g. Medicaid, where the dollar value is an average)
    MemberFlag {
        variable: &'static str,
        member_amount: i64,
    },
    /// Per-member monthly benefit, annualized (e.g. WIC)
    MemberMonthly { variable: &'static str },
    /// Yearly tax-unit credit, summed over both filing units (e.g. EITC)
    TaxUnitYearly { variable: &'static str },
}

impl PeResultExtractor {
    /// Build the eligibility result for one program
    ///
    /// `period` is the program's output period (year, possibly with month).
    pub fn eligibility(&self, screen: &Screen, response: &PeResponse, period: &str) -> Eligibility {
        let mut e = Eligibility::new();

        match self {
            PeResultExtractor::SpmMonthly { variable } => {
                let monthly = response.get_spm_value(variable, period);
                e.condition(monthly > 0.0, None);
                e.set_household_value((monthly * 12.0).trunc() as i64);
            }
            PeResultExtractor::SpmYearly { variable } => {
                let yearly = response.get_spm_value(variable, period);
                e.condition(yearly > 0.0, None);
                e.set_household_value(yearly.trunc() as i64);
            }
            PeResultExtractor::MemberFlag {
                variable,
                member_amount,
            } => {
                for member in &screen.members {
                    let enrolled = response.get_member_value(member.id, variable, period) > 0.0;
                    let mut m = MemberEligibility::new(member.id, member.frontend_id);
                    m.condition(enrolled, None);
                    m.set_value(*member_amount);
                    e.add_member(m);
                }
            }
            PeResultExtractor::MemberMonthly { variable } => {
                for member in &screen.members {
                    let monthly = response.get_member_value(member.id, variable, period);
                    let mut m = MemberEligibility::new(member.id, member.frontend_id);
                    m.condition(monthly > 0.0, None);
                    m.set_value((monthly * 12.0).trunc() as i64);
                    e.add_member(m);
                }
            }
            PeResultExtractor::TaxUnitYearly { variable } => {
                let total = response.get_tax_unit_value(MAIN_TAX_UNIT, variable, period)
                    + response.get_tax_unit_value(SECONDARY_TAX_UNIT, variable, period);
                e.condition(total > 0.0, None);
                e.set_household_value(total.trunc() as i64);
            }
        }

        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::screen::{
        HouseholdMember, Insurance, Relationship, UrgentNeedFlags,
    };
    use serde_json::json;
    use uuid::Uuid;

    fn screen_of_two() -> Screen {
        let member = |id| HouseholdMember {
            id,
            frontend_id: Uuid::new_v4(),
            age: Some(30),
            relationship: if id == 1 {
                Relationship::HeadOfHousehold
            } else {
                Relationship::Child
            },
            has_disability: false,
            visually_impaired: false,
            is_veteran: false,
            is_pregnant: false,
            is_student: false,
            insurance: Insurance::default(),
            income_streams: vec![],
        };
        Screen {
            white_label: "co".to_string(),
            county: None,
            zipcode: None,
            household_size: 2,
            household_assets: Some(0.0),
            members: vec![member(1), member(2)],
            expenses: vec![],
            needs: UrgentNeedFlags::default(),
            existing_benefits: vec![],
            skipped_income_details: false,
            skipped_expense_details: false,
        }
    }

    #[test]
    fn test_spm_monthly_annualizes_and_truncates() {
        let screen = screen_of_two();
        let response = PeResponse::new(json!({
            "result": { "spm_units": { "spm_unit": { "snap": { "2024-01": 250.7 } } } }
        }))
        .unwrap();

        let extractor = PeResultExtractor::SpmMonthly { variable: "snap" };
        let e = extractor.eligibility(&screen, &response, "2024-01");
        assert!(e.eligible());
        assert_eq!(e.value(), 3_008); // trunc(250.7 * 12)
    }

    #[test]
    fn test_zero_benefit_is_ineligible_with_zero_value() {
        let screen = screen_of_two();
        let response = PeResponse::new(json!({ "result": {} })).unwrap();

        let extractor = PeResultExtractor::SpmMonthly { variable: "snap" };
        let e = extractor.eligibility(&screen, &response, "2024-01");
        assert!(!e.eligible());
        assert_eq!(e.value(), 0);
    }

    #[test]
    fn test_member_flag_mixed_enrollment() {
        let screen = screen_of_two();
        let response = PeResponse::new(json!({
            "result": { "people": {
                "1": { "medicaid": { "2024": 0.0 } },
                "2": { "medicaid": { "2024": 1.0 } }
            } }
        }))
        .unwrap();

        let extractor = PeResultExtractor::MemberFlag {
            variable: "medicaid",
            member_amount: 3_900,
        };
        let e = extractor.eligibility(&screen, &response, "2024");
        assert!(e.eligible());
        assert!(!e.member_eligible(1));
        assert!(e.member_eligible(2));
        assert_eq!(e.value(), 3_900);
    }

    #[test]
    fn test_tax_unit_sums_both_filing_units() {
        let screen = screen_of_two();
        let response = PeResponse::new(json!({
            "result": { "tax_units": {
                "tax_unit": { "eitc": { "2024": 1_200.5 } },
                "secondary_tax_unit": { "eitc": { "2024": 300.0 } }
            } }
        }))
        .unwrap();

        let extractor = PeResultExtractor::TaxUnitYearly { variable: "eitc" };
        let e = extractor.eligibility(&screen, &response, "2024");
        assert!(e.eligible());
        assert_eq!(e.value(), 1_500);
    }
}

//! Per-Program PolicyEngine Configurations
//!
//! A config bundles everything one PolicyEngine-backed program contributes
//! to the batched request (inputs), what it wants back (outputs), the
//! calculation period, and how to extract its result. The registry maps
//! program codes to configs; an unknown code is a lookup miss the
//! orchestrator reports as a missing program, never a panic.

use super::extractors::PeResultExtractor;
use super::inputs::{self, PeInput};
use super::outputs::{self, PeOutput};

/// Everything one program contributes to / extracts from a PE batch
#[derive(Debug, Clone)]
pub struct PeProgramConfig {
    pub program_code: &'static str,
    pub inputs: Vec<PeInput>,
    pub outputs: Vec<PeOutput>,
    /// Input period, e.g. "2024"
    pub period: String,
    /// Optional month for the output period ("01" pins January)
    pub period_month: Option<&'static str>,
    pub extractor: PeResultExtractor,
}

impl PeProgramConfig {
    /// Period the outputs are read at: `period` or `period-month`
    pub fn output_period(&self) -> String {
        match self.period_month {
            Some(month) => format!("{}-{}", self.period, month),
            None => self.period.clone(),
        }
    }

    /// Union of all input dependency fields, for the tracker gate
    pub fn dependencies(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = self
            .inputs
            .iter()
            .flat_map(|i| i.dependencies.iter().copied())
            .collect();
        fields.sort_unstable();
        fields.dedup();
        fields
    }
}

/// Inputs shared by every means-tested PE program
fn common_member_inputs() -> Vec<PeInput> {
    vec![inputs::age(), inputs::is_disabled()]
}

/// Registry: PolicyEngine config for a program code
///
/// `period` comes from the program's configured year.
pub fn pe_program_config(program_code: &str, period: &str) -> Option<PeProgramConfig> {
    let config = match program_code {
        "snap" => PeProgramConfig {
            program_code: "snap",
            inputs: {
                let mut v = common_member_inputs();
                v.extend([
                    inputs::snap_earned_income(),
                    inputs::snap_unearned_income(),
                    inputs::snap_assets(),
                    inputs::snap_emergency_allotment(),
                    inputs::housing_cost(),
                    inputs::has_phone_expense(),
                    inputs::has_heating_cooling_expense(),
                    inputs::heating_cooling_expense(),
                    inputs::childcare_expenses(),
                    inputs::water_expense(),
                    inputs::phone_expense(),
                    inputs::hoa_fees(),
                    inputs::homeowners_insurance(),
                    inputs::child_support_expense(),
                    inputs::medical_expenses(),
                    inputs::property_tax_expense(),
                    inputs::state_code(),
                ]);
                v
            },
            outputs: vec![outputs::SNAP],
            period: period.to_string(),
            // SNAP allotments are computed for January
            period_month: Some("01"),
            extractor: PeResultExtractor::SpmMonthly { variable: "snap" },
        },
        "medicaid" => PeProgramConfig {
            program_code: "medicaid",
            inputs: {
                let mut v = common_member_inputs();
                v.extend([
                    inputs::is_pregnant(),
                    inputs::member_employment_income(),
                    inputs::state_code(),
                ]);
                v
            },
            outputs: vec![outputs::MEDICAID],
            period: period.to_string(),
            period_month: None,
            extractor: PeResultExtractor::MemberFlag {
                variable: "medicaid",
                member_amount: 3_900,
            },
        },
        "wic" => PeProgramConfig {
            program_code: "wic",
            inputs: {
                let mut v = common_member_inputs();
                v.extend([
                    inputs::is_pregnant(),
                    inputs::snap_earned_income(),
                    inputs::snap_unearned_income(),
                    inputs::state_code(),
                ]);
                v
            },
            outputs: vec![outputs::WIC],
            period: period.to_string(),
            period_month: None,
            extractor: PeResultExtractor::MemberMonthly { variable: "wic" },
        },
        "eitc" => PeProgramConfig {
            program_code: "eitc",
            inputs: {
                let mut v = common_member_inputs();
                v.extend([inputs::tax_unit_earned_income(), inputs::state_code()]);
                v
            },
            outputs: vec![outputs::EITC],
            period: period.to_string(),
            period_month: None,
            extractor: PeResultExtractor::TaxUnitYearly { variable: "eitc" },
        },
        _ => return None,
    };
    Some(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_period_with_and_without_month() {
        let snap = pe_program_config("snap", "2024").unwrap();
        assert_eq!(snap.output_period(), "2024-01");

        let medicaid = pe_program_config("medicaid", "2024").unwrap();
        assert_eq!(medicaid.output_period(), "2024");
    }

    #[test]
    fn test_unknown_program_code_is_none() {
        assert!(pe_program_config("not_a_program", "2024").is_none());
    }

    #[test]
    fn test_dependency_union_is_deduplicated() {
        let snap = pe_program_config("snap", "2024").unwrap();
        let deps = snap.dependencies();
        let mut deduped = deps.clone();
        deduped.dedup();
        assert_eq!(deps, deduped);
        assert!(deps.contains(&"age"));
        assert!(deps.contains(&"income_amount"));
        assert!(deps.contains(&"household_assets"));
    }
}

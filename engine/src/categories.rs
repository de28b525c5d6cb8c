//! Category Value Caps
//!
//! Programs in one category can overlap: a household will not actually
//! collect the full value of three utility programs at once. Each category
//! may name a cap calculator that groups programs and caps the group's
//! combined value. Caps only ever reduce a total, never raise it, and the
//! raw per-program values are left untouched for display.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::calculators::ProgramResults;

/// Registry errors for cap calculators
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapError {
    #[error("unknown cap calculator '{0}'")]
    UnknownCapCalculator(String),
}

/// A cap over the combined value of a group of programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCap {
    /// Program codes whose values are summed and capped together
    pub programs: Vec<String>,
    /// Maximum combined annual value, dollars
    pub household_cap: i64,
    /// Per-member annual ceilings, keyed by frontend id; members without an
    /// entry are uncapped. Empty means no member-level ceilings.
    pub member_caps: BTreeMap<Uuid, i64>,
}

/// Computes the caps that apply to one category's programs
pub trait CapCalculator: std::fmt::Debug {
    fn caps(&self, results: &ProgramResults) -> Vec<CategoryCap>;
}

/// No caps: the category total is the plain sum
#[derive(Debug)]
pub struct PassThroughCap;

impl CapCalculator for PassThroughCap {
    fn caps(&self, _results: &ProgramResults) -> Vec<CategoryCap> {
        Vec::new()
    }
}

const UTILITY_PROGRAMS: [&str; 3] = [
    "energy_assistance",
    "utility_bill_pay",
    "weatherization_assistance",
];
const UTILITY_CAP: i64 = 500;

/// Utility programs draw on the same assistance fund; their combined value
/// is capped at the fund's per-household maximum
#[derive(Debug)]
pub struct UtilityAssistanceCap;

impl CapCalculator for UtilityAssistanceCap {
    fn caps(&self, _results: &ProgramResults) -> Vec<CategoryCap> {
        vec![CategoryCap {
            programs: UTILITY_PROGRAMS.iter().map(|p| p.to_string()).collect(),
            household_cap: UTILITY_CAP,
            member_caps: BTreeMap::new(),
        }]
    }
}

/// Registry: cap calculator for a category's configured name
pub fn cap_calculator(name: &str) -> Result<Box<dyn CapCalculator>, CapError> {
    match name {
        "utility_assistance" => Ok(Box::new(UtilityAssistanceCap)),
        _ => Err(CapError::UnknownCapCalculator(name.to_string())),
    }
}

/// Capped category total over `(program code, annual value)` pairs
///
/// Each cap group contributes `min(group sum, cap)`, with member ceilings
/// applied to each program's per-member values first; programs outside every
/// group contribute their raw value. Input order does not affect the result.
pub fn capped_total(
    values: &[(String, i64)],
    caps: &[CategoryCap],
    results: &ProgramResults,
) -> i64 {
    let mut total = 0;
    let mut capped: HashSet<&str> = HashSet::new();

    for cap in caps {
        let group: i64 = values
            .iter()
            .filter(|(code, _)| cap.programs.iter().any(|p| p == code))
            .map(|(code, value)| member_capped_value(code, *value, cap, results))
            .sum();
        total += group.min(cap.household_cap);
        capped.extend(cap.programs.iter().map(String::as_str));
    }

    total
        + values
            .iter()
            .filter(|(code, _)| !capped.contains(code.as_str()))
            .map(|(_, value)| *value)
            .sum::<i64>()
}

/// One program's contribution to its cap group with member ceilings applied
///
/// Falls back to the raw value when the cap carries no member ceilings or the
/// program has no computed member breakdown.
fn member_capped_value(code: &str, value: i64, cap: &CategoryCap, results: &ProgramResults) -> i64 {
    if cap.member_caps.is_empty() {
        return value;
    }
    let Some(e) = results.get(code) else {
        return value;
    };
    let members: i64 = e
        .members()
        .iter()
        .map(|m| {
            let member_value = e.member_value(m.member_id);
            match cap.member_caps.get(&m.frontend_id) {
                Some(ceiling) => member_value.min(*ceiling),
                None => member_value,
            }
        })
        .sum();
    e.household_value() + members
}

//! PolicyEngine Response
//!
//! Read-only accessor over the parsed nested API result. PolicyEngine only
//! returns variables it actually computed, so absent keys are expected and
//! benign: every lookup defaults to zero (or empty) instead of raising.

use serde_json::Value;

use super::client::PolicyEngineError;

/// Wrapper over the `result` object of a PolicyEngine response
///
/// Result shape:
/// ```json
/// {
///   "result": {
///     "people": { "1": { "age": { "2024": 32 } } },
///     "spm_units": { "spm_unit": { "snap": { "2024-01": 250.0 } } },
///     "tax_units": { ... },
///     "households": { ... }
///   }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PeResponse {
    result: Value,
}

impl PeResponse {
    /// Wrap a raw API response; the `result` key must be present
    pub fn new(mut response: Value) -> Result<Self, PolicyEngineError> {
        let result = response
            .get_mut("result")
            .map(Value::take)
            .ok_or(PolicyEngineError::MissingResult)?;
        Ok(Self { result })
    }

    /// Generic lookup: unit type -> sub-unit -> variable -> period
    ///
    /// Returns 0.0 on any missing key or non-numeric value.
    pub fn get_unit_value(&self, unit: &str, sub_unit: &str, variable: &str, period: &str) -> f64 {
        self.result
            .get(unit)
            .and_then(|u| u.get(sub_unit))
            .and_then(|s| s.get(variable))
            .and_then(|v| v.get(period))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Member-level value from the `people` unit
    pub fn get_member_value(&self, member_id: u32, variable: &str, period: &str) -> f64 {
        self.get_unit_value("people", &member_id.to_string(), variable, period)
    }

    /// SPM-unit value (household as one economic unit)
    pub fn get_spm_value(&self, variable: &str, period: &str) -> f64 {
        self.get_unit_value("spm_units", "spm_unit", variable, period)
    }

    /// Household-unit value
    pub fn get_household_value(&self, variable: &str, period: &str) -> f64 {
        self.get_unit_value("households", "household", variable, period)
    }

    /// Tax-unit value for the named filing unit
    pub fn get_tax_unit_value(&self, tax_unit: &str, variable: &str, period: &str) -> f64 {
        self.get_unit_value("tax_units", tax_unit, variable, period)
    }

    /// Member ids registered in a unit, or empty when absent
    pub fn get_unit_members(&self, unit: &str, sub_unit: &str) -> Vec<String> {
        self.result
            .get(unit)
            .and_then(|u| u.get(sub_unit))
            .and_then(|s| s.get("members"))
            .and_then(Value::as_array)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a variable came back with a non-zero value
    pub fn has_variable(&self, unit: &str, sub_unit: &str, variable: &str, period: &str) -> bool {
        self.get_unit_value(unit, sub_unit, variable, period) != 0.0
    }
}

//! PolicyEngine Request Builder
//!
//! Builds one nested API payload for *all* PolicyEngine-backed programs in
//! an evaluation. Batching amortizes the network round-trip and guarantees
//! every program sees the same household snapshot.
//!
//! # Critical Invariants
//!
//! 1. Two programs writing the same field+period in the same unit must
//!    agree on the value; a disagreement aborts the build before any HTTP
//! 2. A household with no secondary-tax-unit members never emits the
//!    `secondary_tax_unit` key (the API rejects empty tax units)
//! 3. Marital units are derived once per spouse pair; reciprocal
//!    relationship entries do not double-register

use std::collections::{BTreeMap, HashSet};

use serde_json::{json, Map, Value};
use thiserror::Error;

use super::config::PeProgramConfig;
use super::inputs::PeTarget;
use super::outputs::PeUnit;
use crate::models::screen::Screen;

/// Sub-unit key of the primary tax filing unit
pub const MAIN_TAX_UNIT: &str = "tax_unit";
/// Sub-unit key of the non-dependent secondary filing unit
pub const SECONDARY_TAX_UNIT: &str = "secondary_tax_unit";

/// Errors raised while constructing the payload
#[derive(Debug, Error)]
pub enum RequestError {
    /// Two program configs disagree about a supposedly-shared fact
    #[error(
        "conflicting value for '{field}' at {period} in {unit}/{sub_unit}: {existing} vs {new}"
    )]
    Conflict {
        unit: String,
        sub_unit: String,
        field: String,
        period: String,
        existing: Value,
        new: Value,
    },
}

/// Variables accumulated for one sub-unit: field -> period -> value
///
/// BTreeMaps keep payload serialization deterministic.
#[derive(Debug, Default)]
struct UnitVars {
    vars: BTreeMap<String, BTreeMap<String, Value>>,
}

impl UnitVars {
    fn set(
        &mut self,
        unit: &str,
        sub_unit: &str,
        field: &str,
        period: &str,
        value: Value,
    ) -> Result<(), RequestError> {
        let periods = self.vars.entry(field.to_string()).or_default();
        if let Some(existing) = periods.get(period) {
            if *existing != value {
                return Err(RequestError::Conflict {
                    unit: unit.to_string(),
                    sub_unit: sub_unit.to_string(),
                    field: field.to_string(),
                    period: period.to_string(),
                    existing: existing.clone(),
                    new: value,
                });
            }
            // Identical re-write from another program: not a conflict
            return Ok(());
        }
        periods.insert(period.to_string(), value);
        Ok(())
    }

    fn into_value(self, members: Option<&[String]>) -> Value {
        let mut obj = Map::new();
        if let Some(members) = members {
            obj.insert("members".to_string(), json!(members));
        }
        for (field, periods) in self.vars {
            obj.insert(field, json!(periods));
        }
        Value::Object(obj)
    }
}

/// One batched PolicyEngine request for a screen and a set of program configs
pub struct PeRequest<'a> {
    screen: &'a Screen,
    configs: &'a [PeProgramConfig],
}

impl<'a> PeRequest<'a> {
    pub fn new(screen: &'a Screen, configs: &'a [PeProgramConfig]) -> Self {
        Self { screen, configs }
    }

    /// Build the complete payload, or fail on the first input conflict
    pub fn build(&self) -> Result<Value, RequestError> {
        let member_ids: Vec<String> = self.screen.members.iter().map(|m| m.id.to_string()).collect();
        let main_members = self.screen.main_tax_unit_members();
        let secondary_members = self.screen.secondary_tax_unit_members();
        let main_ids: Vec<String> = main_members.iter().map(|m| m.id.to_string()).collect();
        let secondary_ids: Vec<String> = secondary_members.iter().map(|m| m.id.to_string()).collect();

        let mut people: BTreeMap<String, UnitVars> = self
            .screen
            .members
            .iter()
            .map(|m| (m.id.to_string(), UnitVars::default()))
            .collect();
        let mut main_tax_unit = UnitVars::default();
        let mut secondary_tax_unit = UnitVars::default();
        let mut spm_unit = UnitVars::default();
        let mut household_unit = UnitVars::default();

        for config in self.configs {
            let period = &config.period;
            for input in &config.inputs {
                match input.target {
                    PeTarget::Member(f) => {
                        for member in &self.screen.members {
                            let value = f(self.screen, member);
                            let key = member.id.to_string();
                            if let Some(person) = people.get_mut(&key) {
                                person.set("people", &key, input.field, period, value)?;
                            }
                        }
                    }
                    PeTarget::TaxUnit(f) => {
                        main_tax_unit.set(
                            "tax_units",
                            MAIN_TAX_UNIT,
                            input.field,
                            period,
                            f(self.screen, &main_members),
                        )?;
                        secondary_tax_unit.set(
                            "tax_units",
                            SECONDARY_TAX_UNIT,
                            input.field,
                            period,
                            f(self.screen, &secondary_members),
                        )?;
                    }
                    PeTarget::SpmUnit(f) => {
                        spm_unit.set("spm_units", "spm_unit", input.field, period, f(self.screen))?;
                    }
                    PeTarget::Household(f) => {
                        household_unit.set(
                            "households",
                            "household",
                            input.field,
                            period,
                            f(self.screen),
                        )?;
                    }
                }
            }
        }

        // Output variables are requested by writing them into the payload as
        // nulls at their output period; the API computes whatever is null
        for config in self.configs {
            let period = config.output_period();
            for output in &config.outputs {
                let unit = output.unit.as_str();
                match output.unit {
                    PeUnit::People => {
                        for (key, person) in people.iter_mut() {
                            person.set(unit, key, output.field, &period, Value::Null)?;
                        }
                    }
                    PeUnit::TaxUnits => {
                        main_tax_unit.set(unit, MAIN_TAX_UNIT, output.field, &period, Value::Null)?;
                        secondary_tax_unit.set(
                            unit,
                            SECONDARY_TAX_UNIT,
                            output.field,
                            &period,
                            Value::Null,
                        )?;
                    }
                    PeUnit::SpmUnits => {
                        spm_unit.set(
                            unit,
                            output.unit.default_sub_unit(),
                            output.field,
                            &period,
                            Value::Null,
                        )?;
                    }
                    PeUnit::Households => {
                        household_unit.set(
                            unit,
                            output.unit.default_sub_unit(),
                            output.field,
                            &period,
                            Value::Null,
                        )?;
                    }
                }
            }
        }

        let mut people_obj = Map::new();
        for (id, vars) in people {
            people_obj.insert(id, vars.into_value(None));
        }

        let mut tax_units = Map::new();
        tax_units.insert(
            MAIN_TAX_UNIT.to_string(),
            main_tax_unit.into_value(Some(&main_ids)),
        );
        // The API rejects empty tax units; drop the secondary when unused
        if !secondary_ids.is_empty() {
            tax_units.insert(
                SECONDARY_TAX_UNIT.to_string(),
                secondary_tax_unit.into_value(Some(&secondary_ids)),
            );
        }

        Ok(json!({
            "household": {
                "people": Value::Object(people_obj),
                "tax_units": Value::Object(tax_units),
                "families": { "family": { "members": member_ids } },
                "households": { "household": household_unit.into_value(Some(&member_ids)) },
                "spm_units": { "spm_unit": spm_unit.into_value(Some(&member_ids)) },
                "marital_units": self.marital_units(),
            }
        }))
    }

    /// Marital units from the spouse pairing map
    ///
    /// Visited-set guard: reciprocal entries register each pair exactly once.
    fn marital_units(&self) -> Value {
        let map = self.screen.relationship_map();
        let mut visited: HashSet<u32> = HashSet::new();
        let mut units = Map::new();

        // Iterate members in declaration order so unit keys are stable
        for member in &self.screen.members {
            let Some(Some(partner)) = map.get(&member.id) else {
                continue;
            };
            if visited.contains(&member.id) || visited.contains(partner) {
                continue;
            }
            let pair = [member.id.to_string(), partner.to_string()];
            units.insert(pair.join("-"), json!({ "members": pair }));
            visited.insert(member.id);
            visited.insert(*partner);
        }

        Value::Object(units)
    }
}

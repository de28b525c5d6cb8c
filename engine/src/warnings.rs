//! Program Warning Messages
//!
//! Eligible programs can carry caveats ("benefit may affect your SSI",
//! "apply before the seasonal deadline"). Each configured warning names a
//! calculator that decides whether it applies to this household, plus an
//! optional county allow-list. Warnings are evaluated only for eligible
//! programs.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::models::program::Program;
use crate::models::screen::Screen;

/// Registry errors for warning calculators
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WarningError {
    #[error("unknown warning calculator '{0}'")]
    UnknownWarningCalculator(String),
}

/// One applicable warning, ready for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningResult {
    pub message: String,
    /// Legal statuses from the warning configuration, passed through
    pub legal_status_required: Vec<String>,
}

/// Decides whether one configured warning applies
pub trait WarningCalculator {
    fn show(&self, screen: &Screen) -> bool;
}

/// Unconditional warning
struct AlwaysShow;

impl WarningCalculator for AlwaysShow {
    fn show(&self, _screen: &Screen) -> bool {
        true
    }
}

/// Configured but currently suppressed warning
struct NeverShow;

impl WarningCalculator for NeverShow {
    fn show(&self, _screen: &Screen) -> bool {
        false
    }
}

/// Households filing as more than one tax unit get a caveat on tax-credit
/// estimates
struct MultipleTaxUnits;

impl WarningCalculator for MultipleTaxUnits {
    fn show(&self, screen: &Screen) -> bool {
        !screen.secondary_tax_unit_members().is_empty()
    }
}

/// Registry: warning calculator for a configured name
pub fn warning_calculator(name: &str) -> Result<Box<dyn WarningCalculator>, WarningError> {
    match name {
        "_show" => Ok(Box::new(AlwaysShow)),
        "_dont_show" => Ok(Box::new(NeverShow)),
        "_multiple_tax_units" => Ok(Box::new(MultipleTaxUnits)),
        _ => Err(WarningError::UnknownWarningCalculator(name.to_string())),
    }
}

/// Applicable warning messages for one program, in configuration order
///
/// A misconfigured warning is skipped and logged; it never takes the
/// program's result down with it.
pub fn program_warnings(screen: &Screen, program: &Program) -> Vec<WarningResult> {
    let mut messages = Vec::new();

    for warning in &program.warnings {
        if !warning.counties.is_empty() {
            let county = screen.county.as_deref().unwrap_or("");
            if !warning.counties.iter().any(|c| c == county) {
                continue;
            }
        }
        match warning_calculator(&warning.calculator) {
            Ok(calculator) => {
                if calculator.show(screen) {
                    messages.push(WarningResult {
                        message: warning.message.clone(),
                        legal_status_required: warning.legal_status_required.clone(),
                    });
                }
            }
            Err(e) => {
                warn!(program = %program.code, error = %e, "skipping misconfigured warning");
            }
        }
    }

    messages
}

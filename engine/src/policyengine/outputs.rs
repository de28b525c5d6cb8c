//! PolicyEngine Output Descriptors
//!
//! An output names a variable we want PolicyEngine to compute and where in
//! the nested result it will appear. The request builder writes each output
//! into the payload as a null at its output period; that is how the API is
//! told which variables to calculate.

/// PolicyEngine unit types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeUnit {
    People,
    TaxUnits,
    SpmUnits,
    Households,
}

impl PeUnit {
    /// Key of this unit collection in the payload/result
    pub fn as_str(&self) -> &'static str {
        match self {
            PeUnit::People => "people",
            PeUnit::TaxUnits => "tax_units",
            PeUnit::SpmUnits => "spm_units",
            PeUnit::Households => "households",
        }
    }

    /// Default sub-unit key for singleton units
    ///
    /// People and tax units are keyed per member / per filing unit instead.
    pub fn default_sub_unit(&self) -> &'static str {
        match self {
            PeUnit::People => "",
            PeUnit::TaxUnits => super::request::MAIN_TAX_UNIT,
            PeUnit::SpmUnits => "spm_unit",
            PeUnit::Households => "household",
        }
    }
}

/// A variable requested back from PolicyEngine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeOutput {
    pub field: &'static str,
    pub unit: PeUnit,
}

impl PeOutput {
    pub const fn new(field: &'static str, unit: PeUnit) -> Self {
        Self { field, unit }
    }
}

/// SNAP allotment, computed at the SPM-unit level
pub const SNAP: PeOutput = PeOutput::new("snap", PeUnit::SpmUnits);

/// Medicaid enrollment flag, per member
pub const MEDICAID: PeOutput = PeOutput::new("medicaid", PeUnit::People);

/// WIC benefit, per member
pub const WIC: PeOutput = PeOutput::new("wic", PeUnit::People);

/// Earned income tax credit, per tax unit
pub const EITC: PeOutput = PeOutput::new("eitc", PeUnit::TaxUnits);

//! Dependency Tracker
//!
//! Records which named household fields are missing or unusable so that
//! calculators can short-circuit to "cannot calculate" instead of raising.
//! Built once per evaluation and read-only afterwards.
//!
//! A program whose tracker check fails is reported as *missing* upstream,
//! never as ineligible: "we need more information" must not become a false
//! "you don't qualify".

use std::collections::HashSet;

use crate::models::screen::Screen;

/// Well-known dependency field names
pub mod fields {
    pub const HOUSEHOLD_SIZE: &str = "household_size";
    pub const COUNTY: &str = "county";
    pub const ZIPCODE: &str = "zipcode";
    pub const AGE: &str = "age";
    pub const RELATIONSHIP: &str = "relationship";
    pub const HOUSEHOLD_ASSETS: &str = "household_assets";
    pub const INCOME_AMOUNT: &str = "income_amount";
    pub const INCOME_FREQUENCY: &str = "income_frequency";
    pub const EXPENSES: &str = "expenses";
    pub const INSURANCE: &str = "insurance";
}

/// Immutable set of unusable household data fields
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    missing: HashSet<&'static str>,
}

impl Dependencies {
    /// Derive the missing-field set from a household snapshot
    pub fn for_screen(screen: &Screen) -> Self {
        let mut missing = HashSet::new();

        if screen.members.is_empty()
            || screen.household_size == 0
            || screen.household_size as usize != screen.members.len()
        {
            missing.insert(fields::HOUSEHOLD_SIZE);
        }
        if screen.county.is_none() {
            missing.insert(fields::COUNTY);
        }
        if screen.zipcode.is_none() {
            missing.insert(fields::ZIPCODE);
        }
        if screen.household_assets.is_none() {
            missing.insert(fields::HOUSEHOLD_ASSETS);
        }
        if screen.members.iter().any(|m| m.age.is_none()) {
            missing.insert(fields::AGE);
        }
        if screen.skipped_income_details {
            missing.insert(fields::INCOME_AMOUNT);
            missing.insert(fields::INCOME_FREQUENCY);
        }
        if screen.skipped_expense_details {
            missing.insert(fields::EXPENSES);
        }

        Self { missing }
    }

    /// Build an explicit tracker (tests, degraded evaluations)
    pub fn from_fields(fields: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            missing: fields.into_iter().collect(),
        }
    }

    /// True if **any** of the named fields is missing
    pub fn has(&self, fields: &[&str]) -> bool {
        fields.iter().any(|f| self.missing.contains(f))
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::screen::{
        HouseholdMember, Insurance, Relationship, Screen, UrgentNeedFlags,
    };
    use uuid::Uuid;

    fn screen_with_member(age: Option<u32>) -> Screen {
        Screen {
            white_label: "co".to_string(),
            county: Some("Denver".to_string()),
            zipcode: Some("80014".to_string()),
            household_size: 1,
            household_assets: Some(0.0),
            members: vec![HouseholdMember {
                id: 1,
                frontend_id: Uuid::new_v4(),
                age,
                relationship: Relationship::HeadOfHousehold,
                has_disability: false,
                visually_impaired: false,
                is_veteran: false,
                is_pregnant: false,
                is_student: false,
                insurance: Insurance::default(),
                income_streams: vec![],
            }],
            expenses: vec![],
            needs: UrgentNeedFlags::default(),
            existing_benefits: vec![],
            skipped_income_details: false,
            skipped_expense_details: false,
        }
    }

    #[test]
    fn test_complete_screen_has_no_missing_fields() {
        let tracker = Dependencies::for_screen(&screen_with_member(Some(30)));
        assert!(tracker.is_empty());
        assert!(!tracker.has(&[fields::AGE, fields::COUNTY]));
    }

    #[test]
    fn test_missing_age_is_tracked() {
        let tracker = Dependencies::for_screen(&screen_with_member(None));
        assert!(tracker.has(&[fields::AGE]));
        // `has` is any-of
        assert!(tracker.has(&[fields::COUNTY, fields::AGE]));
        assert!(!tracker.has(&[fields::COUNTY]));
    }

    #[test]
    fn test_household_size_mismatch_is_tracked() {
        let mut screen = screen_with_member(Some(30));
        screen.household_size = 3;
        let tracker = Dependencies::for_screen(&screen);
        assert!(tracker.has(&[fields::HOUSEHOLD_SIZE]));
    }

    #[test]
    fn test_skipped_sections_mark_fields() {
        let mut screen = screen_with_member(Some(30));
        screen.skipped_income_details = true;
        screen.skipped_expense_details = true;
        let tracker = Dependencies::for_screen(&screen);
        assert!(tracker.has(&[fields::INCOME_AMOUNT]));
        assert!(tracker.has(&[fields::INCOME_FREQUENCY]));
        assert!(tracker.has(&[fields::EXPENSES]));
    }
}

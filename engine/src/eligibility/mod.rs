//! Eligibility Result
//!
//! The per-(program, household) result accumulated by calculators: every
//! condition that was checked, pass or fail, plus the computed benefit
//! value and the per-member breakdown.
//!
//! # Protocol
//!
//! - `condition(passed, message)` records an outcome and returns `passed`
//!   for chaining. Evaluation **never** early-exits on a failed condition;
//!   the UI must be able to explain every reason, not just the first.
//! - Overall eligibility is a fold over the recorded outcomes, so "have all
//!   conditions been evaluated" is independently verifiable.
//! - Household ineligibility forces every member ineligible; the reverse is
//!   not permitted.
//! - Value is forced to 0 whenever the result is ineligible.
//!
//! # Critical Invariants
//!
//! 1. `eligible() == false` implies `value() == 0`, household and member level
//! 2. Condition ordering is insertion ordering (deterministic per rule order)

pub mod messages;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use messages::Message;

/// One evaluated condition: did it hold, and how do we explain it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionOutcome {
    pub passed: bool,
    pub message: Option<Message>,
}

/// Per-member eligibility and value for programs with member-level rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEligibility {
    pub member_id: u32,
    pub frontend_id: Uuid,
    conditions: Vec<ConditionOutcome>,
    value: i64,
}

impl MemberEligibility {
    pub fn new(member_id: u32, frontend_id: Uuid) -> Self {
        Self {
            member_id,
            frontend_id,
            conditions: Vec::new(),
            value: 0,
        }
    }

    /// Record a member-level condition; returns `passed` for chaining
    pub fn condition(&mut self, passed: bool, message: impl Into<Option<Message>>) -> bool {
        self.conditions.push(ConditionOutcome {
            passed,
            message: message.into(),
        });
        passed
    }

    /// AND-fold over all recorded member conditions
    pub fn eligible(&self) -> bool {
        self.conditions.iter().all(|c| c.passed)
    }

    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    /// Member value; 0 unless the member is eligible
    pub fn value(&self) -> i64 {
        if self.eligible() {
            self.value
        } else {
            0
        }
    }
}

/// The accumulated eligibility result for one program
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Eligibility {
    conditions: Vec<ConditionOutcome>,
    household_value: i64,
    members: Vec<MemberEligibility>,
    /// Whether this program has member-level rules at all; distinguishes
    /// "no member qualified" from "members are not individually assessed"
    has_member_rules: bool,
}

impl Eligibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a household-level condition; returns `passed` for chaining
    ///
    /// Pass `None` for conditions with no user-facing explanation.
    pub fn condition(&mut self, passed: bool, message: impl Into<Option<Message>>) -> bool {
        self.conditions.push(ConditionOutcome {
            passed,
            message: message.into(),
        });
        passed
    }

    /// Attach a member-level result
    pub fn add_member(&mut self, member: MemberEligibility) {
        self.has_member_rules = true;
        self.members.push(member);
    }

    /// Household conditions all passed
    pub fn household_eligible(&self) -> bool {
        self.conditions.iter().all(|c| c.passed)
    }

    /// Overall eligibility: household conditions AND, for programs with
    /// member rules, at least one eligible member
    pub fn eligible(&self) -> bool {
        let members_ok = !self.has_member_rules || self.members.iter().any(|m| m.eligible());
        self.household_eligible() && members_ok
    }

    pub fn set_household_value(&mut self, value: i64) {
        self.household_value = value;
    }

    /// Household-level portion of the value; 0 when ineligible
    pub fn household_value(&self) -> i64 {
        if self.eligible() {
            self.household_value
        } else {
            0
        }
    }

    /// Total annual value: household portion plus eligible member values
    pub fn value(&self) -> i64 {
        if !self.eligible() {
            return 0;
        }
        self.household_value + self.members.iter().map(|m| m.value()).sum::<i64>()
    }

    /// Member results; values are forced to 0 when the household failed
    pub fn members(&self) -> &[MemberEligibility] {
        &self.members
    }

    /// Member value honoring the household-dominates rule
    pub fn member_value(&self, member_id: u32) -> i64 {
        if !self.eligible() {
            return 0;
        }
        self.members
            .iter()
            .find(|m| m.member_id == member_id)
            .map(|m| m.value())
            .unwrap_or(0)
    }

    /// Whether a specific member is eligible (household rule applied)
    pub fn member_eligible(&self, member_id: u32) -> bool {
        if !self.household_eligible() {
            return false;
        }
        self.members
            .iter()
            .find(|m| m.member_id == member_id)
            .map(|m| m.eligible())
            .unwrap_or(false)
    }

    /// Messages of passed conditions, in evaluation order
    pub fn pass_messages(&self) -> Vec<&Message> {
        self.conditions
            .iter()
            .filter(|c| c.passed)
            .filter_map(|c| c.message.as_ref())
            .collect()
    }

    /// Messages of failed conditions, in evaluation order
    pub fn fail_messages(&self) -> Vec<&Message> {
        self.conditions
            .iter()
            .filter(|c| !c.passed)
            .filter_map(|c| c.message.as_ref())
            .collect()
    }

    /// Number of recorded household conditions
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }
}

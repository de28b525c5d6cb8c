//! Evaluation Driver
//!
//! # Critical Invariants
//!
//! 1. Missing data makes a program *missing*, never ineligible
//! 2. A failure in one program (bad config, cycle, PE outage) is isolated;
//!    the rest of the batch still evaluates
//! 3. Rule programs run in dependency order: a calculator that declares a
//!    read of another program's result always runs after it, with ties
//!    broken by catalog declaration order
//! 4. Output ordering follows the catalog, so results are deterministic for
//!    a fixed catalog and household

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculators::{
    self, CalculatorError, EvalContext, ProgramResults, RuleCalculator,
};
use crate::categories::{cap_calculator, capped_total, CategoryCap};
use crate::dependency::Dependencies;
use crate::eligibility::Message;
use crate::income_limits::IncomeLimits;
use crate::models::program::{CalculatorKind, Program, ProgramCatalog, UrgentNeed};
use crate::models::screen::Screen;
use crate::policyengine::{pe_program_config, PeProgramConfig, PeRequest, PolicyEngineClient};
use crate::urgent_needs::{eligible_urgent_needs, UrgentNeedResult};
use crate::warnings::{program_warnings, WarningResult};

use super::snapshot::{EligibilitySnapshot, ProgramSnapshot};

/// Per-member slice of a program result
#[derive(Debug, Clone, Serialize)]
pub struct MemberResult {
    pub frontend_id: Uuid,
    pub eligible: bool,
    pub value: i64,
}

/// One program's complete result record
#[derive(Debug, Clone, Serialize)]
pub struct ProgramResult {
    pub code: String,
    pub name: String,
    pub category: String,
    pub eligible: bool,
    /// Total annual value, dollars (0 when ineligible)
    pub value: i64,
    /// Household-level portion of the value
    pub household_value: i64,
    pub members: Vec<MemberResult>,
    pub passed_messages: Vec<Message>,
    pub failed_messages: Vec<Message>,
    /// Household reports already receiving this benefit
    pub already_has: bool,
    pub warnings: Vec<WarningResult>,
    /// Qualifying legal statuses, passed through for presentation
    pub legal_status_required: Vec<String>,
}

/// Aggregated values for one program category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub code: String,
    pub name: String,
    pub icon: String,
    pub priority: i32,
    pub tax_category: bool,
    /// Codes of the computed programs in this category, catalog order
    pub programs: Vec<String>,
    /// Plain sum of the programs' values
    pub raw_total: i64,
    /// Total after cap calculators; never exceeds `raw_total`
    pub capped_total: i64,
    /// Caps that applied to this category, for presentation
    pub caps: Vec<CategoryCap>,
}

/// Everything one evaluation produced
#[derive(Debug, Serialize)]
pub struct EvaluationOutcome {
    /// Computed programs in catalog order; missing programs are absent
    pub programs: Vec<ProgramResult>,
    /// Whether any active program could not be computed
    pub missing_programs: bool,
    pub categories: Vec<CategoryResult>,
    pub snapshot: EligibilitySnapshot,
}

/// Evaluate every active program in the catalog for one household
pub fn evaluate(
    screen: &Screen,
    catalog: &ProgramCatalog,
    pe_client: &PolicyEngineClient,
    income_limits: &dyn IncomeLimits,
) -> EvaluationOutcome {
    let tracker = Dependencies::for_screen(screen);
    let mut missing_programs = false;
    let mut results = ProgramResults::new();

    // Partition active programs by calculator kind; unmapped names are
    // configuration errors counted as missing
    let mut pe_programs: Vec<(&Program, PeProgramConfig)> = Vec::new();
    let mut rule_programs: Vec<(&Program, Box<dyn RuleCalculator>)> = Vec::new();
    for program in catalog.active_programs() {
        match &program.calculator {
            CalculatorKind::PolicyEngine => {
                match pe_program_config(&program.code, &program.fpl.period) {
                    Some(config) => pe_programs.push((program, config)),
                    None => {
                        warn!(program = %program.code, "no PolicyEngine config for program");
                        missing_programs = true;
                    }
                }
            }
            CalculatorKind::Rule { name } => match calculators::rule_calculator(name) {
                Ok(calc) => rule_programs.push((program, calc)),
                Err(e) => {
                    warn!(program = %program.code, error = %e, "skipping program");
                    missing_programs = true;
                }
            },
        }
    }

    // PolicyEngine batch: one request for every program whose data is
    // complete. A build conflict or a full client failure marks all batched
    // programs missing and leaves the rule side untouched.
    let mut batch: Vec<(&Program, &PeProgramConfig)> = Vec::new();
    for (program, config) in &pe_programs {
        if tracker.has(&config.dependencies()) {
            info!(program = %program.code, "missing data for PolicyEngine program");
            missing_programs = true;
        } else {
            batch.push((*program, config));
        }
    }
    if !batch.is_empty() {
        let configs: Vec<PeProgramConfig> = batch.iter().map(|(_, c)| (*c).clone()).collect();
        match PeRequest::new(screen, &configs).build() {
            Ok(payload) => match pe_client.calculate(&payload) {
                Ok(response) => {
                    for (program, config) in &batch {
                        let e = config
                            .extractor
                            .eligibility(screen, &response, &config.output_period());
                        results.insert(&program.code, e);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "PolicyEngine batch failed");
                    missing_programs = true;
                }
            },
            Err(e) => {
                warn!(error = %e, "PolicyEngine request build failed");
                missing_programs = true;
            }
        }
    }

    // Rule programs in declared dependency order
    let (order, cyclic) = evaluation_order(&rule_programs);
    for i in order {
        let (program, calc) = &rule_programs[i];
        let ctx = EvalContext {
            screen,
            program: *program,
            tracker: &tracker,
            results: &results,
            income_limits,
        };
        match calculators::evaluate_program(calc.as_ref(), &ctx) {
            Some(e) => results.insert(&program.code, e),
            None => {
                info!(program = %program.code, "missing data for rule program");
                missing_programs = true;
            }
        }
    }
    for i in cyclic {
        let code = rule_programs[i].0.code.clone();
        warn!(error = %CalculatorError::DependencyCycle(code), "skipping program");
        missing_programs = true;
    }

    // Result records in catalog order; warnings only for eligible programs
    let mut program_results = Vec::new();
    for program in catalog.active_programs() {
        let Some(e) = results.get(&program.code) else {
            continue;
        };
        let warnings = if e.eligible() {
            program_warnings(screen, program)
        } else {
            Vec::new()
        };
        program_results.push(ProgramResult {
            code: program.code.clone(),
            name: program.name.clone(),
            category: program.category.clone(),
            eligible: e.eligible(),
            value: e.value(),
            household_value: e.household_value(),
            members: e
                .members()
                .iter()
                .map(|m| MemberResult {
                    frontend_id: m.frontend_id,
                    eligible: e.member_eligible(m.member_id),
                    value: e.member_value(m.member_id),
                })
                .collect(),
            passed_messages: e.pass_messages().into_iter().cloned().collect(),
            failed_messages: e.fail_messages().into_iter().cloned().collect(),
            already_has: screen.has_benefit(&program.code),
            warnings,
            legal_status_required: program.legal_status_required.clone(),
        });
    }

    let categories = aggregate_categories(catalog, &program_results, &results);

    let snapshot = EligibilitySnapshot::new(
        program_results
            .iter()
            .map(|p| ProgramSnapshot {
                code: p.code.clone(),
                eligible: p.eligible,
                value: p.value,
            })
            .collect(),
    );

    EvaluationOutcome {
        programs: program_results,
        missing_programs,
        categories,
        snapshot,
    }
}

/// Crisis resources applicable to this household; sibling entry point to
/// `evaluate`
pub fn urgent_need_results(screen: &Screen, needs: &[UrgentNeed]) -> Vec<UrgentNeedResult> {
    let tracker = Dependencies::for_screen(screen);
    eligible_urgent_needs(screen, needs, &tracker)
}

/// Kahn's algorithm over `reads_programs` declarations
///
/// Stable: among ready programs the one declared first in the catalog runs
/// first. Returns the run order plus the indices left in a cycle.
fn evaluation_order(
    rule_programs: &[(&Program, Box<dyn RuleCalculator>)],
) -> (Vec<usize>, Vec<usize>) {
    let n = rule_programs.len();
    let code_to_idx: HashMap<&str, usize> = rule_programs
        .iter()
        .enumerate()
        .map(|(i, (p, _))| (p.code.as_str(), i))
        .collect();

    let mut indegree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, (_, calc)) in rule_programs.iter().enumerate() {
        for read in calc.reads_programs() {
            // Reads of programs outside the rule set (PolicyEngine-backed or
            // absent) impose no ordering here; those results already exist
            if let Some(&j) = code_to_idx.get(read) {
                if j != i {
                    dependents[j].push(i);
                    indegree[i] += 1;
                }
            }
        }
    }

    let mut order = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    while let Some(i) = (0..n).find(|&i| !placed[i] && indegree[i] == 0) {
        placed[i] = true;
        order.push(i);
        for &d in &dependents[i] {
            indegree[d] -= 1;
        }
    }

    let cyclic = (0..n).filter(|&i| !placed[i]).collect();
    (order, cyclic)
}

fn aggregate_categories(
    catalog: &ProgramCatalog,
    program_results: &[ProgramResult],
    results: &ProgramResults,
) -> Vec<CategoryResult> {
    let mut categories = Vec::new();

    for category in &catalog.categories {
        let values: Vec<(String, i64)> = program_results
            .iter()
            .filter(|p| p.category == category.code)
            .map(|p| (p.code.clone(), p.value))
            .collect();
        if values.is_empty() {
            continue;
        }

        let caps: Vec<CategoryCap> = match &category.cap_calculator {
            Some(name) => match cap_calculator(name) {
                Ok(calc) => calc.caps(results),
                Err(e) => {
                    warn!(category = %category.code, error = %e, "ignoring cap calculator");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let raw_total: i64 = values.iter().map(|(_, v)| *v).sum();
        categories.push(CategoryResult {
            code: category.code.clone(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            priority: category.priority,
            tax_category: category.tax_category,
            programs: values.iter().map(|(code, _)| code.clone()).collect(),
            raw_total,
            capped_total: capped_total(&values, &caps, results),
            caps,
        });
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::testing::{member, program, screen};
    use crate::eligibility::Eligibility;
    use crate::models::screen::Relationship;

    #[derive(Debug)]
    struct Reads(&'static [&'static str]);

    impl RuleCalculator for Reads {
        fn dependencies(&self) -> &'static [&'static str] {
            &[]
        }
        fn reads_programs(&self) -> &'static [&'static str] {
            self.0
        }
        fn household_eligible(&self, _ctx: &EvalContext, e: &mut Eligibility) {
            e.condition(true, None);
        }
    }

    fn order_of(declared: &[(&str, &'static [&'static str])]) -> (Vec<usize>, Vec<usize>) {
        let programs: Vec<Program> = declared.iter().map(|(code, _)| program(code)).collect();
        let pairs: Vec<(&Program, Box<dyn RuleCalculator>)> = programs
            .iter()
            .zip(declared.iter())
            .map(|(p, (_, reads))| (p, Box::new(Reads(*reads)) as Box<dyn RuleCalculator>))
            .collect();
        evaluation_order(&pairs)
    }

    #[test]
    fn test_reader_runs_after_its_upstream() {
        const UPSTREAM: &[&str] = &["upstream"];
        let (order, cyclic) = order_of(&[("downstream", UPSTREAM), ("upstream", &[])]);
        assert_eq!(order, vec![1, 0]);
        assert!(cyclic.is_empty());
    }

    #[test]
    fn test_independent_programs_keep_declaration_order() {
        let (order, _) = order_of(&[("a", &[]), ("b", &[]), ("c", &[])]);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_cycle_is_skipped_not_fatal() {
        const READS_B: &[&str] = &["b"];
        const READS_A: &[&str] = &["a"];
        let (order, cyclic) = order_of(&[("a", READS_B), ("b", READS_A), ("standalone", &[])]);
        assert_eq!(order, vec![2]);
        assert_eq!(cyclic, vec![0, 1]);
    }

    #[test]
    fn test_read_of_unknown_program_imposes_no_ordering() {
        const READS_MISSING: &[&str] = &["not_in_catalog"];
        let (order, cyclic) = order_of(&[("reader", READS_MISSING)]);
        assert_eq!(order, vec![0]);
        assert!(cyclic.is_empty());
    }

    #[test]
    fn test_urgent_need_entry_point_builds_its_own_tracker() {
        let s = screen(vec![member(1, 30, Relationship::HeadOfHousehold)]);
        assert!(urgent_need_results(&s, &[]).is_empty());
    }
}

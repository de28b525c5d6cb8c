//! PolicyEngine payload construction end to end.

mod common;

use benefits_screener_engine::models::screen::{ExpenseKind, Relationship};
use benefits_screener_engine::policyengine::{
    pe_program_config, PeRequest, MAIN_TAX_UNIT, SECONDARY_TAX_UNIT,
};
use common::{earning, expense, member, screen};
use serde_json::json;

#[test]
fn test_family_payload_covers_every_unit() {
    let mut s = screen(vec![
        earning(member(1, 35, Relationship::HeadOfHousehold), 1_800.0),
        member(2, 34, Relationship::Spouse),
        member(3, 6, Relationship::Child),
    ]);
    s.expenses.push(expense(ExpenseKind::Rent, 1_200.0));
    s.expenses.push(expense(ExpenseKind::Heating, 80.0));

    let configs = vec![
        pe_program_config("snap", "2024").unwrap(),
        pe_program_config("medicaid", "2024").unwrap(),
        pe_program_config("eitc", "2024").unwrap(),
    ];
    let payload = PeRequest::new(&s, &configs).build().unwrap();
    let household = &payload["household"];

    // People: one entry per member, with the member-targeted inputs
    let people = household["people"].as_object().unwrap();
    assert_eq!(people.len(), 3);
    assert_eq!(people["1"]["age"]["2024"], json!(35));
    assert_eq!(people["3"]["age"]["2024"], json!(6));

    // SPM unit: snap aggregates land on the shared unit
    let spm = &household["spm_units"]["spm_unit"];
    assert_eq!(spm["members"], json!(["1", "2", "3"]));
    assert_eq!(spm["snap_earned_income"]["2024"], json!(21_600.0));
    assert_eq!(spm["housing_cost"]["2024"], json!(14_400));

    // Requested outputs appear as nulls at their output period
    assert_eq!(spm["snap"]["2024-01"], json!(null));
    assert_eq!(people["1"]["medicaid"]["2024"], json!(null));
    assert_eq!(household["tax_units"][MAIN_TAX_UNIT]["eitc"]["2024"], json!(null));

    // Tax units: everyone files together, no secondary unit emitted
    let tax_units = household["tax_units"].as_object().unwrap();
    assert_eq!(tax_units.len(), 1);
    assert_eq!(tax_units[MAIN_TAX_UNIT]["members"], json!(["1", "2", "3"]));

    // Marital unit for the spouse pair
    assert_eq!(
        household["marital_units"]["1-2"]["members"],
        json!(["1", "2"])
    );

    // State code comes from the white label
    assert_eq!(household["households"]["household"]["state_code"]["2024"], json!("CO"));
}

#[test]
fn test_adult_child_splits_into_secondary_tax_unit() {
    let s = screen(vec![
        member(1, 55, Relationship::HeadOfHousehold),
        member(2, 26, Relationship::Child),
    ]);
    let configs = vec![pe_program_config("eitc", "2024").unwrap()];
    let payload = PeRequest::new(&s, &configs).build().unwrap();

    let tax_units = &payload["household"]["tax_units"];
    assert_eq!(tax_units[MAIN_TAX_UNIT]["members"], json!(["1"]));
    assert_eq!(tax_units[SECONDARY_TAX_UNIT]["members"], json!(["2"]));
}

#[test]
fn test_payload_serialization_is_deterministic() {
    let mut s = screen(vec![
        earning(member(1, 41, Relationship::HeadOfHousehold), 2_500.0),
        member(2, 9, Relationship::Child),
    ]);
    s.expenses.push(expense(ExpenseKind::ChildCare, 600.0));

    let configs = vec![
        pe_program_config("snap", "2024").unwrap(),
        pe_program_config("wic", "2024").unwrap(),
    ];

    let first = serde_json::to_string(&PeRequest::new(&s, &configs).build().unwrap()).unwrap();
    let second = serde_json::to_string(&PeRequest::new(&s, &configs).build().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_programs_sharing_inputs_merge_without_conflict() {
    // snap and wic both write the member income aggregates for the same
    // period; identical values must merge cleanly
    let s = screen(vec![earning(member(1, 30, Relationship::HeadOfHousehold), 1_000.0)]);
    let configs = vec![
        pe_program_config("snap", "2024").unwrap(),
        pe_program_config("wic", "2024").unwrap(),
    ];

    let payload = PeRequest::new(&s, &configs).build().unwrap();
    assert_eq!(
        payload["household"]["spm_units"]["spm_unit"]["snap_earned_income"]["2024"],
        json!(12_000.0)
    );
}

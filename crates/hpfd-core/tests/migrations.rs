// crates/hpfd-core/tests/migrations.rs
// ============================================================================
// Module: Migration Tests
// Description: Scenario and idempotence tests for every registered migration.
// Purpose: Prove each migration's guard makes repeated application a no-op.
// ============================================================================

//! ## Overview
//! Each migration gets its own scenario and idempotence tests; the runner is
//! tested for ordering, tracing, skipping, and error attribution. A property
//! test checks that the whole chain applied twice equals the chain applied
//! once.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::collections::BTreeSet;

use common::actuary;
use common::wire_date;
use common::wire_document;
use common::wire_rate;
use hpfd_core::CURRENT_PROTO_VERSION;
use hpfd_core::FormDataError;
use hpfd_core::MigrationRunner;
use hpfd_core::ProvisionKey;
use hpfd_core::migrations::add_one_month;
use hpfd_core::migrations::items_being_amended;
use hpfd_core::migrations::split_actuary_contacts;
use hpfd_core::wire::WireActuaryContactList;
use hpfd_core::wire::WireDocument;
use hpfd_core::wire::WireModifiedProvisions;
use hpfd_core::wire::WireRateAmendmentInfo;
use proptest::prelude::*;

// ============================================================================
// SECTION: 0001 Add One Month
// ============================================================================

/// Tests contract and rate dates move forward one month and names follow.
#[test]
fn add_one_month_shifts_dates_and_regenerates_name() {
    let migrated = add_one_month::migrate(common::legacy_v1_document()).unwrap();
    let contract = migrated.contract_info.unwrap();
    assert_eq!(contract.contract_date_start, Some(wire_date(2021, 5, 22)));
    assert_eq!(contract.contract_date_end, Some(wire_date(2022, 5, 21)));

    let rate = &migrated.rate_infos[0];
    assert_eq!(rate.rate_date_start, Some(wire_date(2021, 5, 22)));
    assert_eq!(rate.rate_date_end, Some(wire_date(2022, 5, 21)));
    assert_eq!(rate.rate_date_certified, Some(wire_date(2021, 4, 30)));
    assert_eq!(
        rate.rate_certification_name.as_deref(),
        Some("MN-RATE-20210522-20220521-CERTIFICATION-20210430")
    );
    assert_eq!(migrated.proto_version, 2);
}

/// Tests December rolls into January and long months clamp.
#[test]
fn add_one_month_handles_year_end_and_short_months() {
    let mut document = wire_document(1);
    let mut rate = wire_rate(
        "rate-1",
        wire_date(2021, 12, 15),
        wire_date(2022, 1, 31),
        wire_date(2021, 11, 30),
    );
    rate.rate_type = 2;
    rate.rate_amendment_info = Some(WireRateAmendmentInfo {
        effective_date_start: Some(wire_date(2021, 12, 31)),
        effective_date_end: None,
    });
    rate.rate_certification_name = Some("stale".to_string());
    document.rate_infos = vec![rate];

    let migrated = add_one_month::migrate(document).unwrap();
    let rate = &migrated.rate_infos[0];
    assert_eq!(rate.rate_date_start, Some(wire_date(2022, 1, 15)));
    assert_eq!(rate.rate_date_end, Some(wire_date(2022, 2, 28)));
    assert_eq!(rate.rate_date_certified, Some(wire_date(2021, 12, 30)));
    let amendment = rate.rate_amendment_info.unwrap();
    assert_eq!(amendment.effective_date_start, Some(wire_date(2022, 1, 31)));
    assert_eq!(amendment.effective_date_end, None);
    assert_eq!(
        rate.rate_certification_name.as_deref(),
        Some("MN-RATE-20220131-AMENDMENT-20211230")
    );
}

/// Tests empty certification names stay empty.
#[test]
fn add_one_month_keeps_absent_names_absent() {
    let mut document = wire_document(1);
    let mut unnamed =
        wire_rate("a", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    unnamed.rate_certification_name = Some(String::new());
    let bare =
        wire_rate("b", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    document.rate_infos = vec![unnamed, bare];
    let migrated = add_one_month::migrate(document).unwrap();
    assert_eq!(migrated.rate_infos[0].rate_certification_name.as_deref(), Some(""));
    assert_eq!(migrated.rate_infos[1].rate_certification_name, None);
}

/// Tests a second application changes nothing.
#[test]
fn add_one_month_is_idempotent() {
    let once = add_one_month::migrate(common::legacy_v1_document()).unwrap();
    let twice = add_one_month::migrate(once.clone()).unwrap();
    assert_eq!(once, twice);
}

/// Tests documents past version 1 are never shifted.
#[test]
fn add_one_month_skips_corrected_documents() {
    let mut document = common::legacy_v1_document();
    document.proto_version = 2;
    assert_eq!(add_one_month::migrate(document.clone()).unwrap(), document);
}

/// Tests an impossible stored date fails with its field path.
#[test]
fn add_one_month_rejects_invalid_dates() {
    let mut document = wire_document(1);
    if let Some(contract) = document.contract_info.as_mut() {
        contract.contract_date_end = Some(wire_date(2021, 13, 1));
    }
    let err = add_one_month::migrate(document).unwrap_err();
    assert!(err.0.contains("contract_info.contract_date_end"));
}

// ============================================================================
// SECTION: 0002 Split Actuary Contacts
// ============================================================================

/// Tests the first contact certifies and the rest become additional.
#[test]
fn split_moves_first_contact_to_certifying() {
    let mut document = wire_document(2);
    let mut rate =
        wire_rate("r", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    rate.legacy_actuary_contacts = vec![actuary("A"), actuary("B"), actuary("C")];
    rate.legacy_actuary_communication_preference = 2;
    document.rate_infos = vec![rate];

    let migrated = split_actuary_contacts::migrate(document).unwrap();
    let rate = &migrated.rate_infos[0];
    assert_eq!(rate.certifying_actuary_contact, Some(actuary("A")));
    assert!(rate.legacy_actuary_contacts.is_empty());
    assert_eq!(rate.legacy_actuary_communication_preference, 0);
    assert_eq!(
        migrated.addtl_actuary_contacts,
        Some(WireActuaryContactList {
            contacts: vec![actuary("B"), actuary("C")],
        })
    );
    assert_eq!(migrated.addtl_actuary_communication_preference, 2);
    assert_eq!(migrated.proto_version, 3);
}

/// Tests a single legacy contact leaves a present but empty additional list.
#[test]
fn split_single_contact_emits_empty_additional_list() {
    let mut document = wire_document(2);
    let mut rate =
        wire_rate("r", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    rate.legacy_actuary_contacts = vec![actuary("A")];
    document.rate_infos = vec![rate];

    let migrated = split_actuary_contacts::migrate(document).unwrap();
    assert_eq!(migrated.rate_infos[0].certifying_actuary_contact, Some(actuary("A")));
    assert_eq!(migrated.addtl_actuary_contacts, Some(WireActuaryContactList::default()));
    assert_eq!(migrated.addtl_actuary_communication_preference, 0);
}

/// Tests contacts from later rates append in rate order and the first
/// preference wins.
#[test]
fn split_appends_contacts_across_rates() {
    let mut document = wire_document(2);
    let mut first =
        wire_rate("r1", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    first.legacy_actuary_contacts = vec![actuary("A"), actuary("B")];
    first.legacy_actuary_communication_preference = 1;
    let mut second =
        wire_rate("r2", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    second.legacy_actuary_contacts = vec![actuary("C"), actuary("B"), actuary("D")];
    second.legacy_actuary_communication_preference = 2;
    document.rate_infos = vec![first, second];

    let migrated = split_actuary_contacts::migrate(document).unwrap();
    assert_eq!(migrated.rate_infos[1].certifying_actuary_contact, Some(actuary("C")));
    assert_eq!(
        migrated.addtl_actuary_contacts.unwrap().contacts,
        vec![actuary("B"), actuary("B"), actuary("D")]
    );
    assert_eq!(migrated.addtl_actuary_communication_preference, 1);
}

/// Tests repeated contacts on one rate all move to the additional list.
#[test]
fn split_keeps_repeated_contacts() {
    let mut document = wire_document(2);
    let mut rate =
        wire_rate("r", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    rate.legacy_actuary_contacts = vec![actuary("A"), actuary("B"), actuary("B")];
    rate.legacy_actuary_communication_preference = 1;
    document.rate_infos = vec![rate];

    let once = split_actuary_contacts::migrate(document).unwrap();
    assert_eq!(once.rate_infos[0].certifying_actuary_contact, Some(actuary("A")));
    assert_eq!(
        once.addtl_actuary_contacts.clone().unwrap().contacts,
        vec![actuary("B"), actuary("B")]
    );
    let twice = split_actuary_contacts::migrate(once.clone()).unwrap();
    assert_eq!(once, twice);
}

/// Tests a preference with nobody to attach it to is an invariant failure.
#[test]
fn split_rejects_preference_without_contacts() {
    let mut document = wire_document(2);
    let mut rate =
        wire_rate("r", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    rate.legacy_actuary_communication_preference = 1;
    document.rate_infos = vec![rate];

    let err = MigrationRunner::standard().apply_all(document).unwrap_err();
    match err {
        FormDataError::MigrationInvariant {
            migration,
            proto_version,
            message,
        } => {
            assert_eq!(migration, split_actuary_contacts::NAME);
            assert_eq!(proto_version, 2);
            assert!(message.contains("rate_infos[0]"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Tests documents without legacy data are left alone.
#[test]
fn split_ignores_restructured_documents() {
    let mut document = wire_document(3);
    let mut rate =
        wire_rate("r", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    rate.certifying_actuary_contact = Some(actuary("A"));
    document.rate_infos = vec![rate];
    assert_eq!(split_actuary_contacts::migrate(document.clone()).unwrap(), document);
}

/// Tests a second application changes nothing.
#[test]
fn split_is_idempotent() {
    let mut document = wire_document(2);
    let mut rate =
        wire_rate("r", wire_date(2021, 1, 1), wire_date(2021, 12, 31), wire_date(2020, 12, 1));
    rate.legacy_actuary_contacts = vec![actuary("A"), actuary("B")];
    rate.legacy_actuary_communication_preference = 1;
    document.rate_infos = vec![rate];
    let once = split_actuary_contacts::migrate(document).unwrap();
    let twice = split_actuary_contacts::migrate(once.clone()).unwrap();
    assert_eq!(once, twice);
}

// ============================================================================
// SECTION: 0003 Items Being Amended
// ============================================================================

/// Tests amended item codes become true provision answers.
#[test]
fn items_become_provision_answers() {
    let mut document = wire_document(3);
    if let Some(contract) = document.contract_info.as_mut() {
        contract.contract_type = 2;
        contract.legacy_items_being_amended =
            vec!["RISK_SHARING_MECHANISM".to_string(), "GRIEVANCES_APPEALS_SYSTEM".to_string()];
    }
    let migrated = items_being_amended::migrate(document).unwrap();
    let contract = migrated.contract_info.unwrap();
    assert!(contract.legacy_items_being_amended.is_empty());
    let provisions = contract.modified_provisions.unwrap();
    assert_eq!(
        provisions.answered(),
        vec![(ProvisionKey::RiskSharingStrategy, true), (ProvisionKey::GrievanceAndAppeal, true)]
    );
    assert_eq!(migrated.proto_version, 4);
}

/// Tests existing answers survive and are not overwritten to false.
#[test]
fn items_merge_with_existing_answers() {
    let mut document = wire_document(3);
    if let Some(contract) = document.contract_info.as_mut() {
        contract.modified_provisions = Some(WireModifiedProvisions {
            modified_geo_area_served: Some(false),
            ..WireModifiedProvisions::default()
        });
        contract.legacy_items_being_amended = vec!["BENEFITS_PROVIDED".to_string()];
    }
    let migrated = items_being_amended::migrate(document).unwrap();
    let provisions = migrated.contract_info.unwrap().modified_provisions.unwrap();
    assert_eq!(provisions.modified_geo_area_served, Some(false));
    assert_eq!(provisions.modified_benefits_provided, Some(true));
}

/// Tests unknown codes are invariant failures.
#[test]
fn items_reject_unknown_codes() {
    let mut document = wire_document(3);
    if let Some(contract) = document.contract_info.as_mut() {
        contract.legacy_items_being_amended = vec!["CAPITATION_RATES".to_string()];
    }
    let err = items_being_amended::migrate(document).unwrap_err();
    assert!(err.0.contains("CAPITATION_RATES"));
}

/// Tests documents without legacy items are untouched apart from version.
#[test]
fn items_without_legacy_codes_are_noop() {
    let document = wire_document(CURRENT_PROTO_VERSION);
    assert_eq!(items_being_amended::migrate(document.clone()).unwrap(), document);
    let older = wire_document(3);
    assert_eq!(items_being_amended::migrate(older).unwrap().proto_version, 4);
}

/// Tests a second application changes nothing.
#[test]
fn items_are_idempotent() {
    let mut document = wire_document(3);
    if let Some(contract) = document.contract_info.as_mut() {
        contract.legacy_items_being_amended = vec!["ENCOUNTER_DATA".to_string()];
    }
    let once = items_being_amended::migrate(document).unwrap();
    let twice = items_being_amended::migrate(once.clone()).unwrap();
    assert_eq!(once, twice);
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Tests a version 1 document reaches the current version through every
/// migration.
#[test]
fn runner_upgrades_version_one_documents() {
    let outcome = MigrationRunner::standard().apply_all(common::legacy_v1_document()).unwrap();
    assert_eq!(outcome.trace.starting_version, 1);
    assert_eq!(outcome.trace.final_version, CURRENT_PROTO_VERSION);
    assert_eq!(
        outcome.trace.changed,
        vec![add_one_month::NAME, split_actuary_contacts::NAME, items_being_amended::NAME]
    );
    assert!(outcome.trace.skipped.is_empty());
    assert_eq!(outcome.document.proto_version, CURRENT_PROTO_VERSION);
}

/// Tests the chain applied twice equals the chain applied once.
#[test]
fn runner_chain_is_idempotent() {
    let runner = MigrationRunner::standard();
    let once = runner.apply_all(common::legacy_v1_document()).unwrap();
    let twice = runner.apply_all(once.document.clone()).unwrap();
    assert_eq!(once.document, twice.document);
    assert!(twice.trace.changed.is_empty());
}

/// Tests current documents pass through unchanged.
#[test]
fn runner_leaves_current_documents_alone() {
    let document = wire_document(CURRENT_PROTO_VERSION);
    let outcome = MigrationRunner::standard().apply_all(document.clone()).unwrap();
    assert_eq!(outcome.document, document);
    assert!(outcome.trace.changed.is_empty());
}

/// Tests ledger-recorded migrations are skipped for documents already past
/// them.
#[test]
fn runner_skips_recorded_migrations() {
    let skip: BTreeSet<String> = [add_one_month::NAME.to_string()].into_iter().collect();
    let mut source = common::legacy_v1_document();
    source.proto_version = 2;
    let outcome = MigrationRunner::standard().apply_pending(source.clone(), &skip).unwrap();
    assert_eq!(outcome.trace.skipped, vec![add_one_month::NAME]);
    assert_eq!(
        outcome.trace.changed,
        vec![split_actuary_contacts::NAME, items_being_amended::NAME]
    );
    assert_eq!(
        outcome.document.contract_info.unwrap().contract_date_start,
        source.contract_info.unwrap().contract_date_start
    );
    assert_eq!(outcome.document.proto_version, CURRENT_PROTO_VERSION);
}

/// Tests a recorded migration still runs on a document that never went
/// through it, and the later live read agrees.
#[test]
fn runner_applies_recorded_migrations_the_document_missed() {
    let skip: BTreeSet<String> = [add_one_month::NAME.to_string()].into_iter().collect();
    let runner = MigrationRunner::standard();
    let offline = runner.apply_pending(common::legacy_v1_document(), &skip).unwrap();
    assert!(offline.trace.skipped.is_empty());
    assert_eq!(
        offline.trace.changed,
        vec![add_one_month::NAME, split_actuary_contacts::NAME, items_being_amended::NAME]
    );
    assert_eq!(offline.document.proto_version, CURRENT_PROTO_VERSION);
    let start = offline.document.contract_info.as_ref().unwrap().contract_date_start;
    assert_eq!(start, Some(wire_date(2021, 5, 22)));
    assert_eq!(offline.document.rate_infos[0].rate_date_start, Some(wire_date(2021, 5, 22)));

    let live = runner.apply_all(offline.document.clone()).unwrap();
    assert!(live.trace.changed.is_empty());
    assert_eq!(live.document, offline.document);
}

/// Tests a later migration does not stamp past a generation the document
/// never reached.
#[test]
fn later_migrations_do_not_jump_versions() {
    let mut document = common::legacy_v1_document();
    if let Some(contract) = document.contract_info.as_mut() {
        contract.legacy_items_being_amended.clear();
    }
    let split = split_actuary_contacts::migrate(document).unwrap();
    assert_eq!(split.proto_version, 1);
    let shifted = add_one_month::migrate(split).unwrap();
    assert_eq!(shifted.proto_version, 2);
    assert_eq!(shifted.rate_infos[0].rate_date_start, Some(wire_date(2021, 5, 22)));
}

// ============================================================================
// SECTION: Properties
// ============================================================================

/// Legacy item codes accepted by migration 0003.
const ITEM_CODES: &[&str] = &[
    "BENEFITS_PROVIDED",
    "GEO_AREA_SERVED",
    "MEDICAID_BENEFICIARIES",
    "RISK_SHARING_MECHANISM",
    "INCENTIVE_ARRANGEMENTS",
    "WITHHOLD_AGREEMENTS",
    "STATE_DIRECTED_PAYMENTS",
    "PASS_THROUGH_PAYMENTS",
    "MEDICAL_LOSS_RATIO_STANDARDS",
    "ENROLLMENT_PROCESS",
    "LENGTH_OF_CONTRACT_PERIOD",
];

prop_compose! {
    fn arb_date()(year in 2000_i32..2040, month in 1_u32..=12, day in 1_u32..=31)
        -> hpfd_core::wire::WireDate {
        wire_date(year, month, day.min(28))
    }
}

prop_compose! {
    fn arb_rate()(
        start in arb_date(),
        end in arb_date(),
        certified in arb_date(),
        contact_count in 0_usize..4,
        preference in 0_i32..3,
        named in any::<bool>(),
    ) -> hpfd_core::wire::WireRateInfo {
        let mut rate = wire_rate("r", start, end, certified);
        rate.legacy_actuary_contacts =
            (0..contact_count).map(|index| actuary(&format!("actuary-{index}"))).collect();
        rate.legacy_actuary_communication_preference =
            if contact_count == 0 { 0 } else { preference };
        if named {
            rate.rate_certification_name = Some("legacy-name".to_string());
        }
        rate
    }
}

prop_compose! {
    fn arb_legacy_document()(
        version in 1_u32..=CURRENT_PROTO_VERSION,
        rates in proptest::collection::vec(arb_rate(), 0..3),
        items in proptest::collection::vec(proptest::sample::select(ITEM_CODES), 0..4),
        start in proptest::option::of(arb_date()),
    ) -> WireDocument {
        let mut document = wire_document(version);
        if let Some(contract) = document.contract_info.as_mut() {
            contract.contract_date_start = start;
            contract.legacy_items_being_amended =
                items.into_iter().map(str::to_string).collect();
        }
        document.rate_infos = rates;
        document
    }
}

proptest! {
    /// Tests the chain applied twice equals once for generated documents.
    #[test]
    fn chain_applied_twice_equals_once(document in arb_legacy_document()) {
        let runner = MigrationRunner::standard();
        let once = runner.apply_all(document).unwrap();
        let twice = runner.apply_all(once.document.clone()).unwrap();
        prop_assert_eq!(&once.document, &twice.document);
        prop_assert_eq!(once.document.proto_version, CURRENT_PROTO_VERSION);
    }
}

// crates/hpfd-migrator/tests/ledger.rs
// ============================================================================
// Module: Migration Ledger Tests
// Description: Load, save, and merge behavior of the ledger file.
// Purpose: Ensure the ledger only grows and is stored canonically.
// ============================================================================

//! ## Overview
//! Missing ledgers load empty, saved ledgers are canonical JSON, and merge is
//! a set union.

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

use std::collections::BTreeSet;
use std::fs;

use hpfd_core::MIGRATIONS;
use hpfd_migrator::LEDGER_VERSION;
use hpfd_migrator::LedgerError;
use hpfd_migrator::MigrationLedger;
use proptest::prelude::*;

/// Tests a missing ledger file loads as empty.
#[test]
fn missing_ledger_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MigrationLedger::load(&dir.path().join("ledger.json")).unwrap();
    assert_eq!(ledger, MigrationLedger::default());
    assert_eq!(ledger.ledger_version, LEDGER_VERSION);
    assert_eq!(ledger.pending(MIGRATIONS).len(), MIGRATIONS.len());
}

/// Tests saved bytes are canonical and reload equal.
#[test]
fn save_writes_canonical_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let mut ledger = MigrationLedger::default();
    ledger.record("0002_b");
    ledger.record("0001_a");
    ledger.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, r#"{"applied":["0001_a","0002_b"],"ledger_version":1}"#);
    assert_eq!(MigrationLedger::load(&path).unwrap(), ledger);
}

/// Tests malformed ledger JSON is a parse error.
#[test]
fn malformed_ledger_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    fs::write(&path, b"{not json").unwrap();
    assert!(matches!(MigrationLedger::load(&path), Err(LedgerError::Parse(_))));
}

/// Tests an unknown ledger version is rejected.
#[test]
fn unknown_version_is_rejected() {
    let err = MigrationLedger::from_json_slice(br#"{"ledger_version":7,"applied":[]}"#).unwrap_err();
    assert!(matches!(err, LedgerError::UnsupportedVersion(7)));
}

fn ledger_of(names: &BTreeSet<String>) -> MigrationLedger {
    let mut ledger = MigrationLedger::default();
    for name in names {
        ledger.record(name);
    }
    ledger
}

proptest! {
    /// Tests merge is a union that never loses a name.
    #[test]
    fn merge_is_union(
        left in prop::collection::btree_set("[0-9]{4}_[a-z]{1,8}", 0..8),
        right in prop::collection::btree_set("[0-9]{4}_[a-z]{1,8}", 0..8),
    ) {
        let mut merged = ledger_of(&left);
        merged.merge(&ledger_of(&right));
        let expected: BTreeSet<String> = left.union(&right).cloned().collect();
        prop_assert_eq!(&merged.applied, &expected);

        let mut reversed = ledger_of(&right);
        reversed.merge(&ledger_of(&left));
        prop_assert_eq!(merged, reversed);
    }
}

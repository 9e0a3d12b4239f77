// crates/hpfd-migrator/tests/common/mod.rs
// ============================================================================
// Module: Common Corpus Fixtures
// Description: Builders for stored documents and corpus directories.
// Purpose: Share corpus setup across migrator integration tests.
// Dependencies: hpfd-core, tempfile
// ============================================================================

//! ## Overview
//! Documents are written as encoded wire bytes into a temp directory that
//! lives as long as the returned guard.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers are permitted to panic."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use hpfd_core::MigrationRunner;
use hpfd_core::PROTO_NAME;
use hpfd_core::codec;
use hpfd_core::wire::WireActuaryContact;
use hpfd_core::wire::WireContractInfo;
use hpfd_core::wire::WireDate;
use hpfd_core::wire::WireDocument;
use hpfd_core::wire::WireRateInfo;
use tempfile::TempDir;

// ============================================================================
// SECTION: Documents
// ============================================================================

fn wire_date(year: i32, month: u32, day: u32) -> WireDate {
    WireDate {
        year,
        month,
        day,
    }
}

fn actuary(name: &str) -> WireActuaryContact {
    WireActuaryContact {
        name: name.to_string(),
        title_role: "Actuary".to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        actuarial_firm: 1,
        actuarial_firm_other: String::new(),
    }
}

/// Builds a version 1 amendment that every migration touches.
pub fn legacy_document(id: &str) -> WireDocument {
    WireDocument {
        proto_name: PROTO_NAME.to_string(),
        proto_version: 1,
        id: id.to_string(),
        state_code: "MN".to_string(),
        state_number: 12,
        program_ids: vec!["program-a".to_string()],
        status: 1,
        created_at: Some(wire_date(2021, 3, 1)),
        submission_type: 2,
        submission_description: "legacy".to_string(),
        contract_info: Some(WireContractInfo {
            contract_type: 2,
            contract_execution_status: 1,
            population_covered: 1,
            contract_date_start: Some(wire_date(2021, 4, 22)),
            contract_date_end: Some(wire_date(2022, 4, 21)),
            legacy_items_being_amended: vec!["BENEFITS_PROVIDED".to_string()],
            ..WireContractInfo::default()
        }),
        rate_infos: vec![WireRateInfo {
            id: "rate-1".to_string(),
            rate_type: 1,
            rate_date_start: Some(wire_date(2021, 4, 22)),
            rate_date_end: Some(wire_date(2022, 4, 21)),
            rate_date_certified: Some(wire_date(2021, 3, 30)),
            legacy_actuary_contacts: vec![actuary("Ada"), actuary("Bea")],
            legacy_actuary_communication_preference: 1,
            ..WireRateInfo::default()
        }],
        ..WireDocument::default()
    }
}

/// Builds a fully migrated document.
pub fn current_document(id: &str) -> WireDocument {
    MigrationRunner::standard().apply_all(legacy_document(id)).unwrap().document
}

// ============================================================================
// SECTION: Corpus
// ============================================================================

/// Creates an empty corpus directory.
pub fn corpus() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Writes an encoded document into the corpus.
pub fn write_document(dir: &Path, file: &str, document: &WireDocument) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, codec::encode(document)).unwrap();
    path
}

/// Returns the default ledger path for a corpus.
pub fn ledger_path(dir: &Path) -> PathBuf {
    dir.join("migration-ledger.json")
}

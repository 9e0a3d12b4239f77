// crates/hpfd-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared builders for wire and domain documents.
// Purpose: Keep integration tests focused on the behavior under test.
// Dependencies: hpfd-core, time
// ============================================================================

//! ## Overview
//! Builders produce valid documents at a chosen schema generation. Tests
//! mutate the returned value to set up the case they need.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers are permitted to panic."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use hpfd_core::ContractType;
use hpfd_core::DocumentId;
use hpfd_core::DomainDocument;
use hpfd_core::PROTO_NAME;
use hpfd_core::PopulationCovered;
use hpfd_core::StateCode;
use hpfd_core::SubmissionStatus;
use hpfd_core::SubmissionType;
use hpfd_core::UtcInstant;
use hpfd_core::provisions::ModifiedProvisions;
use hpfd_core::provisions::ProvisionsVariant;
use hpfd_core::wire::WireActuaryContact;
use hpfd_core::wire::WireContractInfo;
use hpfd_core::wire::WireDate;
use hpfd_core::wire::WireDateTime;
use hpfd_core::wire::WireDocument;
use hpfd_core::wire::WireRateInfo;
use time::macros::date;

// ============================================================================
// SECTION: Wire Builders
// ============================================================================

/// Builds a wire date.
pub fn wire_date(year: i32, month: u32, day: u32) -> WireDate {
    WireDate {
        year,
        month,
        day,
    }
}

/// Builds a minimal draft wire document at the given version.
pub fn wire_document(proto_version: u32) -> WireDocument {
    WireDocument {
        proto_name: PROTO_NAME.to_string(),
        proto_version,
        id: "doc-1".to_string(),
        state_code: "MN".to_string(),
        state_number: 12,
        program_ids: vec!["program-a".to_string()],
        status: 1,
        created_at: Some(wire_date(2021, 3, 1)),
        updated_at: Some(WireDateTime {
            year: 2021,
            month: 3,
            day: 2,
            hour: 15,
            minute: 4,
            second: 5,
        }),
        submission_type: 2,
        submission_description: "A real submission".to_string(),
        contract_info: Some(WireContractInfo {
            contract_type: 1,
            contract_execution_status: 1,
            population_covered: 1,
            ..WireContractInfo::default()
        }),
        ..WireDocument::default()
    }
}

/// Builds a wire actuary contact.
pub fn actuary(name: &str) -> WireActuaryContact {
    WireActuaryContact {
        name: name.to_string(),
        title_role: "Actuary".to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        actuarial_firm: 1,
        actuarial_firm_other: String::new(),
    }
}

/// Builds a new rate with a rating period and certification day.
pub fn wire_rate(id: &str, start: WireDate, end: WireDate, certified: WireDate) -> WireRateInfo {
    WireRateInfo {
        id: id.to_string(),
        rate_type: 1,
        rate_capitation_type: 1,
        rate_date_start: Some(start),
        rate_date_end: Some(end),
        rate_date_certified: Some(certified),
        rate_program_ids: vec!["program-a".to_string()],
        ..WireRateInfo::default()
    }
}

/// Builds a version 1 document exercising every migration.
pub fn legacy_v1_document() -> WireDocument {
    let mut document = wire_document(1);
    if let Some(contract) = document.contract_info.as_mut() {
        contract.contract_type = 2;
        contract.contract_date_start = Some(wire_date(2021, 4, 22));
        contract.contract_date_end = Some(wire_date(2022, 4, 21));
        contract.legacy_items_being_amended =
            vec!["BENEFITS_PROVIDED".to_string(), "LENGTH_OF_CONTRACT_PERIOD".to_string()];
    }
    let mut rate = wire_rate(
        "rate-1",
        wire_date(2021, 4, 22),
        wire_date(2022, 4, 21),
        wire_date(2021, 3, 30),
    );
    rate.rate_certification_name = Some("MN-RATE-20210422-20220421-CERTIFICATION-20210330".into());
    rate.legacy_actuary_contacts = vec![actuary("Ada"), actuary("Bea")];
    rate.legacy_actuary_communication_preference = 1;
    document.rate_infos = vec![rate];
    document
}

// ============================================================================
// SECTION: Domain Builders
// ============================================================================

/// Builds a minimal draft domain document with the given classification.
pub fn domain_document(
    population: Option<PopulationCovered>,
    contract_type: Option<ContractType>,
) -> DomainDocument {
    DomainDocument {
        id: DocumentId::new("doc-1"),
        state_code: StateCode::new("MN"),
        state_number: 3,
        program_ids: vec!["program-a".to_string()],
        status: SubmissionStatus::Draft,
        created_at: date!(2021 - 06 - 01),
        updated_at: UtcInstant::from_unix_seconds(1_622_548_800).unwrap(),
        submission_type: Some(SubmissionType::ContractOnly),
        submission_description: "contract only".to_string(),
        risk_based_contract: Some(false),
        state_contacts: Vec::new(),
        documents: Vec::new(),
        contract_type,
        contract_execution_status: None,
        contract_documents: Vec::new(),
        contract_date_start: Some(date!(2021 - 07 - 01)),
        contract_date_end: Some(date!(2022 - 06 - 30)),
        managed_care_entities: Vec::new(),
        federal_authorities: Vec::new(),
        population_covered: population,
        modified_provisions: ProvisionsVariant::resolve(population, contract_type)
            .map(ModifiedProvisions::empty),
        rate_infos: Vec::new(),
        addtl_actuary_contacts: None,
        addtl_actuary_communication_preference: None,
    }
}

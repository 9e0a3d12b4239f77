// crates/hpfd-fixtures/src/mocks.rs
// ============================================================================
// Module: Canonical Mock Documents
// Description: Fixed domain documents covering each contract shape.
// Purpose: Provide stable inputs for wire format regression fixtures.
// Dependencies: hpfd-core, time
// ============================================================================

//! ## Overview
//! Mocks are fully deterministic: no clocks, no random identifiers. Each one
//! survives `to_domain(to_proto_buffer(mock)) == mock`. Changing a mock is a
//! deliberate fixture change and produces new dated fixture files.

// ============================================================================
// SECTION: Imports
// ============================================================================

use hpfd_core::ActuarialFirm;
use hpfd_core::ActuaryCommunicationPreference;
use hpfd_core::ActuaryContact;
use hpfd_core::ContractExecutionStatus;
use hpfd_core::ContractType;
use hpfd_core::Document;
use hpfd_core::DocumentCategory;
use hpfd_core::DocumentId;
use hpfd_core::DomainDocument;
use hpfd_core::FederalAuthority;
use hpfd_core::ManagedCareEntity;
use hpfd_core::ModifiedProvisions;
use hpfd_core::PopulationCovered;
use hpfd_core::ProvisionKey;
use hpfd_core::ProvisionsVariant;
use hpfd_core::RateCapitationType;
use hpfd_core::RateId;
use hpfd_core::RateInfo;
use hpfd_core::RateType;
use hpfd_core::SharedRatePackage;
use hpfd_core::StateCode;
use hpfd_core::StateContact;
use hpfd_core::SubmissionStatus;
use hpfd_core::SubmissionType;
use hpfd_core::UtcInstant;
use hpfd_core::generate_rate_certification_name;
use time::macros::date;
use time::macros::datetime;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// A named mock document builder.
#[derive(Debug, Clone, Copy)]
pub struct MockDocument {
    /// Fixture name prefix.
    pub name: &'static str,
    /// Builder.
    pub build: fn() -> DomainDocument,
}

/// Every canonical mock, in fixture order.
pub const CANONICAL_MOCKS: &[MockDocument] = &[
    MockDocument {
        name: "contract_only_draft",
        build: contract_only_draft,
    },
    MockDocument {
        name: "contract_and_rates_submitted",
        build: contract_and_rates_submitted,
    },
    MockDocument {
        name: "chip_base_contract",
        build: chip_base_contract,
    },
    MockDocument {
        name: "chip_amendment",
        build: chip_amendment,
    },
    MockDocument {
        name: "medicaid_amendment",
        build: medicaid_amendment,
    },
];

/// Returns the canonical mock registry.
#[must_use]
pub const fn canonical_mocks() -> &'static [MockDocument] {
    CANONICAL_MOCKS
}

// ============================================================================
// SECTION: Mocks
// ============================================================================

/// Draft Medicaid base contract without rates.
#[must_use]
pub fn contract_only_draft() -> DomainDocument {
    let mut document = base_document("mock-contract-only", 1);
    document.submission_description = "Contract only draft for the state plan.".to_string();
    document.modified_provisions = Some(provisions(
        ProvisionsVariant::MedicaidBase,
        &[(ProvisionKey::RiskSharingStrategy, true), (ProvisionKey::WithholdAgreements, false)],
    ));
    document
}

/// Submitted contract and rates package with a certified rate.
#[must_use]
pub fn contract_and_rates_submitted() -> DomainDocument {
    let mut document = base_document("mock-contract-and-rates", 2);
    document.status = SubmissionStatus::Submitted {
        submitted_at: instant_2021_07_01(),
    };
    document.submission_type = Some(SubmissionType::ContractAndRates);
    document.submission_description = "Contract and rates for the 2021 rating period.".to_string();
    document.modified_provisions = Some(provisions(
        ProvisionsVariant::MedicaidBase,
        &[
            (ProvisionKey::RiskSharingStrategy, false),
            (ProvisionKey::IncentiveArrangements, true),
            (ProvisionKey::WithholdAgreements, false),
            (ProvisionKey::StateDirectedPayments, true),
            (ProvisionKey::PassThroughPayments, false),
            (ProvisionKey::PaymentsForMentalDiseaseInstitutions, false),
            (ProvisionKey::NonRiskPaymentArrangements, false),
        ],
    ));
    let rate = named_rate(
        &document.state_code,
        RateInfo {
            id: RateId::new("mock-rate-new"),
            rate_type: Some(RateType::New),
            rate_capitation_type: Some(RateCapitationType::RateCell),
            rate_documents: vec![file("rate-certification.pdf", DocumentCategory::Rates)],
            supporting_documents: vec![file("rate-support.xlsx", DocumentCategory::RatesRelated)],
            rate_date_start: Some(date!(2021 - 07 - 01)),
            rate_date_end: Some(date!(2022 - 06 - 30)),
            rate_date_certified: Some(date!(2021 - 05 - 14)),
            rate_amendment_effective_start: None,
            rate_amendment_effective_end: None,
            rate_program_ids: vec!["program-msho".to_string()],
            rate_certification_name: None,
            certifying_actuary_contact: Some(actuary("Ada Lovelace", Some(ActuarialFirm::Milliman))),
            packages_with_shared_rate_certs: vec![SharedRatePackage {
                package_id: "mock-shared-package".to_string(),
                package_name: "MCR-MN-0001".to_string(),
            }],
        },
    );
    document.rate_infos = vec![rate];
    document.addtl_actuary_contacts = Some(vec![actuary("Grace Hopper", Some(ActuarialFirm::Other))]);
    document.addtl_actuary_communication_preference =
        Some(ActuaryCommunicationPreference::OactToActuary);
    document
}

/// CHIP-only base contract, which asks no provisions question.
#[must_use]
pub fn chip_base_contract() -> DomainDocument {
    let mut document = base_document("mock-chip-base", 3);
    document.population_covered = Some(PopulationCovered::Chip);
    document.federal_authorities = vec![FederalAuthority::TitleXxi];
    document.modified_provisions = Some(ModifiedProvisions::empty(ProvisionsVariant::ChipBase));
    document
}

/// CHIP-only amendment with some provisions answered.
#[must_use]
pub fn chip_amendment() -> DomainDocument {
    let mut document = base_document("mock-chip-amendment", 4);
    document.population_covered = Some(PopulationCovered::Chip);
    document.contract_type = Some(ContractType::Amendment);
    document.federal_authorities = vec![FederalAuthority::TitleXxi];
    document.modified_provisions = Some(provisions(
        ProvisionsVariant::ChipAmendment,
        &[
            (ProvisionKey::BenefitsProvided, true),
            (ProvisionKey::GeoAreaServed, false),
            (ProvisionKey::EncounterDataSubmission, true),
            (ProvisionKey::EnrolleeAccess, false),
        ],
    ));
    document
}

/// Medicaid amendment with an amended rate.
#[must_use]
pub fn medicaid_amendment() -> DomainDocument {
    let mut document = base_document("mock-medicaid-amendment", 5);
    document.population_covered = Some(PopulationCovered::MedicaidAndChip);
    document.contract_type = Some(ContractType::Amendment);
    document.submission_type = Some(SubmissionType::ContractAndRates);
    document.modified_provisions = Some(provisions(
        ProvisionsVariant::MedicaidAmendment,
        &[
            (ProvisionKey::BenefitsProvided, true),
            (ProvisionKey::MedicaidBeneficiaries, false),
            (ProvisionKey::LengthOfContract, true),
        ],
    ));
    let rate = named_rate(
        &document.state_code,
        RateInfo {
            id: RateId::new("mock-rate-amendment"),
            rate_type: Some(RateType::Amendment),
            rate_capitation_type: Some(RateCapitationType::RateRange),
            rate_documents: vec![file("rate-amendment.pdf", DocumentCategory::Rates)],
            supporting_documents: Vec::new(),
            rate_date_start: Some(date!(2021 - 07 - 01)),
            rate_date_end: Some(date!(2022 - 06 - 30)),
            rate_date_certified: Some(date!(2021 - 09 - 02)),
            rate_amendment_effective_start: Some(date!(2021 - 10 - 01)),
            rate_amendment_effective_end: Some(date!(2022 - 06 - 30)),
            rate_program_ids: vec!["program-msho".to_string()],
            rate_certification_name: None,
            certifying_actuary_contact: Some(actuary("Ada Lovelace", Some(ActuarialFirm::Mercer))),
            packages_with_shared_rate_certs: Vec::new(),
        },
    );
    document.rate_infos = vec![rate];
    document.addtl_actuary_contacts = Some(Vec::new());
    document.addtl_actuary_communication_preference =
        Some(ActuaryCommunicationPreference::OactToState);
    document
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Shared draft Medicaid base contract.
fn base_document(id: &str, state_number: u32) -> DomainDocument {
    DomainDocument {
        id: DocumentId::new(id),
        state_code: StateCode::new("MN"),
        state_number,
        program_ids: vec!["program-msho".to_string()],
        status: SubmissionStatus::Draft,
        created_at: date!(2021 - 06 - 01),
        updated_at: instant_2021_06_15(),
        submission_type: Some(SubmissionType::ContractOnly),
        submission_description: String::new(),
        risk_based_contract: Some(true),
        state_contacts: vec![StateContact {
            name: "Mae Jemison".to_string(),
            title_role: "Program Manager".to_string(),
            email: "mae@example.gov".to_string(),
        }],
        documents: vec![file("supporting.pdf", DocumentCategory::ContractRelated)],
        contract_type: Some(ContractType::Base),
        contract_execution_status: Some(ContractExecutionStatus::Executed),
        contract_documents: vec![file("contract.pdf", DocumentCategory::Contract)],
        contract_date_start: Some(date!(2021 - 07 - 01)),
        contract_date_end: Some(date!(2022 - 06 - 30)),
        managed_care_entities: vec![ManagedCareEntity::Mco],
        federal_authorities: vec![FederalAuthority::StatePlan, FederalAuthority::Waiver1915b],
        population_covered: Some(PopulationCovered::Medicaid),
        modified_provisions: None,
        rate_infos: Vec::new(),
        addtl_actuary_contacts: Some(Vec::new()),
        addtl_actuary_communication_preference: None,
    }
}

/// Builds provisions for a variant from a fixed answer list.
fn provisions(variant: ProvisionsVariant, answers: &[(ProvisionKey, bool)]) -> ModifiedProvisions {
    ModifiedProvisions::from_answers(variant, answers.iter().copied()).provisions
}

/// Fills in the generated certification name.
fn named_rate(state_code: &StateCode, mut rate: RateInfo) -> RateInfo {
    rate.rate_certification_name = Some(generate_rate_certification_name(state_code, &rate));
    rate
}

/// Builds an actuary contact.
fn actuary(name: &str, firm: Option<ActuarialFirm>) -> ActuaryContact {
    let other = if firm == Some(ActuarialFirm::Other) { "Hopper Actuarial" } else { "" };
    ActuaryContact {
        name: name.to_string(),
        title_role: "Certifying Actuary".to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase().replace(' ', ".")),
        actuarial_firm: firm,
        actuarial_firm_other: other.to_string(),
    }
}

/// Builds a document reference with a stable digest.
fn file(name: &str, category: DocumentCategory) -> Document {
    Document {
        name: name.to_string(),
        s3_url: format!("s3://mock-bucket/{name}"),
        sha256: hpfd_core::hash_bytes(name.as_bytes()).as_str().to_string(),
        document_categories: vec![category],
    }
}

/// Fixed last-edited instant.
fn instant_2021_06_15() -> UtcInstant {
    UtcInstant::from_offset_datetime(datetime!(2021-06-15 14:30:00 UTC))
}

/// Fixed submission instant.
fn instant_2021_07_01() -> UtcInstant {
    UtcInstant::from_offset_datetime(datetime!(2021-07-01 09:00:00 UTC))
}

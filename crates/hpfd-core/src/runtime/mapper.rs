// crates/hpfd-core/src/runtime/mapper.rs
// ============================================================================
// Module: Domain Mapper
// Description: Bidirectional mapping between latest wire and domain documents.
// Purpose: Compose decode, migration, and structural mapping for callers.
// Dependencies: crate::{core, domain, runtime, wire}
// ============================================================================

//! ## Overview
//! Read path: bytes → [`decode`] → [`MigrationRunner::apply_all`] →
//! [`to_domain_document`]. Write path: [`to_wire_document`] → [`encode`],
//! always at [`CURRENT_PROTO_VERSION`]; nothing is migrated on write.
//!
//! Structural problems (impossible dates, unknown enum codes, a submitted
//! document without a submission instant) fail the whole read with
//! [`FormDataError::Decode`] naming the field path. Provision answers that do
//! not belong to the document's variant are dropped silently in both
//! directions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;

use crate::core::error::FormDataError;
use crate::core::identifiers::DocumentId;
use crate::core::identifiers::RateId;
use crate::core::identifiers::StateCode;
use crate::core::time::date_from_wire;
use crate::core::time::date_to_wire;
use crate::core::time::instant_from_wire;
use crate::core::time::instant_to_wire;
use crate::domain::ActuaryContact;
use crate::domain::Document;
use crate::domain::DomainDocument;
use crate::domain::RateInfo;
use crate::domain::STATUS_DRAFT;
use crate::domain::STATUS_SUBMITTED;
use crate::domain::SharedRatePackage;
use crate::domain::StateContact;
use crate::domain::SubmissionStatus;
use crate::domain::WireEnum;
use crate::domain::provisions::ModifiedProvisions;
use crate::domain::provisions::ProvisionsVariant;
use crate::runtime::codec::decode;
use crate::runtime::codec::encode;
use crate::runtime::migrations::CURRENT_PROTO_VERSION;
use crate::runtime::migrations::MigrationRunner;
use crate::runtime::migrations::MigrationTrace;
use crate::wire::PROTO_NAME;
use crate::wire::WireActuaryContact;
use crate::wire::WireActuaryContactList;
use crate::wire::WireContractInfo;
use crate::wire::WireDate;
use crate::wire::WireDocument;
use crate::wire::WireDocumentFile;
use crate::wire::WireModifiedProvisions;
use crate::wire::WireRateAmendmentInfo;
use crate::wire::WireRateInfo;
use crate::wire::WireSharedRatePackage;
use crate::wire::WireStateContact;

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Reads stored bytes of any supported version into the domain model.
///
/// # Errors
///
/// Returns [`FormDataError`] when decoding, migration, or mapping fails.
pub fn to_domain(bytes: &[u8]) -> Result<DomainDocument, FormDataError> {
    to_domain_traced(bytes).map(|(document, _)| document)
}

/// Reads stored bytes and also returns the migration trace.
///
/// # Errors
///
/// Returns [`FormDataError`] when decoding, migration, or mapping fails.
pub fn to_domain_traced(bytes: &[u8]) -> Result<(DomainDocument, MigrationTrace), FormDataError> {
    let wire = decode(bytes)?;
    let outcome = MigrationRunner::standard().apply_all(wire)?;
    let document = to_domain_document(outcome.document)?;
    Ok((document, outcome.trace))
}

/// Encodes a domain document at the current schema version.
#[must_use]
pub fn to_proto_buffer(document: &DomainDocument) -> Vec<u8> {
    encode(&to_wire_document(document))
}

// ============================================================================
// SECTION: Wire To Domain
// ============================================================================

/// Maps a latest-version wire document into the domain model.
///
/// Legacy fields are ignored; they are consumed by migrations only.
///
/// # Errors
///
/// Returns [`FormDataError::Decode`] naming the first field that cannot be
/// mapped.
pub fn to_domain_document(wire: WireDocument) -> Result<DomainDocument, FormDataError> {
    let status = match wire.status {
        STATUS_DRAFT => SubmissionStatus::Draft,
        STATUS_SUBMITTED => {
            let submitted_at = wire
                .submitted_at
                .as_ref()
                .ok_or_else(|| field_error("submitted_at", "missing on a submitted document"))?;
            SubmissionStatus::Submitted {
                submitted_at: instant_from_wire(submitted_at)
                    .map_err(|err| field_error("submitted_at", err))?,
            }
        }
        other => return Err(field_error("status", format!("unknown value {other}"))),
    };
    let created_at = required_date(wire.created_at.as_ref(), "created_at")?;
    let updated_at = wire
        .updated_at
        .as_ref()
        .ok_or_else(|| field_error("updated_at", "missing"))
        .and_then(|value| instant_from_wire(value).map_err(|err| field_error("updated_at", err)))?;

    let contract = wire.contract_info.unwrap_or_default();
    let population_covered =
        optional_enum(contract.population_covered, "contract_info.population_covered")?;
    let contract_type = optional_enum(contract.contract_type, "contract_info.contract_type")?;
    let modified_provisions =
        ProvisionsVariant::resolve(population_covered, contract_type).map(|variant| {
            let answers = contract
                .modified_provisions
                .as_ref()
                .map(WireModifiedProvisions::answered)
                .unwrap_or_default();
            ModifiedProvisions::from_answers(variant, answers).provisions
        });

    let rate_infos = wire
        .rate_infos
        .into_iter()
        .enumerate()
        .map(|(index, rate)| rate_from_wire(rate, &format!("rate_infos[{index}]")))
        .collect::<Result<Vec<_>, _>>()?;
    let addtl_actuary_contacts = wire
        .addtl_actuary_contacts
        .map(|list| {
            list.contacts
                .into_iter()
                .enumerate()
                .map(|(index, contact)| {
                    actuary_from_wire(contact, &format!("addtl_actuary_contacts[{index}]"))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(DomainDocument {
        id: DocumentId::new(wire.id),
        state_code: StateCode::new(wire.state_code),
        state_number: wire.state_number,
        program_ids: wire.program_ids,
        status,
        created_at,
        updated_at,
        submission_type: optional_enum(wire.submission_type, "submission_type")?,
        submission_description: wire.submission_description,
        risk_based_contract: wire.risk_based_contract,
        state_contacts: wire.state_contacts.into_iter().map(state_contact_from_wire).collect(),
        documents: documents_from_wire(wire.documents, "documents")?,
        contract_type,
        contract_execution_status: optional_enum(
            contract.contract_execution_status,
            "contract_info.contract_execution_status",
        )?,
        contract_documents: documents_from_wire(
            contract.contract_documents,
            "contract_info.contract_documents",
        )?,
        contract_date_start: optional_date(
            contract.contract_date_start.as_ref(),
            "contract_info.contract_date_start",
        )?,
        contract_date_end: optional_date(
            contract.contract_date_end.as_ref(),
            "contract_info.contract_date_end",
        )?,
        managed_care_entities: enum_list(
            &contract.managed_care_entities,
            "contract_info.managed_care_entities",
        )?,
        federal_authorities: enum_list(
            &contract.federal_authorities,
            "contract_info.federal_authorities",
        )?,
        population_covered,
        modified_provisions,
        rate_infos,
        addtl_actuary_contacts,
        addtl_actuary_communication_preference: optional_enum(
            wire.addtl_actuary_communication_preference,
            "addtl_actuary_communication_preference",
        )?,
    })
}

/// Maps one rate.
fn rate_from_wire(rate: WireRateInfo, path: &str) -> Result<RateInfo, FormDataError> {
    let amendment = rate.rate_amendment_info.unwrap_or_default();
    Ok(RateInfo {
        id: RateId::new(rate.id),
        rate_type: optional_enum(rate.rate_type, &format!("{path}.rate_type"))?,
        rate_capitation_type: optional_enum(
            rate.rate_capitation_type,
            &format!("{path}.rate_capitation_type"),
        )?,
        rate_documents: documents_from_wire(rate.rate_documents, &format!("{path}.rate_documents"))?,
        supporting_documents: documents_from_wire(
            rate.supporting_documents,
            &format!("{path}.supporting_documents"),
        )?,
        rate_date_start: optional_date(
            rate.rate_date_start.as_ref(),
            &format!("{path}.rate_date_start"),
        )?,
        rate_date_end: optional_date(rate.rate_date_end.as_ref(), &format!("{path}.rate_date_end"))?,
        rate_date_certified: optional_date(
            rate.rate_date_certified.as_ref(),
            &format!("{path}.rate_date_certified"),
        )?,
        rate_amendment_effective_start: optional_date(
            amendment.effective_date_start.as_ref(),
            &format!("{path}.rate_amendment_info.effective_date_start"),
        )?,
        rate_amendment_effective_end: optional_date(
            amendment.effective_date_end.as_ref(),
            &format!("{path}.rate_amendment_info.effective_date_end"),
        )?,
        rate_program_ids: rate.rate_program_ids,
        rate_certification_name: rate.rate_certification_name,
        certifying_actuary_contact: rate
            .certifying_actuary_contact
            .map(|contact| {
                actuary_from_wire(contact, &format!("{path}.certifying_actuary_contact"))
            })
            .transpose()?,
        packages_with_shared_rate_certs: rate
            .packages_with_shared_rate_certs
            .into_iter()
            .map(|package| SharedRatePackage {
                package_id: package.package_id,
                package_name: package.package_name,
            })
            .collect(),
    })
}

/// Maps one actuary contact.
fn actuary_from_wire(
    contact: WireActuaryContact,
    path: &str,
) -> Result<ActuaryContact, FormDataError> {
    Ok(ActuaryContact {
        name: contact.name,
        title_role: contact.title_role,
        email: contact.email,
        actuarial_firm: optional_enum(contact.actuarial_firm, &format!("{path}.actuarial_firm"))?,
        actuarial_firm_other: contact.actuarial_firm_other,
    })
}

/// Maps one state contact.
fn state_contact_from_wire(contact: WireStateContact) -> StateContact {
    StateContact {
        name: contact.name,
        title_role: contact.title_role,
        email: contact.email,
    }
}

/// Maps a list of document references.
fn documents_from_wire(
    files: Vec<WireDocumentFile>,
    path: &str,
) -> Result<Vec<Document>, FormDataError> {
    files
        .into_iter()
        .enumerate()
        .map(|(index, file)| -> Result<Document, FormDataError> {
            Ok(Document {
                document_categories: enum_list(
                    &file.document_categories,
                    &format!("{path}[{index}].document_categories"),
                )?,
                name: file.name,
                s3_url: file.s3_url,
                sha256: file.sha256,
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Domain To Wire
// ============================================================================

/// Maps a domain document onto a current-version wire document.
///
/// Legacy fields are left empty and provision answers outside the document's
/// variant are omitted.
#[must_use]
pub fn to_wire_document(document: &DomainDocument) -> WireDocument {
    let submitted_at = match document.status {
        SubmissionStatus::Draft => None,
        SubmissionStatus::Submitted {
            submitted_at,
        } => Some(instant_to_wire(submitted_at)),
    };
    WireDocument {
        proto_name: PROTO_NAME.to_string(),
        proto_version: CURRENT_PROTO_VERSION,
        id: document.id.as_str().to_string(),
        state_code: document.state_code.as_str().to_string(),
        state_number: document.state_number,
        program_ids: document.program_ids.clone(),
        status: document.status.to_wire(),
        created_at: Some(date_to_wire(document.created_at)),
        updated_at: Some(instant_to_wire(document.updated_at)),
        submitted_at,
        submission_type: enum_code(document.submission_type),
        submission_description: document.submission_description.clone(),
        risk_based_contract: document.risk_based_contract,
        state_contacts: document
            .state_contacts
            .iter()
            .map(|contact| WireStateContact {
                name: contact.name.clone(),
                title_role: contact.title_role.clone(),
                email: contact.email.clone(),
            })
            .collect(),
        documents: documents_to_wire(&document.documents),
        contract_info: Some(contract_to_wire(document)),
        rate_infos: document.rate_infos.iter().map(rate_to_wire).collect(),
        addtl_actuary_contacts: document.addtl_actuary_contacts.as_ref().map(|contacts| {
            WireActuaryContactList {
                contacts: contacts.iter().map(actuary_to_wire).collect(),
            }
        }),
        addtl_actuary_communication_preference: enum_code(
            document.addtl_actuary_communication_preference,
        ),
    }
}

/// Builds the contract message, including applicable provision answers.
fn contract_to_wire(document: &DomainDocument) -> WireContractInfo {
    WireContractInfo {
        contract_type: enum_code(document.contract_type),
        contract_execution_status: enum_code(document.contract_execution_status),
        contract_documents: documents_to_wire(&document.contract_documents),
        contract_date_start: document.contract_date_start.map(date_to_wire),
        contract_date_end: document.contract_date_end.map(date_to_wire),
        managed_care_entities: enum_codes(&document.managed_care_entities),
        federal_authorities: enum_codes(&document.federal_authorities),
        population_covered: enum_code(document.population_covered),
        modified_provisions: provisions_to_wire(document),
        legacy_items_being_amended: Vec::new(),
    }
}

/// Writes only answers that apply to the document's variant.
fn provisions_to_wire(document: &DomainDocument) -> Option<WireModifiedProvisions> {
    let variant = document.provisions_variant()?;
    let answers = document.modified_provisions.as_ref()?.answers()?;
    let mut wire = WireModifiedProvisions::default();
    let mut written = false;
    for (key, value) in answers.iter().filter(|(key, _)| variant.is_applicable(*key)) {
        *wire.slot_mut(key) = Some(value);
        written = true;
    }
    written.then_some(wire)
}

/// Maps one rate.
fn rate_to_wire(rate: &RateInfo) -> WireRateInfo {
    let has_amendment_dates = rate.rate_amendment_effective_start.is_some()
        || rate.rate_amendment_effective_end.is_some();
    WireRateInfo {
        id: rate.id.as_str().to_string(),
        rate_type: enum_code(rate.rate_type),
        rate_capitation_type: enum_code(rate.rate_capitation_type),
        rate_documents: documents_to_wire(&rate.rate_documents),
        supporting_documents: documents_to_wire(&rate.supporting_documents),
        rate_date_start: rate.rate_date_start.map(date_to_wire),
        rate_date_end: rate.rate_date_end.map(date_to_wire),
        rate_date_certified: rate.rate_date_certified.map(date_to_wire),
        rate_amendment_info: has_amendment_dates.then(|| WireRateAmendmentInfo {
            effective_date_start: rate.rate_amendment_effective_start.map(date_to_wire),
            effective_date_end: rate.rate_amendment_effective_end.map(date_to_wire),
        }),
        rate_program_ids: rate.rate_program_ids.clone(),
        rate_certification_name: rate.rate_certification_name.clone(),
        legacy_actuary_contacts: Vec::new(),
        legacy_actuary_communication_preference: 0,
        certifying_actuary_contact: rate.certifying_actuary_contact.as_ref().map(actuary_to_wire),
        packages_with_shared_rate_certs: rate
            .packages_with_shared_rate_certs
            .iter()
            .map(|package| WireSharedRatePackage {
                package_id: package.package_id.clone(),
                package_name: package.package_name.clone(),
            })
            .collect(),
    }
}

/// Maps one actuary contact.
fn actuary_to_wire(contact: &ActuaryContact) -> WireActuaryContact {
    WireActuaryContact {
        name: contact.name.clone(),
        title_role: contact.title_role.clone(),
        email: contact.email.clone(),
        actuarial_firm: enum_code(contact.actuarial_firm),
        actuarial_firm_other: contact.actuarial_firm_other.clone(),
    }
}

/// Maps a list of document references.
fn documents_to_wire(documents: &[Document]) -> Vec<WireDocumentFile> {
    documents
        .iter()
        .map(|document| WireDocumentFile {
            name: document.name.clone(),
            s3_url: document.s3_url.clone(),
            sha256: document.sha256.clone(),
            document_categories: enum_codes(&document.document_categories),
        })
        .collect()
}

// ============================================================================
// SECTION: Field Helpers
// ============================================================================

/// Builds a decode error for a field path.
fn field_error(path: &str, message: impl std::fmt::Display) -> FormDataError {
    FormDataError::Decode(format!("{path}: {message}"))
}

/// Maps a stored enum code where `0` means unset.
fn optional_enum<E: WireEnum>(code: i32, path: &str) -> Result<Option<E>, FormDataError> {
    if code == 0 {
        return Ok(None);
    }
    E::from_wire(code)
        .map(Some)
        .ok_or_else(|| field_error(path, format!("unknown value {code}")))
}

/// Maps a list of stored enum codes; every entry must be known.
fn enum_list<E: WireEnum>(codes: &[i32], path: &str) -> Result<Vec<E>, FormDataError> {
    codes
        .iter()
        .enumerate()
        .map(|(index, code)| {
            E::from_wire(*code)
                .ok_or_else(|| field_error(&format!("{path}[{index}]"), format!("unknown value {code}")))
        })
        .collect()
}

/// Returns the stored code of an optional enum.
fn enum_code<E: WireEnum>(value: Option<E>) -> i32 {
    value.map_or(0, WireEnum::to_wire)
}

/// Returns the stored codes of an enum list.
fn enum_codes<E: WireEnum>(values: &[E]) -> Vec<i32> {
    values.iter().map(|value| value.to_wire()).collect()
}

/// Maps an optional stored date.
fn optional_date(value: Option<&WireDate>, path: &str) -> Result<Option<Date>, FormDataError> {
    value.map(date_from_wire).transpose().map_err(|err| field_error(path, err))
}

/// Maps a stored date that must be present.
fn required_date(value: Option<&WireDate>, path: &str) -> Result<Date, FormDataError> {
    optional_date(value, path)?.ok_or_else(|| field_error(path, "missing"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

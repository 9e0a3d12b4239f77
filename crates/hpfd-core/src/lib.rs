// crates/hpfd-core/src/lib.rs
// ============================================================================
// Module: Health Plan Form Data Core Library
// Description: Public API surface for the form data engine.
// Purpose: Expose the wire schema, codec, migrations, and domain mapper.
// Dependencies: crate::{core, domain, runtime, wire}
// ============================================================================

//! ## Overview
//! The form data engine stores managed-care submissions as compact protobuf
//! bytes and reads back every historical version of them. Reading decodes the
//! bytes, folds the migration registry over the raw document, and maps the
//! latest raw document into [`DomainDocument`]. Writing always emits
//! [`CURRENT_PROTO_VERSION`].
//!
//! ```text
//! bytes -> codec::decode -> MigrationRunner -> mapper -> DomainDocument
//! DomainDocument -> mapper -> codec::encode -> bytes
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod domain;
pub mod runtime;
pub mod wire;

pub use domain::provisions;
pub use runtime::codec;
pub use runtime::mapper;
pub use runtime::migrations;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::ContentDigest;
pub use crate::core::DocumentId;
pub use crate::core::FormDataError;
pub use crate::core::HashError;
pub use crate::core::ISO_DATE_FORMAT;
pub use crate::core::MigrationError;
pub use crate::core::RateId;
pub use crate::core::StateCode;
pub use crate::core::USER_FACING_LOAD_FAILURE;
pub use crate::core::UtcInstant;
pub use crate::core::canonical_json_bytes;
pub use crate::core::hash_bytes;
pub use domain::ActuarialFirm;
pub use domain::ActuaryCommunicationPreference;
pub use domain::ActuaryContact;
pub use domain::ContractExecutionStatus;
pub use domain::ContractType;
pub use domain::Document;
pub use domain::DocumentCategory;
pub use domain::DomainDocument;
pub use domain::FederalAuthority;
pub use domain::ManagedCareEntity;
pub use domain::PopulationCovered;
pub use domain::RateCapitationType;
pub use domain::RateInfo;
pub use domain::RateType;
pub use domain::SharedRatePackage;
pub use domain::StateContact;
pub use domain::SubmissionStatus;
pub use domain::SubmissionType;
pub use domain::WireEnum;
pub use domain::naming::generate_rate_certification_name;
pub use domain::naming::submission_name;
pub use domain::provisions::ChipProvisions;
pub use domain::provisions::ModifiedProvisions;
pub use domain::provisions::ProvisionAnswers;
pub use domain::provisions::ProvisionKey;
pub use domain::provisions::ProvisionsVariant;
pub use domain::provisions::ResolvedProvisions;
pub use runtime::CURRENT_PROTO_VERSION;
pub use runtime::MAX_DOCUMENT_BYTES;
pub use runtime::MIGRATIONS;
pub use runtime::Migration;
pub use runtime::MigrationOutcome;
pub use runtime::MigrationRunner;
pub use runtime::MigrationTrace;
pub use runtime::decode;
pub use runtime::encode;
pub use runtime::to_domain;
pub use runtime::to_domain_document;
pub use runtime::to_domain_traced;
pub use runtime::to_proto_buffer;
pub use runtime::to_wire_document;
pub use wire::PROTO_NAME;
pub use wire::WireDocument;

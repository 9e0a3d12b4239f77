// crates/hpfd-core/src/domain/mod.rs
// ============================================================================
// Module: Form Data Domain Model
// Description: In-memory health plan form data consumed by business logic.
// Purpose: Provide a typed, variant-shaped view of the latest wire schema.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! [`DomainDocument`] is structurally richer than the wire message: enum codes
//! become Rust enums, date triples become [`time::Date`] values, the status
//! carries its submission instant, and modified provisions are a sum type
//! selected by the document's population and contract type.
//!
//! Enumerations keep their stored integer codes through [`WireEnum`]. Code `0`
//! is "unset" on the wire and maps to `None` in the domain.

pub mod naming;
pub mod provisions;

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use time::Date;

use crate::core::identifiers::DocumentId;
use crate::core::identifiers::RateId;
use crate::core::identifiers::StateCode;
use crate::core::time::UtcInstant;
use crate::domain::provisions::ModifiedProvisions;
use crate::domain::provisions::ProvisionKey;
use crate::domain::provisions::ProvisionsVariant;

// ============================================================================
// SECTION: Wire Enumerations
// ============================================================================

/// Enumeration stored on the wire as a non-zero `i32` code.
pub trait WireEnum: Sized + Copy + 'static {
    /// Every variant in code order.
    const VARIANTS: &'static [Self];

    /// Returns the stored code of the variant.
    fn to_wire(self) -> i32;

    /// Returns the variant for a stored code, if known.
    fn from_wire(code: i32) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|variant| variant.to_wire() == code)
    }
}

/// Declares a domain enumeration together with its wire codes.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
        }

        impl WireEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant,)+];

            fn to_wire(self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }
    };
}

wire_enum! {
    /// Whether the package contains rates.
    pub enum SubmissionType {
        /// Contract action only.
        ContractOnly = 1,
        /// Contract action and rate certifications.
        ContractAndRates = 2,
    }
}

wire_enum! {
    /// Base contract or amendment.
    pub enum ContractType {
        /// Base contract.
        Base = 1,
        /// Amendment to an executed contract.
        Amendment = 2,
    }
}

wire_enum! {
    /// Contract execution status.
    pub enum ContractExecutionStatus {
        /// Fully executed.
        Executed = 1,
        /// Not yet executed.
        Unexecuted = 2,
    }
}

wire_enum! {
    /// Population covered by the contract.
    pub enum PopulationCovered {
        /// Medicaid only.
        Medicaid = 1,
        /// CHIP only.
        Chip = 2,
        /// Medicaid and CHIP.
        MedicaidAndChip = 3,
    }
}

wire_enum! {
    /// Managed care entity kind.
    pub enum ManagedCareEntity {
        /// Managed care organization.
        Mco = 1,
        /// Prepaid inpatient health plan.
        Pihp = 2,
        /// Prepaid ambulatory health plan.
        Pahp = 3,
        /// Primary care case management entity.
        Pccm = 4,
    }
}

wire_enum! {
    /// Federal authority for the contract.
    pub enum FederalAuthority {
        /// State plan authority.
        StatePlan = 1,
        /// 1915(b) waiver.
        Waiver1915b = 2,
        /// 1115 waiver.
        Waiver1115 = 3,
        /// Voluntary enrollment.
        Voluntary = 4,
        /// Benchmark plan.
        Benchmark = 5,
        /// Title XXI separate CHIP.
        TitleXxi = 6,
    }
}

wire_enum! {
    /// Rate certification kind.
    pub enum RateType {
        /// New rate certification.
        New = 1,
        /// Amendment to a prior certification.
        Amendment = 2,
    }
}

wire_enum! {
    /// Capitation rate shape.
    pub enum RateCapitationType {
        /// Certifies a rate per cell.
        RateCell = 1,
        /// Certifies a range of rates per cell.
        RateRange = 2,
    }
}

wire_enum! {
    /// Who the federal actuaries should talk to.
    pub enum ActuaryCommunicationPreference {
        /// Directly with the certifying actuary.
        OactToActuary = 1,
        /// Through the state.
        OactToState = 2,
    }
}

wire_enum! {
    /// Category tag on an uploaded document.
    pub enum DocumentCategory {
        /// Contract document.
        Contract = 1,
        /// Rate certification document.
        Rates = 2,
        /// Contract supporting document.
        ContractRelated = 3,
        /// Rate supporting document.
        RatesRelated = 4,
    }
}

wire_enum! {
    /// Actuarial firm of a contact.
    pub enum ActuarialFirm {
        /// Mercer.
        Mercer = 1,
        /// Milliman.
        Milliman = 2,
        /// Optumas.
        Optumas = 3,
        /// Guidehouse.
        Guidehouse = 4,
        /// Deloitte.
        Deloitte = 5,
        /// State in-house actuary.
        StateInHouse = 6,
        /// Any other firm, named separately.
        Other = 7,
    }
}

// ============================================================================
// SECTION: Lifecycle
// ============================================================================

/// Stored code of [`SubmissionStatus::Draft`].
pub const STATUS_DRAFT: i32 = 1;
/// Stored code of [`SubmissionStatus::Submitted`].
pub const STATUS_SUBMITTED: i32 = 2;

/// Submission lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Still being edited by the state.
    Draft,
    /// Submitted for review.
    Submitted {
        /// Submission instant.
        submitted_at: UtcInstant,
    },
}

impl SubmissionStatus {
    /// Returns the stored status code.
    #[must_use]
    pub const fn to_wire(self) -> i32 {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Submitted {
                ..
            } => STATUS_SUBMITTED,
        }
    }
}

// ============================================================================
// SECTION: Contacts and Files
// ============================================================================

/// State contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateContact {
    /// Contact name.
    pub name: String,
    /// Title or role.
    pub title_role: String,
    /// Email address.
    pub email: String,
}

/// Actuary contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActuaryContact {
    /// Contact name.
    pub name: String,
    /// Title or role.
    pub title_role: String,
    /// Email address.
    pub email: String,
    /// Actuarial firm, when answered.
    pub actuarial_firm: Option<ActuarialFirm>,
    /// Firm name when the firm is [`ActuarialFirm::Other`].
    pub actuarial_firm_other: String,
}

/// Uploaded document reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Display file name.
    pub name: String,
    /// Storage URL.
    pub s3_url: String,
    /// Hex SHA-256 of the uploaded file.
    pub sha256: String,
    /// Category tags.
    pub document_categories: Vec<DocumentCategory>,
}

/// Reference to another package sharing a rate certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedRatePackage {
    /// Package identifier.
    pub package_id: String,
    /// Package display name.
    pub package_name: String,
}

// ============================================================================
// SECTION: Rates
// ============================================================================

/// Rate certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateInfo {
    /// Rate identifier.
    pub id: RateId,
    /// Certification kind.
    pub rate_type: Option<RateType>,
    /// Capitation shape.
    pub rate_capitation_type: Option<RateCapitationType>,
    /// Rate certification documents.
    pub rate_documents: Vec<Document>,
    /// Supporting documents.
    pub supporting_documents: Vec<Document>,
    /// Rating period start.
    pub rate_date_start: Option<Date>,
    /// Rating period end.
    pub rate_date_end: Option<Date>,
    /// Certification day.
    pub rate_date_certified: Option<Date>,
    /// Amendment effective start.
    pub rate_amendment_effective_start: Option<Date>,
    /// Amendment effective end.
    pub rate_amendment_effective_end: Option<Date>,
    /// Programs covered by the rate.
    pub rate_program_ids: Vec<String>,
    /// Generated certification display name.
    pub rate_certification_name: Option<String>,
    /// Certifying actuary.
    pub certifying_actuary_contact: Option<ActuaryContact>,
    /// Other packages sharing this certification.
    pub packages_with_shared_rate_certs: Vec<SharedRatePackage>,
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Health plan form data at the latest schema revision.
///
/// # Invariants
/// - `modified_provisions` is `None` exactly while `population_covered` or
///   `contract_type` is unanswered; otherwise it holds the variant those two
///   fields select.
/// - `addtl_actuary_contacts` distinguishes "present but empty" from absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainDocument {
    /// Document identifier.
    pub id: DocumentId,
    /// Submitting state.
    pub state_code: StateCode,
    /// Per-state sequence number.
    pub state_number: u32,
    /// Managed care program identifiers.
    pub program_ids: Vec<String>,
    /// Lifecycle state.
    pub status: SubmissionStatus,
    /// Creation day.
    pub created_at: Date,
    /// Last save instant.
    pub updated_at: UtcInstant,
    /// Submission type.
    pub submission_type: Option<SubmissionType>,
    /// Free-text description.
    pub submission_description: String,
    /// Whether the contract is risk based.
    pub risk_based_contract: Option<bool>,
    /// State contacts.
    pub state_contacts: Vec<StateContact>,
    /// Additional submission documents.
    pub documents: Vec<Document>,
    /// Base contract or amendment.
    pub contract_type: Option<ContractType>,
    /// Execution status.
    pub contract_execution_status: Option<ContractExecutionStatus>,
    /// Contract documents.
    pub contract_documents: Vec<Document>,
    /// Contract start.
    pub contract_date_start: Option<Date>,
    /// Contract end.
    pub contract_date_end: Option<Date>,
    /// Managed care entities.
    pub managed_care_entities: Vec<ManagedCareEntity>,
    /// Federal authorities.
    pub federal_authorities: Vec<FederalAuthority>,
    /// Population covered.
    pub population_covered: Option<PopulationCovered>,
    /// Variant-shaped provisions answers.
    pub modified_provisions: Option<ModifiedProvisions>,
    /// Rate certifications.
    pub rate_infos: Vec<RateInfo>,
    /// Additional actuary contacts shared by all rates.
    pub addtl_actuary_contacts: Option<Vec<ActuaryContact>>,
    /// Document-level communication preference.
    pub addtl_actuary_communication_preference: Option<ActuaryCommunicationPreference>,
}

impl DomainDocument {
    /// Returns the provisions variant selected by the classification.
    #[must_use]
    pub const fn provisions_variant(&self) -> Option<ProvisionsVariant> {
        ProvisionsVariant::resolve(self.population_covered, self.contract_type)
    }

    /// Updates the classification and re-resolves the provisions.
    ///
    /// Answers that do not apply to the new variant are dropped and returned.
    /// Clearing either classification field clears the provisions.
    pub fn reclassify(
        &mut self,
        population: Option<PopulationCovered>,
        contract_type: Option<ContractType>,
    ) -> Vec<ProvisionKey> {
        self.population_covered = population;
        self.contract_type = contract_type;
        let previous: Vec<(ProvisionKey, bool)> = self
            .modified_provisions
            .as_ref()
            .and_then(ModifiedProvisions::answers)
            .map(|answers| answers.iter().collect())
            .unwrap_or_default();
        match self.provisions_variant() {
            Some(variant) => {
                let resolved = ModifiedProvisions::from_answers(variant, previous);
                self.modified_provisions = Some(resolved.provisions);
                resolved.discarded
            }
            None => {
                self.modified_provisions = None;
                previous.into_iter().map(|(key, _)| key).collect()
            }
        }
    }

    /// Returns applicable provision keys that are still unanswered.
    ///
    /// Empty for a CHIP-only base contract, which asks no provisions question.
    #[must_use]
    pub fn unanswered_provisions(&self) -> Vec<ProvisionKey> {
        match (&self.modified_provisions, self.provisions_variant()) {
            (Some(provisions), _) => provisions.unanswered_keys(),
            (None, Some(variant)) => variant.applicable_keys().to_vec(),
            (None, None) => Vec::new(),
        }
    }

    /// Returns the submission display name.
    #[must_use]
    pub fn submission_name(&self) -> String {
        naming::submission_name(&self.state_code, self.state_number)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_round_trip_for_every_variant() {
        for firm in ActuarialFirm::VARIANTS {
            assert_eq!(ActuarialFirm::from_wire(firm.to_wire()), Some(*firm));
        }
        assert_eq!(PopulationCovered::from_wire(0), None);
        assert_eq!(FederalAuthority::from_wire(99), None);
        assert_eq!(FederalAuthority::TitleXxi.to_wire(), 6);
    }

    #[test]
    fn submission_status_codes() {
        assert_eq!(SubmissionStatus::Draft.to_wire(), STATUS_DRAFT);
    }
}

// crates/hpfd-core/src/wire/mod.rs
// ============================================================================
// Module: Form Data Wire Schema
// Description: Versioned protobuf message definitions for stored documents.
// Purpose: Define the byte layout that the codec and migrations operate on.
// Dependencies: prost
// ============================================================================

//! ## Overview
//! The wire schema is hand-written `prost` messages; field tags are the
//! durable contract. Rules that keep every persisted byte sequence readable:
//!
//! - A tag is never reused. Fields removed from the domain model stay here as
//!   `legacy_*` fields so that old bytes decode into them instead of being
//!   misread as newer semantics. The current writer leaves them empty.
//! - Enumerations travel as `i32`; `0` always means "unset".
//! - Dates are year/month/day sub-messages, never native timestamps.
//! - `proto_version` records the newest schema generation the document is
//!   known to satisfy.
//!
//! | protoVersion | change |
//! |---|---|
//! | 1 | initial layout |
//! | 2 | contract and rate dates corrected |
//! | 3 | per-rate actuary lists split into certifying and additional contacts |
//! | 4 | amended item codes replaced by the flat modified-provisions message |

// ============================================================================
// SECTION: Imports
// ============================================================================

use prost::Message;

use crate::domain::provisions::ProvisionKey;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Value of [`WireDocument::proto_name`] for every form data document.
pub const PROTO_NAME: &str = "STATE_SUBMISSION";

// ============================================================================
// SECTION: Document
// ============================================================================

/// Root message for a stored health plan form data document.
#[derive(Clone, PartialEq, Message)]
pub struct WireDocument {
    /// Message family name, always [`PROTO_NAME`].
    #[prost(string, tag = "1")]
    pub proto_name: String,
    /// Schema generation of the document.
    #[prost(uint32, tag = "2")]
    pub proto_version: u32,
    /// Document identifier.
    #[prost(string, tag = "3")]
    pub id: String,
    /// Submitting state postal code.
    #[prost(string, tag = "4")]
    pub state_code: String,
    /// Per-state sequence number of the submission.
    #[prost(uint32, tag = "5")]
    pub state_number: u32,
    /// Managed care program identifiers.
    #[prost(string, repeated, tag = "6")]
    pub program_ids: Vec<String>,
    /// Submission status (1 draft, 2 submitted).
    #[prost(int32, tag = "7")]
    pub status: i32,
    /// Calendar day the document was created.
    #[prost(message, optional, tag = "8")]
    pub created_at: Option<WireDate>,
    /// Instant of the last save.
    #[prost(message, optional, tag = "9")]
    pub updated_at: Option<WireDateTime>,
    /// Instant of submission, present only on submitted documents.
    #[prost(message, optional, tag = "10")]
    pub submitted_at: Option<WireDateTime>,
    /// Submission type (1 contract only, 2 contract and rates).
    #[prost(int32, tag = "11")]
    pub submission_type: i32,
    /// Free-text submission description.
    #[prost(string, tag = "12")]
    pub submission_description: String,
    /// Whether the contract is risk based, when answered.
    #[prost(bool, optional, tag = "13")]
    pub risk_based_contract: Option<bool>,
    /// State contacts.
    #[prost(message, repeated, tag = "14")]
    pub state_contacts: Vec<WireStateContact>,
    /// Additional submission documents.
    #[prost(message, repeated, tag = "15")]
    pub documents: Vec<WireDocumentFile>,
    /// Contract details.
    #[prost(message, optional, tag = "16")]
    pub contract_info: Option<WireContractInfo>,
    /// Rate certifications.
    #[prost(message, repeated, tag = "17")]
    pub rate_infos: Vec<WireRateInfo>,
    /// Additional actuary contacts shared by all rates (added in version 3).
    #[prost(message, optional, tag = "18")]
    pub addtl_actuary_contacts: Option<WireActuaryContactList>,
    /// Document-level actuary communication preference (added in version 3).
    #[prost(int32, tag = "19")]
    pub addtl_actuary_communication_preference: i32,
}

// ============================================================================
// SECTION: Dates
// ============================================================================

/// Calendar day triple.
#[derive(Clone, Copy, PartialEq, Eq, Message)]
pub struct WireDate {
    /// Calendar year.
    #[prost(int32, tag = "1")]
    pub year: i32,
    /// Month, 1 through 12.
    #[prost(uint32, tag = "2")]
    pub month: u32,
    /// Day of month, starting at 1.
    #[prost(uint32, tag = "3")]
    pub day: u32,
}

/// UTC instant with second precision.
#[derive(Clone, Copy, PartialEq, Eq, Message)]
pub struct WireDateTime {
    /// Calendar year.
    #[prost(int32, tag = "1")]
    pub year: i32,
    /// Month, 1 through 12.
    #[prost(uint32, tag = "2")]
    pub month: u32,
    /// Day of month, starting at 1.
    #[prost(uint32, tag = "3")]
    pub day: u32,
    /// Hour, 0 through 23.
    #[prost(uint32, tag = "4")]
    pub hour: u32,
    /// Minute, 0 through 59.
    #[prost(uint32, tag = "5")]
    pub minute: u32,
    /// Second, 0 through 59.
    #[prost(uint32, tag = "6")]
    pub second: u32,
}

// ============================================================================
// SECTION: Contacts and Files
// ============================================================================

/// State contact.
#[derive(Clone, PartialEq, Message)]
pub struct WireStateContact {
    /// Contact name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Title or role.
    #[prost(string, tag = "2")]
    pub title_role: String,
    /// Email address.
    #[prost(string, tag = "3")]
    pub email: String,
}

/// Actuary contact.
#[derive(Clone, PartialEq, Message)]
pub struct WireActuaryContact {
    /// Contact name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Title or role.
    #[prost(string, tag = "2")]
    pub title_role: String,
    /// Email address.
    #[prost(string, tag = "3")]
    pub email: String,
    /// Actuarial firm code.
    #[prost(int32, tag = "4")]
    pub actuarial_firm: i32,
    /// Firm name when the firm code is "other".
    #[prost(string, tag = "5")]
    pub actuarial_firm_other: String,
}

/// Wrapper that lets an empty contact list be distinguished from an absent one.
#[derive(Clone, PartialEq, Message)]
pub struct WireActuaryContactList {
    /// Contacts in display order.
    #[prost(message, repeated, tag = "1")]
    pub contacts: Vec<WireActuaryContact>,
}

/// Uploaded document reference.
#[derive(Clone, PartialEq, Message)]
pub struct WireDocumentFile {
    /// Display file name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Storage URL.
    #[prost(string, tag = "2")]
    pub s3_url: String,
    /// Hex SHA-256 of the uploaded file.
    #[prost(string, tag = "3")]
    pub sha256: String,
    /// Document category codes.
    #[prost(int32, repeated, tag = "4")]
    pub document_categories: Vec<i32>,
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Contract details.
#[derive(Clone, PartialEq, Message)]
pub struct WireContractInfo {
    /// Contract type (1 base, 2 amendment).
    #[prost(int32, tag = "1")]
    pub contract_type: i32,
    /// Execution status (1 executed, 2 unexecuted).
    #[prost(int32, tag = "2")]
    pub contract_execution_status: i32,
    /// Contract documents.
    #[prost(message, repeated, tag = "3")]
    pub contract_documents: Vec<WireDocumentFile>,
    /// Contract start day.
    #[prost(message, optional, tag = "4")]
    pub contract_date_start: Option<WireDate>,
    /// Contract end day.
    #[prost(message, optional, tag = "5")]
    pub contract_date_end: Option<WireDate>,
    /// Managed care entity codes.
    #[prost(int32, repeated, tag = "6")]
    pub managed_care_entities: Vec<i32>,
    /// Federal authority codes.
    #[prost(int32, repeated, tag = "7")]
    pub federal_authorities: Vec<i32>,
    /// Population covered (1 Medicaid, 2 CHIP, 3 both).
    #[prost(int32, tag = "8")]
    pub population_covered: i32,
    /// Flat superset of every provision answer (added in version 4).
    #[prost(message, optional, tag = "9")]
    pub modified_provisions: Option<WireModifiedProvisions>,
    /// Retired in version 4: amended item codes.
    #[prost(string, repeated, tag = "10")]
    pub legacy_items_being_amended: Vec<String>,
}

/// Flat optional-field superset of every provisions variant.
///
/// Which fields are meaningful depends on the document's population and
/// contract type; see [`crate::domain::provisions`].
#[derive(Clone, Copy, PartialEq, Eq, Message)]
pub struct WireModifiedProvisions {
    /// Benefits provided.
    #[prost(bool, optional, tag = "1")]
    pub modified_benefits_provided: Option<bool>,
    /// Geographic area served.
    #[prost(bool, optional, tag = "2")]
    pub modified_geo_area_served: Option<bool>,
    /// Medicaid beneficiaries served.
    #[prost(bool, optional, tag = "3")]
    pub modified_medicaid_beneficiaries: Option<bool>,
    /// Risk sharing strategy.
    #[prost(bool, optional, tag = "4")]
    pub modified_risk_sharing_strategy: Option<bool>,
    /// Incentive arrangements.
    #[prost(bool, optional, tag = "5")]
    pub modified_incentive_arrangements: Option<bool>,
    /// Withhold arrangements.
    #[prost(bool, optional, tag = "6")]
    pub modified_withhold_agreements: Option<bool>,
    /// State directed payments.
    #[prost(bool, optional, tag = "7")]
    pub modified_state_directed_payments: Option<bool>,
    /// Pass-through payments.
    #[prost(bool, optional, tag = "8")]
    pub modified_pass_through_payments: Option<bool>,
    /// Payments for institutions for mental disease.
    #[prost(bool, optional, tag = "9")]
    pub modified_payments_for_mental_disease_institutions: Option<bool>,
    /// Medical loss ratio standards.
    #[prost(bool, optional, tag = "10")]
    pub modified_medical_loss_ratio_standards: Option<bool>,
    /// Other financial, payment, or incentive arrangements.
    #[prost(bool, optional, tag = "11")]
    pub modified_other_financial_payment_incentive: Option<bool>,
    /// Enrollment or disenrollment process.
    #[prost(bool, optional, tag = "12")]
    pub modified_enrollment_process: Option<bool>,
    /// Grievance and appeal system.
    #[prost(bool, optional, tag = "13")]
    pub modified_grievance_and_appeal: Option<bool>,
    /// Network adequacy standards.
    #[prost(bool, optional, tag = "14")]
    pub modified_network_adequacy_standards: Option<bool>,
    /// Length of the contract period.
    #[prost(bool, optional, tag = "15")]
    pub modified_length_of_contract: Option<bool>,
    /// Non-risk payment arrangements.
    #[prost(bool, optional, tag = "16")]
    pub modified_non_risk_payment_arrangements: Option<bool>,
    /// In lieu of services and settings.
    #[prost(bool, optional, tag = "17")]
    pub in_lieu_services_and_settings: Option<bool>,
    /// Encounter data submission (CHIP).
    #[prost(bool, optional, tag = "18")]
    pub modified_encounter_data_submission: Option<bool>,
    /// Enrollee access to services (CHIP).
    #[prost(bool, optional, tag = "19")]
    pub modified_enrollee_access: Option<bool>,
}

impl WireModifiedProvisions {
    /// Returns the stored answer for a provision key.
    #[must_use]
    pub const fn get(&self, key: ProvisionKey) -> Option<bool> {
        match key {
            ProvisionKey::BenefitsProvided => self.modified_benefits_provided,
            ProvisionKey::GeoAreaServed => self.modified_geo_area_served,
            ProvisionKey::MedicaidBeneficiaries => self.modified_medicaid_beneficiaries,
            ProvisionKey::RiskSharingStrategy => self.modified_risk_sharing_strategy,
            ProvisionKey::IncentiveArrangements => self.modified_incentive_arrangements,
            ProvisionKey::WithholdAgreements => self.modified_withhold_agreements,
            ProvisionKey::StateDirectedPayments => self.modified_state_directed_payments,
            ProvisionKey::PassThroughPayments => self.modified_pass_through_payments,
            ProvisionKey::PaymentsForMentalDiseaseInstitutions => {
                self.modified_payments_for_mental_disease_institutions
            }
            ProvisionKey::MedicalLossRatioStandards => self.modified_medical_loss_ratio_standards,
            ProvisionKey::OtherFinancialPaymentIncentive => {
                self.modified_other_financial_payment_incentive
            }
            ProvisionKey::EnrollmentProcess => self.modified_enrollment_process,
            ProvisionKey::GrievanceAndAppeal => self.modified_grievance_and_appeal,
            ProvisionKey::NetworkAdequacyStandards => self.modified_network_adequacy_standards,
            ProvisionKey::LengthOfContract => self.modified_length_of_contract,
            ProvisionKey::NonRiskPaymentArrangements => {
                self.modified_non_risk_payment_arrangements
            }
            ProvisionKey::InLieuServicesAndSettings => self.in_lieu_services_and_settings,
            ProvisionKey::EncounterDataSubmission => self.modified_encounter_data_submission,
            ProvisionKey::EnrolleeAccess => self.modified_enrollee_access,
        }
    }

    /// Returns a mutable slot for a provision key.
    pub const fn slot_mut(&mut self, key: ProvisionKey) -> &mut Option<bool> {
        match key {
            ProvisionKey::BenefitsProvided => &mut self.modified_benefits_provided,
            ProvisionKey::GeoAreaServed => &mut self.modified_geo_area_served,
            ProvisionKey::MedicaidBeneficiaries => &mut self.modified_medicaid_beneficiaries,
            ProvisionKey::RiskSharingStrategy => &mut self.modified_risk_sharing_strategy,
            ProvisionKey::IncentiveArrangements => &mut self.modified_incentive_arrangements,
            ProvisionKey::WithholdAgreements => &mut self.modified_withhold_agreements,
            ProvisionKey::StateDirectedPayments => &mut self.modified_state_directed_payments,
            ProvisionKey::PassThroughPayments => &mut self.modified_pass_through_payments,
            ProvisionKey::PaymentsForMentalDiseaseInstitutions => {
                &mut self.modified_payments_for_mental_disease_institutions
            }
            ProvisionKey::MedicalLossRatioStandards => {
                &mut self.modified_medical_loss_ratio_standards
            }
            ProvisionKey::OtherFinancialPaymentIncentive => {
                &mut self.modified_other_financial_payment_incentive
            }
            ProvisionKey::EnrollmentProcess => &mut self.modified_enrollment_process,
            ProvisionKey::GrievanceAndAppeal => &mut self.modified_grievance_and_appeal,
            ProvisionKey::NetworkAdequacyStandards => {
                &mut self.modified_network_adequacy_standards
            }
            ProvisionKey::LengthOfContract => &mut self.modified_length_of_contract,
            ProvisionKey::NonRiskPaymentArrangements => {
                &mut self.modified_non_risk_payment_arrangements
            }
            ProvisionKey::InLieuServicesAndSettings => &mut self.in_lieu_services_and_settings,
            ProvisionKey::EncounterDataSubmission => &mut self.modified_encounter_data_submission,
            ProvisionKey::EnrolleeAccess => &mut self.modified_enrollee_access,
        }
    }

    /// Returns every key with a stored answer, in key order.
    #[must_use]
    pub fn answered(&self) -> Vec<(ProvisionKey, bool)> {
        ProvisionKey::ALL
            .iter()
            .filter_map(|key| self.get(*key).map(|value| (*key, value)))
            .collect()
    }
}

// ============================================================================
// SECTION: Rates
// ============================================================================

/// Rate certification.
#[derive(Clone, PartialEq, Message)]
pub struct WireRateInfo {
    /// Rate identifier.
    #[prost(string, tag = "1")]
    pub id: String,
    /// Rate type (1 new, 2 amendment).
    #[prost(int32, tag = "2")]
    pub rate_type: i32,
    /// Capitation type (1 rate cell, 2 rate range).
    #[prost(int32, tag = "3")]
    pub rate_capitation_type: i32,
    /// Rate certification documents.
    #[prost(message, repeated, tag = "4")]
    pub rate_documents: Vec<WireDocumentFile>,
    /// Supporting documents.
    #[prost(message, repeated, tag = "5")]
    pub supporting_documents: Vec<WireDocumentFile>,
    /// Rating period start day.
    #[prost(message, optional, tag = "6")]
    pub rate_date_start: Option<WireDate>,
    /// Rating period end day.
    #[prost(message, optional, tag = "7")]
    pub rate_date_end: Option<WireDate>,
    /// Certification day.
    #[prost(message, optional, tag = "8")]
    pub rate_date_certified: Option<WireDate>,
    /// Amendment effective period.
    #[prost(message, optional, tag = "9")]
    pub rate_amendment_info: Option<WireRateAmendmentInfo>,
    /// Programs covered by the rate.
    #[prost(string, repeated, tag = "10")]
    pub rate_program_ids: Vec<String>,
    /// Generated certification display name.
    #[prost(string, optional, tag = "11")]
    pub rate_certification_name: Option<String>,
    /// Retired in version 3: every actuary contact for the rate.
    #[prost(message, repeated, tag = "12")]
    pub legacy_actuary_contacts: Vec<WireActuaryContact>,
    /// Retired in version 3: per-rate communication preference.
    #[prost(int32, tag = "13")]
    pub legacy_actuary_communication_preference: i32,
    /// Certifying actuary (added in version 3).
    #[prost(message, optional, tag = "14")]
    pub certifying_actuary_contact: Option<WireActuaryContact>,
    /// Other packages sharing this rate certification.
    #[prost(message, repeated, tag = "15")]
    pub packages_with_shared_rate_certs: Vec<WireSharedRatePackage>,
}

impl WireRateInfo {
    /// Returns true when the rate still carries pre-version-3 actuary data.
    #[must_use]
    pub fn has_legacy_actuary_data(&self) -> bool {
        !self.legacy_actuary_contacts.is_empty() || self.legacy_actuary_communication_preference != 0
    }
}

/// Amendment effective period.
#[derive(Clone, Copy, PartialEq, Eq, Message)]
pub struct WireRateAmendmentInfo {
    /// Effective start day.
    #[prost(message, optional, tag = "1")]
    pub effective_date_start: Option<WireDate>,
    /// Effective end day.
    #[prost(message, optional, tag = "2")]
    pub effective_date_end: Option<WireDate>,
}

/// Reference to another package sharing a rate certification.
#[derive(Clone, PartialEq, Message)]
pub struct WireSharedRatePackage {
    /// Package identifier.
    #[prost(string, tag = "1")]
    pub package_id: String,
    /// Package display name.
    #[prost(string, tag = "2")]
    pub package_name: String,
}

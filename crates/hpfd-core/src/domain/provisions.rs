// crates/hpfd-core/src/domain/provisions.rs
// ============================================================================
// Module: Modified Provisions
// Description: Provision keys, variant resolution, and answer sets.
// Purpose: Reconstitute the correct provisions shape from a flat wire superset.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Contract amendments (and Medicaid base contracts) answer a yes/no question
//! for each "modified provision". Which questions exist depends only on the
//! population covered and the contract type:
//!
//! | population | contract | variant | keys |
//! |---|---|---|---|
//! | CHIP only | base | `Chip(Base)` | none |
//! | CHIP only | amendment | `Chip(Amendment)` | [`CHIP_AMENDMENT_KEYS`] |
//! | Medicaid, or Medicaid and CHIP | base | `MedicaidBase` | [`MEDICAID_BASE_KEYS`] |
//! | Medicaid, or Medicaid and CHIP | amendment | `MedicaidAmendment` | [`MEDICAID_AMENDMENT_KEYS`] |
//!
//! Stored bytes may carry answers left over from an earlier classification of
//! an in-progress document. Those answers are dropped when the provisions are
//! resolved; they are never surfaced and never raise an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ContractType;
use crate::domain::PopulationCovered;

// ============================================================================
// SECTION: Provision Keys
// ============================================================================

/// Every provision question across all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProvisionKey {
    /// Benefits provided.
    BenefitsProvided,
    /// Geographic area served.
    GeoAreaServed,
    /// Medicaid beneficiaries served.
    MedicaidBeneficiaries,
    /// Risk sharing strategy.
    RiskSharingStrategy,
    /// Incentive arrangements.
    IncentiveArrangements,
    /// Withhold arrangements.
    WithholdAgreements,
    /// State directed payments.
    StateDirectedPayments,
    /// Pass-through payments.
    PassThroughPayments,
    /// Payments for institutions for mental disease.
    PaymentsForMentalDiseaseInstitutions,
    /// Medical loss ratio standards.
    MedicalLossRatioStandards,
    /// Other financial, payment, or incentive arrangements.
    OtherFinancialPaymentIncentive,
    /// Enrollment or disenrollment process.
    EnrollmentProcess,
    /// Grievance and appeal system.
    GrievanceAndAppeal,
    /// Network adequacy standards.
    NetworkAdequacyStandards,
    /// Length of the contract period.
    LengthOfContract,
    /// Non-risk payment arrangements.
    NonRiskPaymentArrangements,
    /// In lieu of services and settings.
    InLieuServicesAndSettings,
    /// Encounter data submission.
    EncounterDataSubmission,
    /// Enrollee access to services.
    EnrolleeAccess,
}

impl ProvisionKey {
    /// All keys in declaration order.
    pub const ALL: [Self; 19] = [
        Self::BenefitsProvided,
        Self::GeoAreaServed,
        Self::MedicaidBeneficiaries,
        Self::RiskSharingStrategy,
        Self::IncentiveArrangements,
        Self::WithholdAgreements,
        Self::StateDirectedPayments,
        Self::PassThroughPayments,
        Self::PaymentsForMentalDiseaseInstitutions,
        Self::MedicalLossRatioStandards,
        Self::OtherFinancialPaymentIncentive,
        Self::EnrollmentProcess,
        Self::GrievanceAndAppeal,
        Self::NetworkAdequacyStandards,
        Self::LengthOfContract,
        Self::NonRiskPaymentArrangements,
        Self::InLieuServicesAndSettings,
        Self::EncounterDataSubmission,
        Self::EnrolleeAccess,
    ];

    /// Maps an amended item code from protoVersion 3 and earlier.
    #[must_use]
    pub fn from_legacy_item_code(code: &str) -> Option<Self> {
        let key = match code {
            "BENEFITS_PROVIDED" => Self::BenefitsProvided,
            "GEO_AREA_SERVED" => Self::GeoAreaServed,
            "MEDICAID_BENEFICIARIES" => Self::MedicaidBeneficiaries,
            "RISK_SHARING_MECHANISM" => Self::RiskSharingStrategy,
            "INCENTIVE_ARRANGEMENTS" => Self::IncentiveArrangements,
            "WITHHOLD_AGREEMENTS" => Self::WithholdAgreements,
            "STATE_DIRECTED_PAYMENTS" => Self::StateDirectedPayments,
            "PASS_THROUGH_PAYMENTS" => Self::PassThroughPayments,
            "PAYMENTS_TO_MCOS_AND_PIHPS" => Self::PaymentsForMentalDiseaseInstitutions,
            "MEDICAL_LOSS_RATIO_STANDARDS" => Self::MedicalLossRatioStandards,
            "OTHER_FINANCIAL_PAYMENT_INCENTIVE" => Self::OtherFinancialPaymentIncentive,
            "ENROLLE_ACCESS" => Self::EnrolleeAccess,
            "ENROLLMENT_PROCESS" => Self::EnrollmentProcess,
            "GRIEVANCES_APPEALS_SYSTEM" => Self::GrievanceAndAppeal,
            "NETWORK_ADEQUACY_STANDARDS" => Self::NetworkAdequacyStandards,
            "LENGTH_OF_CONTRACT_PERIOD" => Self::LengthOfContract,
            "NON_RISK_PAYMENT" => Self::NonRiskPaymentArrangements,
            "ENCOUNTER_DATA" => Self::EncounterDataSubmission,
            _ => return None,
        };
        Some(key)
    }
}

/// Provision keys asked for CHIP-only amendments.
pub const CHIP_AMENDMENT_KEYS: &[ProvisionKey] = &[
    ProvisionKey::BenefitsProvided,
    ProvisionKey::GeoAreaServed,
    ProvisionKey::RiskSharingStrategy,
    ProvisionKey::IncentiveArrangements,
    ProvisionKey::WithholdAgreements,
    ProvisionKey::StateDirectedPayments,
    ProvisionKey::PassThroughPayments,
    ProvisionKey::MedicalLossRatioStandards,
    ProvisionKey::OtherFinancialPaymentIncentive,
    ProvisionKey::EnrollmentProcess,
    ProvisionKey::GrievanceAndAppeal,
    ProvisionKey::NetworkAdequacyStandards,
    ProvisionKey::LengthOfContract,
    ProvisionKey::NonRiskPaymentArrangements,
    ProvisionKey::EncounterDataSubmission,
    ProvisionKey::EnrolleeAccess,
];

/// Provision keys asked for Medicaid base contracts.
pub const MEDICAID_BASE_KEYS: &[ProvisionKey] = &[
    ProvisionKey::InLieuServicesAndSettings,
    ProvisionKey::RiskSharingStrategy,
    ProvisionKey::IncentiveArrangements,
    ProvisionKey::WithholdAgreements,
    ProvisionKey::StateDirectedPayments,
    ProvisionKey::PassThroughPayments,
    ProvisionKey::PaymentsForMentalDiseaseInstitutions,
    ProvisionKey::NonRiskPaymentArrangements,
];

/// Provision keys asked for Medicaid amendments.
pub const MEDICAID_AMENDMENT_KEYS: &[ProvisionKey] = &[
    ProvisionKey::BenefitsProvided,
    ProvisionKey::GeoAreaServed,
    ProvisionKey::MedicaidBeneficiaries,
    ProvisionKey::RiskSharingStrategy,
    ProvisionKey::IncentiveArrangements,
    ProvisionKey::WithholdAgreements,
    ProvisionKey::StateDirectedPayments,
    ProvisionKey::PassThroughPayments,
    ProvisionKey::PaymentsForMentalDiseaseInstitutions,
    ProvisionKey::MedicalLossRatioStandards,
    ProvisionKey::OtherFinancialPaymentIncentive,
    ProvisionKey::EnrollmentProcess,
    ProvisionKey::GrievanceAndAppeal,
    ProvisionKey::NetworkAdequacyStandards,
    ProvisionKey::LengthOfContract,
    ProvisionKey::NonRiskPaymentArrangements,
    ProvisionKey::InLieuServicesAndSettings,
];

// ============================================================================
// SECTION: Variant Resolution
// ============================================================================

/// The provisions shape that applies to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionsVariant {
    /// CHIP-only base contract; no provisions question is asked.
    ChipBase,
    /// CHIP-only amendment.
    ChipAmendment,
    /// Medicaid (or Medicaid and CHIP) base contract.
    MedicaidBase,
    /// Medicaid (or Medicaid and CHIP) amendment.
    MedicaidAmendment,
}

impl ProvisionsVariant {
    /// Resolves the variant from the document's classification.
    ///
    /// Returns `None` while either answer is missing.
    #[must_use]
    pub const fn resolve(
        population: Option<PopulationCovered>,
        contract_type: Option<ContractType>,
    ) -> Option<Self> {
        let (Some(population), Some(contract_type)) = (population, contract_type) else {
            return None;
        };
        Some(match (population, contract_type) {
            (PopulationCovered::Chip, ContractType::Base) => Self::ChipBase,
            (PopulationCovered::Chip, ContractType::Amendment) => Self::ChipAmendment,
            (
                PopulationCovered::Medicaid | PopulationCovered::MedicaidAndChip,
                ContractType::Base,
            ) => Self::MedicaidBase,
            (
                PopulationCovered::Medicaid | PopulationCovered::MedicaidAndChip,
                ContractType::Amendment,
            ) => Self::MedicaidAmendment,
        })
    }

    /// Returns the provision keys asked for this variant.
    ///
    /// A CHIP-only base contract legitimately has no keys.
    #[must_use]
    pub const fn applicable_keys(self) -> &'static [ProvisionKey] {
        match self {
            Self::ChipBase => &[],
            Self::ChipAmendment => CHIP_AMENDMENT_KEYS,
            Self::MedicaidBase => MEDICAID_BASE_KEYS,
            Self::MedicaidAmendment => MEDICAID_AMENDMENT_KEYS,
        }
    }

    /// Returns true when the key is asked for this variant.
    #[must_use]
    pub fn is_applicable(self, key: ProvisionKey) -> bool {
        self.applicable_keys().contains(&key)
    }

    /// Returns the human-readable label of a key for this variant.
    ///
    /// Returns `None` for keys that are not asked for this variant.
    #[must_use]
    pub fn label(self, key: ProvisionKey) -> Option<&'static str> {
        if !self.is_applicable(key) {
            return None;
        }
        let chip = matches!(self, Self::ChipAmendment);
        Some(match key {
            ProvisionKey::BenefitsProvided if chip => "Benefits provided",
            ProvisionKey::BenefitsProvided => "Benefits provided by the managed care plans",
            ProvisionKey::GeoAreaServed if chip => "Geographic area served",
            ProvisionKey::GeoAreaServed => "Geographic areas served by the managed care plans",
            ProvisionKey::MedicaidBeneficiaries => {
                "Medicaid beneficiaries served by the managed care plans (e.g. eligibility or \
                 enrollment criteria)"
            }
            ProvisionKey::RiskSharingStrategy => {
                "Risk-sharing strategy (e.g., risk corridor, minimum medical loss ratio with a \
                 remittance, stop loss limits, reinsurance, etc.)"
            }
            ProvisionKey::IncentiveArrangements => "Incentive arrangements",
            ProvisionKey::WithholdAgreements => "Withhold arrangements",
            ProvisionKey::StateDirectedPayments => "State directed payments",
            ProvisionKey::PassThroughPayments => "Pass-through payments",
            ProvisionKey::PaymentsForMentalDiseaseInstitutions => {
                "Payments to MCOs and PIHPs for enrollees that are a patient in an institution \
                 for mental disease"
            }
            ProvisionKey::MedicalLossRatioStandards => "Medical loss ratio standards",
            ProvisionKey::OtherFinancialPaymentIncentive => {
                "Other financial, payment, incentive or related contractual provisions"
            }
            ProvisionKey::EnrollmentProcess => "Enrollment/disenrollment process",
            ProvisionKey::GrievanceAndAppeal => "Grievance and appeal system",
            ProvisionKey::NetworkAdequacyStandards => "Network adequacy standards",
            ProvisionKey::LengthOfContract => "Length of the contract period",
            ProvisionKey::NonRiskPaymentArrangements => "Non-risk payment arrangements",
            ProvisionKey::InLieuServicesAndSettings => "In lieu-of services and settings (ILOSs)",
            ProvisionKey::EncounterDataSubmission => "Encounter data submission",
            ProvisionKey::EnrolleeAccess => "Enrollee access to services",
        })
    }

    /// Returns the `(key, label)` table for this variant in question order.
    #[must_use]
    pub fn label_table(self) -> Vec<(ProvisionKey, &'static str)> {
        self.applicable_keys()
            .iter()
            .filter_map(|key| self.label(*key).map(|label| (*key, label)))
            .collect()
    }
}

// ============================================================================
// SECTION: Answers
// ============================================================================

/// Yes/no answers restricted to one variant's keys.
///
/// # Invariants
/// - Only keys applicable to the owning variant are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProvisionAnswers(BTreeMap<ProvisionKey, bool>);

impl ProvisionAnswers {
    /// Returns the answer for a key.
    #[must_use]
    pub fn get(&self, key: ProvisionKey) -> Option<bool> {
        self.0.get(&key).copied()
    }

    /// Iterates over answered keys in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ProvisionKey, bool)> + '_ {
        self.0.iter().map(|(key, value)| (*key, *value))
    }

    /// Returns the number of answered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when nothing is answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// CHIP-only provisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "contract", content = "answers", rename_all = "snake_case")]
pub enum ChipProvisions {
    /// Base contract: no provisions are asked.
    Base,
    /// Amendment answers.
    Amendment(ProvisionAnswers),
}

/// Variant-shaped provisions of a document.
///
/// # Invariants
/// - Exactly one variant exists per document whose classification is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", content = "provisions", rename_all = "snake_case")]
pub enum ModifiedProvisions {
    /// CHIP-only population.
    Chip(ChipProvisions),
    /// Medicaid base contract.
    MedicaidBase(ProvisionAnswers),
    /// Medicaid amendment.
    MedicaidAmendment(ProvisionAnswers),
}

/// Outcome of resolving raw answers against a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvisions {
    /// Provisions restricted to the applicable keys.
    pub provisions: ModifiedProvisions,
    /// Keys that were present but not applicable, in key order.
    pub discarded: Vec<ProvisionKey>,
}

impl ModifiedProvisions {
    /// Returns empty provisions for a variant.
    #[must_use]
    pub fn empty(variant: ProvisionsVariant) -> Self {
        match variant {
            ProvisionsVariant::ChipBase => Self::Chip(ChipProvisions::Base),
            ProvisionsVariant::ChipAmendment => {
                Self::Chip(ChipProvisions::Amendment(ProvisionAnswers::default()))
            }
            ProvisionsVariant::MedicaidBase => Self::MedicaidBase(ProvisionAnswers::default()),
            ProvisionsVariant::MedicaidAmendment => {
                Self::MedicaidAmendment(ProvisionAnswers::default())
            }
        }
    }

    /// Builds provisions for a variant, dropping answers that do not apply.
    pub fn from_answers(
        variant: ProvisionsVariant,
        answers: impl IntoIterator<Item = (ProvisionKey, bool)>,
    ) -> ResolvedProvisions {
        let mut provisions = Self::empty(variant);
        let mut discarded = Vec::new();
        for (key, value) in answers {
            if !provisions.set(key, value) {
                discarded.push(key);
            }
        }
        discarded.sort_unstable();
        discarded.dedup();
        ResolvedProvisions {
            provisions,
            discarded,
        }
    }

    /// Returns the variant of these provisions.
    #[must_use]
    pub const fn variant(&self) -> ProvisionsVariant {
        match self {
            Self::Chip(ChipProvisions::Base) => ProvisionsVariant::ChipBase,
            Self::Chip(ChipProvisions::Amendment(_)) => ProvisionsVariant::ChipAmendment,
            Self::MedicaidBase(_) => ProvisionsVariant::MedicaidBase,
            Self::MedicaidAmendment(_) => ProvisionsVariant::MedicaidAmendment,
        }
    }

    /// Returns the stored answers; `None` for a CHIP base contract.
    #[must_use]
    pub const fn answers(&self) -> Option<&ProvisionAnswers> {
        match self {
            Self::Chip(ChipProvisions::Base) => None,
            Self::Chip(ChipProvisions::Amendment(answers))
            | Self::MedicaidBase(answers)
            | Self::MedicaidAmendment(answers) => Some(answers),
        }
    }

    /// Records an answer. Returns false, storing nothing, when the key does
    /// not apply to this variant.
    pub fn set(&mut self, key: ProvisionKey, value: bool) -> bool {
        let variant = self.variant();
        if !variant.is_applicable(key) {
            return false;
        }
        match self {
            Self::Chip(ChipProvisions::Base) => false,
            Self::Chip(ChipProvisions::Amendment(answers))
            | Self::MedicaidBase(answers)
            | Self::MedicaidAmendment(answers) => {
                answers.0.insert(key, value);
                true
            }
        }
    }

    /// Returns applicable keys that have not been answered yet.
    #[must_use]
    pub fn unanswered_keys(&self) -> Vec<ProvisionKey> {
        let answers = self.answers();
        self.variant()
            .applicable_keys()
            .iter()
            .copied()
            .filter(|key| answers.and_then(|answers| answers.get(*key)).is_none())
            .collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

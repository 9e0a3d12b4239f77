// crates/hpfd-core/src/domain/naming.rs
// ============================================================================
// Module: Generated Display Names
// Description: Submission and rate certification display names.
// Purpose: Derive human-facing names from stored fields.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Names are derived, never edited by users. Rate certification names are
//! stored with the rate, so a migration that changes rate dates must also
//! regenerate them through [`format_rate_certification_name`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;

use crate::core::identifiers::StateCode;
use crate::core::time::compact_date;
use crate::domain::RateInfo;
use crate::domain::RateType;

// ============================================================================
// SECTION: Rate Certification Names
// ============================================================================

/// Fields that contribute to a rate certification name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateNameParts {
    /// Certification kind.
    pub rate_type: Option<RateType>,
    /// Rating period start.
    pub start: Option<Date>,
    /// Rating period end.
    pub end: Option<Date>,
    /// Certification day.
    pub certified: Option<Date>,
    /// Amendment effective start.
    pub effective_start: Option<Date>,
    /// Amendment effective end.
    pub effective_end: Option<Date>,
}

/// Formats `{STATE}-RATE-{start}-{end}-{CERTIFICATION|AMENDMENT}-{certified}`.
///
/// Dates are `YYYYMMDD`. Amendments use their effective period when either
/// effective date is set. Missing pieces are omitted.
#[must_use]
pub fn format_rate_certification_name(state_code: &StateCode, parts: &RateNameParts) -> String {
    let (start, end) = match parts.rate_type {
        Some(RateType::Amendment)
            if parts.effective_start.is_some() || parts.effective_end.is_some() =>
        {
            (parts.effective_start, parts.effective_end)
        }
        _ => (parts.start, parts.end),
    };
    let mut name = format!("{}-RATE", state_code.display_code());
    for date in [start, end].into_iter().flatten() {
        name.push('-');
        name.push_str(&compact_date(date));
    }
    match parts.rate_type {
        Some(RateType::New) => name.push_str("-CERTIFICATION"),
        Some(RateType::Amendment) => name.push_str("-AMENDMENT"),
        None => {}
    }
    if let Some(certified) = parts.certified {
        name.push('-');
        name.push_str(&compact_date(certified));
    }
    name
}

/// Generates the certification name of a domain rate.
#[must_use]
pub fn generate_rate_certification_name(state_code: &StateCode, rate: &RateInfo) -> String {
    format_rate_certification_name(
        state_code,
        &RateNameParts {
            rate_type: rate.rate_type,
            start: rate.rate_date_start,
            end: rate.rate_date_end,
            certified: rate.rate_date_certified,
            effective_start: rate.rate_amendment_effective_start,
            effective_end: rate.rate_amendment_effective_end,
        },
    )
}

// ============================================================================
// SECTION: Submission Names
// ============================================================================

/// Formats `MCR-{STATE}-{NNNN}` with the state number zero-padded.
#[must_use]
pub fn submission_name(state_code: &StateCode, state_number: u32) -> String {
    format!("MCR-{}-{state_number:04}", state_code.display_code())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn new_rate_name_uses_rating_period() {
        let parts = RateNameParts {
            rate_type: Some(RateType::New),
            start: Some(date!(2021 - 05 - 22)),
            end: Some(date!(2022 - 05 - 21)),
            certified: Some(date!(2021 - 05 - 01)),
            ..RateNameParts::default()
        };
        assert_eq!(
            format_rate_certification_name(&StateCode::new("mn"), &parts),
            "MN-RATE-20210522-20220521-CERTIFICATION-20210501"
        );
    }

    #[test]
    fn amendment_name_prefers_effective_period() {
        let parts = RateNameParts {
            rate_type: Some(RateType::Amendment),
            start: Some(date!(2021 - 01 - 01)),
            end: Some(date!(2021 - 12 - 31)),
            certified: None,
            effective_start: Some(date!(2021 - 07 - 01)),
            effective_end: Some(date!(2021 - 12 - 31)),
        };
        assert_eq!(
            format_rate_certification_name(&StateCode::new("FL"), &parts),
            "FL-RATE-20210701-20211231-AMENDMENT"
        );
    }

    #[test]
    fn empty_parts_collapse_to_prefix() {
        assert_eq!(
            format_rate_certification_name(&StateCode::new("VA"), &RateNameParts::default()),
            "VA-RATE"
        );
    }

    #[test]
    fn submission_name_pads_state_number() {
        assert_eq!(submission_name(&StateCode::new("mn"), 7), "MCR-MN-0007");
        assert_eq!(submission_name(&StateCode::new("MN"), 12345), "MCR-MN-12345");
    }
}

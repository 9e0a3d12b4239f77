// crates/hpfd-core/src/runtime/migrations/add_one_month.rs
// ============================================================================
// Module: Migration 0001 Add One Month
// Description: Corrects contract and rate dates written one month early.
// Purpose: Upgrade protoVersion 1 documents to protoVersion 2.
// Dependencies: crate::{core, domain, wire}
// ============================================================================

//! ## Overview
//! Version 1 writers stored every contract and rate date one calendar month
//! early. Shifted dates are indistinguishable from correct ones, so this is
//! the one migration that must gate on `proto_version`: it only runs on
//! documents that have not passed version 1.
//!
//! Rate certification names embed the rate dates and are regenerated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::MigrationError;
use crate::core::identifiers::StateCode;
use crate::core::time::add_one_calendar_month;
use crate::core::time::date_from_wire;
use crate::core::time::date_to_wire;
use crate::domain::RateType;
use crate::domain::WireEnum;
use crate::domain::naming::RateNameParts;
use crate::domain::naming::format_rate_certification_name;
use crate::runtime::migrations::mark_upgraded;
use crate::wire::WireDate;
use crate::wire::WireDocument;
use crate::wire::WireRateInfo;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registry name.
pub const NAME: &str = "0001_add_one_month";
/// Schema generation this migration upgrades from.
pub const FROM_VERSION: u32 = 1;

// ============================================================================
// SECTION: Migration
// ============================================================================

/// Shifts every stored contract and rate date forward by one calendar month.
///
/// # Errors
///
/// Returns [`MigrationError`] when a stored date triple is not a real date.
pub fn migrate(mut document: WireDocument) -> Result<WireDocument, MigrationError> {
    if document.proto_version > FROM_VERSION {
        return Ok(document);
    }
    if let Some(contract) = document.contract_info.as_mut() {
        shift(&mut contract.contract_date_start, "contract_info.contract_date_start")?;
        shift(&mut contract.contract_date_end, "contract_info.contract_date_end")?;
    }
    let state_code = StateCode::new(document.state_code.as_str());
    for (index, rate) in document.rate_infos.iter_mut().enumerate() {
        shift_rate(rate, index)?;
        if rate.rate_certification_name.as_deref().is_some_and(|name| !name.is_empty()) {
            let parts = name_parts(rate, index)?;
            rate.rate_certification_name =
                Some(format_rate_certification_name(&state_code, &parts));
        }
    }
    mark_upgraded(&mut document, FROM_VERSION);
    Ok(document)
}

/// Shifts every date of one rate.
fn shift_rate(rate: &mut WireRateInfo, index: usize) -> Result<(), MigrationError> {
    shift(&mut rate.rate_date_start, &format!("rate_infos[{index}].rate_date_start"))?;
    shift(&mut rate.rate_date_end, &format!("rate_infos[{index}].rate_date_end"))?;
    shift(&mut rate.rate_date_certified, &format!("rate_infos[{index}].rate_date_certified"))?;
    if let Some(amendment) = rate.rate_amendment_info.as_mut() {
        shift(
            &mut amendment.effective_date_start,
            &format!("rate_infos[{index}].rate_amendment_info.effective_date_start"),
        )?;
        shift(
            &mut amendment.effective_date_end,
            &format!("rate_infos[{index}].rate_amendment_info.effective_date_end"),
        )?;
    }
    Ok(())
}

/// Shifts a single optional date in place.
fn shift(slot: &mut Option<WireDate>, path: &str) -> Result<(), MigrationError> {
    let Some(stored) = slot.as_ref() else {
        return Ok(());
    };
    let date = date_from_wire(stored).map_err(|err| MigrationError::new(format!("{path}: {err}")))?;
    let shifted =
        add_one_calendar_month(date).map_err(|err| MigrationError::new(format!("{path}: {err}")))?;
    *slot = Some(date_to_wire(shifted));
    Ok(())
}

/// Collects name parts from the already shifted rate.
fn name_parts(rate: &WireRateInfo, index: usize) -> Result<RateNameParts, MigrationError> {
    let read = |value: Option<&WireDate>, field: &str| {
        value
            .map(date_from_wire)
            .transpose()
            .map_err(|err| MigrationError::new(format!("rate_infos[{index}].{field}: {err}")))
    };
    let amendment = rate.rate_amendment_info.as_ref();
    Ok(RateNameParts {
        rate_type: RateType::from_wire(rate.rate_type),
        start: read(rate.rate_date_start.as_ref(), "rate_date_start")?,
        end: read(rate.rate_date_end.as_ref(), "rate_date_end")?,
        certified: read(rate.rate_date_certified.as_ref(), "rate_date_certified")?,
        effective_start: read(
            amendment.and_then(|info| info.effective_date_start.as_ref()),
            "rate_amendment_info.effective_date_start",
        )?,
        effective_end: read(
            amendment.and_then(|info| info.effective_date_end.as_ref()),
            "rate_amendment_info.effective_date_end",
        )?,
    })
}

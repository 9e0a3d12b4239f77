// crates/hpfd-core/src/runtime/migrations/items_being_amended.rs
// ============================================================================
// Module: Migration 0003 Items Being Amended To Provisions
// Description: Converts amended item codes into modified-provision answers.
// Purpose: Upgrade protoVersion 3 documents to protoVersion 4.
// Dependencies: crate::{core, domain, wire}
// ============================================================================

//! ## Overview
//! Version 3 and earlier stored amendment details as a list of item codes.
//! Each code becomes a `true` answer in the flat modified-provisions message.
//! Whether a converted key applies to the document's variant is decided later
//! by the domain mapper, not here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::MigrationError;
use crate::domain::provisions::ProvisionKey;
use crate::runtime::migrations::mark_upgraded;
use crate::wire::WireDocument;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registry name.
pub const NAME: &str = "0003_items_being_amended_to_provisions";
/// Schema generation this migration upgrades from.
pub const FROM_VERSION: u32 = 3;

// ============================================================================
// SECTION: Migration
// ============================================================================

/// Maps legacy amended item codes onto modified-provision answers.
///
/// # Errors
///
/// Returns [`MigrationError`] for an item code with no provision key.
pub fn migrate(mut document: WireDocument) -> Result<WireDocument, MigrationError> {
    let Some(contract) =
        document.contract_info.as_mut().filter(|info| !info.legacy_items_being_amended.is_empty())
    else {
        mark_upgraded(&mut document, FROM_VERSION);
        return Ok(document);
    };

    let keys = contract
        .legacy_items_being_amended
        .iter()
        .map(|code| {
            ProvisionKey::from_legacy_item_code(code).ok_or_else(|| {
                MigrationError::new(format!(
                    "contract_info.legacy_items_being_amended: unknown item code {code:?}"
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let provisions = contract.modified_provisions.get_or_insert_default();
    for key in keys {
        *provisions.slot_mut(key) = Some(true);
    }
    contract.legacy_items_being_amended.clear();
    mark_upgraded(&mut document, FROM_VERSION);
    Ok(document)
}

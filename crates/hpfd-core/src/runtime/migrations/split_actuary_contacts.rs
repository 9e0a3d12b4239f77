// crates/hpfd-core/src/runtime/migrations/split_actuary_contacts.rs
// ============================================================================
// Module: Migration 0002 Split Actuary Contacts
// Description: Splits per-rate actuary lists into certifying and additional.
// Purpose: Upgrade protoVersion 2 documents to protoVersion 3.
// Dependencies: crate::{core, wire}
// ============================================================================

//! ## Overview
//! Before version 3 every rate carried its own list of actuary contacts and
//! its own communication preference. From version 3 on, each rate names a
//! single certifying actuary while additional actuaries and the preference
//! live once at document level.
//!
//! The guard is structural: a document with no legacy actuary data on any
//! rate is already in the new shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::mem;

use crate::core::error::MigrationError;
use crate::runtime::migrations::mark_upgraded;
use crate::wire::WireActuaryContact;
use crate::wire::WireActuaryContactList;
use crate::wire::WireDocument;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registry name.
pub const NAME: &str = "0002_split_actuary_contacts";
/// Schema generation this migration upgrades from.
pub const FROM_VERSION: u32 = 2;

// ============================================================================
// SECTION: Migration
// ============================================================================

/// Moves legacy per-rate actuary data into the version 3 layout.
///
/// For each rate the first legacy contact becomes the certifying contact and
/// the rest are appended, in rate order, to the document-level additional
/// contacts. The first legacy preference found becomes the document-level
/// preference; later per-rate preferences are dropped.
///
/// # Errors
///
/// Returns [`MigrationError`] when a rate has a communication preference but
/// no actuary contacts to attach it to.
pub fn migrate(mut document: WireDocument) -> Result<WireDocument, MigrationError> {
    if !document.rate_infos.iter().any(|rate| rate.has_legacy_actuary_data()) {
        mark_upgraded(&mut document, FROM_VERSION);
        return Ok(document);
    }

    let mut additional: Vec<WireActuaryContact> = document
        .addtl_actuary_contacts
        .take()
        .map(|list| list.contacts)
        .unwrap_or_default();
    let mut preference = None;

    for (index, rate) in document.rate_infos.iter_mut().enumerate() {
        if !rate.has_legacy_actuary_data() {
            continue;
        }
        let contacts = mem::take(&mut rate.legacy_actuary_contacts);
        let rate_preference = mem::take(&mut rate.legacy_actuary_communication_preference);
        if contacts.is_empty() {
            return Err(MigrationError::new(format!(
                "rate_infos[{index}] has actuary communication preference {rate_preference} but \
                 no actuary contacts"
            )));
        }
        let mut contacts = contacts.into_iter();
        rate.certifying_actuary_contact = contacts.next();
        additional.extend(contacts);
        if preference.is_none() && rate_preference != 0 {
            preference = Some(rate_preference);
        }
    }

    document.addtl_actuary_contacts = Some(WireActuaryContactList {
        contacts: additional,
    });
    if let Some(preference) = preference
        && document.addtl_actuary_communication_preference == 0
    {
        document.addtl_actuary_communication_preference = preference;
    }
    mark_upgraded(&mut document, FROM_VERSION);
    Ok(document)
}

// crates/hpfd-cli/src/lib.rs
// ============================================================================
// Module: Health Plan Form Data CLI Library
// Description: Shared helpers for the `hpfd` binary.
// Purpose: Expose the message catalog to the binary and its tests.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! The `hpfd` binary routes every user-facing string through [`i18n`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;

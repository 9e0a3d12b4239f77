// crates/hpfd-config/src/lib.rs
// ============================================================================
// Module: Health Plan Form Data Config Library
// Description: Configuration model and validation for offline tooling.
// Purpose: Single source of truth for hpfd.toml semantics.
// Dependencies: hpfd-core, serde, toml
// ============================================================================

//! ## Overview
//! `hpfd-config` defines the configuration read by the corpus migrator and
//! the fixture harness. Every field has a default, so an empty file (or no
//! file at the default location) yields a valid configuration.
//!
//! Security posture: config inputs are untrusted; size, path, and range
//! limits are enforced before any value is used.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;

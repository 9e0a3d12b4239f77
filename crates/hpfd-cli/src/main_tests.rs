// crates/hpfd-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument resolution helpers.
// Purpose: Ensure dates and locales fail closed on bad input.
// Dependencies: hpfd-cli main helpers
// ============================================================================

//! ## Overview
//! Validates `resolve_date` and `resolve_locale` precedence and errors.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::macros::date;

use super::LangArg;
use super::Locale;
use super::resolve_date;
use super::resolve_locale;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn resolve_date_parses_iso_dates() {
    assert_eq!(resolve_date(Some("2024-02-29")).unwrap(), date!(2024 - 02 - 29));
}

#[test]
fn resolve_date_rejects_other_formats() {
    for value in ["2024/02/29", "2023-02-29", "29-02-2024", ""] {
        let err = resolve_date(Some(value)).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"), "{value}");
    }
}

#[test]
fn resolve_locale_prefers_flag_over_env() {
    assert_eq!(resolve_locale(Some(LangArg::En), Some("es")).unwrap(), Locale::En);
    assert_eq!(resolve_locale(None, Some("es-MX")).unwrap(), Locale::Es);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn resolve_locale_rejects_unknown_env_values() {
    let err = resolve_locale(None, Some("xx")).unwrap_err();
    assert!(err.to_string().contains("HPFD_LANG"));
}

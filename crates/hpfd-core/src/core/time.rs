// crates/hpfd-core/src/core/time.rs
// ============================================================================
// Module: Form Data Time Model
// Description: Calendar-day and instant values plus their wire conversions.
// Purpose: Keep stored dates independent of any runtime date representation.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Two kinds of time appear in a form data document:
//!
//! - calendar days (contract and rate dates), stored as year/month/day triples
//!   and compared at day granularity with UTC as the reference zone;
//! - instants (`updated_at`, `submitted_at`), stored as UTC
//!   year/month/day/hour/minute/second and localized only at presentation time.
//!
//! The engine never reads the wall clock. Callers supply every value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde::Serializer;
use time::Date;
use time::Month;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::Time;
use time::UtcOffset;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::wire::WireDate;
use crate::wire::WireDateTime;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// `YYYY-MM-DD` calendar day, as used in fixture file names and CLI dates.
pub const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Instants
// ============================================================================

/// A UTC instant with whole-second precision.
///
/// # Invariants
/// - Always normalized to UTC.
/// - Sub-second components are always zero, matching the wire precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcInstant(OffsetDateTime);

impl UtcInstant {
    /// Creates an instant from unix epoch seconds.
    ///
    /// # Errors
    ///
    /// Returns a description when the value is outside the supported range.
    pub fn from_unix_seconds(seconds: i64) -> Result<Self, String> {
        OffsetDateTime::from_unix_timestamp(seconds).map(Self).map_err(|err| err.to_string())
    }

    /// Creates an instant from any offset date-time, truncating to seconds.
    #[must_use]
    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        let utc = value.to_offset(UtcOffset::UTC);
        // An in-range instant always survives truncation to its own second.
        OffsetDateTime::from_unix_timestamp(utc.unix_timestamp()).map_or(Self(utc), Self)
    }

    /// Returns the underlying UTC date-time.
    #[must_use]
    pub const fn as_offset_datetime(&self) -> OffsetDateTime {
        self.0
    }

    /// Returns unix epoch seconds.
    #[must_use]
    pub const fn unix_seconds(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Returns the calendar day of the instant in UTC.
    #[must_use]
    pub const fn utc_date(&self) -> Date {
        self.0.date()
    }
}

impl Serialize for UtcInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

// ============================================================================
// SECTION: Wire Conversions
// ============================================================================

/// Converts a wire date triple into a calendar day.
///
/// # Errors
///
/// Returns a description when the triple is not a real calendar date.
pub fn date_from_wire(value: &WireDate) -> Result<Date, String> {
    let month = u8::try_from(value.month)
        .ok()
        .and_then(|raw| Month::try_from(raw).ok())
        .ok_or_else(|| format!("invalid month {}", value.month))?;
    let day = u8::try_from(value.day).map_err(|_| format!("invalid day {}", value.day))?;
    Date::from_calendar_date(value.year, month, day).map_err(|err| {
        format!("invalid date {}-{}-{}: {err}", value.year, value.month, value.day)
    })
}

/// Converts a calendar day into its wire triple.
#[must_use]
pub fn date_to_wire(value: Date) -> WireDate {
    WireDate {
        year: value.year(),
        month: u32::from(u8::from(value.month())),
        day: u32::from(value.day()),
    }
}

/// Converts a wire date-time into a UTC instant.
///
/// # Errors
///
/// Returns a description when any component is out of range.
pub fn instant_from_wire(value: &WireDateTime) -> Result<UtcInstant, String> {
    let date = date_from_wire(&WireDate {
        year: value.year,
        month: value.month,
        day: value.day,
    })?;
    let component = |label: &str, raw: u32| {
        u8::try_from(raw).map_err(|_| format!("invalid {label} {raw}"))
    };
    let time = Time::from_hms(
        component("hour", value.hour)?,
        component("minute", value.minute)?,
        component("second", value.second)?,
    )
    .map_err(|err| err.to_string())?;
    Ok(UtcInstant(PrimitiveDateTime::new(date, time).assume_utc()))
}

/// Converts a UTC instant into its wire date-time.
#[must_use]
pub fn instant_to_wire(value: UtcInstant) -> WireDateTime {
    let inner = value.0;
    WireDateTime {
        year: inner.year(),
        month: u32::from(u8::from(inner.month())),
        day: u32::from(inner.day()),
        hour: u32::from(inner.hour()),
        minute: u32::from(inner.minute()),
        second: u32::from(inner.second()),
    }
}

// ============================================================================
// SECTION: Calendar Helpers
// ============================================================================

/// Returns the same day one calendar month later.
///
/// December rolls into January of the next year; days past the end of the
/// target month clamp to its last day.
///
/// # Errors
///
/// Returns a description when the result falls outside the supported range.
pub fn add_one_calendar_month(value: Date) -> Result<Date, String> {
    let (year, month) = if value.month() == Month::December {
        let year = value.year().checked_add(1).ok_or_else(|| "year overflow".to_string())?;
        (year, Month::January)
    } else {
        (value.year(), value.month().next())
    };
    let mut day = value.day();
    loop {
        match Date::from_calendar_date(year, month, day) {
            Ok(shifted) => return Ok(shifted),
            Err(_) if day > 28 => day -= 1,
            Err(err) => return Err(err.to_string()),
        }
    }
}

/// Formats a calendar day as `YYYYMMDD` for generated display names.
#[must_use]
pub fn compact_date(value: Date) -> String {
    format!("{:04}{:02}{:02}", value.year(), u8::from(value.month()), value.day())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

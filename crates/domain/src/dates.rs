// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! ISO-8601 date parsing and formatting.
//!
//! Cycle dates cross the system boundary as ISO-8601 calendar-date
//! strings (`YYYY-MM-DD`). All conversions go through this module so
//! the representation cannot drift between the draft store, the
//! submission payload, and the API layer.

use crate::error::DomainError;
use time::Date;
use time::format_description::well_known::Iso8601;

/// Parses an ISO-8601 calendar date string into a [`Date`].
///
/// # Arguments
///
/// * `date_string` - The date string to parse (e.g., `"2026-03-01"`)
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// ISO-8601 date.
pub fn parse_iso_date(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(date_string, &Iso8601::DATE).map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

/// Formats a [`Date`] as an ISO-8601 calendar date string.
///
/// # Errors
///
/// Returns `DomainError::DateFormatError` if formatting fails.
pub fn format_iso_date(date: Date) -> Result<String, DomainError> {
    date.format(&Iso8601::DATE)
        .map_err(|e| DomainError::DateFormatError {
            error: e.to_string(),
        })
}

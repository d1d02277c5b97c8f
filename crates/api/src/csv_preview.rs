// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview and validation for bulk participant import.
//!
//! This module parses and validates a participant CSV without mutating
//! any wizard session. The checked add-participant operation remains
//! the only path into a roster; the preview tells the user which rows
//! would survive it.

use csv::StringRecord;
use eval_cycle_domain::{EvaluatorRole, ParticipantRoster};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// CSV preview errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvPreviewError {
    /// The CSV is structurally unusable (bad headers, unreadable).
    #[error("Invalid CSV format: {reason}")]
    InvalidFormat {
        /// What made the CSV unusable.
        reason: String,
    },
}

/// Status of a CSV row validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvRowStatus {
    /// Row is valid and can be imported.
    Valid,
    /// Row has validation errors and cannot be imported.
    Invalid,
}

/// A single row result from CSV preview validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The parsed employee ID (if valid).
    pub employee_id: Option<i64>,
    /// The parsed name (if valid).
    pub name: Option<String>,
    /// The parsed role (if valid).
    pub role: Option<String>,
    /// The row status.
    pub status: CsvRowStatus,
    /// Zero or more validation errors.
    pub errors: Vec<String>,
}

/// Result of CSV preview validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPreviewResult {
    /// Per-row validation results.
    pub rows: Vec<CsvRowResult>,
    /// Total number of rows.
    pub total_rows: usize,
    /// Number of valid rows.
    pub valid_count: usize,
    /// Number of invalid rows.
    pub invalid_count: usize,
}

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["employee_id", "name", "role"];

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, CsvPreviewError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), idx);
    }

    let mut missing: Vec<String> = Vec::new();
    for required in REQUIRED_HEADERS {
        if !header_map.contains_key(*required) {
            missing.push(String::from(*required));
        }
    }

    if !missing.is_empty() {
        return Err(CsvPreviewError::InvalidFormat {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Validates one CSV record, tracking duplicates across the file and
/// against the existing roster.
fn validate_record(
    record: &StringRecord,
    row_number: usize,
    header_map: &HashMap<String, usize>,
    existing: &ParticipantRoster,
    seen_ids: &mut HashSet<i64>,
) -> CsvRowResult {
    let mut errors: Vec<String> = Vec::new();

    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    };

    let employee_id: Option<i64> = match get_field("employee_id") {
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(format!("employee_id: '{raw}' is not a valid identifier"));
                None
            }
        },
        None => {
            errors.push(String::from(
                "employee_id: required field is missing or empty",
            ));
            None
        }
    };

    let name: Option<String> = get_field("name");
    if name.is_none() {
        errors.push(String::from("name: required field is missing or empty"));
    }

    let role: Option<String> = match get_field("role") {
        Some(raw) => match EvaluatorRole::parse(&raw) {
            Ok(parsed) => Some(parsed.as_str().to_string()),
            Err(_) => {
                errors.push(format!(
                    "role: '{raw}' is not one of self, peer, subordinate, manager"
                ));
                None
            }
        },
        None => {
            errors.push(String::from("role: required field is missing or empty"));
            None
        }
    };

    if let Some(id) = employee_id {
        if existing
            .participants()
            .iter()
            .any(|participant| participant.employee_id == id)
        {
            errors.push(format!("employee_id: employee {id} is already on the roster"));
        } else if !seen_ids.insert(id) {
            errors.push(format!(
                "employee_id: employee {id} appears more than once in the file"
            ));
        }
    }

    let status: CsvRowStatus = if errors.is_empty() {
        CsvRowStatus::Valid
    } else {
        CsvRowStatus::Invalid
    };

    CsvRowResult {
        row_number,
        employee_id,
        name,
        role,
        status,
        errors,
    }
}

/// Previews a participant CSV against an existing roster.
///
/// Nothing is imported: the caller decides what to do with the valid
/// rows, and each one still goes through the checked add operation.
///
/// # Arguments
///
/// * `csv_text` - The raw CSV content (header row required)
/// * `existing` - The roster the rows would be added to
///
/// # Errors
///
/// Returns an error if the CSV has no usable header row.
pub fn preview_participants_csv(
    csv_text: &str,
    existing: &ParticipantRoster,
) -> Result<CsvPreviewResult, CsvPreviewError> {
    let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| CsvPreviewError::InvalidFormat {
            reason: e.to_string(),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut rows: Vec<CsvRowResult> = Vec::new();
    let mut seen_ids: HashSet<i64> = HashSet::new();

    for (index, record) in reader.records().enumerate() {
        let row_number: usize = index + 1;
        match record {
            Ok(record) => rows.push(validate_record(
                &record,
                row_number,
                &header_map,
                existing,
                &mut seen_ids,
            )),
            Err(e) => rows.push(CsvRowResult {
                row_number,
                employee_id: None,
                name: None,
                role: None,
                status: CsvRowStatus::Invalid,
                errors: vec![format!("Unreadable row: {e}")],
            }),
        }
    }

    let valid_count: usize = rows
        .iter()
        .filter(|row| row.status == CsvRowStatus::Valid)
        .count();
    let total_rows: usize = rows.len();

    Ok(CsvPreviewResult {
        total_rows,
        valid_count,
        invalid_count: total_rows - valid_count,
        rows,
    })
}

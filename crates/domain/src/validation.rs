// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Step-gate validation rules for the cycle-creation wizard.
//!
//! Each function is the pure gate for one wizard step. Gates have no
//! side effects and report the first violated rule.

use crate::error::DomainError;
use crate::types::{CompetencySelection, CycleDetails, ParticipantRoster, ReviewWeights};
use time::Date;

/// Validates the cycle details slice (step-1 gate).
///
/// # Arguments
///
/// * `details` - The cycle details to validate
///
/// # Returns
///
/// * `Ok(())` if the details pass the gate
/// * `Err(DomainError)` describing the first violated rule
///
/// # Errors
///
/// Returns an error if:
/// - The name or description is empty
/// - The start or end date is missing
/// - The end date is not strictly after the start date
/// - An evaluation deadline is set but not strictly after the end date
pub fn validate_cycle_details(details: &CycleDetails) -> Result<(), DomainError> {
    if details.name.trim().is_empty() {
        return Err(DomainError::MissingCycleName);
    }

    if details.description.trim().is_empty() {
        return Err(DomainError::MissingCycleDescription);
    }

    let start_date: Date = details.start_date.ok_or(DomainError::MissingStartDate)?;
    let end_date: Date = details.end_date.ok_or(DomainError::MissingEndDate)?;

    // Rule: the evaluated period must have positive length
    if end_date <= start_date {
        return Err(DomainError::EndDateNotAfterStart {
            start_date,
            end_date,
        });
    }

    // The deadline stays optional at this gate; submission requires it.
    if let Some(evaluation_deadline) = details.evaluation_deadline
        && evaluation_deadline <= end_date
    {
        return Err(DomainError::DeadlineNotAfterEnd {
            end_date,
            evaluation_deadline,
        });
    }

    Ok(())
}

/// Validates the review weights slice (step-2 gate).
///
/// The check uses exact integer equality: no epsilon tolerance and no
/// rounding.
///
/// # Errors
///
/// Returns `DomainError::WeightSumMismatch` with the current total if
/// the four weights do not sum to exactly 100.
pub fn validate_review_weights(weights: &ReviewWeights) -> Result<(), DomainError> {
    let total: u16 = weights.total();
    if total != 100 {
        return Err(DomainError::WeightSumMismatch { total });
    }
    Ok(())
}

/// Validates the competency selection slice (step-3 gate).
///
/// # Errors
///
/// Returns `DomainError::NoCompetenciesSelected` if the selection is
/// empty.
pub fn validate_competency_selection(selection: &CompetencySelection) -> Result<(), DomainError> {
    if selection.is_empty() {
        return Err(DomainError::NoCompetenciesSelected);
    }
    Ok(())
}

/// Validates the participant roster slice (step-4 gate).
///
/// Duplicate employee IDs are prevented at the add operation, not here;
/// this gate only checks that the roster is non-empty and includes a
/// self-evaluator.
///
/// # Errors
///
/// Returns an error if:
/// - The roster is empty
/// - No participant has the self role
pub fn validate_participant_roster(roster: &ParticipantRoster) -> Result<(), DomainError> {
    if roster.is_empty() {
        return Err(DomainError::NoParticipants);
    }

    if !roster.has_self_evaluator() {
        return Err(DomainError::MissingSelfEvaluator);
    }

    Ok(())
}

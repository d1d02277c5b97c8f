// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission payload assembly.
//!
//! Assembly is the last local gate before the create-cycle collaborator
//! is called: every step gate is re-run here, so a session corrupted
//! through unchecked jump navigation cannot reach the remote operation.

use crate::error::CoreError;
use crate::session::WizardSession;
use eval_cycle_domain::{
    DomainError, format_iso_date, validate_competency_selection, validate_cycle_details,
    validate_participant_roster, validate_review_weights,
};
use serde::{Deserialize, Serialize};
use time::Date;

/// A participant entry in the create-cycle payload.
///
/// The remote operation identifies participants by employee ID and
/// role only; display names stay client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadParticipant {
    /// The employee identifier.
    pub employee_id: i64,
    /// The evaluator role wire string.
    pub role: String,
}

/// The aggregate input of the create-cycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCyclePayload {
    /// The cycle name.
    pub name: String,
    /// The cycle description.
    pub description: String,
    /// The calendar year.
    pub year: u16,
    /// The cycle cadence wire string.
    #[serde(rename = "type")]
    pub cycle_type: String,
    /// The start date as an ISO-8601 string.
    pub start_date: String,
    /// The end date as an ISO-8601 string.
    pub end_date: String,
    /// The evaluation deadline as an ISO-8601 string.
    pub evaluation_deadline: String,
    /// Weight of the self-evaluation.
    pub self_weight: u8,
    /// Weight of peer evaluations.
    pub peer_weight: u8,
    /// Weight of subordinate evaluations.
    pub subordinate_weight: u8,
    /// Weight of the manager evaluation.
    pub manager_weight: u8,
    /// The selected competency identifiers.
    pub competency_ids: Vec<i64>,
    /// The participant roster.
    pub participants: Vec<PayloadParticipant>,
}

/// Assembles the create-cycle payload from a session.
///
/// All four step gates are re-run, and the evaluation deadline, which
/// the step-1 gate treats as optional, becomes mandatory here. On any
/// failure the collaborator must not be called.
///
/// # Errors
///
/// Returns an error if any step gate fails, if the evaluation deadline
/// is absent, or if a date cannot be formatted.
pub fn assemble_submission(session: &WizardSession) -> Result<CreateCyclePayload, CoreError> {
    validate_cycle_details(&session.cycle).map_err(CoreError::DomainViolation)?;
    validate_review_weights(&session.weights).map_err(CoreError::DomainViolation)?;
    validate_competency_selection(&session.competencies).map_err(CoreError::DomainViolation)?;
    validate_participant_roster(&session.participants).map_err(CoreError::DomainViolation)?;

    // The step-1 gate guarantees both dates are present.
    let start_date: Date = session
        .cycle
        .start_date
        .ok_or(CoreError::DomainViolation(DomainError::MissingStartDate))?;
    let end_date: Date = session
        .cycle
        .end_date
        .ok_or(CoreError::DomainViolation(DomainError::MissingEndDate))?;
    let evaluation_deadline: Date = session.cycle.evaluation_deadline.ok_or(
        CoreError::DomainViolation(DomainError::MissingEvaluationDeadline),
    )?;

    let participants: Vec<PayloadParticipant> = session
        .participants
        .participants()
        .iter()
        .map(|participant| PayloadParticipant {
            employee_id: participant.employee_id,
            role: participant.role.as_str().to_string(),
        })
        .collect();

    Ok(CreateCyclePayload {
        name: session.cycle.name.clone(),
        description: session.cycle.description.clone(),
        year: session.cycle.year,
        cycle_type: session.cycle.cycle_type.as_str().to_string(),
        start_date: format_iso_date(start_date).map_err(CoreError::DomainViolation)?,
        end_date: format_iso_date(end_date).map_err(CoreError::DomainViolation)?,
        evaluation_deadline: format_iso_date(evaluation_deadline)
            .map_err(CoreError::DomainViolation)?,
        self_weight: session.weights.self_weight,
        peer_weight: session.weights.peer_weight,
        subordinate_weight: session.weights.subordinate_weight,
        manager_weight: session.weights.manager_weight,
        competency_ids: session.competencies.ids().to_vec(),
        participants,
    })
}

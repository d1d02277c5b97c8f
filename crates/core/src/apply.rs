// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::session::{TransitionResult, WizardSession, WizardStep};
use eval_cycle_domain::{
    CompetencySelection, DomainError, ParticipantRoster, validate_competency_selection,
    validate_cycle_details, validate_participant_roster, validate_review_weights,
};

/// Runs the gate for the session's current step.
///
/// The review step has no gate of its own; submission runs its own
/// checks.
fn validate_current_step(session: &WizardSession) -> Result<(), DomainError> {
    match session.current_step {
        WizardStep::CycleDetails => validate_cycle_details(&session.cycle),
        WizardStep::Weights => validate_review_weights(&session.weights),
        WizardStep::Competencies => validate_competency_selection(&session.competencies),
        WizardStep::Participants => validate_participant_roster(&session.participants),
        WizardStep::Review => Ok(()),
    }
}

/// Applies a command to the current session, producing a new session.
///
/// The input session is never mutated; a failed command leaves no trace.
///
/// # Arguments
///
/// * `session` - The current session (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new session and whether the
///   caller should persist a draft snapshot
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - `Advance` is applied while the current step's gate fails
/// - `JumpToStep` targets a step outside 1..=4
/// - `AddParticipant` duplicates an employee ID already on the roster
pub fn apply(session: &WizardSession, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::Advance => {
            validate_current_step(session).map_err(CoreError::DomainViolation)?;

            if session.current_step.is_review() {
                // Clamped: already on the last step, nothing changes.
                return Ok(TransitionResult {
                    new_session: session.clone(),
                    autosave: false,
                });
            }

            let mut new_session: WizardSession = session.clone();
            new_session.current_step = session.current_step.next();
            // The very first advance of a fresh session skips the
            // autosave; every later step change captures a draft.
            let autosave: bool = session.autosave_primed;
            new_session.autosave_primed = true;

            Ok(TransitionResult {
                new_session,
                autosave,
            })
        }
        Command::Retreat => {
            let mut new_session: WizardSession = session.clone();
            new_session.current_step = session.current_step.previous();

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
        Command::JumpToStep { target } => {
            let target_step: WizardStep = match WizardStep::from_number(target) {
                Ok(step) if !step.is_review() => step,
                _ => return Err(CoreError::InvalidJumpTarget(target)),
            };

            let mut new_session: WizardSession = session.clone();
            new_session.current_step = target_step;

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
        Command::ApplyTemplate { template } => {
            // Destructive and total: no merge with the previous slices,
            // and no validation of the template's contents.
            let mut new_session: WizardSession = session.clone();
            new_session.weights = template.weights();
            new_session.competencies = CompetencySelection::from_ids(template.competency_ids);

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
        Command::ReplaceCycleDetails { details } => {
            let mut new_session: WizardSession = session.clone();
            new_session.cycle = details;

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
        Command::ReplaceWeights { weights } => {
            let mut new_session: WizardSession = session.clone();
            new_session.weights = weights;

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
        Command::ReplaceCompetencies { selection } => {
            let mut new_session: WizardSession = session.clone();
            new_session.competencies = selection;

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
        Command::ReplaceParticipants { roster } => {
            let mut new_session: WizardSession = session.clone();
            new_session.participants = roster;

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
        Command::AddParticipant { participant } => {
            let mut new_roster: ParticipantRoster = session.participants.clone();
            new_roster
                .add(participant)
                .map_err(CoreError::DomainViolation)?;

            let mut new_session: WizardSession = session.clone();
            new_session.participants = new_roster;

            Ok(TransitionResult {
                new_session,
                autosave: false,
            })
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The wizard controller.
//!
//! The controller owns one wizard session and drives the state machine
//! against its collaborators: a single-slot draft store, the
//! create-cycle operation, and the user notifier. Collaborator
//! failures follow the error taxonomy: validation errors stay local,
//! draft-store errors are swallowed, and submission errors pass the
//! collaborator's message through verbatim with all state preserved.

use crate::error::{ApiError, translate_core_error};
use crate::request_response::{
    CycleDetailsView, ParticipantView, SessionView, SubmitResponse, WeightsRequest,
};
use eval_cycle::{
    Command, CreateCyclePayload, DraftSnapshot, TransitionResult, WizardSession, apply,
    assemble_submission, restore_session, snapshot_session,
};
use eval_cycle_domain::{
    Competency, CompetencySelection, CycleDetails, EvaluationTemplate, Participant,
    ParticipantRoster, ReviewWeights,
};
use eval_cycle_notify::{Notification, Notifier};
use eval_cycle_persistence::PersistenceError;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::{debug, warn};

/// The single-slot draft persistence collaborator.
///
/// `save` is idempotent and always overwrites the prior snapshot; the
/// store holds at most one snapshot per wizard kind.
pub trait DraftStore: Send {
    /// Loads the stored snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load(&mut self) -> Result<Option<DraftSnapshot>, PersistenceError>;

    /// Overwrites the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save(&mut self, snapshot: &DraftSnapshot) -> Result<(), PersistenceError>;

    /// Deletes the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// The outcome of a successful create-cycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCycle {
    /// The identifier assigned to the created cycle.
    pub cycle_id: i64,
}

/// A structured failure from the create-cycle operation.
///
/// The `message` field is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCycleError {
    /// The human-readable failure message.
    pub message: String,
}

impl std::fmt::Display for CreateCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CreateCycleError {}

/// The remote create-cycle collaborator.
pub trait CycleCreator: Send {
    /// Creates a cycle from the assembled payload.
    ///
    /// # Errors
    ///
    /// Returns a structured error with a human-readable message.
    fn create_cycle(
        &mut self,
        payload: &CreateCyclePayload,
    ) -> Result<CreatedCycle, CreateCycleError>;
}

/// The user's answer to the draft recovery prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftDecision {
    /// Continue from the saved draft.
    Restore,
    /// Delete the saved draft and start fresh.
    Discard,
}

/// Summary of a detected draft, shown in the recovery prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftNotice {
    /// The 1-based step the draft was on.
    pub step: u8,
    /// When the draft was saved (ISO-8601).
    pub saved_at: String,
}

/// Returns the current UTC timestamp as an ISO-8601 string.
fn current_timestamp() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Drives one wizard session against its collaborators.
pub struct WizardController {
    session: WizardSession,
    draft_store: Box<dyn DraftStore>,
    cycle_creator: Box<dyn CycleCreator>,
    notifier: Arc<dyn Notifier + Sync>,
    catalog: Vec<Competency>,
    pending_draft: Option<DraftSnapshot>,
    submission_pending: bool,
    submitted: bool,
}

impl WizardController {
    /// Mounts a new wizard session.
    ///
    /// The draft store is read exactly once, here. A found draft is
    /// held back for the restore/discard decision; the wizard never
    /// auto-restores silently. A failed load is treated as "no draft"
    /// (draft-store errors are non-fatal).
    pub fn mount(
        draft_store: Box<dyn DraftStore>,
        cycle_creator: Box<dyn CycleCreator>,
        notifier: Arc<dyn Notifier + Sync>,
        catalog: Vec<Competency>,
    ) -> Self {
        let mut draft_store: Box<dyn DraftStore> = draft_store;
        let pending_draft: Option<DraftSnapshot> = match draft_store.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "Failed to load wizard draft; starting fresh");
                None
            }
        };

        if let Some(snapshot) = &pending_draft {
            debug!(
                step = snapshot.step,
                saved_at = %snapshot.saved_at,
                "Found saved wizard draft"
            );
        }

        Self {
            session: WizardSession::new(),
            draft_store,
            cycle_creator,
            notifier,
            catalog,
            pending_draft,
            submission_pending: false,
            submitted: false,
        }
    }

    /// Returns the recovery prompt data while a draft decision is
    /// pending.
    #[must_use]
    pub fn draft_notice(&self) -> Option<DraftNotice> {
        self.pending_draft.as_ref().map(|snapshot| DraftNotice {
            step: snapshot.step,
            saved_at: snapshot.saved_at.clone(),
        })
    }

    /// Resolves the draft recovery prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if no draft awaits a decision, or if a restore
    /// was requested and the stored snapshot cannot be rebuilt into a
    /// session.
    pub fn resolve_draft(&mut self, decision: DraftDecision) -> Result<(), ApiError> {
        let Some(snapshot) = self.pending_draft.take() else {
            return Err(ApiError::InvalidInput {
                field: String::from("draft"),
                message: String::from("No draft is awaiting a decision"),
            });
        };

        match decision {
            DraftDecision::Restore => match restore_session(&snapshot) {
                Ok(session) => {
                    let step: u8 = session.current_step.number();
                    self.session = session;
                    self.notifier.notify(Notification::info(format!(
                        "Draft restored, resuming at step {step}"
                    )));
                    Ok(())
                }
                Err(err) => {
                    self.notifier.notify(Notification::warning(String::from(
                        "The saved draft could not be restored",
                    )));
                    Err(translate_core_error(err))
                }
            },
            DraftDecision::Discard => {
                if let Err(err) = self.draft_store.clear() {
                    // Non-fatal: the slot will be overwritten by the
                    // next autosave anyway.
                    warn!(error = %err, "Failed to clear discarded draft");
                }
                self.notifier
                    .notify(Notification::info(String::from("Draft discarded")));
                Ok(())
            }
        }
    }

    /// Rejects wizard operations while the recovery prompt is open.
    fn ensure_draft_resolved(&self) -> Result<(), ApiError> {
        if self.pending_draft.is_some() {
            return Err(ApiError::DraftDecisionPending);
        }
        Ok(())
    }

    /// Applies a command and runs the autosave side effect when asked.
    fn run(&mut self, command: Command) -> Result<(), ApiError> {
        self.ensure_draft_resolved()?;

        let transition: TransitionResult =
            apply(&self.session, command).map_err(|err| {
                let translated: ApiError = translate_core_error(err);
                self.notifier
                    .notify(Notification::warning(translated.to_string()));
                translated
            })?;

        self.session = transition.new_session;

        if transition.autosave {
            self.autosave();
        }

        Ok(())
    }

    /// Saves a draft snapshot, fire-and-forget.
    ///
    /// A failure never blocks navigation; it only suppresses the
    /// success notification.
    fn autosave(&mut self) {
        let saved_at: String = match current_timestamp() {
            Ok(timestamp) => timestamp,
            Err(err) => {
                warn!(error = %err, "Skipping draft autosave");
                return;
            }
        };

        match snapshot_session(&self.session, &self.catalog, saved_at) {
            Ok(snapshot) => match self.draft_store.save(&snapshot) {
                Ok(()) => {
                    self.notifier
                        .notify(Notification::success(String::from("Draft saved")));
                }
                Err(err) => {
                    warn!(error = %err, "Failed to autosave wizard draft");
                }
            },
            Err(err) => {
                warn!(error = %err, "Failed to snapshot wizard session");
            }
        }
    }

    /// Advances to the next step if the current step's gate passes.
    ///
    /// # Errors
    ///
    /// Returns the gate's validation error; the session is unchanged.
    pub fn advance(&mut self) -> Result<(), ApiError> {
        self.run(Command::Advance)
    }

    /// Moves to the previous step. Never validates, never autosaves.
    ///
    /// # Errors
    ///
    /// Returns an error only while the draft decision is pending.
    pub fn retreat(&mut self) -> Result<(), ApiError> {
        self.run(Command::Retreat)
    }

    /// Jumps directly to an earlier step from the review screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is outside steps 1 through 4.
    pub fn jump_to_step(&mut self, target: u8) -> Result<(), ApiError> {
        self.run(Command::JumpToStep { target })
    }

    /// Applies a template, replacing weights and competencies wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error only while the draft decision is pending.
    pub fn apply_template(&mut self, template: EvaluationTemplate) -> Result<(), ApiError> {
        let name: String = template.name.clone();
        self.run(Command::ApplyTemplate { template })?;
        self.notifier
            .notify(Notification::info(format!("Template '{name}' applied")));
        Ok(())
    }

    /// Replaces the cycle-details slice.
    ///
    /// # Errors
    ///
    /// Returns an error only while the draft decision is pending.
    pub fn replace_cycle_details(&mut self, details: CycleDetails) -> Result<(), ApiError> {
        self.run(Command::ReplaceCycleDetails { details })
    }

    /// Replaces the weights slice.
    ///
    /// # Errors
    ///
    /// Returns an error only while the draft decision is pending.
    pub fn replace_weights(&mut self, weights: ReviewWeights) -> Result<(), ApiError> {
        self.run(Command::ReplaceWeights { weights })
    }

    /// Replaces the competency-selection slice.
    ///
    /// # Errors
    ///
    /// Returns an error only while the draft decision is pending.
    pub fn replace_competencies(&mut self, selection: CompetencySelection) -> Result<(), ApiError> {
        self.run(Command::ReplaceCompetencies { selection })
    }

    /// Replaces the participant-roster slice.
    ///
    /// # Errors
    ///
    /// Returns an error only while the draft decision is pending.
    pub fn replace_participants(&mut self, roster: ParticipantRoster) -> Result<(), ApiError> {
        self.run(Command::ReplaceParticipants { roster })
    }

    /// Adds one participant, rejecting duplicate employee IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is already on the roster.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), ApiError> {
        self.run(Command::AddParticipant { participant })
    }

    /// Submits the wizard: assembles the payload, calls the
    /// create-cycle collaborator, and clears the draft on success.
    ///
    /// At most one submission may be in flight per session. Local
    /// validation failures never reach the collaborator. A remote
    /// failure surfaces the collaborator's message verbatim and leaves
    /// all state intact for retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft decision is pending, a submission
    /// is already in flight or completed, local validation fails, or
    /// the collaborator reports a failure.
    pub fn submit(&mut self) -> Result<SubmitResponse, ApiError> {
        self.ensure_draft_resolved()?;

        if self.submission_pending {
            return Err(ApiError::SubmissionInFlight);
        }
        if self.submitted {
            return Err(ApiError::AlreadySubmitted);
        }

        let payload: CreateCyclePayload = assemble_submission(&self.session).map_err(|err| {
            let translated: ApiError = translate_core_error(err);
            self.notifier
                .notify(Notification::warning(translated.to_string()));
            translated
        })?;

        self.submission_pending = true;
        let outcome: Result<CreatedCycle, CreateCycleError> =
            self.cycle_creator.create_cycle(&payload);
        self.submission_pending = false;

        match outcome {
            Ok(created) => {
                if let Err(err) = self.draft_store.clear() {
                    // Non-fatal: a stale draft only re-triggers the
                    // recovery prompt on the next mount.
                    warn!(error = %err, "Failed to clear draft after submission");
                }
                self.submitted = true;

                let message: String =
                    format!("Evaluation cycle '{}' created successfully", payload.name);
                self.notifier.notify(Notification::success(message.clone()));

                Ok(SubmitResponse {
                    cycle_id: created.cycle_id,
                    message,
                })
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error(err.message.clone()));
                Err(ApiError::SubmissionFailed {
                    message: err.message,
                })
            }
        }
    }

    /// Returns the current session state.
    #[must_use]
    pub const fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Returns the competency catalog captured at mount.
    #[must_use]
    pub fn catalog(&self) -> &[Competency] {
        &self.catalog
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub const fn submission_pending(&self) -> bool {
        self.submission_pending
    }

    /// Whether the session already created its cycle.
    #[must_use]
    pub const fn submitted(&self) -> bool {
        self.submitted
    }

    /// Builds the caller-facing view of the session.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a date cannot be formatted.
    pub fn view(&self) -> Result<SessionView, ApiError> {
        let participants: Vec<ParticipantView> = self
            .session
            .participants
            .participants()
            .iter()
            .map(|participant| ParticipantView {
                employee_id: participant.employee_id,
                name: participant.name.clone(),
                role: participant.role.as_str().to_string(),
            })
            .collect();

        Ok(SessionView {
            current_step: self.session.current_step.number(),
            draft_decision_pending: self.pending_draft.is_some(),
            submission_pending: self.submission_pending,
            submitted: self.submitted,
            cycle: CycleDetailsView::from_details(&self.session.cycle)?,
            weights: WeightsRequest {
                self_weight: self.session.weights.self_weight,
                peer_weight: self.session.weights.peer_weight,
                subordinate_weight: self.session.weights.subordinate_weight,
                manager_weight: self.session.weights.manager_weight,
            },
            competency_ids: self.session.competencies.ids().to_vec(),
            participants,
        })
    }
}

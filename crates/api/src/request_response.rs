// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry wire strings (dates, enums) and are translated into
//! domain types here, so domain invariants never depend on serde.

use crate::error::{ApiError, translate_domain_error};
use eval_cycle_domain::{
    CycleDetails, CycleType, EvaluationTemplate, EvaluatorRole, Participant, ReviewWeights,
    format_iso_date, parse_iso_date,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Parses an optional wire date string.
fn parse_optional_date(field: &str, value: Option<&String>) -> Result<Option<Date>, ApiError> {
    value
        .map(|date_string| {
            parse_iso_date(date_string).map_err(|err| match translate_domain_error(err) {
                ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
                    field: field.to_string(),
                    message,
                },
                other => other,
            })
        })
        .transpose()
}

/// Formats an optional date for a response.
fn format_optional_date(value: Option<Date>) -> Result<Option<String>, ApiError> {
    value
        .map(|date| format_iso_date(date).map_err(translate_domain_error))
        .transpose()
}

/// API request to replace the cycle-details slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDetailsRequest {
    /// The cycle name.
    pub name: String,
    /// The cycle description.
    pub description: String,
    /// The calendar year.
    pub year: u16,
    /// The cycle cadence ("annual", "semiannual", "quarterly").
    pub cycle_type: String,
    /// The start date as an ISO-8601 string, if set.
    pub start_date: Option<String>,
    /// The end date as an ISO-8601 string, if set.
    pub end_date: Option<String>,
    /// The evaluation deadline as an ISO-8601 string, if set.
    pub evaluation_deadline: Option<String>,
}

impl CycleDetailsRequest {
    /// Translates the request into the domain slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the cycle type or any date string is
    /// malformed.
    pub fn into_details(self) -> Result<CycleDetails, ApiError> {
        let cycle_type: CycleType =
            CycleType::from_str(&self.cycle_type).map_err(translate_domain_error)?;

        Ok(CycleDetails {
            name: self.name,
            description: self.description,
            year: self.year,
            cycle_type,
            start_date: parse_optional_date("start_date", self.start_date.as_ref())?,
            end_date: parse_optional_date("end_date", self.end_date.as_ref())?,
            evaluation_deadline: parse_optional_date(
                "evaluation_deadline",
                self.evaluation_deadline.as_ref(),
            )?,
        })
    }
}

/// API request to replace the weights slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightsRequest {
    /// Weight of the self-evaluation.
    pub self_weight: u8,
    /// Weight of peer evaluations.
    pub peer_weight: u8,
    /// Weight of subordinate evaluations.
    pub subordinate_weight: u8,
    /// Weight of the manager evaluation.
    pub manager_weight: u8,
}

impl WeightsRequest {
    /// Translates the request into the domain slice.
    #[must_use]
    pub const fn into_weights(self) -> ReviewWeights {
        ReviewWeights::new(
            self.self_weight,
            self.peer_weight,
            self.subordinate_weight,
            self.manager_weight,
        )
    }
}

/// API request to replace the competency-selection slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencySelectionRequest {
    /// The selected competency identifiers.
    pub competency_ids: Vec<i64>,
}

/// A single participant in an API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRequest {
    /// The employee identifier.
    pub employee_id: i64,
    /// The employee display name.
    pub name: String,
    /// The evaluator role ("self", "peer", "subordinate", "manager").
    pub role: String,
}

impl ParticipantRequest {
    /// Translates the request into a domain participant.
    ///
    /// # Errors
    ///
    /// Returns an error if the role string is not recognized.
    pub fn into_participant(self) -> Result<Participant, ApiError> {
        let role: EvaluatorRole = EvaluatorRole::parse(&self.role).map_err(translate_domain_error)?;
        Ok(Participant::new(self.employee_id, self.name, role))
    }
}

/// API request to replace the participant-roster slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceParticipantsRequest {
    /// The new roster contents.
    pub participants: Vec<ParticipantRequest>,
}

/// API request to jump to an earlier step from the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpRequest {
    /// The target step (1 through 4).
    pub step: u8,
}

/// API request to create an evaluation template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    /// The template name.
    pub name: String,
    /// An optional description.
    pub description: Option<String>,
    /// Weight of the self-evaluation.
    pub self_weight: u8,
    /// Weight of peer evaluations.
    pub peer_weight: u8,
    /// Weight of subordinate evaluations.
    pub subordinate_weight: u8,
    /// Weight of the manager evaluation.
    pub manager_weight: u8,
    /// The competency identifiers the template selects.
    pub competency_ids: Vec<i64>,
    /// Whether the template is visible to all users.
    pub is_public: bool,
}

/// API response describing a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateResponse {
    /// The template identifier.
    pub template_id: i64,
    /// The template name.
    pub name: String,
    /// An optional description.
    pub description: Option<String>,
    /// Weight of the self-evaluation.
    pub self_weight: u8,
    /// Weight of peer evaluations.
    pub peer_weight: u8,
    /// Weight of subordinate evaluations.
    pub subordinate_weight: u8,
    /// Weight of the manager evaluation.
    pub manager_weight: u8,
    /// The competency identifiers the template selects.
    pub competency_ids: Vec<i64>,
    /// Whether the template is visible to all users.
    pub is_public: bool,
}

impl TemplateResponse {
    /// Builds a response from a persisted template.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the template has no identifier
    /// (i.e., was never persisted).
    pub fn from_template(template: EvaluationTemplate) -> Result<Self, ApiError> {
        let template_id: i64 = template.template_id().ok_or_else(|| ApiError::Internal {
            message: String::from("Template row is missing its identifier"),
        })?;

        Ok(Self {
            template_id,
            name: template.name,
            description: template.description,
            self_weight: template.self_weight,
            peer_weight: template.peer_weight,
            subordinate_weight: template.subordinate_weight,
            manager_weight: template.manager_weight,
            competency_ids: template.competency_ids,
            is_public: template.is_public,
        })
    }
}

/// API request to add a competency to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCompetencyRequest {
    /// The competency name.
    pub name: String,
    /// A description of the behavior being evaluated.
    pub description: String,
    /// The proficiency level expected of the evaluated employee.
    pub required_level: u8,
}

/// API response describing a catalog competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyResponse {
    /// The competency identifier.
    pub id: i64,
    /// The competency name.
    pub name: String,
    /// The competency description.
    pub description: String,
    /// The required proficiency level.
    pub required_level: u8,
}

/// API response summarizing a created cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleResponse {
    /// The cycle identifier.
    pub cycle_id: i64,
    /// The cycle name.
    pub name: String,
    /// The calendar year.
    pub year: u16,
    /// The cycle cadence wire string.
    pub cycle_type: String,
    /// The start date.
    pub start_date: String,
    /// The end date.
    pub end_date: String,
    /// The evaluation deadline.
    pub evaluation_deadline: String,
    /// When the cycle was created.
    pub created_at: String,
}

/// API response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// The identifier of the created cycle.
    pub cycle_id: i64,
    /// A success message.
    pub message: String,
}

/// The cycle-details slice as shown in a session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDetailsView {
    /// The cycle name.
    pub name: String,
    /// The cycle description.
    pub description: String,
    /// The calendar year.
    pub year: u16,
    /// The cycle cadence wire string.
    pub cycle_type: String,
    /// The start date, if set.
    pub start_date: Option<String>,
    /// The end date, if set.
    pub end_date: Option<String>,
    /// The evaluation deadline, if set.
    pub evaluation_deadline: Option<String>,
}

impl CycleDetailsView {
    /// Builds the view from the domain slice.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a date cannot be formatted.
    pub fn from_details(details: &CycleDetails) -> Result<Self, ApiError> {
        Ok(Self {
            name: details.name.clone(),
            description: details.description.clone(),
            year: details.year,
            cycle_type: details.cycle_type.as_str().to_string(),
            start_date: format_optional_date(details.start_date)?,
            end_date: format_optional_date(details.end_date)?,
            evaluation_deadline: format_optional_date(details.evaluation_deadline)?,
        })
    }
}

/// A participant as shown in a session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    /// The employee identifier.
    pub employee_id: i64,
    /// The employee display name.
    pub name: String,
    /// The evaluator role wire string.
    pub role: String,
}

/// The full state of a wizard session as shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// The 1-based current step.
    pub current_step: u8,
    /// Whether a recovered draft still awaits its decision.
    pub draft_decision_pending: bool,
    /// Whether a submission is in flight.
    pub submission_pending: bool,
    /// Whether the session already created its cycle.
    pub submitted: bool,
    /// The cycle-details slice.
    pub cycle: CycleDetailsView,
    /// The weights slice.
    pub weights: WeightsRequest,
    /// The selected competency identifiers.
    pub competency_ids: Vec<i64>,
    /// The participant roster.
    pub participants: Vec<ParticipantView>,
}

/// API response describing a detected draft at mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftNoticeResponse {
    /// Whether a draft was found.
    pub draft_found: bool,
    /// The step the draft was on, when found.
    pub step: Option<u8>,
    /// When the draft was saved, when found.
    pub saved_at: Option<String>,
}

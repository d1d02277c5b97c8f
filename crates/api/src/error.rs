// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use eval_cycle::CoreError;
use eval_cycle_domain::DomainError;
use eval_cycle_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A recovered draft is awaiting the restore/discard decision.
    DraftDecisionPending,
    /// A submission is already in flight for this session.
    SubmissionInFlight,
    /// The session already created its cycle.
    AlreadySubmitted,
    /// The create-cycle collaborator reported a failure.
    ///
    /// The message is surfaced verbatim; all session state is kept so
    /// the user can retry.
    SubmissionFailed {
        /// The collaborator's error message.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DraftDecisionPending => {
                write!(
                    f,
                    "A saved draft is awaiting the restore or discard decision"
                )
            }
            Self::SubmissionInFlight => {
                write!(f, "A submission is already in progress for this session")
            }
            Self::AlreadySubmitted => {
                write!(f, "This wizard session has already created its cycle")
            }
            // Collaborator message passes through verbatim.
            Self::SubmissionFailed { message } => write!(f, "{message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingCycleName => ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Cycle name cannot be empty"),
        },
        DomainError::MissingCycleDescription => ApiError::InvalidInput {
            field: String::from("description"),
            message: String::from("Cycle description cannot be empty"),
        },
        DomainError::MissingStartDate => ApiError::InvalidInput {
            field: String::from("start_date"),
            message: String::from("Cycle start date is required"),
        },
        DomainError::MissingEndDate => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: String::from("Cycle end date is required"),
        },
        DomainError::MissingEvaluationDeadline => ApiError::InvalidInput {
            field: String::from("evaluation_deadline"),
            message: String::from("Evaluation deadline is required"),
        },
        DomainError::EndDateNotAfterStart {
            start_date,
            end_date,
        } => ApiError::DomainRuleViolation {
            rule: String::from("end_after_start"),
            message: format!("End date {end_date} must be after start date {start_date}"),
        },
        DomainError::DeadlineNotAfterEnd {
            end_date,
            evaluation_deadline,
        } => ApiError::DomainRuleViolation {
            rule: String::from("deadline_after_end"),
            message: format!(
                "Evaluation deadline {evaluation_deadline} must be after end date {end_date}"
            ),
        },
        DomainError::WeightSumMismatch { total } => ApiError::DomainRuleViolation {
            rule: String::from("weights_total_100"),
            message: format!("Review weights must total exactly 100%, currently {total}%"),
        },
        DomainError::NoCompetenciesSelected => ApiError::DomainRuleViolation {
            rule: String::from("competencies_selected"),
            message: String::from("At least one competency must be selected"),
        },
        DomainError::NoParticipants => ApiError::DomainRuleViolation {
            rule: String::from("participants_present"),
            message: String::from("At least one participant must be added"),
        },
        DomainError::MissingSelfEvaluator => ApiError::DomainRuleViolation {
            rule: String::from("self_evaluator_present"),
            message: String::from("At least one participant must be a self-evaluator"),
        },
        DomainError::DuplicateParticipant { employee_id } => ApiError::DomainRuleViolation {
            rule: String::from("unique_participant"),
            message: format!("Employee {employee_id} is already on the participant roster"),
        },
        DomainError::InvalidCycleType(value) => ApiError::InvalidInput {
            field: String::from("cycle_type"),
            message: format!("Unknown cycle type: {value}"),
        },
        DomainError::InvalidEvaluatorRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown evaluator role: {value}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateFormatError { error } => ApiError::Internal {
            message: format!("Failed to format date: {error}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidStepNumber(number) => ApiError::InvalidInput {
            field: String::from("step"),
            message: format!("Invalid step number: {number}. Must be between 1 and 5"),
        },
        CoreError::InvalidJumpTarget(number) => ApiError::InvalidInput {
            field: String::from("step"),
            message: format!("Invalid jump target: {number}. Must be between 1 and 4"),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::TemplateNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Template"),
                message: format!("Template {id} does not exist"),
            },
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Resource"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Cycle name is empty.
    MissingCycleName,
    /// Cycle description is empty.
    MissingCycleDescription,
    /// Cycle start date has not been set.
    MissingStartDate,
    /// Cycle end date has not been set.
    MissingEndDate,
    /// Evaluation deadline has not been set.
    MissingEvaluationDeadline,
    /// Cycle end date is not strictly after the start date.
    EndDateNotAfterStart {
        /// The configured start date.
        start_date: Date,
        /// The configured end date.
        end_date: Date,
    },
    /// Evaluation deadline is not strictly after the end date.
    DeadlineNotAfterEnd {
        /// The configured end date.
        end_date: Date,
        /// The configured evaluation deadline.
        evaluation_deadline: Date,
    },
    /// Review weights do not sum to exactly 100.
    WeightSumMismatch {
        /// The current weight total.
        total: u16,
    },
    /// No competencies have been selected.
    NoCompetenciesSelected,
    /// The participant roster is empty.
    NoParticipants,
    /// The roster has no participant with the self role.
    MissingSelfEvaluator,
    /// A participant with this employee ID is already on the roster.
    DuplicateParticipant {
        /// The duplicate employee ID.
        employee_id: i64,
    },
    /// Cycle type string is not recognized.
    InvalidCycleType(String),
    /// Evaluator role string is not recognized.
    InvalidEvaluatorRole(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a date as a string.
    DateFormatError {
        /// The formatting error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCycleName => write!(f, "Cycle name cannot be empty"),
            Self::MissingCycleDescription => write!(f, "Cycle description cannot be empty"),
            Self::MissingStartDate => write!(f, "Cycle start date is required"),
            Self::MissingEndDate => write!(f, "Cycle end date is required"),
            Self::MissingEvaluationDeadline => write!(f, "Evaluation deadline is required"),
            Self::EndDateNotAfterStart {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date {end_date} must be after start date {start_date}"
                )
            }
            Self::DeadlineNotAfterEnd {
                end_date,
                evaluation_deadline,
            } => {
                write!(
                    f,
                    "Evaluation deadline {evaluation_deadline} must be after end date {end_date}"
                )
            }
            Self::WeightSumMismatch { total } => {
                write!(
                    f,
                    "Review weights must total exactly 100%, currently {total}%"
                )
            }
            Self::NoCompetenciesSelected => {
                write!(f, "At least one competency must be selected")
            }
            Self::NoParticipants => {
                write!(f, "At least one participant must be added")
            }
            Self::MissingSelfEvaluator => {
                write!(f, "At least one participant must be a self-evaluator")
            }
            Self::DuplicateParticipant { employee_id } => {
                write!(
                    f,
                    "Employee {employee_id} is already on the participant roster"
                )
            }
            Self::InvalidCycleType(value) => write!(f, "Invalid cycle type: {value}"),
            Self::InvalidEvaluatorRole(value) => write!(f, "Invalid evaluator role: {value}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateFormatError { error } => write!(f, "Failed to format date: {error}"),
        }
    }
}

impl std::error::Error for DomainError {}

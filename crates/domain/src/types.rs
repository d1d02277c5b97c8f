// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The cadence of an evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CycleType {
    /// One cycle per calendar year.
    #[default]
    Annual,
    /// Two cycles per calendar year.
    Semiannual,
    /// Four cycles per calendar year.
    Quarterly,
}

impl CycleType {
    /// Converts this cycle type to its wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Semiannual => "semiannual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl FromStr for CycleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(Self::Annual),
            "semiannual" => Ok(Self::Semiannual),
            "quarterly" => Ok(Self::Quarterly),
            _ => Err(DomainError::InvalidCycleType(s.to_string())),
        }
    }
}

impl std::fmt::Display for CycleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The relationship of a participant to the evaluated employee.
///
/// Roles are fixed domain constants; the wire representation matches
/// the original application (`"self"`, `"peer"`, `"subordinate"`,
/// `"manager"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorRole {
    /// The employee evaluating themselves.
    #[serde(rename = "self")]
    SelfReview,
    /// A colleague at the same level.
    Peer,
    /// A direct report.
    Subordinate,
    /// The employee's manager.
    Manager,
}

impl EvaluatorRole {
    /// Parses an evaluator role from its wire string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "self" => Ok(Self::SelfReview),
            "peer" => Ok(Self::Peer),
            "subordinate" => Ok(Self::Subordinate),
            "manager" => Ok(Self::Manager),
            _ => Err(DomainError::InvalidEvaluatorRole(s.to_string())),
        }
    }

    /// Returns the wire string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelfReview => "self",
            Self::Peer => "peer",
            Self::Subordinate => "subordinate",
            Self::Manager => "manager",
        }
    }
}

impl std::fmt::Display for EvaluatorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The identifying data of an evaluation cycle (wizard step 1).
///
/// Dates remain optional until the step-1 gate validates them; the
/// wizard accepts partial input while the user is still typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CycleDetails {
    /// The cycle name (e.g., "Ciclo 360 2026/1").
    pub name: String,
    /// A free-text description of the cycle.
    pub description: String,
    /// The calendar year the cycle belongs to.
    pub year: u16,
    /// The cycle cadence.
    pub cycle_type: CycleType,
    /// The first day evaluations may be filled in.
    pub start_date: Option<Date>,
    /// The last day of the evaluated period.
    pub end_date: Option<Date>,
    /// The last day evaluations may be submitted.
    pub evaluation_deadline: Option<Date>,
}

/// The weight, in percent, each evaluator role contributes to the
/// consolidated score (wizard step 2).
///
/// The step-2 gate requires the four weights to total exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewWeights {
    /// Weight of the self-evaluation.
    pub self_weight: u8,
    /// Weight of peer evaluations.
    pub peer_weight: u8,
    /// Weight of subordinate evaluations.
    pub subordinate_weight: u8,
    /// Weight of the manager evaluation.
    pub manager_weight: u8,
}

impl ReviewWeights {
    /// Creates a new set of review weights.
    #[must_use]
    pub const fn new(
        self_weight: u8,
        peer_weight: u8,
        subordinate_weight: u8,
        manager_weight: u8,
    ) -> Self {
        Self {
            self_weight,
            peer_weight,
            subordinate_weight,
            manager_weight,
        }
    }

    /// Returns the sum of the four weights.
    ///
    /// Widened to `u16` so a sum above 255 cannot wrap.
    #[must_use]
    pub const fn total(&self) -> u16 {
        self.self_weight as u16
            + self.peer_weight as u16
            + self.subordinate_weight as u16
            + self.manager_weight as u16
    }
}

impl Default for ReviewWeights {
    /// An even split across the four roles, which the user then tunes.
    fn default() -> Self {
        Self::new(25, 25, 25, 25)
    }
}

/// The set of competencies selected for a cycle (wizard step 3).
///
/// Selection order is preserved for display; identifiers are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompetencySelection {
    ids: Vec<i64>,
}

impl CompetencySelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Creates a selection from a list of identifiers.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    #[must_use]
    pub fn from_ids(ids: Vec<i64>) -> Self {
        let mut selection: Self = Self::new();
        for id in ids {
            selection.insert(id);
        }
        selection
    }

    /// Adds a competency to the selection.
    ///
    /// Returns `false` if the competency was already selected.
    pub fn insert(&mut self, id: i64) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes a competency from the selection.
    ///
    /// Returns `false` if the competency was not selected.
    pub fn remove(&mut self, id: i64) -> bool {
        let before: usize = self.ids.len();
        self.ids.retain(|selected| *selected != id);
        self.ids.len() != before
    }

    /// Checks whether a competency is selected.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the selected identifiers in selection order.
    #[must_use]
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Returns the number of selected competencies.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// Checks whether the selection is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A single entry in the competency catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    /// The canonical numeric identifier.
    pub id: i64,
    /// The competency name (e.g., "Comunicação").
    pub name: String,
    /// A description of the behavior being evaluated.
    pub description: String,
    /// The proficiency level expected of the evaluated employee.
    pub required_level: u8,
}

/// A single participant in an evaluation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The canonical employee identifier.
    pub employee_id: i64,
    /// The employee's display name.
    pub name: String,
    /// The participant's role relative to the evaluated employee.
    pub role: EvaluatorRole,
}

impl Participant {
    /// Creates a new participant.
    #[must_use]
    pub const fn new(employee_id: i64, name: String, role: EvaluatorRole) -> Self {
        Self {
            employee_id,
            name,
            role,
        }
    }
}

/// The ordered participant roster of a cycle (wizard step 4).
///
/// Employee IDs are unique; the uniqueness rule is enforced here at the
/// add operation, not by the step-4 gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParticipantRoster {
    participants: Vec<Participant>,
}

impl ParticipantRoster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Creates a roster from a list of participants without checking
    /// for duplicates.
    ///
    /// This is the wholesale replacement path used when a step
    /// component hands back its edited list; additions that must be
    /// checked go through [`Self::add`].
    #[must_use]
    pub const fn from_participants(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    /// Adds a participant to the roster.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateParticipant` if a participant
    /// with the same employee ID is already on the roster.
    pub fn add(&mut self, participant: Participant) -> Result<(), DomainError> {
        if self
            .participants
            .iter()
            .any(|existing| existing.employee_id == participant.employee_id)
        {
            return Err(DomainError::DuplicateParticipant {
                employee_id: participant.employee_id,
            });
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Removes a participant by employee ID.
    ///
    /// Returns `false` if no participant with that ID was present.
    pub fn remove(&mut self, employee_id: i64) -> bool {
        let before: usize = self.participants.len();
        self.participants
            .retain(|participant| participant.employee_id != employee_id);
        self.participants.len() != before
    }

    /// Returns the participants in roster order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Checks whether any participant has the self role.
    #[must_use]
    pub fn has_self_evaluator(&self) -> bool {
        self.participants
            .iter()
            .any(|participant| participant.role == EvaluatorRole::SelfReview)
    }

    /// Returns the number of participants.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.participants.len()
    }

    /// Checks whether the roster is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

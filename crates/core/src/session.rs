// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use eval_cycle_domain::{CompetencySelection, CycleDetails, ParticipantRoster, ReviewWeights};

/// The five steps of the cycle-creation wizard.
///
/// Navigation is linear: forward movement requires the current step's
/// gate to pass, backward movement is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Step 1: cycle name, description, and dates.
    CycleDetails,
    /// Step 2: review weights per evaluator role.
    Weights,
    /// Step 3: competency selection.
    Competencies,
    /// Step 4: participant roster.
    Participants,
    /// Step 5: review and submit.
    Review,
}

impl WizardStep {
    /// Returns the 1-based step number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::CycleDetails => 1,
            Self::Weights => 2,
            Self::Competencies => 3,
            Self::Participants => 4,
            Self::Review => 5,
        }
    }

    /// Parses a 1-based step number.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidStepNumber` if the number is not in
    /// the range 1..=5.
    pub const fn from_number(number: u8) -> Result<Self, CoreError> {
        match number {
            1 => Ok(Self::CycleDetails),
            2 => Ok(Self::Weights),
            3 => Ok(Self::Competencies),
            4 => Ok(Self::Participants),
            5 => Ok(Self::Review),
            _ => Err(CoreError::InvalidStepNumber(number)),
        }
    }

    /// Returns the following step, clamped at the review step.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::CycleDetails => Self::Weights,
            Self::Weights => Self::Competencies,
            Self::Competencies => Self::Participants,
            Self::Participants | Self::Review => Self::Review,
        }
    }

    /// Returns the preceding step, clamped at the first step.
    #[must_use]
    pub const fn previous(&self) -> Self {
        match self {
            Self::CycleDetails | Self::Weights => Self::CycleDetails,
            Self::Competencies => Self::Weights,
            Self::Participants => Self::Competencies,
            Self::Review => Self::Participants,
        }
    }

    /// Checks whether this is the review step.
    #[must_use]
    pub const fn is_review(&self) -> bool {
        matches!(self, Self::Review)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The complete state of one wizard session.
///
/// A session exclusively owns its four data slices. Slices are only
/// ever replaced as whole values through commands; nothing outside the
/// state machine mutates them in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    /// The step currently shown to the user.
    pub current_step: WizardStep,
    /// Step-1 slice: cycle name, description, and dates.
    pub cycle: CycleDetails,
    /// Step-2 slice: review weights.
    pub weights: ReviewWeights,
    /// Step-3 slice: competency selection.
    pub competencies: CompetencySelection,
    /// Step-4 slice: participant roster.
    pub participants: ParticipantRoster,
    /// Whether the next successful advance should autosave a draft.
    ///
    /// `false` only before the very first advance of a fresh session;
    /// restored sessions start primed.
    pub(crate) autosave_primed: bool,
}

impl WizardSession {
    /// Creates a fresh session positioned on step 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_step: WizardStep::CycleDetails,
            cycle: CycleDetails::default(),
            weights: ReviewWeights::default(),
            competencies: CompetencySelection::new(),
            participants: ParticipantRoster::new(),
            autosave_primed: false,
        }
    }

    /// Creates a session from previously saved state.
    ///
    /// Restored sessions autosave from their first advance onward.
    #[must_use]
    pub const fn restored(
        current_step: WizardStep,
        cycle: CycleDetails,
        weights: ReviewWeights,
        competencies: CompetencySelection,
        participants: ParticipantRoster,
    ) -> Self {
        Self {
            current_step,
            cycle,
            weights,
            competencies,
            participants,
            autosave_primed: true,
        }
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new session after the transition.
    pub new_session: WizardSession,
    /// Whether the caller should persist a draft snapshot now.
    ///
    /// Draft saving is fire-and-forget; a failed save must not block
    /// further navigation.
    pub autosave: bool,
}

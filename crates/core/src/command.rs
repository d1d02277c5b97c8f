// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use eval_cycle_domain::{
    CompetencySelection, CycleDetails, EvaluationTemplate, Participant, ParticipantRoster,
    ReviewWeights,
};

/// A command represents user intent as data only.
///
/// Commands are the only way to request session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move to the next step after the current step's gate passes.
    Advance,
    /// Move to the previous step. Never validated.
    Retreat,
    /// Jump directly to an earlier step from the review screen.
    ///
    /// Unchecked navigation: the step being left is not re-validated.
    JumpToStep {
        /// The target step (steps 1 through 4 only).
        target: u8,
    },
    /// Replace the weights and competency slices from a template.
    ///
    /// Wholesale replacement, no merge, usable from any step.
    ApplyTemplate {
        /// The template to apply.
        template: EvaluationTemplate,
    },
    /// Replace the cycle-details slice.
    ReplaceCycleDetails {
        /// The new slice value.
        details: CycleDetails,
    },
    /// Replace the weights slice.
    ReplaceWeights {
        /// The new slice value.
        weights: ReviewWeights,
    },
    /// Replace the competency-selection slice.
    ReplaceCompetencies {
        /// The new slice value.
        selection: CompetencySelection,
    },
    /// Replace the participant-roster slice.
    ReplaceParticipants {
        /// The new slice value.
        roster: ParticipantRoster,
    },
    /// Add a single participant to the roster.
    ///
    /// This is the checked insertion path: duplicate employee IDs are
    /// rejected here, not by the step-4 gate.
    AddParticipant {
        /// The participant to add.
        participant: Participant,
    },
}

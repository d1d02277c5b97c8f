// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod draft;
mod error;
mod session;
mod submission;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use draft::{
    DraftCompetency, DraftCycleData, DraftParticipant, DraftSnapshot, DraftWeights,
    restore_session, snapshot_session, weights_from_draft, weights_to_draft,
};
pub use error::CoreError;
pub use session::{TransitionResult, WizardSession, WizardStep};
pub use submission::{CreateCyclePayload, PayloadParticipant, assemble_submission};

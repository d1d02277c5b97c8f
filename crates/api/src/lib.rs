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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary layer for the Evaluation Cycle System.
//!
//! This crate hosts the wizard controller (session orchestration over
//! the draft store, create-cycle operation, and notifier), the
//! request/response DTOs, explicit error translation, and the
//! transport-independent template/competency/cycle operations.

mod controller;
mod csv_preview;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use controller::{
    CreateCycleError, CreatedCycle, CycleCreator, DraftDecision, DraftNotice, DraftStore,
    WizardController,
};
pub use csv_preview::{
    CsvPreviewError, CsvPreviewResult, CsvRowResult, CsvRowStatus, preview_participants_csv,
};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    create_competency, create_template, filter_competencies, get_template, list_competencies,
    list_cycles, list_templates,
};
pub use request_response::{
    CompetencyResponse, CompetencySelectionRequest, CreateCompetencyRequest, CreateTemplateRequest,
    CycleDetailsRequest, CycleDetailsView, CycleResponse, DraftNoticeResponse, JumpRequest,
    ParticipantRequest, ParticipantView, ReplaceParticipantsRequest, SessionView, SubmitResponse,
    TemplateResponse, WeightsRequest,
};

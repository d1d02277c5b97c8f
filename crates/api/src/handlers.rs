// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Template, competency, and cycle operations.
//!
//! These functions sit between the transport and the persistence
//! layer: they translate DTOs, enforce the API-level rules, and never
//! leak persistence errors directly.

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    CompetencyResponse, CreateCompetencyRequest, CreateTemplateRequest, CycleResponse,
    TemplateResponse,
};
use eval_cycle_domain::{
    Competency, EvaluationTemplate, ReviewWeights, validate_review_weights,
};
use eval_cycle_persistence::{Persistence, StoredCycle};
use tracing::info;

/// Creates an evaluation template.
///
/// Unlike template *application* (which trusts its input), creation
/// rejects weights that do not total 100: a preset that can never pass
/// the step-2 gate would only mislead its users.
///
/// # Errors
///
/// Returns an error if the name is empty, the weights do not total
/// 100, or the write fails.
pub fn create_template(
    persistence: &mut Persistence,
    request: CreateTemplateRequest,
) -> Result<TemplateResponse, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Template name cannot be empty"),
        });
    }

    let weights: ReviewWeights = ReviewWeights::new(
        request.self_weight,
        request.peer_weight,
        request.subordinate_weight,
        request.manager_weight,
    );
    validate_review_weights(&weights).map_err(translate_domain_error)?;

    let template: EvaluationTemplate = EvaluationTemplate::new(
        request.name,
        request.description,
        request.self_weight,
        request.peer_weight,
        request.subordinate_weight,
        request.manager_weight,
        request.competency_ids,
        request.is_public,
    );

    let template_id: i64 = persistence.insert_template(&template)?;
    info!(template_id, name = %template.name, "Created evaluation template");

    TemplateResponse::from_template(EvaluationTemplate::with_id(
        template_id,
        template.name,
        template.description,
        template.self_weight,
        template.peer_weight,
        template.subordinate_weight,
        template.manager_weight,
        template.competency_ids,
        template.is_public,
    ))
}

/// Lists templates, optionally restricted to public ones.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_templates(
    persistence: &mut Persistence,
    only_public: bool,
) -> Result<Vec<TemplateResponse>, ApiError> {
    persistence
        .list_templates(only_public)?
        .into_iter()
        .map(TemplateResponse::from_template)
        .collect()
}

/// Fetches a template by identifier.
///
/// # Errors
///
/// Returns a not-found error if no template has the identifier.
pub fn get_template(
    persistence: &mut Persistence,
    template_id: i64,
) -> Result<TemplateResponse, ApiError> {
    let template: EvaluationTemplate = persistence.get_template(template_id)?;
    TemplateResponse::from_template(template)
}

/// Adds a competency to the catalog.
///
/// # Errors
///
/// Returns an error if the name is empty or the write fails.
pub fn create_competency(
    persistence: &mut Persistence,
    request: CreateCompetencyRequest,
) -> Result<CompetencyResponse, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Competency name cannot be empty"),
        });
    }

    let id: i64 = persistence.insert_competency(
        &request.name,
        &request.description,
        request.required_level,
    )?;

    Ok(CompetencyResponse {
        id,
        name: request.name,
        description: request.description,
        required_level: request.required_level,
    })
}

/// Lists the competency catalog, optionally filtered for display.
///
/// The filter is display-time only: it narrows what the caller shows,
/// never what a wizard session has selected.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_competencies(
    persistence: &mut Persistence,
    query: Option<&str>,
) -> Result<Vec<CompetencyResponse>, ApiError> {
    let catalog: Vec<Competency> = persistence.list_competencies()?;

    let filtered: Vec<Competency> = match query {
        Some(q) => filter_competencies(&catalog, q)
            .into_iter()
            .cloned()
            .collect(),
        None => catalog,
    };

    Ok(filtered
        .into_iter()
        .map(|competency| CompetencyResponse {
            id: competency.id,
            name: competency.name,
            description: competency.description,
            required_level: competency.required_level,
        })
        .collect())
}

/// Filters a competency catalog by a search query.
///
/// Case-insensitive substring match over name and description. A blank
/// query matches everything.
#[must_use]
pub fn filter_competencies<'a>(catalog: &'a [Competency], query: &str) -> Vec<&'a Competency> {
    let needle: String = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.iter().collect();
    }

    catalog
        .iter()
        .filter(|competency| {
            competency.name.to_lowercase().contains(&needle)
                || competency.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Lists created cycles, newest first.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_cycles(persistence: &mut Persistence) -> Result<Vec<CycleResponse>, ApiError> {
    let cycles: Vec<StoredCycle> = persistence.list_cycles()?;

    Ok(cycles
        .into_iter()
        .map(|cycle| CycleResponse {
            cycle_id: cycle.cycle_id,
            name: cycle.payload.name,
            year: cycle.payload.year,
            cycle_type: cycle.payload.cycle_type,
            start_date: cycle.payload.start_date,
            end_date: cycle.payload.end_date,
            evaluation_deadline: cycle.payload.evaluation_deadline,
            created_at: cycle.created_at,
        })
        .collect())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Draft snapshot translation.
//!
//! The persisted draft shape is inherited from the original JS client:
//! camelCase keys, Portuguese weight field names, and competencies
//! stored as enriched objects rather than bare identifiers. This module
//! owns the translation in both directions so the two shapes cannot
//! drift apart silently; the weights mapping in particular is an
//! explicit bidirectional pair with a round-trip law
//! (`weights_from_draft(weights_to_draft(w)) == w`).

use crate::error::CoreError;
use crate::session::{WizardSession, WizardStep};
use eval_cycle_domain::{
    Competency, CompetencySelection, CycleDetails, CycleType, EvaluatorRole, Participant,
    ParticipantRoster, ReviewWeights, format_iso_date, parse_iso_date,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The persisted projection of the cycle-details slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftCycleData {
    /// The cycle name.
    pub name: String,
    /// The cycle description.
    pub description: String,
    /// The calendar year.
    pub year: u16,
    /// The cycle cadence wire string.
    #[serde(rename = "type")]
    pub cycle_type: String,
    /// The start date as an ISO-8601 string, if set.
    pub start_date: Option<String>,
    /// The end date as an ISO-8601 string, if set.
    pub end_date: Option<String>,
    /// The evaluation deadline as an ISO-8601 string, if set.
    pub evaluation_deadline: Option<String>,
}

/// The persisted projection of the weights slice.
///
/// Field names follow the original storage schema, not the in-memory
/// model: `autoAvaliacaoWeight` is the self weight,
/// `avaliacaoGerenteWeight` the manager weight, `avaliacaoPares` the
/// peer weight, and `avaliacaoSubordinados` the subordinate weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftWeights {
    /// Weight of the self-evaluation.
    #[serde(rename = "autoAvaliacaoWeight")]
    pub auto_avaliacao_weight: u8,
    /// Weight of the manager evaluation.
    #[serde(rename = "avaliacaoGerenteWeight")]
    pub avaliacao_gerente_weight: u8,
    /// Weight of peer evaluations.
    #[serde(rename = "avaliacaoPares")]
    pub avaliacao_pares: u8,
    /// Weight of subordinate evaluations.
    #[serde(rename = "avaliacaoSubordinados")]
    pub avaliacao_subordinados: u8,
}

/// A persisted competency entry, enriched with catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftCompetency {
    /// The competency identifier.
    pub id: i64,
    /// The competency name at save time.
    pub name: String,
    /// The competency description at save time.
    pub description: String,
    /// The required proficiency level at save time.
    pub required_level: u8,
}

/// A persisted participant entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftParticipant {
    /// The employee identifier.
    pub employee_id: i64,
    /// The evaluator role wire string.
    pub role: String,
    /// The employee display name.
    pub name: String,
}

/// A serializable projection of a whole wizard session.
///
/// Lifecycle: written on every autosave, read once at mount, deleted on
/// successful submission or explicit discard. The store holds at most
/// one snapshot per wizard kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    /// The 1-based step the session was on.
    pub step: u8,
    /// The cycle-details slice.
    pub cycle_data: DraftCycleData,
    /// The weights slice, in storage field names.
    pub weights: DraftWeights,
    /// The competency selection, enriched from the catalog.
    pub competencies: Vec<DraftCompetency>,
    /// The participant roster.
    pub participants: Vec<DraftParticipant>,
    /// When the snapshot was taken (ISO-8601).
    pub saved_at: String,
}

/// Translates in-memory weights to the persisted field names.
#[must_use]
pub const fn weights_to_draft(weights: &ReviewWeights) -> DraftWeights {
    DraftWeights {
        auto_avaliacao_weight: weights.self_weight,
        avaliacao_gerente_weight: weights.manager_weight,
        avaliacao_pares: weights.peer_weight,
        avaliacao_subordinados: weights.subordinate_weight,
    }
}

/// Translates persisted weights back to the in-memory field names.
#[must_use]
pub const fn weights_from_draft(draft: &DraftWeights) -> ReviewWeights {
    ReviewWeights {
        self_weight: draft.auto_avaliacao_weight,
        manager_weight: draft.avaliacao_gerente_weight,
        peer_weight: draft.avaliacao_pares,
        subordinate_weight: draft.avaliacao_subordinados,
    }
}

/// Formats an optional date for the persisted shape.
fn format_optional_date(date: Option<Date>) -> Result<Option<String>, CoreError> {
    date.map(format_iso_date)
        .transpose()
        .map_err(CoreError::DomainViolation)
}

/// Parses an optional date from the persisted shape.
fn parse_optional_date(value: Option<&String>) -> Result<Option<Date>, CoreError> {
    value
        .map(|date_string| parse_iso_date(date_string))
        .transpose()
        .map_err(CoreError::DomainViolation)
}

/// Projects a session into a draft snapshot.
///
/// Selected competencies are enriched with catalog metadata for
/// display in the recovery prompt; identifiers absent from the catalog
/// are persisted with empty metadata (restore only consumes the
/// identifiers).
///
/// # Arguments
///
/// * `session` - The session to snapshot
/// * `catalog` - The competency catalog used for enrichment
/// * `saved_at` - The snapshot timestamp (ISO-8601)
///
/// # Errors
///
/// Returns an error if a date in the session cannot be formatted.
pub fn snapshot_session(
    session: &WizardSession,
    catalog: &[Competency],
    saved_at: String,
) -> Result<DraftSnapshot, CoreError> {
    let competencies: Vec<DraftCompetency> = session
        .competencies
        .ids()
        .iter()
        .map(|id| {
            catalog
                .iter()
                .find(|competency| competency.id == *id)
                .map_or_else(
                    || DraftCompetency {
                        id: *id,
                        name: String::new(),
                        description: String::new(),
                        required_level: 0,
                    },
                    |competency| DraftCompetency {
                        id: competency.id,
                        name: competency.name.clone(),
                        description: competency.description.clone(),
                        required_level: competency.required_level,
                    },
                )
        })
        .collect();

    let participants: Vec<DraftParticipant> = session
        .participants
        .participants()
        .iter()
        .map(|participant| DraftParticipant {
            employee_id: participant.employee_id,
            role: participant.role.as_str().to_string(),
            name: participant.name.clone(),
        })
        .collect();

    Ok(DraftSnapshot {
        step: session.current_step.number(),
        cycle_data: DraftCycleData {
            name: session.cycle.name.clone(),
            description: session.cycle.description.clone(),
            year: session.cycle.year,
            cycle_type: session.cycle.cycle_type.as_str().to_string(),
            start_date: format_optional_date(session.cycle.start_date)?,
            end_date: format_optional_date(session.cycle.end_date)?,
            evaluation_deadline: format_optional_date(session.cycle.evaluation_deadline)?,
        },
        weights: weights_to_draft(&session.weights),
        competencies,
        participants,
        saved_at,
    })
}

/// Rebuilds a session from a draft snapshot.
///
/// The restored session reproduces the saved one exactly, including
/// the step pointer, and autosaves from its first advance onward.
///
/// # Errors
///
/// Returns an error if the snapshot carries an invalid step number,
/// cycle type, evaluator role, or date string.
pub fn restore_session(snapshot: &DraftSnapshot) -> Result<WizardSession, CoreError> {
    let current_step: WizardStep = WizardStep::from_number(snapshot.step)?;

    let cycle_type: CycleType = CycleType::from_str(&snapshot.cycle_data.cycle_type)
        .map_err(CoreError::DomainViolation)?;

    let cycle: CycleDetails = CycleDetails {
        name: snapshot.cycle_data.name.clone(),
        description: snapshot.cycle_data.description.clone(),
        year: snapshot.cycle_data.year,
        cycle_type,
        start_date: parse_optional_date(snapshot.cycle_data.start_date.as_ref())?,
        end_date: parse_optional_date(snapshot.cycle_data.end_date.as_ref())?,
        evaluation_deadline: parse_optional_date(snapshot.cycle_data.evaluation_deadline.as_ref())?,
    };

    let competencies: CompetencySelection = CompetencySelection::from_ids(
        snapshot
            .competencies
            .iter()
            .map(|competency| competency.id)
            .collect(),
    );

    let mut restored_participants: Vec<Participant> =
        Vec::with_capacity(snapshot.participants.len());
    for participant in &snapshot.participants {
        let role: EvaluatorRole =
            EvaluatorRole::parse(&participant.role).map_err(CoreError::DomainViolation)?;
        restored_participants.push(Participant::new(
            participant.employee_id,
            participant.name.clone(),
            role,
        ));
    }

    Ok(WizardSession::restored(
        current_step,
        cycle,
        weights_from_draft(&snapshot.weights),
        competencies,
        ParticipantRoster::from_participants(restored_participants),
    ))
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Evaluation Cycle System.
//!
//! This crate provides database persistence for wizard draft
//! snapshots, evaluation templates, the competency catalog, and
//! created cycles. It is built on Diesel over `SQLite`.
//!
//! ## Draft storage model
//!
//! Drafts are a single-slot store keyed by wizard kind: saving always
//! overwrites the previous snapshot for the same kind, and loading
//! returns at most one snapshot. This mirrors the per-wizard
//! `localStorage` slot of the original client.
//!
//! ## Testing
//!
//! Unit tests run against unique shared in-memory databases. Each
//! database name comes from an atomic counter, ensuring deterministic
//! test isolation without time-based collisions.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::debug;

use eval_cycle::{CreateCyclePayload, DraftSnapshot, PayloadParticipant};
use eval_cycle_domain::{Competency, EvaluationTemplate};

mod data_models;
mod diesel_schema;
mod error;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use data_models::{
    CompetencyRow, CycleRow, DraftRow, NewCompetencyRow, NewCycleRow, NewDraftRow, NewTemplateRow,
    TemplateRow,
};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A created cycle as stored, with its assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCycle {
    /// The canonical cycle identifier.
    pub cycle_id: i64,
    /// The payload the cycle was created from.
    pub payload: CreateCyclePayload,
    /// When the cycle was created (ISO-8601).
    pub created_at: String,
}

/// Returns the current UTC timestamp as an ISO-8601 string.
fn current_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Maps a stored weight column back to a `u8` percentage.
fn to_weight(value: i32, column: &str) -> Result<u8, PersistenceError> {
    u8::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!(
            "Stored value {value} in column '{column}' is not a valid weight"
        ))
    })
}

/// Persistence adapter for the Evaluation Cycle System.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic
    /// counter, ensuring deterministic test isolation without
    /// time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_eval_cycle_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter backed by a database file.
    ///
    /// WAL mode is enabled for better read concurrency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = sqlite::initialize_database(path)?;
        sqlite::enable_wal_mode(&mut conn)?;
        Ok(Self { conn })
    }

    // ---- Wizard drafts -------------------------------------------------

    /// Loads the draft snapshot for a wizard kind, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored JSON cannot
    /// be deserialized.
    pub fn load_draft(
        &mut self,
        wizard_kind: &str,
    ) -> Result<Option<DraftSnapshot>, PersistenceError> {
        use crate::diesel_schema::wizard_drafts::dsl;

        let row: Option<DraftRow> = dsl::wizard_drafts
            .find(wizard_kind)
            .first::<DraftRow>(&mut self.conn)
            .optional()?;

        match row {
            Some((_, snapshot_json, _)) => {
                let snapshot: DraftSnapshot = serde_json::from_str(&snapshot_json)?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    /// Saves a draft snapshot, overwriting any prior snapshot for the
    /// same wizard kind.
    ///
    /// Saving is idempotent: the table holds at most one row per kind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_draft(
        &mut self,
        wizard_kind: &str,
        snapshot: &DraftSnapshot,
    ) -> Result<(), PersistenceError> {
        use crate::diesel_schema::wizard_drafts::dsl;

        let row: NewDraftRow = NewDraftRow {
            wizard_kind: wizard_kind.to_string(),
            snapshot_json: serde_json::to_string(snapshot)?,
            saved_at: snapshot.saved_at.clone(),
        };

        diesel::replace_into(dsl::wizard_drafts)
            .values(&row)
            .execute(&mut self.conn)?;

        debug!(wizard_kind, step = snapshot.step, "Saved wizard draft");
        Ok(())
    }

    /// Deletes the draft snapshot for a wizard kind.
    ///
    /// Deleting an absent draft is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_draft(&mut self, wizard_kind: &str) -> Result<(), PersistenceError> {
        use crate::diesel_schema::wizard_drafts::dsl;

        diesel::delete(dsl::wizard_drafts.find(wizard_kind)).execute(&mut self.conn)?;

        debug!(wizard_kind, "Cleared wizard draft");
        Ok(())
    }

    // ---- Evaluation templates ------------------------------------------

    /// Inserts a template and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn insert_template(
        &mut self,
        template: &EvaluationTemplate,
    ) -> Result<i64, PersistenceError> {
        use crate::diesel_schema::evaluation_templates::dsl;

        let row: NewTemplateRow = NewTemplateRow {
            name: template.name.clone(),
            description: template.description.clone(),
            self_weight: i32::from(template.self_weight),
            peer_weight: i32::from(template.peer_weight),
            subordinate_weight: i32::from(template.subordinate_weight),
            manager_weight: i32::from(template.manager_weight),
            competency_ids_json: serde_json::to_string(&template.competency_ids)?,
            is_public: i32::from(template.is_public),
            created_at: current_timestamp()?,
        };

        diesel::insert_into(dsl::evaluation_templates)
            .values(&row)
            .execute(&mut self.conn)?;

        let template_id: i64 = sqlite::get_last_insert_rowid(&mut self.conn)?;
        debug!(template_id, name = %template.name, "Inserted evaluation template");
        Ok(template_id)
    }

    /// Lists templates, newest first.
    ///
    /// # Arguments
    ///
    /// * `only_public` - When true, private templates are omitted
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row cannot be
    /// mapped back to a template.
    pub fn list_templates(
        &mut self,
        only_public: bool,
    ) -> Result<Vec<EvaluationTemplate>, PersistenceError> {
        use crate::diesel_schema::evaluation_templates::dsl;

        let rows: Vec<TemplateRow> = if only_public {
            dsl::evaluation_templates
                .filter(dsl::is_public.eq(1))
                .order(dsl::template_id.desc())
                .load::<TemplateRow>(&mut self.conn)?
        } else {
            dsl::evaluation_templates
                .order(dsl::template_id.desc())
                .load::<TemplateRow>(&mut self.conn)?
        };

        rows.into_iter().map(template_from_row).collect()
    }

    /// Fetches a template by its identifier.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TemplateNotFound` if no template has
    /// the given identifier.
    pub fn get_template(
        &mut self,
        template_id: i64,
    ) -> Result<EvaluationTemplate, PersistenceError> {
        use crate::diesel_schema::evaluation_templates::dsl;

        let row: Option<TemplateRow> = dsl::evaluation_templates
            .find(template_id)
            .first::<TemplateRow>(&mut self.conn)
            .optional()?;

        row.map_or(
            Err(PersistenceError::TemplateNotFound(template_id)),
            template_from_row,
        )
    }

    // ---- Competency catalog --------------------------------------------

    /// Inserts a competency and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn insert_competency(
        &mut self,
        name: &str,
        description: &str,
        required_level: u8,
    ) -> Result<i64, PersistenceError> {
        use crate::diesel_schema::competencies::dsl;

        let row: NewCompetencyRow = NewCompetencyRow {
            name: name.to_string(),
            description: description.to_string(),
            required_level: i32::from(required_level),
        };

        diesel::insert_into(dsl::competencies)
            .values(&row)
            .execute(&mut self.conn)?;

        let competency_id: i64 = sqlite::get_last_insert_rowid(&mut self.conn)?;
        debug!(competency_id, name, "Inserted competency");
        Ok(competency_id)
    }

    /// Lists the whole competency catalog in identifier order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row cannot be
    /// mapped back to a competency.
    pub fn list_competencies(&mut self) -> Result<Vec<Competency>, PersistenceError> {
        use crate::diesel_schema::competencies::dsl;

        let rows: Vec<CompetencyRow> = dsl::competencies
            .order(dsl::competency_id.asc())
            .load::<CompetencyRow>(&mut self.conn)?;

        rows.into_iter()
            .map(|(id, name, description, required_level)| {
                Ok(Competency {
                    id,
                    name,
                    description,
                    required_level: to_weight(required_level, "required_level")?,
                })
            })
            .collect()
    }

    // ---- Created cycles ------------------------------------------------

    /// Inserts a created cycle and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn insert_cycle(&mut self, payload: &CreateCyclePayload) -> Result<i64, PersistenceError> {
        use crate::diesel_schema::evaluation_cycles::dsl;

        let row: NewCycleRow = NewCycleRow {
            name: payload.name.clone(),
            description: payload.description.clone(),
            year: i32::from(payload.year),
            cycle_type: payload.cycle_type.clone(),
            start_date: payload.start_date.clone(),
            end_date: payload.end_date.clone(),
            evaluation_deadline: payload.evaluation_deadline.clone(),
            self_weight: i32::from(payload.self_weight),
            peer_weight: i32::from(payload.peer_weight),
            subordinate_weight: i32::from(payload.subordinate_weight),
            manager_weight: i32::from(payload.manager_weight),
            competency_ids_json: serde_json::to_string(&payload.competency_ids)?,
            participants_json: serde_json::to_string(&payload.participants)?,
            created_at: current_timestamp()?,
        };

        diesel::insert_into(dsl::evaluation_cycles)
            .values(&row)
            .execute(&mut self.conn)?;

        let cycle_id: i64 = sqlite::get_last_insert_rowid(&mut self.conn)?;
        debug!(cycle_id, name = %payload.name, "Inserted evaluation cycle");
        Ok(cycle_id)
    }

    /// Lists created cycles, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row cannot be
    /// mapped back to a cycle.
    pub fn list_cycles(&mut self) -> Result<Vec<StoredCycle>, PersistenceError> {
        use crate::diesel_schema::evaluation_cycles::dsl;

        let rows: Vec<CycleRow> = dsl::evaluation_cycles
            .order(dsl::cycle_id.desc())
            .load::<CycleRow>(&mut self.conn)?;

        rows.into_iter().map(cycle_from_row).collect()
    }
}

/// Maps a stored template row back to the domain type.
fn template_from_row(row: TemplateRow) -> Result<EvaluationTemplate, PersistenceError> {
    let (
        template_id,
        name,
        description,
        self_weight,
        peer_weight,
        subordinate_weight,
        manager_weight,
        competency_ids_json,
        is_public,
        _created_at,
    ) = row;

    let competency_ids: Vec<i64> = serde_json::from_str(&competency_ids_json)?;

    Ok(EvaluationTemplate::with_id(
        template_id,
        name,
        description,
        to_weight(self_weight, "self_weight")?,
        to_weight(peer_weight, "peer_weight")?,
        to_weight(subordinate_weight, "subordinate_weight")?,
        to_weight(manager_weight, "manager_weight")?,
        competency_ids,
        is_public != 0,
    ))
}

/// Maps a stored cycle row back to a `StoredCycle`.
fn cycle_from_row(row: CycleRow) -> Result<StoredCycle, PersistenceError> {
    let (
        cycle_id,
        name,
        description,
        year,
        cycle_type,
        start_date,
        end_date,
        evaluation_deadline,
        self_weight,
        peer_weight,
        subordinate_weight,
        manager_weight,
        competency_ids_json,
        participants_json,
        created_at,
    ) = row;

    let competency_ids: Vec<i64> = serde_json::from_str(&competency_ids_json)?;
    let participants: Vec<PayloadParticipant> = serde_json::from_str(&participants_json)?;
    let year: u16 = u16::try_from(year).map_err(|_| {
        PersistenceError::ReconstructionError(format!(
            "Stored value {year} in column 'year' is not a valid year"
        ))
    })?;

    Ok(StoredCycle {
        cycle_id,
        payload: CreateCyclePayload {
            name,
            description,
            year,
            cycle_type,
            start_date,
            end_date,
            evaluation_deadline,
            self_weight: to_weight(self_weight, "self_weight")?,
            peer_weight: to_weight(peer_weight, "peer_weight")?,
            subordinate_weight: to_weight(subordinate_weight, "subordinate_weight")?,
            manager_weight: to_weight(manager_weight, "manager_weight")?,
            competency_ids,
            participants,
        },
        created_at,
    })
}

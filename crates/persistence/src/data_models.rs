// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{competencies, evaluation_cycles, evaluation_templates, wizard_drafts};
use diesel::prelude::*;

/// Insertable row for the single-slot draft table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wizard_drafts)]
pub struct NewDraftRow {
    pub wizard_kind: String,
    pub snapshot_json: String,
    pub saved_at: String,
}

/// Insertable row for the templates table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = evaluation_templates)]
pub struct NewTemplateRow {
    pub name: String,
    pub description: Option<String>,
    pub self_weight: i32,
    pub peer_weight: i32,
    pub subordinate_weight: i32,
    pub manager_weight: i32,
    pub competency_ids_json: String,
    pub is_public: i32,
    pub created_at: String,
}

/// Insertable row for the competency catalog.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = competencies)]
pub struct NewCompetencyRow {
    pub name: String,
    pub description: String,
    pub required_level: i32,
}

/// Insertable row for created cycles.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = evaluation_cycles)]
pub struct NewCycleRow {
    pub name: String,
    pub description: String,
    pub year: i32,
    pub cycle_type: String,
    pub start_date: String,
    pub end_date: String,
    pub evaluation_deadline: String,
    pub self_weight: i32,
    pub peer_weight: i32,
    pub subordinate_weight: i32,
    pub manager_weight: i32,
    pub competency_ids_json: String,
    pub participants_json: String,
    pub created_at: String,
}

/// Type alias for draft row data from `SQLite`.
pub type DraftRow = (String, String, String);

/// Type alias for template row data from `SQLite`.
pub type TemplateRow = (
    i64,
    String,
    Option<String>,
    i32,
    i32,
    i32,
    i32,
    String,
    i32,
    String,
);

/// Type alias for competency row data from `SQLite`.
pub type CompetencyRow = (i64, String, String, i32);

/// Type alias for cycle row data from `SQLite`.
pub type CycleRow = (
    i64,
    String,
    String,
    i32,
    String,
    String,
    String,
    String,
    i32,
    i32,
    i32,
    i32,
    String,
    String,
    String,
);

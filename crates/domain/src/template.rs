// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation template domain model.
//!
//! A template captures a reusable weights-and-competencies preset.
//! Applying a template to a wizard session is wholesale replacement of
//! both slices; templates are never merged with existing values.

use crate::types::ReviewWeights;
use serde::{Deserialize, Serialize};

/// A reusable weights-and-competencies preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTemplate {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the template has not been persisted yet.
    template_id: Option<i64>,
    /// The template name.
    pub name: String,
    /// An optional description of when to use the template.
    pub description: Option<String>,
    /// Weight of the self-evaluation.
    pub self_weight: u8,
    /// Weight of peer evaluations.
    pub peer_weight: u8,
    /// Weight of subordinate evaluations.
    pub subordinate_weight: u8,
    /// Weight of the manager evaluation.
    pub manager_weight: u8,
    /// The competency identifiers the template selects.
    pub competency_ids: Vec<i64>,
    /// Whether the template is visible to all users.
    pub is_public: bool,
}

impl EvaluationTemplate {
    /// Creates a new `EvaluationTemplate` without a persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        name: String,
        description: Option<String>,
        self_weight: u8,
        peer_weight: u8,
        subordinate_weight: u8,
        manager_weight: u8,
        competency_ids: Vec<i64>,
        is_public: bool,
    ) -> Self {
        Self {
            template_id: None,
            name,
            description,
            self_weight,
            peer_weight,
            subordinate_weight,
            manager_weight,
            competency_ids,
            is_public,
        }
    }

    /// Creates an `EvaluationTemplate` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        template_id: i64,
        name: String,
        description: Option<String>,
        self_weight: u8,
        peer_weight: u8,
        subordinate_weight: u8,
        manager_weight: u8,
        competency_ids: Vec<i64>,
        is_public: bool,
    ) -> Self {
        Self {
            template_id: Some(template_id),
            name,
            description,
            self_weight,
            peer_weight,
            subordinate_weight,
            manager_weight,
            competency_ids,
            is_public,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn template_id(&self) -> Option<i64> {
        self.template_id
    }

    /// Returns the template's weights as a `ReviewWeights` value.
    #[must_use]
    pub const fn weights(&self) -> ReviewWeights {
        ReviewWeights::new(
            self.self_weight,
            self.peer_weight,
            self.subordinate_weight,
            self.manager_weight,
        )
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    wizard_drafts (wizard_kind) {
        wizard_kind -> Text,
        snapshot_json -> Text,
        saved_at -> Text,
    }
}

diesel::table! {
    evaluation_templates (template_id) {
        template_id -> BigInt,
        name -> Text,
        description -> Nullable<Text>,
        self_weight -> Integer,
        peer_weight -> Integer,
        subordinate_weight -> Integer,
        manager_weight -> Integer,
        competency_ids_json -> Text,
        is_public -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    competencies (competency_id) {
        competency_id -> BigInt,
        name -> Text,
        description -> Text,
        required_level -> Integer,
    }
}

diesel::table! {
    evaluation_cycles (cycle_id) {
        cycle_id -> BigInt,
        name -> Text,
        description -> Text,
        year -> Integer,
        cycle_type -> Text,
        start_date -> Text,
        end_date -> Text,
        evaluation_deadline -> Text,
        self_weight -> Integer,
        peer_weight -> Integer,
        subordinate_weight -> Integer,
        manager_weight -> Integer,
        competency_ids_json -> Text,
        participants_json -> Text,
        created_at -> Text,
    }
}

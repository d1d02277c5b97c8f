// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use eval_cycle::{
    Command, CreateCyclePayload, DraftSnapshot, WizardSession, apply, assemble_submission,
    snapshot_session,
};
use eval_cycle_domain::{
    CompetencySelection, CycleDetails, CycleType, EvaluatorRole, Participant, ParticipantRoster,
    ReviewWeights, parse_iso_date,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_filled_session() -> WizardSession {
    let mut session: WizardSession = WizardSession::new();
    session.cycle = CycleDetails {
        name: String::from("Ciclo 360 2026/1"),
        description: String::from("First semester evaluation cycle"),
        year: 2026,
        cycle_type: CycleType::Semiannual,
        start_date: Some(parse_iso_date("2026-01-05").unwrap()),
        end_date: Some(parse_iso_date("2026-06-30").unwrap()),
        evaluation_deadline: Some(parse_iso_date("2026-07-15").unwrap()),
    };
    session.weights = ReviewWeights::new(20, 30, 20, 30);
    session.competencies = CompetencySelection::from_ids(vec![10, 11]);

    let mut roster: ParticipantRoster = ParticipantRoster::new();
    roster
        .add(Participant::new(
            1,
            String::from("Ana Lima"),
            EvaluatorRole::SelfReview,
        ))
        .unwrap();
    roster
        .add(Participant::new(
            2,
            String::from("Bruno Costa"),
            EvaluatorRole::Peer,
        ))
        .unwrap();
    session.participants = roster;
    session
}

/// A snapshot of the filled session after one advance (on step 2).
pub fn create_test_snapshot(saved_at: &str) -> DraftSnapshot {
    let session: WizardSession = create_filled_session();
    let advanced: WizardSession = apply(&session, Command::Advance).unwrap().new_session;
    snapshot_session(&advanced, &[], saved_at.to_string()).unwrap()
}

pub fn create_test_payload() -> CreateCyclePayload {
    assemble_submission(&create_filled_session()).unwrap()
}

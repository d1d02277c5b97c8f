// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::WizardSession;
use eval_cycle_domain::{
    Competency, CompetencySelection, CycleDetails, CycleType, EvaluationTemplate, EvaluatorRole,
    Participant, ParticipantRoster, ReviewWeights, parse_iso_date,
};

pub fn create_valid_details() -> CycleDetails {
    CycleDetails {
        name: String::from("Ciclo 360 2026/1"),
        description: String::from("First semester evaluation cycle"),
        year: 2026,
        cycle_type: CycleType::Semiannual,
        start_date: Some(parse_iso_date("2026-01-05").unwrap()),
        end_date: Some(parse_iso_date("2026-06-30").unwrap()),
        evaluation_deadline: Some(parse_iso_date("2026-07-15").unwrap()),
    }
}

pub fn create_valid_roster() -> ParticipantRoster {
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
    roster
        .add(Participant::new(
            3,
            String::from("Carla Souza"),
            EvaluatorRole::Manager,
        ))
        .unwrap();
    roster
}

/// A session with every slice valid, still positioned on step 1.
pub fn create_filled_session() -> WizardSession {
    let mut session: WizardSession = WizardSession::new();
    session.cycle = create_valid_details();
    session.weights = ReviewWeights::new(20, 30, 20, 30);
    session.competencies = CompetencySelection::from_ids(vec![10, 11, 12]);
    session.participants = create_valid_roster();
    session
}

pub fn create_test_catalog() -> Vec<Competency> {
    vec![
        Competency {
            id: 10,
            name: String::from("Comunicação"),
            description: String::from("Communicates clearly across teams"),
            required_level: 3,
        },
        Competency {
            id: 11,
            name: String::from("Liderança"),
            description: String::from("Leads and develops people"),
            required_level: 4,
        },
        Competency {
            id: 12,
            name: String::from("Visão Estratégica"),
            description: String::from("Connects daily work to strategy"),
            required_level: 2,
        },
    ]
}

pub fn create_test_template() -> EvaluationTemplate {
    EvaluationTemplate::new(
        String::from("Leadership preset"),
        Some(String::from("For coordinator-level cycles")),
        10,
        20,
        30,
        40,
        vec![11, 12],
        true,
    )
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_filled_session, create_test_template, create_valid_roster};
use crate::{Command, CoreError, TransitionResult, WizardSession, WizardStep, apply};
use eval_cycle_domain::{
    CompetencySelection, DomainError, EvaluatorRole, Participant, ParticipantRoster, ReviewWeights,
};

fn advance(session: &WizardSession) -> TransitionResult {
    apply(session, Command::Advance).unwrap()
}

#[test]
fn test_advance_with_valid_details_moves_to_weights() {
    let session: WizardSession = create_filled_session();

    let transition: TransitionResult = advance(&session);

    assert_eq!(transition.new_session.current_step, WizardStep::Weights);
}

#[test]
fn test_first_advance_of_fresh_session_does_not_autosave() {
    let session: WizardSession = create_filled_session();

    let transition: TransitionResult = advance(&session);

    assert!(!transition.autosave);
}

#[test]
fn test_second_advance_autosaves() {
    let session: WizardSession = create_filled_session();

    let after_first: TransitionResult = advance(&session);
    let after_second: TransitionResult = advance(&after_first.new_session);

    assert!(after_second.autosave);
    assert_eq!(
        after_second.new_session.current_step,
        WizardStep::Competencies
    );
}

#[test]
fn test_re_advancing_from_first_step_autosaves_after_retreat() {
    let session: WizardSession = create_filled_session();

    let advanced: TransitionResult = advance(&session);
    let retreated: TransitionResult = apply(&advanced.new_session, Command::Retreat).unwrap();
    let re_advanced: TransitionResult = advance(&retreated.new_session);

    // Only the very first advance of a fresh session skips the save.
    assert!(re_advanced.autosave);
}

#[test]
fn test_restored_session_autosaves_on_first_advance() {
    let filled: WizardSession = create_filled_session();
    let restored: WizardSession = WizardSession::restored(
        WizardStep::CycleDetails,
        filled.cycle,
        filled.weights,
        filled.competencies,
        filled.participants,
    );

    let transition: TransitionResult = advance(&restored);

    assert!(transition.autosave);
}

#[test]
fn test_advance_with_empty_name_fails_and_reports_reason() {
    let mut session: WizardSession = create_filled_session();
    session.cycle.name = String::new();

    let result: Result<TransitionResult, CoreError> = apply(&session, Command::Advance);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingCycleName)
    );
    // The input session is untouched; a failed advance has no effect.
    assert_eq!(session.current_step, WizardStep::CycleDetails);
}

#[test]
fn test_weights_not_totaling_100_block_step_two() {
    let mut session: WizardSession = create_filled_session();
    session.weights = ReviewWeights::new(25, 30, 20, 30);
    let at_weights: WizardSession = advance(&session).new_session;

    let result: Result<TransitionResult, CoreError> = apply(&at_weights, Command::Advance);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::WeightSumMismatch { total: 105 })
    );
    assert_eq!(at_weights.current_step, WizardStep::Weights);
}

#[test]
fn test_weights_totaling_100_pass_step_two() {
    let mut session: WizardSession = create_filled_session();
    session.weights = ReviewWeights::new(20, 30, 20, 30);
    let at_weights: WizardSession = advance(&session).new_session;

    let transition: TransitionResult = advance(&at_weights);

    assert_eq!(
        transition.new_session.current_step,
        WizardStep::Competencies
    );
}

#[test]
fn test_empty_competency_selection_blocks_step_three() {
    let mut session: WizardSession = create_filled_session();
    session.competencies = CompetencySelection::new();
    let at_competencies: WizardSession = advance(&advance(&session).new_session).new_session;

    let result: Result<TransitionResult, CoreError> = apply(&at_competencies, Command::Advance);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NoCompetenciesSelected)
    );
}

#[test]
fn test_roster_without_self_evaluator_blocks_step_four() {
    let mut session: WizardSession = create_filled_session();
    let mut roster: ParticipantRoster = ParticipantRoster::new();
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
    session.participants = roster;

    let at_participants: WizardSession =
        advance(&advance(&advance(&session).new_session).new_session).new_session;
    let result: Result<TransitionResult, CoreError> = apply(&at_participants, Command::Advance);

    let error: CoreError = result.unwrap_err();
    assert_eq!(
        error,
        CoreError::DomainViolation(DomainError::MissingSelfEvaluator)
    );
    assert!(error.to_string().contains("self-evaluator"));
}

#[test]
fn test_full_walk_reaches_review() {
    let session: WizardSession = create_filled_session();

    let mut current: WizardSession = session;
    for _ in 0..4 {
        current = advance(&current).new_session;
    }

    assert_eq!(current.current_step, WizardStep::Review);
}

#[test]
fn test_advance_on_review_is_clamped_and_does_not_autosave() {
    let session: WizardSession = create_filled_session();
    let mut current: WizardSession = session;
    for _ in 0..4 {
        current = advance(&current).new_session;
    }

    let transition: TransitionResult = advance(&current);

    assert_eq!(transition.new_session.current_step, WizardStep::Review);
    assert!(!transition.autosave);
}

#[test]
fn test_retreat_is_clamped_at_step_one() {
    let session: WizardSession = WizardSession::new();

    let transition: TransitionResult = apply(&session, Command::Retreat).unwrap();

    assert_eq!(
        transition.new_session.current_step,
        WizardStep::CycleDetails
    );
    assert!(!transition.autosave);
}

#[test]
fn test_retreat_never_validates() {
    // Step 2 with broken weights; retreat must still succeed.
    let session: WizardSession = create_filled_session();
    let mut at_weights: WizardSession = advance(&session).new_session;
    at_weights.weights = ReviewWeights::new(0, 0, 0, 0);

    let transition: TransitionResult = apply(&at_weights, Command::Retreat).unwrap();

    assert_eq!(
        transition.new_session.current_step,
        WizardStep::CycleDetails
    );
    // And the broken slice travels along unchanged.
    assert_eq!(transition.new_session.weights, ReviewWeights::new(0, 0, 0, 0));
}

#[test]
fn test_jump_to_editable_steps_succeeds_without_validation() {
    let mut session: WizardSession = create_filled_session();
    // Corrupt a slice; jumping must not care.
    session.weights = ReviewWeights::new(0, 0, 0, 0);

    for target in 1..=4_u8 {
        let transition: TransitionResult =
            apply(&session, Command::JumpToStep { target }).unwrap();
        assert_eq!(transition.new_session.current_step.number(), target);
        assert!(!transition.autosave);
    }
}

#[test]
fn test_jump_to_review_is_rejected() {
    let session: WizardSession = create_filled_session();

    let result: Result<TransitionResult, CoreError> =
        apply(&session, Command::JumpToStep { target: 5 });

    assert_eq!(result.unwrap_err(), CoreError::InvalidJumpTarget(5));
}

#[test]
fn test_jump_out_of_range_is_rejected() {
    let session: WizardSession = create_filled_session();

    for target in [0_u8, 6, 99] {
        let result: Result<TransitionResult, CoreError> =
            apply(&session, Command::JumpToStep { target });
        assert_eq!(result.unwrap_err(), CoreError::InvalidJumpTarget(target));
    }
}

#[test]
fn test_apply_template_replaces_weights_and_competencies_wholesale() {
    let session: WizardSession = create_filled_session();

    let transition: TransitionResult = apply(
        &session,
        Command::ApplyTemplate {
            template: create_test_template(),
        },
    )
    .unwrap();

    // Exactly the template's values, with no residue from prior state.
    assert_eq!(
        transition.new_session.weights,
        ReviewWeights::new(10, 20, 30, 40)
    );
    assert_eq!(transition.new_session.competencies.ids(), &[11, 12]);
}

#[test]
fn test_apply_template_keeps_step_and_does_not_autosave() {
    let session: WizardSession = create_filled_session();
    let at_participants: WizardSession =
        advance(&advance(&advance(&session).new_session).new_session).new_session;

    let transition: TransitionResult = apply(
        &at_participants,
        Command::ApplyTemplate {
            template: create_test_template(),
        },
    )
    .unwrap();

    assert_eq!(
        transition.new_session.current_step,
        WizardStep::Participants
    );
    assert!(!transition.autosave);
}

#[test]
fn test_apply_template_does_not_validate_contents() {
    let session: WizardSession = create_filled_session();
    let mut template: eval_cycle_domain::EvaluationTemplate = create_test_template();
    template.self_weight = 90; // total is now 180

    let transition: TransitionResult =
        apply(&session, Command::ApplyTemplate { template }).unwrap();

    // Trusted on application; the step-2 gate catches it later.
    assert_eq!(transition.new_session.weights.total(), 180);
}

#[test]
fn test_replace_commands_swap_whole_slices() {
    let session: WizardSession = WizardSession::new();
    let roster: ParticipantRoster = create_valid_roster();

    let transition: TransitionResult = apply(
        &session,
        Command::ReplaceParticipants {
            roster: roster.clone(),
        },
    )
    .unwrap();

    assert_eq!(transition.new_session.participants, roster);
    assert!(!transition.autosave);
}

#[test]
fn test_add_participant_rejects_duplicate_employee_id() {
    let session: WizardSession = create_filled_session();

    let result: Result<TransitionResult, CoreError> = apply(
        &session,
        Command::AddParticipant {
            participant: Participant::new(1, String::from("Someone Else"), EvaluatorRole::Peer),
        },
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateParticipant { employee_id: 1 })
    );
    assert_eq!(session.participants.len(), 3);
}

#[test]
fn test_apply_does_not_mutate_input_session() {
    let session: WizardSession = create_filled_session();
    let before: WizardSession = session.clone();

    let _transition: TransitionResult = advance(&session);

    assert_eq!(session, before);
}

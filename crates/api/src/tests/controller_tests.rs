// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::controller::{DraftDecision, DraftNotice, WizardController};
use crate::error::ApiError;
use crate::tests::helpers::{
    RecordingCreator, SharedDraftStore, create_valid_details, fill_valid_session,
    mount_controller, walk_to_review,
};
use eval_cycle::DraftSnapshot;
use eval_cycle_domain::{EvaluationTemplate, EvaluatorRole, Participant};
use eval_cycle_notify::{MemoryNotifier, Notification, Severity};
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[test]
fn test_mount_reads_the_store_exactly_once() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();

    let (controller, _notifier) = mount_controller(&store, &creator);

    assert_eq!(store.load_calls.load(Ordering::SeqCst), 1);
    assert!(controller.draft_notice().is_none());
}

#[test]
fn test_mount_with_failed_load_starts_fresh() {
    let store: SharedDraftStore = SharedDraftStore::new();
    store.fail_loads.store(true, Ordering::SeqCst);
    let creator: RecordingCreator = RecordingCreator::new();

    let (mut controller, _notifier) = mount_controller(&store, &creator);

    // Draft-store errors are non-fatal: the wizard proceeds fresh.
    assert!(controller.draft_notice().is_none());
    controller.replace_cycle_details(create_valid_details()).unwrap();
    controller.advance().unwrap();
}

fn populate_store_with_draft(store: &SharedDraftStore, creator: &RecordingCreator) {
    let (mut controller, _notifier) = mount_controller(store, creator);
    fill_valid_session(&mut controller);
    controller.advance().unwrap(); // 1 -> 2, first advance: no save
    controller.advance().unwrap(); // 2 -> 3, autosaves
    assert!(store.stored().is_some());
}

#[test]
fn test_first_advance_of_fresh_session_does_not_save_a_draft() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);

    controller.advance().unwrap();

    assert!(store.stored().is_none());
}

#[test]
fn test_second_advance_saves_a_draft_and_notifies() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);

    controller.advance().unwrap();
    controller.advance().unwrap();

    let snapshot: DraftSnapshot = store.stored().unwrap();
    assert_eq!(snapshot.step, 3);
    assert!(!snapshot.saved_at.is_empty());

    let saved_notifications: Vec<Notification> = notifier
        .recorded()
        .into_iter()
        .filter(|n| n.severity == Severity::Success && n.message == "Draft saved")
        .collect();
    assert_eq!(saved_notifications.len(), 1);
}

#[test]
fn test_failed_autosave_does_not_block_navigation() {
    let store: SharedDraftStore = SharedDraftStore::new();
    store.fail_saves.store(true, Ordering::SeqCst);
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);

    controller.advance().unwrap();
    controller.advance().unwrap();

    // Navigation happened, the slot stayed empty, and the success
    // notification was suppressed.
    assert_eq!(controller.session().current_step.number(), 3);
    assert!(store.stored().is_none());
    assert!(
        notifier
            .recorded()
            .iter()
            .all(|n| n.message != "Draft saved")
    );
}

#[test]
fn test_validation_failure_emits_warning_and_keeps_step() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, notifier) = mount_controller(&store, &creator);

    let result: Result<(), ApiError> = controller.advance();

    assert!(result.is_err());
    assert_eq!(controller.session().current_step.number(), 1);

    let warnings: Vec<Notification> = notifier
        .recorded()
        .into_iter()
        .filter(|n| n.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("name"));
}

#[test]
fn test_found_draft_blocks_operations_until_resolved() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    populate_store_with_draft(&store, &creator);

    let (mut controller, _notifier) = mount_controller(&store, &creator);

    let notice: DraftNotice = controller.draft_notice().unwrap();
    assert_eq!(notice.step, 3);

    assert_eq!(
        controller.advance().unwrap_err(),
        ApiError::DraftDecisionPending
    );
    assert_eq!(
        controller.submit().unwrap_err(),
        ApiError::DraftDecisionPending
    );
    assert_eq!(
        controller
            .apply_template(EvaluationTemplate::new(
                String::from("T"),
                None,
                25,
                25,
                25,
                25,
                vec![10],
                true,
            ))
            .unwrap_err(),
        ApiError::DraftDecisionPending
    );
}

#[test]
fn test_restore_reproduces_the_saved_session() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    populate_store_with_draft(&store, &creator);

    let (mut controller, notifier) = mount_controller(&store, &creator);
    controller.resolve_draft(DraftDecision::Restore).unwrap();

    assert_eq!(controller.session().current_step.number(), 3);
    assert_eq!(controller.session().cycle.name, "Ciclo 360 2026/1");
    assert_eq!(controller.session().weights.peer_weight, 30);
    assert_eq!(controller.session().competencies.ids(), &[10, 11]);
    assert_eq!(controller.session().participants.len(), 2);
    assert!(controller.draft_notice().is_none());
    assert!(
        notifier
            .recorded()
            .iter()
            .any(|n| n.message.contains("Draft restored"))
    );
}

#[test]
fn test_discard_clears_the_slot_and_starts_fresh() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    populate_store_with_draft(&store, &creator);

    let (mut controller, _notifier) = mount_controller(&store, &creator);
    controller.resolve_draft(DraftDecision::Discard).unwrap();

    assert!(store.stored().is_none());
    assert_eq!(controller.session().current_step.number(), 1);
    assert!(controller.session().cycle.name.is_empty());
}

#[test]
fn test_resolve_without_pending_draft_fails() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);

    let result: Result<(), ApiError> = controller.resolve_draft(DraftDecision::Restore);

    assert!(matches!(result.unwrap_err(), ApiError::InvalidInput { .. }));
}

#[test]
fn test_submit_creates_cycle_clears_draft_and_notifies() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);
    walk_to_review(&mut controller);
    assert!(store.stored().is_some());

    let response = controller.submit().unwrap();

    assert_eq!(response.cycle_id, 1);
    assert_eq!(creator.call_count(), 1);
    assert!(store.stored().is_none());
    assert!(controller.submitted());
    assert!(
        notifier
            .recorded()
            .iter()
            .any(|n| n.severity == Severity::Success && n.message.contains("created successfully"))
    );

    let payload = &creator.created.lock().unwrap()[0];
    assert_eq!(payload.name, "Ciclo 360 2026/1");
    assert_eq!(payload.participants.len(), 2);
}

#[test]
fn test_second_submit_after_success_is_rejected() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);
    walk_to_review(&mut controller);

    controller.submit().unwrap();
    let result = controller.submit();

    assert_eq!(result.unwrap_err(), ApiError::AlreadySubmitted);
    assert_eq!(creator.call_count(), 1);
}

#[test]
fn test_submit_with_missing_deadline_never_calls_the_collaborator() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);

    let mut details = create_valid_details();
    details.evaluation_deadline = None;
    controller.replace_cycle_details(details).unwrap();
    walk_to_review(&mut controller);

    let result = controller.submit();

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "evaluation_deadline"
    ));
    assert_eq!(creator.call_count(), 0);
}

#[test]
fn test_remote_failure_surfaces_message_verbatim_and_preserves_state() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);
    walk_to_review(&mut controller);
    let draft_before: Option<DraftSnapshot> = store.stored();

    creator.fail_with("Banco de dados indisponível");
    let result = controller.submit();

    assert_eq!(
        result.unwrap_err(),
        ApiError::SubmissionFailed {
            message: String::from("Banco de dados indisponível")
        }
    );
    // Everything is preserved for retry.
    assert_eq!(controller.session().current_step.number(), 5);
    assert_eq!(store.stored(), draft_before);
    assert!(!controller.submitted());
    assert!(!controller.submission_pending());
    assert!(
        notifier
            .recorded()
            .iter()
            .any(|n| n.severity == Severity::Error && n.message == "Banco de dados indisponível")
    );

    // Retry succeeds once the collaborator recovers.
    creator.succeed();
    assert!(controller.submit().is_ok());
}

#[test]
fn test_failed_draft_clear_after_submission_is_non_fatal() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);
    walk_to_review(&mut controller);

    store.fail_clears.store(true, Ordering::SeqCst);
    let response = controller.submit().unwrap();

    assert_eq!(response.cycle_id, 1);
    assert!(controller.submitted());
}

#[test]
fn test_apply_template_notifies_with_template_name() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, notifier) = mount_controller(&store, &creator);

    controller
        .apply_template(EvaluationTemplate::new(
            String::from("Leadership preset"),
            None,
            10,
            20,
            30,
            40,
            vec![11],
            true,
        ))
        .unwrap();

    assert_eq!(controller.session().weights.self_weight, 10);
    assert_eq!(controller.session().competencies.ids(), &[11]);
    assert!(
        notifier
            .recorded()
            .iter()
            .any(|n| n.message.contains("Leadership preset"))
    );
}

#[test]
fn test_add_participant_rejects_duplicates_through_controller() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);

    controller
        .add_participant(Participant::new(
            7,
            String::from("Ana"),
            EvaluatorRole::SelfReview,
        ))
        .unwrap();
    let result = controller.add_participant(Participant::new(
        7,
        String::from("Ana again"),
        EvaluatorRole::Peer,
    ));

    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "unique_participant"
    ));
    assert_eq!(controller.session().participants.len(), 1);
}

#[test]
fn test_jump_from_review_then_resubmit_guard() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);
    walk_to_review(&mut controller);

    controller.jump_to_step(2).unwrap();
    controller
        .replace_weights(eval_cycle_domain::ReviewWeights::new(90, 30, 20, 30))
        .unwrap();
    controller.jump_to_step(4).unwrap();

    // Jump navigation never re-validated anything...
    assert_eq!(controller.session().current_step.number(), 4);

    // ...so submission's own checks are the backstop.
    controller.advance().unwrap();
    let result = controller.submit();
    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "weights_total_100"
    ));
    assert_eq!(creator.call_count(), 0);
}

#[test]
fn test_view_reflects_session_state() {
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let (mut controller, _notifier) = mount_controller(&store, &creator);
    fill_valid_session(&mut controller);
    controller.advance().unwrap();

    let view = controller.view().unwrap();

    assert_eq!(view.current_step, 2);
    assert!(!view.draft_decision_pending);
    assert!(!view.submission_pending);
    assert_eq!(view.cycle.name, "Ciclo 360 2026/1");
    assert_eq!(view.cycle.start_date.as_deref(), Some("2026-01-05"));
    assert_eq!(view.weights.self_weight, 20);
    assert_eq!(view.competency_ids, vec![10, 11]);
    assert_eq!(view.participants.len(), 2);
    assert_eq!(view.participants[0].role, "self");
}

#[test]
fn test_controller_uses_memory_notifier_in_isolation() {
    // The notifier is an injected capability: the same controller code
    // runs against any implementation.
    let store: SharedDraftStore = SharedDraftStore::new();
    let creator: RecordingCreator = RecordingCreator::new();
    let notifier: Arc<MemoryNotifier> = Arc::new(MemoryNotifier::new());

    let mut controller: WizardController = WizardController::mount(
        Box::new(store),
        Box::new(creator),
        notifier.clone(),
        Vec::new(),
    );

    let _unused: Result<(), ApiError> = controller.advance();
    assert!(!notifier.recorded().is_empty());
}

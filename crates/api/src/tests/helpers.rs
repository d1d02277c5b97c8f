// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::controller::{
    CreateCycleError, CreatedCycle, CycleCreator, DraftStore, WizardController,
};
use eval_cycle::{CreateCyclePayload, DraftSnapshot};
use eval_cycle_domain::{
    Competency, CompetencySelection, CycleDetails, CycleType, EvaluatorRole, Participant,
    ParticipantRoster, ReviewWeights, parse_iso_date,
};
use eval_cycle_notify::MemoryNotifier;
use eval_cycle_persistence::PersistenceError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A single-slot draft store shared between a test and the controller
/// under test. Failure toggles simulate an unavailable store.
#[derive(Clone, Default)]
pub struct SharedDraftStore {
    pub slot: Arc<Mutex<Option<DraftSnapshot>>>,
    pub fail_loads: Arc<AtomicBool>,
    pub fail_saves: Arc<AtomicBool>,
    pub fail_clears: Arc<AtomicBool>,
    pub load_calls: Arc<AtomicUsize>,
}

impl SharedDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Option<DraftSnapshot> {
        self.slot.lock().unwrap().clone()
    }
}

impl DraftStore for SharedDraftStore {
    fn load(&mut self) -> Result<Option<DraftSnapshot>, PersistenceError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PersistenceError::DatabaseError(String::from(
                "simulated load failure",
            )));
        }
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save(&mut self, snapshot: &DraftSnapshot) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::DatabaseError(String::from(
                "simulated save failure",
            )));
        }
        *self.slot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        if self.fail_clears.load(Ordering::SeqCst) {
            return Err(PersistenceError::DatabaseError(String::from(
                "simulated clear failure",
            )));
        }
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// A create-cycle collaborator that records every call and can be
/// switched into failure mode.
#[derive(Clone, Default)]
pub struct RecordingCreator {
    pub created: Arc<Mutex<Vec<CreateCyclePayload>>>,
    pub fail_message: Arc<Mutex<Option<String>>>,
}

impl RecordingCreator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail_message.lock().unwrap() = Some(message.to_string());
    }

    pub fn succeed(&self) {
        *self.fail_message.lock().unwrap() = None;
    }

    pub fn call_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

impl CycleCreator for RecordingCreator {
    fn create_cycle(
        &mut self,
        payload: &CreateCyclePayload,
    ) -> Result<CreatedCycle, CreateCycleError> {
        if let Some(message) = self.fail_message.lock().unwrap().clone() {
            return Err(CreateCycleError { message });
        }

        let mut created = self.created.lock().unwrap();
        created.push(payload.clone());
        Ok(CreatedCycle {
            cycle_id: i64::try_from(created.len()).unwrap(),
        })
    }
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
    ]
}

/// Mounts a controller against the given doubles, returning the
/// notifier handle for assertions.
pub fn mount_controller(
    store: &SharedDraftStore,
    creator: &RecordingCreator,
) -> (WizardController, Arc<MemoryNotifier>) {
    let notifier: Arc<MemoryNotifier> = Arc::new(MemoryNotifier::new());
    let controller: WizardController = WizardController::mount(
        Box::new(store.clone()),
        Box::new(creator.clone()),
        notifier.clone(),
        create_test_catalog(),
    );
    (controller, notifier)
}

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
}

/// Fills every slice of the controller's session with valid data.
pub fn fill_valid_session(controller: &mut WizardController) {
    controller
        .replace_cycle_details(create_valid_details())
        .unwrap();
    controller
        .replace_weights(ReviewWeights::new(20, 30, 20, 30))
        .unwrap();
    controller
        .replace_competencies(CompetencySelection::from_ids(vec![10, 11]))
        .unwrap();
    controller
        .replace_participants(create_valid_roster())
        .unwrap();
}

/// Walks a filled controller to the review step.
pub fn walk_to_review(controller: &mut WizardController) {
    for _ in 0..4 {
        controller.advance().unwrap();
    }
}

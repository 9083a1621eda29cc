//! Shared fixtures and scripted doubles for the behaviour tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use client::domain::ports::{BackendError, DeleteConfirmation, DeletePrompt, RecordGateway};
use client::domain::record::{Activity, RecordId};
use client::domain::session::{BearerToken, Role, Session, SessionStore};
use tokio::sync::Notify;

/// Build a catalogue activity with empty descriptive fields.
pub fn activity(id: u64, title: &str, category: &str) -> Activity {
    Activity {
        id: RecordId::from(id),
        title: title.to_owned(),
        category: category.to_owned(),
        description: String::new(),
        image: String::new(),
    }
}

/// The two-record catalogue used across scenarios.
pub fn sample_catalogue() -> Vec<Activity> {
    vec![
        activity(1, "Surfing", "Water Sports"),
        activity(2, "Temple Tour", "Culture"),
    ]
}

/// A signed-in store with an admin session.
pub fn signed_in_store() -> SessionStore {
    let store = SessionStore::new();
    let token = BearerToken::new("integration-token").expect("token should validate");
    store.establish(Session::new(token, Role::new("admin")));
    store
}

/// Gateway double that replays scripted results in order.
///
/// `list` and `remove` each consume their own queue; removals additionally
/// record the identifier and whether a bearer token was attached, so tests
/// can assert on call shape after the fact.
#[derive(Default)]
pub struct ScriptedGateway {
    lists: Mutex<VecDeque<Result<Vec<Activity>, BackendError>>>,
    removals: Mutex<VecDeque<Result<(), BackendError>>>,
    removed: Mutex<Vec<(RecordId, bool)>>,
}

impl ScriptedGateway {
    /// Queue the next `list` result.
    pub fn push_list(&self, result: Result<Vec<Activity>, BackendError>) {
        self.lists
            .lock()
            .expect("list script poisoned")
            .push_back(result);
    }

    /// Queue the next `remove` result.
    pub fn push_removal(&self, result: Result<(), BackendError>) {
        self.removals
            .lock()
            .expect("removal script poisoned")
            .push_back(result);
    }

    /// Removals observed so far: identifier plus whether auth was attached.
    pub fn observed_removals(&self) -> Vec<(RecordId, bool)> {
        self.removed.lock().expect("removal log poisoned").clone()
    }
}

#[async_trait]
impl RecordGateway<Activity> for ScriptedGateway {
    async fn list(&self) -> Result<Vec<Activity>, BackendError> {
        self.lists
            .lock()
            .expect("list script poisoned")
            .pop_front()
            .expect("list script exhausted")
    }

    async fn remove<'a>(
        &self,
        id: &RecordId,
        auth: Option<&'a BearerToken>,
    ) -> Result<(), BackendError> {
        self.removed
            .lock()
            .expect("removal log poisoned")
            .push((id.clone(), auth.is_some()));
        self.removals
            .lock()
            .expect("removal script poisoned")
            .pop_front()
            .expect("removal script exhausted")
    }
}

/// Gateway double whose first `list` call blocks until released.
///
/// Drives the superseded-fetch scenario: the first call parks on a notify
/// and eventually answers `stale_payload`, while every later call answers
/// `fresh_payload` immediately.
pub struct GatedGateway {
    started: Notify,
    release: Notify,
    calls: AtomicUsize,
    stale_payload: Vec<Activity>,
    fresh_payload: Vec<Activity>,
}

impl GatedGateway {
    /// Build the double with its two scripted payloads.
    pub fn new(stale_payload: Vec<Activity>, fresh_payload: Vec<Activity>) -> Self {
        Self {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
            stale_payload,
            fresh_payload,
        }
    }

    /// Wait until the first `list` call has parked.
    pub async fn first_call_started(&self) {
        self.started.notified().await;
    }

    /// Let the parked first call complete.
    pub fn release_first_call(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl RecordGateway<Activity> for GatedGateway {
    async fn list(&self) -> Result<Vec<Activity>, BackendError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.started.notify_one();
            self.release.notified().await;
            return Ok(self.stale_payload.clone());
        }
        Ok(self.fresh_payload.clone())
    }

    async fn remove<'a>(
        &self,
        _id: &RecordId,
        _auth: Option<&'a BearerToken>,
    ) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Confirmation double that records every prompt it is shown.
pub struct RecordingConfirmation {
    approve: bool,
    prompts: Mutex<Vec<DeletePrompt>>,
}

impl RecordingConfirmation {
    /// Double that approves every prompt.
    pub fn approving() -> Self {
        Self {
            approve: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Double that declines every prompt.
    pub fn declining() -> Self {
        Self {
            approve: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub fn observed_prompts(&self) -> Vec<DeletePrompt> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl DeleteConfirmation for RecordingConfirmation {
    async fn confirm(&self, prompt: &DeletePrompt) -> bool {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.clone());
        self.approve
    }
}

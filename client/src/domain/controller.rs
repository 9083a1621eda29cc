//! List controller driving the catalogue pages and their admin screens.
//!
//! One controller instance backs one collection view. It owns the
//! fetch → filter → render-model → delete → refetch loop: the rendering
//! layer sends intents (`initialize`, `set_search_term`, `delete`, `retry`)
//! and pulls [`RenderModel`] snapshots; the controller talks to the backend
//! through its injected [`RecordGateway`] and routes every failure through
//! the [`SessionGuard`].
//!
//! State sits behind a mutex that is never held across an await: each
//! network round trip happens between two short lock scopes, and a
//! generation stamp decides whether a completing fetch is still allowed to
//! commit.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::guard::{GuardAction, SessionGuard};
use crate::domain::ports::{BackendError, DeleteConfirmation, DeletePrompt, RecordGateway};
use crate::domain::record::{CatalogueRecord, RecordId};
use crate::domain::search;
use crate::domain::session::SessionStore;

/// Message shown when a fetch fails for reasons retrying may fix.
pub const LOAD_FAILED_MESSAGE: &str =
    "We could not load this list. Check your connection and retry.";

/// Message shown when the backend rejected the stored credentials.
pub const REAUTHENTICATE_MESSAGE: &str =
    "Your session has ended. Sign in again to continue.";

/// Message shown when a confirmed deletion fails on the backend.
pub const DELETE_FAILED_MESSAGE: &str =
    "The record could not be deleted. Nothing was changed; try again.";

/// Where the controller is in its loading lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListStatus {
    /// Constructed but not yet asked to fetch.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded; `records` reflects it.
    Loaded,
    /// The last fetch failed; `message` explains and retry is offered.
    Failed,
}

/// Result of an `initialize` (or `retry`) round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was fetched and committed.
    Loaded {
        /// Number of records in the committed snapshot.
        total: usize,
    },
    /// The fetch failed; state moved to [`ListStatus::Failed`].
    Failed {
        /// User-facing explanation, already worded for display.
        message: String,
        /// True when the user must sign in again before retrying.
        requires_login: bool,
    },
    /// A newer fetch started after this one; the result was discarded and
    /// state was left untouched.
    Superseded,
}

/// Result of a `delete` intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation prompt; no network call was made.
    Cancelled,
    /// The backend deleted the record and a refetch resynchronised the list.
    Deleted {
        /// Outcome of the implicit refetch that followed the deletion.
        refetch: FetchOutcome,
    },
    /// The backend refused the deletion; the displayed collection is
    /// unchanged.
    Rejected {
        /// User-facing notification text.
        message: String,
        /// True when the user must sign in again before retrying.
        requires_login: bool,
    },
}

/// Snapshot the rendering layer consumes.
///
/// `records` always mirrors the last successful fetch; `filtered_records` is
/// that collection narrowed by `search_term`. Both survive a failed refetch,
/// so a page can keep showing stale-but-real data next to the error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel<R> {
    /// Lifecycle position, drives spinners and error panels.
    pub status: ListStatus,
    /// Last successfully fetched collection, in backend order.
    pub records: Vec<R>,
    /// `records` narrowed by `search_term`, order preserved.
    pub filtered_records: Vec<R>,
    /// Current search term, verbatim as the user typed it.
    pub search_term: String,
    /// User-facing failure message while `status` is [`ListStatus::Failed`].
    pub message: Option<String>,
    /// True when the view should route the user to its sign-in entry point.
    pub requires_login: bool,
}

#[derive(Debug)]
struct ControllerState<R> {
    status: ListStatus,
    records: Vec<R>,
    filtered: Vec<R>,
    search_term: String,
    message: Option<String>,
    requires_login: bool,
    generation: u64,
}

impl<R> Default for ControllerState<R> {
    fn default() -> Self {
        Self {
            status: ListStatus::Idle,
            records: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            message: None,
            requires_login: false,
            generation: 0,
        }
    }
}

/// Fetch-filter-render-mutate loop shared by every catalogue list screen.
///
/// Instances are independent of each other; the only shared state is the
/// [`SessionStore`] they read tokens from. Methods take `&self`, so one
/// instance may be driven from concurrent tasks.
pub struct ResourceListController<R, G, C> {
    gateway: Arc<G>,
    confirmation: Arc<C>,
    sessions: Arc<SessionStore>,
    guard: SessionGuard,
    state: Mutex<ControllerState<R>>,
}

impl<R, G, C> ResourceListController<R, G, C>
where
    R: CatalogueRecord,
    G: RecordGateway<R>,
    C: DeleteConfirmation,
{
    /// Wire a controller to its backend gateway, confirmation capability and
    /// the shared credential store.
    #[must_use]
    pub fn new(gateway: Arc<G>, confirmation: Arc<C>, sessions: Arc<SessionStore>) -> Self {
        let guard = SessionGuard::new(Arc::clone(&sessions));
        Self {
            gateway,
            confirmation,
            sessions,
            guard,
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// Fetch the collection and commit it wholesale.
    ///
    /// Bumps the fetch generation before calling the gateway; when the call
    /// returns, the result only commits if no newer `initialize` has started
    /// since. A stale completion reports [`FetchOutcome::Superseded`] and
    /// leaves state alone.
    pub async fn initialize(&self) -> FetchOutcome {
        let generation = {
            let mut state = self.lock_state();
            state.generation += 1;
            state.status = ListStatus::Loading;
            state.generation
        };
        let result = self.gateway.list().await;
        self.commit(generation, result)
    }

    /// Re-run the fetch after a failure. Also legal from `Loaded`.
    pub async fn retry(&self) -> FetchOutcome {
        self.initialize().await
    }

    /// Update the search term and recompute the filtered view.
    ///
    /// Pure state update: never refetches, and is safe to call while a fetch
    /// is in flight because it filters whatever collection is stored now.
    pub fn set_search_term(&self, term: &str) {
        let mut state = self.lock_state();
        state.search_term = term.to_owned();
        state.filtered = search::filter(&state.records, term);
    }

    /// Delete one record after the user confirms, then refetch.
    ///
    /// The confirmation port owns the yes/no decision; a declined prompt
    /// means no network call at all. A confirmed deletion is followed by an
    /// awaited `initialize` so the list is resynchronised from the backend
    /// rather than edited locally. A refused deletion leaves the displayed
    /// collection exactly as it was.
    pub async fn delete(&self, id: &RecordId) -> DeleteOutcome {
        let prompt = DeletePrompt {
            id: id.clone(),
            title: self.title_of(id),
        };
        if !self.confirmation.confirm(&prompt).await {
            debug!(id = %id, "deletion declined at confirmation prompt");
            return DeleteOutcome::Cancelled;
        }

        let auth = self.sessions.bearer_token();
        match self.gateway.remove(id, auth.as_ref()).await {
            Ok(()) => {
                info!(id = %id, "record deleted, resynchronising list");
                let refetch = self.initialize().await;
                DeleteOutcome::Deleted { refetch }
            }
            Err(error) => {
                let requires_login =
                    self.guard.intercept(&error) == GuardAction::ReauthenticateRequired;
                warn!(id = %id, error = %error, "deletion refused by backend");
                if requires_login {
                    self.lock_state().requires_login = true;
                }
                DeleteOutcome::Rejected {
                    message: Self::failure_message(requires_login, DELETE_FAILED_MESSAGE),
                    requires_login,
                }
            }
        }
    }

    /// Cloned snapshot of the current state for rendering.
    #[must_use]
    pub fn render_model(&self) -> RenderModel<R> {
        let state = self.lock_state();
        RenderModel {
            status: state.status,
            records: state.records.clone(),
            filtered_records: state.filtered.clone(),
            search_term: state.search_term.clone(),
            message: state.message.clone(),
            requires_login: state.requires_login,
        }
    }

    fn commit(&self, generation: u64, result: Result<Vec<R>, BackendError>) -> FetchOutcome {
        let mut state = self.lock_state();
        if state.generation != generation {
            debug!(
                stale = generation,
                current = state.generation,
                "discarding superseded fetch result"
            );
            return FetchOutcome::Superseded;
        }
        match result {
            Ok(records) => {
                state.filtered = search::filter(&records, &state.search_term);
                state.records = records;
                state.status = ListStatus::Loaded;
                state.message = None;
                state.requires_login = false;
                FetchOutcome::Loaded {
                    total: state.records.len(),
                }
            }
            Err(error) => {
                let requires_login =
                    self.guard.intercept(&error) == GuardAction::ReauthenticateRequired;
                warn!(error = %error, "list fetch failed");
                let message = Self::failure_message(requires_login, LOAD_FAILED_MESSAGE);
                state.status = ListStatus::Failed;
                state.message = Some(message.clone());
                state.requires_login = requires_login;
                FetchOutcome::Failed {
                    message,
                    requires_login,
                }
            }
        }
    }

    fn failure_message(requires_login: bool, otherwise: &str) -> String {
        if requires_login {
            REAUTHENTICATE_MESSAGE.to_owned()
        } else {
            otherwise.to_owned()
        }
    }

    fn title_of(&self, id: &RecordId) -> Option<String> {
        let state = self.lock_state();
        state
            .records
            .iter()
            .find(|record| record.id() == id)
            .map(|record| record.title().to_owned())
    }

    // State is only ever mutated in short, panic-free scopes, so a poisoned
    // lock still holds a coherent value.
    fn lock_state(&self) -> MutexGuard<'_, ControllerState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

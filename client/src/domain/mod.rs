//! Domain layer: catalogue records, search, session state, ports and the
//! list controller.
//!
//! Everything in here is transport-agnostic. Network concerns live behind
//! the ports in [`ports`]; the REST adapter in `crate::outbound` implements
//! them.
//!
//! Public surface:
//! - [`record`] — catalogue record types and the [`record::CatalogueRecord`]
//!   trait the controller is generic over.
//! - [`search`] — the case-insensitive substring filter.
//! - [`session`] — bearer token, role and the shared [`session::SessionStore`].
//! - [`ports`] — gateway and confirmation ports plus the
//!   [`ports::BackendError`] fault taxonomy.
//! - [`guard`] — authorisation-failure handling.
//! - [`controller`] — the fetch-filter-render-mutate loop.

pub mod controller;
pub mod guard;
pub mod ports;
pub mod record;
pub mod search;
pub mod session;

pub use self::controller::{
    DeleteOutcome, FetchOutcome, ListStatus, RenderModel, ResourceListController,
};
pub use self::guard::{GuardAction, SessionGuard, classify};
pub use self::ports::{BackendError, DeleteConfirmation, DeletePrompt, RecordGateway};
pub use self::record::{
    Activity, ActivityDraft, CatalogueRecord, Destination, DestinationCategory,
    DestinationCategoryDraft, RecordId,
};
pub use self::session::{BearerToken, Role, Session, SessionStore};

//! Backend client, session guard and list-controller core for the travel
//! catalogue frontends.
//!
//! The crate is laid out hexagonally: `domain` holds the records, the search
//! filter, the credential store and the [`domain::controller`] that drives
//! every list screen; `outbound` holds the reqwest adapter that implements
//! the domain's gateway port against the REST backend; `config` resolves the
//! backend endpoint from the environment once at start-up.
//!
//! A rendering layer wires the three together: build a
//! [`config::BackendConfig`], construct an [`outbound::rest::CatalogueApi`],
//! and hand each collection to a [`domain::ResourceListController`] together
//! with a confirmation capability and the shared
//! [`domain::SessionStore`].

pub mod config;
pub mod domain;
pub mod outbound;

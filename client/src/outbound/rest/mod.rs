//! Reqwest-backed adapter for the catalogue REST backend.
//!
//! The adapter owns transport details only: URL construction, the bearer
//! header, timeout and HTTP error mapping, and JSON decoding through
//! transport DTOs into domain records.

mod collection;
mod dto;

pub use self::collection::{
    CatalogueApi, ResourcePath, ResourcePathError, RestCollection, RestResource,
};

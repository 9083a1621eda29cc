//! Domain ports connecting the list controller to the backend and the user.
//!
//! Each port ships a `Fixture*` implementation for wiring demos and tests.
//! Unit tests get mockall doubles via the generated `Mock*` types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::record::{CatalogueRecord, RecordId};
use crate::domain::session::BearerToken;

/// Faults surfaced by backend gateways.
///
/// Every failure a REST round trip can produce collapses into one of three
/// shapes, so the session guard and the controller can react without knowing
/// transport details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Request never produced a response: DNS failure, refused connection,
    /// timeout.
    #[error("backend request failed in transit: {message}")]
    Transport {
        /// Transport-layer description of the failure.
        message: String,
    },
    /// Backend answered with a non-success HTTP status.
    #[error("backend returned status {code}: {message}")]
    Status {
        /// Numeric HTTP status code.
        code: u16,
        /// Compacted preview of the response body.
        message: String,
    },
    /// A response arrived but the payload did not decode into the expected
    /// shape.
    #[error("backend payload could not be decoded: {message}")]
    Decode {
        /// Decoder description of the mismatch.
        message: String,
    },
}

impl BackendError {
    /// Create a transport fault from any displayable source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status fault for `code`.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Create a decode fault from any displayable source.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Numeric status code when the backend answered at all.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Read and delete access to one backend collection.
///
/// Implementations bind the resource path at construction, so the controller
/// stays ignorant of URLs. `remove` presents `auth` when a session is
/// established and omits the header otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordGateway<R: CatalogueRecord>: Send + Sync {
    /// Fetch every record in the collection.
    async fn list(&self) -> Result<Vec<R>, BackendError>;

    /// Delete one record.
    async fn remove<'a>(
        &self,
        id: &RecordId,
        auth: Option<&'a BearerToken>,
    ) -> Result<(), BackendError>;
}

/// Details shown to the user before a destructive action proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    /// Identifier of the record about to be removed.
    pub id: RecordId,
    /// Title of the record while it is still in the loaded list.
    pub title: Option<String>,
}

/// Asks the user to approve a pending deletion.
///
/// Rendering layers back this with a dialog; fixtures answer instantly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeleteConfirmation: Send + Sync {
    /// True when the user approves the deletion described by `prompt`.
    async fn confirm(&self, prompt: &DeletePrompt) -> bool;
}

/// Fixture gateway serving a canned record list.
///
/// `list` clones the seeded records and `remove` succeeds without touching
/// them.
#[derive(Debug, Clone)]
pub struct FixtureRecordGateway<R> {
    records: Vec<R>,
}

impl<R> FixtureRecordGateway<R> {
    /// Seed the fixture with `records`.
    #[must_use]
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl<R: CatalogueRecord> RecordGateway<R> for FixtureRecordGateway<R> {
    async fn list(&self) -> Result<Vec<R>, BackendError> {
        Ok(self.records.clone())
    }

    async fn remove<'a>(
        &self,
        _id: &RecordId,
        _auth: Option<&'a BearerToken>,
    ) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Fixture confirmation giving a fixed answer to every prompt.
#[derive(Debug, Clone, Copy)]
pub struct FixtureDeleteConfirmation {
    approve: bool,
}

impl FixtureDeleteConfirmation {
    /// Fixture that approves every prompt.
    #[must_use]
    pub const fn approving() -> Self {
        Self { approve: true }
    }

    /// Fixture that declines every prompt.
    #[must_use]
    pub const fn declining() -> Self {
        Self { approve: false }
    }
}

#[async_trait]
impl DeleteConfirmation for FixtureDeleteConfirmation {
    async fn confirm(&self, _prompt: &DeletePrompt) -> bool {
        self.approve
    }
}

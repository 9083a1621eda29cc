//! Reqwest adapter binding one backend collection to the gateway port.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::config::BackendConfig;
use crate::domain::ports::{BackendError, RecordGateway};
use crate::domain::record::{Activity, CatalogueRecord, DestinationCategory, RecordId};
use crate::domain::session::BearerToken;

/// Wire-level contract binding a domain record to its transport shapes.
///
/// Implemented next to the DTOs for every record kind the backend serves as
/// a top-level collection.
pub trait RestResource: CatalogueRecord {
    /// Transport shape the backend serves for this record kind.
    type Dto: DeserializeOwned + Send;
    /// JSON body submitted when creating or updating a record.
    type Draft: Serialize + Send + Sync;

    /// Map a decoded transport DTO into the domain record.
    fn from_dto(dto: Self::Dto) -> Self;
}

/// Error raised when a route segment cannot name a backend collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourcePathError {
    /// The segment was empty once trimmed.
    #[error("resource path must not be empty")]
    Empty,
    /// The segment contained slashes or surrounding whitespace.
    #[error("resource path must be a bare route segment, got {segment:?}")]
    NotASegment {
        /// The rejected value.
        segment: String,
    },
}

/// Validated route segment naming one backend collection, e.g. `activities`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// The activities collection segment.
    #[must_use]
    pub fn activities() -> Self {
        Self("activities".to_owned())
    }

    /// The destination categories collection segment.
    #[must_use]
    pub fn destinations() -> Self {
        Self("destinations".to_owned())
    }

    /// Validate `segment` as a bare route segment.
    ///
    /// # Errors
    /// Returns [`ResourcePathError`] when the segment is empty, contains a
    /// slash, or carries surrounding whitespace.
    pub fn new(segment: &str) -> Result<Self, ResourcePathError> {
        if segment.trim().is_empty() {
            return Err(ResourcePathError::Empty);
        }
        if segment.contains('/') || segment.trim() != segment {
            return Err(ResourcePathError::NotASegment {
                segment: segment.to_owned(),
            });
        }
        Ok(Self(segment.to_owned()))
    }

    /// Segment as validated.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One backend collection reached over HTTP.
///
/// The resource path is bound at construction, so callers work with typed
/// records and never see URLs. [`RecordGateway`] covers what the list
/// controller needs; the admin screens additionally use [`Self::fetch`],
/// [`Self::create`] and [`Self::update`].
pub struct RestCollection<R> {
    client: Client,
    base: Url,
    resource: ResourcePath,
    _records: PhantomData<fn() -> R>,
}

impl<R: RestResource> RestCollection<R> {
    /// Bind a collection to `base` and `resource`, reusing `client`.
    #[must_use]
    pub fn new(client: Client, base: Url, resource: ResourcePath) -> Self {
        Self {
            client,
            base,
            resource,
            _records: PhantomData,
        }
    }

    /// Fetch one record by identifier.
    ///
    /// # Errors
    /// Returns [`BackendError`] when the request fails in transit, the
    /// backend answers with a non-success status, or the payload does not
    /// decode as one record.
    pub async fn fetch(&self, id: &RecordId) -> Result<R, BackendError> {
        let body = self.send(self.fetch_request(id), None).await?;
        decode_record::<R>(&body)
    }

    /// Create a record from `draft`.
    ///
    /// # Errors
    /// As for [`Self::fetch`]; the backend answers the created record.
    pub async fn create(
        &self,
        draft: &R::Draft,
        auth: Option<&BearerToken>,
    ) -> Result<R, BackendError> {
        let body = self.send(self.create_request(draft), auth).await?;
        decode_record::<R>(&body)
    }

    /// Replace the record at `id` with `draft`.
    ///
    /// # Errors
    /// As for [`Self::fetch`]; the backend answers the updated record.
    pub async fn update(
        &self,
        id: &RecordId,
        draft: &R::Draft,
        auth: Option<&BearerToken>,
    ) -> Result<R, BackendError> {
        let body = self.send(self.update_request(id, draft), auth).await?;
        decode_record::<R>(&body)
    }

    // Request construction is split from sending so method, URL, body and
    // header shapes stay unit-testable without a server.
    fn list_request(&self) -> RequestBuilder {
        self.client.get(self.collection_url())
    }

    fn fetch_request(&self, id: &RecordId) -> RequestBuilder {
        self.client.get(self.record_url(id))
    }

    fn create_request(&self, draft: &R::Draft) -> RequestBuilder {
        self.client.post(self.collection_url()).json(draft)
    }

    fn update_request(&self, id: &RecordId, draft: &R::Draft) -> RequestBuilder {
        self.client.put(self.record_url(id)).json(draft)
    }

    fn remove_request(&self, id: &RecordId) -> RequestBuilder {
        self.client.delete(self.record_url(id))
    }

    /// One attempt, no retries: transport failures and non-success statuses
    /// map straight into [`BackendError`] for the caller to handle.
    async fn send(
        &self,
        request: RequestBuilder,
        auth: Option<&BearerToken>,
    ) -> Result<Vec<u8>, BackendError> {
        let response = authorise(request, auth)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    fn collection_url(&self) -> Url {
        let mut url = self.base.clone();
        // Config validation rejects cannot-be-a-base URLs, so the segment
        // writer is always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(self.resource.as_str());
        }
        url
    }

    fn record_url(&self, id: &RecordId) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(self.resource.as_str())
                .push(id.as_str());
        }
        url
    }
}

#[async_trait]
impl<R: RestResource> RecordGateway<R> for RestCollection<R> {
    async fn list(&self) -> Result<Vec<R>, BackendError> {
        let body = self.send(self.list_request(), None).await?;
        Ok(decode_list::<R>(&self.resource, &body))
    }

    async fn remove<'a>(
        &self,
        id: &RecordId,
        auth: Option<&'a BearerToken>,
    ) -> Result<(), BackendError> {
        self.send(self.remove_request(id), auth)
            .await
            .map(|_body| ())
    }
}

/// The canonical pair of catalogue collections behind one shared client.
pub struct CatalogueApi {
    activities: RestCollection<Activity>,
    destinations: RestCollection<DestinationCategory>,
}

impl CatalogueApi {
    /// Build both collections from `config`, sharing one HTTP client with
    /// the configured request timeout.
    ///
    /// # Errors
    /// Returns the underlying [`reqwest::Error`] when the HTTP client cannot
    /// be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            activities: RestCollection::new(
                client.clone(),
                config.base_url().clone(),
                ResourcePath::activities(),
            ),
            destinations: RestCollection::new(
                client,
                config.base_url().clone(),
                ResourcePath::destinations(),
            ),
        })
    }

    /// The activities collection.
    #[must_use]
    pub const fn activities(&self) -> &RestCollection<Activity> {
        &self.activities
    }

    /// The destination categories collection.
    #[must_use]
    pub const fn destinations(&self) -> &RestCollection<DestinationCategory> {
        &self.destinations
    }
}

fn authorise(request: RequestBuilder, auth: Option<&BearerToken>) -> RequestBuilder {
    if let Some(token) = auth {
        return request.bearer_auth(token.as_str());
    }
    request
}

fn decode_record<R: RestResource>(body: &[u8]) -> Result<R, BackendError> {
    serde_json::from_slice::<R::Dto>(body)
        .map(R::from_dto)
        .map_err(|error| BackendError::decode(format!("invalid record payload: {error}")))
}

// A list page should survive a misbehaving backend: anything that is not a
// decodable record array renders as an empty list rather than an error.
fn decode_list<R: RestResource>(resource: &ResourcePath, body: &[u8]) -> Vec<R> {
    match serde_json::from_slice::<Vec<R::Dto>>(body) {
        Ok(dtos) => dtos.into_iter().map(R::from_dto).collect(),
        Err(error) => {
            warn!(
                resource = %resource,
                error = %error,
                "list payload was not a record array; showing an empty list"
            );
            Vec::new()
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    BackendError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BackendError {
    BackendError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

//! Smoke probe: list both catalogue collections against a real backend.
//!
//! Resolves the backend endpoint from the environment, initialises JSON
//! tracing output, lists activities and destination categories through the
//! library, and reports per-collection counts as tracing events.
//!
//! # Examples
//! ```sh
//! CATALOGUE_API_BASE_URL=https://api.example.test \
//!     cargo run --manifest-path client/Cargo.toml --bin fetch-catalogue
//! ```

use client::config::BackendConfig;
use client::domain::ports::RecordGateway;
use client::domain::record::CatalogueRecord;
use client::outbound::rest::CatalogueApi;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = BackendConfig::from_env()?;
    info!(
        base_url = %config.base_url(),
        timeout_seconds = config.request_timeout().as_secs(),
        "probing catalogue backend"
    );
    let api = CatalogueApi::new(&config)?;

    probe(api.activities(), "activities").await?;
    probe(api.destinations(), "destinations").await?;
    Ok(())
}

async fn probe<R: CatalogueRecord>(
    collection: &impl RecordGateway<R>,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = collection.list().await?;
    info!(collection = name, count = records.len(), "collection listed");
    for record in &records {
        info!(collection = name, id = %record.id(), title = record.title(), "record");
    }
    Ok(())
}

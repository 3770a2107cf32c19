//! Real-Debrid client: fetches the active-torrent count that bounds a run.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::capacity::CapacitySnapshot;

use super::error::ClientError;
use super::{CapacitySource, build_http_client};

/// Default Real-Debrid API base URL.
const DEFAULT_BASE_URL: &str = "https://api.real-debrid.com/rest/1.0";

/// Response shape of `GET /torrents/activeCount`.
#[derive(Debug, Deserialize)]
struct ActiveCountResponse {
    /// Currently active torrents.
    nb: u32,
    /// Maximum concurrent torrents allowed.
    limit: u32,
}

/// Client for the Real-Debrid REST API.
pub struct DebridClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DebridClient {
    /// Creates a client against the public Real-Debrid API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if HTTP client construction fails.
    pub fn new(token: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if HTTP client construction fails.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.into(),
            token: token.into(),
        })
    }
}

impl std::fmt::Debug for DebridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebridClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CapacitySource for DebridClient {
    #[tracing::instrument(skip_all)]
    async fn active_count(&self) -> Result<CapacitySnapshot, ClientError> {
        let url = format!("{}/torrents/activeCount", self.base_url);
        debug!(api_url = %url, "fetching active torrent count");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ClientError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::http_status(&url, status.as_u16()));
        }

        let body: ActiveCountResponse = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&url, e.to_string()))?;

        debug!(used = body.nb, limit = body.limit, "capacity snapshot fetched");
        Ok(CapacitySnapshot {
            used: body.nb,
            limit: body.limit,
        })
    }
}

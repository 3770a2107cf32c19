//! MDBList client: retrieves the contents of curated media lists.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ListRef;

use super::error::ClientError;
use super::{Catalog, MediaItem, MediaKind, build_http_client};

/// Default MDBList API base URL.
const DEFAULT_BASE_URL: &str = "https://api.mdblist.com";

/// One item as returned by the MDBList unified items endpoint.
///
/// Fields the loop does not need are ignored; `id` and `mediatype` are kept
/// optional so one unusual entry cannot fail the whole list.
#[derive(Debug, Deserialize)]
struct ListItemResponse {
    id: Option<u64>,
    mediatype: Option<String>,
    title: Option<String>,
}

/// Client for the MDBList REST API.
pub struct MdbListClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MdbListClient {
    /// Creates a client against the public MDBList API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if HTTP client construction fails.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if HTTP client construction fails.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

impl std::fmt::Debug for MdbListClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MdbListClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Catalog for MdbListClient {
    #[tracing::instrument(skip_all, fields(list = %list.name))]
    async fn list_items(&self, list: &ListRef) -> Result<Vec<MediaItem>, ClientError> {
        let url = format!(
            "{}/lists/{}/items?apikey={}&unified=true",
            self.base_url,
            list.id,
            urlencoding::encode(&self.api_key)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::http_status(&url, status.as_u16()));
        }

        let body: Vec<ListItemResponse> = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&url, e.to_string()))?;

        let items: Vec<MediaItem> = body
            .into_iter()
            .map(|item| MediaItem {
                tmdb_id: item.id,
                kind: item.mediatype.as_deref().and_then(MediaKind::from_mediatype),
                title: item.title,
            })
            .collect();

        debug!(count = items.len(), "fetched list items");
        Ok(items)
    }
}

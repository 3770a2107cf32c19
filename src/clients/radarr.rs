//! Radarr client: movie inventory, lookup-by-TMDB-id, and entry creation.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{ArrConfig, ListRef};

use super::error::ClientError;
use super::{Library, build_http_client};

/// Minimal movie record from `GET /api/v3/movie`; only the TMDB id is needed
/// for deduplication.
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "tmdbId")]
    tmdb_id: Option<u64>,
}

/// Client for the Radarr v3 API.
pub struct RadarrClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RadarrClient {
    /// Creates a client from the configured connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if HTTP client construction fails.
    pub fn new(config: &ArrConfig) -> Result<Self, ClientError> {
        Self::with_endpoint(config.endpoint(), &config.api_key)
    }

    /// Creates a client with an explicit endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if HTTP client construction fails.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client()?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

impl std::fmt::Debug for RadarrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarrClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Library for RadarrClient {
    #[tracing::instrument(skip_all)]
    async fn existing_ids(&self) -> Result<HashSet<u64>, ClientError> {
        let url = format!("{}/api/v3/movie", self.endpoint);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| ClientError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::http_status(&url, status.as_u16()));
        }

        let movies: Vec<MovieRecord> = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&url, e.to_string()))?;

        let ids: HashSet<u64> = movies.into_iter().filter_map(|m| m.tmdb_id).collect();
        debug!(count = ids.len(), "fetched existing movie ids");
        Ok(ids)
    }

    #[tracing::instrument(skip(self))]
    async fn lookup(&self, tmdb_id: u64) -> Result<Option<Value>, ClientError> {
        let term = format!("tmdb:{tmdb_id}");
        let url = format!(
            "{}/api/v3/movie/lookup?term={}",
            self.endpoint,
            urlencoding::encode(&term)
        );
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| ClientError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::http_status(&url, status.as_u16()));
        }

        let mut results: Vec<Value> = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&url, e.to_string()))?;

        if results.is_empty() {
            Ok(None)
        } else {
            Ok(Some(results.remove(0)))
        }
    }

    #[tracing::instrument(skip_all, fields(list = %list.name))]
    async fn add(&self, payload: &Value, list: &ListRef) -> Result<(), ClientError> {
        let url = format!("{}/api/v3/movie", self.endpoint);
        let tmdb_id = payload
            .get("tmdbId")
            .and_then(Value::as_u64)
            .ok_or_else(|| ClientError::malformed(&url, "lookup payload missing tmdbId"))?;

        let body = serde_json::json!({
            "tmdbId": tmdb_id,
            "qualityProfileId": list.quality_profile_id,
            "rootFolderPath": list.root_folder_path,
            "addOptions": {
                "monitor": "movieOnly",
                "searchForMovie": true
            }
        });

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::http_status(&url, status.as_u16()));
        }

        let title = payload.get("title").and_then(Value::as_str).unwrap_or("?");
        info!(tmdb_id, title, "added movie");
        Ok(())
    }
}

//! HTTP clients for the external collaborators and the traits the sync core
//! consumes them through.
//!
//! Concrete transport lives in the per-service modules; the sync core only
//! sees the three traits below, which keeps the addition loop testable with
//! in-memory fakes and lets integration tests substitute wiremock servers
//! through each client's `with_base_url` constructor.
//!
//! # Object Safety
//!
//! The traits use `async_trait` to support dynamic dispatch via `&dyn`
//! references. Rust 2024 native async traits are not object-safe, so
//! `async_trait` is required for this seam.

mod debrid;
mod error;
mod mdblist;
mod radarr;
mod sonarr;

pub use debrid::DebridClient;
pub use error::ClientError;
pub use mdblist::MdbListClient;
pub use radarr::RadarrClient;
pub use sonarr::SonarrClient;

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::capacity::CapacitySnapshot;
use crate::config::ListRef;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds an HTTP client with the shared timeout and user-agent policy.
pub(crate) fn build_http_client() -> Result<Client, ClientError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(READ_TIMEOUT)
        .user_agent(concat!("mediarr/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ClientError::build)
}

/// Kind of a candidate media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// A movie, targeted at Radarr.
    Movie,
    /// A show, targeted at Sonarr.
    Show,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Show => write!(f, "show"),
        }
    }
}

impl MediaKind {
    /// Maps an MDBList `mediatype` string; unknown values become `None`.
    #[must_use]
    pub fn from_mediatype(mediatype: &str) -> Option<Self> {
        match mediatype {
            "movie" => Some(Self::Movie),
            "show" => Some(Self::Show),
            _ => None,
        }
    }
}

/// One candidate item from a source list. Transient: produced by list
/// retrieval and consumed by the addition loop within a single run.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// External (TMDB) identifier; items without one are never submitted.
    pub tmdb_id: Option<u64>,
    /// Declared kind; items of the wrong kind for a phase are skipped.
    pub kind: Option<MediaKind>,
    /// Display title for logging.
    pub title: Option<String>,
}

/// Supplies the capacity snapshot that bounds the run.
#[async_trait]
pub trait CapacitySource: Send + Sync {
    /// Fetches the current usage/limit pair.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the backend is unreachable or the
    /// response is malformed. This is the one collaborator failure that is
    /// fatal to the run.
    async fn active_count(&self) -> Result<CapacitySnapshot, ClientError>;
}

/// Retrieves the contents of curated source lists.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches all items of one list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or shape failures; the caller
    /// degrades errors to an empty item sequence.
    async fn list_items(&self, list: &ListRef) -> Result<Vec<MediaItem>, ClientError>;
}

/// A downstream acquisition manager (Radarr for movies, Sonarr for shows).
#[async_trait]
pub trait Library: Send + Sync {
    /// Fetches the external ids already present in the manager's library.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on failure; the caller degrades to an empty
    /// set, relying on the manager to reject duplicates idempotently.
    async fn existing_ids(&self) -> Result<HashSet<u64>, ClientError>;

    /// Looks up a candidate by external id, returning the manager's
    /// enriched creation payload, or `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or shape failures.
    async fn lookup(&self, tmdb_id: u64) -> Result<Option<serde_json::Value>, ClientError>;

    /// Creates a library entry from an enriched payload and the originating
    /// list's target parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when creation fails; the addition loop treats
    /// this as non-fatal and moves on.
    async fn add(&self, payload: &serde_json::Value, list: &ListRef) -> Result<(), ClientError>;
}

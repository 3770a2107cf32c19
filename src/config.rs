//! JSON configuration model and loading.
//!
//! The config file carries service credentials, the ordered movie/show list
//! collections (insertion order is the rotation order), and any blackout
//! windows. It is read once at startup and treated as immutable for the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::schedule::BlackoutWindow;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file contents were not valid config JSON.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Rate-limited debrid backend supplying the capacity snapshot.
    pub real_debrid: DebridConfig,
    /// MDBList credentials for list-content retrieval.
    pub mdblist: MdbListConfig,
    /// Movie acquisition manager.
    pub radarr: ArrConfig,
    /// Show acquisition manager.
    pub sonarr: ArrConfig,
    /// Ordered movie lists; order is the rotation order.
    #[serde(default)]
    pub movies: Vec<ListRef>,
    /// Ordered show lists; order is the rotation order.
    #[serde(default)]
    pub shows: Vec<ListRef>,
    /// Quiet windows during which runs no-op.
    #[serde(default)]
    pub blackouts: Vec<BlackoutWindow>,
}

/// Real-Debrid access settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DebridConfig {
    /// API bearer token.
    pub token: String,
    /// Override of the API base URL (tests and self-hosted proxies).
    #[serde(default)]
    pub base_url: Option<String>,
}

/// MDBList access settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MdbListConfig {
    /// API key passed as a query parameter.
    pub api_key: String,
    /// Override of the API base URL.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Connection settings for a Radarr or Sonarr instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrConfig {
    /// Base URL without port, e.g. `http://localhost`.
    pub base_url: String,
    /// Optional port appended to the base URL.
    #[serde(default)]
    pub port: Option<u16>,
    /// Value for the `X-Api-Key` header.
    pub api_key: String,
}

impl ArrConfig {
    /// Joins the base URL with the optional port.
    #[must_use]
    pub fn endpoint(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.base_url),
            None => self.base_url.clone(),
        }
    }
}

/// One curated source list plus the target-library parameters needed to
/// create entries from it.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRef {
    /// Opaque MDBList list identifier.
    pub id: String,
    /// Display name used in logs.
    pub name: String,
    /// Quality profile applied to entries created from this list.
    pub quality_profile_id: u32,
    /// Root folder for entries created from this list.
    pub root_folder_path: String,
}

/// Loads and parses the configuration file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn minimal_config_json() -> serde_json::Value {
        serde_json::json!({
            "real_debrid": { "token": "rd-token" },
            "mdblist": { "api_key": "mdb-key" },
            "radarr": { "base_url": "http://localhost", "port": 7878, "api_key": "radarr-key" },
            "sonarr": { "base_url": "http://localhost", "port": 8989, "api_key": "sonarr-key" }
        })
    }

    fn write_config(value: &serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    #[test]
    fn test_load_config_minimal_defaults_collections_empty() {
        let file = write_config(&minimal_config_json());
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.real_debrid.token, "rd-token");
        assert!(config.movies.is_empty());
        assert!(config.shows.is_empty());
        assert!(config.blackouts.is_empty());
    }

    #[test]
    fn test_load_config_full() {
        let mut value = minimal_config_json();
        value["movies"] = serde_json::json!([
            { "id": "2194", "name": "Trending Movies", "quality_profile_id": 4,
              "root_folder_path": "/data/movies" }
        ]);
        value["blackouts"] = serde_json::json!([
            { "name": "nightly", "recurrence": "daily",
              "start_time": "23:00", "duration": "3h" }
        ]);
        let file = write_config(&value);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.movies.len(), 1);
        assert_eq!(config.movies[0].name, "Trending Movies");
        assert_eq!(config.movies[0].quality_profile_id, 4);
        assert_eq!(config.blackouts.len(), 1);
    }

    #[test]
    fn test_load_config_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_config_invalid_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_config_missing_required_section_is_parse_error() {
        let mut value = minimal_config_json();
        value.as_object_mut().unwrap().remove("radarr");
        let file = write_config(&value);
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_arr_endpoint_with_and_without_port() {
        let with_port = ArrConfig {
            base_url: "http://localhost".to_string(),
            port: Some(7878),
            api_key: String::new(),
        };
        assert_eq!(with_port.endpoint(), "http://localhost:7878");

        let without_port = ArrConfig {
            base_url: "https://radarr.example.com".to_string(),
            port: None,
            api_key: String::new(),
        };
        assert_eq!(without_port.endpoint(), "https://radarr.example.com");
    }
}

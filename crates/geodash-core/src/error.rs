//! Error types for geodash

use thiserror::Error;

/// Errors raised while fetching or decoding boundary geometry
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid boundary geometry: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A failed map load, as seen by the dashboard controller
///
/// Every fetch or parse problem is converted into this at the loader
/// boundary; nothing past the loader ever sees a [`FetchError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to load map for {map_id}: {message}")]
pub struct LoadFailure {
    pub map_id: String,
    pub message: String,
}

impl LoadFailure {
    pub fn new(map_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            map_id: map_id.into(),
            message: message.into(),
        }
    }

    /// Wrap a fetch error for the given map
    pub fn from_fetch(map_id: impl Into<String>, err: &FetchError) -> Self {
        Self::new(map_id, err.to_string())
    }
}

/// Invalid dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    #[error("base URL must use http or https: {0}")]
    UnsupportedScheme(String),

    #[error("timeline must cover at least one day")]
    EmptyTimeline,

    #[error("national map id must not be empty")]
    EmptyNationalMapId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_names_map() {
        let failure = LoadFailure::new("广东省", "unexpected HTTP status 500");
        assert_eq!(
            failure.to_string(),
            "Unable to load map for 广东省: unexpected HTTP status 500"
        );
    }

    #[test]
    fn test_from_fetch_keeps_status() {
        let err = FetchError::Status {
            url: "http://localhost/440000_full.json".to_string(),
            status: 500,
        };
        let failure = LoadFailure::from_fetch("广东省", &err);
        assert_eq!(failure.map_id, "广东省");
        assert!(failure.message.contains("500"));
    }
}

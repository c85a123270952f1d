//! Dashboard configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Boundary data host serving `{code}_full.json` files
pub const DEFAULT_BASE_URL: &str = "https://geo.datav.aliyun.com/areas_v3/bound";

/// Administrative code of the national map
pub const NATIONAL_CODE: u32 = 100000;

/// Map id the national geometry is registered under
pub const NATIONAL_MAP_ID: &str = "china";

/// Main dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL for boundary geometry downloads
    pub base_url: String,

    /// Administrative code loaded at startup and on "return to national"
    pub national_code: u32,

    /// Map id for the national geometry
    pub national_map_id: String,

    /// Number of days offered by the date selector, ending today
    pub timeline_days: u32,

    /// Optional request timeout; `None` waits indefinitely
    pub fetch_timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            national_code: NATIONAL_CODE,
            national_map_id: NATIONAL_MAP_ID.to_string(),
            timeline_days: 7,
            fetch_timeout: None,
        }
    }
}

impl DashboardConfig {
    /// Point the loader at a different boundary host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeline_days(mut self, days: u32) -> Self {
        self.timeline_days = days;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(base.to_string()));
        }
        if self.timeline_days == 0 {
            return Err(ConfigError::EmptyTimeline);
        }
        if self.national_map_id.is_empty() {
            return Err(ConfigError::EmptyNationalMapId);
        }
        Ok(())
    }
}

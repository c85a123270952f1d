//! Where boundary geometry comes from

use async_trait::async_trait;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::FetchError;
use crate::geometry::BoundaryGeometry;

/// URL of the full boundary file for an administrative code
pub fn boundary_url(base_url: &str, code: u32) -> String {
    format!("{}/{}_full.json", base_url.trim_end_matches('/'), code)
}

/// Source of boundary geometry
///
/// One call is one request; implementations do not cache or retry.
#[async_trait]
pub trait BoundarySource: Send + Sync {
    async fn fetch(&self, code: u32) -> Result<BoundaryGeometry, FetchError>;
}

/// Fetches `{base_url}/{code}_full.json` over HTTP
#[derive(Debug, Clone)]
pub struct HttpBoundarySource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBoundarySource {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Build a client from configuration
    pub fn from_config(config: &DashboardConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.fetch_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?, config.base_url.clone()))
    }
}

#[async_trait]
impl BoundarySource for HttpBoundarySource {
    async fn fetch(&self, code: u32) -> Result<BoundaryGeometry, FetchError> {
        let url = boundary_url(&self.base_url, code);
        debug!(%url, "Fetching boundary geometry");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(BoundaryGeometry::from_slice(&body)?)
    }
}

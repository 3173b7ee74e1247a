//! HTTP client for fetching the race server's specifications page
//!
//! One GET per call, no retries. Any failure is turned into a typed
//! `CatalogUnavailable` value and logged instead of being raised.

use anyhow::{anyhow, Result};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::cost_catalog::CatalogUnavailable;
use crate::infrastructure::config::CatalogConfig;

/// Configuration for HTTP client behavior
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl HttpClientConfig {
    pub fn from_catalog_config(catalog: &CatalogConfig) -> Self {
        Self {
            timeout_seconds: catalog.request_timeout_seconds,
            user_agent: catalog.user_agent.clone(),
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("buggy-race-editor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn from_catalog_config(catalog: &CatalogConfig) -> Result<Self> {
        Self::with_config(HttpClientConfig::from_catalog_config(catalog))
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    /// Fetch a page body as a string.
    ///
    /// Only a 200 response counts as a document; every other status and any
    /// transport error yields `CatalogUnavailable`.
    pub async fn fetch_html_string(&self, url: &str) -> Result<String, CatalogUnavailable> {
        info!("🌐 HTTP GET: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("⚠️ Request to {} failed: {}", url, e);
            CatalogUnavailable::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("❌ HTTP {} from {}", status, url);
            return Err(CatalogUnavailable::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| {
            warn!("⚠️ Failed to read response body from {}: {}", url, e);
            CatalogUnavailable::Transport {
                url: url.to_string(),
                reason: format!("failed to read response body: {e}"),
            }
        })?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

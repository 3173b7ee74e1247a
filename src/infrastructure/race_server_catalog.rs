//! Cost catalog scraped from the race server
//!
//! Fetches `{base_url}/specs` and parses it with `CostTableParser`. Nothing
//! is cached: every call goes back to the server.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::domain::constants::race_server::SPECS_PATH;
use crate::domain::cost_catalog::{CatalogUnavailable, CostCatalog};
use crate::domain::services::CatalogSource;
use crate::infrastructure::config::CatalogConfig;
use crate::infrastructure::html_parser::CostTableParser;
use crate::infrastructure::simple_http_client::HttpClient;

#[derive(Debug)]
pub struct RaceServerCatalog {
    base_url: String,
    client: HttpClient,
    parser: CostTableParser,
}

impl RaceServerCatalog {
    pub fn new(base_url: impl Into<String>, client: HttpClient, parser: CostTableParser) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            parser,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Ok(Self::new(
            config.base_url.clone(),
            HttpClient::from_catalog_config(config)?,
            CostTableParser::new()?,
        ))
    }

    /// `{base_url}/specs`, tolerating a trailing slash on the base
    pub fn specs_url(&self) -> Result<Url, CatalogUnavailable> {
        let joined = format!("{}{}", self.base_url.trim_end_matches('/'), SPECS_PATH);
        Url::parse(&joined).map_err(|e| CatalogUnavailable::InvalidUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for RaceServerCatalog {
    async fn load_catalog(&self) -> Result<CostCatalog, CatalogUnavailable> {
        let url = self.specs_url()?;

        match self.client.fetch_html_string(url.as_str()).await {
            Ok(html) => {
                let catalog = self.parser.parse(&html);
                info!("Loaded {} catalog entries from {}", catalog.len(), url);
                Ok(catalog)
            }
            Err(e) => {
                warn!("Pricing data unavailable: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simple_http_client::HttpClientConfig;

    fn catalog_for(base_url: &str) -> RaceServerCatalog {
        RaceServerCatalog::new(
            base_url,
            HttpClient::with_config(HttpClientConfig::default()).unwrap(),
            CostTableParser::new().unwrap(),
        )
    }

    #[test]
    fn specs_url_appends_path() {
        assert_eq!(
            catalog_for("https://rhul.buggyrace.net").specs_url().unwrap().as_str(),
            "https://rhul.buggyrace.net/specs"
        );
        assert_eq!(
            catalog_for("http://localhost:8080/").specs_url().unwrap().as_str(),
            "http://localhost:8080/specs"
        );
    }

    #[test]
    fn invalid_base_url_is_unavailable() {
        assert!(matches!(
            catalog_for("not a url").specs_url(),
            Err(CatalogUnavailable::InvalidUrl { .. })
        ));
    }
}

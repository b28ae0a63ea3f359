//! Read-only proxy to the public imagery services
//!
//! Responses are relayed as opaque JSON. Nothing here is cached.

use crate::config::ImageryConfig;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Query used when an image search has none
pub const DEFAULT_SEARCH_QUERY: &str = "solar system";

/// Upstream failures
#[derive(Debug, Error)]
pub enum ImageryError {
    /// Network failure, timeout or undecodable body
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("upstream returned status {0}")]
    Status(u16),
}

/// HTTP client for the picture-of-the-day and image search services
#[derive(Debug, Clone)]
pub struct ImageryClient {
    client: Client,
    config: ImageryConfig,
}

impl ImageryClient {
    pub fn new(config: ImageryConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Picture of the day.
    ///
    /// Every caller parameter is forwarded; the configured key is sent unless
    /// the caller supplies its own `api_key`.
    pub async fn apod(&self, params: &BTreeMap<String, String>) -> Result<Value, ImageryError> {
        let mut query = BTreeMap::new();
        query.insert("api_key".to_string(), self.config.api_key.clone());
        query.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        self.fetch(&self.config.apod_url, &query).await
    }

    /// Image search; a blank query falls back to [`DEFAULT_SEARCH_QUERY`]
    pub async fn search(&self, q: Option<&str>) -> Result<Value, ImageryError> {
        let q = q
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_SEARCH_QUERY);

        let mut query = BTreeMap::new();
        query.insert("q".to_string(), q.to_string());
        query.insert("media_type".to_string(), "image".to_string());

        self.fetch(&self.config.search_url, &query).await
    }

    async fn fetch(
        &self,
        url: &str,
        query: &BTreeMap<String, String>,
    ) -> Result<Value, ImageryError> {
        tracing::debug!(url, "Forwarding imagery request");
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageryError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

//! HTTP client for the orrery daemon

use crate::error::{StoreError, StoreResult};
use crate::imagery::ApodPicture;
use crate::store::PlanetStore;
use async_trait::async_trait;
use orrery_types::{
    CreatePlanetRequest, CreatePlanetResponse, DeletePlanetResponse, ErrorBody, PlanetDraft,
    PlanetId, PlanetRecord,
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Entity store backed by the daemon's `/api/planets` routes
#[derive(Debug, Clone)]
pub struct HttpPlanetStore {
    client: Client,
    base_url: String,
}

/// Daemon health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonHealth {
    /// "healthy" when the daemon is serving
    pub status: String,
    /// Daemon version
    pub version: String,
    /// Uptime string
    pub uptime: String,
    /// Storage backend name
    #[serde(default)]
    pub storage: Option<String>,
}

impl HttpPlanetStore {
    /// Create a new store client for the given daemon endpoint
    pub fn new(endpoint: &str) -> StoreResult<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Daemon endpoint without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check daemon health
    pub async fn health(&self) -> StoreResult<DaemonHealth> {
        self.get("/health").await
    }

    /// Picture of the day, optionally for a given `YYYY-MM-DD` date
    pub async fn apod(&self, date: Option<&str>) -> StoreResult<ApodPicture> {
        let url = format!("{}/api/nasa/apod", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(date) = date {
            request = request.query(&[("date", date)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Raw image-search response for one body name
    pub async fn planet_images(&self, name: &str) -> StoreResult<Value> {
        self.get(&format!("/api/nasa/planet/{}", name)).await
    }

    // ========== Internal HTTP helpers ==========

    async fn get<T: DeserializeOwned>(&self, path: &str) -> StoreResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> StoreResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn delete_path<T: DeserializeOwned>(&self, path: &str) -> StoreResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.delete(&url).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> StoreResult<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.error,
            Err(_) if text.trim().is_empty() => format!("request failed with status {}", status),
            Err(_) => text,
        };

        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PlanetStore for HttpPlanetStore {
    async fn list(&self) -> StoreResult<Vec<PlanetRecord>> {
        self.get("/api/planets").await
    }

    async fn create(&self, draft: &PlanetDraft) -> StoreResult<PlanetId> {
        let request = CreatePlanetRequest::from(draft);
        let response: CreatePlanetResponse = self.post("/api/planets", &request).await?;
        tracing::debug!(planet_id = %response.id, "Planet created");
        Ok(response.id)
    }

    async fn delete(&self, id: PlanetId) -> StoreResult<()> {
        let response: DeletePlanetResponse = self
            .delete_path(&format!("/api/planets/{}", id.get()))
            .await?;
        if !response.deleted {
            tracing::debug!(planet_id = %id, "Planet was already absent");
        }
        Ok(())
    }
}

//! Client side of the daemon's imagery proxy

use crate::error::StoreResult;
use crate::http::HttpPlanetStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Astronomy picture of the day, as relayed by the daemon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApodPicture {
    pub title: String,
    pub date: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// First image link of an image-search response
/// (`collection.items[0].links[0].href`)
pub fn first_image_link(search: &Value) -> Option<String> {
    search
        .pointer("/collection/items/0/links/0/href")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Per-name image link cache for one viewing session.
///
/// Only successful lookups are cached, including ones that found no image;
/// a failed request is retried on the next call.
#[derive(Debug, Default)]
pub struct PlanetImageCache {
    links: Mutex<HashMap<String, Option<String>>>,
}

impl PlanetImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image link for a body, fetched at most once per name
    pub async fn link(&self, store: &HttpPlanetStore, name: &str) -> StoreResult<Option<String>> {
        let key = name.trim().to_lowercase();
        if let Some(link) = self.links.lock().await.get(&key) {
            return Ok(link.clone());
        }

        let search = store.planet_images(name.trim()).await?;
        let link = first_image_link(&search);
        tracing::debug!(planet = %key, found = link.is_some(), "Planet imagery cached");
        self.links.lock().await.insert(key, link.clone());
        Ok(link)
    }

    pub async fn len(&self) -> usize {
        self.links.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.lock().await.is_empty()
    }
}

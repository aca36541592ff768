//! HTTP menu source and response projection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::{DomainError, DomainResult, MenuItem};

/// Body of the menu endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub menu: Vec<RemoteMenuEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteMenuEntry {
    pub name: String,
    pub price: RemotePrice,
    pub description: String,
    pub image: String,
    pub category: String,
}

/// Price as published: normally a JSON number, occasionally already text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemotePrice {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for RemotePrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemotePrice::Number(n) => write!(f, "{}", n),
            RemotePrice::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Project remote entries into cache rows, ids 1-based in response order
pub fn into_menu_items(entries: Vec<RemoteMenuEntry>) -> Vec<MenuItem> {
    entries
        .into_iter()
        .zip(1u32..)
        .map(|(entry, id)| MenuItem {
            id,
            name: entry.name,
            price: entry.price.to_string(),
            description: entry.description,
            image: entry.image,
            category: entry.category,
        })
        .collect()
}

/// Where the menu comes from when the cache is empty
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_menu(&self) -> DomainResult<Vec<RemoteMenuEntry>>;
}

/// reqwest-backed menu source
pub struct HttpMenuSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMenuSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Use a preconfigured client, e.g. one without proxy lookup
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch_menu(&self) -> DomainResult<Vec<RemoteMenuEntry>> {
        log::info!("Fetching menu from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Network(e.to_string()))?;

        let body: MenuResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Network(format!("Unexpected menu body: {}", e)))?;

        log::info!("Fetched {} menu entries", body.menu.len());
        Ok(body.menu)
    }
}

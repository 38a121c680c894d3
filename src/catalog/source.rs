//! Catalog transport - where catalog responses come from

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Catalog, CatalogResponse};

/// Why a single catalog fetch attempt did not produce a usable catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("Empty response")]
    Empty,
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Parse(String),
}

/// Anything able to produce one catalog response per call
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<CatalogResponse, LoadError>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    async fn fetch(&self) -> Result<CatalogResponse, LoadError> {
        (**self).fetch().await
    }
}

/// Accept a response only if it is flagged ok and carries units
pub fn accept(response: CatalogResponse) -> Result<Catalog, LoadError> {
    if response.ok && !response.lots.is_empty() {
        Ok(Catalog {
            units: response.lots,
            stats: response.stats,
        })
    } else {
        Err(LoadError::Empty)
    }
}

/// Reads the catalog endpoint over HTTP, bypassing caches
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpCatalogSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        HttpCatalogSource {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<CatalogResponse, LoadError> {
        let resp = self
            .client
            .get(&self.url)
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LoadError::Transport(format!("Request timed out ({}s)", self.timeout.as_secs()))
                } else if e.is_connect() {
                    LoadError::Transport(format!("Connection failed: {}", e))
                } else {
                    LoadError::Transport(format!("Request failed: {}", e))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| LoadError::Transport(format!("Error reading body: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| LoadError::Parse(format!("Invalid catalog: {}", e)))
    }
}

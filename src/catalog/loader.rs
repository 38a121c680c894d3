//! Catalog loader - bounded, strictly sequential retry around a [`CatalogSource`]

use std::time::Duration;

use crate::catalog::source::{accept, CatalogSource, LoadError};
use crate::constants::{LOAD_RETRY_BACKOFF, MAX_LOAD_ATTEMPTS};
use crate::models::Catalog;

/// Catalog as the view sees it: still loading, loaded, or given up on
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Catalog),
    Failed { message: String },
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            LoadState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

pub struct CatalogLoader<S> {
    source: S,
    max_attempts: u32,
    backoff: Duration,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        CatalogLoader {
            source,
            max_attempts: MAX_LOAD_ATTEMPTS,
            backoff: LOAD_RETRY_BACKOFF,
        }
    }

    /// Override the attempt bound (at least one) and the pause between attempts
    #[cfg(test)]
    pub(crate) fn with_policy(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    /// Fetch until one attempt yields a usable catalog or the bound is hit.
    ///
    /// An error is the one from the last attempt.
    pub async fn load(&self) -> Result<Catalog, LoadError> {
        let mut last_error = LoadError::Empty;

        for attempt in 1..=self.max_attempts {
            match self.source.fetch().await.and_then(accept) {
                Ok(catalog) => {
                    tracing::info!(attempt, units = catalog.units.len(), "Catalog loaded");
                    return Ok(catalog);
                }
                Err(e) => {
                    tracing::warn!(attempt, max = self.max_attempts, error = %e, "Catalog attempt failed");
                    last_error = e;
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
            }
        }

        tracing::error!(error = %last_error, "Catalog load gave up");
        Err(last_error)
    }
}

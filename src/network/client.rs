//! HTTP client wrapper - catalog loads and submission dispatch

use crate::catalog::{CatalogLoader, HttpCatalogSource};
use crate::config::Endpoints;
use crate::messages::NetworkResponse;
use crate::models::SubmissionPayload;

/// Run one full catalog load and wrap its outcome as a response
pub async fn load_catalog(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    generation: u64,
) -> NetworkResponse {
    let source = HttpCatalogSource::new(
        client.clone(),
        endpoints.lots_url.clone(),
        endpoints.catalog_timeout,
    );

    match CatalogLoader::new(source).load().await {
        Ok(catalog) => NetworkResponse::CatalogReady { generation, catalog },
        Err(e) => NetworkResponse::CatalogFailed {
            generation,
            message: e.to_string(),
        },
    }
}

/// Post a submission. The outcome is logged and otherwise ignored.
pub async fn dispatch_submission(client: &reqwest::Client, url: &str, payload: SubmissionPayload) {
    let code = payload.lot.code.clone();
    match client.post(url).json(&payload).send().await {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!(code = %code, status = resp.status().as_u16(), "Submission delivered");
        }
        Ok(resp) => {
            tracing::debug!(code = %code, status = resp.status().as_u16(), "Submission rejected, ignoring");
        }
        Err(e) => {
            tracing::debug!(code = %code, error = %e, "Submission failed, ignoring");
        }
    }
}

/// Create an HTTP client with default configuration.
///
/// No global timeout: catalog reads set their own, dispatches have none.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

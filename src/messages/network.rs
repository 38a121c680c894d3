//! Network messages - communication between App and Network layers

use crate::models::{Catalog, SubmissionPayload};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run a full catalog load; `generation` tags its result
    LoadCatalog { generation: u64 },
    /// Send a submission and forget about it
    DispatchSubmission { payload: SubmissionPayload },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Catalog load finished with a usable catalog
    CatalogReady { generation: u64, catalog: Catalog },
    /// Catalog load exhausted its attempts
    CatalogFailed { generation: u64, message: String },
}

impl NetworkResponse {
    /// Get the load generation the response belongs to
    pub fn generation(&self) -> u64 {
        match self {
            NetworkResponse::CatalogReady { generation, .. } => *generation,
            NetworkResponse::CatalogFailed { generation, .. } => *generation,
        }
    }
}

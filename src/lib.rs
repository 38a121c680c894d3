//! # lotpick
//!
//! Browse a fixed catalog of real-estate units, narrow down to one unit and
//! hand a "request this unit" intent off to a bot backend.
//!
//! ## Features
//! - Catalog load with bounded retry (3 attempts, 1s apart)
//! - Building / floor / status filter navigation
//! - Single selection, sold units are never selectable
//! - Host main button kept in sync with the selection
//! - Single-flight, fire-and-forget submission followed by host close
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous, also plays the host platform
//! - App Layer (State machine) - navigation, selection, submission
//! - Network Layer (Tokio runtime) - catalog loads and dispatches

pub mod constants;
pub mod config;
pub mod models;
pub mod catalog;
pub mod navigation;
pub mod selection;
pub mod submission;
pub mod host;
pub mod messages;
pub mod app;
pub mod network;
pub mod ui;
pub mod tui;

// Re-export commonly used types
pub use models::{Building, Catalog, CatalogStats, Unit, UnitStatus};
pub use catalog::{CatalogLoader, CatalogSource, LoadState};
pub use navigation::{NavigationState, StatusFilter};
pub use selection::SelectionModel;
pub use submission::SubmissionFlow;
pub use host::{ControlState, HostBridge, HostHandle, HostPlatform, MainButton};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use config::Config;

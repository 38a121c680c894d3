//! Catalog layer - fetching the unit catalog with bounded retry
//!
//! The loader is transport-agnostic; the HTTP source is what the
//! network actor plugs in.

pub mod loader;
pub mod source;

pub use loader::{CatalogLoader, LoadState};
pub use source::{CatalogSource, HttpCatalogSource, LoadError};

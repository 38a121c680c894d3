//! Network layer - catalog loads and submission dispatch
//!
//! The Network actor receives commands from the App layer and sends back
//! catalog load results. Submissions are fire-and-forget.

pub mod actor;
pub mod client;

#[cfg(test)]
pub(crate) mod testing;

pub use actor::NetworkActor;

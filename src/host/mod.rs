//! Host layer - the embedding environment seen through a narrow capability trait
//!
//! Every call goes through [`HostHandle`], which turns an absent host into a
//! silent no-op so the core also runs headless.

pub mod bridge;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::messages::UiEvent;

pub use bridge::{ControlState, HostBridge};

/// Where main button activations are delivered
#[derive(Clone, Debug)]
pub struct ActivationSink {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl ActivationSink {
    pub fn new(tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        ActivationSink { tx }
    }

    pub fn fire(&self) {
        let _ = self.tx.send(UiEvent::MainButtonPressed);
    }
}

/// The host's primary action control
pub trait MainButton: Send + Sync {
    fn set_text(&self, text: &str);
    fn show(&self);
    fn hide(&self);
    fn enable(&self);
    fn disable(&self);
    /// Register the activation handler, replacing any previous one
    fn on_click(&self, sink: ActivationSink);
    fn off_click(&self);
}

/// Capabilities the embedding environment may offer
pub trait HostPlatform: Send + Sync {
    /// Signal that the view is ready to be shown
    fn ready(&self) {}

    /// Ask for the full available viewport
    fn expand(&self) {}

    /// External identifier of the user, if the host knows it
    fn user_id(&self) -> Option<i64> {
        None
    }

    /// The primary action control, if the host has one
    fn main_button(&self) -> Option<&dyn MainButton> {
        None
    }

    /// Request termination of the hosting session
    fn close(&self) -> anyhow::Result<()>;
}

/// Guarded access to an optional host
#[derive(Clone, Default)]
pub struct HostHandle {
    inner: Option<Arc<dyn HostPlatform>>,
}

impl HostHandle {
    pub fn new(host: Arc<dyn HostPlatform>) -> Self {
        HostHandle { inner: Some(host) }
    }

    pub fn headless() -> Self {
        Self::default()
    }

    pub fn is_headless(&self) -> bool {
        self.inner.is_none()
    }

    /// Readiness and expansion signals sent once at view start
    pub fn start_session(&self) {
        if let Some(host) = &self.inner {
            host.ready();
            host.expand();
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.inner.as_ref().and_then(|host| host.user_id())
    }

    pub fn main_button(&self) -> Option<&dyn MainButton> {
        self.inner.as_ref().and_then(|host| host.main_button())
    }

    pub fn close(&self) -> anyhow::Result<()> {
        match &self.inner {
            Some(host) => host.close(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for HostHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostHandle")
            .field("headless", &self.is_headless())
            .finish()
    }
}

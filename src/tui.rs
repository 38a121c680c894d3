//! Terminal host - plays the embedding platform for the terminal front-end
//!
//! The main button lives in the status bar. The UI loop reads its view and
//! forwards key presses through [`TuiHost::press`]; the app only ever talks to
//! it through the host traits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::host::{ActivationSink, HostPlatform, MainButton};

/// What the status bar shows for the main button
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MainButtonView {
    pub text: String,
    pub visible: bool,
    pub enabled: bool,
}

#[derive(Default)]
pub struct TuiHost {
    button: Mutex<MainButtonView>,
    sink: Mutex<Option<ActivationSink>>,
    user_id: Option<i64>,
    closed: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TuiHost {
    pub fn new(user_id: Option<i64>) -> Self {
        TuiHost {
            user_id,
            ..Default::default()
        }
    }

    pub fn button_view(&self) -> MainButtonView {
        lock(&self.button).clone()
    }

    /// Activate the main button; fires only when shown, enabled and subscribed
    pub fn press(&self) -> bool {
        let view = self.button_view();
        if !view.visible || !view.enabled {
            return false;
        }
        match lock(&self.sink).as_ref() {
            Some(sink) => {
                sink.fire();
                true
            }
            None => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl MainButton for TuiHost {
    fn set_text(&self, text: &str) {
        lock(&self.button).text = text.to_string();
    }

    fn show(&self) {
        lock(&self.button).visible = true;
    }

    fn hide(&self) {
        lock(&self.button).visible = false;
    }

    fn enable(&self) {
        lock(&self.button).enabled = true;
    }

    fn disable(&self) {
        lock(&self.button).enabled = false;
    }

    fn on_click(&self, sink: ActivationSink) {
        *lock(&self.sink) = Some(sink);
    }

    fn off_click(&self) {
        *lock(&self.sink) = None;
    }
}

impl HostPlatform for TuiHost {
    fn ready(&self) {
        tracing::info!("Terminal host ready");
    }

    // the terminal view is always full-screen
    fn expand(&self) {
        tracing::debug!("Expand requested");
    }

    fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    fn main_button(&self) -> Option<&dyn MainButton> {
        Some(self)
    }

    fn close(&self) -> anyhow::Result<()> {
        tracing::info!("Host close requested");
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

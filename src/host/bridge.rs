//! Host bridge - mirrors selection/submission onto the host's main button

use crate::constants::{LABEL_CONFIRM, LABEL_SENDING};
use crate::host::{ActivationSink, HostHandle, MainButton};

/// What the main button should look like
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlState {
    Hidden,
    VisibleEnabled,
    VisibleDisabled,
}

impl ControlState {
    pub fn derive(selection_present: bool, sending: bool) -> Self {
        match (selection_present, sending) {
            (_, true) => ControlState::VisibleDisabled,
            (true, false) => ControlState::VisibleEnabled,
            (false, false) => ControlState::Hidden,
        }
    }

    fn apply(&self, button: &dyn MainButton) {
        match self {
            ControlState::Hidden => button.hide(),
            ControlState::VisibleEnabled => {
                button.set_text(LABEL_CONFIRM);
                button.show();
                button.enable();
            }
            ControlState::VisibleDisabled => {
                button.set_text(LABEL_SENDING);
                button.disable();
            }
        }
    }
}

/// Owns the single activation handler and the last applied control state
#[derive(Debug)]
pub struct HostBridge {
    host: HostHandle,
    applied: Option<ControlState>,
    attached: bool,
}

impl HostBridge {
    pub fn new(host: HostHandle) -> Self {
        HostBridge {
            host,
            applied: None,
            attached: false,
        }
    }

    /// Register the activation handler; a second call is a no-op
    pub fn attach(&mut self, sink: ActivationSink) {
        if self.attached {
            return;
        }
        if let Some(button) = self.host.main_button() {
            button.on_click(sink);
            self.attached = true;
            tracing::debug!("Main button handler attached");
        }
    }

    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        if let Some(button) = self.host.main_button() {
            button.off_click();
        }
        self.attached = false;
        tracing::debug!("Main button handler detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Re-derive the control state and push it to the host if it changed
    pub fn sync(&mut self, selection_present: bool, sending: bool) -> ControlState {
        let target = ControlState::derive(selection_present, sending);
        if self.applied == Some(target) {
            return target;
        }
        if let Some(button) = self.host.main_button() {
            target.apply(button);
        }
        tracing::debug!(state = ?target, "Main button state applied");
        self.applied = Some(target);
        target
    }

    pub fn applied(&self) -> Option<ControlState> {
        self.applied
    }
}

impl Drop for HostBridge {
    fn drop(&mut self) {
        self.detach();
    }
}

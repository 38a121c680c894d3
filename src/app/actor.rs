//! App actor - message loop processing UI events, host activations and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::constants::CLOSE_DELAY;
use crate::host::{ActivationSink, HostBridge, HostHandle};
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::submission::schedule_close;

/// App actor that owns all view state and the host bridge
pub struct AppActor {
    state: AppState,
    host: HostHandle,
    bridge: HostBridge,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    /// Loops host activations and timers back into this actor
    ui_tx: mpsc::UnboundedSender<UiEvent>,
}

impl AppActor {
    pub fn new(
        host: HostHandle,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
        ui_tx: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            bridge: HostBridge::new(host.clone()),
            host,
            network_tx,
            render_tx,
            ui_tx,
        }
    }

    /// View activation: host signals, handler registration, first load
    pub fn start(&mut self) {
        self.host.start_session();
        self.bridge.attach(ActivationSink::new(self.ui_tx.clone()));
        let _ = self.network_tx.send(self.state.begin_load());
        self.publish();
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        self.start();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.publish();
                }
                else => break,
            }
        }

        self.bridge.detach();
        let _ = self.network_tx.send(NetworkCommand::Shutdown);
    }

    /// Sync the host control, then hand a fresh snapshot to the UI
    fn publish(&mut self) {
        self.bridge.sync(
            self.state.selection.is_present(),
            self.state.submission.is_sending(),
        );
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::SelectBuilding(building) => self.state.select_building(building),
            UiEvent::CycleFilter => self.state.cycle_filter(),
            UiEvent::FloorCursorUp => self.state.floor_cursor_up(),
            UiEvent::FloorCursorDown => self.state.floor_cursor_down(),
            UiEvent::ToggleFloor => self.state.toggle_focused_floor(),

            // Selection
            UiEvent::UnitCursorLeft => self.state.unit_cursor_left(),
            UiEvent::UnitCursorRight => self.state.unit_cursor_right(),
            UiEvent::SelectFocused => {
                self.state.select_focused();
            }
            UiEvent::Deselect => self.state.deselect(),

            // Submission
            UiEvent::MainButtonPressed => self.submit(),
            UiEvent::SubmissionFinished => self.state.finish_submission(),

            // System
            UiEvent::Reload => {
                if let Some(cmd) = self.state.reload() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::Quit => return true,
        }

        false
    }

    fn submit(&mut self) {
        let Some(cmd) = self.state.submit(self.host.user_id()) else {
            return;
        };
        // disable the control before anything leaves the process
        self.publish();
        let _ = self.network_tx.send(cmd);
        schedule_close(self.host.clone(), CLOSE_DELAY, self.ui_tx.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;
    use crate::host::ControlState;
    use crate::models::{Building, Catalog, CatalogStats, Unit, UnitStatus};
    use std::sync::Arc;
    use std::time::Duration;

    struct Harness {
        actor: AppActor,
        host: Arc<RecordingHost>,
        net_rx: mpsc::UnboundedReceiver<NetworkCommand>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    }

    fn harness() -> Harness {
        let host = Arc::new(RecordingHost {
            user_id: Some(4242),
            ..Default::default()
        });
        let (net_tx, net_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let mut actor = AppActor::new(HostHandle::new(host.clone()), net_tx, render_tx, ui_tx);
        actor.start();
        Harness { actor, host, net_rx, render_rx, ui_rx }
    }

    fn catalog() -> Catalog {
        Catalog {
            units: vec![
                Unit {
                    code: "A1".into(),
                    building: Building::One,
                    floor: 5,
                    area: 45.0,
                    price: 5_200_000,
                    status: UnitStatus::Available,
                    layout_url: None,
                },
                Unit {
                    code: "A2".into(),
                    building: Building::One,
                    floor: 5,
                    area: 46.0,
                    price: 5_300_000,
                    status: UnitStatus::Sold,
                    layout_url: None,
                },
            ],
            stats: CatalogStats { available: 1, booked: 0, sold: 1, total: 2 },
        }
    }

    fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
        let mut items = Vec::new();
        while let Ok(item) = rx.try_recv() {
            items.push(item);
        }
        items
    }

    #[tokio::test]
    async fn test_start_registers_once_and_requests_load() {
        let mut h = harness();
        let (tx, _rx) = mpsc::unbounded_channel();
        h.actor.bridge.attach(ActivationSink::new(tx));

        let calls = h.host.calls();
        assert_eq!(&calls[..2], ["ready", "expand"]);
        assert_eq!(calls.iter().filter(|c| *c == "on_click").count(), 1);
        assert_eq!(h.actor.bridge.applied(), Some(ControlState::Hidden));

        let cmds = drain(&mut h.net_rx);
        assert!(matches!(cmds[0], NetworkCommand::LoadCatalog { generation: 1 }));
        assert!(!drain(&mut h.render_rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_s3_double_activation_dispatches_once() {
        let mut h = harness();
        h.actor.state.handle_response(NetworkResponse::CatalogReady { generation: 1, catalog: catalog() });
        h.actor.handle_ui_event(UiEvent::ToggleFloor);
        h.actor.handle_ui_event(UiEvent::SelectFocused);
        h.actor.publish();
        assert_eq!(h.actor.bridge.applied(), Some(ControlState::VisibleEnabled));
        drain(&mut h.net_rx);
        h.host.clear();

        // two clicks land in the actor's inbox before it runs
        h.host.click();
        h.host.click();
        for event in drain(&mut h.ui_rx) {
            h.actor.handle_ui_event(event);
        }

        let dispatches: Vec<_> = drain(&mut h.net_rx)
            .into_iter()
            .filter_map(|cmd| match cmd {
                NetworkCommand::DispatchSubmission { payload } => Some(payload),
                _ => None,
            })
            .collect();
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].lot.code, "A1");
        assert_eq!(dispatches[0].user_id, Some(4242));
        assert_eq!(
            h.host.calls().iter().filter(|c| *c == "disable").count(),
            1,
            "enabled -> disabled exactly once"
        );

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(h.host.close_count(), 1);

        assert_eq!(drain(&mut h.ui_rx), vec![UiEvent::SubmissionFinished]);
        h.actor.handle_ui_event(UiEvent::SubmissionFinished);
        assert!(h.actor.state.selection.selected().is_none());
        h.actor.publish();
        assert_eq!(h.actor.bridge.applied(), Some(ControlState::VisibleDisabled));
    }

    #[tokio::test]
    async fn test_activation_without_selection_is_ignored() {
        let mut h = harness();
        h.actor.state.handle_response(NetworkResponse::CatalogReady { generation: 1, catalog: catalog() });
        drain(&mut h.net_rx);

        h.actor.handle_ui_event(UiEvent::MainButtonPressed);

        assert!(drain(&mut h.net_rx).is_empty());
        assert!(!h.actor.state.submission.is_sending());
    }

    #[tokio::test]
    async fn test_reload_after_failure_sends_new_generation() {
        let mut h = harness();
        drain(&mut h.net_rx);
        h.actor.state.handle_response(NetworkResponse::CatalogFailed {
            generation: 1,
            message: "Empty response".into(),
        });

        h.actor.handle_ui_event(UiEvent::Reload);

        let cmds = drain(&mut h.net_rx);
        assert!(matches!(cmds.as_slice(), [NetworkCommand::LoadCatalog { generation: 2 }]));
    }

    #[tokio::test]
    async fn test_run_detaches_and_shuts_down_network() {
        let host = Arc::new(RecordingHost::default());
        let (net_tx, mut net_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_resp_tx, resp_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(HostHandle::new(host.clone()), net_tx, render_tx, ui_tx.clone());

        ui_tx.send(UiEvent::Quit).unwrap();
        actor.run(ui_rx, resp_rx).await;

        assert!(host.calls().contains(&"off_click".to_string()));
        assert!(host.sink.lock().unwrap().is_none());
        let cmds = drain(&mut net_rx);
        assert!(matches!(cmds.last(), Some(NetworkCommand::Shutdown)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_select_submit_finish() {
        let (net_tx, mut net_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
        let mut actor = AppActor::new(HostHandle::headless(), net_tx, render_tx, ui_tx);
        actor.start();
        actor.state.handle_response(NetworkResponse::CatalogReady { generation: 1, catalog: catalog() });
        drain(&mut net_rx);

        actor.handle_ui_event(UiEvent::ToggleFloor);
        actor.handle_ui_event(UiEvent::SelectFocused);
        actor.publish();
        assert_eq!(actor.bridge.applied(), Some(ControlState::VisibleEnabled));

        // no host button to click; the activation still arrives as an event
        actor.handle_ui_event(UiEvent::MainButtonPressed);
        actor.handle_ui_event(UiEvent::MainButtonPressed);
        let cmds = drain(&mut net_rx);
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            NetworkCommand::DispatchSubmission { payload } => {
                assert_eq!(payload.lot.code, "A1");
                assert_eq!(payload.user_id, None);
            }
            other => panic!("expected dispatch, got {:?}", other),
        }

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(drain(&mut ui_rx), vec![UiEvent::SubmissionFinished]);
        actor.handle_ui_event(UiEvent::SubmissionFinished);
        actor.publish();
        assert!(actor.state.selection.selected().is_none());
        assert_eq!(actor.bridge.applied(), Some(ControlState::VisibleDisabled));
    }
}

//! Submission flow - single-flight hand-off of the selected unit
//!
//! `submit` is the only place that flips `sending`, and it does so in the
//! same `&mut self` call that checks it, so a second activation can never
//! produce a second payload.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::host::HostHandle;
use crate::messages::UiEvent;
use crate::models::{LotPayload, SubmissionPayload};
use crate::selection::SelectionModel;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionFlow {
    sending: bool,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Build the payload for the selected unit and mark the flow as sending.
    ///
    /// Returns `None` when a submission already went out or nothing is
    /// selected. `sending` is never reset: the session is expected to end.
    pub fn submit(&mut self, selection: &SelectionModel, user_id: Option<i64>) -> Option<SubmissionPayload> {
        if self.sending {
            tracing::debug!("Submission already in flight, ignoring activation");
            return None;
        }
        let unit = selection.selected()?;

        self.sending = true;
        tracing::info!(code = %unit.code, has_user = user_id.is_some(), "Submitting unit");
        Some(SubmissionPayload {
            lot: LotPayload::from(unit),
            user_id,
        })
    }

    /// End of a run: the selection has been handed off
    pub fn finish(&self, selection: &mut SelectionModel) {
        if self.sending {
            selection.deselect();
        }
    }
}

/// After `delay`, ask the host to close and report back with
/// [`UiEvent::SubmissionFinished`]. Close errors are dropped.
pub fn schedule_close(
    host: HostHandle,
    delay: Duration,
    notify: mpsc::UnboundedSender<UiEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = host.close() {
            tracing::debug!(error = %e, "Host close request failed");
        }
        let _ = notify.send(UiEvent::SubmissionFinished);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;
    use crate::models::{Building, Unit, UnitStatus};
    use std::sync::Arc;

    fn selection_with_a1() -> SelectionModel {
        let mut selection = SelectionModel::new();
        selection.select(&Unit {
            code: "A1".into(),
            building: Building::One,
            floor: 5,
            area: 45.0,
            price: 5_200_000,
            status: UnitStatus::Available,
            layout_url: Some("https://cdn/a1.png".into()),
        });
        selection
    }

    #[test]
    fn test_double_submit_yields_one_payload() {
        let selection = selection_with_a1();
        let mut flow = SubmissionFlow::new();

        let first = flow.submit(&selection, Some(7));
        let second = flow.submit(&selection, Some(7));

        let payload = first.unwrap();
        assert_eq!(payload.lot.code, "A1");
        assert_eq!(payload.lot.floor, 5);
        assert_eq!(payload.user_id, Some(7));
        assert!(second.is_none());
        assert!(flow.is_sending());
    }

    #[test]
    fn test_submit_without_selection_is_noop() {
        let mut flow = SubmissionFlow::new();
        assert!(flow.submit(&SelectionModel::new(), None).is_none());
        assert!(!flow.is_sending());
    }

    #[test]
    fn test_finish_clears_selection_only_after_submit() {
        let mut selection = selection_with_a1();
        let mut flow = SubmissionFlow::new();
        flow.finish(&mut selection);
        assert!(selection.is_present());

        flow.submit(&selection, None);
        flow.finish(&mut selection);
        assert!(!selection.is_present());
        assert!(flow.is_sending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_waits_then_swallows_errors() {
        let host = Arc::new(RecordingHost {
            fail_close: true,
            ..Default::default()
        });
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = schedule_close(HostHandle::new(host.clone()), Duration::from_millis(100), tx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(host.close_count(), 0);

        handle.await.unwrap();
        assert_eq!(host.close_count(), 1);
        assert_eq!(rx.recv().await, Some(UiEvent::SubmissionFinished));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_headless() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        schedule_close(HostHandle::headless(), Duration::from_millis(100), tx)
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(UiEvent::SubmissionFinished));
    }
}

//! Network actor - runs catalog loads and dispatches in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Endpoints;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, dispatch_submission, load_catalog};

/// Network actor that processes catalog and submission commands
pub struct NetworkActor {
    client: reqwest::Client,
    endpoints: Endpoints,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
    /// Submissions in flight; shutdown waits for these instead of aborting
    dispatches: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(endpoints: Endpoints, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(),
            endpoints,
            response_tx,
            active_requests: JoinSet::new(),
            dispatches: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::LoadCatalog { generation }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let endpoints = self.endpoints.clone();

                            // A superseded load keeps running; the app drops its result
                            self.active_requests.spawn(async move {
                                tracing::info!(generation, url = %endpoints.lots_url, "Loading catalog");
                                let result = load_catalog(&client, &endpoints, generation).await;
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::DispatchSubmission { payload }) => {
                            let client = self.client.clone();
                            let url = self.endpoints.action_url.clone();

                            // Nobody awaits the outcome; only shutdown joins it
                            self.dispatches.spawn(async move {
                                dispatch_submission(&client, &url, payload).await;
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                Some(_result) = self.active_requests.join_next() => {
                    // Task completed - results are delivered by the tasks themselves
                }

                Some(_result) = self.dispatches.join_next() => {}
            }
        }

        if !self.dispatches.is_empty() {
            tracing::info!(pending = self.dispatches.len(), "Waiting for submissions to go out");
        }
        while self.dispatches.join_next().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Building, LotPayload, SubmissionPayload};
    use crate::network::testing::serve_once;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_waits_for_queued_dispatch() {
        // slower than the old fixed grace period
        let (base, request_rx) = serve_once("200 OK", "{}", Duration::from_millis(400)).await;
        let endpoints = Endpoints {
            lots_url: format!("{}/api/lots", base),
            action_url: format!("{}/api/miniapp-action", base),
            catalog_timeout: Duration::from_secs(1),
        };
        let (resp_tx, _resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let payload = SubmissionPayload {
            lot: LotPayload {
                code: "A1".into(),
                building: Building::One,
                floor: 5,
                price: 5_200_000,
                area: 45.0,
            },
            user_id: Some(4242),
        };
        cmd_tx.send(NetworkCommand::DispatchSubmission { payload }).unwrap();
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();

        tokio::time::timeout(Duration::from_secs(5), NetworkActor::new(endpoints, resp_tx).run(cmd_rx))
            .await
            .unwrap();

        // the server hands the request over before answering, so it must be here
        let request = request_rx.await.unwrap();
        assert!(request.starts_with("POST /api/miniapp-action"));
        assert!(request.contains("\"code\":\"A1\""));
        assert!(request.contains("\"user_id\":4242"));
    }
}

//! Backend worker: owns the tokio runtime and the HTTP backend, runs each
//! queued command as its own task, and reports settlements back to the UI.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use hdp_client::{perform_effect, FormEvent, HttpBackend, Settings};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let endpoints = match settings.endpoints() {
            Ok(endpoints) => endpoints,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("invalid service endpoints: {err:#}");
                return;
            }
        };
        tracing::info!(
            upload_program = %endpoints.upload_program,
            submit_batch_query = %endpoints.submit_batch_query,
            "backend worker using service endpoints"
        );
        let backend = Arc::new(HttpBackend::new(endpoints));

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend received command");
                let backend = Arc::clone(&backend);
                let ui_tx = ui_tx.clone();
                // Commands run concurrently; the form state orders their results by ticket.
                tokio::spawn(async move {
                    let settled = perform_effect(backend.as_ref(), cmd.into_effect()).await;
                    deliver_settlement(ui_tx, settled).await;
                });
            }
        });
    });
}

/// Waits for room in the UI queue; a settlement is only lost once the UI is gone.
async fn deliver_settlement(ui_tx: Sender<UiEvent>, settled: FormEvent) {
    let delivered =
        tokio::task::spawn_blocking(move || ui_tx.send(UiEvent::Settled(settled)).is_ok()).await;
    if !matches!(delivered, Ok(true)) {
        tracing::warn!("ui event queue closed; dropping settlement");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::bounded;
    use hdp_client::InvocationTicket;
    use hdp_shared::error::ServiceOutcome;

    use super::*;

    fn upload_settled(ticket: u64) -> FormEvent {
        FormEvent::UploadSettled {
            ticket: InvocationTicket(ticket),
            outcome: ServiceOutcome::Succeeded,
        }
    }

    #[tokio::test]
    async fn settlement_waits_for_a_full_ui_queue() {
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .try_send(UiEvent::Info("filler".to_string()))
            .expect("fill queue");

        let pending = tokio::spawn(deliver_settlement(ui_tx, upload_settled(7)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!pending.is_finished());

        assert!(matches!(ui_rx.recv(), Ok(UiEvent::Info(_))));
        pending.await.expect("delivery task");
        assert!(matches!(
            ui_rx.try_recv(),
            Ok(UiEvent::Settled(event)) if event == upload_settled(7)
        ));
    }

    #[tokio::test]
    async fn settlement_to_closed_ui_is_dropped_quietly() {
        let (ui_tx, ui_rx) = bounded(1);
        drop(ui_rx);

        deliver_settlement(ui_tx, upload_settled(1)).await;
    }
}

//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{config::Settings, AssessmentController, MissingAssessmentService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the backend worker. It exits, cancelling any in-flight submission, once the UI
/// drops its command sender.
pub fn launch(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    repaint: egui::Context,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
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

        runtime.block_on(async move {
            let controller = match settings.build_controller() {
                Ok(controller) => {
                    let _ = ui_tx.try_send(UiEvent::Info(format!(
                        "Assessment service: {}",
                        settings.service_url
                    )));
                    controller
                }
                Err(err) => {
                    tracing::error!("invalid assessment service configuration: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("invalid assessment service configuration: {err:#}"),
                    )));
                    AssessmentController::new(Arc::new(MissingAssessmentService))
                }
            };

            let mut states = controller.subscribe();
            let forward_tx = ui_tx.clone();
            let forward_repaint = repaint.clone();
            let forwarder = tokio::spawn(async move {
                while states.changed().await.is_ok() {
                    let state = states.borrow_and_update().clone();
                    if forward_tx.try_send(UiEvent::StateChanged(state)).is_err() {
                        tracing::warn!("ui event queue unavailable; dropping state update");
                    }
                    forward_repaint.request_repaint();
                }
            });

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit { inputs } => {
                        if let Err(err) = controller.submit(&inputs) {
                            tracing::debug!("submit ignored: {err}");
                        }
                    }
                    BackendCommand::Cancel => controller.cancel(),
                }
            }

            tracing::info!("ui closed; stopping assessment backend");
            controller.cancel();
            forwarder.abort();
        });
    })
}

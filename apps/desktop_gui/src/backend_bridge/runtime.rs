//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    AnalysisBackend, ClientSettings, ControllerKind, FinanceApiClient, InsightKind, QueryKind,
    TableQaKind, UploadKind,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("finqa-backend")
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

        let client = match FinanceApiClient::new(&settings) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                tracing::error!("failed to build API client: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Backend worker ready ({})",
            client.base_url()
        )));

        serve_commands(&runtime, Arc::new(client), cmd_rx, ui_tx);
        tracing::info!("backend worker stopped");
    });
}

/// Pulls commands until the UI side hangs up. Every command runs on its own
/// task so a slow upload never holds up a chat answer.
pub fn serve_commands(
    runtime: &tokio::runtime::Runtime,
    backend: Arc<dyn AnalysisBackend>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    runtime.block_on(async move {
        while let Ok(cmd) = cmd_rx.recv() {
            let cmd_name = cmd.name();
            let backend = Arc::clone(&backend);
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                let event = execute(backend.as_ref(), cmd).await;
                match ui_tx.try_send(event) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!(
                            command = cmd_name,
                            "ui event queue is full; result dropped"
                        );
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        tracing::warn!(
                            command = cmd_name,
                            "ui went away before result was delivered"
                        );
                    }
                }
            });
        }
    });
}

async fn execute(backend: &dyn AnalysisBackend, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Ask { sequence, request } => UiEvent::AnswerReady {
            sequence,
            outcome: QueryKind::dispatch(backend, request).await,
        },
        BackendCommand::GenerateInsights { sequence, request } => UiEvent::InsightsReady {
            sequence,
            outcome: InsightKind::dispatch(backend, request).await,
        },
        BackendCommand::Upload {
            slot,
            sequence,
            request,
        } => UiEvent::UploadFinished {
            slot,
            sequence,
            outcome: UploadKind::dispatch(backend, request).await,
        },
        BackendCommand::AskTable { sequence, request } => UiEvent::TableAnswerReady {
            sequence,
            outcome: TableQaKind::dispatch(backend, request).await,
        },
        BackendCommand::ProbeHealth => match backend.health().await {
            Ok(health) => UiEvent::HealthChecked(Ok(health.message.unwrap_or_default())),
            Err(err) => {
                tracing::warn!("health probe failed: {err}");
                UiEvent::HealthChecked(Err(err.to_string()))
            }
        },
    }
}

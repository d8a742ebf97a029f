//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{ControllerKind, RequestController, RequestFailure};
use crossbeam_channel::{Sender, TrySendError};
use shared::domain::RequestSeq;

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), RequestFailure> {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(RequestFailure::QueueUnavailable(
                "UI command queue is full; please retry".to_string(),
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(RequestFailure::QueueUnavailable(
                "backend worker disconnected (possible startup/runtime failure)".to_string(),
            ))
        }
    }
}

/// Starts a request on `controller` and queues it for the worker.
///
/// If the command cannot be queued the controller is completed with the
/// failure right away, so it never waits on a request nobody will answer.
/// Returns the queue failure, if any, for the caller to surface.
pub fn submit<K: ControllerKind>(
    controller: &mut RequestController<K>,
    cmd_tx: &Sender<BackendCommand>,
    into_command: impl FnOnce(RequestSeq, K::Request) -> BackendCommand,
) -> Option<RequestFailure> {
    let submission = controller.begin_submit()?;
    let sequence = submission.sequence;
    match dispatch_backend_command(cmd_tx, into_command(sequence, submission.request)) {
        Ok(()) => None,
        Err(failure) => {
            controller.complete(sequence, Err(failure.clone()));
            Some(failure)
        }
    }
}

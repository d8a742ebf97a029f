//! UI/backend events and error modeling for desktop GUI controller.

use client_core::RequestFailure;
use shared::{
    domain::RequestSeq,
    protocol::{AnswerResponse, InsightsResponse, TableQaResponse, UploadResponse},
};

use crate::backend_bridge::commands::UploadSlot;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    HealthChecked(Result<String, String>),
    AnswerReady {
        sequence: RequestSeq,
        outcome: Result<AnswerResponse, RequestFailure>,
    },
    InsightsReady {
        sequence: RequestSeq,
        outcome: Result<InsightsResponse, RequestFailure>,
    },
    UploadFinished {
        slot: UploadSlot,
        sequence: RequestSeq,
        outcome: Result<UploadResponse, RequestFailure>,
    },
    TableAnswerReady {
        sequence: RequestSeq,
        outcome: Result<TableQaResponse, RequestFailure>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiErrorCategory {
    Configuration,
    WorkerStopped,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Dispatch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid api base url")
            || message_lower.contains("http client")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("disconnected") {
            UiErrorCategory::WorkerStopped
        } else {
            UiErrorCategory::Other
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Hint appended to the banner so the user knows what to do next.
    pub fn guidance(&self) -> &'static str {
        match (self.context, self.category) {
            (_, UiErrorCategory::Configuration) => {
                "Check api_base_url in finqa.toml or pass --api-url and relaunch."
            }
            (_, UiErrorCategory::WorkerStopped) => {
                "The background worker stopped. Relaunch the app."
            }
            (UiErrorContext::BackendStartup, UiErrorCategory::Other) => {
                "Relaunch the app to retry."
            }
            (UiErrorContext::Dispatch, UiErrorCategory::Other) => "Try the action again.",
        }
    }
}

//! Workspace state owned by the UI thread and the transitions applied to it.

use client_core::{
    InsightController, QueryController, RequestFailure, TableQaController, UploadController,
};
use crossbeam_channel::Sender;

use crate::backend_bridge::commands::{BackendCommand, UploadSlot};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::submit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chat,
    Upload,
    Insights,
    TableQa,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Chat, Screen::Upload, Screen::Insights, Screen::TableQa];

    pub fn label(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Upload => "Upload",
            Self::Insights => "Insights",
            Self::TableQa => "Table QA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiHealth {
    Unknown,
    Online(String),
    Unreachable(String),
}

pub struct WorkspaceState {
    pub active: Screen,
    pub chat: QueryController,
    pub chat_upload: UploadController,
    pub upload: UploadController,
    pub insights: InsightController,
    pub table_qa: TableQaController,
    pub api_health: ApiHealth,
    pub status: String,
    pub banner: Option<UiError>,
    /// Server-side path of the most recent successful upload, offered on the
    /// Table QA screen.
    pub last_uploaded_path: Option<String>,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            active: Screen::Chat,
            chat: QueryController::new(),
            chat_upload: UploadController::new(),
            upload: UploadController::new(),
            insights: InsightController::new(),
            table_qa: TableQaController::new(),
            api_health: ApiHealth::Unknown,
            status: "Starting backend worker...".to_string(),
            banner: None,
            last_uploaded_path: None,
        }
    }

    /// Switches screens. The screen being left is unmounted: its controllers
    /// start over and any response still in flight for them is dropped.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.active {
            return;
        }
        match self.active {
            Screen::Chat => {
                self.chat.reset();
                self.chat_upload.reset();
            }
            Screen::Upload => self.upload.reset(),
            Screen::Insights => self.insights.reset(),
            Screen::TableQa => self.table_qa.reset(),
        }
        tracing::debug!(from = self.active.label(), to = screen.label(), "navigated");
        self.active = screen;
    }

    pub fn upload_controller_mut(&mut self, slot: UploadSlot) -> &mut UploadController {
        match slot {
            UploadSlot::ChatSidebar => &mut self.chat_upload,
            UploadSlot::UploadScreen => &mut self.upload,
        }
    }

    pub fn any_pending(&self) -> bool {
        self.chat.is_pending()
            || self.chat_upload.is_pending()
            || self.upload.is_pending()
            || self.insights.is_pending()
            || self.table_qa.is_pending()
    }

    pub fn submit_chat(&mut self, cmd_tx: &Sender<BackendCommand>) {
        let failure = submit(&mut self.chat, cmd_tx, |sequence, request| {
            BackendCommand::Ask { sequence, request }
        });
        self.note_queue_failure(failure);
    }

    pub fn submit_insights(&mut self, cmd_tx: &Sender<BackendCommand>) {
        let failure = submit(&mut self.insights, cmd_tx, |sequence, request| {
            BackendCommand::GenerateInsights { sequence, request }
        });
        self.note_queue_failure(failure);
    }

    pub fn submit_upload(&mut self, slot: UploadSlot, cmd_tx: &Sender<BackendCommand>) {
        let failure = submit(self.upload_controller_mut(slot), cmd_tx, |sequence, request| {
            BackendCommand::Upload {
                slot,
                sequence,
                request,
            }
        });
        self.note_queue_failure(failure);
    }

    pub fn submit_table_qa(&mut self, cmd_tx: &Sender<BackendCommand>) {
        let failure = submit(&mut self.table_qa, cmd_tx, |sequence, request| {
            BackendCommand::AskTable { sequence, request }
        });
        self.note_queue_failure(failure);
    }

    fn note_queue_failure(&mut self, failure: Option<RequestFailure>) {
        if let Some(failure) = failure {
            self.banner = Some(UiError::from_message(
                UiErrorContext::Dispatch,
                failure.to_string(),
            ));
        }
    }
}

pub fn apply_ui_event(state: &mut WorkspaceState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::Error(err) => {
            state.status = err.message().to_string();
            state.banner = Some(err);
        }
        UiEvent::HealthChecked(Ok(message)) => {
            state.api_health = ApiHealth::Online(message);
        }
        UiEvent::HealthChecked(Err(reason)) => {
            state.api_health = ApiHealth::Unreachable(reason);
        }
        UiEvent::AnswerReady { sequence, outcome } => {
            state.chat.complete(sequence, outcome);
        }
        UiEvent::InsightsReady { sequence, outcome } => {
            state.insights.complete(sequence, outcome);
        }
        UiEvent::UploadFinished {
            slot,
            sequence,
            outcome,
        } => {
            let stored_at = outcome
                .as_ref()
                .ok()
                .and_then(|response| response.file_path.clone());
            let applied = state.upload_controller_mut(slot).complete(sequence, outcome);
            if applied {
                if let Some(path) = stored_at {
                    state.status = format!("Document stored at {path}");
                    state.last_uploaded_path = Some(path);
                }
            }
        }
        UiEvent::TableAnswerReady { sequence, outcome } => {
            state.table_qa.complete(sequence, outcome);
        }
    }
}

//! Backend commands queued from UI to backend worker.

use client_core::UploadRequest;
use shared::{
    domain::RequestSeq,
    protocol::{QuestionRequest, TableQaRequest},
};

/// Which of the two upload controllers issued an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSlot {
    /// Compact form embedded next to the chat.
    ChatSidebar,
    /// Dedicated upload screen.
    UploadScreen,
}

#[derive(Debug)]
pub enum BackendCommand {
    Ask {
        sequence: RequestSeq,
        request: QuestionRequest,
    },
    GenerateInsights {
        sequence: RequestSeq,
        request: QuestionRequest,
    },
    Upload {
        slot: UploadSlot,
        sequence: RequestSeq,
        request: UploadRequest,
    },
    AskTable {
        sequence: RequestSeq,
        request: TableQaRequest,
    },
    ProbeHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ask { .. } => "ask",
            Self::GenerateInsights { .. } => "generate_insights",
            Self::Upload { .. } => "upload",
            Self::AskTable { .. } => "ask_table",
            Self::ProbeHealth => "probe_health",
        }
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse failure classes reported to users of the CLI and desktop client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unreachable,
    UpstreamStatus,
    MalformedResponse,
    LocalFile,
    QueueUnavailable,
}

impl ErrorCode {
    pub fn summary(self) -> &'static str {
        match self {
            Self::Unreachable => "backend unreachable",
            Self::UpstreamStatus => "backend returned an error status",
            Self::MalformedResponse => "backend response could not be parsed",
            Self::LocalFile => "selected file could not be read",
            Self::QueueUnavailable => "request queue unavailable",
        }
    }

    /// Process exit status used by the command-line client.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Unreachable => 2,
            Self::UpstreamStatus => 3,
            Self::MalformedResponse => 4,
            Self::LocalFile => 5,
            Self::QueueUnavailable => 6,
        }
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{}: {message}", code.summary())]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_leads_with_code_summary() {
        let err = ApiError::new(ErrorCode::Unreachable, "connection refused");
        assert_eq!(err.to_string(), "backend unreachable: connection refused");
    }

    #[test]
    fn status_is_omitted_from_json_when_absent() {
        let plain = serde_json::to_value(ApiError::new(ErrorCode::LocalFile, "missing"))
            .expect("serialize");
        assert!(plain.get("status").is_none());
        assert_eq!(plain["code"], "local_file");

        let with_status = serde_json::to_value(
            ApiError::new(ErrorCode::UpstreamStatus, "server error").with_status(502),
        )
        .expect("serialize");
        assert_eq!(with_status["status"], 502);
    }
}

use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

/// Every way a single backend request can fail.
///
/// Controllers never show these to the user; they collapse into the fixed
/// literal of the controller kind. The detail only reaches logs and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("failed to reach {endpoint}: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("invalid response payload from {endpoint}: {message}")]
    MalformedBody {
        endpoint: &'static str,
        message: String,
    },
    #[error("could not read '{path}': {message}")]
    LocalFile { path: String, message: String },
    #[error("request queue unavailable: {0}")]
    QueueUnavailable(String),
}

impl RequestFailure {
    pub(crate) fn from_reqwest(endpoint: &'static str, err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status {
                endpoint,
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::MalformedBody {
                endpoint,
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                endpoint,
                message: err.to_string(),
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::Unreachable,
            Self::Status { .. } => ErrorCode::UpstreamStatus,
            Self::MalformedBody { .. } => ErrorCode::MalformedResponse,
            Self::LocalFile { .. } => ErrorCode::LocalFile,
            Self::QueueUnavailable(_) => ErrorCode::QueueUnavailable,
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        let error = ApiError::new(self.code(), self.to_string());
        match self {
            Self::Status { status, .. } => error.with_status(*status),
            _ => error,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),
}

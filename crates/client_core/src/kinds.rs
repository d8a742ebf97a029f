//! The screen-level controller kinds.

use std::path::PathBuf;

use async_trait::async_trait;
use shared::protocol::{
    endpoints, AnswerResponse, InsightsResponse, QuestionRequest, TableQaRequest,
    TableQaResponse, UploadResponse,
};

use crate::{
    controller::{ControllerKind, RequestController, SettlePolicy},
    error::RequestFailure,
    AnalysisBackend, UploadRequest,
};

pub const NO_ANSWER: &str = "No answer";
pub const NO_INSIGHTS: &str = "No insights generated";
pub const API_UNREACHABLE: &str = "Error connecting to API.";
pub const UPLOADING: &str = "Uploading...";
pub const UPLOAD_SUCCEEDED: &str = "Uploaded successfully ✅";
pub const UPLOAD_FAILED: &str = "Error uploading file.";

pub type QueryController = RequestController<QueryKind>;
pub type InsightController = RequestController<InsightKind>;
pub type UploadController = RequestController<UploadKind>;
pub type TableQaController = RequestController<TableQaKind>;

/// Chat Q&A over `/hybrid_rag`. Empty questions are still sent.
pub struct QueryKind;

#[async_trait]
impl ControllerKind for QueryKind {
    type Input = String;
    type Request = QuestionRequest;
    type Response = AnswerResponse;

    const NAME: &'static str = "query";
    const ENDPOINT: &'static str = endpoints::HYBRID_RAG;
    const EMPTY_RESPONSE_TEXT: &'static str = NO_ANSWER;
    const FAILURE_TEXT: &'static str = API_UNREACHABLE;

    fn build_request(input: &String) -> Option<QuestionRequest> {
        Some(QuestionRequest::new(input.clone()))
    }

    fn response_text(response: &AnswerResponse) -> Option<&str> {
        response.answer.as_deref()
    }

    async fn dispatch(
        backend: &dyn AnalysisBackend,
        request: QuestionRequest,
    ) -> Result<AnswerResponse, RequestFailure> {
        backend.ask(request).await
    }
}

pub struct InsightKind;

#[async_trait]
impl ControllerKind for InsightKind {
    type Input = String;
    type Request = QuestionRequest;
    type Response = InsightsResponse;

    const NAME: &'static str = "insights";
    const ENDPOINT: &'static str = endpoints::INSIGHTS;
    const EMPTY_RESPONSE_TEXT: &'static str = NO_INSIGHTS;
    const FAILURE_TEXT: &'static str = API_UNREACHABLE;

    fn build_request(input: &String) -> Option<QuestionRequest> {
        if input.trim().is_empty() {
            return None;
        }
        Some(QuestionRequest::new(input.clone()))
    }

    fn response_text(response: &InsightsResponse) -> Option<&str> {
        response.insights.as_deref()
    }

    async fn dispatch(
        backend: &dyn AnalysisBackend,
        request: QuestionRequest,
    ) -> Result<InsightsResponse, RequestFailure> {
        backend.insights(request).await
    }
}

/// Document upload. The selected file is dropped after every attempt.
pub struct UploadKind;

#[async_trait]
impl ControllerKind for UploadKind {
    type Input = Option<PathBuf>;
    type Request = UploadRequest;
    type Response = UploadResponse;

    const NAME: &'static str = "upload";
    const ENDPOINT: &'static str = endpoints::UPLOAD;
    const EMPTY_RESPONSE_TEXT: &'static str = UPLOAD_SUCCEEDED;
    const FAILURE_TEXT: &'static str = UPLOAD_FAILED;
    const OPTIMISTIC_TEXT: Option<&'static str> = Some(UPLOADING);
    const SETTLE: SettlePolicy = SettlePolicy::ReturnToIdle;
    const CLEAR_INPUT_ON_COMPLETE: bool = true;

    fn build_request(input: &Option<PathBuf>) -> Option<UploadRequest> {
        input.as_ref().map(|path| UploadRequest { path: path.clone() })
    }

    fn response_text(response: &UploadResponse) -> Option<&str> {
        response.message.as_deref()
    }

    async fn dispatch(
        backend: &dyn AnalysisBackend,
        request: UploadRequest,
    ) -> Result<UploadResponse, RequestFailure> {
        backend.upload(request).await
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuestion {
    pub file_path: String,
    pub question: String,
}

/// Question about a single previously uploaded table file.
pub struct TableQaKind;

#[async_trait]
impl ControllerKind for TableQaKind {
    type Input = TableQuestion;
    type Request = TableQaRequest;
    type Response = TableQaResponse;

    const NAME: &'static str = "table_qa";
    const ENDPOINT: &'static str = endpoints::TABLE_QA;
    const EMPTY_RESPONSE_TEXT: &'static str = NO_ANSWER;
    const FAILURE_TEXT: &'static str = API_UNREACHABLE;

    fn build_request(input: &TableQuestion) -> Option<TableQaRequest> {
        let file_path = input.file_path.trim();
        if file_path.is_empty() || input.question.trim().is_empty() {
            return None;
        }
        Some(TableQaRequest {
            file_path: file_path.to_string(),
            question: input.question.clone(),
        })
    }

    fn response_text(response: &TableQaResponse) -> Option<&str> {
        response.answer.as_deref()
    }

    async fn dispatch(
        backend: &dyn AnalysisBackend,
        request: TableQaRequest,
    ) -> Result<TableQaResponse, RequestFailure> {
        backend.table_qa(request).await
    }
}

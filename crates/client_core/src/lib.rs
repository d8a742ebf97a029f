use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::{
    endpoints, AnswerResponse, HealthResponse, InsightsResponse, QuestionRequest, TableQaRequest,
    TableQaResponse, UploadResponse,
};
use tracing::{debug, info};

pub mod config;
pub mod controller;
pub mod error;
pub mod kinds;

pub use config::{load_settings, ClientSettings};
pub use controller::{drive_submission, ControllerKind, RequestController, Submission};
pub use error::{ConfigError, RequestFailure};
pub use kinds::{
    InsightController, InsightKind, QueryController, QueryKind, TableQaController, TableQaKind,
    TableQuestion, UploadController, UploadKind,
};

/// A document picked for upload. The bytes are read when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
}

impl UploadRequest {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string())
    }
}

/// The analysis service as seen by controllers.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn ask(&self, request: QuestionRequest) -> Result<AnswerResponse, RequestFailure>;
    async fn insights(&self, request: QuestionRequest)
        -> Result<InsightsResponse, RequestFailure>;
    async fn upload(&self, request: UploadRequest) -> Result<UploadResponse, RequestFailure>;
    async fn table_qa(&self, request: TableQaRequest) -> Result<TableQaResponse, RequestFailure>;
    async fn health(&self) -> Result<HealthResponse, RequestFailure>;
}

pub struct FinanceApiClient {
    http: Client,
    base_url: String,
}

impl FinanceApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|err| ConfigError::HttpClientBuild(err.to_string()))?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn post_json<B, R>(&self, endpoint: &'static str, body: &B) -> Result<R, RequestFailure>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        info!(endpoint, "posting json request");
        let response = self
            .http
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|err| RequestFailure::from_reqwest(endpoint, err))?;
        read_json(endpoint, response).await
    }
}

async fn read_json<R: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<R, RequestFailure> {
    let response = response
        .error_for_status()
        .map_err(|err| RequestFailure::from_reqwest(endpoint, err))?;
    let body = response
        .json::<R>()
        .await
        .map_err(|err| RequestFailure::from_reqwest(endpoint, err))?;
    debug!(endpoint, "decoded response body");
    Ok(body)
}

#[async_trait]
impl AnalysisBackend for FinanceApiClient {
    async fn ask(&self, request: QuestionRequest) -> Result<AnswerResponse, RequestFailure> {
        self.post_json(endpoints::HYBRID_RAG, &request).await
    }

    async fn insights(
        &self,
        request: QuestionRequest,
    ) -> Result<InsightsResponse, RequestFailure> {
        self.post_json(endpoints::INSIGHTS, &request).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<UploadResponse, RequestFailure> {
        let endpoint = endpoints::UPLOAD;
        let local_file_error = |message: String| RequestFailure::LocalFile {
            path: request.path.display().to_string(),
            message,
        };

        let bytes = tokio::fs::read(&request.path)
            .await
            .map_err(|err| local_file_error(err.to_string()))?;
        let mime = mime_guess::from_path(&request.path).first_or_octet_stream();
        let file_name = request.file_name();
        info!(endpoint, file = %file_name, size_bytes = bytes.len(), "uploading document");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())
            .map_err(|err| local_file_error(err.to_string()))?;
        let form = Form::new().part(endpoints::UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|err| RequestFailure::from_reqwest(endpoint, err))?;
        read_json(endpoint, response).await
    }

    async fn table_qa(&self, request: TableQaRequest) -> Result<TableQaResponse, RequestFailure> {
        self.post_json(endpoints::TABLE_QA, &request).await
    }

    async fn health(&self) -> Result<HealthResponse, RequestFailure> {
        let endpoint = endpoints::HEALTH;
        let response = self
            .http
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|err| RequestFailure::from_reqwest(endpoint, err))?;
        read_json(endpoint, response).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

use std::path::PathBuf;
use std::time::Duration;

use grader_logging::{grader_debug, grader_info};
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::wire::decode_analysis_reply;
use crate::{AnalysisReply, FailureKind, TransportFault, UploadRequest};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:6158";
pub const ANALYZE_PATH: &str = "/analyze";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the analysis service; relative download links resolve against it.
    pub endpoint: String,
    pub analyze_path: String,
    /// Unset by default: an in-flight analysis only ends when the service answers.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_report_bytes: u64,
    pub report_dir: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            analyze_path: ANALYZE_PATH.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_report_bytes: 50 * 1024 * 1024,
            report_dir: PathBuf::from("reports"),
        }
    }
}

impl ClientSettings {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    fn base_url(&self) -> Result<Url, TransportFault> {
        Url::parse(&self.endpoint)
            .map_err(|err| TransportFault::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    pub fn analyze_url(&self) -> Result<Url, TransportFault> {
        self.resolve(&self.analyze_path)
    }

    /// Resolves an absolute or endpoint-relative link.
    pub fn resolve(&self, href: &str) -> Result<Url, TransportFault> {
        self.base_url()?
            .join(href)
            .map_err(|err| TransportFault::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

pub(crate) fn build_client(settings: &ClientSettings) -> Result<reqwest::Client, TransportFault> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = settings.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| TransportFault::new(FailureKind::Network, err.to_string()))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportFault {
    if err.is_timeout() {
        return TransportFault::new(FailureKind::Timeout, err.to_string());
    }
    TransportFault::new(FailureKind::Network, err.to_string())
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &UploadRequest) -> Result<AnalysisReply, TransportFault>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: ClientSettings,
}

impl ReqwestAnalyzer {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(&self, request: &UploadRequest) -> Result<AnalysisReply, TransportFault> {
        let url = self.settings.analyze_url()?;
        let client = build_client(&self.settings)?;
        let form = build_form(request).await?;

        grader_info!("POST {} with {} part(s)", url, request.parts.len());
        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        grader_debug!("analysis answered {} with {} bytes", status, body.len());
        decode_analysis_reply(status.as_u16(), &body)
    }
}

async fn build_form(request: &UploadRequest) -> Result<Form, TransportFault> {
    let mut form = Form::new();
    for part in &request.parts {
        let bytes = tokio::fs::read(&part.path).await.map_err(|err| {
            TransportFault::new(
                FailureKind::UnreadableFile {
                    path: part.path.display().to_string(),
                },
                err.to_string(),
            )
        })?;
        let body = Part::bytes(bytes).file_name(part.file_name.clone());
        form = form.part(part.field.clone(), body);
    }
    Ok(form)
}

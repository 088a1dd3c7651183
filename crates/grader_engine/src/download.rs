use std::path::PathBuf;

use futures_util::StreamExt;
use grader_logging::grader_info;
use reqwest::header::CONTENT_DISPOSITION;

use crate::client::{build_client, map_reqwest_error};
use crate::filename::report_filename;
use crate::persist::AtomicFileWriter;
use crate::{ClientSettings, FailureKind, TransportFault};

#[async_trait::async_trait]
pub trait ReportFetcher: Send + Sync {
    /// Fetches the report behind `href` and returns where it was saved.
    async fn download(&self, href: &str) -> Result<PathBuf, TransportFault>;
}

#[derive(Debug, Clone)]
pub struct ReqwestReportFetcher {
    settings: ClientSettings,
}

impl ReqwestReportFetcher {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn too_large(&self, actual: u64) -> TransportFault {
        TransportFault::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_report_bytes,
                actual: Some(actual),
            },
            "report too large",
        )
    }
}

#[async_trait::async_trait]
impl ReportFetcher for ReqwestReportFetcher {
    async fn download(&self, href: &str) -> Result<PathBuf, TransportFault> {
        let url = self.settings.resolve(href)?;
        let client = build_client(&self.settings)?;
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportFault::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_report_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_report_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let filename = report_filename(disposition.as_deref(), &url);
        let writer = AtomicFileWriter::new(self.settings.report_dir.clone());
        let path = writer
            .write(&filename, &bytes)
            .map_err(|err| TransportFault::new(FailureKind::Persist, err.to_string()))?;
        grader_info!("Saved report ({} bytes) to {:?}", bytes.len(), path);
        Ok(path)
    }
}

use std::fmt;
use std::path::PathBuf;

pub type RequestId = u64;

/// One file attached to the multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub field: String,
    pub file_name: String,
    pub path: PathBuf,
}

/// Parts to send with `POST /analyze`. Empty slots are simply not listed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadRequest {
    pub parts: Vec<UploadPart>,
}

impl UploadRequest {
    pub fn with_part(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.parts.push(UploadPart {
            field: field.into(),
            file_name: file_name.into(),
            path: path.into(),
        });
        self
    }
}

/// Decoded answer of the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisReply {
    Success {
        table_html: String,
        download_url: String,
        message: String,
    },
    Failure {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AnalysisSettled {
        request_id: RequestId,
        result: Result<AnalysisReply, TransportFault>,
    },
    ReportSettled {
        request_id: RequestId,
        result: Result<PathBuf, TransportFault>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFault {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportFault {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportFault {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedBody,
    UnreadableFile { path: String },
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Persist,
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::UnreadableFile { path } => write!(f, "cannot read upload file {path}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Persist => write!(f, "cannot save report"),
            FailureKind::Aborted => write!(f, "request aborted"),
        }
    }
}

//! Grader engine: HTTP exchange with the analysis service and report persistence.
mod client;
mod download;
mod engine;
mod filename;
mod persist;
mod types;
mod wire;

pub use client::{Analyzer, ClientSettings, ReqwestAnalyzer, ANALYZE_PATH, DEFAULT_ENDPOINT};
pub use download::{ReportFetcher, ReqwestReportFetcher};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use filename::report_filename;
pub use persist::{ensure_report_dir, AtomicFileWriter, PersistError};
pub use types::{
    AnalysisReply, EngineEvent, FailureKind, RequestId, TransportFault, UploadPart, UploadRequest,
};
pub use wire::decode_analysis_reply;

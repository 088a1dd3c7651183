use std::sync::{mpsc, Arc};
use std::thread;

use grader_logging::{grader_error, grader_warn};

use crate::client::{Analyzer, ReqwestAnalyzer};
use crate::download::{ReportFetcher, ReqwestReportFetcher};
use crate::{ClientSettings, EngineEvent, FailureKind, RequestId, TransportFault, UploadRequest};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        request: UploadRequest,
    },
    DownloadReport {
        request_id: RequestId,
        url: String,
    },
}

impl EngineCommand {
    fn pending(&self) -> Pending {
        match self {
            EngineCommand::Analyze { request_id, .. } => Pending::Analysis(*request_id),
            EngineCommand::DownloadReport { request_id, .. } => Pending::Report(*request_id),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Analysis(RequestId),
    Report(RequestId),
}

/// Guarantees exactly one settle event per command.
///
/// If the task finishes normally it calls [`SettleGuard::settle`]. If it is
/// dropped first (panic, runtime shutdown, or the runtime never started), the
/// drop reports an `Aborted` fault instead.
struct SettleGuard {
    pending: Option<Pending>,
    sink: Arc<dyn EventSink>,
}

impl SettleGuard {
    fn new(pending: Pending, sink: Arc<dyn EventSink>) -> Self {
        Self {
            pending: Some(pending),
            sink,
        }
    }

    fn settle(mut self, event: EngineEvent) {
        self.pending = None;
        self.sink.emit(event);
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        grader_warn!("{:?} ended without a result", pending);
        let fault = TransportFault::new(FailureKind::Aborted, "request task ended without a result");
        let event = match pending {
            Pending::Analysis(request_id) => EngineEvent::AnalysisSettled {
                request_id,
                result: Err(fault),
            },
            Pending::Report(request_id) => EngineEvent::ReportSettled {
                request_id,
                result: Err(fault),
            },
        };
        self.sink.emit(event);
    }
}

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Self {
        Self::with_services(
            Arc::new(ReqwestAnalyzer::new(settings.clone())),
            Arc::new(ReqwestReportFetcher::new(settings)),
            sink,
        )
    }

    pub fn with_services(
        analyzer: Arc<dyn Analyzer>,
        fetcher: Arc<dyn ReportFetcher>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    grader_error!("Failed to start engine runtime: {}", err);
                    // Still answer every command so callers never wait forever.
                    while let Ok(command) = cmd_rx.recv() {
                        drop(SettleGuard::new(command.pending(), sink.clone()));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let guard = SettleGuard::new(command.pending(), sink.clone());
                let analyzer = analyzer.clone();
                let fetcher = fetcher.clone();
                runtime.spawn(async move {
                    handle_command(analyzer.as_ref(), fetcher.as_ref(), command, guard).await;
                });
            }
        });

        Self { cmd_tx }
    }

    pub fn analyze(&self, request_id: RequestId, request: UploadRequest) {
        self.send(EngineCommand::Analyze {
            request_id,
            request,
        });
    }

    pub fn download_report(&self, request_id: RequestId, url: impl Into<String>) {
        self.send(EngineCommand::DownloadReport {
            request_id,
            url: url.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            grader_error!("Engine thread is gone; dropping {:?}", command.pending());
        }
    }
}

async fn handle_command(
    analyzer: &dyn Analyzer,
    fetcher: &dyn ReportFetcher,
    command: EngineCommand,
    guard: SettleGuard,
) {
    match command {
        EngineCommand::Analyze {
            request_id,
            request,
        } => {
            let result = analyzer.analyze(&request).await;
            if let Err(fault) = &result {
                grader_warn!("Analysis {} failed: {}", request_id, fault);
            }
            guard.settle(EngineEvent::AnalysisSettled { request_id, result });
        }
        EngineCommand::DownloadReport { request_id, url } => {
            let result = fetcher.download(&url).await;
            if let Err(fault) = &result {
                grader_warn!("Report download {} failed: {}", request_id, fault);
            }
            guard.settle(EngineEvent::ReportSettled { request_id, result });
        }
    }
}

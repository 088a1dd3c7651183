use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Utc;
use grader_core::{AnalysisResponse, Effect, Msg, SubmissionOutcome, UploadSelection};
use grader_engine::{
    AnalysisReply, Analyzer, ClientSettings, EngineEvent, EngineHandle, EventSink, ReportFetcher,
    UploadRequest,
};
use grader_logging::grader_info;

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink::new(msg_tx.clone())));
        Self::from_engine(engine, msg_tx)
    }

    pub fn with_services(
        analyzer: Arc<dyn Analyzer>,
        fetcher: Arc<dyn ReportFetcher>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let engine =
            EngineHandle::with_services(analyzer, fetcher, Arc::new(MsgSink::new(msg_tx.clone())));
        Self::from_engine(engine, msg_tx)
    }

    fn from_engine(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { engine, msg_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis { submission, upload } => {
                    let request = upload_request(&upload);
                    grader_info!(
                        "SubmitAnalysis submission={} parts={}",
                        submission,
                        request.parts.len()
                    );
                    self.engine.analyze(submission, request);
                }
                Effect::ScheduleFlashExpiry { flash, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::FlashExpired { flash });
                    });
                }
                Effect::DownloadReport { download, url } => {
                    grader_info!("DownloadReport download={} url={}", download, url);
                    self.engine.download_report(download, url);
                }
            }
        }
    }
}

fn upload_request(upload: &UploadSelection) -> UploadRequest {
    upload
        .present()
        .fold(UploadRequest::default(), |request, (slot, file)| {
            request.with_part(slot.field_name(), file.name.clone(), file.path.clone())
        })
}

/// Feeds engine results back into the message loop.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl MsgSink {
    fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { msg_tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisSettled { request_id, result } => {
            let outcome = match result {
                Ok(AnalysisReply::Success {
                    table_html,
                    download_url,
                    message,
                }) => SubmissionOutcome::Response(AnalysisResponse::Success {
                    table_markup: table_html,
                    download_url,
                    message,
                }),
                Ok(AnalysisReply::Failure { error }) => {
                    grader_info!("Submission {} rejected by service: {}", request_id, error);
                    SubmissionOutcome::Response(AnalysisResponse::Failure { error_text: error })
                }
                Err(fault) => SubmissionOutcome::TransportFault {
                    detail: fault.to_string(),
                },
            };
            Msg::AnalysisSettled {
                submission: request_id,
                outcome,
                at: Utc::now(),
            }
        }
        EngineEvent::ReportSettled { request_id, result } => Msg::ReportDownloadSettled {
            download: request_id,
            result: result.map_err(|fault| fault.to_string()),
            at: Utc::now(),
        },
    }
}

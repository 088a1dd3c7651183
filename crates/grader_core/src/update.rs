use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::{
    AnalysisResponse, AppState, DownloadId, Effect, FlashId, Msg, Severity, SubmissionId,
    SubmissionOutcome, GENERIC_FAILURE_TEXT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen { slot, file } => {
            if state.form.on_change(slot, file) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => begin_submission(&mut state),
        Msg::AnalysisSettled {
            submission,
            outcome,
            at,
        } => settle_submission(&mut state, submission, outcome, at),
        Msg::FlashDismissed { flash } | Msg::FlashExpired { flash } => {
            // The timer and the close button race; whichever comes second finds nothing.
            if state.flash.remove(flash) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DownloadClicked => match state.result.begin_download() {
            Some((download, url)) => {
                state.mark_dirty();
                vec![Effect::DownloadReport { download, url }]
            }
            None => Vec::new(),
        },
        Msg::ReportDownloadSettled {
            download,
            result,
            at,
        } => settle_download(&mut state, download, result, at),
    };

    (state, effects)
}

/// `Idle -> Submitting`. Ignored while a submission is already in flight.
fn begin_submission(state: &mut AppState) -> Vec<Effect> {
    if state.busy.is_busy() {
        return Vec::new();
    }
    let submission = state.next_submission_id();
    state.flash.clear();
    state.result.reset();
    state.busy.enter(submission);
    state.mark_dirty();

    vec![Effect::SubmitAnalysis {
        submission,
        upload: state.form.selection(),
    }]
}

/// `Submitting -> {Rendered | ReportedError | Fault} -> Idle`.
fn settle_submission(
    state: &mut AppState,
    submission: SubmissionId,
    outcome: SubmissionOutcome,
    at: DateTime<Utc>,
) -> Vec<Effect> {
    if state.busy.in_flight() != Some(submission) {
        return Vec::new();
    }
    // Release before looking at the outcome so no branch can skip it.
    state.busy.leave();
    state.last_outcome = Some(outcome.kind());
    state.mark_dirty();

    let (text, severity) = match outcome {
        SubmissionOutcome::Response(AnalysisResponse::Success {
            table_markup,
            download_url,
            message,
        }) => {
            state.result.show_result(table_markup, download_url);
            (message, Severity::Info)
        }
        SubmissionOutcome::Response(AnalysisResponse::Failure { error_text }) => {
            (error_text, Severity::Error)
        }
        SubmissionOutcome::TransportFault { .. } => {
            (GENERIC_FAILURE_TEXT.to_string(), Severity::Error)
        }
    };
    show_flash(state, text, severity, at)
}

/// Only the download in flight may record a saved path. A stale one still reports its outcome.
fn settle_download(
    state: &mut AppState,
    download: DownloadId,
    result: Result<PathBuf, String>,
    at: DateTime<Utc>,
) -> Vec<Effect> {
    let (text, severity) = match &result {
        Ok(path) => (format!("Report saved to {}", path.display()), Severity::Info),
        Err(detail) => (format!("Report download failed: {detail}"), Severity::Error),
    };
    state.result.finish_download(download, result.ok());
    show_flash(state, text, severity, at)
}

fn show_flash(
    state: &mut AppState,
    text: String,
    severity: Severity,
    at: DateTime<Utc>,
) -> Vec<Effect> {
    let (flash, lifetime): (FlashId, _) = state.flash.show(text, severity, at);
    state.mark_dirty();
    lifetime
        .map(|after| Effect::ScheduleFlashExpiry { flash, after })
        .into_iter()
        .collect()
}

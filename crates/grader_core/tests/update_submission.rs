use std::sync::Once;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use grader_core::{
    update, AnalysisResponse, AppState, Effect, LastOutcome, Msg, RenderedResult, SelectedFile,
    Severity, SubmissionId, SubmissionOutcome, UploadSlot, BUSY_SUBMIT_LABEL,
    GENERIC_FAILURE_TEXT, IDLE_SUBMIT_LABEL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(grader_logging::initialize_for_tests);
}

fn at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn submit(state: AppState) -> (AppState, SubmissionId) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    let submission = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitAnalysis { submission, .. } => Some(*submission),
            _ => None,
        })
        .expect("submit effect");
    (state, submission)
}

fn settle(
    state: AppState,
    submission: SubmissionId,
    outcome: SubmissionOutcome,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::AnalysisSettled {
            submission,
            outcome,
            at: at(),
        },
    )
}

fn success() -> SubmissionOutcome {
    SubmissionOutcome::Response(AnalysisResponse::Success {
        table_markup: "<table>1</table>".to_string(),
        download_url: "/r/42.xlsx".to_string(),
        message: "Done".to_string(),
    })
}

fn failure(text: &str) -> SubmissionOutcome {
    SubmissionOutcome::Response(AnalysisResponse::Failure {
        error_text: text.to_string(),
    })
}

fn fault() -> SubmissionOutcome {
    SubmissionOutcome::TransportFault {
        detail: "connection refused".to_string(),
    }
}

#[test]
fn submit_enters_busy_state_and_emits_request() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileChosen {
            slot: UploadSlot::Rubric,
            file: Some(SelectedFile::new("rubric.xlsx", "/tmp/rubric.xlsx")),
        },
    );
    let (mut state, effects) = update(state, Msg::SubmitClicked);
    let view = state.view();

    assert!(view.busy);
    assert!(!view.submit.enabled);
    assert_eq!(view.submit.label, BUSY_SUBMIT_LABEL);
    assert!(view.overlay_visible);
    assert!(view.scroll_locked);
    assert!(state.consume_dirty());

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitAnalysis { submission, upload } => {
            assert_eq!(*submission, 1);
            assert_eq!(upload.rubric.as_ref().unwrap().name, "rubric.xlsx");
            assert!(upload.project_archive.is_none());
            assert!(upload.requirements.is_none());
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn submit_with_no_files_still_sends_request() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::SubmitClicked);
    match effects.as_slice() {
        [Effect::SubmitAnalysis { upload, .. }] => assert_eq!(upload.present().count(), 0),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    init_logging();
    let (mut state, submission) = submit(AppState::new());
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.in_flight(), Some(submission));
    assert!(!state.view().submit.enabled);
}

#[test]
fn success_renders_result_and_schedules_info_expiry() {
    init_logging();
    let (state, submission) = submit(AppState::new());
    let (state, effects) = settle(state, submission, success());
    let view = state.view();

    assert!(!view.busy);
    assert!(view.submit.enabled);
    assert_eq!(view.submit.label, IDLE_SUBMIT_LABEL);
    assert!(!view.overlay_visible);
    assert!(!view.scroll_locked);
    assert_eq!(
        view.result,
        Some(RenderedResult {
            table_markup: "<table>1</table>".to_string(),
            download_url: "/r/42.xlsx".to_string(),
        })
    );
    assert_eq!(view.last_outcome, Some(LastOutcome::Rendered));
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].text, "Done");
    assert_eq!(view.messages[0].severity, Severity::Info);
    assert_eq!(
        effects,
        vec![Effect::ScheduleFlashExpiry {
            flash: view.messages[0].id,
            after: Duration::from_millis(8000),
        }]
    );
    assert_eq!(state.flash().messages()[0].created_at, at());
}

#[test]
fn logical_failure_reports_error_without_result() {
    init_logging();
    let (state, submission) = submit(AppState::new());
    let (state, effects) = settle(state, submission, failure("Rubric missing required section"));
    let view = state.view();

    assert!(!view.busy);
    assert!(view.result.is_none());
    assert_eq!(view.last_outcome, Some(LastOutcome::ReportedError));
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].text, "Rubric missing required section");
    assert_eq!(view.messages[0].severity, Severity::Error);
    // Errors have no auto-dismiss timer.
    assert!(effects.is_empty());
}

#[test]
fn transport_fault_reports_generic_text_and_releases_busy() {
    init_logging();
    let (state, submission) = submit(AppState::new());
    let (state, effects) = settle(state, submission, fault());
    let view = state.view();

    assert!(!view.busy);
    assert!(view.submit.enabled);
    assert!(view.result.is_none());
    assert_eq!(view.last_outcome, Some(LastOutcome::Fault));
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].text, GENERIC_FAILURE_TEXT);
    assert_eq!(view.messages[0].severity, Severity::Error);
    assert!(effects.is_empty());
}

#[test]
fn busy_is_released_for_every_outcome() {
    init_logging();
    for outcome in [success(), failure("nope"), fault()] {
        let (state, submission) = submit(AppState::new());
        assert!(state.is_busy());
        let (state, _) = settle(state, submission, outcome);
        assert!(!state.is_busy());
        assert_eq!(state.in_flight(), None);
    }
}

#[test]
fn stale_settle_is_ignored() {
    init_logging();
    let (state, submission) = submit(AppState::new());
    let (mut state, effects) = settle(state, submission + 10, success());

    assert!(effects.is_empty());
    assert!(state.is_busy());
    assert!(state.view().messages.is_empty());
    assert!(state.view().result.is_none());
    // Only the dirty flag from the submit itself.
    assert!(state.consume_dirty());

    let (state, _) = settle(state, submission, success());
    assert!(!state.is_busy());
}

#[test]
fn settle_after_release_is_ignored() {
    init_logging();
    let (state, submission) = submit(AppState::new());
    let (state, _) = settle(state, submission, failure("first"));
    let (state, effects) = settle(state, submission, success());

    assert!(effects.is_empty());
    assert!(state.view().result.is_none());
    assert_eq!(state.view().messages.len(), 1);
}

#[test]
fn resubmit_hides_stale_result_and_clears_messages_before_request_completes() {
    init_logging();
    let (state, first) = submit(AppState::new());
    let (state, _) = settle(state, first, success());
    assert!(state.view().result.is_some());

    let (state, second) = submit(state);
    assert_ne!(first, second);
    let view = state.view();
    assert!(view.busy);
    assert!(view.result.is_none());
    assert!(view.messages.is_empty());
}

#[test]
fn resubmit_after_failure_starts_from_clean_idle() {
    init_logging();
    let (state, first) = submit(AppState::new());
    let (state, _) = settle(state, first, fault());
    assert!(!state.is_busy());

    let (state, second) = submit(state);
    assert_eq!(second, first + 1);
    assert!(state.view().result.is_none());

    let (state, _) = settle(state, second, success());
    let view = state.view();
    assert!(view.result.is_some());
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].severity, Severity::Info);
}

//! Grader core: pure submission state machine and view-model helpers.
//!
//! `update` plays the submission controller: it composes the file form, the
//! busy flag, the flash queue and the result panel, and hands IO back to the
//! caller as [`Effect`]s.
mod busy;
mod effect;
mod flash;
mod form;
mod msg;
mod response;
mod result;
mod state;
mod update;
mod view_model;

pub use busy::{BusyState, SubmissionId, BUSY_SUBMIT_LABEL, IDLE_SUBMIT_LABEL};
pub use effect::Effect;
pub use flash::{FlashId, FlashMessage, FlashMessenger, Severity, INFO_FLASH_LIFETIME};
pub use form::{
    FileField, FormCapture, LabelDefaults, SelectedFile, UploadSelection, UploadSlot,
    FALLBACK_LABEL_TEXT,
};
pub use msg::Msg;
pub use response::{AnalysisResponse, LastOutcome, SubmissionOutcome, GENERIC_FAILURE_TEXT};
pub use result::{DownloadId, RenderedResult, ReportDownload, ResultRenderer};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, FileLabelView, FlashView, SubmitControlView};

use crate::view_model::{AppViewModel, FileLabelView, FlashView, SubmitControlView};
use crate::{
    BusyState, FlashMessenger, FormCapture, LabelDefaults, LastOutcome, ResultRenderer,
    SubmissionId, UploadSlot, BUSY_SUBMIT_LABEL, IDLE_SUBMIT_LABEL,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) form: FormCapture,
    pub(crate) busy: BusyState,
    pub(crate) flash: FlashMessenger,
    pub(crate) result: ResultRenderer,
    pub(crate) last_outcome: Option<LastOutcome>,
    next_submission: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial state from the label texts found in the page markup.
    pub fn with_label_defaults(defaults: &LabelDefaults) -> Self {
        Self {
            form: FormCapture::new(defaults),
            ..Self::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.busy.in_flight()
    }

    pub fn flash(&self) -> &FlashMessenger {
        &self.flash
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.busy.is_busy();
        AppViewModel {
            file_labels: UploadSlot::ALL
                .into_iter()
                .map(|slot| FileLabelView {
                    slot,
                    text: self.form.field(slot).label_text().to_string(),
                })
                .collect(),
            submit: SubmitControlView {
                enabled: !busy,
                label: if busy {
                    BUSY_SUBMIT_LABEL
                } else {
                    IDLE_SUBMIT_LABEL
                },
            },
            overlay_visible: busy,
            scroll_locked: busy,
            busy,
            messages: self
                .flash
                .messages()
                .iter()
                .map(|message| FlashView {
                    id: message.id,
                    text: message.text.clone(),
                    severity: message.severity,
                })
                .collect(),
            result: self.result.rendered().cloned(),
            download: self.result.download().clone(),
            last_outcome: self.last_outcome,
            dirty: self.dirty,
        }
    }

    pub(crate) fn next_submission_id(&mut self) -> SubmissionId {
        self.next_submission += 1;
        self.next_submission
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

use crate::{FlashId, LastOutcome, RenderedResult, ReportDownload, Severity, UploadSlot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub file_labels: Vec<FileLabelView>,
    pub submit: SubmitControlView,
    pub overlay_visible: bool,
    pub scroll_locked: bool,
    pub busy: bool,
    pub messages: Vec<FlashView>,
    /// `Some` means the result container and the download affordance are visible.
    pub result: Option<RenderedResult>,
    pub download: ReportDownload,
    pub last_outcome: Option<LastOutcome>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn label_text(&self, slot: UploadSlot) -> Option<&str> {
        self.file_labels
            .iter()
            .find(|label| label.slot == slot)
            .map(|label| label.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabelView {
    pub slot: UploadSlot,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControlView {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashView {
    pub id: FlashId,
    pub text: String,
    pub severity: Severity,
}

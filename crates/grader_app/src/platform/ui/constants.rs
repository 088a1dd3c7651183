use std::fmt;

use grader_core::UploadSlot;

/// Stable identifier of an element on the upload page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(&'static str);

impl ElementId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

pub const UPLOAD_FORM: ElementId = ElementId::new("uploadForm");
pub const ANALYZE_BTN: ElementId = ElementId::new("analyzeBtn");
pub const LOADING_OVERLAY: ElementId = ElementId::new("loadingOverlay");
pub const MESSAGES: ElementId = ElementId::new("messages");
pub const RESULTS_CONTAINER: ElementId = ElementId::new("resultsContainer");
pub const DATAFRAME_OUTPUT: ElementId = ElementId::new("dataframeOutput");
pub const DOWNLOAD_REPORT_BTN: ElementId = ElementId::new("downloadReportBtn");

pub const INPUT_RUBRIC: ElementId = ElementId::new("rubricFile");
pub const INPUT_PROJECT: ElementId = ElementId::new("projectZip");
pub const INPUT_REQUIREMENTS: ElementId = ElementId::new("requirementsFile");
pub const LABEL_RUBRIC: ElementId = ElementId::new("rubricFile_label");
pub const LABEL_PROJECT: ElementId = ElementId::new("projectZip_label");
pub const LABEL_REQUIREMENTS: ElementId = ElementId::new("requirementsFile_label");

/// Body class that blocks scrolling while a submission is in flight.
pub const LOADING_ACTIVE_CLASS: &str = "loading-active";

pub fn file_input(slot: UploadSlot) -> ElementId {
    match slot {
        UploadSlot::Rubric => INPUT_RUBRIC,
        UploadSlot::ProjectArchive => INPUT_PROJECT,
        UploadSlot::Requirements => INPUT_REQUIREMENTS,
    }
}

pub fn file_label(slot: UploadSlot) -> ElementId {
    match slot {
        UploadSlot::Rubric => LABEL_RUBRIC,
        UploadSlot::ProjectArchive => LABEL_PROJECT,
        UploadSlot::Requirements => LABEL_REQUIREMENTS,
    }
}

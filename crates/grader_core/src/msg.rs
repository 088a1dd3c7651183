use std::path::PathBuf;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked (or cleared) a file in one of the inputs.
    FileChosen {
        slot: crate::UploadSlot,
        file: Option<crate::SelectedFile>,
    },
    /// User submitted the upload form.
    SubmitClicked,
    /// Engine finished the analysis request for a submission.
    AnalysisSettled {
        submission: crate::SubmissionId,
        outcome: crate::SubmissionOutcome,
        at: DateTime<Utc>,
    },
    /// User closed a message.
    FlashDismissed { flash: crate::FlashId },
    /// Auto-dismiss timer for an info message fired.
    FlashExpired { flash: crate::FlashId },
    /// User clicked the download affordance.
    DownloadClicked,
    /// Engine finished downloading the report.
    ReportDownloadSettled {
        download: crate::DownloadId,
        result: Result<PathBuf, String>,
        at: DateTime<Utc>,
    },
}

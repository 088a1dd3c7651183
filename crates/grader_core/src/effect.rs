use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitAnalysis {
        submission: crate::SubmissionId,
        upload: crate::UploadSelection,
    },
    ScheduleFlashExpiry {
        flash: crate::FlashId,
        after: Duration,
    },
    DownloadReport {
        download: crate::DownloadId,
        url: String,
    },
}

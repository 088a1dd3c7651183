/// Text shown when the request fails before a usable answer arrives.
pub const GENERIC_FAILURE_TEXT: &str =
    "An unexpected error occurred during analysis. Check the log for details.";

/// A well-formed answer from the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResponse {
    Success {
        table_markup: String,
        download_url: String,
        message: String,
    },
    Failure {
        error_text: String,
    },
}

/// How a submission settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Response(AnalysisResponse),
    /// Network failure or a body that is not the expected payload.
    TransportFault { detail: String },
}

/// Terminal state a submission passed through before returning to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastOutcome {
    Rendered,
    ReportedError,
    Fault,
}

impl SubmissionOutcome {
    pub fn kind(&self) -> LastOutcome {
        match self {
            SubmissionOutcome::Response(AnalysisResponse::Success { .. }) => LastOutcome::Rendered,
            SubmissionOutcome::Response(AnalysisResponse::Failure { .. }) => {
                LastOutcome::ReportedError
            }
            SubmissionOutcome::TransportFault { .. } => LastOutcome::Fault,
        }
    }
}

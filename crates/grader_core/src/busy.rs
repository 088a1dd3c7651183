/// Identifier minted for each submission; settles carry it back.
pub type SubmissionId = u64;

/// Submit control label while idle.
pub const IDLE_SUBMIT_LABEL: &str = "Analyze Project";
/// Submit control label while a request is in flight.
pub const BUSY_SUBMIT_LABEL: &str = "Analyzing...";

/// The single "submission in progress" flag.
///
/// The overlay, the submit control and the scroll lock are all derived from
/// this one value in the view model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusyState {
    in_flight: Option<SubmissionId>,
}

impl BusyState {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    /// Marks `submission` as in flight. Refuses if another one already is.
    pub(crate) fn enter(&mut self, submission: SubmissionId) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(submission);
        true
    }

    /// Releases the busy flag. Safe to call when already idle.
    pub(crate) fn leave(&mut self) -> Option<SubmissionId> {
        self.in_flight.take()
    }
}

use std::fmt;

/// Workflow step at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Status,
    Download,
    Save,
    /// Text translation, outside the document workflow.
    Translate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// Input rejected before any IO.
    Validation,
    /// Transport failure or timeout.
    Network,
    /// Non-2xx answer.
    Http(u16),
    /// The service answered, but not with what we expected.
    Decode,
    /// The service reports the job itself failed.
    Job,
    /// Polling hit its attempt bound without a terminal status.
    PollLimit,
    /// Reading the source file or writing the artifact failed.
    Storage,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub step: Step,
    pub cause: FailureCause,
    pub detail: String,
}

impl Failure {
    pub fn new(step: Step, cause: FailureCause, detail: impl Into<String>) -> Self {
        Self {
            step,
            cause,
            detail: detail.into(),
        }
    }

    pub fn cancelled(step: Step) -> Self {
        Self::new(step, FailureCause::Cancelled, "cancelled by user")
    }

    /// One-line, user-facing summary.
    pub fn status_text(&self) -> String {
        let what = match self.step {
            Step::Upload => "Upload failed",
            Step::Status => "Status check failed",
            Step::Download => "Download failed",
            Step::Save => "Could not save the translated file",
            Step::Translate => "Translation failed",
        };
        match &self.cause {
            FailureCause::Validation => format!("{what}: {}", self.detail),
            FailureCause::Network => format!("{what}: the service could not be reached."),
            FailureCause::Http(code) => format!("{what}: the service answered with HTTP {code}."),
            FailureCause::Decode => {
                format!("{what}: the service responded, but the answer was not understood.")
            }
            FailureCause::Job => "Translation failed on the server.".to_string(),
            FailureCause::PollLimit => {
                "Translation is taking too long; gave up waiting for the server.".to_string()
            }
            FailureCause::Storage => format!("{what}: {}", self.detail),
            FailureCause::Cancelled => "Translation cancelled.".to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {:?}: {}", self.cause, self.step, self.detail)
    }
}

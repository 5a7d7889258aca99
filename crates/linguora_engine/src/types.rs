use std::fmt;
use std::path::PathBuf;

use linguora_core::{DocumentHandle, JobId, JobStatus, Language};

/// Outcome reported by the engine thread back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    LanguagesLoaded(Result<Vec<Language>, ApiError>),
    Submitted {
        job_id: JobId,
        result: Result<DocumentHandle, ApiError>,
    },
    /// One poll tick, terminal or not.
    StatusPolled { job_id: JobId, status: JobStatus },
    PollFailed { job_id: JobId, error: ApiError },
    ResultSaved {
        job_id: JobId,
        result: Result<PathBuf, ApiError>,
    },
    TextTranslated {
        request_id: JobId,
        result: Result<String, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "operation cancelled")
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FailureKind::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Text is empty after trimming.
    EmptyInput,
    MissingTargetLanguage,
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    /// Body is not the JSON shape we expect.
    Decode,
    /// Body decodes but lacks required fields.
    MalformedResponse,
    EmptyBody,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    PollLimitReached { attempts: u32 },
    /// Local file could not be read or written.
    Storage,
    Cancelled,
}

impl FailureKind {
    /// Rejected before any request was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FailureKind::EmptyInput | FailureKind::MissingTargetLanguage
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::EmptyInput => write!(f, "empty input"),
            FailureKind::MissingTargetLanguage => write!(f, "missing target language"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::EmptyBody => write!(f, "empty response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::PollLimitReached { attempts } => {
                write!(f, "no terminal status after {attempts} polls")
            }
            FailureKind::Storage => write!(f, "storage error"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

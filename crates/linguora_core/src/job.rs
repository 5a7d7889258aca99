use std::fmt;
use std::path::PathBuf;

/// Per-session generation number. Every workflow effect and engine event is
/// tagged with one so results of a superseded job can be recognised.
pub type JobId = u64;

/// Server-side state of a document translation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Queued,
    Translating,
    Done,
    Error,
}

impl JobStatus {
    /// Parses the remote `status` field. Matching is case-insensitive and
    /// any value other than the four known ones counts as in progress.
    pub fn from_remote(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("queued") {
            JobStatus::Queued
        } else if trimmed.eq_ignore_ascii_case("done") {
            JobStatus::Done
        } else if trimmed.eq_ignore_ascii_case("error") {
            JobStatus::Error
        } else {
            JobStatus::Translating
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Queued => "Queued",
            JobStatus::Translating => "Translating",
            JobStatus::Done => "Done",
            JobStatus::Error => "Error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tone preference passed through to the translation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formality {
    #[default]
    Default,
    Less,
    More,
}

impl Formality {
    pub fn as_str(self) -> &'static str {
        match self {
            Formality::Default => "default",
            Formality::Less => "less",
            Formality::More => "more",
        }
    }
}

/// Access key of a document job. Holding it (with the id) is enough to read
/// the job's status and result, so it has no `Display` and a masked `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentKey(String);

impl DocumentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key for building requests. Never pass this to a logger.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentKey({})", engine_logging::redact(&self.0))
    }
}

/// The id/key pair returned by a successful document submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    pub id: String,
    pub key: DocumentKey,
}

impl DocumentHandle {
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: DocumentKey::new(key),
        }
    }
}

/// What the user asked for when picking a file. Lives from file selection
/// until the job is destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub job_id: JobId,
    pub file_name: String,
    pub path: PathBuf,
    pub target_lang: String,
    pub source_lang: Option<String>,
    pub formality: Formality,
}

/// A submitted document job. Created when submission succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub job_id: JobId,
    pub document: DocumentHandle,
    pub status: JobStatus,
    pub source_lang: Option<String>,
    pub target_lang: String,
    pub formality: Formality,
    pub artifact_path: Option<PathBuf>,
}

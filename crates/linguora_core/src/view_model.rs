use std::path::PathBuf;

use crate::{Formality, JobStatus, Language, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub document: DocumentView,
    pub text: TextView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentView {
    /// Alphabetical by display name.
    pub languages: Vec<Language>,
    pub target_lang: Option<String>,
    pub source_lang: Option<String>,
    pub formality: Formality,
    pub phase: Phase,
    pub file_name: Option<String>,
    pub job_status: Option<JobStatus>,
    pub artifact_path: Option<PathBuf>,
    pub status_line: String,
    /// The import button is enabled only once a target is chosen.
    pub can_submit: bool,
    pub busy: bool,
    /// Number of non-terminal status ticks applied to the current job.
    pub status_updates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextView {
    /// Server order.
    pub languages: Vec<Language>,
    pub input: String,
    pub output: Option<String>,
    pub target_lang: Option<String>,
    pub source_lang: Option<String>,
    pub translating: bool,
    pub message: Option<String>,
}

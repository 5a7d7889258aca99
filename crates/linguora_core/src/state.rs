use std::path::PathBuf;

use crate::language::sort_by_name;
use crate::view_model::{AppViewModel, DocumentView, TextView};
use crate::{Failure, Formality, JobId, JobRequest, JobStatus, Language, TranslationJob};

/// Phase of the document workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    AwaitingStatus,
    Downloading,
    Completed,
    Failed(Failure),
}

impl Phase {
    /// True while a job is in flight and owns engine resources.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Phase::Uploading | Phase::AwaitingStatus | Phase::Downloading
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DocumentState {
    pub(crate) languages: Vec<Language>,
    pub(crate) target_lang: Option<String>,
    pub(crate) source_lang: Option<String>,
    pub(crate) formality: Formality,
    pub(crate) phase: Phase,
    pub(crate) request: Option<JobRequest>,
    pub(crate) job: Option<TranslationJob>,
    pub(crate) validation: Option<String>,
    pub(crate) status_updates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TextState {
    pub(crate) languages: Vec<Language>,
    pub(crate) input: String,
    pub(crate) output: Option<String>,
    pub(crate) target_lang: Option<String>,
    pub(crate) source_lang: Option<String>,
    pub(crate) pending: Option<JobId>,
    pub(crate) message: Option<String>,
}

/// Everything one screen session knows. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) document: DocumentState,
    pub(crate) text: TextState,
    last_id: JobId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let doc = &self.document;
        AppViewModel {
            document: DocumentView {
                languages: doc.languages.clone(),
                target_lang: doc.target_lang.clone(),
                source_lang: doc.source_lang.clone(),
                formality: doc.formality,
                phase: doc.phase.clone(),
                file_name: doc.request.as_ref().map(|r| r.file_name.clone()),
                job_status: self.displayed_status(),
                artifact_path: doc.job.as_ref().and_then(|j| j.artifact_path.clone()),
                status_line: self.document_status_line(),
                can_submit: has_value(&doc.target_lang),
                busy: doc.phase.is_busy(),
                status_updates: doc.status_updates,
            },
            text: TextView {
                languages: self.text.languages.clone(),
                input: self.text.input.clone(),
                output: self.text.output.clone(),
                target_lang: self.text.target_lang.clone(),
                source_lang: self.text.source_lang.clone(),
                translating: self.text.pending.is_some(),
                message: self.text.message.clone(),
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> &Phase {
        &self.document.phase
    }

    pub fn job(&self) -> Option<&TranslationJob> {
        self.document.job.as_ref()
    }

    /// Id of the document job currently owning the workflow, if any.
    pub fn active_job_id(&self) -> Option<JobId> {
        self.document.request.as_ref().map(|r| r.job_id)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_id(&mut self) -> JobId {
        self.last_id += 1;
        self.last_id
    }

    pub(crate) fn set_languages(&mut self, languages: Vec<Language>) {
        let mut sorted = languages.clone();
        sort_by_name(&mut sorted);
        self.document.languages = sorted;
        self.document.target_lang = None;
        self.document.source_lang = None;
        self.text.languages = languages;
        self.text.target_lang = None;
        self.text.source_lang = None;
    }

    /// Current request when `job_id` still owns the workflow in `phase`.
    pub(crate) fn is_current(&self, job_id: JobId, phase: &Phase) -> bool {
        self.active_job_id() == Some(job_id) && &self.document.phase == phase
    }

    pub(crate) fn begin_upload(&mut self, request: JobRequest) {
        self.document.request = Some(request);
        self.document.job = None;
        self.document.validation = None;
        self.document.status_updates = 0;
        self.document.phase = Phase::Uploading;
    }

    pub(crate) fn fail(&mut self, failure: Failure) {
        self.document.phase = Phase::Failed(failure);
    }

    pub(crate) fn reset_document(&mut self) {
        let languages = std::mem::take(&mut self.document.languages);
        let target_lang = self.document.target_lang.take();
        let source_lang = self.document.source_lang.take();
        let formality = self.document.formality;
        self.document = DocumentState {
            languages,
            target_lang,
            source_lang,
            formality,
            ..DocumentState::default()
        };
    }

    pub(crate) fn set_artifact(&mut self, path: PathBuf) {
        if let Some(job) = self.document.job.as_mut() {
            job.artifact_path = Some(path);
        }
        self.document.phase = Phase::Completed;
    }

    fn displayed_status(&self) -> Option<JobStatus> {
        match self.document.phase {
            Phase::Idle | Phase::Uploading => None,
            _ => self.document.job.as_ref().map(|job| job.status),
        }
    }

    fn document_status_line(&self) -> String {
        let doc = &self.document;
        if let Some(message) = &doc.validation {
            return message.clone();
        }
        match &doc.phase {
            Phase::Idle => String::new(),
            Phase::Uploading => "Uploading document…".to_string(),
            Phase::AwaitingStatus => {
                let status = doc.job.as_ref().map(|j| j.status).unwrap_or_default();
                format!("Status: {status}")
            }
            Phase::Downloading => "Downloading translated file…".to_string(),
            Phase::Completed => "Translation complete".to_string(),
            Phase::Failed(failure) => failure.status_text(),
        }
    }
}

fn has_value(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

use std::path::PathBuf;

use crate::{DocumentHandle, Formality, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadLanguages,
    SubmitDocument {
        job_id: JobId,
        path: PathBuf,
        target_lang: String,
        source_lang: Option<String>,
        formality: Formality,
    },
    StartPolling {
        job_id: JobId,
        document: DocumentHandle,
    },
    FetchResult {
        job_id: JobId,
        document: DocumentHandle,
        file_name: String,
    },
    /// Stop everything running for `job_id`. Safe to repeat.
    CancelJob { job_id: JobId },
    TranslateText {
        request_id: JobId,
        text: String,
        target_lang: String,
        source_lang: Option<String>,
    },
}

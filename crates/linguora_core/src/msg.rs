use std::path::PathBuf;

use crate::{DocumentHandle, Failure, Formality, JobId, JobStatus, Language};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session opened; ask the engine for the language catalogue.
    Opened,
    /// Target language catalogue arrived (server order).
    LanguagesLoaded(Vec<Language>),
    /// Loading the catalogue failed; the pickers stay empty.
    LanguagesFailed(String),
    /// User picked (or cleared) the document target language.
    TargetLanguageSelected(Option<String>),
    /// User picked (or cleared) the document source language.
    SourceLanguageSelected(Option<String>),
    FormalitySelected(Formality),
    /// User picked a file in the document picker.
    FileSelected { path: PathBuf },
    /// Engine: the upload was accepted.
    SubmitSucceeded {
        job_id: JobId,
        document: DocumentHandle,
    },
    /// Engine: the upload failed.
    SubmitFailed { job_id: JobId, failure: Failure },
    /// Engine: one poll tick finished.
    StatusPolled { job_id: JobId, status: JobStatus },
    /// Engine: polling stopped on a transport, decode or limit failure.
    PollFailed { job_id: JobId, failure: Failure },
    /// Engine: the translated file is on disk.
    ResultSaved { job_id: JobId, path: PathBuf },
    /// Engine: downloading or saving the result failed.
    DownloadFailed { job_id: JobId, failure: Failure },
    /// User clicked Cancel.
    CancelClicked,
    /// The screen went away.
    Dismissed,
    /// User edited the text input (typed, OCR or speech output).
    TextInputChanged(String),
    TextTargetSelected(Option<String>),
    TextSourceSelected(Option<String>),
    TranslateTextClicked,
    /// Engine: a text translation finished.
    TextTranslated {
        request_id: JobId,
        result: Result<String, Failure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

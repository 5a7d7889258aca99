use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{
    AppState, Effect, Failure, FailureCause, JobId, JobRequest, JobStatus, Msg, Phase, Step,
    TranslationJob,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Opened => vec![Effect::LoadLanguages],
        Msg::LanguagesLoaded(languages) => {
            state.set_languages(languages);
            state.mark_dirty();
            Vec::new()
        }
        Msg::LanguagesFailed(reason) => {
            engine_warn!("Language catalogue unavailable: {}", reason);
            state.text.message = Some("Could not load the language list.".to_string());
            state.mark_dirty();
            Vec::new()
        }
        Msg::TargetLanguageSelected(lang) => {
            state.document.target_lang = non_empty(lang);
            state.document.validation = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SourceLanguageSelected(lang) => {
            state.document.source_lang = non_empty(lang);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FormalitySelected(formality) => {
            state.document.formality = formality;
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileSelected { path } => select_file(&mut state, path),
        Msg::SubmitSucceeded { job_id, document } => {
            if !state.is_current(job_id, &Phase::Uploading) {
                return ignore_stale(state, job_id, "submit result");
            }
            let Some(request) = state.document.request.as_ref() else {
                return (state, Vec::new());
            };
            engine_info!("Document accepted job_id={} document_id={}", job_id, document.id);
            state.document.job = Some(TranslationJob {
                job_id,
                document: document.clone(),
                status: JobStatus::Queued,
                source_lang: request.source_lang.clone(),
                target_lang: request.target_lang.clone(),
                formality: request.formality,
                artifact_path: None,
            });
            state.document.phase = Phase::AwaitingStatus;
            state.mark_dirty();
            vec![Effect::StartPolling { job_id, document }]
        }
        Msg::SubmitFailed { job_id, failure } => {
            if !state.is_current(job_id, &Phase::Uploading) {
                return ignore_stale(state, job_id, "submit failure");
            }
            state.fail(failure);
            state.mark_dirty();
            Vec::new()
        }
        Msg::StatusPolled { job_id, status } => {
            if !state.is_current(job_id, &Phase::AwaitingStatus) {
                return ignore_stale(state, job_id, "status tick");
            }
            apply_status(&mut state, job_id, status)
        }
        Msg::PollFailed { job_id, failure } => {
            if !state.is_current(job_id, &Phase::AwaitingStatus) {
                return ignore_stale(state, job_id, "poll failure");
            }
            state.fail(failure);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ResultSaved { job_id, path } => {
            if !state.is_current(job_id, &Phase::Downloading) {
                return ignore_stale(state, job_id, "saved result");
            }
            engine_info!("Translated file ready job_id={} path={:?}", job_id, path);
            state.set_artifact(path);
            state.mark_dirty();
            Vec::new()
        }
        Msg::DownloadFailed { job_id, failure } => {
            if !state.is_current(job_id, &Phase::Downloading) {
                return ignore_stale(state, job_id, "download failure");
            }
            state.fail(failure);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CancelClicked => {
            let step = match state.phase() {
                Phase::Uploading => Step::Upload,
                Phase::AwaitingStatus => Step::Status,
                Phase::Downloading => Step::Download,
                _ => return (state, Vec::new()),
            };
            let effects = cancel_active(&state);
            state.fail(Failure::cancelled(step));
            state.mark_dirty();
            effects
        }
        Msg::Dismissed => {
            let effects = cancel_active(&state);
            state.reset_document();
            state.text.pending = None;
            state.mark_dirty();
            effects
        }
        Msg::TextInputChanged(input) => {
            state.text.input = input;
            state.text.message = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::TextTargetSelected(lang) => {
            state.text.target_lang = non_empty(lang);
            state.text.message = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::TextSourceSelected(lang) => {
            state.text.source_lang = non_empty(lang);
            state.mark_dirty();
            Vec::new()
        }
        Msg::TranslateTextClicked => request_text_translation(&mut state),
        Msg::TextTranslated { request_id, result } => {
            if state.text.pending != Some(request_id) {
                return ignore_stale(state, request_id, "text translation");
            }
            state.text.pending = None;
            match result {
                Ok(text) => {
                    state.text.output = Some(text);
                    state.text.message = None;
                }
                Err(failure) => {
                    state.text.output = None;
                    state.text.message = Some(failure.status_text());
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn select_file(state: &mut AppState, path: PathBuf) -> Vec<Effect> {
    let Some(target_lang) = state.document.target_lang.clone() else {
        state.document.validation = Some("Select a target language first.".to_string());
        state.mark_dirty();
        return Vec::new();
    };
    let file_name = match path.file_name().and_then(|name| name.to_str()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            state.document.validation = Some("The selected file has no usable name.".to_string());
            state.mark_dirty();
            return Vec::new();
        }
    };

    // Stop any job still in flight first.
    let mut effects = cancel_active(state);
    let job_id = state.next_id();
    let request = JobRequest {
        job_id,
        file_name,
        path: path.clone(),
        target_lang: target_lang.clone(),
        source_lang: state.document.source_lang.clone(),
        formality: state.document.formality,
    };
    engine_info!(
        "FileSelected job_id={} file={} target={}",
        job_id,
        request.file_name,
        target_lang
    );
    effects.push(Effect::SubmitDocument {
        job_id,
        path,
        target_lang,
        source_lang: request.source_lang.clone(),
        formality: request.formality,
    });
    state.begin_upload(request);
    state.mark_dirty();
    effects
}

fn apply_status(state: &mut AppState, job_id: JobId, status: JobStatus) -> Vec<Effect> {
    let Some(job) = state.document.job.as_mut() else {
        return Vec::new();
    };
    job.status = status;
    let document = job.document.clone();
    state.mark_dirty();

    match status {
        JobStatus::Done => {
            let file_name = state
                .document
                .request
                .as_ref()
                .map(|r| r.file_name.clone())
                .unwrap_or_default();
            state.document.phase = Phase::Downloading;
            vec![Effect::FetchResult {
                job_id,
                document,
                file_name,
            }]
        }
        JobStatus::Error => {
            state.fail(Failure::new(
                Step::Status,
                FailureCause::Job,
                "the service reported an error for this document",
            ));
            Vec::new()
        }
        JobStatus::Queued | JobStatus::Translating => {
            state.document.status_updates += 1;
            Vec::new()
        }
    }
}

fn request_text_translation(state: &mut AppState) -> Vec<Effect> {
    let text = state.text.input.trim().to_string();
    state.mark_dirty();
    if text.is_empty() {
        state.text.message = Some("Enter some text to translate.".to_string());
        return Vec::new();
    }
    let Some(target_lang) = state.text.target_lang.clone().filter(|lang| !lang.trim().is_empty()) else {
        state.text.message = Some("Choose a target language.".to_string());
        return Vec::new();
    };

    let request_id = state.next_id();
    state.text.pending = Some(request_id);
    state.text.output = None;
    state.text.message = None;
    vec![Effect::TranslateText {
        request_id,
        text,
        target_lang,
        source_lang: state.text.source_lang.clone(),
    }]
}

fn cancel_active(state: &AppState) -> Vec<Effect> {
    match state.active_job_id() {
        Some(job_id) if state.phase().is_busy() => vec![Effect::CancelJob { job_id }],
        _ => Vec::new(),
    }
}

fn ignore_stale(state: AppState, id: JobId, what: &str) -> (AppState, Vec<Effect>) {
    engine_debug!("Ignoring stale {} for id={}", what, id);
    (state, Vec::new())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

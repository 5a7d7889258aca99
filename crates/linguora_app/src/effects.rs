use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use linguora_core::{Effect, Failure, FailureCause, Msg, Step};
use linguora_engine::{ApiError, EngineConfig, EngineEvent, EngineHandle, FailureKind, TranslationApi};

/// Hands core effects to the engine and turns engine events back into
/// messages for `update`.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn TranslationApi>, config: EngineConfig) -> Self {
        engine_info!(
            "Starting engine (output {:?}, poll every {:?}, max {} attempts)",
            config.output_dir,
            config.poll.interval,
            config.poll.max_attempts
        );
        Self {
            engine: EngineHandle::new(api, config),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match &effect {
                Effect::SubmitDocument { job_id, path, target_lang, .. } => {
                    engine_info!("SubmitDocument job_id={} path={:?} target={}", job_id, path, target_lang);
                }
                Effect::StartPolling { job_id, document } => {
                    engine_info!("StartPolling job_id={} document_id={}", job_id, document.id);
                }
                Effect::FetchResult { job_id, file_name, .. } => {
                    engine_info!("FetchResult job_id={} file={}", job_id, file_name);
                }
                Effect::CancelJob { job_id } => engine_info!("CancelJob job_id={}", job_id),
                Effect::LoadLanguages => engine_debug!("LoadLanguages"),
                Effect::TranslateText { request_id, text, .. } => {
                    engine_debug!("TranslateText request_id={} chars={}", request_id, text.chars().count());
                }
            }
            self.engine.execute(effect);
        }
    }

    pub fn try_next(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LanguagesLoaded(Ok(languages)) => Msg::LanguagesLoaded(languages),
        EngineEvent::LanguagesLoaded(Err(error)) => {
            engine_warn!("Language catalogue unavailable: {}", error);
            Msg::LanguagesFailed(error.to_string())
        }
        EngineEvent::Submitted { job_id, result } => match result {
            Ok(document) => Msg::SubmitSucceeded { job_id, document },
            Err(error) => Msg::SubmitFailed {
                job_id,
                failure: to_failure(Step::Upload, &error),
            },
        },
        EngineEvent::StatusPolled { job_id, status } => Msg::StatusPolled { job_id, status },
        EngineEvent::PollFailed { job_id, error } => Msg::PollFailed {
            job_id,
            failure: to_failure(Step::Status, &error),
        },
        EngineEvent::ResultSaved { job_id, result } => match result {
            Ok(path) => Msg::ResultSaved { job_id, path },
            Err(error) => {
                let step = if error.kind == FailureKind::Storage {
                    Step::Save
                } else {
                    Step::Download
                };
                Msg::DownloadFailed {
                    job_id,
                    failure: to_failure(step, &error),
                }
            }
        },
        EngineEvent::TextTranslated { request_id, result } => Msg::TextTranslated {
            request_id,
            result: result.map_err(|error| to_failure(Step::Translate, &error)),
        },
    }
}

pub fn to_failure(step: Step, error: &ApiError) -> Failure {
    let cause = match &error.kind {
        FailureKind::EmptyInput | FailureKind::MissingTargetLanguage => FailureCause::Validation,
        FailureKind::InvalidUrl | FailureKind::Network | FailureKind::Timeout => {
            FailureCause::Network
        }
        FailureKind::HttpStatus(code) => FailureCause::Http(*code),
        FailureKind::Decode
        | FailureKind::MalformedResponse
        | FailureKind::EmptyBody
        | FailureKind::TooLarge { .. } => FailureCause::Decode,
        FailureKind::PollLimitReached { .. } => FailureCause::PollLimit,
        FailureKind::Storage => FailureCause::Storage,
        FailureKind::Cancelled => FailureCause::Cancelled,
    };
    Failure::new(step, cause, error.message.clone())
}

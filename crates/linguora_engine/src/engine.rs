use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use linguora_core::{DocumentHandle, Effect, Formality, JobId};
use tokio_util::sync::CancellationToken;

use engine_logging::{engine_debug, engine_error, engine_info};

use crate::client::{translate_text, TranslationApi};
use crate::filename::artifact_filename;
use crate::persist::AtomicFileWriter;
use crate::poll::{poll_until_terminal, with_cancel};
use crate::request::DocumentUpload;
use crate::settings::EngineConfig;
use crate::{ApiError, EngineEvent, FailureKind};

/// Runs effects on a dedicated thread with its own tokio runtime and hands
/// results back as [`EngineEvent`]s, so the caller's thread never blocks on IO.
///
/// Every document job gets a [`CancellationToken`]. Starting a submission
/// cancels all other jobs, so at most one job is ever in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Effect>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn TranslationApi>, config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("linguora-engine".to_string())
            .spawn(move || run_engine(api, config, cmd_rx, event_tx));
        if let Err(err) = spawned {
            engine_error!("Failed to spawn engine thread: {}", err);
        }

        Self { cmd_tx, event_rx }
    }

    pub fn execute(&self, effect: Effect) {
        if self.cmd_tx.send(effect).is_err() {
            engine_error!("Engine thread is gone; effect dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_engine(
    api: Arc<dyn TranslationApi>,
    config: EngineConfig,
    cmd_rx: mpsc::Receiver<Effect>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            engine_error!("Failed to start engine runtime: {}", err);
            return;
        }
    };

    let mut jobs: HashMap<JobId, CancellationToken> = HashMap::new();
    while let Ok(effect) = cmd_rx.recv() {
        match effect {
            Effect::CancelJob { job_id } => {
                if let Some(token) = jobs.remove(&job_id) {
                    engine_info!("Cancelling job_id={}", job_id);
                    token.cancel();
                } else {
                    engine_debug!("Cancel for inactive job_id={} ignored", job_id);
                }
            }
            Effect::SubmitDocument {
                job_id,
                path,
                target_lang,
                source_lang,
                formality,
            } => {
                jobs.retain(|id, token| {
                    if *id != job_id {
                        token.cancel();
                    }
                    *id == job_id
                });
                let cancel = jobs.entry(job_id).or_default().clone();
                let job = SubmitJob {
                    job_id,
                    path,
                    target_lang,
                    source_lang,
                    formality,
                };
                runtime.spawn(submit(api.clone(), job, cancel, event_tx.clone()));
            }
            Effect::StartPolling { job_id, document } => {
                let cancel = jobs.entry(job_id).or_default().clone();
                runtime.spawn(poll(
                    api.clone(),
                    config.clone(),
                    job_id,
                    document,
                    cancel,
                    event_tx.clone(),
                ));
            }
            Effect::FetchResult {
                job_id,
                document,
                file_name,
            } => {
                let cancel = jobs.entry(job_id).or_default().clone();
                runtime.spawn(fetch(
                    api.clone(),
                    config.output_dir.clone(),
                    job_id,
                    document,
                    file_name,
                    cancel,
                    event_tx.clone(),
                ));
            }
            Effect::LoadLanguages => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = api.target_languages().await;
                    let _ = event_tx.send(EngineEvent::LanguagesLoaded(result));
                });
            }
            Effect::TranslateText {
                request_id,
                text,
                target_lang,
                source_lang,
            } => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result =
                        translate_text(api.as_ref(), &text, &target_lang, source_lang.as_deref())
                            .await;
                    let _ = event_tx.send(EngineEvent::TextTranslated { request_id, result });
                });
            }
        }
    }

    // The handle was dropped: nothing can observe further results.
    for token in jobs.values() {
        token.cancel();
    }
    engine_debug!("Engine thread stopped");
}

struct SubmitJob {
    job_id: JobId,
    path: PathBuf,
    target_lang: String,
    source_lang: Option<String>,
    formality: Formality,
}

async fn submit(
    api: Arc<dyn TranslationApi>,
    job: SubmitJob,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = with_cancel(&cancel, async {
        let upload = DocumentUpload::from_path(
            &job.path,
            Some(&job.target_lang),
            job.source_lang.as_deref(),
            job.formality,
        )
        .await?;
        api.submit_document(&upload).await
    })
    .await;

    if cancel.is_cancelled() {
        return;
    }
    let _ = event_tx.send(EngineEvent::Submitted {
        job_id: job.job_id,
        result,
    });
}

async fn poll(
    api: Arc<dyn TranslationApi>,
    config: EngineConfig,
    job_id: JobId,
    document: DocumentHandle,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let tick_tx = event_tx.clone();
    let result = poll_until_terminal(api.as_ref(), &document, &config.poll, &cancel, move |status| {
        let _ = tick_tx.send(EngineEvent::StatusPolled { job_id, status });
    })
    .await;

    match result {
        Ok(_) => {}
        Err(error) if error.is_cancelled() || cancel.is_cancelled() => {}
        Err(error) => {
            let _ = event_tx.send(EngineEvent::PollFailed { job_id, error });
        }
    }
}

async fn fetch(
    api: Arc<dyn TranslationApi>,
    output_dir: PathBuf,
    job_id: JobId,
    document: DocumentHandle,
    file_name: String,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = match with_cancel(&cancel, api.document_result(&document)).await {
        Ok(bytes) => save_artifact(output_dir, &file_name, bytes, cancel.clone()).await,
        Err(error) => Err(error),
    };

    if cancel.is_cancelled() {
        return;
    }
    let _ = event_tx.send(EngineEvent::ResultSaved { job_id, result });
}

/// Writes the artifact on the blocking pool. The token is checked after the
/// bytes are staged and before the rename, so a cancelled job leaves the
/// output directory untouched.
async fn save_artifact(
    output_dir: PathBuf,
    file_name: &str,
    bytes: Bytes,
    cancel: CancellationToken,
) -> Result<PathBuf, ApiError> {
    let writer = AtomicFileWriter::new(output_dir);
    let target_name = artifact_filename(file_name);
    let written = tokio::task::spawn_blocking(move || {
        writer.write_unless(&target_name, &bytes, || cancel.is_cancelled())
    })
    .await
    .map_err(|err| ApiError::new(FailureKind::Storage, err.to_string()))?
    .map_err(|err| ApiError::new(FailureKind::Storage, err.to_string()))?;
    written.ok_or_else(ApiError::cancelled)
}

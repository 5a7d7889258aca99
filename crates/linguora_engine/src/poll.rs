use std::future::Future;

use linguora_core::{DocumentHandle, JobStatus};
use tokio_util::sync::CancellationToken;

use engine_logging::{engine_debug, engine_warn};

use crate::client::TranslationApi;
use crate::settings::PollSettings;
use crate::{ApiError, FailureKind};

/// Polls `document` until the service reports `Done` or `Error`.
///
/// Every attempt first waits one interval, then issues exactly one status
/// request; at least one attempt is made even when `max_attempts` is zero.
/// `on_tick` sees each status before the next attempt starts, so
/// ticks never overlap. Transport and decode failures end polling at once.
/// Cancellation is honoured while waiting and while a request is in flight;
/// a cancelled poll reports nothing further through `on_tick`.
pub async fn poll_until_terminal<F>(
    api: &dyn TranslationApi,
    document: &DocumentHandle,
    settings: &PollSettings,
    cancel: &CancellationToken,
    mut on_tick: F,
) -> Result<JobStatus, ApiError>
where
    F: FnMut(JobStatus) + Send,
{
    let max_attempts = settings.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApiError::cancelled()),
            _ = tokio::time::sleep(settings.interval) => {}
        }

        let status = with_cancel(cancel, api.document_status(document)).await?;
        engine_debug!(
            "Poll attempt {} document_id={} status={}",
            attempt,
            document.id,
            status
        );
        on_tick(status);
        if status.is_terminal() {
            return Ok(status);
        }
    }

    engine_warn!(
        "Giving up on document_id={} after {} polls",
        document.id,
        max_attempts
    );
    Err(ApiError::new(
        FailureKind::PollLimitReached {
            attempts: max_attempts,
        },
        "job did not finish in time",
    ))
}

/// Races `fut` against `cancel`; the future is dropped (and its request
/// aborted) as soon as the token fires.
pub async fn with_cancel<T, Fut>(cancel: &CancellationToken, fut: Fut) -> Result<T, ApiError>
where
    Fut: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::cancelled()),
        result = fut => result,
    }
}

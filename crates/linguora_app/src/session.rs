use std::sync::Arc;
use std::time::{Duration, Instant};

use engine_logging::engine_debug;
use linguora_core::{update, AppState, AppViewModel, Msg};
use linguora_engine::{ApiError, EngineConfig, ReqwestTranslationApi, TranslationApi};
use thiserror::Error;

use crate::config::AppConfig;
use crate::effects::EffectRunner;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("translation client unavailable: {0}")]
    Client(#[from] ApiError),
}

/// One screen session: owns the state, applies messages one at a time and
/// feeds the resulting effects to the engine.
///
/// Dropping the session dismisses it, which cancels any job still running.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    pub fn new(config: &AppConfig) -> Result<Self, SessionError> {
        let api = ReqwestTranslationApi::new(config.api_settings())?;
        Ok(Self::with_api(Arc::new(api), config.engine_config()))
    }

    /// Opens a session against any [`TranslationApi`]; the language
    /// catalogue is requested right away.
    pub fn with_api(api: Arc<dyn TranslationApi>, engine: EngineConfig) -> Self {
        let mut session = Self {
            state: AppState::new(),
            runner: EffectRunner::new(api, engine),
        };
        session.dispatch(Msg::Opened);
        session
    }

    /// Applies `msg` and runs its effects. Returns whether the view changed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty
    }

    /// Applies every engine event that has already arrived. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(msg) = self.runner.try_next() {
            self.dispatch(msg);
            handled += 1;
        }
        handled
    }

    /// Applies engine events as they arrive until `done` holds for the view
    /// or `timeout` passes. Returns whether `done` was reached.
    pub fn wait_until<F>(&mut self, timeout: Duration, mut done: F) -> bool
    where
        F: FnMut(&AppViewModel) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            if done(&self.state.view()) {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                engine_debug!("wait_until timed out after {:?}", timeout);
                return false;
            }
            if let Some(msg) = self.runner.next_timeout(remaining) {
                self.dispatch(msg);
            }
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.dispatch(Msg::Dismissed);
    }
}

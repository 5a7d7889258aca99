//! Host configuration, read from a RON file.
//!
//! Every field has a default, so an empty `()` file (or no file at all via
//! [`AppConfig::load_or_default`]) yields a usable configuration apart from
//! the API key.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use linguora_engine::{
    ApiSettings, CountrySettings, EngineConfig, PollSettings, DEFAULT_API_BASE,
    DEFAULT_COUNTRY_BASE,
};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use engine_logging::engine_info;

use crate::logging::{self, LogDestination};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub country_base_url: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_result_bytes: u64,
    /// Translated files land here; `<temp>/linguora` when unset.
    pub output_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        let poll = PollSettings::default();
        Self {
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            country_base_url: DEFAULT_COUNTRY_BASE.to_string(),
            poll_interval_ms: poll.interval.as_millis() as u64,
            max_poll_attempts: poll.max_attempts,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_result_bytes: api.max_result_bytes,
            output_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &engine_logging::redact(&self.api_key))
            .field("api_base_url", &self.api_base_url)
            .field("country_base_url", &self.country_base_url)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_result_bytes", &self.max_result_bytes)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        engine_info!("Loaded config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                engine_info!("No config at {:?}; using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_result_bytes: self.max_result_bytes,
        }
    }

    /// At least one attempt is always made.
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_poll_attempts.max(1),
        }
    }

    pub fn country_settings(&self) -> CountrySettings {
        CountrySettings {
            base_url: self.country_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Installs the global logger at the configured `log_level`.
    pub fn init_logging(&self, destination: LogDestination) {
        logging::initialize(destination, self.log_level_filter());
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        logging::parse_level(&self.log_level)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("linguora"))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            poll: self.poll_settings(),
            output_dir: self.output_dir(),
        }
    }
}

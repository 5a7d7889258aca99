use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api-free.deepl.com/v2";
pub const DEFAULT_COUNTRY_BASE: &str = "https://restcountries.com/v3.1";

/// Connection parameters for the translation service. The key is injected
/// here and nowhere else.
#[derive(Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound for a downloaded translated document.
    pub max_result_bytes: u64,
}

impl ApiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_result_bytes: 50 * 1024 * 1024,
        }
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &engine_logging::redact(&self.api_key))
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_result_bytes", &self.max_result_bytes)
            .finish()
    }
}

/// Status polling policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay before each status request, including the first one.
    pub interval: Duration,
    /// Requests issued before giving up on a job that never finishes.
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountrySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for CountrySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COUNTRY_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Everything the background engine needs besides the API client.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub poll: PollSettings,
    /// Where translated files are written.
    pub output_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            poll: PollSettings::default(),
            output_dir,
        }
    }
}

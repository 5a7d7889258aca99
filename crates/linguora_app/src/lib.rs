//! Host side of Linguora: configuration, logging, preferences and the
//! session that drives the core state machine against the engine.
pub mod config;
pub mod effects;
pub mod logging;
pub mod preferences;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use preferences::{Preferences, PreferencesError, Theme};
pub use session::{Session, SessionError};

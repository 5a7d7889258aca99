//! Linguora engine: translation service IO, polling and effect execution.
mod client;
mod country;
mod engine;
mod filename;
mod mime;
mod persist;
mod poll;
mod request;
mod settings;
mod types;

pub use client::{submit_document, translate_text, ReqwestTranslationApi, TranslationApi};
pub use country::{
    current_country, CapitalInfo, Country, CountryClient, CountryName, Currency, Flags,
    LocationProvider,
};
pub use engine::EngineHandle;
pub use filename::{artifact_filename, ARTIFACT_PREFIX};
pub use mime::{
    extension_of, mime_for_extension, output_format_for_extension, FALLBACK_MIME, OUTPUT_FORMATS,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use poll::{poll_until_terminal, with_cancel};
pub use request::{DocumentUpload, TextRequest};
pub use settings::{
    ApiSettings, CountrySettings, EngineConfig, PollSettings, DEFAULT_API_BASE,
    DEFAULT_COUNTRY_BASE,
};
pub use types::{ApiError, EngineEvent, FailureKind};

//! Linguora core: pure workflow state machine and view-model helpers.
mod effect;
mod failure;
mod job;
mod language;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use failure::{Failure, FailureCause, Step};
pub use job::{
    DocumentHandle, DocumentKey, Formality, JobId, JobRequest, JobStatus, TranslationJob,
};
pub use language::{flag_emoji, sort_by_name, Language};
pub use msg::Msg;
pub use state::{AppState, Phase};
pub use update::update;
pub use view_model::{AppViewModel, DocumentView, TextView};

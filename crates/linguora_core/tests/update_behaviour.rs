use std::path::PathBuf;
use std::sync::Once;

use linguora_core::{
    update, AppState, DocumentHandle, Effect, Failure, FailureCause, Formality, JobStatus,
    Language, Msg, Phase, Step,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn with_target(lang: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::TargetLanguageSelected(Some(lang.to_string())),
    );
    state
}

fn select_file(state: AppState, path: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileSelected {
            path: PathBuf::from(path),
        },
    )
}

#[test]
fn opening_requests_languages() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::Opened);
    assert_eq!(effects, vec![Effect::LoadLanguages]);
}

#[test]
fn languages_are_sorted_for_documents_and_reset_selection() {
    init_logging();
    let state = with_target("EN");
    let (state, _) = update(
        state,
        Msg::LanguagesLoaded(vec![
            Language::new("FR", "French"),
            Language::new("BG", "Bulgarian"),
        ]),
    );

    let view = state.view();
    let doc_names: Vec<_> = view.document.languages.iter().map(|l| l.name.clone()).collect();
    let text_names: Vec<_> = view.text.languages.iter().map(|l| l.name.clone()).collect();
    assert_eq!(doc_names, vec!["Bulgarian", "French"]);
    assert_eq!(text_names, vec!["French", "Bulgarian"]);
    assert_eq!(view.document.target_lang, None);
    assert!(!view.document.can_submit);
}

#[test]
fn file_without_target_language_stays_idle_with_message() {
    init_logging();
    let (mut state, effects) = select_file(AppState::new(), "/tmp/report.pdf");

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Idle);
    assert_eq!(state.view().document.status_line, "Select a target language first.");
    assert!(state.consume_dirty());
}

#[test]
fn blank_target_language_counts_as_missing() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::TargetLanguageSelected(Some("   ".to_string())),
    );
    let (state, effects) = select_file(state, "/tmp/report.pdf");

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Idle);
}

#[test]
fn file_selection_starts_upload() {
    init_logging();
    let state = with_target("EN");
    let (state, _) = update(state, Msg::SourceLanguageSelected(Some("FR".to_string())));
    let (state, _) = update(state, Msg::FormalitySelected(Formality::More));
    let (state, effects) = select_file(state, "/tmp/docs/report.pdf");

    assert_eq!(state.phase(), &Phase::Uploading);
    assert_eq!(
        effects,
        vec![Effect::SubmitDocument {
            job_id: 1,
            path: PathBuf::from("/tmp/docs/report.pdf"),
            target_lang: "EN".to_string(),
            source_lang: Some("FR".to_string()),
            formality: Formality::More,
        }]
    );
    let view = state.view();
    assert_eq!(view.document.file_name.as_deref(), Some("report.pdf"));
    assert_eq!(view.document.status_line, "Uploading document…");
    assert!(view.document.busy);
}

#[test]
fn submit_success_starts_polling_and_displays_queued() {
    init_logging();
    let (state, _) = select_file(with_target("EN"), "/tmp/a.docx");
    let document = DocumentHandle::new("doc-1", "key-1");
    let (state, effects) = update(
        state,
        Msg::SubmitSucceeded {
            job_id: 1,
            document: document.clone(),
        },
    );

    assert_eq!(state.phase(), &Phase::AwaitingStatus);
    assert_eq!(effects, vec![Effect::StartPolling { job_id: 1, document }]);
    let view = state.view();
    assert_eq!(view.document.job_status, Some(JobStatus::Queued));
    assert_eq!(view.document.status_line, "Status: Queued");
}

#[test]
fn submit_failure_is_terminal_and_reflects_kind() {
    init_logging();
    let (state, _) = select_file(with_target("EN"), "/tmp/a.docx");
    let failure = Failure::new(Step::Upload, FailureCause::Decode, "missing document_key");
    let (state, effects) = update(
        state,
        Msg::SubmitFailed {
            job_id: 1,
            failure: failure.clone(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), &Phase::Failed(failure));
    assert_eq!(
        state.view().document.status_line,
        "Upload failed: the service responded, but the answer was not understood."
    );
}

#[test]
fn cancel_while_busy_fails_and_emits_cancel() {
    init_logging();
    let (state, _) = select_file(with_target("EN"), "/tmp/a.docx");
    let (state, effects) = update(state, Msg::CancelClicked);

    assert_eq!(effects, vec![Effect::CancelJob { job_id: 1 }]);
    assert_eq!(state.phase(), &Phase::Failed(Failure::cancelled(Step::Upload)));
}

#[test]
fn cancel_twice_matches_cancel_once() {
    init_logging();
    let (state, _) = select_file(with_target("EN"), "/tmp/a.docx");
    let (once, _) = update(state, Msg::CancelClicked);
    let (twice, effects) = update(once.clone(), Msg::CancelClicked);

    assert!(effects.is_empty());
    assert_eq!(once.view(), twice.view());
}

#[test]
fn cancel_when_idle_is_noop() {
    init_logging();
    let state = with_target("EN");
    let (next, effects) = update(state.clone(), Msg::CancelClicked);

    assert!(effects.is_empty());
    assert_eq!(state, next);
}

#[test]
fn new_file_while_polling_cancels_previous_job_first() {
    init_logging();
    let (state, _) = select_file(with_target("EN"), "/tmp/a.docx");
    let (state, _) = update(
        state,
        Msg::SubmitSucceeded {
            job_id: 1,
            document: DocumentHandle::new("doc-1", "key-1"),
        },
    );
    let (state, effects) = select_file(state, "/tmp/b.pdf");

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::CancelJob { job_id: 1 });
    assert!(matches!(
        effects[1],
        Effect::SubmitDocument { job_id: 2, .. }
    ));
    assert_eq!(state.phase(), &Phase::Uploading);
    assert_eq!(state.job(), None);
}

#[test]
fn failed_workflow_can_be_restarted_without_cancel() {
    init_logging();
    let (state, _) = select_file(with_target("EN"), "/tmp/a.docx");
    let (state, _) = update(
        state,
        Msg::SubmitFailed {
            job_id: 1,
            failure: Failure::new(Step::Upload, FailureCause::Network, "connection refused"),
        },
    );
    let (state, effects) = select_file(state, "/tmp/a.docx");

    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::SubmitDocument { job_id: 2, .. }));
    assert_eq!(state.phase(), &Phase::Uploading);
}

#[test]
fn dismiss_cancels_and_resets_job_but_keeps_languages() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::LanguagesLoaded(vec![Language::new("EN", "English")]),
    );
    let (state, _) = update(state, Msg::TargetLanguageSelected(Some("EN".to_string())));
    let (state, _) = select_file(state, "/tmp/a.docx");
    let (state, effects) = update(state, Msg::Dismissed);

    assert_eq!(effects, vec![Effect::CancelJob { job_id: 1 }]);
    assert_eq!(state.phase(), &Phase::Idle);
    assert_eq!(state.active_job_id(), None);
    let view = state.view();
    assert_eq!(view.document.languages.len(), 1);
    assert_eq!(view.document.file_name, None);
}

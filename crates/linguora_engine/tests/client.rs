use std::time::Duration;

use linguora_core::{DocumentHandle, Formality, JobStatus, Language};
use linguora_engine::{
    submit_document, translate_text, ApiSettings, FailureKind, ReqwestTranslationApi,
    TranslationApi,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestTranslationApi {
    let mut settings = ApiSettings::new("test-key");
    settings.base_url = format!("{}/v2", server.uri());
    settings.request_timeout = Duration::from_secs(5);
    ReqwestTranslationApi::new(settings).expect("valid settings")
}

#[tokio::test]
async fn translate_returns_first_translation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(header("Authorization", "DeepL-Auth-Key test-key"))
        .and(body_string_contains("text=Hello"))
        .and(body_string_contains("target_lang=DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translations": [{ "detected_source_language": "EN", "text": "Hallo" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let text = translate_text(&api, "  Hello ", "DE", None).await.unwrap();
    assert_eq!(text, "Hallo");
}

#[tokio::test]
async fn blank_text_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server);
    for input in ["", "   \n\t"] {
        let err = translate_text(&api, input, "DE", None).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::EmptyInput);
    }
    let err = translate_text(&api, "Hello", " ", None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MissingTargetLanguage);
}

#[tokio::test]
async fn translate_without_translations_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "translations": [] })),
        )
        .mount(&server)
        .await;

    let err = translate_text(&api_for(&server), "Hello", "DE", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn error_statuses_surface_as_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(403))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let first = translate_text(&api, "Hello", "DE", None).await.unwrap_err();
    assert_eq!(first.kind, FailureKind::HttpStatus(403));
    let second = translate_text(&api, "Hello", "DE", None).await.unwrap_err();
    assert_eq!(second.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let mut settings = ApiSettings::new("test-key");
    settings.base_url = "http://127.0.0.1:1/v2".to_string();
    settings.connect_timeout = Duration::from_secs(2);
    let api = ReqwestTranslationApi::new(settings).unwrap();

    let err = translate_text(&api, "Hello", "DE", None).await.unwrap_err();
    assert!(
        matches!(err.kind, FailureKind::Network | FailureKind::Timeout),
        "unexpected {err:?}"
    );
}

#[tokio::test]
async fn target_languages_are_decoded_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/languages"))
        .and(query_param("type", "target"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "language": "DE", "name": "German", "supports_formality": true },
            { "language": "EN-GB", "name": "English (British)", "supports_formality": false }
        ])))
        .mount(&server)
        .await;

    let languages = api_for(&server).target_languages().await.unwrap();
    assert_eq!(
        languages,
        vec![
            Language::new("DE", "German"),
            Language::new("EN-GB", "English (British)")
        ]
    );
}

#[tokio::test]
async fn submit_sends_multipart_fields_and_returns_handle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/document"))
        .and(body_string_contains("name=\"target_lang\"\r\n\r\nDE\r\n"))
        .and(body_string_contains("name=\"formality\"\r\n\r\nmore\r\n"))
        .and(body_string_contains("name=\"output_format\"\r\n\r\ntxt\r\n"))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("some notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "document_id": "DOC1",
            "document_key": "KEY1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = submit_document(
        &api_for(&server),
        b"some notes".to_vec(),
        "notes.txt",
        Some("DE"),
        None,
        Formality::More,
    )
    .await
    .unwrap();
    assert_eq!(handle, DocumentHandle::new("DOC1", "KEY1"));
}

#[tokio::test]
async fn submit_without_target_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = submit_document(
        &api_for(&server),
        b"x".to_vec(),
        "a.pdf",
        None,
        None,
        Formality::Default,
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::MissingTargetLanguage);
}

#[tokio::test]
async fn submit_response_missing_key_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/document"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "document_id": "DOC1" })),
        )
        .mount(&server)
        .await;

    let err = submit_document(
        &api_for(&server),
        b"x".to_vec(),
        "a.pdf",
        Some("DE"),
        None,
        Formality::Default,
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn status_and_result_carry_the_document_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/document/DOC1"))
        .and(query_param("document_key", "KEY1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "document_id": "DOC1",
            "status": "done",
            "billed_characters": 12
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/document/DOC1/result"))
        .and(query_param("document_key", "KEY1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"uebersetzt".to_vec()))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let handle = DocumentHandle::new("DOC1", "KEY1");
    assert_eq!(api.document_status(&handle).await.unwrap(), JobStatus::Done);
    assert_eq!(&api.document_result(&handle).await.unwrap()[..], b"uebersetzt");
}

#[tokio::test]
async fn empty_result_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/document/DOC1/result"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .document_result(&DocumentHandle::new("DOC1", "KEY1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::EmptyBody);
}

#[tokio::test]
async fn oversized_result_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/document/DOC1/result"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'x'; 64]))
        .mount(&server)
        .await;

    let mut settings = ApiSettings::new("test-key");
    settings.base_url = format!("{}/v2", server.uri());
    settings.max_result_bytes = 16;
    let api = ReqwestTranslationApi::new(settings).unwrap();

    let err = api
        .document_result(&DocumentHandle::new("DOC1", "KEY1"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 16, .. }));
}

#[test]
fn settings_debug_hides_the_key() {
    let rendered = format!("{:?}", ApiSettings::new("super-secret"));
    assert!(!rendered.contains("super-secret"));
}

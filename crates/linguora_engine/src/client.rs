use bytes::Bytes;
use futures_util::StreamExt;
use linguora_core::{DocumentHandle, Formality, JobStatus, Language};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use engine_logging::{engine_debug, engine_info};

use crate::request::{DocumentUpload, TextRequest};
use crate::settings::ApiSettings;
use crate::{ApiError, FailureKind};

/// The remote translation service, one method per endpoint.
///
/// Methods take already-validated request types; use [`translate_text`] and
/// [`submit_document`] to go from raw user input to a call.
#[async_trait::async_trait]
pub trait TranslationApi: Send + Sync {
    async fn target_languages(&self) -> Result<Vec<Language>, ApiError>;

    async fn translate(&self, request: &TextRequest) -> Result<String, ApiError>;

    async fn submit_document(&self, upload: &DocumentUpload) -> Result<DocumentHandle, ApiError>;

    async fn document_status(&self, document: &DocumentHandle) -> Result<JobStatus, ApiError>;

    async fn document_result(&self, document: &DocumentHandle) -> Result<Bytes, ApiError>;
}

/// Validates and translates `text`. Invalid input fails without a request.
pub async fn translate_text(
    api: &dyn TranslationApi,
    text: &str,
    target_lang: &str,
    source_lang: Option<&str>,
) -> Result<String, ApiError> {
    let request = TextRequest::new(text, target_lang, source_lang)?;
    api.translate(&request).await
}

/// Validates and uploads an in-memory document.
pub async fn submit_document(
    api: &dyn TranslationApi,
    file_bytes: impl Into<Bytes>,
    file_name: &str,
    target_lang: Option<&str>,
    source_lang: Option<&str>,
    formality: Formality,
) -> Result<DocumentHandle, ApiError> {
    let upload = DocumentUpload::new(file_bytes, file_name, target_lang, source_lang, formality)?;
    api.submit_document(&upload).await
}

#[derive(Deserialize)]
struct WireLanguage {
    language: String,
    name: String,
}

#[derive(Deserialize)]
struct WireTranslations {
    translations: Vec<WireTranslation>,
}

#[derive(Deserialize)]
struct WireTranslation {
    text: String,
}

#[derive(Deserialize)]
struct WireSubmitted {
    document_id: Option<String>,
    document_key: Option<String>,
}

#[derive(Deserialize)]
struct WireStatus {
    status: String,
}

/// [`TranslationApi`] over HTTPS with reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTranslationApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestTranslationApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        engine_info!("Translation API at {} (key {})", base, engine_logging::redact(&settings.api_key));
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        join_segments(&self.base, segments)
    }

    fn document_endpoint(&self, document: &DocumentHandle, suffix: Option<&str>) -> Url {
        let mut segments = vec!["document", document.id.as_str()];
        segments.extend(suffix);
        let mut url = self.endpoint(&segments);
        url.query_pairs_mut()
            .append_pair("document_key", document.key.expose());
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.settings.api_key))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl TranslationApi for ReqwestTranslationApi {
    async fn target_languages(&self) -> Result<Vec<Language>, ApiError> {
        let mut url = self.endpoint(&["languages"]);
        url.query_pairs_mut().append_pair("type", "target");
        let response = self.send(self.client.get(url)).await?;
        let languages: Vec<WireLanguage> = decode_json(response).await?;
        Ok(languages
            .into_iter()
            .map(|lang| Language::new(lang.language, lang.name))
            .collect())
    }

    async fn translate(&self, request: &TextRequest) -> Result<String, ApiError> {
        let url = self.endpoint(&["translate"]);
        let response = self
            .send(self.client.post(url).form(&request.form_fields()))
            .await?;
        let decoded: WireTranslations = decode_json(response).await?;
        decoded
            .translations
            .into_iter()
            .next()
            .map(|translation| translation.text)
            .ok_or_else(|| ApiError::new(FailureKind::Decode, "response has no translations"))
    }

    async fn submit_document(&self, upload: &DocumentUpload) -> Result<DocumentHandle, ApiError> {
        let mut form = Form::new();
        for (name, value) in upload.text_fields() {
            form = form.text(name, value);
        }
        let file = Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str(upload.mime_type())
            .map_err(map_reqwest_error)?;
        form = form.part("file", file);

        engine_debug!(
            "Uploading {} ({} bytes, {})",
            upload.file_name(),
            upload.bytes().len(),
            upload.mime_type()
        );
        let url = self.endpoint(&["document"]);
        let response = self.send(self.client.post(url).multipart(form)).await?;
        let submitted: WireSubmitted = decode_json(response).await?;
        match (submitted.document_id, submitted.document_key) {
            (Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => {
                Ok(DocumentHandle::new(id, key))
            }
            _ => Err(ApiError::new(
                FailureKind::MalformedResponse,
                "document_id or document_key missing",
            )),
        }
    }

    async fn document_status(&self, document: &DocumentHandle) -> Result<JobStatus, ApiError> {
        let url = self.document_endpoint(document, None);
        let response = self.send(self.client.get(url)).await?;
        let wire: WireStatus = decode_json(response).await?;
        let status = JobStatus::from_remote(&wire.status);
        engine_debug!("document_id={} raw status {:?} -> {}", document.id, wire.status, status);
        Ok(status)
    }

    async fn document_result(&self, document: &DocumentHandle) -> Result<Bytes, ApiError> {
        let url = self.document_endpoint(document, Some("result"));
        let response = self.send(self.client.get(url)).await?;
        let max_bytes = self.settings.max_result_bytes;

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "translated document too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "translated document too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(ApiError::new(FailureKind::EmptyBody, "no translated content"));
        }
        engine_info!("Downloaded document_id={} ({} bytes)", document.id, bytes.len());
        Ok(Bytes::from(bytes))
    }
}

pub(crate) fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be used as a base url"),
        ));
    }
    Ok(url)
}

/// Appends path segments (percent-encoded) to `base`, keeping its own path.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

/// The url is stripped from the message: document urls carry the access key.
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    ApiError::new(kind, err.without_url().to_string())
}

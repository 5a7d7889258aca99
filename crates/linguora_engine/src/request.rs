use std::path::Path;

use bytes::Bytes;
use linguora_core::Formality;

use crate::mime::{extension_of, mime_for_extension, output_format_for_extension};
use crate::{ApiError, FailureKind};

/// A validated text translation request. Construction is the only place the
/// input rules are checked, so an instance never needs re-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    text: String,
    target_lang: String,
    source_lang: Option<String>,
}

impl TextRequest {
    pub fn new(text: &str, target_lang: &str, source_lang: Option<&str>) -> Result<Self, ApiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::new(FailureKind::EmptyInput, "nothing to translate"));
        }
        Ok(Self {
            text: text.to_string(),
            target_lang: require_target(Some(target_lang))?,
            source_lang: optional(source_lang),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn source_lang(&self) -> Option<&str> {
        self.source_lang.as_deref()
    }

    pub(crate) fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("text", self.text.as_str()),
            ("target_lang", self.target_lang.as_str()),
        ];
        if let Some(source) = &self.source_lang {
            fields.push(("source_lang", source.as_str()));
        }
        fields
    }
}

/// A document ready to be uploaded: bytes in memory plus validated options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    bytes: Bytes,
    file_name: String,
    target_lang: String,
    source_lang: Option<String>,
    formality: Formality,
}

impl DocumentUpload {
    pub fn new(
        bytes: impl Into<Bytes>,
        file_name: impl Into<String>,
        target_lang: Option<&str>,
        source_lang: Option<&str>,
        formality: Formality,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            target_lang: require_target(target_lang)?,
            bytes: bytes.into(),
            file_name: file_name.into(),
            source_lang: optional(source_lang),
            formality,
        })
    }

    /// Reads the whole file. The target language is checked first so a
    /// missing target never touches the disk.
    pub async fn from_path(
        path: &Path,
        target_lang: Option<&str>,
        source_lang: Option<&str>,
        formality: Formality,
    ) -> Result<Self, ApiError> {
        require_target(target_lang)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::new(FailureKind::Storage, "path has no file name"))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::new(FailureKind::Storage, format!("{}: {err}", path.display())))?;
        Self::new(bytes, file_name, target_lang, source_lang, formality)
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn formality(&self) -> Formality {
        self.formality
    }

    pub fn mime_type(&self) -> &'static str {
        mime_for_extension(&extension_of(&self.file_name))
    }

    pub fn output_format(&self) -> Option<&'static str> {
        output_format_for_extension(&extension_of(&self.file_name))
    }

    /// Text parts of the multipart body, in wire order. The file part follows them.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("target_lang", self.target_lang.clone()),
            ("formality", self.formality.as_str().to_string()),
        ];
        if let Some(source) = &self.source_lang {
            fields.push(("source_lang", source.clone()));
        }
        fields.push(("filename", self.file_name.clone()));
        if let Some(format) = self.output_format() {
            fields.push(("output_format", format.to_string()));
        }
        fields
    }
}

fn require_target(target_lang: Option<&str>) -> Result<String, ApiError> {
    match target_lang.map(str::trim) {
        Some(lang) if !lang.is_empty() => Ok(lang.to_string()),
        _ => Err(ApiError::new(
            FailureKind::MissingTargetLanguage,
            "a target language is required",
        )),
    }
}

fn optional(lang: Option<&str>) -> Option<String> {
    lang.map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(ToOwned::to_owned)
}

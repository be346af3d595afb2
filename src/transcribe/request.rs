// Backend-specific request construction
// Pure data: what gets posted where, with which fields and headers.
// The transport layer turns this into an actual multipart POST.

use super::TranscribeError;
use crate::settings::{BackendKind, TranscriptionConfig};
use std::path::{Path, PathBuf};

/// Model sent to OpenAI-compatible backends when none is configured.
pub const DEFAULT_OPENAI_MODEL: &str = "whisper-1";

/// One part of the multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        path: PathBuf,
        media_type: String,
    },
}

impl FormField {
    fn text(name: &str, value: &str) -> Self {
        Self::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn file(name: &str, path: &Path, media_type: &str) -> Self {
        Self::File {
            name: name.to_string(),
            path: path.to_path_buf(),
            media_type: media_type.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// A fully described multipart POST, ready for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub fields: Vec<FormField>,
}

impl TranscriptionRequest {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Query parameters understood by whisper-asr-webservice; OpenAI-compatible
/// servers ignore the extras.
fn with_query_params(endpoint: &str, language: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    let mut url = format!("{endpoint}{separator}encode=true&task=transcribe");
    if !language.is_empty() {
        url.push_str("&language=");
        url.push_str(language);
    }
    url.push_str("&word_timestamps=false&output=txt");
    url
}

/// Build the request for one transcription attempt.
///
/// Fails fast on configuration problems (`EndpointUnset`, `ApiKeyUnset`)
/// before any network activity.
pub fn build_request(
    config: &TranscriptionConfig,
    audio_path: &Path,
    media_type: &str,
) -> Result<TranscriptionRequest, TranscribeError> {
    let endpoint = config.endpoint.trim();
    if endpoint.is_empty() {
        return Err(TranscribeError::EndpointUnset);
    }

    match config.backend {
        BackendKind::OpenAiApi => {
            if config.api_key.trim().is_empty() {
                return Err(TranscribeError::ApiKeyUnset);
            }
            let model = if config.model.trim().is_empty() {
                DEFAULT_OPENAI_MODEL
            } else {
                config.model.trim()
            };
            Ok(TranscriptionRequest {
                url: with_query_params(endpoint, &config.language),
                headers: vec![(
                    "Authorization".to_string(),
                    format!("Bearer {}", config.api_key),
                )],
                fields: vec![
                    FormField::file("file", audio_path, media_type),
                    FormField::text("model", model),
                    FormField::text("response_format", "text"),
                ],
            })
        }
        BackendKind::WhisperAsrWebservice => Ok(TranscriptionRequest {
            url: with_query_params(endpoint, &config.language),
            headers: Vec::new(),
            fields: vec![FormField::file("audio_file", audio_path, media_type)],
        }),
        BackendKind::NvidiaNim => Ok(TranscriptionRequest {
            // NIM endpoints take no extra query parameters
            url: endpoint.to_string(),
            headers: Vec::new(),
            fields: vec![
                FormField::file("file", audio_path, media_type),
                FormField::text("language", &config.language),
            ],
        }),
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;

// Cancellable transcription jobs over a pluggable HTTP transport
// At most one job is in flight; starting another supersedes it

use super::request::{build_request, FormField, TranscriptionRequest};
use super::TranscribeError;
use crate::jobs::{JobHandle, JobRegistry};
use crate::postprocess::{self, TextConverter};
use crate::settings::{BackendKind, SettingsStore, TranscriptionConfig};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default end-to-end timeout for one transcription request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP transport collaborator.
///
/// Errors are transport-level only (DNS, refused connection, timeout); a
/// response with any status code is an `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_multipart(&self, request: &TranscriptionRequest) -> Result<HttpResponse, String>;
}

/// Production transport backed by reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn post_multipart(&self, request: &TranscriptionRequest) -> Result<HttpResponse, String> {
        let mut form = reqwest::multipart::Form::new();
        for field in &request.fields {
            form = match field {
                FormField::Text { name, value } => form.text(name.clone(), value.clone()),
                FormField::File {
                    name,
                    path,
                    media_type,
                } => {
                    let bytes = tokio::fs::read(path).await.map_err(|e| {
                        format!("Failed to read audio file '{}': {}", path.display(), e)
                    })?;
                    let file_name = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or("audio")
                        .to_string();
                    let part = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(media_type)
                        .map_err(|e| e.to_string())?;
                    form.part(name.clone(), part)
                }
            };
        }

        let mut builder = self.client.post(&request.url).multipart(form);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(HttpResponse { status, body })
    }
}

/// Runs transcription attempts as cancellable background jobs.
///
/// Starting a new job (or calling [`stop`](Self::stop)) cancels whatever was
/// in flight; a cancelled job invokes neither callback. Each non-cancelled
/// job invokes exactly one of `on_success` / `on_error`, after the network
/// call resolves, never before.
pub struct TranscriptionClient {
    store: Arc<dyn SettingsStore>,
    transport: Arc<dyn HttpTransport>,
    converter: Arc<dyn TextConverter>,
    registry: JobRegistry,
}

impl TranscriptionClient {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        transport: Arc<dyn HttpTransport>,
        converter: Arc<dyn TextConverter>,
    ) -> Self {
        Self {
            store,
            transport,
            converter,
            registry: JobRegistry::new(),
        }
    }

    /// Start transcribing `audio_path` in the background.
    ///
    /// Reads a fresh configuration snapshot, posts the clip to the configured
    /// backend, normalizes the response, and delivers the final text (with
    /// `text_to_append` already appended) to `on_success`. Any failure is
    /// delivered to `on_error` as a user-presentable message; nothing escapes
    /// the job boundary. The clip is deleted after a successful attempt.
    pub fn start_async<S, E>(
        &self,
        audio_path: PathBuf,
        media_type: &str,
        text_to_append: &str,
        on_success: S,
        on_error: E,
    ) where
        S: FnOnce(String) + Send + 'static,
        E: FnOnce(String) + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let transport = Arc::clone(&self.transport);
        let converter = Arc::clone(&self.converter);
        let media_type = media_type.to_string();
        let text_to_append = text_to_append.to_string();

        let task = tokio::spawn(async move {
            let outcome = run_transcription(
                store,
                transport,
                converter,
                &audio_path,
                &media_type,
                &text_to_append,
            )
            .await;

            match outcome {
                Ok(text) => on_success(text),
                Err(err) => {
                    crate::error!("[transcribe] attempt failed: {err}");
                    on_error(err.to_string());
                }
            }
        });

        self.registry.register(JobHandle::new(task));
    }

    /// Cancel the in-flight job, if any. Idempotent; fires no callback.
    pub fn stop(&self) {
        self.registry.clear();
    }

    /// Whether a transcription job is currently in flight.
    pub fn is_active(&self) -> bool {
        self.registry.is_active()
    }
}

async fn run_transcription(
    store: Arc<dyn SettingsStore>,
    transport: Arc<dyn HttpTransport>,
    converter: Arc<dyn TextConverter>,
    audio_path: &Path,
    media_type: &str,
    text_to_append: &str,
) -> Result<String, TranscribeError> {
    let config = TranscriptionConfig::load(store.as_ref()).await;
    let request = build_request(&config, audio_path, media_type)?;

    crate::info!(
        "[transcribe] posting '{}' to {} backend",
        audio_path.display(),
        config.backend.as_key()
    );

    let response = transport
        .post_multipart(&request)
        .await
        .map_err(TranscribeError::TransportError)?;

    if !(200..300).contains(&response.status) {
        crate::warn!(
            "[transcribe] backend answered HTTP {}",
            response.status
        );
        return Err(TranscribeError::BackendError(collapse_newlines(
            &response.body,
        )));
    }

    let trimmed = response.body.trim();
    let normalized = if config.backend == BackendKind::NvidiaNim {
        strip_surrounding_quotes(trimmed)
    } else {
        trimmed
    };

    let mut text = postprocess::apply(config.postprocess, converter.as_ref(), normalized);
    text.push_str(text_to_append);

    // The clip is owned by this one attempt; clean it up on success
    if let Err(e) = tokio::fs::remove_file(audio_path).await {
        crate::warn!(
            "[transcribe] failed to remove clip '{}': {}",
            audio_path.display(),
            e
        );
    }

    Ok(text)
}

/// Backend error bodies can be multi-line; notifications want one line.
fn collapse_newlines(body: &str) -> String {
    body.trim().lines().map(str::trim_end).collect::<Vec<_>>().join(" ")
}

/// NIM wraps the transcript in a JSON string literal; strip one matching
/// pair of surrounding quotes.
fn strip_surrounding_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

// Settings access for the dictation pipeline
// A pluggable async key-value store; values are decoded once into a typed,
// immutable snapshot at the start of each transcription attempt

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Setting keys. Stable internal identifiers, never localized strings.
pub mod keys {
    pub const ENDPOINT: &str = "endpoint";
    pub const LANGUAGE: &str = "language";
    pub const BACKEND: &str = "backend";
    pub const API_KEY: &str = "api_key";
    pub const MODEL: &str = "model";
    pub const POSTPROCESS: &str = "postprocess";
    pub const AUTO_START_RECORDING: &str = "auto_start_recording";
}

/// Key-value configuration store collaborator.
///
/// The host owns persistence (preferences file, datastore, anything); the
/// core only snapshot-reads at the start of each job and never caches across
/// attempts.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
}

/// Which transcription backend the endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// OpenAI-compatible `/audio/transcriptions` endpoint
    OpenAiApi,
    /// whisper-asr-webservice `/asr` endpoint
    WhisperAsrWebservice,
    /// NVIDIA NIM speech endpoint
    NvidiaNim,
}

impl BackendKind {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "openai" => Some(Self::OpenAiApi),
            "whisper-asr" => Some(Self::WhisperAsrWebservice),
            "nvidia-nim" => Some(Self::NvidiaNim),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::OpenAiApi => "openai",
            Self::WhisperAsrWebservice => "whisper-asr",
            Self::NvidiaNim => "nvidia-nim",
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::OpenAiApi
    }
}

/// Text transformation applied after transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostprocessMode {
    None,
    ToSimplified,
    ToTraditional,
}

impl PostprocessMode {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "none" => Some(Self::None),
            "to-simplified" => Some(Self::ToSimplified),
            "to-traditional" => Some(Self::ToTraditional),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ToSimplified => "to-simplified",
            Self::ToTraditional => "to-traditional",
        }
    }
}

impl Default for PostprocessMode {
    fn default() -> Self {
        Self::None
    }
}

/// Immutable configuration snapshot for one transcription attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionConfig {
    pub endpoint: String,
    pub language: String,
    pub backend: BackendKind,
    pub api_key: String,
    pub model: String,
    pub postprocess: PostprocessMode,
}

impl TranscriptionConfig {
    /// Snapshot-read every transcription setting from the store.
    ///
    /// Unknown backend/postprocess keys fall back to defaults with a warning
    /// rather than failing the job: a stale store must not brick dictation.
    pub async fn load(store: &dyn SettingsStore) -> Self {
        let endpoint = store.get(keys::ENDPOINT).await.unwrap_or_default();
        let language = store.get(keys::LANGUAGE).await.unwrap_or_default();
        let api_key = store.get(keys::API_KEY).await.unwrap_or_default();
        let model = store.get(keys::MODEL).await.unwrap_or_default();

        let backend = match store.get(keys::BACKEND).await {
            Some(raw) => BackendKind::from_key(&raw).unwrap_or_else(|| {
                crate::warn!(
                    "[settings] unknown backend kind '{}', falling back to '{}'",
                    raw,
                    BackendKind::default().as_key()
                );
                BackendKind::default()
            }),
            None => BackendKind::default(),
        };

        let postprocess = match store.get(keys::POSTPROCESS).await {
            Some(raw) => PostprocessMode::from_key(&raw).unwrap_or_else(|| {
                crate::warn!("[settings] unknown postprocess mode '{}', disabling", raw);
                PostprocessMode::default()
            }),
            None => PostprocessMode::default(),
        };

        Self {
            endpoint,
            language,
            backend,
            api_key,
            model,
            postprocess,
        }
    }
}

/// Whether a new recording should start automatically after text is committed.
pub async fn auto_start_recording(store: &dyn SettingsStore) -> bool {
    matches!(
        store.get(keys::AUTO_START_RECORDING).await.as_deref(),
        Some("true") | Some("1")
    )
}

#[cfg(test)]
#[path = "settings_test.rs"]
pub(crate) mod tests;

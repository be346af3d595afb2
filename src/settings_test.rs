use super::*;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory store for tests (and a reference SettingsStore implementation).
#[derive(Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut values = store.values.lock();
            for (key, value) in pairs {
                values.insert((*key).to_string(), (*value).to_string());
            }
        }
        store
    }
}

#[async_trait::async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values.lock().insert(key.to_string(), value);
    }
}

#[test]
fn backend_kind_round_trips_through_keys() {
    for kind in [
        BackendKind::OpenAiApi,
        BackendKind::WhisperAsrWebservice,
        BackendKind::NvidiaNim,
    ] {
        assert_eq!(BackendKind::from_key(kind.as_key()), Some(kind));
    }
    assert_eq!(BackendKind::from_key("OpenAI API"), None);
    assert_eq!(BackendKind::from_key(""), None);
}

#[test]
fn postprocess_mode_round_trips_through_keys() {
    for mode in [
        PostprocessMode::None,
        PostprocessMode::ToSimplified,
        PostprocessMode::ToTraditional,
    ] {
        assert_eq!(PostprocessMode::from_key(mode.as_key()), Some(mode));
    }
    assert_eq!(PostprocessMode::from_key("simplified"), None);
}

#[tokio::test]
async fn load_reads_full_snapshot() {
    let store = MemorySettingsStore::with(&[
        (keys::ENDPOINT, "https://api.example.com/v1/audio"),
        (keys::LANGUAGE, "zh"),
        (keys::BACKEND, "whisper-asr"),
        (keys::API_KEY, "sk-x"),
        (keys::MODEL, "whisper-1"),
        (keys::POSTPROCESS, "to-traditional"),
    ]);

    let config = TranscriptionConfig::load(&store).await;
    assert_eq!(config.endpoint, "https://api.example.com/v1/audio");
    assert_eq!(config.language, "zh");
    assert_eq!(config.backend, BackendKind::WhisperAsrWebservice);
    assert_eq!(config.api_key, "sk-x");
    assert_eq!(config.model, "whisper-1");
    assert_eq!(config.postprocess, PostprocessMode::ToTraditional);
}

#[tokio::test]
async fn load_defaults_missing_keys() {
    let store = MemorySettingsStore::default();
    let config = TranscriptionConfig::load(&store).await;

    assert_eq!(config.endpoint, "");
    assert_eq!(config.language, "");
    assert_eq!(config.backend, BackendKind::OpenAiApi);
    assert_eq!(config.api_key, "");
    assert_eq!(config.model, "");
    assert_eq!(config.postprocess, PostprocessMode::None);
}

#[tokio::test]
async fn load_tolerates_unknown_enum_keys() {
    let store = MemorySettingsStore::with(&[
        (keys::BACKEND, "something-new"),
        (keys::POSTPROCESS, "emoji"),
    ]);

    let config = TranscriptionConfig::load(&store).await;
    assert_eq!(config.backend, BackendKind::OpenAiApi);
    assert_eq!(config.postprocess, PostprocessMode::None);
}

#[tokio::test]
async fn snapshot_is_immune_to_later_writes() {
    let store = MemorySettingsStore::with(&[(keys::ENDPOINT, "https://first.example")]);
    let config = TranscriptionConfig::load(&store).await;

    store
        .set(keys::ENDPOINT, "https://second.example".to_string())
        .await;

    assert_eq!(config.endpoint, "https://first.example");
    // A fresh snapshot sees the write
    let reloaded = TranscriptionConfig::load(&store).await;
    assert_eq!(reloaded.endpoint, "https://second.example");
}

#[tokio::test]
async fn auto_start_recording_parses_truthy_values() {
    for (value, expected) in [("true", true), ("1", true), ("false", false), ("yes", false)] {
        let store = MemorySettingsStore::with(&[(keys::AUTO_START_RECORDING, value)]);
        assert_eq!(auto_start_recording(&store).await, expected, "value={value}");
    }

    let empty = MemorySettingsStore::default();
    assert!(!auto_start_recording(&empty).await);
}

#[test]
fn config_serializes_with_stable_enum_keys() {
    let config = TranscriptionConfig {
        endpoint: "https://api.example.com".to_string(),
        language: "en".to_string(),
        backend: BackendKind::NvidiaNim,
        api_key: String::new(),
        model: String::new(),
        postprocess: PostprocessMode::ToSimplified,
    };
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["backend"], "nvidia-nim");
    assert_eq!(json["postprocess"], "to-simplified");
}

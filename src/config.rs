use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Key shipped in the config template; treated as "not configured".
pub const PLACEHOLDER_API_KEY: &str = "YOUR_ELEVENLABS_API_KEY_HERE";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub elevenlabs: ElevenLabsConfig,

    #[serde(default)]
    pub voice_profiles: HashMap<String, VoiceProfile>,

    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,

    /// Default voice, used when no profile is given or the profile is unknown.
    pub voice_id: String,

    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(default)]
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoiceSettings {
    #[serde(default = "default_stability")]
    pub stability: f64,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f64,
    #[serde(default)]
    pub style: f64,
    #[serde(default = "default_use_speaker_boost")]
    pub use_speaker_boost: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoiceProfile {
    pub voice_id: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    #[serde(default = "default_quests_json")]
    pub quests_json: String,

    #[serde(default = "default_batch_export")]
    pub batch_export: String,

    #[serde(default = "default_audio_output")]
    pub audio_output: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: 0.0,
            use_speaker_boost: default_use_speaker_boost(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            quests_json: default_quests_json(),
            batch_export: default_batch_export(),
            audio_output: default_audio_output(),
        }
    }
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}
fn default_stability() -> f64 {
    0.5
}
fn default_similarity_boost() -> f64 {
    0.75
}
fn default_use_speaker_boost() -> bool {
    true
}
fn default_quests_json() -> String {
    "data/quests.json".to_string()
}
fn default_batch_export() -> String {
    "data/batch_export.json".to_string()
}
fn default_audio_output() -> String {
    "audio/quests".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config not found: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        !self.elevenlabs.api_key.is_empty() && self.elevenlabs.api_key != PLACEHOLDER_API_KEY
    }
}

use crate::config::{Config, VoiceSettings};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

const API_BASE_URL: &str = "https://api.elevenlabs.io/v1";

#[async_trait]
pub trait TtsClient: Send + Sync {
    /// Synthesizes `text` with the given voice and streams the audio to `output`.
    async fn synthesize_to_file(&self, text: &str, voice_id: &str, output: &Path) -> Result<()>;
}

/// Returns `None` when no usable API key is configured; the batch runner
/// then counts every quest as failed instead of calling out.
pub fn create_tts_client(config: &Config) -> Option<Box<dyn TtsClient>> {
    if !config.has_api_key() {
        eprintln!("Warning: no ElevenLabs API key configured!");
        eprintln!("Please add your key to the config file.");
        return None;
    }

    Some(Box::new(ElevenLabsClient::new(config)))
}

// --- ElevenLabs ---

pub struct ElevenLabsClient {
    api_key: String,
    model_id: String,
    voice_settings: VoiceSettings,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

impl ElevenLabsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.elevenlabs.api_key.clone(),
            model_id: config.elevenlabs.model_id.clone(),
            voice_settings: config.elevenlabs.voice_settings.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TtsClient for ElevenLabsClient {
    async fn synthesize_to_file(&self, text: &str, voice_id: &str, output: &Path) -> Result<()> {
        let url = format!("{}/text-to-speech/{}", API_BASE_URL, voice_id);
        debug!("Synthesizing {} chars with voice {}", text.len(), voice_id);

        let request_body = SynthesisRequest {
            text,
            model_id: &self.model_id,
            voice_settings: &self.voice_settings,
        };

        let resp = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("ElevenLabs API error ({}): {}", status, error_text));
        }

        let mut file = File::create(output).await?;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }
}

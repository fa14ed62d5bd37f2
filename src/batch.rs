use crate::config::Config;
use crate::quest::{self, Quest};
use crate::tts::TtsClient;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const AUDIO_FILE_PREFIX: &str = "quest_";
const AUDIO_FILE_EXT: &str = "mp3";
const DRY_RUN_PREVIEW_LIMIT: usize = 20;

pub struct BatchOptions {
    pub quest_ids: Vec<u32>,
    pub from_export: bool,
    pub skip_existing: bool,
    pub dry_run: bool,
    pub voice_profile: Option<String>,
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            quest_ids: Vec::new(),
            from_export: false,
            skip_existing: true,
            dry_run: false,
            voice_profile: None,
            delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub successful: usize,
    pub failed: usize,
}

pub struct BatchGenerator {
    config: Config,
    client: Option<Box<dyn TtsClient>>,
}

impl BatchGenerator {
    pub fn new(config: Config, client: Option<Box<dyn TtsClient>>) -> Self {
        Self { config, client }
    }

    /// Quest ids that already have an audio file in the output directory.
    pub fn existing_audio_ids(&self) -> Result<HashSet<u32>> {
        let audio_dir = Path::new(&self.config.paths.audio_output);
        fs::create_dir_all(audio_dir)?;

        let mut existing = HashSet::new();
        for entry in fs::read_dir(audio_dir)? {
            let entry = entry?;
            if let Some(id) = parse_audio_filename(&entry.file_name().to_string_lossy()) {
                existing.insert(id);
            }
        }

        debug!("Found {} existing audio files", existing.len());
        Ok(existing)
    }

    fn resolve_voice(&self, voice_profile: Option<&str>) -> String {
        if let Some(name) = voice_profile {
            if let Some(profile) = self.config.voice_profiles.get(name) {
                return profile.voice_id.clone();
            }
        }
        self.config.elevenlabs.voice_id.clone()
    }

    fn output_path(&self, quest_id: u32) -> PathBuf {
        Path::new(&self.config.paths.audio_output).join(format!(
            "{}{}.{}",
            AUDIO_FILE_PREFIX, quest_id, AUDIO_FILE_EXT
        ))
    }

    /// Generates audio for a single quest. Every failure is reported and
    /// swallowed here so the batch loop can keep going.
    pub async fn generate_audio(
        &self,
        quest: &Quest,
        voice_profile: Option<&str>,
    ) -> Option<PathBuf> {
        let Some(client) = self.client.as_ref() else {
            println!("  Quest {}: TTS client not initialized", quest.quest_id);
            return None;
        };

        let text = quest.tts_text();
        if text.trim().is_empty() {
            println!("  Skipping quest {}: no text", quest.quest_id);
            return None;
        }

        let voice_id = self.resolve_voice(voice_profile);

        let audio_dir = Path::new(&self.config.paths.audio_output);
        if let Err(e) = fs::create_dir_all(audio_dir) {
            println!("  Quest {} failed: {}", quest.quest_id, e);
            return None;
        }

        let output_path = self.output_path(quest.quest_id);
        match client
            .synthesize_to_file(&text, &voice_id, &output_path)
            .await
        {
            Ok(()) => Some(output_path),
            Err(e) => {
                println!("  Quest {} failed: {}", quest.quest_id, e);
                None
            }
        }
    }

    pub async fn run(&self, opts: &BatchOptions) -> Result<BatchSummary> {
        let mut quests = if opts.from_export {
            let quests =
                quest::load_batch_export(Path::new(&self.config.paths.batch_export))?;
            println!("Loaded quests from batch export: {}", quests.len());
            quests
        } else {
            let mut quests = quest::load_quests(Path::new(&self.config.paths.quests_json))?;
            if !opts.quest_ids.is_empty() {
                quests.retain(|q| opts.quest_ids.contains(&q.quest_id));
            }
            println!("Loaded quests: {}", quests.len());
            quests
        };

        if opts.skip_existing {
            let existing = self.existing_audio_ids()?;
            quests.retain(|q| !existing.contains(&q.quest_id));
            println!("After filtering out existing audio: {}", quests.len());
        }

        if quests.is_empty() {
            println!("No quests to process.");
            return Ok(BatchSummary::default());
        }

        if opts.dry_run {
            println!("\n[DRY-RUN] The following quests would be processed:");
            for q in quests.iter().take(DRY_RUN_PREVIEW_LIMIT) {
                println!(
                    "  - Quest {}: {}...",
                    q.quest_id,
                    q.title.chars().take(50).collect::<String>()
                );
            }
            if quests.len() > DRY_RUN_PREVIEW_LIMIT {
                println!("  ... and {} more", quests.len() - DRY_RUN_PREVIEW_LIMIT);
            }
            return Ok(BatchSummary::default());
        }

        println!("\nGenerating audio for {} quests...", quests.len());

        let pb = ProgressBar::new(quests.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("#>-"),
        );

        let mut summary = BatchSummary::default();

        for quest in &quests {
            if self
                .generate_audio(quest, opts.voice_profile.as_deref())
                .await
                .is_some()
            {
                summary.successful += 1;
            } else {
                summary.failed += 1;
            }
            pb.inc(1);

            // Rate limiting
            tokio::time::sleep(opts.delay).await;
        }

        pb.finish_and_clear();
        println!(
            "\nDone: {} successful, {} failed",
            summary.successful, summary.failed
        );

        Ok(summary)
    }
}

fn parse_audio_filename(name: &str) -> Option<u32> {
    name.strip_prefix(AUDIO_FILE_PREFIX)?
        .strip_suffix(".mp3")?
        .parse()
        .ok()
}

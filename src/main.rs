mod batch;
mod config;
mod quest;
mod tts;

use anyhow::Result;
use batch::{BatchGenerator, BatchOptions};
use clap::{Parser, ValueEnum};
use config::Config;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config/tts_config.json";

/// Batch-generates quest voiceover audio via the ElevenLabs API.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Only process the given quest id(s)
    #[arg(long = "quest-id", value_name = "ID")]
    quest_ids: Vec<u32>,

    /// Load quests from the batch export instead of the quest database
    #[arg(long)]
    from_export: bool,

    /// Regenerate audio even if the output file already exists
    #[arg(long)]
    no_skip_existing: bool,

    /// Preview the pending quests without calling the API
    #[arg(long)]
    dry_run: bool,

    /// Voice profile to use
    #[arg(long, value_enum, default_value = "neutral_male")]
    voice: VoiceProfileName,

    /// Delay between API calls in seconds
    #[arg(long, default_value_t = 0.5)]
    delay: f64,

    /// Path to the configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "snake_case")]
enum VoiceProfileName {
    NeutralFemale,
    NeutralMale,
    EpicNarrator,
}

impl VoiceProfileName {
    fn as_str(self) -> &'static str {
        match self {
            Self::NeutralFemale => "neutral_female",
            Self::NeutralMale => "neutral_male",
            Self::EpicNarrator => "epic_narrator",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match Config::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!(
                "Please ensure '{}' exists with valid ElevenLabs settings.",
                config_path.display()
            );
            return Err(e);
        }
    };

    let client = tts::create_tts_client(&config);
    let generator = BatchGenerator::new(config, client);

    let options = BatchOptions {
        quest_ids: args.quest_ids,
        from_export: args.from_export,
        skip_existing: !args.no_skip_existing,
        dry_run: args.dry_run,
        voice_profile: Some(args.voice.as_str().to_string()),
        delay: Duration::from_secs_f64(args.delay.max(0.0)),
    };

    generator.run(&options).await?;

    Ok(())
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Quest {
    #[serde(default)]
    pub quest_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub objectives: String,
    #[serde(default)]
    pub completion: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub is_main_story: bool,
}

impl Quest {
    /// Text sent to the synthesis API: title followed by description.
    pub fn tts_text(&self) -> String {
        if self.title.is_empty() {
            self.description.clone()
        } else {
            format!("{}. {}", self.title, self.description)
        }
    }
}

pub fn load_quests(path: &Path) -> Result<Vec<Quest>> {
    if !path.exists() {
        anyhow::bail!("Quest file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let quests: Vec<Quest> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(quests)
}

/// Loads the alternate quest list exported from the quest browser.
pub fn load_batch_export(path: &Path) -> Result<Vec<Quest>> {
    if !path.exists() {
        anyhow::bail!(
            "Batch export not found: {}\nPlease export quests from the quest browser first.",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let quests: Vec<Quest> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(quests)
}

/// Press configuration: data file locations, story count, and seeding.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::record::PoolKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Where the four data pools live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub characters_file: String,
    pub settings_file: String,
    pub events_file: String,
    pub templates_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

impl DataConfig {
    /// Standard file names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            characters_file: "characters.json".to_string(),
            settings_file: "settings.json".to_string(),
            events_file: "events.json".to_string(),
            templates_file: "story_templates.json".to_string(),
        }
    }

    pub fn path_for(&self, kind: PoolKind) -> PathBuf {
        let file = match kind {
            PoolKind::Characters => &self.characters_file,
            PoolKind::Settings => &self.settings_file,
            PoolKind::Events => &self.events_file,
            PoolKind::Templates => &self.templates_file,
        };
        self.data_dir.join(file)
    }
}

/// `data/` beside the running executable if it exists, otherwise `data/`
/// relative to the working directory.
pub fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("data")))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub story_count: usize,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            story_count: 3,
            seed: None,
        }
    }
}

impl Config {
    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a configuration from a RON string. Omitted fields keep their
    /// defaults.
    pub fn parse_ron(input: &str) -> Result<Config, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}

/// Novel configuration: title-screen text and playthrough defaults.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::scene::SceneId;
use crate::schema::stats::{GameStats, STAT_BASELINE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Loaded from `novel.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NovelConfig {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Scene a new playthrough starts in; also the target of replay loops.
    pub start_scene: SceneId,
    /// Starting value for every stat, clamped into range.
    pub baseline: i32,
    /// Initial sound setting.
    pub sound: bool,
    /// Initial stats-panel visibility.
    pub show_stats: bool,
}

impl Default for NovelConfig {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            subtitle: String::new(),
            author: String::new(),
            start_scene: SceneId::new(crate::story::START_SCENE),
            baseline: STAT_BASELINE,
            sound: true,
            show_stats: true,
        }
    }
}

impl NovelConfig {
    pub fn load_from_ron(path: &Path) -> Result<NovelConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<NovelConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    /// Config for the bundled story.
    pub fn well_of_power() -> Result<NovelConfig, ConfigError> {
        Self::parse_ron(crate::story::NOVEL)
    }

    pub fn baseline_stats(&self) -> GameStats {
        GameStats::uniform(self.baseline)
    }
}

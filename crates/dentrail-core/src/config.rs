//! Engine configuration management.
//!
//! This module handles loading and saving the rank definitions the
//! eligibility rule is evaluated against, and which rank the den is
//! currently working on.
//!
//! Configuration is stored at `~/.config/dentrail/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{RankDefinition, DEFAULT_ELECTIVE_THRESHOLD};
use crate::models::Catalog;
use crate::ranks::PackagedRank;

/// Application name used for config directory paths
const APP_NAME: &str = "dentrail";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the rank the den is working toward
    pub active_rank: String,
    #[serde(default)]
    pub ranks: Vec<RankDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_rank: PackagedRank::Lion.name().to_string(),
            ranks: PackagedRank::ALL.iter().map(PackagedRank::definition).collect(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load from an explicit path, falling back to defaults when it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Rank definition by name, case-insensitive
    pub fn rank(&self, name: &str) -> Option<&RankDefinition> {
        self.ranks
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// The active rank, or a default-threshold definition under its name when
    /// it isn't configured
    pub fn active_rank_definition(&self) -> RankDefinition {
        self.rank(&self.active_rank).cloned().unwrap_or_else(|| {
            debug!(rank = %self.active_rank, "Active rank not configured, using default threshold");
            RankDefinition::new(self.active_rank.clone(), DEFAULT_ELECTIVE_THRESHOLD)
        })
    }

    /// Bundled catalog for the active rank, `None` for ranks that don't ship one
    pub fn active_packaged_catalog(&self) -> Result<Option<Catalog>> {
        PackagedRank::from_name(&self.active_rank)
            .map(|rank| rank.catalog())
            .transpose()
    }
}

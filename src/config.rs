//! Engine configuration — loads optional ~/.food-handled/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringWeights;
use crate::session::PickMode;

/// Directory name under the home directory for config and saved state.
pub const APP_DIR: &str = ".food-handled";

/// Tunable engine parameters. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Refreshes allowed per decision session.
    pub refresh_limit: u32,
    /// Maximum number of saved keywords.
    pub keyword_limit: usize,
    /// What "pick for me" draws from.
    pub pick_mode: PickMode,
    /// Meals drawn for a week set.
    pub meal_set_size: usize,
    pub weights: ScoringWeights,
    /// Optional YAML catalog replacing the built-in meals.
    pub catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_limit: 2,
            keyword_limit: 30,
            pick_mode: PickMode::default(),
            meal_set_size: 3,
            weights: ScoringWeights::default(),
            catalog_path: None,
        }
    }
}

impl EngineConfig {
    /// Load config from the standard path, or defaults.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`. A missing file yields defaults; an
    /// unreadable or unparseable one is logged and yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                return Self::default();
            }
        };
        Self::parse(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        })
    }

    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// `~/.food-handled`, or `./.food-handled` without a home directory.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR).join("config.yaml"))
}

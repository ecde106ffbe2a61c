//! RON settings loader
//!
//! Reads `cryptcrawl.ron` from the working directory or the platform config
//! directory, with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{DEFAULT_MAP_SIZE, MAX_MAP_SIZE};

/// Settings file name
pub const CONFIG_FILE: &str = "cryptcrawl.ron";

/// Smallest grid that still separates start and exit
const MIN_MAP_SIZE: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the dungeon grid
    pub map_size: usize,
    /// Where the single save slot lives
    pub save_file: PathBuf,
    /// Where winning runs are recorded
    pub highscore_file: PathBuf,
    /// Fixed RNG seed for reproducible dungeons
    pub seed: Option<u64>,
    /// Clear the terminal between screens
    pub clear_screen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            save_file: PathBuf::from("savegame.json"),
            highscore_file: PathBuf::from("highscores.json"),
            seed: None,
            clear_screen: true,
        }
    }
}

impl GameConfig {
    /// Load settings from the first config file found, or use defaults
    pub fn load() -> Self {
        for path in config_candidates() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => {
                    log::info!("Config loaded from {:?}", path);
                    return config;
                }
                Err(e) => log::warn!("{}. Using defaults.", e),
            }
        }
        Self::default()
    }

    /// Load settings from a specific RON file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.map_size < MIN_MAP_SIZE {
            log::warn!("map_size {} too small, using {}", self.map_size, MIN_MAP_SIZE);
            self.map_size = MIN_MAP_SIZE;
        } else if self.map_size > MAX_MAP_SIZE {
            log::warn!("map_size {} too large, using {}", self.map_size, MAX_MAP_SIZE);
            self.map_size = MAX_MAP_SIZE;
        }
        self
    }
}

/// Places to look for the config file, in priority order
fn config_candidates() -> Vec<PathBuf> {
    use directories::ProjectDirs;

    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(proj_dirs) = ProjectDirs::from("com", "cryptcrawl", "Cryptcrawl") {
        paths.push(proj_dirs.config_dir().join(CONFIG_FILE));
    }
    paths
}

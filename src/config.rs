//! Startup configuration
//!
//! Read once from an optional JSON file; every field has a default so a
//! partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::progress::{EraPrices, HintCosts};

/// Default grid edge length
pub const DEFAULT_GRID_SIZE: usize = 6;

/// Points awarded for a newly solved word
pub const DEFAULT_WORD_REWARD: u64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    /// Fixed RNG seed for reproducible layouts
    pub seed: Option<u64>,
    /// Save file; `None` keeps everything in memory
    pub save_path: Option<PathBuf>,
    /// Directory of `<language>.json` catalogs
    pub catalog_dir: Option<PathBuf>,
    pub language: Language,
    pub era: String,
    pub word_reward: u64,
    pub era_prices: EraPrices,
    pub hint_costs: HintCosts,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            save_path: None,
            catalog_dir: None,
            language: Language::default(),
            era: "ancient".to_string(),
            word_reward: DEFAULT_WORD_REWARD,
            era_prices: EraPrices::default(),
            hint_costs: HintCosts::default(),
        }
    }
}

impl GameConfig {
    /// Load from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let config = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str::<GameConfig>(&json).map_err(|e| e.to_string()));
        match config {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config.sanitized()
            }
            Err(e) => {
                log::warn!("Using default config ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        if self.grid_size == 0 {
            log::warn!("grid_size 0 is invalid, using {}", DEFAULT_GRID_SIZE);
            self.grid_size = DEFAULT_GRID_SIZE;
        }
        self
    }
}

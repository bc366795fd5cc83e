//! Save snapshot format
//!
//! The snapshot is a flat, serde-friendly projection of everything that must
//! survive a restart. Missing fields fall back to defaults so older saves
//! still load.

use serde::{Deserialize, Serialize};

use super::error::SaveError;
use crate::catalog::{PuzzleCatalog, WordOrderRecord};
use crate::progress::{EraPrices, HintCosts, HintLevel, ProgressState, SavedProgress};
use crate::puzzle::{GridRecord, GridStore};
use crate::settings::Settings;

/// Current snapshot format version
pub const SAVE_VERSION: u32 = 1;

/// Hint levels used for one word in one era
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRecord {
    pub era: String,
    pub word: String,
    pub levels: Vec<u8>,
}

/// Solved word indices for one era
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraIndexRecord {
    pub era: String,
    pub indices: Vec<usize>,
}

/// Everything written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub solved_words: Vec<String>,
    #[serde(default)]
    pub hint_usage: Vec<HintRecord>,
    #[serde(default)]
    pub grids: Vec<GridRecord>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub word_orders: Vec<WordOrderRecord>,
    #[serde(default)]
    pub unlocked_eras: Vec<String>,
    #[serde(default)]
    pub era_solved_indices: Vec<EraIndexRecord>,
}

fn default_version() -> u32 {
    SAVE_VERSION
}

/// In-memory state rebuilt from a snapshot
#[derive(Debug)]
pub struct Restored {
    pub progress: ProgressState,
    pub grids: Vec<GridRecord>,
    pub word_orders: Vec<WordOrderRecord>,
    pub settings: Settings,
}

impl SaveSnapshot {
    /// Project the live components into a snapshot
    pub fn capture(
        progress: &ProgressState,
        catalog: &PuzzleCatalog,
        grids: &GridStore,
        settings: &Settings,
    ) -> Self {
        let saved = progress.to_saved();
        Self {
            version: SAVE_VERSION,
            points: saved.points,
            solved_words: saved.solved_words,
            hint_usage: saved
                .hints
                .into_iter()
                .map(|(era, word, level)| HintRecord {
                    era,
                    word,
                    levels: (1..=level.number()).collect(),
                })
                .collect(),
            grids: grids.export_all(),
            settings: settings.clone(),
            word_orders: catalog.orders(),
            unlocked_eras: saved.unlocked_eras,
            era_solved_indices: saved
                .era_solved_indices
                .into_iter()
                .map(|(era, indices)| EraIndexRecord { era, indices })
                .collect(),
        }
    }

    /// Rebuild in-memory state using the current price and cost tables
    pub fn restore(self, prices: EraPrices, costs: HintCosts) -> Restored {
        let mut solved_words = self.solved_words;
        solved_words.extend(
            self.grids
                .iter()
                .filter(|g| g.is_solved)
                .map(|g| g.word.clone()),
        );

        let hints = self
            .hint_usage
            .into_iter()
            .filter_map(|record| match hint_level(&record.levels) {
                Some(level) => Some((record.era, record.word, level)),
                None => {
                    log::warn!(
                        "Dropping invalid hint levels {:?} for {}",
                        record.levels,
                        record.word
                    );
                    None
                }
            })
            .collect();

        let saved = SavedProgress {
            points: self.points,
            solved_words,
            hints,
            unlocked_eras: self.unlocked_eras,
            era_solved_indices: self
                .era_solved_indices
                .into_iter()
                .map(|r| (r.era, r.indices))
                .collect(),
        };

        Restored {
            progress: ProgressState::from_saved(prices, costs, saved),
            grids: self.grids,
            word_orders: self.word_orders,
            settings: self.settings.sanitized(),
        }
    }
}

/// Highest level of a used-level set, `None` if level 2 appears without level 1
fn hint_level(levels: &[u8]) -> Option<HintLevel> {
    let first = levels.contains(&1);
    let second = levels.contains(&2);
    if levels.iter().any(|l| HintLevel::from_number(*l).is_none()) {
        return None;
    }
    match (first, second) {
        (true, true) => Some(HintLevel::Second),
        (true, false) => Some(HintLevel::First),
        _ => None,
    }
}

pub fn encode(snapshot: &SaveSnapshot) -> Result<Vec<u8>, SaveError> {
    serde_json::to_vec_pretty(snapshot).map_err(SaveError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<SaveSnapshot, SaveError> {
    let snapshot: SaveSnapshot = serde_json::from_slice(bytes).map_err(SaveError::Decode)?;
    if snapshot.version > SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot)
}

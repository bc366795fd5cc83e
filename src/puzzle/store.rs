//! Per-word grid cache
//!
//! Each word is placed once; later visits reuse the same layout so partial
//! progress on screen stays meaningful.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid, Placement, is_valid_path};
use super::placer::{PlacementError, place};

/// Flattened grid as stored in a save file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRecord {
    pub word: String,
    /// Row-major letters, one string per cell
    pub letters: Vec<String>,
    pub grid_size: usize,
    pub is_solved: bool,
    pub solution_path: Vec<Cell>,
}

impl GridRecord {
    fn from_entry(entry: &CachedGrid) -> Self {
        let placement = &entry.placement;
        Self {
            word: placement.word.clone(),
            letters: placement.grid.letters().iter().map(char::to_string).collect(),
            grid_size: placement.grid.size(),
            is_solved: entry.solved_path.is_some(),
            solution_path: entry
                .solved_path
                .clone()
                .unwrap_or_else(|| placement.path.clone()),
        }
    }

    /// Rebuild the cached grid, `None` if the record is inconsistent
    fn into_entry(self) -> Option<CachedGrid> {
        let letters = self
            .letters
            .iter()
            .map(|s| {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => None,
                }
            })
            .collect::<Option<Vec<char>>>()?;
        let grid = Grid::from_letters(self.grid_size, letters)?;

        let word = self.word.to_uppercase();
        if self.solution_path.len() != word.chars().count()
            || !is_valid_path(&self.solution_path, grid.size())
            || grid.spell(&self.solution_path) != word
        {
            return None;
        }

        let solved_path = self.is_solved.then(|| self.solution_path.clone());
        Some(CachedGrid {
            placement: Placement {
                word,
                grid,
                path: self.solution_path,
            },
            solved_path,
        })
    }
}

#[derive(Debug, Clone)]
struct CachedGrid {
    placement: Placement,
    /// Path the player traced when solving, set once
    solved_path: Option<Vec<Cell>>,
}

/// Generated grids keyed by uppercased word
#[derive(Debug, Default)]
pub struct GridStore {
    grids: HashMap<String, CachedGrid>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached placement for `word`, generating it on first request
    ///
    /// A failed placement is not cached, so the caller can skip the word.
    pub fn get_or_create<R: Rng + ?Sized>(
        &mut self,
        word: &str,
        grid_size: usize,
        alphabet: &[char],
        rng: &mut R,
    ) -> Result<&Placement, PlacementError> {
        match self.grids.entry(word.to_uppercase()) {
            Entry::Occupied(entry) => Ok(&entry.into_mut().placement),
            Entry::Vacant(entry) => {
                let placement = place(entry.key(), grid_size, alphabet, rng)?;
                log::debug!("Generated {}x{} grid for {}", grid_size, grid_size, entry.key());
                let cached = entry.insert(CachedGrid {
                    placement,
                    solved_path: None,
                });
                Ok(&cached.placement)
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&Placement> {
        self.grids.get(&word.to_uppercase()).map(|g| &g.placement)
    }

    /// Record the answer path for `word`
    ///
    /// Returns true only the first time a path spelling the word is given; an
    /// already solved word keeps its path.
    pub fn mark_solved(&mut self, word: &str, path: &[Cell]) -> bool {
        let Some(cached) = self.grids.get_mut(&word.to_uppercase()) else {
            log::warn!("Cannot mark {} solved: no grid generated", word);
            return false;
        };
        if cached.solved_path.is_some() {
            return false;
        }
        if !cached.placement.accepts(path) {
            log::warn!("Rejected solved path for {}: does not spell the word", word);
            return false;
        }
        cached.solved_path = Some(path.to_vec());
        true
    }

    pub fn is_solved(&self, word: &str) -> bool {
        self.grids
            .get(&word.to_uppercase())
            .is_some_and(|g| g.solved_path.is_some())
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn clear(&mut self) {
        self.grids.clear();
    }

    /// One record per generated grid, sorted by word
    pub fn export_all(&self) -> Vec<GridRecord> {
        let mut records: Vec<GridRecord> = self.grids.values().map(GridRecord::from_entry).collect();
        records.sort_by(|a, b| a.word.cmp(&b.word));
        records
    }

    /// Replace the whole cache with `records`, returns how many were usable
    pub fn import_all(&mut self, records: impl IntoIterator<Item = GridRecord>) -> usize {
        self.grids.clear();
        for record in records {
            let word = record.word.clone();
            match record.into_entry() {
                Some(entry) => {
                    self.grids.insert(entry.placement.word.clone(), entry);
                }
                None => log::warn!("Skipping inconsistent saved grid for {}", word),
            }
        }
        self.grids.len()
    }
}

//! A play session
//!
//! Owns the catalog, grid cache, progress and save file, and is the single
//! entry point for the UI layer. Every action that changes progress is saved
//! immediately.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::catalog::PuzzleCatalog;
use crate::config::GameConfig;
use crate::language::Language;
use crate::persistence::{LoadOutcome, SaveError, SaveSnapshot, SaveStore};
use crate::progress::{HintLevel, ProgressEvent, ProgressState};
use crate::puzzle::{Cell, GridStore, Placement};
use crate::settings::Settings;
use crate::tween::{Tween, TweenKind, Tweens};

/// Seconds for the points counter to reach a new balance
pub const POINTS_TWEEN_SECONDS: f32 = 0.6;
/// Seconds a solved word stays highlighted
pub const HIGHLIGHT_TWEEN_SECONDS: f32 = 0.8;

/// Result of tracing a path for a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Solved { reward: u64 },
    AlreadySolved,
    /// Path does not spell the word
    Wrong,
    /// No grid has been generated for the word
    UnknownWord,
}

pub struct Session {
    config: GameConfig,
    catalog: PuzzleCatalog,
    grids: GridStore,
    progress: ProgressState,
    settings: Settings,
    store: Option<SaveStore>,
    rng: Pcg32,
    language: Language,
    era: String,
    tweens: Tweens,
    /// Words whose placement failed, passed over by `next_unsolved_word`
    unplaceable: HashSet<String>,
}

impl Session {
    /// Wire up the components and load the save named in `config`
    pub fn new(config: GameConfig, catalog: PuzzleCatalog) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let store = config.save_path.clone().map(SaveStore::new);
        let progress = ProgressState::new(config.era_prices.clone(), config.hint_costs);

        let mut session = Self {
            language: config.language,
            era: config.era.clone(),
            config,
            catalog,
            grids: GridStore::new(),
            progress,
            settings: Settings::default(),
            store,
            rng,
            tweens: Tweens::new(),
            unplaceable: HashSet::new(),
        };
        session.load();
        session
    }

    fn load(&mut self) {
        let outcome = match &self.store {
            Some(store) => store.load(),
            None => LoadOutcome::FirstRun,
        };

        match outcome {
            LoadOutcome::Loaded(snapshot) => self.apply(snapshot),
            LoadOutcome::FirstRun => {
                self.catalog.shuffle_once(&mut self.rng);
                self.save_or_log();
            }
            LoadOutcome::Failed(e) => {
                log::warn!("Load failed, starting from defaults: {}", e);
                self.catalog.shuffle_once(&mut self.rng);
            }
        }
        self.progress.drain_events();

        if !self.progress.is_era_unlocked(&self.era) {
            if let Some(era) = self.progress.unlocked_eras().next() {
                log::info!("Era {} is locked, switching to {}", self.era, era);
                self.era = era.to_string();
            }
        }
    }

    fn apply(&mut self, snapshot: SaveSnapshot) {
        let restored = snapshot.restore(self.config.era_prices.clone(), self.config.hint_costs);
        self.progress = restored.progress;
        let count = self.grids.import_all(restored.grids);
        for order in &restored.word_orders {
            self.catalog.set_order(order.language, &order.era, &order.words);
        }
        self.settings = restored.settings;
        log::info!(
            "Restored {} points, {} grids",
            self.progress.points(),
            count
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }

    pub fn grids(&self) -> &GridStore {
        &self.grids
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn era(&self) -> &str {
        &self.era
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Switch to an unlocked era
    pub fn select_era(&mut self, era: &str) -> bool {
        if !self.progress.is_era_unlocked(era) {
            return false;
        }
        self.era = era.to_string();
        true
    }

    /// Words of the current language and era, in play order
    pub fn current_words(&self) -> &[String] {
        self.catalog.words_for(self.language, &self.era)
    }

    pub fn sentences(&self, word: &str) -> &[String] {
        self.catalog.sentences_for(self.language, &self.era, word)
    }

    pub fn next_unsolved_word(&self) -> Option<&str> {
        self.current_words()
            .iter()
            .find(|w| {
                !self.progress.is_word_solved(w) && !self.unplaceable.contains(w.as_str())
            })
            .map(String::as_str)
    }

    /// Grid for `word`, generated on first visit; `None` if it cannot be placed
    pub fn puzzle(&mut self, word: &str) -> Option<&Placement> {
        let is_new = self.grids.get(word).is_none();
        let alphabet = self.language.alphabet();
        if let Err(e) = self
            .grids
            .get_or_create(word, self.config.grid_size, alphabet, &mut self.rng)
        {
            log::warn!("Skipping {}: {}", word, e);
            self.unplaceable.insert(word.to_uppercase());
            return None;
        }
        if is_new {
            self.save_or_log();
        }
        self.grids.get(word)
    }

    /// Check a traced path and record the word as solved if it matches
    pub fn submit_guess(&mut self, word: &str, path: &[Cell]) -> GuessOutcome {
        let word = word.to_uppercase();
        let Some(placement) = self.grids.get(&word) else {
            return GuessOutcome::UnknownWord;
        };
        if !placement.accepts(path) {
            return GuessOutcome::Wrong;
        }
        if self.grids.is_solved(&word) && self.progress.is_word_solved(&word) {
            return GuessOutcome::AlreadySolved;
        }

        self.grids.mark_solved(&word, path);
        let reward = if self.progress.mark_word_solved(&word) {
            self.config.word_reward
        } else {
            0
        };
        if let Some(index) = self.catalog.index_of(self.language, &self.era, &word) {
            self.progress.record_solved_index(&self.era, index);
        }
        self.progress.add_points(reward);
        self.tweens
            .start(TweenKind::Highlight, Tween::new(1.0, 0.0, HIGHLIGHT_TWEEN_SECONDS));
        self.after_action();

        GuessOutcome::Solved { reward }
    }

    /// Buy a hint for `word`, returning the cells it reveals
    pub fn use_hint(&mut self, word: &str, level: HintLevel) -> Option<Vec<Cell>> {
        let path = self.grids.get(word)?.path.clone();
        if !self.progress.use_hint(&self.era, word, level) {
            return None;
        }
        self.after_action();
        Some(revealed(&path, level).to_vec())
    }

    /// Cells revealed by the hints already bought for `word`
    pub fn revealed_cells(&self, word: &str) -> Vec<Cell> {
        let Some(placement) = self.grids.get(word) else {
            return Vec::new();
        };
        self.progress
            .hint_levels_used(&self.era, word)
            .last()
            .map(|&level| revealed(&placement.path, level).to_vec())
            .unwrap_or_default()
    }

    pub fn unlock_era(&mut self, era: &str) -> bool {
        let unlocked = self.progress.unlock_era(era);
        self.after_action();
        unlocked
    }

    /// Credit points earned outside a puzzle
    pub fn add_points(&mut self, n: u64) {
        self.progress.add_points(n);
        self.after_action();
    }

    pub fn update_settings(&mut self, update: impl FnOnce(&mut Settings)) {
        update(&mut self.settings);
        self.settings = self.settings.clone().sanitized();
        self.save_or_log();
    }

    /// Points value to display, animated toward the real balance
    pub fn displayed_points(&self) -> u64 {
        self.tweens
            .value(TweenKind::Points)
            .map_or(self.progress.points(), |v| v.round().max(0.0) as u64)
    }

    pub fn highlight(&self) -> Option<f32> {
        self.tweens.value(TweenKind::Highlight)
    }

    /// Advance cosmetic animations
    pub fn tick(&mut self, dt: f32) {
        self.tweens.tick(dt);
    }

    /// Called when the app is backgrounded or about to exit
    pub fn suspend(&mut self) {
        self.save_or_log();
    }

    pub fn snapshot(&self) -> SaveSnapshot {
        SaveSnapshot::capture(&self.progress, &self.catalog, &self.grids, &self.settings)
    }

    pub fn save(&self) -> Result<(), SaveError> {
        match &self.store {
            Some(store) => store.save(&self.snapshot()),
            None => Ok(()),
        }
    }

    fn save_or_log(&self) {
        if let Err(e) = self.save() {
            log::warn!("Save failed: {}", e);
        }
    }

    fn after_action(&mut self) {
        let events = self.progress.drain_events();
        if events.is_empty() {
            return;
        }
        for event in &events {
            match event {
                ProgressEvent::PointsChanged { old, new } => {
                    let shown = self
                        .tweens
                        .value(TweenKind::Points)
                        .unwrap_or(*old as f32);
                    self.tweens.start(
                        TweenKind::Points,
                        Tween::new(shown, *new as f32, POINTS_TWEEN_SECONDS),
                    );
                }
                ProgressEvent::WordSolved(word) => log::info!("Solved {}", word),
                ProgressEvent::HintUsed { word, level, .. } => {
                    log::info!("Hint {} used on {}", level.number(), word)
                }
                ProgressEvent::EraUnlocked(era) => log::info!("Unlocked era {}", era),
            }
        }
        self.save_or_log();
    }
}

/// Path prefix shown by a hint: the first letter, then the first half
fn revealed(path: &[Cell], level: HintLevel) -> &[Cell] {
    let len = match level {
        HintLevel::First => 1,
        HintLevel::Second => path.len().div_ceil(2),
    };
    &path[..len.min(path.len())]
}

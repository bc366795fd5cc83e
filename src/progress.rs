//! Player progression: points, solved words, hints and era unlocks
//!
//! All mutation goes through `ProgressState` methods. Operations the player
//! cannot afford return `false` and leave the state untouched. Every change
//! is queued as a `ProgressEvent` for the owner to drain.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Hint tiers, consumed strictly in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HintLevel {
    First,
    Second,
}

impl HintLevel {
    pub fn number(self) -> u8 {
        match self {
            HintLevel::First => 1,
            HintLevel::Second => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(HintLevel::First),
            2 => Some(HintLevel::Second),
            _ => None,
        }
    }
}

/// Point cost of each hint tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintCosts {
    pub first: u64,
    pub second: u64,
}

impl Default for HintCosts {
    fn default() -> Self {
        Self {
            first: 50,
            second: 100,
        }
    }
}

impl HintCosts {
    pub fn cost(&self, level: HintLevel) -> u64 {
        match level {
            HintLevel::First => self.first,
            HintLevel::Second => self.second,
        }
    }
}

/// Points needed before an era can be opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraPrice {
    pub era: String,
    pub price: u64,
}

/// Era price table, in menu order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EraPrices(Vec<EraPrice>);

impl Default for EraPrices {
    fn default() -> Self {
        Self::new([
            ("ancient", 0),
            ("classical", 0),
            ("medieval", 1000),
            ("renaissance", 2500),
            ("modern", 5000),
        ])
    }
}

impl EraPrices {
    pub fn new<S: Into<String>>(prices: impl IntoIterator<Item = (S, u64)>) -> Self {
        Self(
            prices
                .into_iter()
                .map(|(era, price)| EraPrice {
                    era: era.into(),
                    price,
                })
                .collect(),
        )
    }

    pub fn price(&self, era: &str) -> Option<u64> {
        self.0.iter().find(|p| p.era == era).map(|p| p.price)
    }

    pub fn eras(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.era.as_str())
    }

    /// Eras that are open from the start
    pub fn free_eras(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter(|p| p.price == 0).map(|p| p.era.as_str())
    }
}

/// A change to progression state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    PointsChanged { old: u64, new: u64 },
    WordSolved(String),
    HintUsed { era: String, word: String, level: HintLevel },
    EraUnlocked(String),
}

/// Plain progression data, as read from or written to a save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedProgress {
    pub points: u64,
    pub solved_words: Vec<String>,
    /// (era, word, highest level used)
    pub hints: Vec<(String, String, HintLevel)>,
    pub unlocked_eras: Vec<String>,
    pub era_solved_indices: Vec<(String, Vec<usize>)>,
}

/// The player's economy and unlock state
#[derive(Debug, Clone)]
pub struct ProgressState {
    prices: EraPrices,
    costs: HintCosts,
    points: u64,
    solved_words: BTreeSet<String>,
    /// Highest hint level used per (era, word); level 2 implies level 1
    hints: BTreeMap<(String, String), HintLevel>,
    unlocked_eras: BTreeSet<String>,
    era_solved_indices: BTreeMap<String, BTreeSet<usize>>,
    events: Vec<ProgressEvent>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(EraPrices::default(), HintCosts::default())
    }
}

impl ProgressState {
    /// Fresh progress with every free era unlocked
    pub fn new(prices: EraPrices, costs: HintCosts) -> Self {
        let unlocked_eras = prices.free_eras().map(str::to_string).collect();
        Self {
            prices,
            costs,
            points: 0,
            solved_words: BTreeSet::new(),
            hints: BTreeMap::new(),
            unlocked_eras,
            era_solved_indices: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Rebuild progress from a save; inconsistent hint entries are dropped
    pub fn from_saved(prices: EraPrices, costs: HintCosts, saved: SavedProgress) -> Self {
        let mut state = Self::new(prices, costs);
        state.points = saved.points;
        state.solved_words = saved
            .solved_words
            .into_iter()
            .map(|w| w.to_uppercase())
            .collect();
        state.hints = saved
            .hints
            .into_iter()
            .map(|(era, word, level)| ((era, word.to_uppercase()), level))
            .collect();
        state.unlocked_eras.extend(saved.unlocked_eras);
        for (era, indices) in saved.era_solved_indices {
            state.era_solved_indices.entry(era).or_default().extend(indices);
        }
        state
    }

    pub fn to_saved(&self) -> SavedProgress {
        SavedProgress {
            points: self.points,
            solved_words: self.solved_words.iter().cloned().collect(),
            hints: self
                .hints
                .iter()
                .map(|((era, word), level)| (era.clone(), word.clone(), *level))
                .collect(),
            unlocked_eras: self.unlocked_eras.iter().cloned().collect(),
            era_solved_indices: self
                .era_solved_indices
                .iter()
                .map(|(era, set)| (era.clone(), set.iter().copied().collect()))
                .collect(),
        }
    }

    pub fn prices(&self) -> &EraPrices {
        &self.prices
    }

    pub fn costs(&self) -> HintCosts {
        self.costs
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn add_points(&mut self, n: u64) {
        if n == 0 {
            return;
        }
        let old = self.points;
        self.points = self.points.saturating_add(n);
        self.events.push(ProgressEvent::PointsChanged {
            old,
            new: self.points,
        });
    }

    /// Deduct `n` points, fails without change if the balance is too low
    pub fn spend_points(&mut self, n: u64) -> bool {
        let Some(remaining) = self.points.checked_sub(n) else {
            return false;
        };
        if n > 0 {
            let old = self.points;
            self.points = remaining;
            self.events.push(ProgressEvent::PointsChanged {
                old,
                new: remaining,
            });
        }
        true
    }

    /// Hint levels already used for `word`, lowest first
    pub fn hint_levels_used(&self, era: &str, word: &str) -> Vec<HintLevel> {
        match self.highest_hint(era, word) {
            None => Vec::new(),
            Some(HintLevel::First) => vec![HintLevel::First],
            Some(HintLevel::Second) => vec![HintLevel::First, HintLevel::Second],
        }
    }

    /// Level 1 only before any hint, level 2 only right after level 1
    pub fn is_hint_available(&self, era: &str, word: &str, level: HintLevel) -> bool {
        match level {
            HintLevel::First => self.highest_hint(era, word).is_none(),
            HintLevel::Second => self.highest_hint(era, word) == Some(HintLevel::First),
        }
    }

    pub fn can_use_hint(&self, era: &str, word: &str, level: HintLevel) -> bool {
        self.points >= self.costs.cost(level) && self.is_hint_available(era, word, level)
    }

    /// Pay for and record a hint; no-op if it is unavailable or unaffordable
    pub fn use_hint(&mut self, era: &str, word: &str, level: HintLevel) -> bool {
        if !self.can_use_hint(era, word, level) {
            return false;
        }
        if !self.spend_points(self.costs.cost(level)) {
            return false;
        }
        let word = word.to_uppercase();
        self.hints.insert((era.to_string(), word.clone()), level);
        self.events.push(ProgressEvent::HintUsed {
            era: era.to_string(),
            word,
            level,
        });
        true
    }

    pub fn is_word_solved(&self, word: &str) -> bool {
        self.solved_words.contains(&word.to_uppercase())
    }

    pub fn solved_words(&self) -> impl Iterator<Item = &str> {
        self.solved_words.iter().map(String::as_str)
    }

    /// Returns true the first time `word` is solved
    pub fn mark_word_solved(&mut self, word: &str) -> bool {
        let word = word.to_uppercase();
        if !self.solved_words.insert(word.clone()) {
            return false;
        }
        self.events.push(ProgressEvent::WordSolved(word));
        true
    }

    pub fn is_era_unlocked(&self, era: &str) -> bool {
        self.unlocked_eras.contains(era)
    }

    pub fn unlocked_eras(&self) -> impl Iterator<Item = &str> {
        self.unlocked_eras.iter().map(String::as_str)
    }

    /// Open `era` if the balance has reached its price
    ///
    /// The price is a threshold: points are not deducted.
    pub fn unlock_era(&mut self, era: &str) -> bool {
        if self.is_era_unlocked(era) {
            return true;
        }
        let Some(price) = self.prices.price(era) else {
            log::warn!("Cannot unlock unknown era {}", era);
            return false;
        };
        if self.points < price {
            return false;
        }
        self.unlocked_eras.insert(era.to_string());
        self.events.push(ProgressEvent::EraUnlocked(era.to_string()));
        true
    }

    pub fn record_solved_index(&mut self, era: &str, index: usize) {
        self.era_solved_indices
            .entry(era.to_string())
            .or_default()
            .insert(index);
    }

    pub fn solved_index_count(&self, era: &str) -> usize {
        self.era_solved_indices.get(era).map_or(0, BTreeSet::len)
    }

    /// Fraction of an era's `total` words solved, in 0..=1
    pub fn era_completion(&self, era: &str, total: usize) -> f32 {
        if total == 0 {
            return 0.0;
        }
        (self.solved_index_count(era) as f32 / total as f32).min(1.0)
    }

    /// Take all events queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<ProgressEvent> {
        std::mem::take(&mut self.events)
    }

    fn highest_hint(&self, era: &str, word: &str) -> Option<HintLevel> {
        self.hints
            .get(&(era.to_string(), word.to_uppercase()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc_prices() -> EraPrices {
        EraPrices::new([("A", 0), ("B", 0), ("C", 1000)])
    }

    #[test]
    fn test_fresh_state_unlocks_free_eras() {
        let state = ProgressState::new(abc_prices(), HintCosts::default());
        assert!(state.is_era_unlocked("A"));
        assert!(state.is_era_unlocked("B"));
        assert!(!state.is_era_unlocked("C"));
        assert_eq!(state.points(), 0);
    }

    /// Unlocking checks the balance but does not spend it
    #[test]
    fn test_unlock_is_a_gate_not_a_purchase() {
        let mut state = ProgressState::new(abc_prices(), HintCosts::default());
        state.add_points(999);
        assert!(!state.unlock_era("C"));
        state.add_points(1);
        assert!(state.unlock_era("C"));
        assert_eq!(state.points(), 1000);

        assert!(state.spend_points(900));
        assert!(state.is_era_unlocked("C"));
        assert!(state.unlock_era("C"));
        assert!(!state.unlock_era("Z"));
    }

    #[test]
    fn test_spend_points_fails_without_change() {
        let mut state = ProgressState::default();
        state.add_points(30);
        assert!(!state.spend_points(31));
        assert_eq!(state.points(), 30);
        assert!(state.spend_points(30));
        assert_eq!(state.points(), 0);
    }

    #[test]
    fn test_hint_order() {
        let mut state = ProgressState::default();
        state.add_points(1000);
        let (era, word) = ("ancient", "EGYPT");

        assert!(state.is_hint_available(era, word, HintLevel::First));
        assert!(!state.is_hint_available(era, word, HintLevel::Second));
        assert!(!state.use_hint(era, word, HintLevel::Second));
        assert_eq!(state.points(), 1000);

        assert!(state.use_hint(era, "egypt", HintLevel::First));
        assert_eq!(state.points(), 950);
        assert!(!state.is_hint_available(era, word, HintLevel::First));
        assert!(state.is_hint_available(era, word, HintLevel::Second));
        assert_eq!(state.hint_levels_used(era, word), [HintLevel::First]);

        assert!(state.use_hint(era, word, HintLevel::Second));
        assert_eq!(state.points(), 850);
        assert!(!state.is_hint_available(era, word, HintLevel::First));
        assert!(!state.is_hint_available(era, word, HintLevel::Second));
        assert_eq!(
            state.hint_levels_used(era, word),
            [HintLevel::First, HintLevel::Second]
        );

        // Hints are tracked per era
        assert!(state.is_hint_available("medieval", word, HintLevel::First));
    }

    #[test]
    fn test_unaffordable_hint_is_noop() {
        let mut state = ProgressState::default();
        state.add_points(49);
        assert!(!state.can_use_hint("ancient", "NILE", HintLevel::First));
        assert!(!state.use_hint("ancient", "NILE", HintLevel::First));
        assert_eq!(state.points(), 49);
        assert!(state.hint_levels_used("ancient", "NILE").is_empty());

        state.add_points(1);
        assert!(state.use_hint("ancient", "NILE", HintLevel::First));
        assert_eq!(state.points(), 0);
        assert!(!state.use_hint("ancient", "NILE", HintLevel::Second));
        assert_eq!(state.hint_levels_used("ancient", "NILE"), vec![HintLevel::First]);
    }

    #[test]
    fn test_mark_word_solved_is_idempotent() {
        let mut state = ProgressState::default();
        assert!(state.mark_word_solved("egypt"));
        let once = state.to_saved();
        assert!(!state.mark_word_solved("EGYPT"));
        assert_eq!(state.to_saved(), once);
        assert!(state.is_word_solved("Egypt"));
        assert_eq!(
            state.drain_events(),
            [ProgressEvent::WordSolved("EGYPT".into())]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_events_in_order() {
        let mut state = ProgressState::new(abc_prices(), HintCosts::default());
        state.add_points(1000);
        state.unlock_era("C");
        state.use_hint("C", "KNIGHT", HintLevel::First);
        assert_eq!(
            state.drain_events(),
            [
                ProgressEvent::PointsChanged { old: 0, new: 1000 },
                ProgressEvent::EraUnlocked("C".into()),
                ProgressEvent::PointsChanged { old: 1000, new: 950 },
                ProgressEvent::HintUsed {
                    era: "C".into(),
                    word: "KNIGHT".into(),
                    level: HintLevel::First,
                },
            ]
        );
    }

    #[test]
    fn test_solved_indices_and_completion() {
        let mut state = ProgressState::default();
        state.record_solved_index("ancient", 0);
        state.record_solved_index("ancient", 3);
        state.record_solved_index("ancient", 3);
        assert_eq!(state.solved_index_count("ancient"), 2);
        assert!((state.era_completion("ancient", 4) - 0.5).abs() < f32::EPSILON);
        assert_eq!(state.era_completion("ancient", 0), 0.0);
        assert_eq!(state.solved_index_count("modern"), 0);
        assert!(!state.is_word_solved("anything"));
    }

    #[test]
    fn test_saved_round_trip_keeps_free_eras() {
        let mut state = ProgressState::new(abc_prices(), HintCosts::default());
        state.add_points(1200);
        state.unlock_era("C");
        state.mark_word_solved("NILE");
        state.use_hint("A", "NILE", HintLevel::First);
        state.record_solved_index("A", 2);

        let saved = state.to_saved();
        let restored = ProgressState::from_saved(abc_prices(), HintCosts::default(), saved.clone());
        assert_eq!(restored.to_saved(), saved);

        let mut stripped = saved;
        stripped.unlocked_eras.clear();
        let restored = ProgressState::from_saved(abc_prices(), HintCosts::default(), stripped);
        assert!(restored.is_era_unlocked("A"));
        assert!(restored.is_era_unlocked("B"));
        assert!(!restored.is_era_unlocked("C"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u64),
        Spend(u64),
        Hint(bool),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u64..200).prop_map(Op::Add),
            (0u64..400).prop_map(Op::Spend),
            any::<bool>().prop_map(Op::Hint),
        ]
    }

    proptest! {
        #[test]
        fn prop_failed_spend_never_changes_points(ops in prop::collection::vec(op(), 0..40)) {
            let mut state = ProgressState::default();
            for op in ops {
                let before = state.points();
                match op {
                    Op::Add(n) => state.add_points(n),
                    Op::Spend(n) => {
                        let ok = state.spend_points(n);
                        prop_assert_eq!(ok, before >= n);
                        prop_assert_eq!(state.points(), if ok { before - n } else { before });
                    }
                    Op::Hint(second) => {
                        let level = if second { HintLevel::Second } else { HintLevel::First };
                        let allowed = state.can_use_hint("ancient", "WORD", level);
                        let ok = state.use_hint("ancient", "WORD", level);
                        prop_assert_eq!(ok, allowed);
                        if !ok {
                            prop_assert_eq!(state.points(), before);
                        }
                    }
                }
            }
        }
    }
}

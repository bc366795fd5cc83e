//! Word lists and example sentences per (language, era)
//!
//! The order of each list is the "next word" order shown to the player. It is
//! shuffled once on a fresh install and persisted afterwards.

pub mod loader;

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::language::Language;

pub use loader::{CatalogError, EraWords};

/// A word and the sentences that use it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub sentences: Vec<String>,
}

/// Persisted word order for one (language, era)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOrderRecord {
    pub language: Language,
    pub era: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct EraList {
    order: Vec<String>,
    sentences: HashMap<String, Vec<String>>,
}

/// All loaded word lists
#[derive(Debug, Clone, Default)]
pub struct PuzzleCatalog {
    lists: BTreeMap<(Language, String), EraList>,
}

impl PuzzleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add words for a (language, era); words are uppercased and deduplicated
    pub fn insert(&mut self, language: Language, era: &str, entries: impl IntoIterator<Item = WordEntry>) {
        let list = self.lists.entry((language, era.to_string())).or_default();
        for entry in entries {
            let word = entry.word.trim().to_uppercase();
            if word.is_empty() {
                continue;
            }
            match list.sentences.get_mut(&word) {
                Some(sentences) => sentences.extend(entry.sentences),
                None => {
                    list.order.push(word.clone());
                    list.sentences.insert(word, entry.sentences);
                }
            }
        }
    }

    /// Words in play order, empty if nothing is loaded for the pair
    pub fn words_for(&self, language: Language, era: &str) -> &[String] {
        self.list(language, era)
            .map(|l| l.order.as_slice())
            .unwrap_or(&[])
    }

    /// Example sentences for `word`, empty if none are known
    pub fn sentences_for(&self, language: Language, era: &str, word: &str) -> &[String] {
        self.list(language, era)
            .and_then(|l| l.sentences.get(&word.to_uppercase()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Position of `word` in the play order
    pub fn index_of(&self, language: Language, era: &str, word: &str) -> Option<usize> {
        let word = word.to_uppercase();
        self.words_for(language, era).iter().position(|w| *w == word)
    }

    /// Shuffle every word list; done once per fresh install
    pub fn shuffle_once<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for list in self.lists.values_mut() {
            list.order.shuffle(rng);
        }
        log::info!("Shuffled {} word lists", self.lists.len());
    }

    /// Restore a persisted order
    ///
    /// Unknown words are dropped and words missing from `order` keep their
    /// relative position at the end, so membership never changes.
    pub fn set_order(&mut self, language: Language, era: &str, order: &[String]) {
        let Some(list) = self.lists.get_mut(&(language, era.to_string())) else {
            log::debug!("Ignoring saved order for unknown {}/{}", language.code(), era);
            return;
        };

        let mut restored: Vec<String> = Vec::with_capacity(list.order.len());
        for word in order {
            let word = word.to_uppercase();
            if list.sentences.contains_key(&word) && !restored.contains(&word) {
                restored.push(word);
            }
        }
        for word in &list.order {
            if !restored.contains(word) {
                restored.push(word.clone());
            }
        }
        list.order = restored;
    }

    /// Current orders of every list, for saving
    pub fn orders(&self) -> Vec<WordOrderRecord> {
        self.lists
            .iter()
            .map(|((language, era), list)| WordOrderRecord {
                language: *language,
                era: era.clone(),
                words: list.order.clone(),
            })
            .collect()
    }

    /// Era ids that have words in `language`
    pub fn eras(&self, language: Language) -> Vec<&str> {
        self.lists
            .keys()
            .filter(|(l, _)| *l == language)
            .map(|(_, era)| era.as_str())
            .collect()
    }

    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.lists.keys().map(|(l, _)| *l).collect();
        languages.dedup();
        languages
    }

    pub fn is_empty(&self) -> bool {
        self.lists.values().all(|l| l.order.is_empty())
    }

    fn list(&self, language: Language, era: &str) -> Option<&EraList> {
        self.lists.get(&(language, era.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn entry(word: &str, sentences: &[&str]) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            sentences: sentences.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample() -> PuzzleCatalog {
        let mut catalog = PuzzleCatalog::new();
        catalog.insert(
            Language::English,
            "ancient",
            [
                entry("Egypt", &["Egypt built pyramids."]),
                entry("nile", &[]),
                entry("Papyrus", &["Scribes wrote on papyrus."]),
                entry("Sphinx", &[]),
            ],
        );
        catalog.insert(Language::Spanish, "ancient", [entry("egipto", &["Egipto es antiguo."])]);
        catalog
    }

    #[test]
    fn test_words_are_uppercased_in_order() {
        let catalog = sample();
        assert_eq!(
            catalog.words_for(Language::English, "ancient"),
            &["EGYPT", "NILE", "PAPYRUS", "SPHINX"]
        );
        assert_eq!(catalog.index_of(Language::English, "ancient", "papyrus"), Some(2));
    }

    #[test]
    fn test_unknown_lookups_are_empty() {
        let catalog = sample();
        assert!(catalog.words_for(Language::German, "ancient").is_empty());
        assert!(catalog.words_for(Language::English, "modern").is_empty());
        assert!(catalog.sentences_for(Language::English, "ancient", "ROME").is_empty());
        assert!(catalog.sentences_for(Language::English, "ancient", "nile").is_empty());
        assert!(PuzzleCatalog::new().is_empty());
    }

    #[test]
    fn test_sentence_lookup_ignores_case() {
        let catalog = sample();
        assert_eq!(
            catalog.sentences_for(Language::English, "ancient", "egypt"),
            &["Egypt built pyramids."]
        );
        assert_eq!(
            catalog.sentences_for(Language::Spanish, "ancient", "EGIPTO"),
            &["Egipto es antiguo."]
        );
    }

    #[test]
    fn test_duplicate_words_merge_sentences() {
        let mut catalog = sample();
        catalog.insert(Language::English, "ancient", [entry("EGYPT", &["Second."])]);
        assert_eq!(catalog.words_for(Language::English, "ancient").len(), 4);
        assert_eq!(catalog.sentences_for(Language::English, "ancient", "EGYPT").len(), 2);
    }

    #[test]
    fn test_shuffle_keeps_membership() {
        let mut catalog = sample();
        catalog.shuffle_once(&mut Pcg32::seed_from_u64(5));
        let mut words = catalog.words_for(Language::English, "ancient").to_vec();
        words.sort();
        assert_eq!(words, ["EGYPT", "NILE", "PAPYRUS", "SPHINX"]);
    }

    #[test]
    fn test_set_order_restores_and_repairs() {
        let mut catalog = sample();
        let saved: Vec<String> = ["sphinx", "ROME", "EGYPT", "SPHINX"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        catalog.set_order(Language::English, "ancient", &saved);
        assert_eq!(
            catalog.words_for(Language::English, "ancient"),
            &["SPHINX", "EGYPT", "NILE", "PAPYRUS"]
        );
    }

    #[test]
    fn test_orders_round_trip() {
        let mut catalog = sample();
        catalog.shuffle_once(&mut Pcg32::seed_from_u64(11));
        let orders = catalog.orders();

        let mut fresh = sample();
        for record in &orders {
            fresh.set_order(record.language, &record.era, &record.words);
        }
        assert_eq!(fresh.orders(), orders);
        assert_eq!(fresh.eras(Language::English), ["ancient"]);
        assert_eq!(fresh.languages(), [Language::English, Language::Spanish]);
    }
}

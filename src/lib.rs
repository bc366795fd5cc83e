//! Era Words - word-search puzzle core
//!
//! Core modules:
//! - `puzzle`: Word placement and the per-word grid cache
//! - `catalog`: Word lists and example sentences per language and era
//! - `progress`: Points, hints, solved words and era unlocks
//! - `persistence`: Save/load with backup recovery
//! - `session`: Wires everything together for the UI layer

pub mod catalog;
pub mod config;
pub mod language;
pub mod persistence;
pub mod progress;
pub mod puzzle;
pub mod session;
pub mod settings;
pub mod tween;

pub use catalog::PuzzleCatalog;
pub use config::GameConfig;
pub use language::Language;
pub use progress::{EraPrices, HintCosts, HintLevel, ProgressState};
pub use puzzle::{Cell, Grid, GridStore, Placement, place};
pub use session::{GuessOutcome, Session};
pub use settings::Settings;

/// Catalog bundled with the binary, used when no catalog directory is given
pub const SAMPLE_CATALOG_EN: &str = include_str!("../data/en.json");
pub const SAMPLE_CATALOG_ES: &str = include_str!("../data/es.json");

/// Catalog built from the bundled sample files
pub fn sample_catalog() -> PuzzleCatalog {
    let mut catalog = PuzzleCatalog::new();
    for (language, json) in [
        (Language::English, SAMPLE_CATALOG_EN),
        (Language::Spanish, SAMPLE_CATALOG_ES),
    ] {
        if let Err(e) = catalog.add_json(language, json) {
            log::warn!("Bundled catalog unusable: {}", e);
        }
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = sample_catalog();
        assert!(!catalog.words_for(Language::English, "ancient").is_empty());
        assert!(!catalog.words_for(Language::Spanish, "ancient").is_empty());
        for era in EraPrices::default().eras() {
            assert!(
                !catalog.words_for(Language::English, era).is_empty(),
                "no English words for {era}"
            );
        }
    }
}

//! Catalog data files
//!
//! One JSON file per language, named by language code (`en.json`), holding
//! a list of `{ "era": ..., "words": [{ "word": ..., "sentences": [...] }] }`.
//! A language whose file is missing or broken is skipped.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{PuzzleCatalog, WordEntry};
use crate::language::Language;

/// One era section of a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraWords {
    pub era: String,
    #[serde(default)]
    pub words: Vec<WordEntry>,
}

/// Why a catalog file was skipped
#[derive(Debug)]
pub enum CatalogError {
    Missing { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    Parse { language: Language, source: serde_json::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Missing { path } => write!(f, "catalog file {} not found", path.display()),
            CatalogError::Io { path, source } => {
                write!(f, "failed to read catalog {}: {}", path.display(), source)
            }
            CatalogError::Parse { language, source } => {
                write!(f, "invalid {} catalog: {}", language.code(), source)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Missing { .. } => None,
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::Parse { source, .. } => Some(source),
        }
    }
}

/// Parse one language's catalog
pub fn parse(language: Language, json: &str) -> Result<Vec<EraWords>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse { language, source })
}

impl PuzzleCatalog {
    /// Add a parsed catalog, returns the number of words read
    pub fn add_json(&mut self, language: Language, json: &str) -> Result<usize, CatalogError> {
        let eras = parse(language, json)?;
        let mut count = 0;
        for section in eras {
            count += section.words.len();
            self.insert(language, &section.era, section.words);
        }
        Ok(count)
    }

    /// Read `<dir>/<code>.json` into the catalog
    pub fn load_file(&mut self, dir: &Path, language: Language) -> Result<usize, CatalogError> {
        let path = dir.join(format!("{}.json", language.code()));
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CatalogError::Missing { path });
            }
            Err(source) => return Err(CatalogError::Io { path, source }),
        };
        self.add_json(language, &json)
    }

    /// Load every language found in `dir`, skipping the ones that fail
    pub fn load_dir(dir: &Path, languages: &[Language]) -> Self {
        let mut catalog = Self::new();
        for &language in languages {
            match catalog.load_file(dir, language) {
                Ok(count) => log::info!("Loaded {} {} words", count, language.code()),
                Err(CatalogError::Missing { path }) => {
                    log::info!("No catalog at {}, skipping {}", path.display(), language.code())
                }
                Err(e) => log::warn!("Skipping {} catalog: {}", language.code(), e),
            }
        }
        if catalog.is_empty() {
            log::warn!("No words loaded from {}", dir.display());
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: &str = r#"[
        { "era": "ancient", "words": [
            { "word": "egypt", "sentences": ["Egypt lies on the Nile."] },
            { "word": "nile" }
        ] },
        { "era": "medieval", "words": [ { "word": "castle", "sentences": [] } ] }
    ]"#;

    #[test]
    fn test_add_json() {
        let mut catalog = PuzzleCatalog::new();
        assert_eq!(catalog.add_json(Language::English, EN).unwrap(), 3);
        assert_eq!(catalog.words_for(Language::English, "ancient"), &["EGYPT", "NILE"]);
        assert_eq!(catalog.words_for(Language::English, "medieval"), &["CASTLE"]);
    }

    #[test]
    fn test_parse_error_names_language() {
        let err = parse(Language::French, "{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { language: Language::French, .. }));
        assert!(err.to_string().starts_with("invalid fr catalog"));
    }

    #[test]
    fn test_load_dir_skips_missing_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), EN).unwrap();
        std::fs::write(dir.path().join("es.json"), "[{ \"era\": 5 }]").unwrap();

        let catalog = PuzzleCatalog::load_dir(
            dir.path(),
            &[Language::English, Language::Spanish, Language::German],
        );
        assert_eq!(catalog.languages(), [Language::English]);
        assert!(catalog.words_for(Language::Spanish, "ancient").is_empty());
    }

    #[test]
    fn test_load_dir_with_nothing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = PuzzleCatalog::load_dir(dir.path(), &Language::ALL);
        assert!(catalog.is_empty());
        assert!(catalog.words_for(Language::English, "ancient").is_empty());
    }

    #[test]
    fn test_missing_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PuzzleCatalog::new()
            .load_file(dir.path(), Language::Italian)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Missing { .. }));
    }
}

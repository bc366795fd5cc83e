//! Save file on disk
//!
//! A save goes to `<name>.tmp` first and is renamed over the real file, so a
//! failed write never leaves a truncated save. The previous save is copied to
//! `<name>.bak` before being replaced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::codec::{SaveSnapshot, decode, encode};
use super::error::SaveError;

/// Result of reading the save file
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(SaveSnapshot),
    /// No save exists yet
    FirstRun,
    /// A save exists but could not be used
    Failed(SaveError),
}

/// File-backed snapshot storage
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("bak")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    /// Read the save, falling back to the backup if the main file is unusable
    pub fn load(&self) -> LoadOutcome {
        let primary = match read_snapshot(&self.path) {
            Ok(Some(snapshot)) => {
                log::info!("Loaded save from {}", self.path.display());
                return LoadOutcome::Loaded(snapshot);
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Save load failed: {}", e);
                Some(e)
            }
        };

        let backup = self.backup_path();
        match read_snapshot(&backup) {
            Ok(Some(snapshot)) => {
                log::warn!("Recovered save from backup {}", backup.display());
                LoadOutcome::Loaded(snapshot)
            }
            Ok(None) => match primary {
                Some(e) => LoadOutcome::Failed(e),
                None => {
                    log::info!("No save at {}, first run", self.path.display());
                    LoadOutcome::FirstRun
                }
            },
            Err(e) => {
                log::warn!("Backup load failed: {}", e);
                LoadOutcome::Failed(primary.unwrap_or(e))
            }
        }
    }

    /// Write `snapshot`; on error the previous save is left in place
    pub fn save(&self, snapshot: &SaveSnapshot) -> Result<(), SaveError> {
        let bytes = encode(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SaveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).map_err(|source| SaveError::Io {
            path: tmp.clone(),
            source,
        })?;

        if self.path.exists() {
            let backup = self.backup_path();
            if let Err(e) = fs::copy(&self.path, &backup) {
                log::warn!("Could not back up save to {}: {}", backup.display(), e);
            }
        }

        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(SaveError::Io {
                path: self.path.clone(),
                source,
            });
        }

        log::debug!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    /// Remove the save and its backup
    pub fn clear(&self) -> Result<(), SaveError> {
        for path in [self.path.clone(), self.backup_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(SaveError::Io { path, source }),
            }
        }
        log::info!("Save cleared");
        Ok(())
    }
}

/// `Ok(None)` when the file does not exist
fn read_snapshot(path: &Path) -> Result<Option<SaveSnapshot>, SaveError> {
    match fs::read(path) {
        Ok(bytes) => decode(&bytes).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SaveError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

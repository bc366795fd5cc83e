//! Persistence errors

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to write or read a save
#[derive(Debug)]
pub enum SaveError {
    /// Filesystem operation failed
    Io { path: PathBuf, source: io::Error },
    /// Snapshot could not be serialized
    Encode(serde_json::Error),
    /// Save bytes are not a valid snapshot
    Decode(serde_json::Error),
    /// Save was written by a newer version
    UnsupportedVersion(u32),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            SaveError::Encode(e) => write!(f, "failed to encode save: {e}"),
            SaveError::Decode(e) => write!(f, "corrupt save: {e}"),
            SaveError::UnsupportedVersion(v) => write!(f, "unsupported save version {v}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io { source, .. } => Some(source),
            SaveError::Encode(e) | SaveError::Decode(e) => Some(e),
            SaveError::UnsupportedVersion(_) => None,
        }
    }
}

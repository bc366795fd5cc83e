//! Save/load persistence
//!
//! Features:
//! - Versioned JSON snapshot of progress, grids, word orders and settings
//! - Atomic writes (tmp → save, old save copied to backup)
//! - Corruption detection with backup and default-state recovery

pub mod codec;
pub mod error;
pub mod store;

pub use codec::{
    EraIndexRecord, HintRecord, Restored, SAVE_VERSION, SaveSnapshot, decode, encode,
};
pub use error::SaveError;
pub use store::{LoadOutcome, SaveStore};

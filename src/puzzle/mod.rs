//! Puzzle generation
//!
//! Everything that turns a word into a playable grid:
//! - `grid`: cells, paths and the letter grid
//! - `placer`: randomized self-avoiding word placement
//! - `store`: per-word cache of generated grids

pub mod grid;
pub mod placer;
pub mod store;

pub use grid::{Cell, DIRECTIONS, Grid, Placement, is_valid_path};
pub use placer::{MAX_PLACEMENT_ATTEMPTS, PlacementError, place};
pub use store::{GridRecord, GridStore};

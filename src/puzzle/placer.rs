//! Randomized word placement
//!
//! A word is laid out as a self-avoiding path that may step in any of the 8
//! compass directions. Start cells are tried in random order; from each one
//! the path grows through a randomly chosen free neighbour until the word is
//! spelled or the walk gets stuck.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Cell, Grid, Placement};

/// Upper bound on start cells tried for one word
pub const MAX_PLACEMENT_ATTEMPTS: usize = 300;

/// Why a word could not be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    EmptyWord,
    EmptyGrid,
    EmptyAlphabet,
    /// `size²` does not fit in `usize`
    GridTooLarge { size: usize },
    /// More letters than the grid has cells
    WordTooLong { len: usize, capacity: usize },
    /// Every start cell was tried without completing a path
    Exhausted { attempts: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::EmptyWord => write!(f, "cannot place an empty word"),
            PlacementError::EmptyGrid => write!(f, "grid size must be at least 1"),
            PlacementError::EmptyAlphabet => write!(f, "filler alphabet is empty"),
            PlacementError::GridTooLarge { size } => write!(f, "grid size {size} is too large"),
            PlacementError::WordTooLong { len, capacity } => {
                write!(f, "word has {len} letters but the grid only has {capacity} cells")
            }
            PlacementError::Exhausted { attempts } => {
                write!(f, "no path found after {attempts} start cells")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Lay `word` out in a `grid_size`×`grid_size` grid and fill the rest from `alphabet`
pub fn place<R: Rng + ?Sized>(
    word: &str,
    grid_size: usize,
    alphabet: &[char],
    rng: &mut R,
) -> Result<Placement, PlacementError> {
    let letters: Vec<char> = word.chars().collect();
    if letters.is_empty() {
        return Err(PlacementError::EmptyWord);
    }
    if grid_size == 0 {
        return Err(PlacementError::EmptyGrid);
    }
    if alphabet.is_empty() {
        return Err(PlacementError::EmptyAlphabet);
    }
    let capacity = grid_size
        .checked_mul(grid_size)
        .ok_or(PlacementError::GridTooLarge { size: grid_size })?;
    if letters.len() > capacity {
        return Err(PlacementError::WordTooLong {
            len: letters.len(),
            capacity,
        });
    }

    let mut starts: Vec<Cell> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Cell::new(x, y)))
        .collect();
    starts.shuffle(rng);

    let attempts = starts.len().min(MAX_PLACEMENT_ATTEMPTS);
    let path = starts
        .into_iter()
        .take(attempts)
        .find_map(|start| walk(start, letters.len(), grid_size, rng))
        .ok_or(PlacementError::Exhausted { attempts })?;

    let mut cells: Vec<Option<char>> = vec![None; capacity];
    for (cell, &ch) in path.iter().zip(&letters) {
        cells[cell.index(grid_size)] = Some(ch);
    }
    let filled = cells
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| alphabet[rng.random_range(0..alphabet.len())]))
        .collect();
    let grid = Grid::from_letters(grid_size, filled).ok_or(PlacementError::EmptyGrid)?;

    Ok(Placement {
        word: word.to_string(),
        grid,
        path,
    })
}

/// Grow a path of `len` cells from `start`, `None` if it runs out of free neighbours
fn walk<R: Rng + ?Sized>(start: Cell, len: usize, size: usize, rng: &mut R) -> Option<Vec<Cell>> {
    let mut visited = vec![false; size * size];
    visited[start.index(size)] = true;

    let mut path = Vec::with_capacity(len);
    path.push(start);

    let mut current = start;
    while path.len() < len {
        let mut neighbors: Vec<Cell> = current.neighbors(size).collect();
        neighbors.shuffle(rng);
        let next = neighbors.into_iter().find(|c| !visited[c.index(size)])?;
        visited[next.index(size)] = true;
        path.push(next);
        current = next;
    }

    Some(path)
}

//! Letter grid and placement path types

use std::fmt;

use serde::{Deserialize, Serialize};

/// All 8 compass directions as (dx, dy)
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// A grid position, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major index into a `size`×`size` grid
    pub const fn index(&self, size: usize) -> usize {
        self.y * size + self.x
    }

    pub const fn in_bounds(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// True if `other` is one of the 8 cells surrounding this one
    pub fn touches(&self, other: &Cell) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }

    /// In-bounds neighbours, in `DIRECTIONS` order
    pub fn neighbors(&self, size: usize) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dx, dy)| {
            let x = self.x.checked_add_signed(dx)?;
            let y = self.y.checked_add_signed(dy)?;
            let cell = Cell::new(x, y);
            cell.in_bounds(size).then_some(cell)
        })
    }
}

/// Checks that `path` is in bounds, self-avoiding and 8-connected
pub fn is_valid_path(path: &[Cell], size: usize) -> bool {
    let Some(area) = size.checked_mul(size) else {
        return false;
    };
    if path.iter().any(|c| !c.in_bounds(size)) {
        return false;
    }
    if !path.windows(2).all(|w| w[0].touches(&w[1])) {
        return false;
    }
    let mut seen = vec![false; area];
    path.iter().all(|c| !std::mem::replace(&mut seen[c.index(size)], true))
}

/// Square grid of single letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    letters: Vec<char>,
}

impl Grid {
    /// Build a grid from row-major letters, `None` if the count is not `size²`
    pub fn from_letters(size: usize, letters: Vec<char>) -> Option<Self> {
        let area = size.checked_mul(size)?;
        (size > 0 && letters.len() == area).then_some(Self { size, letters })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, cell: Cell) -> Option<char> {
        if cell.in_bounds(self.size) {
            self.letters.get(cell.index(self.size)).copied()
        } else {
            None
        }
    }

    /// Row-major letters
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Letters read along `path`; cells outside the grid are skipped
    pub fn spell(&self, path: &[Cell]) -> String {
        path.iter().filter_map(|&c| self.get(c)).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.letters.chunks(self.size)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, ch) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// A word laid out in its grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub grid: Grid,
    /// Cells spelling `word`, first letter first
    pub path: Vec<Cell>,
}

impl Placement {
    /// True if `path` traces this placement's word through its grid
    pub fn accepts(&self, path: &[Cell]) -> bool {
        path.len() == self.word.chars().count()
            && is_valid_path(path, self.grid.size())
            && self.grid.spell(path) == self.word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_three_neighbors() {
        let n: Vec<_> = Cell::new(0, 0).neighbors(4).collect();
        assert_eq!(n.len(), 3);
        assert!(n.contains(&Cell::new(1, 1)));
        assert_eq!(Cell::new(1, 1).neighbors(4).count(), 8);
        assert_eq!(Cell::new(3, 1).neighbors(4).count(), 5);
    }

    #[test]
    fn test_touches_is_chebyshev_one() {
        let c = Cell::new(2, 2);
        assert!(c.touches(&Cell::new(3, 3)));
        assert!(c.touches(&Cell::new(2, 1)));
        assert!(!c.touches(&c));
        assert!(!c.touches(&Cell::new(4, 2)));
    }

    #[test]
    fn test_path_validation() {
        let ok = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(1, 0)];
        assert!(is_valid_path(&ok, 3));
        let repeat = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(0, 0)];
        assert!(!is_valid_path(&repeat, 3));
        let gap = [Cell::new(0, 0), Cell::new(2, 0)];
        assert!(!is_valid_path(&gap, 3));
        let outside = [Cell::new(2, 2), Cell::new(3, 3)];
        assert!(!is_valid_path(&outside, 3));
        // size² overflows usize
        assert!(!is_valid_path(&ok, usize::MAX));
    }

    #[test]
    fn test_grid_display_and_spell() {
        let grid = Grid::from_letters(2, vec!['A', 'B', 'C', 'D']).unwrap();
        assert_eq!(grid.to_string(), "A B\nC D");
        assert_eq!(grid.spell(&[Cell::new(1, 1), Cell::new(0, 0)]), "DA");
        assert!(Grid::from_letters(2, vec!['A']).is_none());
        assert!(Grid::from_letters(0, Vec::new()).is_none());
        assert!(Grid::from_letters(1 << (usize::BITS / 2), Vec::new()).is_none());
    }
}

//! The square grid every entity lives on
//!
//! The outermost ring of cells is the frame. A head standing on it has fallen out of the board,
//! except in god mode where coordinates wrap instead.
use rand::Rng;

use crate::types::Cell;

/// A square board of `size * size` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    size: i32,
}

impl Board {
    /// Makes a board with `size` cells per side. Sizes come from a validated
    /// [crate::config::GameConfig], so they always fit an `i32`.
    pub fn new(size: u32) -> Self {
        debug_assert!(size <= i32::MAX as u32);
        Board { size: size as i32 }
    }

    /// cells per side
    pub fn size(&self) -> i32 {
        self.size
    }

    /// the cell a fresh snake puts its head on
    pub fn centre(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    /// true iff the cell is inside the frame
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.x < self.size - 1 && cell.y >= 1 && cell.y < self.size - 1
    }

    /// true iff the cell is anywhere on the board, frame included
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    /// maps any cell back on to the board with modular wraparound over the full `0..size` range
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.size), cell.y.rem_euclid(self.size))
    }

    /// Samples a cell uniformly from the whole board, then clamps each axis in to
    /// `[margin, size - margin]`. The clamped edges end up more likely than the interior.
    pub fn random_cell(&self, rng: &mut impl Rng, margin: i32) -> Cell {
        let x = rng.gen_range(0..self.size).clamp(margin, self.size - margin);
        let y = rng.gen_range(0..self.size).clamp(margin, self.size - margin);
        Cell::new(x, y)
    }

    /// number of distinct cells `random_cell` can return for a margin
    pub fn spawnable_cells(&self, margin: i32) -> usize {
        let side = (self.size - 2 * margin + 1).max(0) as usize;
        side * side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_in_bounds_excludes_frame() {
        let b = Board::new(20);
        assert!(b.is_in_bounds(Cell::new(1, 1)));
        assert!(b.is_in_bounds(Cell::new(18, 18)));
        assert!(!b.is_in_bounds(Cell::new(0, 5)));
        assert!(!b.is_in_bounds(Cell::new(5, 0)));
        assert!(!b.is_in_bounds(Cell::new(19, 5)));
        assert!(!b.is_in_bounds(Cell::new(5, 19)));
        assert!(!b.is_in_bounds(Cell::new(-1, 5)));
    }

    #[test]
    fn test_wrap() {
        let b = Board::new(20);
        assert_eq!(b.wrap(Cell::new(-1, 5)), Cell::new(19, 5));
        assert_eq!(b.wrap(Cell::new(20, 5)), Cell::new(0, 5));
        assert_eq!(b.wrap(Cell::new(3, -1)), Cell::new(3, 19));
        assert_eq!(b.wrap(Cell::new(3, 20)), Cell::new(3, 0));
        assert_eq!(b.wrap(Cell::new(7, 8)), Cell::new(7, 8));
        // a portal jump can overshoot by more than one board
        assert_eq!(b.wrap(Cell::new(45, -22)), Cell::new(5, 18));
    }

    #[test]
    fn test_random_cell_respects_margin() {
        let b = Board::new(20);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = b.random_cell(&mut rng, 2);
            assert!(c.x >= 2 && c.x <= 18, "{}", c);
            assert!(c.y >= 2 && c.y <= 18, "{}", c);
            assert!(b.is_in_bounds(c));
        }
    }

    #[test]
    fn test_spawnable_cells() {
        let b = Board::new(20);
        assert_eq!(b.spawnable_cells(2), 17 * 17);
        assert_eq!(b.spawnable_cells(3), 15 * 15);
        assert_eq!(Board::new(4).spawnable_cells(3), 0);
    }
}

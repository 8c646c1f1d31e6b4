//! Collectible food
use rand::Rng;

use crate::board::Board;
use crate::snake::Snake;
use crate::spawn::{sample_free_cell, SpawnError};
use crate::types::{Cell, FoodRole};

/// One piece of food. An engine owns two of these: the primary food, and the portal food that is
/// linked to it and only shows in portal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    role: FoodRole,
    position: Cell,
    shown: bool,
}

impl Food {
    /// a hidden piece of food resting at the origin
    pub fn new(role: FoodRole) -> Self {
        Food {
            role,
            position: Cell::origin(),
            shown: false,
        }
    }

    /// Shows the food and moves it to a random cell that the snake is not on, and that
    /// `blocked` does not reject.
    ///
    /// If no free cell turns up within `attempts` samples the food is left exactly as it was,
    /// hidden food included.
    pub fn spawn(
        &mut self,
        rng: &mut impl Rng,
        board: &Board,
        snake: &Snake,
        margin: i32,
        attempts: u32,
        blocked: impl Fn(Cell) -> bool,
    ) -> Result<Cell, SpawnError> {
        let cell = sample_free_cell(rng, board, margin, attempts, |c| {
            !snake.occupies(c) && !blocked(c)
        })?;
        self.position = cell;
        self.shown = true;
        Ok(cell)
    }

    /// takes the food off the board
    pub fn hide(&mut self) {
        self.shown = false;
        self.position = Cell::origin();
    }

    #[allow(missing_docs)]
    pub fn role(&self) -> FoodRole {
        self.role
    }

    #[allow(missing_docs)]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[allow(missing_docs)]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// whether the food is on screen at this cell
    pub fn is_at(&self, cell: Cell) -> bool {
        self.shown && self.position == cell
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, cell: Cell) {
        self.shown = true;
        self.position = cell;
    }
}

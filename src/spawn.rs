//! Bounded rejection sampling shared by the food and obstacle spawners
use rand::Rng;
use thiserror::Error;

use crate::board::Board;
use crate::types::Cell;

/// A spawner could not find a free cell
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// every sample landed on an occupied cell
    #[error("no free cell found after {attempts} attempts")]
    NoFreeCell {
        /// how many samples were taken
        attempts: u32,
    },
}

/// Samples cells with [Board::random_cell] until `is_free` accepts one, for at most `attempts`
/// samples.
pub fn sample_free_cell(
    rng: &mut impl Rng,
    board: &Board,
    margin: i32,
    attempts: u32,
    is_free: impl Fn(Cell) -> bool,
) -> Result<Cell, SpawnError> {
    for _ in 0..attempts {
        let cell = board.random_cell(rng, margin);
        if is_free(cell) {
            return Ok(cell);
        }
    }
    Err(SpawnError::NoFreeCell { attempts })
}

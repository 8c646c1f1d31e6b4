//! Bricks left behind in walls mode
use fxhash::FxHashSet;
use rand::Rng;

use crate::board::Board;
use crate::config::SPAWN_MARGIN;
use crate::food::Food;
use crate::snake::Snake;
use crate::spawn::{sample_free_cell, SpawnError};
use crate::types::Cell;

/// A single static brick. Only ever constructed already placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Obstacle {
    position: Cell,
}

impl Obstacle {
    /// Places a brick on a random cell that is not the snake, the food, or another brick.
    pub fn spawn(
        rng: &mut impl Rng,
        board: &Board,
        snake: &Snake,
        food: &Food,
        wall: &Wall,
        attempts: u32,
    ) -> Result<Self, SpawnError> {
        let position = sample_free_cell(rng, board, SPAWN_MARGIN, attempts, |c| {
            !snake.occupies(c) && c != food.position() && !wall.contains(c)
        })?;
        Ok(Obstacle { position })
    }

    #[allow(missing_docs)]
    pub fn position(&self) -> Cell {
        self.position
    }
}

/// Every brick placed this session, in placement order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wall {
    bricks: Vec<Obstacle>,
    occupied: FxHashSet<Cell>,
}

impl Wall {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Wall::default()
    }

    /// spawns one more brick and keeps it
    pub fn add_brick(
        &mut self,
        rng: &mut impl Rng,
        board: &Board,
        snake: &Snake,
        food: &Food,
        attempts: u32,
    ) -> Result<Cell, SpawnError> {
        let brick = Obstacle::spawn(rng, board, snake, food, self, attempts)?;
        self.occupied.insert(brick.position());
        self.bricks.push(brick);
        Ok(brick.position())
    }

    /// is there a brick on this cell
    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    #[allow(missing_docs)]
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.bricks.iter()
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// removes every brick
    pub fn clear(&mut self) {
        self.bricks.clear();
        self.occupied.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::FoodRole;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn setup() -> (Board, Snake, Food) {
        let config = GameConfig::default();
        let board = Board::new(config.board_size);
        let snake = Snake::new(&config, &board);
        let mut food = Food::new(FoodRole::Primary);
        food.place(Cell::new(5, 5));
        (board, snake, food)
    }

    #[test]
    fn test_bricks_avoid_snake_food_and_each_other() {
        let (board, mut snake, mut food) = setup();
        let mut rng = SmallRng::seed_from_u64(99);
        let mut wall = Wall::new();
        for trial in 0..1000 {
            if trial % 100 == 0 {
                wall.clear();
                let x = 3 + (trial / 100) as i32;
                snake.set_body((0..8).map(|i| Cell::new(x + i, 9)));
                food.place(Cell::new(x, 12));
            }
            let before = wall.len();
            let cell = wall
                .add_brick(&mut rng, &board, &snake, &food, 1000)
                .unwrap();
            assert_eq!(wall.len(), before + 1);
            assert!(!snake.occupies(cell));
            assert_ne!(cell, food.position());
            assert_eq!(wall.iter().filter(|b| b.position() == cell).count(), 1);
        }
    }

    #[test]
    fn test_full_board_adds_nothing() {
        let (board, mut snake, food) = setup();
        snake.set_body((2..=18).flat_map(|y| (2..=18).map(move |x| Cell::new(x, y))));
        let mut rng = SmallRng::seed_from_u64(5);
        let mut wall = Wall::new();
        assert!(wall.add_brick(&mut rng, &board, &snake, &food, 100).is_err());
        assert!(wall.is_empty());
    }

    #[test]
    fn test_clear() {
        let (board, snake, food) = setup();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut wall = Wall::new();
        let cell = wall.add_brick(&mut rng, &board, &snake, &food, 100).unwrap();
        assert!(wall.contains(cell));
        wall.clear();
        assert!(!wall.contains(cell));
        assert_eq!(wall.len(), 0);
    }
}

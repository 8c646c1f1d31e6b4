//! The snake: an ordered run of cells, head first
use std::collections::VecDeque;

use crate::board::Board;
use crate::config::GameConfig;
use crate::types::{Cell, Direction, Vector};

/// The player's snake.
///
/// Movement is decoupled from the tick rate: every call to [Snake::advance] is a tick, and the
/// snake only steps one cell once `speed` ticks have piled up.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    speed: f64,
    move_counter: u32,
    growing: bool,
    size: u32,
    teleport_offset: Option<Vector>,
    init_size: u32,
    init_speed: f64,
    speed_step: f64,
    min_speed: f64,
}

impl Snake {
    /// builds a snake already in its starting position for the given board
    pub fn new(config: &GameConfig, board: &Board) -> Self {
        let mut snake = Snake {
            body: VecDeque::new(),
            direction: Direction::Right,
            pending_direction: None,
            speed: config.init_speed,
            move_counter: 0,
            growing: false,
            size: config.init_snake_size,
            teleport_offset: None,
            init_size: config.init_snake_size,
            init_speed: config.init_speed,
            speed_step: config.speed_step,
            min_speed: config.min_speed,
        };
        snake.reset(board);
        snake
    }

    /// Puts the snake back to its starting state: `init_size` cells running left from the
    /// centre of the board, heading right.
    pub fn reset(&mut self, board: &Board) {
        let centre = board.centre();
        self.body = (0..self.init_size as i32)
            .map(|i| Cell::new(centre.x - i, centre.y))
            .collect();
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.speed = self.init_speed;
        self.move_counter = 0;
        self.growing = false;
        self.size = self.init_size;
        self.teleport_offset = None;
    }

    /// Queues a new heading for the next move. Ignored if it points straight back along the
    /// direction the snake last moved in.
    pub fn switch_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// One tick. Returns true if the snake actually stepped a cell.
    pub fn advance(&mut self) -> bool {
        self.move_counter += 1;
        if (self.move_counter as f64) < self.speed {
            return false;
        }
        self.move_counter = 0;

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
        let jump = self.teleport_offset.take().unwrap_or(Vector::ZERO);
        let new_head = self.head().add_vec(self.direction.to_vector()).add_vec(jump);
        self.body.push_front(new_head);

        if self.growing {
            self.growing = false;
            self.size += 1;
        } else {
            self.body.pop_back();
        }
        true
    }

    /// grow by one segment on the next move
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Takes `speed_step` of the current speed away, never going under the floor.
    pub fn speed_up(&mut self) {
        self.speed = (self.speed - self.speed * self.speed_step).max(self.min_speed);
    }

    /// wraps the head back on to the board, god mode only
    pub fn wrap_around(&mut self, board: &Board) {
        if let Some(head) = self.body.front_mut() {
            *head = board.wrap(*head);
        }
    }

    /// the next move adds `offset` on top of the regular step
    pub fn arm_teleport(&mut self, offset: Vector) {
        self.teleport_offset = Some(offset);
    }

    /// whether a teleport is waiting for the next move
    pub fn teleport_armed(&self) -> bool {
        self.teleport_offset.is_some()
    }

    #[allow(missing_docs)]
    pub fn teleport_offset(&self) -> Option<Vector> {
        self.teleport_offset
    }

    /// the first cell of the body
    pub fn head(&self) -> Cell {
        // the body is never empty: reset always lays down a validated, non-zero number of cells
        self.body[0]
    }

    /// cells from head to tail
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// current number of body cells
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// is any segment on this cell
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// true when the head shares a cell with any other segment
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|c| *c == head)
    }

    #[allow(missing_docs)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[allow(missing_docs)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// ticks per move
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// ticks since the last move
    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    /// whether the next move keeps the tail
    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Segment count. Lags behind the body length for the single move that applies growth.
    pub fn size(&self) -> u32 {
        self.size
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, body: impl IntoIterator<Item = Cell>) {
        self.body = body.into_iter().collect();
        self.size = self.body.len() as u32;
    }

    #[cfg(test)]
    pub(crate) fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (Snake, Board) {
        let config = GameConfig::default();
        let board = Board::new(config.board_size);
        (Snake::new(&config, &board), board)
    }

    fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
        v.iter().map(|(x, y)| Cell::new(*x, *y)).collect()
    }

    fn run_one_move(snake: &mut Snake) {
        while !snake.advance() {}
    }

    #[test]
    fn test_reset_layout() {
        let (snake, _) = fresh();
        assert_eq!(
            snake.body().iter().copied().collect::<Vec<_>>(),
            cells(&[(10, 10), (9, 10), (8, 10)])
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.speed(), 12.0);
        assert_eq!(snake.size(), 3);
        assert!(!snake.is_growing());
        assert!(!snake.teleport_armed());
    }

    #[test]
    fn test_movement_is_gated_by_speed() {
        let (mut snake, _) = fresh();
        let before = snake.body().clone();
        for tick in 1..12 {
            assert!(!snake.advance(), "moved early on tick {}", tick);
            assert_eq!(snake.body(), &before);
            assert_eq!(snake.move_counter(), tick);
        }
        assert!(snake.advance());
        assert_eq!(snake.move_counter(), 0);
        assert_eq!(
            snake.body().iter().copied().collect::<Vec<_>>(),
            cells(&[(11, 10), (10, 10), (9, 10)])
        );
    }

    #[test]
    fn test_reverse_is_rejected() {
        let (mut snake, _) = fresh();
        assert!(!snake.switch_direction(Direction::Left));
        assert_eq!(snake.pending_direction(), None);
        run_one_move(&mut snake);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_direction_applies_on_next_move() {
        let (mut snake, _) = fresh();
        assert!(snake.switch_direction(Direction::Up));
        assert_eq!(snake.direction(), Direction::Right);
        run_one_move(&mut snake);
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.head(), Cell::new(10, 9));
    }

    #[test]
    fn test_two_turns_in_one_window_cannot_reverse() {
        let (mut snake, _) = fresh();
        assert!(snake.switch_direction(Direction::Up));
        // still heading right, so left is a reversal
        assert!(!snake.switch_direction(Direction::Left));
        run_one_move(&mut snake);
        assert_eq!(snake.head(), Cell::new(10, 9));
        assert!(!snake.bites_itself());
    }

    #[test]
    fn test_growth_keeps_tail_once() {
        let (mut snake, _) = fresh();
        snake.grow();
        run_one_move(&mut snake);
        assert_eq!(snake.size(), 4);
        assert_eq!(snake.len(), 4);
        assert!(!snake.is_growing());
        assert_eq!(
            snake.body().iter().copied().collect::<Vec<_>>(),
            cells(&[(11, 10), (10, 10), (9, 10), (8, 10)])
        );
        run_one_move(&mut snake);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_size_tracks_growth_count() {
        let (mut snake, _) = fresh();
        for _ in 0..5 {
            snake.grow();
            run_one_move(&mut snake);
        }
        assert_eq!(snake.size(), 8);
        assert_eq!(snake.len(), 8);
    }

    #[test]
    fn test_speed_up_is_geometric() {
        let (mut snake, _) = fresh();
        snake.speed_up();
        assert!((snake.speed() - 10.8).abs() < 1e-9);
        snake.speed_up();
        assert!((snake.speed() - 9.72).abs() < 1e-9);
    }

    #[test]
    fn test_speed_up_has_a_floor() {
        let (mut snake, _) = fresh();
        for _ in 0..100 {
            snake.speed_up();
        }
        assert_eq!(snake.speed(), 1.0);
        // at the floor the snake moves every tick
        assert!(snake.advance());
        assert!(snake.advance());
    }

    #[test]
    fn test_fractional_speed_rounds_up_in_ticks() {
        let (mut snake, _) = fresh();
        snake.set_speed(10.8);
        for _ in 0..10 {
            assert!(!snake.advance());
        }
        assert!(snake.advance());
    }

    #[test]
    fn test_teleport_is_consumed() {
        let (mut snake, _) = fresh();
        snake.arm_teleport(Vector::new(-5, 3));
        assert!(snake.teleport_armed());
        run_one_move(&mut snake);
        assert_eq!(snake.head(), Cell::new(6, 13));
        assert!(!snake.teleport_armed());
        run_one_move(&mut snake);
        assert_eq!(snake.head(), Cell::new(7, 13));
    }

    #[test]
    fn test_wrap_around() {
        let (mut snake, board) = fresh();
        snake.set_body(cells(&[(20, 4), (19, 4), (18, 4)]));
        snake.wrap_around(&board);
        assert_eq!(snake.head(), Cell::new(0, 4));
        snake.set_body(cells(&[(5, -1), (5, 0), (5, 1)]));
        snake.wrap_around(&board);
        assert_eq!(snake.head(), Cell::new(5, 19));
    }

    #[test]
    fn test_bites_itself() {
        let (mut snake, _) = fresh();
        assert!(!snake.bites_itself());
        snake.set_body(cells(&[(5, 5), (6, 5), (6, 6), (5, 6), (5, 5)]));
        assert!(snake.bites_itself());
    }
}

//! various types that are useful for working with the snake simulation
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::time::Duration;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector {
    /// x offset
    pub x: i32,
    /// y offset
    pub y: i32,
}

impl Vector {
    /// the zero vector
    pub const ZERO: Vector = Vector { x: 0, y: 0 };

    #[allow(missing_docs)]
    pub fn new(x: i32, y: i32) -> Self {
        Vector { x, y }
    }
}

/// A cell on the board. Signed so that a head which has left the board can still be represented
/// until the next terminal check sees it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    /// column, 0 is the left edge
    pub x: i32,
    /// row, 0 is the top edge
    pub y: i32,
}

impl Cell {
    #[allow(missing_docs)]
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// the cell at the top left corner, used as the resting place of hidden food
    pub fn origin() -> Self {
        Cell { x: 0, y: 0 }
    }

    #[allow(missing_docs)]
    pub fn add_vec(&self, v: Vector) -> Cell {
        Cell {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }

    #[allow(missing_docs)]
    pub fn sub_vec(&self, v: Vector) -> Cell {
        Cell {
            x: self.x - v.x,
            y: self.y - v.y,
        }
    }

    /// the vector that takes `self` to `other`
    pub fn vector_to(&self, other: Cell) -> Vector {
        Vector {
            x: other.x - self.x,
            y: other.y - self.y,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents a heading. y grows downward, so `Up` is `(0, -1)`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl Direction {
    /// convert this direction to a unit vector
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Left => Vector { x: -1, y: 0 },
            Direction::Right => Vector { x: 1, y: 0 },
            Direction::Up => Vector { x: 0, y: -1 },
            Direction::Down => Vector { x: 0, y: 1 },
        }
    }

    /// create a Direction from the given vector, `None` unless it is one of the four unit vectors
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { x: -1, y: 0 } => Some(Self::Left),
            Vector { x: 1, y: 0 } => Some(Self::Right),
            Vector { x: 0, y: -1 } => Some(Self::Up),
            Vector { x: 0, y: 1 } => Some(Self::Down),
            _ => None,
        }
    }

    /// returns all four directions
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// the direction pointing the other way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// checks if a given direction is exactly opposite this one. e.g. Up is not opposite to Left, but is opposite to Down
    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

/// The rule variant a session is played with
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// walls and your own body kill you
    Classic,
    /// nothing kills you and the board wraps around
    God,
    /// every food eaten leaves a brick behind
    Walls,
    /// two linked foods, eating one teleports you to the other
    Portal,
    /// every food eaten makes the snake faster
    Speed,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Classic
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Classic => write!(f, "classic"),
            Mode::God => write!(f, "god"),
            Mode::Walls => write!(f, "walls"),
            Mode::Portal => write!(f, "portal"),
            Mode::Speed => write!(f, "speed"),
        }
    }
}

impl Mode {
    /// returns every mode in menu order
    pub fn all() -> [Mode; 5] {
        [Mode::Classic, Mode::God, Mode::Walls, Mode::Portal, Mode::Speed]
    }

    /// the numeric id a menu radio button carries, 1 based and in the same order as `Mode::all()`
    pub fn as_id(&self) -> u8 {
        match self {
            Mode::Classic => 1,
            Mode::God => 2,
            Mode::Walls => 3,
            Mode::Portal => 4,
            Mode::Speed => 5,
        }
    }

    /// converts a menu id back to a mode
    pub fn from_id(id: u8) -> Option<Mode> {
        match id {
            1 => Some(Mode::Classic),
            2 => Some(Mode::God),
            3 => Some(Mode::Walls),
            4 => Some(Mode::Portal),
            5 => Some(Mode::Speed),
            _ => None,
        }
    }
}

/// Which of the two food instances a piece of food is
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FoodRole {
    /// the food present in every mode
    Primary,
    /// the second, linked food that only shows in portal mode
    Portal,
}

impl FoodRole {
    /// the role of the food linked to this one
    pub fn other(self) -> FoodRole {
        match self {
            FoodRole::Primary => FoodRole::Portal,
            FoodRole::Portal => FoodRole::Primary,
        }
    }
}

/// Instruments to be used with the tick loop
pub trait TickInstruments: Debug {
    #[allow(missing_docs)]
    fn observe_tick(&self, duration: Duration);
}

/// A game for which the snake body is gettable
pub trait SnakeBodyGettableGame {
    /// return a Vec of the cells of the snake body, in order from head to tail
    fn get_snake_body_vec(&self) -> Vec<Cell>;

    /// get the head of the snake
    fn get_head(&self) -> Cell;
}

/// A game for which the food on the board can be queried
pub trait FoodGettableGame {
    /// every piece of food currently on screen, with its role
    fn get_visible_food(&self) -> Vec<(FoodRole, Cell)>;
}

/// A game where cells can be checked for obstacles
pub trait ObstacleQueryableGame {
    /// Is this cell an obstacle?
    fn is_obstacle(&self, cell: &Cell) -> bool;

    /// every obstacle, in the order they were placed
    fn get_obstacles(&self) -> Vec<Cell>;
}

/// A game with a running and a best score
pub trait ScoreGettableGame {
    #[allow(missing_docs)]
    fn get_score(&self) -> u32;
    #[allow(missing_docs)]
    fn get_best_score(&self) -> u32;
}

/// A game which can tell whether it has ended
pub trait OverDeterminableGame: Debug {
    #[allow(missing_docs)]
    fn is_over(&self) -> bool;
}

/// a game for which the size of the (square) board can be determined
pub trait SizeDeterminableGame {
    #[allow(missing_docs)]
    fn get_size(&self) -> u32;
}

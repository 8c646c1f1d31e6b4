//! What a renderer needs to draw, kept apart from the simulation.
//!
//! A [Scene] is a plain snapshot of a game: every snake segment (head told apart from the body),
//! every visible food, every brick, the scores and the game over flag. Retained mode renderers
//! that keep one sprite per entity can use a [RenderAdapter], which remembers the last scene and
//! hands out only what was added and removed since.
use fxhash::FxHashMap;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

use crate::types::{
    Cell, FoodGettableGame, FoodRole, ObstacleQueryableGame, OverDeterminableGame,
    ScoreGettableGame, SizeDeterminableGame, SnakeBodyGettableGame,
};

/// Everything a scene can show
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[allow(missing_docs)]
    SnakeHead,
    #[allow(missing_docs)]
    SnakeBody,
    #[allow(missing_docs)]
    Food,
    #[allow(missing_docs)]
    PortalFood,
    #[allow(missing_docs)]
    Brick,
}

impl EntityKind {
    /// the character used for this kind in the text rendering
    pub fn glyph(&self) -> char {
        match self {
            EntityKind::SnakeHead => 'H',
            EntityKind::SnakeBody => 's',
            EntityKind::Food => 'f',
            EntityKind::PortalFood => 'p',
            EntityKind::Brick => 'x',
        }
    }
}

/// one drawable thing on one cell
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    #[allow(missing_docs)]
    pub kind: EntityKind,
    #[allow(missing_docs)]
    pub cell: Cell,
}

/// A snapshot of a game, in draw order: bricks, food, then the snake from tail to head so the
/// head ends up on top.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// cells per side of the board
    pub size: u32,
    #[allow(missing_docs)]
    pub entities: Vec<Entity>,
    #[allow(missing_docs)]
    pub score: u32,
    #[allow(missing_docs)]
    pub best_score: u32,
    #[allow(missing_docs)]
    pub game_over: bool,
}

impl Scene {
    /// Snapshots a game
    pub fn capture<G>(game: &G) -> Scene
    where
        G: SnakeBodyGettableGame
            + FoodGettableGame
            + ObstacleQueryableGame
            + ScoreGettableGame
            + OverDeterminableGame
            + SizeDeterminableGame,
    {
        let bricks = game.get_obstacles().into_iter().map(|cell| Entity {
            kind: EntityKind::Brick,
            cell,
        });
        let food = game
            .get_visible_food()
            .into_iter()
            .map(|(role, cell)| Entity {
                kind: match role {
                    FoodRole::Primary => EntityKind::Food,
                    FoodRole::Portal => EntityKind::PortalFood,
                },
                cell,
            });
        let snake = game
            .get_snake_body_vec()
            .into_iter()
            .enumerate()
            .rev()
            .map(|(i, cell)| Entity {
                kind: if i == 0 {
                    EntityKind::SnakeHead
                } else {
                    EntityKind::SnakeBody
                },
                cell,
            });

        Scene {
            size: game.get_size(),
            entities: bricks.chain(food).chain(snake).collect(),
            score: game.get_score(),
            best_score: game.get_best_score(),
            game_over: game.is_over(),
        }
    }

    /// a scene with nothing on the board
    pub fn empty(size: u32) -> Scene {
        Scene {
            size,
            entities: vec![],
            score: 0,
            best_score: 0,
            game_over: false,
        }
    }

    /// the entity drawn on top at a cell, if any
    pub fn top_at(&self, cell: Cell) -> Option<EntityKind> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.cell == cell)
            .map(|e| e.kind)
    }

    /// all entities of one kind
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = Cell> + '_ {
        self.entities
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.cell)
    }

    /// What changed going from `previous` to this scene. Entities are compared as a multiset, so
    /// two segments stacked on one cell count twice.
    pub fn diff(&self, previous: &Scene) -> SceneDiff {
        let mut counts: FxHashMap<Entity, i64> = FxHashMap::default();
        for e in self.entities.iter() {
            *counts.entry(*e).or_insert(0) += 1;
        }
        for e in previous.entities.iter() {
            *counts.entry(*e).or_insert(0) -= 1;
        }

        let expand = |positive: bool| {
            counts
                .iter()
                .filter(|(_, n)| if positive { **n > 0 } else { **n < 0 })
                .flat_map(|(e, n)| std::iter::repeat(*e).take(n.unsigned_abs() as usize))
                .sorted()
                .collect_vec()
        };

        SceneDiff {
            added: expand(true),
            removed: expand(false),
            score: (self.score != previous.score).then(|| self.score),
            best_score: (self.best_score != previous.best_score).then(|| self.best_score),
            game_over: (self.game_over != previous.game_over).then(|| self.game_over),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size as i32;
        writeln!(f)?;
        for y in 0..size {
            let row = (0..size)
                .map(|x| {
                    let cell = Cell::new(x, y);
                    match self.top_at(cell) {
                        Some(kind) => kind.glyph(),
                        None if x == 0 || y == 0 || x == size - 1 || y == size - 1 => '#',
                        None => '.',
                    }
                })
                .join(" ");
            writeln!(f, "{}", row)?;
        }
        write!(f, "score: {} best: {}", self.score, self.best_score)?;
        if self.game_over {
            write!(f, " GAME OVER")?;
        }
        Ok(())
    }
}

/// Changes between two scenes. The score fields are `Some` only when the value changed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneDiff {
    /// entities to create, sorted
    pub added: Vec<Entity>,
    /// entities to drop, sorted
    pub removed: Vec<Entity>,
    #[allow(missing_docs)]
    pub score: Option<u32>,
    #[allow(missing_docs)]
    pub best_score: Option<u32>,
    #[allow(missing_docs)]
    pub game_over: Option<bool>,
}

impl SceneDiff {
    /// true when applying this diff would not change anything
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.score.is_none()
            && self.best_score.is_none()
            && self.game_over.is_none()
    }
}

/// Remembers the last scene it saw and turns each new frame in to a [SceneDiff]
#[derive(Debug, Clone)]
pub struct RenderAdapter {
    last: Scene,
}

impl RenderAdapter {
    /// starts from an empty board, so the first frame adds everything
    pub fn new(size: u32) -> Self {
        RenderAdapter {
            last: Scene::empty(size),
        }
    }

    /// captures `game` and returns what changed since the previous call
    pub fn frame<G>(&mut self, game: &G) -> SceneDiff
    where
        G: SnakeBodyGettableGame
            + FoodGettableGame
            + ObstacleQueryableGame
            + ScoreGettableGame
            + OverDeterminableGame
            + SizeDeterminableGame,
    {
        let scene = Scene::capture(game);
        let diff = scene.diff(&self.last);
        self.last = scene;
        diff
    }

    /// the scene as of the last frame
    pub fn scene(&self) -> &Scene {
        &self.last
    }
}

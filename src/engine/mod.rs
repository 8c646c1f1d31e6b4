//! The per tick state machine that owns a session
//!
//! A [GameEngine] holds the snake, both foods, the bricks of walls mode and the score. The host
//! drives it by calling [GameEngine::tick] once per frame while it is [Phase::Playing], and feeds
//! input through [GameEngine::on_direction_input] and [GameEngine::on_mode_selected]. Input only
//! changes intent, never the board, so every tick sees a consistent state.
mod rules;

pub use rules::{rules_for, FoodEatenHook, ModeRules};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt;
use std::time::Instant;
use tracing::{debug, instrument, trace, warn};

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::food::Food;
use crate::input::Input;
use crate::obstacle::Wall;
use crate::snake::Snake;
use crate::types::{
    Cell, Direction, FoodGettableGame, FoodRole, Mode, ObstacleQueryableGame,
    OverDeterminableGame, ScoreGettableGame, SizeDeterminableGame, SnakeBodyGettableGame,
    TickInstruments,
};

/// Where in its lifecycle a session is. Only `Playing` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// waiting for the player to pick a mode and press play
    Menu,
    #[allow(missing_docs)]
    Playing,
    /// the last tick hit a terminal condition
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathReason {
    /// the head left the frame
    FellOut,
    /// the head ran in to the body
    Bitten,
    /// the head ran in to a brick
    Crashed,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathReason::FellOut => write!(f, "fell out"),
            DeathReason::Bitten => write!(f, "bitten"),
            DeathReason::Crashed => write!(f, "crashed"),
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// the engine is not playing, nothing happened
    Idle,
    /// ticks piled up but the snake did not move yet
    Waiting {
        /// the food under the resting head, if any. Only portal food stays put long enough for
        /// this to happen.
        ate: Option<FoodRole>,
    },
    /// the snake moved a cell
    Moved {
        /// the food the head is on after the move, if any
        ate: Option<FoodRole>,
    },
    /// a terminal condition held, the engine is now in `Phase::GameOver`
    GameOver(DeathReason),
}

/// Owns all state of a snake session
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    rng: SmallRng,
    phase: Phase,
    selected_mode: Mode,
    active_mode: Mode,
    score: u32,
    best_score: u32,
    snake: Snake,
    food: Food,
    portal_food: Food,
    wall: Wall,
    foot_counter: u32,
    death_reason: Option<DeathReason>,
    ticks: u64,
}

impl Default for GameEngine {
    fn default() -> Self {
        GameEngine::from_parts(GameConfig::default(), SmallRng::from_entropy())
    }
}

impl GameEngine {
    /// Builds an engine in the menu, seeded from entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GameEngine::from_parts(config, SmallRng::from_entropy()))
    }

    /// Builds an engine whose food and brick placement is fully determined by `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GameEngine::from_parts(config, SmallRng::seed_from_u64(seed)))
    }

    fn from_parts(config: GameConfig, rng: SmallRng) -> Self {
        let board = Board::new(config.board_size);
        let snake = Snake::new(&config, &board);
        GameEngine {
            config,
            board,
            rng,
            phase: Phase::Menu,
            selected_mode: Mode::default(),
            active_mode: Mode::default(),
            score: 0,
            best_score: 0,
            snake,
            food: Food::new(FoodRole::Primary),
            portal_food: Food::new(FoodRole::Portal),
            wall: Wall::new(),
            foot_counter: 0,
            death_reason: None,
            ticks: 0,
        }
    }

    /// Starts (or restarts) a session with the selected mode.
    pub fn start(&mut self) -> Phase {
        self.active_mode = self.selected_mode;
        self.reset_session();
        self.phase = Phase::Playing;
        debug!(mode = %self.active_mode, "session started");
        self.phase
    }

    /// Stops ticking and goes back to the menu. The board is left as it was until the next start.
    pub fn show_menu(&mut self) -> Phase {
        self.phase = Phase::Menu;
        debug!("back to menu");
        self.phase
    }

    /// Leaves the game: clears the session and forgets the best score.
    pub fn exit(&mut self) -> Phase {
        self.reset_session();
        self.best_score = 0;
        self.phase = Phase::Menu;
        debug!("exited, best score cleared");
        self.phase
    }

    fn reset_session(&mut self) {
        self.score = 0;
        self.foot_counter = 0;
        self.death_reason = None;
        self.ticks = 0;
        self.snake.reset(&self.board);
        self.wall.clear();
        self.respawn_food(FoodRole::Primary);
        if self.rules().has_portal {
            self.respawn_food(FoodRole::Portal);
        } else {
            self.portal_food.hide();
        }
    }

    /// Queues a turn. Only intent changes here, the snake turns on its next move.
    pub fn on_direction_input(&mut self, direction: Direction) -> bool {
        let accepted = self.snake.switch_direction(direction);
        trace!(%direction, accepted, "direction input");
        accepted
    }

    /// Picks the mode for the next session. A running session keeps its mode.
    pub fn on_mode_selected(&mut self, mode: Mode) {
        self.selected_mode = mode;
        debug!(%mode, "mode selected");
    }

    /// Dispatches a parsed host event, returning the phase afterwards
    pub fn handle_input(&mut self, input: Input) -> Phase {
        match input {
            Input::Turn(direction) => {
                self.on_direction_input(direction);
            }
            Input::SelectMode(mode) => self.on_mode_selected(mode),
            Input::Play => {
                self.start();
            }
            Input::Menu => {
                self.show_menu();
            }
            Input::Exit => {
                self.exit();
            }
        }
        self.phase
    }

    /// Advances the simulation by one frame.
    #[instrument(level = "trace", skip_all, fields(mode = %self.active_mode))]
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }
        self.ticks += 1;

        if let Some(reason) = self.terminal_condition() {
            self.phase = Phase::GameOver;
            self.death_reason = Some(reason);
            debug!(%reason, score = self.score, head = %self.snake.head(), "game over");
            return TickOutcome::GameOver(reason);
        }

        let rules = self.rules();
        let moved = self.snake.advance();
        if moved && rules.has_portal {
            self.count_down_teleport();
        }

        let ate = self.ate();
        if let Some(role) = ate {
            self.consume(role, rules);
        }

        if rules.wraps {
            self.snake.wrap_around(&self.board);
        }

        if moved {
            TickOutcome::Moved { ate }
        } else {
            TickOutcome::Waiting { ate }
        }
    }

    /// [GameEngine::tick], timed and reported to `instruments`
    pub fn tick_with<T: TickInstruments>(&mut self, instruments: &T) -> TickOutcome {
        let start = Instant::now();
        let outcome = self.tick();
        let end = Instant::now();
        instruments.observe_tick(end - start);
        outcome
    }

    fn terminal_condition(&self) -> Option<DeathReason> {
        if self.fell_out() {
            Some(DeathReason::FellOut)
        } else if self.bitten() {
            Some(DeathReason::Bitten)
        } else if self.crashed() {
            Some(DeathReason::Crashed)
        } else {
            None
        }
    }

    /// the head is outside the frame, never true in god mode
    pub fn fell_out(&self) -> bool {
        self.rules().checks_bounds && !self.board.is_in_bounds(self.snake.head())
    }

    /// the head is on another segment, never true in god mode
    pub fn bitten(&self) -> bool {
        self.rules().checks_self_bite && self.snake.bites_itself()
    }

    /// the head is on a brick, only checked in walls mode
    pub fn crashed(&self) -> bool {
        self.rules().checks_obstacles && self.wall.contains(self.snake.head())
    }

    /// the food under the head, primary first
    pub fn ate(&self) -> Option<FoodRole> {
        let head = self.snake.head();
        if self.food.is_at(head) {
            Some(FoodRole::Primary)
        } else if self.rules().has_portal && self.portal_food.is_at(head) {
            Some(FoodRole::Portal)
        } else {
            None
        }
    }

    fn consume(&mut self, role: FoodRole, rules: &ModeRules) {
        self.snake.grow();
        // no points while the body is still travelling through a portal
        if self.foot_counter == 0 {
            self.score += 1;
            self.best_score = self.best_score.max(self.score);
            debug!(?role, score = self.score, best = self.best_score, "ate food");
        }
        (rules.on_food_eaten)(self, role);
        if rules.respawns_food_on_eat {
            self.respawn_food(FoodRole::Primary);
        }
    }

    fn count_down_teleport(&mut self) {
        if self.foot_counter == 0 {
            return;
        }
        self.foot_counter -= 1;
        if self.foot_counter == 0 {
            self.respawn_food(FoodRole::Primary);
            self.respawn_food(FoodRole::Portal);
        }
    }

    fn respawn_food(&mut self, role: FoodRole) {
        let margin = self.rules().food_margin;
        let attempts = self.config.spawn_attempts;
        let wall = &self.wall;
        let (food, other) = match role {
            FoodRole::Primary => (&mut self.food, self.portal_food),
            FoodRole::Portal => (&mut self.portal_food, self.food),
        };
        // the two portals never share a cell, a zero jump would just be a normal move
        let result = food.spawn(
            &mut self.rng,
            &self.board,
            &self.snake,
            margin,
            attempts,
            |c| wall.contains(c) || other.is_at(c),
        );
        match result {
            Ok(cell) => trace!(?role, %cell, "spawned food"),
            Err(e) => warn!(?role, error = %e, "could not spawn food, keeping it where it was"),
        }
    }

    fn rules(&self) -> &'static ModeRules {
        rules_for(self.active_mode)
    }

    pub(crate) fn food_by_role(&self, role: FoodRole) -> &Food {
        match role {
            FoodRole::Primary => &self.food,
            FoodRole::Portal => &self.portal_food,
        }
    }

    #[allow(missing_docs)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// why the last game ended, cleared on start
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[allow(missing_docs)]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[allow(missing_docs)]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// the mode the current session plays by
    pub fn active_mode(&self) -> Mode {
        self.active_mode
    }

    /// the mode the next session will play by
    pub fn selected_mode(&self) -> Mode {
        self.selected_mode
    }

    #[allow(missing_docs)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[allow(missing_docs)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[allow(missing_docs)]
    pub fn portal_food(&self) -> &Food {
        &self.portal_food
    }

    /// bricks placed this session
    pub fn obstacles(&self) -> &Wall {
        &self.wall
    }

    /// moves left before a teleport has fully gone through
    pub fn foot_counter(&self) -> u32 {
        self.foot_counter
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// ticks since the session started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl SnakeBodyGettableGame for GameEngine {
    fn get_snake_body_vec(&self) -> Vec<Cell> {
        self.snake.body().iter().copied().collect()
    }

    fn get_head(&self) -> Cell {
        self.snake.head()
    }
}

impl FoodGettableGame for GameEngine {
    fn get_visible_food(&self) -> Vec<(FoodRole, Cell)> {
        [&self.food, &self.portal_food]
            .iter()
            .filter(|f| f.is_shown())
            .map(|f| (f.role(), f.position()))
            .collect()
    }
}

impl ObstacleQueryableGame for GameEngine {
    fn is_obstacle(&self, cell: &Cell) -> bool {
        self.wall.contains(*cell)
    }

    fn get_obstacles(&self) -> Vec<Cell> {
        self.wall.iter().map(|b| b.position()).collect()
    }
}

impl ScoreGettableGame for GameEngine {
    fn get_score(&self) -> u32 {
        self.score
    }

    fn get_best_score(&self) -> u32 {
        self.best_score
    }
}

impl OverDeterminableGame for GameEngine {
    fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl SizeDeterminableGame for GameEngine {
    fn get_size(&self) -> u32 {
        self.config.board_size
    }
}

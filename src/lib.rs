#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! A snake game engine with five play modes: classic, god, walls, portal and speed.
//!
//! [GameEngine] owns the whole session and is advanced one frame at a time, either directly
//! with [GameEngine::tick] or through a [TickDriver] fed with wall time. It never draws anything:
//! after a tick the host captures a [Scene], or feeds a [scene::RenderAdapter] to get only what
//! changed since the previous frame.
//!
//! ```
//! use snake_modes::{Direction, GameConfig, GameEngine, Mode, Scene};
//!
//! let mut engine = GameEngine::with_seed(GameConfig::default(), 7).unwrap();
//! engine.on_mode_selected(Mode::God);
//! engine.start();
//! engine.on_direction_input(Direction::Down);
//! for _ in 0..100 {
//!     engine.tick();
//! }
//! println!("{}", Scene::capture(&engine));
//! ```

pub mod board;
pub mod config;
pub mod driver;
pub mod engine;
pub mod food;
pub mod input;
pub mod obstacle;
pub mod scene;
pub mod snake;
pub mod spawn;
pub mod types;

pub use config::GameConfig;
pub use driver::TickDriver;
pub use engine::{GameEngine, Phase, TickOutcome};
pub use input::Input;
pub use scene::Scene;
pub use types::{Cell, Direction, Mode};

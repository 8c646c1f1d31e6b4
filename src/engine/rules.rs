//! Per mode behaviour, as a table instead of mode checks spread over the tick.
use tracing::{debug, warn};

use crate::config::{PORTAL_SPAWN_MARGIN, SPAWN_MARGIN};
use crate::types::{FoodRole, Mode};

use super::GameEngine;

/// Hook run after the common part of eating a piece of food
pub type FoodEatenHook = fn(&mut GameEngine, FoodRole);

/// Everything that differs between modes
#[derive(Debug, Clone, Copy)]
pub struct ModeRules {
    /// the mode these rules belong to
    pub mode: Mode,
    /// leaving the frame ends the game
    pub checks_bounds: bool,
    /// running in to your own body ends the game
    pub checks_self_bite: bool,
    /// running in to a brick ends the game
    pub checks_obstacles: bool,
    /// the head wraps around the board after every tick
    pub wraps: bool,
    /// the linked portal food is on the board
    pub has_portal: bool,
    /// distance kept between spawned food and the edge of the board
    pub food_margin: i32,
    /// the primary food moves as soon as it is eaten
    pub respawns_food_on_eat: bool,
    /// mode specific effect of eating
    pub on_food_eaten: FoodEatenHook,
}

const CLASSIC: ModeRules = ModeRules {
    mode: Mode::Classic,
    checks_bounds: true,
    checks_self_bite: true,
    checks_obstacles: false,
    wraps: false,
    has_portal: false,
    food_margin: SPAWN_MARGIN,
    respawns_food_on_eat: true,
    on_food_eaten: no_effect,
};

const GOD: ModeRules = ModeRules {
    mode: Mode::God,
    checks_bounds: false,
    checks_self_bite: false,
    wraps: true,
    ..CLASSIC
};

const WALLS: ModeRules = ModeRules {
    mode: Mode::Walls,
    checks_obstacles: true,
    on_food_eaten: place_brick,
    ..CLASSIC
};

const PORTAL: ModeRules = ModeRules {
    mode: Mode::Portal,
    has_portal: true,
    food_margin: PORTAL_SPAWN_MARGIN,
    respawns_food_on_eat: false,
    on_food_eaten: arm_teleport,
    ..CLASSIC
};

const SPEED: ModeRules = ModeRules {
    mode: Mode::Speed,
    on_food_eaten: speed_up,
    ..CLASSIC
};

/// the rules table entry for a mode
pub fn rules_for(mode: Mode) -> &'static ModeRules {
    match mode {
        Mode::Classic => &CLASSIC,
        Mode::God => &GOD,
        Mode::Walls => &WALLS,
        Mode::Portal => &PORTAL,
        Mode::Speed => &SPEED,
    }
}

fn no_effect(_: &mut GameEngine, _: FoodRole) {}

fn place_brick(engine: &mut GameEngine, _: FoodRole) {
    let attempts = engine.config.spawn_attempts;
    match engine.wall.add_brick(
        &mut engine.rng,
        &engine.board,
        &engine.snake,
        &engine.food,
        attempts,
    ) {
        Ok(cell) => debug!(%cell, bricks = engine.wall.len(), "placed brick"),
        Err(e) => warn!(error = %e, "could not place brick"),
    }
}

fn speed_up(engine: &mut GameEngine, _: FoodRole) {
    engine.snake.speed_up();
    debug!(speed = engine.snake.speed(), "sped up");
}

// Only one jump can be in flight. The countdown runs for as many moves as the snake is long, so
// the whole body has passed through before the portals move.
fn arm_teleport(engine: &mut GameEngine, eaten: FoodRole) {
    if engine.foot_counter > 0 || engine.snake.teleport_armed() {
        return;
    }
    let from = engine.food_by_role(eaten).position();
    let to = engine.food_by_role(eaten.other()).position();
    let offset = from.vector_to(to);
    engine.foot_counter = engine.snake.size();
    engine.snake.arm_teleport(offset);
    debug!(%from, %to, foot_counter = engine.foot_counter, "armed teleport");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_modes() {
        for mode in Mode::all() {
            assert_eq!(rules_for(mode).mode, mode);
        }
    }

    #[test]
    fn test_only_god_skips_collisions() {
        for mode in Mode::all() {
            let r = rules_for(mode);
            assert_eq!(r.checks_bounds, mode != Mode::God);
            assert_eq!(r.checks_self_bite, mode != Mode::God);
            assert_eq!(r.wraps, mode == Mode::God);
        }
    }

    #[test]
    fn test_portal_keeps_food_until_countdown() {
        let r = rules_for(Mode::Portal);
        assert!(r.has_portal);
        assert!(!r.respawns_food_on_eat);
        assert_eq!(r.food_margin, 3);
        assert!(Mode::all()
            .iter()
            .filter(|m| **m != Mode::Portal)
            .all(|m| rules_for(*m).respawns_food_on_eat && rules_for(*m).food_margin == 2));
    }

    #[test]
    fn test_only_walls_checks_obstacles() {
        for mode in Mode::all() {
            assert_eq!(rules_for(mode).checks_obstacles, mode == Mode::Walls);
        }
    }
}

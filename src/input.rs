//! Turning host events in to typed input
//!
//! Anything that does not parse is rejected here with an [InputError]. The caller drops it, so
//! the engine keeps its previous direction and mode.
use std::str::FromStr;
use thiserror::Error;

use crate::types::{Direction, Mode, Vector};

/// An event the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// turn the snake
    Turn(Direction),
    /// pick the mode for the next session
    SelectMode(Mode),
    /// the play button
    Play,
    /// the menu button
    Menu,
    /// the exit button
    Exit,
}

impl Input {
    /// Maps a key name, as browsers and most windowing crates name them, to an input.
    pub fn from_key(key: &str) -> Result<Input, InputError> {
        match key {
            "ArrowUp" => Ok(Input::Turn(Direction::Up)),
            "ArrowDown" => Ok(Input::Turn(Direction::Down)),
            "ArrowLeft" => Ok(Input::Turn(Direction::Left)),
            "ArrowRight" => Ok(Input::Turn(Direction::Right)),
            _ => Err(InputError::UnknownKey(key.to_string())),
        }
    }

    /// a turn from a raw `(dx, dy)` pair, which has to be one of the four unit vectors
    pub fn from_delta(dx: i32, dy: i32) -> Result<Input, InputError> {
        Direction::from_vector(Vector::new(dx, dy))
            .map(Input::Turn)
            .ok_or(InputError::NotAUnitVector(dx, dy))
    }

    /// a mode selection from a menu value, either a name or its numeric id
    pub fn from_mode_value(value: &str) -> Result<Input, InputError> {
        value.parse::<Mode>().map(Input::SelectMode)
    }
}

impl FromStr for Mode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Mode::from_id(id).ok_or_else(|| InputError::UnknownMode(s.to_string()));
        }
        Mode::all()
            .iter()
            .copied()
            .find(|m| m.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownMode(s.to_string()))
    }
}

/// Host input that does not map to anything
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[allow(missing_docs)]
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[allow(missing_docs)]
    #[error("unknown mode {0:?}")]
    UnknownMode(String),
    #[allow(missing_docs)]
    #[error("({0}, {1}) is not a unit direction")]
    NotAUnitVector(i32, i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(Input::from_key("ArrowUp"), Ok(Input::Turn(Direction::Up)));
        assert_eq!(
            Input::from_key("ArrowLeft"),
            Ok(Input::Turn(Direction::Left))
        );
        assert_eq!(
            Input::from_key("w"),
            Err(InputError::UnknownKey("w".to_string()))
        );
    }

    #[test]
    fn test_deltas() {
        assert_eq!(Input::from_delta(0, -1), Ok(Input::Turn(Direction::Up)));
        assert_eq!(Input::from_delta(1, 0), Ok(Input::Turn(Direction::Right)));
        assert_eq!(
            Input::from_delta(1, 1),
            Err(InputError::NotAUnitVector(1, 1))
        );
        assert!(Input::from_delta(0, 0).is_err());
        assert!(Input::from_delta(0, 2).is_err());
    }

    #[test]
    fn test_mode_values() {
        assert_eq!("portal".parse::<Mode>(), Ok(Mode::Portal));
        assert_eq!(" God ".parse::<Mode>(), Ok(Mode::God));
        assert_eq!("3".parse::<Mode>(), Ok(Mode::Walls));
        assert_eq!(
            Input::from_mode_value("5"),
            Ok(Input::SelectMode(Mode::Speed))
        );
        assert!("0".parse::<Mode>().is_err());
        assert!("hard".parse::<Mode>().is_err());
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_bad_mode_keeps_previous_selection() {
        use crate::config::GameConfig;
        use crate::engine::GameEngine;

        let mut engine = GameEngine::with_seed(GameConfig::default(), 0).unwrap();
        engine.on_mode_selected(Mode::Walls);
        for value in ["4", "nope", "9"] {
            if let Ok(input) = Input::from_mode_value(value) {
                engine.handle_input(input);
            }
        }
        assert_eq!(engine.selected_mode(), Mode::Portal);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Input::from_key("w").unwrap_err().to_string(),
            "unknown key \"w\""
        );
        assert_eq!(
            "hard".parse::<Mode>().unwrap_err().to_string(),
            "unknown mode \"hard\""
        );
        assert_eq!(
            InputError::NotAUnitVector(1, 1).to_string(),
            "(1, 1) is not a unit direction"
        );
    }
}

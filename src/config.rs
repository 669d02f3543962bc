use std::time::Duration;

use crate::error::GameError;
use crate::game::Command;
use crate::geometry::{Direction, Pos, Size};

pub const BOARD_WIDTH: u16 = 80;
pub const BOARD_HEIGHT: u16 = 40;

pub const START_POS: Pos = Pos::new(40, 20);
pub const START_DIRECTION: Direction = Direction::Right;
pub const INITIAL_SNAKE_LENGTH: u16 = 10;
// Obstacle-free cells ahead of the head at the start
pub const START_CLEARANCE: u16 = 5;
pub const MAX_SNAKE_LENGTH: usize = 100;

pub const OBSTACLE_COUNT: usize = 4;
pub const OBSTACLE_SIZE: u16 = 5;
pub const OBSTACLE_PLACEMENT_ATTEMPTS: u32 = 1_000;
pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 10_000;

// Apples to eat before the game is won.
pub const WIN_THRESHOLD: u32 = 10;

pub const INITIAL_TICK_DELAY: Duration = Duration::from_millis(200);
pub const TICK_DELAY_DECREMENT: Duration = Duration::from_millis(10);
pub const MIN_TICK_DELAY: Duration = Duration::from_millis(50);

pub const KEY_UP: char = 'z';
pub const KEY_DOWN: char = 's';
pub const KEY_LEFT: char = 'q';
pub const KEY_RIGHT: char = 'd';
pub const KEY_QUIT: char = 'a';

pub const LOG_FILE: &str = "serpent.log";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            up: KEY_UP,
            down: KEY_DOWN,
            left: KEY_LEFT,
            right: KEY_RIGHT,
            quit: KEY_QUIT,
        }
    }
}

impl KeyBindings {
    pub fn command_for(&self, key: char) -> Option<Command> {
        match key {
            k if k == self.quit => Some(Command::Quit),
            k if k == self.up => Some(Command::Turn(Direction::Up)),
            k if k == self.down => Some(Command::Turn(Direction::Down)),
            k if k == self.left => Some(Command::Turn(Direction::Left)),
            k if k == self.right => Some(Command::Turn(Direction::Right)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub size: Size,
    pub start: Pos,
    pub direction: Direction,
    pub initial_length: u16,
    pub max_length: usize,
    pub obstacle_count: usize,
    pub obstacle_size: u16,
    pub win_threshold: u32,
    pub initial_delay: Duration,
    pub delay_decrement: Duration,
    pub min_delay: Duration,
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            size: Size {
                width: BOARD_WIDTH,
                height: BOARD_HEIGHT,
            },
            start: START_POS,
            direction: START_DIRECTION,
            initial_length: INITIAL_SNAKE_LENGTH,
            max_length: MAX_SNAKE_LENGTH,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_size: OBSTACLE_SIZE,
            win_threshold: WIN_THRESHOLD,
            initial_delay: INITIAL_TICK_DELAY,
            delay_decrement: TICK_DELAY_DECREMENT,
            min_delay: MIN_TICK_DELAY,
            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.size.width < 5 || self.size.height < 5 {
            return Err(GameError::InvalidSettings("board must be at least 5x5"));
        }
        if self.initial_length == 0 {
            return Err(GameError::InvalidSettings("snake needs at least one segment"));
        }
        if self.initial_length as usize > self.max_length {
            return Err(GameError::InvalidSettings("initial length exceeds the maximum length"));
        }
        if self.obstacle_count > 0 && self.obstacle_size == 0 {
            return Err(GameError::InvalidSettings("obstacles need a positive size"));
        }
        if self.win_threshold == 0 {
            return Err(GameError::InvalidSettings("win threshold must be positive"));
        }

        // Every segment must sit strictly inside the border
        let delta = self.direction.opposite().into();
        for i in 0..self.initial_length as i32 {
            match self.start.checked_offset(delta, i, self.size) {
                Some(pos) if !self.size.is_border(pos) => {}
                _ => return Err(GameError::InvalidSettings("snake does not fit inside the border")),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_snake_crossing_border_is_rejected() {
        let settings = Settings {
            start: Pos { x: 5, y: 20 },
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_key_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.command_for('z'), Some(Command::Turn(Direction::Up)));
        assert_eq!(keys.command_for('s'), Some(Command::Turn(Direction::Down)));
        assert_eq!(keys.command_for('q'), Some(Command::Turn(Direction::Left)));
        assert_eq!(keys.command_for('d'), Some(Command::Turn(Direction::Right)));
        assert_eq!(keys.command_for('a'), Some(Command::Quit));
        assert_eq!(keys.command_for('x'), None);
    }

    #[test]
    fn test_zero_win_threshold_is_rejected() {
        let settings = Settings {
            win_threshold: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}

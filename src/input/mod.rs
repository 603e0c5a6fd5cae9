//! # Input Module
//!
//! Maps raw key events onto semantic player inputs. No game rules live here:
//! the handler is a pure key-to-intent table, and the core ignores intents
//! that don't apply in the current phase.

use crate::game::Direction;
use macroquad::prelude::*;

/// Semantic player inputs the game loop consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move (or attack) one step in a direction
    Move(Direction),
    /// Advance to the next level (when the floor is clear)
    NextLevel,
    /// Restart the run (after game over)
    Restart,
    /// Quit the game
    Quit,
}

/// Input handler for processing player commands.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Gets the current input if any mapped key was pressed this frame.
    pub fn get_input(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            return Some(PlayerInput::Quit);
        }

        // Movement keys - arrows
        if is_key_pressed(KeyCode::Up) {
            return Some(PlayerInput::Move(Direction::North));
        }
        if is_key_pressed(KeyCode::Down) {
            return Some(PlayerInput::Move(Direction::South));
        }
        if is_key_pressed(KeyCode::Left) {
            return Some(PlayerInput::Move(Direction::West));
        }
        if is_key_pressed(KeyCode::Right) {
            return Some(PlayerInput::Move(Direction::East));
        }

        // Movement keys - WASD
        if is_key_pressed(KeyCode::W) {
            return Some(PlayerInput::Move(Direction::North));
        }
        if is_key_pressed(KeyCode::S) {
            return Some(PlayerInput::Move(Direction::South));
        }
        if is_key_pressed(KeyCode::A) {
            return Some(PlayerInput::Move(Direction::West));
        }
        if is_key_pressed(KeyCode::D) {
            return Some(PlayerInput::Move(Direction::East));
        }

        // Movement keys - Vi style (hjkl) if enabled
        if self.vi_keys_enabled {
            if is_key_pressed(KeyCode::K) {
                return Some(PlayerInput::Move(Direction::North));
            }
            if is_key_pressed(KeyCode::J) {
                return Some(PlayerInput::Move(Direction::South));
            }
            if is_key_pressed(KeyCode::H) {
                return Some(PlayerInput::Move(Direction::West));
            }
            if is_key_pressed(KeyCode::L) {
                return Some(PlayerInput::Move(Direction::East));
            }
        }

        if is_key_pressed(KeyCode::N) {
            return Some(PlayerInput::NextLevel);
        }
        if is_key_pressed(KeyCode::R) {
            return Some(PlayerInput::Restart);
        }

        None
    }
}

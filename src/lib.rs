//! # Delve
//!
//! A small turn-based roguelite dungeon crawler.
//!
//! ## Architecture Overview
//!
//! The simulation core is a plain library with no rendering dependencies in
//! its logic:
//!
//! - **Session**: the single explicit state object for a run (grid, player,
//!   enemies, phase, message log)
//! - **Generation System**: drunkard's-walk cave carving with validation
//! - **Turn Engine**: one intent resolves into a full atomic turn (player
//!   action, enemy sweep, terminal-state checks)
//! - **Combat / AI**: deterministic-shape, random-magnitude melee resolution
//!   and a small chase-or-wander enemy policy
//!
//! The presentation shell (`input`, `rendering`, `main.rs`) only reads the
//! session snapshot and calls the three verbs: [`Session::submit_move`],
//! [`Session::advance_level`], and [`Session::restart`].

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

// Explicit re-exports for the commonly used types.
pub use game::{
    // From ai
    AiAction,
    // From combat
    CombatOutcome,
    Combatant,
    // From mod
    Direction,
    Enemy,
    EnemyKind,
    // From entities
    Entity,
    EntityId,
    // From session
    FlashKind,
    HitEvent,
    LogEntry,
    MessageLog,
    MessageTone,
    Phase,
    Player,
    Position,
    Session,
};

pub use generation::{DrunkardWalkGenerator, FloorPlan, GenerationConfig, Generator, Grid, Tile};

pub use rendering::MacroquadDisplay;

/// Core error type for the Delve game engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const MAP_WIDTH: u32 = 40;

    /// Default dungeon height in tiles
    pub const MAP_HEIGHT: u32 = 18;

    /// Fraction of the full grid area carved into floor
    pub const FLOOR_FRACTION: f64 = 0.4;

    /// Enemies spawned on level 1; each level adds one more
    pub const INITIAL_ENEMY_COUNT: u32 = 6;

    /// Player starting (and maximum) health
    pub const PLAYER_MAX_HP: i32 = 20;

    /// Player attack power
    pub const PLAYER_ATTACK: i32 = 5;

    /// Goblin health
    pub const GOBLIN_HP: i32 = 6;

    /// Goblin attack power
    pub const GOBLIN_ATTACK: i32 = 2;

    /// Elite goblin health
    pub const ELITE_GOBLIN_HP: i32 = 10;

    /// Elite goblin attack power
    pub const ELITE_GOBLIN_ATTACK: i32 = 4;

    /// Probability that a spawned enemy rolls elite
    pub const ELITE_CHANCE: f64 = 0.25;

    /// Manhattan distance at which an enemy starts chasing the player
    pub const ENEMY_SENSE_RANGE: u32 = 6;

    /// Smallest gold reward for a kill
    pub const GOLD_REWARD_MIN: u32 = 1;

    /// Largest gold reward for a kill
    pub const GOLD_REWARD_MAX: u32 = 5;

    /// Maximum number of retained message-log entries
    pub const LOG_CAPACITY: usize = 10;
}

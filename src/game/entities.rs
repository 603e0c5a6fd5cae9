//! # Entity Records
//!
//! Data records for the player and enemies, the shared [`Entity`] attribute
//! trait, and the pure occupancy/sampling queries the rest of the engine is
//! built on.

use crate::game::{new_entity_id, EntityId, Position};
use crate::generation::Grid;
use crate::config;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Attributes shared by everything that can stand on the grid and fight.
pub trait Entity {
    fn id(&self) -> EntityId;
    fn position(&self) -> Position;
    fn set_position(&mut self, position: Position);
    fn health(&self) -> i32;
    fn max_health(&self) -> i32;
    fn attack_power(&self) -> i32;
    fn name(&self) -> &str;

    /// An entity is alive while its health is positive. Health may dip
    /// negative inside combat resolution; dead entities never survive the
    /// turn that killed them.
    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

/// The player character. Created once per run; stats persist across levels,
/// position is replaced on every level advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    /// Accumulated kill rewards.
    pub gold: u32,
}

impl Player {
    /// Creates a fresh player at the given position with base stats.
    pub fn new(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            position,
            hp: config::PLAYER_MAX_HP,
            max_hp: config::PLAYER_MAX_HP,
            attack: config::PLAYER_ATTACK,
            gold: 0,
        }
    }
}

impl Entity for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn health(&self) -> i32 {
        self.hp
    }

    fn max_health(&self) -> i32 {
        self.max_hp
    }

    fn attack_power(&self) -> i32 {
        self.attack
    }

    fn name(&self) -> &str {
        "You"
    }
}

/// Display identity and stat block of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Goblin,
    EliteGoblin,
}

impl EnemyKind {
    /// Rolls a kind for a fresh spawn.
    pub fn roll(rng: &mut StdRng) -> Self {
        if rng.gen_bool(config::ELITE_CHANCE) {
            EnemyKind::EliteGoblin
        } else {
            EnemyKind::Goblin
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::EliteGoblin => "Elite Goblin",
        }
    }

    /// Display character for the map.
    pub fn glyph(self) -> char {
        match self {
            EnemyKind::Goblin => 'g',
            EnemyKind::EliteGoblin => 'G',
        }
    }

    pub fn max_health(self) -> i32 {
        match self {
            EnemyKind::Goblin => config::GOBLIN_HP,
            EnemyKind::EliteGoblin => config::ELITE_GOBLIN_HP,
        }
    }

    pub fn attack_power(self) -> i32 {
        match self {
            EnemyKind::Goblin => config::GOBLIN_ATTACK,
            EnemyKind::EliteGoblin => config::ELITE_GOBLIN_ATTACK,
        }
    }
}

/// A dungeon inhabitant. Lives exactly one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    /// Manhattan distance at which this enemy starts chasing.
    pub sense_range: u32,
}

impl Enemy {
    /// Creates an enemy of the given kind at a position.
    pub fn new(kind: EnemyKind, position: Position) -> Self {
        Self {
            id: new_entity_id(),
            kind,
            position,
            hp: kind.max_health(),
            max_hp: kind.max_health(),
            attack: kind.attack_power(),
            sense_range: config::ENEMY_SENSE_RANGE,
        }
    }
}

impl Entity for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn health(&self) -> i32 {
        self.hp
    }

    fn max_health(&self) -> i32 {
        self.max_hp
    }

    fn attack_power(&self) -> i32 {
        self.attack
    }

    fn name(&self) -> &str {
        self.kind.display_name()
    }
}

/// Borrowed view of whichever entity stands on a cell.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
}

/// Whether any live entity stands on the cell.
pub fn is_cell_occupied(pos: Position, player: &Player, enemies: &[Enemy]) -> bool {
    player.position == pos || enemies.iter().any(|e| e.position == pos)
}

/// Index of the enemy standing on the cell, if any. At most one matches
/// under the no-overlap invariant.
pub fn enemy_index_at(enemies: &[Enemy], pos: Position) -> Option<usize> {
    enemies.iter().position(|e| e.position == pos)
}

/// Samples a uniformly random floor cell not in the exclusion set.
///
/// Returns `None` when every floor cell is excluded; callers decide whether
/// that is a spawn shortfall or an error.
pub fn random_free_floor_cell(
    grid: &Grid,
    excluded: &HashSet<Position>,
    rng: &mut StdRng,
) -> Option<Position> {
    let candidates: Vec<Position> = grid
        .floor_cells()
        .filter(|pos| !excluded.contains(pos))
        .collect();

    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}

//! # Session State
//!
//! The single explicit state object for a run: current level, grid, player,
//! live enemies, turn phase, and the bounded message log. Level construction
//! and enemy spawning live here; turn resolution is layered on top in
//! [`crate::game::turn`].

use crate::game::entities::{enemy_index_at, is_cell_occupied, random_free_floor_cell, EntityRef};
use crate::game::{Enemy, EnemyKind, Entity, Player, Position};
use crate::generation::{utils, DrunkardWalkGenerator, GenerationConfig, Generator, Grid, Tile};
use crate::{config, DelveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Turn-engine phase of a session.
///
/// Intents are only accepted in `Ready`; `LevelClear` gates
/// [`crate::Session::advance_level`] and `GameOver` gates
/// [`crate::Session::restart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Awaiting a player intent
    Ready,
    /// Mid-turn; new intents are ignored
    Resolving,
    /// No live enemies; awaiting the advance command
    LevelClear,
    /// Player dead; awaiting restart
    GameOver,
}

/// Presentation hint for a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTone {
    Info,
    Good,
    Bad,
    Notice,
}

/// One line of the in-game event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub tone: MessageTone,
}

/// Bounded in-game event log; the oldest entry is discarded beyond capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, discarding the oldest when full.
    pub fn push(&mut self, text: impl Into<String>, tone: MessageTone) {
        self.entries.push_back(LogEntry {
            text: text.into(),
            tone,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries in order, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent `count` entries, oldest of those first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Kind of transient visual feedback attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashKind {
    Hit,
}

/// Transient feedback event produced by a resolved attack.
///
/// The core only records these; the renderer drains them with
/// [`Session::take_hit_events`] and owns the highlight timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEvent {
    pub position: Position,
    pub kind: FlashKind,
}

/// Complete state of one run of the game.
///
/// Everything the presentation layer may read is public; mutation goes
/// through the three verbs in [`crate::game::turn`]. There are no globals:
/// every component is a function over `(session, input)`.
#[derive(Debug)]
pub struct Session {
    /// Current dungeon depth, 1-based
    pub level: u32,
    /// Tile surface of the current level
    pub grid: Grid,
    /// The player; persists across levels, re-created on restart
    pub player: Player,
    /// Live enemies in creation order (the AI resolution order)
    pub enemies: Vec<Enemy>,
    /// Turn-engine phase
    pub phase: Phase,
    /// Bounded event log shown to the player
    pub log: MessageLog,
    /// Attack feedback not yet drained by the renderer
    pub pending_hits: Vec<HitEvent>,
    /// Level-rebuild parameters for this run
    pub config: GenerationConfig,
    /// Session RNG; seeded from the config so runs are reproducible
    pub rng: StdRng,
}

impl Session {
    /// Creates a session and builds level 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GenerationConfig, Phase, Session};
    ///
    /// let session = Session::new(GenerationConfig::new(12345)).unwrap();
    /// assert_eq!(session.level, 1);
    /// assert_eq!(session.phase, Phase::Ready);
    /// assert!(!session.enemies.is_empty());
    /// ```
    pub fn new(config: GenerationConfig) -> DelveResult<Self> {
        let rng = utils::create_rng(&config);
        let mut session = Self {
            level: 0,
            grid: Grid::new(config.width, config.height),
            player: Player::new(Position::new(0, 0)),
            enemies: Vec::new(),
            phase: Phase::Ready,
            log: MessageLog::new(config::LOG_CAPACITY),
            pending_hits: Vec::new(),
            config,
            rng,
        };
        session.build_level(1)?;
        Ok(session)
    }

    /// Rebuilds the session for the given level: fresh grid, player moved to
    /// the new start (stats retained), fresh enemy spawn.
    pub(crate) fn build_level(&mut self, level: u32) -> DelveResult<()> {
        let generator = DrunkardWalkGenerator::new();
        log::debug!(
            "building level {level} with {}",
            generator.generator_type()
        );
        let plan = generator.generate(&self.config, &mut self.rng)?;

        self.grid = plan.grid;
        self.player.set_position(plan.player_start);
        self.enemies.clear();
        self.pending_hits.clear();
        self.level = level;
        self.log
            .push(format!("Entered dungeon level {level}"), MessageTone::Notice);

        let count = (config::INITIAL_ENEMY_COUNT + level - 1) as usize;
        self.spawn_enemies(count);

        log::info!(
            "level {level} ready: {} floor tiles, {} enemies",
            self.grid.floor_count(),
            self.enemies.len()
        );
        Ok(())
    }

    /// Spawns up to `count` enemies on free floor cells.
    ///
    /// Stops early when no free cell remains; the shortfall is a warning,
    /// not an error.
    pub fn spawn_enemies(&mut self, count: usize) {
        let mut excluded: HashSet<Position> = HashSet::new();
        excluded.insert(self.player.position());
        excluded.extend(self.enemies.iter().map(|e| e.position()));

        for _ in 0..count {
            let Some(pos) = random_free_floor_cell(&self.grid, &excluded, &mut self.rng) else {
                log::warn!(
                    "spawn shortfall on level {}: placed {} of {count} enemies",
                    self.level,
                    self.enemies.len()
                );
                break;
            };
            let kind = EnemyKind::roll(&mut self.rng);
            excluded.insert(pos);
            self.enemies.push(Enemy::new(kind, pos));
        }
    }

    /// Reads the tile at a position; total, wall outside the grid.
    pub fn tile_at(&self, pos: Position) -> Tile {
        self.grid.tile(pos)
    }

    /// The live enemy standing on a cell, if any.
    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        enemy_index_at(&self.enemies, pos).map(|idx| &self.enemies[idx])
    }

    /// Whichever live entity stands on a cell: the player first, else a
    /// matching enemy. At most one under the no-overlap invariant.
    pub fn entity_at(&self, pos: Position) -> Option<EntityRef<'_>> {
        if self.player.position() == pos {
            Some(EntityRef::Player(&self.player))
        } else {
            self.enemy_at(pos).map(EntityRef::Enemy)
        }
    }

    /// Whether any live entity stands on the cell.
    pub fn is_occupied(&self, pos: Position) -> bool {
        is_cell_occupied(pos, &self.player, &self.enemies)
    }

    /// Whether the floor is cleared and the run waits on `advance_level`.
    pub fn is_awaiting_next_level(&self) -> bool {
        self.phase == Phase::LevelClear
    }

    /// Whether the run has ended and waits on `restart`.
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Drains the pending attack-feedback events for the renderer.
    pub fn take_hit_events(&mut self) -> Vec<HitEvent> {
        std::mem::take(&mut self.pending_hits)
    }

    /// Internal-consistency checks at the turn boundary (debug builds only):
    /// no dead enemy in the live set, no two live entities on one cell.
    pub(crate) fn debug_check_invariants(&self) {
        if cfg!(debug_assertions) {
            let mut seen = HashSet::new();
            seen.insert(self.player.position());
            for enemy in &self.enemies {
                debug_assert!(
                    enemy.is_alive(),
                    "dead {} left in the live set",
                    enemy.name()
                );
                debug_assert!(
                    seen.insert(enemy.position()),
                    "two live entities share {:?}",
                    enemy.position()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new(GenerationConfig::for_testing(12345)).unwrap()
    }

    #[test]
    fn test_new_session_shape() {
        let session = test_session();
        assert_eq!(session.level, 1);
        assert_eq!(session.phase, Phase::Ready);
        assert_eq!(
            session.enemies.len(),
            config::INITIAL_ENEMY_COUNT as usize
        );
        assert!(session.grid.tile(session.player.position()).is_passable());
        assert!(!session.is_game_over());
        assert!(!session.is_awaiting_next_level());
    }

    #[test]
    fn test_spawn_respects_occupancy() {
        let session = test_session();
        let mut seen = HashSet::new();
        seen.insert(session.player.position());
        for enemy in &session.enemies {
            assert!(session.grid.tile(enemy.position()).is_passable());
            assert!(seen.insert(enemy.position()), "overlapping spawn");
        }
    }

    #[test]
    fn test_spawn_shortfall_is_not_an_error() {
        let mut session = test_session();
        // Ask for more enemies than the map has floor tiles.
        let floor = session.grid.floor_count();
        session.spawn_enemies(floor + 50);
        assert!(session.enemies.len() < floor + 50);
        session.debug_check_invariants();
    }

    #[test]
    fn test_entity_queries() {
        let session = test_session();
        let player_pos = session.player.position();
        assert!(matches!(
            session.entity_at(player_pos),
            Some(EntityRef::Player(_))
        ));
        assert!(session.is_occupied(player_pos));

        let enemy_pos = session.enemies[0].position();
        assert!(matches!(
            session.entity_at(enemy_pos),
            Some(EntityRef::Enemy(_))
        ));
        assert_eq!(session.enemy_at(enemy_pos).unwrap().id, session.enemies[0].id);
    }

    #[test]
    fn test_message_log_capacity() {
        let mut log = MessageLog::new(config::LOG_CAPACITY);
        for i in 0..15 {
            log.push(format!("line {i}"), MessageTone::Info);
        }
        assert_eq!(log.len(), config::LOG_CAPACITY);
        assert_eq!(log.entries().next().unwrap().text, "line 5");
        assert_eq!(log.recent(1).next().unwrap().text, "line 14");
    }

    #[test]
    fn test_take_hit_events_drains() {
        let mut session = test_session();
        session.pending_hits.push(HitEvent {
            position: Position::new(1, 1),
            kind: FlashKind::Hit,
        });
        assert_eq!(session.take_hit_events().len(), 1);
        assert!(session.take_hit_events().is_empty());
    }
}

//! # Turn Engine
//!
//! Resolves one player intent into a full atomic turn: the player's action,
//! the enemy sweep, and the terminal-state checks. The three verbs here
//! ([`Session::submit_move`], [`Session::advance_level`], and
//! [`Session::restart`]) are the only mutations the presentation layer may
//! trigger.
//!
//! Intents are accepted only in [`Phase::Ready`]; the phase is `Resolving`
//! for the whole of a turn, so a mid-turn intent is structurally impossible
//! for a well-behaved caller and ignored for anyone else.

use crate::game::{ai, combat, AiAction, Combatant, Direction, Entity, EntityId};
use crate::game::{MessageTone, Phase, Player, Session};
use crate::generation::Tile;
use crate::DelveResult;

impl Session {
    /// Applies a player movement intent and resolves the resulting turn.
    ///
    /// - A wall target is a no-op bump: a log entry, no turn.
    /// - An enemy target resolves a player attack; attacking never moves
    ///   the player.
    /// - An open floor target moves the player.
    ///
    /// A successful move, or an attack that leaves enemies alive, runs the
    /// enemy sweep. An attack that empties the floor skips straight to
    /// [`Phase::LevelClear`].
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, GenerationConfig, Session};
    ///
    /// let mut session = Session::new(GenerationConfig::new(12345)).unwrap();
    /// session.submit_move(Direction::North).unwrap();
    /// ```
    pub fn submit_move(&mut self, direction: Direction) -> DelveResult<()> {
        if self.phase != Phase::Ready {
            log::debug!("ignoring move intent in phase {:?}", self.phase);
            return Ok(());
        }
        self.phase = Phase::Resolving;

        let target = self.player.position().step(direction);
        if self.tile_at(target) == Tile::Wall {
            self.log.push("You bump into a wall.", MessageTone::Info);
            self.phase = Phase::Ready;
            return Ok(());
        }

        if let Some(enemy) = self.enemy_at(target) {
            let id = enemy.id;
            combat::resolve(self, Combatant::Player, Combatant::Enemy(id))?;
            if self.enemies.is_empty() {
                // Nothing left to sweep.
                self.enter_level_clear();
            } else if self.phase != Phase::GameOver {
                self.run_enemy_phase()?;
            }
        } else if !self.is_occupied(target) {
            self.player.set_position(target);
            self.log.push("You move.", MessageTone::Info);
            self.run_enemy_phase()?;
        }

        if self.phase == Phase::Resolving {
            self.phase = Phase::Ready;
        }
        self.debug_check_invariants();
        Ok(())
    }

    /// Rebuilds the run for the next level. Only honored in
    /// [`Phase::LevelClear`]; anywhere else it is a log notice.
    pub fn advance_level(&mut self) -> DelveResult<()> {
        if self.phase != Phase::LevelClear {
            self.log
                .push("You haven't cleared this floor yet.", MessageTone::Info);
            return Ok(());
        }

        let next = self.level + 1;
        self.build_level(next)?;
        self.phase = Phase::Ready;
        self.debug_check_invariants();
        Ok(())
    }

    /// Starts the run over from level 1 with a fresh player. Only honored in
    /// [`Phase::GameOver`]; anywhere else it is a log notice.
    pub fn restart(&mut self) -> DelveResult<()> {
        if self.phase != Phase::GameOver {
            self.log.push("You are still alive.", MessageTone::Info);
            return Ok(());
        }

        log::info!("restarting after death on level {}", self.level);
        self.log.clear();
        self.player = Player::new(self.player.position());
        self.build_level(1)?;
        self.phase = Phase::Ready;
        self.debug_check_invariants();
        Ok(())
    }

    /// Runs the enemy sweep: every enemy alive at sweep start gets one
    /// decision, in creation order. Enemies killed earlier in the same sweep
    /// are skipped, and a player death aborts the remainder (outcomes already
    /// resolved stand). Ends the level when the floor is empty.
    fn run_enemy_phase(&mut self) -> DelveResult<()> {
        // Snapshot identities so removal mid-sweep can never skip or repeat
        // a neighbor.
        let ids: Vec<EntityId> = self.enemies.iter().map(|e| e.id).collect();

        for id in ids {
            if self.phase == Phase::GameOver {
                break;
            }
            let Some(idx) = self.enemies.iter().position(|e| e.id == id) else {
                continue;
            };

            let action = ai::decide(
                &self.enemies[idx],
                &self.player,
                &self.grid,
                &self.enemies,
                &mut self.rng,
            );

            match action {
                AiAction::Attack => {
                    combat::resolve(self, Combatant::Enemy(id), Combatant::Player)?;
                }
                AiAction::MoveTo(pos) => {
                    self.enemies[idx].set_position(pos);
                }
                AiAction::Idle => {}
            }
        }

        if self.enemies.is_empty() && self.phase != Phase::GameOver {
            self.enter_level_clear();
        }
        Ok(())
    }

    fn enter_level_clear(&mut self) {
        self.phase = Phase::LevelClear;
        self.log.push(
            "Floor cleared! Press N for the next level.",
            MessageTone::Notice,
        );
        log::info!("level {} cleared", self.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Enemy, EnemyKind};
    use crate::generation::GenerationConfig;

    fn test_session() -> Session {
        Session::new(GenerationConfig::for_testing(2024)).unwrap()
    }

    /// A session with no enemies and the player parked somewhere open.
    fn empty_arena() -> Session {
        let mut session = test_session();
        session.enemies.clear();
        session
    }

    /// First direction whose target tile is floor.
    fn open_direction(session: &Session) -> Direction {
        Direction::all()
            .into_iter()
            .find(|d| {
                session
                    .tile_at(session.player.position().step(*d))
                    .is_passable()
            })
            .expect("player start should have an open neighbor")
    }

    #[test]
    fn test_bump_into_wall_is_a_no_op() {
        let mut session = empty_arena();
        // Wall the player in completely.
        let pos = session.player.position();
        session.grid = crate::generation::Grid::new(session.config.width, session.config.height);
        session.grid.set_tile(pos, crate::generation::Tile::Floor);

        session.submit_move(Direction::North).unwrap();
        assert_eq!(session.player.position(), pos);
        assert_eq!(session.phase, Phase::Ready);
        assert_eq!(session.log.recent(1).next().unwrap().text, "You bump into a wall.");
    }

    #[test]
    fn test_move_onto_open_floor() {
        let mut session = empty_arena();
        let direction = open_direction(&session);
        let expected = session.player.position().step(direction);

        session.submit_move(direction).unwrap();
        assert_eq!(session.player.position(), expected);
    }

    #[test]
    fn test_intents_ignored_outside_ready() {
        let mut session = empty_arena();
        let start = session.player.position();

        for phase in [Phase::Resolving, Phase::LevelClear, Phase::GameOver] {
            session.phase = phase;
            let direction = open_direction(&session);
            session.submit_move(direction).unwrap();
            assert_eq!(session.player.position(), start, "moved during {phase:?}");
            assert_eq!(session.phase, phase, "phase changed during {phase:?}");
        }
    }

    #[test]
    fn test_attack_does_not_move_player() {
        let mut session = empty_arena();
        let start = session.player.position();
        let direction = open_direction(&session);
        let target = start.step(direction);

        let mut enemy = Enemy::new(EnemyKind::Goblin, target);
        enemy.hp = 1000; // survives the hit
        session.enemies.push(enemy);

        session.submit_move(direction).unwrap();
        assert_eq!(session.player.position(), start);
        assert!(session.enemies[0].hp < 1000);
    }

    #[test]
    fn test_killing_last_enemy_clears_level() {
        let mut session = empty_arena();
        let direction = open_direction(&session);
        let target = session.player.position().step(direction);

        let mut enemy = Enemy::new(EnemyKind::Goblin, target);
        enemy.hp = 1;
        session.enemies.push(enemy);
        session.player.attack = 50;

        session.submit_move(direction).unwrap();
        assert!(session.enemies.is_empty());
        assert_eq!(session.phase, Phase::LevelClear);
        assert!(session.is_awaiting_next_level());
    }

    #[test]
    fn test_advance_level_only_from_level_clear() {
        let mut session = empty_arena();
        session.advance_level().unwrap();
        assert_eq!(session.level, 1, "advance should be refused while Ready");

        session.phase = Phase::LevelClear;
        session.advance_level().unwrap();
        assert_eq!(session.level, 2);
        assert_eq!(session.phase, Phase::Ready);
        // base 6 + level 2 - 1 = 7
        assert_eq!(
            session.enemies.len(),
            (crate::config::INITIAL_ENEMY_COUNT + 1) as usize
        );
    }

    #[test]
    fn test_stats_persist_across_levels() {
        let mut session = empty_arena();
        session.player.gold = 17;
        session.player.hp = 9;
        session.phase = Phase::LevelClear;

        session.advance_level().unwrap();
        assert_eq!(session.player.gold, 17);
        assert_eq!(session.player.hp, 9);
        assert!(session
            .grid
            .tile(session.player.position())
            .is_passable());
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut session = empty_arena();
        session.player.gold = 30;
        session.restart().unwrap();
        assert_eq!(session.player.gold, 30, "restart should be refused while alive");

        session.phase = Phase::GameOver;
        session.player.hp = -2;
        session.level = 4;
        session.restart().unwrap();

        assert_eq!(session.level, 1);
        assert_eq!(session.phase, Phase::Ready);
        assert_eq!(session.player.gold, 0);
        assert_eq!(session.player.hp, crate::config::PLAYER_MAX_HP);
        // Log was cleared; only the level-entry line remains.
        assert_eq!(session.log.len(), 1);
    }

    #[test]
    fn test_enemy_sweep_respects_player_death() {
        let mut session = empty_arena();
        let start = session.player.position();
        session.player.hp = 1;

        // Ring the player with attackers; the first kill aborts the sweep.
        let mut placed = 0;
        for adjacent in start.cardinal_adjacent_positions() {
            if session.tile_at(adjacent).is_passable() {
                session
                    .enemies
                    .push(Enemy::new(EnemyKind::EliteGoblin, adjacent));
                placed += 1;
            }
        }
        assert!(placed >= 1);

        let direction = open_direction(&session);
        session.submit_move(direction).unwrap();

        assert_eq!(session.phase, Phase::GameOver);
        assert!(session.is_game_over());
        // Dead player means later submit_move calls change nothing.
        let hp = session.player.hp;
        session.submit_move(direction).unwrap();
        assert_eq!(session.player.hp, hp);
    }

    #[test]
    fn test_no_overlap_after_many_turns() {
        use std::collections::HashSet;

        let mut session = test_session();
        let directions = Direction::all();
        for i in 0..200 {
            if session.phase == Phase::LevelClear {
                session.advance_level().unwrap();
            }
            if session.phase == Phase::GameOver {
                session.restart().unwrap();
            }
            session.submit_move(directions[i % directions.len()]).unwrap();

            let mut seen = HashSet::new();
            seen.insert(session.player.position());
            for enemy in &session.enemies {
                assert!(enemy.is_alive());
                assert!(
                    seen.insert(enemy.position()),
                    "overlap at {:?} after turn {i}",
                    enemy.position()
                );
            }
        }
    }

}

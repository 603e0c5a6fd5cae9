//! # Enemy AI
//!
//! Per-enemy decision function. The policy is evaluated in strict order:
//! attack when adjacent, chase when the player is within sense range,
//! otherwise wander. Decisions obey walls and occupancy; applying the chosen
//! action is the turn engine's job.

use crate::game::entities::is_cell_occupied;
use crate::game::{Direction, Enemy, Entity, Player, Position};
use crate::generation::Grid;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What an enemy chose to do this turn. `Attack` and `MoveTo` are mutually
/// exclusive: an enemy never steps onto the player's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiAction {
    Attack,
    MoveTo(Position),
    Idle,
}

/// Decides one enemy's action against the current board.
///
/// Pure over its inputs apart from the injected RNG (the chase axis-priority
/// coin flip and the wander direction).
pub fn decide(
    enemy: &Enemy,
    player: &Player,
    grid: &Grid,
    enemies: &[Enemy],
    rng: &mut StdRng,
) -> AiAction {
    let from = enemy.position();
    let target = player.position();
    let distance = from.manhattan_distance(target);

    if distance == 1 {
        return AiAction::Attack;
    }

    if distance <= enemy.sense_range {
        let dx = (target.x - from.x).signum();
        let dy = (target.y - from.y).signum();
        let horizontal = Position::new(from.x + dx, from.y);
        let vertical = Position::new(from.x, from.y + dy);

        // Random axis priority keeps enemies from locking into single-axis
        // corridors in lockstep.
        let candidates = if rng.gen_bool(0.5) {
            [horizontal, vertical]
        } else {
            [vertical, horizontal]
        };

        for candidate in candidates {
            if step_is_open(candidate, grid, player, enemies) {
                return AiAction::MoveTo(candidate);
            }
        }
        return AiAction::Idle;
    }

    // Out of sense range: wander one random step if it is open.
    let directions = Direction::all();
    let candidate = from.step(directions[rng.gen_range(0..directions.len())]);
    if step_is_open(candidate, grid, player, enemies) {
        AiAction::MoveTo(candidate)
    } else {
        AiAction::Idle
    }
}

fn step_is_open(pos: Position, grid: &Grid, player: &Player, enemies: &[Enemy]) -> bool {
    grid.tile(pos).is_passable() && !is_cell_occupied(pos, player, enemies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EnemyKind;
    use crate::generation::Tile;
    use rand::SeedableRng;

    /// Open 9x9 arena with a solid border.
    fn arena() -> Grid {
        let mut grid = Grid::new(9, 9);
        for y in 1..8 {
            for x in 1..8 {
                grid.set_tile(Position::new(x, y), Tile::Floor);
            }
        }
        grid
    }

    #[test]
    fn test_adjacent_enemy_attacks() {
        let grid = arena();
        let player = Player::new(Position::new(4, 4));
        let enemy = Enemy::new(EnemyKind::Goblin, Position::new(4, 5));
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            assert_eq!(decide(&enemy, &player, &grid, &[], &mut rng), AiAction::Attack);
        }
    }

    #[test]
    fn test_chase_closes_distance() {
        let grid = arena();
        let player = Player::new(Position::new(2, 2));
        let enemy = Enemy::new(EnemyKind::Goblin, Position::new(5, 5));
        let start_distance = enemy.position().manhattan_distance(player.position());
        assert!(start_distance <= enemy.sense_range);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..20 {
            match decide(&enemy, &player, &grid, &[], &mut rng) {
                AiAction::MoveTo(pos) => {
                    assert!(grid.tile(pos).is_passable());
                    assert!(pos.manhattan_distance(player.position()) < start_distance);
                    assert_ne!(pos, player.position());
                }
                other => panic!("expected a chase step, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_blocked_chase_idles() {
        // Enemy boxed in: walls on both chase axes.
        let mut grid = Grid::new(9, 9);
        grid.set_tile(Position::new(5, 5), Tile::Floor);
        grid.set_tile(Position::new(2, 2), Tile::Floor);
        let player = Player::new(Position::new(2, 2));
        let enemy = Enemy::new(EnemyKind::Goblin, Position::new(5, 5));
        assert!(enemy.position().manhattan_distance(player.position()) <= enemy.sense_range);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            assert_eq!(decide(&enemy, &player, &grid, &[], &mut rng), AiAction::Idle);
        }
    }

    #[test]
    fn test_occupied_chase_step_is_skipped() {
        let grid = arena();
        let player = Player::new(Position::new(2, 4));
        // Chaser due east of the player; the straight-line cell is taken.
        let blocker = Enemy::new(EnemyKind::Goblin, Position::new(3, 4));
        let enemy = Enemy::new(EnemyKind::Goblin, Position::new(4, 4));
        let mut rng = StdRng::seed_from_u64(4);

        let enemies = vec![blocker.clone(), enemy.clone()];
        for _ in 0..20 {
            match decide(&enemy, &player, &grid, &enemies, &mut rng) {
                AiAction::MoveTo(pos) => assert_ne!(pos, blocker.position()),
                AiAction::Idle => {}
                AiAction::Attack => panic!("player is not adjacent"),
            }
        }
    }

    #[test]
    fn test_out_of_range_wanders_or_idles() {
        // 20x20 arena so the player is beyond sense range.
        let mut grid = Grid::new(20, 20);
        for y in 1..19 {
            for x in 1..19 {
                grid.set_tile(Position::new(x, y), Tile::Floor);
            }
        }
        let player = Player::new(Position::new(2, 2));
        let enemy = Enemy::new(EnemyKind::Goblin, Position::new(17, 17));
        assert!(enemy.position().manhattan_distance(player.position()) > enemy.sense_range);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..40 {
            match decide(&enemy, &player, &grid, &[], &mut rng) {
                AiAction::MoveTo(pos) => {
                    assert_eq!(enemy.position().manhattan_distance(pos), 1);
                    assert!(grid.tile(pos).is_passable());
                }
                AiAction::Idle => {}
                AiAction::Attack => panic!("player is out of reach"),
            }
        }
    }
}

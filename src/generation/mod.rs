//! # Generation Module
//!
//! Procedural level generation for the dungeon.
//!
//! The generator carves a cave-like floor plan out of a solid-wall grid and
//! yields a guaranteed-floor start cell. All randomness flows through an
//! injected, seedable RNG so generation is reproducible in tests.

pub mod grid;
pub mod walker;

pub use grid::*;
pub use walker::*;

use crate::game::Position;
use crate::{config, DelveError, DelveResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Fraction of the full grid area to carve into floor (0.0 to 1.0)
    pub floor_fraction: f64,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.floor_fraction > 0.0 && config.floor_fraction < 1.0);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::MAP_WIDTH,
            height: config::MAP_HEIGHT,
            floor_fraction: config::FLOOR_FRACTION,
        }
    }

    /// Creates a configuration for testing with a smaller grid.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 24,
            height: 12,
            floor_fraction: config::FLOOR_FRACTION,
        }
    }

    /// Number of floor tiles the generator aims to carve.
    pub fn target_floor_count(&self) -> usize {
        ((self.width * self.height) as f64 * self.floor_fraction).floor() as usize
    }

    /// Number of carvable cells inside the preserved wall border.
    pub fn interior_capacity(&self) -> usize {
        (self.width.saturating_sub(2) * self.height.saturating_sub(2)) as usize
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// All generation systems in Delve implement this trait, allowing consistent
/// interfaces and independently seedable randomness.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Flood-fills from `start` across passable tiles, returning every
    /// reachable floor cell.
    pub fn reachable_floor(grid: &Grid, start: Position) -> HashSet<Position> {
        let mut visited = HashSet::new();
        if !grid.tile(start).is_passable() {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for adjacent in pos.cardinal_adjacent_positions() {
                if grid.tile(adjacent).is_passable() && visited.insert(adjacent) {
                    queue.push_back(adjacent);
                }
            }
        }

        visited
    }

    /// Validates that a floor plan meets the generator's guarantees: a floor
    /// start cell, a preserved wall border, and a fully connected carved
    /// region.
    pub fn validate_floor_plan(plan: &FloorPlan) -> DelveResult<()> {
        let grid = &plan.grid;

        if !grid.tile(plan.player_start).is_passable() {
            return Err(DelveError::GenerationFailed(
                "player start is not a floor tile".to_string(),
            ));
        }

        let width = grid.width() as i32;
        let height = grid.height() as i32;
        for x in 0..width {
            for &y in &[0, height - 1] {
                if grid.tile(Position::new(x, y)).is_passable() {
                    return Err(DelveError::GenerationFailed(format!(
                        "border breached at ({x}, {y})"
                    )));
                }
            }
        }
        for y in 0..height {
            for &x in &[0, width - 1] {
                if grid.tile(Position::new(x, y)).is_passable() {
                    return Err(DelveError::GenerationFailed(format!(
                        "border breached at ({x}, {y})"
                    )));
                }
            }
        }

        let reachable = reachable_floor(grid, plan.player_start);
        if reachable.len() != grid.floor_count() {
            return Err(DelveError::GenerationFailed(format!(
                "carved region is disconnected: {} of {} floor tiles reachable",
                reachable.len(),
                grid.floor_count()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.width, crate::config::MAP_WIDTH);
        assert_eq!(config.height, crate::config::MAP_HEIGHT);
    }

    #[test]
    fn test_target_and_capacity() {
        let config = GenerationConfig::new(1);
        // 40 x 18 at 0.4 carves 288 of 608 interior cells.
        assert_eq!(config.target_floor_count(), 288);
        assert_eq!(config.interior_capacity(), 608);
        assert!(config.target_floor_count() <= config.interior_capacity());
    }

    #[test]
    fn test_utils_rng_determinism() {
        use rand::Rng;

        let config = GenerationConfig::new(99);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_reachable_floor_stops_at_walls() {
        let mut grid = Grid::new(7, 5);
        // Two carved pockets separated by wall.
        grid.set_tile(Position::new(1, 1), Tile::Floor);
        grid.set_tile(Position::new(2, 1), Tile::Floor);
        grid.set_tile(Position::new(5, 3), Tile::Floor);

        let reachable = utils::reachable_floor(&grid, Position::new(1, 1));
        assert_eq!(reachable.len(), 2);
        assert!(!reachable.contains(&Position::new(5, 3)));
    }

    #[test]
    fn test_validate_rejects_disconnected_plan() {
        let mut grid = Grid::new(7, 5);
        grid.set_tile(Position::new(1, 1), Tile::Floor);
        grid.set_tile(Position::new(5, 3), Tile::Floor);
        let plan = FloorPlan {
            grid,
            player_start: Position::new(1, 1),
        };

        assert!(utils::validate_floor_plan(&plan).is_err());
    }
}

//! # Drunkard's-Walk Carving
//!
//! Carves a connected, cave-like floor plan out of a solid-wall grid with a
//! single random walk. The walk starts at the grid center, steps one cell at
//! a time in a uniformly random cardinal direction, and is clamped to the
//! interior so the outer wall ring survives. Connectivity falls out of the
//! construction: every carved cell was visited by one unbroken walk.

use crate::game::{Direction, Position};
use crate::generation::{utils, GenerationConfig, Generator, Grid, Tile};
use crate::{DelveError, DelveResult};
use rand::rngs::StdRng;
use rand::Rng;

/// A generated level layout: the tile grid and a guaranteed-floor start cell.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    pub grid: Grid,
    pub player_start: Position,
}

/// Cave generator using drunkard's-walk carving.
#[derive(Debug, Clone)]
pub struct DrunkardWalkGenerator {
    /// Step budget per interior cell before carving is declared stuck.
    ///
    /// The walk's expected cover time is a small multiple of the interior
    /// size; this cap only exists so a mis-configured walk fails instead of
    /// spinning forever.
    pub step_cap_factor: usize,
}

impl DrunkardWalkGenerator {
    /// Creates a new generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{DrunkardWalkGenerator, GenerationConfig, Generator};
    /// use delve::generation::utils;
    ///
    /// let config = GenerationConfig::for_testing(7);
    /// let mut rng = utils::create_rng(&config);
    /// let plan = DrunkardWalkGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(plan.grid.tile(plan.player_start).is_passable());
    /// ```
    pub fn new() -> Self {
        Self {
            step_cap_factor: 1000,
        }
    }

    /// Checks the configured dimensions against what the walk can carve.
    fn check_config(&self, config: &GenerationConfig) -> DelveResult<()> {
        if config.width < 3 || config.height < 3 {
            return Err(DelveError::GenerationFailed(format!(
                "grid {}x{} has no interior to carve",
                config.width, config.height
            )));
        }

        let target = config.target_floor_count();
        let capacity = config.interior_capacity();
        if target > capacity {
            return Err(DelveError::GenerationFailed(format!(
                "floor target {target} exceeds interior capacity {capacity} \
                 for a {}x{} grid at fraction {}",
                config.width, config.height, config.floor_fraction
            )));
        }

        Ok(())
    }
}

impl Generator<FloorPlan> for DrunkardWalkGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<FloorPlan> {
        self.check_config(config)?;

        let width = config.width as i32;
        let height = config.height as i32;
        let mut grid = Grid::new(config.width, config.height);

        let start = Position::new(width / 2, height / 2);
        grid.set_tile(start, Tile::Floor);

        let target = config.target_floor_count();
        let max_steps = config.interior_capacity() * self.step_cap_factor;
        let directions = Direction::all();

        let mut cursor = start;
        let mut carved = 1;
        let mut steps = 0;

        while carved < target {
            steps += 1;
            if steps > max_steps {
                return Err(DelveError::GenerationFailed(format!(
                    "carving stalled after {steps} steps at {carved}/{target} floor tiles"
                )));
            }

            let delta = directions[rng.gen_range(0..directions.len())].to_delta();
            // Clamp to the interior so the outer ring always stays wall.
            cursor = Position::new(
                (cursor.x + delta.x).clamp(1, width - 2),
                (cursor.y + delta.y).clamp(1, height - 2),
            );

            if grid.tile(cursor) == Tile::Wall {
                grid.set_tile(cursor, Tile::Floor);
                carved += 1;
            }
        }

        log::debug!(
            "carved {carved} floor tiles on a {}x{} grid in {steps} steps",
            config.width,
            config.height
        );

        Ok(FloorPlan {
            grid,
            player_start: start,
        })
    }

    fn validate(&self, plan: &FloorPlan, _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_floor_plan(plan)
    }

    fn generator_type(&self) -> &'static str {
        "DrunkardWalkGenerator"
    }
}

impl Default for DrunkardWalkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

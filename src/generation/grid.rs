//! # Tile Grid
//!
//! The rectangular tile surface a level is played on. Dimensions are fixed at
//! construction; after generation the grid is only ever read.

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// A single map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    /// Whether entities can stand on this tile.
    pub fn is_passable(self) -> bool {
        matches!(self, Tile::Floor)
    }

    /// Display character for this tile.
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
        }
    }
}

/// Rectangular tile grid with total, bounds-checked accessors.
///
/// Reads outside the grid always return [`Tile::Wall`], so callers never need
/// their own bounds checks.
///
/// # Examples
///
/// ```
/// use delve::{Grid, Position, Tile};
///
/// let grid = Grid::new(10, 8);
/// assert_eq!(grid.tile(Position::new(3, 3)), Tile::Wall);
/// assert_eq!(grid.tile(Position::new(-1, 99)), Tile::Wall);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid of the given dimensions, filled with wall.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; (width * height) as usize],
        }
    }

    /// Grid width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the position lies on the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Reads the tile at a position. Total: out-of-bounds reads are wall.
    pub fn tile(&self, pos: Position) -> Tile {
        if self.in_bounds(pos) {
            self.tiles[self.index(pos)]
        } else {
            Tile::Wall
        }
    }

    /// Writes a tile. Out-of-bounds writes are ignored.
    ///
    /// Only the generator writes tiles; once a level is handed to a session
    /// the grid is treated as immutable.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.tiles[idx] = tile;
        }
    }

    /// Number of floor tiles on the grid.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_passable()).count()
    }

    /// Iterates over every floor cell in row-major order.
    pub fn floor_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as i32;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_passable())
            .map(move |(i, _)| Position::new(i as i32 % width, i as i32 / width))
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y as u32 * self.width + pos.x as u32) as usize
    }
}

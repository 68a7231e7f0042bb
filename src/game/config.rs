use std::time::Duration;

use thiserror::Error;

use super::state::Position;

/// Window width in pixels
pub const WINDOW_WIDTH: u32 = 850;
/// Window height in pixels
pub const WINDOW_HEIGHT: u32 = 600;
/// Side length of one tile in pixels
pub const TILE_SIZE: u32 = 25;
/// Simulation ticks per second
pub const TICKS_PER_SECOND: u32 = 12;

/// Random draws made for a food cell before scanning for free cells
pub const FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Smallest grid that still has an interior cell and a spawn cell
const MIN_GRID_CELLS: u32 = 3;

/// Reasons a configuration is rejected at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tile size must be greater than zero")]
    ZeroTileSize,

    #[error("tile size {tile} must evenly divide window width {width}")]
    TileDoesNotDivideWidth { tile: u32, width: u32 },

    #[error("tile size {tile} must evenly divide window height {height}")]
    TileDoesNotDivideHeight { tile: u32, height: u32 },

    #[error("grid of {columns}x{rows} tiles is too small, need at least {min}x{min}")]
    GridTooSmall { columns: u32, rows: u32, min: u32 },

    #[error("tick rate must be greater than zero")]
    ZeroTickRate,
}

/// Validated, immutable game configuration
///
/// Built once at startup and shared by reference. The grid dimensions are
/// derived from the window and tile sizes, so a `GameConfig` value always
/// describes a grid the game can run on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    window_width: u32,
    window_height: u32,
    tile_size: u32,
    ticks_per_second: u32,
    columns: i32,
    rows: i32,
}

impl GameConfig {
    /// Validate the given dimensions and derive the grid size
    pub fn new(
        window_width: u32,
        window_height: u32,
        tile_size: u32,
        ticks_per_second: u32,
    ) -> Result<Self, ConfigError> {
        if tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if window_width % tile_size != 0 {
            return Err(ConfigError::TileDoesNotDivideWidth {
                tile: tile_size,
                width: window_width,
            });
        }
        if window_height % tile_size != 0 {
            return Err(ConfigError::TileDoesNotDivideHeight {
                tile: tile_size,
                height: window_height,
            });
        }
        if ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let columns = window_width / tile_size;
        let rows = window_height / tile_size;
        if columns < MIN_GRID_CELLS || rows < MIN_GRID_CELLS {
            return Err(ConfigError::GridTooSmall {
                columns,
                rows,
                min: MIN_GRID_CELLS,
            });
        }

        Ok(Self {
            window_width,
            window_height,
            tile_size,
            ticks_per_second,
            columns: columns as i32,
            rows: rows as i32,
        })
    }

    /// The fixed configuration the game ships with
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(WINDOW_WIDTH, WINDOW_HEIGHT, TILE_SIZE, TICKS_PER_SECOND)
    }

    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    pub fn window_height(&self) -> u32 {
        self.window_height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Number of tile columns
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of tile rows
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }

    /// Where a fresh snake spawns: second column, second row from the bottom
    pub fn start_position(&self) -> Position {
        Position::new(1, self.rows - 2)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.columns && pos.y >= 0 && pos.y < self.rows
    }

    /// Cells excluding the outermost border, row by row
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        (1..self.rows - 1).flat_map(move |y| (1..self.columns - 1).map(move |x| Position::new(x, y)))
    }
}

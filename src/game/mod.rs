//! Core game logic for Snake
//!
//! Nothing in here does I/O or rendering. Callers feed one optional turn per
//! tick and read back a [`Snapshot`] to draw.

pub mod config;
pub mod engine;
pub mod heading;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use engine::{CollisionType, GameOver, SnakeGame, Snapshot, TickResult, TileView};
pub use heading::{Direction, Heading};
pub use snake::Snake;
pub use state::{Position, Rgb, Tile, palette};

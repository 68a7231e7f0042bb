//! Tile Snake - the classic grid snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard mapping and per-tick input sampling (input module)
//! - Session statistics (metrics module)
//! - Terminal rendering (render module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

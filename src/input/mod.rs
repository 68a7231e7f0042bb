pub mod handler;
pub mod pressed;

pub use handler::{InputHandler, KeyAction};
pub use pressed::PressedDirections;

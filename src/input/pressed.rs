use crate::game::Direction;

/// Directions pressed since the last tick
///
/// The terminal delivers key presses one at a time, while the game reads
/// input once per tick. Presses are collected here and the tick takes a
/// single direction, Up before Down before Left before Right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressedDirections {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl PressedDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        *self.slot(direction) = true;
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The highest-priority pressed direction, clearing all presses
    pub fn take(&mut self) -> Option<Direction> {
        let chosen = Direction::PRIORITY
            .into_iter()
            .find(|&direction| self.is_pressed(direction));
        self.clear();
        chosen
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn slot(&mut self, direction: Direction) -> &mut bool {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

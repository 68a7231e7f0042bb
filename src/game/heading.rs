/// Direction a tile is facing and moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heading {
    /// Not moving (fresh snake, food)
    #[default]
    Stop,
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Returns the delta (dx, dy) for moving in this heading
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Stop => (0, 0),
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// The reverse heading; `Stop` is its own opposite
    pub fn opposite(&self) -> Heading {
        match self {
            Heading::Stop => Heading::Stop,
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Heading) -> bool {
        *self != Heading::Stop && self.opposite() == other
    }
}

/// A turn requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Resolution order when several directions are held in one tick
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl From<Direction> for Heading {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Heading::Up,
            Direction::Down => Heading::Down,
            Direction::Left => Heading::Left,
            Direction::Right => Heading::Right,
        }
    }
}

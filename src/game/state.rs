use super::heading::Heading;

/// A cell on the game grid, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one step along a heading
    pub fn moved_toward(&self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        self.moved_by(dx, dy)
    }
}

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub mod palette {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREY: Rgb = Rgb(50, 50, 50);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);

    pub const EYES: Rgb = BLACK;
    pub const BACKGROUND: Rgb = GREY;
    pub const SNAKE: Rgb = RED;
    pub const FOOD: Rgb = GREEN;
}

/// One occupant of a grid cell: a snake segment or the food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub position: Position,
    pub heading: Heading,
    pub color: Rgb,
}

impl Tile {
    pub fn new(position: Position, heading: Heading, color: Rgb) -> Self {
        Self {
            position,
            heading,
            color,
        }
    }

    /// A food tile, which never moves
    pub fn food(position: Position) -> Self {
        Self::new(position, Heading::Stop, palette::FOOD)
    }

    /// Face `heading` and step one cell that way. Bounds are not checked here.
    pub fn move_toward(&mut self, heading: Heading) {
        self.heading = heading;
        self.position = self.position.moved_toward(heading);
    }
}

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::heading::{Direction, Heading};
use super::state::{Position, Rgb, Tile};

/// The player's snake
///
/// Turns are recorded at the cell where the head was when the player asked
/// for them. Every segment that later starts a step on that cell takes the
/// recorded heading, so a turn travels down the body one segment per step.
/// The tail is the last segment to pass, so it removes the entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    body: Vec<Tile>,
    pending_turns: HashMap<Position, Heading>,
    color: Rgb,
}

impl Snake {
    /// A single stationary segment at `position`
    pub fn new(position: Position, color: Rgb) -> Self {
        Self {
            body: vec![Tile::new(position, Heading::Stop, color)],
            pending_turns: HashMap::new(),
            color,
        }
    }

    /// Build a snake from explicit segments, head first. Returns `None` for an empty body.
    pub fn from_body(body: Vec<Tile>, color: Rgb) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            pending_turns: HashMap::new(),
            color,
        })
    }

    pub fn head(&self) -> &Tile {
        &self.body[0]
    }

    pub fn tail(&self) -> &Tile {
        &self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &[Tile] {
        &self.body
    }

    pub fn pending_turns(&self) -> &HashMap<Position, Heading> {
        &self.pending_turns
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept alongside `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().map(|tile| tile.position)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// Queue a turn at the head's cell. Reversing into the body is ignored.
    ///
    /// Returns whether the turn was recorded. A later request on the same
    /// cell replaces an earlier one.
    pub fn record_turn(&mut self, direction: Direction) -> bool {
        let heading = Heading::from(direction);
        let head = *self.head();
        if head.heading.is_opposite(heading) {
            trace!(?direction, current = ?head.heading, "reversal ignored");
            return false;
        }
        self.pending_turns.insert(head.position, heading);
        true
    }

    /// Move every segment one step
    pub fn advance(&mut self) {
        let last = self.body.len() - 1;
        for (index, segment) in self.body.iter_mut().enumerate() {
            let position = segment.position;
            match self.pending_turns.get(&position).copied() {
                Some(heading) => {
                    segment.move_toward(heading);
                    if index == last {
                        self.pending_turns.remove(&position);
                    }
                }
                None => segment.move_toward(segment.heading),
            }
        }
    }

    /// The cell a new tail would be placed on by [`Snake::grow`]
    pub fn growth_position(&self) -> Position {
        let tail = self.tail();
        tail.position.moved_toward(tail.heading.opposite())
    }

    /// Append a segment one step behind the tail, facing the same way
    pub fn grow(&mut self) {
        let tile = Tile::new(self.growth_position(), self.tail().heading, self.color);
        self.body.push(tile);
    }

    /// True iff two distinct segments share a cell
    pub fn has_self_collision(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.positions().all(|pos| seen.insert(pos))
    }
}

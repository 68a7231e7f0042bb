use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    config::{FOOD_PLACEMENT_ATTEMPTS, GameConfig},
    heading::Direction,
    snake::Snake,
    state::{Position, Rgb, Tile, palette},
};

/// What ended an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// A segment left the grid
    OutOfBounds,
    /// Two segments share a cell
    SelfCollision,
}

/// Report emitted when an episode ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    /// Number of segments at the moment the episode ended
    pub score: usize,
    pub cause: CollisionType,
    pub message: String,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake covered the food this tick
    pub ate_food: bool,
    /// Set when the episode ended; the game has already been reset
    pub game_over: Option<GameOver>,
}

/// One tile as the renderer should draw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileView {
    pub position: Position,
    pub color: Rgb,
    /// Draw eyes on this tile (the snake's head only)
    pub eyes: bool,
}

/// Read-only render data for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub columns: i32,
    pub rows: i32,
    /// Snake segments, head first
    pub snake: Vec<TileView>,
    /// Absent while the snake fills every interior cell
    pub food: Option<TileView>,
    pub score: usize,
    pub steps: u32,
}

/// Owns the snake and the food and advances them one tick at a time
pub struct SnakeGame {
    config: GameConfig,
    snake: Snake,
    /// `None` after the food is eaten with no free cell to respawn on
    food: Option<Tile>,
    steps: u32,
    rng: StdRng,
}

impl SnakeGame {
    /// Create a game with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create a game whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, rng: StdRng) -> Self {
        let snake = Snake::new(config.start_position(), palette::SNAKE);
        let mut game = Self {
            food: None,
            config,
            snake,
            steps: 0,
            rng,
        };
        game.reset();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<&Tile> {
        self.food.as_ref()
    }

    /// Ticks since the episode started
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Current score, the number of segments
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    /// Start a new episode with a fresh snake and fresh food
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.config.start_position(), palette::SNAKE);
        self.steps = 0;
        // A fresh grid always has free interior cells
        self.food = self.pick_food_position().map(Tile::food);
        debug!(food = ?self.food.map(|f| f.position), "new episode");
    }

    /// Advance the game by one step
    pub fn tick(&mut self, input: Option<Direction>) -> TickResult {
        if let Some(direction) = input {
            self.snake.record_turn(direction);
        }

        self.snake.advance();
        self.steps += 1;

        let out_of_bounds = self.is_out_of_bounds();
        let ate_food = self.on_food();
        let self_collision = self.snake.has_self_collision();

        if ate_food {
            self.food = self.pick_food_position().map(Tile::food);
            if self.food.is_none() {
                warn!("no free cell left for food");
            }
            self.snake.grow();
            debug!(length = self.snake.len(), food = ?self.food.map(|f| f.position), "food eaten");
        } else if self.food.is_none() {
            self.food = self.pick_food_position().map(Tile::food);
        }

        let cause = if out_of_bounds {
            Some(CollisionType::OutOfBounds)
        } else if self_collision {
            Some(CollisionType::SelfCollision)
        } else {
            None
        };

        let game_over = cause.map(|cause| {
            let score = self.snake.len();
            info!(score, ?cause, steps = self.steps, "game over");
            self.reset();
            GameOver {
                score,
                cause,
                message: format!("Game over! Score: {score}"),
            }
        });

        TickResult {
            ate_food,
            game_over,
        }
    }

    /// True iff any segment lies outside the grid
    pub fn is_out_of_bounds(&self) -> bool {
        self.snake.positions().any(|pos| !self.config.is_in_bounds(pos))
    }

    /// True iff there is food and any segment covers it
    pub fn on_food(&self) -> bool {
        self.food
            .is_some_and(|food| self.snake.occupies(food.position))
    }

    /// Pick a free interior cell for the food
    ///
    /// Cells covered by the snake, or about to be covered by its next
    /// growth, are never chosen. Returns `None` only when the interior is
    /// completely full.
    pub fn pick_food_position(&mut self) -> Option<Position> {
        let columns = self.config.columns();
        let rows = self.config.rows();
        let grown_tail = self.snake.growth_position();
        let is_free = |snake: &Snake, pos: Position| !snake.occupies(pos) && pos != grown_tail;

        for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
            let pos = Position::new(
                self.rng.gen_range(1..columns - 1),
                self.rng.gen_range(1..rows - 1),
            );
            if is_free(&self.snake, pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = self
            .config
            .interior()
            .filter(|&pos| is_free(&self.snake, pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    /// Render data for the current state
    pub fn snapshot(&self) -> Snapshot {
        let snake = self
            .snake
            .body()
            .iter()
            .enumerate()
            .map(|(index, tile)| TileView {
                position: tile.position,
                color: tile.color,
                eyes: index == 0,
            })
            .collect();

        Snapshot {
            columns: self.config.columns(),
            rows: self.config.rows(),
            snake,
            food: self.food.map(|food| TileView {
                position: food.position,
                color: food.color,
                eyes: false,
            }),
            score: self.score(),
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::heading::Heading;

    fn game() -> SnakeGame {
        SnakeGame::with_seed(GameConfig::standard().unwrap(), 7)
    }

    fn small_game() -> SnakeGame {
        // 5x5 grid, 3x3 interior
        SnakeGame::with_seed(GameConfig::new(50, 50, 10, 12).unwrap(), 7)
    }

    fn body(cells: &[(i32, i32)], heading: Heading) -> Snake {
        let tiles = cells
            .iter()
            .map(|&(x, y)| Tile::new(Position::new(x, y), heading, palette::SNAKE))
            .collect();
        Snake::from_body(tiles, palette::SNAKE).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = game();
        let rows = game.config().rows();
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.snake().head().position, Position::new(1, rows - 2));
        assert_eq!(game.snake().head().heading, Heading::Stop);
        assert_eq!(game.steps(), 0);
        assert!(!game.snake().occupies(game.food().unwrap().position));
        assert_eq!(game.food().unwrap().heading, Heading::Stop);
    }

    #[test]
    fn test_idle_snake_does_not_move() {
        let mut game = game();
        let start = game.snake().head().position;
        let result = game.tick(None);
        assert!(result.game_over.is_none());
        assert_eq!(game.snake().head().position, start);
        assert_eq!(game.steps(), 1);
    }

    #[test]
    fn test_moves_right_and_keeps_going() {
        let mut game = game();
        let rows = game.config().rows();
        game.food = Some(Tile::food(Position::new(20, 5)));

        game.tick(Some(Direction::Right));
        assert_eq!(game.snake().head().position, Position::new(2, rows - 2));

        for _ in 0..5 {
            let result = game.tick(None);
            assert!(result.game_over.is_none());
        }
        assert_eq!(game.snake().head().position, Position::new(7, rows - 2));
        assert_eq!(game.snake().len(), 1);
    }

    #[test]
    fn test_eating_food() {
        let mut game = game();
        let rows = game.config().rows();
        game.food = Some(Tile::food(Position::new(2, rows - 2)));

        let result = game.tick(Some(Direction::Right));

        assert!(result.ate_food);
        assert!(result.game_over.is_none());
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake().tail().position, Position::new(1, rows - 2));
        assert_ne!(game.food().unwrap().position, Position::new(2, rows - 2));
        assert!(!game.snake().occupies(game.food().unwrap().position));
    }

    #[test]
    fn test_food_under_body_segment_also_counts() {
        let mut game = game();
        game.snake = body(&[(10, 10), (9, 10), (8, 10)], Heading::Right);
        // After advancing, the tail lands on (9, 10)
        game.food = Some(Tile::food(Position::new(9, 10)));

        let result = game.tick(None);

        assert!(result.ate_food);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.snake().tail().position, Position::new(8, 10));
    }

    #[test]
    fn test_on_food_head_and_body() {
        let mut game = game();
        game.snake = body(&[(10, 10), (9, 10), (8, 10)], Heading::Right);

        game.food = Some(Tile::food(Position::new(10, 10)));
        assert!(game.on_food());
        game.food = Some(Tile::food(Position::new(8, 10)));
        assert!(game.on_food());
        game.food = Some(Tile::food(Position::new(11, 10)));
        assert!(!game.on_food());
    }

    #[test]
    fn test_out_of_bounds_edges() {
        let mut game = game();
        let columns = game.config().columns();
        let rows = game.config().rows();

        game.snake = body(&[(columns - 1, 5)], Heading::Right);
        assert!(!game.is_out_of_bounds());
        game.snake = body(&[(columns, 5)], Heading::Right);
        assert!(game.is_out_of_bounds());
        game.snake = body(&[(5, rows)], Heading::Down);
        assert!(game.is_out_of_bounds());
        game.snake = body(&[(-1, 5)], Heading::Left);
        assert!(game.is_out_of_bounds());
        game.snake = body(&[(5, -1)], Heading::Up);
        assert!(game.is_out_of_bounds());
    }

    #[test]
    fn test_leaving_grid_resets() {
        let mut game = game();
        let columns = game.config().columns();
        let rows = game.config().rows();
        game.food = Some(Tile::food(Position::new(1, 1)));

        game.tick(Some(Direction::Right));
        let mut ended = None;
        for _ in 0..columns {
            let result = game.tick(None);
            if let Some(game_over) = result.game_over {
                ended = Some(game_over);
                break;
            }
        }

        let game_over = ended.expect("snake should have left the grid");
        assert_eq!(game_over.cause, CollisionType::OutOfBounds);
        assert_eq!(game_over.score, 1);
        assert_eq!(game_over.message, "Game over! Score: 1");

        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.snake().head().position, Position::new(1, rows - 2));
        assert_eq!(game.snake().head().heading, Heading::Stop);
        assert!(game.snake().pending_turns().is_empty());
        assert_eq!(game.steps(), 0);
    }

    #[test]
    fn test_reaching_column_count_ends_episode() {
        let mut game = game();
        let columns = game.config().columns();
        game.snake = body(&[(columns - 1, 5)], Heading::Right);
        game.food = Some(Tile::food(Position::new(1, 1)));

        let result = game.tick(None);

        assert_eq!(
            result.game_over.map(|g| g.cause),
            Some(CollisionType::OutOfBounds)
        );
        assert_eq!(game.snake().len(), 1);
    }

    #[test]
    fn test_self_collision_ends_episode() {
        let mut game = game();
        game.food = Some(Tile::food(Position::new(1, 1)));
        let mut snake = body(&[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4)], Heading::Up);
        // Head turns left onto (4, 5) as the third segment moves up onto it
        snake.record_turn(Direction::Left);
        game.snake = snake;

        let result = game.tick(None);

        assert_eq!(
            result.game_over.map(|g| g.cause),
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(game.snake().len(), 1);
    }

    #[test]
    fn test_growth_applies_on_terminal_tick() {
        let mut game = game();
        let columns = game.config().columns();
        game.snake = body(&[(columns - 1, 5), (columns - 2, 5)], Heading::Right);
        // Second segment steps onto the food while the head leaves the grid
        game.food = Some(Tile::food(Position::new(columns - 1, 5)));

        let result = game.tick(None);

        assert!(result.ate_food);
        let game_over = result.game_over.unwrap();
        assert_eq!(game_over.score, 3);
        assert_eq!(game_over.cause, CollisionType::OutOfBounds);
    }

    #[test]
    fn test_reversal_is_ignored_during_tick() {
        let mut game = game();
        game.food = Some(Tile::food(Position::new(1, 1)));
        game.snake = body(&[(10, 10), (9, 10)], Heading::Right);

        game.tick(Some(Direction::Left));

        assert!(game.snake().pending_turns().is_empty());
        assert_eq!(game.snake().head().position, Position::new(11, 10));
        assert_eq!(game.snake().head().heading, Heading::Right);
    }

    #[test]
    fn test_length_never_zero() {
        let mut game = game();
        let inputs = [
            Some(Direction::Up),
            None,
            Some(Direction::Right),
            None,
            Some(Direction::Down),
            Some(Direction::Left),
            None,
        ];
        for i in 0..500 {
            game.tick(inputs[i % inputs.len()]);
            assert!(game.snake().len() >= 1);
        }
    }

    #[test]
    fn test_food_placement_avoids_snake() {
        let mut game = small_game();
        // Interior is (1..=3, 1..=3); cover all but (3, 3)
        game.snake = body(
            &[
                (1, 1),
                (2, 1),
                (3, 1),
                (3, 2),
                (2, 2),
                (1, 2),
                (1, 3),
                (2, 3),
            ],
            Heading::Right,
        );
        for _ in 0..20 {
            assert_eq!(game.pick_food_position(), Some(Position::new(3, 3)));
        }
    }

    #[test]
    fn test_food_placement_skips_growth_cell() {
        let mut game = small_game();
        // Tail at (2, 3) heading left grows into (3, 3)
        game.snake = body(
            &[
                (1, 1),
                (2, 1),
                (3, 1),
                (3, 2),
                (2, 2),
                (1, 2),
                (2, 3),
            ],
            Heading::Left,
        );
        for _ in 0..20 {
            assert_eq!(game.pick_food_position(), Some(Position::new(1, 3)));
        }
    }

    #[test]
    fn test_full_interior_yields_none() {
        let mut game = small_game();
        game.snake = body(
            &[
                (1, 1),
                (2, 1),
                (3, 1),
                (3, 2),
                (2, 2),
                (1, 2),
                (1, 3),
                (2, 3),
                (3, 3),
            ],
            Heading::Left,
        );
        assert_eq!(game.pick_food_position(), None);
    }

    #[test]
    fn test_food_eaten_on_full_interior_is_consumed() {
        let mut game = small_game();
        // Head enters (3, 3) from the border, stationary segments cover the
        // rest of the interior and the tail runs down the left border.
        let mut tiles = vec![Tile::new(Position::new(4, 3), Heading::Left, palette::SNAKE)];
        for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2), (2, 2), (3, 2), (1, 3), (2, 3)] {
            tiles.push(Tile::new(Position::new(x, y), Heading::Stop, palette::SNAKE));
        }
        tiles.push(Tile::new(Position::new(0, 1), Heading::Down, palette::SNAKE));
        game.snake = Snake::from_body(tiles, palette::SNAKE).unwrap();
        game.food = Some(Tile::food(Position::new(3, 3)));

        let result = game.tick(None);

        assert!(result.ate_food);
        assert!(result.game_over.is_none());
        assert_eq!(game.snake().len(), 11);
        assert!(game.food().is_none());
        // The eaten food cannot be eaten again
        assert!(!game.on_food());
        assert!(game.snapshot().food.is_none());
    }

    #[test]
    fn test_missing_food_is_placed_once_a_cell_frees_up() {
        let mut game = game();
        game.snake = body(&[(10, 10), (9, 10)], Heading::Right);
        game.food = None;

        let result = game.tick(None);

        assert!(!result.ate_food);
        assert_eq!(game.snake().len(), 2);
        let food = game.food().unwrap();
        assert!(!game.snake().occupies(food.position));
    }

    #[test]
    fn test_food_stays_in_interior() {
        let mut game = game();
        let columns = game.config().columns();
        let rows = game.config().rows();
        for _ in 0..200 {
            let pos = game.pick_food_position().unwrap();
            assert!(pos.x >= 1 && pos.x <= columns - 2);
            assert!(pos.y >= 1 && pos.y <= rows - 2);
            assert!(!game.snake().occupies(pos));
        }
    }

    #[test]
    fn test_seeded_games_match() {
        let config = GameConfig::standard().unwrap();
        let a = SnakeGame::with_seed(config.clone(), 42);
        let b = SnakeGame::with_seed(config, 42);
        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn test_snapshot() {
        let mut game = game();
        game.snake = body(&[(10, 10), (9, 10)], Heading::Right);
        game.food = Some(Tile::food(Position::new(4, 4)));

        let snapshot = game.snapshot();

        assert_eq!(snapshot.columns, 34);
        assert_eq!(snapshot.rows, 24);
        assert_eq!(snapshot.score, 2);
        assert_eq!(snapshot.snake.len(), 2);
        assert!(snapshot.snake[0].eyes);
        assert!(!snapshot.snake[1].eyes);
        assert_eq!(snapshot.snake[0].color, palette::RED);
        let food = snapshot.food.unwrap();
        assert_eq!(food.position, Position::new(4, 4));
        assert_eq!(food.color, palette::GREEN);
        assert!(!food.eyes);
    }
}

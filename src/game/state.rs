use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one cell in a direction. The result may lie off the grid.
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments in movement order, head at index 0. Never empty.
    pub(crate) body: Vec<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Self {
        let body: Vec<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body }
    }

    /// Segments head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if a position is covered by any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front. When `grow` is false the tail is dropped so
    /// the length stays the same.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the grid
    Wall,
    /// Head ran into the snake's own body
    SelfCollision,
}

/// The two phases a game moves between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub game_over: bool,
    pub grid_size: i32,
}

impl GameState {
    /// Create a fresh running game
    pub fn new(snake: Snake, food: Position, direction: Direction, grid_size: i32) -> Self {
        Self {
            snake,
            food,
            direction,
            score: 0,
            game_over: false,
            grid_size,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Running
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.grid_size).contains(&pos.x) && (0..self.grid_size).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_in_direction(Direction::Right), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_moving_off_the_grid_is_representable() {
        let pos = Position::new(0, 0);
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(-1, 0));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(0, -1));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5));

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.segments(), [Position::new(6, 5)]);

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.segments(), [Position::new(7, 5), Position::new(6, 5)]);

        snake.advance(Position::new(7, 6), false);
        assert_eq!(snake.segments(), [Position::new(7, 6), Position::new(7, 5)]);
    }

    #[test]
    fn test_occupies_includes_head_and_tail() {
        let snake = Snake::from_segments([
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(1, 3),
        ]);
        assert_eq!(snake.head(), Position::new(3, 3));
        assert_eq!(snake.segments().last(), Some(&Position::new(1, 3)));
        assert!(snake.occupies(Position::new(3, 3)));
        assert!(snake.occupies(Position::new(1, 3)));
        assert!(!snake.occupies(Position::new(0, 3)));
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn test_empty_snake_rejected() {
        Snake::from_segments(Vec::<Position>::new());
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5)),
            Position::new(10, 10),
            Direction::Right,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_phase_follows_game_over_flag() {
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5)),
            Position::new(1, 1),
            Direction::Up,
            10,
        );
        assert_eq!(state.phase(), Phase::Running);
        state.game_over = true;
        assert_eq!(state.phase(), Phase::GameOver);
    }
}

use super::{
    action::Direction,
    config::{FoodPlacement, GameConfig},
    state::{Collision, GameState, Position, Snake},
};
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snake moved one cell, length unchanged
    Moved,
    /// Snake moved onto the food and grew by one segment
    Ate,
    /// Snake hit a wall or itself; the game is now over
    Collided(Collision),
    /// The game was already over, nothing changed
    Halted,
}

impl TickOutcome {
    pub fn ended_game(&self) -> bool {
        matches!(self, TickOutcome::Collided(_))
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration. The RNG is
    /// seeded from `config.seed` when present.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial game state from the configuration
    pub fn reset(&self) -> GameState {
        GameState::new(
            Snake::new(self.config.initial_head),
            self.config.initial_food,
            self.config.initial_direction,
            self.config.grid_size,
        )
    }

    /// Change the direction of travel. Applied on the next tick; reversing
    /// into the body is allowed.
    pub fn set_direction(&self, state: &mut GameState, direction: Direction) {
        state.direction = direction;
    }

    /// Advance the game by one cell
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if state.game_over {
            return TickOutcome::Halted;
        }

        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision) = self.check_collision(state, new_head) {
            debug!(
                "collision {:?} at ({}, {}) with score {}",
                collision, new_head.x, new_head.y, state.score
            );
            state.game_over = true;
            return TickOutcome::Collided(collision);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(&state.snake);
            debug!(
                "ate food, score {}, next food at ({}, {})",
                state.score, state.food.x, state.food.y
            );
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Check if the new head position causes a collision. The current tail
    /// still counts as body.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<Collision> {
        if !state.is_in_bounds(pos) {
            return Some(Collision::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(Collision::SelfCollision);
        }

        None
    }

    fn spawn_food(&mut self, snake: &Snake) -> Position {
        match self.config.food_placement {
            FoodPlacement::Anywhere => self.random_cell(),
            FoodPlacement::AvoidSnake => {
                let size = self.config.grid_size;
                let free: Vec<Position> = (0..size)
                    .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
                    .filter(|pos| !snake.occupies(*pos))
                    .collect();
                // a snake covering the whole grid leaves nowhere free
                match free.choose(&mut self.rng) {
                    Some(pos) => *pos,
                    None => self.random_cell(),
                }
            }
        }
    }

    /// x and y drawn independently and uniformly over the grid
    fn random_cell(&mut self) -> Position {
        let size = self.config.grid_size;
        Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size))
    }
}

//! Running/GameOver state machine between the engine and the terminal loop
//!
//! Everything here is synchronous so it can be exercised without a terminal.
//! The play loop feeds it ticks and input actions in arrival order.

use log::info;

use crate::game::{GameConfig, GameEngine, GameState, Phase, TickOutcome};
use crate::input::InputAction;
use crate::metrics::SessionMetrics;

/// What the play loop should do after an input action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A new game began; the tick timer should start a fresh period
    Restarted,
    Quit,
}

pub struct Session {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let engine = GameEngine::new(config);
        let state = engine.reset();
        info!(
            "new game on a {0}x{0} grid, tick every {1} ms",
            state.grid_size,
            engine.config().tick_interval_ms
        );

        Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut SessionMetrics {
        &mut self.metrics
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Advance the game by one tick. A no-op once the game is over.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick(&mut self.state);
        self.metrics.on_tick(outcome);

        if outcome.ended_game() {
            self.metrics.on_game_over(self.state.score);
            info!(
                "game over ({:?}) with score {}, best this session {}",
                outcome, self.state.score, self.metrics.best_score
            );
        }

        outcome
    }

    pub fn handle_action(&mut self, action: InputAction) -> Flow {
        match (action, self.state.phase()) {
            (InputAction::Quit, _) => return Flow::Quit,
            (InputAction::Turn(direction), Phase::Running) => {
                self.engine.set_direction(&mut self.state, direction);
            }
            (InputAction::Restart, Phase::GameOver) => {
                self.restart();
                return Flow::Restarted;
            }
            // turning while dead and restarting mid-game do nothing
            (InputAction::Turn(_), Phase::GameOver)
            | (InputAction::Restart, Phase::Running)
            | (InputAction::None, _) => {}
        }

        Flow::Continue
    }

    fn restart(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        info!("restarted, game {}", self.metrics.games_played + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Collision, Direction, Position};

    fn session() -> Session {
        Session::new(GameConfig {
            seed: Some(11),
            ..Default::default()
        })
    }

    /// Head from (10,10) going right hits the wall after ten moves
    fn run_into_right_wall(session: &mut Session) {
        for _ in 0..9 {
            assert_eq!(session.tick(), TickOutcome::Moved);
        }
        assert_eq!(session.tick(), TickOutcome::Collided(Collision::Wall));
    }

    #[test]
    fn test_session_starts_running() {
        let session = session();
        assert_eq!(session.state().phase(), Phase::Running);
        assert_eq!(session.state().snake.segments(), [Position::new(10, 10)]);
        assert_eq!(session.metrics().games_played, 0);
    }

    #[test]
    fn test_turn_while_running() {
        let mut session = session();
        assert_eq!(
            session.handle_action(InputAction::Turn(Direction::Down)),
            Flow::Continue
        );
        session.tick();
        assert_eq!(session.state().snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_collision_moves_to_game_over() {
        let mut session = session();
        run_into_right_wall(&mut session);

        assert_eq!(session.state().phase(), Phase::GameOver);
        assert_eq!(session.state().snake.head(), Position::new(19, 10));
        assert_eq!(session.metrics().games_played, 1);
    }

    #[test]
    fn test_nothing_but_restart_works_after_game_over() {
        let mut session = session();
        run_into_right_wall(&mut session);
        let frozen = session.state().clone();

        assert_eq!(session.tick(), TickOutcome::Halted);
        session.handle_action(InputAction::Turn(Direction::Up));
        session.handle_action(InputAction::None);
        assert_eq!(session.state(), &frozen);
        assert_eq!(session.metrics().games_played, 1);

        assert_eq!(
            session.handle_action(InputAction::Restart),
            Flow::Restarted
        );
        assert_eq!(session.state().phase(), Phase::Running);
        assert_eq!(session.state(), &GameEngine::new(GameConfig::default()).reset());
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = session();
        session.tick();
        let before = session.state().clone();

        assert_eq!(
            session.handle_action(InputAction::Restart),
            Flow::Continue
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_quit_from_either_phase() {
        let mut session = session();
        assert_eq!(session.handle_action(InputAction::Quit), Flow::Quit);

        run_into_right_wall(&mut session);
        assert_eq!(session.handle_action(InputAction::Quit), Flow::Quit);
    }

    #[test]
    fn test_best_score_survives_restart() {
        let mut session = session();
        session.state.food = Position::new(11, 10);
        assert_eq!(session.tick(), TickOutcome::Ate);

        // now length 2 heading right; reversing runs into the body
        session.handle_action(InputAction::Turn(Direction::Left));
        assert_eq!(
            session.tick(),
            TickOutcome::Collided(Collision::SelfCollision)
        );
        assert_eq!(session.metrics().best_score, 1);

        session.handle_action(InputAction::Restart);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.metrics().best_score, 1);
    }
}

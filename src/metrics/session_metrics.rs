use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Counters for one play session. Nothing here outlives the process.
pub struct SessionMetrics {
    /// When the current game started
    pub game_started: Instant,
    /// Frozen once the game ends so the clock stops on the game over screen
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    /// Ticks survived in the current game
    pub ticks: u32,
    running: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            ticks: 0,
            running: true,
        }
    }

    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.game_started.elapsed();
        }
    }

    pub fn on_tick(&mut self, outcome: TickOutcome) {
        if matches!(outcome, TickOutcome::Moved | TickOutcome::Ate) {
            self.ticks += 1;
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

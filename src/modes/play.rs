use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::GameConfig;
use crate::input::{InputAction, InputHandler};
use crate::render::{ControlLayout, Renderer};
use crate::session::{Flow, Session};

/// Frame period for redraws, independent of the game tick
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct PlayMode {
    session: Session,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Where the clickable controls were drawn in the latest frame
    controls: ControlLayout,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: Session::new(config),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            controls: ControlLayout::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        let mut terminal = match setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                if let Err(cleanup_err) = restore_terminal(&mut stderr()) {
                    warn!("terminal restore after failed setup: {cleanup_err:#}");
                }
                return Err(err);
            }
        };

        // The loop owns the timers and the event stream; returning drops them
        let result = self.run_game_loop(&mut terminal).await;

        let cleanup = restore_terminal(terminal.backend_mut());

        info!(
            "session ended after {} games, best score {}",
            self.session.metrics().games_played,
            self.session.metrics().best_score
        );

        // a loop error outranks a cleanup error
        if let (Err(_), Err(cleanup_err)) = (&result, &cleanup) {
            warn!("terminal restore after loop error: {cleanup_err:#}");
        }
        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_period = Duration::from_millis(self.session.config().tick_interval_ms);
        let mut tick_timer = tick_timer(tick_period);

        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => match self.handle_event(event) {
                            Flow::Continue => {}
                            Flow::Restarted => tick_timer.reset(),
                            Flow::Quit => self.should_quit = true,
                        },
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => {
                            warn!("terminal event stream closed");
                            self.should_quit = true;
                        }
                    }
                }

                _ = tick_timer.tick() => {
                    self.session.tick();
                }

                _ = render_timer.tick() => {
                    self.session.metrics_mut().update();
                    let session = &self.session;
                    let renderer = &self.renderer;
                    let mut controls = ControlLayout::default();
                    terminal.draw(|frame| {
                        controls = renderer.render(frame, session.state(), session.metrics());
                    }).context("Failed to draw frame")?;
                    self.controls = controls;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Flow {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse, &self.controls),
            _ => InputAction::None,
        };

        self.session.handle_action(action)
    }
}

/// Game tick timer. The first tick comes one full period after creation, so
/// the first frame shows the starting position.
fn tick_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Undo every terminal change. All steps run even when one fails; the first
/// failure is returned.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    let steps = [
        disable_raw_mode().context("Failed to disable raw mode"),
        execute!(out, DisableMouseCapture, LeaveAlternateScreen)
            .context("Failed to leave alternate screen"),
        execute!(out, Show).context("Failed to show cursor"),
    ];
    steps.into_iter().collect()
}

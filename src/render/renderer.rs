use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::controls::ControlLayout;
use crate::game::{Direction, GameState, Position};
use crate::metrics::SessionMetrics;

const BUTTON_WIDTH: u16 = 7;
const RESTART_WIDTH: u16 = 15;
const GAME_OVER_WIDTH: u16 = 36;
const GAME_OVER_HEIGHT: u16 = 10;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame and report where the clickable controls ended up
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &SessionMetrics,
    ) -> ControlLayout {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(state, metrics), header);

        let mut controls = ControlLayout::default();

        // Each cell is two columns wide, plus the border
        let side = u16::try_from(state.grid_size.max(0)).unwrap_or(u16::MAX);
        let grid_area = centered(
            body,
            side.saturating_mul(2).saturating_add(2),
            side.saturating_add(2),
        );
        frame.render_widget(self.render_grid(state), grid_area);

        if state.game_over {
            let panel = centered(body, GAME_OVER_WIDTH, GAME_OVER_HEIGHT);
            controls.restart = Some(self.render_game_over(frame, panel, state, metrics));
        }

        controls.directions = self.render_direction_buttons(frame, footer);
        controls
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_size.max(0) as usize);

        for y in 0..state.grid_size {
            let spans: Vec<Span> = (0..state.grid_size)
                .map(|x| {
                    let pos = Position::new(x, y);
                    if pos == head {
                        Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if state.snake.occupies(pos) {
                        Span::styled("□ ", Style::default().fg(Color::Green))
                    } else if pos == state.food {
                        Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &SessionMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
                Span::raw("    "),
                Span::styled("Best: ", label),
                Span::styled(metrics.best_score.to_string(), value),
                Span::raw("    "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), value),
            ]),
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    /// Returns the area of the restart button
    fn render_game_over(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &GameState,
        metrics: &SessionMetrics,
    ) -> Rect {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(area);
        let [text_area, button_row] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(inner);

        let text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        let [button] = Layout::horizontal([Constraint::Length(RESTART_WIDTH)])
            .flex(Flex::Center)
            .areas(button_row);

        frame.render_widget(ratatui::widgets::Clear, area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), text_area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("estart"),
            ]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Green)),
            ),
            button,
        );

        button
    }

    fn render_direction_buttons(&self, frame: &mut Frame, area: Rect) -> Vec<(Direction, Rect)> {
        let areas = Layout::horizontal([Constraint::Length(BUTTON_WIDTH); 4])
            .flex(Flex::Center)
            .spacing(1)
            .split(area);

        Direction::ALL
            .into_iter()
            .zip(areas.iter().copied())
            .map(|(direction, button)| {
                frame.render_widget(
                    Paragraph::new(direction.arrow())
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(Color::Cyan))
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_type(BorderType::Rounded),
                        ),
                    button,
                );
                (direction, button)
            })
            .collect()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position as ScreenPosition;

use crate::game::Direction;
use crate::render::ControlLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Turn(Direction),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            KeyCode::Up => InputAction::Turn(Direction::Up),
            KeyCode::Down => InputAction::Turn(Direction::Down),
            KeyCode::Left => InputAction::Turn(Direction::Left),
            KeyCode::Right => InputAction::Turn(Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => InputAction::Turn(Direction::Up),
                's' => InputAction::Turn(Direction::Down),
                'a' => InputAction::Turn(Direction::Left),
                'd' => InputAction::Turn(Direction::Right),
                'r' => InputAction::Restart,
                'q' => InputAction::Quit,
                _ => InputAction::None,
            },

            KeyCode::Esc => InputAction::Quit,

            _ => InputAction::None,
        }
    }

    /// Map a left click on one of the on-screen controls drawn last frame
    pub fn handle_mouse_event(&self, mouse: MouseEvent, controls: &ControlLayout) -> InputAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return InputAction::None;
        }

        let at = ScreenPosition::new(mouse.column, mouse.row);

        if let Some(direction) = controls.direction_at(at) {
            return InputAction::Turn(direction);
        }
        if controls.restart.is_some_and(|area| area.contains(at)) {
            return InputAction::Restart;
        }

        InputAction::None
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

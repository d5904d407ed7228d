use ratatui::layout::{Position, Rect};

use crate::game::Direction;

/// Screen areas of the clickable controls, as drawn in the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlLayout {
    pub directions: Vec<(Direction, Rect)>,
    /// Only drawn while the game is over
    pub restart: Option<Rect>,
}

impl ControlLayout {
    pub fn direction_at(&self, at: Position) -> Option<Direction> {
        self.directions
            .iter()
            .find(|(_, area)| area.contains(at))
            .map(|(direction, _)| *direction)
    }
}

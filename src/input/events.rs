use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Pointer gestures routed by the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single click/tap
    Click {
        position: Point,
        button: MouseButton,
    },
    /// Double click/tap
    DoubleClick { position: Point },
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl InputEvent {
    /// Gets the position associated with this event
    pub fn position(&self) -> Point {
        match self {
            InputEvent::Click { position, .. } => *position,
            InputEvent::DoubleClick { position } => *position,
        }
    }
}

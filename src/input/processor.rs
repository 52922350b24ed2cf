//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the transient input state (cursor
//! position, modifier keys) and is the only thing that sits between
//! raw window events and the engine's
//! [`execute`](crate::engine::ScatterEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::PlotCommand;

/// Converts raw window events into [`PlotCommand`]s.
///
/// The widget acts on button *press* (the pick happens where the cursor
/// is at that moment); cursor moves drive hover tooltips.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Default)]
pub struct InputProcessor {
    /// Last known cursor position in physical pixels.
    cursor: Vec2,
    /// Whether the multi-select modifier is currently held.
    ctrl_pressed: bool,
}

impl InputProcessor {
    /// New processor with no cursor history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether the multi-select modifier is held.
    #[must_use]
    pub fn ctrl_pressed(&self) -> bool {
        self.ctrl_pressed
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<PlotCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                Some(PlotCommand::Hover { pos: self.cursor })
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => Some(PlotCommand::Click {
                pos: self.cursor,
                toggle: self.ctrl_pressed,
            }),
            InputEvent::MouseButton { .. } => None,
            InputEvent::ModifiersChanged { ctrl } => {
                self.ctrl_pressed = ctrl;
                None
            }
        }
    }
}

use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::MouseButton;

/// Host-side mouse state for a single window.
///
/// Native mouse-button events do not carry a position, so the translation
/// layer remembers the last cursor position and which buttons are held. The
/// mouse counts as one pointer while any button is held.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Cursor position in logical pixels.
    pub cursor: Option<Vec2>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Records a press. Returns true when this is the first held button.
    pub fn press(&mut self, button: MouseButton) -> bool {
        let was_idle = self.buttons_down.is_empty();
        self.buttons_down.insert(button);
        was_idle
    }

    /// Records a release. Returns true when no button remains held.
    pub fn release(&mut self, button: MouseButton) -> bool {
        let removed = self.buttons_down.remove(&button);
        removed && self.buttons_down.is_empty()
    }

    /// Applies a focus change. Losing focus clears held buttons so they cannot
    /// stick; returns true when the mouse pointer was down.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        self.focused = focused;
        if focused {
            return false;
        }
        let was_down = !self.buttons_down.is_empty();
        self.buttons_down.clear();
        was_down
    }
}

use std::fmt;

use crate::coords::Vec2;

/// Identity of an active contact point.
///
/// The mouse is always [`PointerId::MOUSE`]; touch contacts are offset by one
/// so they can never collide with it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PointerId(pub u64);

impl PointerId {
    pub const MOUSE: PointerId = PointerId(0);

    #[inline]
    pub const fn touch(id: u64) -> Self {
        PointerId(id.wrapping_add(1))
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == PointerId::MOUSE {
            write!(f, "mouse")
        } else {
            write!(f, "touch#{}", self.0 - 1)
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Delta in pixels, converting line deltas with `line_height`.
    #[inline]
    pub fn to_pixels(self, line_height: f32) -> Vec2 {
        match self {
            MouseWheelDelta::Line { x, y } => Vec2::new(x * line_height, y * line_height),
            MouseWheelDelta::Pixel { x, y } => Vec2::new(x, y),
        }
    }
}

/// Platform-agnostic input events consumed by the viewport.
///
/// Positions are screen coordinates in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { id: PointerId, pos: Vec2 },
    PointerMove { id: PointerId, pos: Vec2 },
    PointerUp { id: PointerId },
    /// Contact lost without a release (touch cancel, focus loss).
    PointerCancel { id: PointerId },
    Wheel { delta: MouseWheelDelta, pos: Vec2 },
    /// Click synthesized by the host.
    Click { pos: Vec2 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_ids_never_alias_mouse() {
        assert_ne!(PointerId::touch(0), PointerId::MOUSE);
        assert_eq!(PointerId::touch(0).to_string(), "touch#0");
        assert_eq!(PointerId::MOUSE.to_string(), "mouse");
    }

    #[test]
    fn line_delta_scales_by_line_height() {
        let d = MouseWheelDelta::Line { x: 0.0, y: -2.0 };
        assert_eq!(d.to_pixels(20.0), Vec2::new(0.0, -40.0));
        let p = MouseWheelDelta::Pixel { x: 3.0, y: 4.0 };
        assert_eq!(p.to_pixels(20.0), Vec2::new(3.0, 4.0));
    }
}

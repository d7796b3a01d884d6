//! Option types shared by several plugins.

use std::str::FromStr;

use vista_engine::coords::Vec2;

use crate::error::Error;
use crate::state::ViewportState;

/// Smallest scale any handler may produce. Keeps the transform invertible.
pub const MIN_SCALE: f32 = 1e-4;

// ── Direction ─────────────────────────────────────────────────────────────

/// Axes a handler acts on.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    All,
    X,
    Y,
}

impl Direction {
    #[inline]
    pub fn has_x(self) -> bool {
        matches!(self, Direction::All | Direction::X)
    }

    #[inline]
    pub fn has_y(self) -> bool {
        matches!(self, Direction::All | Direction::Y)
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "xy" => Ok(Direction::All),
            "x" => Ok(Direction::X),
            "y" => Ok(Direction::Y),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

// ── Underflow ─────────────────────────────────────────────────────────────

/// Placement along one axis when the world is smaller than the screen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    /// Translation that places a span of `content` screen pixels inside
    /// `screen` pixels. `origin` is the world offset of the span's start,
    /// already scaled.
    pub(crate) fn place(self, screen: f32, content: f32, origin: f32) -> f32 {
        match self {
            Align::Start => -origin,
            Align::Center => (screen - content) / 2.0 - origin,
            Align::End => screen - content - origin,
        }
    }
}

/// Where to put an undersized world.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Underflow {
    pub x: Align,
    pub y: Align,
}

impl Underflow {
    pub const CENTER: Underflow = Underflow { x: Align::Center, y: Align::Center };
    pub const TOP_LEFT: Underflow = Underflow { x: Align::Start, y: Align::Start };
}

impl FromStr for Underflow {
    type Err = Error;

    /// Accepts `center`, or any combination of `top`/`bottom` and
    /// `left`/`right` separated by spaces or dashes (`top-left`, `bottom`).
    fn from_str(s: &str) -> Result<Self, Error> {
        let mut out = Underflow::CENTER;
        let lower = s.trim().to_ascii_lowercase();
        for token in lower.split(|c: char| c == '-' || c == '_' || c.is_whitespace()) {
            match token {
                "" | "center" => {}
                "left" => out.x = Align::Start,
                "right" => out.x = Align::End,
                "top" => out.y = Align::Start,
                "bottom" => out.y = Align::End,
                _ => return Err(Error::UnknownUnderflow(s.to_string())),
            }
        }
        Ok(out)
    }
}

// ── Sides ─────────────────────────────────────────────────────────────────

/// World edges a boundary handler enforces.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Sides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Sides {
    pub const ALL: Sides = Sides { left: true, right: true, top: true, bottom: true };
    pub const NONE: Sides = Sides { left: false, right: false, top: false, bottom: false };

    #[inline]
    pub fn horizontal(self) -> bool {
        self.left || self.right
    }

    #[inline]
    pub fn vertical(self) -> bool {
        self.top || self.bottom
    }
}

impl Default for Sides {
    fn default() -> Self {
        Sides::ALL
    }
}

impl FromStr for Sides {
    type Err = Error;

    /// Accepts `all`, `horizontal`, `vertical`, or a list of edge names.
    fn from_str(s: &str) -> Result<Self, Error> {
        let lower = s.trim().to_ascii_lowercase();
        let mut out = Sides::NONE;
        for token in lower.split(|c: char| c == ',' || c == '-' || c.is_whitespace()) {
            match token {
                "" => {}
                "all" => out = Sides::ALL,
                "horizontal" => {
                    out.left = true;
                    out.right = true;
                }
                "vertical" => {
                    out.top = true;
                    out.bottom = true;
                }
                "left" => out.left = true,
                "right" => out.right = true,
                "top" => out.top = true,
                "bottom" => out.bottom = true,
                _ => return Err(Error::UnknownSides(s.to_string())),
            }
        }
        Ok(out)
    }
}

// ── ZoomLimits ────────────────────────────────────────────────────────────

/// Bounds on how far zooming handlers may scale.
///
/// Width/height limits are in world units visible on screen and need a valid
/// screen size; they are skipped otherwise. Width/height corrections keep the
/// aspect ratio; scale limits clamp each axis independently.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ZoomLimits {
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
    pub min_scale: Option<f32>,
    pub max_scale: Option<f32>,
}

impl ZoomLimits {
    /// Returns `scale` adjusted to satisfy the limits.
    pub fn clamp(&self, vp: &ViewportState, scale: Vec2) -> Vec2 {
        let mut s = Vec2::new(scale.x.max(MIN_SCALE), scale.y.max(MIN_SCALE));

        if let Some(screen) = vp.screen_size().valid() {
            let width = |s: Vec2| screen.width / s.x;
            let height = |s: Vec2| screen.height / s.y;

            if let Some(min) = positive(self.min_width) {
                if width(s) < min {
                    s = s * ((screen.width / min) / s.x);
                }
            }
            if let Some(max) = positive(self.max_width) {
                if width(s) > max {
                    s = s * ((screen.width / max) / s.x);
                }
            }
            if let Some(min) = positive(self.min_height) {
                if height(s) < min {
                    s = s * ((screen.height / min) / s.y);
                }
            }
            if let Some(max) = positive(self.max_height) {
                if height(s) > max {
                    s = s * ((screen.height / max) / s.y);
                }
            }
        }

        if let Some(min) = positive(self.min_scale) {
            s.x = s.x.max(min);
            s.y = s.y.max(min);
        }
        if let Some(max) = positive(self.max_scale) {
            s.x = s.x.min(max);
            s.y = s.y.min(max);
        }

        Vec2::new(s.x.max(MIN_SCALE), s.y.max(MIN_SCALE))
    }
}

fn positive(v: Option<f32>) -> Option<f32> {
    v.filter(|v| *v > 0.0 && v.is_finite())
}

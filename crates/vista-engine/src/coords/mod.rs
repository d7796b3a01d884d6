//! Coordinate and geometry types shared by the viewport and its hosts.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware) for screen coordinates
//! - Origin top-left
//! - +X right, +Y down
//!
//! World coordinates use the same orientation; the viewport transform maps
//! one onto the other.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;

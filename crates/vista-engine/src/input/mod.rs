//! Input subsystem.
//!
//! Public API is platform-agnostic. Hosts translate their native events into
//! [`InputEvent`]s (see [`platform`] for the winit translation) and feed them to
//! the viewport, which tracks live contacts in a [`PointerSet`].

pub mod platform;

mod pointers;
mod state;
mod types;

pub use pointers::{Pointer, PointerSet};
pub use state::InputState;
pub use types::{InputEvent, MouseButton, MouseWheelDelta, PointerId};

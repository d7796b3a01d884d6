//! Time subsystem.
//!
//! Hosts own the frame scheduler; this module only measures it.
//! Intended usage:
//! - one `FrameClock` per viewport host loop
//! - call `tick()` once per frame and pass `FrameTime::elapsed_ms` to
//!   `Viewport::tick`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};

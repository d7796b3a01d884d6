//! Vista engine crate.
//!
//! Platform-agnostic building blocks shared by the viewport coordinator and
//! host applications: geometry, pointer input, frame timing and logging.

pub mod coords;
pub mod input;
pub mod logging;
pub mod time;

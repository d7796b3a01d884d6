//! Native event translation.
//!
//! Each submodule maps one windowing backend's events into [`InputEvent`]s.
//!
//! [`InputEvent`]: crate::input::InputEvent

pub mod winit;

//! Shared helpers for unit tests.

use vista_engine::coords::Vec2;
use vista_engine::input::{InputEvent, PointerId};

use crate::{Viewport, ViewportConfig};

/// Relative float comparison for values produced by chained transforms.
pub(crate) fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * a.abs().max(b.abs()).max(1.0)
}

/// 800×600 screen over a 1600×1200 world, no plugins.
pub(crate) fn harness() -> Viewport {
    Viewport::new(ViewportConfig::new(800.0, 600.0).world(1600.0, 1200.0))
}

pub(crate) fn down(vp: &mut Viewport, id: u64, x: f32, y: f32) {
    vp.dispatch(InputEvent::PointerDown { id: PointerId(id), pos: Vec2::new(x, y) });
}

pub(crate) fn move_to(vp: &mut Viewport, id: u64, x: f32, y: f32) {
    vp.dispatch(InputEvent::PointerMove { id: PointerId(id), pos: Vec2::new(x, y) });
}

pub(crate) fn up(vp: &mut Viewport, id: u64) {
    vp.dispatch(InputEvent::PointerUp { id: PointerId(id) });
}

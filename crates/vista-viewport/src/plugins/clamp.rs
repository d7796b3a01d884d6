use vista_engine::coords::Vec2;
use vista_engine::input::Pointer;

use crate::event::{Axis, MoveKind, ViewportEvent};
use crate::options::{Direction, Underflow};
use crate::plugin::{Behavior, WheelInput};
use crate::state::ViewportState;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClampOptions {
    pub direction: Direction,
    pub underflow: Underflow,
    /// World edges to clamp against. Unset edges use `0` and the world size.
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

/// Hard limit on how far the view can leave the world.
///
/// Runs after every other handler on every event and tick, so nothing can
/// leave the view outside the edges between frames.
#[derive(Debug, Clone, Default)]
pub struct Clamp {
    options: ClampOptions,
}

impl Clamp {
    pub fn new(options: ClampOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClampOptions {
        &self.options
    }

    /// Corrects the transform and records which axes needed it.
    pub fn apply(&self, vp: &mut ViewportState) {
        vp.engaged.clamped_x = false;
        vp.engaged.clamped_y = false;

        let screen = vp.screen_size();
        let world = vp.world_size();
        let s = vp.scale();
        let mut pos = vp.position();
        let opts = &self.options;

        let x = opts.direction.has_x() && screen.width > 0.0;
        let x_edges = (opts.left, opts.right, world.map(|w| w.width));
        if let (true, Some((lo, hi))) = (x, edges(x_edges)) {
            let span = (hi - lo) * s.x;
            let target = if span < screen.width {
                Some(opts.underflow.x.place(screen.width, span, lo * s.x))
            } else if vp.left() < lo {
                Some(-lo * s.x)
            } else if vp.right() > hi {
                Some(-hi * s.x + screen.width)
            } else {
                None
            };
            if let Some(tx) = target.filter(|tx| *tx != pos.x) {
                pos.x = tx;
                vp.engaged.clamped_x = true;
            }
        }

        let y = opts.direction.has_y() && screen.height > 0.0;
        let y_edges = (opts.top, opts.bottom, world.map(|w| w.height));
        if let (true, Some((lo, hi))) = (y, edges(y_edges)) {
            let span = (hi - lo) * s.y;
            let target = if span < screen.height {
                Some(opts.underflow.y.place(screen.height, span, lo * s.y))
            } else if vp.top() < lo {
                Some(-lo * s.y)
            } else if vp.bottom() > hi {
                Some(-hi * s.y + screen.height)
            } else {
                None
            };
            if let Some(ty) = target.filter(|ty| *ty != pos.y) {
                pos.y = ty;
                vp.engaged.clamped_y = true;
            }
        }

        if vp.engaged.clamped_x || vp.engaged.clamped_y {
            vp.set_position(pos);
            if vp.engaged.clamped_x {
                vp.emit(ViewportEvent::Moved { kind: MoveKind::Clamp(Axis::X) });
            }
            if vp.engaged.clamped_y {
                vp.emit(ViewportEvent::Moved { kind: MoveKind::Clamp(Axis::Y) });
            }
            log::trace!("clamp: position corrected to {pos:?}");
        }
    }
}

/// Resolves `(low, high)` for one axis; both must be known.
fn edges((lo, hi, extent): (Option<f32>, Option<f32>, Option<f32>)) -> Option<(f32, f32)> {
    let lo = lo.unwrap_or(0.0);
    let hi = hi.or(extent)?;
    (hi > lo).then_some((lo, hi))
}

impl Behavior for Clamp {
    fn on_down(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        self.apply(vp);
    }

    fn on_move(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        self.apply(vp);
    }

    fn on_up(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        self.apply(vp);
    }

    fn on_wheel(&mut self, vp: &mut ViewportState, _wheel: &WheelInput) {
        self.apply(vp);
    }

    fn on_tick(&mut self, vp: &mut ViewportState, _elapsed_ms: f32) {
        self.apply(vp);
    }

    fn on_resize(&mut self, vp: &mut ViewportState) {
        self.apply(vp);
    }

    fn on_reset(&mut self, vp: &mut ViewportState) {
        self.apply(vp);
    }

    fn on_remove(&mut self, vp: &mut ViewportState) {
        vp.engaged.clamped_x = false;
        vp.engaged.clamped_y = false;
    }
}

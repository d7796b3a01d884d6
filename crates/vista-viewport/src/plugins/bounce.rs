use vista_engine::coords::Vec2;
use vista_engine::input::Pointer;

use crate::ease::Ease;
use crate::event::{Axis, MoveKind, ViewportEvent};
use crate::options::{Sides, Underflow};
use crate::plugin::Behavior;
use crate::state::ViewportState;

/// Screen pixels within which a bounce target counts as reached.
const SETTLE_PX: f32 = 1e-3;

#[derive(Debug, Copy, Clone)]
pub struct BounceOptions {
    pub sides: Sides,
    /// Tween duration in milliseconds.
    pub time: f32,
    pub ease: Ease,
    /// Placement when the world is narrower or shorter than the screen.
    pub underflow: Underflow,
}

impl Default for BounceOptions {
    fn default() -> Self {
        Self {
            sides: Sides::ALL,
            time: 150.0,
            ease: Ease::InOutSine,
            underflow: Underflow::CENTER,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Tween {
    elapsed: f32,
    start: f32,
    end: f32,
}

/// Eases the view back inside the world after it was released past an edge.
#[derive(Debug, Clone, Default)]
pub struct Bounce {
    options: BounceOptions,
    x: Option<Tween>,
    y: Option<Tween>,
}

impl Bounce {
    pub fn new(options: BounceOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> &BounceOptions {
        &self.options
    }

    pub fn is_active(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Starts a tween on every axis that is out of bounds and not already
    /// owned by a gesture, momentum, or a running tween.
    pub fn check(&mut self, vp: &mut ViewportState) {
        if vp.engaged.gesture() {
            return;
        }
        let Some(oob) = vp.oob() else {
            return;
        };
        let pos = vp.position();
        let screen = vp.screen_size();
        let sides = self.options.sides;

        if self.x.is_none() && !vp.engaged.momentum_x && sides.horizontal() {
            let world_px = vp.screen_world_width().unwrap_or(0.0);
            let end = if world_px < screen.width {
                Some(self.options.underflow.x.place(screen.width, world_px, 0.0))
            } else if sides.left && oob.left {
                Some(0.0)
            } else if sides.right && oob.right {
                Some(-oob.corner_point.x)
            } else {
                None
            };
            if let Some(end) = end.filter(|e| (e - pos.x).abs() > SETTLE_PX) {
                self.x = Some(Tween { elapsed: 0.0, start: pos.x, end });
                vp.emit(ViewportEvent::BounceStart { axis: Axis::X });
                log::debug!("bounce: x {:.1} -> {:.1}", pos.x, end);
            }
        }

        if self.y.is_none() && !vp.engaged.momentum_y && sides.vertical() {
            let world_px = vp.screen_world_height().unwrap_or(0.0);
            let end = if world_px < screen.height {
                Some(self.options.underflow.y.place(screen.height, world_px, 0.0))
            } else if sides.top && oob.top {
                Some(0.0)
            } else if sides.bottom && oob.bottom {
                Some(-oob.corner_point.y)
            } else {
                None
            };
            if let Some(end) = end.filter(|e| (e - pos.y).abs() > SETTLE_PX) {
                self.y = Some(Tween { elapsed: 0.0, start: pos.y, end });
                vp.emit(ViewportEvent::BounceStart { axis: Axis::Y });
                log::debug!("bounce: y {:.1} -> {:.1}", pos.y, end);
            }
        }

        vp.engaged.bouncing = self.is_active();
    }

    /// Advances one tween; returns the new coordinate and whether it finished.
    fn advance(&self, tween: &mut Tween, elapsed_ms: f32) -> (f32, bool) {
        tween.elapsed += elapsed_ms;
        if self.options.time <= 0.0 || tween.elapsed >= self.options.time {
            return (tween.end, true);
        }
        let v = self.options.ease.interpolate(tween.start, tween.end, tween.elapsed / self.options.time);
        let done = (v - tween.end).abs() <= SETTLE_PX;
        (if done { tween.end } else { v }, done)
    }

    fn cancel(&mut self, vp: &mut ViewportState) {
        self.x = None;
        self.y = None;
        vp.engaged.bouncing = false;
    }
}

impl Behavior for Bounce {
    fn on_down(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        self.cancel(vp);
    }

    fn on_up(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        self.check(vp);
    }

    fn on_tick(&mut self, vp: &mut ViewportState, elapsed_ms: f32) {
        self.check(vp);
        if elapsed_ms <= 0.0 {
            return;
        }

        if let Some(mut tween) = self.x.take() {
            let (x, done) = self.advance(&mut tween, elapsed_ms);
            let p = vp.position();
            vp.set_position(Vec2::new(x, p.y));
            vp.emit(ViewportEvent::Moved { kind: MoveKind::Bounce(Axis::X) });
            if done {
                vp.emit(ViewportEvent::BounceEnd { axis: Axis::X });
            } else {
                self.x = Some(tween);
            }
        }
        if let Some(mut tween) = self.y.take() {
            let (y, done) = self.advance(&mut tween, elapsed_ms);
            let p = vp.position();
            vp.set_position(Vec2::new(p.x, y));
            vp.emit(ViewportEvent::Moved { kind: MoveKind::Bounce(Axis::Y) });
            if done {
                vp.emit(ViewportEvent::BounceEnd { axis: Axis::Y });
            } else {
                self.y = Some(tween);
            }
        }
        vp.engaged.bouncing = self.is_active();
    }

    fn on_resize(&mut self, vp: &mut ViewportState) {
        self.cancel(vp);
        self.check(vp);
    }

    fn on_reset(&mut self, vp: &mut ViewportState) {
        self.cancel(vp);
        self.check(vp);
    }

    fn on_remove(&mut self, vp: &mut ViewportState) {
        self.cancel(vp);
    }
}

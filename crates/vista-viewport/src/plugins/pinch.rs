use vista_engine::coords::Vec2;
use vista_engine::input::Pointer;

use crate::event::{MoveKind, ViewportEvent};
use crate::options::{Direction, ZoomLimits};
use crate::plugin::Behavior;
use crate::state::ViewportState;

/// Distances below this are treated as coincident contacts.
const MIN_SPREAD: f32 = 1e-3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PinchOptions {
    /// Zoom only; ignore movement of the midpoint.
    pub no_drag: bool,
    /// Multiplier on the spread ratio's deviation from one.
    pub percent: f32,
    /// Multiplier on midpoint travel.
    pub factor: f32,
    /// Zoom about this world point instead of the midpoint.
    pub center: Option<Vec2>,
    pub axis: Direction,
    pub limits: ZoomLimits,
}

impl Default for PinchOptions {
    fn default() -> Self {
        Self {
            no_drag: false,
            percent: 1.0,
            factor: 1.0,
            center: None,
            axis: Direction::All,
            limits: ZoomLimits::default(),
        }
    }
}

/// Two-pointer zoom and pan.
///
/// Each move zooms about the previous midpoint of the two contacts and then
/// carries that point to the new midpoint, so the content stays under the
/// fingers.
#[derive(Debug, Clone, Default)]
pub struct Pinch {
    options: PinchOptions,
    active: bool,
    pinching: bool,
}

impl Pinch {
    pub fn new(options: PinchOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> &PinchOptions {
        &self.options
    }

    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.options.limits = limits;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self, vp: &mut ViewportState) {
        self.active = false;
        vp.engaged.pinch = false;
        if self.pinching {
            self.pinching = false;
            vp.emit(ViewportEvent::PinchEnd);
            log::debug!("pinch: end");
        }
    }
}

impl Behavior for Pinch {
    fn on_down(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        if vp.pointers().len() >= 2 {
            self.active = true;
            vp.engaged.pinch = true;
        }
    }

    fn on_move(&mut self, vp: &mut ViewportState, pointer: &Pointer) {
        if !self.active {
            return;
        }
        let Some((a, b)) = vp.pointers().first_two() else {
            return;
        };
        if pointer.id != a.id && pointer.id != b.id {
            return;
        }

        // Spread before this move: the moving contact at its previous
        // position, the other where it is now.
        let (prev_a, prev_b) = if pointer.id == a.id { (a.prev, b.pos) } else { (a.pos, b.prev) };
        let last_spread = prev_a.distance(prev_b);
        let spread = a.pos.distance(b.pos);
        let last_point = prev_a.midpoint(prev_b);
        let point = a.pos.midpoint(b.pos);

        if !self.pinching {
            self.pinching = true;
            vp.emit(ViewportEvent::PinchStart);
            log::debug!("pinch: start");
        }

        if last_spread > MIN_SPREAD && spread > MIN_SPREAD && spread != last_spread {
            let change = (spread / last_spread - 1.0) * self.options.percent;
            let s = vp.scale();
            let axis = self.options.axis;
            let target = Vec2::new(
                if axis.has_x() { s.x * (1.0 + change) } else { s.x },
                if axis.has_y() { s.y * (1.0 + change) } else { s.y },
            );
            let scale = self.options.limits.clamp(vp, target);
            match self.options.center {
                Some(center) => vp.zoom_centered(scale, center),
                None => vp.zoom_about(scale, last_point),
            }
            vp.emit(ViewportEvent::Zoomed { kind: MoveKind::Pinch });
        }

        if !self.options.no_drag {
            vp.translate((point - last_point) * self.options.factor);
        }
        vp.emit(ViewportEvent::Moved { kind: MoveKind::Pinch });
    }

    fn on_up(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        if self.active && vp.pointers().len() < 2 {
            self.release(vp);
        }
    }

    fn on_remove(&mut self, vp: &mut ViewportState) {
        self.release(vp);
    }
}

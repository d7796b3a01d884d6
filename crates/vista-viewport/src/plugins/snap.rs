use vista_engine::coords::Vec2;
use vista_engine::input::Pointer;

use crate::event::{MoveKind, ViewportEvent};
use crate::plugin::{Behavior, PluginKind};
use crate::state::ViewportState;

/// World units within which the target counts as reached.
const ARRIVED: f32 = 1e-3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SnapOptions {
    /// World units per millisecond. Zero or negative disables movement.
    pub speed: f32,
    /// Snap the top-left corner to the target instead of the center.
    pub top_left: bool,
    /// Pause while pointers are down.
    pub interrupt: bool,
    pub remove_on_complete: bool,
    pub remove_on_interrupt: bool,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            top_left: false,
            interrupt: true,
            remove_on_complete: false,
            remove_on_interrupt: false,
        }
    }
}

/// Glides the view to a fixed world point at constant speed.
///
/// After arriving it stays armed: if something else moves the view away,
/// the glide resumes on the next idle tick.
#[derive(Debug, Clone)]
pub struct Snap {
    target: Vec2,
    options: SnapOptions,
    snapping: bool,
}

impl Snap {
    pub fn new(target: Vec2, options: SnapOptions) -> Self {
        Self { target, options, snapping: false }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    pub fn retarget(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn is_snapping(&self) -> bool {
        self.snapping
    }

    fn anchor(&self, vp: &ViewportState) -> Vec2 {
        if self.options.top_left { vp.corner() } else { vp.center() }
    }

    fn place(&self, vp: &mut ViewportState, at: Vec2) {
        if self.options.top_left {
            vp.set_corner(at);
        } else {
            vp.set_center(at);
        }
    }

    fn finish(&mut self, vp: &mut ViewportState) {
        if self.snapping {
            self.snapping = false;
            vp.engaged.snapping = false;
            vp.emit(ViewportEvent::SnapEnd);
            log::debug!("snap: reached {:?}", self.target);
        }
        if self.options.remove_on_complete {
            vp.request_removal(PluginKind::Snap);
        }
    }
}

impl Behavior for Snap {
    fn on_down(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        if !self.options.interrupt {
            return;
        }
        if self.options.remove_on_interrupt {
            vp.request_removal(PluginKind::Snap);
        }
        self.snapping = false;
        vp.engaged.snapping = false;
    }

    fn on_tick(&mut self, vp: &mut ViewportState, elapsed_ms: f32) {
        if self.options.interrupt && !vp.pointers().is_empty() {
            return;
        }
        if elapsed_ms <= 0.0 || self.options.speed <= 0.0 || !self.target.is_finite() {
            return;
        }

        let current = self.anchor(vp);
        let delta = self.target - current;
        let distance = delta.length();
        if distance <= ARRIVED.max(self.target.length() * 1e-6) {
            self.finish(vp);
            return;
        }
        if !self.snapping {
            self.snapping = true;
            vp.engaged.snapping = true;
            vp.emit(ViewportEvent::SnapStart);
            log::debug!("snap: heading to {:?}", self.target);
        }

        let step = self.options.speed * elapsed_ms;
        if step >= distance {
            self.place(vp, self.target);
            vp.emit(ViewportEvent::Moved { kind: MoveKind::Snap });
            self.finish(vp);
        } else {
            self.place(vp, current + delta * (step / distance));
            vp.emit(ViewportEvent::Moved { kind: MoveKind::Snap });
        }
    }

    fn on_remove(&mut self, vp: &mut ViewportState) {
        self.snapping = false;
        vp.engaged.snapping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{approx, down, harness, up};

    #[test]
    fn moves_at_constant_speed_without_overshoot() {
        let mut vp = harness();
        vp.move_center(0.0, 0.0);
        vp.snap(100.0, 100.0, SnapOptions::default());

        vp.tick(50.0);
        let c = vp.center();
        assert!(approx(c.length(), 50.0));
        assert!(approx(c.x, c.y));

        for _ in 0..10 {
            vp.tick(50.0);
        }
        let c = vp.center();
        assert!(approx(c.x, 100.0) && approx(c.y, 100.0));

        let events: Vec<_> = vp.drain_events().collect();
        assert!(events.contains(&ViewportEvent::SnapStart));
        assert_eq!(events.iter().filter(|e| **e == ViewportEvent::SnapEnd).count(), 1);
    }

    #[test]
    fn top_left_snaps_corner() {
        let mut vp = harness();
        vp.snap(10.0, 20.0, SnapOptions { top_left: true, speed: 100.0, ..Default::default() });
        vp.tick(16.0);
        let k = vp.corner();
        assert!(approx(k.x, 10.0) && approx(k.y, 20.0));
    }

    #[test]
    fn pauses_while_pressed() {
        let mut vp = harness();
        vp.move_center(0.0, 0.0);
        vp.snap(100.0, 0.0, SnapOptions::default());
        down(&mut vp, 0, 10.0, 10.0);
        vp.tick(50.0);
        assert!(approx(vp.center().x, 0.0));
        up(&mut vp, 0);
        vp.tick(50.0);
        assert!(approx(vp.center().x, 50.0));
    }

    #[test]
    fn remove_on_complete_uninstalls() {
        let mut vp = harness();
        vp.move_center(0.0, 0.0);
        vp.snap(10.0, 0.0, SnapOptions { remove_on_complete: true, ..Default::default() });
        vp.tick(50.0);
        assert!(!vp.has_plugin(PluginKind::Snap));
    }

    #[test]
    fn remove_on_interrupt_uninstalls_on_press() {
        let mut vp = harness();
        vp.snap(10.0, 0.0, SnapOptions { remove_on_interrupt: true, ..Default::default() });
        down(&mut vp, 0, 1.0, 1.0);
        assert!(!vp.has_plugin(PluginKind::Snap));
    }

    #[test]
    fn resumes_after_displacement() {
        let mut vp = harness();
        vp.move_center(0.0, 0.0);
        vp.snap(0.0, 0.0, SnapOptions::default());
        vp.tick(16.0);
        vp.move_center(30.0, 0.0);
        vp.tick(10.0);
        assert!(approx(vp.center().x, 20.0));
    }

    #[test]
    fn zero_speed_stays_put() {
        let mut vp = harness();
        vp.move_center(0.0, 0.0);
        vp.snap(100.0, 0.0, SnapOptions { speed: 0.0, ..Default::default() });
        vp.tick(50.0);
        assert!(approx(vp.center().x, 0.0));
    }
}

use std::collections::VecDeque;

use vista_engine::coords::Vec2;
use vista_engine::input::Pointer;

use crate::event::{MoveKind, ViewportEvent};
use crate::plugin::{Behavior, PluginKind};
use crate::state::ViewportState;

/// Only samples this recent count towards the release velocity.
const SAMPLE_WINDOW_MS: f64 = 100.0;
const MAX_SAMPLES: usize = 60;
const TRIMMED_SAMPLES: usize = 30;
/// Friction is specified per 16 ms frame.
const FRAME_MS: f32 = 16.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DecelerateOptions {
    /// Velocity multiplier per 16 ms.
    pub friction: f32,
    /// Multiplier used instead of `friction` on an axis that is past the world
    /// edge while Bounce is installed.
    pub bounce: f32,
    /// Speeds below this (pixels per ms) stop the motion.
    pub min_speed: f32,
}

impl Default for DecelerateOptions {
    fn default() -> Self {
        Self { friction: 0.95, bounce: 0.8, min_speed: 0.01 }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Sample {
    pos: Vec2,
    time: f64,
}

/// Momentum after a drag is released.
///
/// While a drag is engaged the transform position is sampled on every move.
/// When the last pointer lifts, the velocity is taken from the oldest sample
/// within the last 100 ms and then decays by `friction` per 16 ms.
#[derive(Debug, Clone, Default)]
pub struct Decelerate {
    options: DecelerateOptions,
    samples: VecDeque<Sample>,
    velocity: Vec2,
}

impl Decelerate {
    pub fn new(options: DecelerateOptions) -> Self {
        let options = DecelerateOptions {
            friction: sanitize(options.friction),
            bounce: sanitize(options.bounce),
            min_speed: options.min_speed.max(0.0),
        };
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> &DecelerateOptions {
        &self.options
    }

    /// Current velocity in screen pixels per millisecond.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_active(&self) -> bool {
        self.velocity != Vec2::zero()
    }

    /// Starts momentum with an explicit velocity.
    pub fn activate(&mut self, velocity: Vec2) {
        if velocity.is_finite() {
            self.velocity = velocity;
        }
    }

    fn stop(&mut self, vp: &mut ViewportState) {
        self.velocity = Vec2::zero();
        self.publish(vp);
    }

    /// Mirrors the live axes into the shared flags other handlers read.
    fn publish(&self, vp: &mut ViewportState) {
        vp.engaged.momentum_x = self.velocity.x != 0.0;
        vp.engaged.momentum_y = self.velocity.y != 0.0;
    }

    fn release_velocity(&self, now: f64, pos: Vec2) -> Option<Vec2> {
        let sample = self.samples.iter().find(|s| s.time >= now - SAMPLE_WINDOW_MS && s.time < now)?;
        let dt = (now - sample.time) as f32;
        Some((pos - sample.pos) / dt)
    }

    fn settle(&mut self) {
        let min = self.options.min_speed;
        let v = &mut self.velocity;
        if v.x != 0.0 && v.y != 0.0 {
            if v.x.abs() < min && v.y.abs() < min {
                *v = Vec2::zero();
            }
        } else {
            if v.x.abs() < min {
                v.x = 0.0;
            }
            if v.y.abs() < min {
                v.y = 0.0;
            }
        }
    }
}

fn sanitize(k: f32) -> f32 {
    if k.is_finite() { k.clamp(0.0, 1.0) } else { 0.0 }
}

impl Behavior for Decelerate {
    fn on_down(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        self.samples.clear();
        self.stop(vp);
    }

    fn on_move(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        if !vp.engaged.drag {
            return;
        }
        self.samples.push_back(Sample { pos: vp.position(), time: vp.now_ms() });
        if self.samples.len() > MAX_SAMPLES {
            self.samples.drain(..TRIMMED_SAMPLES);
        }
    }

    fn on_up(&mut self, vp: &mut ViewportState, _pointer: &Pointer) {
        if !vp.pointers().is_empty() || self.samples.is_empty() {
            return;
        }
        if let Some(v) = self.release_velocity(vp.now_ms(), vp.position()) {
            log::debug!("decelerate: release velocity {v:?}");
            self.activate(v);
            // Bounce runs next in this same release and must see the momentum.
            self.publish(vp);
        }
        self.samples.clear();
    }

    fn on_tick(&mut self, vp: &mut ViewportState, elapsed_ms: f32) {
        if vp.engaged.clamped_x {
            self.velocity.x = 0.0;
        }
        if vp.engaged.clamped_y {
            self.velocity.y = 0.0;
        }
        if elapsed_ms <= 0.0 || self.velocity == Vec2::zero() {
            self.publish(vp);
            return;
        }

        vp.translate(self.velocity * elapsed_ms);

        let oob = vp.has_plugin(PluginKind::Bounce).then(|| vp.oob()).flatten();
        let (kx, ky) = match oob {
            Some(o) => (
                if o.x() { self.options.bounce } else { self.options.friction },
                if o.y() { self.options.bounce } else { self.options.friction },
            ),
            None => (self.options.friction, self.options.friction),
        };
        let frames = elapsed_ms / FRAME_MS;
        self.velocity.x *= kx.powf(frames);
        self.velocity.y *= ky.powf(frames);
        self.settle();

        self.publish(vp);
        vp.emit(ViewportEvent::Moved { kind: MoveKind::Decelerate });
    }

    fn on_reset(&mut self, vp: &mut ViewportState) {
        self.stop(vp);
    }

    fn on_remove(&mut self, vp: &mut ViewportState) {
        self.stop(vp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::BounceOptions;
    use crate::testing::{approx, down, harness, move_to, up};

    fn speed_x(vp: &crate::Viewport) -> f32 {
        vp.plugin::<Decelerate>().map(|d| d.velocity().x).unwrap_or(0.0)
    }

    #[test]
    fn velocity_decays_until_min_speed() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions::default());
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(1.0, 0.0));
        }
        let mut ticks = 0;
        while vp.plugin::<Decelerate>().is_some_and(Decelerate::is_active) {
            vp.tick(16.0);
            ticks += 1;
            assert!(ticks <= 1000);
        }
        assert_eq!(ticks, 90);
        assert!(!vp.engagement().momentum_x);
    }

    #[test]
    fn speed_never_increases() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions::default());
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(-0.7, 0.4));
        }
        let mut last = f32::INFINITY;
        for _ in 0..50 {
            vp.tick(7.0);
            let v = vp.plugin::<Decelerate>().map(|d| d.velocity().length()).unwrap_or(0.0);
            assert!(v <= last);
            last = v;
        }
    }

    #[test]
    fn zero_elapsed_does_not_move() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions::default());
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(1.0, 1.0));
        }
        vp.tick(0.0);
        assert_eq!(vp.position(), Vec2::zero());
    }

    #[test]
    fn release_after_drag_carries_momentum() {
        let mut vp = harness();
        vp.drag(Default::default()).decelerate(DecelerateOptions::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 120.0, 100.0);
        vp.tick(20.0);
        move_to(&mut vp, 0, 140.0, 100.0);
        up(&mut vp, 0);

        // One sample at t=0 (x=20) and one at t=20 (x=40): 1 px/ms.
        let v = vp.plugin::<Decelerate>().map(Decelerate::velocity).unwrap_or_default();
        assert!(approx(v.x, 1.0) && v.y == 0.0);

        let before = vp.position().x;
        vp.tick(16.0);
        assert!(approx(vp.position().x - before, 16.0));
    }

    #[test]
    fn past_an_edge_with_bounce_uses_bounce_friction() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions::default()).bounce(BounceOptions::default());
        vp.state_mut_for_test().set_position(Vec2::new(100.0, 0.0));
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(1.0, 0.0));
        }
        vp.tick(16.0);
        assert!(approx(speed_x(&vp), 0.8));
        vp.tick(32.0);
        assert!(approx(speed_x(&vp), 0.8 * 0.64));
        // Momentum still owns the axis, so Bounce waits.
        assert!(vp.engagement().momentum_x && !vp.engagement().bouncing);
    }

    #[test]
    fn past_an_edge_without_bounce_keeps_friction() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions::default());
        vp.state_mut_for_test().set_position(Vec2::new(100.0, 0.0));
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(1.0, 0.0));
        }
        vp.tick(16.0);
        assert!(approx(speed_x(&vp), 0.95));
    }

    #[test]
    fn release_publishes_momentum_immediately() {
        let mut vp = harness();
        vp.drag(Default::default()).decelerate(DecelerateOptions::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 120.0, 100.0);
        vp.tick(20.0);
        move_to(&mut vp, 0, 140.0, 100.0);
        up(&mut vp, 0);
        let e = vp.engagement();
        assert!(e.momentum_x && !e.momentum_y);
    }

    #[test]
    fn press_stops_momentum() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions::default());
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(1.0, 0.0));
        }
        vp.tick(16.0);
        down(&mut vp, 0, 10.0, 10.0);
        assert!(!vp.plugin::<Decelerate>().is_some_and(Decelerate::is_active));
    }

    #[test]
    fn manual_move_resets_momentum() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions::default());
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(1.0, 0.0));
        }
        vp.move_corner(5.0, 5.0);
        vp.tick(16.0);
        assert!(approx(vp.corner().x, 5.0));
    }
}

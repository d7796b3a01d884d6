use std::fmt;

use vista_engine::coords::Vec2;

use crate::event::{MoveKind, ViewportEvent};
use crate::plugin::Behavior;
use crate::state::ViewportState;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FollowOptions {
    /// World units per millisecond. Zero jumps straight to the target.
    pub speed: f32,
    /// World units per millisecond squared. Ramps the speed up and back down
    /// near the target when set.
    pub acceleration: Option<f32>,
    /// Keep the target within this many world units of the center instead of
    /// centering it exactly.
    pub radius: Option<f32>,
}

/// Keeps a moving world point centered.
pub struct Follow {
    target: Box<dyn FnMut() -> Vec2>,
    options: FollowOptions,
    velocity: f32,
}

impl Follow {
    /// `target` is polled once per tick for the world point to follow.
    pub fn new(target: impl FnMut() -> Vec2 + 'static, options: FollowOptions) -> Self {
        Self { target: Box::new(target), options, velocity: 0.0 }
    }

    pub fn options(&self) -> &FollowOptions {
        &self.options
    }

    /// Where the center should end up for a target at `target`.
    fn goal(&self, center: Vec2, target: Vec2) -> Option<Vec2> {
        match self.options.radius.filter(|r| *r > 0.0) {
            Some(radius) => {
                let d = target - center;
                let dist = d.length();
                if dist <= radius {
                    None
                } else {
                    Some(target - d / dist * radius)
                }
            }
            None => Some(target),
        }
    }

    fn step_length(&mut self, distance: f32, elapsed_ms: f32) -> f32 {
        let speed = self.options.speed;
        match self.options.acceleration.filter(|a| *a > 0.0) {
            Some(acc) => {
                let stopping = self.velocity * self.velocity / (2.0 * acc);
                self.velocity = if distance > stopping {
                    (self.velocity + acc * elapsed_ms).min(speed)
                } else {
                    (self.velocity - acc * elapsed_ms).max(0.0)
                };
                self.velocity * elapsed_ms
            }
            None => speed * elapsed_ms,
        }
    }
}

impl fmt::Debug for Follow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Follow")
            .field("options", &self.options)
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

impl Behavior for Follow {
    fn on_tick(&mut self, vp: &mut ViewportState, elapsed_ms: f32) {
        let target = (self.target)();
        if !target.is_finite() {
            return;
        }
        let center = vp.center();
        let Some(goal) = self.goal(center, target) else {
            self.velocity = 0.0;
            return;
        };
        let delta = goal - center;
        let distance = delta.length();
        if distance == 0.0 {
            self.velocity = 0.0;
            return;
        }

        let next = if self.options.speed > 0.0 {
            if elapsed_ms <= 0.0 {
                return;
            }
            let step = self.step_length(distance, elapsed_ms);
            if step >= distance { goal } else { center + delta * (step / distance) }
        } else {
            goal
        };
        vp.set_center(next);
        vp.emit(ViewportEvent::Moved { kind: MoveKind::Follow });
    }

    fn on_reset(&mut self, _vp: &mut ViewportState) {
        self.velocity = 0.0;
    }
}

use vista_engine::coords::Vec2;

use crate::event::{MoveKind, ViewportEvent};
use crate::options::{Direction, ZoomLimits};
use crate::plugin::{Behavior, WheelInput};
use crate::state::ViewportState;

/// Wheel pixels that make one zoom step.
const PIXELS_PER_STEP: f32 = 500.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelOptions {
    /// Zoom strength; one step scales by `2^(1 + percent)`.
    pub percent: f32,
    /// Zoom in when scrolling down.
    pub reverse: bool,
    /// Zoom about this world point instead of the cursor.
    pub center: Option<Vec2>,
    /// Pixels per wheel line.
    pub line_height: f32,
    pub axis: Direction,
    pub limits: ZoomLimits,
    /// Keep zooming from the wheel while a pinch is active.
    pub allow_during_pinch: bool,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            percent: 0.1,
            reverse: false,
            center: None,
            line_height: 20.0,
            axis: Direction::All,
            limits: ZoomLimits::default(),
            allow_during_pinch: true,
        }
    }
}

/// Zoom from wheel or trackpad scrolling.
#[derive(Debug, Clone, Default)]
pub struct Wheel {
    options: WheelOptions,
}

impl Wheel {
    pub fn new(options: WheelOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.options.limits = limits;
    }

    /// Scale multiplier for a vertical delta in pixels.
    pub fn zoom_factor(&self, dy: f32) -> f32 {
        let sign = if self.options.reverse { -1.0 } else { 1.0 };
        let step = sign * -dy / PIXELS_PER_STEP;
        2f32.powf((1.0 + self.options.percent) * step)
    }
}

impl Behavior for Wheel {
    fn on_wheel(&mut self, vp: &mut ViewportState, wheel: &WheelInput) {
        if vp.engaged.pinch && !self.options.allow_during_pinch {
            return;
        }
        let dy = wheel.delta.to_pixels(self.options.line_height).y;
        let change = self.zoom_factor(dy);
        if !change.is_finite() || change == 1.0 {
            return;
        }

        let s = vp.scale();
        let axis = self.options.axis;
        let target = Vec2::new(
            if axis.has_x() { s.x * change } else { s.x },
            if axis.has_y() { s.y * change } else { s.y },
        );
        let scale = self.options.limits.clamp(vp, target);
        if scale == s {
            return;
        }
        match self.options.center {
            Some(center) => vp.zoom_centered(scale, center),
            None => vp.zoom_about(scale, wheel.pos),
        }
        log::trace!("wheel: scale {:?} -> {:?}", s, scale);
        vp.emit(ViewportEvent::Zoomed { kind: MoveKind::Wheel });
        vp.emit(ViewportEvent::Moved { kind: MoveKind::Wheel });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{approx, down, harness};
    use vista_engine::input::{InputEvent, MouseWheelDelta};

    fn scroll(vp: &mut crate::Viewport, delta: MouseWheelDelta, x: f32, y: f32) {
        vp.dispatch(InputEvent::Wheel { delta, pos: Vec2::new(x, y) });
    }

    #[test]
    fn scrolling_up_zooms_in_about_cursor() {
        let mut vp = harness();
        vp.wheel(WheelOptions::default());
        let cursor = Vec2::new(200.0, 100.0);
        let anchor = vp.to_world(cursor);
        scroll(&mut vp, MouseWheelDelta::Pixel { x: 0.0, y: -500.0 }, cursor.x, cursor.y);
        assert!(approx(vp.scale().x, 2f32.powf(1.1)));
        let after = vp.to_world(cursor);
        assert!(approx(after.x, anchor.x) && approx(after.y, anchor.y));
    }

    #[test]
    fn line_deltas_use_line_height() {
        let mut vp = harness();
        vp.wheel(WheelOptions { line_height: 50.0, ..Default::default() });
        scroll(&mut vp, MouseWheelDelta::Line { x: 0.0, y: 10.0 }, 0.0, 0.0);
        assert!(approx(vp.scale().x, 2f32.powf(-1.1)));
    }

    #[test]
    fn reverse_flips_direction() {
        let w = Wheel::new(WheelOptions { reverse: true, ..Default::default() });
        assert!(w.zoom_factor(100.0) > 1.0);
        assert!(Wheel::default().zoom_factor(100.0) < 1.0);
        assert_eq!(Wheel::default().zoom_factor(0.0), 1.0);
    }

    #[test]
    fn limits_stop_zoom() {
        let mut vp = harness();
        vp.wheel(WheelOptions {
            limits: ZoomLimits { max_scale: Some(1.0), ..Default::default() },
            ..Default::default()
        });
        scroll(&mut vp, MouseWheelDelta::Pixel { x: 0.0, y: -100.0 }, 0.0, 0.0);
        assert_eq!(vp.scale(), Vec2::splat(1.0));
        assert_eq!(vp.drain_events().count(), 0);
    }

    #[test]
    fn pinch_can_block_wheel() {
        let mut vp = harness();
        vp.pinch(Default::default())
            .wheel(WheelOptions { allow_during_pinch: false, ..Default::default() });
        down(&mut vp, 0, 0.0, 0.0);
        down(&mut vp, 1, 100.0, 0.0);
        scroll(&mut vp, MouseWheelDelta::Pixel { x: 0.0, y: -100.0 }, 0.0, 0.0);
        assert_eq!(vp.scale(), Vec2::splat(1.0));
    }
}

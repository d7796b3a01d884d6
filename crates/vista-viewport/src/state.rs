//! State shared by the coordinator and every plugin.
//!
//! Plugins never talk to each other directly. Everything one handler needs to
//! know about another (is a drag in progress, is Pinch installed, did Clamp
//! just correct an axis) flows through [`ViewportState`].

use std::collections::VecDeque;

use vista_engine::coords::{Rect, Size, Vec2};
use vista_engine::input::{PointerId, PointerSet};

use crate::config::ViewportConfig;
use crate::event::ViewportEvent;
use crate::options::MIN_SCALE;
use crate::plugin::{PluginKind, PluginSet};
use crate::target::RenderTarget;

/// Tolerance, in world units, for out-of-bounds edge tests.
pub const EDGE_EPSILON: f32 = 1e-3;

// ── Engagement ────────────────────────────────────────────────────────────

/// Which gestures and animations currently own the transform.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Engagement {
    /// Drag crossed its threshold and is translating.
    pub drag: bool,
    /// Two or more pointers are down and Pinch is handling them.
    pub pinch: bool,
    pub momentum_x: bool,
    pub momentum_y: bool,
    pub bouncing: bool,
    pub snapping: bool,
    /// Clamp corrected the axis during its most recent pass.
    pub clamped_x: bool,
    pub clamped_y: bool,
}

impl Engagement {
    /// A pointer gesture is in control.
    #[inline]
    pub fn gesture(&self) -> bool {
        self.drag || self.pinch
    }
}

// ── OutOfBounds ───────────────────────────────────────────────────────────

/// Which world edges the visible area currently crosses.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OutOfBounds {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    /// `(world_w * sx - screen_w, world_h * sy - screen_h)`: the negated
    /// position that aligns the world's far corner with the screen's.
    pub corner_point: Vec2,
}

impl OutOfBounds {
    #[inline]
    pub fn x(&self) -> bool {
        self.left || self.right
    }

    #[inline]
    pub fn y(&self) -> bool {
        self.top || self.bottom
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.x() || self.y()
    }
}

// ── Click tracking ────────────────────────────────────────────────────────

/// How the last press/release pair resolved.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Release {
    Click,
    Gesture,
}

// ── ViewportState ─────────────────────────────────────────────────────────

pub struct ViewportState {
    target: Box<dyn RenderTarget>,
    screen: Size,
    world: Option<Size>,
    threshold: f32,
    pointers: PointerSet,
    pub(crate) engaged: Engagement,
    installed: PluginSet,
    now_ms: f64,
    events: VecDeque<ViewportEvent>,
    max_events: usize,
    removals: Vec<PluginKind>,
    pub(crate) click_candidate: Option<PointerId>,
    pub(crate) last_release: Option<Release>,
}

impl ViewportState {
    pub fn new(config: ViewportConfig, target: Box<dyn RenderTarget>) -> Self {
        let threshold = if config.threshold.is_finite() { config.threshold.max(0.0) } else { 5.0 };
        Self {
            target,
            screen: config.screen,
            world: config.world,
            threshold,
            pointers: PointerSet::new(),
            engaged: Engagement::default(),
            installed: PluginSet::default(),
            now_ms: 0.0,
            events: VecDeque::new(),
            max_events: config.max_queued_events.max(1),
            removals: Vec::new(),
            click_candidate: None,
            last_release: None,
        }
    }

    // ── target ────────────────────────────────────────────────────────────

    pub fn target(&self) -> &dyn RenderTarget {
        self.target.as_ref()
    }

    pub(crate) fn target_mut(&mut self) -> &mut dyn RenderTarget {
        self.target.as_mut()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.target.position()
    }

    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.target.scale()
    }

    /// Writes the position. Non-finite values are ignored.
    pub fn set_position(&mut self, position: Vec2) {
        if position.is_finite() {
            self.target.set_position(position);
        } else {
            log::warn!("viewport: ignoring non-finite position {position:?}");
        }
    }

    /// Writes the scale, floored at [`MIN_SCALE`]. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: Vec2) {
        if scale.is_finite() {
            self.target.set_scale(Vec2::new(scale.x.max(MIN_SCALE), scale.y.max(MIN_SCALE)));
        } else {
            log::warn!("viewport: ignoring non-finite scale {scale:?}");
        }
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        let p = self.position();
        self.set_position(p + delta);
    }

    /// Rescales so the world point under `screen_point` stays under it.
    pub fn zoom_about(&mut self, scale: Vec2, screen_point: Vec2) {
        let anchor = self.to_world(screen_point);
        self.set_scale(scale);
        let drift = screen_point - self.to_screen(anchor);
        self.translate(drift);
    }

    /// Rescales keeping `center` (world) at the middle of the screen.
    pub fn zoom_centered(&mut self, scale: Vec2, center: Vec2) {
        self.set_scale(scale);
        self.set_center(center);
    }

    // ── sizes ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    pub(crate) fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }

    /// The configured world size, else the target's local bounds.
    /// `None` unless the result is positive and finite.
    pub fn world_size(&self) -> Option<Size> {
        self.world
            .or_else(|| {
                self.target
                    .local_bounds()
                    .map(|b| Size::new(b.origin.x + b.size.x, b.origin.y + b.size.y))
            })
            .and_then(Size::valid)
    }

    pub(crate) fn set_world_size(&mut self, world: Option<Size>) {
        self.world = world;
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// World units visible across the screen.
    #[inline]
    pub fn world_screen_width(&self) -> f32 {
        self.screen.width / self.scale().x
    }

    #[inline]
    pub fn world_screen_height(&self) -> f32 {
        self.screen.height / self.scale().y
    }

    /// Screen pixels the whole world spans.
    pub fn screen_world_width(&self) -> Option<f32> {
        self.world_size().map(|w| w.width * self.scale().x)
    }

    pub fn screen_world_height(&self) -> Option<f32> {
        self.world_size().map(|w| w.height * self.scale().y)
    }

    // ── coordinates ───────────────────────────────────────────────────────

    #[inline]
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        self.target.to_local(screen)
    }

    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        self.target.to_global(world)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        -self.position().x / self.scale().x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left() + self.world_screen_width()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        -self.position().y / self.scale().y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top() + self.world_screen_height()
    }

    pub fn set_left(&mut self, world_x: f32) {
        let p = self.position();
        self.set_position(Vec2::new(-world_x * self.scale().x, p.y));
    }

    pub fn set_right(&mut self, world_x: f32) {
        let p = self.position();
        self.set_position(Vec2::new(-world_x * self.scale().x + self.screen.width, p.y));
    }

    pub fn set_top(&mut self, world_y: f32) {
        let p = self.position();
        self.set_position(Vec2::new(p.x, -world_y * self.scale().y));
    }

    pub fn set_bottom(&mut self, world_y: f32) {
        let p = self.position();
        self.set_position(Vec2::new(p.x, -world_y * self.scale().y + self.screen.height));
    }

    /// World point at the middle of the screen.
    pub fn center(&self) -> Vec2 {
        let p = self.position();
        let s = self.scale();
        Vec2::new(
            self.world_screen_width() / 2.0 - p.x / s.x,
            self.world_screen_height() / 2.0 - p.y / s.y,
        )
    }

    pub fn set_center(&mut self, world: Vec2) {
        let s = self.scale();
        self.set_position(Vec2::new(
            (self.world_screen_width() / 2.0 - world.x) * s.x,
            (self.world_screen_height() / 2.0 - world.y) * s.y,
        ));
    }

    /// World point at the top-left of the screen.
    #[inline]
    pub fn corner(&self) -> Vec2 {
        (-self.position()).div_elem(self.scale())
    }

    pub fn set_corner(&mut self, world: Vec2) {
        let s = self.scale();
        self.set_position((-world).mul_elem(s));
    }

    /// The world rectangle currently on screen.
    pub fn visible_bounds(&self) -> Rect {
        Rect::from_origin_size(
            self.corner(),
            Vec2::new(self.world_screen_width(), self.world_screen_height()),
        )
    }

    /// Edge crossings against `[0, world]`. `None` without both sizes.
    pub fn oob(&self) -> Option<OutOfBounds> {
        let world = self.world_size()?;
        let screen = self.screen.valid()?;
        let s = self.scale();
        Some(OutOfBounds {
            left: self.left() < -EDGE_EPSILON,
            right: self.right() > world.width + EDGE_EPSILON,
            top: self.top() < -EDGE_EPSILON,
            bottom: self.bottom() > world.height + EDGE_EPSILON,
            corner_point: Vec2::new(
                world.width * s.x - screen.width,
                world.height * s.y - screen.height,
            ),
        })
    }

    // ── pointers ──────────────────────────────────────────────────────────

    #[inline]
    pub fn pointers(&self) -> &PointerSet {
        &self.pointers
    }

    pub(crate) fn pointers_mut(&mut self) -> &mut PointerSet {
        &mut self.pointers
    }

    /// Stops tracking a pointer for the rest of its gesture.
    ///
    /// The interaction counts as resolved, so a host click that follows it
    /// is dropped too.
    pub(crate) fn reject_pointer(&mut self, id: PointerId) {
        if self.pointers.release(id).is_some() {
            log::trace!("viewport: pointer {id} rejected");
        }
        if self.click_candidate == Some(id) {
            self.click_candidate = None;
        }
        self.last_release = Some(Release::Gesture);
    }

    // ── coordination ──────────────────────────────────────────────────────

    #[inline]
    pub fn engagement(&self) -> Engagement {
        self.engaged
    }

    /// Whether a plugin of `kind` is installed and not paused.
    #[inline]
    pub fn has_plugin(&self, kind: PluginKind) -> bool {
        self.installed.contains(kind)
    }

    pub(crate) fn set_installed(&mut self, kind: PluginKind, live: bool) {
        self.installed.set(kind, live);
    }

    /// Asks the coordinator to uninstall a plugin once the current dispatch ends.
    pub(crate) fn request_removal(&mut self, kind: PluginKind) {
        if !self.removals.contains(&kind) {
            self.removals.push(kind);
        }
    }

    pub(crate) fn take_removals(&mut self) -> Vec<PluginKind> {
        std::mem::take(&mut self.removals)
    }

    /// Milliseconds of tick time accumulated since construction.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub(crate) fn advance_clock(&mut self, elapsed_ms: f32) {
        self.now_ms += f64::from(elapsed_ms);
    }

    // ── events ────────────────────────────────────────────────────────────

    pub(crate) fn emit(&mut self, event: ViewportEvent) {
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub(crate) fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, ViewportEvent> {
        self.events.drain(..)
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Debug for ViewportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportState")
            .field("position", &self.position())
            .field("scale", &self.scale())
            .field("screen", &self.screen)
            .field("world", &self.world)
            .field("pointers", &self.pointers.len())
            .field("engaged", &self.engaged)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Transform;
    use crate::testing::approx;

    fn state(screen: (f32, f32), world: Option<(f32, f32)>) -> ViewportState {
        let mut config = ViewportConfig::new(screen.0, screen.1);
        if let Some((w, h)) = world {
            config = config.world(w, h);
        }
        ViewportState::new(config, Box::new(Transform::default()))
    }

    #[test]
    fn world_and_screen_round_trip() {
        let mut vp = state((800.0, 600.0), Some((1600.0, 1200.0)));
        vp.set_scale(Vec2::new(2.0, 0.5));
        vp.set_position(Vec2::new(-120.0, 35.0));
        let p = Vec2::new(317.0, 211.0);
        let back = vp.to_screen(vp.to_world(p));
        assert!(approx(back.x, p.x) && approx(back.y, p.y));
    }

    #[test]
    fn edges_follow_position_and_scale() {
        let mut vp = state((800.0, 600.0), None);
        vp.set_scale(Vec2::splat(2.0));
        vp.set_position(Vec2::new(-200.0, -100.0));
        assert_eq!(vp.left(), 100.0);
        assert_eq!(vp.right(), 500.0);
        assert_eq!(vp.top(), 50.0);
        assert_eq!(vp.bottom(), 350.0);
        assert_eq!(vp.visible_bounds(), Rect::new(100.0, 50.0, 400.0, 300.0));
    }

    #[test]
    fn center_and_corner_setters_invert_getters() {
        let mut vp = state((800.0, 600.0), None);
        vp.set_scale(Vec2::new(1.5, 3.0));
        vp.set_center(Vec2::new(40.0, -12.0));
        let c = vp.center();
        assert!(approx(c.x, 40.0) && approx(c.y, -12.0));

        vp.set_corner(Vec2::new(7.0, 9.0));
        let k = vp.corner();
        assert!(approx(k.x, 7.0) && approx(k.y, 9.0));
    }

    #[test]
    fn edge_setters_place_world_coordinates() {
        let mut vp = state((800.0, 600.0), None);
        vp.set_right(1000.0);
        assert!(approx(vp.right(), 1000.0));
        vp.set_bottom(50.0);
        assert!(approx(vp.bottom(), 50.0));
        vp.set_left(-3.0);
        vp.set_top(4.0);
        assert!(approx(vp.left(), -3.0) && approx(vp.top(), 4.0));
    }

    #[test]
    fn zoom_about_keeps_anchor_fixed() {
        let mut vp = state((800.0, 600.0), None);
        let anchor = Vec2::new(200.0, 150.0);
        let before = vp.to_world(anchor);
        vp.zoom_about(Vec2::splat(2.5), anchor);
        let after = vp.to_world(anchor);
        assert!(approx(before.x, after.x) && approx(before.y, after.y));
    }

    #[test]
    fn oob_needs_both_sizes() {
        assert!(state((800.0, 600.0), None).oob().is_none());
        assert!(state((0.0, 0.0), Some((100.0, 100.0))).oob().is_none());
    }

    #[test]
    fn oob_reports_crossed_edges() {
        let mut vp = state((800.0, 600.0), Some((1600.0, 1200.0)));
        vp.set_position(Vec2::new(50.0, -700.0));
        let oob = vp.oob().unwrap();
        assert!(oob.left && !oob.right);
        assert!(!oob.top && oob.bottom);
        assert_eq!(oob.corner_point, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn world_size_falls_back_to_target_bounds() {
        let target = Transform::default().with_bounds(Rect::new(0.0, 0.0, 300.0, 200.0));
        let vp = ViewportState::new(ViewportConfig::new(100.0, 100.0), Box::new(target));
        assert_eq!(vp.world_size(), Some(Size::new(300.0, 200.0)));
    }

    #[test]
    fn degenerate_writes_are_rejected() {
        let mut vp = state((800.0, 600.0), None);
        vp.set_scale(Vec2::new(0.0, -1.0));
        assert_eq!(vp.scale(), Vec2::splat(MIN_SCALE));
        vp.set_position(Vec2::new(f32::NAN, 0.0));
        assert_eq!(vp.position(), Vec2::zero());
    }

    #[test]
    fn event_queue_drops_oldest_when_full() {
        let config = ViewportConfig::new(10.0, 10.0).max_queued_events(2);
        let mut vp = ViewportState::new(config, Box::new(Transform::default()));
        vp.emit(ViewportEvent::PinchStart);
        vp.emit(ViewportEvent::PinchEnd);
        vp.emit(ViewportEvent::SnapStart);
        let drained: Vec<_> = vp.drain_events().collect();
        assert_eq!(drained, vec![ViewportEvent::PinchEnd, ViewportEvent::SnapStart]);
    }
}

//! The plugin coordinator.

use vista_engine::coords::{Rect, Size, Vec2};
use vista_engine::input::{InputEvent, PointerId};

use crate::config::ViewportConfig;
use crate::error::Result;
use crate::event::{MoveKind, ViewportEvent};
use crate::options::ZoomLimits;
use crate::plugin::{Behavior, Plugin, PluginKind, PluginVariant, WheelInput};
use crate::plugins::{
    Bounce, BounceOptions, Clamp, ClampOptions, Decelerate, DecelerateOptions, Drag, DragOptions,
    Follow, FollowOptions, HitArea, HitAreaOptions, Pinch, PinchOptions, Snap, SnapOptions, Wheel,
    WheelOptions,
};
use crate::state::{Engagement, OutOfBounds, Release, ViewportState};
use crate::target::{RenderTarget, Transform};

#[derive(Debug)]
struct Slot {
    plugin: Plugin,
    paused: bool,
}

/// A pannable, zoomable view over a world.
///
/// Owns the render target's transform and at most one handler per
/// [`PluginKind`]. Feed it input with [`dispatch`](Self::dispatch) and time
/// with [`tick`](Self::tick); read notifications back with
/// [`drain_events`](Self::drain_events).
///
/// ```
/// use vista_viewport::{Viewport, ViewportConfig};
///
/// let mut vp = Viewport::new(ViewportConfig::new(800.0, 600.0).world(1600.0, 1200.0));
/// vp.drag(Default::default())
///     .pinch(Default::default())
///     .wheel(Default::default())
///     .decelerate(Default::default())
///     .clamp(Default::default());
/// vp.fit(true);
/// assert_eq!(vp.scaled(), 0.5);
/// ```
#[derive(Debug)]
pub struct Viewport {
    state: ViewportState,
    slots: [Option<Slot>; 9],
    max_elapsed_ms: f32,
}

impl Viewport {
    /// Creates a viewport driving a standalone [`Transform`].
    pub fn new(config: ViewportConfig) -> Self {
        Self::with_target(config, Transform::default())
    }

    pub fn with_target(config: ViewportConfig, target: impl RenderTarget + 'static) -> Self {
        let max_elapsed_ms = match config.max_elapsed_ms {
            ms if ms.is_finite() => ms.max(0.0),
            ms if ms == f32::INFINITY => f32::MAX,
            ms => {
                let fallback = ViewportConfig::default().max_elapsed_ms;
                log::warn!("viewport: max_elapsed_ms {ms} is unusable; using {fallback}");
                fallback
            }
        };
        if !config.screen.is_valid() {
            log::warn!("viewport: screen size {:?} unset; bounds handlers stay idle until resize", config.screen);
        }
        Self {
            state: ViewportState::new(config, Box::new(target)),
            slots: Default::default(),
            max_elapsed_ms,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut_for_test(&mut self) -> &mut ViewportState {
        &mut self.state
    }

    pub fn target(&self) -> &dyn RenderTarget {
        self.state.target()
    }

    /// Direct access to the target. Changes made here bypass the reset
    /// protocol; call [`reset_after_manual_move`](Self::reset_after_manual_move)
    /// afterwards if animations should restart.
    pub fn target_mut(&mut self) -> &mut dyn RenderTarget {
        self.state.target_mut()
    }

    // ── registry ──────────────────────────────────────────────────────────

    /// Installs a handler, replacing any existing one of the same kind.
    pub fn add_plugin(&mut self, plugin: impl Into<Plugin>) -> &mut Self {
        let plugin = plugin.into();
        let kind = plugin.kind();
        if let Some(mut old) = self.slots[kind.index()].take() {
            old.plugin.behavior_mut().on_remove(&mut self.state);
            log::debug!("viewport: replacing {kind}");
        } else {
            log::debug!("viewport: installed {kind}");
        }
        self.slots[kind.index()] = Some(Slot { plugin, paused: false });
        self.state.set_installed(kind, true);
        self
    }

    /// Installs a handler under a kind name, checking the name matches it.
    pub fn add_plugin_named(&mut self, name: &str, plugin: impl Into<Plugin>) -> Result<&mut Self> {
        let expected: PluginKind = name.parse()?;
        let plugin = plugin.into();
        let found = plugin.kind();
        if found != expected {
            return Err(crate::Error::PluginKindMismatch { expected, found });
        }
        Ok(self.add_plugin(plugin))
    }

    /// Uninstalls and returns the handler of `kind`.
    pub fn remove_plugin(&mut self, kind: PluginKind) -> Option<Plugin> {
        let mut slot = self.slots[kind.index()].take()?;
        slot.plugin.behavior_mut().on_remove(&mut self.state);
        self.state.set_installed(kind, false);
        log::debug!("viewport: removed {kind}");
        Some(slot.plugin)
    }

    pub fn remove_plugin_named(&mut self, name: &str) -> Result<Option<Plugin>> {
        let kind: PluginKind = name.parse()?;
        Ok(self.remove_plugin(kind))
    }

    /// Keeps a handler installed but stops delivering anything to it.
    /// Returns `false` when no handler of that kind is installed.
    pub fn pause_plugin(&mut self, kind: PluginKind) -> bool {
        let Some(slot) = self.slots[kind.index()].as_mut() else {
            return false;
        };
        if !slot.paused {
            slot.paused = true;
            slot.plugin.behavior_mut().on_remove(&mut self.state);
            self.state.set_installed(kind, false);
            log::debug!("viewport: paused {kind}");
        }
        true
    }

    pub fn resume_plugin(&mut self, kind: PluginKind) -> bool {
        let Some(slot) = self.slots[kind.index()].as_mut() else {
            return false;
        };
        if slot.paused {
            slot.paused = false;
            self.state.set_installed(kind, true);
            log::debug!("viewport: resumed {kind}");
        }
        true
    }

    /// Installed and not paused.
    pub fn has_plugin(&self, kind: PluginKind) -> bool {
        self.state.has_plugin(kind)
    }

    pub fn is_paused(&self, kind: PluginKind) -> bool {
        self.slots[kind.index()].as_ref().is_some_and(|s| s.paused)
    }

    /// The handler of `kind`, paused or not.
    pub fn get(&self, kind: PluginKind) -> Option<&Plugin> {
        self.slots[kind.index()].as_ref().map(|s| &s.plugin)
    }

    pub fn get_mut(&mut self, kind: PluginKind) -> Option<&mut Plugin> {
        self.slots[kind.index()].as_mut().map(|s| &mut s.plugin)
    }

    /// Typed access: `vp.plugin::<Decelerate>()`.
    pub fn plugin<T: PluginVariant>(&self) -> Option<&T> {
        self.get(T::KIND).and_then(T::from_plugin)
    }

    pub fn plugin_mut<T: PluginVariant>(&mut self) -> Option<&mut T> {
        self.get_mut(T::KIND).and_then(T::from_plugin_mut)
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn Behavior, &mut ViewportState)) {
        for slot in self.slots.iter_mut().flatten() {
            if !slot.paused {
                f(slot.plugin.behavior_mut(), &mut self.state);
            }
        }
    }

    fn apply_removals(&mut self) {
        for kind in self.state.take_removals() {
            self.remove_plugin(kind);
        }
    }

    // ── installers ────────────────────────────────────────────────────────

    pub fn hit_area(&mut self, options: HitAreaOptions) -> &mut Self {
        self.add_plugin(HitArea::new(options))
    }

    pub fn drag(&mut self, options: DragOptions) -> &mut Self {
        self.add_plugin(Drag::new(options))
    }

    pub fn pinch(&mut self, options: PinchOptions) -> &mut Self {
        self.add_plugin(Pinch::new(options))
    }

    pub fn wheel(&mut self, options: WheelOptions) -> &mut Self {
        self.add_plugin(Wheel::new(options))
    }

    /// Keeps the world point returned by `target` centered.
    pub fn follow(&mut self, target: impl FnMut() -> Vec2 + 'static, options: FollowOptions) -> &mut Self {
        self.add_plugin(Follow::new(target, options))
    }

    pub fn decelerate(&mut self, options: DecelerateOptions) -> &mut Self {
        self.add_plugin(Decelerate::new(options))
    }

    pub fn bounce(&mut self, options: BounceOptions) -> &mut Self {
        self.add_plugin(Bounce::new(options))
    }

    /// Glides to world point `(x, y)`. Calling again retargets from scratch.
    pub fn snap(&mut self, x: f32, y: f32, options: SnapOptions) -> &mut Self {
        self.add_plugin(Snap::new(Vec2::new(x, y), options))
    }

    pub fn clamp(&mut self, options: ClampOptions) -> &mut Self {
        self.add_plugin(Clamp::new(options))
    }

    /// Applies the same zoom limits to the installed Pinch and Wheel handlers.
    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) -> &mut Self {
        if let Some(p) = self.plugin_mut::<Pinch>() {
            p.set_limits(limits);
        }
        if let Some(w) = self.plugin_mut::<Wheel>() {
            w.set_limits(limits);
        }
        self
    }

    // ── input & time ──────────────────────────────────────────────────────

    /// Routes one input event through the handlers in precedence order.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { id, pos } => self.pointer_down(id, pos),
            InputEvent::PointerMove { id, pos } => self.pointer_move(id, pos),
            InputEvent::PointerUp { id } => self.pointer_up(id, true),
            InputEvent::PointerCancel { id } => self.pointer_up(id, false),
            InputEvent::Wheel { delta, pos } => {
                let wheel = WheelInput { delta, pos };
                self.each(|b, vp| b.on_wheel(vp, &wheel));
            }
            InputEvent::Click { pos } => self.host_click(pos),
        }
        self.apply_removals();
    }

    fn pointer_down(&mut self, id: PointerId, pos: Vec2) {
        if !pos.is_finite() {
            return;
        }
        self.state.pointers_mut().press(id, pos);
        self.state.last_release = None;
        self.state.click_candidate = (self.state.pointers().len() == 1).then_some(id);
        let Some(pointer) = self.state.pointers().get(id).copied() else {
            return;
        };
        for slot in self.slots.iter_mut().flatten() {
            // HitArea may have rejected the press.
            if !self.state.pointers().contains(id) {
                break;
            }
            if !slot.paused {
                slot.plugin.behavior_mut().on_down(&mut self.state, &pointer);
            }
        }
    }

    fn pointer_move(&mut self, id: PointerId, pos: Vec2) {
        if !pos.is_finite() {
            return;
        }
        let threshold = self.state.threshold();
        let Some(pointer) = self.state.pointers_mut().motion(id, pos, threshold) else {
            return;
        };
        if pointer.moved && self.state.click_candidate == Some(id) {
            self.state.click_candidate = None;
        }
        self.each(|b, vp| b.on_move(vp, &pointer));
    }

    fn pointer_up(&mut self, id: PointerId, released: bool) {
        let Some(pointer) = self.state.pointers_mut().release(id) else {
            return;
        };
        let clicked = released && !pointer.moved && self.state.click_candidate == Some(id);
        if clicked {
            let world = self.state.to_world(pointer.pos);
            self.state.emit(ViewportEvent::Clicked { screen: pointer.pos, world, pointer: Some(id) });
            self.state.last_release = Some(Release::Click);
        } else {
            self.state.last_release = Some(Release::Gesture);
        }
        if self.state.click_candidate == Some(id) {
            self.state.click_candidate = None;
        }
        self.each(|b, vp| b.on_up(vp, &pointer));
    }

    fn host_click(&mut self, pos: Vec2) {
        match self.state.last_release.take() {
            Some(_) => log::trace!("viewport: host click already resolved by press/release"),
            None => {
                let world = self.state.to_world(pos);
                self.state.emit(ViewportEvent::Clicked { screen: pos, world, pointer: None });
            }
        }
    }

    /// Advances every handler by `elapsed_ms`, clamped to
    /// `[0, max_elapsed_ms]`.
    pub fn tick(&mut self, elapsed_ms: f32) {
        let elapsed = if elapsed_ms.is_finite() { elapsed_ms.clamp(0.0, self.max_elapsed_ms) } else { 0.0 };
        self.state.advance_clock(elapsed);
        self.each(|b, vp| b.on_tick(vp, elapsed));
        self.apply_removals();
    }

    /// Updates the screen size and, when given, the world size; then lets
    /// every handler react.
    pub fn resize(
        &mut self,
        screen_width: f32,
        screen_height: f32,
        world_width: Option<f32>,
        world_height: Option<f32>,
    ) {
        self.state.set_screen_size(Size::new(screen_width, screen_height));
        if world_width.is_some() || world_height.is_some() {
            let current = self.state.world_size().unwrap_or_default();
            self.state.set_world_size(Some(Size::new(
                world_width.unwrap_or(current.width),
                world_height.unwrap_or(current.height),
            )));
        }
        log::debug!(
            "viewport: resized screen {:?} world {:?}",
            self.state.screen_size(),
            self.state.world_size()
        );
        self.each(|b, vp| b.on_resize(vp));
        self.apply_removals();
    }

    /// Restarts animations from the current transform: Decelerate stops,
    /// Bounce re-evaluates, Clamp re-applies.
    pub fn reset_after_manual_move(&mut self) {
        self.each(|b, vp| b.on_reset(vp));
        self.apply_removals();
    }

    /// Pending notifications, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ViewportEvent> + '_ {
        self.state.drain_events()
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn position(&self) -> Vec2 {
        self.state.position()
    }

    pub fn scale(&self) -> Vec2 {
        self.state.scale()
    }

    /// Horizontal scale, for callers that keep both axes equal.
    pub fn scaled(&self) -> f32 {
        self.state.scale().x
    }

    pub fn screen_size(&self) -> Size {
        self.state.screen_size()
    }

    pub fn world_size(&self) -> Option<Size> {
        self.state.world_size()
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        self.state.to_world(screen)
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        self.state.to_screen(world)
    }

    pub fn left(&self) -> f32 {
        self.state.left()
    }

    pub fn right(&self) -> f32 {
        self.state.right()
    }

    pub fn top(&self) -> f32 {
        self.state.top()
    }

    pub fn bottom(&self) -> f32 {
        self.state.bottom()
    }

    pub fn world_screen_width(&self) -> f32 {
        self.state.world_screen_width()
    }

    pub fn world_screen_height(&self) -> f32 {
        self.state.world_screen_height()
    }

    pub fn screen_world_width(&self) -> Option<f32> {
        self.state.screen_world_width()
    }

    pub fn screen_world_height(&self) -> Option<f32> {
        self.state.screen_world_height()
    }

    pub fn center(&self) -> Vec2 {
        self.state.center()
    }

    pub fn corner(&self) -> Vec2 {
        self.state.corner()
    }

    pub fn visible_bounds(&self) -> Rect {
        self.state.visible_bounds()
    }

    pub fn oob(&self) -> Option<OutOfBounds> {
        self.state.oob()
    }

    pub fn engagement(&self) -> Engagement {
        self.state.engagement()
    }

    // ── manual moves ──────────────────────────────────────────────────────

    /// Centers world point `(x, y)`. Running animations are left alone.
    pub fn move_center(&mut self, x: f32, y: f32) -> &mut Self {
        self.state.set_center(Vec2::new(x, y));
        self
    }

    /// Puts world point `(x, y)` at the top-left of the screen.
    pub fn move_corner(&mut self, x: f32, y: f32) -> &mut Self {
        self.state.set_corner(Vec2::new(x, y));
        self.state.emit(ViewportEvent::Moved { kind: MoveKind::Manual });
        self.reset_after_manual_move();
        self
    }

    /// Scales so `width` world units (default: the world width) span the
    /// screen. `scale_y` applies the same scale vertically.
    pub fn fit_width(&mut self, width: Option<f32>, center: bool, scale_y: bool) -> &mut Self {
        let screen = self.state.screen_size().width;
        let Some(width) = positive(width.or_else(|| self.world_size().map(|w| w.width))) else {
            log::warn!("viewport: fit_width needs a world width");
            return self;
        };
        if screen <= 0.0 {
            log::warn!("viewport: fit_width needs a screen width");
            return self;
        }
        let sx = screen / width;
        let sy = if scale_y { sx } else { self.scale().y };
        self.scale_to(Vec2::new(sx, sy), center);
        self.zoomed()
    }

    pub fn fit_height(&mut self, height: Option<f32>, center: bool, scale_x: bool) -> &mut Self {
        let screen = self.state.screen_size().height;
        let Some(height) = positive(height.or_else(|| self.world_size().map(|w| w.height))) else {
            log::warn!("viewport: fit_height needs a world height");
            return self;
        };
        if screen <= 0.0 {
            log::warn!("viewport: fit_height needs a screen height");
            return self;
        }
        let sy = screen / height;
        let sx = if scale_x { sy } else { self.scale().x };
        self.scale_to(Vec2::new(sx, sy), center);
        self.zoomed()
    }

    /// Uniform scale that fits the world on screen.
    pub fn fit(&mut self, center: bool) -> &mut Self {
        self.fit_to(None, None, center)
    }

    /// Uniform scale that fits a `width × height` world area on screen.
    pub fn fit_to(&mut self, width: Option<f32>, height: Option<f32>, center: bool) -> &mut Self {
        match self.fit_scale(width, height) {
            Some(s) => {
                self.scale_to(Vec2::splat(s), center);
                self.zoomed()
            }
            None => {
                log::warn!("viewport: fit needs screen and world sizes");
                self
            }
        }
    }

    /// Fits the whole world and, when `center` is set, centers it.
    pub fn fit_world(&mut self, center: bool) -> &mut Self {
        let (Some(s), Some(world)) = (self.fit_scale(None, None), self.world_size()) else {
            log::warn!("viewport: fit_world needs screen and world sizes");
            return self;
        };
        self.state.set_scale(Vec2::splat(s));
        if center {
            self.state.set_center(Vec2::new(world.width / 2.0, world.height / 2.0));
        }
        self.zoomed()
    }

    /// Sets a uniform scale.
    pub fn set_zoom(&mut self, scale: f32, center: bool) -> &mut Self {
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("viewport: ignoring zoom {scale}");
            return self;
        }
        self.scale_to(Vec2::splat(scale), center);
        self.zoomed()
    }

    /// Zooms out by `world_units` of visible width (negative zooms in).
    pub fn zoom(&mut self, world_units: f32, center: bool) -> &mut Self {
        let width = self.world_screen_width() + world_units;
        self.fit_width(Some(width), center, true)
    }

    /// Zooms by a fraction of the current scale: `0.1` is ten percent in.
    pub fn zoom_percent(&mut self, percent: f32, center: bool) -> &mut Self {
        let s = self.scaled() * (1.0 + percent);
        self.set_zoom(s, center)
    }

    /// Moves the least amount needed to show `rect` (world). With
    /// `resize_to_fit`, zooms out first when it is larger than the view.
    pub fn ensure_visible(&mut self, rect: Rect, resize_to_fit: bool) -> &mut Self {
        if !rect.is_finite() {
            log::warn!("viewport: ensure_visible ignored non-finite {rect:?}");
            return self;
        }
        let rect = rect.normalized();
        if resize_to_fit
            && (rect.size.x > self.world_screen_width() || rect.size.y > self.world_screen_height())
        {
            if let Some(s) = self.fit_scale(Some(rect.size.x), Some(rect.size.y)) {
                self.scale_to(Vec2::splat(s), true);
                self.state.emit(ViewportEvent::Zoomed { kind: MoveKind::Manual });
            }
        }

        let (min, max) = (rect.min(), rect.max());
        let mut moved = false;
        if min.x < self.left() {
            self.state.set_left(min.x);
            moved = true;
        } else if max.x > self.right() {
            self.state.set_right(max.x);
            moved = true;
        }
        if min.y < self.top() {
            self.state.set_top(min.y);
            moved = true;
        } else if max.y > self.bottom() {
            self.state.set_bottom(max.y);
            moved = true;
        }
        if moved {
            self.state.emit(ViewportEvent::Moved { kind: MoveKind::Manual });
        }
        self.reset_after_manual_move();
        self
    }

    fn fit_scale(&self, width: Option<f32>, height: Option<f32>) -> Option<f32> {
        let screen = self.state.screen_size().valid()?;
        let world = self.world_size();
        let width = positive(width.or(world.map(|w| w.width)))?;
        let height = positive(height.or(world.map(|w| w.height)))?;
        Some((screen.width / width).min(screen.height / height))
    }

    fn scale_to(&mut self, scale: Vec2, keep_center: bool) {
        let saved = keep_center.then(|| self.state.center());
        self.state.set_scale(scale);
        if let Some(c) = saved {
            self.state.set_center(c);
        }
    }

    fn zoomed(&mut self) -> &mut Self {
        self.state.emit(ViewportEvent::Zoomed { kind: MoveKind::Manual });
        self.reset_after_manual_move();
        self
    }
}

fn positive(v: Option<f32>) -> Option<f32> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

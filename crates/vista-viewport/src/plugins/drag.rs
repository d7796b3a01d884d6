use vista_engine::coords::Vec2;
use vista_engine::input::{Pointer, PointerId};

use crate::event::{MoveKind, ViewportEvent};
use crate::options::Direction;
use crate::plugin::{Behavior, PluginKind, WheelInput};
use crate::state::ViewportState;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragOptions {
    pub direction: Direction,
    /// Multiplier on pointer travel.
    pub factor: f32,
    /// When false, presses never start a drag (wheel scrolling still works).
    pub press_drag: bool,
    /// Scroll with the wheel when the Wheel plugin is absent.
    pub wheel: bool,
    pub wheel_scroll: f32,
    /// Scroll with the wheel direction instead of against it.
    pub reverse: bool,
    /// Pixels per wheel line.
    pub line_height: f32,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            direction: Direction::All,
            factor: 1.0,
            press_drag: true,
            wheel: true,
            wheel_scroll: 1.0,
            reverse: false,
            line_height: 20.0,
        }
    }
}

/// One-pointer panning.
#[derive(Debug, Clone, Default)]
pub struct Drag {
    options: DragOptions,
    current: Option<PointerId>,
    last: Option<Vec2>,
    moved: bool,
}

impl Drag {
    pub fn new(options: DragOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Drag crossed its threshold and is translating.
    pub fn is_active(&self) -> bool {
        self.moved
    }

    fn engage(&mut self, vp: &mut ViewportState, pointer: &Pointer) {
        self.current = Some(pointer.id);
        self.last = Some(pointer.pos);
        self.moved = false;
        vp.engaged.drag = false;
    }

    fn end(&mut self, vp: &mut ViewportState, pos: Vec2) {
        if self.moved {
            let world = vp.to_world(pos);
            vp.emit(ViewportEvent::DragEnd { screen: pos, world });
            log::debug!("drag: end at {pos:?}");
        }
        self.current = None;
        self.last = None;
        self.moved = false;
        vp.engaged.drag = false;
    }

    fn may_drive(vp: &ViewportState) -> bool {
        vp.pointers().len() == 1 || !vp.has_plugin(PluginKind::Pinch)
    }
}

impl Behavior for Drag {
    fn on_down(&mut self, vp: &mut ViewportState, pointer: &Pointer) {
        if !self.options.press_drag {
            return;
        }
        if Self::may_drive(vp) {
            self.engage(vp, pointer);
        } else {
            // A second contact with Pinch installed hands the gesture over.
            self.end(vp, pointer.pos);
        }
    }

    fn on_move(&mut self, vp: &mut ViewportState, pointer: &Pointer) {
        let (Some(current), Some(last)) = (self.current, self.last) else {
            return;
        };
        if current != pointer.id {
            return;
        }
        if vp.engaged.pinch || !Self::may_drive(vp) {
            self.end(vp, pointer.pos);
            return;
        }

        // Same threshold state the coordinator uses to rule out a click.
        if !self.moved && !pointer.moved {
            return;
        }

        let d = pointer.pos - last;
        let dir = self.options.direction;
        let factor = self.options.factor;
        let delta = Vec2::new(
            if dir.has_x() { d.x * factor } else { 0.0 },
            if dir.has_y() { d.y * factor } else { 0.0 },
        );
        vp.translate(delta);
        self.last = Some(pointer.pos);

        if !self.moved {
            self.moved = true;
            vp.engaged.drag = true;
            let world = vp.to_world(pointer.pos);
            vp.emit(ViewportEvent::DragStart { screen: pointer.pos, world });
            log::debug!("drag: start by {}", pointer.id);
        }
        vp.emit(ViewportEvent::Moved { kind: MoveKind::Drag });
    }

    fn on_up(&mut self, vp: &mut ViewportState, pointer: &Pointer) {
        if !self.options.press_drag {
            return;
        }
        match vp.pointers().single() {
            // Continue with the contact that is still down.
            Some(rest) => {
                self.current = Some(rest.id);
                self.last = Some(rest.pos);
                self.moved = false;
                vp.engaged.drag = false;
            }
            None if vp.pointers().is_empty() => self.end(vp, pointer.pos),
            None => {}
        }
    }

    fn on_wheel(&mut self, vp: &mut ViewportState, wheel: &WheelInput) {
        if !self.options.wheel || vp.has_plugin(PluginKind::Wheel) {
            return;
        }
        let px = wheel.delta.to_pixels(self.options.line_height);
        let sign = if self.options.reverse { 1.0 } else { -1.0 };
        let scroll = self.options.wheel_scroll * sign;
        let dir = self.options.direction;
        let delta = Vec2::new(
            if dir.has_x() { px.x * scroll } else { 0.0 },
            if dir.has_y() { px.y * scroll } else { 0.0 },
        );
        if delta == Vec2::zero() {
            return;
        }
        vp.translate(delta);
        vp.emit(ViewportEvent::Moved { kind: MoveKind::WheelScroll });
    }

    fn on_remove(&mut self, vp: &mut ViewportState) {
        self.current = None;
        self.last = None;
        self.moved = false;
        vp.engaged.drag = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{down, harness, move_to, up};
    use vista_engine::input::{InputEvent, MouseWheelDelta};

    #[test]
    fn follows_pointer_after_threshold() {
        let mut vp = harness();
        vp.drag(DragOptions::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 103.0, 100.0);
        assert_eq!(vp.position(), Vec2::zero());
        move_to(&mut vp, 0, 110.0, 100.0);
        assert_eq!(vp.position(), Vec2::new(10.0, 0.0));
        move_to(&mut vp, 0, 115.0, 90.0);
        assert_eq!(vp.position(), Vec2::new(15.0, -10.0));
        assert!(vp.engagement().drag);
        up(&mut vp, 0);
        assert!(!vp.engagement().drag);

        let events: Vec<_> = vp.drain_events().collect();
        assert!(matches!(events.first(), Some(ViewportEvent::DragStart { .. })));
        assert!(matches!(events.last(), Some(ViewportEvent::DragEnd { .. })));
    }

    #[test]
    fn click_and_drag_share_the_threshold() {
        let mut vp = harness();
        vp.drag(DragOptions::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 104.0, 100.0);
        up(&mut vp, 0);
        let events: Vec<_> = vp.drain_events().collect();
        assert!(matches!(events.as_slice(), [ViewportEvent::Clicked { .. }]));
        assert_eq!(vp.position(), Vec2::zero());

        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 105.0, 100.0);
        up(&mut vp, 0);
        let events: Vec<_> = vp.drain_events().collect();
        assert!(events.iter().all(|e| !matches!(e, ViewportEvent::Clicked { .. })));
        assert!(matches!(events.first(), Some(ViewportEvent::DragStart { .. })));
        assert_eq!(vp.position(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn direction_and_factor_shape_translation() {
        let mut vp = harness();
        vp.drag(DragOptions { direction: Direction::Y, factor: 2.0, ..Default::default() });
        down(&mut vp, 0, 0.0, 0.0);
        move_to(&mut vp, 0, 50.0, 10.0);
        assert_eq!(vp.position(), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn second_pointer_with_pinch_stops_drag() {
        let mut vp = harness();
        vp.drag(DragOptions::default()).pinch(Default::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 120.0, 100.0);
        down(&mut vp, 1, 300.0, 100.0);
        assert!(!vp.engagement().drag);
        assert!(vp.drain_events().any(|e| matches!(e, ViewportEvent::DragEnd { .. })));
    }

    #[test]
    fn resumes_with_remaining_pointer() {
        let mut vp = harness();
        vp.drag(DragOptions::default()).pinch(Default::default());
        down(&mut vp, 0, 100.0, 100.0);
        down(&mut vp, 1, 300.0, 100.0);
        up(&mut vp, 0);
        let before = vp.position();
        move_to(&mut vp, 1, 320.0, 100.0);
        assert_eq!(vp.position(), before + Vec2::new(20.0, 0.0));
    }

    #[test]
    fn press_drag_off_ignores_presses() {
        let mut vp = harness();
        vp.drag(DragOptions { press_drag: false, ..Default::default() });
        down(&mut vp, 0, 0.0, 0.0);
        move_to(&mut vp, 0, 50.0, 50.0);
        assert_eq!(vp.position(), Vec2::zero());
    }

    #[test]
    fn wheel_scrolls_without_wheel_plugin() {
        let mut vp = harness();
        vp.drag(DragOptions::default());
        vp.dispatch(InputEvent::Wheel {
            delta: MouseWheelDelta::Pixel { x: 0.0, y: 30.0 },
            pos: Vec2::new(10.0, 10.0),
        });
        assert_eq!(vp.position(), Vec2::new(0.0, -30.0));

        vp.wheel(Default::default());
        vp.dispatch(InputEvent::Wheel {
            delta: MouseWheelDelta::Pixel { x: 0.0, y: 30.0 },
            pos: Vec2::new(10.0, 10.0),
        });
        assert!(vp.drain_events().any(|e| e == ViewportEvent::Zoomed { kind: MoveKind::Wheel }));
    }
}

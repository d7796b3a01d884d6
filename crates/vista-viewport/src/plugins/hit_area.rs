use vista_engine::coords::Rect;
use vista_engine::input::Pointer;

use crate::plugin::Behavior;
use crate::state::ViewportState;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct HitAreaOptions {
    /// Interactive region in world coordinates.
    pub rect: Option<Rect>,
}

/// Rejects presses that land outside an interactive region.
///
/// The region is the explicit world rectangle if one is set, else the
/// target's local bounds, else whatever is currently visible.
#[derive(Debug, Clone, Default)]
pub struct HitArea {
    rect: Option<Rect>,
}

impl HitArea {
    pub fn new(options: HitAreaOptions) -> Self {
        Self { rect: options.rect }
    }

    pub fn set_rect(&mut self, rect: Option<Rect>) {
        self.rect = rect;
    }

    /// The effective region in world coordinates.
    pub fn region(&self, vp: &ViewportState) -> Rect {
        self.rect
            .or_else(|| vp.target().local_bounds())
            .unwrap_or_else(|| vp.visible_bounds())
    }
}

impl Behavior for HitArea {
    fn on_down(&mut self, vp: &mut ViewportState, pointer: &Pointer) {
        let world = vp.to_world(pointer.pos);
        if !self.region(vp).contains(world) {
            log::debug!("hit-area: {} pressed outside at {:?}", pointer.id, world);
            vp.reject_pointer(pointer.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;
    use crate::{PluginKind, ViewportEvent};
    use vista_engine::coords::Vec2;
    use vista_engine::input::{InputEvent, PointerId};

    #[test]
    fn press_outside_is_ignored_by_later_handlers() {
        let mut vp = harness();
        vp.hit_area(HitAreaOptions { rect: Some(Rect::new(0.0, 0.0, 100.0, 100.0)) }).drag(Default::default());
        vp.dispatch(InputEvent::PointerDown { id: PointerId::MOUSE, pos: Vec2::new(300.0, 300.0) });
        assert!(vp.state().pointers().is_empty());
        vp.dispatch(InputEvent::PointerMove { id: PointerId::MOUSE, pos: Vec2::new(400.0, 400.0) });
        vp.dispatch(InputEvent::PointerUp { id: PointerId::MOUSE });
        assert_eq!(vp.position(), Vec2::zero());
        assert!(vp.drain_events().all(|e| !matches!(e, ViewportEvent::Clicked { .. })));
    }

    #[test]
    fn host_click_after_rejected_press_is_dropped() {
        let mut vp = harness();
        vp.hit_area(HitAreaOptions { rect: Some(Rect::new(0.0, 0.0, 100.0, 100.0)) });
        vp.dispatch(InputEvent::PointerDown { id: PointerId::MOUSE, pos: Vec2::new(300.0, 300.0) });
        vp.dispatch(InputEvent::PointerUp { id: PointerId::MOUSE });
        vp.dispatch(InputEvent::Click { pos: Vec2::new(300.0, 300.0) });
        assert_eq!(vp.drain_events().count(), 0);

        // The next interaction inside the area clicks normally.
        vp.dispatch(InputEvent::PointerDown { id: PointerId::MOUSE, pos: Vec2::new(50.0, 50.0) });
        vp.dispatch(InputEvent::PointerUp { id: PointerId::MOUSE });
        vp.dispatch(InputEvent::Click { pos: Vec2::new(50.0, 50.0) });
        assert_eq!(vp.drain_events().count(), 1);
    }

    #[test]
    fn press_on_edge_is_accepted() {
        let mut vp = harness();
        vp.hit_area(HitAreaOptions { rect: Some(Rect::new(0.0, 0.0, 100.0, 100.0)) });
        vp.dispatch(InputEvent::PointerDown { id: PointerId::MOUSE, pos: Vec2::new(100.0, 100.0) });
        assert_eq!(vp.state().pointers().len(), 1);
    }

    #[test]
    fn defaults_to_visible_area() {
        let mut vp = harness();
        vp.hit_area(HitAreaOptions::default());
        let area = vp.plugin::<HitArea>().map(|h| h.region(vp.state()));
        assert_eq!(area, Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert!(vp.has_plugin(PluginKind::HitArea));
    }
}

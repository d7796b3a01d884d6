//! Vista viewport: pan, pinch-zoom, wheel-zoom, momentum, bounce, snap,
//! follow and clamp for a 2D camera, on top of `vista-engine`.
//!
//! # Quick start
//!
//! ```rust
//! use vista_engine::coords::Vec2;
//! use vista_engine::input::{InputEvent, PointerId};
//! use vista_viewport::prelude::*;
//!
//! let mut vp = Viewport::new(ViewportConfig::new(800.0, 600.0).world(1600.0, 1200.0));
//! vp.drag(DragOptions::default())
//!     .decelerate(DecelerateOptions::default())
//!     .clamp(ClampOptions::default());
//!
//! vp.move_corner(400.0, 300.0);
//! vp.dispatch(InputEvent::PointerDown { id: PointerId::MOUSE, pos: Vec2::new(100.0, 100.0) });
//! vp.dispatch(InputEvent::PointerMove { id: PointerId::MOUSE, pos: Vec2::new(140.0, 100.0) });
//! vp.dispatch(InputEvent::PointerUp { id: PointerId::MOUSE });
//! vp.tick(16.0);
//!
//! for event in vp.drain_events() {
//!     println!("{event:?}");
//! }
//! ```
//!
//! Handlers run in a fixed order regardless of installation order:
//! `hit-area, drag, pinch, wheel, follow, decelerate, bounce, snap, clamp`.
//! Clamp always runs last, so its correction is final for every event and tick.

pub mod config;
pub mod ease;
pub mod error;
pub mod event;
pub mod options;
pub mod plugin;
pub mod plugins;
pub mod state;
pub mod target;
pub mod viewport;

#[cfg(test)]
mod testing;

pub use config::ViewportConfig;
pub use ease::Ease;
pub use error::{Error, Result};
pub use event::{Axis, MoveKind, ViewportEvent};
pub use options::{Align, Direction, Sides, Underflow, ZoomLimits};
pub use plugin::{Behavior, Plugin, PluginKind, PluginVariant, WheelInput};
pub use state::{Engagement, OutOfBounds, ViewportState};
pub use target::{RenderTarget, Transform};
pub use viewport::Viewport;

/// Convenience re-exports.
pub mod prelude {
    pub use crate::ease::Ease;
    pub use crate::event::{Axis, MoveKind, ViewportEvent};
    pub use crate::options::{Direction, Sides, Underflow, ZoomLimits};
    pub use crate::plugin::PluginKind;
    pub use crate::plugins::*;
    pub use crate::target::{RenderTarget, Transform};
    pub use crate::{Viewport, ViewportConfig};
}

#[cfg(test)]
mod scenarios {
    use vista_engine::coords::Vec2;

    use crate::prelude::*;
    use crate::testing::{approx, down, harness, move_to, up};

    #[test]
    fn fit_centered_world_is_in_bounds() {
        let mut vp = harness();
        vp.fit(false);
        assert_eq!(vp.scale(), Vec2::splat(0.5));
        vp.move_center(800.0, 600.0);
        let oob = vp.oob().unwrap();
        assert!(!oob.any());
    }

    #[test]
    fn clamp_x_fixes_left_and_keeps_top() {
        let mut vp = harness();
        vp.clamp(ClampOptions { direction: Direction::X, ..Default::default() });
        vp.move_center(300.0, -40.0);
        let top = vp.top();
        assert!(vp.left() < 0.0);
        vp.tick(16.0);
        assert_eq!(vp.left(), 0.0);
        assert_eq!(vp.top(), top);
    }

    #[test]
    fn momentum_stops_after_ninety_frames() {
        let mut vp = harness();
        vp.decelerate(DecelerateOptions { friction: 0.95, min_speed: 0.01, ..Default::default() });
        if let Some(d) = vp.plugin_mut::<Decelerate>() {
            d.activate(Vec2::new(1.0, 0.0));
        }
        for _ in 0..89 {
            vp.tick(16.0);
        }
        assert!(vp.plugin::<Decelerate>().is_some_and(Decelerate::is_active));
        vp.tick(16.0);
        assert!(!vp.plugin::<Decelerate>().is_some_and(Decelerate::is_active));
    }

    #[test]
    fn snap_travels_at_constant_speed() {
        let mut vp = harness();
        vp.move_center(0.0, 0.0);
        vp.snap(100.0, 100.0, SnapOptions { speed: 1.0, ..Default::default() });
        vp.tick(50.0);
        let c = vp.center();
        assert!(approx(c.length(), 50.0));
        assert!(approx(c.x, c.y));
        assert!(c.x < 100.0 && c.y < 100.0);
    }

    #[test]
    fn clamp_keeps_everything_in_bounds() {
        let mut vp = harness();
        vp.drag(Default::default())
            .pinch(Default::default())
            .wheel(Default::default())
            .decelerate(Default::default())
            .clamp(Default::default());

        down(&mut vp, 0, 400.0, 300.0);
        for i in 1..20 {
            move_to(&mut vp, 0, 400.0 + 37.0 * i as f32, 300.0 - 23.0 * i as f32);
            vp.tick(16.0);
            assert!(!vp.oob().unwrap().any());
        }
        up(&mut vp, 0);
        for _ in 0..30 {
            vp.tick(16.0);
            assert!(!vp.oob().unwrap().any());
        }
    }

    #[test]
    fn drag_and_pinch_hand_over_cleanly() {
        let mut vp = harness();
        vp.drag(Default::default()).pinch(Default::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 150.0, 100.0);
        assert!(vp.engagement().drag && !vp.engagement().pinch);

        down(&mut vp, 1, 300.0, 100.0);
        move_to(&mut vp, 1, 350.0, 100.0);
        move_to(&mut vp, 0, 140.0, 100.0);
        let e = vp.engagement();
        assert!(e.pinch && !e.drag);

        up(&mut vp, 1);
        move_to(&mut vp, 0, 200.0, 100.0);
        let e = vp.engagement();
        assert!(e.drag && !e.pinch);
    }

    #[test]
    fn bounce_settles_after_release() {
        let mut vp = harness();
        vp.drag(Default::default())
            .decelerate(Default::default())
            .bounce(BounceOptions::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 300.0, 100.0);
        up(&mut vp, 0);
        for _ in 0..200 {
            vp.tick(16.0);
        }
        let oob = vp.oob().unwrap();
        assert!(!oob.any());
        assert!(!vp.engagement().bouncing);
    }

    #[test]
    fn momentum_past_an_edge_runs_before_bounce() {
        let mut vp = harness();
        vp.drag(Default::default())
            .decelerate(Default::default())
            .bounce(BounceOptions::default());
        down(&mut vp, 0, 100.0, 100.0);
        move_to(&mut vp, 0, 120.0, 100.0);
        vp.tick(20.0);
        move_to(&mut vp, 0, 140.0, 100.0);
        up(&mut vp, 0);

        // Released 40px past the left edge at 1 px/ms.
        let e = vp.engagement();
        assert!(e.momentum_x && !e.bouncing);
        let before = vp.position().x;
        vp.tick(16.0);
        assert!(approx(vp.position().x - before, 16.0));
        assert!(!vp.engagement().bouncing);

        for _ in 0..200 {
            vp.tick(16.0);
        }
        assert_eq!(vp.position().x, 0.0);
        let e = vp.engagement();
        assert!(!e.momentum_x && !e.bouncing);
    }

    #[test]
    fn pinch_to_a_point_stays_invertible() {
        let mut vp = harness();
        vp.pinch(Default::default());
        down(&mut vp, 0, 0.0, 0.0);
        down(&mut vp, 1, 400.0, 0.0);
        for step in 1..=40 {
            move_to(&mut vp, 1, 400.0 - 10.0 * step as f32, 0.0);
        }
        let s = vp.scale();
        assert!(s.x > 0.0 && s.y > 0.0);
        let p = Vec2::new(123.0, 45.0);
        let back = vp.to_screen(vp.to_world(p));
        assert!(back.is_finite());
    }
}

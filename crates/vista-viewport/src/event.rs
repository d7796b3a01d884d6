use vista_engine::coords::Vec2;
use vista_engine::input::PointerId;

/// Axis of a one-dimensional correction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// What moved the viewport.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveKind {
    Drag,
    Pinch,
    Wheel,
    /// Wheel translated the view instead of zooming.
    WheelScroll,
    Decelerate,
    Bounce(Axis),
    Snap,
    Follow,
    Clamp(Axis),
    /// Programmatic change through the viewport API.
    Manual,
}

/// Notifications produced by the viewport, drained by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportEvent {
    /// A single pointer was pressed and released without crossing the
    /// drag threshold. Also produced by a host click that was not already
    /// resolved by a press/release pair.
    Clicked { screen: Vec2, world: Vec2, pointer: Option<PointerId> },
    /// The transform translated.
    Moved { kind: MoveKind },
    /// The transform scaled.
    Zoomed { kind: MoveKind },
    DragStart { screen: Vec2, world: Vec2 },
    DragEnd { screen: Vec2, world: Vec2 },
    PinchStart,
    PinchEnd,
    SnapStart,
    SnapEnd,
    BounceStart { axis: Axis },
    BounceEnd { axis: Axis },
}

//! The nine interaction handlers, listed in dispatch order.

pub mod hit_area;
pub mod drag;
pub mod pinch;
pub mod wheel;
pub mod follow;
pub mod decelerate;
pub mod bounce;
pub mod snap;
pub mod clamp;

pub use bounce::{Bounce, BounceOptions};
pub use clamp::{Clamp, ClampOptions};
pub use decelerate::{Decelerate, DecelerateOptions};
pub use drag::{Drag, DragOptions};
pub use follow::{Follow, FollowOptions};
pub use hit_area::{HitArea, HitAreaOptions};
pub use pinch::{Pinch, PinchOptions};
pub use snap::{Snap, SnapOptions};
pub use wheel::{Wheel, WheelOptions};

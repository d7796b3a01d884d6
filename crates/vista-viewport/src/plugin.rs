//! Plugin capability interface and registry types.

use std::fmt;
use std::str::FromStr;

use vista_engine::coords::Vec2;
use vista_engine::input::{MouseWheelDelta, Pointer};

use crate::error::Error;
use crate::plugins::{Bounce, Clamp, Decelerate, Drag, Follow, HitArea, Pinch, Snap, Wheel};
use crate::state::ViewportState;

// ── PluginKind ────────────────────────────────────────────────────────────

/// The nine handler kinds, declared in dispatch order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PluginKind {
    HitArea,
    Drag,
    Pinch,
    Wheel,
    Follow,
    Decelerate,
    Bounce,
    Snap,
    Clamp,
}

impl PluginKind {
    /// Fixed dispatch order. Installation order never changes it.
    pub const PRECEDENCE: [PluginKind; 9] = [
        PluginKind::HitArea,
        PluginKind::Drag,
        PluginKind::Pinch,
        PluginKind::Wheel,
        PluginKind::Follow,
        PluginKind::Decelerate,
        PluginKind::Bounce,
        PluginKind::Snap,
        PluginKind::Clamp,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            PluginKind::HitArea => "hit-area",
            PluginKind::Drag => "drag",
            PluginKind::Pinch => "pinch",
            PluginKind::Wheel => "wheel",
            PluginKind::Follow => "follow",
            PluginKind::Decelerate => "decelerate",
            PluginKind::Bounce => "bounce",
            PluginKind::Snap => "snap",
            PluginKind::Clamp => "clamp",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PluginKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        PluginKind::PRECEDENCE
            .into_iter()
            .find(|k| k.name().replace('-', "") == key)
            .ok_or_else(|| Error::UnknownPlugin(s.to_string()))
    }
}

/// Set of plugin kinds.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub(crate) struct PluginSet(u16);

impl PluginSet {
    #[inline]
    pub fn contains(self, kind: PluginKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    #[inline]
    pub fn set(&mut self, kind: PluginKind, on: bool) {
        if on {
            self.0 |= 1 << kind.index();
        } else {
            self.0 &= !(1 << kind.index());
        }
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────

/// A wheel notch or trackpad scroll at a screen position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelInput {
    pub delta: MouseWheelDelta,
    pub pos: Vec2,
}

/// Hooks a handler may implement. All default to no-ops.
///
/// Pointer hooks receive the pointer's state after the coordinator updated the
/// registry: on `on_up` the pointer is already gone from
/// [`ViewportState::pointers`].
pub trait Behavior {
    fn on_down(&mut self, _vp: &mut ViewportState, _pointer: &Pointer) {}

    fn on_move(&mut self, _vp: &mut ViewportState, _pointer: &Pointer) {}

    fn on_up(&mut self, _vp: &mut ViewportState, _pointer: &Pointer) {}

    fn on_wheel(&mut self, _vp: &mut ViewportState, _wheel: &WheelInput) {}

    /// Advances animations by `elapsed_ms`, already clamped by the coordinator.
    fn on_tick(&mut self, _vp: &mut ViewportState, _elapsed_ms: f32) {}

    fn on_resize(&mut self, _vp: &mut ViewportState) {}

    /// Called after a programmatic move so animations restart from the new
    /// transform.
    fn on_reset(&mut self, _vp: &mut ViewportState) {}

    /// Called when the plugin leaves the registry.
    fn on_remove(&mut self, _vp: &mut ViewportState) {}
}

// ── Plugin ────────────────────────────────────────────────────────────────

/// A handler instance of one of the nine kinds.
#[derive(Debug)]
pub enum Plugin {
    HitArea(HitArea),
    Drag(Drag),
    Pinch(Pinch),
    Wheel(Wheel),
    Follow(Follow),
    Decelerate(Decelerate),
    Bounce(Bounce),
    Snap(Snap),
    Clamp(Clamp),
}

/// Typed access to the concrete handler inside a [`Plugin`].
pub trait PluginVariant: Sized {
    const KIND: PluginKind;

    fn from_plugin(plugin: &Plugin) -> Option<&Self>;
    fn from_plugin_mut(plugin: &mut Plugin) -> Option<&mut Self>;
}

macro_rules! plugin_variants {
    ($($variant:ident),* $(,)?) => {
        impl Plugin {
            pub fn kind(&self) -> PluginKind {
                match self {
                    $(Plugin::$variant(_) => PluginKind::$variant,)*
                }
            }

            pub(crate) fn behavior_mut(&mut self) -> &mut dyn Behavior {
                match self {
                    $(Plugin::$variant(p) => p,)*
                }
            }
        }

        $(
            impl From<$variant> for Plugin {
                fn from(p: $variant) -> Self {
                    Plugin::$variant(p)
                }
            }

            impl PluginVariant for $variant {
                const KIND: PluginKind = PluginKind::$variant;

                fn from_plugin(plugin: &Plugin) -> Option<&Self> {
                    match plugin {
                        Plugin::$variant(p) => Some(p),
                        _ => None,
                    }
                }

                fn from_plugin_mut(plugin: &mut Plugin) -> Option<&mut Self> {
                    match plugin {
                        Plugin::$variant(p) => Some(p),
                        _ => None,
                    }
                }
            }
        )*
    };
}

plugin_variants!(HitArea, Drag, Pinch, Wheel, Follow, Decelerate, Bounce, Snap, Clamp);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_matches_declaration_order() {
        for (i, kind) in PluginKind::PRECEDENCE.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn kinds_parse_by_name() {
        assert_eq!("hit-area".parse::<PluginKind>().unwrap(), PluginKind::HitArea);
        assert_eq!("hitArea".parse::<PluginKind>().unwrap(), PluginKind::HitArea);
        assert_eq!("Decelerate".parse::<PluginKind>().unwrap(), PluginKind::Decelerate);
        assert_eq!(
            "teleport".parse::<PluginKind>(),
            Err(Error::UnknownPlugin("teleport".to_string()))
        );
    }

    #[test]
    fn plugin_set_tracks_membership() {
        let mut set = PluginSet::default();
        set.set(PluginKind::Pinch, true);
        set.set(PluginKind::Clamp, true);
        assert!(set.contains(PluginKind::Pinch) && set.contains(PluginKind::Clamp));
        set.set(PluginKind::Pinch, false);
        assert!(!set.contains(PluginKind::Pinch));
        assert!(!set.contains(PluginKind::Drag));
    }

    #[test]
    fn variant_access_checks_kind() {
        let mut plugin = Plugin::from(Drag::default());
        assert_eq!(plugin.kind(), PluginKind::Drag);
        assert!(Drag::from_plugin(&plugin).is_some());
        assert!(Pinch::from_plugin_mut(&mut plugin).is_none());
    }
}

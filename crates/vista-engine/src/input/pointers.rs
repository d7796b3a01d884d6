use crate::coords::Vec2;

use super::types::PointerId;

/// An active contact point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    /// Current screen position.
    pub pos: Vec2,
    /// Screen position before the most recent move.
    pub prev: Vec2,
    /// Screen position of the press.
    pub down_pos: Vec2,
    /// Set once the contact travelled `threshold` pixels from `down_pos` on
    /// either axis. Never cleared until release.
    pub moved: bool,
}

/// Live contacts keyed by id.
///
/// Membership has set semantics. Iteration follows arrival order so "the first
/// two pointers" is stable for two-finger gestures.
#[derive(Debug, Default, Clone)]
pub struct PointerSet {
    pointers: Vec<Pointer>,
}

impl PointerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a press. A repeated press for a tracked id restarts it in place.
    pub fn press(&mut self, id: PointerId, pos: Vec2) {
        let pointer = Pointer { id, pos, prev: pos, down_pos: pos, moved: false };
        match self.pointers.iter_mut().find(|p| p.id == id) {
            Some(existing) => *existing = pointer,
            None => self.pointers.push(pointer),
        }
    }

    /// Moves a tracked pointer and updates its threshold flag.
    ///
    /// Returns `None` for untracked ids.
    pub fn motion(&mut self, id: PointerId, pos: Vec2, threshold: f32) -> Option<Pointer> {
        let p = self.pointers.iter_mut().find(|p| p.id == id)?;
        p.prev = p.pos;
        p.pos = pos;
        if !p.moved {
            let d = pos - p.down_pos;
            p.moved = d.x.abs() >= threshold || d.y.abs() >= threshold;
        }
        Some(*p)
    }

    /// Removes a pointer, returning its final state.
    pub fn release(&mut self, id: PointerId) -> Option<Pointer> {
        let idx = self.pointers.iter().position(|p| p.id == id)?;
        Some(self.pointers.remove(idx))
    }

    pub fn get(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    #[inline]
    pub fn contains(&self, id: PointerId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// The two earliest contacts, if at least two are down.
    pub fn first_two(&self) -> Option<(Pointer, Pointer)> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// The only contact, if exactly one is down.
    pub fn single(&self) -> Option<Pointer> {
        match self.pointers.as_slice() {
            [p] => Some(*p),
            _ => None,
        }
    }
}

//! The object a viewport moves.

use std::cell::RefCell;
use std::rc::Rc;

use vista_engine::coords::{Rect, Vec2};

/// A translatable, scalable content container.
///
/// Screen point `p` maps to local (world) point `(p - position) / scale`.
/// Hosts wrap their scene-graph node in this trait; [`Transform`] is a
/// standalone implementation for headless use.
pub trait RenderTarget {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn scale(&self) -> Vec2;
    fn set_scale(&mut self, scale: Vec2);

    /// Content bounds in local coordinates, when the host knows them.
    fn local_bounds(&self) -> Option<Rect> {
        None
    }

    fn to_local(&self, global: Vec2) -> Vec2 {
        (global - self.position()).div_elem(self.scale())
    }

    fn to_global(&self, local: Vec2) -> Vec2 {
        local.mul_elem(self.scale()) + self.position()
    }
}

/// Plain position/scale pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub bounds: Option<Rect>,
}

impl Transform {
    #[inline]
    pub const fn new(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale, bounds: None }
    }

    #[inline]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::splat(1.0))
    }
}

impl RenderTarget for Transform {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    fn local_bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

/// Shared targets let the host keep a handle to the node the viewport drives.
impl<T: RenderTarget + ?Sized> RenderTarget for Rc<RefCell<T>> {
    fn position(&self) -> Vec2 {
        self.borrow().position()
    }

    fn set_position(&mut self, position: Vec2) {
        self.borrow_mut().set_position(position);
    }

    fn scale(&self) -> Vec2 {
        self.borrow().scale()
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.borrow_mut().set_scale(scale);
    }

    fn local_bounds(&self) -> Option<Rect> {
        self.borrow().local_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_and_global_are_inverse() {
        let t = Transform::new(Vec2::new(-50.0, 20.0), Vec2::new(2.0, 4.0));
        let world = t.to_local(Vec2::new(150.0, 60.0));
        assert_eq!(world, Vec2::new(100.0, 10.0));
        assert_eq!(t.to_global(world), Vec2::new(150.0, 60.0));
    }

    #[test]
    fn shared_target_writes_through() {
        let shared = Rc::new(RefCell::new(Transform::default()));
        let mut handle = shared.clone();
        handle.set_position(Vec2::new(3.0, 4.0));
        handle.set_scale(Vec2::splat(2.0));
        assert_eq!(shared.borrow().position, Vec2::new(3.0, 4.0));
        assert_eq!(shared.borrow().scale, Vec2::splat(2.0));
    }
}

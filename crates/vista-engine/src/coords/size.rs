/// Width/height pair in logical pixels (screen) or world units (world).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and strictly positive.
    ///
    /// Boundary math divides by these values, so anything else is treated as
    /// "not configured".
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns `Some(self)` when valid.
    #[inline]
    pub fn valid(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }
}

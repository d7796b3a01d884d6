use vista_engine::coords::Size;

/// Construction-time settings for a [`Viewport`](crate::Viewport).
///
/// ```
/// use vista_viewport::ViewportConfig;
///
/// let config = ViewportConfig::new(800.0, 600.0).world(1600.0, 1200.0).threshold(8.0);
/// assert_eq!(config.threshold, 8.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    /// Screen size in logical pixels. Zero until the host knows it.
    pub screen: Size,
    /// World size. When unset the target's local bounds are used, if any.
    pub world: Option<Size>,
    /// Pixels a pointer must travel on either axis before it counts as moved.
    pub threshold: f32,
    /// Upper clamp for the elapsed time fed to handlers per tick.
    pub max_elapsed_ms: f32,
    /// Pending notifications kept before the oldest are dropped.
    pub max_queued_events: usize,
}

impl ViewportConfig {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self { screen: Size::new(screen_width, screen_height), ..Self::default() }
    }

    pub fn world(mut self, width: f32, height: f32) -> Self {
        self.world = Some(Size::new(width, height));
        self
    }

    pub fn threshold(mut self, px: f32) -> Self {
        self.threshold = px;
        self
    }

    pub fn max_elapsed_ms(mut self, ms: f32) -> Self {
        self.max_elapsed_ms = ms;
        self
    }

    pub fn max_queued_events(mut self, n: usize) -> Self {
        self.max_queued_events = n;
        self
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            screen: Size::default(),
            world: None,
            threshold: 5.0,
            max_elapsed_ms: 250.0,
            max_queued_events: 1024,
        }
    }
}

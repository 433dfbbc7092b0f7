//! Runtime options for the pipeline and frame driver

/// How the first frame measures elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstFrame {
    /// Measure against a previous timestamp of 0. Host timestamps are large
    /// absolute values, so the first frame jumps by that much rotation.
    FromZero,
    /// Treat the first timestamp received as the previous one, so the first
    /// frame contributes no rotation.
    #[default]
    SeedFromFirst,
}

/// Pipeline and animation options
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub first_frame: FirstFrame,
    /// Upper bound on the elapsed time fed into the rotation, in
    /// milliseconds. `None` keeps deltas unbounded.
    pub max_frame_delta_ms: Option<f64>,
    /// Check compile and link status and reject missing attributes.
    pub strict_shaders: bool,
}

impl RenderConfig {
    /// Reproduces the unhardened behavior: zero-based first frame, no
    /// clamping, no shader checks.
    pub fn baseline() -> Self {
        Self {
            first_frame: FirstFrame::FromZero,
            max_frame_delta_ms: None,
            strict_shaders: false,
        }
    }

    pub fn with_first_frame(mut self, first_frame: FirstFrame) -> Self {
        self.first_frame = first_frame;
        self
    }

    pub fn with_max_frame_delta(mut self, max_ms: f64) -> Self {
        self.max_frame_delta_ms = Some(max_ms);
        self
    }

    pub fn with_strict_shaders(mut self, strict: bool) -> Self {
        self.strict_shaders = strict;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            first_frame: FirstFrame::default(),
            max_frame_delta_ms: None,
            strict_shaders: false,
        }
    }
}

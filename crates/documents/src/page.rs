//! Page geometry.

/// Fixed metrics of the one-page document.
///
/// Units are PDF points (1/72 inch); the layout origin is the top-left
/// corner. `Default` is ISO A4 portrait with a uniform margin, matching the
/// coordinate space every block in the layout is calibrated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin: 50.0,
        }
    }
}

impl PageMetrics {
    /// Width of the content area between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Right edge of the content area; the line-items table ends here.
    pub fn content_right(&self) -> f32 {
        self.width - self.margin
    }

    /// Bottom edge of the content area.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

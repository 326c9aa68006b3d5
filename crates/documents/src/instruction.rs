//! Draw instructions: the closed set of positioned operations a layout pass
//! produces and a materializer consumes.
//!
//! Instructions live entirely within one render call. They are never
//! persisted or shared, so the types carry no serialization concerns.

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Horizontal anchoring of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One atomic positioned rendering operation in page space.
///
/// Page space puts the origin at the top-left corner with y growing
/// downward; the materializer owns the flip into device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    /// A single text run. `y` is the top edge of the glyph box.
    Text {
        content: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        align: TextAlign,
    },
    /// A stroked line segment.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    /// An axis-aligned filled rectangle. `y` is the top edge.
    FilledRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
}

impl DrawInstruction {
    pub fn text(
        content: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        align: TextAlign,
    ) -> Self {
        Self::Text {
            content: content.into(),
            x,
            y,
            size,
            color,
            align,
        }
    }

    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) -> Self {
        Self::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        }
    }

    pub fn filled_rect(x: f32, y: f32, w: f32, h: f32, color: Color) -> Self {
        Self::FilledRect { x, y, w, h, color }
    }
}

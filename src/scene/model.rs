use crate::{
    foundation::core::{Canvas, Point, Rect, Rgba8},
    theme::Gradient,
};

/// Backend-agnostic visual tree for one rendered view.
///
/// A scene is a canvas size, a background, and an ordered list of draw ops in
/// painter's order. Composition is pure and deterministic: the same slide,
/// theme and canvas always produce an identical scene.
#[derive(Clone, Debug)]
pub struct Scene {
    pub canvas: Canvas,
    pub background: Background,
    pub ops: Vec<SceneOp>,
}

impl Scene {
    pub fn new(canvas: Canvas, background: Background) -> Self {
        Self {
            canvas,
            background,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: SceneOp) {
        self.ops.push(op);
    }

    /// All text content in paint order, for inspection and tests.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            SceneOp::Text(span) => Some(span.text.as_str()),
            _ => None,
        })
    }
}

/// Scene background fill.
#[derive(Clone, Copy, Debug)]
pub enum Background {
    Solid(Rgba8),
    /// Top-to-bottom two-stop gradient resolved from the slide's accent.
    Linear(Gradient),
}

/// Horizontal anchoring of a text span within its `max_width` box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Relative text weight; resolved to concrete font weights by the text engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextWeight {
    #[default]
    Regular,
    Bold,
    Black,
}

/// A shaped-at-render-time run of text.
#[derive(Clone, Debug)]
pub struct TextSpan {
    pub text: String,
    /// Top-left origin of the layout box.
    pub origin: Point,
    pub size_px: f32,
    pub weight: TextWeight,
    pub color: Rgba8,
    /// Wrap width; `None` lays the text out on unbroken lines.
    pub max_width: Option<f32>,
    pub align: TextAlign,
    /// Prefer a monospaced family (preformatted blocks).
    pub mono: bool,
}

/// One draw operation in painter's order.
#[derive(Clone, Debug)]
pub enum SceneOp {
    /// Rounded rectangle panel with optional outline.
    Panel {
        rect: Rect,
        radius: f64,
        fill: Rgba8,
        stroke: Option<(Rgba8, f64)>,
    },
    Text(TextSpan),
    /// Bitmap or SVG slide asset scaled to fit `rect`, keyed by its
    /// normalized path in the prepared asset store.
    Image { key: String, rect: Rect },
    /// Straight line segment, optionally tipped with an arrowhead at `to`.
    Line {
        from: Point,
        to: Point,
        color: Rgba8,
        width: f64,
        arrow: bool,
    },
    /// Filled circle (indicator dots, bullets).
    Disc {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
}

use std::borrow::Cow;

use crate::{
    foundation::error::{DeckError, DeckResult},
    scene::model::{TextAlign, TextSpan, TextWeight},
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Stateful helper for shaping scene text spans with Parley.
///
/// Families resolve through the system font collection. Slides never carry
/// font files: a theme may prefer a named family, and the generic sans-serif
/// (or monospace, for preformatted blocks) stack is the fallback.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::new(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out one text span.
    pub fn layout_span(
        &mut self,
        span: &TextSpan,
        preferred_family: Option<&str>,
    ) -> DeckResult<parley::Layout<TextBrushRgba8>> {
        if !span.size_px.is_finite() || span.size_px <= 0.0 {
            return Err(DeckError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let brush = TextBrushRgba8 {
            r: span.color.r,
            g: span.color.g,
            b: span.color.b,
            a: span.color.a,
        };

        let generic = if span.mono {
            parley::style::GenericFamily::Monospace
        } else {
            parley::style::GenericFamily::SansSerif
        };
        let stack = match preferred_family.filter(|_| !span.mono) {
            Some(name) => parley::style::FontStack::List(Cow::Owned(vec![
                parley::style::FontFamily::Named(Cow::Owned(name.to_string())),
                parley::style::FontFamily::Generic(generic),
            ])),
            None => parley::style::FontStack::Single(parley::style::FontFamily::Generic(generic)),
        };

        let weight = match span.weight {
            TextWeight::Regular => parley::style::FontWeight::NORMAL,
            TextWeight::Bold => parley::style::FontWeight::BOLD,
            TextWeight::Black => parley::style::FontWeight::BLACK,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &span.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(stack));
        builder.push_default(parley::style::StyleProperty::FontSize(span.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&span.text);
        layout.break_all_lines(span.max_width);

        let alignment = match span.align {
            TextAlign::Start => parley::Alignment::Start,
            TextAlign::Center => parley::Alignment::Center,
            TextAlign::End => parley::Alignment::End,
        };
        layout.align(span.max_width, alignment, parley::AlignmentOptions::default());

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{Point, Rgba8};

    fn span(text: &str, size: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            origin: Point::new(0.0, 0.0),
            size_px: size,
            weight: TextWeight::Regular,
            color: Rgba8::opaque(255, 255, 255),
            max_width: Some(200.0),
            align: TextAlign::Start,
            mono: false,
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut engine = TextLayoutEngine::new();
        assert!(engine.layout_span(&span("x", 0.0), None).is_err());
        assert!(engine.layout_span(&span("x", f32::NAN), None).is_err());
    }

    #[test]
    fn layout_succeeds_for_plain_text() {
        let mut engine = TextLayoutEngine::new();
        engine.layout_span(&span("hello world", 16.0), None).unwrap();
    }
}

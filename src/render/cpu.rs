use std::collections::HashMap;

use crate::{
    assets::decode::{PreparedImage, PreparedSvg},
    assets::store::{PreparedAssetStore, PreparedVisual},
    foundation::core::{Point, Rect, Rgba8},
    foundation::error::{DeckError, DeckResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::text::TextLayoutEngine,
    scene::model::{Background, Scene, SceneOp},
};

/// Number of horizontal bands used to approximate the two-stop background
/// gradient. Band interpolation keeps the paint surface to solid fills.
const GRADIENT_BANDS: u32 = 128;

/// CPU rasterizer over `vello_cpu`.
pub struct CpuBackend {
    settings: RenderSettings,
    text_engine: TextLayoutEngine,
    image_cache: HashMap<String, vello_cpu::Image>,
    svg_cache: HashMap<SvgRasterKey, vello_cpu::Image>,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SvgRasterKey {
    key: String,
    width: u32,
    height: u32,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            text_engine: TextLayoutEngine::new(),
            image_cache: HashMap::new(),
            svg_cache: HashMap::new(),
            font_cache: HashMap::new(),
        }
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(
        &mut self,
        scene: &Scene,
        assets: &PreparedAssetStore,
    ) -> DeckResult<FrameRGBA> {
        let width_u16: u16 = scene
            .canvas
            .width
            .try_into()
            .map_err(|_| DeckError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = scene
            .canvas
            .height
            .try_into()
            .map_err(|_| DeckError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            let premul = crate::foundation::core::Rgba8Premul::from_straight_rgba(r, g, b, a);
            clear_pixmap(&mut pixmap, [premul.r, premul.g, premul.b, premul.a]);
        }

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        draw_background(&mut ctx, scene);
        for op in &scene.ops {
            self.draw_op(&mut ctx, op, assets)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn draw_background(ctx: &mut vello_cpu::RenderContext, scene: &Scene) {
    let w = scene.canvas.width_f64();
    let h = scene.canvas.height_f64();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match scene.background {
        Background::Solid(color) => {
            ctx.set_paint(color_to_cpu(color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        }
        Background::Linear(gradient) => {
            let bands = GRADIENT_BANDS.min(scene.canvas.height.max(1));
            let band_h = h / f64::from(bands);
            for i in 0..bands {
                let t = f64::from(i) / f64::from(bands.saturating_sub(1).max(1));
                let color = gradient.start.lerp(gradient.end, t);
                let y0 = f64::from(i) * band_h;
                // Overdraw a hair to avoid seams between bands.
                let y1 = (y0 + band_h + 0.5).min(h);
                ctx.set_paint(color_to_cpu(color));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, y0, w, y1));
            }
        }
    }
}

impl CpuBackend {
    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &SceneOp,
        assets: &PreparedAssetStore,
    ) -> DeckResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            SceneOp::Panel {
                rect,
                radius,
                fill,
                stroke,
            } => {
                let path = rounded_rect_path(*rect, *radius);
                ctx.set_paint(color_to_cpu(*fill));
                ctx.fill_path(&bezpath_to_cpu(&path));
                if let Some((color, width)) = stroke {
                    let ring = stroke_ring_path(*rect, *radius, *width);
                    ctx.set_paint(color_to_cpu(*color));
                    ctx.fill_path(&bezpath_to_cpu(&ring));
                }
                Ok(())
            }
            SceneOp::Text(span) => {
                let family = self.settings.font_family.clone();
                let layout = self
                    .text_engine
                    .layout_span(span, family.as_deref())
                    .map_err(|e| DeckError::render(format!("text layout failed: {e}")))?;

                ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                    span.origin.x,
                    span.origin.y,
                )));

                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let font = self.font_for_run(run.run());
                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
            SceneOp::Image { key, rect } => {
                let Some(visual) = assets.get(key) else {
                    tracing::warn!(key, "image reference was never prepared; skipping");
                    return Ok(());
                };
                match visual.clone() {
                    PreparedVisual::Image(img) => self.draw_bitmap(ctx, key, &img, *rect),
                    PreparedVisual::Svg(svg) => self.draw_svg(ctx, key, &svg, *rect),
                    PreparedVisual::Missing => Ok(()),
                }
            }
            SceneOp::Line {
                from,
                to,
                color,
                width,
                arrow,
            } => {
                if let Some(path) = line_path(*from, *to, *width, *arrow) {
                    ctx.set_paint(color_to_cpu(*color));
                    ctx.fill_path(&bezpath_to_cpu(&path));
                }
                Ok(())
            }
            SceneOp::Disc {
                center,
                radius,
                color,
            } => {
                use kurbo::Shape;
                let circle = kurbo::Circle::new(*center, *radius);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&bezpath_to_cpu(&circle.to_path(0.1)));
                Ok(())
            }
        }
    }

    fn font_for_run(
        &mut self,
        run: &parley::layout::Run<'_, crate::render::text::TextBrushRgba8>,
    ) -> vello_cpu::peniko::FontData {
        let font = run.font();
        let cache_key = (font.data.id(), font.index);
        if let Some(cached) = self.font_cache.get(&cache_key) {
            return cached.clone();
        }
        let bytes = font.data.as_ref().to_vec();
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), font.index);
        self.font_cache.insert(cache_key, data.clone());
        data
    }

    fn draw_bitmap(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        key: &str,
        img: &PreparedImage,
        rect: Rect,
    ) -> DeckResult<()> {
        let paint = if let Some(p) = self.image_cache.get(key) {
            p.clone()
        } else {
            let pixmap =
                image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
            let p = vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            };
            self.image_cache.insert(key.to_string(), p.clone());
            p
        };

        let (w, h) = (f64::from(img.width), f64::from(img.height));
        ctx.set_transform(contain_fit(rect, w, h));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }

    fn draw_svg(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        key: &str,
        svg: &PreparedSvg,
        rect: Rect,
    ) -> DeckResult<()> {
        let size = svg.tree.size();
        let (src_w, src_h) = (f64::from(size.width()), f64::from(size.height()));
        if src_w <= 0.0 || src_h <= 0.0 {
            return Ok(());
        }
        let scale = (rect.width() / src_w).min(rect.height() / src_h);
        let raster_w = ((src_w * scale).round() as u32).max(1);
        let raster_h = ((src_h * scale).round() as u32).max(1);

        let cache_key = SvgRasterKey {
            key: key.to_string(),
            width: raster_w,
            height: raster_h,
        };
        let paint = if let Some(p) = self.svg_cache.get(&cache_key) {
            p.clone()
        } else {
            let rgba = rasterize_svg_to_premul_rgba8(&svg.tree, raster_w, raster_h)?;
            let pixmap = image_premul_bytes_to_pixmap(&rgba, raster_w, raster_h)?;
            let p = vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            };
            self.svg_cache.insert(cache_key, p.clone());
            p
        };

        let (w, h) = (f64::from(raster_w), f64::from(raster_h));
        ctx.set_transform(contain_fit(rect, w, h));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }
}

/// Center a `w × h` source inside `rect` without cropping or distortion.
fn contain_fit(rect: Rect, w: f64, h: f64) -> vello_cpu::kurbo::Affine {
    let scale = (rect.width() / w).min(rect.height() / h).min(1.0).max(0.0);
    let draw_w = w * scale;
    let draw_h = h * scale;
    let tx = rect.x0 + (rect.width() - draw_w) / 2.0;
    let ty = rect.y0 + (rect.height() - draw_h) / 2.0;
    vello_cpu::kurbo::Affine::translate((tx, ty)) * vello_cpu::kurbo::Affine::scale(scale)
}

fn rasterize_svg_to_premul_rgba8(tree: &usvg::Tree, w: u32, h: u32) -> DeckResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| DeckError::render("svg raster target dimensions invalid"))?;
    let size = tree.size();
    let sx = w as f32 / size.width();
    let sy = h as f32 / size.height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.take())
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn rounded_rect_path(rect: Rect, radius: f64) -> kurbo::BezPath {
    use kurbo::Shape;
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    kurbo::RoundedRect::from_rect(rect, radius).to_path(0.1)
}

/// Outline ring for a stroked panel: the outer rounded rect with the inner
/// one reversed, filled under the non-zero rule.
fn stroke_ring_path(rect: Rect, radius: f64, width: f64) -> kurbo::BezPath {
    let outer = rounded_rect_path(rect, radius);
    let inner_rect = Rect::new(
        rect.x0 + width,
        rect.y0 + width,
        (rect.x1 - width).max(rect.x0 + width),
        (rect.y1 - width).max(rect.y0 + width),
    );
    let inner = rounded_rect_path(inner_rect, (radius - width).max(0.0));

    let mut ring = outer;
    ring.extend(inner.reverse_subpaths());
    ring
}

/// Quad polygon for a line segment of the given width, optionally tipped
/// with an arrowhead at `to`.
fn line_path(from: Point, to: Point, width: f64, arrow: bool) -> Option<kurbo::BezPath> {
    let d = to - from;
    let len = d.hypot();
    if len <= f64::EPSILON || width <= 0.0 {
        return None;
    }
    let dir = d / len;
    let normal = kurbo::Vec2::new(-dir.y, dir.x) * (width / 2.0);

    // Shorten the shaft so the arrowhead tip lands exactly on `to`.
    let head_len = if arrow { (width * 4.0).min(len) } else { 0.0 };
    let shaft_end = to - dir * head_len;

    let mut path = kurbo::BezPath::new();
    path.move_to(from + normal);
    path.line_to(shaft_end + normal);
    path.line_to(shaft_end - normal);
    path.line_to(from - normal);
    path.close_path();

    if arrow {
        let side = kurbo::Vec2::new(-dir.y, dir.x) * (width * 1.8);
        path.move_to(to);
        path.line_to(shaft_end + side);
        path.line_to(shaft_end - side);
        path.close_path();
    }

    Some(path)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let point_to_cpu =
        |p: kurbo::Point| -> vello_cpu::kurbo::Point { vello_cpu::kurbo::Point::new(p.x, p.y) };

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> DeckResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| DeckError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| DeckError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(DeckError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_path_degenerate_is_none() {
        assert!(line_path(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 2.0, false).is_none());
        assert!(line_path(Point::new(0.0, 0.0), Point::new(5.0, 0.0), 0.0, false).is_none());
    }

    #[test]
    fn line_path_with_arrow_has_two_subpaths() {
        let path = line_path(Point::new(0.0, 0.0), Point::new(40.0, 0.0), 3.0, true).unwrap();
        let moves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn contain_fit_centers_and_downscales() {
        let t = contain_fit(Rect::new(0.0, 0.0, 100.0, 100.0), 200.0, 100.0);
        let p = t * vello_cpu::kurbo::Point::new(0.0, 0.0);
        assert_eq!(p.y, 25.0);
        let p = t * vello_cpu::kurbo::Point::new(200.0, 100.0);
        assert_eq!((p.x, p.y), (100.0, 75.0));
    }

    #[test]
    fn pixmap_rejects_byte_length_mismatch() {
        assert!(image_premul_bytes_to_pixmap(&[0u8; 3], 1, 1).is_err());
    }
}

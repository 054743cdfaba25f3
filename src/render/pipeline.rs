use std::path::Path;

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    assets::store::PreparedAssetStore,
    compose::dispatch::{compose_slide, compose_view},
    deck::model::{Deck, Slide},
    deck::navigation::Viewer,
    foundation::core::Canvas,
    foundation::error::{DeckError, DeckResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::cpu::CpuBackend,
    theme::Theme,
};

/// Compose + render one slide, without navigation chrome.
///
/// This is the primary one-shot API for producing pixels from a [`Slide`].
#[tracing::instrument(skip_all, fields(layout = slide.layout_tag()))]
pub fn render_slide(
    slide: &Slide,
    theme: &Theme,
    canvas: Canvas,
    backend: &mut dyn RenderBackend,
    assets: &PreparedAssetStore,
) -> DeckResult<FrameRGBA> {
    let scene = compose_slide(slide, theme, canvas);
    backend.render_scene(&scene, assets)
}

/// Compose + render the full viewer surface (current slide + chrome).
#[tracing::instrument(skip_all)]
pub fn render_view(
    viewer: &Viewer,
    theme: &Theme,
    canvas: Canvas,
    backend: &mut dyn RenderBackend,
    assets: &PreparedAssetStore,
) -> DeckResult<FrameRGBA> {
    let scene = compose_view(viewer, theme, canvas);
    backend.render_scene(&scene, assets)
}

/// Threading configuration for whole-deck exports.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

/// Render every slide of `deck` in order.
///
/// The parallel path builds one CPU backend per rayon worker from the primary
/// backend's settings; slides are independent, so no state is shared.
pub fn render_deck(
    deck: &Deck,
    theme: &Theme,
    canvas: Canvas,
    backend: &mut dyn RenderBackend,
    assets: &PreparedAssetStore,
    threading: &RenderThreading,
) -> DeckResult<Vec<FrameRGBA>> {
    deck.validate()?;

    if !threading.parallel {
        let mut out = Vec::with_capacity(deck.len());
        for slide in &deck.slides {
            out.push(render_slide(slide, theme, canvas, backend, assets)?);
        }
        return Ok(out);
    }

    let worker_settings = backend.worker_render_settings().ok_or_else(|| {
        DeckError::render("parallel export requires backend worker settings support (CpuBackend)")
    })?;
    let pool = build_thread_pool(threading.threads)?;

    let rendered = pool.install(|| {
        deck.slides
            .par_iter()
            .map_init(
                || CpuBackend::new(worker_settings.clone()),
                |worker_backend, slide| -> DeckResult<FrameRGBA> {
                    render_slide(slide, theme, canvas, worker_backend, assets)
                },
            )
            .collect::<Vec<_>>()
    });

    rendered.into_iter().collect()
}

/// Write a frame as PNG, creating parent directories as needed.
pub fn save_png(frame: &FrameRGBA, path: impl AsRef<Path>) -> DeckResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Settings derived from a theme for the default presentation look.
pub fn settings_for_theme(theme: &Theme) -> RenderSettings {
    RenderSettings {
        clear_rgba: Some([theme.chrome_bg.r, theme.chrome_bg.g, theme.chrome_bg.b, 255]),
        font_family: theme.font_family.clone(),
    }
}

fn build_thread_pool(threads: Option<usize>) -> DeckResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(DeckError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DeckError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_rejected() {
        let deck: Deck = serde_json::from_value(serde_json::json!({
            "slides": [{"layout": "title", "title": "t"}]
        }))
        .unwrap();
        let theme = Theme::default();
        let canvas = Canvas::new(64, 64).unwrap();
        let mut backend = CpuBackend::new(RenderSettings::default());
        let assets = PreparedAssetStore::empty(".");
        let err = render_deck(
            &deck,
            &theme,
            canvas,
            &mut backend,
            &assets,
            &RenderThreading {
                parallel: true,
                threads: Some(0),
            },
        );
        assert!(err.is_err());
    }

    #[test]
    fn settings_carry_theme_font_and_chrome() {
        let mut theme = Theme::default();
        theme.font_family = Some("Inter".to_string());
        let settings = settings_for_theme(&theme);
        assert_eq!(settings.font_family.as_deref(), Some("Inter"));
        assert!(settings.clear_rgba.is_some());
    }
}

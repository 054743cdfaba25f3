//! Deckhand is a programmatic slide-deck composition and rendering engine.
//!
//! A deck is an ordered, immutable-for-the-session sequence of slide records,
//! each discriminated by a `layout` tag. A viewer owns the single piece of
//! mutable state (the cursor) and exposes cyclic navigation; a pure layout
//! dispatcher turns the slide at the cursor into a backend-agnostic scene;
//! and a CPU backend rasterizes scenes into premultiplied RGBA8 frames.
//!
//! # Pipeline overview
//!
//! 1. **Load**: deck JSON -> [`Deck`] (unknown layouts degrade, never fail)
//! 2. **Navigate**: [`Viewer`] cursor updates via `next`/`previous`/`go_to`
//! 3. **Compose**: [`compose_slide`]/[`compose_view`] -> [`Scene`]
//! 4. **Render**: [`CpuBackend`] -> [`FrameRGBA`], PNG export via [`save_png`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: composition is pure; rendering a scene twice yields
//!   identical bytes.
//! - **No IO in compose/render**: external IO is front-loaded in
//!   [`PreparedAssetStore`].
//! - **Degrade, don't crash**: unrecognized layout tags and missing optional
//!   fields reduce to a fallback notice or an omitted region.
#![forbid(unsafe_code)]

mod assets;
mod compose;
mod deck;
mod foundation;
mod render;
mod scene;
mod theme;

pub use assets::decode::{PreparedImage, PreparedSvg, decode_image, parse_svg};
pub use assets::store::{PreparedAssetStore, PreparedVisual, normalize_rel_path};
pub use compose::chrome::position_readout;
pub use compose::dispatch::{compose_slide, compose_view};
pub use deck::model::{
    ComparisonPanel, ComparisonSlide, ConceptSlide, CtaSlide, DashboardSlide, Deck, FeatureSlide,
    FullImageSlide, GridItem, GridSlide, IconPoint, LoopSlide, Metric, MetricsSlide, PathwaySlide,
    PathwayStep, Phase, PhilosophySlide, ProblemSlide, ScenarioSlide, Scorer, ScorersSlide,
    SeriesPoint, Slide, SlideRecord, Status, StoryBeatSlide, TipsSlide, TitleSlide,
};
pub use deck::navigation::Viewer;
pub use foundation::core::{Canvas, Point, Rect, Rgba8, Rgba8Premul, Vec2};
pub use foundation::error::{DeckError, DeckResult};
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use render::cpu::CpuBackend;
pub use render::pipeline::{
    RenderThreading, render_deck, render_slide, render_view, save_png, settings_for_theme,
};
pub use render::text::{TextBrushRgba8, TextLayoutEngine};
pub use scene::layout::{AlignX, AlignY, align_in, column_cells, grid_cells, inset, row_cells};
pub use scene::model::{Background, Scene, SceneOp, TextAlign, TextSpan, TextWeight};
pub use theme::{Gradient, Theme};

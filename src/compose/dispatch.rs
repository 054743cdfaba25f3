//! The layout dispatcher: a pure mapping from a slide's layout tag to the
//! scene its template produces.

use crate::{
    compose::chrome::{self, CHROME_DESIGN_HEIGHT},
    compose::templates::{self, Surface},
    deck::model::Slide,
    deck::navigation::Viewer,
    foundation::core::{Canvas, Rect},
    scene::model::{Background, Scene},
    theme::Theme,
};

/// Reference height the template coordinate recipes are authored against.
const DESIGN_HEIGHT: f64 = 720.0;

/// Compose a single slide into a full-canvas scene.
///
/// Matching on [`Slide`] is exhaustive: every known layout has a template,
/// and `Unknown` renders the fallback notice. This function cannot fail —
/// malformed deck data degrades to a visible notice, never a crash.
#[tracing::instrument(skip(slide, theme), fields(layout = slide.layout_tag()))]
pub fn compose_slide(slide: &Slide, theme: &Theme, canvas: Canvas) -> Scene {
    let area = Rect::new(0.0, 0.0, canvas.width_f64(), canvas.height_f64());
    let mut scene = Scene::new(canvas, Background::Linear(theme.gradient(slide.accent())));
    fill_slide_region(slide, theme, &mut scene, area, canvas.height_f64() / DESIGN_HEIGHT);
    scene
}

/// Compose the full viewer surface: the current slide plus navigation chrome
/// (previous/next labels, `cursor+1 / N` readout, dot strip).
#[tracing::instrument(skip(viewer, theme))]
pub fn compose_view(viewer: &Viewer, theme: &Theme, canvas: Canvas) -> Scene {
    let scale = canvas.height_f64() / DESIGN_HEIGHT;
    let chrome_h = (CHROME_DESIGN_HEIGHT * scale).min(canvas.height_f64() * 0.3);
    let slide_area = Rect::new(
        0.0,
        0.0,
        canvas.width_f64(),
        canvas.height_f64() - chrome_h,
    );
    let chrome_area = Rect::new(
        0.0,
        slide_area.y1,
        canvas.width_f64(),
        canvas.height_f64(),
    );

    let slide = viewer.current();
    let mut scene = Scene::new(canvas, Background::Linear(theme.gradient(slide.accent())));
    fill_slide_region(slide, theme, &mut scene, slide_area, scale);

    let (cursor, len) = viewer.position();
    chrome::push_chrome(&mut scene, theme, chrome_area, scale, cursor, len);
    scene
}

fn fill_slide_region(slide: &Slide, theme: &Theme, scene: &mut Scene, area: Rect, scale: f64) {
    let mut surface = Surface {
        theme,
        area,
        scale,
        scene,
    };

    match slide {
        Slide::Title(s) => templates::compose_title(&mut surface, s),
        Slide::Concept(s) => templates::compose_concept(&mut surface, s),
        Slide::Problem(s) => templates::compose_problem(&mut surface, s),
        Slide::Feature(s) => templates::compose_feature(&mut surface, s),
        Slide::Philosophy(s) => templates::compose_philosophy(&mut surface, s),
        Slide::Grid(s) => templates::compose_grid(&mut surface, s),
        Slide::Comparison(s) => templates::compose_comparison(&mut surface, s),
        Slide::Scorers(s) => templates::compose_scorers(&mut surface, s),
        Slide::Scenario(s) => templates::compose_scenario(&mut surface, s),
        Slide::Metrics(s) => templates::compose_metrics(&mut surface, s),
        Slide::StoryBeat(s) => templates::compose_story_beat(&mut surface, s),
        Slide::Pathway(s) => templates::compose_pathway(&mut surface, s),
        Slide::Dashboard(s) => templates::compose_dashboard(&mut surface, s),
        Slide::Loop(s) => templates::compose_loop(&mut surface, s),
        Slide::Tips(s) => templates::compose_tips(&mut surface, s),
        Slide::FullImage(s) => templates::compose_full_image(&mut surface, s),
        Slide::Cta(s) => templates::compose_cta(&mut surface, s),
        Slide::Unknown { layout } => templates::compose_unknown(&mut surface, layout),
    }
}

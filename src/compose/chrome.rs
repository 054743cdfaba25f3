//! Navigation chrome: the bottom bar (previous/next labels, position
//! readout) and the dot-indicator strip, one dot per slide.

use crate::{
    foundation::core::{Point, Rect},
    scene::model::{Scene, SceneOp, TextAlign, TextSpan, TextWeight},
    theme::Theme,
};

/// Chrome height in 720p design units (nav bar + dot strip).
pub(crate) const CHROME_DESIGN_HEIGHT: f64 = 96.0;

const BAR_HEIGHT: f64 = 56.0;
const DOT_RADIUS: f64 = 5.0;
const DOT_GAP: f64 = 10.0;
const ACTIVE_DOT_WIDTH: f64 = 26.0;

/// Position readout text shown between the navigation labels.
pub fn position_readout(cursor: usize, len: usize) -> String {
    format!("{} / {}", cursor + 1, len)
}

pub(crate) fn push_chrome(
    scene: &mut Scene,
    theme: &Theme,
    area: Rect,
    scale: f64,
    cursor: usize,
    len: usize,
) {
    let px = |v: f64| v * scale;

    scene.push(SceneOp::Panel {
        rect: area,
        radius: 0.0,
        fill: theme.chrome_bg,
        stroke: None,
    });

    let bar = Rect::new(area.x0, area.y0, area.x1, area.y0 + px(BAR_HEIGHT));
    let pad_x = px(24.0);
    let label_y = bar.y0 + px(16.0);

    scene.push(SceneOp::Text(TextSpan {
        text: "‹ Previous".to_string(),
        origin: Point::new(bar.x0 + pad_x, label_y),
        size_px: px(16.0) as f32,
        weight: TextWeight::Bold,
        color: theme.chrome_text,
        max_width: None,
        align: TextAlign::Start,
        mono: false,
    }));
    scene.push(SceneOp::Text(TextSpan {
        text: "Next ›".to_string(),
        origin: Point::new(bar.x0 + pad_x, label_y),
        size_px: px(16.0) as f32,
        weight: TextWeight::Bold,
        color: theme.dot_active,
        max_width: Some((bar.width() - 2.0 * pad_x) as f32),
        align: TextAlign::End,
        mono: false,
    }));
    scene.push(SceneOp::Text(TextSpan {
        text: position_readout(cursor, len),
        origin: Point::new(bar.x0, label_y),
        size_px: px(16.0) as f32,
        weight: TextWeight::Regular,
        color: theme.chrome_text,
        max_width: Some(bar.width() as f32),
        align: TextAlign::Center,
        mono: true,
    }));

    // Dot strip: idle dots are discs, the active slide reads as a wide pill.
    let strip_y = bar.y1 + (area.y1 - bar.y1) / 2.0;
    let r = px(DOT_RADIUS);
    let gap = px(DOT_GAP);
    let active_w = px(ACTIVE_DOT_WIDTH);
    let idle_w = 2.0 * r;

    let total: f64 = (0..len)
        .map(|i| if i == cursor { active_w } else { idle_w })
        .sum::<f64>()
        + gap * len.saturating_sub(1) as f64;
    let mut x = area.x0 + (area.width() - total).max(0.0) / 2.0;

    for i in 0..len {
        if i == cursor {
            scene.push(SceneOp::Panel {
                rect: Rect::new(x, strip_y - r, x + active_w, strip_y + r),
                radius: r,
                fill: theme.dot_active,
                stroke: None,
            });
            x += active_w + gap;
        } else {
            scene.push(SceneOp::Disc {
                center: Point::new(x + r, strip_y),
                radius: r,
                color: theme.dot_idle,
            });
            x += idle_w + gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Canvas;
    use crate::scene::model::Background;
    use crate::theme::Theme;

    #[test]
    fn readout_is_one_based() {
        assert_eq!(position_readout(0, 12), "1 / 12");
        assert_eq!(position_readout(11, 12), "12 / 12");
    }

    #[test]
    fn strip_emits_one_marker_per_slide() {
        let theme = Theme::default();
        let canvas = Canvas::new(1280, 720).unwrap();
        let mut scene = Scene::new(canvas, Background::Solid(theme.chrome_bg));
        push_chrome(
            &mut scene,
            &theme,
            Rect::new(0.0, 624.0, 1280.0, 720.0),
            1.0,
            2,
            7,
        );

        let discs = scene
            .ops
            .iter()
            .filter(|op| matches!(op, SceneOp::Disc { .. }))
            .count();
        let pills = scene
            .ops
            .iter()
            .filter(|op| {
                matches!(op, SceneOp::Panel { fill, .. } if *fill == theme.dot_active)
            })
            .count();
        assert_eq!(discs, 6);
        assert_eq!(pills, 1);
    }

    #[test]
    fn readout_appears_in_scene_text() {
        let theme = Theme::default();
        let canvas = Canvas::new(1280, 720).unwrap();
        let mut scene = Scene::new(canvas, Background::Solid(theme.chrome_bg));
        push_chrome(
            &mut scene,
            &theme,
            Rect::new(0.0, 624.0, 1280.0, 720.0),
            1.0,
            4,
            9,
        );
        assert!(scene.texts().any(|t| t == "5 / 9"));
    }
}

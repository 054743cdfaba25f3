//! Per-layout visual recipes.
//!
//! Each template is an independent, literal arrangement: a heading region
//! plus layout-specific content regions, positioned by coordinate math in
//! 720p design units and scaled to the target canvas. Templates tolerate
//! absent fields by omitting the dependent region; none of them can fail.

use crate::{
    deck::model::{
        ComparisonPanel, ComparisonSlide, ConceptSlide, CtaSlide, DashboardSlide, FeatureSlide,
        FullImageSlide, GridSlide, LoopSlide, MetricsSlide, PathwaySlide, PhilosophySlide,
        ProblemSlide, ScenarioSlide, ScorersSlide, StoryBeatSlide, TipsSlide, TitleSlide,
    },
    foundation::core::{Point, Rect, Rgba8},
    scene::layout::{AlignX, AlignY, align_in, column_cells, grid_cells, inset, row_cells},
    scene::model::{Scene, SceneOp, TextAlign, TextSpan, TextWeight},
    theme::Theme,
};

/// Drawing context for one slide region: theme, target rect and UI scale.
pub(crate) struct Surface<'a> {
    pub theme: &'a Theme,
    pub area: Rect,
    pub scale: f64,
    pub scene: &'a mut Scene,
}

const PAD: f64 = 48.0;
const RADIUS: f64 = 16.0;

impl Surface<'_> {
    pub(crate) fn px(&self, v: f64) -> f64 {
        v * self.scale
    }

    fn content(&self) -> Rect {
        inset(self.area, self.px(PAD))
    }

    fn panel(&mut self, rect: Rect) {
        let radius = self.px(RADIUS);
        let fill = self.theme.panel_fill;
        self.scene.push(SceneOp::Panel {
            rect,
            radius,
            fill,
            stroke: None,
        });
    }

    fn outlined_panel(&mut self, rect: Rect, stroke: Rgba8) {
        let radius = self.px(RADIUS);
        let fill = self.theme.panel_fill;
        let width = self.px(2.0);
        self.scene.push(SceneOp::Panel {
            rect,
            radius,
            fill,
            stroke: Some((stroke, width)),
        });
    }

    fn text(&mut self, text: &str, origin: Point, size: f64, weight: TextWeight, color: Rgba8) {
        self.text_opts(text, origin, size, weight, color, None, TextAlign::Start, false);
    }

    #[allow(clippy::too_many_arguments)]
    fn text_opts(
        &mut self,
        text: &str,
        origin: Point,
        size: f64,
        weight: TextWeight,
        color: Rgba8,
        max_width: Option<f64>,
        align: TextAlign,
        mono: bool,
    ) {
        if text.is_empty() {
            return;
        }
        self.scene.push(SceneOp::Text(TextSpan {
            text: text.to_string(),
            origin,
            size_px: self.px(size) as f32,
            weight,
            color,
            max_width: max_width.map(|w| w as f32),
            align,
            mono,
        }));
    }

    /// Standard left-aligned slide heading; returns the y where content starts.
    fn heading(&mut self, title: Option<&str>) -> f64 {
        let c = self.content();
        if let Some(t) = title {
            self.text_opts(
                t,
                Point::new(c.x0, c.y0),
                44.0,
                TextWeight::Black,
                self.theme.text,
                Some(c.width()),
                TextAlign::Start,
                false,
            );
        }
        c.y0 + self.px(84.0)
    }

    /// Centered heading variant used by symmetric layouts.
    fn heading_centered(&mut self, title: Option<&str>) -> f64 {
        let c = self.content();
        if let Some(t) = title {
            self.text_opts(
                t,
                Point::new(c.x0, c.y0),
                44.0,
                TextWeight::Black,
                self.theme.text,
                Some(c.width()),
                TextAlign::Center,
                false,
            );
        }
        c.y0 + self.px(84.0)
    }
}

/// Split a `"icon: label"` step string into its icon and label parts.
pub(crate) fn split_icon_label(step: &str) -> (Option<&str>, &str) {
    match step.split_once(':') {
        Some((icon, label)) if !icon.trim().is_empty() && !label.trim().is_empty() => {
            (Some(icon.trim()), label.trim())
        }
        _ => (None, step.trim()),
    }
}

pub(crate) fn compose_title(s: &mut Surface<'_>, slide: &TitleSlide) {
    let c = s.content();
    let mid = c.y0 + c.height() * 0.36;
    if let Some(t) = slide.title.as_deref() {
        s.text_opts(
            t,
            Point::new(c.x0, mid),
            66.0,
            TextWeight::Black,
            s.theme.text,
            Some(c.width()),
            TextAlign::Center,
            false,
        );
    }
    if let Some(sub) = slide.subtitle.as_deref() {
        let y = mid + s.px(110.0);
        s.text_opts(
            sub,
            Point::new(c.x0, y),
            24.0,
            TextWeight::Regular,
            s.theme.text_muted,
            Some(c.width()),
            TextAlign::Center,
            false,
        );
    }
}

pub(crate) fn compose_concept(s: &mut Surface<'_>, slide: &ConceptSlide) {
    let y = s.heading_centered(slide.title.as_deref());
    let c = s.content();
    if let Some(sub) = slide.subtitle.as_deref() {
        s.text_opts(
            sub,
            Point::new(c.x0, y),
            26.0,
            TextWeight::Bold,
            s.theme.text,
            Some(c.width()),
            TextAlign::Center,
            false,
        );
    }
    if let Some(content) = slide.content.as_deref() {
        let card_w = c.width() * 0.62;
        let card_h = c.height() * 0.42;
        let origin = align_in(
            Rect::new(c.x0, y + s.px(64.0), c.x1, c.y1),
            card_w,
            card_h,
            AlignX::Center,
            AlignY::Start,
        );
        let card = Rect::new(origin.x, origin.y, origin.x + card_w, origin.y + card_h);
        s.panel(card);
        let text_area = inset(card, s.px(36.0));
        s.text_opts(
            content,
            Point::new(text_area.x0, text_area.y0),
            22.0,
            TextWeight::Regular,
            s.theme.text,
            Some(text_area.width()),
            TextAlign::Center,
            false,
        );
    }
}

pub(crate) fn compose_problem(s: &mut Surface<'_>, slide: &ProblemSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if slide.points.is_empty() {
        return;
    }
    let rows = column_cells(
        Rect::new(c.x0, y, c.x1, c.y1),
        slide.points.len(),
        s.px(20.0),
    );
    for (point, row) in slide.points.iter().zip(rows) {
        if let Some(icon) = point.icon.as_deref() {
            s.text(
                icon,
                Point::new(row.x0, row.y0),
                30.0,
                TextWeight::Regular,
                s.theme.text,
            );
        }
        if let Some(text) = point.text.as_deref() {
            s.text_opts(
                text,
                Point::new(row.x0 + s.px(64.0), row.y0 + s.px(8.0)),
                21.0,
                TextWeight::Regular,
                s.theme.text,
                Some(row.width() - s.px(64.0)),
                TextAlign::Start,
                false,
            );
        }
    }
}

pub(crate) fn compose_feature(s: &mut Surface<'_>, slide: &FeatureSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    let mut text_x = c.x0;
    if let Some(icon) = slide.icon.as_deref() {
        s.text(
            icon,
            Point::new(c.x0, y),
            64.0,
            TextWeight::Regular,
            s.theme.text,
        );
        text_x = c.x0 + s.px(120.0);
    }
    let mut cursor_y = y;
    if let Some(content) = slide.content.as_deref() {
        s.text_opts(
            content,
            Point::new(text_x, cursor_y),
            26.0,
            TextWeight::Bold,
            s.theme.text,
            Some(c.x1 - text_x),
            TextAlign::Start,
            false,
        );
        cursor_y += s.px(72.0);
    }
    if let Some(example) = slide.example.as_deref() {
        let card = Rect::new(text_x, cursor_y, c.x1, c.y1);
        s.panel(card);
        let text_area = inset(card, s.px(24.0));
        s.text_opts(
            example,
            Point::new(text_area.x0, text_area.y0),
            17.0,
            TextWeight::Regular,
            s.theme.text,
            Some(text_area.width()),
            TextAlign::Start,
            true,
        );
    }
}

pub(crate) fn compose_philosophy(s: &mut Surface<'_>, slide: &PhilosophySlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if slide.phases.is_empty() {
        return;
    }
    let cells = row_cells(
        Rect::new(c.x0, y, c.x1, y + c.height() * 0.52),
        slide.phases.len(),
        s.px(20.0),
    );
    for (phase, cell) in slide.phases.iter().zip(cells) {
        s.panel(cell);
        let inner = inset(cell, s.px(24.0));
        if let Some(number) = phase.number.as_deref() {
            s.text_opts(
                number,
                Point::new(inner.x0, inner.y0),
                44.0,
                TextWeight::Black,
                s.theme.text,
                Some(inner.width()),
                TextAlign::Center,
                false,
            );
        }
        if let Some(label) = phase.label.as_deref() {
            s.text_opts(
                label,
                Point::new(inner.x0, inner.y0 + s.px(76.0)),
                22.0,
                TextWeight::Bold,
                s.theme.text,
                Some(inner.width()),
                TextAlign::Center,
                false,
            );
        }
        if let Some(desc) = phase.desc.as_deref() {
            s.text_opts(
                desc,
                Point::new(inner.x0, inner.y0 + s.px(118.0)),
                17.0,
                TextWeight::Regular,
                s.theme.text_muted,
                Some(inner.width()),
                TextAlign::Center,
                false,
            );
        }
    }
}

pub(crate) fn compose_grid(s: &mut Surface<'_>, slide: &GridSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if slide.items.is_empty() {
        return;
    }
    let cells = grid_cells(Rect::new(c.x0, y, c.x1, c.y1), slide.items.len(), 2, s.px(24.0));
    for (item, cell) in slide.items.iter().zip(cells) {
        s.panel(cell);
        let inner = inset(cell, s.px(28.0));
        if let Some(icon) = item.icon.as_deref() {
            s.text(
                icon,
                Point::new(inner.x0, inner.y0),
                36.0,
                TextWeight::Regular,
                s.theme.text,
            );
        }
        if let Some(title) = item.title.as_deref() {
            s.text_opts(
                title,
                Point::new(inner.x0, inner.y0 + s.px(56.0)),
                22.0,
                TextWeight::Bold,
                s.theme.text,
                Some(inner.width()),
                TextAlign::Start,
                false,
            );
        }
        if let Some(desc) = item.desc.as_deref() {
            s.text_opts(
                desc,
                Point::new(inner.x0, inner.y0 + s.px(94.0)),
                16.0,
                TextWeight::Regular,
                s.theme.text_muted,
                Some(inner.width()),
                TextAlign::Start,
                false,
            );
        }
    }
}

fn comparison_column(s: &mut Surface<'_>, panel: &ComparisonPanel, cell: Rect) {
    s.panel(cell);
    let inner = inset(cell, s.px(32.0));
    let mut y = inner.y0;
    if let Some(icon) = panel.icon.as_deref() {
        s.text(
            icon,
            Point::new(inner.x0, y),
            44.0,
            TextWeight::Regular,
            s.theme.text,
        );
        y += s.px(72.0);
    }
    if let Some(title) = panel.title.as_deref() {
        s.text_opts(
            title,
            Point::new(inner.x0, y),
            26.0,
            TextWeight::Bold,
            s.theme.text,
            Some(inner.width()),
            TextAlign::Start,
            false,
        );
        y += s.px(56.0);
    }
    for point in &panel.points {
        let dot_r = s.px(5.0);
        s.scene.push(SceneOp::Disc {
            center: Point::new(inner.x0 + dot_r, y + s.px(12.0)),
            radius: dot_r,
            color: s.theme.text,
        });
        s.text_opts(
            point,
            Point::new(inner.x0 + s.px(24.0), y),
            17.0,
            TextWeight::Regular,
            s.theme.text,
            Some(inner.width() - s.px(24.0)),
            TextAlign::Start,
            false,
        );
        y += s.px(40.0);
    }
}

pub(crate) fn compose_comparison(s: &mut Surface<'_>, slide: &ComparisonSlide) {
    let y = s.heading_centered(slide.title.as_deref());
    let c = s.content();
    let cells = row_cells(Rect::new(c.x0, y, c.x1, c.y1), 2, s.px(40.0));
    if let Some(left) = &slide.left {
        comparison_column(s, left, cells[0]);
    }
    if let Some(right) = &slide.right {
        comparison_column(s, right, cells[1]);
    }
}

pub(crate) fn compose_scorers(s: &mut Surface<'_>, slide: &ScorersSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if slide.scorers.is_empty() {
        return;
    }
    let rows = column_cells(
        Rect::new(c.x0, y, c.x1, c.y1),
        slide.scorers.len(),
        s.px(20.0),
    );
    for (idx, (scorer, row)) in slide.scorers.iter().zip(rows).enumerate() {
        s.panel(row);
        let inner = inset(row, s.px(24.0));
        s.text(
            &format!("{}", idx + 1),
            Point::new(inner.x0, inner.y0),
            34.0,
            TextWeight::Black,
            s.theme.text,
        );
        if let Some(name) = scorer.name.as_deref() {
            s.text_opts(
                name,
                Point::new(inner.x0 + s.px(72.0), inner.y0),
                22.0,
                TextWeight::Bold,
                s.theme.text,
                Some(inner.width() - s.px(72.0)),
                TextAlign::Start,
                false,
            );
        }
        if let Some(desc) = scorer.desc.as_deref() {
            s.text_opts(
                desc,
                Point::new(inner.x0 + s.px(72.0), inner.y0 + s.px(38.0)),
                16.0,
                TextWeight::Regular,
                s.theme.text_muted,
                Some(inner.width() - s.px(72.0)),
                TextAlign::Start,
                false,
            );
        }
    }
}

pub(crate) fn compose_scenario(s: &mut Surface<'_>, slide: &ScenarioSlide) {
    let c = s.content();
    let mut text_x = c.x0;
    if let Some(icon) = slide.icon.as_deref() {
        s.text(
            icon,
            Point::new(c.x0, c.y0),
            64.0,
            TextWeight::Regular,
            s.theme.text,
        );
        text_x = c.x0 + s.px(120.0);
    }
    let mut y = c.y0;
    if let Some(badge) = slide.badge.as_deref() {
        let badge_w = s.px(36.0) + badge.chars().count() as f64 * s.px(11.0);
        let badge_rect = Rect::new(text_x, y, text_x + badge_w, y + s.px(40.0));
        let radius = s.px(20.0);
        let fill = s.theme.panel_fill_strong;
        s.scene.push(SceneOp::Panel {
            rect: badge_rect,
            radius,
            fill,
            stroke: None,
        });
        s.text_opts(
            badge,
            Point::new(badge_rect.x0, y + s.px(8.0)),
            18.0,
            TextWeight::Bold,
            s.theme.text,
            Some(badge_w),
            TextAlign::Center,
            false,
        );
        y += s.px(56.0);
    }
    if let Some(title) = slide.title.as_deref() {
        s.text_opts(
            title,
            Point::new(text_x, y),
            40.0,
            TextWeight::Black,
            s.theme.text,
            Some(c.x1 - text_x),
            TextAlign::Start,
            false,
        );
        y += s.px(88.0);
    }

    let card = |s: &mut Surface<'_>, y: f64, h: f64, label: &str, body: &str| {
        let rect = Rect::new(text_x, y, c.x1, y + h);
        s.panel(rect);
        let inner = inset(rect, s.px(20.0));
        s.text(
            label,
            Point::new(inner.x0, inner.y0),
            13.0,
            TextWeight::Bold,
            s.theme.text_muted,
        );
        s.text_opts(
            body,
            Point::new(inner.x0, inner.y0 + s.px(26.0)),
            20.0,
            TextWeight::Bold,
            s.theme.text,
            Some(inner.width()),
            TextAlign::Start,
            false,
        );
    };

    if let Some(problem) = slide.problem.as_deref() {
        card(s, y, s.px(96.0), "THE SITUATION", problem);
        y += s.px(112.0);
    }
    if let Some(solution) = slide.solution.as_deref() {
        card(s, y, s.px(96.0), "THE RESPONSE", solution);
        y += s.px(112.0);
    }
    if !slide.steps.is_empty() {
        let rect = Rect::new(text_x, y, c.x1, c.y1.max(y + s.px(40.0)));
        s.panel(rect);
        let inner = inset(rect, s.px(20.0));
        let mut step_y = inner.y0;
        for step in &slide.steps {
            let (icon, label) = split_icon_label(step);
            let mut x = inner.x0;
            if let Some(icon) = icon {
                s.text(icon, Point::new(x, step_y), 18.0, TextWeight::Regular, s.theme.text);
                x += s.px(40.0);
            }
            s.text_opts(
                label,
                Point::new(x, step_y),
                16.0,
                TextWeight::Bold,
                s.theme.text,
                Some(inner.x1 - x),
                TextAlign::Start,
                false,
            );
            step_y += s.px(32.0);
        }
    }
}

pub(crate) fn compose_metrics(s: &mut Surface<'_>, slide: &MetricsSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if slide.metrics.is_empty() {
        return;
    }
    let rows = column_cells(
        Rect::new(c.x0, y, c.x1, c.y1),
        slide.metrics.len(),
        s.px(18.0),
    );
    for (metric, row) in slide.metrics.iter().zip(rows) {
        s.panel(row);
        let inner = inset(row, s.px(22.0));
        let mut x = inner.x0;
        if let Some(icon) = metric.icon.as_deref() {
            s.text(icon, Point::new(x, inner.y0), 26.0, TextWeight::Regular, s.theme.text);
            x += s.px(52.0);
        }
        if let Some(name) = metric.name.as_deref() {
            s.text_opts(
                name,
                Point::new(x, inner.y0),
                21.0,
                TextWeight::Bold,
                s.theme.text,
                Some(inner.width() * 0.6),
                TextAlign::Start,
                false,
            );
        }
        if let Some(desc) = metric.description.as_deref() {
            s.text_opts(
                desc,
                Point::new(x, inner.y0 + s.px(34.0)),
                15.0,
                TextWeight::Regular,
                s.theme.text_muted,
                Some(inner.width() * 0.6),
                TextAlign::Start,
                false,
            );
        }
        if let Some(value) = metric.value.as_deref() {
            let color = metric
                .status
                .map(|st| s.theme.status_color(st))
                .unwrap_or(s.theme.highlight);
            s.text_opts(
                value,
                Point::new(inner.x0, inner.y0 + s.px(6.0)),
                30.0,
                TextWeight::Black,
                color,
                Some(inner.width()),
                TextAlign::End,
                false,
            );
        }
    }
}

pub(crate) fn compose_story_beat(s: &mut Surface<'_>, slide: &StoryBeatSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    let text_w = if slide.image.is_some() {
        c.width() * 0.52
    } else {
        c.width()
    };
    let mut cursor_y = y;
    if let Some(timeline) = slide.timeline.as_deref() {
        s.text(
            timeline,
            Point::new(c.x0, cursor_y),
            18.0,
            TextWeight::Bold,
            s.theme.highlight,
        );
        cursor_y += s.px(44.0);
    }
    if let Some(situation) = slide.situation.as_deref() {
        s.text_opts(
            situation,
            Point::new(c.x0, cursor_y),
            24.0,
            TextWeight::Bold,
            s.theme.text,
            Some(text_w),
            TextAlign::Start,
            false,
        );
        cursor_y += s.px(84.0);
    }
    if let Some(detail) = slide.detail.as_deref() {
        let card = Rect::new(c.x0, cursor_y, c.x0 + text_w, c.y1);
        s.panel(card);
        let inner = inset(card, s.px(24.0));
        s.text_opts(
            detail,
            Point::new(inner.x0, inner.y0),
            18.0,
            TextWeight::Regular,
            s.theme.text,
            Some(inner.width()),
            TextAlign::Start,
            false,
        );
    }
    if let Some(image) = slide.image.as_deref() {
        let frame = Rect::new(c.x0 + text_w + s.px(32.0), y, c.x1, c.y1);
        s.panel(frame);
        let key = image.to_string();
        let rect = inset(frame, s.px(12.0));
        s.scene.push(SceneOp::Image { key, rect });
        if let Some(alt) = slide.image_alt.as_deref() {
            s.text_opts(
                alt,
                Point::new(frame.x0, frame.y1 + s.px(8.0)),
                13.0,
                TextWeight::Regular,
                s.theme.text_muted,
                Some(frame.width()),
                TextAlign::Center,
                false,
            );
        }
    }
}

pub(crate) fn compose_pathway(s: &mut Surface<'_>, slide: &PathwaySlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if slide.steps.is_empty() {
        return;
    }
    let gap = s.px(56.0);
    let band = Rect::new(c.x0, y + s.px(40.0), c.x1, y + s.px(40.0) + s.px(150.0));
    let cells = row_cells(band, slide.steps.len(), gap);
    for (idx, (step, cell)) in slide.steps.iter().zip(&cells).enumerate() {
        s.outlined_panel(*cell, s.theme.text);
        let inner = inset(*cell, s.px(16.0));
        if let Some(label) = step.label.as_deref() {
            s.text_opts(
                label,
                Point::new(inner.x0, inner.y0 + s.px(12.0)),
                19.0,
                TextWeight::Bold,
                s.theme.text,
                Some(inner.width()),
                TextAlign::Center,
                false,
            );
        }
        if let Some(detail) = step.detail.as_deref() {
            s.text_opts(
                detail,
                Point::new(inner.x0, inner.y0 + s.px(58.0)),
                14.0,
                TextWeight::Regular,
                s.theme.text_muted,
                Some(inner.width()),
                TextAlign::Center,
                false,
            );
        }
        if idx + 1 < cells.len() {
            let mid_y = cell.y0 + cell.height() / 2.0;
            let from = Point::new(cell.x1 + s.px(6.0), mid_y);
            let to = Point::new(cell.x1 + gap - s.px(6.0), mid_y);
            let color = s.theme.highlight;
            let width = s.px(3.0);
            s.scene.push(SceneOp::Line {
                from,
                to,
                color,
                width,
                arrow: true,
            });
        }
    }
}

pub(crate) fn compose_dashboard(s: &mut Surface<'_>, slide: &DashboardSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if let Some(caption) = slide.caption.as_deref() {
        s.text_opts(
            caption,
            Point::new(c.x0, y),
            18.0,
            TextWeight::Regular,
            s.theme.text_muted,
            Some(c.width()),
            TextAlign::Start,
            false,
        );
    }
    if slide.series.is_empty() {
        return;
    }

    let plot = Rect::new(c.x0, y + s.px(48.0), c.x1, c.y1 - s.px(36.0));
    s.panel(plot);
    let inner = inset(plot, s.px(32.0));
    let max = slide
        .series
        .iter()
        .map(|p| p.value)
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE);

    let lanes = row_cells(inner, slide.series.len(), s.px(28.0));
    for (point, lane) in slide.series.iter().zip(lanes) {
        let bar_w = lane.width() * 0.6;
        let bar_h = (point.value.max(0.0) / max) * (inner.height() - s.px(48.0));
        let bar_x0 = lane.x0 + (lane.width() - bar_w) / 2.0;
        let bar = Rect::new(bar_x0, inner.y1 - bar_h, bar_x0 + bar_w, inner.y1);
        let radius = s.px(4.0);
        let fill = s.theme.panel_fill_strong;
        s.scene.push(SceneOp::Panel {
            rect: bar,
            radius,
            fill,
            stroke: None,
        });
        s.text_opts(
            &format_series_value(point.value),
            Point::new(lane.x0, bar.y0 - s.px(28.0)),
            16.0,
            TextWeight::Bold,
            s.theme.highlight,
            Some(lane.width()),
            TextAlign::Center,
            false,
        );
        if let Some(label) = point.label.as_deref() {
            s.text_opts(
                label,
                Point::new(lane.x0, inner.y1 + s.px(10.0)),
                14.0,
                TextWeight::Regular,
                s.theme.text,
                Some(lane.width()),
                TextAlign::Center,
                false,
            );
        }
    }

    let from = Point::new(inner.x0, inner.y1);
    let to = Point::new(inner.x1, inner.y1);
    let color = s.theme.text_muted;
    let width = s.px(2.0);
    s.scene.push(SceneOp::Line {
        from,
        to,
        color,
        width,
        arrow: false,
    });
}

pub(crate) fn compose_loop(s: &mut Surface<'_>, slide: &LoopSlide) {
    let y = s.heading_centered(slide.title.as_deref());
    let c = s.content();
    if slide.steps.is_empty() {
        return;
    }
    let cells = grid_cells(Rect::new(c.x0, y, c.x1, c.y1), slide.steps.len(), 3, s.px(20.0));
    for (idx, (step, cell)) in slide.steps.iter().zip(cells).enumerate() {
        s.panel(cell);
        let inner = inset(cell, s.px(20.0));
        s.text_opts(
            &format!("{}", idx + 1),
            Point::new(inner.x0, inner.y0),
            32.0,
            TextWeight::Black,
            s.theme.text,
            Some(inner.width()),
            TextAlign::Center,
            false,
        );
        s.text_opts(
            step,
            Point::new(inner.x0, inner.y0 + s.px(56.0)),
            18.0,
            TextWeight::Bold,
            s.theme.text,
            Some(inner.width()),
            TextAlign::Center,
            false,
        );
    }
}

pub(crate) fn compose_tips(s: &mut Surface<'_>, slide: &TipsSlide) {
    let y = s.heading(slide.title.as_deref());
    let c = s.content();
    if slide.tips.is_empty() {
        return;
    }
    let rows = column_cells(Rect::new(c.x0, y, c.x1, c.y1), slide.tips.len(), s.px(16.0));
    for (tip, row) in slide.tips.iter().zip(rows) {
        s.panel(row);
        let inner = inset(row, s.px(20.0));
        s.text(
            "✓",
            Point::new(inner.x0, inner.y0),
            26.0,
            TextWeight::Black,
            s.theme.status_good,
        );
        s.text_opts(
            tip,
            Point::new(inner.x0 + s.px(52.0), inner.y0 + s.px(4.0)),
            18.0,
            TextWeight::Regular,
            s.theme.text,
            Some(inner.width() - s.px(52.0)),
            TextAlign::Start,
            false,
        );
    }
}

pub(crate) fn compose_full_image(s: &mut Surface<'_>, slide: &FullImageSlide) {
    let y = s.heading_centered(slide.title.as_deref());
    let c = s.content();
    let frame = Rect::new(c.x0 + c.width() * 0.08, y, c.x1 - c.width() * 0.08, c.y1);
    s.panel(frame);
    if let Some(image) = slide.image.as_deref() {
        let key = image.to_string();
        let rect = inset(frame, s.px(12.0));
        s.scene.push(SceneOp::Image { key, rect });
    }
    if let Some(alt) = slide.alt.as_deref() {
        s.text_opts(
            alt,
            Point::new(frame.x0, frame.y1 + s.px(6.0)),
            13.0,
            TextWeight::Regular,
            s.theme.text_muted,
            Some(frame.width()),
            TextAlign::Center,
            false,
        );
    }
}

pub(crate) fn compose_cta(s: &mut Surface<'_>, slide: &CtaSlide) {
    let c = s.content();
    let mid = c.y0 + c.height() * 0.18;
    if let Some(title) = slide.title.as_deref() {
        s.text_opts(
            title,
            Point::new(c.x0, mid),
            54.0,
            TextWeight::Black,
            s.theme.text,
            Some(c.width()),
            TextAlign::Center,
            false,
        );
    }
    if slide.challenge.is_some() || slide.action.is_some() {
        let card_w = c.width() * 0.6;
        let card = Rect::new(
            c.x0 + (c.width() - card_w) / 2.0,
            mid + s.px(110.0),
            c.x0 + (c.width() + card_w) / 2.0,
            mid + s.px(110.0) + c.height() * 0.42,
        );
        s.panel(card);
        let inner = inset(card, s.px(36.0));
        if let Some(challenge) = slide.challenge.as_deref() {
            s.text_opts(
                challenge,
                Point::new(inner.x0, inner.y0),
                24.0,
                TextWeight::Bold,
                s.theme.text,
                Some(inner.width()),
                TextAlign::Center,
                false,
            );
        }
        if let Some(action) = slide.action.as_deref() {
            s.text_opts(
                action,
                Point::new(inner.x0, inner.y0 + s.px(96.0)),
                19.0,
                TextWeight::Regular,
                s.theme.text_muted,
                Some(inner.width()),
                TextAlign::Center,
                false,
            );
        }
    }
}

/// Fallback for unrecognized layout tags: a visible notice, never a crash.
pub(crate) fn compose_unknown(s: &mut Surface<'_>, layout: &str) {
    let c = s.content();
    let card_w = c.width() * 0.5;
    let card_h = c.height() * 0.3;
    let origin = align_in(c, card_w, card_h, AlignX::Center, AlignY::Center);
    let card = Rect::new(origin.x, origin.y, origin.x + card_w, origin.y + card_h);
    s.outlined_panel(card, s.theme.status_warn);
    let inner = inset(card, s.px(28.0));
    s.text_opts(
        "Unknown slide layout",
        Point::new(inner.x0, inner.y0),
        26.0,
        TextWeight::Bold,
        s.theme.text,
        Some(inner.width()),
        TextAlign::Center,
        false,
    );
    s.text_opts(
        &format!("\"{layout}\" has no registered template"),
        Point::new(inner.x0, inner.y0 + s.px(52.0)),
        16.0,
        TextWeight::Regular,
        s.theme.text_muted,
        Some(inner.width()),
        TextAlign::Center,
        false,
    );
}

fn format_series_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_icon_label_handles_both_shapes() {
        assert_eq!(split_icon_label("🔎: check inputs"), (Some("🔎"), "check inputs"));
        assert_eq!(split_icon_label("no icon here"), (None, "no icon here"));
        assert_eq!(split_icon_label(": dangling"), (None, ": dangling"));
    }

    #[test]
    fn series_values_format_compactly() {
        assert_eq!(format_series_value(3.0), "3");
        assert_eq!(format_series_value(0.85), "0.85");
    }
}

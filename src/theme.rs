use crate::{
    deck::model::Status,
    foundation::core::Rgba8,
};

/// Two-stop linear gradient resolved from an accent token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    pub start: Rgba8,
    pub end: Rgba8,
}

/// Display styling: accent gradients, status colors, chrome colors and an
/// optional preferred font family.
///
/// Accent lookups are cosmetic and therefore total: an unknown token resolves
/// to the default gradient instead of erroring.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    pub text: Rgba8,
    pub text_muted: Rgba8,
    pub panel_fill: Rgba8,
    pub panel_fill_strong: Rgba8,
    pub chrome_bg: Rgba8,
    pub chrome_text: Rgba8,
    pub dot_idle: Rgba8,
    pub dot_active: Rgba8,
    pub highlight: Rgba8,
    pub status_good: Rgba8,
    pub status_warn: Rgba8,
    pub status_bad: Rgba8,
    /// Preferred font family; the text engine falls back to the system
    /// sans-serif stack when unset or unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Rgba8::opaque(255, 255, 255),
            text_muted: Rgba8::new(255, 255, 255, 230),
            panel_fill: Rgba8::new(255, 255, 255, 51),
            panel_fill_strong: Rgba8::new(255, 255, 255, 77),
            chrome_bg: Rgba8::opaque(15, 23, 42),
            chrome_text: Rgba8::opaque(226, 232, 240),
            dot_idle: Rgba8::opaque(71, 85, 105),
            dot_active: Rgba8::opaque(59, 130, 246),
            highlight: Rgba8::opaque(253, 224, 71),
            status_good: Rgba8::opaque(102, 187, 106),
            status_warn: Rgba8::opaque(255, 183, 77),
            status_bad: Rgba8::opaque(239, 83, 80),
            font_family: None,
        }
    }
}

impl Theme {
    /// Resolve an accent token to its gradient; unknown tokens and `None`
    /// resolve to the `slate` default.
    pub fn gradient(&self, accent: Option<&str>) -> Gradient {
        match accent.unwrap_or("slate") {
            "ocean" => Gradient {
                start: Rgba8::opaque(37, 99, 235),
                end: Rgba8::opaque(8, 145, 178),
            },
            "ember" => Gradient {
                start: Rgba8::opaque(239, 68, 68),
                end: Rgba8::opaque(249, 115, 22),
            },
            "grape" => Gradient {
                start: Rgba8::opaque(168, 85, 247),
                end: Rgba8::opaque(236, 72, 153),
            },
            "meadow" => Gradient {
                start: Rgba8::opaque(16, 185, 129),
                end: Rgba8::opaque(13, 148, 136),
            },
            "sunset" => Gradient {
                start: Rgba8::opaque(245, 158, 11),
                end: Rgba8::opaque(234, 88, 12),
            },
            "slate" => Gradient {
                start: Rgba8::opaque(51, 65, 85),
                end: Rgba8::opaque(30, 41, 59),
            },
            other => {
                tracing::debug!(token = other, "unknown accent token, using default gradient");
                self.gradient(Some("slate"))
            }
        }
    }

    /// Map a metric classification onto one of three display colors.
    pub fn status_color(&self, status: Status) -> Rgba8 {
        match status {
            Status::Good => self.status_good,
            Status::Warn => self.status_warn,
            Status::Bad => self.status_bad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_accent_falls_back_to_slate() {
        let theme = Theme::default();
        assert_eq!(theme.gradient(Some("nope")), theme.gradient(Some("slate")));
        assert_eq!(theme.gradient(None), theme.gradient(Some("slate")));
    }

    #[test]
    fn known_accents_differ() {
        let theme = Theme::default();
        assert_ne!(theme.gradient(Some("ocean")), theme.gradient(Some("ember")));
    }

    #[test]
    fn status_maps_to_three_colors() {
        let theme = Theme::default();
        let colors = [
            theme.status_color(Status::Good),
            theme.status_color(Status::Warn),
            theme.status_color(Status::Bad),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}

use std::path::Path;

use anyhow::Context;
use serde::de::Error as _;

use crate::{
    assets::store::normalize_rel_path,
    foundation::error::{DeckError, DeckResult},
};

/// A presentation: an ordered, immutable-for-the-session sequence of slides.
///
/// The deck is the single swappable content asset. It is constructed once at
/// load time and never mutated afterwards; there are no add/remove/reorder
/// operations.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Parse a deck from a JSON reader.
    pub fn from_reader(r: impl std::io::Read) -> DeckResult<Self> {
        serde_json::from_reader(r).map_err(|e| DeckError::serde(format!("parse deck JSON: {e}")))
    }

    /// Read and parse a deck JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> DeckResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("open deck '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// All bitmap/SVG references carried by slides, in deck order.
    pub fn image_refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for slide in &self.slides {
            match slide {
                Slide::StoryBeat(s) => out.extend(s.image.as_deref()),
                Slide::FullImage(s) => out.extend(s.image.as_deref()),
                _ => {}
            }
        }
        out
    }

    /// Check configuration preconditions.
    ///
    /// A deck must contain at least one slide, and every image reference must
    /// be a normalizable relative path. Unknown layout tags are NOT an error
    /// here: they render as a fallback notice per slide.
    pub fn validate(&self) -> DeckResult<()> {
        if self.slides.is_empty() {
            return Err(DeckError::validation("deck must contain at least one slide"));
        }
        for (idx, slide) in self.slides.iter().enumerate() {
            if let Slide::Unknown { layout } = slide {
                tracing::warn!(slide = idx, layout = %layout, "deck carries an unrecognized layout tag");
            }
        }
        for r in self.image_refs() {
            normalize_rel_path(r).map_err(|e| {
                DeckError::validation(format!("image reference '{r}' is not usable: {e}"))
            })?;
        }
        Ok(())
    }
}

/// Wire form of one deck entry: the `layout` discriminator plus whatever
/// fields the layout's template reads.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SlideRecord {
    pub layout: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// One slide, discriminated by its layout tag.
///
/// The enum is closed so the dispatcher can match it exhaustively; the
/// `Unknown` variant exists only for genuinely unrecognized wire data and
/// renders as a visible fallback notice instead of failing the deck.
#[derive(Clone, Debug)]
pub enum Slide {
    Title(TitleSlide),
    Concept(ConceptSlide),
    Problem(ProblemSlide),
    Feature(FeatureSlide),
    Philosophy(PhilosophySlide),
    Grid(GridSlide),
    Comparison(ComparisonSlide),
    Scorers(ScorersSlide),
    Scenario(ScenarioSlide),
    Metrics(MetricsSlide),
    StoryBeat(StoryBeatSlide),
    Pathway(PathwaySlide),
    Dashboard(DashboardSlide),
    Loop(LoopSlide),
    Tips(TipsSlide),
    FullImage(FullImageSlide),
    Cta(CtaSlide),
    Unknown { layout: String },
}

macro_rules! slide_tags {
    ($( $tag:literal => $variant:ident ( $ty:ty ) ),+ $(,)?) => {
        impl Slide {
            /// The wire-level layout tag for this slide.
            pub fn layout_tag(&self) -> &str {
                match self {
                    $( Slide::$variant(_) => $tag, )+
                    Slide::Unknown { layout } => layout,
                }
            }

            fn parse_fields(tag: &str, fields: serde_json::Map<String, serde_json::Value>) -> Option<Slide> {
                let value = serde_json::Value::Object(fields);
                match tag {
                    $(
                        $tag => match serde_json::from_value::<$ty>(value) {
                            Ok(s) => Some(Slide::$variant(s)),
                            Err(e) => {
                                tracing::warn!(layout = tag, error = %e, "slide fields do not fit layout; degrading");
                                None
                            }
                        },
                    )+
                    _ => None,
                }
            }

            fn fields_value(&self) -> serde_json::Value {
                match self {
                    $( Slide::$variant(s) => serde_json::to_value(s).unwrap_or_default(), )+
                    Slide::Unknown { .. } => serde_json::Value::Object(Default::default()),
                }
            }
        }
    };
}

slide_tags! {
    "title" => Title(TitleSlide),
    "concept" => Concept(ConceptSlide),
    "problem" => Problem(ProblemSlide),
    "feature" => Feature(FeatureSlide),
    "philosophy" => Philosophy(PhilosophySlide),
    "grid" => Grid(GridSlide),
    "comparison" => Comparison(ComparisonSlide),
    "scorers" => Scorers(ScorersSlide),
    "scenario" => Scenario(ScenarioSlide),
    "metrics" => Metrics(MetricsSlide),
    "story-beat" => StoryBeat(StoryBeatSlide),
    "pathway" => Pathway(PathwaySlide),
    "dashboard" => Dashboard(DashboardSlide),
    "loop" => Loop(LoopSlide),
    "tips" => Tips(TipsSlide),
    "full-image" => FullImage(FullImageSlide),
    "cta" => Cta(CtaSlide),
}

impl Slide {
    /// Map a wire record onto the closed enum.
    ///
    /// An unrecognized tag, or fields whose types do not fit the tagged
    /// variant, degrade to [`Slide::Unknown`] — one degraded slide, never a
    /// failed deck.
    pub fn from_record(rec: SlideRecord) -> Slide {
        Slide::parse_fields(&rec.layout, rec.fields).unwrap_or(Slide::Unknown { layout: rec.layout })
    }

    /// The cosmetic accent token, when the variant carries one.
    pub fn accent(&self) -> Option<&str> {
        match self {
            Slide::Title(s) => s.accent.as_deref(),
            Slide::Concept(s) => s.accent.as_deref(),
            Slide::Problem(s) => s.accent.as_deref(),
            Slide::Feature(s) => s.accent.as_deref(),
            Slide::Philosophy(s) => s.accent.as_deref(),
            Slide::Grid(s) => s.accent.as_deref(),
            Slide::Comparison(s) => s.accent.as_deref(),
            Slide::Scorers(s) => s.accent.as_deref(),
            Slide::Scenario(s) => s.accent.as_deref(),
            Slide::Metrics(s) => s.accent.as_deref(),
            Slide::StoryBeat(s) => s.accent.as_deref(),
            Slide::Pathway(s) => s.accent.as_deref(),
            Slide::Dashboard(s) => s.accent.as_deref(),
            Slide::Loop(s) => s.accent.as_deref(),
            Slide::Tips(s) => s.accent.as_deref(),
            Slide::FullImage(s) => s.accent.as_deref(),
            Slide::Cta(s) => s.accent.as_deref(),
            Slide::Unknown { .. } => None,
        }
    }
}

impl serde::Serialize for Slide {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = match self.fields_value() {
            serde_json::Value::Object(m) => m,
            _ => serde_json::Map::new(),
        };
        map.insert(
            "layout".to_string(),
            serde_json::Value::String(self.layout_tag().to_string()),
        );
        serde_json::Value::Object(map).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Slide {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rec = SlideRecord::deserialize(deserializer)?;
        if rec.layout.trim().is_empty() {
            return Err(D::Error::custom("slide layout tag must be non-empty"));
        }
        Ok(Slide::from_record(rec))
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleSlide {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConceptSlide {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProblemSlide {
    pub title: Option<String>,
    pub points: Vec<IconPoint>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FeatureSlide {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub content: Option<String>,
    /// Preformatted block; newlines are preserved when rendered.
    pub example: Option<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhilosophySlide {
    pub title: Option<String>,
    pub phases: Vec<Phase>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridSlide {
    pub title: Option<String>,
    pub items: Vec<GridItem>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComparisonSlide {
    pub title: Option<String>,
    pub left: Option<ComparisonPanel>,
    pub right: Option<ComparisonPanel>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScorersSlide {
    pub title: Option<String>,
    pub scorers: Vec<Scorer>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScenarioSlide {
    pub title: Option<String>,
    pub badge: Option<String>,
    pub icon: Option<String>,
    pub problem: Option<String>,
    pub solution: Option<String>,
    /// Optional playbook entries; each splits at the first `:` into an icon
    /// and a label when rendered.
    pub steps: Vec<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MetricsSlide {
    pub title: Option<String>,
    pub metrics: Vec<Metric>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoryBeatSlide {
    pub title: Option<String>,
    pub timeline: Option<String>,
    pub situation: Option<String>,
    pub detail: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathwaySlide {
    pub title: Option<String>,
    pub steps: Vec<PathwayStep>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DashboardSlide {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub series: Vec<SeriesPoint>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoopSlide {
    pub title: Option<String>,
    pub steps: Vec<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TipsSlide {
    pub title: Option<String>,
    pub tips: Vec<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FullImageSlide {
    pub title: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CtaSlide {
    pub title: Option<String>,
    pub challenge: Option<String>,
    pub action: Option<String>,
    pub accent: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IconPoint {
    pub icon: Option<String>,
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Phase {
    pub number: Option<String>,
    pub label: Option<String>,
    pub desc: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridItem {
    pub icon: Option<String>,
    pub title: Option<String>,
    pub desc: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComparisonPanel {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub points: Vec<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Scorer {
    pub name: Option<String>,
    pub desc: Option<String>,
}

/// Classification tag for a metric row, mapped to one of three display colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warn,
    Bad,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Metric {
    pub name: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathwayStep {
    pub label: Option<String>,
    pub detail: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SeriesPoint {
    pub label: Option<String>,
    pub value: f64,
}

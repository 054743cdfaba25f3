use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    assets::decode::{self, PreparedImage, PreparedSvg},
    deck::model::Deck,
    foundation::error::{DeckError, DeckResult},
};

/// A prepared visual asset, or a placeholder for a reference that could not
/// be loaded.
///
/// Broken references are an external-asset concern, not a core failure: a
/// `Missing` entry renders as an empty frame where the picture would be.
#[derive(Clone, Debug)]
pub enum PreparedVisual {
    Image(PreparedImage),
    Svg(PreparedSvg),
    Missing,
}

/// Immutable store of prepared slide assets keyed by normalized relative path.
///
/// All IO happens in [`PreparedAssetStore::prepare`], so composing and
/// rendering stay deterministic and IO-free. The store root is the asset
/// resolution convention: references are resolved against it and nowhere
/// else.
#[derive(Clone, Debug)]
pub struct PreparedAssetStore {
    root: PathBuf,
    visuals: HashMap<String, PreparedVisual>,
}

impl PreparedAssetStore {
    /// Prepare every image/SVG reference carried by `deck`, rooted at `root`.
    pub fn prepare(deck: &Deck, root: impl Into<PathBuf>) -> DeckResult<Self> {
        let root = root.into();
        let mut visuals = HashMap::new();

        for source in deck.image_refs() {
            let key = normalize_rel_path(source)?;
            if visuals.contains_key(&key) {
                continue;
            }
            let prepared = load_visual(&root, &key);
            visuals.insert(key, prepared);
        }

        Ok(Self { root, visuals })
    }

    /// A store with no prepared entries, for decks without pictures.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            visuals: HashMap::new(),
        }
    }

    /// Root directory used when resolving relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lookup a prepared visual by its raw slide reference.
    ///
    /// Returns `None` for references the deck never declared; callers treat
    /// that the same as [`PreparedVisual::Missing`].
    pub fn get(&self, source: &str) -> Option<&PreparedVisual> {
        let key = normalize_rel_path(source).ok()?;
        self.visuals.get(&key)
    }
}

fn load_visual(root: &Path, norm_path: &str) -> PreparedVisual {
    let path = root.join(Path::new(norm_path));
    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "asset file unreadable, using placeholder");
            return PreparedVisual::Missing;
        }
    };

    let is_svg = Path::new(norm_path)
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    let decoded = if is_svg {
        decode::parse_svg(&bytes).map(PreparedVisual::Svg)
    } else {
        decode::decode_image(&bytes).map(PreparedVisual::Image)
    };

    match decoded {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "asset file undecodable, using placeholder");
            PreparedVisual::Missing
        }
    }
}

/// Normalize and validate deck-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> DeckResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(DeckError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(DeckError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(DeckError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(DeckError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_relative_and_cleans_segments() {
        assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
        assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
        assert_eq!(normalize_rel_path("pic.svg").unwrap(), "pic.svg");
    }

    #[test]
    fn normalize_rejects_absolute_and_traversal() {
        assert!(normalize_rel_path("/etc/pic.png").is_err());
        assert!(normalize_rel_path("../pic.png").is_err());
        assert!(normalize_rel_path("").is_err());
        assert!(normalize_rel_path("./").is_err());
    }

    #[test]
    fn missing_file_prepares_as_placeholder() {
        let deck: Deck = serde_json::from_value(serde_json::json!({
            "slides": [{"layout": "full-image", "image": "nope/missing.png"}]
        }))
        .unwrap();
        let store = PreparedAssetStore::prepare(&deck, "target/does-not-exist").unwrap();
        assert!(matches!(
            store.get("nope/missing.png"),
            Some(PreparedVisual::Missing)
        ));
    }

    #[test]
    fn undeclared_reference_is_none() {
        let store = PreparedAssetStore::empty(".");
        assert!(store.get("whatever.png").is_none());
    }
}

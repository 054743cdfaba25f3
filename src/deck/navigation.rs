use crate::{
    deck::model::{Deck, Slide},
    foundation::error::{DeckError, DeckResult},
};

/// Component-local navigation state over a loaded [`Deck`].
///
/// The viewer owns the only mutable state in the system: a single cursor in
/// `[0, N-1]`. It is created on mount, mutated exclusively through
/// [`Viewer::next`], [`Viewer::previous`] and [`Viewer::go_to`], and dropped
/// on unmount; nothing is persisted across sessions.
///
/// Navigation is cyclic: every operation lands the cursor back in range via
/// Euclidean modular arithmetic, so there is no terminal state and no error
/// path once the viewer exists.
#[derive(Clone, Debug)]
pub struct Viewer {
    deck: Deck,
    cursor: usize,
}

impl Viewer {
    /// Mount a viewer over `deck` with the cursor at slide 0.
    ///
    /// An empty deck is a configuration precondition failure, not a runtime
    /// case: navigation over zero slides is undefined.
    pub fn new(deck: Deck) -> DeckResult<Self> {
        if deck.is_empty() {
            return Err(DeckError::validation(
                "viewer requires a deck with at least one slide",
            ));
        }
        Ok(Self { deck, cursor: 0 })
    }

    /// Normalize any integer onto `[0, N-1]` and move the cursor there.
    ///
    /// This is the primitive the other operations are built on: negative and
    /// out-of-range inputs wrap, matching `next`/`previous` behavior.
    pub fn go_to(&mut self, index: i64) -> usize {
        let n = self.deck.len() as i64;
        self.cursor = index.rem_euclid(n) as usize;
        tracing::debug!(cursor = self.cursor, "cursor moved");
        self.cursor
    }

    /// Advance one slide, wrapping from the last slide to the first.
    pub fn next(&mut self) -> usize {
        self.go_to(self.cursor as i64 + 1)
    }

    /// Step back one slide, wrapping from the first slide to the last.
    pub fn previous(&mut self) -> usize {
        self.go_to(self.cursor as i64 - 1)
    }

    /// The slide at the cursor.
    pub fn current(&self) -> &Slide {
        &self.deck.slides[self.cursor]
    }

    /// Current cursor value.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// `(cursor, N)` pair backing the `cursor+1 / N` position readout.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor, self.deck.len())
    }

    /// The deck this viewer presents.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_of(n: usize) -> Deck {
        let slides = (0..n)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "layout": "title",
                    "title": format!("slide {i}")
                }))
                .unwrap()
            })
            .collect();
        Deck {
            title: None,
            slides,
        }
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(Viewer::new(deck_of(0)).is_err());
    }

    #[test]
    fn cursor_stays_in_bounds_under_any_walk() {
        let mut v = Viewer::new(deck_of(7)).unwrap();
        for i in 0..1000 {
            if i % 3 == 0 {
                v.previous();
            } else {
                v.next();
            }
            assert!(v.cursor() < 7);
        }
    }

    #[test]
    fn full_cycle_is_identity() {
        let mut v = Viewer::new(deck_of(6)).unwrap();
        v.go_to(2);
        for _ in 0..6 {
            v.next();
        }
        assert_eq!(v.cursor(), 2);
        for _ in 0..6 {
            v.previous();
        }
        assert_eq!(v.cursor(), 2);
    }

    #[test]
    fn go_to_uses_euclidean_wrap() {
        let mut v = Viewer::new(deck_of(5)).unwrap();
        assert_eq!(v.go_to(-1), 4);
        assert_eq!(v.go_to(5), 0);
        assert_eq!(v.go_to(7), 2);

        let mut v = Viewer::new(deck_of(4)).unwrap();
        assert_eq!(v.go_to(10), 2);
    }

    #[test]
    fn boundary_wraps() {
        let mut v = Viewer::new(deck_of(9)).unwrap();
        assert_eq!(v.cursor(), 0);
        assert_eq!(v.previous(), 8);
        assert_eq!(v.next(), 0);
    }

    #[test]
    fn three_slide_walk_scenario() {
        let json = r#"{"slides": [
            {"layout": "title"},
            {"layout": "grid"},
            {"layout": "cta"}
        ]}"#;
        let deck = Deck::from_reader(json.as_bytes()).unwrap();
        let mut v = Viewer::new(deck).unwrap();
        v.next();
        v.next();
        assert_eq!(v.cursor(), 2);
        assert_eq!(v.current().layout_tag(), "cta");
        v.next();
        assert_eq!(v.cursor(), 0);
        assert_eq!(v.current().layout_tag(), "title");
    }

    #[test]
    fn position_readout_pair() {
        let mut v = Viewer::new(deck_of(12)).unwrap();
        v.go_to(4);
        assert_eq!(v.position(), (4, 12));
    }
}

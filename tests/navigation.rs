use deckhand::{Deck, Viewer};

fn deck(tags: &[&str]) -> Deck {
    let slides: Vec<serde_json::Value> = tags
        .iter()
        .map(|t| serde_json::json!({"layout": t, "title": t}))
        .collect();
    serde_json::from_value(serde_json::json!({ "slides": slides })).unwrap()
}

#[test]
fn cursor_never_leaves_bounds() {
    for n in 1..=8 {
        let tags: Vec<&str> = std::iter::repeat_n("title", n).collect();
        let mut v = Viewer::new(deck(&tags)).unwrap();
        for step in 0..200 {
            if step % 2 == 0 {
                v.next();
            } else {
                v.previous();
            }
            assert!(v.cursor() < n, "cursor escaped bounds for n={n}");
        }
    }
}

#[test]
fn n_steps_forward_close_the_cycle() {
    let mut v = Viewer::new(deck(&["title", "grid", "tips", "cta", "loop"])).unwrap();
    for _ in 0..5 {
        v.next();
    }
    assert_eq!(v.cursor(), 0);
    for _ in 0..5 {
        v.previous();
    }
    assert_eq!(v.cursor(), 0);
}

#[test]
fn go_to_normalizes_any_integer() {
    let mut v = Viewer::new(deck(&["a", "b", "c", "d", "e"])).unwrap();
    assert_eq!(v.go_to(-1), 4);
    assert_eq!(v.go_to(5), 0);
    assert_eq!(v.go_to(7), 2);
    assert_eq!(v.go_to(-13), 2);

    let mut v = Viewer::new(deck(&["a", "b", "c", "d"])).unwrap();
    assert_eq!(v.go_to(10), 2);
}

#[test]
fn wrap_at_both_boundaries() {
    let mut v = Viewer::new(deck(&["a", "b", "c"])).unwrap();
    assert_eq!(v.previous(), 2);
    assert_eq!(v.next(), 0);
    v.go_to(2);
    assert_eq!(v.next(), 0);
}

#[test]
fn title_grid_cta_walkthrough() {
    let mut v = Viewer::new(deck(&["title", "grid", "cta"])).unwrap();
    assert_eq!(v.current().layout_tag(), "title");
    v.next();
    v.next();
    assert_eq!(v.cursor(), 2);
    assert_eq!(v.current().layout_tag(), "cta");
    v.next();
    assert_eq!(v.cursor(), 0);
    assert_eq!(v.current().layout_tag(), "title");
}

#[test]
fn single_slide_deck_is_a_fixed_point() {
    let mut v = Viewer::new(deck(&["title"])).unwrap();
    v.next();
    assert_eq!(v.cursor(), 0);
    v.previous();
    assert_eq!(v.cursor(), 0);
    v.go_to(-99);
    assert_eq!(v.cursor(), 0);
}

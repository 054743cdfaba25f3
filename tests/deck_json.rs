use deckhand::{Deck, Slide, Status};

#[test]
fn demo_deck_parses_and_validates() {
    let deck = Deck::from_path("demos/deck.json").unwrap();
    deck.validate().unwrap();
    assert!(deck.len() >= 10);
    assert!(matches!(deck.slides[0], Slide::Title(_)));
}

#[test]
fn unknown_layouts_survive_the_load() {
    let json = r#"{
        "slides": [
            {"layout": "title", "title": "ok"},
            {"layout": "quantum-foam", "title": "??", "whatever": [1, 2, 3]},
            {"layout": "cta", "title": "end"}
        ]
    }"#;
    let deck = Deck::from_reader(json.as_bytes()).unwrap();
    deck.validate().unwrap();
    assert_eq!(deck.len(), 3);
    assert!(matches!(&deck.slides[1], Slide::Unknown { layout } if layout == "quantum-foam"));
}

#[test]
fn extra_fields_on_known_layouts_are_ignored() {
    let json = r#"{
        "slides": [
            {"layout": "title", "title": "t", "speaker_notes": "not part of the template"}
        ]
    }"#;
    let deck = Deck::from_reader(json.as_bytes()).unwrap();
    assert!(matches!(deck.slides[0], Slide::Title(_)));
}

#[test]
fn metric_status_classification_parses() {
    let json = r#"{
        "slides": [
            {"layout": "metrics", "title": "targets", "metrics": [
                {"name": "correctness", "value": "> 0.85", "status": "good"},
                {"name": "latency", "value": "< 5s", "status": "warn"},
                {"name": "cost", "value": "$0.40", "status": "bad"},
                {"name": "untagged", "value": "n/a"}
            ]}
        ]
    }"#;
    let deck = Deck::from_reader(json.as_bytes()).unwrap();
    let Slide::Metrics(m) = &deck.slides[0] else {
        panic!("expected metrics slide");
    };
    assert_eq!(m.metrics[0].status, Some(Status::Good));
    assert_eq!(m.metrics[1].status, Some(Status::Warn));
    assert_eq!(m.metrics[2].status, Some(Status::Bad));
    assert_eq!(m.metrics[3].status, None);
}

#[test]
fn deck_roundtrips_through_serialization() {
    let deck = Deck::from_path("demos/deck.json").unwrap();
    let json = serde_json::to_string(&deck).unwrap();
    let back = Deck::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back.len(), deck.len());
    for (a, b) in deck.slides.iter().zip(&back.slides) {
        assert_eq!(a.layout_tag(), b.layout_tag());
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Deck::from_reader("{not json".as_bytes()).unwrap_err();
    assert!(matches!(err, deckhand::DeckError::Serde(_)));
}

use deckhand::{
    Canvas, CpuBackend, Deck, PreparedAssetStore, RenderBackend, RenderSettings, Theme, Viewer,
    compose_slide, render_deck, render_view,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

/// Panels-only slide: two philosophy cards with no text fields, so the
/// render touches no fonts and stays byte-comparable on any host.
fn panels_only_deck() -> Deck {
    serde_json::from_value(serde_json::json!({
        "slides": [
            {"layout": "philosophy", "phases": [{}, {}], "accent": "ocean"}
        ]
    }))
    .unwrap()
}

#[test]
fn cpu_render_is_deterministic_and_nonempty() {
    init_tracing();
    let deck = panels_only_deck();
    let theme = Theme::default();
    let canvas = Canvas::new(96, 64).unwrap();
    let scene = compose_slide(&deck.slides[0], &theme, canvas);

    let mut backend = CpuBackend::new(RenderSettings::default());
    let assets = PreparedAssetStore::empty(".");

    let a = backend.render_scene(&scene, &assets).unwrap();
    let b = backend.render_scene(&scene, &assets).unwrap();

    assert_eq!(a.width, 96);
    assert_eq!(a.height, 64);
    assert!(a.premultiplied);
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
    assert!(a.data.iter().any(|&x| x != 0));
}

#[test]
fn gradient_background_varies_down_the_frame() {
    let deck = panels_only_deck();
    let theme = Theme::default();
    let canvas = Canvas::new(32, 64).unwrap();
    let scene = compose_slide(&deck.slides[0], &theme, canvas);

    let mut backend = CpuBackend::new(RenderSettings::default());
    let assets = PreparedAssetStore::empty(".");
    let frame = backend.render_scene(&scene, &assets).unwrap();

    let row = |y: usize| &frame.data[y * 32 * 4..y * 32 * 4 + 4];
    assert_ne!(row(1), row(62), "gradient should differ top vs bottom");
}

#[test]
fn text_heavy_view_renders_without_error() {
    let deck: Deck = serde_json::from_value(serde_json::json!({
        "slides": [
            {"layout": "title", "title": "Evals First", "subtitle": "then code"},
            {"layout": "tips", "title": "Takeaways", "tips": ["talk to stakeholders", "metrics first"]}
        ]
    }))
    .unwrap();
    let theme = Theme::default();
    let canvas = Canvas::new(320, 180).unwrap();
    let mut viewer = Viewer::new(deck).unwrap();
    viewer.next();

    let mut backend = CpuBackend::new(RenderSettings::default());
    let assets = PreparedAssetStore::empty(".");
    let frame = render_view(&viewer, &theme, canvas, &mut backend, &assets).unwrap();
    assert_eq!((frame.width, frame.height), (320, 180));
}

#[test]
fn unknown_layout_renders_rather_than_erroring() {
    let deck: Deck = serde_json::from_value(serde_json::json!({
        "slides": [{"layout": "not-a-layout"}]
    }))
    .unwrap();
    let theme = Theme::default();
    let canvas = Canvas::new(160, 90).unwrap();
    let scene = compose_slide(&deck.slides[0], &theme, canvas);

    let mut backend = CpuBackend::new(RenderSettings::default());
    let assets = PreparedAssetStore::empty(".");
    backend.render_scene(&scene, &assets).unwrap();
}

#[test]
fn missing_image_asset_degrades_to_placeholder_render() {
    init_tracing();
    let deck: Deck = serde_json::from_value(serde_json::json!({
        "slides": [{"layout": "full-image", "title": "pic", "image": "does/not/exist.png"}]
    }))
    .unwrap();
    deck.validate().unwrap();
    let assets = PreparedAssetStore::prepare(&deck, "target/none").unwrap();

    let theme = Theme::default();
    let canvas = Canvas::new(160, 90).unwrap();
    let scene = compose_slide(&deck.slides[0], &theme, canvas);
    let mut backend = CpuBackend::new(RenderSettings::default());
    backend.render_scene(&scene, &assets).unwrap();
}

#[test]
fn parallel_export_matches_sequential_order() {
    let deck: Deck = serde_json::from_value(serde_json::json!({
        "slides": [
            {"layout": "philosophy", "phases": [{}], "accent": "ocean"},
            {"layout": "philosophy", "phases": [{}, {}], "accent": "ember"},
            {"layout": "philosophy", "phases": [{}, {}, {}], "accent": "meadow"}
        ]
    }))
    .unwrap();
    let theme = Theme::default();
    let canvas = Canvas::new(64, 48).unwrap();
    let assets = PreparedAssetStore::empty(".");

    let mut backend = CpuBackend::new(RenderSettings::default());
    let sequential = render_deck(
        &deck,
        &theme,
        canvas,
        &mut backend,
        &assets,
        &deckhand::RenderThreading::default(),
    )
    .unwrap();
    let parallel = render_deck(
        &deck,
        &theme,
        canvas,
        &mut backend,
        &assets,
        &deckhand::RenderThreading {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(sequential.len(), 3);
    assert_eq!(parallel.len(), 3);
    for (a, b) in sequential.iter().zip(&parallel) {
        assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
    }
}

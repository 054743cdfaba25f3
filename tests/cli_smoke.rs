use std::path::PathBuf;

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_deckhand")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "deckhand.exe"
            } else {
                "deckhand"
            });
            p
        })
}

fn write_deck(dir: &PathBuf) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let deck_path = dir.join("deck.json");
    let deck = serde_json::json!({
        "title": "smoke",
        "slides": [
            {"layout": "philosophy", "phases": [{}, {}], "accent": "ocean"},
            {"layout": "philosophy", "phases": [{}], "accent": "ember"}
        ]
    });
    std::fs::write(&deck_path, serde_json::to_string_pretty(&deck).unwrap()).unwrap();
    deck_path
}

#[test]
fn cli_frame_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke_frame");
    let deck_path = write_deck(&dir);
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .args([
            "frame",
            "--deck",
            deck_path.to_string_lossy().as_ref(),
            "--slide",
            "0",
            "--width",
            "96",
            "--height",
            "64",
            "--out",
        ])
        .arg(out_path.to_string_lossy().as_ref())
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
}

#[test]
fn cli_frame_wraps_out_of_range_index() {
    let dir = PathBuf::from("target").join("cli_smoke_wrap");
    let deck_path = write_deck(&dir);
    let out_path = dir.join("wrapped.png");
    let _ = std::fs::remove_file(&out_path);

    // Index 5 on a 2-slide deck lands on slide 1, not an error.
    let status = std::process::Command::new(bin_path())
        .args([
            "frame",
            "--deck",
            deck_path.to_string_lossy().as_ref(),
            "--slide",
            "5",
            "--width",
            "96",
            "--height",
            "64",
            "--out",
        ])
        .arg(out_path.to_string_lossy().as_ref())
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
}

#[test]
fn cli_validate_reports_slide_count() {
    let dir = PathBuf::from("target").join("cli_smoke_validate");
    let deck_path = write_deck(&dir);

    let output = std::process::Command::new(bin_path())
        .args(["validate", "--deck", deck_path.to_string_lossy().as_ref()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 slides"));
}

#[test]
fn cli_export_writes_one_png_per_slide() {
    let dir = PathBuf::from("target").join("cli_smoke_export");
    let deck_path = write_deck(&dir);
    let out_dir = dir.join("frames");
    let _ = std::fs::remove_dir_all(&out_dir);

    let status = std::process::Command::new(bin_path())
        .args([
            "export",
            "--deck",
            deck_path.to_string_lossy().as_ref(),
            "--width",
            "96",
            "--height",
            "64",
            "--out-dir",
        ])
        .arg(out_dir.to_string_lossy().as_ref())
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_dir.join("slide-000.png").exists());
    assert!(out_dir.join("slide-001.png").exists());
}

use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "deckhand", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a deck, reporting slide count and degraded slides.
    Validate(ValidateArgs),
    /// Render a single slide as a PNG.
    Frame(FrameArgs),
    /// Render every slide of a deck into a directory.
    Export(ExportArgs),
    /// Present interactively: n/p step, `g K` jumps, q quits; each event
    /// re-renders the current view to the output file.
    Present(PresentArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input deck JSON.
    #[arg(long = "deck")]
    deck_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input deck JSON.
    #[arg(long = "deck")]
    deck_path: PathBuf,

    /// Slide index (0-based; any integer wraps modulo the deck length).
    #[arg(long)]
    slide: i64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Include the navigation chrome (position readout + dot strip).
    #[arg(long, default_value_t = false)]
    chrome: bool,

    /// Asset root; defaults to the deck file's directory.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input deck JSON.
    #[arg(long = "deck")]
    deck_path: PathBuf,

    /// Output directory for slide-NNN.png files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Enable slide-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Asset root; defaults to the deck file's directory.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PresentArgs {
    /// Input deck JSON.
    #[arg(long = "deck")]
    deck_path: PathBuf,

    /// PNG re-rendered after every navigation event.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Asset root; defaults to the deck file's directory.
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Present(args) => cmd_present(args),
    }
}

fn assets_root(deck_path: &Path, override_root: Option<PathBuf>) -> PathBuf {
    override_root.unwrap_or_else(|| {
        deck_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    })
}

fn load(
    deck_path: &Path,
    override_root: Option<PathBuf>,
) -> anyhow::Result<(deckhand::Deck, deckhand::PreparedAssetStore)> {
    let deck = deckhand::Deck::from_path(deck_path)?;
    deck.validate()?;
    let root = assets_root(deck_path, override_root);
    let assets = deckhand::PreparedAssetStore::prepare(&deck, root)?;
    Ok((deck, assets))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let deck = deckhand::Deck::from_path(&args.deck_path)?;
    deck.validate()?;

    let degraded: Vec<(usize, &str)> = deck
        .slides
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| match s {
            deckhand::Slide::Unknown { layout } => Some((idx, layout.as_str())),
            _ => None,
        })
        .collect();

    println!("{} slides", deck.len());
    for (idx, layout) in &degraded {
        println!("slide {idx}: unrecognized layout '{layout}' (renders as fallback)");
    }
    if degraded.is_empty() {
        println!("all layouts recognized");
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (deck, assets) = load(&args.deck_path, args.assets)?;
    let theme = deckhand::Theme::default();
    let canvas = deckhand::Canvas::new(args.width, args.height)?;
    let settings = deckhand::settings_for_theme(&theme);
    let mut backend = deckhand::create_backend(deckhand::BackendKind::Cpu, &settings)?;

    let mut viewer = deckhand::Viewer::new(deck)?;
    viewer.go_to(args.slide);

    let frame = if args.chrome {
        deckhand::render_view(&viewer, &theme, canvas, backend.as_mut(), &assets)?
    } else {
        deckhand::render_slide(viewer.current(), &theme, canvas, backend.as_mut(), &assets)?
    };

    deckhand::save_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (deck, assets) = load(&args.deck_path, args.assets)?;
    let theme = deckhand::Theme::default();
    let canvas = deckhand::Canvas::new(args.width, args.height)?;
    let settings = deckhand::settings_for_theme(&theme);
    let mut backend = deckhand::create_backend(deckhand::BackendKind::Cpu, &settings)?;

    let threading = deckhand::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let frames = deckhand::render_deck(&deck, &theme, canvas, backend.as_mut(), &assets, &threading)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (idx, frame) in frames.iter().enumerate() {
        let path = args.out_dir.join(format!("slide-{idx:03}.png"));
        deckhand::save_png(frame, &path)?;
    }

    eprintln!("wrote {} slides to {}", frames.len(), args.out_dir.display());
    Ok(())
}

fn cmd_present(args: PresentArgs) -> anyhow::Result<()> {
    let (deck, assets) = load(&args.deck_path, args.assets)?;
    let theme = deckhand::Theme::default();
    let canvas = deckhand::Canvas::new(args.width, args.height)?;
    let settings = deckhand::settings_for_theme(&theme);
    let mut backend = deckhand::create_backend(deckhand::BackendKind::Cpu, &settings)?;
    let mut viewer = deckhand::Viewer::new(deck)?;

    let show = |viewer: &deckhand::Viewer,
                    backend: &mut dyn deckhand::RenderBackend|
     -> anyhow::Result<()> {
        let frame = deckhand::render_view(viewer, &theme, canvas, backend, &assets)?;
        deckhand::save_png(&frame, &args.out)?;
        let (cursor, len) = viewer.position();
        println!(
            "{}  [{}]",
            deckhand::position_readout(cursor, len),
            viewer.current().layout_tag()
        );
        Ok(())
    };

    show(&viewer, backend.as_mut())?;
    eprintln!("commands: n (next), p (previous), g K (go to), q (quit)");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("n") | Some("next") => {
                viewer.next();
            }
            Some("p") | Some("prev") | Some("previous") => {
                viewer.previous();
            }
            Some("g") | Some("go") => {
                let Some(k) = parts.next().and_then(|s| s.parse::<i64>().ok()) else {
                    eprintln!("usage: g K");
                    continue;
                };
                viewer.go_to(k);
            }
            Some("q") | Some("quit") => break,
            Some(other) => {
                eprintln!("unknown command '{other}'");
                continue;
            }
            None => continue,
        }
        show(&viewer, backend.as_mut())?;
    }

    Ok(())
}

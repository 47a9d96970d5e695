use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "canvas-playground", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the menu entries.
    Routes,
    /// Mount a page, advance it some frames, and write its canvas as a PNG.
    Frame(FrameArgs),
    /// Play an input script and write the final canvas as a PNG.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Route to mount, e.g. `/moving-box`.
    #[arg(long)]
    route: String,

    /// Frames to advance after mounting.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Page settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output PNG path for the last frame.
    #[arg(long)]
    out: PathBuf,

    /// Page settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write every frame as `frame_NNNNN.png` into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Routes => cmd_routes(),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<canvas_playground::PlaygroundConfig> {
    match path {
        Some(p) => canvas_playground::PlaygroundConfig::load(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(canvas_playground::PlaygroundConfig::default()),
    }
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(snapshot: &canvas_playground::Snapshot, path: &Path) -> anyhow::Result<()> {
    create_parent_dir(path)?;
    snapshot
        .save_png(path)
        .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_routes() -> anyhow::Result<()> {
    for item in canvas_playground::App::default().menu() {
        println!(
            "{:<18} {:<18} {}",
            item.name,
            item.route.path(),
            item.route.title()
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut app = canvas_playground::App::new(config)?;
    app.navigate(&args.route)
        .with_context(|| format!("mount '{}'", args.route))?;
    for _ in 0..args.frames {
        app.frame()?;
    }

    let snapshot = app.snapshot()?;
    write_png(&snapshot, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = canvas_playground::InputScript::load(&args.script)
        .with_context(|| format!("load script '{}'", args.script.display()))?;

    if let Some(dir) = &args.frames_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create frames dir '{}'", dir.display()))?;
    }

    let mut app = canvas_playground::App::new(config)?;
    let last = script.run(&mut app, |frame, app| {
        let Some(dir) = &args.frames_dir else {
            return Ok(());
        };
        let path = dir.join(format!("frame_{:05}.png", frame.0));
        app.snapshot()?.save_png(&path)
    })?;

    write_png(&last, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

use std::{
    ops::ControlFlow,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cursor_trail::TrailBackend as _;

#[derive(Parser, Debug)]
#[command(name = "cursor-trail", version)]
struct Cli {
    /// Log engine events to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scene and write a single frame as a PNG.
    Frame(FrameArgs),
    /// Replay a scene and write every frame as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backdrop color (overrides the scene's `background`).
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_00000.png` ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Backdrop color (overrides the scene's `background`).
    #[arg(long)]
    background: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_scene_json(path: &Path) -> anyhow::Result<cursor_trail::Scene> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open scene '{}'", path.display()))?;
    let scene = cursor_trail::Scene::from_json_str(&text).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn make_backend(scene: &cursor_trail::Scene, background: Option<&str>) -> cursor_trail::CpuBackend {
    let clear_rgba = background
        .or(scene.background.as_deref())
        .map(|color| {
            let c = cursor_trail::resolve_color(color);
            [c.r, c.g, c.b, 255]
        });
    cursor_trail::CpuBackend::new(cursor_trail::RenderSettings { clear_rgba })
}

fn write_png(path: &Path, frame: &cursor_trail::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let straight = frame.to_straight_alpha();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let total = scene.frame_count();
    if args.frame >= total {
        anyhow::bail!("frame {} is out of range (scene has {total} frames)", args.frame);
    }

    let backend = make_backend(&scene, args.background.as_deref());
    let mut captured = None;
    scene.replay(backend, |index, overlay| {
        if index < args.frame {
            return Ok(ControlFlow::Continue(()));
        }
        captured = overlay.backend_mut().readback_rgba8()?;
        Ok(ControlFlow::Break(()))
    })?;

    let frame = captured.context("scene surface is empty; nothing to write")?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let backend = make_backend(&scene, args.background.as_deref());
    let mut written = 0u64;
    let mut failure = None;
    scene.replay(backend, |index, overlay| {
        let Some(frame) = overlay.backend_mut().readback_rgba8()? else {
            return Ok(ControlFlow::Continue(()));
        };
        let path = args.out_dir.join(format!("frame_{index:05}.png"));
        if let Err(err) = write_png(&path, &frame) {
            failure = Some(err);
            return Ok(ControlFlow::Break(()));
        }
        written += 1;
        Ok(ControlFlow::Continue(()))
    })?;
    if let Some(err) = failure {
        return Err(err);
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reelcast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline layout and cue windows of a manifest.
    Inspect(InspectArgs),
    /// Print the evaluated state of one frame as JSON.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load(path: &std::path::Path) -> anyhow::Result<reelcast::Reel> {
    reelcast::Reel::from_path(path).with_context(|| format!("load manifest '{}'", path.display()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let reel = load(&args.in_path)?;
    let timeline = reel.timeline();
    let fps = reel.fps();

    println!(
        "fps {}/{}  canvas {}x{}  total {} frames ({:.2}s)",
        fps.num,
        fps.den,
        reel.canvas().width,
        reel.canvas().height,
        reel.total_frames(),
        fps.frames_to_secs(reel.total_frames() as f64)
    );

    println!("segments:");
    for seg in timeline.segments() {
        let range = seg.range();
        match *seg {
            reelcast::Segment::Scene { scene, .. } => {
                let id = timeline.scene_at(scene).map_or("?", |s| s.id.as_str());
                println!("  [{:>5}, {:>5})  scene       {id}", range.start.0, range.end.0);
            }
            reelcast::Segment::Transition { transition, .. } => {
                let Some(t) = timeline.transition_at(transition) else {
                    continue;
                };
                let from = timeline.scene_at(t.from_scene).map_or("?", |s| s.id.as_str());
                let to = timeline.scene_at(t.to_scene()).map_or("?", |s| s.id.as_str());
                println!(
                    "  [{:>5}, {:>5})  transition  {} ({from} -> {to})",
                    range.start.0, range.end.0, t.kind
                );
            }
        }
    }

    let cues = reel.cue_scheduler().cues();
    if !cues.is_empty() {
        println!("cues:");
        for c in cues {
            println!(
                "  [{:>5}, {:>5})  {:<18} {:<14} {}",
                c.window.start.0, c.window.end.0, c.id, c.asset_key, c.src
            );
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let reel = load(&args.in_path)?;
    let eval = reel
        .eval_frame(reelcast::FrameIndex(args.frame))
        .with_context(|| format!("evaluate frame {}", args.frame))?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&eval)
    } else {
        serde_json::to_string(&eval)
    }
    .context("serialize evaluated frame")?;
    println!("{json}");
    Ok(())
}

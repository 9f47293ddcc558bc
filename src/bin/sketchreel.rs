use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sketchreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every object's animated properties at one point in time.
    Sample(SampleArgs),
    /// Print one JSON line per frame across a time range.
    Timeline(TimelineArgs),
    /// Play the scene in real time on the animation clock.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON (array of objects or `{ "objects": [...] }`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Global time in seconds.
    #[arg(long)]
    time: f64,

    /// Include merged visual state, not just the patch.
    #[arg(long)]
    resolved: bool,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// First sampled time in seconds.
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Last sampled time in seconds (defaults to when the last animation ends).
    #[arg(long)]
    end: Option<f64>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second of the playback loop.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Stop after this many seconds (defaults to when the last animation ends).
    #[arg(long)]
    seconds: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<sketchreel::Scene> {
    sketchreel::Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let frame = sketchreel::sample_scene(&scene.objects, args.time);

    let out = if args.resolved {
        let resolved: Vec<_> = scene
            .objects
            .iter()
            .zip(&frame.objects)
            .map(|(obj, f)| {
                serde_json::json!({
                    "id": f.id,
                    "progress": f.progress,
                    "patch": f.patch,
                    "visual": f.patch.resolve(obj),
                })
            })
            .collect();
        serde_json::json!({ "time": frame.time, "objects": resolved })
    } else {
        serde_json::to_value(&frame)?
    };

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let opts = sketchreel::TimelineOpts {
        fps: sketchreel::Fps::new(args.fps, 1)?,
        start_secs: args.start,
        end_secs: args.end,
    };
    let frames = sketchreel::sample_timeline(&scene.objects, opts)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in &frames {
        serde_json::to_writer(&mut out, frame).with_context(|| "write frame JSON")?;
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let fps = sketchreel::Fps::new(args.fps, 1)?;
    let limit = args
        .seconds
        .unwrap_or_else(|| sketchreel::scene_end_secs(&scene.objects));

    let frames = sketchreel::FrameQueue::new();
    let clock = sketchreel::AnimationClock::new(sketchreel::MonotonicTime::new(), frames.clone());

    let objects = scene.objects;
    let _printer = clock.subscribe(move |t| {
        let frame = sketchreel::sample_scene(&objects, t);
        let line = serde_json::to_string(&frame)?;
        writeln!(std::io::stdout().lock(), "{line}")?;
        Ok(())
    });

    clock.start();
    let interval = Duration::from_secs_f64(fps.frame_duration_secs());
    while clock.is_active() {
        std::thread::sleep(interval);
        frames.pump(&clock);
        if clock.time() >= limit {
            clock.stop();
        }
    }

    eprintln!("played {:.3}s", clock.time());
    Ok(())
}

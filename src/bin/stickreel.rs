use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stickreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the bouncing figure, then export it (requires `ffmpeg` on PATH).
    Bounce(RunArgs),
    /// Render the dance floor, then export it (requires `ffmpeg` on PATH).
    Rave(RunArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON file overriding the variant defaults. Flags override the file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: OverrideArgs,

    /// Stop after writing the frames.
    #[arg(long)]
    no_export: bool,

    /// Encoder executable.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

#[derive(Args, Debug)]
struct OverrideArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,
    /// Length in whole seconds.
    #[arg(long)]
    duration: Option<u32>,
    /// Number of dancers.
    #[arg(long)]
    entities: Option<u32>,
    /// Directory for the PNG frames.
    #[arg(long)]
    frames_dir: Option<PathBuf>,
    /// Audio track to mux in.
    #[arg(long)]
    audio: Option<PathBuf>,
    /// Output video path.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Audio bitrate, e.g. `192k`.
    #[arg(long)]
    audio_bitrate: Option<String>,
    /// Seed for the random overlays.
    #[arg(long)]
    seed: Option<u64>,
    /// Throttle rendering to real time.
    #[arg(long)]
    pace: bool,
    /// Render frames on a worker pool.
    #[arg(long)]
    parallel: bool,
    /// Worker thread count (implies `--parallel`).
    #[arg(long)]
    threads: Option<usize>,
    /// Keep an existing output video instead of replacing it.
    #[arg(long)]
    no_overwrite: bool,
}

impl OverrideArgs {
    fn to_overrides(&self) -> stickreel::ConfigOverrides {
        stickreel::ConfigOverrides {
            width: self.width,
            height: self.height,
            fps: self.fps,
            duration_secs: self.duration,
            entities: self.entities,
            frames_dir: self.frames_dir.clone(),
            audio: self.audio.clone(),
            output: self.out.clone(),
            audio_bitrate: self.audio_bitrate.clone(),
            seed: self.seed,
            pace: self.pace.then_some(true),
            parallel: (self.parallel || self.threads.is_some()).then_some(true),
            threads: self.threads,
            overwrite: self.no_overwrite.then_some(false),
        }
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Scene to render.
    #[arg(long, value_enum)]
    variant: stickreel::Variant,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// JSON file overriding the variant defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random overlays.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Bounce(args) => cmd_run(stickreel::Variant::Bounce, args),
        Command::Rave(args) => cmd_run(stickreel::Variant::Rave, args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(
    variant: stickreel::Variant,
    path: Option<&PathBuf>,
) -> anyhow::Result<stickreel::RenderConfig> {
    Ok(match path {
        Some(p) => stickreel::RenderConfig::from_path(variant, p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => stickreel::RenderConfig::for_variant(variant),
    })
}

fn cmd_run(variant: stickreel::Variant, args: RunArgs) -> anyhow::Result<()> {
    let cfg = load_config(variant, args.config.as_ref())?
        .with_overrides(&args.overrides.to_overrides());
    cfg.validate()?;

    let mut ffmpeg = stickreel::FfmpegExporter::new(stickreel::FfmpegExporterOpts {
        program: args.ffmpeg,
        ..stickreel::FfmpegExporterOpts::default()
    });
    let exporter: Option<&mut dyn stickreel::VideoExporter> = if args.no_export {
        None
    } else {
        Some(&mut ffmpeg)
    };
    let outcome = stickreel::run(&cfg, exporter)?;

    eprintln!(
        "wrote {} frames to {} (seed {})",
        outcome.reel.frames.len,
        outcome.reel.frames.dir.display(),
        outcome.reel.seed
    );
    if let Some(video) = outcome.video {
        eprintln!("wrote {}", video.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.variant, args.config.as_ref())?;
    cfg.validate()?;

    let model = stickreel::build_model(&cfg);
    let mut backend = stickreel::CpuBackend::new(stickreel::CpuBackendOpts::default());
    let frame = stickreel::render_frame(
        model.as_ref(),
        stickreel::FrameIndex(args.frame),
        cfg.frame_rate()?,
        args.seed,
        &mut backend,
    )?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    stickreel::write_png(&frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

//! Whole-run orchestration: render every frame of a configured variant, then export once.

use std::path::PathBuf;

use crate::config::{RenderConfig, Variant};
use crate::encode::exporter::{ExportRequest, VideoExporter};
use crate::encode::frames::{FrameSequence, PngSequenceSink};
use crate::foundation::core::FrameRange;
use crate::foundation::error::{StickreelError, StickreelResult};
use crate::foundation::rng::SplitMix64;
use crate::render::cpu::{CpuBackend, CpuBackendOpts};
use crate::render::pipeline::{RenderOpts, RenderStats, RenderThreading, render_range};
use crate::scene::bounce::BounceModel;
use crate::scene::model::SceneModel;
use crate::scene::rave::RaveModel;

/// Result of the render stage.
#[derive(Clone, Debug)]
pub struct RenderedReel {
    /// Frame files written.
    pub frames: FrameSequence,
    /// Render counters.
    pub stats: RenderStats,
    /// Seed the overlays were drawn with; pass it back to reproduce the run.
    pub seed: u64,
}

/// Scene model for `cfg`.
pub fn build_model(cfg: &RenderConfig) -> Box<dyn SceneModel> {
    match cfg.variant {
        Variant::Bounce => Box::new(BounceModel::new(cfg.canvas())),
        Variant::Rave => Box::new(RaveModel::new(cfg.canvas(), cfg.entities)),
    }
}

/// Render options for `cfg`, resolving an absent seed from the clock.
pub fn render_opts(cfg: &RenderConfig) -> StickreelResult<RenderOpts> {
    Ok(RenderOpts {
        fps: cfg.frame_rate()?,
        range: FrameRange::first(cfg.total_frames()),
        seed: cfg.seed.unwrap_or_else(SplitMix64::clock_seed),
        pace: cfg.pace,
        threading: RenderThreading {
            parallel: cfg.parallel,
            threads: cfg.threads,
            ..RenderThreading::default()
        },
    })
}

/// Render stage: write `frame_0000.png` .. into `cfg.frames_dir`.
#[tracing::instrument(skip_all, fields(variant = cfg.variant.as_str()))]
pub fn render_frames(cfg: &RenderConfig) -> StickreelResult<RenderedReel> {
    cfg.validate()?;
    let model = build_model(cfg);
    let opts = render_opts(cfg)?;
    tracing::info!(
        width = cfg.width,
        height = cfg.height,
        fps = cfg.fps,
        frames = opts.range.len_frames(),
        seed = opts.seed,
        "render stage"
    );

    let mut backend = CpuBackend::new(CpuBackendOpts::default());
    let mut sink = PngSequenceSink::new(&cfg.frames_dir);
    let stats = render_range(model.as_ref(), &opts, &mut backend, &mut sink)?;

    Ok(RenderedReel {
        frames: sink.sequence(),
        stats,
        seed: opts.seed,
    })
}

/// Export request for a rendered sequence under `cfg`.
pub fn export_request(cfg: &RenderConfig, frames: FrameSequence) -> StickreelResult<ExportRequest> {
    Ok(ExportRequest {
        frames,
        fps: cfg.frame_rate()?,
        audio: cfg.audio.clone(),
        out_path: cfg.output.clone(),
        audio_bitrate: cfg.audio_bitrate.clone(),
        overwrite: cfg.overwrite,
    })
}

/// Pipeline stage a [`ReelError`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Frame rendering and PNG writing.
    Render,
    /// Video export.
    Export,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Render => "render",
            Self::Export => "export",
        })
    }
}

/// A run failure tagged with the stage that produced it.
#[derive(thiserror::Error, Debug)]
#[error("{stage} stage failed")]
pub struct ReelError {
    /// Failing stage.
    pub stage: Stage,
    /// Underlying error.
    #[source]
    pub source: StickreelError,
}

impl ReelError {
    fn at(stage: Stage) -> impl FnOnce(StickreelError) -> Self {
        move |source| Self { stage, source }
    }
}

/// Outcome of [`run`].
#[derive(Clone, Debug)]
pub struct ReelOutcome {
    /// Render stage result.
    pub reel: RenderedReel,
    /// Output video, when an exporter ran.
    pub video: Option<PathBuf>,
}

/// Render every frame, then hand the finished sequence to `exporter` exactly once.
///
/// Passing `None` stops after the frames are written.
pub fn run(
    cfg: &RenderConfig,
    exporter: Option<&mut dyn VideoExporter>,
) -> Result<ReelOutcome, ReelError> {
    let reel = render_frames(cfg).map_err(ReelError::at(Stage::Render))?;
    let Some(exporter) = exporter else {
        return Ok(ReelOutcome { reel, video: None });
    };

    let req = export_request(cfg, reel.frames.clone()).map_err(ReelError::at(Stage::Export))?;
    exporter.export(&req).map_err(ReelError::at(Stage::Export))?;
    Ok(ReelOutcome {
        reel,
        video: Some(req.out_path),
    })
}

#[cfg(test)]
#[path = "../tests/unit/reel.rs"]
mod tests;

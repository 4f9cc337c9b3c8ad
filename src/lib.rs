//! stickreel renders procedural stick-figure animations to PNG frame sequences and muxes them
//! with an audio track into a video using the system `ffmpeg`.
//!
//! Every run goes through the same stages:
//!
//! - A [`SceneModel`] maps a frame index to a [`Scene`] draw list
//! - [`render_range`] rasterizes each scene with a [`CpuBackend`] into a [`FrameSink`]
//! - A [`VideoExporter`] turns the finished [`FrameSequence`] into one video
//!
//! [`reel::run`] wires the stages together from a [`RenderConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Run configuration and variant defaults.
pub mod config;
/// Frame sinks, PNG sequences and video export.
pub mod encode;
/// Whole-run orchestration.
pub mod reel;
/// Rasterization backend and frame loop.
pub mod render;
/// Scene draw lists and the animated models.
pub mod scene;

pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, hsv_to_rgb,
};
pub use crate::foundation::error::{StickreelError, StickreelResult};
pub use crate::foundation::rng::{OverlayRng, SplitMix64};

pub use crate::config::{ConfigOverrides, RenderConfig, Variant};
pub use crate::encode::exporter::{ExportRequest, VideoExporter};
pub use crate::encode::ffmpeg::{FfmpegExporter, FfmpegExporterOpts};
pub use crate::encode::frames::{FrameSequence, PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, SinkConfig};
pub use crate::reel::{
    ReelError, ReelOutcome, RenderedReel, Stage, build_model, export_request, render_frames, run,
};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::pipeline::{
    RenderOpts, RenderStats, RenderThreading, render_frame, render_range,
};
pub use crate::scene::bounce::BounceModel;
pub use crate::scene::model::{DrawOp, Rect, Scene, SceneModel};
pub use crate::scene::rave::RaveModel;

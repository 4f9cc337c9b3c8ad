use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::{StickreelError, StickreelResult};
use crate::foundation::rng::SplitMix64;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::{CpuBackend, CpuBackendOpts};
use crate::scene::model::SceneModel;

/// Threading and chunking controls for multi-frame rendering.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Options for [`render_range`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Frame rate used to convert frame indices into scene time.
    pub fps: Fps,
    /// Frames to render (start inclusive, end exclusive).
    pub range: FrameRange,
    /// Run seed; each frame's overlay source is derived from `(seed, frame)`.
    pub seed: u64,
    /// Throttle the loop to real time. Does not change output.
    pub pace: bool,
    /// Render threading/chunking configuration.
    pub threading: RenderThreading,
}

/// Aggregated rendering counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames handed to the sink.
    pub frames_written: u64,
    /// Wall-clock time spent rendering and writing.
    pub elapsed: Duration,
}

/// Build the scene for `frame` and rasterize it.
pub fn render_frame(
    model: &dyn SceneModel,
    frame: FrameIndex,
    fps: Fps,
    seed: u64,
    backend: &mut dyn RenderBackend,
) -> StickreelResult<FrameRGBA> {
    let mut rng = SplitMix64::for_frame(seed, frame.0);
    let scene = model.scene_at(frame, fps, &mut rng);
    backend.render_scene(&scene)
}

/// Render `opts.range` of `model` and stream the frames, in timeline order, into `sink`.
///
/// In parallel mode frames are rendered in chunks on a `rayon` pool with one backend per
/// worker; the sink still receives them strictly in order.
#[tracing::instrument(skip_all, fields(model = model.name(), frames = opts.range.len_frames()))]
pub fn render_range(
    model: &dyn SceneModel,
    opts: &RenderOpts,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> StickreelResult<RenderStats> {
    if opts.range.is_empty() {
        return Err(StickreelError::validation("render range must be non-empty"));
    }

    let started = Instant::now();
    let canvas = model.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: opts.fps,
        frames: opts.range.len_frames(),
    })?;

    let mut stats = RenderStats {
        frames_total: opts.range.len_frames(),
        ..RenderStats::default()
    };
    let mut pacer = opts.pace.then(|| FramePacer::new(opts.fps));

    if !opts.threading.parallel {
        for f in opts.range.iter() {
            let frame = render_frame(model, f, opts.fps, opts.seed, backend)?;
            sink.push_frame(f, &frame)?;
            stats.frames_written += 1;
            if let Some(p) = pacer.as_mut() {
                p.tick();
            }
        }
    } else {
        let pool = build_thread_pool(opts.threading.threads)?;
        let worker_opts = backend.worker_opts().ok_or_else(|| {
            StickreelError::render("parallel rendering requires a backend with worker support")
        })?;
        let chunk_size = normalized_chunk_size(opts.threading.chunk_size);

        let mut chunk_start = opts.range.start.0;
        while chunk_start < opts.range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(opts.range.end.0);
            let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;
            let frames = render_chunk_parallel(model, chunk, opts, worker_opts, &pool)?;
            for (f, frame) in chunk.iter().zip(frames.iter()) {
                sink.push_frame(f, frame)?;
                stats.frames_written += 1;
                if let Some(p) = pacer.as_mut() {
                    p.tick();
                }
            }
            chunk_start = chunk_end;
        }
    }

    sink.end()?;
    stats.elapsed = started.elapsed();
    tracing::info!(
        frames = stats.frames_written,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "rendered frames"
    );
    Ok(stats)
}

fn render_chunk_parallel(
    model: &dyn SceneModel,
    chunk: FrameRange,
    opts: &RenderOpts,
    worker_opts: CpuBackendOpts,
    pool: &rayon::ThreadPool,
) -> StickreelResult<Vec<FrameRGBA>> {
    let indices: Vec<FrameIndex> = chunk.iter().collect();
    pool.install(|| {
        indices
            .par_iter()
            .map_init(
                || CpuBackend::new(worker_opts),
                |worker_backend, &f| render_frame(model, f, opts.fps, opts.seed, worker_backend),
            )
            .collect::<StickreelResult<Vec<_>>>()
    })
}

fn build_thread_pool(threads: Option<usize>) -> StickreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StickreelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StickreelError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

/// Sleeps so that successive ticks are at least one frame apart.
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    /// Pacer targeting `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            frame: Duration::from_secs_f64(fps.frame_duration_secs()),
            last: None,
        }
    }

    /// Block until one frame duration has passed since the previous tick.
    pub fn tick(&mut self) {
        if let Some(last) = self.last {
            let spent = last.elapsed();
            if spent < self.frame {
                std::thread::sleep(self.frame - spent);
            }
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

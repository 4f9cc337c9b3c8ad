use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::StickreelResult;
use crate::render::backend::FrameRGBA;

/// What a [`FrameSink`] is about to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate of the run.
    pub fps: Fps,
    /// Number of frames the run will push.
    pub frames: u64,
}

/// Consumer of rendered frames.
///
/// `begin` is called once, then `push_frame` exactly `cfg.frames` times with indices in strictly
/// increasing order, then `end`.
pub trait FrameSink {
    /// Prepare for a run described by `cfg`.
    fn begin(&mut self, cfg: SinkConfig) -> StickreelResult<()>;
    /// Take the next frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StickreelResult<()>;
    /// Finish the run; sinks may reject a run that pushed fewer frames than announced.
    fn end(&mut self) -> StickreelResult<()>;
}

/// Sink keeping frames in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

#[cfg(test)]
impl InMemorySink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub(crate) fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

#[cfg(test)]
impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StickreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StickreelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> StickreelResult<()> {
        Ok(())
    }
}

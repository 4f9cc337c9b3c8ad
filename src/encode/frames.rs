use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{StickreelError, StickreelResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::backend::FrameRGBA;

/// Minimum zero-padding of frame numbers in file names.
pub const FRAME_DIGITS: usize = 4;
/// Largest frame count whose names still sort lexically in temporal order.
pub const MAX_SEQUENCE_FRAMES: u64 = 10_u64.pow(FRAME_DIGITS as u32);

/// A contiguous, zero-based run of numbered frame files: `<dir>/frame_0000.png`, ...
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    /// Directory holding the frames.
    pub dir: PathBuf,
    /// Number of frames in the sequence.
    pub len: u64,
}

impl FrameSequence {
    /// Sequence of `len` frames in `dir`.
    pub fn new(dir: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            dir: dir.into(),
            len,
        }
    }

    /// File name of frame `idx`, e.g. `frame_0042.png`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:0width$}.png", idx.0, width = FRAME_DIGITS)
    }

    /// Full path of frame `idx`.
    pub fn path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(Self::file_name(idx))
    }

    /// Paths of every frame, in temporal order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (0..self.len).map(|i| self.path(FrameIndex(i)))
    }

    /// printf-style input pattern understood by image-sequence demuxers (`frame_%04d.png`).
    pub fn pattern(&self) -> PathBuf {
        self.dir.join(format!("frame_%0{FRAME_DIGITS}d.png"))
    }

    /// Parse a frame index back out of a file name produced by [`FrameSequence::file_name`].
    pub fn parse_file_name(name: &str) -> Option<FrameIndex> {
        let digits = name.strip_prefix("frame_")?.strip_suffix(".png")?;
        if digits.len() < FRAME_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(FrameIndex)
    }

    /// Return `true` when every frame file of the sequence exists.
    pub fn is_complete(&self) -> bool {
        self.paths().all(|p| p.is_file())
    }
}

/// Create `dir` (and parents) if absent. An existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> StickreelResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        StickreelError::resource(format!(
            "failed to create frame directory '{}': {e}",
            dir.display()
        ))
    })
}

/// Delete every numbered frame file in `dir`, leaving other files alone. Returns the count.
pub fn remove_stale_frames(dir: &Path) -> StickreelResult<u64> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        StickreelError::resource(format!("read frame directory '{}': {e}", dir.display()))
    })?;
    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| {
            StickreelError::resource(format!("read frame directory '{}': {e}", dir.display()))
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if FrameSequence::parse_file_name(name).is_none() {
            continue;
        }
        let path = entry.path();
        std::fs::remove_file(&path).map_err(|e| {
            StickreelError::resource(format!("remove stale frame '{}': {e}", path.display()))
        })?;
        removed += 1;
    }
    Ok(removed)
}

/// Write `frame` as an opaque RGBA8 PNG, flattening alpha over black.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> StickreelResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(StickreelError::render(
            "frame.data size mismatch with width*height*4",
        ));
    }

    let mut opaque = vec![0u8; expected];
    if frame.premultiplied {
        flatten_premul_over_bg(&mut opaque, &frame.data, [0, 0, 0]);
    } else {
        opaque.copy_from_slice(&frame.data);
    }

    image::save_buffer_with_format(
        path,
        &opaque,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| StickreelError::resource(format!("write png '{}': {e}", path.display())))
}

/// Sink writing each frame to `<dir>/frame_<index:04>.png`.
pub struct PngSequenceSink {
    dir: PathBuf,
    expected: u64,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir`. The directory is created in [`FrameSink::begin`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            expected: 0,
            written: 0,
        }
    }

    /// The sequence written so far.
    pub fn sequence(&self) -> FrameSequence {
        FrameSequence::new(self.dir.clone(), self.written)
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> StickreelResult<()> {
        if cfg.frames > MAX_SEQUENCE_FRAMES {
            return Err(StickreelError::validation(format!(
                "{} frames exceed the {MAX_SEQUENCE_FRAMES}-frame sequence limit",
                cfg.frames
            )));
        }
        ensure_dir(&self.dir)?;
        // Leftovers from a longer earlier run would extend the encoder's pattern input.
        let stale = remove_stale_frames(&self.dir)?;
        if stale > 0 {
            tracing::debug!(stale, dir = %self.dir.display(), "removed previous frames");
        }
        tracing::info!(
            dir = %self.dir.display(),
            width = cfg.width,
            height = cfg.height,
            frames = cfg.frames,
            "writing frames"
        );
        self.expected = cfg.frames;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StickreelResult<()> {
        // Files must be contiguous from zero for the encoder's pattern input.
        if idx.0 != self.written {
            return Err(StickreelError::render(format!(
                "png sequence expected frame {} but got {}",
                self.written, idx.0
            )));
        }
        if self.written >= self.expected {
            return Err(StickreelError::render(format!(
                "png sequence announced {} frames but got more",
                self.expected
            )));
        }
        let path = self.dir.join(FrameSequence::file_name(idx));
        write_png(frame, &path)?;
        tracing::debug!(path = %path.display(), "saved frame");
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> StickreelResult<()> {
        if self.written != self.expected {
            return Err(StickreelError::render(format!(
                "png sequence incomplete: {} of {} frames written",
                self.written, self.expected
            )));
        }
        tracing::info!(frames = self.written, dir = %self.dir.display(), "frames saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frames.rs"]
mod tests;

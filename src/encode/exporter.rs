use std::path::PathBuf;

use crate::encode::frames::FrameSequence;
use crate::foundation::core::Fps;
use crate::foundation::error::{StickreelError, StickreelResult};

/// Everything an exporter needs to mux a frame sequence with an audio track.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportRequest {
    /// Ordered frame files (video stream).
    pub frames: FrameSequence,
    /// Frame rate of the image sequence.
    pub fps: Fps,
    /// Audio track to mux in.
    pub audio: PathBuf,
    /// Output video path.
    pub out_path: PathBuf,
    /// Optional audio bitrate, e.g. `192k`.
    pub audio_bitrate: Option<String>,
    /// Overwrite `out_path` if it already exists.
    pub overwrite: bool,
}

impl ExportRequest {
    /// Check the inputs before any process is spawned.
    pub fn validate(&self) -> StickreelResult<()> {
        if self.frames.len == 0 {
            return Err(StickreelError::encode("frame sequence is empty"));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(StickreelError::encode("export fps must be non-zero"));
        }
        if !self.audio.is_file() {
            return Err(StickreelError::encode(format!(
                "audio file '{}' not found",
                self.audio.display()
            )));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(StickreelError::encode(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    /// Length of the video stream alone, `frames / fps`.
    pub fn video_duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.frames.len)
    }
}

/// Muxes a frame sequence and an audio file into one video.
///
/// The output is trimmed to the shorter of the two inputs and replaces any existing file when
/// `overwrite` is set. Called once, after every frame has been written.
pub trait VideoExporter {
    /// Produce `req.out_path`. Failures are fatal and not retried.
    fn export(&mut self, req: &ExportRequest) -> StickreelResult<()>;
}

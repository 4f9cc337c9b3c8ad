//! Run configuration.
//!
//! A [`RenderConfig`] starts from the defaults of its [`Variant`], then takes overrides from an
//! optional JSON file and finally from command-line flags. Both override layers use
//! [`ConfigOverrides`], where an absent field keeps the current value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encode::frames::MAX_SEQUENCE_FRAMES;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{StickreelError, StickreelResult};

/// Which scene a run renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single white figure bobbing on black.
    Bounce,
    /// Dancers, lights and lasers on a pulsing background.
    Rave,
}

impl Variant {
    /// Lowercase name used in logs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Rave => "rave",
        }
    }
}

/// Complete configuration of one render-then-export run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Scene to render.
    pub variant: Variant,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Length of the animation in whole seconds.
    pub duration_secs: u32,
    /// Number of animated figures.
    pub entities: u32,
    /// Directory receiving `frame_0000.png`, ...
    pub frames_dir: PathBuf,
    /// Audio track muxed into the video.
    pub audio: PathBuf,
    /// Output video path.
    pub output: PathBuf,
    /// Audio bitrate passed to the encoder, e.g. `192k`.
    pub audio_bitrate: Option<String>,
    /// Seed for the randomized overlays. Drawn from the clock when absent.
    pub seed: Option<u64>,
    /// Throttle rendering to real time.
    pub pace: bool,
    /// Render frames on a worker pool.
    pub parallel: bool,
    /// Worker count for parallel rendering.
    pub threads: Option<usize>,
    /// Replace an existing output video.
    pub overwrite: bool,
}

impl RenderConfig {
    /// Defaults of the bouncing figure.
    pub fn bounce() -> Self {
        Self {
            variant: Variant::Bounce,
            width: 200,
            height: 300,
            fps: 30,
            duration_secs: 5,
            entities: 1,
            frames_dir: PathBuf::from("frames"),
            audio: PathBuf::from("my_soundtrack.mp3"),
            output: PathBuf::from("output_video.mp4"),
            audio_bitrate: None,
            seed: None,
            pace: false,
            parallel: false,
            threads: None,
            overwrite: true,
        }
    }

    /// Defaults of the dance floor.
    pub fn rave() -> Self {
        Self {
            variant: Variant::Rave,
            width: 1000,
            height: 500,
            fps: 30,
            duration_secs: 20,
            entities: 4,
            frames_dir: PathBuf::from("frames_ffmpeg"),
            audio: PathBuf::from("my_soundtrack.mp3"),
            output: PathBuf::from("funky_rave_output.mp4"),
            audio_bitrate: Some("192k".to_owned()),
            ..Self::bounce()
        }
    }

    /// Defaults for `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Bounce => Self::bounce(),
            Variant::Rave => Self::rave(),
        }
    }

    /// Defaults for `variant` overridden by the JSON object in `path`.
    pub fn from_path(variant: Variant, path: &Path) -> StickreelResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| {
            StickreelError::resource(format!("open config '{}': {e}", path.display()))
        })?;
        let overrides: ConfigOverrides = serde_json::from_reader(std::io::BufReader::new(f))
            .map_err(|e| {
                StickreelError::validation(format!("parse config '{}': {e}", path.display()))
            })?;
        Ok(Self::for_variant(variant).with_overrides(&overrides))
    }

    /// Apply every field set in `o`.
    pub fn with_overrides(mut self, o: &ConfigOverrides) -> Self {
        if let Some(v) = o.width {
            self.width = v;
        }
        if let Some(v) = o.height {
            self.height = v;
        }
        if let Some(v) = o.fps {
            self.fps = v;
        }
        if let Some(v) = o.duration_secs {
            self.duration_secs = v;
        }
        if let Some(v) = o.entities {
            self.entities = v;
        }
        if let Some(v) = &o.frames_dir {
            self.frames_dir = v.clone();
        }
        if let Some(v) = &o.audio {
            self.audio = v.clone();
        }
        if let Some(v) = &o.output {
            self.output = v.clone();
        }
        if let Some(v) = &o.audio_bitrate {
            self.audio_bitrate = Some(v.clone());
        }
        if let Some(v) = o.seed {
            self.seed = Some(v);
        }
        if let Some(v) = o.pace {
            self.pace = v;
        }
        if let Some(v) = o.parallel {
            self.parallel = v;
        }
        if let Some(v) = o.threads {
            self.threads = Some(v);
        }
        if let Some(v) = o.overwrite {
            self.overwrite = v;
        }
        self
    }

    /// Reject settings that cannot produce a valid frame sequence and video.
    pub fn validate(&self) -> StickreelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StickreelError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(StickreelError::validation(
                "canvas width/height must be even (required for yuv420p output)",
            ));
        }
        if self.fps == 0 {
            return Err(StickreelError::validation("fps must be non-zero"));
        }
        if self.duration_secs == 0 {
            return Err(StickreelError::validation("duration must be non-zero"));
        }
        if self.entities == 0 {
            return Err(StickreelError::validation("entity count must be non-zero"));
        }
        if self.variant == Variant::Bounce && self.entities != 1 {
            return Err(StickreelError::validation(
                "bounce renders exactly one figure",
            ));
        }
        if self.threads == Some(0) {
            return Err(StickreelError::validation("threads must be >= 1 when set"));
        }
        let total = self.total_frames();
        if total > MAX_SEQUENCE_FRAMES {
            return Err(StickreelError::validation(format!(
                "{total} frames exceed the {MAX_SEQUENCE_FRAMES}-frame sequence limit"
            )));
        }
        Ok(())
    }

    /// `fps * duration_secs`.
    pub fn total_frames(&self) -> u64 {
        u64::from(self.fps) * u64::from(self.duration_secs)
    }

    /// Frame rate as an [`Fps`].
    pub fn frame_rate(&self) -> StickreelResult<Fps> {
        Fps::whole(self.fps)
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

/// Partial configuration: every field is optional and only present fields are applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    /// See [`RenderConfig::width`].
    pub width: Option<u32>,
    /// See [`RenderConfig::height`].
    pub height: Option<u32>,
    /// See [`RenderConfig::fps`].
    pub fps: Option<u32>,
    /// See [`RenderConfig::duration_secs`].
    pub duration_secs: Option<u32>,
    /// See [`RenderConfig::entities`].
    pub entities: Option<u32>,
    /// See [`RenderConfig::frames_dir`].
    pub frames_dir: Option<PathBuf>,
    /// See [`RenderConfig::audio`].
    pub audio: Option<PathBuf>,
    /// See [`RenderConfig::output`].
    pub output: Option<PathBuf>,
    /// See [`RenderConfig::audio_bitrate`].
    pub audio_bitrate: Option<String>,
    /// See [`RenderConfig::seed`].
    pub seed: Option<u64>,
    /// See [`RenderConfig::pace`].
    pub pace: Option<bool>,
    /// See [`RenderConfig::parallel`].
    pub parallel: Option<bool>,
    /// See [`RenderConfig::threads`].
    pub threads: Option<usize>,
    /// See [`RenderConfig::overwrite`].
    pub overwrite: Option<bool>,
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

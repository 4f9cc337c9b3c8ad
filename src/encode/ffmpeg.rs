use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::encode::exporter::{ExportRequest, VideoExporter};
use crate::foundation::error::{StickreelError, StickreelResult};

/// Options for [`FfmpegExporter`].
#[derive(Clone, Debug)]
pub struct FfmpegExporterOpts {
    /// Encoder executable, resolved through `PATH` when not absolute.
    pub program: PathBuf,
    /// Video codec (`-c:v`).
    pub video_codec: String,
    /// Output pixel format (`-pix_fmt`).
    pub pix_fmt: String,
    /// Audio codec (`-c:a`).
    pub audio_codec: String,
}

impl Default for FfmpegExporterOpts {
    fn default() -> Self {
        // h264 + yuv420p + aac for broad player compatibility.
        Self {
            program: PathBuf::from("ffmpeg"),
            video_codec: "libx264".to_owned(),
            pix_fmt: "yuv420p".to_owned(),
            audio_codec: "aac".to_owned(),
        }
    }
}

/// Exporter that runs the system `ffmpeg` once over the PNG sequence and the audio file.
#[derive(Clone, Debug, Default)]
pub struct FfmpegExporter {
    opts: FfmpegExporterOpts,
}

impl FfmpegExporter {
    /// Exporter with the given options.
    pub fn new(opts: FfmpegExporterOpts) -> Self {
        Self { opts }
    }

    /// Full argument list (without the program) for `req`.
    pub fn args(&self, req: &ExportRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        let mut push = |s: &str| args.push(OsString::from(s));

        push(if req.overwrite { "-y" } else { "-n" });
        push("-loglevel");
        push("error");
        // Image-sequence input rate goes before its `-i`.
        push("-framerate");
        push(&req.fps.to_ffmpeg_rate());
        push("-i");
        args.push(req.frames.pattern().into_os_string());
        args.push(OsString::from("-i"));
        args.push(req.audio.clone().into_os_string());

        let mut push = |s: &str| args.push(OsString::from(s));
        push("-shortest");
        push("-frames:v");
        push(&req.frames.len.to_string());
        push("-c:v");
        push(&self.opts.video_codec);
        push("-pix_fmt");
        push(&self.opts.pix_fmt);
        push("-c:a");
        push(&self.opts.audio_codec);
        if let Some(bitrate) = req.audio_bitrate.as_deref() {
            push("-b:a");
            push(bitrate);
        }
        args.push(req.out_path.clone().into_os_string());
        args
    }
}

impl VideoExporter for FfmpegExporter {
    #[tracing::instrument(skip_all, fields(out = %req.out_path.display(), frames = req.frames.len))]
    fn export(&mut self, req: &ExportRequest) -> StickreelResult<()> {
        req.validate()?;

        if !is_program_available(&self.opts.program) {
            return Err(StickreelError::encode(format!(
                "'{}' is required for video export, but was not found on PATH",
                self.opts.program.display()
            )));
        }
        ensure_parent_dir(&req.out_path)?;

        let mut cmd = Command::new(&self.opts.program);
        cmd.args(self.args(req))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::info!(
            fps = %req.fps.to_ffmpeg_rate(),
            audio = %req.audio.display(),
            "running encoder"
        );
        let output = cmd.output().map_err(|e| {
            StickreelError::encode(format!(
                "failed to spawn '{}' (is it installed and on PATH?): {e}",
                self.opts.program.display()
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StickreelError::encode(format!(
                "encoder exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!(out = %req.out_path.display(), "video saved");
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> StickreelResult<()> {
    if let Some(parent) = path.parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        std::fs::create_dir_all(parent).map_err(|e| {
            StickreelError::resource(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Return `true` when `program -version` runs successfully.
pub fn is_program_available(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;

use super::*;
use crate::config::ConfigOverrides;

#[test]
fn model_follows_variant() {
    let bounce = build_model(&RenderConfig::bounce());
    assert_eq!(bounce.name(), "bounce");
    assert_eq!(bounce.canvas().width, 200);

    let rave = build_model(&RenderConfig::rave());
    assert_eq!(rave.name(), "rave");
    assert_eq!(rave.canvas().height, 500);
}

#[test]
fn explicit_seed_is_kept() {
    let cfg = RenderConfig::rave().with_overrides(&ConfigOverrides {
        seed: Some(99),
        parallel: Some(true),
        threads: Some(3),
        ..ConfigOverrides::default()
    });
    let opts = render_opts(&cfg).unwrap();
    assert_eq!(opts.seed, 99);
    assert_eq!(opts.range.len_frames(), 600);
    assert!(opts.threading.parallel);
    assert_eq!(opts.threading.threads, Some(3));
}

#[test]
fn export_request_mirrors_config() {
    let cfg = RenderConfig::rave();
    let req = export_request(&cfg, FrameSequence::new("frames_ffmpeg", 600)).unwrap();
    assert_eq!(req.fps.num, 30);
    assert_eq!(req.frames.len, 600);
    assert_eq!(req.audio, PathBuf::from("my_soundtrack.mp3"));
    assert_eq!(req.out_path, PathBuf::from("funky_rave_output.mp4"));
    assert_eq!(req.audio_bitrate.as_deref(), Some("192k"));
    assert!(req.overwrite);
    assert!((req.video_duration_secs() - 20.0).abs() < 1e-9);
}

#[test]
fn invalid_config_renders_nothing() {
    let dir = PathBuf::from("target").join("unit_reel").join("invalid");
    let _ = std::fs::remove_dir_all(&dir);
    let cfg = RenderConfig::bounce().with_overrides(&ConfigOverrides {
        fps: Some(0),
        frames_dir: Some(dir.clone()),
        ..ConfigOverrides::default()
    });
    assert!(render_frames(&cfg).is_err());
    assert!(!dir.exists());
}

#[test]
fn run_without_exporter_stops_after_frames() {
    let dir = PathBuf::from("target").join("unit_reel").join("no_export");
    let _ = std::fs::remove_dir_all(&dir);
    let cfg = RenderConfig::bounce().with_overrides(&ConfigOverrides {
        duration_secs: Some(1),
        frames_dir: Some(dir.clone()),
        ..ConfigOverrides::default()
    });

    let outcome = run(&cfg, None).unwrap();
    assert_eq!(outcome.reel.frames.len, 30);
    assert!(outcome.video.is_none());
    assert!(outcome.reel.frames.is_complete());
}

struct FailingExporter;

impl VideoExporter for FailingExporter {
    fn export(&mut self, _req: &ExportRequest) -> StickreelResult<()> {
        Err(StickreelError::encode("no encoder"))
    }
}

#[test]
fn run_tags_failures_with_their_stage() {
    let dir = PathBuf::from("target").join("unit_reel").join("stages");
    let _ = std::fs::remove_dir_all(&dir);
    let cfg = RenderConfig::bounce().with_overrides(&ConfigOverrides {
        duration_secs: Some(1),
        frames_dir: Some(dir.clone()),
        ..ConfigOverrides::default()
    });

    let err = run(&cfg, Some(&mut FailingExporter)).unwrap_err();
    assert_eq!(err.stage, Stage::Export);
    assert_eq!(err.to_string(), "export stage failed");
    assert!(err.source.to_string().contains("no encoder"));

    let bad = cfg.with_overrides(&ConfigOverrides {
        fps: Some(0),
        ..ConfigOverrides::default()
    });
    let err = run(&bad, Some(&mut FailingExporter)).unwrap_err();
    assert_eq!(err.stage, Stage::Render);
    assert_eq!(err.to_string(), "render stage failed");
}

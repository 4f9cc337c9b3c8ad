use super::*;
use crate::encode::frames::FrameSequence;
use crate::foundation::core::Fps;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_ffmpeg").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn request(dir: &Path, bitrate: Option<&str>) -> ExportRequest {
    ExportRequest {
        frames: FrameSequence::new(dir.join("frames"), 600),
        fps: Fps::whole(30).unwrap(),
        audio: dir.join("track.mp3"),
        out_path: dir.join("out").join("video.mp4"),
        audio_bitrate: bitrate.map(str::to_owned),
        overwrite: true,
    }
}

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn position(args: &[String], flag: &str) -> usize {
    args.iter()
        .position(|a| a == flag)
        .unwrap_or_else(|| panic!("missing {flag}"))
}

#[test]
fn args_put_framerate_before_the_image_input() {
    let req = request(Path::new("work"), None);
    let args = strings(&FfmpegExporter::default().args(&req));

    assert_eq!(args[0], "-y");
    let rate = position(&args, "-framerate");
    assert_eq!(args[rate + 1], "30");
    assert_eq!(args[rate + 2], "-i");
    assert!(args[rate + 3].ends_with("frame_%04d.png"));
    assert_eq!(args[rate + 4], "-i");
    assert!(args[rate + 5].ends_with("track.mp3"));
    assert!(args.last().unwrap().ends_with("video.mp4"));
}

#[test]
fn args_trim_to_shortest_and_pick_compatible_codecs() {
    let req = request(Path::new("work"), None);
    let args = strings(&FfmpegExporter::default().args(&req));

    assert!(args.contains(&"-shortest".to_owned()));
    assert_eq!(args[position(&args, "-frames:v") + 1], "600");
    assert_eq!(args[position(&args, "-c:v") + 1], "libx264");
    assert_eq!(args[position(&args, "-pix_fmt") + 1], "yuv420p");
    assert_eq!(args[position(&args, "-c:a") + 1], "aac");
    assert!(!args.contains(&"-b:a".to_owned()));
}

#[test]
fn args_carry_audio_bitrate_when_set() {
    let req = request(Path::new("work"), Some("192k"));
    let args = strings(&FfmpegExporter::default().args(&req));
    assert_eq!(args[position(&args, "-b:a") + 1], "192k");
    assert!(position(&args, "-b:a") < args.len() - 1);
}

#[test]
fn args_refuse_overwrite_when_disabled() {
    let mut req = request(Path::new("work"), None);
    req.overwrite = false;
    let args = strings(&FfmpegExporter::default().args(&req));
    assert_eq!(args[0], "-n");
    assert!(!args.contains(&"-y".to_owned()));
}

#[test]
fn fractional_rate_is_passed_as_ratio() {
    let mut req = request(Path::new("work"), None);
    req.fps = Fps::new(30_000, 1001).unwrap();
    let args = strings(&FfmpegExporter::default().args(&req));
    assert_eq!(args[position(&args, "-framerate") + 1], "30000/1001");
}

#[test]
fn missing_audio_fails_before_spawning() {
    let dir = scratch_dir("missing_audio");
    let mut exporter = FfmpegExporter::new(FfmpegExporterOpts {
        program: PathBuf::from("definitely-not-an-encoder"),
        ..FfmpegExporterOpts::default()
    });
    let err = exporter.export(&request(&dir, None)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("encode error:"));
    assert!(msg.contains("track.mp3"));
}

#[test]
fn empty_sequence_is_rejected() {
    let dir = scratch_dir("empty");
    std::fs::write(dir.join("track.mp3"), b"id3").unwrap();
    let mut req = request(&dir, None);
    req.frames.len = 0;
    let err = FfmpegExporter::default().export(&req).unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn missing_program_is_an_encode_error() {
    let dir = scratch_dir("no_program");
    std::fs::write(dir.join("track.mp3"), b"id3").unwrap();
    let mut exporter = FfmpegExporter::new(FfmpegExporterOpts {
        program: PathBuf::from("definitely-not-an-encoder"),
        ..FfmpegExporterOpts::default()
    });
    let err = exporter.export(&request(&dir, None)).unwrap_err();
    assert!(err.to_string().contains("not found on PATH"));
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    ensure_parent_dir(Path::new("video.mp4")).unwrap();
    let dir = scratch_dir("parent");
    ensure_parent_dir(&dir.join("a").join("b").join("v.mp4")).unwrap();
    assert!(dir.join("a").join("b").is_dir());
}

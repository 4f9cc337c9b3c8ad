use super::*;

#[test]
fn frame_range_rejects_reversed_bounds() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(FrameRange::first(0).is_empty());
}

#[test]
fn frame_range_iter_is_ordered() {
    let got: Vec<u64> = FrameRange::first(4).iter().map(|f| f.0).collect();
    assert_eq!(got, vec![0, 1, 2, 3]);
}

#[test]
fn fps_frames_to_secs() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.frames_to_secs(30000) - 1001.0).abs() < 1e-9);
    assert!((Fps::whole(30).unwrap().frames_to_secs(600) - 20.0).abs() < 1e-12);
}

#[test]
fn fps_frame_time_and_ffmpeg_rate() {
    let fps = Fps::whole(30).unwrap();
    assert_eq!(fps.frame_time_secs(FrameIndex(0)), 0.0);
    assert!((fps.frame_time_secs(FrameIndex(45)) - 1.5).abs() < 1e-12);
    assert_eq!(fps.to_ffmpeg_rate(), "30");
    assert_eq!(Fps::new(30000, 1001).unwrap().to_ffmpeg_rate(), "30000/1001");
    assert!(Fps::whole(0).is_err());
}

#[test]
fn hsv_primaries() {
    assert_eq!(Rgba8::from_hsv(0.0, 1.0, 1.0), Rgba8::opaque(255, 0, 0));
    assert_eq!(Rgba8::from_hsv(1.0 / 3.0, 1.0, 1.0), Rgba8::opaque(0, 255, 0));
    assert_eq!(Rgba8::from_hsv(2.0 / 3.0, 1.0, 1.0), Rgba8::opaque(0, 0, 255));
    assert_eq!(Rgba8::from_hsv(0.5, 0.0, 0.5), Rgba8::opaque(127, 127, 127));
}

#[test]
fn hsv_hue_wraps() {
    assert_eq!(Rgba8::from_hsv(1.25, 1.0, 1.0), Rgba8::from_hsv(0.25, 1.0, 1.0));
    assert_eq!(Rgba8::from_hsv(-0.75, 1.0, 1.0), Rgba8::from_hsv(0.25, 1.0, 1.0));
}


use super::*;
use crate::foundation::core::Canvas;
use crate::scene::model::Rect;

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn clear_color_fills_every_pixel() {
    let mut backend = CpuBackend::new(CpuBackendOpts::default());
    let scene = Scene::new(canvas(8, 6), Rgba8::opaque(10, 20, 30));
    let frame = backend.render_scene(&scene).unwrap();
    assert_eq!((frame.width, frame.height), (8, 6));
    assert_eq!(frame.data.len(), 8 * 6 * 4);
    assert!(frame.premultiplied);
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, [10, 20, 30, 255]);
    }
}

#[test]
fn primitives_land_where_expected() {
    let mut backend = CpuBackend::new(CpuBackendOpts::default());
    let mut scene = Scene::new(canvas(64, 64), Rgba8::BLACK);
    scene.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, 64.0, 8.0),
        color: Rgba8::opaque(0, 0, 255),
    });
    scene.push(DrawOp::Circle {
        center: Point::new(32.0, 32.0),
        radius: 10.0,
        color: Rgba8::opaque(255, 0, 0),
        stroke_width: None,
    });
    scene.push(DrawOp::Line {
        from: Point::new(0.0, 56.5),
        to: Point::new(64.0, 56.5),
        color: Rgba8::WHITE,
        width: 3.0,
    });
    let frame = backend.render_scene(&scene).unwrap();

    assert_eq!(frame.pixel(10, 3), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(32, 32), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(20, 56), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(5, 30), Some([0, 0, 0, 255]));
}

#[test]
fn outlined_circle_leaves_center_empty() {
    let mut backend = CpuBackend::new(CpuBackendOpts::default());
    let mut scene = Scene::new(canvas(40, 40), Rgba8::BLACK);
    scene.push(DrawOp::Circle {
        center: Point::new(20.0, 20.0),
        radius: 10.0,
        color: Rgba8::WHITE,
        stroke_width: Some(3.0),
    });
    let frame = backend.render_scene(&scene).unwrap();
    assert_eq!(frame.pixel(20, 20), Some([0, 0, 0, 255]));
    // Ring spans radius 7..10 around the center.
    assert_eq!(frame.pixel(28, 20), Some([255, 255, 255, 255]));
}

#[test]
fn glow_is_brighter_at_the_rim_than_the_center() {
    let mut backend = CpuBackend::new(CpuBackendOpts::default());
    let mut scene = Scene::new(canvas(128, 128), Rgba8::BLACK);
    scene.push(DrawOp::Glow {
        center: Point::new(64.0, 64.0),
        radius: 60.0,
        color: Rgba8::opaque(0, 255, 0),
        ring_step: 6.0,
        peak_alpha: 0.5,
    });
    let frame = backend.render_scene(&scene).unwrap();
    let center = frame.pixel(64, 64).unwrap();
    let rim = frame.pixel(64 + 57, 64).unwrap();
    let outside = frame.pixel(2, 2).unwrap();
    assert!(rim[1] > center[1], "rim {rim:?} center {center:?}");
    assert!(rim[1] > 100 && rim[1] < 140, "rim {rim:?}");
    assert_eq!(rim[3], 255);
    assert_eq!(outside, [0, 0, 0, 255]);
}

#[test]
fn canvas_is_cleared_between_frames() {
    let mut backend = CpuBackend::new(CpuBackendOpts::default());
    let mut busy = Scene::new(canvas(16, 16), Rgba8::BLACK);
    busy.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, 16.0, 16.0),
        color: Rgba8::WHITE,
    });
    let empty = Scene::new(canvas(16, 16), Rgba8::BLACK);

    let first = backend.render_scene(&empty).unwrap();
    let _ = backend.render_scene(&busy).unwrap();
    let again = backend.render_scene(&empty).unwrap();
    assert_eq!(first, again);
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let mut backend = CpuBackend::new(CpuBackendOpts::default());
    let scene = Scene::new(canvas(70_000, 4), Rgba8::BLACK);
    let err = backend.render_scene(&scene).unwrap_err();
    assert!(err.to_string().contains("render error"));
}

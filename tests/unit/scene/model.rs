use super::*;

#[test]
fn glow_rings_step_inward_from_floor_radius() {
    let rings = glow_rings(20.5, 6.0, 0.5);
    let outers: Vec<f64> = rings.iter().map(|r| r.outer).collect();
    assert_eq!(outers, vec![20.0, 14.0, 8.0, 2.0]);

    let inners: Vec<f64> = rings.iter().map(|r| r.inner).collect();
    assert_eq!(inners, vec![14.0, 8.0, 2.0, 0.0]);
}

#[test]
fn glow_alpha_falls_off_quadratically_toward_center() {
    let rings = glow_rings(100.0, 6.0, 0.5);
    assert_eq!(rings[0].alpha, 127);
    for pair in rings.windows(2) {
        assert!(pair[0].alpha >= pair[1].alpha);
    }
    // (4/100)^2 * 0.5 * 255 = 0.204
    assert_eq!(rings.last().unwrap().alpha, 0);
}

#[test]
fn degenerate_glow_has_no_rings() {
    assert!(glow_rings(0.0, 6.0, 0.5).is_empty());
    assert!(glow_rings(0.9, 6.0, 0.5).is_empty());
    assert!(glow_rings(10.0, 0.0, 0.5).is_empty());
}

#[test]
fn scene_preserves_push_order() {
    let mut scene = Scene::new(
        Canvas {
            width: 4,
            height: 4,
        },
        Rgba8::BLACK,
    );
    scene.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Rgba8::WHITE, 1.0);
    scene.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, 2.0, 2.0),
        color: Rgba8::WHITE,
    });
    assert!(matches!(scene.ops[0], DrawOp::Line { .. }));
    assert!(matches!(scene.ops[1], DrawOp::FillRect { .. }));
}

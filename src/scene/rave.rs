//! Four dancers on a pulsing dance floor.
//!
//! Everything except the laser and sparkle overlays is a closed-form function of time and
//! dancer id.

use std::f64::consts::TAU;

use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgba8};
use crate::foundation::rng::OverlayRng;
use crate::scene::model::{DrawOp, Rect, Scene, SceneModel};

/// Pose phase wraps after this many seconds.
pub const POSE_PERIOD_SECS: f64 = 10.0;
/// Sparkles drawn per frame.
pub const SPARKLE_COUNT: usize = 60;
/// Laser streaks drawn per frame while the laser beat is on.
pub const LASER_COUNT: usize = 8;
/// Horizontal light bars.
pub const MOVING_LIGHT_COUNT: usize = 4;

const SPOTLIGHT_RING_STEP: f64 = 6.0;
const SPOTLIGHT_PEAK_ALPHA: f64 = 0.5;

/// Scalar pose parameters of one dancer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Vertical waist offset below the default torso length.
    pub waist_bounce: f64,
    /// Knee displacement toward the body center.
    pub knee_swing: f64,
    /// Base horizontal distance between waist and knees.
    pub leg_spread: f64,
    /// Additional spread from hip rotation.
    pub hip_twist: f64,
}

/// `floor(rate * t) mod 2` as a binary beat.
pub fn beat(t: f64, rate: f64) -> u8 {
    ((rate * t).floor() as i64).rem_euclid(2) as u8
}

/// Background color: hue cycles every 10 s, brightness flips on a 2 Hz beat.
pub fn bg_color(t: f64) -> Rgba8 {
    let hue = (t * 0.1).rem_euclid(1.0);
    let brightness = 0.1 + 0.4 * f64::from(beat(t, 4.0));
    Rgba8::from_hsv(hue, 1.0, brightness)
}

/// Fully saturated per-dancer color drifting through the hue wheel.
pub fn dancer_color(t: f64, dancer: u32) -> Rgba8 {
    let hue = (t * 0.5 + f64::from(dancer) * 0.2).rem_euclid(1.0);
    Rgba8::from_hsv(hue, 1.0, 1.0)
}

/// Pose of `dancer` at `t`. Each parameter is a sine whose frequency shifts with the id.
pub fn pose(dancer: u32, t: f64) -> Pose {
    let d = f64::from(dancer);
    let p = t.rem_euclid(POSE_PERIOD_SECS) / POSE_PERIOD_SECS;
    let wave = |cycles: f64| (p * TAU * cycles).sin();
    Pose {
        waist_bounce: wave(8.0 + d * 2.0) * 40.0,
        knee_swing: wave(4.0 + d) * 25.0,
        leg_spread: 30.0 + wave(2.0 + d) * 20.0,
        hip_twist: wave(1.0 + d) * 25.0,
    }
}

/// Neck position of `dancer`: a slot 200 units apart plus independent x/y sine drift.
pub fn dancer_position(dancer: u32, t: f64) -> Point {
    let d = f64::from(dancer);
    let base_x = 200.0 + d * 200.0;
    let wave_x = (t * 1.5 + d).sin() * 100.0;
    let base_y = 200.0;
    let wave_y = (t * 2.0 + d * 0.5).sin() * 30.0;
    Point::new(base_x + wave_x, base_y + wave_y)
}

/// Pulsing colored glow centered at `center`.
pub fn spotlight(center: Point, t: f64, dancer: u32) -> DrawOp {
    let d = f64::from(dancer);
    let pulse = ((t * 6.0 + d).sin() + 1.0) / 2.0;
    let radius = 90.0 + pulse * 50.0;
    let hue = (0.6 + 0.2 * d + 0.2 * (t + d).sin()).rem_euclid(1.0);
    DrawOp::Glow {
        center,
        radius,
        color: Rgba8::from_hsv(hue, 1.0, 1.0),
        ring_step: SPOTLIGHT_RING_STEP,
        peak_alpha: SPOTLIGHT_PEAK_ALPHA,
    }
}

/// Spotlight followed by the skeleton of `dancer` with its neck at `neck`.
pub fn dancer_ops(neck: Point, t: f64, dancer: u32) -> Vec<DrawOp> {
    let pose = pose(dancer, t);
    let color = dancer_color(t, dancer);
    let (x, y) = (neck.x, neck.y);
    let line = |from: Point, to: Point, width: f64| DrawOp::Line {
        from,
        to,
        color,
        width,
    };

    let waist = Point::new(x, y + 50.0 + pose.waist_bounce);

    let arm_angle = (t * 10.0 + f64::from(dancer)).sin() * 2.5;
    let arm_len = 50.0;
    let arm_left = Point::new(
        x - arm_angle.cos() * arm_len,
        y + arm_angle.sin() * arm_len,
    );
    let arm_right = Point::new(
        x + arm_angle.cos() * arm_len,
        y + arm_angle.sin() * arm_len,
    );

    let spread = pose.leg_spread + pose.hip_twist;
    let knee = pose.knee_swing;
    let knee_left = Point::new(waist.x - spread + knee, waist.y + 35.0);
    let foot_left = Point::new(waist.x - spread + knee * 0.6, waist.y + 90.0);
    let knee_right = Point::new(waist.x + spread - knee, waist.y + 35.0);
    let foot_right = Point::new(waist.x + spread - knee * 0.6, waist.y + 90.0);

    vec![
        spotlight(Point::new(x, y + 40.0), t, dancer),
        DrawOp::Circle {
            center: Point::new(x, y - 35.0),
            radius: 22.0,
            color,
            stroke_width: Some(3.0),
        },
        line(neck, waist, 4.0),
        line(neck, arm_left, 4.0),
        line(neck, arm_right, 4.0),
        line(waist, knee_left, 4.0),
        line(knee_left, foot_left, 3.0),
        line(waist, knee_right, 4.0),
        line(knee_right, foot_right, 3.0),
    ]
}

/// Full-height laser streaks, present only while the 3 Hz laser beat is on.
pub fn lasers(t: f64, canvas: Canvas, rng: &mut dyn OverlayRng) -> Vec<DrawOp> {
    if beat(t, 6.0) != 0 {
        return Vec::new();
    }
    let w = i64::from(canvas.width);
    (0..LASER_COUNT)
        .map(|_| {
            let x1 = rng.range_inclusive(0, w) as f64;
            let x2 = rng.range_inclusive(0, w) as f64;
            let hue = (t * 0.1 + rng.next_f64()).rem_euclid(1.0);
            let width = rng.range_inclusive(2, 5) as f64;
            DrawOp::Line {
                from: Point::new(x1, 0.0),
                to: Point::new(x2, canvas.height_f64()),
                color: Rgba8::from_hsv(hue, 1.0, 1.0),
                width,
            }
        })
        .collect()
}

/// Randomly scattered filled dots.
pub fn sparkles(t: f64, canvas: Canvas, rng: &mut dyn OverlayRng) -> Vec<DrawOp> {
    (0..SPARKLE_COUNT)
        .map(|_| {
            let x = rng.range_inclusive(0, i64::from(canvas.width)) as f64;
            let y = rng.range_inclusive(0, i64::from(canvas.height)) as f64;
            let hue = (t * 0.5 + rng.next_f64()).rem_euclid(1.0);
            let radius = rng.range_inclusive(2, 6) as f64;
            DrawOp::Circle {
                center: Point::new(x, y),
                radius,
                color: Rgba8::from_hsv(hue, 1.0, 1.0),
                stroke_width: None,
            }
        })
        .collect()
}

/// Dim horizontal bars sweeping up and down the canvas.
pub fn moving_lights(t: f64, canvas: Canvas) -> Vec<DrawOp> {
    (0..MOVING_LIGHT_COUNT)
        .map(|i| {
            let i = i as f64;
            let y = (((t * 0.4 + i).sin() + 1.0) / 2.0 * canvas.height_f64()).floor();
            let hue = (0.8 + i * 0.1 + t * 0.2).rem_euclid(1.0);
            DrawOp::FillRect {
                rect: Rect::new(0.0, y, canvas.width_f64(), y + 3.0),
                color: Rgba8::from_hsv(hue, 1.0, 0.2),
            }
        })
        .collect()
}

/// The dance floor scene.
#[derive(Clone, Copy, Debug)]
pub struct RaveModel {
    canvas: Canvas,
    dancers: u32,
}

impl RaveModel {
    /// Model for `canvas` with `dancers` figures in slots 200 units apart.
    pub fn new(canvas: Canvas, dancers: u32) -> Self {
        Self { canvas, dancers }
    }

    /// Scene at time `t` seconds.
    pub fn scene_at_time(&self, t: f64, rng: &mut dyn OverlayRng) -> Scene {
        let mut scene = Scene::new(self.canvas, bg_color(t));
        scene.extend(moving_lights(t, self.canvas));
        scene.extend(lasers(t, self.canvas, rng));
        scene.extend(sparkles(t, self.canvas, rng));
        for dancer in 0..self.dancers {
            let neck = dancer_position(dancer, t);
            scene.extend(dancer_ops(neck, t, dancer));
        }
        scene
    }
}

impl SceneModel for RaveModel {
    fn name(&self) -> &'static str {
        "rave"
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn scene_at(&self, frame: FrameIndex, fps: Fps, rng: &mut dyn OverlayRng) -> Scene {
        self.scene_at_time(fps.frame_time_secs(frame), rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rave.rs"]
mod tests;

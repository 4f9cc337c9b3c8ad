//! Single white stick figure bobbing up and down.
//!
//! The vertical offset follows a reflecting recurrence: `y` moves one unit per frame and turns
//! around on reaching [`BOUNCE_MIN`] or [`BOUNCE_MAX`]. [`BounceState`] replays it step by step;
//! [`bounce_y`] gives the same value in closed form so frames can be built out of order.

use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgba8};
use crate::foundation::rng::OverlayRng;
use crate::scene::model::{DrawOp, Scene, SceneModel};

/// Starting vertical offset.
pub const BOUNCE_START: i64 = 150;
/// Lower turning point (inclusive).
pub const BOUNCE_MIN: i64 = 140;
/// Upper turning point (inclusive).
pub const BOUNCE_MAX: i64 = 160;
/// Frames for one full up-and-down cycle.
pub const BOUNCE_PERIOD: u64 = 2 * (BOUNCE_MAX - BOUNCE_MIN) as u64;

const FIGURE_X: f64 = 100.0;

/// Iterative bounce state `(y, dir)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BounceState {
    /// Current vertical offset.
    pub y: i64,
    /// Direction of the next step, `+1` or `-1`.
    pub dir: i64,
}

impl Default for BounceState {
    fn default() -> Self {
        Self {
            y: BOUNCE_START,
            dir: 1,
        }
    }
}

impl BounceState {
    /// Advance one frame and return the offset to draw.
    ///
    /// The bound check runs after the increment, so the bound itself is drawn and the reversal
    /// applies from the next frame on.
    pub fn step(&mut self) -> i64 {
        self.y += self.dir;
        if self.y >= BOUNCE_MAX || self.y <= BOUNCE_MIN {
            self.dir = -self.dir;
        }
        self.y
    }
}

/// Offset drawn at `frame`, equal to calling [`BounceState::step`] `frame + 1` times on the
/// default state.
pub fn bounce_y(frame: FrameIndex) -> i64 {
    let half = (BOUNCE_MAX - BOUNCE_MIN) / 2;
    let steps = frame.0 % BOUNCE_PERIOD + 1;
    // Phase 0 sits at the bottom of the triangle wave; the start is half-way up.
    let phase = ((steps + half as u64) % BOUNCE_PERIOD) as i64;
    let rise = BOUNCE_MAX - BOUNCE_MIN;
    let offset = if phase < rise { phase } else { 2 * rise - phase };
    BOUNCE_MIN + offset
}

/// Five-primitive stick figure anchored at hip height `y`.
pub fn stick_figure(y: f64) -> Vec<DrawOp> {
    let x = FIGURE_X;
    let color = Rgba8::WHITE;
    let line = |from: (f64, f64), to: (f64, f64)| DrawOp::Line {
        from: Point::new(from.0, from.1),
        to: Point::new(to.0, to.1),
        color,
        width: 1.0,
    };
    vec![
        DrawOp::Circle {
            center: Point::new(x, y - 40.0),
            radius: 10.0,
            color,
            stroke_width: Some(1.0),
        },
        line((x, y - 30.0), (x, y)),
        line((x - 15.0, y - 20.0), (x + 15.0, y - 20.0)),
        line((x, y), (x - 15.0, y + 30.0)),
        line((x, y), (x + 15.0, y + 30.0)),
    ]
}

/// Bouncing stick figure on black.
#[derive(Clone, Copy, Debug)]
pub struct BounceModel {
    canvas: Canvas,
}

impl BounceModel {
    /// Model laid out for `canvas`. The figure is fixed at x = 100.
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }
}

impl SceneModel for BounceModel {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn scene_at(&self, frame: FrameIndex, _fps: Fps, _rng: &mut dyn OverlayRng) -> Scene {
        let mut scene = Scene::new(self.canvas, Rgba8::BLACK);
        scene.extend(stick_figure(bounce_y(frame) as f64));
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/bounce.rs"]
mod tests;

use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgba8};
use crate::foundation::rng::OverlayRng;

pub use kurbo::Rect;

/// One drawing primitive, in canvas pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Axis-aligned filled rectangle.
    FillRect {
        /// Rectangle bounds.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Circle, filled when `stroke_width` is `None`, outlined otherwise.
    Circle {
        /// Circle center.
        center: Point,
        /// Outer radius.
        radius: f64,
        /// Fill or stroke color.
        color: Rgba8,
        /// Outline width, drawn inside `radius`.
        stroke_width: Option<f64>,
    },
    /// Straight line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width.
        width: f64,
    },
    /// Alpha-blended radial glow made of concentric rings (see [`glow_rings`]).
    Glow {
        /// Glow center.
        center: Point,
        /// Outermost ring radius.
        radius: f64,
        /// Ring color; alpha comes from the ring falloff.
        color: Rgba8,
        /// Radius decrement between rings.
        ring_step: f64,
        /// Alpha multiplier at the outer edge (`0..=1`).
        peak_alpha: f64,
    },
}

/// One ring of a [`DrawOp::Glow`]: pixels at distance `inner < d <= outer` get `alpha`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowRing {
    /// Outer radius.
    pub outer: f64,
    /// Inner radius (0 for the innermost disc).
    pub inner: f64,
    /// Ring alpha.
    pub alpha: u8,
}

/// Expand a glow into rings, outermost first.
///
/// Ring radii start at `floor(radius)` and step inward by `ring_step` while positive. Each ring
/// covers the band down to the next smaller ring with alpha `255 * (r / radius)^2 * peak_alpha`,
/// so alpha grows quadratically toward the rim.
pub fn glow_rings(radius: f64, ring_step: f64, peak_alpha: f64) -> Vec<GlowRing> {
    if radius <= 0.0 || ring_step <= 0.0 {
        return Vec::new();
    }
    let mut radii = Vec::new();
    let mut r = radius.floor();
    while r > 0.0 {
        radii.push(r);
        r -= ring_step;
    }

    radii
        .iter()
        .enumerate()
        .map(|(i, &outer)| {
            let inner = radii.get(i + 1).copied().unwrap_or(0.0);
            let alpha = (255.0 * (outer / radius).powi(2) * peak_alpha).clamp(0.0, 255.0) as u8;
            GlowRing {
                outer,
                inner,
                alpha,
            }
        })
        .collect()
}

/// Ordered draw list for one frame, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Canvas the scene was laid out for.
    pub canvas: Canvas,
    /// Color the canvas is cleared to before any op is drawn.
    pub clear: Rgba8,
    /// Primitives in paint order.
    pub ops: Vec<DrawOp>,
}

impl Scene {
    /// Empty scene cleared to `clear`.
    pub fn new(canvas: Canvas, clear: Rgba8) -> Self {
        Self {
            canvas,
            clear,
            ops: Vec::new(),
        }
    }

    /// Append a primitive on top of everything drawn so far.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Append several primitives in order.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = DrawOp>) {
        self.ops.extend(ops);
    }

    /// Append a stroked line segment.
    pub fn line(&mut self, from: Point, to: Point, color: Rgba8, width: f64) {
        self.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }
}

/// A procedural animation: maps a frame to a [`Scene`].
///
/// Implementations must be pure in `frame` apart from what they draw from `rng`, so frames can
/// be produced in any order.
pub trait SceneModel: Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Canvas every scene is laid out for.
    fn canvas(&self) -> Canvas;

    /// Build the draw list for `frame` at the given frame rate.
    fn scene_at(&self, frame: FrameIndex, fps: Fps, rng: &mut dyn OverlayRng) -> Scene;
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

use std::f64::consts::TAU;

use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{StickreelError, StickreelResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::model::{DrawOp, Scene, glow_rings};

/// Options for the CPU backend.
#[derive(Debug, Clone, Copy)]
pub struct CpuBackendOpts {
    /// Curve flattening tolerance in pixels for circles and rings.
    pub tolerance: f64,
}

impl Default for CpuBackendOpts {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

/// CPU backend powered by `vello_cpu`.
///
/// The render context and target pixmap are allocated on first use and reused for every
/// following frame of the same size.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    /// Create a backend; no surface is allocated until the first frame.
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            opts,
            surface: None,
        }
    }

    fn surface_for(&mut self, width: u32, height: u32) -> StickreelResult<&mut CpuSurface> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| StickreelError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| StickreelError::render("canvas height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(StickreelError::render("canvas must be non-empty"));
        }

        let reuse = matches!(
            &self.surface,
            Some(s) if s.width == width_u16 && s.height == height_u16
        );
        if !reuse {
            self.surface = Some(CpuSurface {
                width: width_u16,
                height: height_u16,
                ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
                pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            });
        }
        self.surface
            .as_mut()
            .ok_or_else(|| StickreelError::render("render surface missing"))
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(&mut self, scene: &Scene) -> StickreelResult<FrameRGBA> {
        let tolerance = self.opts.tolerance;
        let canvas = scene.canvas;
        let surface = self.surface_for(canvas.width, canvas.height)?;
        let ctx = &mut surface.ctx;
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        set_color(ctx, scene.clear);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(surface.width),
            f64::from(surface.height),
        ));

        for op in &scene.ops {
            draw_op(ctx, op, tolerance);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_opts(&self) -> Option<CpuBackendOpts> {
        Some(self.opts)
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp, tolerance: f64) {
    match op {
        DrawOp::FillRect { rect, color } => {
            set_color(ctx, *color);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        }
        DrawOp::Circle {
            center,
            radius,
            color,
            stroke_width,
        } => {
            set_color(ctx, *color);
            match stroke_width {
                None => {
                    let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(*center), *radius);
                    ctx.fill_path(&circle.to_path(tolerance));
                }
                Some(width) => {
                    // Outline sits inside the nominal radius.
                    let width = width.min(*radius).max(0.0);
                    let circle = vello_cpu::kurbo::Circle::new(
                        point_to_cpu(*center),
                        (radius - width / 2.0).max(0.0),
                    );
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                    ctx.stroke_path(&circle.to_path(tolerance));
                }
            }
        }
        DrawOp::Line {
            from,
            to,
            color,
            width,
        } => {
            set_color(ctx, *color);
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(*from));
            path.line_to(point_to_cpu(*to));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&path);
        }
        DrawOp::Glow {
            center,
            radius,
            color,
            ring_step,
            peak_alpha,
        } => {
            let c = point_to_cpu(*center);
            for ring in glow_rings(*radius, *ring_step, *peak_alpha) {
                if ring.alpha == 0 {
                    continue;
                }
                set_color(ctx, color.with_alpha(ring.alpha));
                let path = if ring.inner > 0.0 {
                    vello_cpu::kurbo::CircleSegment::new(c, ring.outer, ring.inner, 0.0, TAU)
                        .to_path(tolerance)
                } else {
                    vello_cpu::kurbo::Circle::new(c, ring.outer).to_path(tolerance)
                };
                ctx.fill_path(&path);
            }
        }
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

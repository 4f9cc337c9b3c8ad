use crate::foundation::error::StickreelResult;
use crate::scene::model::Scene;

/// A rendered frame as RGBA8 pixels.
///
/// Frames coming out of [`crate::CpuBackend`] are **premultiplied alpha**. The `premultiplied`
/// flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 bytes of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A rasterizer that turns a [`Scene`] into pixels.
///
/// Implementations own their drawing surface and reuse it between calls; every call starts
/// from a cleared canvas.
pub trait RenderBackend {
    /// Rasterize `scene` back to front and read back the result.
    fn render_scene(&mut self, scene: &Scene) -> StickreelResult<FrameRGBA>;

    /// Options required to construct equivalent worker backends for parallel rendering.
    fn worker_opts(&self) -> Option<crate::render::cpu::CpuBackendOpts> {
        None
    }
}

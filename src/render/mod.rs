//! Rasterization of scene draw lists and the frame loop.

/// Backend trait and the rendered frame type.
pub mod backend;
/// CPU rasterizer powered by `vello_cpu`.
pub mod cpu;
/// Frame loop: scene model -> backend -> sink.
pub mod pipeline;

//! Frame sinks and video export.
//!
//! Rendered frames flow into a [`sink::FrameSink`] in timeline order. The PNG sequence sink
//! writes the frame directory that a [`exporter::VideoExporter`] later turns into a video.

/// Video exporter contract and request type.
pub mod exporter;
/// `ffmpeg`-based exporter (system binary).
pub mod ffmpeg;
/// Numbered PNG frame sequences on disk.
pub mod frames;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;

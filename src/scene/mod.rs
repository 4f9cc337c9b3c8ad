//! Scene models: pure functions from a frame to an ordered draw list.

/// Bouncing stick figure.
pub mod bounce;
/// Draw list types and the [`model::SceneModel`] trait.
pub mod model;
/// Four-dancer rave floor.
pub mod rave;

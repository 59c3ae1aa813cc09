//! Stencil shadow volumes for triangle meshes lit by dynamic point lights.
//!
//! A [`ShadowVolumeNode`] holds a shared caster mesh and, once per frame,
//! builds one closed or open volume per nearby light. Volumes are handed to a
//! [`StencilSink`] for rasterization with the depth-pass or depth-fail
//! stencil technique.

pub mod error;
pub mod math;
pub mod mesh;
pub mod operations;
pub mod scene;
pub mod volume;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod fixtures;

pub use error::{Result, UmbraError};
pub use mesh::{Mesh, MeshBuffer, ShadowMesh};
pub use scene::{DebugFlags, Light, LightRegistry, LightSource, Spatial, StencilSink};
pub use volume::{CapMethod, ShadowVolume, ShadowVolumeConfig, ShadowVolumeNode};

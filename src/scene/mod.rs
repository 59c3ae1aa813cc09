//! Collaborators of the shadow volume pipeline: where lights come from,
//! where the caster sits in the world, and where finished volumes go.

mod light;
mod sink;
mod spatial;

pub use light::{Light, LightId, LightRegistry, LightSource};
pub use sink::{DebugFlags, StencilSink};
pub use spatial::Spatial;

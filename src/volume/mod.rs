//! Shadow volume storage, configuration and the per-node frame driver.

mod config;
mod node;
mod pool;

pub use config::{AdjacencyMethod, CapMethod, ShadowVolumeConfig};
pub use node::{NodeState, ShadowVolumeNode};
pub use pool::{ShadowVolume, ShadowVolumePool};

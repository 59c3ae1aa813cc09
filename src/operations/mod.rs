//! The per-mesh and per-light steps of shadow volume construction.
//!
//! Adjacency depends only on topology and is rebuilt when the mesh changes
//! shape. Classification, silhouette extraction and extrusion run once per
//! light per frame, in that order.

mod adjacency;
mod classify;
mod extrude;
mod silhouette;

pub use adjacency::{Adjacency, BuildAdjacency};
pub use classify::ClassifyFaces;
pub use extrude::{extrude_point, ExtrudeEdges};
pub use silhouette::ExtractSilhouette;

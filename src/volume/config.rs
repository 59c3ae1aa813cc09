use crate::error::ConfigError;
use crate::math::Winding;

/// Stencil technique the volumes are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapMethod {
    /// Depth-fail: volumes get a front and a back cap. Robust when the
    /// camera is inside a volume.
    #[default]
    ZFail,
    /// Depth-pass: open volumes, no caps. Cheaper, but wrong when the camera
    /// is inside a volume.
    ZPass,
}

/// How the triangle adjacency table is computed.
///
/// Both produce the same table; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdjacencyMethod {
    /// Scan every other triangle for each edge. O(N²) in triangle count.
    #[default]
    BruteForce,
    /// Bucket triangles by exact vertex position first. Near-linear.
    Hashed,
}

/// Parameters controlling shadow volume construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowVolumeConfig {
    /// Capping technique.
    pub method: CapMethod,
    /// Distance far points are pushed away from the light. Must be finite;
    /// pick it well beyond the scene extents.
    pub infinity: f32,
    /// If `true`, an edge is emitted only when its neighbour is missing or
    /// back-facing. If `false`, every edge of every front-facing triangle is
    /// emitted: a superset that still stencils correctly.
    pub use_adjacency: bool,
    /// Algorithm used to build the adjacency table.
    pub adjacency_method: AdjacencyMethod,
    /// Vertex order that defines the outward side of a triangle.
    pub winding: Winding,
    /// A light affects the node when its distance to the node's world
    /// position is at most `radius * influence_scale`.
    pub influence_scale: f32,
}

impl Default for ShadowVolumeConfig {
    fn default() -> Self {
        Self {
            method: CapMethod::ZFail,
            infinity: 10_000.0,
            use_adjacency: true,
            adjacency_method: AdjacencyMethod::BruteForce,
            winding: Winding::Standard,
            influence_scale: 2.0,
        }
    }
}

impl ShadowVolumeConfig {
    #[must_use]
    pub fn with_method(mut self, method: CapMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_infinity(mut self, infinity: f32) -> Self {
        self.infinity = infinity;
        self
    }

    #[must_use]
    pub fn with_adjacency(mut self, use_adjacency: bool) -> Self {
        self.use_adjacency = use_adjacency;
        self
    }

    #[must_use]
    pub fn with_adjacency_method(mut self, method: AdjacencyMethod) -> Self {
        self.adjacency_method = method;
        self
    }

    #[must_use]
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    #[must_use]
    pub fn with_influence_scale(mut self, scale: f32) -> Self {
        self.influence_scale = scale;
        self
    }

    /// Returns `true` if volumes are capped.
    #[must_use]
    pub fn is_zfail(&self) -> bool {
        self.method == CapMethod::ZFail
    }

    /// Checks the numeric parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInfinity`] unless `infinity` is finite and
    /// positive, and [`ConfigError::InvalidInfluenceScale`] unless
    /// `influence_scale` is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.infinity.is_finite() || self.infinity <= 0.0 {
            return Err(ConfigError::InvalidInfinity(self.infinity));
        }
        if !self.influence_scale.is_finite() || self.influence_scale < 0.0 {
            return Err(ConfigError::InvalidInfluenceScale(self.influence_scale));
        }
        Ok(())
    }
}

use thiserror::Error;

/// Top-level error type for the Umbra shadow volume kernel.
#[derive(Debug, Error)]
pub enum UmbraError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while assembling shadow caster meshes.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("{0} vertices exceed the 16-bit index range")]
    TooManyVertices(usize),

    #[error("frame {frame} does not match the shared topology: {reason}")]
    FrameTopologyMismatch { frame: usize, reason: String },

    #[error("animated mesh has no frames")]
    NoFrames,
}

/// Errors raised by invalid shadow volume configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("extrusion distance must be finite and positive, got {0}")]
    InvalidInfinity(f32),

    #[error("light influence scale must be finite and non-negative, got {0}")]
    InvalidInfluenceScale(f32),
}

/// Convenience type alias for results using [`UmbraError`].
pub type Result<T> = std::result::Result<T, UmbraError>;

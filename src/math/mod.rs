pub mod aabb;
pub mod triangle;

pub use aabb::Aabb;
pub use triangle::{Triangle3, Winding};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f32>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f32>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f32>;

/// Global geometric tolerance for single-precision comparisons.
pub const TOLERANCE: f32 = 1e-6;

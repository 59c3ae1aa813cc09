use crate::math::{Matrix4, Point3};

/// Placement of the node that owns a shadow volume.
pub trait Spatial {
    /// Object-to-world transform of the owning node.
    fn world_transform(&self) -> Matrix4;

    /// World-space position of the owning node.
    ///
    /// Defaults to the translation part of [`Spatial::world_transform`].
    fn world_position(&self) -> Point3 {
        let m = self.world_transform();
        Point3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
    }
}

impl Spatial for Matrix4 {
    fn world_transform(&self) -> Matrix4 {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    #[test]
    fn world_position_is_the_translation() {
        let m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::new_scaling(4.0);
        assert_eq!(m.world_position(), Point3::new(1.0, 2.0, 3.0));
    }
}

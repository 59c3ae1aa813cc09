use super::{Point3, Vector3, TOLERANCE};

/// Vertex order that defines a triangle's outward side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    /// The outward normal is `(v1 - v0) × (v2 - v0)`: counter-clockwise
    /// when seen from outside.
    #[default]
    Standard,
    /// The triangle is read as `(v2, v1, v0)`, flipping the outward normal.
    Reverse,
}

/// A triangle in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3 {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

impl Triangle3 {
    /// Creates a triangle from three corners.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// Unnormalized outward normal under the given winding.
    ///
    /// Returns `None` for degenerate (zero-area or non-finite) triangles. The
    /// degeneracy test is relative to the edge lengths, so it does not depend
    /// on the scale of the mesh.
    #[must_use]
    pub fn normal(&self, winding: Winding) -> Option<Vector3> {
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;
        let n = e1.cross(&e2);

        let len = n.norm();
        if !len.is_finite() || len <= TOLERANCE * e1.norm() * e2.norm() {
            return None;
        }

        Some(match winding {
            Winding::Standard => n,
            Winding::Reverse => -n,
        })
    }

    /// Returns `true` if `light` lies strictly on the outward side of the
    /// triangle's plane. Degenerate triangles never face a light.
    #[must_use]
    pub fn is_front_facing(&self, light: &Point3, winding: Winding) -> bool {
        self.normal(winding)
            .is_some_and(|n| n.dot(&(light - self.a)) > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(x, y, z)
    }

    fn xy_triangle() -> Triangle3 {
        Triangle3::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0))
    }

    #[test]
    fn standard_winding_faces_positive_z() {
        let t = xy_triangle();
        assert!(t.is_front_facing(&p(0.2, 0.2, 5.0), Winding::Standard));
        assert!(!t.is_front_facing(&p(0.2, 0.2, -5.0), Winding::Standard));
    }

    #[test]
    fn reverse_winding_flips_the_side() {
        let t = xy_triangle();
        assert!(!t.is_front_facing(&p(0.2, 0.2, 5.0), Winding::Reverse));
        assert!(t.is_front_facing(&p(0.2, 0.2, -5.0), Winding::Reverse));
    }

    #[test]
    fn light_in_plane_is_not_front_facing() {
        let t = xy_triangle();
        assert!(!t.is_front_facing(&p(3.0, 3.0, 0.0), Winding::Standard));
        assert!(!t.is_front_facing(&p(3.0, 3.0, 0.0), Winding::Reverse));
    }

    #[test]
    fn degenerate_triangles_are_back_facing() {
        let collinear = Triangle3::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let collapsed = Triangle3::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0));
        for t in [collinear, collapsed] {
            assert!(t.normal(Winding::Standard).is_none());
            assert!(!t.is_front_facing(&p(0.0, 5.0, 5.0), Winding::Standard));
            assert!(!t.is_front_facing(&p(0.0, 5.0, 5.0), Winding::Reverse));
        }
    }

    #[test]
    fn nan_vertex_is_back_facing() {
        let t = Triangle3::new(p(f32::NAN, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        assert!(!t.is_front_facing(&p(0.0, 0.0, 1.0), Winding::Standard));
    }

    #[test]
    fn tiny_triangles_are_not_degenerate() {
        let s = 1e-3;
        let t = Triangle3::new(p(0.0, 0.0, 0.0), p(s, 0.0, 0.0), p(0.0, s, 0.0));
        assert!(t.is_front_facing(&p(0.0, 0.0, 1.0), Winding::Standard));
    }
}

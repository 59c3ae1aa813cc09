use crate::math::{Point3, Winding};
use crate::mesh::MeshSnapshot;

/// Marks every triangle of a snapshot as facing a light or not.
pub struct ClassifyFaces<'a> {
    snapshot: &'a MeshSnapshot,
    light: Point3,
    winding: Winding,
}

impl<'a> ClassifyFaces<'a> {
    /// Creates a new `ClassifyFaces` operation for a light in object space.
    #[must_use]
    pub fn new(snapshot: &'a MeshSnapshot, light: Point3, winding: Winding) -> Self {
        Self {
            snapshot,
            light,
            winding,
        }
    }

    /// Writes one flag per triangle into `facing`, replacing its contents.
    /// Returns the number of front-facing triangles.
    pub fn execute(&self, facing: &mut Vec<bool>) -> usize {
        // One flag per triangle, in index order
        facing.clear();
        facing.extend((0..self.snapshot.triangle_count()).map(|t| {
            self.snapshot
                .triangle_points(t)
                .is_front_facing(&self.light, self.winding)
        }));
        facing.iter().filter(|&&f| f).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{p, single_triangle, snapshot, split_cube, tetrahedron};

    #[test]
    fn light_above_triangle() {
        let snap = snapshot(&single_triangle());
        let mut facing = Vec::new();

        let front = ClassifyFaces::new(&snap, p(0.2, 0.2, 1.0), Winding::Standard).execute(&mut facing);
        assert_eq!(front, 1);
        assert_eq!(facing, vec![true]);

        let front = ClassifyFaces::new(&snap, p(0.2, 0.2, 1.0), Winding::Reverse).execute(&mut facing);
        assert_eq!(front, 0);
        assert_eq!(facing, vec![false]);
    }

    #[test]
    fn tetrahedron_seen_from_outside() {
        let snap = snapshot(&tetrahedron());
        let mut facing = Vec::new();
        ClassifyFaces::new(&snap, p(-1.0, -1.0, 0.3), Winding::Standard).execute(&mut facing);
        // -y and -x faces see the light.
        assert_eq!(facing, vec![false, true, true, false]);
    }

    #[test]
    fn light_inside_closed_mesh() {
        let snap = snapshot(&tetrahedron());
        let mut facing = Vec::new();
        let inside = p(0.1, 0.1, 0.1);

        assert_eq!(ClassifyFaces::new(&snap, inside, Winding::Standard).execute(&mut facing), 0);
        assert_eq!(ClassifyFaces::new(&snap, inside, Winding::Reverse).execute(&mut facing), 4);
    }

    #[test]
    fn reuses_scratch_storage() {
        let cube = snapshot(&split_cube());
        let tri = snapshot(&single_triangle());
        let mut facing = Vec::new();

        ClassifyFaces::new(&cube, p(0.5, 0.5, 5.0), Winding::Standard).execute(&mut facing);
        assert_eq!(facing.len(), 12);
        assert_eq!(facing.iter().filter(|&&f| f).count(), 2);

        ClassifyFaces::new(&tri, p(0.2, 0.2, 1.0), Winding::Standard).execute(&mut facing);
        assert_eq!(facing.len(), 1);
    }
}

use tracing::trace;

use crate::math::{Point3, TOLERANCE};
use crate::mesh::MeshSnapshot;
use crate::volume::ShadowVolume;

/// Pushes `point` away from `light` by `infinity`.
///
/// Returns `None` when the direction is undefined (the point coincides with
/// the light) or the result is not finite.
#[must_use]
pub fn extrude_point(point: &Point3, light: &Point3, infinity: f32) -> Option<Point3> {
    let dir = (point - light).try_normalize(TOLERANCE)?;
    let far = point + dir * infinity;
    far.coords.iter().all(|c| c.is_finite()).then_some(far)
}

/// Extrudes silhouette edges into the side walls of a shadow volume.
///
/// Each edge `(v1, v2)` with far points `v3`, `v4` becomes the triangles
/// `(v1, v2, v3)` and `(v2, v4, v3)`. The wall faces outward when the edge
/// runs clockwise around its lit triangle as seen from the light, which is
/// how [`ExtractSilhouette`](super::ExtractSilhouette) reports edges.
pub struct ExtrudeEdges<'a> {
    snapshot: &'a MeshSnapshot,
    edges: &'a [[u32; 2]],
    light: Point3,
    infinity: f32,
}

impl<'a> ExtrudeEdges<'a> {
    /// Creates a new `ExtrudeEdges` operation for a light in object space.
    #[must_use]
    pub fn new(
        snapshot: &'a MeshSnapshot,
        edges: &'a [[u32; 2]],
        light: Point3,
        infinity: f32,
    ) -> Self {
        Self {
            snapshot,
            edges,
            light,
            infinity,
        }
    }

    /// Appends the quads to `volume` and returns how many were emitted.
    /// Edges with an endpoint on the light are skipped.
    pub fn execute(&self, volume: &mut ShadowVolume) -> usize {
        let mut emitted = 0;
        for &[a, b] in self.edges {
            let v1 = self.snapshot.position(a);
            let v2 = self.snapshot.position(b);

            // Far ends of the wall, along the light rays through v1 and v2
            let (Some(v3), Some(v4)) = (
                extrude_point(&v1, &self.light, self.infinity),
                extrude_point(&v2, &self.light, self.infinity),
            ) else {
                trace!(a, b, "skipping silhouette edge touching the light");
                continue;
            };

            // Quad split along the v2-v3 diagonal
            volume.push_triangle(v1, v2, v3);
            volume.push_triangle(v2, v4, v3);
            emitted += 1;
        }
        emitted
    }
}

use tracing::trace;

use crate::math::{Point3, Winding};
use crate::mesh::MeshSnapshot;
use crate::volume::{CapMethod, ShadowVolume};

use super::adjacency::Adjacency;
use super::extrude::extrude_point;

/// Emits the caps of a shadow volume and collects its silhouette edges.
///
/// Works on the facing flags produced by
/// [`ClassifyFaces`](super::ClassifyFaces) for the same light.
///
/// Every face of the finished volume points out of it. Triangles are read in
/// the configured [`Winding`], so `(v0, v1, v2)` below is counter-clockwise
/// seen from outside the caster.
///
/// With [`CapMethod::ZFail`], every front-facing triangle adds a front cap
/// `(v0, v1, v2)` and a back cap of its corners pushed to infinity in
/// reversed order. [`CapMethod::ZPass`] adds no caps.
///
/// An edge of a front-facing triangle is a silhouette edge when it has no
/// neighbour or its neighbour is not front-facing. Edges are reported end
/// first, `(v1, v0)`, so [`ExtrudeEdges`](super::ExtrudeEdges) walls face
/// outward. Without adjacency every edge of every front-facing triangle is
/// reported, a superset that still stencils correctly.
pub struct ExtractSilhouette<'a> {
    snapshot: &'a MeshSnapshot,
    adjacency: &'a Adjacency,
    facing: &'a [bool],
    light: Point3,
    method: CapMethod,
    winding: Winding,
    use_adjacency: bool,
    infinity: f32,
}

impl<'a> ExtractSilhouette<'a> {
    /// Creates a new `ExtractSilhouette` operation for a light in object space.
    #[must_use]
    pub fn new(
        snapshot: &'a MeshSnapshot,
        adjacency: &'a Adjacency,
        facing: &'a [bool],
        light: Point3,
    ) -> Self {
        Self {
            snapshot,
            adjacency,
            facing,
            light,
            method: CapMethod::ZFail,
            winding: Winding::Standard,
            use_adjacency: true,
            infinity: 10_000.0,
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: CapMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the winding the facing flags were computed with.
    #[must_use]
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    #[must_use]
    pub fn with_adjacency(mut self, use_adjacency: bool) -> Self {
        self.use_adjacency = use_adjacency;
        self
    }

    #[must_use]
    pub fn with_infinity(mut self, infinity: f32) -> Self {
        self.infinity = infinity;
        self
    }

    /// Appends caps to `volume` and replaces the contents of `edges` with the
    /// silhouette edges, in triangle order. Returns the edge count.
    pub fn execute(&self, volume: &mut ShadowVolume, edges: &mut Vec<[u32; 2]>) -> usize {
        let count = self.snapshot.triangle_count().min(self.facing.len());

        // Caps first, so zfail volumes start with their front faces
        if self.method == CapMethod::ZFail {
            for t in (0..count).filter(|&t| self.facing[t]) {
                self.push_caps(t, volume);
            }
        }

        // A table built for other counts is ignored; every edge then counts.
        let adjacency_valid =
            self.use_adjacency && self.adjacency.triangle_count() == self.snapshot.triangle_count();

        // Walk every edge of every lit triangle; adjacency indices follow
        // the stored corner order, whatever the winding
        edges.clear();
        for t in (0..count).filter(|&t| self.facing[t]) {
            let corners = self.snapshot.triangle(t);
            for e in 0..3 {
                if adjacency_valid && !self.borders_shadow(t, e) {
                    continue;
                }
                let (a, b) = (corners[e], corners[(e + 1) % 3]);
                edges.push(match self.winding {
                    Winding::Standard => [b, a],
                    Winding::Reverse => [a, b],
                });
            }
        }

        edges.len()
    }

    /// `true` if edge `e` of front-facing triangle `t` has no front-facing
    /// neighbour.
    fn borders_shadow(&self, t: usize, e: usize) -> bool {
        let n = self.adjacency.neighbor(t, e) as usize;
        n == t || !self.facing.get(n).copied().unwrap_or(false)
    }

    fn push_caps(&self, t: usize, volume: &mut ShadowVolume) {
        let tri = self.snapshot.triangle_points(t);
        // Corners counter-clockwise seen from the light
        let (a, b, c) = match self.winding {
            Winding::Standard => (tri.a, tri.b, tri.c),
            Winding::Reverse => (tri.c, tri.b, tri.a),
        };
        let far = |p: &Point3| extrude_point(p, &self.light, self.infinity);

        let (Some(fa), Some(fb), Some(fc)) = (far(&a), far(&b), far(&c)) else {
            trace!(triangle = t, "skipping caps of triangle touching the light");
            return;
        };

        // Front cap faces the light, back cap faces away from it
        volume.push_triangle(a, b, c);
        volume.push_triangle(fc, fb, fa);
    }
}

use tracing::warn;

use crate::math::{Point3, Triangle3};

use super::{validate_triangle_list, ShadowMesh};

/// Whether a capture changed the vertex or index count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyChange {
    /// Same counts as the previous capture; adjacency is still valid.
    Unchanged,
    /// Counts differ; adjacency must be rebuilt.
    Changed,
}

/// A mesh flattened into one position array and one index array.
///
/// Indices of sub-buffer `k` are offset by the vertex count of buffers
/// `0..k`, so they address the unified position array. Storage is reused
/// across captures.
#[derive(Debug, Clone, Default)]
pub struct MeshSnapshot {
    positions: Vec<Point3>,
    indices: Vec<u32>,
}

impl MeshSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-flattens `mesh` into this snapshot, in time linear in its size.
    ///
    /// Buffers with a malformed triangle list are skipped with a warning.
    pub fn capture(&mut self, mesh: &dyn ShadowMesh) -> TopologyChange {
        let old_vertices = self.positions.len();
        let old_indices = self.indices.len();

        self.positions.clear();
        self.indices.clear();

        let buffer_count = mesh.buffer_count();
        let (total_vertices, total_indices) = (0..buffer_count).fold((0, 0), |(v, i), k| {
            (
                v + mesh.buffer_positions(k).len(),
                i + mesh.buffer_indices(k).len(),
            )
        });
        self.positions.reserve(total_vertices);
        self.indices.reserve(total_indices);

        for k in 0..buffer_count {
            let positions = mesh.buffer_positions(k);
            let indices = mesh.buffer_indices(k);

            if let Err(err) = validate_triangle_list(positions, indices) {
                warn!(buffer = k, %err, "skipping malformed mesh buffer");
                continue;
            }

            let Ok(base) = u32::try_from(self.positions.len()) else {
                warn!(buffer = k, "vertex count exceeds u32 range, dropping remaining buffers");
                break;
            };
            self.indices
                .extend(indices.iter().map(|&i| base + u32::from(i)));
            self.positions.extend_from_slice(positions);
        }

        if old_vertices == self.positions.len() && old_indices == self.indices.len() {
            TopologyChange::Unchanged
        } else {
            TopologyChange::Changed
        }
    }

    /// Empties the snapshot, keeping its storage.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.indices.clear();
    }

    /// Unified vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Unified triangle list.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of triangle `tri`.
    ///
    /// # Panics
    ///
    /// Panics if `tri >= self.triangle_count()`.
    #[must_use]
    pub fn triangle(&self, tri: usize) -> [u32; 3] {
        let i = &self.indices[3 * tri..3 * tri + 3];
        [i[0], i[1], i[2]]
    }

    /// Corner positions of triangle `tri`.
    ///
    /// # Panics
    ///
    /// Panics if `tri >= self.triangle_count()`.
    #[must_use]
    pub fn triangle_points(&self, tri: usize) -> Triangle3 {
        let [a, b, c] = self.triangle(tri);
        Triangle3::new(self.position(a), self.position(b), self.position(c))
    }

    /// Position of unified vertex `index`.
    #[must_use]
    pub fn position(&self, index: u32) -> Point3 {
        self.positions[index as usize]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Aabb;
    use crate::mesh::{Mesh, MeshBuffer};

    fn p(x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(x, y, z)
    }

    fn two_buffer_mesh() -> Mesh {
        let a = MeshBuffer::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        let b = MeshBuffer::new(
            vec![
                p(0.0, 0.0, 1.0),
                p(1.0, 0.0, 1.0),
                p(1.0, 1.0, 1.0),
                p(0.0, 1.0, 1.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap();
        Mesh::new(vec![a, b])
    }

    /// Hand-rolled provider that can expose malformed buffers.
    struct RawMesh {
        buffers: Vec<(Vec<Point3>, Vec<u16>)>,
    }

    impl ShadowMesh for RawMesh {
        fn buffer_count(&self) -> usize {
            self.buffers.len()
        }
        fn buffer_indices(&self, buffer: usize) -> &[u16] {
            &self.buffers[buffer].1
        }
        fn buffer_positions(&self, buffer: usize) -> &[Point3] {
            &self.buffers[buffer].0
        }
        fn bounding_box(&self) -> Aabb {
            Aabb::EMPTY
        }
    }

    // ── Flattening ─────────────────────────────────────────────

    #[test]
    fn offsets_indices_by_preceding_vertex_counts() {
        let mut snap = MeshSnapshot::new();
        snap.capture(&two_buffer_mesh());

        assert_eq!(snap.vertex_count(), 7);
        assert_eq!(snap.index_count(), 9);
        assert_eq!(snap.triangle_count(), 3);
        assert_eq!(snap.indices(), &[0, 1, 2, 3, 4, 5, 3, 5, 6]);
        assert_eq!(snap.triangle(2), [3, 5, 6]);
        assert_eq!(snap.triangle_points(1).c, p(1.0, 1.0, 1.0));
    }

    #[test]
    fn empty_mesh_yields_empty_snapshot() {
        let mut snap = MeshSnapshot::new();
        assert_eq!(snap.capture(&Mesh::default()), TopologyChange::Unchanged);
        assert_eq!(snap.triangle_count(), 0);
    }

    // ── Topology staleness ─────────────────────────────────────

    #[test]
    fn reports_change_only_when_counts_differ() {
        let mut snap = MeshSnapshot::new();
        let mesh = two_buffer_mesh();
        assert_eq!(snap.capture(&mesh), TopologyChange::Changed);
        assert_eq!(snap.capture(&mesh), TopologyChange::Unchanged);

        let smaller = Mesh::new(vec![mesh.buffers()[0].clone()]);
        assert_eq!(snap.capture(&smaller), TopologyChange::Changed);
    }

    #[test]
    fn moved_positions_do_not_count_as_topology_change() {
        let mut snap = MeshSnapshot::new();
        let a = Mesh::from_triangles(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        let b = Mesh::from_triangles(
            vec![p(0.0, 0.0, 3.0), p(1.0, 0.0, 3.0), p(0.0, 1.0, 3.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        snap.capture(&a);
        assert_eq!(snap.capture(&b), TopologyChange::Unchanged);
        assert_eq!(snap.position(0), p(0.0, 0.0, 3.0));
    }

    // ── Malformed input ────────────────────────────────────────

    #[test]
    fn skips_malformed_buffers() {
        let tri = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        let raw = RawMesh {
            buffers: vec![
                (tri.clone(), vec![0, 1, 9]),
                (tri.clone(), vec![0, 1]),
                (tri, vec![2, 1, 0]),
            ],
        };
        let mut snap = MeshSnapshot::new();
        snap.capture(&raw);
        assert_eq!(snap.vertex_count(), 3);
        assert_eq!(snap.indices(), &[2, 1, 0]);
    }
}

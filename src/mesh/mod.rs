mod animated;
mod snapshot;

pub use animated::AnimatedMesh;
pub use snapshot::{MeshSnapshot, TopologyChange};

use crate::error::{MeshError, Result};
use crate::math::{Aabb, Point3};

/// A shadow caster mesh as seen by the shadow volume pipeline.
///
/// A mesh is made of one or more sub-buffers, each with its own vertex
/// positions and 16-bit triangle list. Implementors may be shared between
/// several shadow volume nodes; the pipeline only ever reads from them.
pub trait ShadowMesh: Send + Sync {
    /// Number of sub-buffers.
    fn buffer_count(&self) -> usize;

    /// Triangle list of sub-buffer `buffer`, indexing into its own positions.
    ///
    /// Out-of-range buffers yield an empty slice.
    fn buffer_indices(&self, buffer: usize) -> &[u16];

    /// Vertex positions of sub-buffer `buffer`.
    ///
    /// Out-of-range buffers yield an empty slice.
    fn buffer_positions(&self, buffer: usize) -> &[Point3];

    /// Axis-aligned bounds of the whole mesh in object space.
    fn bounding_box(&self) -> Aabb;
}

/// One sub-buffer of a [`Mesh`]: positions plus a triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffer {
    positions: Vec<Point3>,
    indices: Vec<u16>,
}

impl MeshBuffer {
    /// Creates a buffer, validating its triangle list.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TooManyVertices`] if the positions cannot be
    /// addressed by 16-bit indices, [`MeshError::IndexCountNotTriangles`] if
    /// the index count is not a multiple of 3, and
    /// [`MeshError::IndexOutOfRange`] for an index past the last vertex.
    pub fn new(positions: Vec<Point3>, indices: Vec<u16>) -> Result<Self> {
        validate_triangle_list(&positions, &indices)?;
        Ok(Self { positions, indices })
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Triangle indices (each triple defines a triangle).
    #[must_use]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of triangles in this buffer.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Checks that `indices` is a well-formed triangle list over `positions`.
pub(crate) fn validate_triangle_list(positions: &[Point3], indices: &[u16]) -> Result<()> {
    if positions.len() > usize::from(u16::MAX) + 1 {
        return Err(MeshError::TooManyVertices(positions.len()).into());
    }
    if indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangles(indices.len()).into());
    }
    if let Some(&bad) = indices.iter().find(|&&i| usize::from(i) >= positions.len()) {
        return Err(MeshError::IndexOutOfRange {
            index: u32::from(bad),
            vertex_count: positions.len(),
        }
        .into());
    }
    Ok(())
}

/// A static multi-buffer mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    buffers: Vec<MeshBuffer>,
    bounding_box: Aabb,
}

impl Mesh {
    /// Creates a mesh from already validated buffers.
    #[must_use]
    pub fn new(buffers: Vec<MeshBuffer>) -> Self {
        let bounding_box = buffers
            .iter()
            .map(|b| Aabb::from_points(&b.positions))
            .fold(Aabb::EMPTY, |acc, b| acc.union(&b));
        Self {
            buffers,
            bounding_box,
        }
    }

    /// Creates a single-buffer mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle list is malformed (see [`MeshBuffer::new`]).
    pub fn from_triangles(positions: Vec<Point3>, indices: Vec<u16>) -> Result<Self> {
        Ok(Self::new(vec![MeshBuffer::new(positions, indices)?]))
    }

    /// Appends a buffer and grows the bounding box.
    pub fn push_buffer(&mut self, buffer: MeshBuffer) {
        self.bounding_box = self
            .bounding_box
            .union(&Aabb::from_points(&buffer.positions));
        self.buffers.push(buffer);
    }

    /// The sub-buffers of this mesh.
    #[must_use]
    pub fn buffers(&self) -> &[MeshBuffer] {
        &self.buffers
    }
}

impl ShadowMesh for Mesh {
    fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    fn buffer_indices(&self, buffer: usize) -> &[u16] {
        self.buffers
            .get(buffer)
            .map(|b| b.indices.as_slice())
            .unwrap_or_default()
    }

    fn buffer_positions(&self, buffer: usize) -> &[Point3] {
        self.buffers
            .get(buffer)
            .map(|b| b.positions.as_slice())
            .unwrap_or_default()
    }

    fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::UmbraError;

    fn p(x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn rejects_partial_triangles() {
        let err = MeshBuffer::new(vec![p(0.0, 0.0, 0.0); 3], vec![0, 1]).unwrap_err();
        assert!(matches!(
            err,
            UmbraError::Mesh(MeshError::IndexCountNotTriangles(2))
        ));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let err = MeshBuffer::new(vec![p(0.0, 0.0, 0.0); 3], vec![0, 1, 3]).unwrap_err();
        assert!(matches!(
            err,
            UmbraError::Mesh(MeshError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        ));
    }

    #[test]
    fn bounding_box_spans_all_buffers() {
        let a = MeshBuffer::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        let b = MeshBuffer::new(
            vec![p(0.0, 0.0, 5.0), p(-2.0, 0.0, 5.0), p(0.0, 1.0, 5.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        let mut mesh = Mesh::new(vec![a]);
        assert_eq!(mesh.bounding_box().max, p(1.0, 1.0, 0.0));

        mesh.push_buffer(b);
        assert_eq!(mesh.buffer_count(), 2);
        assert_eq!(mesh.bounding_box().min, p(-2.0, 0.0, 0.0));
        assert_eq!(mesh.bounding_box().max, p(1.0, 1.0, 5.0));
    }

    #[test]
    fn missing_buffers_read_as_empty() {
        let mesh = Mesh::default();
        assert!(mesh.buffer_indices(3).is_empty());
        assert!(mesh.buffer_positions(3).is_empty());
        assert!(mesh.bounding_box().is_empty());
    }
}

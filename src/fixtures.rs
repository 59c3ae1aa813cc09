//! Shared test meshes. All are wound counter-clockwise seen from outside.

use crate::math::Point3;
use crate::mesh::{Mesh, MeshBuffer, MeshSnapshot};

pub(crate) fn p(x: f32, y: f32, z: f32) -> Point3 {
    Point3::new(x, y, z)
}

/// One triangle in the `z = 0` plane, facing `+z`.
pub(crate) fn single_triangle() -> Mesh {
    Mesh::from_triangles(
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
        vec![0, 1, 2],
    )
    .unwrap()
}

/// Corner tetrahedron with vertices at the origin and the three unit axes.
///
/// Faces, in order: bottom (`-z`), `-y`, `-x`, slanted (`+x+y+z`).
pub(crate) fn tetrahedron() -> Mesh {
    Mesh::from_triangles(
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
        ],
        vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
    )
    .unwrap()
}

/// Two triangles forming the unit square in the `z = 0` plane, sharing the
/// diagonal `(0,0)-(1,1)`.
pub(crate) fn quad() -> Mesh {
    Mesh::from_triangles(
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
    .unwrap()
}

/// Unit cube `[0, 1]³` with 4 private vertices per face (split at seams).
///
/// Triangles `2f` and `2f + 1` belong to face `f`, in the order
/// `-z`, `+z`, `-y`, `+y`, `-x`, `+x`.
pub(crate) fn split_cube() -> Mesh {
    let faces = [
        [p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 0.0, 0.0)],
        [p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(1.0, 1.0, 1.0), p(0.0, 1.0, 1.0)],
        [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 1.0), p(0.0, 0.0, 1.0)],
        [p(0.0, 1.0, 0.0), p(0.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, 0.0)],
        [p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 1.0, 1.0), p(0.0, 1.0, 0.0)],
        [p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 1.0, 1.0), p(1.0, 0.0, 1.0)],
    ];

    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (f, corners) in (0u16..).zip(faces) {
        let base = f * 4;
        positions.extend(corners);
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    Mesh::from_triangles(positions, indices).unwrap()
}

/// `mesh` with every triangle read backwards, for clockwise-outward tests.
pub(crate) fn flipped(mesh: &Mesh) -> Mesh {
    let buffers = mesh
        .buffers()
        .iter()
        .map(|b| {
            let indices = b.indices().chunks_exact(3).flat_map(|t| [t[2], t[1], t[0]]).collect();
            MeshBuffer::new(b.positions().to_vec(), indices).unwrap()
        })
        .collect();
    Mesh::new(buffers)
}

/// Captures `mesh` into a fresh snapshot.
pub(crate) fn snapshot(mesh: &Mesh) -> MeshSnapshot {
    let mut snap = MeshSnapshot::new();
    snap.capture(mesh);
    snap
}

use std::collections::HashMap;

use crate::math::Point3;
use crate::volume::AdjacencyMethod;

/// Per-edge triangle neighbours of a mesh.
///
/// Entry `3 * t + e` is the triangle sharing edge `e` of triangle `t`, where
/// edge `e` runs from corner `e` to corner `(e + 1) % 3`. A boundary edge
/// stores `t` itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<u32>,
}

impl Adjacency {
    /// Neighbour of triangle `tri` across edge `edge`.
    ///
    /// # Panics
    ///
    /// Panics if `tri` or `edge` is out of range.
    #[must_use]
    pub fn neighbor(&self, tri: usize, edge: usize) -> u32 {
        assert!(edge < 3, "edge index {edge} out of range");
        self.neighbors[3 * tri + edge]
    }

    /// Returns `true` if edge `edge` of triangle `tri` has no neighbour.
    #[must_use]
    pub fn is_boundary(&self, tri: usize, edge: usize) -> bool {
        self.neighbor(tri, edge) as usize == tri
    }

    /// Number of triangles covered by the table.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.neighbors.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Raw table, three entries per triangle.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.neighbors
    }
}

/// Builds the [`Adjacency`] table of a flattened triangle list.
///
/// Two triangles are neighbours across an edge when the other triangle has
/// corners at both edge endpoint positions. Positions are compared exactly,
/// so meshes split at seams (duplicated vertices) still connect. When several
/// triangles qualify, the one with the lowest index wins.
///
/// The brute-force method is quadratic in the triangle count. It is meant for
/// single shadow caster meshes, not whole scenes; use
/// [`AdjacencyMethod::Hashed`] for large casters.
pub struct BuildAdjacency<'a> {
    positions: &'a [Point3],
    indices: &'a [u32],
    method: AdjacencyMethod,
}

impl<'a> BuildAdjacency<'a> {
    /// Creates a new `BuildAdjacency` operation using the brute-force method.
    #[must_use]
    pub fn new(positions: &'a [Point3], indices: &'a [u32]) -> Self {
        Self {
            positions,
            indices,
            method: AdjacencyMethod::BruteForce,
        }
    }

    /// Selects the algorithm.
    #[must_use]
    pub fn with_method(mut self, method: AdjacencyMethod) -> Self {
        self.method = method;
        self
    }

    /// Executes the build. Trailing indices that do not form a whole
    /// triangle are ignored.
    #[must_use]
    pub fn execute(&self) -> Adjacency {
        let neighbors = match self.method {
            AdjacencyMethod::BruteForce => self.brute_force(),
            AdjacencyMethod::Hashed => self.hashed(),
        };
        Adjacency { neighbors }
    }

    fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn corner(&self, tri: usize, corner: usize) -> Point3 {
        self.positions[self.indices[3 * tri + corner] as usize]
    }

    fn brute_force(&self) -> Vec<u32> {
        let count = self.triangle_count();
        let mut neighbors = Vec::with_capacity(3 * count);

        for f in 0..count {
            for edge in 0..3 {
                let v1 = self.corner(f, edge);
                let v2 = self.corner(f, (edge + 1) % 3);

                // First other triangle with a corner on each endpoint
                let found = (0..count).filter(|&of| of != f).find(|&of| {
                    let touches = |v: &Point3| (0..3).any(|c| self.corner(of, c) == *v);
                    touches(&v1) && touches(&v2)
                });
                // No match marks a boundary edge
                neighbors.push(tri_id(found.unwrap_or(f)));
            }
        }

        neighbors
    }

    fn hashed(&self) -> Vec<u32> {
        let count = self.triangle_count();

        // Ascending, duplicate-free triangle lists per exact position.
        let mut touching: HashMap<PositionKey, Vec<u32>> = HashMap::with_capacity(count * 3);
        for t in 0..count {
            let id = tri_id(t);
            for c in 0..3 {
                let Some(key) = PositionKey::new(&self.corner(t, c)) else {
                    continue;
                };
                let list = touching.entry(key).or_default();
                if list.last() != Some(&id) {
                    list.push(id);
                }
            }
        }

        // Intersect the endpoint lists; both are sorted, so the first common
        // entry is the lowest-index neighbour
        let mut neighbors = Vec::with_capacity(3 * count);
        for f in 0..count {
            let id = tri_id(f);
            for edge in 0..3 {
                let a = PositionKey::new(&self.corner(f, edge)).and_then(|k| touching.get(&k));
                let b = PositionKey::new(&self.corner(f, (edge + 1) % 3))
                    .and_then(|k| touching.get(&k));

                let found = match (a, b) {
                    (Some(a), Some(b)) => first_common_except(a, b, id),
                    _ => None,
                };
                neighbors.push(found.unwrap_or(id));
            }
        }

        neighbors
    }
}

/// Smallest value present in both ascending lists, other than `skip`.
fn first_common_except(a: &[u32], b: &[u32], skip: u32) -> Option<u32> {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                if a[i] != skip {
                    return Some(a[i]);
                }
                i += 1;
                j += 1;
            }
        }
    }
    None
}

// Triangle counts come from u32-indexed snapshots.
#[allow(clippy::cast_possible_truncation)]
fn tri_id(t: usize) -> u32 {
    t as u32
}

/// Hash key with the same equality as `f32 ==` on every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PositionKey([u32; 3]);

impl PositionKey {
    /// `None` for positions with a NaN component, which equal nothing.
    fn new(p: &Point3) -> Option<Self> {
        if p.coords.iter().any(|c| c.is_nan()) {
            return None;
        }
        // +0.0 and -0.0 compare equal.
        let bits = |c: f32| if c == 0.0 { 0 } else { c.to_bits() };
        Some(Self([bits(p.x), bits(p.y), bits(p.z)]))
    }
}

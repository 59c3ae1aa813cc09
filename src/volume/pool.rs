use crate::math::{Point3, Triangle3};

/// A shadow volume as an append-only triangle list: every 3 consecutive
/// points form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowVolume {
    points: Vec<Point3>,
    hint: usize,
}

impl ShadowVolume {
    /// Creates an empty volume with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            hint: capacity,
        }
    }

    /// Appends one triangle.
    pub fn push_triangle(&mut self, a: Point3, b: Point3, c: Point3) {
        self.points.extend([a, b, c]);
    }

    /// Empties the volume, keeping its storage.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Makes room for at least `additional` more points.
    pub fn reserve(&mut self, additional: usize) {
        self.points.reserve(additional);
    }

    /// The triangle list.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.points.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points the volume can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    /// Point count the volume was sized for when handed out.
    #[must_use]
    pub fn capacity_hint(&self) -> usize {
        self.hint
    }

    /// Returns `true` if more points were pushed than the volume was sized for.
    #[must_use]
    pub fn exceeds_hint(&self) -> bool {
        self.points.len() > self.hint
    }

    /// Iterates over the triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle3> + '_ {
        self.points
            .chunks_exact(3)
            .map(|t| Triangle3::new(t[0], t[1], t[2]))
    }
}

/// Reusable storage for the volumes of one frame, one per shadow-casting
/// light.
///
/// Slots are handed out in order and recycled across frames; their storage
/// only grows. Nothing is freed until the pool itself is dropped.
#[derive(Debug, Default)]
pub struct ShadowVolumePool {
    volumes: Vec<ShadowVolume>,
    used: usize,
}

impl ShadowVolumePool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every slot as free for a new frame.
    pub fn begin_frame(&mut self) {
        self.used = 0;
    }

    /// Hands out the next slot, cleared and with room for `capacity_hint`
    /// points. The hint is not a limit.
    pub fn acquire(&mut self, capacity_hint: usize) -> &mut ShadowVolume {
        if self.used == self.volumes.len() {
            self.volumes.push(ShadowVolume::default());
        }
        let volume = &mut self.volumes[self.used];
        self.used += 1;

        volume.clear();
        volume.reserve(capacity_hint);
        volume.hint = capacity_hint;
        volume
    }

    /// Volumes handed out since the last [`ShadowVolumePool::begin_frame`].
    #[must_use]
    pub fn volumes(&self) -> &[ShadowVolume] {
        &self.volumes[..self.used]
    }

    /// Number of volumes handed out this frame.
    #[must_use]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Number of slots allocated so far, used or not.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.volumes.len()
    }
}

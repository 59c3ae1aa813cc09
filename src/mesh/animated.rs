use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{MeshError, Result};
use crate::math::{Aabb, Point3};

use super::{Mesh, ShadowMesh};

/// A keyframed mesh whose frames share one topology.
///
/// Every frame has the same buffers, the same triangle lists and the same
/// vertex counts; only positions move. The active frame can be switched
/// through a shared reference, so one animated mesh can feed several shadow
/// volume nodes while its owner advances the animation.
#[derive(Debug)]
pub struct AnimatedMesh {
    frames: Vec<Mesh>,
    current: AtomicUsize,
}

impl AnimatedMesh {
    /// Creates an animated mesh from its keyframes. Frame 0 is active.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NoFrames`] for an empty frame list and
    /// [`MeshError::FrameTopologyMismatch`] if any frame differs from the
    /// first in buffer count, vertex count or triangle list.
    pub fn new(frames: Vec<Mesh>) -> Result<Self> {
        let Some(first) = frames.first() else {
            return Err(MeshError::NoFrames.into());
        };

        for (frame, mesh) in frames.iter().enumerate().skip(1) {
            if mesh.buffers().len() != first.buffers().len() {
                return Err(MeshError::FrameTopologyMismatch {
                    frame,
                    reason: format!(
                        "{} buffers, expected {}",
                        mesh.buffers().len(),
                        first.buffers().len()
                    ),
                }
                .into());
            }
            for (k, (buf, base)) in mesh.buffers().iter().zip(first.buffers()).enumerate() {
                if buf.positions().len() != base.positions().len() {
                    return Err(MeshError::FrameTopologyMismatch {
                        frame,
                        reason: format!(
                            "buffer {k} has {} vertices, expected {}",
                            buf.positions().len(),
                            base.positions().len()
                        ),
                    }
                    .into());
                }
                if buf.indices() != base.indices() {
                    return Err(MeshError::FrameTopologyMismatch {
                        frame,
                        reason: format!("buffer {k} triangle list differs"),
                    }
                    .into());
                }
            }
        }

        Ok(Self {
            frames,
            current: AtomicUsize::new(0),
        })
    }

    /// Number of keyframes.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Index of the active keyframe.
    #[must_use]
    pub fn frame(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    /// Selects the active keyframe, clamped to the last frame.
    pub fn set_frame(&self, frame: usize) {
        let frame = frame.min(self.frames.len() - 1);
        self.current.store(frame, Ordering::Relaxed);
    }

    fn active(&self) -> &Mesh {
        &self.frames[self.frame()]
    }
}

impl ShadowMesh for AnimatedMesh {
    fn buffer_count(&self) -> usize {
        self.active().buffer_count()
    }

    fn buffer_indices(&self, buffer: usize) -> &[u16] {
        self.active().buffer_indices(buffer)
    }

    fn buffer_positions(&self, buffer: usize) -> &[Point3] {
        self.active().buffer_positions(buffer)
    }

    fn bounding_box(&self) -> Aabb {
        self.active().bounding_box()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::UmbraError;

    fn tri(z: f32) -> Mesh {
        Mesh::from_triangles(
            vec![
                Point3::new(0.0, 0.0, z),
                Point3::new(1.0, 0.0, z),
                Point3::new(0.0, 1.0, z),
            ],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn switching_frames_moves_positions() {
        let anim = AnimatedMesh::new(vec![tri(0.0), tri(2.0)]).unwrap();
        assert_eq!(anim.frame_count(), 2);
        assert_eq!(anim.buffer_positions(0)[0].z, 0.0);

        anim.set_frame(1);
        assert_eq!(anim.buffer_positions(0)[0].z, 2.0);
        assert_eq!(anim.bounding_box().min.z, 2.0);
        assert_eq!(anim.buffer_indices(0), &[0, 1, 2]);
    }

    #[test]
    fn set_frame_clamps() {
        let anim = AnimatedMesh::new(vec![tri(0.0), tri(1.0)]).unwrap();
        anim.set_frame(7);
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn empty_frame_list_is_rejected() {
        let err = AnimatedMesh::new(Vec::new()).unwrap_err();
        assert!(matches!(err, UmbraError::Mesh(MeshError::NoFrames)));
    }

    #[test]
    fn differing_topology_is_rejected() {
        let other = Mesh::from_triangles(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 2, 1],
        )
        .unwrap();
        let err = AnimatedMesh::new(vec![tri(0.0), other]).unwrap_err();
        assert!(matches!(
            err,
            UmbraError::Mesh(MeshError::FrameTopologyMismatch { frame: 1, .. })
        ));
    }
}

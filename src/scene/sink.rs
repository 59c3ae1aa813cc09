use crate::math::{Matrix4, Point3};

/// Opaque debug-visibility bits forwarded to the sink untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugFlags(pub u32);

impl DebugFlags {
    pub const OFF: Self = Self(0);

    /// Returns `true` if any bit is set.
    #[must_use]
    pub fn any(self) -> bool {
        self.0 != 0
    }
}

/// Consumer that rasterizes shadow volumes into a stencil buffer.
///
/// Submission is fire-and-forget: failures stay inside the sink.
pub trait StencilSink {
    /// Sets the object-to-world transform used for the following draws.
    fn set_world_transform(&mut self, transform: &Matrix4);

    /// Draws one triangle-list volume (every 3 points form a triangle).
    ///
    /// `zfail` selects the depth-fail stencil convention, which expects
    /// capped volumes; otherwise depth-pass is used.
    fn draw_stencil_shadow_volume(&mut self, triangles: &[Point3], zfail: bool, debug: DebugFlags);
}

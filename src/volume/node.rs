use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::math::{Aabb, Point3};
use crate::mesh::{MeshSnapshot, ShadowMesh, TopologyChange};
use crate::operations::{Adjacency, BuildAdjacency, ClassifyFaces, ExtractSilhouette, ExtrudeEdges};
use crate::scene::{DebugFlags, LightSource, Spatial, StencilSink};

use super::config::ShadowVolumeConfig;
use super::pool::{ShadowVolume, ShadowVolumePool};

/// Lifecycle of a [`ShadowVolumeNode`] within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// No mesh assigned.
    Idle,
    /// Mesh assigned and snapshot current; no volumes pending submission.
    Snapshotted,
    /// Volumes built for this frame's lights, waiting for [`ShadowVolumeNode::render`].
    PerLightBuilt,
}

/// Builds and submits the stencil shadow volumes of one caster mesh.
///
/// Each [`update`](Self::update) re-flattens the mesh, rebuilds adjacency if
/// the vertex or index count changed, and builds one volume per nearby
/// shadow-casting light in the mesh's object space. [`render`](Self::render)
/// hands the volumes to a [`StencilSink`].
///
/// The mesh is shared, never mutated. Everything else (snapshot, adjacency,
/// scratch buffers, volume pool) is owned by the node and reused across
/// frames. No per-frame step can fail: bad input yields fewer or no volumes.
pub struct ShadowVolumeNode {
    config: ShadowVolumeConfig,
    mesh: Option<Arc<dyn ShadowMesh>>,
    bounding_box: Aabb,
    snapshot: MeshSnapshot,
    adjacency: Adjacency,
    adjacency_rebuilds: u64,
    facing: Vec<bool>,
    edges: Vec<[u32; 2]>,
    pool: ShadowVolumePool,
    state: NodeState,
    visible: bool,
    debug_flags: DebugFlags,
}

impl ShadowVolumeNode {
    /// Creates a node with no mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`ShadowVolumeConfig::validate`].
    pub fn new(config: ShadowVolumeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            mesh: None,
            bounding_box: Aabb::EMPTY,
            snapshot: MeshSnapshot::new(),
            adjacency: Adjacency::default(),
            adjacency_rebuilds: 0,
            facing: Vec::new(),
            edges: Vec::new(),
            pool: ShadowVolumePool::new(),
            state: NodeState::Idle,
            visible: true,
            debug_flags: DebugFlags::OFF,
        })
    }

    /// Creates a node casting shadows for `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`ShadowVolumeConfig::validate`].
    pub fn with_mesh(config: ShadowVolumeConfig, mesh: Arc<dyn ShadowMesh>) -> Result<Self> {
        let mut node = Self::new(config)?;
        node.set_mesh(Some(mesh));
        Ok(node)
    }

    /// Assigns the caster mesh, or detaches it with `None`.
    ///
    /// Reassigning the same mesh is a no-op. Otherwise the previous mesh is
    /// released, pending volumes are dropped, and the bounding box, snapshot
    /// and adjacency are recomputed.
    pub fn set_mesh(&mut self, mesh: Option<Arc<dyn ShadowMesh>>) {
        let same = match (&self.mesh, &mesh) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }

        self.pool.begin_frame();
        self.mesh = mesh;

        let Some(mesh) = self.mesh.clone() else {
            debug!("shadow mesh detached");
            self.bounding_box = Aabb::EMPTY;
            self.snapshot.clear();
            self.adjacency = Adjacency::default();
            self.state = NodeState::Idle;
            return;
        };

        self.bounding_box = mesh.bounding_box();
        self.refresh_topology(mesh.as_ref(), true);
        self.state = NodeState::Snapshotted;
        debug!(
            vertices = self.snapshot.vertex_count(),
            triangles = self.snapshot.triangle_count(),
            "shadow mesh assigned"
        );
    }

    /// Rebuilds this frame's shadow volumes.
    ///
    /// Lights are taken in order; a light contributes a volume when it casts
    /// shadows and lies within `radius * influence_scale` of the node's world
    /// position. Skipped lights do not consume a volume slot.
    pub fn update<L, S>(&mut self, lights: &L, spatial: &S)
    where
        L: LightSource + ?Sized,
        S: Spatial + ?Sized,
    {
        self.pool.begin_frame();

        let Some(mesh) = self.mesh.clone() else {
            return;
        };
        self.bounding_box = mesh.bounding_box();
        self.refresh_topology(mesh.as_ref(), false);
        self.state = NodeState::Snapshotted;

        let Some(to_local) = spatial.world_transform().try_inverse() else {
            warn!("world transform is not invertible, no shadow volumes this frame");
            return;
        };
        let origin = spatial.world_position();

        for index in 0..lights.light_count() {
            let Some(light) = lights.light(index) else {
                continue;
            };
            if !light.cast_shadows {
                continue;
            }

            let reach = light.radius * self.config.influence_scale;
            let in_range = (light.position - origin).norm_squared() <= reach * reach;
            if !in_range {
                continue;
            }

            let local = to_local.transform_point(&light.position);
            self.build_volume(index, local);
        }

        self.state = NodeState::PerLightBuilt;
    }

    /// Submits this frame's volumes to `sink` under the node's world
    /// transform. Does nothing when the node is hidden or has no volumes.
    pub fn render<K, S>(&mut self, sink: &mut K, spatial: &S)
    where
        K: StencilSink + ?Sized,
        S: Spatial + ?Sized,
    {
        if !self.visible || self.pool.used() == 0 {
            return;
        }

        sink.set_world_transform(&spatial.world_transform());
        let zfail = self.config.is_zfail();
        for volume in self.pool.volumes() {
            sink.draw_stencil_shadow_volume(volume.points(), zfail, self.debug_flags);
        }

        if self.state == NodeState::PerLightBuilt {
            self.state = NodeState::Snapshotted;
        }
    }

    /// Replaces the configuration. Adjacency is rebuilt if the adjacency
    /// method changed.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`ShadowVolumeConfig::validate`];
    /// the previous configuration is kept.
    pub fn set_config(&mut self, config: ShadowVolumeConfig) -> Result<()> {
        config.validate()?;
        let rebuild = config.adjacency_method != self.config.adjacency_method;
        self.config = config;
        if rebuild && self.mesh.is_some() {
            self.rebuild_adjacency();
        }
        Ok(())
    }

    fn refresh_topology(&mut self, mesh: &dyn ShadowMesh, force: bool) {
        let change = self.snapshot.capture(mesh);
        let stale = self.adjacency.triangle_count() != self.snapshot.triangle_count();
        if force || stale || change == TopologyChange::Changed {
            self.rebuild_adjacency();
        }
    }

    fn rebuild_adjacency(&mut self) {
        self.adjacency = BuildAdjacency::new(self.snapshot.positions(), self.snapshot.indices())
            .with_method(self.config.adjacency_method)
            .execute();
        self.adjacency_rebuilds += 1;
        debug!(
            triangles = self.snapshot.triangle_count(),
            method = ?self.config.adjacency_method,
            "rebuilt adjacency"
        );
    }

    fn build_volume(&mut self, light_index: usize, light: Point3) {
        let volume = self.pool.acquire(self.snapshot.index_count() * 5);

        // Classify, cap and collect edges, then extrude the edges into walls
        let front = ClassifyFaces::new(&self.snapshot, light, self.config.winding)
            .execute(&mut self.facing);

        let edges = ExtractSilhouette::new(&self.snapshot, &self.adjacency, &self.facing, light)
            .with_method(self.config.method)
            .with_winding(self.config.winding)
            .with_adjacency(self.config.use_adjacency)
            .with_infinity(self.config.infinity)
            .execute(volume, &mut self.edges);

        let quads = ExtrudeEdges::new(&self.snapshot, &self.edges, light, self.config.infinity)
            .execute(volume);

        if volume.exceeds_hint() {
            debug!(
                light = light_index,
                hint = volume.capacity_hint(),
                points = volume.points().len(),
                "shadow volume outgrew its allocation"
            );
        }

        trace!(
            light = light_index,
            front,
            edges,
            quads,
            triangles = volume.triangle_count(),
            "built shadow volume"
        );
    }

    // --- Queries ---

    /// Object-space bounds of the caster mesh; empty without a mesh.
    #[must_use]
    pub fn bounding_box(&self) -> &Aabb {
        &self.bounding_box
    }

    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &ShadowVolumeConfig {
        &self.config
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&Arc<dyn ShadowMesh>> {
        self.mesh.as_ref()
    }

    /// Volumes built by the last [`update`](Self::update), one per
    /// contributing light, in light order.
    #[must_use]
    pub fn volumes(&self) -> &[ShadowVolume] {
        self.pool.volumes()
    }

    #[must_use]
    pub fn volume_count(&self) -> usize {
        self.pool.used()
    }

    #[must_use]
    pub fn snapshot(&self) -> &MeshSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// How many times adjacency has been computed since construction.
    #[must_use]
    pub fn adjacency_rebuilds(&self) -> u64 {
        self.adjacency_rebuilds
    }

    // --- Flags ---

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn debug_flags(&self) -> DebugFlags {
        self.debug_flags
    }

    pub fn set_debug_flags(&mut self, flags: DebugFlags) {
        self.debug_flags = flags;
    }
}

impl fmt::Debug for ShadowVolumeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowVolumeNode")
            .field("config", &self.config)
            .field("has_mesh", &self.mesh.is_some())
            .field("state", &self.state)
            .field("triangles", &self.snapshot.triangle_count())
            .field("volumes", &self.pool.used())
            .finish_non_exhaustive()
    }
}

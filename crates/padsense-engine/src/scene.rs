//! Reference scene backed by a CPU triangle mesh.
//!
//! Used by the command-line harness, the benchmarks and the end-to-end
//! tests. A real renderer implements [`SceneAdapter`] itself.

use tracing::trace;

use padsense_core::{PointerSample, Vec3};
use padsense_mesh::{DecalFootprint, DecalGeometry, TriangleMesh};

use crate::decal::DecalMaterial;
use crate::engine::SceneAdapter;
use crate::feedback::GlowLevel;
use crate::picking::Camera;

/// A decal built by [`MeshScene`].
#[derive(Clone, Debug, PartialEq)]
pub struct MeshDecal {
    /// Scene-unique id.
    pub id: u64,
    /// Box the geometry was clipped to.
    pub footprint: DecalFootprint,
    /// Paired material.
    pub material: DecalMaterial,
    /// Clipped surface patch.
    pub geometry: DecalGeometry,
}

/// Camera, body mesh and the set of attached decals.
pub struct MeshScene {
    camera: Camera,
    mesh: TriangleMesh,
    attached: Vec<u64>,
    next_id: u64,
    redraws: u64,
    glow: Option<GlowLevel>,
}

impl MeshScene {
    /// Create a scene.
    #[must_use]
    pub fn new(camera: Camera, mesh: TriangleMesh) -> Self {
        Self {
            camera,
            mesh,
            attached: Vec::new(),
            next_id: 0,
            redraws: 0,
            glow: None,
        }
    }

    /// Standard camera looking at the stand-in torso.
    #[must_use]
    pub fn training() -> Self {
        Self::new(Camera::standard(), TriangleMesh::training_body())
    }

    /// Camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Body mesh.
    #[must_use]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Ids of attached decals.
    #[must_use]
    pub fn attached(&self) -> &[u64] {
        &self.attached
    }

    /// Redraw requests so far.
    #[must_use]
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Glow level last pushed by the engine.
    #[must_use]
    pub fn glow(&self) -> Option<GlowLevel> {
        self.glow
    }
}

impl SceneAdapter for MeshScene {
    type Decal = MeshDecal;

    fn cast_ray(&self, sample: PointerSample) -> Option<Vec3> {
        let ray = self.camera.ray_from_sample(sample);
        self.mesh.cast_ray(&ray).map(|hit| hit.point)
    }

    fn build_decal(&mut self, footprint: &DecalFootprint, material: DecalMaterial) -> MeshDecal {
        self.next_id += 1;
        let geometry = DecalGeometry::project(&self.mesh, footprint);
        trace!(
            "Decal {} clipped to {} triangles",
            self.next_id,
            geometry.triangle_count()
        );
        MeshDecal {
            id: self.next_id,
            footprint: *footprint,
            material,
            geometry,
        }
    }

    fn attach(&mut self, decal: &MeshDecal) {
        self.attached.push(decal.id);
    }

    fn detach(&mut self, decal: &MeshDecal) {
        self.attached.retain(|&id| id != decal.id);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn show_feedback(&mut self, level: Option<GlowLevel>) {
        self.glow = level;
    }
}

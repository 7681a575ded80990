//! Live decal management.
//!
//! At most one decal is attached to the scene at any time. Placing a new one
//! always detaches the previous one first.

use serde::{Deserialize, Serialize};
use tracing::trace;

use padsense_mesh::DecalFootprint;

use crate::engine::SceneAdapter;

/// How the pad is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecalMaterial {
    /// Outline only, while the pad follows the pointer
    #[default]
    Outline,
    /// Filled pad texture, once committed
    Filled,
}

struct LiveDecal<D> {
    handle: D,
    footprint: DecalFootprint,
    material: DecalMaterial,
}

/// Owner of the single live decal.
pub struct DecalBuilder<D> {
    live: Option<LiveDecal<D>>,
}

impl<D> DecalBuilder<D> {
    /// Create a builder with nothing attached.
    #[must_use]
    pub fn new() -> Self {
        Self { live: None }
    }

    /// Retire the current decal, then build and attach a new one.
    pub fn place<S>(&mut self, scene: &mut S, footprint: DecalFootprint, material: DecalMaterial)
    where
        S: SceneAdapter<Decal = D> + ?Sized,
    {
        self.retire(scene);
        let handle = scene.build_decal(&footprint, material);
        scene.attach(&handle);
        trace!(
            "Placed {:?} decal at ({:.2}, {:.2}, {:.2})",
            material,
            footprint.center.x,
            footprint.center.y,
            footprint.center.z
        );
        self.live = Some(LiveDecal {
            handle,
            footprint,
            material,
        });
    }

    /// Detach the current decal without replacing it.
    pub fn retire<S>(&mut self, scene: &mut S)
    where
        S: SceneAdapter<Decal = D> + ?Sized,
    {
        if let Some(live) = self.live.take() {
            scene.detach(&live.handle);
        }
    }

    /// True while a decal is attached.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Footprint of the live decal.
    #[must_use]
    pub fn footprint(&self) -> Option<&DecalFootprint> {
        self.live.as_ref().map(|l| &l.footprint)
    }

    /// Material of the live decal.
    #[must_use]
    pub fn material(&self) -> Option<DecalMaterial> {
        self.live.as_ref().map(|l| l.material)
    }

    /// Scene handle of the live decal.
    #[must_use]
    pub fn handle(&self) -> Option<&D> {
        self.live.as_ref().map(|l| &l.handle)
    }
}

impl<D> Default for DecalBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padsense_core::{Euler, PointerSample, Vec3};

    #[derive(Default)]
    struct CountingScene {
        next: u32,
        attached: Vec<u32>,
        detached: Vec<u32>,
    }

    impl SceneAdapter for CountingScene {
        type Decal = u32;

        fn cast_ray(&self, _sample: PointerSample) -> Option<Vec3> {
            None
        }

        fn build_decal(&mut self, _footprint: &DecalFootprint, _material: DecalMaterial) -> u32 {
            self.next += 1;
            self.next
        }

        fn attach(&mut self, decal: &u32) {
            self.attached.push(*decal);
        }

        fn detach(&mut self, decal: &u32) {
            self.attached.retain(|d| d != decal);
            self.detached.push(*decal);
        }
    }

    fn footprint() -> DecalFootprint {
        DecalFootprint::new(Vec3::zero(), Euler::identity(), Vec3::new(5.0, 7.0, 10.0))
    }

    #[test]
    fn test_at_most_one_live() {
        let mut scene = CountingScene::default();
        let mut builder = DecalBuilder::new();

        for _ in 0..5 {
            builder.place(&mut scene, footprint(), DecalMaterial::Outline);
            assert_eq!(scene.attached.len(), 1);
        }
        assert_eq!(scene.detached, vec![1, 2, 3, 4]);
        assert_eq!(builder.handle(), Some(&5));
    }

    #[test]
    fn test_retire() {
        let mut scene = CountingScene::default();
        let mut builder = DecalBuilder::new();

        builder.place(&mut scene, footprint(), DecalMaterial::Filled);
        assert_eq!(builder.material(), Some(DecalMaterial::Filled));
        builder.retire(&mut scene);
        assert!(!builder.is_live());
        assert!(scene.attached.is_empty());

        // Retiring twice is harmless
        builder.retire(&mut scene);
        assert_eq!(scene.detached.len(), 1);
    }
}

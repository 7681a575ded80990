//! Pointer to surface picking.
//!
//! Turns a normalized pointer sample into a contact point on the body by
//! asking the scene for the nearest ray hit. A miss is not an error: the
//! caller simply skips the frame.

use serde::{Deserialize, Serialize};
use tracing::trace;

use padsense_core::{PointerSample, Ray, Vec3};

use crate::engine::SceneAdapter;

/// A point on the body surface and the pointer sample that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    /// World-space surface point.
    pub point: Vec3,
    /// Pointer sample the ray was cast from.
    pub sample: PointerSample,
}

impl ContactPoint {
    /// Create a contact point.
    #[must_use]
    pub const fn new(point: Vec3, sample: PointerSample) -> Self {
        Self { point, sample }
    }
}

/// Cast the pointer ray into the scene; `None` when it misses the mesh.
pub fn pick<S: SceneAdapter + ?Sized>(scene: &S, sample: PointerSample) -> Option<ContactPoint> {
    let hit = scene.cast_ray(sample);
    match hit {
        Some(point) => trace!(
            "Pick ({:.3}, {:.3}) -> ({:.2}, {:.2}, {:.2})",
            sample.x,
            sample.y,
            point.x,
            point.y,
            point.z
        ),
        None => trace!("Pick ({:.3}, {:.3}) missed", sample.x, sample.y),
    }
    hit.map(|point| ContactPoint::new(point, sample))
}

/// Perspective camera looking down -Z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width over height.
    pub aspect: f32,
}

impl Camera {
    /// Create a camera.
    #[must_use]
    pub const fn new(position: Vec3, fov_deg: f32, aspect: f32) -> Self {
        Self {
            position,
            fov_deg,
            aspect,
        }
    }

    /// The training viewport: 850x450 canvas, 40° FOV, eye at z = 100.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 100.0), 40.0, 850.0 / 450.0)
    }

    fn half_height(&self) -> f32 {
        (self.fov_deg.to_radians() * 0.5).tan()
    }

    /// Ray through a pointer sample.
    #[must_use]
    pub fn ray_from_sample(&self, sample: PointerSample) -> Ray {
        let h = self.half_height();
        let direction = Vec3::new(sample.x * h * self.aspect, sample.y * h, -1.0);
        Ray::new(self.position, direction)
    }

    /// Pointer sample a world point appears at, `None` behind the eye.
    #[must_use]
    pub fn project(&self, point: &Vec3) -> Option<PointerSample> {
        let depth = self.position.z - point.z;
        if depth <= 0.0 {
            return None;
        }
        let h = self.half_height() * depth;
        Some(PointerSample::new(
            (point.x - self.position.x) / (h * self.aspect),
            (point.y - self.position.y) / h,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::standard()
    }
}

//! Decal footprints and box-clipped decal geometry.
//!
//! A footprint is an oriented box. [`DecalGeometry::project`] keeps the parts
//! of the mesh that fall inside that box, which yields a patch that follows
//! the surface instead of a flat quad floating over it.

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use padsense_core::{Axis, BoundingBox, Euler, Vec3};

use crate::mesh::TriangleMesh;

/// Oriented projection box for one decal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecalFootprint {
    /// Box center (the contact point).
    pub center: Vec3,
    /// Box orientation.
    pub orientation: Euler,
    /// Full box extents.
    pub size: Vec3,
}

impl DecalFootprint {
    /// Create a footprint.
    #[must_use]
    pub const fn new(center: Vec3, orientation: Euler, size: Vec3) -> Self {
        Self {
            center,
            orientation,
            size,
        }
    }

    /// Half of `size`.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }

    /// Projection direction (box +Z) in world space.
    #[must_use]
    pub fn projector_axis(&self) -> Vec3 {
        Vec3::from_vector3(&(self.orientation.rotation() * Vector3::z()))
    }

    /// A copy moved to a new center, keeping orientation and size.
    #[must_use]
    pub fn recentered(&self, center: Vec3) -> Self {
        Self { center, ..*self }
    }

    /// World-space AABB of the oriented box.
    #[must_use]
    pub fn world_bounds(&self) -> BoundingBox {
        let rot = self.orientation.rotation();
        let h = self.half_extents();
        let corners = [-1.0_f32, 1.0].into_iter().flat_map(|sx| {
            [-1.0_f32, 1.0].into_iter().flat_map(move |sy| {
                [-1.0_f32, 1.0]
                    .into_iter()
                    .map(move |sz| Vector3::new(sx * h.x, sy * h.y, sz * h.z))
            })
        });
        BoundingBox::from_points(
            corners.map(|c| self.center + Vec3::from_vector3(&(rot * c))),
        )
        .unwrap_or_default()
    }

    /// True when every extent is positive and finite.
    #[must_use]
    pub fn has_volume(&self) -> bool {
        self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0 && self.size.z > 0.0
    }
}

/// One vertex of a decal patch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecalVertex {
    /// World position.
    pub position: Vec3,
    /// Surface normal.
    pub normal: Vec3,
    /// Texture coordinate in [0, 1]².
    pub uv: [f32; 2],
}

/// Non-indexed triangle list of a decal patch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DecalGeometry {
    vertices: Vec<DecalVertex>,
}

impl DecalGeometry {
    /// Clip `mesh` to the footprint box.
    ///
    /// Triangles facing away from the projector are skipped, and a box with
    /// no volume produces an empty patch.
    #[must_use]
    pub fn project(mesh: &TriangleMesh, footprint: &DecalFootprint) -> Self {
        if !footprint.has_volume() {
            return Self::default();
        }

        let rot = footprint.orientation.rotation();
        let inverse = rot.inverse();
        let projector = footprint.projector_axis();
        let half = footprint.half_extents();
        let reach = footprint.world_bounds();

        let mut vertices = Vec::new();
        for corners in mesh.triangles() {
            let [a, b, c] = corners;
            let normal = (b - a).cross(&(c - a)).normalized();
            if normal.dot(&projector) <= 0.0 {
                continue;
            }
            let tri_bounds = BoundingBox::new(a, a).expand(&b).expand(&c);
            if !tri_bounds.intersects(&reach) {
                continue;
            }

            let mut polygon: Vec<Vec3> = corners
                .iter()
                .map(|p| to_local(&inverse, footprint.center, *p))
                .collect();
            for axis in [Axis::X, Axis::Y, Axis::Z] {
                for sign in [1.0_f32, -1.0] {
                    polygon = clip_polygon(&polygon, axis, sign, half.component(axis));
                    if polygon.len() < 3 {
                        break;
                    }
                }
                if polygon.len() < 3 {
                    break;
                }
            }
            if polygon.len() < 3 {
                continue;
            }

            let emit = |local: &Vec3| DecalVertex {
                position: footprint.center + Vec3::from_vector3(&(rot * local.to_vector3())),
                normal,
                uv: [
                    local.x / footprint.size.x + 0.5,
                    local.y / footprint.size.y + 0.5,
                ],
            };
            for i in 1..polygon.len() - 1 {
                vertices.push(emit(&polygon[0]));
                vertices.push(emit(&polygon[i]));
                vertices.push(emit(&polygon[i + 1]));
            }
        }

        Self { vertices }
    }

    /// Vertices, three per triangle.
    #[must_use]
    pub fn vertices(&self) -> &[DecalVertex] {
        &self.vertices
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True when nothing survived clipping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

fn to_local(inverse: &Rotation3<f32>, center: Vec3, point: Vec3) -> Vec3 {
    Vec3::from_vector3(&(inverse * (point - center).to_vector3()))
}

/// Sutherland–Hodgman against the plane `sign * p[axis] <= limit`.
fn clip_polygon(polygon: &[Vec3], axis: Axis, sign: f32, limit: f32) -> Vec<Vec3> {
    let inside = |p: &Vec3| sign * p.component(axis) <= limit;
    let mut out = Vec::with_capacity(polygon.len() + 2);

    for (i, current) in polygon.iter().enumerate() {
        let previous = &polygon[(i + polygon.len() - 1) % polygon.len()];
        match (inside(previous), inside(current)) {
            (true, true) => out.push(*current),
            (true, false) => out.push(crossing(previous, current, axis, sign, limit)),
            (false, true) => {
                out.push(crossing(previous, current, axis, sign, limit));
                out.push(*current);
            }
            (false, false) => {}
        }
    }
    out
}

fn crossing(from: &Vec3, to: &Vec3, axis: Axis, sign: f32, limit: f32) -> Vec3 {
    let d0 = sign * from.component(axis) - limit;
    let d1 = sign * to.component(axis) - limit;
    let t = d0 / (d0 - d1);
    *from + (*to - *from) * t
}

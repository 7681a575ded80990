//! Static triangle mesh with nearest-hit ray casting.

use serde::{Deserialize, Serialize};
use tracing::warn;

use padsense_core::{BoundingBox, Ray, RayHit, Vec3};

/// Indexed triangle mesh in world space.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    bounds: BoundingBox,
}

impl TriangleMesh {
    /// Build a mesh. Triangles referencing missing vertices are dropped.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        let vertex_count = positions.len();
        let before = triangles.len();
        let triangles: Vec<_> = triangles
            .into_iter()
            .filter(|t| t.iter().all(|&i| (i as usize) < vertex_count))
            .collect();
        if triangles.len() != before {
            warn!(
                "Dropped {} triangles with out-of-range indices",
                before - triangles.len()
            );
        }

        let bounds = BoundingBox::from_points(positions.iter().copied()).unwrap_or_default();
        Self {
            positions,
            triangles,
            bounds,
        }
    }

    /// Flat grid facing +Z, spanning `min..max` in X/Y at depth `z`.
    #[must_use]
    pub fn grid(min: [f32; 2], max: [f32; 2], z: f32, cols: u32, rows: u32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);

        let mut positions = Vec::with_capacity(((cols + 1) * (rows + 1)) as usize);
        for j in 0..=rows {
            for i in 0..=cols {
                let x = min[0] + (max[0] - min[0]) * i as f32 / cols as f32;
                let y = min[1] + (max[1] - min[1]) * j as f32 / rows as f32;
                positions.push(Vec3::new(x, y, z));
            }
        }

        let stride = cols + 1;
        let mut triangles = Vec::with_capacity((cols * rows * 2) as usize);
        for j in 0..rows {
            for i in 0..cols {
                let a = j * stride + i;
                let b = a + 1;
                let c = b + stride;
                let d = a + stride;
                triangles.push([a, b, c]);
                triangles.push([a, c, d]);
            }
        }

        Self::new(positions, triangles)
    }

    /// Reverse the winding of every triangle.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        for t in &mut self.triangles {
            t.swap(1, 2);
        }
        self
    }

    /// Merge another mesh into this one.
    pub fn append(&mut self, other: &Self) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
        self.bounds = BoundingBox::from_points(self.positions.iter().copied()).unwrap_or_default();
    }

    /// Stand-in torso for tests and the demo: a front panel at z = 1 and a
    /// back panel at z = -6.
    #[must_use]
    pub fn training_body() -> Self {
        let mut body = Self::grid([-60.0, -40.0], [60.0, 40.0], 1.0, 24, 16);
        body.append(&Self::grid([-60.0, -40.0], [60.0, 40.0], -6.0, 24, 16).flipped());
        body
    }

    /// Corners of a triangle.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some([
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ])
    }

    /// Unit geometric normal of a triangle (counter-clockwise winding).
    #[must_use]
    pub fn triangle_normal(&self, index: usize) -> Option<Vec3> {
        let [a, b, c] = self.triangle(index)?;
        Some((b - a).cross(&(c - a)).normalized())
    }

    /// Iterate over triangle corners.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangles.len()).filter_map(move |i| self.triangle(i))
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// World-space bounds.
    #[must_use]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Nearest intersection along the ray, `None` on a miss.
    #[must_use]
    pub fn cast_ray(&self, ray: &Ray) -> Option<RayHit> {
        if self.triangles.is_empty() {
            return None;
        }
        ray.intersect_aabb(&self.bounds)?;

        let mut nearest: Option<RayHit> = None;
        for (index, [a, b, c]) in self.triangles().enumerate() {
            let Some((t, _, _)) = ray.intersect_triangle(&a, &b, &c) else {
                continue;
            };
            let hit = RayHit {
                distance: t,
                point: ray.point_at(t),
                normal: (b - a).cross(&(c - a)).normalized(),
                triangle: index,
            };
            nearest = Some(match nearest {
                Some(best) => best.nearest(hit),
                None => hit,
            });
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let mesh = TriangleMesh::grid([-1.0, -1.0], [1.0, 1.0], 0.0, 4, 2);
        assert_eq!(mesh.vertex_count(), 5 * 3);
        assert_eq!(mesh.triangle_count(), 4 * 2 * 2);

        let n = mesh.triangle_normal(0).unwrap();
        assert!((n.z - 1.0).abs() < 1e-6);

        let n = mesh.clone().flipped().triangle_normal(0).unwrap();
        assert!((n.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_triangles_dropped() {
        let mesh = TriangleMesh::new(
            vec![Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2], [0, 1, 7]],
        );
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_cast_ray_nearest_hit() {
        let mesh = TriangleMesh::training_body();
        let ray = Ray::new(Vec3::new(5.3, 4.7, 100.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = mesh.cast_ray(&ray).unwrap();
        assert!((hit.point.z - 1.0).abs() < 1e-4);
        assert!((hit.distance - 99.0).abs() < 1e-3);
        assert!(hit.normal.z > 0.99);
    }

    #[test]
    fn test_cast_ray_from_behind_hits_back_panel() {
        let mesh = TriangleMesh::training_body();
        let ray = Ray::new(Vec3::new(5.3, 4.7, -100.0), Vec3::new(0.0, 0.0, 1.0));

        let hit = mesh.cast_ray(&ray).unwrap();
        assert!((hit.point.z + 6.0).abs() < 1e-4);
        assert!(hit.normal.z < -0.99);
    }

    #[test]
    fn test_cast_ray_miss() {
        let mesh = TriangleMesh::training_body();
        let outside = Ray::new(Vec3::new(80.0, 0.0, 100.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(mesh.cast_ray(&outside).is_none());

        assert!(TriangleMesh::default().cast_ray(&outside).is_none());
    }
}

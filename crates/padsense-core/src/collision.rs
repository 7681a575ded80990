//! Ray casting primitives.
//!
//! Broad phase is a slab test against an axis-aligned box, narrow phase is
//! Möller–Trumbore against individual triangles.

use serde::{Deserialize, Serialize};

use crate::types::Vec3;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a new bounding box from two arbitrary corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: Vec3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Vec3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create a bounding box around `center` with given half-extents.
    #[must_use]
    pub fn from_center_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |bb, p| bb.expand(&p)))
    }

    /// Get the center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if a point is inside the bounding box.
    #[must_use]
    pub fn contains(&self, point: &Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this bounding box intersects another.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Expand the bounding box to include a point.
    #[must_use]
    pub fn expand(&self, point: &Vec3) -> Self {
        Self {
            min: Vec3::new(
                self.min.x.min(point.x),
                self.min.y.min(point.y),
                self.min.z.min(point.z),
            ),
            max: Vec3::new(
                self.max.x.max(point.x),
                self.max.y.max(point.y),
                self.max.z.max(point.z),
            ),
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vec3::zero(),
            max: Vec3::zero(),
        }
    }
}

/// A ray for ray-casting against a mesh.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Ray {
    /// Origin point.
    pub origin: Vec3,
    /// Direction (normalized on construction).
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Get a point along the ray at distance t.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Check intersection with a bounding box.
    ///
    /// Returns the entry and exit distances, or None if no intersection.
    #[must_use]
    pub fn intersect_aabb(&self, aabb: &BoundingBox) -> Option<(f32, f32)> {
        let inv = |d: f32| if d.abs() > 1e-8 { 1.0 / d } else { f32::MAX };
        let inv_dir = Vec3::new(
            inv(self.direction.x),
            inv(self.direction.y),
            inv(self.direction.z),
        );

        let t1 = (aabb.min.x - self.origin.x) * inv_dir.x;
        let t2 = (aabb.max.x - self.origin.x) * inv_dir.x;
        let t3 = (aabb.min.y - self.origin.y) * inv_dir.y;
        let t4 = (aabb.max.y - self.origin.y) * inv_dir.y;
        let t5 = (aabb.min.z - self.origin.z) * inv_dir.z;
        let t6 = (aabb.max.z - self.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax >= tmin && tmax >= 0.0 {
            Some((tmin.max(0.0), tmax))
        } else {
            None
        }
    }

    /// Möller–Trumbore ray/triangle intersection.
    ///
    /// Returns `(t, u, v)` for hits in front of the origin, where `u`/`v`
    /// are the barycentric weights of `v1`/`v2`.
    #[must_use]
    pub fn intersect_triangle(&self, v0: &Vec3, v1: &Vec3, v2: &Vec3) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 1e-8;

        let edge1 = *v1 - *v0;
        let edge2 = *v2 - *v0;
        let h = self.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Parallel to the triangle plane
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = self.origin - *v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * self.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t > EPSILON {
            Some((t, u, v))
        } else {
            None
        }
    }
}

/// A ray hit on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance along the ray.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Geometric normal of the hit triangle.
    pub normal: Vec3,
    /// Index of the hit triangle.
    pub triangle: usize,
}

impl RayHit {
    /// Keep whichever of two hits is closer to the ray origin.
    #[must_use]
    pub fn nearest(self, other: Self) -> Self {
        if other.distance < self.distance {
            other
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_contains() {
        let bb = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(bb.contains(&Vec3::zero()));
        assert!(!bb.contains(&Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_bounding_box_from_points() {
        let bb = BoundingBox::from_points([
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.5),
        ])
        .unwrap();
        assert_eq!(bb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Vec3::new(1.0, 3.0, 0.5));
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let (tmin, tmax) = ray.intersect_aabb(&aabb).unwrap();
        assert!((tmin - 4.0).abs() < 0.01);
        assert!((tmax - 6.0).abs() < 0.01);

        let ray_away = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(ray_away.intersect_aabb(&aabb).is_none());
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let down = Vec3::new(0.0, 0.0, -1.0);
        let hit = Ray::new(Vec3::new(0.3, 0.3, 1.0), down).intersect_triangle(&v0, &v1, &v2);
        let (t, u, v) = hit.unwrap();
        assert!((t - 1.0).abs() < 1e-5);
        assert!((u - 0.3).abs() < 1e-5);
        assert!((v - 0.3).abs() < 1e-5);

        let miss = Ray::new(Vec3::new(0.7, 0.7, 1.0), down).intersect_triangle(&v0, &v1, &v2);
        assert!(miss.is_none());

        let parallel = Ray::new(Vec3::new(0.3, 0.3, 1.0), Vec3::new(1.0, 0.0, 0.0))
            .intersect_triangle(&v0, &v1, &v2);
        assert!(parallel.is_none());

        let behind = Ray::new(Vec3::new(0.3, 0.3, -1.0), down).intersect_triangle(&v0, &v1, &v2);
        assert!(behind.is_none());
    }

    #[test]
    fn test_nearest_hit() {
        let near = RayHit {
            distance: 2.0,
            point: Vec3::zero(),
            normal: Vec3::new(0.0, 0.0, 1.0),
            triangle: 0,
        };
        let far = RayHit { distance: 5.0, triangle: 1, ..near };
        assert_eq!(far.nearest(near).triangle, 0);
        assert_eq!(near.nearest(far).triangle, 0);
    }
}

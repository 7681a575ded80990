//! Distance and interpolation primitives.

use serde::{Deserialize, Serialize};

use crate::types::Vec3;

/// Euclidean distance between two points in the plane.
#[must_use]
pub fn distance_2d(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    libm::sqrtf(dx * dx + dy * dy)
}

/// Euclidean distance between two points in space.
#[must_use]
pub fn distance_3d(a: &Vec3, b: &Vec3) -> f32 {
    (*a - *b).magnitude()
}

/// Linear interpolation, `t = 0` gives `a`.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, `0` at `a` and `1` at `b`.
///
/// Returns `None` when `a == b`.
#[must_use]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> Option<f32> {
    let span = b - a;
    if span == 0.0 {
        None
    } else {
        Some((value - a) / span)
    }
}

/// Value at `x` of the line through `start` and `end`.
///
/// The anchors must differ in X.
#[must_use]
pub fn line_through(start: [f32; 2], end: [f32; 2], x: f32) -> f32 {
    AnchorLine { start, end }.y_at(x)
}

/// Two anchors defining a straight line `y(x)` in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorLine {
    /// First anchor `(x1, y1)`
    pub start: [f32; 2],
    /// Second anchor `(x2, y2)`
    pub end: [f32; 2],
}

impl AnchorLine {
    /// Create a line through two anchors.
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: [x1, y1],
            end: [x2, y2],
        }
    }

    /// A line is usable only if its anchors differ in X.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start[0] == self.end[0]
    }

    /// Value of the line at `x`: `(x - x1) * (y2 - y1) / (x2 - x1) + y1`.
    ///
    /// Callers must reject degenerate lines up front; a degenerate line
    /// yields a non-finite result here.
    #[must_use]
    pub fn y_at(&self, x: f32) -> f32 {
        let [x1, y1] = self.start;
        let [x2, y2] = self.end;
        (x - x1) * (y2 - y1) / (x2 - x1) + y1
    }

    /// True when both anchors are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.start.iter().chain(self.end.iter()).all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_2d() {
        assert!((distance_2d([0.0, 0.0], [3.0, 4.0]) - 5.0).abs() < 1e-6);
        assert!(distance_2d([1.0, 1.0], [1.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn test_distance_3d() {
        let d = distance_3d(&Vec3::new(1.0, 2.0, 3.0), &Vec3::new(1.0, 2.0, 8.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_and_inverse() {
        assert!((lerp(2.0, 4.0, 0.25) - 2.5).abs() < 1e-6);
        let t = inverse_lerp(0.0, -0.085, -0.05).unwrap();
        assert!((t - 0.588_235).abs() < 1e-4);
        assert!(inverse_lerp(1.0, 1.0, 0.5).is_none());
    }

    #[test]
    fn test_anchor_line() {
        // Upper arm centerline anchors
        let line = AnchorLine::new(-30.0, 7.0, -24.0, 9.6);
        assert!((line.y_at(-30.0) - 7.0).abs() < 1e-5);
        assert!((line.y_at(-24.0) - 9.6).abs() < 1e-5);
        assert!((line.y_at(-27.0) - 8.3).abs() < 1e-5);
        assert!(!line.is_degenerate());
        assert!(AnchorLine::new(1.0, 0.0, 1.0, 5.0).is_degenerate());
    }

    #[test]
    fn test_line_through() {
        let y = line_through([-30.0, -15.0], [-23.0, -17.0], -23.0);
        assert!((y + 17.0).abs() < 1e-5);
    }
}

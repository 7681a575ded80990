//! Core value types for the surface-interaction engine.
//!
//! Everything here is `Copy` and allocation-free: the engine rebuilds these
//! values on every pointer event.

use core::ops::{Add, Mul, Sub};

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Normalize to a unit vector. Degenerate vectors collapse to zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag > 1e-8 {
            Self::new(self.x / mag, self.y / mag, self.z / mag)
        } else {
            Self::zero()
        }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Read one component.
    #[must_use]
    pub const fn component(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Mutable access to one component.
    pub fn component_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Convert to nalgebra Vector3.
    #[must_use]
    pub fn to_vector3(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Create from nalgebra Vector3.
    #[must_use]
    pub fn from_vector3(v: &Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// One of the three world axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

/// Orientation triple in radians, applied in X, Y, Z order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    /// Rotation about X
    pub x: f32,
    /// Rotation about Y
    pub y: f32,
    /// Rotation about Z
    pub z: f32,
}

impl Euler {
    /// Create from radians.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// No rotation.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create from degrees.
    #[must_use]
    pub fn from_degrees(x: f32, y: f32, z: f32) -> Self {
        Self::new(x.to_radians(), y.to_radians(), z.to_radians())
    }

    /// Rotation matrix `Rx * Ry * Rz`.
    #[must_use]
    pub fn rotation(&self) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.x)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.y)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.z)
    }

    /// True when every angle is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A pointer position in normalized device coordinates.
///
/// Both axes span [-1, 1], with +Y pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Horizontal coordinate, -1 at the left edge
    pub x: f32,
    /// Vertical coordinate, -1 at the bottom edge
    pub y: f32,
}

impl PointerSample {
    /// Create a sample, clamping both axes to [-1, 1].
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    /// Convert canvas pixel coordinates (origin top-left) to a sample.
    ///
    /// Degenerate canvases map to the center.
    #[must_use]
    pub fn from_canvas(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        Self::new(
            (client_x / width) * 2.0 - 1.0,
            -(client_y / height) * 2.0 + 1.0,
        )
    }

    /// Coordinates as an array.
    #[must_use]
    pub const fn as_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

//! PadSense Core - Geometry primitives for pad placement training
//!
//! Value types shared by every layer of the surface-interaction engine:
//! world vectors, orientation triples, normalized pointer samples, distance
//! and interpolation helpers, and the ray casting primitives used to turn a
//! pointer into a contact point on the body mesh.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Surface Interaction Engine                         │
//! │  ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────────┐  │
//! │  │ Picking         │    │ Footprint       │    │ Zone Matching &     │  │
//! │  │ (Ray, RayHit)   │    │ Correction      │    │ Glow Feedback       │  │
//! │  └────────┬────────┘    └────────┬────────┘    └──────────┬──────────┘  │
//! │           │                      │                        │             │
//! │           └──────────────────────┼────────────────────────┘             │
//! │                                  ▼                                      │
//! │                    ┌─────────────────────────┐                          │
//! │                    │ Vec3 / Euler /          │                          │
//! │                    │ PointerSample / geometry│                          │
//! │                    └─────────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use padsense_core::{geometry::distance_2d, PointerSample};
//!
//! let sample = PointerSample::from_canvas(425.0, 225.0, 850.0, 450.0);
//! assert!(distance_2d(sample.as_array(), [0.0, 0.0]) < 1e-6);
//! ```

#![warn(missing_docs)]

pub mod collision;
pub mod error;
pub mod geometry;
pub mod types;

pub use collision::{BoundingBox, Ray, RayHit};
pub use error::ConfigError;
pub use geometry::{inverse_lerp, line_through, AnchorLine};
pub use types::{Axis, Euler, PointerSample, Vec3};

/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest distance between two pointer samples (corner to corner).
pub const MAX_POINTER_DISTANCE: f32 = 2.0 * core::f32::consts::SQRT_2;

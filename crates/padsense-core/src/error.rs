//! Configuration errors.
//!
//! Every table the engine reads per frame is validated once at startup so
//! that a bad entry fails fast instead of leaking NaN into the geometry.

use thiserror::Error;

/// A malformed region, zone or feedback table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Taper bounds with `y_top == y_bottom` would divide by zero
    #[error("region {region}: zero-height bounds (y_top = y_bottom = {y})")]
    ZeroHeightBounds {
        /// Region name
        region: String,
        /// The shared edge value
        y: f32,
    },

    /// Bounds whose edges are swapped
    #[error("region {region}: inverted bounds ({detail})")]
    InvertedBounds {
        /// Region name
        region: String,
        /// Which pair of edges is inverted
        detail: &'static str,
    },

    /// Anchor pair with identical X coordinates
    #[error("region {region}: seam anchors share x = {x}")]
    DegenerateAnchors {
        /// Region name
        region: String,
        /// The shared X coordinate
        x: f32,
    },

    /// NaN or infinite value somewhere in a table
    #[error("{context}: non-finite value in field {field}")]
    NonFinite {
        /// Region, zone or section name
        context: String,
        /// Offending field
        field: &'static str,
    },

    /// Zone acceptance radius must be positive
    #[error("zone {zone}: radius {radius} must be positive")]
    InvalidRadius {
        /// Zone name
        zone: String,
        /// Configured radius
        radius: f32,
    },

    /// Two zones with the same name
    #[error("zone {zone} declared more than once")]
    DuplicateZone {
        /// Zone name
        zone: String,
    },

    /// Nominal decal size must be positive on every axis
    #[error("nominal decal size must be positive, got ({x}, {y}, {z})")]
    InvalidDecalSize {
        /// X extent
        x: f32,
        /// Y extent
        y: f32,
        /// Z extent
        z: f32,
    },

    /// Feedback policy with no anchors
    #[error("feedback policy has no anchors")]
    EmptyAnchorSet,

    /// Feedback policy parameter out of range
    #[error("feedback policy: {field} = {value} is out of range")]
    InvalidFeedback {
        /// Parameter name
        field: &'static str,
        /// Configured value
        value: f32,
    },
}

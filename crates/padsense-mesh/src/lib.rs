//! PadSense Mesh - Body surface data for pad placement
//!
//! Everything the engine needs to know about the body it is placing pads on:
//! the pointer-space correction regions, the target electrode zones, a
//! triangle mesh that can be ray cast, and box-clipped decal geometry.
//!
//! # Region Map
//!
//! Regions are declared in normalized pointer space (x right, y up):
//!
//! ```text
//!          -0.48        -0.31   -0.12   0.0          0.25
//!    0.30 ──┼────────────┼───────┼───────┼────────────┼──
//!           │ UPPER ARM (above slope, realign < -0.12) │
//!    0.13 ──┼────────────┐                              │
//!           │ UPPER BODY │ (taper, seam at top)          │
//!    0.03 ──┼────────────┘               ┌────────────┐ 0.0
//!           │                            │ UPPER LEG  │
//!   -0.09 ──┼                            ├────────────┤ -0.085
//!           │                            │ BOTTOM LEG │
//!   -0.25 ──┼────────────┐               └────────────┘ -0.2
//!           │ LOWER BODY │ (taper, seam at bottom)      │
//!   -0.34 ──┼────────────┘                              │
//!           │ LOWER ARM (below slope, realign < -0.12) │
//! ```

#![warn(missing_docs)]

pub mod decal;
pub mod mesh;
pub mod region;
pub mod zone;

pub use decal::{DecalFootprint, DecalGeometry, DecalVertex};
pub use mesh::TriangleMesh;
pub use region::{
    Bounds, Region, RegionId, RegionRule, RegionTable, SeamEnd, SlopeBoundary, SlopeSide,
};
pub use zone::{TargetZone, TargetZoneSet, ZoneSpace};

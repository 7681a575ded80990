//! Seam-aware footprint correction.
//!
//! Near the boundary between two body parts a full-size pad would straddle
//! both. The region table describes where that happens, and [`correct`]
//! applies every matching rule in table order:
//!
//! ```text
//! size_taper    size[axis] *= delta      (near end)
//!               size[axis] *= 1 - delta  (far end)
//! limb_lock     orientation = angles
//! seam_realign  contact.y = line(anchors)(contact.x)   while x < x_right
//! ```
//!
//! Rules are not mutually exclusive. Overlapping regions compose.

use serde::{Deserialize, Serialize};
use tracing::trace;

use padsense_core::{Euler, Vec3};
use padsense_mesh::{DecalFootprint, RegionRule, RegionTable};

use crate::picking::ContactPoint;

/// Contact point, size and orientation after region rules were applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectedFootprint {
    /// Possibly realigned contact point.
    pub contact: ContactPoint,
    /// Decal box size.
    pub size: Vec3,
    /// Decal orientation.
    pub orientation: Euler,
}

impl CorrectedFootprint {
    /// Decal box centered on the contact point.
    #[must_use]
    pub fn footprint(&self) -> DecalFootprint {
        DecalFootprint::new(self.contact.point, self.orientation, self.size)
    }
}

/// Apply the region table to a freshly picked contact point.
///
/// `nominal` is copied, never mutated, so repeated calls with the same input
/// always agree.
#[must_use]
pub fn correct(contact: &ContactPoint, nominal: Vec3, regions: &RegionTable) -> CorrectedFootprint {
    let sample = contact.sample;
    let mut out = CorrectedFootprint {
        contact: *contact,
        size: nominal,
        orientation: Euler::identity(),
    };

    for region in regions.matching(sample) {
        trace!("Region {} fires {}", region.id.as_str(), region.rule.kind());
        match &region.rule {
            RegionRule::SizeTaper { bounds, axis, end } => {
                if let Some(delta) = bounds.taper_delta(sample.y) {
                    *out.size.component_mut(*axis) *= end.factor(delta);
                }
            }
            RegionRule::LimbLock { angles, .. } => {
                out.orientation = *angles;
            }
            RegionRule::SeamRealign {
                x_right, anchors, ..
            } => {
                if sample.x < *x_right {
                    out.contact.point.y = anchors.y_at(out.contact.point.x);
                }
            }
        }
    }

    out
}

//! Target zone matching.
//!
//! Runs once per commit on the raw hit frozen at the last tracked move. Under the default
//! [`MatchPolicy::FirstMatch`] the zone declaration order decides overlaps,
//! not distance.

use serde::{Deserialize, Serialize};
use tracing::debug;

use padsense_core::Vec3;
use padsense_mesh::TargetZoneSet;

/// How overlapping zones are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First accepting zone in declaration order
    #[default]
    FirstMatch,
    /// Closest accepting zone, declaration order breaks ties
    Nearest,
}

/// Result of matching a committed contact point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ZoneMatch {
    /// The pad landed in a zone.
    Matched {
        /// Index in the zone set
        zone: usize,
        /// Zone name
        name: String,
        /// Canonical point the pad snaps to
        snap: Vec3,
    },
    /// No zone accepted the point.
    Unmatched,
}

impl ZoneMatch {
    /// True for a successful placement.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Snap point of a match.
    #[must_use]
    pub fn snap_point(&self) -> Option<Vec3> {
        match self {
            Self::Matched { snap, .. } => Some(*snap),
            Self::Unmatched => None,
        }
    }
}

/// Match a point against the zone set.
#[must_use]
pub fn match_zone(point: &Vec3, zones: &TargetZoneSet, policy: MatchPolicy) -> ZoneMatch {
    let mut accepted = zones
        .iter()
        .enumerate()
        .map(|(index, zone)| (index, zone, zone.distance_to(point)))
        .filter(|(_, zone, distance)| *distance < zone.radius);

    let chosen = match policy {
        MatchPolicy::FirstMatch => accepted.next(),
        // min_by keeps the first of equal elements
        MatchPolicy::Nearest => accepted.min_by(|a, b| a.2.total_cmp(&b.2)),
    };

    match chosen {
        Some((index, zone, distance)) => {
            debug!("Matched zone {} at distance {:.3}", zone.name, distance);
            ZoneMatch::Matched {
                zone: index,
                name: zone.name.clone(),
                snap: zone.reference,
            }
        }
        None => {
            debug!(
                "No zone accepts ({:.2}, {:.2}, {:.2})",
                point.x, point.y, point.z
            );
            ZoneMatch::Unmatched
        }
    }
}

//! Proximity feedback for the glow indicator.
//!
//! The glow shader takes a `base` uniform where lower means brighter. Two
//! policies produce it from the pointer position:
//! ```text
//! single anchor:  base = distance * scale + offset
//! multi anchor:   base = min(min distance, cap) - offset
//! ```
//! Distances are measured in pointer space. One policy is chosen per
//! deployment.

use serde::{Deserialize, Serialize};

use padsense_core::geometry::distance_2d;
use padsense_core::{ConfigError, PointerSample, MAX_POINTER_DISTANCE};

/// Glow shader base value. Lower is brighter.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlowLevel(f32);

impl GlowLevel {
    /// Wrap a raw value.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Raw shader value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }
}

/// How pointer distance maps to glow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FeedbackPolicy {
    /// Distance to one fixed anchor, scaled and offset.
    SingleAnchor {
        /// Anchor in pointer space
        anchor: [f32; 2],
        /// Distance multiplier
        scale: f32,
        /// Added after scaling
        offset: f32,
    },
    /// Distance to the closest of several anchors, capped then offset.
    MultiAnchor {
        /// Anchors in pointer space
        anchors: Vec<[f32; 2]>,
        /// Distance cap
        cap: f32,
        /// Subtracted after capping
        offset: f32,
    },
}

impl FeedbackPolicy {
    /// Single anchor on the chin, `distance * 0.2 - 0.1`.
    #[must_use]
    pub fn chin_anchor() -> Self {
        Self::SingleAnchor {
            anchor: [-0.65, -0.1],
            scale: 0.2,
            offset: -0.1,
        }
    }

    /// One anchor per standard electrode zone, capped at 0.3, offset 0.15.
    ///
    /// The anchors are the standard zones seen through the standard camera.
    #[must_use]
    pub fn zone_anchors() -> Self {
        Self::MultiAnchor {
            anchors: vec![
                [-0.353, 0.278],
                [-0.352, -0.457],
                [-0.258, 0.029],
                [-0.258, -0.215],
            ],
            cap: 0.3,
            offset: 0.15,
        }
    }

    /// Glow level for a pointer sample, clamped to [`bounds`](Self::bounds).
    #[must_use]
    pub fn compute(&self, sample: PointerSample) -> GlowLevel {
        let p = sample.as_array();
        let base = match self {
            Self::SingleAnchor {
                anchor,
                scale,
                offset,
            } => distance_2d(p, *anchor) * scale + offset,
            Self::MultiAnchor {
                anchors,
                cap,
                offset,
            } => {
                let nearest = anchors
                    .iter()
                    .map(|a| distance_2d(p, *a))
                    .fold(f32::INFINITY, f32::min);
                nearest.min(*cap) - offset
            }
        };
        let (lo, hi) = self.bounds();
        GlowLevel(base.clamp(lo, hi))
    }

    /// Smallest and largest level this policy can produce.
    #[must_use]
    pub fn bounds(&self) -> (f32, f32) {
        match self {
            Self::SingleAnchor { scale, offset, .. } => {
                (*offset, offset + scale * MAX_POINTER_DISTANCE)
            }
            Self::MultiAnchor { cap, offset, .. } => (-offset, cap - offset),
        }
    }

    /// Level reported while the indicator is hidden: no glow at all.
    #[must_use]
    pub fn idle_level(&self) -> GlowLevel {
        GlowLevel(self.bounds().1)
    }

    /// Reject policies that cannot produce a finite, ordered range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = |v: f32, field: &'static str| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NonFinite {
                    context: "feedback".into(),
                    field,
                })
            }
        };

        match self {
            Self::SingleAnchor {
                anchor,
                scale,
                offset,
            } => {
                finite(anchor[0], "anchor")?;
                finite(anchor[1], "anchor")?;
                finite(*scale, "scale")?;
                finite(*offset, "offset")?;
                if *scale <= 0.0 {
                    return Err(ConfigError::InvalidFeedback {
                        field: "scale",
                        value: *scale,
                    });
                }
            }
            Self::MultiAnchor {
                anchors,
                cap,
                offset,
            } => {
                if anchors.is_empty() {
                    return Err(ConfigError::EmptyAnchorSet);
                }
                for a in anchors {
                    finite(a[0], "anchors")?;
                    finite(a[1], "anchors")?;
                }
                finite(*cap, "cap")?;
                finite(*offset, "offset")?;
                if *cap <= 0.0 {
                    return Err(ConfigError::InvalidFeedback {
                        field: "cap",
                        value: *cap,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for FeedbackPolicy {
    fn default() -> Self {
        Self::chin_anchor()
    }
}

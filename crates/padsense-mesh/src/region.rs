//! Body region definitions and seam correction rules.
//!
//! Regions live in normalized pointer space. Each one carries a single
//! [`RegionRule`]; the table is evaluated in declaration order and every
//! matching rule applies, so overlapping regions compose.

use serde::{Deserialize, Serialize};

use padsense_core::{inverse_lerp, AnchorLine, Axis, ConfigError, Euler, PointerSample};

/// Body region identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionId {
    /// Thigh just below the hip seam
    UpperLeg,
    /// Leg just above the knee seam
    BottomLeg,
    /// Chest side near the armpit
    UpperBody,
    /// Flank near the waist
    LowerBody,
    /// Raised upper arm
    UpperArm,
    /// Lowered arm
    LowerArm,
}

impl RegionId {
    /// Stable identifier for logs and configuration files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpperLeg => "upper_leg",
            Self::BottomLeg => "bottom_leg",
            Self::UpperBody => "upper_body",
            Self::LowerBody => "lower_body",
            Self::UpperArm => "upper_arm",
            Self::LowerArm => "lower_arm",
        }
    }
}

/// Axis-aligned rectangle in pointer space. Containment is strict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge
    pub x_left: f32,
    /// Right edge
    pub x_right: f32,
    /// Top edge (the taper reference edge)
    pub y_top: f32,
    /// Bottom edge
    pub y_bottom: f32,
}

impl Bounds {
    /// Create new bounds.
    #[must_use]
    pub const fn new(x_left: f32, x_right: f32, y_top: f32, y_bottom: f32) -> Self {
        Self {
            x_left,
            x_right,
            y_top,
            y_bottom,
        }
    }

    /// Strict containment test.
    #[must_use]
    pub fn contains(&self, sample: PointerSample) -> bool {
        sample.x > self.x_left
            && sample.x < self.x_right
            && sample.y > self.y_bottom
            && sample.y < self.y_top
    }

    /// `(y_top - y) / (y_top - y_bottom)`: 0 on the top edge, 1 on the bottom.
    ///
    /// `None` for zero-height bounds, which validation rejects.
    #[must_use]
    pub fn taper_delta(&self, y: f32) -> Option<f32> {
        inverse_lerp(self.y_top, self.y_bottom, y)
    }

    fn validate(&self, region: RegionId) -> Result<(), ConfigError> {
        let finite = [self.x_left, self.x_right, self.y_top, self.y_bottom]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::NonFinite {
                context: region.as_str().to_owned(),
                field: "bounds",
            });
        }
        if self.y_top == self.y_bottom {
            return Err(ConfigError::ZeroHeightBounds {
                region: region.as_str().to_owned(),
                y: self.y_top,
            });
        }
        if self.y_top < self.y_bottom {
            return Err(ConfigError::InvertedBounds {
                region: region.as_str().to_owned(),
                detail: "y_top below y_bottom",
            });
        }
        if self.x_left >= self.x_right {
            return Err(ConfigError::InvertedBounds {
                region: region.as_str().to_owned(),
                detail: "x_left not left of x_right",
            });
        }
        Ok(())
    }
}

/// Which side of a sloped line counts as inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeSide {
    /// Above a line rising to the right
    Above,
    /// Below a line falling to the right
    Below,
}

/// Sloped limb boundary, anchored at `(x_left, y_top)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlopeBoundary {
    /// Pointer X where the slope starts
    pub x_left: f32,
    /// Pointer Y of the slope at `x_left`
    pub y_top: f32,
    /// Slope magnitude
    pub y_move_scale: f32,
    /// Inside side
    pub side: SlopeSide,
}

impl SlopeBoundary {
    /// Create a boundary.
    #[must_use]
    pub const fn new(x_left: f32, y_top: f32, y_move_scale: f32, side: SlopeSide) -> Self {
        Self {
            x_left,
            y_top,
            y_move_scale,
            side,
        }
    }

    /// Whether the pointer lies beyond the line.
    #[must_use]
    pub fn contains(&self, sample: PointerSample) -> bool {
        if sample.x <= self.x_left {
            return false;
        }
        let rise = (sample.x - self.x_left) * self.y_move_scale;
        match self.side {
            SlopeSide::Above => sample.y > self.y_top + rise,
            SlopeSide::Below => sample.y < self.y_top - rise,
        }
    }

    fn is_finite(&self) -> bool {
        self.x_left.is_finite() && self.y_top.is_finite() && self.y_move_scale.is_finite()
    }
}

/// Which end of a seam a tapering region sits at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeamEnd {
    /// Seam on the top edge: the size grows from 0 at the top (factor `delta`)
    Near,
    /// Seam on the bottom edge: the size shrinks to 0 at the bottom (factor `1 - delta`)
    Far,
}

impl SeamEnd {
    /// Scale factor for a taper delta.
    #[must_use]
    pub fn factor(&self, delta: f32) -> f32 {
        match self {
            Self::Near => delta,
            Self::Far => 1.0 - delta,
        }
    }
}

/// A correction rule attached to a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionRule {
    /// Shrink one axis of the decal as the pointer approaches a seam.
    SizeTaper {
        /// Rectangle in pointer space
        bounds: Bounds,
        /// Decal size axis to scale
        axis: Axis,
        /// Seam position
        end: SeamEnd,
    },
    /// Replace the decal orientation beyond a sloped boundary.
    LimbLock {
        /// Sloped boundary
        boundary: SlopeBoundary,
        /// Orientation to apply
        angles: Euler,
    },
    /// Pin the contact point to a limb centerline beyond a sloped boundary.
    SeamRealign {
        /// Sloped boundary
        boundary: SlopeBoundary,
        /// Realignment stops at this pointer X
        x_right: f32,
        /// Centerline anchors in world space
        anchors: AnchorLine,
    },
}

impl RegionRule {
    /// Whether this rule fires for the sample.
    #[must_use]
    pub fn applies_to(&self, sample: PointerSample) -> bool {
        match self {
            Self::SizeTaper { bounds, .. } => bounds.contains(sample),
            Self::LimbLock { boundary, .. } | Self::SeamRealign { boundary, .. } => {
                boundary.contains(sample)
            }
        }
    }

    /// Short rule name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SizeTaper { .. } => "size_taper",
            Self::LimbLock { .. } => "limb_lock",
            Self::SeamRealign { .. } => "seam_realign",
        }
    }
}

/// A body region with its correction rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region identifier.
    pub id: RegionId,
    /// Correction applied inside the region.
    pub rule: RegionRule,
}

impl Region {
    /// Create a new region.
    #[must_use]
    pub fn new(id: RegionId, rule: RegionRule) -> Self {
        Self { id, rule }
    }

    /// Tapering rectangle region.
    #[must_use]
    pub fn taper(id: RegionId, bounds: Bounds, end: SeamEnd) -> Self {
        Self::new(
            id,
            RegionRule::SizeTaper {
                bounds,
                axis: Axis::Y,
                end,
            },
        )
    }

    /// Check if the region's rule fires for a pointer sample.
    #[must_use]
    pub fn applies_to(&self, sample: PointerSample) -> bool {
        self.rule.applies_to(sample)
    }

    /// Reject tables that would produce NaN or divide by zero per frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.rule {
            RegionRule::SizeTaper { bounds, .. } => bounds.validate(self.id),
            RegionRule::LimbLock { boundary, angles } => {
                if !boundary.is_finite() || !angles.is_finite() {
                    return Err(ConfigError::NonFinite {
                        context: self.id.as_str().to_owned(),
                        field: "limb_lock",
                    });
                }
                Ok(())
            }
            RegionRule::SeamRealign {
                boundary,
                x_right,
                anchors,
            } => {
                if !boundary.is_finite() || !x_right.is_finite() || !anchors.is_finite() {
                    return Err(ConfigError::NonFinite {
                        context: self.id.as_str().to_owned(),
                        field: "seam_realign",
                    });
                }
                if anchors.is_degenerate() {
                    return Err(ConfigError::DegenerateAnchors {
                        region: self.id.as_str().to_owned(),
                        x: anchors.start[0],
                    });
                }
                Ok(())
            }
        }
    }
}

/// Ordered table of correction regions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    /// Create a table from regions in evaluation order.
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// The table tuned for the stock humanoid model viewed from the front.
    #[must_use]
    pub fn standard() -> Self {
        let upper_arm = SlopeBoundary::new(-0.48, 0.125, 0.3, SlopeSide::Above);
        let lower_arm = SlopeBoundary::new(-0.48, -0.33, 0.3, SlopeSide::Below);

        let regions = vec![
            Region::taper(
                RegionId::UpperLeg,
                Bounds::new(0.0, 0.25, 0.0, -0.085),
                SeamEnd::Far,
            ),
            Region::taper(
                RegionId::BottomLeg,
                Bounds::new(0.0, 0.25, -0.09, -0.2),
                SeamEnd::Near,
            ),
            Region::taper(
                RegionId::UpperBody,
                Bounds::new(-0.48, -0.31, 0.13, 0.03),
                SeamEnd::Near,
            ),
            Region::taper(
                RegionId::LowerBody,
                Bounds::new(-0.48, -0.31, -0.25, -0.34),
                SeamEnd::Far,
            ),
            Region::new(
                RegionId::UpperArm,
                RegionRule::LimbLock {
                    boundary: upper_arm,
                    angles: Euler::from_degrees(-10.0, 0.0, 40.0),
                },
            ),
            Region::new(
                RegionId::UpperArm,
                RegionRule::SeamRealign {
                    boundary: upper_arm,
                    x_right: -0.12,
                    anchors: AnchorLine::new(-30.0, 7.0, -24.0, 9.6),
                },
            ),
            Region::new(
                RegionId::LowerArm,
                RegionRule::LimbLock {
                    boundary: lower_arm,
                    angles: Euler::from_degrees(10.0, 0.0, -40.0),
                },
            ),
            Region::new(
                RegionId::LowerArm,
                RegionRule::SeamRealign {
                    boundary: lower_arm,
                    x_right: -0.12,
                    anchors: AnchorLine::new(-30.0, -15.0, -23.0, -17.0),
                },
            ),
        ];

        Self { regions }
    }

    /// Validate every region.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.regions.iter().try_for_each(Region::validate)
    }

    /// Regions whose rule fires for the sample, in table order.
    pub fn matching(&self, sample: PointerSample) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.applies_to(sample))
    }

    /// First region whose rule fires for the sample.
    #[must_use]
    pub fn find_region(&self, sample: PointerSample) -> Option<&Region> {
        self.matching(sample).next()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True for an empty table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

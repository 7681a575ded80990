//! Target placement zones.
//!
//! A zone is a reference point plus an acceptance radius. Declaration order
//! is meaningful: it is the tie-break when zones overlap.

use serde::{Deserialize, Serialize};

use padsense_core::geometry::{distance_2d, distance_3d};
use padsense_core::{ConfigError, Vec3};

/// Coordinate space a zone is measured in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSpace {
    /// Compare world X/Y only (screen-facing placement)
    #[default]
    Planar,
    /// Compare full world X/Y/Z
    Spatial,
}

/// A correct placement for the pad.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetZone {
    /// Zone name.
    pub name: String,
    /// Canonical pad position; also the snap point.
    pub reference: Vec3,
    /// Acceptance radius in world units.
    pub radius: f32,
    /// Distance metric.
    #[serde(default)]
    pub space: ZoneSpace,
}

impl TargetZone {
    /// Create a planar zone.
    #[must_use]
    pub fn new(name: impl Into<String>, reference: Vec3, radius: f32) -> Self {
        Self {
            name: name.into(),
            reference,
            radius,
            space: ZoneSpace::Planar,
        }
    }

    /// Switch the distance metric.
    #[must_use]
    pub fn with_space(mut self, space: ZoneSpace) -> Self {
        self.space = space;
        self
    }

    /// Distance from a world point to the reference point.
    #[must_use]
    pub fn distance_to(&self, point: &Vec3) -> f32 {
        match self.space {
            ZoneSpace::Planar => distance_2d(
                [point.x, point.y],
                [self.reference.x, self.reference.y],
            ),
            ZoneSpace::Spatial => distance_3d(point, &self.reference),
        }
    }

    /// Strictly inside the acceptance radius.
    #[must_use]
    pub fn accepts(&self, point: &Vec3) -> bool {
        self.distance_to(point) < self.radius
    }

    /// Check the zone can be evaluated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reference.is_finite() || !self.radius.is_finite() {
            return Err(ConfigError::NonFinite {
                context: self.name.clone(),
                field: "reference/radius",
            });
        }
        if self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius {
                zone: self.name.clone(),
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// The fixed set of zones for a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetZoneSet {
    zones: Vec<TargetZone>,
}

impl TargetZoneSet {
    /// Create a set in priority order.
    #[must_use]
    pub fn new(zones: Vec<TargetZone>) -> Self {
        Self { zones }
    }

    /// Electrode placements for the stock model, radius 5.
    #[must_use]
    pub fn standard() -> Self {
        const RADIUS: f32 = 5.0;
        Self::new(vec![
            TargetZone::new("top_biceps", Vec3::new(-24.0, 10.0, 1.0), RADIUS),
            TargetZone::new("bottom_biceps", Vec3::new(-24.0, -16.5, 0.8), RADIUS),
            TargetZone::new("top_side", Vec3::new(-17.0, 1.0, 4.0), RADIUS),
            TargetZone::new("bottom_side", Vec3::new(-17.0, -7.5, 4.0), RADIUS),
        ])
    }

    /// Validate every zone and reject duplicate names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, zone) in self.zones.iter().enumerate() {
            zone.validate()?;
            if self.zones[..i].iter().any(|z| z.name == zone.name) {
                return Err(ConfigError::DuplicateZone {
                    zone: zone.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Zone by declaration index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TargetZone> {
        self.zones.get(index)
    }

    /// Zone by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&TargetZone> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Zones in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetZone> {
        self.zones.iter()
    }

    /// Number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True for an empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance_ignores_depth() {
        let zone = TargetZone::new("top_biceps", Vec3::new(-24.0, 10.0, 1.0), 5.0);
        let d = zone.distance_to(&Vec3::new(-24.0, 13.0, 40.0));
        assert!((d - 3.0).abs() < 1e-5);
        assert!(zone.accepts(&Vec3::new(-24.0, 13.0, 40.0)));
    }

    #[test]
    fn test_spatial_distance() {
        let zone = TargetZone::new("z", Vec3::new(0.0, 0.0, 0.0), 5.0).with_space(ZoneSpace::Spatial);
        assert!((zone.distance_to(&Vec3::new(0.0, 3.0, 4.0)) - 5.0).abs() < 1e-5);
        // Exactly on the radius is outside
        assert!(!zone.accepts(&Vec3::new(0.0, 3.0, 4.0)));
    }

    #[test]
    fn test_standard_zones() {
        let zones = TargetZoneSet::standard();
        assert_eq!(zones.len(), 4);
        assert!(zones.validate().is_ok());
        assert_eq!(zones.get(0).unwrap().name, "top_biceps");
        assert!(zones.find("bottom_side").is_some());
    }

    #[test]
    fn test_validation() {
        let bad_radius = TargetZoneSet::new(vec![TargetZone::new("a", Vec3::zero(), 0.0)]);
        assert!(matches!(
            bad_radius.validate(),
            Err(ConfigError::InvalidRadius { .. })
        ));

        let duplicate = TargetZoneSet::new(vec![
            TargetZone::new("a", Vec3::zero(), 1.0),
            TargetZone::new("a", Vec3::new(1.0, 0.0, 0.0), 1.0),
        ]);
        assert!(matches!(
            duplicate.validate(),
            Err(ConfigError::DuplicateZone { .. })
        ));

        let nan = TargetZoneSet::new(vec![TargetZone::new("a", Vec3::new(f32::NAN, 0.0, 0.0), 1.0)]);
        assert!(matches!(nan.validate(), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn test_serde_default_space() {
        let zone: TargetZone = serde_json::from_str(
            r#"{"name":"top_side","reference":{"x":-17.0,"y":1.0,"z":4.0},"radius":5.0}"#,
        )
        .unwrap();
        assert_eq!(zone.space, ZoneSpace::Planar);
    }
}

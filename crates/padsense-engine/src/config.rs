//! Engine configuration and presets.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use padsense_engine::config::{ConfigPreset, EngineConfig};
//! use padsense_engine::MatchPolicy;
//!
//! let config = EngineConfig::from_preset(ConfigPreset::Standard)
//!     .with_match_policy(MatchPolicy::Nearest)
//!     .with_resolve_delay(Duration::from_millis(500));
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use padsense_core::{ConfigError, Vec3};
use padsense_mesh::{RegionTable, TargetZone, TargetZoneSet};

use crate::feedback::FeedbackPolicy;
use crate::matcher::MatchPolicy;

/// Ready-made configurations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigPreset {
    /// Standard tables, first-match zones, chin glow anchor.
    #[default]
    Standard,
    /// Standard tables with one glow anchor per zone.
    MultiAnchorGlow,
    /// Wider zones matched by distance, shorter resolve delay.
    Lenient,
}

impl ConfigPreset {
    /// Acceptance radius used by the preset's zones.
    #[must_use]
    pub const fn zone_radius(&self) -> f32 {
        match self {
            Self::Standard | Self::MultiAnchorGlow => 5.0,
            Self::Lenient => 7.5,
        }
    }

    /// Delay before the outcome overlay.
    #[must_use]
    pub const fn resolve_delay_ms(&self) -> u64 {
        match self {
            Self::Standard | Self::MultiAnchorGlow => 2000,
            Self::Lenient => 1000,
        }
    }
}

/// Everything the interaction engine reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Full extents of the pad projection box before correction.
    pub nominal_size: Vec3,
    /// Seam correction regions, in evaluation order.
    pub regions: RegionTable,
    /// Target zones, in priority order.
    pub zones: TargetZoneSet,
    /// Zone overlap resolution.
    pub match_policy: MatchPolicy,
    /// Glow policy.
    pub feedback: FeedbackPolicy,
    /// Delay between commit and the outcome overlay.
    pub resolve_delay: Duration,
}

impl EngineConfig {
    /// Standard pad, tables and timings.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            nominal_size: Vec3::new(5.0, 7.0, 10.0),
            regions: RegionTable::standard(),
            zones: TargetZoneSet::standard(),
            match_policy: MatchPolicy::FirstMatch,
            feedback: FeedbackPolicy::chin_anchor(),
            resolve_delay: Duration::from_millis(ConfigPreset::Standard.resolve_delay_ms()),
        }
    }

    /// Build a configuration from a preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        let mut config = Self::standard();
        config.resolve_delay = Duration::from_millis(preset.resolve_delay_ms());

        match preset {
            ConfigPreset::Standard => {}
            ConfigPreset::MultiAnchorGlow => {
                config.feedback = FeedbackPolicy::zone_anchors();
            }
            ConfigPreset::Lenient => {
                let radius = preset.zone_radius();
                config.zones = TargetZoneSet::new(
                    config
                        .zones
                        .iter()
                        .map(|z| TargetZone {
                            radius,
                            ..z.clone()
                        })
                        .collect(),
                );
                config.match_policy = MatchPolicy::Nearest;
            }
        }

        config
    }

    /// Parse a JSON document. Missing fields take their standard values.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the nominal pad size.
    #[must_use]
    pub fn with_nominal_size(mut self, size: Vec3) -> Self {
        self.nominal_size = size;
        self
    }

    /// Replace the region table.
    #[must_use]
    pub fn with_regions(mut self, regions: RegionTable) -> Self {
        self.regions = regions;
        self
    }

    /// Replace the zone set.
    #[must_use]
    pub fn with_zones(mut self, zones: TargetZoneSet) -> Self {
        self.zones = zones;
        self
    }

    /// Set the match policy.
    #[must_use]
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Set the feedback policy.
    #[must_use]
    pub fn with_feedback(mut self, feedback: FeedbackPolicy) -> Self {
        self.feedback = feedback;
        self
    }

    /// Set the resolve delay.
    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = delay;
        self
    }

    /// Check every table once, before the first frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = self.nominal_size;
        if !s.is_finite() || s.x <= 0.0 || s.y <= 0.0 || s.z <= 0.0 {
            return Err(ConfigError::InvalidDecalSize {
                x: s.x,
                y: s.y,
                z: s.z,
            });
        }
        self.regions.validate()?;
        self.zones.validate()?;
        self.feedback.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padsense_mesh::{Bounds, Region, RegionId, SeamEnd};

    #[test]
    fn test_standard_is_valid() {
        let config = EngineConfig::standard();
        assert!(config.validate().is_ok());
        assert_eq!(config.resolve_delay, Duration::from_secs(2));
        assert_eq!(config.regions.len(), 8);
        assert_eq!(config.zones.len(), 4);
    }

    #[test]
    fn test_presets() {
        for preset in [
            ConfigPreset::Standard,
            ConfigPreset::MultiAnchorGlow,
            ConfigPreset::Lenient,
        ] {
            assert!(EngineConfig::from_preset(preset).validate().is_ok());
        }

        let lenient = EngineConfig::from_preset(ConfigPreset::Lenient);
        assert!(lenient.zones.iter().all(|z| (z.radius - 7.5).abs() < 1e-6));
        assert_eq!(lenient.match_policy, MatchPolicy::Nearest);

        let glow = EngineConfig::from_preset(ConfigPreset::MultiAnchorGlow);
        assert!(matches!(glow.feedback, FeedbackPolicy::MultiAnchor { .. }));
    }

    #[test]
    fn test_zero_height_taper_rejected() {
        let config = EngineConfig::standard().with_regions(RegionTable::new(vec![Region::taper(
            RegionId::UpperLeg,
            Bounds::new(0.0, 0.25, 0.0, 0.0),
            SeamEnd::Far,
        )]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroHeightBounds { .. })
        ));
    }

    #[test]
    fn test_bad_nominal_size() {
        let config = EngineConfig::standard().with_nominal_size(Vec3::new(5.0, -1.0, 10.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDecalSize { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_and_partial() {
        let json = serde_json::to_string(&EngineConfig::standard()).unwrap();
        let parsed = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, EngineConfig::standard());

        let partial = EngineConfig::from_json_str(r#"{"match_policy":"nearest"}"#).unwrap();
        assert_eq!(partial.match_policy, MatchPolicy::Nearest);
        assert_eq!(partial.zones, TargetZoneSet::standard());
    }
}

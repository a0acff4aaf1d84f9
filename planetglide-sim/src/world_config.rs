//! JSON world description: the ordered waypoint list plus simulation tuning.

use std::fs;
use std::path::Path;

use planetglide_core::{SimConfig, WaypointDescriptor};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SimError;

/// Everything needed to build a [`crate::Game`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Waypoints in registration order; earlier entries win overlaps.
    #[serde(default)]
    pub waypoints: Vec<WaypointDescriptor>,
    #[serde(default)]
    pub sim: SimConfig,
}

impl WorldConfig {
    /// Load and validate a world file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let world = Self::from_json_str(&text)?;
        info!(
            "loaded {} waypoints from {}",
            world.waypoints.len(),
            path.display()
        );
        Ok(world)
    }

    /// Parse and validate a world description.
    pub fn from_json_str(text: &str) -> Result<Self, SimError> {
        let world: Self = serde_json::from_str(text)?;
        world.sim.validate()?;
        Ok(world)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use planetglide_core::{ConfigError, WaypointId};

    #[test]
    fn test_parse_waypoints_in_order() {
        let text = r#"{
            "waypoints": [
                { "id": 3, "direction": [1.0, 0.0, 0.0] },
                { "id": 1, "direction": [0.0, 0.0, 1.0] }
            ],
            "sim": { "seed": 5 }
        }"#;
        let world = WorldConfig::from_json_str(text).unwrap();
        assert_eq!(world.waypoints.len(), 2);
        assert_eq!(world.waypoints[0].id, WaypointId(3));
        assert_eq!(world.waypoints[1].direction, Vec3::Z);
        assert_eq!(world.sim.seed, Some(5));
    }

    #[test]
    fn test_missing_sections_default() {
        let world = WorldConfig::from_json_str("{}").unwrap();
        assert!(world.waypoints.is_empty());
        assert_eq!(world.sim, SimConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = WorldConfig::from_json_str(r#"{ "sim": { "planet": { "radius": -1.0 } } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::Config(ConfigError::NotPositive { .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = WorldConfig::from_json_str("{ waypoints: ").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WorldConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }

    #[test]
    fn test_pretty_json_reloads() {
        let world = WorldConfig {
            waypoints: vec![WaypointDescriptor::new(9, Vec3::new(0.0, -1.0, 0.0))],
            sim: SimConfig::default(),
        };
        let text = world.to_json_pretty().unwrap();
        assert_eq!(WorldConfig::from_json_str(&text).unwrap(), world);
    }
}

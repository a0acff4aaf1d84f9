//! Tuning knobs for the simulation.
//!
//! Every section deserializes with defaults for missing fields, so a config
//! file only needs to mention what it changes.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_finite, ensure_positive, ensure_range};

/// Fixed simulation step, in seconds.
pub const DEFAULT_TICK_SECONDS: f32 = 1.0 / 60.0;

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seconds advanced per tick before the pause gate is applied.
    pub tick_seconds: f32,
    pub planet: PlanetConfig,
    pub navigator: NavigatorConfig,
    pub camera: CameraConfig,
    pub waypoint: WaypointConfig,
    pub clouds: CloudConfig,
    pub particles: ParticleConfig,
    /// RNG seed for cloud placement and particle jitter. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_seconds: DEFAULT_TICK_SECONDS,
            planet: PlanetConfig::default(),
            navigator: NavigatorConfig::default(),
            camera: CameraConfig::default(),
            waypoint: WaypointConfig::default(),
            clouds: CloudConfig::default(),
            particles: ParticleConfig::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("tick_seconds", self.tick_seconds)?;
        self.planet.validate()?;
        self.navigator.validate()?;
        self.camera.validate()?;
        self.waypoint.validate()?;
        self.clouds.validate()?;
        self.particles.validate()
    }
}

/// The sphere everything lives on. It is always centered at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Radius of the surface the plane glides on.
    pub radius: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self { radius: 10.0 }
    }
}

impl PlanetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("planet.radius", self.radius)
    }
}

/// Locomotion constants for the controlled plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Forward speed in world units per second while thrusting.
    pub speed: f32,
    /// Turn rate in degrees per second at full turn intent.
    pub turn_rate_degrees: f32,
    /// Direction from the planet center where the plane starts.
    pub start_direction: Vec3,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            turn_rate_degrees: 120.0,
            start_direction: Vec3::Y,
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("navigator.speed", self.speed)?;
        ensure_finite("navigator.turn_rate_degrees", self.turn_rate_degrees)?;
        if self.start_direction.try_normalize().is_none() {
            return Err(ConfigError::DegenerateStartDirection);
        }
        Ok(())
    }
}

/// Chase camera placement relative to the plane's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance behind the plane, along its forward axis.
    pub view_distance: f32,
    /// Height above the plane, along its local up.
    pub view_height: f32,
    /// Pitch about the camera's local right; negative looks down.
    pub pitch_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        // Height and distance put the plane on the camera's line of sight.
        Self {
            view_distance: 5.0,
            view_height: 8.660_254,
            pitch_degrees: -60.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("camera.view_distance", self.view_distance)?;
        ensure_finite("camera.view_height", self.view_height)?;
        ensure_finite("camera.pitch_degrees", self.pitch_degrees)
    }
}

/// Waypoint collider shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    /// Radius of each waypoint's trigger sphere.
    pub collider_radius: f32,
    /// How far the trigger sphere is lifted off the surface along the radial.
    pub lift: f32,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            collider_radius: 2.0,
            lift: 0.5,
        }
    }
}

impl WaypointConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("waypoint.collider_radius", self.collider_radius)?;
        ensure_finite("waypoint.lift", self.lift)
    }
}

/// Cloud obstacle placement, animation and dispersal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Number of clouds scattered at random when `directions` is empty.
    pub count: usize,
    /// Explicit cloud placements as directions from the planet center.
    pub directions: Vec<Vec3>,
    /// Height of the cloud layer above the planet surface.
    pub altitude: f32,
    /// Base collider radius, multiplied by the current scale.
    pub collider_radius: f32,
    /// Base render scale.
    pub scale: f32,
    /// Altitude swing of the breathing motion.
    pub pulse_amplitude: f32,
    /// Relative scale swing of the breathing motion.
    pub pulse_scale: f32,
    /// Breathing frequency in radians per second.
    pub pulse_speed: f32,
    /// Orbital drift about each cloud's own axis, degrees per second.
    pub drift_degrees_per_second: f32,
    /// Seconds between drift direction flips.
    pub drift_flip_seconds: f32,
    /// Seconds a dispersed cloud stays intangible.
    pub cooldown_seconds: f32,
    pub dispersal: DispersalConfig,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            count: 12,
            directions: Vec::new(),
            altitude: 2.0,
            collider_radius: 1.5,
            scale: 1.0,
            pulse_amplitude: 0.25,
            pulse_scale: 0.1,
            pulse_speed: 1.5,
            drift_degrees_per_second: 6.0,
            drift_flip_seconds: 8.0,
            cooldown_seconds: 5.0,
            dispersal: DispersalConfig::default(),
        }
    }
}

impl CloudConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("clouds.altitude", self.altitude)?;
        ensure_positive("clouds.collider_radius", self.collider_radius)?;
        ensure_positive("clouds.scale", self.scale)?;
        ensure_finite("clouds.pulse_amplitude", self.pulse_amplitude)?;
        ensure_finite("clouds.pulse_scale", self.pulse_scale)?;
        ensure_finite("clouds.pulse_speed", self.pulse_speed)?;
        ensure_finite("clouds.drift_degrees_per_second", self.drift_degrees_per_second)?;
        ensure_positive("clouds.drift_flip_seconds", self.drift_flip_seconds)?;
        ensure_positive("clouds.cooldown_seconds", self.cooldown_seconds)?;
        if let Some(index) = self
            .directions
            .iter()
            .position(|d| d.try_normalize().is_none())
        {
            return Err(ConfigError::DegenerateCloud(index));
        }
        if self.pulse_amplitude.abs() >= self.altitude {
            return Err(ConfigError::InvalidRange {
                field: "clouds.pulse_amplitude",
                min: self.pulse_amplitude.abs(),
                max: self.altitude,
            });
        }
        if self.pulse_scale.abs() >= 1.0 {
            return Err(ConfigError::InvalidRange {
                field: "clouds.pulse_scale",
                min: self.pulse_scale.abs(),
                max: 1.0,
            });
        }
        self.dispersal.validate()
    }
}

/// Particle burst spawned when a cloud disperses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispersalConfig {
    pub min_particles: u32,
    pub max_particles: u32,
    /// Maximum tilt away from the outward direction, in degrees.
    pub spread_degrees: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Uniform particle scale.
    pub particle_scale: f32,
    /// Particle lifetime in seconds.
    pub particle_duration: f32,
    /// RGBA particle color.
    pub color: Vec4,
}

impl Default for DispersalConfig {
    fn default() -> Self {
        Self {
            min_particles: 3,
            max_particles: 5,
            spread_degrees: 40.0,
            min_speed: 2.0,
            max_speed: 4.0,
            particle_scale: 0.25,
            particle_duration: 1.0,
            color: Vec4::ONE,
        }
    }
}

impl DispersalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_range(
            "clouds.dispersal.particles",
            self.min_particles as f32,
            self.max_particles as f32,
        )?;
        ensure_finite("clouds.dispersal.spread_degrees", self.spread_degrees)?;
        ensure_positive("clouds.dispersal.min_speed", self.min_speed)?;
        ensure_positive("clouds.dispersal.max_speed", self.max_speed)?;
        ensure_range("clouds.dispersal.speed", self.min_speed, self.max_speed)?;
        ensure_positive("clouds.dispersal.particle_scale", self.particle_scale)?;
        ensure_positive("clouds.dispersal.particle_duration", self.particle_duration)
    }
}

/// Particle pool sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of instance slots reserved up front.
    pub capacity: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self { capacity: 500 }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::EmptyParticlePool);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut config = SimConfig::default();
        config.planet.radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "planet.radius",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_cloud_layer_at_center() {
        let mut config = SimConfig::default();
        config.clouds.altitude = 0.5;
        config.clouds.pulse_amplitude = 0.6;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_particle_range() {
        let mut config = SimConfig::default();
        config.clouds.dispersal.min_particles = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_pool_and_zero_start() {
        let mut config = SimConfig::default();
        config.particles.capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyParticlePool));

        let mut config = SimConfig::default();
        config.navigator.start_direction = Vec3::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::DegenerateStartDirection));
    }

    #[test]
    fn test_rejects_zero_cloud_direction() {
        let mut config = SimConfig::default();
        config.clouds.directions = vec![Vec3::X, Vec3::ZERO];
        assert_eq!(config.validate(), Err(ConfigError::DegenerateCloud(1)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "planet": { "radius": 25.0 }, "clouds": { "count": 3 }, "seed": 7 }"#;
        let config: SimConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.planet.radius, 25.0);
        assert_eq!(config.clouds.count, 3);
        assert_eq!(config.clouds.cooldown_seconds, 5.0);
        assert_eq!(config.particles.capacity, 500);
        assert_eq!(config.seed, Some(7));
    }
}

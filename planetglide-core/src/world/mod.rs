//! The planet, its waypoints and its clouds.
//!
//! The world answers two questions each tick: which waypoint (if any) the
//! plane is inside, and which clouds it just flew through. Struck clouds ask
//! the [`ParticleEngine`] for a small burst of debris.

pub mod cloud;

pub use cloud::Cloud;

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collider::Sphere;
use crate::config::{DispersalConfig, SimConfig};
use crate::error::ConfigError;
use crate::math::{degrees_to_radians, orthogonal_vector};
use crate::particles::{InstanceTransform, ParticleEngine};
use crate::waypoint::{Waypoint, WaypointDescriptor};

/// Owns the planet sphere, the waypoint set and the cloud set.
#[derive(Debug)]
pub struct World {
    planet: Sphere,
    waypoints: Vec<Waypoint>,
    clouds: Vec<Cloud>,
    dispersal: DispersalConfig,
    rng: SmallRng,
}

impl World {
    /// Build the world from validated configuration and an ordered waypoint list.
    ///
    /// Clouds are placed over `config.clouds.directions` when given, otherwise
    /// `config.clouds.count` of them are scattered at random.
    pub fn new(config: &SimConfig, waypoints: &[WaypointDescriptor]) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let radius = config.planet.radius;
        let waypoints = waypoints
            .iter()
            .map(|d| Waypoint::new(d, radius, &config.waypoint))
            .collect::<Result<Vec<_>, _>>()?;

        let directions: Vec<Vec3> = if config.clouds.directions.is_empty() {
            (0..config.clouds.count)
                .map(|_| random_direction(&mut rng))
                .collect()
        } else {
            config
                .clouds
                .directions
                .iter()
                .map(|d| d.normalize())
                .collect()
        };

        let clouds = directions
            .into_iter()
            .map(|direction| {
                let roll = rng.gen_range(0.0..TAU);
                let drift_axis = Quat::from_axis_angle(direction, roll) * orthogonal_vector(direction);
                let phase = rng.gen_range(0.0..TAU);
                Cloud::new(direction, drift_axis, phase, radius, &config.clouds)
            })
            .collect::<Vec<_>>();

        info!(
            "world built: radius {}, {} waypoints, {} clouds",
            radius,
            waypoints.len(),
            clouds.len()
        );

        Ok(Self {
            planet: Sphere::new(Vec3::ZERO, radius),
            waypoints,
            clouds,
            dispersal: config.clouds.dispersal.clone(),
            rng,
        })
    }

    pub fn planet(&self) -> &Sphere {
        &self.planet
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    /// The waypoint whose zone contains a unit collider at `position`.
    ///
    /// Every waypoint's hit state is refreshed, in insertion order, so entry
    /// edges stay correct for all of them. When zones overlap, the first
    /// registered one wins.
    pub fn current_waypoint(&mut self, position: Vec3) -> Option<&Waypoint> {
        let probe = Sphere::unit(position);
        let mut first = None;

        for (index, waypoint) in self.waypoints.iter_mut().enumerate() {
            if waypoint.is_colliding(&probe) && first.is_none() {
                first = Some(index);
            }
        }

        first.map(|index| &self.waypoints[index])
    }

    /// Advance every cloud one tick against a unit collider at `object_position`.
    ///
    /// Struck clouds disperse and spawn a burst into `particles`. Returns the
    /// indices of clouds dispersed on this tick.
    pub fn update_clouds(
        &mut self,
        object_position: Vec3,
        dt: f32,
        particles: &mut ParticleEngine,
    ) -> Vec<usize> {
        let probe = Sphere::unit(object_position);
        let mut dispersed = Vec::new();

        for index in 0..self.clouds.len() {
            if !self.clouds[index].update(dt, &probe) {
                continue;
            }

            let origin = self.clouds[index].position();
            let outward = (origin - object_position)
                .try_normalize()
                .unwrap_or_else(|| self.clouds[index].direction());
            let spawned = self.spawn_burst(origin, outward, particles);
            debug!("cloud {} dispersed, {} particles", index, spawned);
            dispersed.push(index);
        }

        dispersed
    }

    /// Render transforms for every cloud slot; dispersed clouds are hidden.
    pub fn cloud_transforms(&self) -> impl Iterator<Item = InstanceTransform> + '_ {
        self.clouds.iter().map(Cloud::transform)
    }

    /// Spawn debris flying away from the plane, each piece tilted off
    /// `outward` by a random angle within the configured spread.
    fn spawn_burst(&mut self, origin: Vec3, outward: Vec3, particles: &mut ParticleEngine) -> usize {
        let config = &self.dispersal;
        let count = self
            .rng
            .gen_range(config.min_particles..=config.max_particles);
        let spread = degrees_to_radians(config.spread_degrees).abs();
        let perpendicular = orthogonal_vector(outward);

        let mut spawned = 0;
        for _ in 0..count {
            let roll = self.rng.gen_range(0.0..TAU);
            let tilt_axis = Quat::from_axis_angle(outward, roll) * perpendicular;
            let tilt = self.rng.gen_range(-spread..=spread);
            let direction = Quat::from_axis_angle(tilt_axis, tilt) * outward;
            let speed = self.rng.gen_range(config.min_speed..=config.max_speed);

            if particles
                .spawn(
                    origin,
                    direction * speed,
                    Vec3::splat(config.particle_scale),
                    config.color,
                    config.particle_duration,
                )
                .is_some()
            {
                spawned += 1;
            }
        }
        spawned
    }
}

/// Uniformly distributed unit vector.
fn random_direction(rng: &mut SmallRng) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

//! Cloud obstacles drifting above the planet surface.

use glam::{Quat, Vec3, Vec4};

use crate::collider::Sphere;
use crate::config::CloudConfig;
use crate::math::{degrees_to_radians, orthogonal_vector, shortest_arc_rotation};
use crate::particles::InstanceTransform;
use crate::timer::Timer;

/// A cloud that breathes, drifts, and scatters when the plane flies into it.
///
/// A cloud is either idle (animating and solid) or dispersed (frozen,
/// invisible and intangible until its cooldown runs out).
#[derive(Debug, Clone)]
pub struct Cloud {
    /// Unit direction from the planet center; drifts over time.
    direction: Vec3,
    /// Axis the direction orbits around. Perpendicular to `direction`.
    drift_axis: Vec3,
    drift_sign: f32,
    drift_timer: Timer,
    drift_rate: f32,
    phase: f32,
    layer_radius: f32,
    pulse_amplitude: f32,
    pulse_scale: f32,
    pulse_speed: f32,
    base_scale: f32,
    base_collider_radius: f32,
    position: Vec3,
    scale: f32,
    collider: Sphere,
    dispersed: bool,
    cooldown: Timer,
}

impl Cloud {
    /// Create a cloud over `direction`, orbiting about `drift_axis`.
    ///
    /// Both vectors are expected to be unit length; `drift_axis` is
    /// re-orthogonalized against `direction`.
    pub fn new(
        direction: Vec3,
        drift_axis: Vec3,
        phase: f32,
        planet_radius: f32,
        config: &CloudConfig,
    ) -> Self {
        let drift_axis = (drift_axis - direction * drift_axis.dot(direction))
            .try_normalize()
            .unwrap_or_else(|| orthogonal_vector(direction));

        let mut cloud = Self {
            direction,
            drift_axis,
            drift_sign: 1.0,
            drift_timer: Timer::new(config.drift_flip_seconds),
            drift_rate: degrees_to_radians(config.drift_degrees_per_second),
            phase,
            layer_radius: planet_radius + config.altitude,
            pulse_amplitude: config.pulse_amplitude,
            pulse_scale: config.pulse_scale,
            pulse_speed: config.pulse_speed,
            base_scale: config.scale,
            base_collider_radius: config.collider_radius,
            position: Vec3::ZERO,
            scale: config.scale,
            collider: Sphere::default(),
            dispersed: false,
            cooldown: Timer::new(config.cooldown_seconds),
        };
        cloud.refresh_pose();
        cloud
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit direction from the planet center.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn collider(&self) -> &Sphere {
        &self.collider
    }

    pub fn is_dispersed(&self) -> bool {
        self.dispersed
    }

    /// Fraction of the cooldown already served, `0` while idle.
    pub fn cooldown_progress(&self) -> f32 {
        if self.dispersed {
            self.cooldown.progress()
        } else {
            0.0
        }
    }

    /// Cloud stands upright on the sphere: local `+Y` along the radial.
    pub fn orientation(&self) -> Quat {
        shortest_arc_rotation(Vec3::Y, self.direction)
    }

    /// Render transform; hidden while dispersed.
    pub fn transform(&self) -> InstanceTransform {
        if self.dispersed {
            return InstanceTransform::hidden();
        }
        InstanceTransform::new(
            self.position,
            self.orientation(),
            Vec3::splat(self.scale),
            Vec4::ONE,
        )
    }

    /// Advance one tick against the plane's collider.
    ///
    /// Returns `true` when the cloud was struck on this tick.
    pub fn update(&mut self, dt: f32, object: &Sphere) -> bool {
        if self.dispersed {
            if self.cooldown.advance(dt) {
                self.dispersed = false;
            }
            return false;
        }

        self.animate(dt);

        if self.collider.intersects(object) {
            self.dispersed = true;
            self.cooldown.reset();
            return true;
        }

        false
    }

    fn animate(&mut self, dt: f32) {
        self.phase += dt;

        if self.drift_timer.advance(dt) {
            self.drift_sign = -self.drift_sign;
        }
        let drift = Quat::from_axis_angle(self.drift_axis, self.drift_sign * self.drift_rate * dt);
        self.direction = (drift * self.direction).normalize();

        self.refresh_pose();
    }

    fn refresh_pose(&mut self) {
        let pulse = (self.phase * self.pulse_speed).sin();
        self.position = self.direction * (self.layer_radius + self.pulse_amplitude * pulse);
        self.scale = self.base_scale * (1.0 + self.pulse_scale * pulse);
        self.collider = Sphere::new(self.position, self.base_collider_radius * self.scale);
    }
}

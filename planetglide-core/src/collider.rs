//! Bounding spheres used for every proximity test in the world.
//!
//! The planet itself, the plane, waypoints and clouds are all modelled as
//! spheres; nothing finer than sphere-sphere overlap is tested.

use glam::Vec3;

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center position in world space.
    pub center: Vec3,
    /// Radius in world units.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Unit-radius sphere centered on `center`, the collider used for the plane.
    pub fn unit(center: Vec3) -> Self {
        Self {
            center,
            radius: 1.0,
        }
    }

    /// Whether the two spheres overlap. Touching counts as overlapping.
    pub fn intersects(&self, other: &Sphere) -> bool {
        let radius_sum = self.radius + other.radius;
        self.center.distance_squared(other.center) <= radius_sum * radius_sum
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::unit(Vec3::ZERO)
    }
}

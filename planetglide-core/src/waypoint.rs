//! Points of interest on the planet surface.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collider::Sphere;
use crate::config::WaypointConfig;
use crate::error::ConfigError;
use crate::events::{EventSender, GameEvent, emit};

/// Opaque identity correlating a waypoint with an external project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(pub u32);

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A waypoint as supplied by configuration: an id and a direction from the
/// planet center. The direction is scaled to the planet radius at build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaypointDescriptor {
    pub id: WaypointId,
    pub direction: Vec3,
}

impl WaypointDescriptor {
    pub fn new(id: u32, direction: Vec3) -> Self {
        Self {
            id: WaypointId(id),
            direction,
        }
    }
}

/// A fixed trigger zone with edge-triggered entry detection.
#[derive(Debug, Clone)]
pub struct Waypoint {
    id: WaypointId,
    anchor: Vec3,
    collider: Sphere,
    previously_hit: bool,
    hit: bool,
}

impl Waypoint {
    /// Anchor a waypoint on a sphere of `planet_radius`.
    pub fn new(
        descriptor: &WaypointDescriptor,
        planet_radius: f32,
        config: &WaypointConfig,
    ) -> Result<Self, ConfigError> {
        let up = descriptor
            .direction
            .try_normalize()
            .ok_or(ConfigError::DegenerateWaypoint(descriptor.id))?;
        let anchor = up * planet_radius;

        Ok(Self {
            id: descriptor.id,
            anchor,
            collider: Sphere::new(anchor + up * config.lift, config.collider_radius),
            previously_hit: false,
            hit: false,
        })
    }

    pub fn id(&self) -> WaypointId {
        self.id
    }

    /// Surface point the waypoint is anchored to.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn collider(&self) -> &Sphere {
        &self.collider
    }

    /// Whether `other` overlapped the waypoint on the most recent check.
    pub fn hit(&self) -> bool {
        self.hit
    }

    /// True only on the check where the overlap began.
    pub fn just_hit(&self) -> bool {
        !self.previously_hit && self.hit
    }

    /// Test `other` against the trigger zone, shifting the previous result
    /// into `previously_hit` first. Returns the new overlap state.
    pub fn is_colliding(&mut self, other: &Sphere) -> bool {
        self.previously_hit = self.hit;
        self.hit = self.collider.intersects(other);
        self.hit
    }

    /// Ask the outside world to open the project behind this waypoint.
    pub fn open_associated_project(&self, events: &EventSender) {
        emit(events, GameEvent::ProjectOpened { id: self.id });
    }
}

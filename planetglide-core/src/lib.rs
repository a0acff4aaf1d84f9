//! Planetglide Core Crate
//!
//! Simulation core for a plane gliding over the surface of a small planet.
//! This crate is renderer-agnostic: it consumes abstract control intent and
//! produces positions, orientations and instance transforms.
//!
//! ## Modules
//!
//! - [`math`]: shortest-arc rotations and other orientation helpers
//! - [`timer`]: auto-resetting countdowns
//! - [`collider`]: bounding spheres
//! - [`navigator`]: locomotion on the sphere and the chase camera
//! - [`waypoint`]: edge-triggered points of interest
//! - [`world`]: planet, waypoints and cloud obstacles
//! - [`particles`]: fixed-capacity particle pool
//! - [`config`]: serde-backed tuning with validation

pub mod collider;
pub mod config;
pub mod error;
pub mod events;
pub mod math;
pub mod navigator;
pub mod particles;
pub mod timer;
pub mod waypoint;
pub mod world;

pub use collider::Sphere;
pub use config::SimConfig;
pub use error::ConfigError;
pub use events::{EventSender, GameEvent};
pub use navigator::{CameraPose, ControlIntent, LocalFrame, Navigator};
pub use particles::{InstanceTransform, ParticleEngine, ParticleHandle};
pub use timer::Timer;
pub use waypoint::{Waypoint, WaypointDescriptor, WaypointId};
pub use world::{Cloud, World};

//! Per-tick coordinator tying the navigator, world and particles together.

use planetglide_core::events::emit;
use planetglide_core::{
    EventSender, GameEvent, InstanceTransform, Navigator, ParticleEngine, SimConfig,
    WaypointDescriptor, WaypointId, World,
};
use tracing::{debug, info};

use crate::control::{ControlEvent, ControlState};
use crate::error::SimError;
use crate::snapshot::RenderSnapshot;
use crate::world_config::WorldConfig;

/// Owns one running simulation.
///
/// Ticks are fixed-step: each [`Game::tick`] advances by
/// `tick_seconds * time_scale`. Opening a project drops the time scale to
/// zero, so the world freezes in place until the project is closed.
#[derive(Debug)]
pub struct Game {
    config: SimConfig,
    navigator: Navigator,
    world: World,
    particles: ParticleEngine,
    controls: ControlState,
    time_scale: f32,
    current_waypoint: Option<WaypointId>,
    open_project: Option<WaypointId>,
    events: Option<EventSender>,
    cloud_buffer: Vec<InstanceTransform>,
    tick_count: u64,
}

impl Game {
    pub fn new(config: SimConfig, waypoints: &[WaypointDescriptor]) -> Result<Self, SimError> {
        let world = World::new(&config, waypoints)?;
        let navigator = Navigator::new(world.planet().radius, &config.navigator, &config.camera);
        let particles = ParticleEngine::new(config.particles.capacity);
        let cloud_buffer = world.cloud_transforms().collect();

        info!(
            "game ready: tick {:.4}s, particle capacity {}",
            config.tick_seconds, config.particles.capacity
        );

        Ok(Self {
            config,
            navigator,
            world,
            particles,
            controls: ControlState::default(),
            time_scale: 1.0,
            current_waypoint: None,
            open_project: None,
            events: None,
            cloud_buffer,
            tick_count: 0,
        })
    }

    pub fn from_world_config(world: WorldConfig) -> Result<Self, SimError> {
        Self::new(world.sim, &world.waypoints)
    }

    /// Set the channel that receives [`GameEvent`]s.
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Direct access for front ends that reposition the plane.
    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn particles(&self) -> &ParticleEngine {
        &self.particles
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Freeze or resume simulation time without touching any other state.
    pub fn set_paused(&mut self, paused: bool) {
        self.time_scale = if paused { 0.0 } else { 1.0 };
    }

    /// Waypoint the plane was inside as of the last tick.
    pub fn current_waypoint(&self) -> Option<WaypointId> {
        self.current_waypoint
    }

    pub fn open_project(&self) -> Option<WaypointId> {
        self.open_project
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn handle_control(&mut self, event: ControlEvent) {
        if self.controls.apply(event) {
            self.navigator.set_intent(self.controls.intent());
            return;
        }

        match event {
            ControlEvent::Interact => self.interact(),
            ControlEvent::CloseProject => self.close_project(),
            _ => {}
        }
    }

    /// Open the project behind the current waypoint and pause. Ignored when
    /// outside every waypoint or when a project is already open.
    pub fn interact(&mut self) {
        if self.open_project.is_some() {
            return;
        }
        let Some(id) = self.current_waypoint else {
            debug!("interact ignored: no waypoint in range");
            return;
        };

        if let Some(sender) = &self.events {
            if let Some(waypoint) = self.world.waypoints().iter().find(|w| w.id() == id) {
                waypoint.open_associated_project(sender);
            }
        }
        info!("project {} opened", id);
        self.open_project = Some(id);
        self.set_paused(true);
    }

    /// Close the open project, if any, and resume.
    pub fn close_project(&mut self) {
        let Some(id) = self.open_project.take() else {
            return;
        };
        info!("project {} closed", id);
        self.send(GameEvent::ProjectClosed);
        self.set_paused(false);
    }

    /// Run one fixed step.
    pub fn tick(&mut self) {
        let dt = self.config.tick_seconds * self.time_scale;

        self.navigator.update(dt);
        let position = self.navigator.position();

        let entered = self
            .world
            .current_waypoint(position)
            .map(|w| (w.id(), w.just_hit()));
        self.current_waypoint = entered.map(|(id, _)| id);
        if let Some((id, true)) = entered {
            debug!("entered waypoint {}", id);
            self.send(GameEvent::WaypointEntered { id });
        }

        let dispersed = self
            .world
            .update_clouds(position, dt, &mut self.particles);
        for cloud in dispersed {
            self.send(GameEvent::CloudDispersed { cloud });
        }

        self.particles.update(dt);

        self.cloud_buffer.clear();
        self.cloud_buffer.extend(self.world.cloud_transforms());

        self.tick_count += 1;
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            plane_position: self.navigator.position(),
            plane_orientation: self.navigator.orientation(),
            camera: self.navigator.camera(),
            clouds: &self.cloud_buffer,
            particles: self.particles.transforms(),
        }
    }

    fn send(&self, event: GameEvent) {
        if let Some(sender) = &self.events {
            emit(sender, event);
        }
    }
}

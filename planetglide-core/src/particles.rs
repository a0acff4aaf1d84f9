//! Fixed-capacity pool of short-lived particles.
//!
//! The pool owns one instance transform per slot. Free slots keep a
//! zero-scale transform so a renderer can upload the whole buffer every frame
//! without knowing which slots are live.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3, Vec4};
use tracing::{debug, trace};

use crate::timer::COMPLETION_TOLERANCE;

/// Per-instance render data, laid out for direct upload to an instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// RGBA color (linear, 0-1 range).
    pub color: [f32; 4],
}

impl InstanceTransform {
    /// Transform that renders nothing: zero scale at the origin.
    pub fn hidden() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ZERO, Vec4::ZERO)
    }

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3, color: Vec4) -> Self {
        Self {
            model: Mat4::from_scale_rotation_translation(scale, rotation, position)
                .to_cols_array_2d(),
            color: color.to_array(),
        }
    }

    /// Translation part of the model matrix.
    pub fn translation(&self) -> Vec3 {
        Vec3::from_slice(&self.model[3][..3])
    }

    /// Whether the transform collapses its mesh to nothing.
    pub fn is_hidden(&self) -> bool {
        Mat4::from_cols_array_2d(&self.model).determinant() == 0.0
    }
}

/// Stable reference to a live particle.
///
/// The generation changes every time a slot is reused, so a handle kept past
/// its particle's lifetime stops resolving instead of aliasing a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    slot: u32,
    generation: u32,
}

impl ParticleHandle {
    /// Index of the instance slot this particle renders into.
    pub fn slot(&self) -> usize {
        self.slot as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A live particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Direction of travel. Unit length after the first update.
    pub velocity: Vec3,
    /// Magnitude of the spawn velocity.
    pub speed: f32,
    pub scale: Vec3,
    pub color: Vec4,
    pub elapsed: f32,
    pub duration: f32,
    handle: ParticleHandle,
}

impl Particle {
    pub fn handle(&self) -> ParticleHandle {
        self.handle
    }

    /// Advance by `dt`. Returns `true` once the lifetime is used up.
    ///
    /// The first step moves by the full spawn velocity times its speed; after
    /// that the velocity is a unit direction, which reads as a sharp burst
    /// that settles into a steady drift.
    fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;

        if self.elapsed >= self.duration * (1.0 - COMPLETION_TOLERANCE) {
            return true;
        }

        self.position += self.velocity * self.speed * dt;
        self.velocity = self.velocity.normalize_or_zero();

        false
    }

    fn transform(&self) -> InstanceTransform {
        InstanceTransform::new(self.position, Quat::IDENTITY, self.scale, self.color)
    }
}

/// Fixed-capacity particle pool.
#[derive(Debug)]
pub struct ParticleEngine {
    particles: Vec<Particle>,
    transforms: Vec<InstanceTransform>,
    generations: Vec<u32>,
    /// Free slots, popped from the back; kept sorted descending so the lowest
    /// slot is reused first.
    free_slots: Vec<u32>,
    dropped_spawns: u64,
}

impl ParticleEngine {
    /// Create a pool with `capacity` slots, all hidden.
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            transforms: vec![InstanceTransform::hidden(); capacity],
            generations: vec![0; capacity],
            free_slots: (0..capacity as u32).rev().collect(),
            dropped_spawns: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.transforms.len()
    }

    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawns refused because every slot was taken.
    pub fn dropped_spawns(&self) -> u64 {
        self.dropped_spawns
    }

    /// Live particles, in spawn order except where expiry swapped them.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// One transform per slot; free slots are hidden.
    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    /// Look up a live particle. Stale handles resolve to `None`.
    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.particles.iter().find(|p| p.handle == handle)
    }

    /// Start a particle. Returns `None` and counts the drop when the pool is full.
    pub fn spawn(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        scale: Vec3,
        color: Vec4,
        duration: f32,
    ) -> Option<ParticleHandle> {
        let Some(slot) = self.free_slots.pop() else {
            self.dropped_spawns += 1;
            debug!(
                "particle pool full ({} slots), dropped spawn #{}",
                self.capacity(),
                self.dropped_spawns
            );
            return None;
        };

        let generation = self.generations[slot as usize].wrapping_add(1);
        self.generations[slot as usize] = generation;
        let handle = ParticleHandle { slot, generation };

        let particle = Particle {
            position,
            velocity,
            speed: velocity.length(),
            scale,
            color,
            elapsed: 0.0,
            duration,
            handle,
        };
        self.transforms[slot as usize] = particle.transform();
        self.particles.push(particle);

        trace!("spawned particle in slot {} (gen {})", slot, generation);
        Some(handle)
    }

    /// Advance every live particle, retiring the ones whose lifetime ran out.
    pub fn update(&mut self, dt: f32) {
        for i in (0..self.particles.len()).rev() {
            let particle = &mut self.particles[i];
            let slot = particle.handle.slot;

            if particle.advance(dt) {
                self.transforms[slot as usize] = InstanceTransform::hidden();
                self.particles.swap_remove(i);
                self.release_slot(slot);
            } else {
                self.transforms[slot as usize] = particle.transform();
            }
        }
    }

    /// Retire every particle at once.
    pub fn clear(&mut self) {
        for particle in self.particles.drain(..) {
            self.transforms[particle.handle.slot as usize] = InstanceTransform::hidden();
        }
        self.free_slots = (0..self.transforms.len() as u32).rev().collect();
    }

    fn release_slot(&mut self, slot: u32) {
        let at = self.free_slots.partition_point(|&s| s > slot);
        self.free_slots.insert(at, slot);
    }
}

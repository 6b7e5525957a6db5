use std::collections::BTreeMap;

use cadence_common::{EntityId, Transform};
use cadence_engine::{BoxError, InputState, Options, World};
use glam::{Quat, Vec3};
use serde::Serialize;

use crate::camera::FlyCamera;

/// Number of bodies placed by [`EntityWorld::demo`].
pub const DEMO_BODIES: u32 = 8;

/// A spinning body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub transform: Transform,
    /// Angular velocity, radians per second around each axis.
    pub spin: Vec3,
}

/// Small entity world driven by the engine loop.
///
/// Entities live in a `BTreeMap` so iteration order, and therefore the
/// state hash, is the same on every platform.
#[derive(Debug, Clone, Default)]
pub struct EntityWorld {
    entities: BTreeMap<EntityId, Body>,
    next_id: u32,
    tick: u64,
    sim_time: f64,
    camera: FlyCamera,
    populate_on_init: bool,
}

/// Snapshot of world counters, printed by the command-line runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub sim_time: f64,
    pub entities: usize,
    pub camera: [f32; 3],
    pub state_hash: u64,
}

impl EntityWorld {
    /// An empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// A world that places a ring of spinning bodies when initialised.
    pub fn demo() -> Self {
        Self {
            populate_on_init: true,
            ..Self::default()
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds, the sum of every step applied.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &BTreeMap<EntityId, Body> {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&Body> {
        self.entities.get(&id)
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    pub fn spawn(&mut self, transform: Transform, spin: Vec3) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Body { transform, spin });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Body> {
        self.entities.remove(&id)
    }

    /// Advance every body and the camera by `step` seconds.
    pub fn step(&mut self, step: f32) {
        self.tick += 1;
        self.sim_time += f64::from(step);
        for body in self.entities.values_mut() {
            let delta = Quat::from_scaled_axis(body.spin * step);
            body.transform.rotation = (delta * body.transform.rotation).normalize();
        }
        self.camera.update(step);
    }

    fn populate(&mut self) {
        for i in 0..DEMO_BODIES {
            let angle = i as f32 / DEMO_BODIES as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos() * 5.0, 0.0, angle.sin() * 5.0);
            let spin = Vec3::new(0.0, 0.5 + i as f32 * 0.25, 0.0);
            self.spawn(Transform::from_position(position), spin);
        }
    }

    /// FNV-1a over tick and every transform, in id order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= u64::from(b);
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.tick.to_le_bytes());
        for (id, body) in &self.entities {
            mix(&id.0.to_le_bytes());
            let t = &body.transform;
            for v in t.position.to_array() {
                mix(&v.to_le_bytes());
            }
            for v in t.rotation.to_array() {
                mix(&v.to_le_bytes());
            }
            for v in t.scale.to_array() {
                mix(&v.to_le_bytes());
            }
        }
        h
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            tick: self.tick,
            sim_time: self.sim_time,
            entities: self.entities.len(),
            camera: self.camera.position.to_array(),
            state_hash: self.state_hash(),
        }
    }
}

impl World for EntityWorld {
    fn init(&mut self, _options: &Options) -> Result<(), BoxError> {
        if self.populate_on_init && self.entities.is_empty() {
            self.populate();
        }
        tracing::info!(entities = self.entities.len(), "world ready");
        Ok(())
    }

    fn dispose(&mut self) {
        tracing::debug!(tick = self.tick, "world disposed");
    }

    fn handle_input(&mut self, input: &InputState) -> Result<(), BoxError> {
        self.camera.handle_input(input);
        Ok(())
    }

    fn update_logic(&mut self, step: f32) -> Result<(), BoxError> {
        self.step(step);
        Ok(())
    }
}

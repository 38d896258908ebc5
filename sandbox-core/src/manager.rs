//! Ownership of all bodies and the per-frame fixed-step drive.

use crate::barrier_set::BarrierSet;
use crate::body::{Body, BodyId};
use crate::codec::BodySnapshot;
use crate::config::{ConfigError, SimulationConfig};
use crate::diagnostics::ResolverStats;
use crate::integrator::integrate;
use crate::interaction::InteractionEngine;
use crate::resolver::BarrierResolver;
use crate::timestep::FixedStepAccumulator;
use glam::Vec2;

/// Owns every body and advances them in fixed steps.
///
/// Interaction (integrate, then relax) and barrier resolution each keep
/// their own accumulator, so the two passes can run at different cadences.
#[derive(Debug, Clone)]
pub struct BodyManager {
    bodies: Vec<Body>,
    next_id: u32,
    config: SimulationConfig,
    engine: InteractionEngine,
    resolver: BarrierResolver,
    interaction_clock: FixedStepAccumulator,
    collision_clock: FixedStepAccumulator,
    interaction_steps: u64,
    collision_steps: u64,
    stats: ResolverStats,
}

impl BodyManager {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            bodies: Vec::new(),
            next_id: 0,
            engine: InteractionEngine::new(config.interaction.clone()),
            resolver: BarrierResolver::new(config.resolver.clone()),
            interaction_clock: FixedStepAccumulator::with_step(config.fixed_step),
            collision_clock: FixedStepAccumulator::with_step(config.fixed_step),
            interaction_steps: 0,
            collision_steps: 0,
            stats: ResolverStats::new(),
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Add a body, assigning it a fresh id. Its current velocity is kept.
    pub fn spawn(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        body.id = id;
        body.tentative_next_position = body.position;
        body.last_step = self.config.fixed_step;

        self.bodies.push(body);
        id
    }

    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(index))
    }

    /// Cleanup pass: keep only bodies matching `keep`, preserving order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Body) -> bool,
    {
        self.bodies.retain(keep);
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Forward movement input to a body. Returns false for unknown ids.
    pub fn set_movement(&mut self, id: BodyId, direction: Vec2) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.set_movement(direction);
                true
            }
            None => false,
        }
    }

    /// Advance integration and interaction relaxation for this frame.
    pub fn tick(&mut self, frame_dt: f32) {
        let steps = self.interaction_clock.step(frame_dt);
        let dt = self.interaction_clock.get_max_step();

        for _ in 0..steps {
            for body in &mut self.bodies {
                integrate(body, &self.config.integrator, dt);
            }

            self.engine.relax(&mut self.bodies);
            self.interaction_steps += 1;

            log::trace!(
                "interaction step {} over {} bodies",
                self.interaction_steps,
                self.bodies.len()
            );
        }
    }

    /// Advance barrier resolution for this frame.
    pub fn resolve_collisions(&mut self, frame_dt: f32, barriers: &BarrierSet) {
        let steps = self.collision_clock.step(frame_dt);
        let dt = self.collision_clock.get_max_step();

        for _ in 0..steps {
            for body in &mut self.bodies {
                let report = self.resolver.resolve(body, barriers, dt);
                self.stats.record(&report);
            }

            self.collision_steps += 1;
        }
    }

    /// Fixed interaction steps run so far.
    pub fn step_count(&self) -> u64 {
        self.interaction_steps
    }

    /// Fixed resolution steps run so far.
    pub fn collision_step_count(&self) -> u64 {
        self.collision_steps
    }

    pub fn stats(&self) -> &ResolverStats {
        &self.stats
    }

    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(BodySnapshot::of).collect()
    }

    /// Mirror authoritative state onto a local body. Returns false for unknown ids.
    pub fn apply_snapshot(&mut self, snapshot: &BodySnapshot) -> bool {
        match self.get_mut(snapshot.id) {
            Some(body) => {
                snapshot.apply_to(body);
                true
            }
            None => false,
        }
    }
}

impl Default for BodyManager {
    fn default() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 0,
            engine: InteractionEngine::new(Default::default()),
            resolver: BarrierResolver::new(Default::default()),
            interaction_clock: FixedStepAccumulator::new(),
            collision_clock: FixedStepAccumulator::new(),
            interaction_steps: 0,
            collision_steps: 0,
            stats: ResolverStats::new(),
            config: SimulationConfig::default(),
        }
    }
}

use crate::barrier_set::BarrierSet;
use crate::config::{ConfigError, SimulationConfig};
use crate::manager::BodyManager;

/// Bodies plus the barriers they collide with.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub bodies: BodyManager,
    pub barriers: BarrierSet,
}

impl World {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            bodies: BodyManager::new(config)?,
            barriers: BarrierSet::new(),
        })
    }

    /// Advance one rendered frame: interaction, then barrier resolution.
    pub fn frame(&mut self, dt: f32) {
        self.bodies.tick(dt);
        self.bodies.resolve_collisions(dt, &self.barriers);
    }
}

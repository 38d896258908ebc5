//! Point-mass bodies and the components composed onto them.

use crate::timestep::FIXED_STEP;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Scale applied to `set_movement` input before it reaches the integrator.
pub const MOVEMENT_ACCELERATION: f32 = 8.0;

/// Stable identifier assigned by the `BodyManager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Which interaction rules apply to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Bonds with other solids, strongest repulsion.
    Solid,
    /// Mixes but never bonds.
    Fluid,
    /// Skips fluid mixing.
    Gas,
}

/// Per-step force accumulators. Zeroed after every integration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Forces {
    pub acceleration: Vec2,
    pub impulse: Vec2,
    pub player_acceleration: Vec2,
}

impl Forces {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Radial attachment points for solid-solid bonding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bonds {
    /// Radians.
    pub orientation: f32,
    pub count: u32,
    pub length: f32,
}

impl Bonds {
    pub fn new(count: u32, length: f32) -> Self {
        Self {
            orientation: 0.0,
            count,
            length,
        }
    }

    /// Unit direction of slot `i`: `orientation + i * 2π / count`.
    pub fn direction(&self, i: u32) -> Vec2 {
        let angle = self.orientation + i as f32 * TAU / self.count.max(1) as f32;
        Vec2::from_angle(angle)
    }

    pub fn directions(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.count).map(move |i| self.direction(i))
    }

    pub fn rotate(&mut self, by: f32) {
        self.orientation = (self.orientation + by).rem_euclid(TAU);
    }
}

impl Default for Bonds {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}

/// Barrier-contact memory carried between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceContact {
    pub stuck_to_surface: bool,
    pub has_default_side: bool,
    pub default_side: bool,
    /// Seconds since the default side was last confirmed.
    pub side_time: f32,
}

/// Hit points for damageable bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// A simulated point mass. Velocity is implicit: `position - previous_position`.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub phase: Phase,
    pub is_fixed: bool,

    pub position: Vec2,
    pub previous_position: Vec2,
    pub tentative_next_position: Vec2,
    /// Step size used by the previous integration, for frame-ratio compensation.
    pub last_step: f32,
    /// Displacement made this step that must not count as velocity. Added
    /// to the previous position when the step is committed.
    pub position_adjustment: Vec2,

    pub forces: Forces,
    pub bonds: Bonds,
    pub contact: SurfaceContact,
    pub health: Option<Health>,
}

impl Body {
    pub fn new(position: Vec2, phase: Phase) -> Self {
        Self {
            id: BodyId(0),
            phase,
            is_fixed: false,
            position,
            previous_position: position,
            tentative_next_position: position,
            last_step: FIXED_STEP,
            position_adjustment: Vec2::ZERO,
            forces: Forces::default(),
            bonds: Bonds::default(),
            contact: SurfaceContact::default(),
            health: None,
        }
    }

    pub fn solid(position: Vec2) -> Self {
        Self::new(position, Phase::Solid)
    }

    pub fn fluid(position: Vec2) -> Self {
        Self::new(position, Phase::Fluid)
    }

    pub fn gas(position: Vec2) -> Self {
        Self::new(position, Phase::Gas)
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn with_bonds(mut self, count: u32, length: f32) -> Self {
        self.bonds = Bonds::new(count, length);
        self
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.bonds.orientation = orientation;
        self
    }

    pub fn with_velocity(mut self, per_step: Vec2) -> Self {
        self.previous_position = self.position - per_step;
        self
    }

    pub fn with_health(mut self, max: f32) -> Self {
        self.health = Some(Health::new(max));
        self
    }

    pub fn is_solid(&self) -> bool {
        self.phase == Phase::Solid
    }

    pub fn is_gas(&self) -> bool {
        self.phase == Phase::Gas
    }

    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous_position
    }

    pub fn tentative_velocity(&self) -> Vec2 {
        self.tentative_next_position - self.position
    }

    /// Inject player-driven acceleration, consumed by the next integration.
    pub fn set_movement(&mut self, direction: Vec2) {
        self.forces.player_acceleration += direction * MOVEMENT_ACCELERATION;
    }

    pub fn apply_force(&mut self, acceleration: Vec2) {
        self.forces.acceleration += acceleration;
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.forces.impulse += impulse;
    }

    /// Move the body without imparting velocity.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.previous_position = position;
        self.tentative_next_position = position;
        self.position_adjustment = Vec2::ZERO;
    }

    /// World position of bond slot `i`, measured from `origin`.
    pub fn bond_point(&self, origin: Vec2, i: u32) -> Vec2 {
        origin + self.bonds.direction(i) * self.bonds.length
    }
}

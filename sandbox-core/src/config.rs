//! Simulation configuration.
//!
//! Tunables for each pass: step size, integrator friction, interaction
//! distances and strengths, and barrier-resolution margins.

use crate::timestep::FIXED_STEP;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected by `SimulationConfig::validate`.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("fixed step must be positive and finite, got {0}")]
    InvalidStep(f32),
    #[error("{name} must run at least one relaxation iteration")]
    ZeroIterations { name: &'static str },
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidDistance { name: &'static str, value: f32 },
    #[error("bond angle tolerance {tolerance} must be below the maximum bond angle {max}")]
    InvertedBondAngles { tolerance: f32, max: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed simulation step in seconds.
    pub fixed_step: f32,
    pub integrator: IntegratorConfig,
    pub interaction: InteractionConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratorConfig {
    /// Constant acceleration added to every free body each step.
    pub gravity: Vec2,
    /// Converts accumulated acceleration and impulse into displacement units.
    pub force_multiplier: f32,
    /// Per-axis velocity retention in free flight.
    pub free_friction: Vec2,
    /// Per-axis velocity retention after a step in contact with a barrier.
    pub stuck_friction: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Pairs farther apart than this are ignored.
    pub cutoff_radius: f32,
    /// Below this separation bodies are pushed directly apart.
    pub hard_knock_distance: f32,

    pub solid_iterations: u32,
    pub fluid_iterations: u32,
    pub gas_iterations: u32,

    /// Inverse-square repulsion coefficients by pair class.
    pub repulsion_solid: f32,
    pub repulsion_mixed: f32,
    pub repulsion_gas: f32,
    /// Cap on a single pair's repulsion magnitude.
    pub max_repulsion: f32,
    /// Converts the per-step repulsion displacement into acceleration.
    pub repulsion_scale: f32,

    /// Fraction of a neighbour's velocity blended in at zero separation.
    pub thickness: f32,

    /// Bond points closer than this attract.
    pub bond_keep_distance: f32,
    pub bond_strength: f32,
    /// Radians. Full bond strength below this deviation from anti-parallel.
    pub bond_angle_tolerance: f32,
    /// Radians. No bond strength at or beyond this deviation.
    pub bond_max_angle: f32,
    /// Fraction of the bond misalignment corrected per step.
    pub bond_rotation_rate: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Seconds before the remembered default side is re-derived.
    pub side_time_max: f32,
    /// Perpendicular distance at which a body counts as stuck to a barrier.
    pub contact_distance: f32,
    /// Distance the correction pass tries to keep from a crossed barrier.
    pub correction_margin: f32,
    /// Length of the probe used to find the unoccupied side of a barrier.
    pub probe_distance: f32,
    /// Radians. Shallower approaches keep their full speed when sliding.
    pub frictionless_angle: f32,
    /// Slow down steep approaches while sliding.
    pub angle_friction: bool,
    /// Displacement cap, in units per second.
    pub max_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_step: FIXED_STEP,
            integrator: IntegratorConfig::default(),
            interaction: InteractionConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            force_multiplier: 1.0,
            free_friction: Vec2::ONE,
            stuck_friction: Vec2::splat(0.5),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            cutoff_radius: 200.0,
            hard_knock_distance: 30.0,
            solid_iterations: 4,
            fluid_iterations: 10,
            gas_iterations: 2,
            repulsion_solid: 0.55,
            repulsion_mixed: 0.3,
            repulsion_gas: 0.15,
            max_repulsion: 0.01,
            repulsion_scale: 1000.0 * 1000.0,
            thickness: 0.05,
            bond_keep_distance: 12.0,
            bond_strength: 0.5,
            bond_angle_tolerance: 5f32.to_radians(),
            bond_max_angle: 45f32.to_radians(),
            bond_rotation_rate: 0.1,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            side_time_max: 0.25,
            contact_distance: 2.0,
            correction_margin: 2.0,
            probe_distance: 5.0,
            frictionless_angle: 50f32.to_radians(),
            angle_friction: true,
            max_speed: 1000.0 * 1000.0,
        }
    }
}

impl SimulationConfig {
    /// Screen-space sandbox: y grows downwards, so gravity points to +y.
    pub fn sandbox() -> Self {
        let mut config = Self::default();
        config.integrator.gravity = Vec2::new(0.0, 200.0);
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_step.is_finite() && self.fixed_step > 0.0) {
            return Err(ConfigError::InvalidStep(self.fixed_step));
        }

        let inter = &self.interaction;
        for (name, iterations) in [
            ("solid_iterations", inter.solid_iterations),
            ("fluid_iterations", inter.fluid_iterations),
            ("gas_iterations", inter.gas_iterations),
        ] {
            if iterations == 0 {
                return Err(ConfigError::ZeroIterations { name });
            }
        }

        for (name, value) in [
            ("cutoff_radius", inter.cutoff_radius),
            ("hard_knock_distance", inter.hard_knock_distance),
            ("bond_keep_distance", inter.bond_keep_distance),
            ("contact_distance", self.resolver.contact_distance),
            ("correction_margin", self.resolver.correction_margin),
            ("probe_distance", self.resolver.probe_distance),
            ("side_time_max", self.resolver.side_time_max),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidDistance { name, value });
            }
        }

        if inter.bond_angle_tolerance >= inter.bond_max_angle {
            return Err(ConfigError::InvertedBondAngles {
                tolerance: inter.bond_angle_tolerance,
                max: inter.bond_max_angle,
            });
        }

        Ok(())
    }
}

//! Pairwise relaxation between bodies.
//!
//! Each body relaxes against every other body for a class-dependent number
//! of iterations. Hard-knock separation, bonding and fluid mixing move the
//! body's tentative position directly; repulsion only accumulates and is
//! converted into acceleration once the body's pair loop is done.
//!
//! Both bodies of an overlapping pair see the overlap, so each takes half of
//! the push (all of it against a fixed body). The push is also recorded as a
//! position adjustment, which the resolver applies to the previous position
//! so separation does not turn into velocity.
//!
//! Bodies are relaxed in storage order and each one reads its neighbours'
//! tentative state as it stands at that moment, so results depend on body
//! order within a pass.

use crate::body::{Body, Bonds, Phase};
use crate::config::InteractionConfig;
use crate::geometry::{signed_angle, EPSILON};
use glam::Vec2;

/// Bond strength for a deviation `angle` from anti-parallel.
///
/// `1` up to `tolerance`, falling quadratically to `0` at `max_angle`.
pub fn bond_alignment(angle: f32, tolerance: f32, max_angle: f32) -> f32 {
    let angle = angle.abs();

    if angle <= tolerance {
        return 1.0;
    }

    if angle >= max_angle {
        return 0.0;
    }

    let t = (angle - tolerance) / (max_angle - tolerance);
    (1.0 - t) * (1.0 - t)
}

#[derive(Debug, Clone)]
pub struct InteractionEngine {
    config: InteractionConfig,
}

impl InteractionEngine {
    pub fn new(config: InteractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn iterations_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Solid => self.config.solid_iterations,
            Phase::Fluid => self.config.fluid_iterations,
            Phase::Gas => self.config.gas_iterations,
        }
        .max(1)
    }

    /// Run one step of relaxation over all bodies.
    pub fn relax(&self, bodies: &mut [Body]) {
        for i in 0..bodies.len() {
            if bodies[i].is_fixed {
                bodies[i].tentative_next_position = bodies[i].position;
                continue;
            }

            let iterations = self.iterations_for(bodies[i].phase);
            let mut relaxation = Relaxation::begin(&bodies[i], iterations);

            for _ in 0..iterations {
                for (j, other) in bodies.iter().enumerate() {
                    if j == i {
                        continue;
                    }

                    relaxation.interact(other, &self.config);
                }
            }

            relaxation.finish(&mut bodies[i], &self.config);
        }
    }
}

/// Working state for one body's relaxation.
struct Relaxation {
    phase: Phase,
    position: Vec2,
    bonds: Bonds,
    next: Vec2,
    repulsion: Vec2,
    separation: Vec2,
    rotation: f32,
    iterations: f32,
}

impl Relaxation {
    fn begin(body: &Body, iterations: u32) -> Self {
        Self {
            phase: body.phase,
            position: body.position,
            bonds: body.bonds,
            next: body.tentative_next_position,
            repulsion: Vec2::ZERO,
            separation: Vec2::ZERO,
            rotation: 0.0,
            iterations: iterations as f32,
        }
    }

    fn interact(&mut self, other: &Body, config: &InteractionConfig) {
        let to_them = other.position - self.next;
        let dist = to_them.length();

        if dist < EPSILON || dist > config.cutoff_radius {
            return;
        }

        let dir = to_them / dist;
        let both_solid = self.phase == Phase::Solid && other.is_solid();

        if dist < config.hard_knock_distance {
            let overlap = config.hard_knock_distance - dist;
            let share = if other.is_fixed { 1.0 } else { 0.5 };
            let push = dir * overlap * share / self.iterations;

            self.next -= push;
            self.separation -= push;
        } else if both_solid {
            self.bond(other, config);
        }

        let mix_range = config.hard_knock_distance * 4.0;
        if self.phase != Phase::Gas && !other.is_gas() && dist < mix_range {
            let proximity = 1.0 - dist / mix_range;
            let mine = self.next - self.position;
            let theirs = other.tentative_velocity();
            let blend = config.thickness * proximity / self.iterations;

            self.next = self.position + mine + (theirs - mine) * blend;
        }

        let coefficient = match (self.phase, other.phase) {
            (Phase::Solid, Phase::Solid) => config.repulsion_solid,
            (Phase::Gas, Phase::Gas) => config.repulsion_gas,
            _ => config.repulsion_mixed,
        };
        let force = (coefficient / (dist * dist)).min(config.max_repulsion);

        self.repulsion -= dir * force / self.iterations;
    }

    fn bond(&mut self, other: &Body, config: &InteractionConfig) {
        if self.bonds.count == 0 || other.bonds.count == 0 {
            return;
        }

        for i in 0..self.bonds.count {
            let my_dir = self.bonds.direction(i);

            for j in 0..other.bonds.count {
                let their_dir = other.bonds.direction(j);
                let my_point = self.next + my_dir * self.bonds.length;
                let their_point = other.bond_point(other.position, j);
                let gap = their_point - my_point;

                if gap.length() >= config.bond_keep_distance {
                    continue;
                }

                // Aligned bonds face each other.
                let angle = signed_angle(my_dir, -their_dir);
                let strength = bond_alignment(
                    angle,
                    config.bond_angle_tolerance,
                    config.bond_max_angle,
                );

                self.next += gap * config.bond_strength * strength / self.iterations;
                self.rotation += angle / self.iterations;
            }
        }
    }

    fn finish(self, body: &mut Body, config: &InteractionConfig) {
        body.tentative_next_position = self.next;
        body.position_adjustment += self.separation;
        body.forces.acceleration += self.repulsion * config.repulsion_scale;

        if self.rotation != 0.0 {
            body.bonds.rotate(self.rotation * config.bond_rotation_rate);
        }
    }
}

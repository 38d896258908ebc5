//! Test helper utilities for sandbox tests

use crate::barrier_set::BarrierSet;
use crate::body::{Body, BodyId};
use crate::config::SimulationConfig;
use crate::manager::BodyManager;
use crate::timestep::FIXED_STEP;
use crate::world::World;
use glam::Vec2;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Check if two vectors are approximately equal within tolerance
pub fn approx_eq_vec2(a: Vec2, b: Vec2, tol: f32) -> bool {
    (a - b).length() <= tol
}

/// A manager with default (gravity-free) configuration
pub fn quiet_manager() -> BodyManager {
    BodyManager::default()
}

/// A world with a single barrier from `p1` to `p2`
pub fn world_with_barrier(p1: Vec2, p2: Vec2) -> World {
    let mut world = World::default();
    world.barriers.add_segment(p1, p2);
    world.barriers.rebuild_adjacency();
    world
}

/// A barrier set with a single barrier from `p1` to `p2`
pub fn single_barrier(p1: Vec2, p2: Vec2) -> BarrierSet {
    let mut barriers = BarrierSet::new();
    barriers.add_segment(p1, p2);
    barriers
}

/// A body at `from` that will travel to `to` on its next step
pub fn body_moving(from: Vec2, to: Vec2) -> Body {
    Body::fluid(from).with_velocity(to - from)
}

/// Run `steps` full fixed steps (interaction then resolution) on a world
pub fn run_steps(world: &mut World, steps: usize) {
    for _ in 0..steps {
        world.frame(FIXED_STEP);
    }
}

/// Distance between two bodies of a manager
pub fn distance_between(manager: &BodyManager, a: BodyId, b: BodyId) -> f32 {
    let pa = manager.get(a).map(|b| b.position).unwrap_or(Vec2::ZERO);
    let pb = manager.get(b).map(|b| b.position).unwrap_or(Vec2::ZERO);
    pa.distance(pb)
}

/// Positions of every body, in storage order
pub fn positions(manager: &BodyManager) -> Vec<Vec2> {
    manager.bodies().iter().map(|b| b.position).collect()
}

/// The default config with gravity pointing down the screen
pub fn gravity_config() -> SimulationConfig {
    SimulationConfig::sandbox()
}

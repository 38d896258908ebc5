use crate::body::Body;
use crate::config::IntegratorConfig;

/// Predict a body's next position with frame-ratio compensated Verlet.
///
/// Writes `tentative_next_position` and clears the force accumulators.
/// Fixed bodies hold their position.
pub fn integrate(body: &mut Body, config: &IntegratorConfig, dt: f32) {
    if body.is_fixed {
        body.tentative_next_position = body.position;
        body.forces.clear();
        return;
    }

    body.forces.acceleration += config.gravity;

    let last_dt = if body.last_step > 0.0 { body.last_step } else { dt };
    let dt_ratio = dt / last_dt;

    let friction = if body.contact.stuck_to_surface {
        config.stuck_friction
    } else {
        config.free_friction
    };

    let forces = body.forces;
    let k = config.force_multiplier;

    let mut next = body.position
        + body.velocity() * dt_ratio * friction
        + forces.acceleration * ((dt + last_dt) / 2.0) * dt * k
        + forces.impulse * dt * k;

    next += forces.player_acceleration * dt * dt;

    body.tentative_next_position = next;
    body.forces.clear();
}

//! Unit tests for barrier collision resolution

use glam::Vec2;
use proptest::prelude::*;
use sandbox_core::barrier_set::BarrierSet;
use sandbox_core::body::Body;
use sandbox_core::config::ResolverConfig;
use sandbox_core::resolver::{speed_modulate, BarrierResolver, Correction};
use sandbox_core::tests::test_helpers::{
    approx_eq_f32, approx_eq_vec2, body_moving, gravity_config, run_steps, single_barrier,
    world_with_barrier,
};
use sandbox_core::timestep::FIXED_STEP;
use sandbox_core::world::World;
use std::f32::consts::FRAC_PI_2;

fn resolver() -> BarrierResolver {
    BarrierResolver::new(ResolverConfig::default())
}

fn floor() -> BarrierSet {
    single_barrier(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))
}

/// A free body at `from` whose integrated position is `to`.
fn heading(from: Vec2, to: Vec2) -> Body {
    let mut body = Body::fluid(from);
    body.tentative_next_position = to;
    body
}

#[test]
fn test_body_stays_on_its_side() {
    let mut world = world_with_barrier(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
    let id = world
        .bodies
        .spawn(body_moving(Vec2::new(50.0, -10.0), Vec2::new(50.0, 10.0)));

    run_steps(&mut world, 1);

    let body = world.bodies.get(id).expect("body exists");
    assert!(body.position.y < 0.0, "tunnelled to {:?}", body.position);
    assert_eq!(body.previous_position, Vec2::new(50.0, -10.0));
}

#[test]
fn test_shallow_approach_slides_at_full_speed() {
    let mut body = heading(Vec2::new(50.0, -5.0), Vec2::new(70.0, 5.0));

    let report = resolver().resolve(&mut body, &floor(), FIXED_STEP);

    let speed = Vec2::new(20.0, 10.0).length();
    assert!(approx_eq_vec2(body.position, Vec2::new(50.0 + speed, -5.0), 1e-3));
    assert_eq!(report.correction, Correction::None);
    assert!(!report.snapped);
    assert!(!report.stuck);
}

#[test]
fn test_head_on_hit_slides_at_half_speed_and_corrects() {
    let mut body = heading(Vec2::new(50.0, -1.0), Vec2::new(50.0, 10.0));

    let report = resolver().resolve(&mut body, &floor(), FIXED_STEP);

    // Slide of 11 * 0.5 along -x, then pushed one unit away from the barrier
    assert_eq!(report.correction, Correction::Applied);
    assert!(approx_eq_vec2(body.position, Vec2::new(44.5, -2.0), 1e-3));
    assert!(approx_eq_vec2(body.previous_position, Vec2::new(50.0, -2.0), 1e-4));
    assert!(report.stuck);
    assert!(body.contact.stuck_to_surface);
    assert!(approx_eq_vec2(report.contact_normal, Vec2::new(0.0, -1.0), 1e-5));
}

#[test]
fn test_default_side_is_remembered() {
    let mut body = heading(Vec2::new(50.0, -5.0), Vec2::new(50.0, 5.0));

    resolver().resolve(&mut body, &floor(), FIXED_STEP);

    assert!(body.contact.has_default_side);
    assert!(body.contact.default_side);
    assert!(approx_eq_f32(body.contact.side_time, FIXED_STEP, 1e-7));
}

#[test]
fn test_default_side_expires() {
    let mut body = heading(Vec2::new(50.0, -5.0), Vec2::new(50.0, -5.0));
    body.contact.has_default_side = true;
    body.contact.default_side = false;
    body.contact.side_time = 1.0;

    resolver().resolve(&mut body, &floor(), FIXED_STEP);

    assert!(!body.contact.has_default_side);
}

#[test]
fn test_squeezed_correction_is_rejected() {
    // Floor at y = 0, plus a short ledge under the body but not under its slide
    let mut barriers = floor();
    barriers.add_segment(Vec2::new(60.0, -1.2), Vec2::new(48.0, -1.2));

    let mut body = heading(Vec2::new(50.0, -0.5), Vec2::new(50.0, 10.0));
    let report = resolver().resolve(&mut body, &barriers, FIXED_STEP);

    assert_eq!(report.correction, Correction::Rejected);
    assert!(approx_eq_f32(body.position.y, -0.5, 1e-4));
    assert!(body.position.y < 0.0);
}

#[test]
fn test_slide_into_earlier_barrier_holds_still() {
    // The wall is checked before the floor; sliding along the floor runs into it
    let mut barriers = BarrierSet::new();
    barriers.add_segment(Vec2::new(45.0, -20.0), Vec2::new(45.0, 20.0));
    barriers.add_segment(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));

    let mut body = heading(Vec2::new(50.0, -10.0), Vec2::new(50.0, 10.0));
    body.position_adjustment = Vec2::new(3.0, 0.0);
    let report = resolver().resolve(&mut body, &barriers, FIXED_STEP);

    assert!(report.snapped);
    assert_eq!(body.position, Vec2::new(50.0, -10.0));
    // Held in place: no velocity, adjustment dropped
    assert_eq!(body.previous_position, Vec2::new(50.0, -10.0));
    assert_eq!(body.position_adjustment, Vec2::ZERO);
}

#[test]
fn test_position_adjustment_is_not_velocity() {
    let mut body = heading(Vec2::new(10.0, 10.0), Vec2::new(14.0, 10.0));
    body.position_adjustment = Vec2::new(3.0, 0.0);

    resolver().resolve(&mut body, &BarrierSet::new(), FIXED_STEP);

    assert_eq!(body.position, Vec2::new(14.0, 10.0));
    assert_eq!(body.previous_position, Vec2::new(13.0, 10.0));
    assert_eq!(body.velocity(), Vec2::new(1.0, 0.0));
    assert_eq!(body.position_adjustment, Vec2::ZERO);
}

#[test]
fn test_fixed_body_is_untouched() {
    let mut body = Body::solid(Vec2::new(50.0, -5.0)).fixed();
    body.tentative_next_position = Vec2::new(50.0, 5.0);

    resolver().resolve(&mut body, &floor(), FIXED_STEP);

    assert_eq!(body.position, Vec2::new(50.0, -5.0));
    assert_eq!(body.tentative_next_position, Vec2::new(50.0, -5.0));
}

#[test]
fn test_speed_is_clamped() {
    let config = ResolverConfig {
        max_speed: 100.0,
        ..Default::default()
    };
    let mut body = heading(Vec2::ZERO, Vec2::new(10.0, 0.0));

    BarrierResolver::new(config).resolve(&mut body, &BarrierSet::new(), FIXED_STEP);

    assert!(approx_eq_vec2(body.position, Vec2::new(100.0 * FIXED_STEP, 0.0), 1e-5));
}

#[test]
fn test_resting_on_floor_under_gravity() {
    let mut world = World::new(gravity_config()).expect("valid config");
    world.barriers.add_segment(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
    let id = world.bodies.spawn(Body::fluid(Vec2::new(50.0, -5.0)));

    for _ in 0..200 {
        run_steps(&mut world, 1);
        let y = world.bodies.get(id).expect("body exists").position.y;
        assert!(y < 0.0, "fell through the floor to {}", y);
    }

    assert!(world.bodies.stats().stuck > 0);
}

#[test]
fn test_speed_modulate_thresholds() {
    let frictionless = 50f32.to_radians();

    assert_eq!(speed_modulate(10.0, 0.0, frictionless), 10.0);
    assert_eq!(speed_modulate(10.0, -0.5, frictionless), 10.0);
    assert!(approx_eq_f32(speed_modulate(10.0, FRAC_PI_2, frictionless), 5.0, 1e-4));
    assert!(approx_eq_f32(speed_modulate(10.0, -FRAC_PI_2, frictionless), 5.0, 1e-4));

    let mid = speed_modulate(10.0, 70f32.to_radians(), frictionless);
    assert!(mid < 10.0 && mid > 5.0);
}

proptest! {
    #[test]
    fn prop_no_tunnelling_through_floor(
        x0 in 10.0f32..90.0,
        y0 in -40.0f32..-1.0,
        x1 in 10.0f32..90.0,
        y1 in 1.0f32..40.0,
    ) {
        let mut body = heading(Vec2::new(x0, y0), Vec2::new(x1, y1));

        resolver().resolve(&mut body, &floor(), FIXED_STEP);

        prop_assert!(body.position.y < 0.0);
        prop_assert!(body.previous_position.y < 0.0);
    }

    #[test]
    fn prop_speed_modulate_bounded(speed in 0.0f32..100.0, angle in -3.2f32..3.2) {
        let out = speed_modulate(speed, angle, 50f32.to_radians());
        prop_assert!(out <= speed + 1e-4);
        prop_assert!(out >= speed * 0.5 - 1e-4);
    }
}

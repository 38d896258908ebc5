//! Barrier collision resolution.
//!
//! Takes each body's integrated tentative position and rewrites it so the
//! step does not pass through any barrier: crossings become slides along
//! the barrier ("stick" projection), bodies hugging a crossed barrier are
//! nudged back to their own side, and anything still crossing afterwards
//! holds still for the step.
//!
//! This is a heuristic. Squeezed between two nearly parallel barriers, the
//! side correction can be rejected in both directions; the body then simply
//! goes uncorrected for that step.

use crate::barrier::Barrier;
use crate::barrier_set::BarrierSet;
use crate::body::{Body, SurfaceContact};
use crate::config::ResolverConfig;
use crate::geometry::signed_angle;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// What happened to the side correction of one body in one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Correction {
    /// No crossed barrier was within the margin.
    #[default]
    None,
    Applied,
    /// The correction crossed a barrier; its negation did not.
    Negated,
    /// Both directions crossed a barrier. Nothing was applied.
    Rejected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolveReport {
    pub correction: Correction,
    /// The trajectory still crossed after correction and was cancelled.
    pub snapped: bool,
    pub stuck: bool,
    /// Unit direction away from the surfaces slid along this step, or zero.
    pub contact_normal: Vec2,
}

/// Slow a slide down by how steeply it meets the barrier.
///
/// Angles below `frictionless_angle` keep full speed; past it the loss grows
/// quadratically to half the speed at a right angle.
pub fn speed_modulate(speed: f32, angle: f32, frictionless_angle: f32) -> f32 {
    let angle = angle.abs();

    if angle < frictionless_angle {
        return speed;
    }

    let slow = ((angle - frictionless_angle) / (FRAC_PI_2 - frictionless_angle)).clamp(0.0, 1.0);
    let slow = slow * slow / 2.0;

    speed * (1.0 - slow)
}

/// Crossing test that, once a default side is remembered, only counts
/// trajectories starting from that side.
fn crosses_with_normal(contact: &SurfaceContact, bar: &Barrier, p1: Vec2, p2: Vec2) -> bool {
    if contact.has_default_side {
        bar.crosses(p1, p2) && bar.on_normal_side_with_default(p1, contact.default_side)
    } else {
        bar.crosses(p1, p2)
    }
}

fn any_crosses_with_normal(
    contact: &SurfaceContact,
    barriers: &BarrierSet,
    p1: Vec2,
    p2: Vec2,
) -> bool {
    barriers
        .iter()
        .any(|bar| crosses_with_normal(contact, bar, p1, p2))
}

/// Whether shifting both `pos` and `next` by `shift` stays clear of every barrier.
fn shift_is_clear(
    contact: &SurfaceContact,
    barriers: &BarrierSet,
    pos: Vec2,
    next: Vec2,
    shift: Vec2,
) -> bool {
    !any_crosses_with_normal(contact, barriers, next, next + shift)
        && !any_crosses_with_normal(contact, barriers, pos, pos + shift)
        && !any_crosses_with_normal(contact, barriers, pos + shift, next + shift)
}

#[derive(Debug, Clone)]
pub struct BarrierResolver {
    config: ResolverConfig,
}

impl BarrierResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one fixed step for `body` and commit its new position.
    pub fn resolve(&self, body: &mut Body, barriers: &BarrierSet, dt: f32) -> ResolveReport {
        body.last_step = dt;

        if body.is_fixed {
            body.tentative_next_position = body.position;
            body.previous_position = body.position;
            body.position_adjustment = Vec2::ZERO;
            return ResolveReport::default();
        }

        let (pos, mut next, report) = self.adjust(body, barriers);

        let travel = next - pos;
        let max_travel = self.config.max_speed * dt;
        if travel.length() > max_travel {
            next = pos + travel.normalize_or_zero() * max_travel;
        }

        // A body held in place keeps no velocity, so its adjustment is dropped.
        body.previous_position = if report.snapped {
            pos
        } else {
            pos + body.position_adjustment
        };
        body.position_adjustment = Vec2::ZERO;
        body.position = next;
        body.tentative_next_position = next;
        body.contact.side_time += dt;

        report
    }

    /// Returns the (possibly corrected) current position and the resolved next position.
    fn adjust(&self, body: &mut Body, barriers: &BarrierSet) -> (Vec2, Vec2, ResolveReport) {
        let cfg = &self.config;
        let id = body.id;
        let mut pos = body.position;
        let mut next = body.tentative_next_position;
        let contact = &mut body.contact;
        let mut report = ResolveReport::default();

        if contact.side_time > cfg.side_time_max {
            contact.has_default_side = false;
        }

        if !contact.has_default_side {
            let closest = barriers
                .closest_crossing(pos, next)
                .and_then(|hit| barriers.get(hit));

            if let Some(bar) = closest {
                contact.has_default_side = true;
                contact.default_side = bar.on_normal_side(pos);
                contact.side_time = 0.0;
            }
        }

        let original_next = next;
        let mut away = Vec2::ZERO;
        contact.stuck_to_surface = false;

        for bar in barriers {
            if crosses_with_normal(contact, bar, pos, next) {
                next = self.stick(pos, next, bar, &mut away);
            }

            if bar.crosses(pos, original_next)
                && bar.offset_from(pos).length() < cfg.contact_distance
                && bar.within(pos)
            {
                contact.stuck_to_surface = true;
                contact.side_time = 0.0;
            }
        }

        let mut shift = Vec2::ZERO;

        for bar in barriers {
            if !bar.crosses(pos, original_next) {
                continue;
            }

            let to_line = bar.offset_from(next);
            let missing = cfg.correction_margin - to_line.length();

            if missing <= 0.0 {
                continue;
            }

            let toward = to_line.normalize_or_zero();
            let probe = toward * cfg.probe_distance;

            // Push towards whichever side the probe can reach unobstructed.
            let dir = if !any_crosses_with_normal(contact, barriers, next, next - probe) {
                -1.0
            } else if !any_crosses_with_normal(contact, barriers, next, next + probe) {
                1.0
            } else {
                0.0
            };

            shift += toward * dir * missing;
        }

        if shift.abs().element_sum() > 0.00001 {
            shift = shift.normalize();

            report.correction = if shift_is_clear(contact, barriers, pos, next, shift) {
                Correction::Applied
            } else if shift_is_clear(contact, barriers, pos, next, -shift) {
                shift = -shift;
                Correction::Negated
            } else {
                log::debug!(
                    "body {:?}: side correction {:?} rejected both ways at {:?}",
                    id,
                    shift,
                    pos
                );
                shift = Vec2::ZERO;
                Correction::Rejected
            };

            pos += shift;
            next += shift;
        }

        if any_crosses_with_normal(contact, barriers, pos, next) {
            log::trace!("body {:?}: still crossing at {:?}, holding still", id, pos);
            next = pos;
            report.snapped = true;
        }

        report.stuck = contact.stuck_to_surface;
        report.contact_normal = away.normalize_or_zero();

        (pos, next, report)
    }

    /// Redirect the step `pos -> next` along `bar`, in whichever tangent
    /// direction is closer to the intended motion.
    fn stick(&self, pos: Vec2, next: Vec2, bar: &Barrier, away: &mut Vec2) -> Vec2 {
        let travel = next - pos;
        let speed = travel.length();
        let along = bar.direction();

        let dir = if signed_angle(along, travel).abs() < signed_angle(-along, travel).abs() {
            along
        } else {
            -along
        };

        let speed = if self.config.angle_friction {
            speed_modulate(speed, signed_angle(dir, travel), self.config.frictionless_angle)
        } else {
            speed
        };

        *away -= bar.offset_from(pos).normalize_or_zero();

        pos + dir * speed
    }
}

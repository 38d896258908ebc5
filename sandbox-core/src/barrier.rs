//! Oriented line-segment obstacles.
//!
//! A barrier's endpoint order fixes its outward normal. Every side
//! classification in the resolver depends on that normal staying stable
//! across frames, so barriers are immutable once placed.

use crate::geometry::{self, offset_to_line, opposite, perpendicular, side_of, signed_angle, EPSILON};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A thin obstacle from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Barrier {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Unit direction `p1 -> p2` (zero for a degenerate barrier).
    pub fn direction(&self) -> Vec2 {
        (self.p2 - self.p1).normalize_or_zero()
    }

    pub fn length(&self) -> f32 {
        (self.p2 - self.p1).length()
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.p1 + self.p2) / 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.length() < EPSILON
    }

    /// The canonical outward normal, `-perpendicular(direction)`.
    pub fn normal(&self) -> Vec2 {
        -perpendicular(self.direction())
    }

    /// Continuous side classification of `pos`; the sign is the side.
    pub fn fside(&self, pos: Vec2) -> f32 {
        side_of(pos, self.p1, self.p2)
    }

    /// Discrete side of `pos`: `1` or `-1`. Points on the line report `-1`.
    pub fn side(&self, pos: Vec2) -> i8 {
        if self.fside(pos) > 0.0 {
            1
        } else {
            -1
        }
    }

    /// Whether `pos` projects between the endpoints, i.e. lies in the slab
    /// bounded by the normal lines through `p1` and `p2`.
    pub fn within(&self, pos: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }

        let normal = self.normal();
        let s1 = side_of(pos, self.p1, self.p1 + normal);
        let s2 = side_of(pos, self.p2, self.p2 + normal);

        opposite(s1, s2)
    }

    /// Whether the trajectory `pos -> next_pos` passes through this barrier.
    ///
    /// The endpoints must be on opposite sides of the line, and either
    /// endpoint or the line intersection must fall within the barrier's slab.
    /// An endpoint exactly on the line counts as opposite.
    pub fn crosses(&self, pos: Vec2, next_pos: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }

        if !opposite(self.fside(pos), self.fside(next_pos)) {
            return false;
        }

        if self.within(pos) || self.within(next_pos) {
            return true;
        }

        match geometry::line_intersection(pos, next_pos, self.p1, self.p2) {
            Some(intersect) => self.within(intersect),
            None => false,
        }
    }

    /// `crosses`, restricted to trajectories starting on the normal side.
    pub fn crosses_normal(&self, pos: Vec2, next_pos: Vec2) -> bool {
        self.crosses(pos, next_pos) && self.on_normal_side(pos)
    }

    pub fn on_normal_side(&self, pos: Vec2) -> bool {
        !opposite(self.fside(pos), self.fside(self.p1 + self.normal()))
    }

    /// Side test against a remembered default: `true` means `pos` is on the
    /// same side the body was last classified on.
    pub fn on_normal_side_with_default(&self, pos: Vec2, default_side: bool) -> bool {
        if default_side {
            self.on_normal_side(pos)
        } else {
            !self.on_normal_side(pos)
        }
    }

    /// Whichever of the two unit normals points towards `pos`.
    pub fn normal_towards(&self, pos: Vec2) -> Vec2 {
        let rel = pos - self.midpoint();
        let n1 = perpendicular(self.p2 - self.p1).normalize_or_zero();
        let n2 = -n1;

        if signed_angle(n1, rel).abs() < signed_angle(n2, rel).abs() {
            n1
        } else {
            n2
        }
    }

    /// Vector from `pos` to the closest point on the barrier's infinite line.
    pub fn offset_from(&self, pos: Vec2) -> Vec2 {
        offset_to_line(self.p1, self.direction(), pos)
    }

    /// Where the infinite line through `pos`,`next_pos` meets this barrier's line.
    pub fn intersection(&self, pos: Vec2, next_pos: Vec2) -> Option<Vec2> {
        geometry::line_intersection(pos, next_pos, self.p1, self.p2)
    }
}

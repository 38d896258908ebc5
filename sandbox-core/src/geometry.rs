//! Small 2D helpers shared by the barrier predicates and the interaction pass.

use glam::Vec2;

/// Below this length a vector or a separation is treated as degenerate.
pub const EPSILON: f32 = 1e-4;

/// Rotate a vector a quarter turn counter-clockwise: `(x, y) -> (-y, x)`.
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    v.perp()
}

/// Signed angle that rotates `from` onto `to`, in (-π, π].
#[inline]
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}

/// Vector from `p` to its projection onto the infinite line through
/// `line_point` along `line_dir` (which must be normalized).
pub fn offset_to_line(line_point: Vec2, line_dir: Vec2, p: Vec2) -> Vec2 {
    let along = (p - line_point).dot(line_dir);
    line_point + line_dir * along - p
}

/// Intersection of the infinite line through `a`,`b` with the infinite line
/// through `p1`,`p2`. `None` if the lines are parallel or degenerate.
pub fn line_intersection(a: Vec2, b: Vec2, p1: Vec2, p2: Vec2) -> Option<Vec2> {
    let r = b - a;
    let s = p2 - p1;
    let denom = r.perp_dot(s);

    if denom.abs() < f32::EPSILON {
        return None;
    }

    let t = (p1 - a).perp_dot(s) / denom;
    Some(a + r * t)
}

/// Two side classifications disagree. A zero on either side counts as
/// disagreement, so points lying exactly on a line are never "safely" on one side.
#[inline]
pub fn opposite(f1: f32, f2: f32) -> bool {
    if f1 == 0.0 || f2 == 0.0 {
        return true;
    }

    f1.signum() != f2.signum()
}

/// Side of `pos` relative to the line `a -> b`, as the cosine between the
/// line's left perpendicular and the direction from the segment midpoint to `pos`.
pub fn side_of(pos: Vec2, a: Vec2, b: Vec2) -> f32 {
    let normal = perpendicular((b - a).normalize_or_zero());
    let rel = (pos - (a + b) / 2.0).normalize_or_zero();
    normal.dot(rel)
}

//! Rigid-body transforms and the circle collision test
//!
//! Shapes are rotated once (at spawn or on a turn request) and otherwise only
//! translated, so per-tick cost is linear in vertex count and repeated
//! rotation never accumulates drift.

use glam::Vec2;

use crate::heading_vector;

/// Axis on which a shape left the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Rotate a point about the origin by `angle_deg`
///
/// Applies the rotation matrix in row-vector form: `[x y] · R`. On a y-down
/// screen a positive angle turns the point counter-clockwise.
#[inline]
pub fn rotate(point: Vec2, angle_deg: f32) -> Vec2 {
    let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
    Vec2::new(
        point.x * cos_a + point.y * sin_a,
        -point.x * sin_a + point.y * cos_a,
    )
}

/// Rotate every point about `center`
pub fn rotate_about(points: &[Vec2], angle_deg: f32, center: Vec2) -> Vec<Vec2> {
    points
        .iter()
        .map(|&p| rotate(p - center, angle_deg) + center)
        .collect()
}

/// Shift every point `speed` units along `heading` (radians)
///
/// `_anchor` names the caller's reference point; it does not take part in
/// the displacement, which is identical for every point.
pub fn translate_toward_heading(
    points: &[Vec2],
    heading: f32,
    _anchor: Vec2,
    speed: f32,
) -> Vec<Vec2> {
    let delta = heading_vector(heading) * speed;
    points.iter().map(|&p| p + delta).collect()
}

/// Whether two circles touch or overlap
#[inline]
pub fn circles_collide(center_a: Vec2, center_b: Vec2, radius_a: f32, radius_b: f32) -> bool {
    center_a.distance(center_b) <= radius_a + radius_b
}

/// Report the first axis (Y, then X) on which any point lies outside
/// `[0, bounds]`
pub fn escape_axis(points: &[Vec2], bounds: Vec2) -> Option<Axis> {
    if points.iter().any(|p| p.y < 0.0 || p.y > bounds.y) {
        Some(Axis::Y)
    } else if points.iter().any(|p| p.x < 0.0 || p.x > bounds.x) {
        Some(Axis::X)
    } else {
        None
    }
}

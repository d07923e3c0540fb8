//! The player ship
//!
//! Turns rotate the outline about its reference vertex; thrust moves it each
//! tick and decays on its own. The ship wraps to the opposite edge instead of
//! leaving the playfield.

use glam::Vec2;

use super::Projectile;
use super::geometry::{rotate_about, translate_toward_heading};
use crate::consts::*;
use crate::platform::{ShapeHandle, TimerToken};

#[derive(Debug, Clone)]
pub struct Ship {
    /// Four-point outline; vertex 0 is the nose
    pub points: [Vec2; 4],
    /// Heading (radians); accumulates without normalization
    pub angle: f32,
    /// Distance moved per tick, never negative
    pub thrust: f32,
    pub last_fire: Option<u64>,
    pub last_slow: Option<u64>,
    /// Live projectiles fired by this ship
    pub projectiles: Vec<Projectile>,
    pub shape: ShapeHandle,
    /// Pending tick, if any
    pub job: Option<TimerToken>,
}

impl Ship {
    /// Ship at the initial pose, pointing up
    pub fn new(shape: ShapeHandle) -> Self {
        Self::with_pose(SHIP_START_SHAPE, SHIP_START_ANGLE, shape)
    }

    pub fn with_pose(points: [Vec2; 4], angle: f32, shape: ShapeHandle) -> Self {
        Self {
            points,
            angle,
            thrust: 0.0,
            last_fire: None,
            last_slow: None,
            projectiles: Vec::new(),
            shape,
            job: None,
        }
    }

    /// Projectile origin and collision center
    pub fn nose(&self) -> Vec2 {
        self.points[0]
    }

    pub fn reference_vertex(&self) -> Vec2 {
        self.points[SHIP_REFERENCE_VERTEX]
    }

    /// Turn left: heading decreases, outline turns counter-clockwise on screen
    pub fn rotate_left(&mut self) {
        self.angle -= TURN_STEP_DEG.to_radians();
        self.turn_outline(TURN_STEP_DEG);
    }

    /// Turn right: heading increases, outline turns clockwise on screen
    pub fn rotate_right(&mut self) {
        self.angle += TURN_STEP_DEG.to_radians();
        self.turn_outline(-TURN_STEP_DEG);
    }

    fn turn_outline(&mut self, angle_deg: f32) {
        let turned = rotate_about(&self.points, angle_deg, self.reference_vertex());
        self.points = [turned[0], turned[1], turned[2], turned[3]];
    }

    pub fn speed_up(&mut self) {
        self.thrust = (self.thrust + THRUST_STEP).min(MAX_THRUST);
    }

    /// Brake, at most once per `cooldown_ms`. Returns whether it applied.
    pub fn slow_down(&mut self, now: u64, cooldown_ms: u64) -> bool {
        if !cooled_down(self.last_slow, now, cooldown_ms) {
            return false;
        }
        self.thrust = (self.thrust - BRAKE_STEP).max(0.0);
        self.last_slow = Some(now);
        true
    }

    /// Claim the gun if the cooldown allows, returning the launch origin and
    /// heading for a new projectile
    pub fn try_fire(&mut self, now: u64, cooldown_ms: u64) -> Option<(Vec2, f32)> {
        if !cooled_down(self.last_fire, now, cooldown_ms) {
            return None;
        }
        self.last_fire = Some(now);
        Some((self.nose(), self.angle))
    }

    /// One movement tick: translate by thrust, wrap, then decay thrust
    pub fn step(&mut self, bounds: Vec2) {
        let moved = translate_toward_heading(
            &self.points,
            self.angle,
            self.reference_vertex(),
            self.thrust,
        );
        let mut points = [moved[0], moved[1], moved[2], moved[3]];
        wrap(&mut points, bounds);
        self.points = points;

        if self.thrust > 0.0 {
            self.thrust = (self.thrust - THRUST_DECAY).max(0.0);
        }
    }

    /// Back to the initial pose with no thrust
    pub fn reset_pose(&mut self) {
        self.points = SHIP_START_SHAPE;
        self.angle = SHIP_START_ANGLE;
        self.thrust = 0.0;
    }
}

fn cooled_down(last: Option<u64>, now: u64, cooldown_ms: u64) -> bool {
    last.is_none_or(|t| now.saturating_sub(t) >= cooldown_ms)
}

/// Shift the whole outline one playfield dimension if the reference vertex
/// crossed an edge. Only the first matching edge is corrected per tick.
fn wrap(points: &mut [Vec2; 4], bounds: Vec2) {
    let probe = points[SHIP_REFERENCE_VERTEX];
    let shift = if probe.y < 0.0 && probe.x > 0.0 {
        Vec2::new(0.0, bounds.y)
    } else if probe.y > bounds.y {
        Vec2::new(0.0, -bounds.y)
    } else if probe.x < 0.0 {
        Vec2::new(bounds.x, 0.0)
    } else if probe.x > bounds.x {
        Vec2::new(-bounds.x, 0.0)
    } else {
        return;
    };
    for p in points.iter_mut() {
        *p += shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn ship() -> Ship {
        Ship::new(ShapeHandle(1))
    }

    fn offset_shape(delta: Vec2) -> [Vec2; 4] {
        SHIP_START_SHAPE.map(|p| p + delta)
    }

    #[test]
    fn test_starts_pointing_up_at_rest() {
        let s = ship();
        assert_eq!(s.points, SHIP_START_SHAPE);
        assert!((s.angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(s.thrust, 0.0);
    }

    #[test]
    fn test_thrust_is_capped() {
        let mut s = ship();
        for _ in 0..10 {
            s.speed_up();
        }
        assert_eq!(s.thrust, MAX_THRUST);
    }

    #[test]
    fn test_slow_down_is_rate_limited_and_floored() {
        let mut s = ship();
        s.thrust = 1.5;
        assert!(s.slow_down(0, 100));
        assert!((s.thrust - 0.5).abs() < 1e-6);
        assert!(!s.slow_down(50, 100));
        assert!(s.slow_down(100, 100));
        assert_eq!(s.thrust, 0.0);
    }

    #[test]
    fn test_fire_is_rate_limited() {
        let mut s = ship();
        let (origin, heading) = s.try_fire(0, 100).unwrap();
        assert_eq!(origin, SHIP_START_SHAPE[0]);
        assert_eq!(heading, SHIP_START_ANGLE);
        assert!(s.try_fire(99, 100).is_none());
        assert!(s.try_fire(100, 100).is_some());
    }

    #[test]
    fn test_rotate_left_then_right_restores_pose() {
        let mut s = ship();
        s.rotate_left();
        assert!((s.angle - (SHIP_START_ANGLE - 30f32.to_radians())).abs() < 1e-6);
        s.rotate_right();
        assert!((s.angle - SHIP_START_ANGLE).abs() < 1e-6);
        for (a, b) in s.points.iter().zip(SHIP_START_SHAPE.iter()) {
            assert!((*a - *b).length() < 1e-3);
        }
    }

    #[test]
    fn test_turned_nose_follows_heading() {
        // After a left turn the nose should sit along the new heading from the pivot
        let mut s = ship();
        s.rotate_left();
        let dir = (s.nose() - s.reference_vertex()).normalize();
        let heading = crate::heading_vector(s.angle);
        assert!(dir.dot(heading) > 0.999);
    }

    #[test]
    fn test_step_moves_by_thrust_and_decays() {
        let mut s = ship();
        s.thrust = 2.0;
        s.step(BOUNDS);
        assert!((s.nose() - Vec2::new(250.0, 248.0)).length() < 1e-4);
        assert!((s.thrust - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_thrust_never_goes_negative() {
        let mut s = ship();
        s.thrust = 0.05;
        s.step(BOUNDS);
        assert_eq!(s.thrust, 0.0);
        s.step(BOUNDS);
        assert_eq!(s.thrust, 0.0);
    }

    #[test]
    fn test_wraps_from_top_to_bottom() {
        // Reference vertex at (250, -5): above the top edge, right of x = 0
        let mut s = Ship::with_pose(offset_shape(Vec2::new(0.0, -270.0)), SHIP_START_ANGLE, ShapeHandle(1));
        let before = s.points;
        s.step(BOUNDS);
        for (a, b) in before.iter().zip(s.points.iter()) {
            assert!((*b - *a - Vec2::new(0.0, BOUNDS.y)).length() < 1e-4);
        }
    }

    #[test]
    fn test_wraps_from_right_to_left() {
        let mut s = Ship::with_pose(offset_shape(Vec2::new(560.0, 0.0)), 0.0, ShapeHandle(1));
        assert!(s.reference_vertex().x > BOUNDS.x);
        s.step(BOUNDS);
        assert!((s.reference_vertex().x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_corner_crossing_corrects_one_axis() {
        // Below the bottom and right of the right edge: only the vertical
        // correction applies this tick
        let mut s = Ship::with_pose(offset_shape(Vec2::new(560.0, 340.0)), 0.0, ShapeHandle(1));
        s.step(BOUNDS);
        let probe = s.reference_vertex();
        assert!((probe.y - 5.0).abs() < 1e-4);
        assert!(probe.x > BOUNDS.x);
        s.step(BOUNDS);
        assert!((s.reference_vertex().x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_pose() {
        let mut s = ship();
        s.rotate_right();
        s.speed_up();
        s.step(BOUNDS);
        s.reset_pose();
        assert_eq!(s.points, SHIP_START_SHAPE);
        assert_eq!(s.angle, SHIP_START_ANGLE);
        assert_eq!(s.thrust, 0.0);
    }
}

//! Projectiles fired by the ship
//!
//! A projectile travels one unit per tick along the heading it was fired
//! with, and is removed when it leaves the playfield or runs out of range.

use glam::Vec2;

use super::EntityId;
use super::geometry::{escape_axis, translate_toward_heading};
use crate::consts::PROJECTILE_SIZE;
use crate::platform::{ShapeHandle, TimerToken};

/// Result of one advance step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    /// Still in flight; reschedule
    Traveling,
    /// Range exhausted
    Expired,
    /// Left the playfield
    OffScreen,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    /// Bounding-box corners of the oval; corner 0 doubles as collision center
    pub corners: [Vec2; 2],
    /// Heading inherited from the ship at fire time (radians)
    pub heading: f32,
    /// Ticks left before expiry
    pub remaining_range: u32,
    pub shape: ShapeHandle,
    /// Pending tick, if any
    pub job: Option<TimerToken>,
}

impl Projectile {
    /// Bounding box for a projectile whose top-left corner sits at `origin`
    pub fn corners_at(origin: Vec2) -> [Vec2; 2] {
        [origin, origin + Vec2::splat(PROJECTILE_SIZE)]
    }

    pub fn new(id: EntityId, origin: Vec2, heading: f32, range: u32, shape: ShapeHandle) -> Self {
        Self {
            id,
            corners: Self::corners_at(origin),
            heading,
            remaining_range: range,
            shape,
            job: None,
        }
    }

    /// Point used for collision tests
    pub fn center(&self) -> Vec2 {
        self.corners[0]
    }

    /// Move one unit, then check bounds and range
    pub fn step(&mut self, bounds: Vec2) -> ProjectileState {
        let moved = translate_toward_heading(&self.corners, self.heading, self.corners[0], 1.0);
        if escape_axis(&moved, bounds).is_some() {
            return ProjectileState::OffScreen;
        }
        self.corners = [moved[0], moved[1]];

        self.remaining_range = self.remaining_range.saturating_sub(1);
        if self.remaining_range == 0 {
            ProjectileState::Expired
        } else {
            ProjectileState::Traveling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile(origin: Vec2, heading: f32, range: u32) -> Projectile {
        Projectile::new(1, origin, heading, range, ShapeHandle(1))
    }

    #[test]
    fn test_expires_after_exactly_range_steps() {
        let bounds = Vec2::new(2000.0, 2000.0);
        let mut p = projectile(Vec2::new(10.0, 1000.0), 0.0, 300);

        for _ in 0..299 {
            assert_eq!(p.step(bounds), ProjectileState::Traveling);
        }
        assert_eq!(p.step(bounds), ProjectileState::Expired);
        assert!((p.center().x - 310.0).abs() < 1e-2);
    }

    #[test]
    fn test_leaving_playfield_is_offscreen() {
        let bounds = Vec2::new(100.0, 100.0);
        // Heading right; the far corner starts at x = 99
        let mut p = projectile(Vec2::new(95.0, 50.0), 0.0, 300);
        assert_eq!(p.step(bounds), ProjectileState::Traveling);
        assert_eq!(p.step(bounds), ProjectileState::OffScreen);
        // Range is untouched by the offscreen step
        assert_eq!(p.remaining_range, 299);
    }

    #[test]
    fn test_travels_along_heading() {
        let bounds = Vec2::new(500.0, 500.0);
        let mut p = projectile(Vec2::new(100.0, 200.0), -std::f32::consts::FRAC_PI_2, 300);
        p.step(bounds);
        assert!((p.center() - Vec2::new(100.0, 199.0)).length() < 1e-4);
        assert!((p.corners[1] - Vec2::new(104.0, 203.0)).length() < 1e-4);
    }
}

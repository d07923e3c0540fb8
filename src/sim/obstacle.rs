//! Drifting rocks
//!
//! An obstacle keeps the heading and speed it was spawned with. Hitting one
//! with a projectile destroys it; anything larger than Small splits into two
//! fragments one size class down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::EntityId;
use super::geometry::{rotate_about, translate_toward_heading};
use crate::consts::{FRAGMENT_SPREAD_DEG, OBSTACLE_BASE_INTERVAL_MS};
use crate::platform::{ShapeHandle, TimerToken};

/// Vertex the spawn rotation pivots on
const PIVOT_VERTEX: usize = 2;

/// Obstacle tiers, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Outline unit size, also used as the collision radius
    pub fn size(self) -> f32 {
        match self {
            SizeClass::Small => 5.0,
            SizeClass::Medium => 10.0,
            SizeClass::Large => 15.0,
        }
    }

    /// Points awarded for a projectile hit
    pub fn score_value(self) -> u64 {
        match self {
            SizeClass::Large => 10,
            SizeClass::Medium => 20,
            SizeClass::Small => 30,
        }
    }

    /// Size of the fragments produced by a hit, if any
    pub fn fragment(self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }
}

/// A child obstacle to spawn after a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub origin: Vec2,
    pub heading: f32,
    pub size: SizeClass,
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: EntityId,
    pub size: SizeClass,
    /// Radians, fixed for the obstacle's lifetime
    pub heading: f32,
    /// Rate multiplier: the update interval is `speed × 5 ms`
    pub speed: u32,
    /// Nine-point outline
    pub points: Vec<Vec2>,
    pub shape: ShapeHandle,
    /// Pending tick, if any
    pub job: Option<TimerToken>,
}

impl Obstacle {
    /// Rock outline with its top-left notch at `start`
    pub fn outline(start: Vec2, size: SizeClass) -> Vec<Vec2> {
        let s = size.size();
        let (x, y) = (start.x, start.y);
        vec![
            Vec2::new(x, y),
            Vec2::new(x + s, y),
            Vec2::new(x + s, y - s / 2.0),
            Vec2::new(x + s * 2.0, y - s / 2.0),
            Vec2::new(x + s * 2.0, y),
            Vec2::new(x + s * 3.0, y),
            Vec2::new(x + s * 3.0, y + s + s / 2.0),
            Vec2::new(x + s + s / 2.0, y + s * 2.0),
            Vec2::new(x, y + s + s / 2.0),
        ]
    }

    /// Outline turned to face `heading`, as placed at spawn
    pub fn spawn_outline(start: Vec2, size: SizeClass, heading: f32) -> Vec<Vec2> {
        let outline = Self::outline(start, size);
        let pivot = outline[PIVOT_VERTEX];
        rotate_about(&outline, heading.to_degrees(), pivot)
    }

    pub fn new(
        id: EntityId,
        size: SizeClass,
        heading: f32,
        speed: u32,
        points: Vec<Vec2>,
        shape: ShapeHandle,
    ) -> Self {
        Self {
            id,
            size,
            heading,
            speed,
            points,
            shape,
            job: None,
        }
    }

    /// Collision center: vertex 0 offset by half the unit size
    pub fn center(&self) -> Vec2 {
        self.points[0] + Vec2::splat(self.size.size() / 2.0)
    }

    pub fn radius(&self) -> f32 {
        self.size.size()
    }

    /// Delay between moves (ms)
    pub fn interval_ms(&self) -> u64 {
        OBSTACLE_BASE_INTERVAL_MS * u64::from(self.speed)
    }

    /// Shift one unit along the heading
    pub fn drift(&mut self) {
        self.points = translate_toward_heading(&self.points, self.heading, self.points[0], 1.0);
    }

    /// Children produced when a projectile hits this obstacle
    ///
    /// Large and Medium split into two of the next size down at the current
    /// center, diverging by the fragment spread either side of the heading.
    /// Small leaves nothing.
    pub fn fragments(&self) -> Vec<Fragment> {
        let Some(size) = self.size.fragment() else {
            return Vec::new();
        };
        let spread = FRAGMENT_SPREAD_DEG.to_radians();
        let origin = self.center();
        vec![
            Fragment {
                origin,
                heading: self.heading - spread,
                size,
            },
            Fragment {
                origin,
                heading: self.heading + spread,
                size,
            },
        ]
    }
}

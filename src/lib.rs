//! Asteroids - a top-down arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Entity logic (ship, projectiles, obstacles) and the session orchestrator
//! - `platform`: Display/Timer surface the core draws and schedules through
//! - `settings`: Data-driven constant sets (speeds, capacity, cooldowns)
//! - `error`: Configuration errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Ship update period (ms)
    pub const SHIP_TICK_MS: u64 = 50;
    /// Projectile update period (ms)
    pub const PROJECTILE_TICK_MS: u64 = 3;
    /// Delay before a freshly spawned obstacle first moves (ms)
    pub const OBSTACLE_FIRST_TICK_MS: u64 = 100;
    /// Obstacle update period is this times the obstacle's speed (ms)
    pub const OBSTACLE_BASE_INTERVAL_MS: u64 = 5;

    /// Collision radius of the ship
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Collision radius of a projectile
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    /// Side length of the projectile's bounding box
    pub const PROJECTILE_SIZE: f32 = 4.0;

    /// Thrust added per speed-up request
    pub const THRUST_STEP: f32 = 2.0;
    /// Thrust ceiling
    pub const MAX_THRUST: f32 = 10.0;
    /// Thrust removed per slow-down request
    pub const BRAKE_STEP: f32 = 1.0;
    /// Passive thrust decay per ship tick
    pub const THRUST_DECAY: f32 = 0.1;

    /// Heading change per turn request (degrees)
    pub const TURN_STEP_DEG: f32 = 30.0;
    /// Heading offset of each fragment from its parent (degrees)
    pub const FRAGMENT_SPREAD_DEG: f32 = 30.0;

    /// Initial ship heading: pointing up the screen
    pub const SHIP_START_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;
    /// Initial ship outline. Vertex 0 is the nose, vertex 2 the pivot.
    pub const SHIP_START_SHAPE: [Vec2; 4] = [
        Vec2::new(250.0, 250.0),
        Vec2::new(235.0, 270.0),
        Vec2::new(250.0, 265.0),
        Vec2::new(265.0, 270.0),
    ];
    /// Ship vertex used as rotation pivot and wraparound probe
    pub const SHIP_REFERENCE_VERTEX: usize = 2;

    /// Position of the first icon in the lives indicator
    pub const LIFE_ICON_ORIGIN: Vec2 = Vec2::new(40.0, 50.0);
    /// Horizontal gap between lives indicator icons
    pub const LIFE_ICON_SPACING: f32 = 25.0;

    /// Status line shown before the first game
    pub const TITLE_TEXT: &str = "  Asteroids\nPlay Game";
    /// Status line shown once the last life is gone
    pub const GAME_OVER_TEXT: &str = "GAME OVER";
}

/// Unit vector pointing along `angle` (radians, screen coordinates)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

//! Simulation module
//!
//! All gameplay logic lives here:
//! - Rigid-body geometry (rotate once, then translate per tick)
//! - Per-entity update steps, each driven by its own scheduled task
//! - Session orchestration (score, lives, spawning, phase)
//!
//! Nothing here draws or sleeps; it goes through the platform surface.

pub mod geometry;
pub mod obstacle;
pub mod projectile;
pub mod session;
pub mod ship;

pub use geometry::{Axis, circles_collide, escape_axis, rotate, rotate_about, translate_toward_heading};
pub use obstacle::{Fragment, Obstacle, SizeClass};
pub use projectile::{Projectile, ProjectileState};
pub use session::{GamePhase, Session, SessionSnapshot};
pub use ship::Ship;

/// Identifier for obstacles and projectiles, unique within a session
pub type EntityId = u32;

/// Payload of a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Move the ship one step
    ShipTick,
    /// Advance one obstacle
    ObstacleTick(EntityId),
    /// Advance one projectile
    ProjectileTick(EntityId),
    /// Try to spawn an obstacle
    SpawnTick,
}

/// Player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateLeft,
    RotateRight,
    SpeedUp,
    SlowDown,
    Fire,
    /// Begin a game from the title or game-over screen
    Start,
}

//! Platform abstraction layer
//!
//! The simulation never touches a window, canvas or clock directly. It talks
//! to a surface providing:
//! - Shape drawing (`Display`)
//! - Delayed callbacks and the current time (`Timer`)
//!
//! `HeadlessSurface` implements both in memory for tests and the demo driver.

pub mod headless;
pub mod timer;

pub use headless::HeadlessSurface;
pub use timer::TimerQueue;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Task;

/// Opaque handle to a drawn shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeHandle(pub u32);

/// Cancellation token for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(pub u64);

/// How a shape should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeStyle {
    /// Player ship outline
    Ship,
    /// Ship recreated after losing a life (filled grey)
    RespawnedShip,
    /// Rock outline
    Obstacle,
    /// Oval described by its two bounding-box corners
    Projectile,
    /// Small ship in the lives indicator
    LifeIcon,
    /// Red flash on impact
    Hit,
}

/// Text slots on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextTag {
    Score,
    Status,
}

/// Rendering side of the surface
pub trait Display {
    /// Draw a new shape and return its handle
    fn create_shape(&mut self, points: &[Vec2], style: ShapeStyle) -> ShapeHandle;
    /// Replace a shape's points wholesale
    fn update_shape(&mut self, handle: ShapeHandle, points: &[Vec2]);
    /// Change a shape's style (hit flash)
    fn restyle_shape(&mut self, handle: ShapeHandle, style: ShapeStyle);
    /// Remove a shape; unknown handles are ignored
    fn destroy_shape(&mut self, handle: ShapeHandle);
    /// Size of the playable area (width, height)
    fn bounds(&self) -> Vec2;
    /// Set the text in a slot
    fn notify_text(&mut self, tag: TextTag, text: &str);
    /// Audible cue (fire)
    fn notify_audio_cue(&mut self);
}

/// Scheduling side of the surface
///
/// `schedule`/`cancel`/`now` are what entities use. `pop_due`/`advance_to`
/// are the event-loop side that hands due tasks back to the session.
pub trait Timer {
    /// Run `task` after `delay_ms`
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerToken;
    /// Drop a pending task; already-fired or unknown tokens are ignored
    fn cancel(&mut self, token: TimerToken);
    /// Current time (ms)
    fn now(&self) -> u64;
    /// Remove the earliest task due at or before `deadline`, moving the clock
    /// to its due time
    fn pop_due(&mut self, deadline: u64) -> Option<Task>;
    /// Move the clock forward without running anything
    fn advance_to(&mut self, time: u64);
}

/// Everything the session needs from its host
pub trait Surface: Display + Timer {}

impl<T: Display + Timer> Surface for T {}

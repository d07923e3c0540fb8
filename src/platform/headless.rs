//! In-memory surface
//!
//! Records every shape, text slot and audio cue so tests (and the demo
//! driver) can observe what would have been drawn.

use std::collections::{BTreeMap, HashMap};

use glam::Vec2;

use super::{Display, ShapeHandle, ShapeStyle, TextTag, Timer, TimerQueue, TimerToken};
use crate::sim::Task;

/// A shape as last drawn
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnShape {
    pub points: Vec<Vec2>,
    pub style: ShapeStyle,
}

/// Display and timer backed by plain collections
#[derive(Debug)]
pub struct HeadlessSurface {
    bounds: Vec2,
    shapes: BTreeMap<ShapeHandle, DrawnShape>,
    texts: HashMap<TextTag, String>,
    audio_cues: u32,
    next_handle: u32,
    timer: TimerQueue,
}

impl HeadlessSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Vec2::new(width, height),
            shapes: BTreeMap::new(),
            texts: HashMap::new(),
            audio_cues: 0,
            next_handle: 1,
            timer: TimerQueue::new(),
        }
    }

    pub fn shape(&self, handle: ShapeHandle) -> Option<&DrawnShape> {
        self.shapes.get(&handle)
    }

    /// Number of live shapes drawn with `style`
    pub fn count_style(&self, style: ShapeStyle) -> usize {
        self.shapes.values().filter(|s| s.style == style).count()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn text(&self, tag: TextTag) -> &str {
        self.texts.get(&tag).map(String::as_str).unwrap_or("")
    }

    pub fn audio_cues(&self) -> u32 {
        self.audio_cues
    }

    pub fn timer(&self) -> &TimerQueue {
        &self.timer
    }
}

impl Display for HeadlessSurface {
    fn create_shape(&mut self, points: &[Vec2], style: ShapeStyle) -> ShapeHandle {
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        self.shapes.insert(
            handle,
            DrawnShape {
                points: points.to_vec(),
                style,
            },
        );
        handle
    }

    fn update_shape(&mut self, handle: ShapeHandle, points: &[Vec2]) {
        if let Some(shape) = self.shapes.get_mut(&handle) {
            shape.points.clear();
            shape.points.extend_from_slice(points);
        }
    }

    fn restyle_shape(&mut self, handle: ShapeHandle, style: ShapeStyle) {
        if let Some(shape) = self.shapes.get_mut(&handle) {
            shape.style = style;
        }
    }

    fn destroy_shape(&mut self, handle: ShapeHandle) {
        self.shapes.remove(&handle);
    }

    fn bounds(&self) -> Vec2 {
        self.bounds
    }

    fn notify_text(&mut self, tag: TextTag, text: &str) {
        self.texts.insert(tag, text.to_string());
    }

    fn notify_audio_cue(&mut self) {
        self.audio_cues += 1;
    }
}

impl Timer for HeadlessSurface {
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerToken {
        self.timer.schedule(delay_ms, task)
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timer.cancel(token);
    }

    fn now(&self) -> u64 {
        self.timer.now()
    }

    fn pop_due(&mut self, deadline: u64) -> Option<Task> {
        self.timer.pop_due(deadline)
    }

    fn advance_to(&mut self, time: u64) {
        self.timer.advance_to(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_lifecycle() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let handle = surface.create_shape(&[Vec2::ZERO, Vec2::ONE], ShapeStyle::Projectile);
        assert_eq!(surface.count_style(ShapeStyle::Projectile), 1);

        surface.update_shape(handle, &[Vec2::new(2.0, 3.0)]);
        assert_eq!(surface.shape(handle).unwrap().points, vec![Vec2::new(2.0, 3.0)]);

        surface.restyle_shape(handle, ShapeStyle::Hit);
        assert_eq!(surface.shape(handle).unwrap().style, ShapeStyle::Hit);

        surface.destroy_shape(handle);
        assert!(surface.shape(handle).is_none());

        // Stale handle updates are no-ops
        surface.update_shape(handle, &[Vec2::ZERO]);
        assert_eq!(surface.shape_count(), 0);
    }

    #[test]
    fn test_text_and_audio() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        assert_eq!(surface.text(TextTag::Score), "");
        surface.notify_text(TextTag::Score, "30");
        surface.notify_audio_cue();
        assert_eq!(surface.text(TextTag::Score), "30");
        assert_eq!(surface.audio_cues(), 1);
        assert_eq!(surface.bounds(), Vec2::new(800.0, 600.0));
    }
}

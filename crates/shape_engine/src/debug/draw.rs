//! Debug drawing primitives and system
//!
//! Temporary shapes live for a duration measured in seconds; a duration of
//! zero means "this frame only". Persistent shapes stay until removed by id.

use crate::foundation::math::{Color, Vec3};
use crate::geometry::{Aabb, Obb, Ray, Sphere};
use std::collections::HashMap;

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Geometry of a debug shape, drawn as lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugPrimitive {
    /// Line segment from start to end
    Line {
        /// Start point
        start: Vec3,
        /// End point
        end: Vec3,
    },
    /// Axis-aligned box outline
    Aabb(Aabb),
    /// Oriented box outline
    Obb(Obb),
    /// Three great circles
    Sphere(Sphere),
    /// Ray segment
    Ray(Ray),
}

/// A debug primitive with color and remaining lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugShape {
    /// What to draw
    pub primitive: DebugPrimitive,
    /// Line color
    pub color: Color,
    /// Remaining lifetime in seconds
    pub duration: f32,
}

impl DebugShape {
    /// Shape that lasts for the current frame only
    pub fn new(primitive: DebugPrimitive, color: Color) -> Self {
        Self {
            primitive,
            color,
            duration: 0.0,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.duration -= delta_time;
        self.duration < 0.0
    }
}

/// Debug drawing system for rendering debug shapes
#[derive(Debug)]
pub struct DebugDrawSystem {
    temporary_shapes: Vec<DebugShape>,
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    /// Queue a temporary shape
    pub fn draw(&mut self, shape: DebugShape) {
        if self.enabled {
            self.temporary_shapes.push(shape);
        }
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, duration: f32) {
        self.draw(DebugShape::new(DebugPrimitive::Line { start, end }, color).with_duration(duration));
    }

    /// Draw an axis-aligned box (temporary)
    pub fn draw_aabb(&mut self, aabb: Aabb, color: Color, duration: f32) {
        self.draw(DebugShape::new(DebugPrimitive::Aabb(aabb), color).with_duration(duration));
    }

    /// Draw an oriented box (temporary)
    pub fn draw_obb(&mut self, obb: Obb, color: Color, duration: f32) {
        self.draw(DebugShape::new(DebugPrimitive::Obb(obb), color).with_duration(duration));
    }

    /// Draw a sphere (temporary)
    pub fn draw_sphere(&mut self, sphere: Sphere, color: Color, duration: f32) {
        self.draw(DebugShape::new(DebugPrimitive::Sphere(sphere), color).with_duration(duration));
    }

    /// Draw a ray (temporary)
    pub fn draw_ray(&mut self, ray: Ray, color: Color, duration: f32) {
        self.draw(DebugShape::new(DebugPrimitive::Ray(ray), color).with_duration(duration));
    }

    /// Draw a persistent shape that remains until explicitly removed
    ///
    /// Reusing an id replaces the previous shape.
    pub fn draw_persistent(&mut self, id: impl Into<DebugShapeId>, shape: DebugShape) {
        if self.enabled {
            self.persistent_shapes.insert(id.into(), shape);
        }
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) -> bool {
        self.persistent_shapes.remove(id).is_some()
    }

    /// Expire temporary shapes (call once per frame, before new shapes are queued)
    pub fn update(&mut self, delta_time: f32) {
        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// All shapes to draw this frame
    pub fn shapes(&self) -> impl Iterator<Item = &DebugShape> {
        self.temporary_shapes
            .iter()
            .chain(self.persistent_shapes.values())
    }

    /// Total shape count
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0))
    }

    #[test]
    fn test_frame_only_shape_survives_until_next_update() {
        let mut debug = DebugDrawSystem::new();
        debug.draw_aabb(unit_box(), Vec3::y(), 0.0);
        assert_eq!(debug.shape_count(), 1);

        debug.update(1.0 / 60.0);
        assert_eq!(debug.shape_count(), 0);
    }

    #[test]
    fn test_timed_shape_expires() {
        let mut debug = DebugDrawSystem::new();
        debug.draw_line(Vec3::zeros(), Vec3::x(), Vec3::x(), 1.0);

        debug.update(0.5);
        assert_eq!(debug.shape_count(), 1);
        debug.update(0.6);
        assert_eq!(debug.shape_count(), 0);
    }

    #[test]
    fn test_persistent_shapes() {
        let mut debug = DebugDrawSystem::new();
        let shape = DebugShape::new(DebugPrimitive::Aabb(unit_box()), Vec3::z());
        debug.draw_persistent("floor", shape);
        debug.draw_persistent("floor", shape);

        debug.update(10.0);
        assert_eq!(debug.shape_count(), 1);

        assert!(debug.clear_persistent("floor"));
        assert!(!debug.clear_persistent("floor"));
        assert_eq!(debug.shape_count(), 0);
    }

    #[test]
    fn test_disabled_system_ignores_shapes() {
        let mut debug = DebugDrawSystem::new();
        debug.enabled = false;
        debug.draw_sphere(Sphere::default(), Vec3::x(), 1.0);
        debug.draw_persistent("x", DebugShape::new(DebugPrimitive::Sphere(Sphere::default()), Vec3::x()));
        assert_eq!(debug.shapes().count(), 0);
    }
}

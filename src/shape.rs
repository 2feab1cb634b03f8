//! Renderable-shape interface
//!
//! Bodies are built from something that can be drawn. The physics core only
//! reads a shape's bounds and rotation once, at construction; it never renders
//! and never writes back. `Circle` and `Rect` are minimal shapes for scenes
//! that have no scene graph of their own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Collider;

/// Axis-aligned bounding box (top-left corner plus size, +y is down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Smallest bounds containing both
    pub fn union(&self, other: &Bounds) -> Self {
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

/// Something a body can wrap
pub trait Shape {
    /// Axis-aligned bounds in the shape's coordinate space
    fn bounds(&self) -> Bounds;

    /// Rotation in radians
    fn rotation(&self) -> f32 {
        0.0
    }

    /// Collider used when the caller doesn't supply one
    fn default_collider(&self) -> Collider {
        let b = self.bounds();
        Collider::Box {
            width: b.width,
            height: b.height,
        }
    }
}

/// A circle shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub rotation: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            radius,
            rotation: 0.0,
        }
    }

    pub fn at(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }
}

impl Shape for Circle {
    fn bounds(&self) -> Bounds {
        Bounds::centered(self.center, self.radius * 2.0, self.radius * 2.0)
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn default_collider(&self) -> Collider {
        Collider::Circle {
            radius: self.radius,
        }
    }
}

/// An axis-aligned rectangle shape, optionally rotated about its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

impl Rect {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn at(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }
}

impl Shape for Rect {
    fn bounds(&self) -> Bounds {
        Bounds::centered(self.center, self.width, self.height)
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }
}

//! Collider geometry
//!
//! Colliders live in body-local space, centered on the body origin and
//! axis-aligned. World-space geometry is derived from the owning body's
//! position and rotation whenever a query needs it.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, positive};
use crate::rotate;
use crate::shape::Bounds;

/// Collision shape of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Circle { radius: f32 },
    Box { width: f32, height: f32 },
}

/// Tag used by the narrow-phase dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderKind {
    Circle,
    Box,
}

impl Collider {
    pub fn circle(radius: f32) -> Result<Self> {
        Ok(Collider::Circle {
            radius: positive("radius", radius)?,
        })
    }

    pub fn rect(width: f32, height: f32) -> Result<Self> {
        Ok(Collider::Box {
            width: positive("width", width)?,
            height: positive("height", height)?,
        })
    }

    /// Re-check dimensions (colliders built as literals skip the constructors)
    pub fn validate(&self) -> Result<()> {
        match *self {
            Collider::Circle { radius } => positive("radius", radius).map(|_| ()),
            Collider::Box { width, height } => {
                positive("width", width)?;
                positive("height", height)?;
                Ok(())
            }
        }
    }

    pub fn kind(&self) -> ColliderKind {
        match self {
            Collider::Circle { .. } => ColliderKind::Circle,
            Collider::Box { .. } => ColliderKind::Box,
        }
    }

    pub fn area(&self) -> f32 {
        match *self {
            Collider::Circle { radius } => PI * radius * radius,
            Collider::Box { width, height } => width * height,
        }
    }

    /// Moment of inertia about the center for the given mass
    pub fn inertia(&self, mass: f32) -> f32 {
        match *self {
            Collider::Circle { radius } => 0.5 * mass * radius * radius,
            Collider::Box { width, height } => mass * (width * width + height * height) / 12.0,
        }
    }

    /// Local-space bounds, centered on the origin
    pub fn local_bounds(&self) -> Bounds {
        match *self {
            Collider::Circle { radius } => Bounds::centered(Vec2::ZERO, radius * 2.0, radius * 2.0),
            Collider::Box { width, height } => Bounds::centered(Vec2::ZERO, width, height),
        }
    }

    /// Half extents of a box (circles report their radius on both axes)
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Collider::Circle { radius } => Vec2::splat(radius),
            Collider::Box { width, height } => Vec2::new(width / 2.0, height / 2.0),
        }
    }
}

/// World-space corners of a box, in winding order
pub fn box_vertices(half: Vec2, position: Vec2, rotation: f32) -> [Vec2; 4] {
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| position + rotate(corner, rotation))
}

/// The two unique edge normals of a rotated box
pub fn box_axes(rotation: f32) -> [Vec2; 2] {
    [rotate(Vec2::X, rotation), rotate(Vec2::Y, rotation)]
}

/// Project a vertex set onto an axis, returning (min, max)
pub fn project(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices.iter().fold((f32::MAX, f32::MIN), |(min, max), v| {
        let p = v.dot(axis);
        (min.min(p), max.max(p))
    })
}

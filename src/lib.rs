//! Rigid Bake - 2D rigid-body physics that bakes motion into keyframe tracks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, constraints, fields, world)
//! - `shape`: The renderable-shape interface bodies are built from
//! - `settings`: Solver tuning
//! - `error`: Construction and configuration errors

pub mod error;
pub mod settings;
pub mod shape;
pub mod sim;

pub use error::{PhysicsError, Result};
pub use settings::{SolverPreset, SolverSettings};
pub use shape::{Bounds, Circle, Rect, Shape};
pub use sim::{
    BakedAnimation, Body, BodyId, BodyOptions, Channel, Collider, ColliderKind, Collision,
    Constraint, Field, Keyframe, KeyframeTrack, Material, World,
};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default fixed timestep for `World::simulate` callers (100 Hz)
    pub const DEFAULT_DT: f32 = 0.01;

    /// Penetration allowance before positional correction kicks in
    pub const SLOP: f32 = 0.01;
    /// Fraction of the remaining penetration corrected per contact
    pub const CORRECTION_PERCENT: f32 = 0.8;
    /// Friction impulses smaller than this are skipped
    pub const FRICTION_THRESHOLD: f32 = 0.001;
    /// Per-step multiplier on angular velocity
    pub const ANGULAR_DAMPING: f32 = 0.99;

    /// Upper bound on the steps one `World::simulate` call may run
    pub const MAX_STEPS: usize = 10_000_000;

    /// Pixel areas are scaled down by this when deriving mass from density
    pub const MASS_AREA_SCALE: f32 = 1000.0;

    /// Spring defaults
    pub const SPRING_STIFFNESS: f32 = 2.0;
    pub const SPRING_DAMPING: f32 = 0.1;
}

/// 2D cross product (z component of the 3D cross)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Cross of a scalar angular velocity with a lever arm: `w × r`
#[inline]
pub fn cross_scalar(w: f32, r: Vec2) -> Vec2 {
    Vec2::new(-w * r.y, w * r.x)
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_cross() {
        assert_eq!(cross(Vec2::X, Vec2::Y), 1.0);
        assert_eq!(cross(Vec2::Y, Vec2::X), -1.0);
        assert_eq!(cross(Vec2::new(2.0, 0.0), Vec2::new(4.0, 0.0)), 0.0);
    }

    #[test]
    fn test_cross_scalar_is_perpendicular() {
        let r = Vec2::new(3.0, 4.0);
        let v = cross_scalar(2.0, r);
        assert!(v.dot(r).abs() < 1e-6);
        assert_eq!(v, Vec2::new(-8.0, 6.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::X, FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }
}

//! Pairwise constraints
//!
//! Springs are soft: they add equal and opposite forces and let integration
//! do the rest. Rods are hard: they move the bodies directly so the distance
//! is exact after each solve. Rods leave velocities alone, so a rod fighting
//! strong forces can gain energy over many steps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, pair_mut};
use crate::consts::{SPRING_DAMPING, SPRING_STIFFNESS};
use crate::error::{PhysicsError, Result};

/// A relation between two bodies, solved once per step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    Spring {
        a: BodyId,
        b: BodyId,
        rest_length: f32,
        stiffness: f32,
        damping: f32,
    },
    Rod {
        a: BodyId,
        b: BodyId,
        length: f32,
    },
}

impl Constraint {
    /// Spring with the default stiffness and damping
    pub fn spring(a: BodyId, b: BodyId, rest_length: f32) -> Self {
        Constraint::Spring {
            a,
            b,
            rest_length,
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
        }
    }

    pub fn rod(a: BodyId, b: BodyId, length: f32) -> Self {
        Constraint::Rod { a, b, length }
    }

    /// Builder-style stiffness/damping override (no effect on rods)
    pub fn with_stiffness(mut self, k: f32, d: f32) -> Self {
        if let Constraint::Spring {
            stiffness, damping, ..
        } = &mut self
        {
            *stiffness = k;
            *damping = d;
        }
        self
    }

    /// The two bodies this constraint joins
    pub fn bodies(&self) -> (BodyId, BodyId) {
        match *self {
            Constraint::Spring { a, b, .. } | Constraint::Rod { a, b, .. } => (a, b),
        }
    }

    /// Check body references against a world of `count` bodies
    pub fn validate(&self, count: usize) -> Result<()> {
        let (a, b) = self.bodies();
        for id in [a, b] {
            if id >= count {
                return Err(PhysicsError::UnknownBody { id, count });
            }
        }
        if a == b {
            return Err(PhysicsError::InvalidConstraint {
                reason: "a constraint needs two distinct bodies",
            });
        }
        let length = match *self {
            Constraint::Spring { rest_length, .. } => rest_length,
            Constraint::Rod { length, .. } => length,
        };
        if !(length.is_finite() && length >= 0.0) {
            return Err(PhysicsError::InvalidConstraint {
                reason: "length must be finite and >= 0",
            });
        }
        Ok(())
    }

    /// Apply this constraint. Invalid body references are ignored.
    pub fn solve(&self, bodies: &mut [Body]) {
        let (ia, ib) = self.bodies();
        if ia == ib || ia.max(ib) >= bodies.len() {
            return;
        }
        let (a, b) = pair_mut(bodies, ia, ib);
        match *self {
            Constraint::Spring {
                rest_length,
                stiffness,
                damping,
                ..
            } => solve_spring(a, b, rest_length, stiffness, damping),
            Constraint::Rod { length, .. } => solve_rod(a, b, length),
        }
    }
}

/// Hooke's law plus axial damping. A stretched spring pulls A toward B and
/// B toward A.
fn solve_spring(a: &mut Body, b: &mut Body, rest_length: f32, stiffness: f32, damping: f32) {
    let delta = b.position - a.position;
    let dist = delta.length();
    if dist == 0.0 {
        return;
    }
    let axis = delta / dist;

    let stretch_force = (dist - rest_length) * stiffness;
    let damping_force = (b.velocity - a.velocity).dot(axis) * damping;
    let force: Vec2 = axis * (stretch_force + damping_force);

    a.apply_force(force);
    b.apply_force(-force);
}

/// Position-only distance correction, split by inverse mass
fn solve_rod(a: &mut Body, b: &mut Body, length: f32) {
    let total_inv_mass = a.inverse_mass() + b.inverse_mass();
    if total_inv_mass == 0.0 {
        return;
    }
    let delta = b.position - a.position;
    let dist = delta.length();
    if dist == 0.0 {
        return;
    }

    let error = dist - length;
    let correction = (delta / dist) * (error / total_inv_mass);
    let (inv_a, inv_b) = (a.inverse_mass(), b.inverse_mass());
    a.nudge(correction * inv_a);
    b.nudge(-correction * inv_b);
}

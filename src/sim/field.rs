//! Force fields
//!
//! Fields are stateless and act on every body each step. They all go through
//! `Body::apply_force` with mass-scaled forces, so each field's *acceleration*
//! is what its parameters say and static bodies are skipped automatically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// A field acting on all bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// Constant acceleration `(0, g)`; +y is down
    Gravity { g: f32 },
    /// Linear drag: acceleration `-k * velocity`
    Drag { k: f32 },
    /// Pull toward (or, with negative intensity, push away from) a point,
    /// with acceleration `intensity / distance^exponent`
    InverseDistance {
        intensity: f32,
        center: Vec2,
        exponent: f32,
    },
}

impl Field {
    pub fn gravity(g: f32) -> Self {
        Field::Gravity { g }
    }

    pub fn drag(k: f32) -> Self {
        Field::Drag { k }
    }

    /// Inverse-square attraction toward `center`
    pub fn attractor(intensity: f32, center: Vec2) -> Self {
        Field::InverseDistance {
            intensity,
            center,
            exponent: 2.0,
        }
    }

    pub fn inverse_distance(intensity: f32, center: Vec2, exponent: f32) -> Self {
        Field::InverseDistance {
            intensity,
            center,
            exponent,
        }
    }

    /// Accumulate this field's force on every body
    pub fn apply(&self, bodies: &mut [Body]) {
        for body in bodies.iter_mut().filter(|b| !b.is_static()) {
            self.apply_to(body);
        }
    }

    fn apply_to(&self, body: &mut Body) {
        let mass = body.mass();
        match *self {
            Field::Gravity { g } => body.apply_force(Vec2::new(0.0, g) * mass),
            Field::Drag { k } => body.apply_force(-body.velocity * k * mass),
            Field::InverseDistance {
                intensity,
                center,
                exponent,
            } => {
                let to_center = center - body.position;
                let distance = to_center.length();
                if distance == 0.0 {
                    return;
                }
                let magnitude = mass * intensity / distance.powf(exponent);
                body.apply_force(to_center / distance * magnitude);
            }
        }
    }
}

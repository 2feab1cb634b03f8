//! Fixed timestep simulation driver
//!
//! Owns every body, field and constraint, advances them deterministically and
//! records each body's trajectory for baking.

use glam::Vec2;

use super::bake::{BakedAnimation, Channel, KeyframeTrack};
use super::body::{Body, BodyId, BodyOptions};
use super::collision::Collision;
use super::constraint::Constraint;
use super::field::Field;
use crate::consts::MAX_STEPS;
use crate::error::{PhysicsError, Result};
use crate::settings::SolverSettings;
use crate::shape::{Bounds, Shape};

/// A physics world
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Bodies in creation order (index == id)
    bodies: Vec<Body>,
    fields: Vec<Field>,
    constraints: Vec<Constraint>,
    settings: SolverSettings,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SolverSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: SolverSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Create a body from a shape and return its id
    pub fn add(&mut self, shape: &dyn Shape, options: BodyOptions) -> Result<BodyId> {
        let id = self.bodies.len();
        let body = Body::new(id, shape, options)?;
        log::debug!(
            "Added body {} ({:?}, mass={:.3}, static={})",
            id,
            body.kind(),
            body.mass(),
            body.is_static()
        );
        self.bodies.push(body);
        Ok(id)
    }

    pub fn add_field(&mut self, field: Field) {
        log::debug!("Added field {:?}", field);
        self.fields.push(field);
    }

    /// Register a constraint between two existing bodies
    pub fn constraint(&mut self, constraint: Constraint) -> Result<&Constraint> {
        constraint.validate(self.bodies.len())?;
        log::debug!("Added constraint {:?}", constraint);
        self.constraints.push(constraint);
        Ok(&self.constraints[self.constraints.len() - 1])
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn body(&self, id: BodyId) -> Result<&Body> {
        let count = self.bodies.len();
        self.bodies.get(id).ok_or(PhysicsError::UnknownBody { id, count })
    }

    pub fn body_mut(&mut self, id: BodyId) -> Result<&mut Body> {
        let count = self.bodies.len();
        self.bodies
            .get_mut(id)
            .ok_or(PhysicsError::UnknownBody { id, count })
    }

    /// Advance one fixed step: fields, constraints, integration, collisions.
    /// The order is part of the contract and must not change.
    pub fn step(&mut self, dt: f32) {
        for field in &self.fields {
            field.apply(&mut self.bodies);
        }

        for constraint in &self.constraints {
            constraint.solve(&mut self.bodies);
        }

        let damping = self.settings.angular_damping;
        for body in &mut self.bodies {
            body.integrate_damped(dt, damping);
        }

        // Naive O(n²) narrow phase, ascending (i, j)
        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static() && b.is_static() {
                    continue;
                }
                if let Some(collision) = Collision::solve(a, b) {
                    collision.resolve(&mut self.bodies, &self.settings);
                }
            }
        }
    }

    /// Current contacts, without resolving them
    pub fn collisions(&self) -> Vec<Collision> {
        let mut found = Vec::new();
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                if a.is_static() && b.is_static() {
                    continue;
                }
                found.extend(Collision::solve(a, b));
            }
        }
        found
    }

    /// Run `floor(duration / dt)` steps and bake the motion.
    ///
    /// Runs longer than [`MAX_STEPS`] steps are rejected up front.
    ///
    /// Each body's state is recorded *before* each step, keyed by normalized
    /// time. Bodies keep their end-of-run state afterwards.
    pub fn simulate(&mut self, duration: f32, dt: f32) -> Result<BakedAnimation> {
        if !(dt.is_finite() && dt > 0.0 && duration.is_finite() && duration >= 0.0) {
            return Err(PhysicsError::InvalidTimestep { duration, dt });
        }

        // Ratios within f32 rounding of an integer count as that integer, so
        // 1.0 / 0.1 is 10 steps
        let ratio = f64::from(duration) / f64::from(dt);
        let ratio = ratio * (1.0 + 2.0 * f64::from(f32::EPSILON));
        if ratio > MAX_STEPS as f64 {
            return Err(PhysicsError::TooManySteps {
                duration,
                dt,
                max: MAX_STEPS,
            });
        }
        let steps = ratio.floor() as usize;
        if steps == 0 && duration > 0.0 {
            log::warn!("dt {} exceeds duration {}, nothing to simulate", dt, duration);
        }

        let mut tracks: Vec<KeyframeTrack> = self
            .bodies
            .iter()
            .map(|b| KeyframeTrack {
                body: b.id(),
                translate_x: Channel::default(),
                translate_y: Channel::default(),
                rotation: Channel::default(),
                bounds: b.local_bounds().translated(b.position),
            })
            .collect();

        let mut elapsed = 0.0;
        for _ in 0..steps {
            let t = if duration > 0.0 { elapsed / duration } else { 0.0 };
            for (body, track) in self.bodies.iter().zip(tracks.iter_mut()) {
                track.translate_x.push(t, body.position.x);
                track.translate_y.push(t, body.position.y);
                track.rotation.push(t, body.rotation);
            }
            self.step(dt);
            elapsed += dt;
        }

        for (body, track) in self.bodies.iter().zip(tracks.iter_mut()) {
            if let Some(swept) = swept_bounds(body.local_bounds(), track) {
                track.bounds = swept;
            }
        }

        log::debug!(
            "Simulated {} bodies for {} steps (dt={})",
            self.bodies.len(),
            steps,
            dt
        );
        Ok(BakedAnimation::new(tracks))
    }
}

/// Local bounds placed at the extreme recorded offsets. Conservative only for
/// translation; rotation's effect on the AABB is ignored.
fn swept_bounds(local: Bounds, track: &KeyframeTrack) -> Option<Bounds> {
    let (min_x, max_x) = track.translate_x.range()?;
    let (min_y, max_y) = track.translate_y.range()?;
    let low = local.translated(Vec2::new(min_x, min_y));
    let high = local.translated(Vec2::new(max_x, max_y));
    Some(low.union(&high))
}

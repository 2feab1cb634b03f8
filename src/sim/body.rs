//! Rigid bodies
//!
//! A body is the mutable unit of simulation. It owns linear and angular state
//! plus the net force/torque accumulated during the current step.
//!
//! Unit convention: everything that pushes a body (fields, springs, explicit
//! forces) adds a *force*; `integrate` divides by mass exactly once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::{Collider, ColliderKind};
use super::material::Material;
use crate::consts::{ANGULAR_DAMPING, MASS_AREA_SCALE};
use crate::error::{PhysicsError, Result};
use crate::shape::{Bounds, Shape};
use crate::{cross, cross_scalar};

/// Index of a body in its world (creation order)
pub type BodyId = usize;

/// Construction options for `World::add`
#[derive(Debug, Clone, Default)]
pub struct BodyOptions {
    /// Defaults to the shape's own collider
    pub collider: Option<Collider>,
    /// Defaults to `Material::default()`
    pub material: Option<Material>,
    /// Defaults to density * area / 1000
    pub mass: Option<f32>,
    /// Static bodies have infinite mass and never move
    pub is_static: bool,
}

impl BodyOptions {
    pub fn fixed() -> Self {
        Self {
            is_static: true,
            ..Default::default()
        }
    }
}

/// A rigid body wrapping a renderable shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    id: BodyId,
    /// Center of mass, world space
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians
    pub rotation: f32,
    /// Radians per second
    pub angular_velocity: f32,
    /// Net force for the current step
    pub force: Vec2,
    /// Net torque for the current step
    pub torque: f32,
    mass: f32,
    inverse_mass: f32,
    inverse_inertia: f32,
    is_static: bool,
    material: Material,
    collider: Collider,
    /// Shape bounds re-centered on the body origin
    local_bounds: Bounds,
}

impl Body {
    /// Build a body from a shape. Position is the shape's bounds center and
    /// rotation is read from the shape; neither is read again afterwards.
    pub fn new(id: BodyId, shape: &dyn Shape, options: BodyOptions) -> Result<Self> {
        let bounds = shape.bounds();
        let collider = options.collider.unwrap_or_else(|| shape.default_collider());
        collider.validate()?;

        let material = options.material.unwrap_or_default();
        material.validate()?;

        let mass = match options.mass {
            Some(m) if m.is_finite() && m > 0.0 => m,
            Some(m) => return Err(PhysicsError::InvalidMass(m)),
            None => material.density * collider.area() / MASS_AREA_SCALE,
        };

        let (inverse_mass, inverse_inertia) = if options.is_static {
            (0.0, 0.0)
        } else {
            (1.0 / mass, 1.0 / collider.inertia(mass))
        };

        let center = bounds.center();
        Ok(Self {
            id,
            position: center,
            velocity: Vec2::ZERO,
            rotation: shape.rotation(),
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inverse_mass,
            inverse_inertia,
            is_static: options.is_static,
            material,
            collider,
            local_bounds: bounds.translated(-center),
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// 0 for static bodies
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// 0 for static bodies
    pub fn inverse_inertia(&self) -> f32 {
        self.inverse_inertia
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn kind(&self) -> ColliderKind {
        self.collider.kind()
    }

    pub fn local_bounds(&self) -> Bounds {
        self.local_bounds
    }

    /// Add a force through the center of mass
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
    }

    /// Add a force at a world-space point, producing torque as well
    pub fn apply_force_at(&mut self, force: Vec2, point: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
        self.torque += cross(point - self.position, force);
    }

    /// Instantaneous velocity change from an impulse applied at lever arm `r`
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inverse_mass;
        self.angular_velocity += cross(r, impulse) * self.inverse_inertia;
    }

    /// Velocity of the material point at lever arm `r` from the center
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity + cross_scalar(self.angular_velocity, r)
    }

    /// Advance one step with the default angular damping
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_damped(dt, ANGULAR_DAMPING);
    }

    /// Semi-implicit Euler: velocities from this step's forces first, then
    /// positions from the new velocities. Clears the accumulators.
    pub fn integrate_damped(&mut self, dt: f32, angular_damping: f32) {
        if self.is_static {
            return;
        }

        self.velocity += self.force * self.inverse_mass * dt;
        self.position += self.velocity * dt;

        self.angular_velocity += self.torque * self.inverse_inertia * dt;
        self.rotation += self.angular_velocity * dt;
        self.angular_velocity *= angular_damping;

        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    /// Shift the body without touching its velocity (static bodies don't move)
    pub(crate) fn nudge(&mut self, delta: Vec2) {
        if !self.is_static {
            self.position += delta;
        }
    }
}

/// Mutable access to two distinct bodies at once
pub(crate) fn pair_mut(bodies: &mut [Body], i: BodyId, j: BodyId) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "a body cannot pair with itself");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Circle, Rect};

    fn ball(radius: f32) -> Body {
        Body::new(0, &Circle::new(radius), BodyOptions::default()).unwrap()
    }

    #[test]
    fn test_body_reads_shape_once() {
        let shape = Rect::new(20.0, 10.0).at(Vec2::new(5.0, 7.0)).rotated(0.3);
        let body = Body::new(3, &shape, BodyOptions::default()).unwrap();
        assert_eq!(body.id(), 3);
        assert_eq!(body.position, Vec2::new(5.0, 7.0));
        assert_eq!(body.rotation, 0.3);
        assert_eq!(body.kind(), ColliderKind::Box);
        assert_eq!(body.local_bounds(), Bounds::new(-10.0, -5.0, 20.0, 10.0));
    }

    #[test]
    fn test_default_mass_from_density() {
        let body = Body::new(0, &Rect::new(100.0, 50.0), BodyOptions::default()).unwrap();
        assert!((body.mass() - 5.0).abs() < 1e-5);
        assert!((body.inverse_mass() - 0.2).abs() < 1e-6);
        let inertia = 5.0 * (100.0 * 100.0 + 50.0 * 50.0) / 12.0;
        assert!((body.inverse_inertia() - 1.0 / inertia).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_mass() {
        let opts = BodyOptions {
            mass: Some(5.0),
            ..Default::default()
        };
        let body = Body::new(0, &Circle::new(2.0), opts).unwrap();
        assert_eq!(body.mass(), 5.0);
        assert!((body.inverse_inertia() - 1.0 / 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_static_has_zero_inverses() {
        let body = Body::new(0, &Circle::new(2.0), BodyOptions::fixed()).unwrap();
        assert!(body.is_static());
        assert_eq!(body.inverse_mass(), 0.0);
        assert_eq!(body.inverse_inertia(), 0.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let opts = BodyOptions {
            mass: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            Body::new(0, &Circle::new(2.0), opts),
            Err(PhysicsError::InvalidMass(_))
        ));
        assert!(Body::new(0, &Circle::new(-1.0), BodyOptions::default()).is_err());
        let opts = BodyOptions {
            collider: Some(Collider::Box {
                width: 1.0,
                height: 0.0,
            }),
            ..Default::default()
        };
        assert!(Body::new(0, &Rect::new(1.0, 1.0), opts).is_err());
    }

    #[test]
    fn test_integrate_semi_implicit() {
        let mut body = ball(5.0);
        let m = body.mass();
        body.apply_force(Vec2::new(0.0, 10.0 * m));
        body.integrate(0.5);
        // v = 10 * 0.5 = 5, then x = 5 * 0.5 = 2.5
        assert!((body.velocity.y - 5.0).abs() < 1e-4);
        assert!((body.position.y - 2.5).abs() < 1e-4);
        assert_eq!(body.force, Vec2::ZERO);
    }

    #[test]
    fn test_integrate_damps_spin() {
        let mut body = ball(5.0);
        body.angular_velocity = 1.0;
        body.integrate(0.1);
        assert!((body.rotation - 0.1).abs() < 1e-6);
        assert!((body.angular_velocity - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_static_discards_forces() {
        let mut body = Body::new(0, &Circle::new(2.0), BodyOptions::fixed()).unwrap();
        body.apply_force(Vec2::new(100.0, 0.0));
        body.apply_force_at(Vec2::new(0.0, 100.0), Vec2::new(1.0, 0.0));
        body.apply_impulse(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0));
        body.integrate(1.0);
        assert_eq!(body.force, Vec2::ZERO);
        assert_eq!(body.torque, 0.0);
        assert_eq!(body.position, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_force_at_point_makes_torque() {
        let mut body = ball(5.0);
        body.apply_force_at(Vec2::new(0.0, 10.0), Vec2::new(2.0, 0.0));
        assert_eq!(body.torque, 20.0);
        assert_eq!(body.force, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut bodies = vec![ball(1.0), ball(2.0), ball(3.0)];
        let (a, b) = pair_mut(&mut bodies, 2, 0);
        a.position.x = 7.0;
        b.position.x = -7.0;
        assert_eq!(bodies[2].position.x, 7.0);
        assert_eq!(bodies[0].position.x, -7.0);
    }

    #[test]
    fn test_velocity_at_includes_spin() {
        let mut body = ball(5.0);
        body.velocity = Vec2::new(1.0, 0.0);
        body.angular_velocity = 2.0;
        assert_eq!(body.velocity_at(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0));
    }
}

//! Narrow-phase collision detection and impulse response
//!
//! Detection dispatches on the pair of collider kinds. Each unordered pair has
//! a single geometric routine; the mirrored ordering calls it with the bodies
//! swapped and flips the result instead of re-deriving anything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, pair_mut};
use super::collider::{Collider, box_axes, box_vertices, project};
use crate::settings::SolverSettings;
use crate::{cross, rotate};

/// Contact between two overlapping bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub a: BodyId,
    pub b: BodyId,
    /// Unit vector pointing from A toward B
    pub normal: Vec2,
    /// Penetration along the normal, >= 0
    pub depth: f32,
    /// One representative contact point, world space
    pub contact: Vec2,
}

impl Collision {
    /// Detect overlap between two bodies. `None` if they are apart.
    pub fn solve(a: &Body, b: &Body) -> Option<Collision> {
        match (*a.collider(), *b.collider()) {
            (Collider::Circle { radius: ra }, Collider::Circle { radius: rb }) => {
                circle_circle(a, ra, b, rb)
            }
            (Collider::Box { .. }, Collider::Circle { radius }) => box_circle(a, b, radius),
            (Collider::Circle { radius }, Collider::Box { .. }) => {
                box_circle(b, a, radius).map(Collision::flipped)
            }
            (Collider::Box { .. }, Collider::Box { .. }) => box_box(a, b),
        }
    }

    /// The same contact seen from B's side
    pub fn flipped(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            normal: -self.normal,
            ..self
        }
    }

    /// Push the bodies apart and exchange impulses.
    ///
    /// `bodies` is indexed by id, as in `World`. Ids that don't resolve to
    /// two distinct bodies make this a no-op.
    pub fn resolve(&self, bodies: &mut [Body], settings: &SolverSettings) {
        if self.a == self.b || self.a.max(self.b) >= bodies.len() {
            return;
        }
        let (a, b) = pair_mut(bodies, self.a, self.b);
        self.resolve_pair(a, b, settings);
    }

    fn resolve_pair(&self, a: &mut Body, b: &mut Body, settings: &SolverSettings) {
        let total_inv_mass = a.inverse_mass() + b.inverse_mass();
        if total_inv_mass == 0.0 {
            return;
        }
        let n = self.normal;

        // Positional correction, lighter body moves more
        let correction =
            (self.depth - settings.slop).max(0.0) / total_inv_mass * settings.correction_percent;
        let correction = n * correction;
        a.nudge(-correction * a.inverse_mass());
        b.nudge(correction * b.inverse_mass());

        let ra = self.contact - a.position;
        let rb = self.contact - b.position;

        let rv = b.velocity_at(rb) - a.velocity_at(ra);
        let vel_along_normal = rv.dot(n);
        if vel_along_normal > 0.0 {
            return;
        }

        let e = a.material().restitution.min(b.material().restitution);
        let j = -(1.0 + e) * vel_along_normal / effective_mass(a, b, ra, rb, n);
        let impulse = n * j;
        a.apply_impulse(-impulse, ra);
        b.apply_impulse(impulse, rb);
        log::trace!("resolved {}<->{} depth={:.3} j={:.3}", self.a, self.b, self.depth, j);

        // Friction along the pre-impulse sliding direction
        let tangent = (rv - n * vel_along_normal).normalize_or_zero();
        if tangent == Vec2::ZERO {
            return;
        }
        let jt = -rv.dot(tangent) / effective_mass(a, b, ra, rb, tangent);
        if jt.abs() < settings.friction_threshold {
            return;
        }

        let mu = (a.material().friction * b.material().friction).sqrt();
        let max_friction = (j * mu).abs();
        let friction_impulse = tangent * jt.clamp(-max_friction, max_friction);
        a.apply_impulse(-friction_impulse, ra);
        b.apply_impulse(friction_impulse, rb);
    }
}

/// Impulse denominator along `dir`, including both bodies' rotational terms
fn effective_mass(a: &Body, b: &Body, ra: Vec2, rb: Vec2, dir: Vec2) -> f32 {
    let ra_d = cross(ra, dir);
    let rb_d = cross(rb, dir);
    a.inverse_mass()
        + b.inverse_mass()
        + ra_d * ra_d * a.inverse_inertia()
        + rb_d * rb_d * b.inverse_inertia()
}

/// Circle vs circle. Touching circles count as colliding.
pub fn circle_circle(a: &Body, ra: f32, b: &Body, rb: f32) -> Option<Collision> {
    let n = b.position - a.position;
    let r = ra + rb;
    let dist_sq = n.length_squared();
    if dist_sq > r * r {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist == 0.0 { Vec2::X } else { n / dist };
    Some(Collision {
        a: a.id(),
        b: b.id(),
        normal,
        depth: r - dist,
        contact: a.position + normal * ra,
    })
}

/// Box vs circle, with the normal pointing from the box to the circle.
///
/// Works in the box's local frame: clamp the circle center to the box
/// extents, then rotate the result back out.
pub fn box_circle(box_body: &Body, circle: &Body, radius: f32) -> Option<Collision> {
    let half = box_body.collider().half_extents();
    let local = rotate(circle.position - box_body.position, -box_body.rotation);
    let closest = local.clamp(-half, half);

    let offset = local - closest;
    let dist = offset.length();
    if dist > radius {
        return None;
    }

    // Center inside the box: push along the local vertical axis
    let (local_normal, depth) = if dist == 0.0 {
        (Vec2::Y, radius)
    } else {
        (offset / dist, radius - dist)
    };

    Some(Collision {
        a: box_body.id(),
        b: circle.id(),
        normal: rotate(local_normal, box_body.rotation),
        depth,
        contact: box_body.position + rotate(closest, box_body.rotation),
    })
}

/// Box vs box via the separating axis theorem
pub fn box_box(a: &Body, b: &Body) -> Option<Collision> {
    let verts_a = box_vertices(a.collider().half_extents(), a.position, a.rotation);
    let verts_b = box_vertices(b.collider().half_extents(), b.position, b.rotation);
    let axes_a = box_axes(a.rotation);
    let axes_b = box_axes(b.rotation);

    let mut depth = f32::MAX;
    let mut normal = Vec2::ZERO;
    for axis in axes_a.iter().chain(axes_b.iter()) {
        let (min_a, max_a) = project(&verts_a, *axis);
        let (min_b, max_b) = project(&verts_b, *axis);
        if max_a < min_b || max_b < min_a {
            return None;
        }
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap < depth {
            depth = overlap;
            normal = *axis;
        }
    }

    if normal.dot(b.position - a.position) < 0.0 {
        normal = -normal;
    }

    // Whichever box has a face most aligned with the normal is the reference;
    // the contact is the incident box's vertex deepest into it.
    let alignment = |axes: &[Vec2; 2]| {
        axes.iter()
            .map(|ax| ax.dot(normal).abs())
            .fold(0.0, f32::max)
    };
    let contact = if alignment(&axes_a) >= alignment(&axes_b) {
        extreme_vertex(&verts_b, normal, false)
    } else {
        extreme_vertex(&verts_a, normal, true)
    };

    Some(Collision {
        a: a.id(),
        b: b.id(),
        normal,
        depth,
        contact,
    })
}

/// Vertex with the largest (or smallest) projection on `axis`
fn extreme_vertex(vertices: &[Vec2; 4], axis: Vec2, largest: bool) -> Vec2 {
    let mut best = vertices[0];
    let mut best_proj = best.dot(axis);
    for v in &vertices[1..] {
        let p = v.dot(axis);
        if (largest && p > best_proj) || (!largest && p < best_proj) {
            best = *v;
            best_proj = p;
        }
    }
    best
}

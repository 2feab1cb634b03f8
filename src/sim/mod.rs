//! Deterministic rigid-body simulation
//!
//! This module must stay pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (bodies by id, collision pairs by ascending (i, j))
//! - No rendering dependencies

pub mod bake;
pub mod body;
pub mod collider;
pub mod collision;
pub mod constraint;
pub mod field;
pub mod material;
pub mod world;

pub use bake::{BakedAnimation, Channel, Keyframe, KeyframeTrack};
pub use body::{Body, BodyId, BodyOptions};
pub use collider::{Collider, ColliderKind};
pub use collision::{Collision, box_box, box_circle, circle_circle};
pub use constraint::Constraint;
pub use field::Field;
pub use material::Material;
pub use world::World;

//! Surface and bulk material properties

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Material attached to a body. Immutable once the body exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Mass per (scaled) unit area, > 0
    pub density: f32,
    /// Bounciness in [0, 1]: 0 = fully inelastic, 1 = fully elastic
    pub restitution: f32,
    /// Coulomb friction coefficient, >= 0
    pub friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            restitution: 0.5,
            friction: 0.3,
        }
    }
}

impl Material {
    pub fn new(density: f32, restitution: f32, friction: f32) -> Result<Self> {
        let material = Self {
            density,
            restitution,
            friction,
        };
        material.validate()?;
        Ok(material)
    }

    /// A perfectly elastic, frictionless material
    pub fn bouncy() -> Self {
        Self {
            density: 1.0,
            restitution: 1.0,
            friction: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(PhysicsError::InvalidMaterial {
                reason: "density must be finite and > 0",
            });
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidMaterial {
                reason: "restitution must be in [0, 1]",
            });
        }
        if !(self.friction.is_finite() && self.friction >= 0.0) {
            return Err(PhysicsError::InvalidMaterial {
                reason: "friction must be finite and >= 0",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_validation() {
        assert!(Material::new(1.0, 0.5, 0.3).is_ok());
        assert!(Material::new(0.0, 0.5, 0.3).is_err());
        assert!(Material::new(1.0, 1.5, 0.3).is_err());
        assert!(Material::new(1.0, -0.1, 0.3).is_err());
        assert!(Material::new(1.0, 0.5, -1.0).is_err());
        assert!(Material::default().validate().is_ok());
        assert!(Material::bouncy().validate().is_ok());
    }
}

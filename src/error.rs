//! Error types
//!
//! The stepping core never fails: degenerate geometry falls back to canonical
//! normals and zero-mass divisions are skipped. Errors only come from
//! constructing things with invalid inputs.

/// Errors raised while building or configuring a simulation
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("invalid {what}: {value} (must be finite and > 0)")]
    InvalidDimension { what: &'static str, value: f32 },

    #[error("invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f32),

    #[error("invalid material: {reason}")]
    InvalidMaterial { reason: &'static str },

    #[error("body {id} does not exist (count={count})")]
    UnknownBody { id: usize, count: usize },

    #[error("invalid constraint: {reason}")]
    InvalidConstraint { reason: &'static str },

    #[error("invalid timestep: duration={duration}, dt={dt}")]
    InvalidTimestep { duration: f32, dt: f32 },

    #[error("{duration}s at dt={dt} needs more than {max} steps")]
    TooManySteps { duration: f32, dt: f32, max: usize },

    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: &'static str },

    #[error("settings parse failed: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Check that a geometric quantity is finite and strictly positive
pub(crate) fn positive(what: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidDimension { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        assert_eq!(positive("radius", 2.5).unwrap(), 2.5);
        assert!(positive("radius", 0.0).is_err());
        assert!(positive("radius", -1.0).is_err());
        assert!(positive("radius", f32::NAN).is_err());
        assert!(positive("radius", f32::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        let err = PhysicsError::InvalidDimension { what: "width", value: -3.0 };
        assert_eq!(err.to_string(), "invalid width: -3 (must be finite and > 0)");

        let err = PhysicsError::UnknownBody { id: 4, count: 2 };
        assert_eq!(err.to_string(), "body 4 does not exist (count=2)");

        let err = PhysicsError::TooManySteps { duration: 2.0, dt: 0.5, max: 3 };
        assert_eq!(err.to_string(), "2s at dt=0.5 needs more than 3 steps");
    }
}

//! Solver tuning
//!
//! Knobs that trade stability for accuracy in contact resolution. Serialized
//! as JSON so scenes can carry their own tuning.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PhysicsError, Result};

/// Contact-stiffness presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SolverPreset {
    /// Gentle correction, large slop. Less jitter, visible sinking.
    Soft,
    #[default]
    Default,
    /// Full correction every step, tiny slop.
    Stiff,
}

impl SolverPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverPreset::Soft => "Soft",
            SolverPreset::Default => "Default",
            SolverPreset::Stiff => "Stiff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "soft" => Some(SolverPreset::Soft),
            "default" | "normal" => Some(SolverPreset::Default),
            "stiff" | "hard" => Some(SolverPreset::Stiff),
            _ => None,
        }
    }

    /// Fraction of penetration corrected per contact
    pub fn correction_percent(&self) -> f32 {
        match self {
            SolverPreset::Soft => 0.4,
            SolverPreset::Default => CORRECTION_PERCENT,
            SolverPreset::Stiff => 1.0,
        }
    }

    /// Penetration allowance
    pub fn slop(&self) -> f32 {
        match self {
            SolverPreset::Soft => 0.05,
            SolverPreset::Default => SLOP,
            SolverPreset::Stiff => 0.005,
        }
    }
}

/// Solver settings owned by a `World`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Preset the correction values were derived from
    pub preset: SolverPreset,
    /// Penetration allowance before positional correction
    pub slop: f32,
    /// Fraction of penetration corrected per contact, in (0, 1]
    pub correction_percent: f32,
    /// Multiplier applied to angular velocity after each integration, in [0, 1]
    pub angular_damping: f32,
    /// Friction impulses with magnitude below this are skipped
    pub friction_threshold: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            preset: SolverPreset::Default,
            slop: SLOP,
            correction_percent: CORRECTION_PERCENT,
            angular_damping: ANGULAR_DAMPING,
            friction_threshold: FRICTION_THRESHOLD,
        }
    }
}

impl SolverSettings {
    /// Create settings from a preset (applies preset defaults)
    pub fn from_preset(preset: SolverPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (updates correction-dependent settings)
    pub fn apply_preset(&mut self, preset: SolverPreset) {
        self.preset = preset;
        self.slop = preset.slop();
        self.correction_percent = preset.correction_percent();
    }

    /// Reject values the solver cannot use
    pub fn validate(&self) -> Result<()> {
        if !(self.slop.is_finite() && self.slop >= 0.0) {
            return Err(PhysicsError::InvalidSettings { reason: "slop must be >= 0" });
        }
        if !(self.correction_percent > 0.0 && self.correction_percent <= 1.0) {
            return Err(PhysicsError::InvalidSettings {
                reason: "correction_percent must be in (0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.angular_damping) {
            return Err(PhysicsError::InvalidSettings {
                reason: "angular_damping must be in [0, 1]",
            });
        }
        if !(self.friction_threshold.is_finite() && self.friction_threshold >= 0.0) {
            return Err(PhysicsError::InvalidSettings {
                reason: "friction_threshold must be >= 0",
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::debug!("Loaded solver settings ({})", settings.preset.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!(SolverPreset::from_str("SOFT"), Some(SolverPreset::Soft));
        assert_eq!(SolverPreset::from_str("hard"), Some(SolverPreset::Stiff));
        assert_eq!(SolverPreset::from_str("wobbly"), None);
    }

    #[test]
    fn test_from_preset() {
        let s = SolverSettings::from_preset(SolverPreset::Stiff);
        assert_eq!(s.correction_percent, 1.0);
        assert_eq!(s.slop, 0.005);
        assert_eq!(s.angular_damping, ANGULAR_DAMPING);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let s = SolverSettings::from_json(r#"{"slop": 0.1}"#).unwrap();
        assert_eq!(s.slop, 0.1);
        assert_eq!(s.correction_percent, CORRECTION_PERCENT);

        let back = SolverSettings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(matches!(
            SolverSettings::from_json(r#"{"correction_percent": 0.0}"#),
            Err(PhysicsError::InvalidSettings { .. })
        ));
        assert!(matches!(
            SolverSettings::from_json(r#"{"angular_damping": 1.5}"#),
            Err(PhysicsError::InvalidSettings { .. })
        ));
        assert!(matches!(
            SolverSettings::from_json("not json"),
            Err(PhysicsError::Settings(_))
        ));
    }
}

//! # Material Properties
//!
//! Strength and stiffness of the board the girder is built from and of the
//! contact cement that joins its plates.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::materials::MaterialProperties;
//!
//! let matboard = MaterialProperties::matboard();
//! assert_eq!(matboard.compressive_strength.value(), 6.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Megapascals;

/// Strength and elastic constants of the girder material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Ultimate tensile strength
    pub tensile_strength: Megapascals,
    /// Ultimate compressive strength
    pub compressive_strength: Megapascals,
    /// Ultimate shear strength of the board
    pub shear_strength: Megapascals,
    /// Shear strength of the glued joint
    pub glue_shear_strength: Megapascals,
    /// Young's modulus E
    pub youngs_modulus: Megapascals,
    /// Poisson's ratio ν
    pub poisson_ratio: f64,
}

impl MaterialProperties {
    /// 1.27 mm matboard joined with contact cement
    pub fn matboard() -> Self {
        MaterialProperties {
            tensile_strength: Megapascals(30.0),
            compressive_strength: Megapascals(6.0),
            shear_strength: Megapascals(4.0),
            glue_shear_strength: Megapascals(2.0),
            youngs_modulus: Megapascals(4000.0),
            poisson_ratio: 0.2,
        }
    }

    /// Validate material constants.
    ///
    /// Strengths and modulus must be positive; ν must lie in [0, 0.5).
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("tensile_strength", self.tensile_strength.value()),
            ("compressive_strength", self.compressive_strength.value()),
            ("shear_strength", self.shear_strength.value()),
            ("glue_shear_strength", self.glue_shear_strength.value()),
            ("youngs_modulus", self.youngs_modulus.value()),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be positive and finite",
                ));
            }
        }
        if !(0.0..0.5).contains(&self.poisson_ratio) {
            return Err(CalcError::invalid_input(
                "poisson_ratio",
                self.poisson_ratio.to_string(),
                "Poisson's ratio must lie in [0, 0.5)",
            ));
        }
        Ok(())
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self::matboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matboard_is_valid() {
        assert!(MaterialProperties::matboard().validate().is_ok());
    }

    #[test]
    fn test_poisson_ratio_range() {
        let mut material = MaterialProperties::matboard();
        material.poisson_ratio = 0.5;
        assert!(material.validate().is_err());
        material.poisson_ratio = -0.1;
        assert!(material.validate().is_err());
        material.poisson_ratio = 0.0;
        assert!(material.validate().is_ok());
    }

    #[test]
    fn test_zero_strength_rejected() {
        let mut material = MaterialProperties::matboard();
        material.glue_shear_strength = Megapascals(0.0);
        let err = material.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_serialization_uses_plain_numbers() {
        let json = serde_json::to_string(&MaterialProperties::matboard()).unwrap();
        assert!(json.contains("\"youngs_modulus\":4000.0"));
    }
}

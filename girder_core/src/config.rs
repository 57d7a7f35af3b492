//! # Design Configuration
//!
//! `DesignConfig` holds every constant the failure engine depends on:
//! material strengths, fixed girder geometry and the material budget. It is
//! immutable once built and passed by reference into each evaluation.
//! Configurations serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! DesignConfig
//! ├── material: MaterialProperties (strengths, E, ν)
//! ├── geometry: GeometryConstants (span, board thickness, bottom width, glue tab)
//! └── budget: MaterialBudget (sheet size, usable fraction, fixed diaphragms)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use girder_core::config::DesignConfig;
//!
//! let config = DesignConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.geometry.bridge_length.value(), 1200.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::file_io::{read_to_string, write_atomic};
use crate::materials::MaterialProperties;
use crate::units::Millimeters;

/// Fixed dimensions of the girder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConstants {
    /// Length of the girder (mm)
    pub bridge_length: Millimeters,
    /// Thickness of one board layer (mm)
    pub board_thickness: Millimeters,
    /// Outside width of the bottom flange (mm)
    pub bottom_width: Millimeters,
    /// Width of each glue tab under the top flange (mm)
    pub glue_tab_width: Millimeters,
}

impl Default for GeometryConstants {
    fn default() -> Self {
        GeometryConstants {
            bridge_length: Millimeters(1200.0),
            board_thickness: Millimeters(1.27),
            bottom_width: Millimeters(80.0),
            glue_tab_width: Millimeters(5.0),
        }
    }
}

/// Available board and how much of it can be used
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialBudget {
    /// Sheet width (mm)
    pub sheet_width: Millimeters,
    /// Sheet length (mm)
    pub sheet_length: Millimeters,
    /// Share of the sheet volume a design may use
    pub usable_fraction: f64,
    /// Diaphragms always present (at the ends)
    pub fixed_diaphragms: u32,
}

impl Default for MaterialBudget {
    fn default() -> Self {
        MaterialBudget {
            sheet_width: Millimeters(813.0),
            sheet_length: Millimeters(1016.0),
            usable_fraction: 0.9,
            fixed_diaphragms: 2,
        }
    }
}

/// Complete set of constants for a design evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Board and glue properties
    pub material: MaterialProperties,
    /// Fixed girder dimensions
    pub geometry: GeometryConstants,
    /// Material budget
    pub budget: MaterialBudget,
}

impl DesignConfig {
    /// Volume of one sheet of board (mm³)
    pub fn sheet_volume(&self) -> f64 {
        self.budget.sheet_width.value() * self.budget.sheet_length.value() * self.geometry.board_thickness.value()
    }

    /// Largest volume a design may use (mm³)
    pub fn usable_volume(&self) -> f64 {
        self.budget.usable_fraction * self.sheet_volume()
    }

    /// Validate all constants.
    pub fn validate(&self) -> CalcResult<()> {
        self.material.validate()?;

        let positive = [
            ("bridge_length", self.geometry.bridge_length.value()),
            ("board_thickness", self.geometry.board_thickness.value()),
            ("bottom_width", self.geometry.bottom_width.value()),
            ("glue_tab_width", self.geometry.glue_tab_width.value()),
            ("sheet_width", self.budget.sheet_width.value()),
            ("sheet_length", self.budget.sheet_length.value()),
            ("usable_fraction", self.budget.usable_fraction),
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

        if self.budget.usable_fraction > 1.0 {
            return Err(CalcError::invalid_input(
                "usable_fraction",
                self.budget.usable_fraction.to_string(),
                "Cannot use more than the whole sheet",
            ));
        }

        if self.geometry.bottom_width.value() <= 2.0 * self.geometry.board_thickness.value() {
            return Err(CalcError::invalid_input(
                "bottom_width",
                self.geometry.bottom_width.value().to_string(),
                "Bottom flange must be wider than both webs",
            ));
        }

        Ok(())
    }
}

/// Load a configuration from a JSON file and validate it.
///
/// # Example
///
/// ```rust,no_run
/// use girder_core::config::load_config;
/// use std::path::Path;
///
/// let config = load_config(Path::new("design.json"))?;
/// println!("E = {} MPa", config.material.youngs_modulus.value());
/// # Ok::<(), girder_core::errors::CalcError>(())
/// ```
pub fn load_config(path: &Path) -> CalcResult<DesignConfig> {
    let contents = read_to_string(path)?;
    let config: DesignConfig = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    config.validate()?;
    Ok(config)
}

/// Save a configuration as pretty JSON with atomic write semantics.
pub fn save_config(config: &DesignConfig, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(config).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DesignConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.budget.fixed_diaphragms, 2);
        assert_eq!(config.material, MaterialProperties::matboard());
    }

    #[test]
    fn test_usable_volume() {
        let config = DesignConfig::default();
        let expected = 0.9 * 813.0 * 1016.0 * 1.27;
        assert!((config.usable_volume() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_negative_thickness_rejected() {
        let mut config = DesignConfig::default();
        config.geometry.board_thickness = Millimeters(-1.27);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("board_thickness"));
    }

    #[test]
    fn test_usable_fraction_bounds() {
        let mut config = DesignConfig::default();
        config.budget.usable_fraction = 1.5;
        assert!(config.validate().is_err());
        config.budget.usable_fraction = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.json");

        let mut config = DesignConfig::default();
        config.material.poisson_ratio = 0.25;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");

        let mut config = DesignConfig::default();
        config.material.poisson_ratio = 0.7;
        save_config(&config, &path).unwrap();

        assert_eq!(load_config(&path).unwrap_err().error_code(), "INVALID_INPUT");
    }
}

//! # Box Girder Failure Analysis
//!
//! Checks a thin-walled box girder against eight failure modes under a
//! design shear and moment, and estimates how much board the design uses.
//!
//! ## Section Layout
//!
//! ```text
//!        ┌────────────────────────────┐  top flange (flange_layers × t)
//!        └──────┬─┬──────────┬─┬──────┘
//!               │ ├─┐      ┌─┤ │         glue tabs under the flange
//!               │ │          │ │
//!               │ │  webs    │ │         web_height
//!               │ │          │ │
//!               │ └──────────┘ │         bottom flange between webs
//!               └──────────────┘
//!                 bottom_width
//! ```
//!
//! ## Failure Modes
//!
//! | Mode                         | Applied                    | Capacity                 |
//! |------------------------------|----------------------------|--------------------------|
//! | Tension                      | M·ȳ/I at the bottom fiber  | tensile strength         |
//! | Compression                  | M·(top − ȳ)/I at the top   | compressive strength     |
//! | Wall shear                   | VQ/(I·2t) at ȳ             | board shear strength     |
//! | Glue shear                   | VQ/(I·b_glue) at the joint | cement shear strength    |
//! | Flange buckling between webs | top fiber compression      | k = 4 plate buckling     |
//! | Flange tip buckling          | top fiber compression      | k = 0.425 plate buckling |
//! | Web buckling                 | top fiber compression      | k = 6 plate buckling     |
//! | Shear buckling               | wall shear                 | k = 5 two-term buckling  |
//!
//! FOS = capacity / |applied|; the governing FOS is the smallest. A design
//! that needs more board than the budget allows reports [`INVALID_FOS`]
//! instead of an error, so a geometry search can compare numerically.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::calculations::failure::{DesignDemand, Evaluator};
//! use girder_core::config::DesignConfig;
//! use girder_core::units::{NewtonMeters, Newtons};
//!
//! let demand = DesignDemand::new(Newtons(257.0), NewtonMeters(69.0));
//! let evaluator = Evaluator::new(demand, DesignConfig::default()).unwrap();
//!
//! let report = evaluator.evaluate(100.0, 75.0, 1, 4).unwrap();
//! assert!(report.within_budget);
//! assert!(report.governing_fos > 0.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::envelope::EnvelopeRecord;
use crate::config::DesignConfig;
use crate::equations::plate::{
    flexural_stress, plate_buckling_stress, shear_buckling_stress, shear_stress, K_FLANGE_BETWEEN_WEBS,
    K_FLANGE_TIP, K_WEB_FLEXURE,
};
use crate::errors::{CalcError, CalcResult};
use crate::section::{CrossSection, Rectangle, SectionProperties, Side};
use crate::units::{Megapascals, NewtonMeters, NewtonMillimeters, Newtons};

/// Governing FOS reported for a design over the material budget
pub const INVALID_FOS: f64 = -1.0;

/// The eight ways the girder can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Flexural tension at the bottom fiber
    Tension,
    /// Flexural compression at the top fiber
    Compression,
    /// Shear through both webs at the neutral axis
    WallShear,
    /// Shear in the glue joint under the top flange
    GlueShear,
    /// Top flange buckling between the webs
    FlangeBetweenWebsBuckling,
    /// Top flange overhang buckling at its free tip
    FlangeTipBuckling,
    /// Compressed part of the web buckling
    WebBuckling,
    /// Web panel buckling in shear between diaphragms
    ShearBuckling,
}

impl FailureMode {
    /// All modes in report order
    pub const ALL: [FailureMode; 8] = [
        FailureMode::Tension,
        FailureMode::Compression,
        FailureMode::WallShear,
        FailureMode::GlueShear,
        FailureMode::FlangeBetweenWebsBuckling,
        FailureMode::FlangeTipBuckling,
        FailureMode::WebBuckling,
        FailureMode::ShearBuckling,
    ];

    /// Human-readable name
    pub fn description(&self) -> &'static str {
        match self {
            FailureMode::Tension => "Flexural tension",
            FailureMode::Compression => "Flexural compression",
            FailureMode::WallShear => "Wall shear",
            FailureMode::GlueShear => "Glue shear",
            FailureMode::FlangeBetweenWebsBuckling => "Flange buckling between webs",
            FailureMode::FlangeTipBuckling => "Flange tip buckling",
            FailureMode::WebBuckling => "Web buckling",
            FailureMode::ShearBuckling => "Shear buckling",
        }
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Result of one failure mode check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeCheck {
    /// Which mode
    pub mode: FailureMode,
    /// Stress the demand produces
    pub applied: Megapascals,
    /// Stress at which the mode fails
    pub capacity: Megapascals,
    /// capacity / |applied|; infinite when nothing is applied
    pub fos: f64,
}

impl ModeCheck {
    fn new(mode: FailureMode, applied: f64, capacity: f64) -> Self {
        let fos = if applied == 0.0 {
            f64::INFINITY
        } else {
            capacity / applied.abs()
        };
        ModeCheck {
            mode,
            applied: Megapascals(applied),
            capacity: Megapascals(capacity),
            fos,
        }
    }
}

/// Outcome of checking one design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "checks": [{ "mode": "tension", "applied": 3.1, "capacity": 30.0, "fos": 9.6 }],
///   "governing_fos": 1.42,
///   "governing_mode": "compression",
///   "estimated_volume": 557800.0,
///   "within_budget": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    /// One check per mode, in [`FailureMode::ALL`] order
    pub checks: Vec<ModeCheck>,
    /// Smallest FOS, or [`INVALID_FOS`] when over budget
    pub governing_fos: f64,
    /// Mode with the smallest FOS
    pub governing_mode: FailureMode,
    /// Board volume the design uses (mm³)
    pub estimated_volume: f64,
    /// Whether the volume fits the material budget
    pub within_budget: bool,
    /// Reduced section properties
    pub section: SectionProperties,
}

impl FailureReport {
    /// FOS of a single mode
    pub fn fos(&self, mode: FailureMode) -> f64 {
        self.check(mode).map_or(f64::INFINITY, |c| c.fos)
    }

    /// Full check of a single mode
    pub fn check(&self, mode: FailureMode) -> Option<&ModeCheck> {
        self.checks.iter().find(|c| c.mode == mode)
    }

    /// Whether the design is within budget and survives every mode
    pub fn passes(&self) -> bool {
        self.within_budget && self.governing_fos >= 1.0
    }
}

/// Governing demand on the section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignDemand {
    /// Largest shear magnitude
    pub max_shear: Newtons,
    /// Largest sagging moment
    pub max_moment: NewtonMeters,
}

impl DesignDemand {
    /// Create a demand
    pub fn new(max_shear: Newtons, max_moment: NewtonMeters) -> Self {
        DesignDemand { max_shear, max_moment }
    }
}

impl From<&EnvelopeRecord> for DesignDemand {
    fn from(envelope: &EnvelopeRecord) -> Self {
        DesignDemand::new(Newtons(envelope.max_shear), NewtonMeters(envelope.max_moment))
    }
}

/// Free dimensions of a box girder design (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeDesign {
    /// Top flange width
    pub top_flange_width: f64,
    /// Web height from the section bottom to the underside of the top flange
    pub web_height: f64,
    /// Board layers laminated into the top flange
    pub flange_layers: u32,
    /// Intermediate diaphragms, on top of the fixed ones
    pub diaphragm_count: u32,
}

impl BridgeDesign {
    /// Check the design against the fixed geometry.
    ///
    /// # Errors
    ///
    /// [`CalcError::DegenerateGeometry`] for a non-positive flange width, a
    /// web no taller than one board, or a top flange with no layers.
    pub fn validate(&self, config: &DesignConfig) -> CalcResult<()> {
        let t = config.geometry.board_thickness.value();
        if !(self.top_flange_width > 0.0) || !self.top_flange_width.is_finite() {
            return Err(CalcError::degenerate_geometry(
                "top_flange_width",
                self.top_flange_width.to_string(),
                "Top flange width must be positive",
            ));
        }
        if !(self.web_height > t) || !self.web_height.is_finite() {
            return Err(CalcError::degenerate_geometry(
                "web_height",
                self.web_height.to_string(),
                format!("Web must be taller than one board ({} mm)", t),
            ));
        }
        if self.flange_layers == 0 {
            return Err(CalcError::degenerate_geometry(
                "flange_layers",
                "0",
                "Top flange needs at least one layer",
            ));
        }
        Ok(())
    }

    /// Top flange thickness (mm)
    pub fn flange_thickness(&self, config: &DesignConfig) -> f64 {
        self.flange_layers as f64 * config.geometry.board_thickness.value()
    }

    /// Build the cross-section
    pub fn cross_section(&self, config: &DesignConfig) -> CalcResult<CrossSection> {
        self.validate(config)?;
        let t = config.geometry.board_thickness.value();
        let bottom = config.geometry.bottom_width.value();
        let tab = config.geometry.glue_tab_width.value();
        let flange = self.flange_thickness(config);
        let h = self.web_height;

        CrossSection::new(vec![
            Rectangle::new(t / 2.0, bottom - 2.0 * t, t),
            Rectangle::new(h / 2.0, t, h),
            Rectangle::new(h / 2.0, t, h),
            Rectangle::new(h - t / 2.0, tab, t),
            Rectangle::new(h - t / 2.0, tab, t),
            Rectangle::new(h + flange / 2.0, self.top_flange_width, flange),
        ])
    }

    /// Area of one diaphragm filling the box interior (mm²)
    pub fn diaphragm_area(&self, config: &DesignConfig) -> f64 {
        let t = config.geometry.board_thickness.value();
        (config.geometry.bottom_width.value() - 2.0 * t) * (self.web_height - t)
    }

    /// Distance between diaphragms along the span (mm)
    pub fn diaphragm_spacing(&self, config: &DesignConfig) -> f64 {
        config.geometry.bridge_length.value() / (self.diaphragm_count as f64 + 1.0)
    }

    /// Board volume: girder plus all diaphragms (mm³)
    pub fn volume(&self, section: &SectionProperties, config: &DesignConfig) -> f64 {
        let diaphragms = (self.diaphragm_count + config.budget.fixed_diaphragms) as f64;
        section.area * config.geometry.bridge_length.value()
            + diaphragms * self.diaphragm_area(config) * config.geometry.board_thickness.value()
    }
}

/// Check one design against the demand.
///
/// # Errors
///
/// [`CalcError::DegenerateGeometry`] if the design cannot form a section
/// with positive stiffness.
pub fn analyze_section(design: &BridgeDesign, demand: &DesignDemand, config: &DesignConfig) -> CalcResult<FailureReport> {
    let section = design.cross_section(config)?;
    let props = section.properties()?;

    let material = &config.material;
    let e = material.youngs_modulus.value();
    let nu = material.poisson_ratio;
    let t = config.geometry.board_thickness.value();
    let flange = design.flange_thickness(config);

    let moment = NewtonMillimeters::from(demand.max_moment).value();
    let shear = demand.max_shear.value();
    let inertia = props.second_moment;

    let tension = flexural_stress(props.bottom_fiber_distance(), moment, inertia);
    let compression = flexural_stress(props.top_fiber_distance(), moment, inertia);

    let wall_q = section.first_moment_of_area(props.centroidal_axis, Side::Above);
    let wall_shear = shear_stress(shear, wall_q, inertia, 2.0 * t);

    let glue_q = section.first_moment_of_area(design.web_height, Side::Above);
    let glue_width = 2.0 * (config.geometry.glue_tab_width.value() + t);
    let glue_shear = shear_stress(shear, glue_q, inertia, glue_width);

    let between_webs = config.geometry.bottom_width.value() - 2.0 * t;
    let overhang = (design.top_flange_width - config.geometry.bottom_width.value()) / 2.0;
    let compressed_web = design.web_height - props.centroidal_axis;

    // A panel with no unsupported width cannot buckle
    let buckling = |k: f64, thickness: f64, width: f64| {
        if width > 0.0 {
            plate_buckling_stress(k, e, nu, thickness, width)
        } else {
            f64::INFINITY
        }
    };

    let checks = vec![
        ModeCheck::new(FailureMode::Tension, tension, material.tensile_strength.value()),
        ModeCheck::new(FailureMode::Compression, compression, material.compressive_strength.value()),
        ModeCheck::new(FailureMode::WallShear, wall_shear, material.shear_strength.value()),
        ModeCheck::new(FailureMode::GlueShear, glue_shear, material.glue_shear_strength.value()),
        ModeCheck::new(
            FailureMode::FlangeBetweenWebsBuckling,
            compression,
            buckling(K_FLANGE_BETWEEN_WEBS, flange, between_webs),
        ),
        ModeCheck::new(FailureMode::FlangeTipBuckling, compression, buckling(K_FLANGE_TIP, flange, overhang)),
        ModeCheck::new(FailureMode::WebBuckling, compression, buckling(K_WEB_FLEXURE, t, compressed_web)),
        ModeCheck::new(
            FailureMode::ShearBuckling,
            wall_shear,
            shear_buckling_stress(e, nu, t, design.web_height, design.diaphragm_spacing(config)),
        ),
    ];

    let governing = checks
        .iter()
        .copied()
        .fold(checks[0], |best, check| if check.fos < best.fos { check } else { best });

    let estimated_volume = design.volume(&props, config);
    let within_budget = estimated_volume <= config.usable_volume();
    let governing_fos = if within_budget {
        governing.fos
    } else {
        tracing::warn!(
            volume = estimated_volume,
            usable = config.usable_volume(),
            "design exceeds material budget"
        );
        INVALID_FOS
    };

    tracing::debug!(
        top_flange_width = design.top_flange_width,
        web_height = design.web_height,
        flange_layers = design.flange_layers,
        diaphragm_count = design.diaphragm_count,
        governing_fos,
        governing_mode = %governing.mode,
        "evaluated design"
    );

    Ok(FailureReport {
        checks,
        governing_fos,
        governing_mode: governing.mode,
        estimated_volume,
        within_budget,
        section: props,
    })
}

/// Design evaluator bound to one demand and configuration.
///
/// This is the function an outer geometry search calls repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluator {
    /// Governing shear and moment
    pub demand: DesignDemand,
    /// Material, geometry and budget constants
    pub config: DesignConfig,
}

impl Evaluator {
    /// Create an evaluator, validating the configuration once up front.
    pub fn new(demand: DesignDemand, config: DesignConfig) -> CalcResult<Self> {
        config.validate()?;
        Ok(Evaluator { demand, config })
    }

    /// Create an evaluator for the maxima of an envelope
    pub fn from_envelope(envelope: &EnvelopeRecord, config: DesignConfig) -> CalcResult<Self> {
        Self::new(DesignDemand::from(envelope), config)
    }

    /// Evaluate one candidate geometry (mm).
    ///
    /// # Errors
    ///
    /// [`CalcError::DegenerateGeometry`] for geometry the search should skip.
    pub fn evaluate(
        &self,
        top_flange_width: f64,
        web_height: f64,
        flange_layers: u32,
        diaphragm_count: u32,
    ) -> CalcResult<FailureReport> {
        let design = BridgeDesign {
            top_flange_width,
            web_height,
            flange_layers,
            diaphragm_count,
        };
        analyze_section(&design, &self.demand, &self.config)
    }
}

//! # Stress and Thin-Plate Buckling Formulas
//!
//! Closed-form stresses for a thin-walled girder and the elastic critical
//! stresses of its flat plate panels.
//!
//! ## Units
//!
//! Lengths in mm, forces in N, moments in N·mm, stresses and moduli in MPa
//! (N/mm²).
//!
//! ## Buckling Coefficients
//!
//! | Panel                                   | Edge support            | k     |
//! |-----------------------------------------|-------------------------|-------|
//! | Top flange between the webs             | both edges restrained   | 4     |
//! | Top flange overhang past a web          | one edge free           | 0.425 |
//! | Web above the neutral axis              | flexural compression    | 6     |
//! | Web between diaphragms                  | pure shear              | 5     |
//!
//! ## References
//!
//! - Timoshenko & Gere, Theory of Elastic Stability, Chapter 9
//! - Hibbeler, Mechanics of Materials, Sections 6.4 and 7.3

use std::f64::consts::PI;

/// Plate buckling coefficient, flange restrained by both webs
pub const K_FLANGE_BETWEEN_WEBS: f64 = 4.0;

/// Plate buckling coefficient, flange tip with one free edge
pub const K_FLANGE_TIP: f64 = 0.425;

/// Plate buckling coefficient, web under a flexural stress gradient
pub const K_WEB_FLEXURE: f64 = 6.0;

/// Plate buckling coefficient, web in shear
pub const K_WEB_SHEAR: f64 = 5.0;

// =============================================================================
// STRESSES
// =============================================================================

/// Flexural (bending) stress at distance `y` from the neutral axis
///
/// # Formula
/// σ = M·y / I
///
/// # Arguments
/// * `y` - Distance from the neutral axis (mm)
/// * `moment` - Bending moment (N·mm)
/// * `inertia` - Second moment of area (mm⁴)
///
/// # Example
/// ```rust
/// use girder_core::equations::plate::flexural_stress;
///
/// // 50 mm from the axis, 100 000 N·mm on I = 1e6 mm⁴
/// let sigma = flexural_stress(50.0, 100_000.0, 1.0e6);
/// assert!((sigma - 5.0).abs() < 1e-12);
/// ```
#[inline]
pub fn flexural_stress(y: f64, moment: f64, inertia: f64) -> f64 {
    y * moment / inertia
}

/// Shear stress at a horizontal cut
///
/// # Formula
/// τ = V·Q / (I·b)
///
/// # Arguments
/// * `shear` - Shear force (N)
/// * `first_moment` - First moment of area beyond the cut (mm³)
/// * `inertia` - Second moment of area (mm⁴)
/// * `width` - Total material width at the cut (mm)
#[inline]
pub fn shear_stress(shear: f64, first_moment: f64, inertia: f64, width: f64) -> f64 {
    shear * first_moment / (inertia * width)
}

// =============================================================================
// ELASTIC BUCKLING
// =============================================================================

/// Plate flexural rigidity factor π²E / (12(1 − ν²))
#[inline]
pub fn plate_rigidity_factor(youngs_modulus: f64, poisson_ratio: f64) -> f64 {
    PI * PI * youngs_modulus / (12.0 * (1.0 - poisson_ratio * poisson_ratio))
}

/// Critical compressive stress of a thin plate
///
/// # Formula
/// σcr = k·π²E / (12(1 − ν²)) · (t/b)²
///
/// # Arguments
/// * `k` - Buckling coefficient for the edge support condition
/// * `youngs_modulus` - E (MPa)
/// * `poisson_ratio` - ν
/// * `thickness` - Plate thickness t (mm)
/// * `width` - Unsupported width b (mm)
///
/// # Example
/// ```rust
/// use girder_core::equations::plate::{plate_buckling_stress, K_FLANGE_BETWEEN_WEBS};
///
/// let sigma = plate_buckling_stress(K_FLANGE_BETWEEN_WEBS, 4000.0, 0.2, 1.27, 77.46);
/// assert!(sigma > 0.0 && sigma < 10.0);
/// ```
#[inline]
pub fn plate_buckling_stress(k: f64, youngs_modulus: f64, poisson_ratio: f64, thickness: f64, width: f64) -> f64 {
    k * plate_rigidity_factor(youngs_modulus, poisson_ratio) * (thickness / width).powi(2)
}

/// Critical shear stress of a web panel between diaphragms
///
/// # Formula
/// τcr = 5π²E / (12(1 − ν²)) · ((t/h)² + (t/a)²)
///
/// # Arguments
/// * `thickness` - Web thickness t (mm)
/// * `height` - Web height h (mm)
/// * `spacing` - Diaphragm spacing a (mm)
#[inline]
pub fn shear_buckling_stress(youngs_modulus: f64, poisson_ratio: f64, thickness: f64, height: f64, spacing: f64) -> f64 {
    K_WEB_SHEAR
        * plate_rigidity_factor(youngs_modulus, poisson_ratio)
        * ((thickness / height).powi(2) + (thickness / spacing).powi(2))
}

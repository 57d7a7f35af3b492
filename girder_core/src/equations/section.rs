//! # Cross-Section Property Formulas
//!
//! Formulas for the geometric properties of the rectangles that make up a
//! thin-walled girder section. The composite properties themselves are
//! assembled in [`crate::section`].
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Second moment of area about a horizontal axis
//! - `Q` = First moment of area about the neutral axis
//! - `b` = Width of a rectangle
//! - `h` = Height of a rectangle
//! - `d` = Distance from a rectangle's centroid to the reference axis
//!
//! All lengths are in mm, so `A` is in mm², `Q` in mm³ and `I` in mm⁴.
//!
//! ## References
//!
//! - Hibbeler, Mechanics of Materials, Chapter 6 (parallel-axis theorem)
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table A.1

// =============================================================================
// RECTANGLE PROPERTIES
// =============================================================================

/// Calculate cross-sectional area of a rectangle
///
/// ```text
///     ┌─────────┐
///     │         │
///   h │         │
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// A = b × h
///
/// # Example
/// ```rust
/// use girder_core::equations::section::rectangular_area;
///
/// // 1.27 mm matboard web, 100 mm tall
/// let area = rectangular_area(1.27, 100.0);
/// assert!((area - 127.0).abs() < 1e-9);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Second moment of area of a rectangle about its own centroid
///
/// ```text
///     ┌─────────┐
///     │         │
///   h │ ════════│ ← centroidal axis at h/2
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// I₀ = bh³/12
///
/// # Example
/// ```rust
/// use girder_core::equations::section::rectangular_moment_of_inertia;
///
/// let i = rectangular_moment_of_inertia(10.0, 20.0);
/// assert!((i - 20_000.0 / 3.0).abs() < 1e-9);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, h: f64) -> f64 {
    b * h.powi(3) / 12.0
}

/// Parallel-axis contribution of an area whose centroid sits `d` from the
/// reference axis
///
/// # Formula
/// A·d²
#[inline]
pub fn parallel_axis_term(area: f64, d: f64) -> f64 {
    area * d * d
}

/// Second moment of area of a rectangle about an axis `d` from its centroid
///
/// # Formula
/// I = bh³/12 + (bh)·d²
///
/// # Example
/// ```rust
/// use girder_core::equations::section::rectangle_inertia_about;
///
/// // A 10 x 20 block about its base: bh³/3
/// let i = rectangle_inertia_about(10.0, 20.0, 10.0);
/// assert!((i - 10.0 * 8000.0 / 3.0).abs() < 1e-6);
/// ```
#[inline]
pub fn rectangle_inertia_about(b: f64, h: f64, d: f64) -> f64 {
    rectangular_moment_of_inertia(b, h) + parallel_axis_term(rectangular_area(b, h), d)
}

/// First moment of area of a rectangle about an axis `d` from its centroid
///
/// # Formula
/// Q = A·d
///
/// `d` keeps its sign; callers take magnitudes as needed.
#[inline]
pub fn first_moment(area: f64, d: f64) -> f64 {
    area * d
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON * b.abs().max(1.0)
    }

    #[test]
    fn test_rectangular_area() {
        assert!(approx_eq(rectangular_area(80.0, 1.27), 101.6));
    }

    #[test]
    fn test_rectangular_moment_of_inertia() {
        // 12 x 10: 12 * 1000 / 12
        assert!(approx_eq(rectangular_moment_of_inertia(12.0, 10.0), 1000.0));
    }

    #[test]
    fn test_parallel_axis_about_base() {
        // Rectangle about its base equals bh³/3
        let (b, h) = (6.0, 9.0);
        assert!(approx_eq(rectangle_inertia_about(b, h, h / 2.0), b * h.powi(3) / 3.0));
    }

    #[test]
    fn test_first_moment_keeps_sign() {
        assert!(approx_eq(first_moment(10.0, -2.5), -25.0));
        assert!(approx_eq(first_moment(10.0, 2.5), 25.0));
    }
}

//! Piecewise polynomial functions of beam position
//!
//! Shear and moment diagrams are stored as explicit polynomial segments
//! rather than an expression tree. Each segment owns a polynomial in the
//! local coordinate `u = x - start` and is valid from its start up to the
//! next breakpoint. Below the first breakpoint the function is zero.
//!
//! ## Evaluation
//!
//! [`PiecewiseFunction::evaluate`] returns the value of the right-most segment
//! whose guard holds. With the default exclusive guard (`x > start`) this is
//! the left-hand limit at a breakpoint; [`PiecewiseFunction::evaluate_right`]
//! gives the right-hand limit.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::piecewise::{PiecewiseFunction, Polynomial};
//!
//! // V(x) = 10 on (0, 1], -10 on (1, 2]
//! let shear = PiecewiseFunction::new(vec![
//!     (0.0, Polynomial::constant(10.0)),
//!     (1.0, Polynomial::constant(-10.0)),
//! ]).unwrap();
//!
//! let moment = shear.antiderivative();
//! assert_eq!(moment.evaluate(1.0), 10.0);
//! assert_eq!(moment.evaluate(2.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Polynomial `c0 + c1·u + c2·u² + ...` in a local coordinate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polynomial {
    /// Coefficients, lowest order first
    pub coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create from coefficients, lowest order first
    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    /// Constant polynomial
    pub fn constant(value: f64) -> Self {
        Polynomial::new(vec![value])
    }

    /// `value + slope·u`
    pub fn linear(value: f64, slope: f64) -> Self {
        Polynomial::new(vec![value, slope])
    }

    /// Highest power with a stored coefficient (0 for constants and empty)
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate at local coordinate `u` (Horner's scheme)
    pub fn evaluate(&self, u: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * u + c)
    }

    /// Derivative with respect to `u`
    pub fn derivative(&self) -> Polynomial {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, c)| c * power as f64)
            .collect();
        Polynomial::new(coefficients)
    }

    /// Antiderivative with respect to `u` with the given constant term
    pub fn antiderivative(&self, constant: f64) -> Polynomial {
        let mut coefficients = Vec::with_capacity(self.coefficients.len() + 1);
        coefficients.push(constant);
        coefficients.extend(
            self.coefficients
                .iter()
                .enumerate()
                .map(|(power, c)| c / (power + 1) as f64),
        );
        Polynomial::new(coefficients)
    }
}

/// One segment of a piecewise function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Breakpoint where this segment starts
    pub start: f64,
    /// `true`: applies for `x > start`; `false`: applies for `x >= start`
    pub exclusive_lower_bound: bool,
    /// Polynomial in `u = x - start`
    pub polynomial: Polynomial,
}

impl Segment {
    /// Whether the guard of this segment holds at `x`
    pub fn applies_at(&self, x: f64) -> bool {
        if self.exclusive_lower_bound {
            x > self.start
        } else {
            x >= self.start
        }
    }

    /// Evaluate the segment's polynomial at global position `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.polynomial.evaluate(x - self.start)
    }
}

/// Ordered list of polynomial segments with an implicit zero below the
/// first breakpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PiecewiseFunction {
    segments: Vec<Segment>,
}

impl PiecewiseFunction {
    /// Build from `(start, polynomial)` pairs with exclusive guards.
    ///
    /// # Errors
    ///
    /// [`CalcError::InvalidInput`] if the starts are not finite and strictly
    /// increasing.
    pub fn new(pieces: Vec<(f64, Polynomial)>) -> CalcResult<Self> {
        let segments = pieces
            .into_iter()
            .map(|(start, polynomial)| Segment {
                start,
                exclusive_lower_bound: true,
                polynomial,
            })
            .collect();
        Self::from_segments(segments)
    }

    /// Build from fully specified segments.
    pub fn from_segments(segments: Vec<Segment>) -> CalcResult<Self> {
        for segment in &segments {
            if !segment.start.is_finite() {
                return Err(CalcError::invalid_input(
                    "segment.start",
                    segment.start.to_string(),
                    "Breakpoints must be finite",
                ));
            }
        }
        for pair in segments.windows(2) {
            if pair[1].start <= pair[0].start {
                return Err(CalcError::invalid_input(
                    "segment.start",
                    pair[1].start.to_string(),
                    format!("Breakpoints must be strictly increasing (previous {})", pair[0].start),
                ));
            }
        }
        Ok(PiecewiseFunction { segments })
    }

    /// The zero function
    pub fn zero() -> Self {
        PiecewiseFunction::default()
    }

    /// Segments in ascending order of start
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment starts in ascending order
    pub fn breakpoints(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.start).collect()
    }

    /// Evaluate at `x`: the right-most segment whose guard holds wins,
    /// zero if none does.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.segments
            .iter()
            .rev()
            .find(|s| s.applies_at(x))
            .map_or(0.0, |s| s.evaluate(x))
    }

    /// Right-hand limit at `x`, regardless of guard style
    pub fn evaluate_right(&self, x: f64) -> f64 {
        self.segments
            .iter()
            .rev()
            .find(|s| x >= s.start)
            .map_or(0.0, |s| s.evaluate(x))
    }

    /// Evaluate at every position of a grid
    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Segment-wise derivative. Jumps at breakpoints are dropped, so this is
    /// the derivative almost everywhere.
    pub fn derivative(&self) -> PiecewiseFunction {
        PiecewiseFunction {
            segments: self
                .segments
                .iter()
                .map(|s| Segment {
                    start: s.start,
                    exclusive_lower_bound: s.exclusive_lower_bound,
                    polynomial: s.polynomial.derivative(),
                })
                .collect(),
        }
    }

    /// Continuous antiderivative, zero everywhere left of the first
    /// breakpoint.
    ///
    /// Each segment integrates its own polynomial; the constant term carries
    /// the value accumulated at the segment's start, so the result is
    /// continuous by construction.
    pub fn antiderivative(&self) -> PiecewiseFunction {
        let mut segments = Vec::with_capacity(self.segments.len());
        let mut carried = 0.0;

        for (index, segment) in self.segments.iter().enumerate() {
            let integrated = segment.polynomial.antiderivative(carried);
            if let Some(next) = self.segments.get(index + 1) {
                carried = integrated.evaluate(next.start - segment.start);
            }
            segments.push(Segment {
                start: segment.start,
                exclusive_lower_bound: segment.exclusive_lower_bound,
                polynomial: integrated,
            });
        }

        PiecewiseFunction { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON * b.abs().max(1.0)
    }

    fn triangle_shear() -> PiecewiseFunction {
        // Uniform 10 N/m on a 2 m span: V = 10 - 10u
        PiecewiseFunction::new(vec![
            (0.0, Polynomial::linear(10.0, -10.0)),
            (2.0, Polynomial::constant(0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_polynomial_evaluate() {
        let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
        assert!(approx_eq(p.evaluate(2.0), 17.0));
        assert_eq!(p.degree(), 2);
        assert_eq!(Polynomial::default().evaluate(5.0), 0.0);
    }

    #[test]
    fn test_polynomial_calculus_roundtrip() {
        let p = Polynomial::new(vec![4.0, -3.0, 0.75]);
        let back = p.antiderivative(7.0).derivative();
        assert_eq!(back, p);
    }

    #[test]
    fn test_default_zero_below_first_breakpoint() {
        let f = triangle_shear();
        assert_eq!(f.evaluate(-1.0), 0.0);
        assert_eq!(f.evaluate(0.0), 0.0);
        assert!(approx_eq(f.evaluate_right(0.0), 10.0));
    }

    #[test]
    fn test_left_and_right_limits_at_breakpoint() {
        let f = PiecewiseFunction::new(vec![
            (0.0, Polynomial::constant(5.0)),
            (1.0, Polynomial::constant(-3.0)),
        ])
        .unwrap();
        assert_eq!(f.evaluate(1.0), 5.0);
        assert_eq!(f.evaluate_right(1.0), -3.0);
    }

    #[test]
    fn test_inclusive_guard() {
        let f = PiecewiseFunction::from_segments(vec![Segment {
            start: 1.0,
            exclusive_lower_bound: false,
            polynomial: Polynomial::constant(2.0),
        }])
        .unwrap();
        assert_eq!(f.evaluate(1.0), 2.0);
        assert_eq!(f.evaluate(0.999), 0.0);
    }

    #[test]
    fn test_antiderivative_is_continuous() {
        let moment = triangle_shear().antiderivative();
        // M = 10u - 5u², peak 5 at u = 1, back to zero at u = 2
        assert!(approx_eq(moment.evaluate(1.0), 5.0));
        assert!(approx_eq(moment.evaluate(2.0), 0.0));
        assert!(approx_eq(moment.evaluate_right(2.0), moment.evaluate(2.0)));
        assert!(approx_eq(moment.evaluate(3.0), 0.0));
    }

    #[test]
    fn test_derivative_of_antiderivative() {
        let shear = triangle_shear();
        let recovered = shear.antiderivative().derivative();
        for x in [0.1, 0.7, 1.3, 1.9, 2.5] {
            assert!(approx_eq(recovered.evaluate(x), shear.evaluate(x)));
        }
    }

    #[test]
    fn test_unordered_breakpoints_rejected() {
        let result = PiecewiseFunction::new(vec![
            (1.0, Polynomial::constant(1.0)),
            (1.0, Polynomial::constant(2.0)),
        ]);
        assert!(result.is_err());
        assert!(PiecewiseFunction::new(vec![(f64::NAN, Polynomial::constant(1.0))]).is_err());
    }
}

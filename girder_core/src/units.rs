//! # Unit Types
//!
//! Lightweight newtype wrappers for the SI quantities that cross engine
//! boundaries. They serialize as bare numbers.
//!
//! The load engines work in metres and newtons (moments in N·m). The section
//! engines work in millimetres, so stresses come out directly in MPa
//! (N/mm²). The only conversions that matter are m ↔ mm and N·m ↔ N·mm.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::units::{Meters, Millimeters, NewtonMeters, NewtonMillimeters};
//!
//! let span = Meters(1.2);
//! let span_mm: Millimeters = span.into();
//! assert!((span_mm.0 - 1200.0).abs() < 1e-9);
//!
//! let moment: NewtonMillimeters = NewtonMeters(75.0).into();
//! assert_eq!(moment.0, 75_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

impl From<NewtonMeters> for NewtonMillimeters {
    fn from(nm: NewtonMeters) -> Self {
        NewtonMillimeters(nm.0 * 1000.0)
    }
}

impl From<NewtonMillimeters> for NewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        NewtonMeters(nmm.0 / 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Newtons);
impl_arithmetic!(NewtonMeters);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(Megapascals);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let m = Meters(0.25);
        let mm: Millimeters = m.into();
        assert_eq!(mm.0, 250.0);
    }

    #[test]
    fn test_moment_conversion() {
        let nmm: NewtonMillimeters = NewtonMeters(2.5).into();
        assert_eq!(nmm.0, 2500.0);
        let back: NewtonMeters = nmm.into();
        assert_eq!(back.0, 2.5);
    }

    #[test]
    fn test_arithmetic() {
        let a = Megapascals(10.0);
        let b = Megapascals(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let n = Newtons(446.5);
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "446.5");

        let roundtrip: Newtons = serde_json::from_str(&json).unwrap();
        assert_eq!(n, roundtrip);
    }
}

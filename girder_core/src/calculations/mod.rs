//! # Calculation Engines
//!
//! The load-envelope engine and the cross-section failure engine. Each
//! engine is a set of pure functions over JSON-serializable inputs that
//! return a [`CalcResult`](crate::errors::CalcResult).
//!
//! ## Pipeline
//!
//! ```text
//! LoadSet ──analyze──▶ InternalForces
//!    │
//!    └──generate_envelope (sweep)──▶ EnvelopeRecord ──▶ DesignDemand
//!                                                          │
//!            BridgeDesign + DesignConfig ──analyze_section─┴──▶ FailureReport
//! ```
//!
//! ## Available Calculations
//!
//! - [`internal_forces`] - Reactions, shear and moment diagrams
//! - [`envelope`] - Moving-load envelopes
//! - [`failure`] - Box girder failure modes and material budget

pub mod envelope;
pub mod failure;
pub mod internal_forces;

// Re-export commonly used types
pub use envelope::{generate_envelope, EnvelopeRecord, Grid, SweepRange};
pub use failure::{analyze_section, BridgeDesign, DesignDemand, Evaluator, FailureMode, FailureReport, INVALID_FOS};
pub use internal_forces::{analyze, InternalForces};

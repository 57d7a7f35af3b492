//! # girder_core - Girder Load Envelope and Failure Engine
//!
//! `girder_core` computes shear and bending moment envelopes for a simply
//! supported girder crossed by a moving group of loads, then checks a
//! thin-walled box cross-section against those envelopes. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit Configuration**: Constants travel in a [`config::DesignConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use girder_core::calculations::{generate_envelope, Evaluator};
//! use girder_core::config::DesignConfig;
//! use girder_core::loads::presets;
//!
//! let envelope = generate_envelope(
//!     &presets::train_load_case_2(),
//!     &presets::standard_sweep(),
//!     &presets::standard_grid(),
//! ).unwrap();
//!
//! let evaluator = Evaluator::from_envelope(&envelope, DesignConfig::default()).unwrap();
//! let report = evaluator.evaluate(100.0, 75.0, 2, 4).unwrap();
//! println!("{} governs at FOS {:.2}", report.governing_mode, report.governing_fos);
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Load model, reaction solver and standard train loads
//! - [`piecewise`] - Piecewise polynomial functions of position
//! - [`calculations`] - Internal forces, envelopes and failure analysis
//! - [`section`] - Composite cross-section properties
//! - [`equations`] - Closed-form stress and buckling formulas
//! - [`config`] - Design constants
//! - [`materials`] - Board and glue properties
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Envelope and config persistence with atomic saves

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod piecewise;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{EnvelopeRecord, FailureReport};
pub use config::DesignConfig;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_envelope, save_envelope};
pub use loads::{LoadEntry, LoadSet};

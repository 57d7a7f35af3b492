//! Moving-Load Envelope Generator
//!
//! Sweeps a load group across the span and records, at every point of a
//! fixed evaluation grid, the worst shear and bending moment seen at any
//! offset, together with the global design maxima.
//!
//! Every offset is independent, so the sweep runs on the rayon thread pool.
//! Partial envelopes are combined with [`EnvelopeRecord::merge`], which is
//! associative and commutative; the result does not depend on merge order.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::calculations::envelope::{generate_envelope, Grid, SweepRange};
//! use girder_core::loads::{LoadEntry, LoadSet};
//!
//! let template = LoadSet::new("Single axle")
//!     .with_entry(LoadEntry::reaction(0.0))
//!     .with_entry(LoadEntry::point(0.0, 100.0))
//!     .with_entry(LoadEntry::reaction(1.0));
//!
//! let envelope = generate_envelope(
//!     &template,
//!     &SweepRange::new(0.0, 1.0, 11),
//!     &Grid::linspace(0.0, 1.0, 101),
//! ).unwrap();
//!
//! // PL/4 when the axle is at midspan
//! assert!((envelope.max_moment - 25.0).abs() < 1e-9);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculations::internal_forces::{analyze, InternalForces};
use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadSet;

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// A single value yields `[start]`; zero values yield an empty vector.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Range of offsets applied to the load template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    /// First offset (m)
    pub start_m: f64,
    /// Last offset (m)
    pub stop_m: f64,
    /// Number of offsets, both ends included
    pub steps: usize,
}

impl SweepRange {
    /// Create a sweep range
    pub fn new(start_m: f64, stop_m: f64, steps: usize) -> Self {
        SweepRange { start_m, stop_m, steps }
    }

    /// A sweep that evaluates the template where it stands
    pub fn stationary() -> Self {
        SweepRange::new(0.0, 0.0, 1)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.steps == 0 {
            return Err(CalcError::invalid_input(
                "steps",
                "0",
                "A sweep needs at least one offset",
            ));
        }
        if !self.start_m.is_finite() || !self.stop_m.is_finite() {
            return Err(CalcError::invalid_input(
                "sweep",
                format!("{}..{}", self.start_m, self.stop_m),
                "Sweep bounds must be finite",
            ));
        }
        Ok(())
    }

    /// Offsets visited by the sweep
    pub fn offsets(&self) -> Vec<f64> {
        linspace(self.start_m, self.stop_m, self.steps)
    }
}

/// Fixed evaluation positions along the beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    positions: Vec<f64>,
}

impl Grid {
    /// `n` evenly spaced positions from `start_m` to `stop_m`
    pub fn linspace(start_m: f64, stop_m: f64, n: usize) -> Self {
        Grid {
            positions: linspace(start_m, stop_m, n),
        }
    }

    /// Build from explicit positions.
    ///
    /// # Errors
    ///
    /// [`CalcError::InvalidInput`] if a position is not finite or the
    /// positions decrease anywhere.
    pub fn from_positions(positions: Vec<f64>) -> CalcResult<Self> {
        let grid = Grid { positions };
        grid.validate()?;
        Ok(grid)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.positions.is_empty() {
            return Err(CalcError::invalid_input("grid", "[]", "Evaluation grid is empty"));
        }
        if let Some(bad) = self.positions.iter().find(|x| !x.is_finite()) {
            return Err(CalcError::invalid_input(
                "grid",
                bad.to_string(),
                "Grid positions must be finite",
            ));
        }
        if let Some(pair) = self.positions.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(CalcError::invalid_input(
                "grid",
                pair[1].to_string(),
                format!("Grid positions must not decrease (previous {})", pair[0]),
            ));
        }
        Ok(())
    }

    /// Positions in ascending order
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the grid has no positions
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Worst-case shear and moment over a sweep.
///
/// `shear_envelope[i]` is the signed shear of largest magnitude seen at
/// `x[i]`; `moment_envelope[i]` is the largest moment. `max_shear` and
/// `max_moment` are taken from the exact diagrams at critical lengths, not
/// from the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeRecord {
    /// Evaluation positions (m)
    pub x: Vec<f64>,
    /// Signed max-magnitude shear at each position (N)
    pub shear_envelope: Vec<f64>,
    /// Maximum moment at each position (N·m)
    pub moment_envelope: Vec<f64>,
    /// Largest shear magnitude anywhere, any offset (N)
    pub max_shear: f64,
    /// Largest sagging moment anywhere, any offset (N·m)
    pub max_moment: f64,
}

/// Signed value of larger magnitude; the positive one wins a tie so the
/// choice is independent of argument order.
fn larger_magnitude(a: f64, b: f64) -> f64 {
    if b.abs() > a.abs() || (b.abs() == a.abs() && b > a) {
        b
    } else {
        a
    }
}

impl EnvelopeRecord {
    /// The neutral element of [`EnvelopeRecord::merge`] for a grid
    pub fn empty(x: &[f64]) -> Self {
        EnvelopeRecord {
            x: x.to_vec(),
            shear_envelope: vec![0.0; x.len()],
            moment_envelope: vec![f64::NEG_INFINITY; x.len()],
            max_shear: 0.0,
            max_moment: 0.0,
        }
    }

    /// Envelope of a single load position
    pub fn from_instance(x: &[f64], forces: &InternalForces) -> Self {
        EnvelopeRecord {
            x: x.to_vec(),
            shear_envelope: forces.shear.evaluate_all(x),
            moment_envelope: forces.moment.evaluate_all(x),
            max_shear: forces.max_shear().value,
            max_moment: forces.max_moment().value.max(0.0),
        }
    }

    /// Number of grid positions
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the record has no grid positions
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Check that all per-position sequences line up with `x`
    pub fn validate(&self) -> CalcResult<()> {
        if self.shear_envelope.len() != self.x.len() {
            return Err(CalcError::mismatched_lengths(
                "shear_envelope",
                self.x.len(),
                self.shear_envelope.len(),
            ));
        }
        if self.moment_envelope.len() != self.x.len() {
            return Err(CalcError::mismatched_lengths(
                "moment_envelope",
                self.x.len(),
                self.moment_envelope.len(),
            ));
        }
        Ok(())
    }

    /// Pointwise worst case of two envelopes over the same grid.
    ///
    /// # Errors
    ///
    /// [`CalcError::MismatchedLengths`] if the grids differ in length.
    pub fn merge(self, other: EnvelopeRecord) -> CalcResult<EnvelopeRecord> {
        self.validate()?;
        other.validate()?;
        if other.len() != self.len() {
            return Err(CalcError::mismatched_lengths("x", self.len(), other.len()));
        }

        let shear_envelope = self
            .shear_envelope
            .iter()
            .zip(&other.shear_envelope)
            .map(|(&a, &b)| larger_magnitude(a, b))
            .collect();
        let moment_envelope = self
            .moment_envelope
            .iter()
            .zip(&other.moment_envelope)
            .map(|(&a, &b)| a.max(b))
            .collect();

        Ok(EnvelopeRecord {
            x: self.x,
            shear_envelope,
            moment_envelope,
            max_shear: self.max_shear.max(other.max_shear),
            max_moment: self.max_moment.max(other.max_moment),
        })
    }
}

/// Sweep a load template across the span and build its envelope.
///
/// For each offset the template is shifted (reactions stay put), the
/// reactions and diagrams are rebuilt from scratch, and the diagrams are
/// folded into the envelope. Every offset contributes.
///
/// # Errors
///
/// * [`CalcError::InvalidInput`] for an empty sweep or an invalid grid
/// * Any error from solving a shifted load set, e.g.
///   [`CalcError::InvalidReactionCount`]
pub fn generate_envelope(template: &LoadSet, sweep: &SweepRange, grid: &Grid) -> CalcResult<EnvelopeRecord> {
    sweep.validate()?;
    grid.validate()?;

    let offsets = sweep.offsets();
    tracing::debug!(
        label = %template.label,
        offsets = offsets.len(),
        grid_points = grid.len(),
        "starting load sweep"
    );

    let envelope = offsets
        .par_iter()
        .map(|&offset| -> CalcResult<EnvelopeRecord> {
            let forces = analyze(&template.shifted(offset))?;
            tracing::trace!(offset, max_shear = forces.max_shear().value, max_moment = forces.max_moment().value, "swept offset");
            Ok(EnvelopeRecord::from_instance(grid.positions(), &forces))
        })
        .try_reduce(|| EnvelopeRecord::empty(grid.positions()), EnvelopeRecord::merge)?;

    tracing::debug!(
        label = %template.label,
        max_shear = envelope.max_shear,
        max_moment = envelope.max_moment,
        "load sweep complete"
    );

    Ok(envelope)
}

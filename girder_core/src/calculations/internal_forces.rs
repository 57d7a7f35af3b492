//! Piecewise Internal-Force Builder
//!
//! Turns a load set into closed-form shear and bending moment diagrams.
//!
//! ## Method
//!
//! 1. Solve both support reactions.
//! 2. Merge loads into one [`MergedSegment`] per distinct position, carrying
//!    the running concentrated shear and the active distributed intensity.
//! 3. Correct each segment's starting shear for the distributed force
//!    accumulated since the previous breakpoint, so the constant term is the
//!    absolute shear just right of the breakpoint.
//! 4. Each segment contributes `V(x) = V0 - w·(x - start)` for `x > start`;
//!    the moment diagram is the continuous antiderivative.
//!
//! ## Sign Convention
//! - Positive shear: left side up, right side down
//! - Positive moment: tension on bottom fiber (sagging)
//!
//! ## Example
//! ```rust
//! use girder_core::calculations::internal_forces::analyze;
//! use girder_core::loads::{LoadEntry, LoadSet};
//!
//! let loads = LoadSet::new("Midspan")
//!     .with_entry(LoadEntry::reaction(0.0))
//!     .with_entry(LoadEntry::point(5.0, 1000.0))
//!     .with_entry(LoadEntry::reaction(10.0));
//!
//! let forces = analyze(&loads).unwrap();
//! // PL/4 at midspan
//! assert!((forces.moment_at(5.0) - 2500.0).abs() < 1e-9);
//! assert!((forces.max_shear().value - 500.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::loads::{LoadKind, LoadSet};
use crate::piecewise::{PiecewiseFunction, Polynomial};

/// Combined loading at one distinct position along the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedSegment {
    /// Breakpoint position (m)
    pub position_m: f64,
    /// Absolute shear just right of the breakpoint (N)
    pub start_shear_n: f64,
    /// Distributed intensity active right of the breakpoint (N/m)
    pub intensity_n_per_m: f64,
}

/// Location and value of an extreme diagram value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// Position along the beam (m)
    pub position_m: f64,
    /// Value at that position (N for shear magnitude, N·m for moment)
    pub value: f64,
}

/// Shear and moment diagrams for one load set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalForces {
    /// The load set with both reactions solved
    pub loads: LoadSet,
    /// Merged breakpoints in ascending position
    pub segments: Vec<MergedSegment>,
    /// Shear force V(x) in N
    pub shear: PiecewiseFunction,
    /// Bending moment M(x) in N·m
    pub moment: PiecewiseFunction,
    /// Candidate extremum positions: every breakpoint plus every in-segment
    /// zero crossing of the shear
    pub critical_lengths: Vec<f64>,
}

impl InternalForces {
    /// Shear at position x (m), left-hand limit at breakpoints
    pub fn shear_at(&self, x_m: f64) -> f64 {
        self.shear.evaluate(x_m)
    }

    /// Moment at position x (m)
    pub fn moment_at(&self, x_m: f64) -> f64 {
        self.moment.evaluate(x_m)
    }

    /// Largest shear magnitude.
    ///
    /// Both one-sided limits are checked at every critical length, so the
    /// jump at a point load is never missed.
    pub fn max_shear(&self) -> Extremum {
        let mut best = Extremum {
            position_m: self.critical_lengths.first().copied().unwrap_or(0.0),
            value: 0.0,
        };
        for &x in &self.critical_lengths {
            for value in [self.shear.evaluate(x), self.shear.evaluate_right(x)] {
                if value.abs() > best.value {
                    best = Extremum {
                        position_m: x,
                        value: value.abs(),
                    };
                }
            }
        }
        best
    }

    /// Largest (sagging) bending moment
    pub fn max_moment(&self) -> Extremum {
        let mut best = Extremum {
            position_m: self.critical_lengths.first().copied().unwrap_or(0.0),
            value: 0.0,
        };
        for &x in &self.critical_lengths {
            let value = self.moment.evaluate(x);
            if value > best.value {
                best = Extremum { position_m: x, value };
            }
        }
        best
    }
}

/// Combine a solved load set into one segment per distinct position.
///
/// Walks the loads in position order keeping a running concentrated shear
/// (reactions raise it, point loads lower it) and the most recent
/// distributed intensity. A second, left-to-right pass then subtracts the
/// distributed force accumulated between breakpoints.
pub fn merge_loads(solved: &LoadSet) -> Vec<MergedSegment> {
    let entries = solved.sorted_entries();
    let mut merged: Vec<MergedSegment> = Vec::new();
    let mut point_force_sum = 0.0;
    let mut active_intensity = 0.0;

    for (index, entry) in entries.iter().enumerate() {
        point_force_sum -= entry.downward_force();
        if entry.kind == LoadKind::Distributed {
            active_intensity = entry.magnitude_or_zero();
        }

        let closes_position = entries
            .get(index + 1)
            .map_or(true, |next| next.position_m != entry.position_m);
        if closes_position {
            merged.push(MergedSegment {
                position_m: entry.position_m,
                start_shear_n: point_force_sum,
                intensity_n_per_m: active_intensity,
            });
        }
    }

    let mut distributed_force_sum = 0.0;
    for index in 1..merged.len() {
        let previous = merged[index - 1];
        distributed_force_sum += previous.intensity_n_per_m * (merged[index].position_m - previous.position_m);
        merged[index].start_shear_n -= distributed_force_sum;
    }

    merged
}

/// Candidate extremum positions for the merged segments
fn critical_lengths(segments: &[MergedSegment]) -> Vec<f64> {
    let mut lengths: Vec<f64> = segments.iter().map(|s| s.position_m).collect();

    for (index, segment) in segments.iter().enumerate() {
        if segment.intensity_n_per_m == 0.0 {
            continue;
        }
        let crossing = segment.start_shear_n / segment.intensity_n_per_m;
        let span = segments
            .get(index + 1)
            .map_or(f64::INFINITY, |next| next.position_m - segment.position_m);
        if crossing > 0.0 && crossing < span {
            lengths.push(segment.position_m + crossing);
        }
    }

    lengths.sort_by(f64::total_cmp);
    lengths.dedup();
    lengths
}

/// Build shear and moment diagrams for a load set.
///
/// # Errors
///
/// Propagates reaction-solver errors, most notably
/// [`CalcError::InvalidReactionCount`](crate::errors::CalcError::InvalidReactionCount).
pub fn analyze(loads: &LoadSet) -> CalcResult<InternalForces> {
    let solved = loads.solve_reactions()?;
    let segments = merge_loads(&solved);

    let shear = PiecewiseFunction::new(
        segments
            .iter()
            .map(|s| (s.position_m, Polynomial::linear(s.start_shear_n, -s.intensity_n_per_m)))
            .collect(),
    )?;
    let moment = shear.antiderivative();
    let critical_lengths = critical_lengths(&segments);

    tracing::trace!(
        label = %solved.label,
        breakpoints = segments.len(),
        critical = critical_lengths.len(),
        "built internal force diagrams"
    );

    Ok(InternalForces {
        loads: solved,
        segments,
        shear,
        moment,
        critical_lengths,
    })
}

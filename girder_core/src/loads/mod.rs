//! Load model and reaction solver
//!
//! A [`LoadSet`] is an ordered collection of [`LoadEntry`] values on a
//! simply supported beam: point loads, distributed runs and exactly two
//! support reactions whose magnitudes are unknown until
//! [`LoadSet::solve_reactions`] fills them in.
//!
//! # Sign Convention
//!
//! - Point loads (N) and distributed intensities (N/m) are positive downward
//! - Reactions (N) are positive upward
//! - A distributed entry stays active from its position until the next
//!   distributed entry; a run is closed by a later entry of zero intensity
//!
//! # Example
//!
//! ```
//! use girder_core::loads::{LoadEntry, LoadSet};
//!
//! let loads = LoadSet::new("Midspan point load")
//!     .with_entry(LoadEntry::reaction(0.0))
//!     .with_entry(LoadEntry::point(0.6, 100.0))
//!     .with_entry(LoadEntry::reaction(1.2));
//!
//! let solved = loads.solve_reactions().unwrap();
//! let reactions = solved.reaction_magnitudes();
//! assert!((reactions[0].1 - 50.0).abs() < 1e-9);
//! assert!((reactions[1].1 - 50.0).abs() < 1e-9);
//! ```

pub mod load_types;
pub mod presets;

pub use load_types::LoadKind;

use serde::{Deserialize, Serialize};
use crate::errors::{CalcError, CalcResult};

/// Number of supports on a simply supported beam
pub const REQUIRED_REACTIONS: usize = 2;

/// A single load entry on the beam.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "point", "position_m": 0.172, "magnitude": 66.667 }
/// { "kind": "reaction", "position_m": 0.0, "magnitude": null }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry {
    /// Point, distributed or reaction
    pub kind: LoadKind,
    /// Distance from the left end of the beam (m)
    pub position_m: f64,
    /// Magnitude: N for point loads and reactions, N/m for distributed loads.
    /// Reactions carry `None` until solved.
    #[serde(default)]
    pub magnitude: Option<f64>,
}

impl LoadEntry {
    /// Create a downward point load (N)
    pub fn point(position_m: f64, magnitude_n: f64) -> Self {
        LoadEntry {
            kind: LoadKind::Point,
            position_m,
            magnitude: Some(magnitude_n),
        }
    }

    /// Create a distributed entry (N/m) that stays active until the next one
    pub fn distributed(position_m: f64, intensity_n_per_m: f64) -> Self {
        LoadEntry {
            kind: LoadKind::Distributed,
            position_m,
            magnitude: Some(intensity_n_per_m),
        }
    }

    /// Create an unsolved support reaction
    pub fn reaction(position_m: f64) -> Self {
        LoadEntry {
            kind: LoadKind::Reaction,
            position_m,
            magnitude: None,
        }
    }

    /// Magnitude, treating an unsolved reaction as zero
    pub fn magnitude_or_zero(&self) -> f64 {
        self.magnitude.unwrap_or(0.0)
    }

    /// Concentrated force at this entry in the downward-positive convention.
    ///
    /// Point loads push down, solved reactions push up, distributed entries
    /// carry no concentrated force.
    pub fn downward_force(&self) -> f64 {
        match self.kind {
            LoadKind::Point => self.magnitude_or_zero(),
            LoadKind::Reaction => -self.magnitude_or_zero(),
            LoadKind::Distributed => 0.0,
        }
    }
}

/// A constant-intensity stretch between two consecutive distributed entries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedRun {
    /// Start of the run (m)
    pub start_m: f64,
    /// End of the run (m)
    pub end_m: f64,
    /// Intensity over the run (N/m), positive downward
    pub intensity_n_per_m: f64,
}

impl DistributedRun {
    /// Run length (m)
    pub fn length(&self) -> f64 {
        self.end_m - self.start_m
    }

    /// Resultant force of the run (N)
    pub fn resultant(&self) -> f64 {
        self.length() * self.intensity_n_per_m
    }

    /// Position of the resultant (m)
    pub fn midpoint(&self) -> f64 {
        (self.start_m + self.end_m) / 2.0
    }
}

/// An ordered set of loads on a simply supported beam.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadSet {
    /// User label (e.g. "Train load case 2")
    pub label: String,
    /// Entries in insertion order
    pub entries: Vec<LoadEntry>,
}

impl LoadSet {
    /// Create an empty load set
    pub fn new(label: impl Into<String>) -> Self {
        LoadSet {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    /// Add an entry and return self (builder pattern)
    pub fn with_entry(mut self, entry: LoadEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Add the self-weight of the girder as a distributed run from `start_m`
    /// to `end_m`, closed by a zero-intensity entry.
    pub fn with_self_weight(self, intensity_n_per_m: f64, start_m: f64, end_m: f64) -> Self {
        self.with_entry(LoadEntry::distributed(start_m, intensity_n_per_m))
            .with_entry(LoadEntry::distributed(end_m, 0.0))
    }

    /// Add an entry in place
    pub fn push(&mut self, entry: LoadEntry) {
        self.entries.push(entry);
    }

    /// Reaction entries in position order
    pub fn reactions(&self) -> Vec<&LoadEntry> {
        let mut reactions: Vec<&LoadEntry> = self
            .entries
            .iter()
            .filter(|e| e.kind == LoadKind::Reaction)
            .collect();
        reactions.sort_by(|a, b| a.position_m.total_cmp(&b.position_m));
        reactions
    }

    /// `(position, magnitude)` of each reaction in position order.
    /// Unsolved reactions report zero.
    pub fn reaction_magnitudes(&self) -> Vec<(f64, f64)> {
        self.reactions()
            .into_iter()
            .map(|r| (r.position_m, r.magnitude_or_zero()))
            .collect()
    }

    /// Entries sorted by position. The sort is stable, so coincident entries
    /// keep their insertion order.
    pub fn sorted_entries(&self) -> Vec<LoadEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.position_m.total_cmp(&b.position_m));
        entries
    }

    /// Constant-intensity runs between consecutive distributed entries
    pub fn distributed_runs(&self) -> Vec<DistributedRun> {
        let distributed: Vec<LoadEntry> = self
            .sorted_entries()
            .into_iter()
            .filter(|e| e.kind == LoadKind::Distributed)
            .collect();

        distributed
            .windows(2)
            .map(|pair| DistributedRun {
                start_m: pair[0].position_m,
                end_m: pair[1].position_m,
                intensity_n_per_m: pair[0].magnitude_or_zero(),
            })
            .collect()
    }

    /// Total downward applied load: point loads plus integrated runs (N)
    pub fn total_applied_load(&self) -> f64 {
        let point_sum: f64 = self
            .entries
            .iter()
            .filter(|e| e.kind == LoadKind::Point)
            .map(LoadEntry::magnitude_or_zero)
            .sum();
        let distributed_sum: f64 = self.distributed_runs().iter().map(DistributedRun::resultant).sum();
        point_sum + distributed_sum
    }

    /// Moment of the applied (non-reaction) loads about `pivot_m`,
    /// positive when a downward load sits to the right of the pivot (N·m)
    pub fn applied_moment_about(&self, pivot_m: f64) -> f64 {
        let point_sum: f64 = self
            .entries
            .iter()
            .filter(|e| e.kind == LoadKind::Point)
            .map(|e| e.magnitude_or_zero() * (e.position_m - pivot_m))
            .sum();

        let distributed_sum: f64 = self
            .distributed_runs()
            .iter()
            .map(|run| run.length() * (run.midpoint() - pivot_m) * run.intensity_n_per_m)
            .sum();

        point_sum + distributed_sum
    }

    /// Return a new load set with every point and distributed entry moved by
    /// `offset_m`. Reactions stay in place.
    pub fn shifted(&self, offset_m: f64) -> LoadSet {
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                let mut moved = entry.clone();
                if entry.kind.moves_with_sweep() {
                    moved.position_m += offset_m;
                }
                moved
            })
            .collect();

        LoadSet {
            label: self.label.clone(),
            entries,
        }
    }

    /// Validate the load set.
    ///
    /// Checks finite positions and magnitudes, exactly two distinct
    /// reactions, and that the last distributed entry closes its run.
    pub fn validate(&self) -> CalcResult<()> {
        for entry in &self.entries {
            if !entry.position_m.is_finite() {
                return Err(CalcError::invalid_input(
                    "position_m",
                    entry.position_m.to_string(),
                    format!("{} position must be finite", entry.kind.description()),
                ));
            }
            if entry.kind != LoadKind::Reaction {
                match entry.magnitude {
                    Some(m) if m.is_finite() => {}
                    Some(m) => {
                        return Err(CalcError::invalid_input(
                            "magnitude",
                            m.to_string(),
                            format!("{} magnitude must be finite", entry.kind.description()),
                        ));
                    }
                    None => {
                        return Err(CalcError::invalid_input(
                            "magnitude",
                            "none",
                            format!("{} at {} m has no magnitude", entry.kind.description(), entry.position_m),
                        ));
                    }
                }
            }
        }

        let reactions = self.reactions();
        if reactions.len() != REQUIRED_REACTIONS {
            return Err(CalcError::invalid_reaction_count(reactions.len()));
        }
        if reactions[0].position_m == reactions[1].position_m {
            return Err(CalcError::invalid_input(
                "reaction.position_m",
                reactions[0].position_m.to_string(),
                "Reactions must be at distinct positions",
            ));
        }

        let last_distributed = self
            .sorted_entries()
            .into_iter()
            .filter(|e| e.kind == LoadKind::Distributed)
            .last();
        if let Some(last) = last_distributed {
            if last.magnitude_or_zero() != 0.0 {
                return Err(CalcError::invalid_input(
                    "distributed.magnitude",
                    last.magnitude_or_zero().to_string(),
                    format!("Distributed run starting at {} m is never closed by a zero-intensity entry", last.position_m),
                ));
            }
        }

        Ok(())
    }

    /// Solve both support reactions from moment equilibrium.
    ///
    /// For each reaction, moments are taken about the other reaction, so the
    /// pivot's own unknown drops out. Returns a new load set with the
    /// reaction magnitudes filled in (positive upward).
    ///
    /// # Errors
    ///
    /// * [`CalcError::InvalidReactionCount`] unless there are exactly two reactions
    /// * [`CalcError::InvalidInput`] for non-finite values, coincident
    ///   reactions or an unclosed distributed run
    pub fn solve_reactions(&self) -> CalcResult<LoadSet> {
        self.validate()?;

        let positions: Vec<f64> = self.reactions().iter().map(|r| r.position_m).collect();
        let mut solved = self.clone();

        for (index, &reaction_m) in positions.iter().enumerate() {
            let pivot_m = positions[(index + 1) % REQUIRED_REACTIONS];
            let magnitude = self.applied_moment_about(pivot_m) / (reaction_m - pivot_m);

            for entry in solved
                .entries
                .iter_mut()
                .filter(|e| e.kind == LoadKind::Reaction && e.position_m == reaction_m)
            {
                entry.magnitude = Some(magnitude);
            }
        }

        Ok(solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON * b.abs().max(1.0)
    }

    fn simple_beam() -> LoadSet {
        LoadSet::new("Test")
            .with_entry(LoadEntry::reaction(0.0))
            .with_entry(LoadEntry::point(3.0, 1000.0))
            .with_entry(LoadEntry::reaction(10.0))
    }

    #[test]
    fn test_point_load_reactions() {
        // R1 = P(L-a)/L = 700, R2 = Pa/L = 300
        let solved = simple_beam().solve_reactions().unwrap();
        let reactions = solved.reaction_magnitudes();
        assert!(approx_eq(reactions[0].1, 700.0), "R1 = {}", reactions[0].1);
        assert!(approx_eq(reactions[1].1, 300.0), "R2 = {}", reactions[1].1);
    }

    #[test]
    fn test_uniform_load_reactions() {
        // 100 N/m over 2..8 m on a 10 m span: 600 N centred at 5 m
        let solved = LoadSet::new("Partial UDL")
            .with_entry(LoadEntry::reaction(0.0))
            .with_self_weight(100.0, 2.0, 8.0)
            .with_entry(LoadEntry::reaction(10.0))
            .solve_reactions()
            .unwrap();
        let reactions = solved.reaction_magnitudes();
        assert!(approx_eq(reactions[0].1, 300.0));
        assert!(approx_eq(reactions[1].1, 300.0));
        assert!(approx_eq(solved.total_applied_load(), 600.0));
    }

    #[test]
    fn test_overhanging_load_produces_uplift() {
        // Load beyond the right support lifts the left support
        let solved = LoadSet::new("Overhang")
            .with_entry(LoadEntry::reaction(0.0))
            .with_entry(LoadEntry::point(12.0, 100.0))
            .with_entry(LoadEntry::reaction(10.0))
            .solve_reactions()
            .unwrap();
        let reactions = solved.reaction_magnitudes();
        assert!(approx_eq(reactions[0].1, -20.0));
        assert!(approx_eq(reactions[1].1, 120.0));
    }

    #[test]
    fn test_reaction_count_is_enforced() {
        let one = LoadSet::new("One support")
            .with_entry(LoadEntry::reaction(0.0))
            .with_entry(LoadEntry::point(1.0, 10.0));
        assert_eq!(one.solve_reactions(), Err(CalcError::invalid_reaction_count(1)));

        let three = simple_beam().with_entry(LoadEntry::reaction(5.0));
        assert_eq!(three.solve_reactions(), Err(CalcError::invalid_reaction_count(3)));
    }

    #[test]
    fn test_coincident_reactions_rejected() {
        let loads = LoadSet::new("Bad")
            .with_entry(LoadEntry::reaction(1.0))
            .with_entry(LoadEntry::reaction(1.0));
        let err = loads.solve_reactions().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unclosed_distributed_run_rejected() {
        let loads = simple_beam().with_entry(LoadEntry::distributed(0.0, 50.0));
        let err = loads.solve_reactions().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let loads = simple_beam().with_entry(LoadEntry::point(f64::NAN, 1.0));
        assert!(loads.validate().is_err());
    }

    #[test]
    fn test_shift_leaves_reactions_in_place() {
        let shifted = simple_beam().shifted(0.5);
        let point = shifted.entries.iter().find(|e| e.kind == LoadKind::Point).unwrap();
        assert!(approx_eq(point.position_m, 3.5));
        let supports: Vec<f64> = shifted.reactions().iter().map(|r| r.position_m).collect();
        assert_eq!(supports, vec![0.0, 10.0]);
    }

    #[test]
    fn test_downward_force_convention() {
        let mut reaction = LoadEntry::reaction(0.0);
        assert_eq!(reaction.downward_force(), 0.0);
        reaction.magnitude = Some(40.0);
        assert_eq!(reaction.downward_force(), -40.0);
        assert_eq!(LoadEntry::point(1.0, 15.0).downward_force(), 15.0);
        assert_eq!(LoadEntry::distributed(1.0, 15.0).downward_force(), 0.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let loads = simple_beam();
        let json = serde_json::to_string_pretty(&loads).unwrap();
        assert!(json.contains("\"reaction\""));
        let roundtrip: LoadSet = serde_json::from_str(&json).unwrap();
        assert_eq!(loads, roundtrip);
    }
}

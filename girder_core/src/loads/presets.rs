//! Standard train load cases
//!
//! The design span is 1.2 m between supports, crossed by a six-axle train.
//! Axle positions are given for the train's reference position; the
//! standard sweep moves the train 172 mm either way so the leading and
//! trailing axles reach the supports.

use super::{LoadEntry, LoadSet};
use crate::calculations::envelope::{Grid, SweepRange};

/// Span between the two supports (m)
pub const SPAN_M: f64 = 1.2;

/// Axle positions at the reference position (m from the left support)
pub const AXLE_POSITIONS_M: [f64; 6] = [0.172, 0.348, 0.512, 0.688, 0.852, 1.028];

/// Axle load of a uniformly loaded train (N): 400 N shared by six axles
pub const UNIFORM_AXLE_LOAD_N: f64 = 400.0 / 6.0;

/// Heavier locomotive axle load used by load case 2 (N)
pub const LOCOMOTIVE_AXLE_LOAD_N: f64 = 90.0;

/// Number of offsets in the standard sweep
pub const STANDARD_SWEEP_STEPS: usize = 50;

/// Number of evaluation points along the span
pub const STANDARD_GRID_POINTS: usize = 1000;

fn train(label: &str, axle_loads_n: [f64; 6]) -> LoadSet {
    let mut loads = LoadSet::new(label).with_entry(LoadEntry::reaction(0.0));
    for (position, load) in AXLE_POSITIONS_M.iter().zip(axle_loads_n) {
        loads.push(LoadEntry::point(*position, load));
    }
    loads.with_entry(LoadEntry::reaction(SPAN_M))
}

/// Load case 1: six equal axles carrying 400 N in total.
///
/// # Example
/// ```
/// use girder_core::loads::presets::train_load_case_1;
///
/// let loads = train_load_case_1();
/// assert!((loads.total_applied_load() - 400.0).abs() < 1e-9);
/// ```
pub fn train_load_case_1() -> LoadSet {
    train("Train load case 1", [UNIFORM_AXLE_LOAD_N; 6])
}

/// Load case 2: four 200/3 N axles followed by two 90 N locomotive axles.
pub fn train_load_case_2() -> LoadSet {
    let mut axles = [UNIFORM_AXLE_LOAD_N; 6];
    axles[4] = LOCOMOTIVE_AXLE_LOAD_N;
    axles[5] = LOCOMOTIVE_AXLE_LOAD_N;
    train("Train load case 2", axles)
}

/// Offsets that move the train from its first axle on the left support to
/// its last axle on the right support.
pub fn standard_sweep() -> SweepRange {
    let first = AXLE_POSITIONS_M[0];
    let last = AXLE_POSITIONS_M[AXLE_POSITIONS_M.len() - 1];
    SweepRange::new(-first, SPAN_M - last, STANDARD_SWEEP_STEPS)
}

/// Evaluation grid covering the whole span
pub fn standard_grid() -> Grid {
    Grid::linspace(0.0, SPAN_M, STANDARD_GRID_POINTS)
}

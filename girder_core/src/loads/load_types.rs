//! Load kind definitions
//!
//! A beam load set mixes three kinds of entries. Point and distributed loads
//! are applied by the user; reactions are the two unknown support forces the
//! solver fills in.

use serde::{Deserialize, Serialize};

/// Kind of a single load entry.
///
/// # Example
/// ```
/// use girder_core::loads::LoadKind;
///
/// assert_eq!(LoadKind::Point.code(), "point");
/// assert!(LoadKind::Point.moves_with_sweep());
/// assert!(!LoadKind::Reaction.moves_with_sweep());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadKind {
    /// Concentrated force (N), positive downward
    Point,
    /// Line load (N/m), positive downward, active until the next distributed entry
    Distributed,
    /// Support reaction (N), positive upward, unknown until solved
    Reaction,
}

impl LoadKind {
    /// All load kinds in standard order
    pub const ALL: [LoadKind; 3] = [LoadKind::Point, LoadKind::Distributed, LoadKind::Reaction];

    /// Short lowercase code, matching the serialized form
    pub fn code(&self) -> &'static str {
        match self {
            LoadKind::Point => "point",
            LoadKind::Distributed => "distributed",
            LoadKind::Reaction => "reaction",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadKind::Point => "Point load",
            LoadKind::Distributed => "Distributed load",
            LoadKind::Reaction => "Support reaction",
        }
    }

    /// Whether entries of this kind follow the load group when it is swept
    /// along the span. Supports stay where they are.
    pub fn moves_with_sweep(&self) -> bool {
        matches!(self, LoadKind::Point | LoadKind::Distributed)
    }
}

impl std::fmt::Display for LoadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_kind_codes() {
        assert_eq!(LoadKind::Point.code(), "point");
        assert_eq!(LoadKind::Distributed.code(), "distributed");
        assert_eq!(LoadKind::Reaction.code(), "reaction");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LoadKind::Distributed).unwrap();
        assert_eq!(json, "\"distributed\"");

        let parsed: LoadKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LoadKind::Distributed);
    }

    #[test]
    fn test_all_contains_all_variants() {
        assert_eq!(LoadKind::ALL.len(), 3);
        assert_eq!(LoadKind::ALL.iter().filter(|k| k.moves_with_sweep()).count(), 2);
    }
}

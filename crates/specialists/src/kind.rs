//! Specialist capability identifiers.

use serde::{Deserialize, Serialize};

/// The four specialist capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialistKind {
    Search,
    Matchmaking,
    Location,
    Navigation,
}

impl SpecialistKind {
    /// All capabilities, in the order the strategies register them.
    pub const ALL: [SpecialistKind; 4] = [
        SpecialistKind::Search,
        SpecialistKind::Matchmaking,
        SpecialistKind::Location,
        SpecialistKind::Navigation,
    ];

    /// Returns the capability name as a string, used in logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialistKind::Search => "search",
            SpecialistKind::Matchmaking => "matchmaking",
            SpecialistKind::Location => "location",
            SpecialistKind::Navigation => "navigation",
        }
    }
}

impl std::fmt::Display for SpecialistKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

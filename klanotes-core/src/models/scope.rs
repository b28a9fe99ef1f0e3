use serde::{Deserialize, Serialize};

use super::Note;

/// Which subset of notes a listing covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Notes with `archived = false`, shown in the main listing.
    Active,
    /// Notes with `archived = true`.
    Archived,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Whether `note` belongs to this scope.
    pub fn includes(&self, note: &Note) -> bool {
        match self {
            Self::Active => !note.archived,
            Self::Archived => note.archived,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

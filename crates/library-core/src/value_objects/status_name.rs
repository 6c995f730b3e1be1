//! State registry vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a row in the state registry.
///
/// Every stateful record points at one of these. The registry is seeded
/// with all variants before anything else is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusName {
    Active,
    Disabled,
    Deleted,
    Archived,
    Pending,
    Completed,
    Failed,
}

impl StatusName {
    /// Every registry entry, in seeding order
    pub const ALL: [StatusName; 7] = [
        Self::Active,
        Self::Disabled,
        Self::Deleted,
        Self::Archived,
        Self::Pending,
        Self::Completed,
        Self::Failed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Disabled => "Disabled",
            Self::Deleted => "Deleted",
            Self::Archived => "Archived",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }

    /// Seed description stored alongside the name
    pub const fn description(self) -> &'static str {
        match self {
            Self::Active => "Record is active",
            Self::Disabled => "Record is disabled",
            Self::Deleted => "Record has been deleted",
            Self::Archived => "Record has been archived",
            Self::Pending => "Operation is in progress",
            Self::Completed => "Operation completed successfully",
            Self::Failed => "Operation failed",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown state: {s}"))
    }
}

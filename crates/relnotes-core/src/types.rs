//! Core types for relnotes

use serde::{Deserialize, Serialize};

use crate::error::NotesError;

/// Classification of a commit, derived from its conventional header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommitCategory {
    /// New feature
    #[serde(rename = "feat")]
    Feature,
    /// Bug fix
    #[serde(rename = "fix")]
    Fix,
    /// Documentation
    #[serde(rename = "docs")]
    Docs,
    /// Code style (formatting, etc.)
    #[serde(rename = "style")]
    Style,
    /// Refactoring
    #[serde(rename = "refactor")]
    Refactor,
    /// Tests
    #[serde(rename = "test")]
    Test,
    /// Chores (maintenance)
    #[serde(rename = "chore")]
    Chore,
    /// Incompatible change
    #[serde(rename = "breaking")]
    Breaking,
    /// Header did not follow the convention, or named no known type
    #[serde(rename = "unknown")]
    Unknown,
}

impl CommitCategory {
    /// Every category, in declaration order
    pub const ALL: [CommitCategory; 9] = [
        Self::Feature,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Test,
        Self::Chore,
        Self::Breaking,
        Self::Unknown,
    ];

    /// Priority order in which grouped output lists categories.
    ///
    /// `Style` has no section of its own; style commits only show up in the
    /// flat commit list and the counters.
    pub const SECTION_ORDER: [CommitCategory; 8] = [
        Self::Breaking,
        Self::Feature,
        Self::Fix,
        Self::Docs,
        Self::Refactor,
        Self::Test,
        Self::Chore,
        Self::Unknown,
    ];

    /// Header keyword for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Breaking => "breaking",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable title used for section headings and counters
    pub fn title(&self) -> &'static str {
        match self {
            Self::Feature => "Features",
            Self::Fix => "Bug Fixes",
            Self::Docs => "Documentation",
            Self::Style => "Styles",
            Self::Refactor => "Refactoring",
            Self::Test => "Tests",
            Self::Chore => "Chores",
            Self::Breaking => "Breaking Changes",
            Self::Unknown => "Other",
        }
    }

    /// Map a header keyword to a category, falling back to `Unknown`
    pub fn from_keyword(keyword: &str) -> Self {
        keyword.parse().unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommitCategory {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feat" | "feature" => Ok(Self::Feature),
            "fix" | "bugfix" => Ok(Self::Fix),
            "docs" | "doc" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "test" | "tests" => Ok(Self::Test),
            "chore" => Ok(Self::Chore),
            "breaking" => Ok(Self::Breaking),
            "unknown" | "other" => Ok(Self::Unknown),
            _ => Err(NotesError::UnknownCategory(s.to_string())),
        }
    }
}

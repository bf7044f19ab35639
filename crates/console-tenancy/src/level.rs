//! The three nested selection levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A level of the Organization → Project → Workspace hierarchy.
///
/// Ordering follows nesting: `Org < Project < Workspace`. A level's
/// descendants are the levels greater than it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Organization, the root of the hierarchy.
    Org,
    /// Project, owned by an Organization.
    Project,
    /// Workspace, owned by a Project.
    Workspace,
}

impl Level {
    /// All levels, ancestor first.
    pub const ALL: [Self; 3] = [Self::Org, Self::Project, Self::Workspace];

    /// Storage key of this level's slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Project => "project",
            Self::Workspace => "workspace",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Org => "Organization",
            Self::Project => "Project",
            Self::Workspace => "Workspace",
        }
    }

    /// Name with its indefinite article, for messages.
    #[must_use]
    pub const fn with_article(self) -> &'static str {
        match self {
            Self::Org => "an Organization",
            Self::Project => "a Project",
            Self::Workspace => "a Workspace",
        }
    }

    /// Position in [`Level::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The owning level, if any.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Org => None,
            Self::Project => Some(Self::Org),
            Self::Workspace => Some(Self::Project),
        }
    }

    /// Levels strictly above this one, root first.
    pub fn ancestors(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |level| *level < self)
    }

    /// Levels strictly below this one.
    pub fn descendants(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |level| *level > self)
    }

    /// This level followed by its descendants.
    pub fn and_descendants(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |level| *level >= self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "org" | "organization" => Ok(Self::Org),
            "project" => Ok(Self::Project),
            "workspace" | "ws" => Ok(Self::Workspace),
            other => Err(format!("unknown level '{other}'")),
        }
    }
}

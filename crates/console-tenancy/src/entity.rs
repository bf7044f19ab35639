//! Organization, Project and Workspace records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TenancyError};
use crate::level::Level;

/// Organization type code of enterprise organizations.
pub const ORG_TYPE_ENTERPRISE: &str = "entp";

/// An entity that occupies one selection slot.
pub trait Scoped: Serialize + DeserializeOwned {
    /// Slot this entity is stored in.
    const LEVEL: Level;

    /// Remote identifier.
    fn id(&self) -> &str;

    /// Name shown to the user.
    fn display_name(&self) -> &str;

    /// Whether `key` names this entity by its secondary key (code or name).
    fn matches_alias(&self, key: &str) -> bool;

    /// The subset of fields persisted on selection.
    #[must_use]
    fn snapshot(&self) -> Self;
}

/// A console Organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID.
    pub id: String,
    /// Short organization code.
    #[serde(default)]
    pub code: String,
    /// Organization name.
    pub name: String,
    /// Organization type as reported by the remote; never persisted.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
}

impl Organization {
    /// Whether this is an enterprise organization, the only kind that can
    /// be selected.
    #[must_use]
    pub fn is_enterprise(&self) -> bool {
        self.org_type.as_deref() == Some(ORG_TYPE_ENTERPRISE)
    }
}

impl Scoped for Organization {
    const LEVEL: Level = Level::Org;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn matches_alias(&self, key: &str) -> bool {
        !self.code.is_empty() && self.code == key
    }

    fn snapshot(&self) -> Self {
        Self {
            org_type: None,
            ..self.clone()
        }
    }
}

/// A console Project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: String,
    /// Project name (unique within the organization).
    pub name: String,
    /// Project title.
    #[serde(default)]
    pub title: String,
    /// Owning organization ID.
    #[serde(default, alias = "orgId")]
    pub org_id: String,
}

impl Scoped for Project {
    const LEVEL: Level = Level::Project;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn matches_alias(&self, key: &str) -> bool {
        self.name == key
    }

    fn snapshot(&self) -> Self {
        self.clone()
    }
}

/// A console Workspace. Only `id` and `name` are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace ID.
    pub id: String,
    /// Workspace name (unique within the project).
    pub name: String,
}

impl Scoped for Workspace {
    const LEVEL: Level = Level::Workspace;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn matches_alias(&self, key: &str) -> bool {
        self.name == key
    }

    fn snapshot(&self) -> Self {
        self.clone()
    }
}

/// Finds the entity identified by `key`.
///
/// An exact id match wins over a code/name match, so an entity whose name
/// happens to equal another's id cannot shadow it.
///
/// # Errors
///
/// Returns [`TenancyError::NotFound`] if nothing matches.
pub fn find_by_key<'a, T: Scoped>(entities: &'a [T], key: &str) -> Result<&'a T> {
    entities
        .iter()
        .find(|e| e.id() == key)
        .or_else(|| entities.iter().find(|e| e.matches_alias(key)))
        .ok_or_else(|| TenancyError::NotFound {
            level: T::LEVEL,
            key: key.to_string(),
        })
}

/// Keeps only enterprise organizations.
#[must_use]
pub fn enterprise_only(orgs: Vec<Organization>) -> Vec<Organization> {
    orgs.into_iter().filter(Organization::is_enterprise).collect()
}

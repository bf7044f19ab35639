//! The persisted Organization / Project / Workspace selection.

use console_config::SelectionStore;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::entity::{Organization, Project, Scoped};
use crate::error::{Result, TenancyError};
use crate::level::Level;

/// Root key of the selection namespace in the store.
pub const SELECTION_ROOT: &str = "console";

/// Placeholder shown for an empty slot.
pub const NOT_SELECTED: &str = "Not Selected";

/// Which prefix of the hierarchy is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SelectionState {
    /// Nothing selected.
    Empty,
    /// Organization only.
    OrgOnly,
    /// Organization and Project.
    OrgProject,
    /// Organization, Project and Workspace.
    OrgProjectWorkspace,
}

impl SelectionState {
    /// The deepest selected level.
    #[must_use]
    pub const fn deepest(self) -> Option<Level> {
        match self {
            Self::Empty => None,
            Self::OrgOnly => Some(Level::Org),
            Self::OrgProject => Some(Level::Project),
            Self::OrgProjectWorkspace => Some(Level::Workspace),
        }
    }
}

/// Display form of the selection. Empty slots read [`NOT_SELECTED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    /// Selected organization name.
    pub org: String,
    /// Selected project name.
    pub project: String,
    /// Selected workspace name.
    pub workspace: String,
}

/// The current selection, read from and written to a [`SelectionStore`].
///
/// Selecting a level clears every level below it; clearing a level clears
/// it and every level below it. Ancestor presence is *not* checked here:
/// callers establish it through [`ContextGate`](crate::ContextGate) before
/// fetching the entity to select.
///
/// Every mutation rewrites the whole selection root with one store `set`,
/// so a failed write leaves the previous selection intact.
#[derive(Debug)]
pub struct SelectionContext<S> {
    store: S,
}

impl<S: SelectionStore> SelectionContext<S> {
    /// Wraps a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the snapshot stored for `T`'s level.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyError::CorruptSelection`] if the slot holds
    /// something that does not decode as `T`.
    pub fn get<T: Scoped>(&self) -> Result<Option<T>> {
        self.store
            .get(&slot_path(T::LEVEL))
            .filter(|value| !value.is_null())
            .map(|value| {
                serde_json::from_value(value).map_err(|source| TenancyError::CorruptSelection {
                    level: T::LEVEL,
                    source,
                })
            })
            .transpose()
    }

    /// Returns the raw stored value of a slot.
    pub fn get_value(&self, level: Level) -> Option<Value> {
        self.store
            .get(&slot_path(level))
            .filter(|value| !value.is_null())
    }

    /// Whether a slot holds a usable selection, i.e. a non-empty string id.
    /// Agrees with [`ContextGate`](crate::ContextGate), which reads the same
    /// id.
    pub fn is_selected(&self, level: Level) -> bool {
        self.id(level).is_some()
    }

    /// Returns the id stored in a slot, if any.
    pub fn id(&self, level: Level) -> Option<String> {
        self.store
            .get(&format!("{}.id", slot_path(level)))
            .and_then(|value| value.as_str().map(str::to_string))
            .filter(|id| !id.is_empty())
    }

    /// Selects `entity` at its level and clears every level below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or stored; the
    /// previous selection is left untouched in that case.
    pub fn select<T: Scoped>(&mut self, entity: &T) -> Result<()> {
        let level = T::LEVEL;
        let value = serde_json::to_value(entity.snapshot())
            .map_err(|source| TenancyError::Encode { level, source })?;

        let mut root = self.root();
        root.insert(level.key().to_string(), value);
        for below in level.descendants() {
            root.remove(below.key());
        }
        self.store.set(SELECTION_ROOT, Value::Object(root))?;

        info!(level = %level, id = entity.id(), name = entity.display_name(), "selected");
        Ok(())
    }

    /// Selects `org` and `project` together and clears the workspace, in a
    /// single store write.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be encoded or stored; the
    /// previous selection is left untouched in that case.
    pub fn select_org_and_project(&mut self, org: &Organization, project: &Project) -> Result<()> {
        let org_value = serde_json::to_value(org.snapshot()).map_err(|source| {
            TenancyError::Encode {
                level: Level::Org,
                source,
            }
        })?;
        let project_value = serde_json::to_value(project.snapshot()).map_err(|source| {
            TenancyError::Encode {
                level: Level::Project,
                source,
            }
        })?;

        let mut root = self.root();
        root.insert(Level::Org.key().to_string(), org_value);
        root.insert(Level::Project.key().to_string(), project_value);
        root.remove(Level::Workspace.key());
        self.store.set(SELECTION_ROOT, Value::Object(root))?;

        info!(org_id = %org.id, project_id = %project.id, "selected organization and project");
        Ok(())
    }

    /// Clears `level` and every level below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the change.
    pub fn clear(&mut self, level: Level) -> Result<()> {
        let mut root = self.root();
        let mut removed = false;
        for cleared in level.and_descendants() {
            removed |= root.remove(cleared.key()).is_some();
        }
        if !removed {
            debug!(level = %level, "nothing to clear");
            return Ok(());
        }
        self.store.set(SELECTION_ROOT, Value::Object(root))?;
        info!(level = %level, "cleared selection");
        Ok(())
    }

    /// Clears the whole selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the change.
    pub fn clear_all(&mut self) -> Result<()> {
        self.clear(Level::Org)
    }

    /// Current state of the hierarchy.
    ///
    /// Counts selected levels from the root down and stops at the first
    /// gap, so a hand-edited store holding a project without an org reads
    /// as [`SelectionState::Empty`].
    pub fn state(&self) -> SelectionState {
        let depth = Level::ALL
            .into_iter()
            .take_while(|level| self.is_selected(*level))
            .count();
        match depth {
            0 => SelectionState::Empty,
            1 => SelectionState::OrgOnly,
            2 => SelectionState::OrgProject,
            _ => SelectionState::OrgProjectWorkspace,
        }
    }

    /// The three slots for display. Never fails: empty or unreadable slots
    /// read [`NOT_SELECTED`].
    pub fn describe(&self) -> SelectionSummary {
        SelectionSummary {
            org: self.slot_name(Level::Org),
            project: self.slot_name(Level::Project),
            workspace: self.slot_name(Level::Workspace),
        }
    }

    fn slot_name(&self, level: Level) -> String {
        let Some(value) = self.get_value(level) else {
            return NOT_SELECTED.to_string();
        };
        if !self.is_selected(level) {
            warn!(level = %level, "stored selection has no id");
            return NOT_SELECTED.to_string();
        }
        match value.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => {
                warn!(level = %level, "stored selection has no name");
                NOT_SELECTED.to_string()
            }
        }
    }

    fn root(&self) -> Map<String, Value> {
        match self.store.get(SELECTION_ROOT) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn slot_path(level: Level) -> String {
    format!("{SELECTION_ROOT}.{}", level.key())
}

//! Selection store implementations.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::document::{delete_path, get_path, set_path};
use crate::error::{ConfigError, Result};

/// A key-path addressed persisted store.
///
/// Paths are dotted (`console.org.id`). Implementations apply each `set`
/// or `delete` as a single unit: either the whole change lands or the
/// stored state is unchanged.
pub trait SelectionStore {
    /// Returns the value stored at `path`.
    fn get(&self, path: &str) -> Option<Value>;

    /// Stores `value` at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or the change cannot be
    /// persisted.
    fn set(&mut self, path: &str, value: Value) -> Result<()>;

    /// Removes whatever is stored at `path`. Missing paths are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or the change cannot be
    /// persisted.
    fn delete(&mut self, path: &str) -> Result<()>;
}

/// In-memory store, used by tests and dry runs.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    document: Value,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Value::Object(Map::new()),
        }
    }

    /// Creates a store pre-populated with `document`.
    #[must_use]
    pub const fn with_document(document: Value) -> Self {
        Self { document }
    }

    /// Returns the whole document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore for MemoryStore {
    fn get(&self, path: &str) -> Option<Value> {
        get_path(&self.document, path).cloned()
    }

    fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let mut next = self.document.clone();
        set_path(&mut next, path, value)?;
        self.document = next;
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        delete_path(&mut self.document, path)?;
        Ok(())
    }
}

/// JSON file backed store.
///
/// The whole document is loaded on open and rewritten on every change.
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a crash mid-write leaves the previous file intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: Value,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing or empty file yields an empty
    /// document; nothing is written until the first change.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or does not
    /// hold a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Value::Object(Map::new()),
            // The root must be an object; arrays and scalars are parse errors.
            Ok(content) => serde_json::from_str::<Map<String, Value>>(&content)
                .map(Value::Object)
                .map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Value::Object(Map::new()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        debug!(path = %path.display(), "opened config store");
        Ok(Self { path, document })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the whole document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    fn commit(&mut self, next: Value) -> Result<()> {
        write_atomic(&self.path, &next)?;
        self.document = next;
        Ok(())
    }
}

impl SelectionStore for JsonFileStore {
    fn get(&self, path: &str) -> Option<Value> {
        get_path(&self.document, path).cloned()
    }

    fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let mut next = self.document.clone();
        set_path(&mut next, path, value)?;
        self.commit(next)
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        let mut next = self.document.clone();
        if delete_path(&mut next, path)? {
            self.commit(next)?;
        }
        Ok(())
    }
}

fn write_atomic(path: &Path, document: &Value) -> Result<()> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let content = serde_json::to_string_pretty(document).map_err(|e| write_err(e.into()))?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;
    debug!(path = %path.display(), "wrote config store");
    Ok(())
}

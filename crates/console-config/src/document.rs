//! Dotted key-path access into a JSON document.
//!
//! A path such as `console.org.id` walks nested objects one segment at a
//! time. Intermediate objects are created on write; non-object values met
//! on the way are replaced.

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Splits a dotted path into its segments.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPath`] for an empty path or a path with an
/// empty segment (`a..b`, `.a`, `a.`).
pub fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

/// Looks up the value at `path`, if every segment exists.
#[must_use]
pub fn get_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = split_path(path).ok()?;
    segments
        .into_iter()
        .try_fold(document, |current, segment| current.as_object()?.get(segment))
}

/// Writes `value` at `path`, creating intermediate objects as needed.
///
/// # Errors
///
/// Returns an error if the path is malformed.
pub fn set_path(document: &mut Value, path: &str, value: Value) -> Result<()> {
    let segments = split_path(path)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(ConfigError::InvalidPath(path.to_string()));
    };

    let mut current = object_mut(document);
    for segment in parents {
        let child = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = object_mut(child);
    }
    current.insert((*last).to_string(), value);
    Ok(())
}

/// Removes the value at `path`. Returns whether anything was removed.
///
/// # Errors
///
/// Returns an error if the path is malformed.
pub fn delete_path(document: &mut Value, path: &str) -> Result<bool> {
    let segments = split_path(path)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(ConfigError::InvalidPath(path.to_string()));
    };

    let mut current = document;
    for segment in parents {
        match current.as_object_mut().and_then(|map| map.get_mut(*segment)) {
            Some(child) => current = child,
            None => return Ok(false),
        }
    }
    Ok(current
        .as_object_mut()
        .is_some_and(|map| map.remove(*last).is_some()))
}

fn object_mut(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    let Value::Object(map) = value else {
        unreachable!("value was just replaced with an object")
    };
    map
}

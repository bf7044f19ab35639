//! One-shot migration of renamed root keys.

use tracing::debug;

use crate::error::Result;
use crate::store::SelectionStore;

/// Root key used by older releases for the selection namespace.
pub const LEGACY_SELECTION_ROOT: &str = "$console";

/// Moves the value at `legacy` to `current` when only the legacy key is set.
///
/// Returns `true` if a migration happened. When both keys are present the
/// current one wins and the legacy value is left alone.
///
/// # Errors
///
/// Returns an error if the store cannot persist the change.
pub fn migrate_root<S>(store: &mut S, legacy: &str, current: &str) -> Result<bool>
where
    S: SelectionStore + ?Sized,
{
    let Some(old) = store.get(legacy) else {
        return Ok(false);
    };
    if store.get(current).is_some() {
        return Ok(false);
    }

    debug!(from = legacy, to = current, "migrating config key");
    store.set(current, old)?;
    store.delete(legacy)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn migrates_legacy_only() {
        let mut store =
            MemoryStore::with_document(json!({ "$console": { "org": { "id": "1" } } }));
        assert!(migrate_root(&mut store, LEGACY_SELECTION_ROOT, "console").expect("migrate"));
        assert_eq!(store.document(), &json!({ "console": { "org": { "id": "1" } } }));
    }

    #[test]
    fn keeps_current_when_both_present() {
        let mut store = MemoryStore::with_document(json!({
            "$console": { "org": { "id": "old" } },
            "console": { "org": { "id": "new" } }
        }));
        assert!(!migrate_root(&mut store, LEGACY_SELECTION_ROOT, "console").expect("migrate"));
        assert_eq!(store.get("console.org.id"), Some(json!("new")));
        assert_eq!(store.get("$console.org.id"), Some(json!("old")));
    }

    #[test]
    fn nothing_to_migrate() {
        let mut store = MemoryStore::new();
        assert!(!migrate_root(&mut store, LEGACY_SELECTION_ROOT, "console").expect("migrate"));
        assert_eq!(store.document(), &json!({}));
    }
}

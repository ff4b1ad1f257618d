//! Configuration store collaborator interface.
//!
//! All configuration reads go through this trait. The engine only reads
//! stored values, their language tags, and translation-overlay existence;
//! writing overlays is the consuming application's job.

use serde_json::Value as JsonValue;

/// Key under which a configuration object stores its own language tag.
pub const LANGCODE_KEY: &str = "langcode";

/// Key-value access to stored configuration objects.
///
/// Keep the interface small and stable: a decorator wrapping this trait can
/// inject staging or overlay context without changing any call sites.
pub trait ConfigStore: Send + Sync {
    /// Load the full stored value for a configuration name.
    ///
    /// Returns `None` if no such configuration object exists.
    fn get(&self, name: &str) -> Option<JsonValue>;

    /// Whether a configuration object exists under this name.
    fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Delete a configuration object.
    ///
    /// Returns `true` if an object was removed, `false` if none existed.
    fn delete(&self, name: &str) -> bool;

    /// Whether a stored translation overlay exists for a configuration name
    /// in the given language. Partial overlays count.
    fn has_translation(&self, name: &str, langcode: &str) -> bool;
}

/// Read the stored language tag of a configuration object.
///
/// Returns `None` when the object does not exist or carries no tag; the
/// caller decides the fallback.
pub fn stored_langcode(store: &dyn ConfigStore, name: &str) -> Option<String> {
    store
        .get(name)?
        .get(LANGCODE_KEY)?
        .as_str()
        .map(str::to_string)
}

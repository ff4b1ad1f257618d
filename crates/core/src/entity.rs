//! Entity handles and entity-type metadata consumed by entity mappers.
//!
//! The engine never loads entities itself. The consuming application
//! resolves an entity (typically from a routed request) and hands it over
//! as an opaque [`ConfigEntity`] handle; entity-type metadata comes from an
//! [`EntityTypeDirectory`] it also owns.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A resolved configuration entity handle.
///
/// Only the two facts an entity mapper needs: the machine id (to derive the
/// entity's configuration name) and the display label (to title the
/// translation page).
pub trait ConfigEntity: Send + Sync {
    /// Machine id of the entity.
    fn id(&self) -> &str;

    /// Human-readable display label.
    fn label(&self) -> &str;
}

/// Metadata describing a configuration entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTypeInfo {
    /// Machine id of the entity type (e.g., "menu").
    pub id: String,

    /// Human-readable label (e.g., "Menu").
    pub label: String,

    /// Prefix for configuration names of this type; an entity's
    /// configuration object lives at `<config_prefix>.<entity id>`.
    pub config_prefix: String,
}

impl EntityTypeInfo {
    /// Create entity type metadata.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        config_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            config_prefix: config_prefix.into(),
        }
    }
}

/// Lookup of entity-type metadata by machine id.
pub trait EntityTypeDirectory: Send + Sync {
    /// The metadata registered for an entity type, if any.
    fn definition(&self, entity_type: &str) -> Option<EntityTypeInfo>;
}

/// Request-scoped attributes handed to [`populate_from_request`].
///
/// Maps entity-type keys to the entity handles the routing layer resolved
/// for the current request. Each request builds its own context; nothing is
/// shared across requests.
///
/// [`populate_from_request`]: crate::mapper::ConfigMapper::populate_from_request
#[derive(Clone, Default)]
pub struct RequestContext {
    entities: HashMap<String, Arc<dyn ConfigEntity>>,
}

impl RequestContext {
    /// Create an empty request context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a resolved entity under an entity-type key.
    pub fn with_entity(mut self, key: impl Into<String>, entity: Arc<dyn ConfigEntity>) -> Self {
        self.insert_entity(key, entity);
        self
    }

    /// Attach a resolved entity under an entity-type key.
    pub fn insert_entity(&mut self, key: impl Into<String>, entity: Arc<dyn ConfigEntity>) {
        self.entities.insert(key.into(), entity);
    }

    /// The resolved entity for an entity-type key, if any.
    pub fn entity(&self, key: &str) -> Option<Arc<dyn ConfigEntity>> {
        self.entities.get(key).cloned()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("keys", &self.entities.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    struct Handle {
        id: String,
        label: String,
    }

    impl ConfigEntity for Handle {
        fn id(&self) -> &str {
            &self.id
        }

        fn label(&self) -> &str {
            &self.label
        }
    }

    #[test]
    fn request_context_lookup() {
        let ctx = RequestContext::new().with_entity(
            "menu",
            Arc::new(Handle {
                id: "main".to_string(),
                label: "Main navigation".to_string(),
            }),
        );

        let entity = ctx.entity("menu").unwrap();
        assert_eq!(entity.id(), "main");
        assert_eq!(entity.label(), "Main navigation");
        assert!(ctx.entity("block").is_none());
    }

    #[test]
    fn entity_type_info_round_trip() {
        let info = EntityTypeInfo::new("menu", "Menu", "system.menu");
        let json = serde_json::to_string(&info).unwrap();
        let parsed: EntityTypeInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, info);
    }
}

//! Mapping definition registry and mapper construction.
//!
//! The registry owns the process-wide cache of frozen mapping definitions
//! and builds a fresh mapper per query; it never holds mapper instances.
//! The cache is read-mostly and replaced wholesale when the composing
//! application re-runs discovery (e.g. after extension changes).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::definition::{MapperKind, MappingDefinition};
use crate::entity::EntityTypeDirectory;
use crate::error::{MapperError, MapperResult};
use crate::language::LanguageDirectory;
use crate::mapper::{ConfigEntityMapper, ConfigMapper, ConfigNamesMapper, MapperDeps};
use crate::schema::SchemaRegistry;
use crate::store::ConfigStore;

/// Registry of mapping definitions.
///
/// All collaborators are injected at construction and shared with every
/// mapper the registry builds.
pub struct MapperRegistry {
    definitions: RwLock<HashMap<String, Arc<MappingDefinition>>>,
    deps: MapperDeps,
    entity_types: Arc<dyn EntityTypeDirectory>,
}

impl MapperRegistry {
    /// Create a registry over a frozen definition set.
    pub fn new(
        definitions: Vec<Arc<MappingDefinition>>,
        store: Arc<dyn ConfigStore>,
        schemas: Arc<dyn SchemaRegistry>,
        languages: Arc<dyn LanguageDirectory>,
        entity_types: Arc<dyn EntityTypeDirectory>,
    ) -> Self {
        let registry = Self {
            definitions: RwLock::new(HashMap::new()),
            deps: MapperDeps {
                store,
                schemas,
                languages,
            },
            entity_types,
        };
        registry.rebuild(definitions);
        registry
    }

    /// Replace the cached definitions wholesale.
    ///
    /// The swap is all-or-nothing; readers see either the old set or the
    /// new one, never a partial mix. Invalidation is driven externally.
    pub fn rebuild(&self, definitions: Vec<Arc<MappingDefinition>>) {
        let map: HashMap<String, Arc<MappingDefinition>> = definitions
            .into_iter()
            .map(|definition| (definition.id().to_string(), definition))
            .collect();
        let count = map.len();
        *self.definitions.write() = map;
        info!(count, "mapping definitions rebuilt");
    }

    /// The frozen definition for an id, if registered.
    pub fn definition(&self, id: &str) -> Option<Arc<MappingDefinition>> {
        self.definitions.read().get(id).cloned()
    }

    /// Registered definition ids, ordered by weight then id.
    pub fn ids(&self) -> Vec<String> {
        let definitions = self.definitions.read();
        let mut ids: Vec<(i32, String)> = definitions
            .values()
            .map(|d| (d.weight(), d.id().to_string()))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    /// Whether no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }

    /// A fresh, unbound mapper per registered definition, keyed by id.
    pub fn mappers(&self) -> HashMap<String, Box<dyn ConfigMapper>> {
        let definitions: Vec<Arc<MappingDefinition>> =
            self.definitions.read().values().cloned().collect();
        definitions
            .into_iter()
            .map(|definition| {
                (
                    definition.id().to_string(),
                    self.create_mapper_from(definition),
                )
            })
            .collect()
    }

    /// Build a fresh mapper for a registered definition.
    pub fn create_mapper(&self, id: &str) -> MapperResult<Box<dyn ConfigMapper>> {
        let definition = self
            .definition(id)
            .ok_or_else(|| MapperError::UnknownMapper(id.to_string()))?;
        Ok(self.create_mapper_from(definition))
    }

    /// Build a fresh mapper for an explicit definition, registered or not.
    pub fn create_mapper_from(&self, definition: Arc<MappingDefinition>) -> Box<dyn ConfigMapper> {
        match definition.kind() {
            MapperKind::Names => Box::new(ConfigNamesMapper::new(definition, self.deps.clone())),
            MapperKind::Entity => Box::new(ConfigEntityMapper::new(
                definition,
                self.deps.clone(),
                Arc::clone(&self.entity_types),
            )),
        }
    }

    /// Whether a schema is registered for a configuration name.
    pub fn has_schema(&self, name: &str) -> bool {
        self.deps.schemas.has_schema(name)
    }

    /// Whether a configuration name's schema contains translatable leaves.
    ///
    /// Names without a registered schema are never walked and report
    /// `false`.
    pub fn has_translatable(&self, name: &str) -> bool {
        match self.deps.schemas.schema(name) {
            Some(node) => node.is_translatable(),
            None => {
                debug!(name, "no schema registered for configuration name");
                false
            }
        }
    }
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("definitions", &self.len())
            .finish()
    }
}

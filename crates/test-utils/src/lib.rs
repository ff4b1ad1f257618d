//! Tradotto test utilities.
//!
//! In-memory implementations of the engine's external collaborators plus
//! fixture builders, so tests exercise the real mapping and schema-walk
//! code against controllable data.

use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use serde_json::Value as JsonValue;

use tradotto_core::definition::MappingDefinition;
use tradotto_core::entity::{ConfigEntity, EntityTypeDirectory, EntityTypeInfo};
use tradotto_core::language::{Language, LanguageDirectory};
use tradotto_core::registry::MapperRegistry;
use tradotto_core::schema::{SchemaNode, SchemaRegistry};
use tradotto_core::store::ConfigStore;

/// In-memory configuration store.
///
/// Translation overlays are modeled by existence only, the way the engine
/// consumes them.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: DashMap<String, JsonValue>,
    translations: DashSet<(String, String)>,
}

impl MemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a configuration object.
    pub fn with_config(self, name: &str, value: JsonValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Mark a translation overlay as existing.
    pub fn with_translation(self, name: &str, langcode: &str) -> Self {
        self.add_translation(name, langcode);
        self
    }

    /// Insert or replace a configuration object.
    pub fn insert(&self, name: &str, value: JsonValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Mark a translation overlay as existing.
    pub fn add_translation(&self, name: &str, langcode: &str) {
        self.translations
            .insert((name.to_string(), langcode.to_string()));
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, name: &str) -> Option<JsonValue> {
        self.values.get(name).map(|v| v.clone())
    }

    fn exists(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn delete(&self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    fn has_translation(&self, name: &str, langcode: &str) -> bool {
        self.translations
            .contains(&(name.to_string(), langcode.to_string()))
    }
}

/// In-memory schema registry.
#[derive(Debug, Default)]
pub struct MemorySchemaRegistry {
    schemas: DashMap<String, SchemaNode>,
}

impl MemorySchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema tree for a configuration name.
    pub fn with_schema(self, name: &str, node: SchemaNode) -> Self {
        self.insert(name, node);
        self
    }

    /// Register a schema whose single leaf is translatable.
    pub fn with_translatable_schema(self, name: &str) -> Self {
        self.with_schema(
            name,
            SchemaNode::container(vec![SchemaNode::translatable_leaf()]),
        )
    }

    /// Register a schema with no translatable leaves.
    pub fn with_untranslatable_schema(self, name: &str) -> Self {
        self.with_schema(name, SchemaNode::container(vec![SchemaNode::plain_leaf()]))
    }

    /// Insert or replace a schema tree.
    pub fn insert(&self, name: &str, node: SchemaNode) {
        self.schemas.insert(name.to_string(), node);
    }
}

impl SchemaRegistry for MemorySchemaRegistry {
    fn schema(&self, name: &str) -> Option<SchemaNode> {
        self.schemas.get(name).map(|n| n.clone())
    }

    fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }
}

/// In-memory language directory.
#[derive(Debug, Default)]
pub struct MemoryLanguageDirectory {
    languages: DashMap<String, Language>,
}

impl MemoryLanguageDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configured language.
    pub fn with_language(self, language: Language) -> Self {
        self.insert(language);
        self
    }

    /// Insert or replace a configured language.
    pub fn insert(&self, language: Language) {
        self.languages.insert(language.id.clone(), language);
    }
}

impl LanguageDirectory for MemoryLanguageDirectory {
    fn load(&self, code: &str) -> Option<Language> {
        self.languages.get(code).map(|l| l.clone())
    }

    fn list_all(&self) -> Vec<Language> {
        let mut languages: Vec<Language> =
            self.languages.iter().map(|l| l.value().clone()).collect();
        languages.sort_by(|a, b| (a.weight, &a.id).cmp(&(b.weight, &b.id)));
        languages
    }
}

/// In-memory entity-type directory.
#[derive(Debug, Default)]
pub struct MemoryEntityTypes {
    types: DashMap<String, EntityTypeInfo>,
}

impl MemoryEntityTypes {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type.
    pub fn with_type(self, info: EntityTypeInfo) -> Self {
        self.insert(info);
        self
    }

    /// Insert or replace an entity type.
    pub fn insert(&self, info: EntityTypeInfo) {
        self.types.insert(info.id.clone(), info);
    }
}

impl EntityTypeDirectory for MemoryEntityTypes {
    fn definition(&self, entity_type: &str) -> Option<EntityTypeInfo> {
        self.types.get(entity_type).map(|t| t.clone())
    }
}

/// A test entity handle.
#[derive(Debug, Clone)]
pub struct TestEntity {
    pub id: String,
    pub label: String,
}

impl TestEntity {
    /// Create a test entity handle.
    pub fn new(id: &str, label: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            label: label.to_string(),
        })
    }
}

impl ConfigEntity for TestEntity {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Bundle of in-memory collaborators wired for registry construction.
pub struct TestEnv {
    pub store: Arc<MemoryConfigStore>,
    pub schemas: Arc<MemorySchemaRegistry>,
    pub languages: Arc<MemoryLanguageDirectory>,
    pub entity_types: Arc<MemoryEntityTypes>,
}

impl TestEnv {
    /// Create an environment with empty collaborators.
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryConfigStore::new()),
            schemas: Arc::new(MemorySchemaRegistry::new()),
            languages: Arc::new(MemoryLanguageDirectory::new()),
            entity_types: Arc::new(MemoryEntityTypes::new()),
        }
    }

    /// Replace the configuration store.
    pub fn with_store(mut self, store: MemoryConfigStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Replace the schema registry.
    pub fn with_schemas(mut self, schemas: MemorySchemaRegistry) -> Self {
        self.schemas = Arc::new(schemas);
        self
    }

    /// Replace the language directory.
    pub fn with_languages(mut self, languages: MemoryLanguageDirectory) -> Self {
        self.languages = Arc::new(languages);
        self
    }

    /// Replace the entity-type directory.
    pub fn with_entity_types(mut self, entity_types: MemoryEntityTypes) -> Self {
        self.entity_types = Arc::new(entity_types);
        self
    }

    /// Build a registry over this environment's collaborators.
    pub fn registry(&self, definitions: Vec<Arc<MappingDefinition>>) -> MapperRegistry {
        MapperRegistry::new(
            definitions,
            self.store.clone(),
            self.schemas.clone(),
            self.languages.clone(),
            self.entity_types.clone(),
        )
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

//! Mapping unit backed by a configuration entity instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::warn;

use crate::definition::MappingDefinition;
use crate::entity::{ConfigEntity, EntityTypeDirectory, RequestContext};
use crate::error::MapperResult;
use crate::language::Language;
use crate::mapper::{ConfigMapper, ConfigNamesMapper, MapperDeps, Operation};

/// Placeholder in a title template replaced by the bound entity's label.
const LABEL_PLACEHOLDER: &str = "!label";

/// Mapping unit for one configuration entity instance.
///
/// The mapper is queryable for type-level metadata as soon as it is
/// constructed; binding a concrete entity appends the entity's derived
/// configuration name and fills in the display title. A mapper binds at
/// most one entity in its lifetime.
pub struct ConfigEntityMapper {
    inner: ConfigNamesMapper,
    entity_types: Arc<dyn EntityTypeDirectory>,
    entity_type: Option<String>,
    entity: Option<Arc<dyn ConfigEntity>>,
    group_label: Option<String>,
}

impl ConfigEntityMapper {
    /// Create an entity mapper for a definition.
    ///
    /// The entity type comes from the definition. For grouped sub-mappings
    /// (definitions carrying a base entity type, e.g. per-type field
    /// collections) the type label is composed from the base type's label.
    pub fn new(
        definition: Arc<MappingDefinition>,
        deps: MapperDeps,
        entity_types: Arc<dyn EntityTypeDirectory>,
    ) -> Self {
        let entity_type = definition.entity_type().map(str::to_string);
        let group_label = definition
            .base_entity_type()
            .and_then(|base| entity_types.definition(base))
            .map(|info| format!("{} fields", info.label));

        Self {
            inner: ConfigNamesMapper::new(definition, deps),
            entity_types,
            entity_type,
            entity: None,
            group_label,
        }
    }

    /// Set the entity type, if none was fixed at construction.
    ///
    /// Reports `false` without mutating when a type is already set.
    pub fn set_entity_type(&mut self, entity_type: impl Into<String>) -> bool {
        if self.entity_type.is_some() {
            return false;
        }
        self.entity_type = Some(entity_type.into());
        true
    }

    /// The entity type this mapper is for.
    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    /// The bound entity, once [`bind_entity`] has succeeded.
    ///
    /// [`bind_entity`]: ConfigEntityMapper::bind_entity
    pub fn entity(&self) -> Option<&Arc<dyn ConfigEntity>> {
        self.entity.as_ref()
    }

    /// Bind a concrete entity instance to this mapper.
    ///
    /// On success the entity's configuration name
    /// (`<config prefix>.<entity id>`) is appended to the resolved names
    /// and the title template's `!label` placeholder is replaced with the
    /// entity's label. Reports `false` without mutating when an entity is
    /// already bound, when no entity type is set, or when the entity type
    /// is not registered in the directory.
    pub fn bind_entity(&mut self, entity: Arc<dyn ConfigEntity>) -> bool {
        if self.entity.is_some() {
            return false;
        }

        let Some(entity_type) = self.entity_type.as_deref() else {
            warn!(
                mapper = self.inner.definition().id(),
                "cannot bind an entity before an entity type is set"
            );
            return false;
        };

        let Some(info) = self.entity_types.definition(entity_type) else {
            warn!(
                mapper = self.inner.definition().id(),
                entity_type, "entity type not registered; mapper left unbound"
            );
            return false;
        };

        let title = self.inner.title().replace(LABEL_PLACEHOLDER, entity.label());
        self.inner.set_title(title);
        self.inner
            .add_config_name(&format!("{}.{}", info.config_prefix, entity.id()));
        self.entity = Some(entity);

        true
    }

    fn entity_type_label(&self) -> Option<String> {
        let entity_type = self.entity_type.as_deref()?;
        self.entity_types
            .definition(entity_type)
            .map(|info| info.label)
    }
}

impl ConfigMapper for ConfigEntityMapper {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn title(&self) -> String {
        self.inner.title()
    }

    fn base_route_name(&self) -> &str {
        self.inner.base_route_name()
    }

    fn route_parameters(&self) -> HashMap<String, String> {
        match (&self.entity_type, &self.entity) {
            (Some(entity_type), Some(entity)) => {
                HashMap::from([(entity_type.clone(), entity.id().to_string())])
            }
            // Callers must bind before asking for parameters.
            _ => HashMap::new(),
        }
    }

    fn base_path(&self) -> String {
        let mut path = self.inner.definition().base_path().to_string();
        for (key, value) in self.route_parameters() {
            path = path.replace(&format!("{{{key}}}"), &value);
        }
        path
    }

    fn config_names(&self) -> &[String] {
        self.inner.config_names()
    }

    fn add_config_name(&mut self, name: &str) {
        self.inner.add_config_name(name);
    }

    fn weight(&self) -> i32 {
        self.inner.weight()
    }

    fn langcode(&self) -> MapperResult<String> {
        self.inner.langcode()
    }

    fn language_with_fallback(&self) -> MapperResult<Option<Language>> {
        self.inner.language_with_fallback()
    }

    fn config_data(&self) -> HashMap<String, JsonValue> {
        self.inner.config_data()
    }

    fn has_schema(&self) -> bool {
        self.inner.has_schema()
    }

    fn has_translatable(&self) -> bool {
        self.inner.has_translatable()
    }

    fn has_translation(&self, langcode: &str) -> bool {
        self.inner.has_translation(langcode)
    }

    fn type_name(&self) -> String {
        self.entity_type_label()
            .unwrap_or_else(|| self.inner.type_name())
    }

    fn type_label(&self) -> String {
        if let Some(label) = &self.group_label {
            return label.clone();
        }
        self.entity_type_label()
            .unwrap_or_else(|| self.inner.type_label())
    }

    fn operations(&self) -> Vec<Operation> {
        vec![Operation {
            title: "List".to_string(),
            href: format!("/admin/config/translate/{}", self.id()),
        }]
    }

    fn populate_from_request(&mut self, ctx: &RequestContext) -> bool {
        let Some(entity_type) = self.entity_type.clone() else {
            return false;
        };
        match ctx.entity(&entity_type) {
            Some(entity) => self.bind_entity(entity),
            None => false,
        }
    }
}

impl fmt::Debug for ConfigEntityMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigEntityMapper")
            .field("id", &self.inner.id())
            .field("entity_type", &self.entity_type)
            .field("bound", &self.entity.is_some())
            .finish()
    }
}

//! Base mapping unit over a fixed list of configuration names.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::definition::MappingDefinition;
use crate::entity::RequestContext;
use crate::error::{MapperError, MapperResult};
use crate::language::{DEFAULT_LANGCODE, Language};
use crate::mapper::{ConfigMapper, MapperDeps, Operation};
use crate::store;

/// Mapping unit whose configuration names are fully known from its
/// definition.
pub struct ConfigNamesMapper {
    definition: Arc<MappingDefinition>,
    deps: MapperDeps,
    title: String,
    names: Vec<String>,
}

impl ConfigNamesMapper {
    /// Create a mapper for a definition.
    pub fn new(definition: Arc<MappingDefinition>, deps: MapperDeps) -> Self {
        Self {
            title: definition.title().to_string(),
            names: definition.names().to_vec(),
            definition,
            deps,
        }
    }

    /// The underlying definition.
    pub fn definition(&self) -> &MappingDefinition {
        &self.definition
    }

    /// Replace the display title, used when entity binding substitutes the
    /// entity label into the title template.
    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn stored_langcode(&self, name: &str) -> String {
        store::stored_langcode(self.deps.store.as_ref(), name)
            .unwrap_or_else(|| DEFAULT_LANGCODE.to_string())
    }
}

impl ConfigMapper for ConfigNamesMapper {
    fn id(&self) -> &str {
        self.definition.id()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn base_route_name(&self) -> &str {
        self.definition.base_route_name()
    }

    fn route_parameters(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    fn base_path(&self) -> String {
        let mut path = self.definition.base_path().to_string();
        for (key, value) in self.route_parameters() {
            path = path.replace(&format!("{{{key}}}"), &value);
        }
        path
    }

    fn config_names(&self) -> &[String] {
        &self.names
    }

    fn add_config_name(&mut self, name: &str) {
        if self.names.iter().any(|existing| existing == name) {
            debug!(name, mapper = self.definition.id(), "configuration name already resolved");
            return;
        }
        self.names.push(name.to_string());
    }

    fn weight(&self) -> i32 {
        self.definition.weight()
    }

    fn langcode(&self) -> MapperResult<String> {
        let codes: Vec<String> = self.names.iter().map(|n| self.stored_langcode(n)).collect();

        let Some(first) = codes.first() else {
            // No names, no language tags to agree on.
            return Err(MapperError::LanguageConsistency {
                id: self.definition.id().to_string(),
                found: Vec::new(),
            });
        };

        if codes.iter().any(|code| code != first) {
            let mut found = codes;
            found.sort();
            found.dedup();
            return Err(MapperError::LanguageConsistency {
                id: self.definition.id().to_string(),
                found,
            });
        }

        Ok(first.clone())
    }

    fn language_with_fallback(&self) -> MapperResult<Option<Language>> {
        let langcode = self.langcode()?;
        match self.deps.languages.load(&langcode) {
            Some(language) => Ok(Some(language)),
            None if langcode == DEFAULT_LANGCODE => Ok(Some(Language::built_in_english())),
            None => Ok(None),
        }
    }

    fn config_data(&self) -> HashMap<String, JsonValue> {
        self.names
            .iter()
            .map(|name| {
                (
                    name.clone(),
                    self.deps.store.get(name).unwrap_or(JsonValue::Null),
                )
            })
            .collect()
    }

    fn has_schema(&self) -> bool {
        !self.names.is_empty()
            && self
                .names
                .iter()
                .all(|name| self.deps.schemas.has_schema(name))
    }

    fn has_translatable(&self) -> bool {
        !self.names.is_empty()
            && self.names.iter().all(|name| {
                self.deps
                    .schemas
                    .schema(name)
                    .is_some_and(|node| node.is_translatable())
            })
    }

    fn has_translation(&self, langcode: &str) -> bool {
        self.names
            .iter()
            .any(|name| self.deps.store.has_translation(name, langcode))
    }

    fn type_name(&self) -> String {
        "Settings".to_string()
    }

    fn type_label(&self) -> String {
        self.title()
    }

    fn operations(&self) -> Vec<Operation> {
        vec![Operation {
            title: "Translate".to_string(),
            href: format!("{}/translate", self.base_path()),
        }]
    }

    fn populate_from_request(&mut self, _ctx: &RequestContext) -> bool {
        // Name mappers are fully populated at construction time.
        true
    }
}

impl fmt::Debug for ConfigNamesMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigNamesMapper")
            .field("id", &self.definition.id())
            .field("names", &self.names)
            .finish()
    }
}

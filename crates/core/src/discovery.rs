//! Two-phase discovery of mapping definitions.
//!
//! The composing application registers statically declared definitions
//! first (inline or from declarative YAML files), appends dynamically
//! contributed ones, then runs alteration passes over the merged set.
//! [`MapperDiscovery::build`] freezes the result into immutable
//! [`MappingDefinition`] values for the registry.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::definition::{MappingDefinition, RawMappingDefinition};

/// Ordered collection of raw mapping definitions under discovery.
///
/// Registration order is preserved: static definitions come first,
/// contributed ones are appended, and re-registering an existing id
/// replaces the entry in place.
#[derive(Debug, Default)]
pub struct MapperDiscovery {
    entries: Vec<(String, RawMappingDefinition)>,
}

impl MapperDiscovery {
    /// Create an empty discovery set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a statically declared definition.
    pub fn register_static(
        &mut self,
        id: impl Into<String>,
        raw: RawMappingDefinition,
    ) -> &mut Self {
        self.upsert(id.into(), raw);
        self
    }

    /// Parse and register definitions from a declarative YAML document.
    ///
    /// The document is a map from definition id to definition fields, the
    /// same shape [`RawMappingDefinition`] serializes to. Document order is
    /// preserved. `source` only labels error messages.
    pub fn register_yaml(&mut self, source: &str, yaml: &str) -> Result<usize> {
        let doc: serde_yml::Value = serde_yml::from_str(yaml)
            .with_context(|| format!("invalid mapping definition document '{source}'"))?;
        let mapping = doc
            .as_mapping()
            .with_context(|| format!("mapping definition document '{source}' is not a map"))?;

        let mut count = 0;
        for (key, value) in mapping {
            let id = key
                .as_str()
                .with_context(|| format!("non-string definition id in '{source}'"))?;
            let raw: RawMappingDefinition = serde_yml::from_value(value.clone())
                .with_context(|| format!("invalid mapping definition '{id}' in '{source}'"))?;
            self.upsert(id.to_string(), raw);
            count += 1;
        }

        debug!(source, count, "registered mapping definitions from document");
        Ok(count)
    }

    /// Append a dynamically contributed definition.
    ///
    /// Contributions run after static registration and before alterations.
    pub fn contribute(&mut self, id: impl Into<String>, raw: RawMappingDefinition) -> &mut Self {
        let id = id.into();
        debug!(id = %id, "mapping definition contributed");
        self.upsert(id, raw);
        self
    }

    /// Run an alteration pass over the merged set.
    ///
    /// The pass may mutate entries via [`get_mut`], delete them via
    /// [`remove`], or register additional ones. Alterations are applied in
    /// the order the passes are run.
    ///
    /// [`get_mut`]: MapperDiscovery::get_mut
    /// [`remove`]: MapperDiscovery::remove
    pub fn alter<F>(&mut self, alter_fn: F) -> &mut Self
    where
        F: FnOnce(&mut MapperDiscovery),
    {
        alter_fn(self);
        self
    }

    /// Mutable access to a registered raw definition.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut RawMappingDefinition> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, raw)| raw)
    }

    /// Read access to a registered raw definition.
    pub fn get(&self, id: &str) -> Option<&RawMappingDefinition> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, raw)| raw)
    }

    /// Remove a registered definition, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<RawMappingDefinition> {
        let index = self.entries.iter().position(|(entry_id, _)| entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Registered definition ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and freeze every registered definition, in order.
    pub fn build(&self) -> Result<Vec<Arc<MappingDefinition>>> {
        let definitions = self
            .entries
            .iter()
            .map(|(id, raw)| MappingDefinition::from_raw(id.clone(), raw.clone()).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = definitions.len(), "mapping definitions frozen");
        Ok(definitions)
    }

    fn upsert(&mut self, id: String, raw: RawMappingDefinition) {
        if let Some(existing) = self.get_mut(&id) {
            warn!(id = %id, "mapping definition re-registered; replacing previous entry");
            *existing = raw;
        } else {
            self.entries.push((id, raw));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn named(name: &str) -> RawMappingDefinition {
        RawMappingDefinition {
            title: name.to_string(),
            names: vec![format!("system.{name}")],
            ..RawMappingDefinition::default()
        }
    }

    #[test]
    fn merge_order_static_then_contributed() {
        let mut discovery = MapperDiscovery::new();
        discovery.register_static("site", named("site"));
        discovery.register_static("maintenance", named("maintenance"));
        discovery.contribute("extra", named("extra"));

        let ids: Vec<_> = discovery.ids().collect();
        assert_eq!(ids, ["site", "maintenance", "extra"]);
    }

    #[test]
    fn re_registration_replaces_in_place() {
        let mut discovery = MapperDiscovery::new();
        discovery.register_static("site", named("site"));
        discovery.register_static("maintenance", named("maintenance"));
        discovery.contribute("site", named("site2"));

        let ids: Vec<_> = discovery.ids().collect();
        assert_eq!(ids, ["site", "maintenance"], "position kept");
        assert_eq!(discovery.get("site").unwrap().title, "site2");
    }

    #[test]
    fn alteration_can_mutate_and_delete() {
        let mut discovery = MapperDiscovery::new();
        discovery.register_static("site", named("site"));
        discovery.register_static("maintenance", named("maintenance"));

        discovery.alter(|info| {
            if let Some(site) = info.get_mut("site") {
                site.names.push("example.site.setting".to_string());
            }
            info.remove("maintenance");
        });

        assert_eq!(discovery.len(), 1);
        assert_eq!(
            discovery.get("site").unwrap().names,
            ["system.site".to_string(), "example.site.setting".to_string()]
        );
    }

    #[test]
    fn register_yaml_preserves_document_order() {
        let yaml = r#"
site_information:
  title: 'Site information'
  base_route_name: system.site_information_settings
  base_path: '/admin/config/system/site-information'
  names:
    - system.site
  weight: -20
account_settings:
  title: 'Account settings'
  base_route_name: user.account_settings
  base_path: '/admin/config/people/accounts'
  names:
    - user.settings
    - user.mail
"#;
        let mut discovery = MapperDiscovery::new();
        let count = discovery.register_yaml("system.mapping.yml", yaml).unwrap();

        assert_eq!(count, 2);
        let ids: Vec<_> = discovery.ids().collect();
        assert_eq!(ids, ["site_information", "account_settings"]);
        assert_eq!(
            discovery.get("account_settings").unwrap().names,
            ["user.settings".to_string(), "user.mail".to_string()]
        );
    }

    #[test]
    fn register_yaml_rejects_non_map_documents() {
        let mut discovery = MapperDiscovery::new();
        assert!(discovery.register_yaml("bad.yml", "- just\n- a\n- list\n").is_err());
        assert!(discovery.is_empty());
    }

    #[test]
    fn build_freezes_in_order() {
        let mut discovery = MapperDiscovery::new();
        discovery.register_static("site", named("site"));
        discovery.contribute("extra", named("extra"));

        let definitions = discovery.build().unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].id(), "site");
        assert_eq!(definitions[1].id(), "extra");
    }

    #[test]
    fn build_surfaces_validation_errors() {
        let mut discovery = MapperDiscovery::new();
        discovery.register_static("broken", RawMappingDefinition::default());
        assert!(discovery.build().is_err());
    }
}

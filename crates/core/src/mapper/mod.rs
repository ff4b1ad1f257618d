//! Mapping units: groups of configuration names translated together.
//!
//! A mapper is a short-lived, request-scoped instance built from an
//! immutable [`MappingDefinition`]. It answers the questions the access and
//! UI layers ask before offering translation: does every name have a
//! schema, is anything in those schemas translatable, what is the unit's
//! source language, and does a translation already exist.
//!
//! [`MappingDefinition`]: crate::definition::MappingDefinition

mod entity;
mod names;

pub use entity::ConfigEntityMapper;
pub use names::ConfigNamesMapper;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::entity::RequestContext;
use crate::error::MapperResult;
use crate::language::{Language, LanguageDirectory};
use crate::schema::SchemaRegistry;
use crate::store::ConfigStore;

/// Prefix of the derived route name for a unit's translation pages.
pub const TRANSLATION_ROUTE_PREFIX: &str = "translation.item.";

/// Collaborator handles injected into every mapper instance.
#[derive(Clone)]
pub struct MapperDeps {
    /// Stored configuration values and translation-overlay existence.
    pub store: Arc<dyn ConfigStore>,

    /// Schema trees for translatability walks.
    pub schemas: Arc<dyn SchemaRegistry>,

    /// Configured languages for source-language resolution.
    pub languages: Arc<dyn LanguageDirectory>,
}

/// A link operation exposed for a mapping unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Link title.
    pub title: String,

    /// Link target path.
    pub href: String,
}

/// A live mapping unit.
///
/// Implementations are constructed fresh per request by the registry and
/// discarded after use; nothing here is shared between requests.
pub trait ConfigMapper: Send + Sync {
    /// Id of the underlying mapping definition.
    fn id(&self) -> &str;

    /// Title of the translation page. Entity mappers substitute the bound
    /// entity's label into the definition's `!label` placeholder.
    fn title(&self) -> String;

    /// Name of the route the unit is attached to.
    fn base_route_name(&self) -> &str;

    /// Derived route name for the unit's translation pages.
    fn translation_route_name(&self) -> String {
        format!("{TRANSLATION_ROUTE_PREFIX}{}", self.base_route_name())
    }

    /// Route parameters identifying this unit on its base route. Empty for
    /// name mappers; `{entity type: entity id}` for bound entity mappers.
    fn route_parameters(&self) -> HashMap<String, String>;

    /// Path of the underlying edit page with `{param}` placeholders
    /// substituted from [`route_parameters`]. All required parameters must
    /// be populated before calling; unresolved placeholders are a caller
    /// error.
    ///
    /// [`route_parameters`]: ConfigMapper::route_parameters
    fn base_path(&self) -> String;

    /// Resolved configuration names: definition order, then appended order.
    fn config_names(&self) -> &[String];

    /// Append a configuration name. Appending a name that is already
    /// resolved is a silent no-op; existing entries never move.
    fn add_config_name(&mut self, name: &str);

    /// Sort weight among mapping units.
    fn weight(&self) -> i32;

    /// The source language code shared by every resolved name.
    ///
    /// Each name's stored language tag is read from the configuration
    /// store, defaulting to English when absent. All resolved names must
    /// agree; disagreement is a [`LanguageConsistency`] error.
    ///
    /// [`LanguageConsistency`]: crate::error::MapperError::LanguageConsistency
    fn langcode(&self) -> MapperResult<String>;

    /// The source language record, synthesizing the built-in English
    /// placeholder when the code is "en" but no English language is
    /// configured. `None` when a non-English code has no configured record.
    fn language_with_fallback(&self) -> MapperResult<Option<Language>>;

    /// Full stored values of every resolved name.
    fn config_data(&self) -> HashMap<String, JsonValue>;

    /// Whether every resolved name has a registered schema. A unit with no
    /// resolved names has nothing to translate and reports `false`.
    fn has_schema(&self) -> bool;

    /// Whether every resolved name's schema contains translatable leaves.
    /// Same zero-name rule as [`has_schema`].
    ///
    /// [`has_schema`]: ConfigMapper::has_schema
    fn has_translatable(&self) -> bool;

    /// Whether any resolved name already has a stored translation overlay
    /// for the given language. Partial overlays count.
    fn has_translation(&self, langcode: &str) -> bool;

    /// Noun for what this unit translates ("Settings", or the entity type
    /// label).
    fn type_name(&self) -> String;

    /// Label grouping this unit in translation overviews.
    fn type_label(&self) -> String;

    /// Link operations exposed for this unit.
    fn operations(&self) -> Vec<Operation>;

    /// Complete the mapper from request data.
    ///
    /// Name mappers are fully populated at construction time and report
    /// `true` unchanged. Entity mappers resolve their entity handle from
    /// the context and bind it, reporting whether binding succeeded.
    fn populate_from_request(&mut self, ctx: &RequestContext) -> bool;
}

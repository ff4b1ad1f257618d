//! Mapping definitions: the immutable description of one mapping unit.
//!
//! Definitions arrive in raw, mutable form (registered in code or parsed
//! from declarative YAML files), get altered during discovery, and are
//! frozen into [`MappingDefinition`] values before any mapper is built.
//! A frozen definition is never modified again; live mapper state (appended
//! names, rewritten titles) stays on the mapper instance.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Concrete mapper implementation selected by a definition.
///
/// A closed set: definitions choose a kind, and the registry dispatches
/// construction over it. New kinds are added here, not looked up by name at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapperKind {
    /// A plain list of configuration names translated together.
    Names,

    /// A mapping unit backed by a configuration entity type; the concrete
    /// configuration name is derived when an entity instance is bound.
    Entity,
}

/// Raw, mutable form of a mapping definition.
///
/// This is the shape declarative mapping files deserialize into and the
/// shape alteration passes mutate. [`MappingDefinition::from_raw`] validates
/// and freezes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMappingDefinition {
    /// Title of the translation page. May contain a `!label` placeholder
    /// that entity binding replaces with the entity's display label.
    #[serde(default)]
    pub title: String,

    /// Path of the underlying edit page. May contain `{param}` route
    /// placeholders resolved from the mapper's route parameters.
    #[serde(default)]
    pub base_path: String,

    /// Name of the route the mapping unit is attached to.
    #[serde(default)]
    pub base_route_name: String,

    /// Configuration names translated together as this unit.
    #[serde(default)]
    pub names: Vec<String>,

    /// Sort weight among mapping units.
    #[serde(default)]
    pub weight: i32,

    /// Entity type backing this unit, for entity mappers.
    #[serde(default)]
    pub entity_type: Option<String>,

    /// For grouped sub-mappings (e.g. per-type field collections): the
    /// entity type the group belongs to, used to compose the type label.
    #[serde(default)]
    pub base_entity_type: Option<String>,

    /// Explicit mapper kind; inferred from `entity_type` when absent.
    #[serde(default)]
    pub kind: Option<MapperKind>,
}

/// Immutable mapping definition, validated and frozen after discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDefinition {
    id: String,
    title: String,
    base_path: String,
    base_route_name: String,
    names: Vec<String>,
    weight: i32,
    entity_type: Option<String>,
    base_entity_type: Option<String>,
    kind: MapperKind,
}

impl MappingDefinition {
    /// Validate and freeze a raw definition.
    ///
    /// Name mappers must declare at least one configuration name; entity
    /// mappers must declare an entity type and may start with none (their
    /// name is derived at entity-bind time). Every declared name must be a
    /// dot-delimited identifier.
    pub fn from_raw(id: impl Into<String>, raw: RawMappingDefinition) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            anyhow::bail!("mapping definition id must not be empty");
        }

        for name in &raw.names {
            validate_config_name(name).with_context(|| format!("mapping definition '{id}'"))?;
        }

        let kind = raw.kind.unwrap_or(if raw.entity_type.is_some() {
            MapperKind::Entity
        } else {
            MapperKind::Names
        });

        match kind {
            MapperKind::Names if raw.names.is_empty() => {
                anyhow::bail!("mapping definition '{id}' declares no configuration names");
            }
            MapperKind::Entity if raw.entity_type.is_none() => {
                anyhow::bail!(
                    "mapping definition '{id}' selects the entity mapper but declares no entity type"
                );
            }
            _ => {}
        }

        Ok(Self {
            id,
            title: raw.title,
            base_path: raw.base_path,
            base_route_name: raw.base_route_name,
            names: raw.names,
            weight: raw.weight,
            entity_type: raw.entity_type,
            base_entity_type: raw.base_entity_type,
            kind,
        })
    }

    /// Unique id of the mapping unit.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title template of the translation page.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Path of the underlying edit page, placeholders unresolved.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Name of the route the mapping unit is attached to.
    pub fn base_route_name(&self) -> &str {
        &self.base_route_name
    }

    /// Statically declared configuration names, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Sort weight among mapping units.
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Entity type backing this unit, for entity mappers.
    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    /// Entity type a grouped sub-mapping belongs to.
    pub fn base_entity_type(&self) -> Option<&str> {
        self.base_entity_type.as_deref()
    }

    /// Concrete mapper implementation to construct.
    pub fn kind(&self) -> MapperKind {
        self.kind
    }
}

/// Validate that a configuration name is a dot-delimited identifier.
///
/// At least two non-empty segments of ASCII alphanumerics, underscores, or
/// dashes (e.g. "system.site", "field.instance.node.article.body").
pub fn validate_config_name(name: &str) -> Result<()> {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() < 2 {
        anyhow::bail!("configuration name '{name}' must contain at least two dot-delimited segments");
    }
    for segment in segments {
        if segment.is_empty() {
            anyhow::bail!("configuration name '{name}' contains an empty segment");
        }
        if let Some(c) = segment
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '-')
        {
            anyhow::bail!("configuration name '{name}' contains invalid character '{c}'");
        }
    }
    Ok(())
}

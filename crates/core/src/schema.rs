//! Configuration schema trees and the translatability walk.
//!
//! A schema tree mirrors the shape of a stored configuration object and
//! carries per-element metadata. The only metadata this engine inspects is
//! the `translatable` flag on leaves: a subtree is worth offering for
//! translation iff at least one of its leaves is flagged.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Property key marking a leaf as holding human-readable, translatable text.
pub const TRANSLATABLE_KEY: &str = "translatable";

/// A node in a configuration schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "snake_case")]
pub enum SchemaNode {
    /// A scalar schema element with its metadata properties.
    Leaf {
        #[serde(default)]
        properties: serde_json::Map<String, JsonValue>,
    },

    /// A mapping or sequence of nested schema elements, in declaration order.
    Container {
        #[serde(default)]
        children: Vec<SchemaNode>,
    },
}

impl SchemaNode {
    /// Create a leaf with the given metadata properties.
    pub fn leaf(properties: serde_json::Map<String, JsonValue>) -> Self {
        Self::Leaf { properties }
    }

    /// Create a leaf explicitly flagged as translatable.
    pub fn translatable_leaf() -> Self {
        let mut properties = serde_json::Map::new();
        properties.insert(TRANSLATABLE_KEY.to_string(), JsonValue::Bool(true));
        Self::Leaf { properties }
    }

    /// Create a leaf with no metadata at all.
    pub fn plain_leaf() -> Self {
        Self::Leaf {
            properties: serde_json::Map::new(),
        }
    }

    /// Create a container over the given children.
    pub fn container(children: Vec<SchemaNode>) -> Self {
        Self::Container { children }
    }

    /// Whether any leaf of this subtree is flagged as translatable.
    ///
    /// A leaf is translatable iff its `translatable` property is boolean
    /// `true`; an absent or malformed property counts as not translatable.
    /// Containers are checked in child order and short-circuit on the first
    /// translatable descendant. An empty container is not translatable.
    pub fn is_translatable(&self) -> bool {
        match self {
            Self::Leaf { properties } => {
                matches!(properties.get(TRANSLATABLE_KEY), Some(JsonValue::Bool(true)))
            }
            Self::Container { children } => children.iter().any(SchemaNode::is_translatable),
        }
    }
}

/// Source of schema trees for stored configuration objects.
///
/// The engine never constructs schema trees itself; the consuming
/// application registers them (typically parsed from declarative schema
/// files). Callers must gate walks on [`SchemaRegistry::has_schema`] —
/// walking a name without a registered schema is never attempted.
pub trait SchemaRegistry: Send + Sync {
    /// The schema tree registered for a configuration name, if any.
    fn schema(&self, name: &str) -> Option<SchemaNode>;

    /// Whether a schema is registered for a configuration name.
    fn has_schema(&self, name: &str) -> bool {
        self.schema(name).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn leaf_with(key: &str, value: JsonValue) -> SchemaNode {
        let mut properties = serde_json::Map::new();
        properties.insert(key.to_string(), value);
        SchemaNode::leaf(properties)
    }

    #[test]
    fn plain_leaf_is_not_translatable() {
        assert!(!SchemaNode::plain_leaf().is_translatable());
    }

    #[test]
    fn unrelated_properties_are_not_translatable() {
        assert!(!leaf_with("label", JsonValue::from("Name")).is_translatable());
    }

    #[test]
    fn explicit_false_is_not_translatable() {
        assert!(!leaf_with(TRANSLATABLE_KEY, JsonValue::Bool(false)).is_translatable());
    }

    #[test]
    fn explicit_true_is_translatable() {
        assert!(SchemaNode::translatable_leaf().is_translatable());
    }

    #[test]
    fn malformed_flag_fails_closed() {
        assert!(!leaf_with(TRANSLATABLE_KEY, JsonValue::from("yes")).is_translatable());
        assert!(!leaf_with(TRANSLATABLE_KEY, JsonValue::from(1)).is_translatable());
        assert!(!leaf_with(TRANSLATABLE_KEY, JsonValue::Null).is_translatable());
    }

    #[test]
    fn empty_container_is_not_translatable() {
        assert!(!SchemaNode::container(vec![]).is_translatable());
    }

    #[test]
    fn container_with_only_plain_leaves_is_not_translatable() {
        let node = SchemaNode::container(vec![
            leaf_with("aaa", JsonValue::from("bbb")),
            leaf_with("ccc", JsonValue::from("ddd")),
            SchemaNode::plain_leaf(),
        ]);
        assert!(!node.is_translatable());
    }

    #[test]
    fn container_with_one_translatable_leaf_is_translatable() {
        let node = SchemaNode::container(vec![
            SchemaNode::plain_leaf(),
            SchemaNode::translatable_leaf(),
            SchemaNode::plain_leaf(),
        ]);
        assert!(node.is_translatable());
    }

    #[test]
    fn nested_containers_walk_to_the_leaves() {
        let node = SchemaNode::container(vec![
            SchemaNode::container(vec![SchemaNode::plain_leaf()]),
            SchemaNode::container(vec![SchemaNode::container(vec![
                SchemaNode::translatable_leaf(),
            ])]),
        ]);
        assert!(node.is_translatable());
    }

    #[test]
    fn schema_node_serialization_round_trip() {
        let node = SchemaNode::container(vec![
            SchemaNode::translatable_leaf(),
            SchemaNode::plain_leaf(),
        ]);

        let json = serde_json::to_string(&node).unwrap();
        let parsed: SchemaNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, node);
        assert!(parsed.is_translatable());
    }
}

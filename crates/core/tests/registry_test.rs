//! Integration tests for the mapper registry.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use serde_json::json;

use tradotto_core::definition::{MappingDefinition, RawMappingDefinition};
use tradotto_core::entity::{EntityTypeInfo, RequestContext};
use tradotto_core::error::MapperError;
use tradotto_core::mapper::ConfigMapper;
use tradotto_test_utils::{
    MemoryConfigStore, MemoryEntityTypes, MemorySchemaRegistry, TestEntity, TestEnv,
};

fn site_info_definition() -> Arc<MappingDefinition> {
    let raw = RawMappingDefinition {
        title: "Site information".to_string(),
        base_path: "/admin/config/system/site-information".to_string(),
        base_route_name: "system.site_information_settings".to_string(),
        names: vec!["system.site".to_string()],
        ..RawMappingDefinition::default()
    };
    Arc::new(MappingDefinition::from_raw("site_info", raw).unwrap())
}

fn weighted_definition(id: &str, weight: i32) -> Arc<MappingDefinition> {
    let raw = RawMappingDefinition {
        title: id.to_string(),
        names: vec![format!("system.{id}")],
        weight,
        ..RawMappingDefinition::default()
    };
    Arc::new(MappingDefinition::from_raw(id, raw).unwrap())
}

/// The full gate sequence the access layer runs for one mapping unit.
#[test]
fn site_information_end_to_end() {
    let env = TestEnv::new()
        .with_store(
            MemoryConfigStore::new()
                .with_config("system.site", json!({"langcode": "en", "name": "My Site"})),
        )
        .with_schemas(MemorySchemaRegistry::new().with_translatable_schema("system.site"));
    let registry = env.registry(vec![site_info_definition()]);

    let mapper = registry.create_mapper("site_info").unwrap();
    assert!(mapper.has_schema());
    assert!(mapper.has_translatable());
    assert_eq!(mapper.langcode().unwrap(), "en");
    assert_eq!(mapper.title(), "Site information");
}

#[test]
fn create_mapper_unknown_id_fails() {
    let env = TestEnv::new();
    let registry = env.registry(vec![site_info_definition()]);

    let err = registry
        .create_mapper("missing")
        .map(|_| ())
        .unwrap_err();
    match err {
        MapperError::UnknownMapper(id) => assert_eq!(id, "missing"),
        other => panic!("expected UnknownMapper, got {other:?}"),
    }
}

#[test]
fn mappers_constructs_fresh_unbound_instances() {
    let env = TestEnv::new();
    let registry = env.registry(vec![
        site_info_definition(),
        weighted_definition("maintenance", 10),
    ]);

    let mappers = registry.mappers();
    assert_eq!(mappers.len(), 2);
    assert!(mappers.contains_key("site_info"));
    assert!(mappers.contains_key("maintenance"));

    // Each query constructs new instances; mutating one does not leak.
    let mut first = registry.create_mapper("site_info").unwrap();
    first.add_config_name("system.extra");
    let second = registry.create_mapper("site_info").unwrap();
    assert_eq!(second.config_names(), ["system.site".to_string()]);
}

#[test]
fn kind_dispatch_builds_entity_mappers() {
    let raw = RawMappingDefinition {
        title: "!label menu".to_string(),
        base_path: "/admin/structure/menu/manage/{menu}".to_string(),
        base_route_name: "menu.edit".to_string(),
        entity_type: Some("menu".to_string()),
        ..RawMappingDefinition::default()
    };
    let definition = Arc::new(MappingDefinition::from_raw("menu", raw).unwrap());

    let env = TestEnv::new().with_entity_types(
        MemoryEntityTypes::new().with_type(EntityTypeInfo::new("menu", "Menu", "system.menu")),
    );
    let registry = env.registry(vec![definition]);

    let mut mapper = registry.create_mapper("menu").unwrap();
    assert!(mapper.config_names().is_empty(), "unbound until populated");

    let ctx = RequestContext::new().with_entity("menu", TestEntity::new("main", "Main navigation"));
    assert!(mapper.populate_from_request(&ctx));
    assert_eq!(mapper.config_names(), ["system.menu.main".to_string()]);
    assert_eq!(mapper.title(), "Main navigation menu");
}

#[test]
fn has_translatable_fails_fast_without_schema() {
    let env = TestEnv::new()
        .with_schemas(MemorySchemaRegistry::new().with_translatable_schema("system.site"));
    let registry = env.registry(vec![]);

    assert!(registry.has_translatable("system.site"));
    assert!(!registry.has_translatable("system.unknown"));
    assert!(registry.has_schema("system.site"));
    assert!(!registry.has_schema("system.unknown"));
}

#[test]
fn rebuild_replaces_definitions_wholesale() {
    let env = TestEnv::new();
    let registry = env.registry(vec![site_info_definition()]);
    assert_eq!(registry.len(), 1);

    registry.rebuild(vec![
        weighted_definition("aaa", 5),
        weighted_definition("bbb", -5),
    ]);

    assert_eq!(registry.len(), 2);
    assert!(registry.definition("site_info").is_none(), "old set gone");
    assert!(registry.create_mapper("site_info").is_err());
    assert!(registry.create_mapper("aaa").is_ok());
}

#[test]
fn ids_ordered_by_weight_then_id() {
    let env = TestEnv::new();
    let registry = env.registry(vec![
        weighted_definition("zzz", -10),
        weighted_definition("bbb", 0),
        weighted_definition("aaa", 0),
    ]);

    assert_eq!(registry.ids(), ["zzz", "aaa", "bbb"]);
}

#[test]
fn create_mapper_from_accepts_unregistered_definitions() {
    let env = TestEnv::new();
    let registry = env.registry(vec![]);

    let mapper = registry.create_mapper_from(site_info_definition());
    assert_eq!(mapper.id(), "site_info");
    assert_eq!(mapper.config_names(), ["system.site".to_string()]);
}

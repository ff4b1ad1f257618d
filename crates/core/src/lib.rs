//! Translatable configuration mapping engine.
//!
//! Groups configuration objects into mapping units translated together,
//! resolves each unit's source language, and walks configuration schema
//! trees to decide translatability. The engine is a synchronous in-process
//! library: routing, access control, forms, and translation-overlay writes
//! belong to the consuming application, which injects its configuration
//! store, schema registry, language directory, and entity-type directory
//! as trait objects.

pub mod definition;
pub mod discovery;
pub mod entity;
pub mod error;
pub mod language;
pub mod mapper;
pub mod registry;
pub mod schema;
pub mod store;

pub use definition::{MapperKind, MappingDefinition, RawMappingDefinition};
pub use discovery::MapperDiscovery;
pub use entity::{ConfigEntity, EntityTypeDirectory, EntityTypeInfo, RequestContext};
pub use error::{MapperError, MapperResult};
pub use language::{Language, LanguageDirectory};
pub use mapper::{ConfigEntityMapper, ConfigMapper, ConfigNamesMapper, MapperDeps, Operation};
pub use registry::MapperRegistry;
pub use schema::{SchemaNode, SchemaRegistry};
pub use store::ConfigStore;

//! Questionnaire catalogs.
//!
//! Catalogs are YAML-defined item trees, validated once at load time and
//! shared read-only by every questionnaire built on them.

pub mod loader;
pub mod model;
pub mod schema;

pub use loader::{
    load_catalog, load_catalog_from_file, load_catalog_from_str, CatalogError, CatalogSource,
    LoadedCatalog,
};
pub use model::{
    Answer, Branch, Catalog, Chain, ChainCondition, Condition, Example, Item, Layer, SubQuestion,
};
pub use schema::{CatalogDefinition, DefinitionError, LayerPath};

/// Built-in catalogs embedded at compile time.
///
/// Format: (catalog_name, catalog_yaml_content)
pub static BUILTIN_CATALOGS: &[(&str, &str)] = &[(
    "home-safety",
    include_str!("../../catalogs/home-safety.yaml"),
)];

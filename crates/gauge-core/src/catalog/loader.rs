//! Catalog loader with YAML parsing, validation, and digest computation.
//!
//! - Rejects unknown fields (via serde deny_unknown_fields)
//! - Validates and compiles the item tree before returning
//! - Computes a deterministic digest: sha256(JSON(definition))

use super::model::Catalog;
use super::schema::{CatalogDefinition, DefinitionError};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Prefix that forces built-in lookup, e.g. `builtin:home-safety`.
pub const BUILTIN_PREFIX: &str = "builtin:";

/// Source of a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Built-in catalog (embedded at compile time).
    BuiltIn(&'static str),
    /// Catalog loaded from file.
    File(PathBuf),
    /// Catalog parsed from an in-memory string.
    Inline,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::BuiltIn(name) => write!(f, "builtin:{}", name),
            CatalogSource::File(path) => write!(f, "file:{}", path.display()),
            CatalogSource::Inline => write!(f, "inline"),
        }
    }
}

/// A loaded and validated catalog.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// Compiled catalog, shareable across questionnaires.
    pub catalog: Arc<Catalog>,
    /// Catalog digest (sha256 of the canonical JSON definition).
    pub digest: String,
    pub source: CatalogSource,
}

/// Catalog loading error.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog '{reference}' not found. {suggestion}")]
    NotFound {
        reference: String,
        suggestion: String,
    },

    #[error("Failed to read catalog file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog YAML: {message}")]
    YamlParseError { message: String },

    #[error("Catalog definition error: {0}")]
    Definition(#[from] DefinitionError),
}

/// Load a catalog from a reference (file path or built-in name).
pub fn load_catalog(reference: &str) -> Result<LoadedCatalog, CatalogError> {
    if let Some(name) = reference.strip_prefix(BUILTIN_PREFIX) {
        return load_builtin(name);
    }

    let path = Path::new(reference);
    if path.exists() {
        return load_catalog_from_file(path);
    }

    load_builtin(reference)
}

fn load_builtin(name: &str) -> Result<LoadedCatalog, CatalogError> {
    match super::BUILTIN_CATALOGS.iter().find(|(n, _)| *n == name) {
        Some((builtin_name, content)) => {
            load_catalog_from_str(content, CatalogSource::BuiltIn(builtin_name))
        }
        None => Err(CatalogError::NotFound {
            reference: name.to_string(),
            suggestion: suggest_similar_catalog(name),
        }),
    }
}

/// Load a catalog from a file path.
pub fn load_catalog_from_file(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_catalog_from_str(&content, CatalogSource::File(path.to_path_buf()))
}

/// Load a catalog from YAML string content.
pub fn load_catalog_from_str(
    content: &str,
    source: CatalogSource,
) -> Result<LoadedCatalog, CatalogError> {
    let definition: CatalogDefinition =
        serde_yaml::from_str(content).map_err(|e| CatalogError::YamlParseError {
            message: format_yaml_error(e),
        })?;

    let catalog = definition.compile()?;
    let digest = compute_catalog_digest(&definition)?;

    debug!(
        catalog = %catalog.name,
        items = catalog.len(),
        %source,
        %digest,
        "catalog loaded"
    );

    Ok(LoadedCatalog {
        catalog: Arc::new(catalog),
        digest,
        source,
    })
}

/// Compute catalog digest: sha256(JSON(definition))
fn compute_catalog_digest(definition: &CatalogDefinition) -> Result<String, CatalogError> {
    // Round-trip through Value so object keys come out sorted.
    let json = serde_json::to_value(definition).map_err(|e| CatalogError::YamlParseError {
        message: format!("Failed to serialize catalog to JSON: {}", e),
    })?;
    let canonical = serde_json::to_string(&json).map_err(|e| CatalogError::YamlParseError {
        message: format!("Failed to canonicalize JSON: {}", e),
    })?;

    let hash = Sha256::digest(canonical.as_bytes());
    Ok(format!("sha256:{}", hex::encode(hash)))
}

fn format_yaml_error(e: serde_yaml::Error) -> String {
    match e.location() {
        Some(loc) => format!("line {}, column {}: {}", loc.line(), loc.column(), e),
        None => e.to_string(),
    }
}

fn suggest_similar_catalog(name: &str) -> String {
    let names: Vec<&str> = super::BUILTIN_CATALOGS.iter().map(|(n, _)| *n).collect();

    let closest = names
        .iter()
        .map(|n| (*n, strsim::normalized_levenshtein(name, n)))
        .filter(|(_, sim)| *sim >= 0.5)
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match closest {
        Some((n, _)) => format!("Did you mean '{}'?", n),
        None => format!("Available built-in catalogs: {}", names.join(", ")),
    }
}

//! Catalog definition types as loaded from YAML.
//!
//! Condition tags stay plain strings at this level so that an unknown tag is
//! reported as a [`DefinitionError`] naming the item and layer, instead of a
//! bare YAML parse failure. [`CatalogDefinition::compile`] validates the whole
//! tree and produces the typed [`Catalog`].

use super::model::{
    Answer, Catalog, Chain, ChainCondition, Condition, Example, Item, Layer, SubQuestion,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Catalog definition as loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDefinition {
    /// Catalog identifier (lowercase alphanumeric + hyphens).
    pub name: String,

    /// Free-form version string.
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Items in presentation order.
    pub items: Vec<ItemDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDefinition {
    /// Stable identity, unique within the catalog.
    pub id: String,

    /// The main yes/no question.
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Shown next to the "yes" option.
    #[serde(default)]
    pub yes_hint: Option<String>,

    /// Shown next to the "no" option.
    #[serde(default)]
    pub no_hint: Option<String>,

    pub on_yes: LayerDefinition,

    pub on_no: LayerDefinition,
}

/// A branch or a chained layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerDefinition {
    #[serde(default)]
    pub questions: Vec<SubQuestionDefinition>,

    pub pass_condition: String,

    #[serde(default)]
    pub next_layer_condition: Option<String>,

    #[serde(default)]
    pub next_layer: Option<Box<LayerDefinition>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubQuestionDefinition {
    pub title: String,
    pub example: Example,
}

/// Where in the catalog a definition problem sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPath {
    pub item: String,
    pub branch: Answer,
    pub depth: usize,
}

impl std::fmt::Display for LayerPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item '{}' on_{} layer {}", self.item, self.branch, self.depth)
    }
}

/// Load-time catalog definition error. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("Invalid catalog name '{name}': must be lowercase alphanumeric with hyphens")]
    InvalidCatalogName { name: String },

    #[error("Catalog '{catalog}' has no items")]
    EmptyCatalog { catalog: String },

    #[error("Catalog '{catalog}' has an item with an empty id")]
    EmptyItemId { catalog: String },

    #[error("Catalog '{catalog}' has duplicate item id '{id}'")]
    DuplicateItemId { catalog: String, id: String },

    #[error("Item '{id}' has an empty title")]
    EmptyTitle { id: String },

    #[error("{at}: question {index} has an empty title")]
    EmptyQuestionTitle { at: LayerPath, index: usize },

    #[error("{at}: {reason}")]
    UnknownCondition { at: LayerPath, reason: String },

    #[error("{at}: unsupported next_layer_condition {reason}")]
    UnknownChainCondition { at: LayerPath, reason: String },

    #[error("{at}: '{condition}' is only valid as a next_layer_condition")]
    ChainOnlyCondition { at: LayerPath, condition: String },

    #[error("{at}: layer has no questions, so pass_condition must be pass-direct or fail-direct (got '{condition}')")]
    TerminalNotDirect { at: LayerPath, condition: Condition },

    #[error("{at}: next_layer_condition '{condition}' has no next_layer")]
    ChainWithoutLayer { at: LayerPath, condition: ChainCondition },

    #[error("{at}: next_layer is set without a next_layer_condition")]
    LayerWithoutChain { at: LayerPath },
}

impl CatalogDefinition {
    /// Validate the definition and compile it into a typed catalog.
    pub fn compile(&self) -> Result<Catalog, DefinitionError> {
        if !is_valid_catalog_name(&self.name) {
            return Err(DefinitionError::InvalidCatalogName {
                name: self.name.clone(),
            });
        }
        if self.items.is_empty() {
            return Err(DefinitionError::EmptyCatalog {
                catalog: self.name.clone(),
            });
        }

        let mut seen_ids = HashSet::new();
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(DefinitionError::EmptyItemId {
                    catalog: self.name.clone(),
                });
            }
            if !seen_ids.insert(item.id.as_str()) {
                return Err(DefinitionError::DuplicateItemId {
                    catalog: self.name.clone(),
                    id: item.id.clone(),
                });
            }
            items.push(item.compile()?);
        }

        Ok(Catalog {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            items,
        })
    }
}

impl ItemDefinition {
    fn compile(&self) -> Result<Item, DefinitionError> {
        if self.title.trim().is_empty() {
            return Err(DefinitionError::EmptyTitle {
                id: self.id.clone(),
            });
        }
        let path = |branch| LayerPath {
            item: self.id.clone(),
            branch,
            depth: 0,
        };
        Ok(Item {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            yes_hint: self.yes_hint.clone(),
            no_hint: self.no_hint.clone(),
            on_yes: self.on_yes.compile(path(Answer::Yes))?,
            on_no: self.on_no.compile(path(Answer::No))?,
        })
    }
}

impl LayerDefinition {
    fn compile(&self, at: LayerPath) -> Result<Layer, DefinitionError> {
        for (index, q) in self.questions.iter().enumerate() {
            if q.title.trim().is_empty() {
                return Err(DefinitionError::EmptyQuestionTitle { at, index });
            }
        }

        let pass_condition = match self.pass_condition.parse::<Condition>() {
            Ok(c) => c,
            Err(_) if self.pass_condition == ChainCondition::NextLayer.as_str() => {
                return Err(DefinitionError::ChainOnlyCondition {
                    at,
                    condition: self.pass_condition.clone(),
                });
            }
            Err(e) => {
                return Err(DefinitionError::UnknownCondition {
                    at,
                    reason: e.to_string(),
                });
            }
        };

        if self.questions.is_empty() && !pass_condition.is_direct() {
            return Err(DefinitionError::TerminalNotDirect {
                at,
                condition: pass_condition,
            });
        }

        let chain = match (&self.next_layer_condition, &self.next_layer) {
            (None, None) => None,
            (None, Some(_)) => return Err(DefinitionError::LayerWithoutChain { at }),
            (Some(tag), next) => {
                let condition = tag.parse::<ChainCondition>().map_err(|e| {
                    DefinitionError::UnknownChainCondition {
                        at: at.clone(),
                        reason: format!("'{}': {}", tag, e),
                    }
                })?;
                let Some(next) = next else {
                    return Err(DefinitionError::ChainWithoutLayer { at, condition });
                };
                let next_at = LayerPath {
                    depth: at.depth + 1,
                    ..at
                };
                Some(Chain {
                    condition,
                    next: Box::new(next.compile(next_at)?),
                })
            }
        };

        Ok(Layer {
            questions: self
                .questions
                .iter()
                .map(|q| SubQuestion {
                    title: q.title.clone(),
                    example: q.example,
                })
                .collect(),
            pass_condition,
            chain,
        })
    }
}

/// Check if a catalog name is valid (lowercase alphanumeric + hyphens).
pub(crate) fn is_valid_catalog_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
}

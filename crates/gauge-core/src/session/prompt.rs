use crate::catalog::Example;
use crate::engine::{FinalVerdict, Verdict};
use serde::Serialize;

/// What the collaborator should render next for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    MainQuestion {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        yes_hint: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        no_hint: Option<String>,
    },
    SubQuestion {
        /// Layer depth within the chosen branch, 0 for the branch itself.
        depth: usize,
        sub_index: usize,
        /// Number of questions in this layer.
        of: usize,
        title: String,
    },
    Disambiguation {
        choices: Vec<Choice>,
        /// Verdict of the current selection.
        running: Verdict,
    },
    Done {
        verdict: FinalVerdict,
    },
}

/// One selectable sub-question in the disambiguation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub sub_index: usize,
    pub title: String,
    pub example: Example,
    pub selected: bool,
}

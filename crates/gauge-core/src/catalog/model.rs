//! Compiled catalog model.
//!
//! These are the load-time constants the engine works against. They are
//! produced from a [`CatalogDefinition`](super::schema::CatalogDefinition) by
//! [`compile`](super::schema::CatalogDefinition::compile) and never mutated
//! afterwards; sessions refer into them by index, never by live reference.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A yes/no answer, for the main question or a sub-question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Example tag of a sub-question, read only by `yes-to-only-pass-fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Example {
    Pass,
    Fail,
}

impl std::fmt::Display for Example {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Example::Pass => write!(f, "pass"),
            Example::Fail => write!(f, "fail"),
        }
    }
}

/// Pass condition of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    PassDirect,
    FailDirect,
    AllYes,
    AllNo,
    AnyYes,
    AnyNo,
    MaxYes,
    MaxNo,
    YesToOneOrLess,
    YesToTwoOrMore,
    YesToOnlyPassFail,
}

impl Condition {
    pub const ALL: [Condition; 11] = [
        Condition::PassDirect,
        Condition::FailDirect,
        Condition::AllYes,
        Condition::AllNo,
        Condition::AnyYes,
        Condition::AnyNo,
        Condition::MaxYes,
        Condition::MaxNo,
        Condition::YesToOneOrLess,
        Condition::YesToTwoOrMore,
        Condition::YesToOnlyPassFail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::PassDirect => "pass-direct",
            Condition::FailDirect => "fail-direct",
            Condition::AllYes => "all-yes",
            Condition::AllNo => "all-no",
            Condition::AnyYes => "any-yes",
            Condition::AnyNo => "any-no",
            Condition::MaxYes => "max-yes",
            Condition::MaxNo => "max-no",
            Condition::YesToOneOrLess => "yes-to-one-or-less",
            Condition::YesToTwoOrMore => "yes-to-two-or-more",
            Condition::YesToOnlyPassFail => "yes-to-only-pass-fail",
        }
    }

    /// Direct conditions ignore answers and are the only ones legal on an
    /// empty layer.
    pub fn is_direct(&self) -> bool {
        matches!(self, Condition::PassDirect | Condition::FailDirect)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownTag::new(s, Condition::ALL.iter().map(|c| c.as_str())))
    }
}

/// Condition re-tested when a layer's primary test fails.
///
/// Only count-based tests and `next-layer` can chain; the direct conditions
/// and the example disambiguation have no boolean form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainCondition {
    NextLayer,
    AllYes,
    AllNo,
    AnyYes,
    AnyNo,
    MaxYes,
    MaxNo,
    YesToOneOrLess,
    YesToTwoOrMore,
}

impl ChainCondition {
    pub const ALL: [ChainCondition; 9] = [
        ChainCondition::NextLayer,
        ChainCondition::AllYes,
        ChainCondition::AllNo,
        ChainCondition::AnyYes,
        ChainCondition::AnyNo,
        ChainCondition::MaxYes,
        ChainCondition::MaxNo,
        ChainCondition::YesToOneOrLess,
        ChainCondition::YesToTwoOrMore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainCondition::NextLayer => "next-layer",
            ChainCondition::AllYes => "all-yes",
            ChainCondition::AllNo => "all-no",
            ChainCondition::AnyYes => "any-yes",
            ChainCondition::AnyNo => "any-no",
            ChainCondition::MaxYes => "max-yes",
            ChainCondition::MaxNo => "max-no",
            ChainCondition::YesToOneOrLess => "yes-to-one-or-less",
            ChainCondition::YesToTwoOrMore => "yes-to-two-or-more",
        }
    }
}

impl std::fmt::Display for ChainCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainCondition {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainCondition::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownTag::new(s, ChainCondition::ALL.iter().map(|c| c.as_str())))
    }
}

/// A condition tag that is not part of the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    pub tag: String,
    pub suggestion: Option<&'static str>,
}

impl UnknownTag {
    fn new(tag: &str, known: impl Iterator<Item = &'static str>) -> Self {
        const THRESHOLD: f64 = 0.7;

        let mut best: Option<(&'static str, f64)> = None;
        for candidate in known {
            let sim = strsim::normalized_levenshtein(tag, candidate);
            if sim >= THRESHOLD && best.map_or(true, |(_, b)| sim > b) {
                best = Some((candidate, sim));
            }
        }
        Self {
            tag: tag.to_string(),
            suggestion: best.map(|(c, _)| c),
        }
    }
}

impl std::fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown condition '{}'", self.tag)?;
        if let Some(s) = self.suggestion {
            write!(f, ". Did you mean '{}'?", s)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubQuestion {
    pub title: String,
    pub example: Example,
}

/// A node in a layer chain. A branch is the root layer of its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub questions: Vec<SubQuestion>,
    pub pass_condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Chain>,
}

impl Layer {
    pub fn is_terminal(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn next_layer_condition(&self) -> Option<ChainCondition> {
        self.chain.as_ref().map(|c| c.condition)
    }

    pub fn next_layer(&self) -> Option<&Layer> {
        self.chain.as_ref().map(|c| c.next.as_ref())
    }

    /// Layer `depth` steps down the chain, `0` being this layer.
    pub fn descend(&self, depth: usize) -> Option<&Layer> {
        let mut layer = self;
        for _ in 0..depth {
            layer = layer.next_layer()?;
        }
        Some(layer)
    }

    /// Number of layers in the chain rooted here.
    pub fn chain_len(&self) -> usize {
        let mut n = 1;
        let mut layer = self;
        while let Some(next) = layer.next_layer() {
            n += 1;
            layer = next;
        }
        n
    }
}

/// Chain to the next layer: the condition re-tested on primary failure and
/// the layer it leads to. Each layer owns its successor exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub condition: ChainCondition,
    pub next: Box<Layer>,
}

pub type Branch = Layer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yes_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_hint: Option<String>,
    pub on_yes: Branch,
    pub on_no: Branch,
}

impl Item {
    pub fn branch(&self, answer: Answer) -> &Branch {
        match answer {
            Answer::Yes => &self.on_yes,
            Answer::No => &self.on_no,
        }
    }

    pub fn hint(&self, answer: Answer) -> Option<&str> {
        match answer {
            Answer::Yes => self.yes_hint.as_deref(),
            Answer::No => self.no_hint.as_deref(),
        }
    }
}

/// Validated, immutable catalog. Item order is presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<Item>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }
}

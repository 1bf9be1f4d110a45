//! Aggregation of per-item results.

use crate::catalog::Answer;
use crate::engine::{FinalVerdict, Verdict};
use serde::Serialize;
use std::collections::BTreeMap;

/// A stored verdict with the answers that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResult {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub verdict: FinalVerdict,
    pub main_answer: Answer,
    /// Sub-answers per visited layer.
    pub trail: Vec<Vec<Answer>>,
}

/// One verdict per item index. Recording an index that already has an entry
/// replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    entries: BTreeMap<usize, ItemResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result, returning the entry it replaced.
    pub fn record(&mut self, result: ItemResult) -> Option<ItemResult> {
        self.entries.insert(result.index, result)
    }

    pub fn retract(&mut self, index: usize) -> Option<ItemResult> {
        self.entries.remove(&index)
    }

    pub fn get(&self, index: usize) -> Option<&ItemResult> {
        self.entries.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Results in item order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemResult> {
        self.entries.values()
    }
}

/// One line of the verdict stream. Items without a stored verdict report
/// `pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub verdict: Verdict,
    pub main_answer: Option<Answer>,
    pub trail: Vec<Vec<Answer>>,
}

impl From<&ItemResult> for ResultRow {
    fn from(r: &ItemResult) -> Self {
        Self {
            index: r.index,
            id: r.id.clone(),
            title: r.title.clone(),
            verdict: r.verdict.into(),
            main_answer: Some(r.main_answer),
            trail: r.trail.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
}

impl Summary {
    pub fn of(rows: &[ResultRow]) -> Self {
        rows.iter().fold(
            Summary {
                total: rows.len(),
                ..Summary::default()
            },
            |mut s, r| {
                match r.verdict {
                    Verdict::Pass => s.passed += 1,
                    Verdict::Fail => s.failed += 1,
                    Verdict::Pending | Verdict::Ambiguous => s.pending += 1,
                }
                s
            },
        )
    }

    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}

/// Emitted once every item has a stored verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub results: Vec<ResultRow>,
    pub summary: Summary,
}

//! Selection mode for ambiguous `yes-to-only-pass-fail` outcomes.
//!
//! The user is shown the yes-answered sub-questions, each labelled with its
//! example tag, and picks the ones that really apply. Every toggle recomputes
//! the verdict over the current selection only:
//!
//! | selection             | verdict   |
//! |-----------------------|-----------|
//! | empty                 | pending   |
//! | pass tags only        | pass      |
//! | more fail than pass   | fail      |
//! | mixed, pass >= fail   | ambiguous |

use crate::catalog::{Answer, Example, SubQuestion};
use crate::engine::verdict::Verdict;
use serde::Serialize;
use std::collections::BTreeSet;

/// A sub-question offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub sub_index: usize,
    pub example: Example,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sub-question {sub_index} is not a disambiguation choice")]
pub struct NotACandidate {
    pub sub_index: usize,
}

/// Item-local selection state, kept apart from the sub-answers it was
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disambiguation {
    candidates: Vec<Candidate>,
    selected: BTreeSet<usize>,
}

impl Disambiguation {
    /// Start selection over a completed layer. When nothing was answered yes
    /// every question of the layer is offered instead.
    pub fn begin(questions: &[SubQuestion], answers: &[Answer]) -> Self {
        let answered_yes: Vec<Candidate> = questions
            .iter()
            .zip(answers)
            .enumerate()
            .filter(|(_, (_, a))| **a == Answer::Yes)
            .map(|(sub_index, (q, _))| Candidate {
                sub_index,
                example: q.example,
            })
            .collect();

        let candidates = if answered_yes.is_empty() {
            questions
                .iter()
                .enumerate()
                .map(|(sub_index, q)| Candidate {
                    sub_index,
                    example: q.example,
                })
                .collect()
        } else {
            answered_yes
        };

        Self {
            candidates,
            selected: BTreeSet::new(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_selected(&self, sub_index: usize) -> bool {
        self.selected.contains(&sub_index)
    }

    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Include or exclude one candidate and return the running verdict.
    /// Setting a candidate to its current state changes nothing.
    pub fn toggle(&mut self, sub_index: usize, included: bool) -> Result<Verdict, NotACandidate> {
        if !self.candidates.iter().any(|c| c.sub_index == sub_index) {
            return Err(NotACandidate { sub_index });
        }
        if included {
            self.selected.insert(sub_index);
        } else {
            self.selected.remove(&sub_index);
        }
        Ok(self.verdict())
    }

    /// (pass, fail) counts over the selection.
    pub fn counts(&self) -> (usize, usize) {
        self.candidates
            .iter()
            .filter(|c| self.selected.contains(&c.sub_index))
            .fold((0, 0), |(p, f), c| match c.example {
                Example::Pass => (p + 1, f),
                Example::Fail => (p, f + 1),
            })
    }

    pub fn verdict(&self) -> Verdict {
        let (pass, fail) = self.counts();
        selection_verdict(pass, fail)
    }
}

pub fn selection_verdict(pass: usize, fail: usize) -> Verdict {
    match (pass, fail) {
        (0, 0) => Verdict::Pending,
        (_, 0) => Verdict::Pass,
        (p, f) if f > p => Verdict::Fail,
        _ => Verdict::Ambiguous,
    }
}

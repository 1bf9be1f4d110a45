//! Layer chain traversal.

use crate::catalog::{Answer, Layer};
use crate::engine::condition::evaluate;
use crate::engine::verdict::{Outcome, Verdict};
use crate::errors::EvaluationError;

/// Result of looking at one layer with the answers collected so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'c> {
    /// Layer incomplete; `next_index` is the question to present.
    AwaitingAnswers { next_index: usize },
    Verdict(Verdict),
    /// Chain matched. Answers reset and presentation resumes at index 0.
    AdvanceTo(&'c Layer),
}

/// Resolve a single layer.
pub fn resolve<'c>(layer: &'c Layer, answers: &[Answer]) -> Result<Resolution<'c>, EvaluationError> {
    let questions = layer.questions.len();
    if answers.len() > questions {
        return Err(EvaluationError::TooManyAnswers {
            answers: answers.len(),
            questions,
        });
    }
    if answers.len() < questions {
        return Ok(Resolution::AwaitingAnswers {
            next_index: answers.len(),
        });
    }

    let outcome = evaluate(
        layer.pass_condition,
        layer.next_layer_condition(),
        answers,
        &layer.questions,
    )?;
    Ok(match (outcome, layer.next_layer()) {
        (Outcome::Verdict(v), _) => Resolution::Verdict(v),
        (Outcome::AdvanceToNextLayer, Some(next)) => Resolution::AdvanceTo(next),
        // Chain exhausted.
        (Outcome::AdvanceToNextLayer, None) => Resolution::Verdict(Verdict::Fail),
    })
}

/// Where a chain walk came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Waiting on question `next_index` of the layer at `depth`.
    Awaiting { depth: usize, next_index: usize },
    /// The layer at `depth` produced a verdict.
    Verdict { depth: usize, verdict: Verdict },
}

impl Settled {
    pub fn depth(&self) -> usize {
        match self {
            Settled::Awaiting { depth, .. } | Settled::Verdict { depth, .. } => *depth,
        }
    }
}

/// Resolve `layer` (found at `depth` in its chain) and keep following
/// advances through layers that need no answers, until the walk either
/// waits for input or yields a verdict. Chain length is bounded only by the
/// catalog.
pub fn settle(layer: &Layer, depth: usize, answers: &[Answer]) -> Result<Settled, EvaluationError> {
    let mut layer = layer;
    let mut depth = depth;
    let mut answers = answers;
    loop {
        match resolve(layer, answers)? {
            Resolution::AwaitingAnswers { next_index } => {
                return Ok(Settled::Awaiting { depth, next_index })
            }
            Resolution::Verdict(verdict) => return Ok(Settled::Verdict { depth, verdict }),
            Resolution::AdvanceTo(next) => {
                layer = next;
                depth += 1;
                answers = &[];
            }
        }
    }
}

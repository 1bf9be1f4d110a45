//! Condition evaluation.
//!
//! # Evaluation order
//!
//! ```text
//! direct condition? ──yes──▶ pass / fail (answers ignored)
//!        │ no
//!        ▼
//! answers empty? ──yes──▶ EvaluationError::EmptyAnswers
//!        │ no
//!        ▼
//! yes-to-only-pass-fail? ──yes──▶ pass / fail / ambiguous (by example tag)
//!        │ no
//!        ▼
//! primary test ──ok──▶ pass
//!        │ failed
//!        ▼
//! chain test (if declared) ──ok──▶ advance to next layer
//!        │ failed / none
//!        ▼
//!      fail
//! ```
//!
//! The primary test always runs before the chain test, so one evaluation can
//! advance at most once.

use crate::catalog::{Answer, ChainCondition, Condition, Example, SubQuestion};
use crate::engine::verdict::{Outcome, Verdict};
use crate::errors::EvaluationError;

/// Yes/no counts over an answer sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: usize,
    pub no: usize,
}

impl Tally {
    pub fn of(answers: &[Answer]) -> Self {
        answers.iter().fold(Tally::default(), |mut t, a| {
            match a {
                Answer::Yes => t.yes += 1,
                Answer::No => t.no += 1,
            }
            t
        })
    }

    pub fn total(&self) -> usize {
        self.yes + self.no
    }
}

/// Evaluate a layer's pass condition against its answers.
///
/// `questions` is the layer context; only `yes-to-only-pass-fail` reads it,
/// and then it must line up one-to-one with `answers`.
pub fn evaluate(
    condition: Condition,
    chain: Option<ChainCondition>,
    answers: &[Answer],
    questions: &[SubQuestion],
) -> Result<Outcome, EvaluationError> {
    match condition {
        Condition::PassDirect => return Ok(Outcome::Verdict(Verdict::Pass)),
        Condition::FailDirect => return Ok(Outcome::Verdict(Verdict::Fail)),
        _ if answers.is_empty() => return Err(EvaluationError::EmptyAnswers { condition }),
        Condition::YesToOnlyPassFail => {
            return verdict_by_example(answers, questions).map(Outcome::Verdict);
        }
        _ => {}
    }

    let tally = Tally::of(answers);
    if count_test(condition, tally) == Some(true) {
        return Ok(Outcome::Verdict(Verdict::Pass));
    }
    if chain.is_some_and(|c| c.test(condition, tally)) {
        return Ok(Outcome::AdvanceToNextLayer);
    }
    Ok(Outcome::Verdict(Verdict::Fail))
}

/// Boolean form of a counting condition. `None` for conditions that do not
/// reduce to a count test.
pub fn count_test(condition: Condition, t: Tally) -> Option<bool> {
    let passed = match condition {
        Condition::PassDirect | Condition::FailDirect | Condition::YesToOnlyPassFail => {
            return None
        }
        Condition::AllYes => t.yes == t.total(),
        Condition::AllNo => t.no == t.total(),
        Condition::AnyYes => t.yes > 0,
        Condition::AnyNo => t.no > 0,
        Condition::MaxYes => t.yes >= t.no,
        Condition::MaxNo => t.yes <= t.no,
        Condition::YesToOneOrLess => t.yes <= 1,
        Condition::YesToTwoOrMore => t.yes >= 2,
    };
    Some(passed)
}

impl ChainCondition {
    /// The counting condition this chain re-tests, if it is one.
    pub fn as_condition(&self) -> Option<Condition> {
        match self {
            ChainCondition::NextLayer => None,
            ChainCondition::AllYes => Some(Condition::AllYes),
            ChainCondition::AllNo => Some(Condition::AllNo),
            ChainCondition::AnyYes => Some(Condition::AnyYes),
            ChainCondition::AnyNo => Some(Condition::AnyNo),
            ChainCondition::MaxYes => Some(Condition::MaxYes),
            ChainCondition::MaxNo => Some(Condition::MaxNo),
            ChainCondition::YesToOneOrLess => Some(Condition::YesToOneOrLess),
            ChainCondition::YesToTwoOrMore => Some(Condition::YesToTwoOrMore),
        }
    }

    /// Chain test against the same answers the primary test saw.
    ///
    /// `next-layer` only matches under an `all-yes` layer whose answers are
    /// all yes, which is exactly when that primary test passes; as a
    /// fallback it therefore never fires.
    pub fn test(&self, wrapping: Condition, t: Tally) -> bool {
        match self.as_condition() {
            None => wrapping == Condition::AllYes && t.yes == t.total(),
            Some(c) => count_test(c, t).unwrap_or(false),
        }
    }
}

/// Verdict of `yes-to-only-pass-fail`: tag every yes answer by its
/// question's example.
pub fn verdict_by_example(
    answers: &[Answer],
    questions: &[SubQuestion],
) -> Result<Verdict, EvaluationError> {
    if answers.len() != questions.len() {
        return Err(EvaluationError::ContextMismatch {
            answers: answers.len(),
            questions: questions.len(),
        });
    }

    let (mut pass, mut fail) = (false, false);
    for (q, a) in questions.iter().zip(answers) {
        if *a == Answer::Yes {
            match q.example {
                Example::Pass => pass = true,
                Example::Fail => fail = true,
            }
        }
    }

    Ok(match (pass, fail) {
        (true, false) => Verdict::Pass,
        (false, true) => Verdict::Fail,
        _ => Verdict::Ambiguous,
    })
}

use crate::catalog::Condition;
use thiserror::Error;

/// Misuse of the condition evaluator or resolver.
///
/// A validated catalog driven through [`ItemSession`](crate::session::ItemSession)
/// never produces these; they guard direct callers of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("condition '{condition}' needs at least one answer")]
    EmptyAnswers { condition: Condition },

    #[error("{answers} answers given for a layer with {questions} questions")]
    ContextMismatch { answers: usize, questions: usize },

    #[error("{answers} answers exceed the layer's {questions} questions")]
    TooManyAnswers { answers: usize, questions: usize },
}

/// Rejected user event. State is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("item {item} does not exist (catalog has {len} items)")]
    UnknownItem { item: usize, len: usize },

    #[error("item {item} is not the active item (current is {current})")]
    NotCurrent { item: usize, current: usize },

    #[error("item {item} has no main answer yet")]
    MainAnswerMissing { item: usize },

    #[error("item {item} has no active layer")]
    NoActiveLayer { item: usize },

    #[error("item {item}: sub-question {sub_index} answered out of sequence (next is {cursor})")]
    OutOfSequence {
        item: usize,
        sub_index: usize,
        cursor: usize,
    },

    #[error("item {item}: layer {depth} is not the active layer (active is {active})")]
    InactiveLayer {
        item: usize,
        depth: usize,
        active: usize,
    },

    #[error("item {item}: sub-question {sub_index} does not exist in a layer of {len}")]
    SubIndexOutOfRange {
        item: usize,
        sub_index: usize,
        len: usize,
    },

    #[error("item {item} is not awaiting disambiguation")]
    NotDisambiguating { item: usize },

    #[error("item {item}: sub-question {sub_index} is not a disambiguation choice")]
    NotACandidate { item: usize, sub_index: usize },

    #[error("item {target} is not reachable from item {current}: only the current item and answered items can be visited")]
    Unreachable { target: usize, current: usize },

    #[error("item {item} has no verdict yet")]
    NotResolved { item: usize },

    #[error("item {item} is the last item")]
    EndOfCatalog { item: usize },

    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl SessionError {
    /// Caller bug in event ordering, as opposed to an engine failure.
    pub fn is_sequence_violation(&self) -> bool {
        !matches!(self, SessionError::Evaluation(_))
    }
}

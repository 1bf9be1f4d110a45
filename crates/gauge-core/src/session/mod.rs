//! Stateful side of the evaluator: per-item sessions, the result store, and
//! the questionnaire that coordinates them.

pub mod item;
pub mod prompt;
pub mod questionnaire;
pub mod store;

pub use item::{AnswerTrail, ItemSession, ItemState, LayerRef};
pub use prompt::{Choice, Prompt};
pub use questionnaire::{Questionnaire, Transition};
pub use store::{CompletionReport, ItemResult, ResultRow, ResultStore, Summary};

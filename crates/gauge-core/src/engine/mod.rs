//! The reduction engine: condition evaluation, layer chain traversal, and
//! the pass/fail-by-example selection flow.
//!
//! Everything here is pure; state lives in [`crate::session`].

pub mod condition;
pub mod disambiguation;
pub mod resolver;
pub mod verdict;

pub use condition::{count_test, evaluate, verdict_by_example, Tally};
pub use disambiguation::{selection_verdict, Candidate, Disambiguation, NotACandidate};
pub use resolver::{resolve, settle, Resolution, Settled};
pub use verdict::{FinalVerdict, Outcome, Verdict};

//! Recorded user events, replayed against a questionnaire.
//!
//! ```yaml
//! version: 1
//! events:
//!   - main: { item: 0, answer: "no" }
//!   - sub: { item: 0, index: 0, answer: "yes" }
//!   - sub: { item: 0, depth: 1, index: 0, answer: "no" }
//!   - toggle: { item: 0, index: 1, included: true }
//!   - navigate: { target: 0 }
//!   - advance
//! ```

use crate::catalog::Answer;
use crate::errors::SessionError;
use crate::session::{Questionnaire, Transition};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const SUPPORTED_SCRIPT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Event {
    Main {
        item: usize,
        answer: Answer,
    },
    /// `depth` names the layer the question belongs to; 0 when omitted.
    Sub {
        item: usize,
        #[serde(default)]
        depth: usize,
        index: usize,
        answer: Answer,
    },
    Toggle {
        item: usize,
        index: usize,
        included: bool,
    },
    Navigate {
        target: usize,
    },
    Advance,
}

impl Event {
    pub fn apply(&self, q: &mut Questionnaire) -> Result<Transition, SessionError> {
        match *self {
            Event::Main { item, answer } => q.select_main_answer(item, answer),
            Event::Sub {
                item,
                depth,
                index,
                answer,
            } => q.select_sub_answer(item, depth, index, answer),
            Event::Toggle {
                item,
                index,
                included,
            } => q.toggle_disambiguation_choice(item, index, included),
            Event::Navigate { target } => q.navigate(target),
            Event::Advance => q.advance(),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Main { item, answer } => write!(f, "main item={} answer={}", item, answer),
            Event::Sub {
                item,
                depth,
                index,
                answer,
            } => write!(
                f,
                "sub item={} depth={} index={} answer={}",
                item, depth, index, answer
            ),
            Event::Toggle {
                item,
                index,
                included,
            } => write!(f, "toggle item={} index={} included={}", item, index, included),
            Event::Navigate { target } => write!(f, "navigate target={}", target),
            Event::Advance => write!(f, "advance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerScript {
    pub version: u32,
    /// Events are single-key maps (`- main: {...}`) rather than YAML tags.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub events: Vec<Event>,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse script: {0}")]
    Parse(String),

    #[error("unsupported script version {found} (supported: {SUPPORTED_SCRIPT_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("step {step} ({event}) rejected: {source}")]
    Rejected {
        step: usize,
        event: String,
        source: SessionError,
    },
}

pub fn load_script(path: &Path) -> Result<AnswerScript, ScriptError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ScriptError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_script(&raw)
}

/// Parse a YAML (or JSON) script.
pub fn parse_script(raw: &str) -> Result<AnswerScript, ScriptError> {
    let script: AnswerScript =
        serde_yaml::from_str(raw).map_err(|e| ScriptError::Parse(e.to_string()))?;
    if script.version != SUPPORTED_SCRIPT_VERSION {
        return Err(ScriptError::UnsupportedVersion {
            found: script.version,
        });
    }
    Ok(script)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Number of events applied.
    pub applied: usize,
    pub last: Option<Transition>,
}

/// Apply events in order, stopping at the first rejected one. Events before
/// the rejected step stay applied.
pub fn replay(q: &mut Questionnaire, events: &[Event]) -> Result<ReplayOutcome, ScriptError> {
    let mut last = None;
    for (i, event) in events.iter().enumerate() {
        let transition = event.apply(q).map_err(|source| ScriptError::Rejected {
            step: i + 1,
            event: event.to_string(),
            source,
        })?;
        debug!(step = i + 1, %event, verdict = %transition.verdict, "replayed");
        last = Some(transition);
    }
    Ok(ReplayOutcome {
        applied: events.len(),
        last,
    })
}

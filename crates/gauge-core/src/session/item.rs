//! Per-item state machine.
//!
//! ```text
//! Unstarted ──main──▶ MainAnswered ──sub──▶ SubInProgress ◀─┐ advance
//!     ▲                   │                    │   └────────┘
//!     │ main changed      │ terminal branch    ├──▶ Ambiguous ──toggle──▶ Resolved
//!     └───────────────────┴────────────────────┴──────────────────────────▶ Resolved
//! ```
//!
//! Every event is applied to a copy and committed only on success, so a
//! rejected event leaves the session untouched.

use crate::catalog::{Answer, Item, Layer};
use crate::engine::{settle, Disambiguation, FinalVerdict, Settled, Verdict};
use crate::errors::SessionError;
use crate::session::prompt::{Choice, Prompt};
use serde::Serialize;
use tracing::debug;

/// Non-owning pointer to the active layer: which branch, how deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerRef {
    pub branch: Answer,
    pub depth: usize,
}

impl LayerRef {
    pub fn resolve<'c>(&self, item: &'c Item) -> Option<&'c Layer> {
        item.branch(self.branch).descend(self.depth)
    }
}

/// Answers entered for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerTrail {
    main_answer: Option<Answer>,
    /// Answers of layers left through a chain transition, in order.
    completed_layers: Vec<Vec<Answer>>,
    sub_answers: Vec<Answer>,
    current_layer: Option<LayerRef>,
}

impl AnswerTrail {
    pub fn main_answer(&self) -> Option<Answer> {
        self.main_answer
    }

    /// Answers of the active layer.
    pub fn sub_answers(&self) -> &[Answer] {
        &self.sub_answers
    }

    pub fn completed_layers(&self) -> &[Vec<Answer>] {
        &self.completed_layers
    }

    pub fn current_layer(&self) -> Option<LayerRef> {
        self.current_layer
    }

    /// Progress cursor: index of the next sub-question to answer.
    pub fn active_sub_index(&self) -> usize {
        self.sub_answers.len()
    }

    /// Answers of every visited layer, active layer last.
    pub fn full_trail(&self) -> Vec<Vec<Answer>> {
        let mut trail = self.completed_layers.clone();
        if !self.sub_answers.is_empty() {
            trail.push(self.sub_answers.clone());
        }
        trail
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    Unstarted,
    MainAnswered,
    SubInProgress,
    Ambiguous(Disambiguation),
    /// `disambiguation` is kept when the verdict came from selection mode,
    /// so the selection can still be revised.
    Resolved {
        verdict: FinalVerdict,
        disambiguation: Option<Disambiguation>,
    },
}

impl ItemState {
    pub fn name(&self) -> &'static str {
        match self {
            ItemState::Unstarted => "unstarted",
            ItemState::MainAnswered => "main_answered",
            ItemState::SubInProgress => "sub_in_progress",
            ItemState::Ambiguous(_) => "ambiguous",
            ItemState::Resolved { .. } => "resolved",
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self {
            ItemState::Unstarted | ItemState::MainAnswered | ItemState::SubInProgress => {
                Verdict::Pending
            }
            ItemState::Ambiguous(_) => Verdict::Ambiguous,
            ItemState::Resolved { verdict, .. } => (*verdict).into(),
        }
    }

    pub fn disambiguation(&self) -> Option<&Disambiguation> {
        match self {
            ItemState::Ambiguous(d) => Some(d),
            ItemState::Resolved {
                disambiguation: Some(d),
                ..
            } => Some(d),
            _ => None,
        }
    }
}

/// Life cycle of one item, from unanswered to verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSession {
    index: usize,
    trail: AnswerTrail,
    state: ItemState,
}

impl ItemSession {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            trail: AnswerTrail::default(),
            state: ItemState::Unstarted,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn trail(&self) -> &AnswerTrail {
        &self.trail
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub fn verdict(&self) -> Verdict {
        self.state.verdict()
    }

    pub fn final_verdict(&self) -> Option<FinalVerdict> {
        self.verdict().as_final()
    }

    /// Select or change the main answer. Changing it discards all sub-state;
    /// re-selecting the same answer changes nothing.
    pub fn select_main_answer(&mut self, item: &Item, answer: Answer) -> Result<Verdict, SessionError> {
        if self.trail.main_answer == Some(answer) {
            return Ok(self.verdict());
        }
        self.transact(|s| {
            s.trail = AnswerTrail {
                main_answer: Some(answer),
                current_layer: Some(LayerRef {
                    branch: answer,
                    depth: 0,
                }),
                ..AnswerTrail::default()
            };
            s.state = ItemState::Unstarted;
            s.run_resolver(item)
        })
    }

    /// Answer sub-question `sub_index` of the layer at `depth`, which must be
    /// the active layer. The next unanswered index appends; an earlier index
    /// overwrites in place. Repeating an answer already recorded in a layer
    /// left through a chain changes nothing.
    pub fn select_sub_answer(
        &mut self,
        item: &Item,
        depth: usize,
        sub_index: usize,
        answer: Answer,
    ) -> Result<Verdict, SessionError> {
        let layer = self.active_layer(item)?;
        let active = self.trail.current_layer.map_or(0, |at| at.depth);
        if depth != active {
            let recorded = self
                .trail
                .completed_layers
                .get(depth)
                .and_then(|answers| answers.get(sub_index));
            if depth < active && recorded == Some(&answer) {
                return Ok(self.verdict());
            }
            return Err(SessionError::InactiveLayer {
                item: self.index,
                depth,
                active,
            });
        }
        let len = layer.questions.len();
        if len == 0 {
            return Err(SessionError::NoActiveLayer { item: self.index });
        }
        if sub_index >= len {
            return Err(SessionError::SubIndexOutOfRange {
                item: self.index,
                sub_index,
                len,
            });
        }
        let cursor = self.trail.active_sub_index();
        if sub_index > cursor {
            return Err(SessionError::OutOfSequence {
                item: self.index,
                sub_index,
                cursor,
            });
        }
        if sub_index < cursor && self.trail.sub_answers[sub_index] == answer {
            return Ok(self.verdict());
        }

        self.transact(|s| {
            if sub_index == cursor {
                s.trail.sub_answers.push(answer);
            } else {
                s.trail.sub_answers[sub_index] = answer;
            }
            s.run_resolver(item)
        })
    }

    /// Include or exclude a choice while the item is in selection mode.
    pub fn toggle_disambiguation_choice(
        &mut self,
        sub_index: usize,
        included: bool,
    ) -> Result<Verdict, SessionError> {
        let Some(current) = self.state.disambiguation() else {
            return Err(SessionError::NotDisambiguating { item: self.index });
        };
        let mut selection = current.clone();
        let running = selection
            .toggle(sub_index, included)
            .map_err(|e| SessionError::NotACandidate {
                item: self.index,
                sub_index: e.sub_index,
            })?;

        self.state = match running.as_final() {
            Some(verdict) => ItemState::Resolved {
                verdict,
                disambiguation: Some(selection),
            },
            None => ItemState::Ambiguous(selection),
        };
        debug!(item = self.index, state = self.state.name(), %running, "selection changed");
        Ok(self.verdict())
    }

    /// What to show for this item now.
    pub fn prompt(&self, item: &Item) -> Prompt {
        match &self.state {
            ItemState::Unstarted => Prompt::MainQuestion {
                title: item.title.clone(),
                description: item.description.clone(),
                yes_hint: item.yes_hint.clone(),
                no_hint: item.no_hint.clone(),
            },
            ItemState::MainAnswered | ItemState::SubInProgress => {
                match (self.trail.current_layer, self.active_layer(item)) {
                    (Some(at), Ok(layer)) => {
                        let sub_index = self.trail.active_sub_index();
                        Prompt::SubQuestion {
                            depth: at.depth,
                            sub_index,
                            of: layer.questions.len(),
                            title: layer
                                .questions
                                .get(sub_index)
                                .map(|q| q.title.clone())
                                .unwrap_or_default(),
                        }
                    }
                    _ => Prompt::MainQuestion {
                        title: item.title.clone(),
                        description: item.description.clone(),
                        yes_hint: item.yes_hint.clone(),
                        no_hint: item.no_hint.clone(),
                    },
                }
            }
            ItemState::Ambiguous(d) => {
                let questions = self
                    .active_layer(item)
                    .map(|l| l.questions.as_slice())
                    .unwrap_or_default();
                Prompt::Disambiguation {
                    choices: d
                        .candidates()
                        .iter()
                        .map(|c| Choice {
                            sub_index: c.sub_index,
                            title: questions
                                .get(c.sub_index)
                                .map(|q| q.title.clone())
                                .unwrap_or_default(),
                            example: c.example,
                            selected: d.is_selected(c.sub_index),
                        })
                        .collect(),
                    running: d.verdict(),
                }
            }
            ItemState::Resolved { verdict, .. } => Prompt::Done { verdict: *verdict },
        }
    }

    fn active_layer<'c>(&self, item: &'c Item) -> Result<&'c Layer, SessionError> {
        if self.trail.main_answer.is_none() {
            return Err(SessionError::MainAnswerMissing { item: self.index });
        }
        self.trail
            .current_layer
            .and_then(|at| at.resolve(item))
            .ok_or(SessionError::NoActiveLayer { item: self.index })
    }

    fn transact(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), SessionError>,
    ) -> Result<Verdict, SessionError> {
        let mut next = self.clone();
        f(&mut next)?;
        *self = next;
        debug!(
            item = self.index,
            state = self.state.name(),
            cursor = self.trail.active_sub_index(),
            "item transition"
        );
        Ok(self.verdict())
    }

    /// Run the resolver from the active layer and land in the matching state.
    fn run_resolver(&mut self, item: &Item) -> Result<(), SessionError> {
        let Some(at) = self.trail.current_layer else {
            return Err(SessionError::NoActiveLayer { item: self.index });
        };
        let layer = self.active_layer(item)?;
        let settled = settle(layer, at.depth, &self.trail.sub_answers)?;

        let depth = settled.depth();
        if depth > at.depth {
            let left = std::mem::take(&mut self.trail.sub_answers);
            self.trail.completed_layers.push(left);
            for _ in at.depth + 1..depth {
                self.trail.completed_layers.push(Vec::new());
            }
            self.trail.current_layer = Some(LayerRef {
                branch: at.branch,
                depth,
            });
            debug!(item = self.index, from = at.depth, to = depth, "advanced to next layer");
        }

        self.state = match settled {
            Settled::Awaiting {
                depth: 0,
                next_index: 0,
            } => ItemState::MainAnswered,
            Settled::Awaiting { .. } => ItemState::SubInProgress,
            Settled::Verdict { verdict, .. } => match verdict {
                Verdict::Pass => ItemState::Resolved {
                    verdict: FinalVerdict::Pass,
                    disambiguation: None,
                },
                Verdict::Fail => ItemState::Resolved {
                    verdict: FinalVerdict::Fail,
                    disambiguation: None,
                },
                Verdict::Ambiguous => {
                    let layer = self.active_layer(item)?;
                    ItemState::Ambiguous(Disambiguation::begin(
                        &layer.questions,
                        &self.trail.sub_answers,
                    ))
                }
                // Layer evaluation never yields pending.
                Verdict::Pending => ItemState::SubInProgress,
            },
        };
        Ok(())
    }
}

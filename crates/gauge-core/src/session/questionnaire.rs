//! A questionnaire run over one catalog.
//!
//! Exactly one item is current at a time and only the current item accepts
//! answer events. Every item keeps its own [`ItemSession`] for the whole run,
//! so navigating away and back never loses entered answers; the store entry
//! for an item follows that item's session verdict.

use crate::catalog::{Answer, Catalog, Item};
use crate::engine::Verdict;
use crate::errors::SessionError;
use crate::session::item::ItemSession;
use crate::session::prompt::Prompt;
use crate::session::store::{CompletionReport, ItemResult, ResultRow, ResultStore, Summary};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of an accepted event: the item it touched, that item's verdict,
/// what to render next, and the completion signal once every item is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub item: usize,
    pub verdict: Verdict,
    pub prompt: Prompt,
    pub completion: Option<CompletionReport>,
}

#[derive(Debug, Clone)]
pub struct Questionnaire {
    catalog: Arc<Catalog>,
    sessions: Vec<ItemSession>,
    store: ResultStore,
    current: usize,
}

impl Questionnaire {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let sessions = (0..catalog.len()).map(ItemSession::new).collect();
        Self {
            catalog,
            sessions,
            store: ResultStore::new(),
            current: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn session(&self, index: usize) -> Option<&ItemSession> {
        self.sessions.get(index)
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Render instruction for the current item.
    pub fn prompt(&self) -> Result<Prompt, SessionError> {
        let item = self.item(self.current)?;
        Ok(self.session_at(self.current)?.prompt(item))
    }

    pub fn select_main_answer(
        &mut self,
        item: usize,
        answer: Answer,
    ) -> Result<Transition, SessionError> {
        self.on_current(item, "main", |session, def| {
            session.select_main_answer(def, answer)
        })
    }

    /// Answer a sub-question of the layer at `depth` of `item`'s branch.
    pub fn select_sub_answer(
        &mut self,
        item: usize,
        depth: usize,
        sub_index: usize,
        answer: Answer,
    ) -> Result<Transition, SessionError> {
        self.on_current(item, "sub", |session, def| {
            session.select_sub_answer(def, depth, sub_index, answer)
        })
    }

    pub fn toggle_disambiguation_choice(
        &mut self,
        item: usize,
        sub_index: usize,
        included: bool,
    ) -> Result<Transition, SessionError> {
        self.on_current(item, "toggle", |session, _| {
            session.toggle_disambiguation_choice(sub_index, included)
        })
    }

    /// Whether `target` may be visited: the current item or any item with a
    /// stored verdict. Never unanswered items ahead.
    pub fn can_navigate(&self, target: usize) -> bool {
        target < self.sessions.len() && (target == self.current || self.store.contains(target))
    }

    pub fn navigate(&mut self, target: usize) -> Result<Transition, SessionError> {
        self.item(target)?;
        if !self.can_navigate(target) {
            let err = SessionError::Unreachable {
                target,
                current: self.current,
            };
            warn!(error = %err, "navigation rejected");
            return Err(err);
        }
        if target != self.current {
            debug!(from = self.current, to = target, "navigate");
            self.current = target;
        }
        self.transition(target)
    }

    /// Move from a resolved current item to the one after it.
    pub fn advance(&mut self) -> Result<Transition, SessionError> {
        let item = self.current;
        if self.session_at(item)?.final_verdict().is_none() {
            return Err(SessionError::NotResolved { item });
        }
        if item + 1 >= self.sessions.len() {
            return Err(SessionError::EndOfCatalog { item });
        }
        self.current = item + 1;
        debug!(from = item, to = self.current, "advance");
        self.transition(self.current)
    }

    /// The verdict stream, in catalog order.
    pub fn results(&self) -> Vec<ResultRow> {
        self.catalog
            .items
            .iter()
            .zip(&self.sessions)
            .enumerate()
            .map(|(index, (item, session))| match self.store.get(index) {
                Some(stored) => ResultRow::from(stored),
                None => ResultRow {
                    index,
                    id: item.id.clone(),
                    title: item.title.clone(),
                    verdict: Verdict::Pending,
                    main_answer: session.trail().main_answer(),
                    trail: session.trail().full_trail(),
                },
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        !self.sessions.is_empty() && self.store.len() == self.sessions.len()
    }

    pub fn completion(&self) -> Option<CompletionReport> {
        if !self.is_complete() {
            return None;
        }
        let results = self.results();
        let summary = Summary::of(&results);
        Some(CompletionReport { results, summary })
    }

    fn item(&self, index: usize) -> Result<&Item, SessionError> {
        self.catalog.item(index).ok_or(SessionError::UnknownItem {
            item: index,
            len: self.catalog.len(),
        })
    }

    fn session_at(&self, index: usize) -> Result<&ItemSession, SessionError> {
        self.sessions.get(index).ok_or(SessionError::UnknownItem {
            item: index,
            len: self.sessions.len(),
        })
    }

    fn on_current(
        &mut self,
        item: usize,
        event: &'static str,
        apply: impl FnOnce(&mut ItemSession, &Item) -> Result<Verdict, SessionError>,
    ) -> Result<Transition, SessionError> {
        let catalog = Arc::clone(&self.catalog);
        let (len, current) = (self.sessions.len(), self.current);
        let result = match (catalog.item(item), self.sessions.get_mut(item)) {
            (Some(_), Some(_)) if item != current => {
                Err(SessionError::NotCurrent { item, current })
            }
            (Some(def), Some(session)) => apply(session, def),
            _ => Err(SessionError::UnknownItem { item, len }),
        };
        if let Err(e) = result {
            warn!(item, event, error = %e, "event rejected");
            return Err(e);
        }

        self.sync_store(item);
        self.transition(item)
    }

    fn sync_store(&mut self, index: usize) {
        let (Some(session), Some(item)) = (self.sessions.get(index), self.catalog.items.get(index))
        else {
            return;
        };
        match (session.final_verdict(), session.trail().main_answer()) {
            (Some(verdict), Some(main_answer)) => {
                let prior = self.store.record(ItemResult {
                    index,
                    id: item.id.clone(),
                    title: item.title.clone(),
                    verdict,
                    main_answer,
                    trail: session.trail().full_trail(),
                });
                if prior.map(|p| p.verdict) != Some(verdict) {
                    info!(item = index, id = %item.id, %verdict, "verdict recorded");
                }
                if self.is_complete() {
                    info!(items = self.store.len(), "questionnaire complete");
                }
            }
            _ => {
                if self.store.retract(index).is_some() {
                    info!(item = index, id = %item.id, "verdict retracted");
                }
            }
        }
    }

    fn transition(&self, index: usize) -> Result<Transition, SessionError> {
        let item = self.item(index)?;
        let session = self.session_at(index)?;
        Ok(Transition {
            item: index,
            verdict: session.verdict(),
            prompt: session.prompt(item),
            completion: self.completion(),
        })
    }
}

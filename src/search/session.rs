use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use log::debug;

use super::commands::{SearchCommand, SearchCompletion, SeedQuery};
use crate::types::ResultItem;

/// Client half of the search pipeline, owned by one screen.
///
/// Wraps the command and completion channels and tracks which query round is
/// current, so completions from superseded rounds can be recognized and
/// dropped instead of overwriting newer state.
pub struct SearchSession {
    tx: Sender<SearchCommand>,
    rx: Receiver<SearchCompletion>,
    next_query_id: u64,
    current_query_id: Option<u64>,
    in_flight: bool,
}

impl SearchSession {
    #[must_use]
    pub fn new(tx: Sender<SearchCommand>, rx: Receiver<SearchCompletion>) -> Self {
        Self {
            tx,
            rx,
            next_query_id: 0,
            current_query_id: None,
            in_flight: false,
        }
    }

    /// Issue a new search round seeded with the given category stub.
    ///
    /// Any earlier round becomes stale immediately; its completion will no
    /// longer satisfy [`SearchSession::matches_latest`].
    pub fn seed(&mut self, item: ResultItem) {
        self.next_query_id = self.next_query_id.saturating_add(1);
        let id = self.next_query_id;
        self.current_query_id = Some(id);
        self.in_flight = true;
        debug!("seeding search round {id} for '{}'", item.name);
        let _ = self.tx.send(SearchCommand::Seed(SeedQuery::new(id, item)));
    }

    /// Whether `query_id` belongs to the most recently issued round.
    #[must_use]
    pub fn matches_latest(&self, query_id: u64) -> bool {
        Some(query_id) == self.current_query_id
    }

    /// Note that the current round has settled.
    pub fn record_completion(&mut self) {
        self.in_flight = false;
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn has_issued_query(&self) -> bool {
        self.current_query_id.is_some()
    }

    /// Poll for a completion without blocking.
    pub fn try_recv(&mut self) -> Result<SearchCompletion, TryRecvError> {
        self.rx.try_recv()
    }

    /// Ask the worker to stop. Safe to call more than once.
    pub fn shutdown(&self) {
        let _ = self.tx.send(SearchCommand::Shutdown);
    }
}

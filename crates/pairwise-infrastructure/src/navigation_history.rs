//! In-process navigation history with back/forward.

use pairwise_core::navigation::NavigationHistory;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    cursor: usize,
}

/// Linear history of query strings, the way a browser tab keeps it.
///
/// Pushing while not at the newest entry drops the forward entries.
#[derive(Debug)]
pub struct InMemoryHistory {
    state: Mutex<HistoryState>,
}

impl InMemoryHistory {
    pub fn new(initial_query: impl Into<String>) -> Self {
        let initial = initial_query.into();
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![initial.trim_start_matches('?').to_string()],
                cursor: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Moves one entry back. Returns false at the oldest entry.
    pub fn back(&self) -> bool {
        let mut state = self.lock();
        if state.cursor == 0 {
            return false;
        }
        state.cursor -= 1;
        true
    }

    /// Moves one entry forward. Returns false at the newest entry.
    pub fn forward(&self) -> bool {
        let mut state = self.lock();
        if state.cursor + 1 >= state.entries.len() {
            return false;
        }
        state.cursor += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl NavigationHistory for InMemoryHistory {
    fn query(&self) -> String {
        let state = self.lock();
        state.entries[state.cursor].clone()
    }

    fn push(&self, query: String) {
        let mut state = self.lock();
        let keep = state.cursor + 1;
        state.entries.truncate(keep);
        state.entries.push(query);
        state.cursor = state.entries.len() - 1;
    }
}

use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    book::Book, copy::CopyId, observers::CatalogObserver, tracking_state::TrackingState,
};

/// Events that move a copy between tracking states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CopyEvent {
    /// A new copy enters the collection
    Buy,
    /// Lend an available copy
    CheckOut,
    /// Return a checked-out copy
    CheckIn,
    /// Remove a copy from the collection for good
    Lose,
}

impl CopyEvent {
    /// The state this event leads to from `from`, or `None` if the event is
    /// not allowed there. `from == None` means the copy is not tracked.
    #[must_use]
    pub fn next_state(self, from: Option<TrackingState>) -> Option<TrackingState> {
        if from.is_some_and(TrackingState::is_terminal) {
            return None;
        }
        match (self, from) {
            (Self::Buy, None) | (Self::CheckIn, Some(TrackingState::CheckedOut)) => {
                Some(TrackingState::Available)
            }
            (Self::CheckOut, Some(TrackingState::Available)) => Some(TrackingState::CheckedOut),
            (Self::Lose, Some(_)) => Some(TrackingState::Lost),
            _ => None,
        }
    }
}

/// One successful tracking transition
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StateTransition {
    /// Position in the catalog's event order, starting at 1
    pub sequence: u64,
    /// The copy that moved
    pub copy: CopyId,
    /// The book the copy belongs to
    pub book: Book,
    /// State before the event, `None` for a purchase
    pub from: Option<TrackingState>,
    /// State after the event
    pub to: TrackingState,
    /// The event that caused the move
    pub event: CopyEvent,
}

/// Default number of transitions a journal retains
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Bounded history of transitions plus the observers told about each one
pub struct TransitionJournal {
    /// Retained transitions, oldest first
    entries: VecDeque<StateTransition>,
    /// Maximum number of retained transitions
    limit: usize,
    /// Sequence number of the last recorded transition
    last_sequence: u64,
    /// Registered observers
    observers: Vec<Box<dyn CatalogObserver>>,
}

impl fmt::Debug for TransitionJournal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionJournal")
            .field("entries", &self.entries)
            .field("limit", &self.limit)
            .field("last_sequence", &self.last_sequence)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for TransitionJournal {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl TransitionJournal {
    /// Create an empty journal retaining at most `limit` transitions
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { entries: VecDeque::new(), limit, last_sequence: 0, observers: Vec::new() }
    }

    /// Register an observer to be notified of every recorded transition
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// Record a transition and notify observers
    pub(crate) fn record(
        &mut self,
        copy: CopyId,
        book: &Book,
        from: Option<TrackingState>,
        to: TrackingState,
        event: CopyEvent,
    ) {
        self.last_sequence = self.last_sequence.saturating_add(1);
        let transition = StateTransition {
            sequence: self.last_sequence,
            copy,
            book: book.clone(),
            from,
            to,
            event,
        };

        for observer in &self.observers {
            observer.on_transition(&transition);
        }

        self.entries.push_back(transition);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Retained transitions, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<StateTransition> {
        self.entries.iter().cloned().collect()
    }

    /// Retained transitions rendered as a JSON array
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a record cannot be rendered.
    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Number of transitions recorded since creation, including evicted ones
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.last_sequence
    }

    /// Maximum number of retained transitions
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

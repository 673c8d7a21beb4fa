use std::collections::{HashMap, HashSet, hash_map::Entry};

use crate::{
    book::Book,
    config::CatalogConfig,
    copy::BookCopy,
    error::{CatalogError, Result},
    events::{CopyEvent, StateTransition, TransitionJournal},
    ledger::CopyLedger,
    observers::{CatalogObserver, TransitionLogger},
    query::{QueryStrategy, StrategyKind},
    tracking_state::TrackingState,
};

/// Operations shared by every catalog variant.
///
/// A copy is tracked from `buy` until `lose`; in between it is either
/// available or checked out. Read operations never fail and return empty
/// results for books the catalog does not hold.
pub trait Library: std::fmt::Debug {
    /// Buy a new copy of `book` and add it to the collection as available
    fn buy(&mut self, book: &Book) -> BookCopy;

    /// Lend an available copy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidState`] if the copy is not available.
    fn checkout(&mut self, copy: &BookCopy) -> Result<()>;

    /// Take back a checked-out copy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidState`] if the copy is not checked out.
    fn checkin(&mut self, copy: &BookCopy) -> Result<()>;

    /// Remove a copy from the collection for good.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidState`] if the catalog does not track the copy.
    fn lose(&mut self, copy: &BookCopy) -> Result<()>;

    /// Where the catalog tracks `copy`, `None` if it does not
    fn state_of(&self, copy: &BookCopy) -> Option<TrackingState>;

    /// Whether `copy` is on the shelf
    fn is_available(&self, copy: &BookCopy) -> bool {
        self.state_of(copy) == Some(TrackingState::Available)
    }

    /// Every tracked copy of `book`
    fn all_copies(&self, book: &Book) -> HashSet<BookCopy>;

    /// Available copies of `book`
    fn available_copies(&self, book: &Book) -> HashSet<BookCopy>;

    /// Checked-out copies of `book`
    fn checked_out_copies(&self, book: &Book) -> HashSet<BookCopy>;

    /// Books with at least one tracked copy
    fn books(&self) -> Vec<Book>;

    /// Books matching `query`, in the order the search strategy ranks them
    fn find(&self, query: &str) -> Vec<Book>;

    /// Transition history and observers
    fn journal(&self) -> &TransitionJournal;

    /// Mutable access to the transition journal
    fn journal_mut(&mut self) -> &mut TransitionJournal;

    /// Register an observer to be notified of every tracking transition
    fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.journal_mut().register_observer(observer);
    }

    /// Retained transitions, oldest first
    fn history(&self) -> Vec<StateTransition> {
        self.journal().history()
    }
}

/// Collection of any size: one ledger per book plus a pluggable search
/// strategy, keyword-indexed by default.
///
/// A book is a key of the collection exactly while it has a tracked copy.
/// Every operation except `books` costs time independent of the number of
/// distinct books when the indexed strategy is used.
#[derive(Debug)]
pub struct Catalog {
    /// Ledger of every book with at least one tracked copy
    collection: HashMap<Book, CopyLedger>,
    /// Search strategy, indexed on first acquisition of each book
    strategy: Box<dyn QueryStrategy>,
    /// Transition history and observers
    journal: TransitionJournal,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog searched through a keyword index
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(StrategyKind::Indexed)
    }

    /// Create an empty catalog searched with the given strategy
    #[must_use]
    pub fn with_strategy(kind: StrategyKind) -> Self {
        Self {
            collection: HashMap::new(),
            strategy: kind.build(),
            journal: TransitionJournal::default(),
        }
    }

    /// Build a catalog from configuration and buy its inventory
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut catalog = Self {
            collection: HashMap::new(),
            strategy: config.strategy.build(),
            journal: TransitionJournal::new(config.history_limit),
        };
        if config.log_transitions {
            catalog.register_observer(Box::new(TransitionLogger));
        }
        for entry in &config.inventory {
            for _ in 0..entry.copies {
                catalog.buy(&entry.book);
            }
        }
        catalog
    }

    /// The active search strategy
    #[must_use]
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Verify the representation invariant (debug builds only)
    fn check_rep(&self) {
        debug_assert!(
            self.collection
                .iter()
                .all(|(book, ledger)| !ledger.is_empty() && ledger.book() == book),
            "catalog retains an empty or mismatched ledger"
        );
    }

    /// Apply `event` to a tracked copy through `op` on its ledger
    fn apply(
        &mut self,
        copy: &BookCopy,
        event: CopyEvent,
        op: fn(&mut CopyLedger, &BookCopy) -> bool,
    ) -> Result<()> {
        let refused = |state| CatalogError::InvalidState { copy: copy.id(), event, state };

        let Some(ledger) = self.collection.get_mut(copy.book()) else {
            tracing::warn!(copy = %copy.id(), ?event, "refused: copy is not tracked");
            return Err(refused(None));
        };

        let from = ledger.state_of(copy);
        let Some(to) = event.next_state(from) else {
            tracing::warn!(copy = %copy.id(), ?event, ?from, "refused: invalid transition");
            return Err(refused(from));
        };
        if !op(ledger, copy) {
            return Err(refused(from));
        }

        if ledger.is_empty() {
            self.collection.remove(copy.book());
            tracing::info!(book = %copy.book(), "last copy gone, book dropped from catalog");
        }

        self.journal.record(copy.id(), copy.book(), from, to, event);
        self.check_rep();
        Ok(())
    }
}

impl Library for Catalog {
    fn buy(&mut self, book: &Book) -> BookCopy {
        let copy = BookCopy::new(book.clone());

        let ledger = match self.collection.entry(book.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.strategy.index(book);
                tracing::debug!(%book, "new book indexed");
                entry.insert(CopyLedger::new(book.clone()))
            }
        };
        let acquired = ledger.acquire(copy.clone());
        debug_assert!(acquired, "fresh copy {} already tracked", copy.id());

        self.journal.record(copy.id(), book, None, TrackingState::Available, CopyEvent::Buy);
        self.check_rep();
        copy
    }

    fn checkout(&mut self, copy: &BookCopy) -> Result<()> {
        self.apply(copy, CopyEvent::CheckOut, CopyLedger::checkout)
    }

    fn checkin(&mut self, copy: &BookCopy) -> Result<()> {
        self.apply(copy, CopyEvent::CheckIn, CopyLedger::checkin)
    }

    fn lose(&mut self, copy: &BookCopy) -> Result<()> {
        self.apply(copy, CopyEvent::Lose, CopyLedger::lose)
    }

    fn state_of(&self, copy: &BookCopy) -> Option<TrackingState> {
        self.collection.get(copy.book()).and_then(|ledger| ledger.state_of(copy))
    }

    fn all_copies(&self, book: &Book) -> HashSet<BookCopy> {
        self.collection.get(book).map(CopyLedger::all).unwrap_or_default()
    }

    fn available_copies(&self, book: &Book) -> HashSet<BookCopy> {
        self.collection.get(book).map(CopyLedger::available).unwrap_or_default()
    }

    fn checked_out_copies(&self, book: &Book) -> HashSet<BookCopy> {
        self.collection.get(book).map(CopyLedger::checked_out).unwrap_or_default()
    }

    fn books(&self) -> Vec<Book> {
        self.collection.keys().cloned().collect()
    }

    fn find(&self, query: &str) -> Vec<Book> {
        self.strategy.find(query, &self.collection)
    }

    fn journal(&self) -> &TransitionJournal {
        &self.journal
    }

    fn journal_mut(&mut self) -> &mut TransitionJournal {
        &mut self.journal
    }
}

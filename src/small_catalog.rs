use std::collections::HashSet;

use crate::{
    book::Book,
    catalog::Library,
    config::CatalogConfig,
    copy::BookCopy,
    error::{CatalogError, Result},
    events::{CopyEvent, TransitionJournal},
    observers::TransitionLogger,
    query::{LinearQuery, QueryStrategy},
    tracking_state::TrackingState,
};

/// Small collection, like one person's shelves: two flat sets of copies and
/// exact-match search. Lookups scan every copy.
#[derive(Debug, Default)]
pub struct SmallCatalog {
    /// Copies on the shelf
    in_library: HashSet<BookCopy>,
    /// Copies lent out
    checked_out: HashSet<BookCopy>,
    /// Exact-match search
    strategy: LinearQuery,
    /// Transition history and observers
    journal: TransitionJournal,
}

impl SmallCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from configuration and buy its inventory. The
    /// configured strategy is ignored: small catalogs always scan.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut catalog =
            Self { journal: TransitionJournal::new(config.history_limit), ..Self::default() };
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

    /// Verify the representation invariant (debug builds only)
    fn check_rep(&self) {
        debug_assert!(
            self.in_library.is_disjoint(&self.checked_out),
            "copy both available and checked out"
        );
    }

    /// Copies of `book` held in `set`
    fn copies_in(set: &HashSet<BookCopy>, book: &Book) -> HashSet<BookCopy> {
        set.iter().filter(|copy| copy.book() == book).cloned().collect()
    }

    /// Check `event` against the copy's current state and return the move
    fn plan(
        &self,
        copy: &BookCopy,
        event: CopyEvent,
    ) -> Result<(Option<TrackingState>, TrackingState)> {
        let from = self.state_of(copy);
        match event.next_state(from) {
            Some(to) => Ok((from, to)),
            None => {
                tracing::warn!(copy = %copy.id(), ?event, ?from, "refused: invalid transition");
                Err(CatalogError::InvalidState { copy: copy.id(), event, state: from })
            }
        }
    }
}

impl Library for SmallCatalog {
    fn buy(&mut self, book: &Book) -> BookCopy {
        let copy = BookCopy::new(book.clone());
        self.in_library.insert(copy.clone());
        self.journal.record(copy.id(), book, None, TrackingState::Available, CopyEvent::Buy);
        self.check_rep();
        copy
    }

    fn checkout(&mut self, copy: &BookCopy) -> Result<()> {
        let (from, to) = self.plan(copy, CopyEvent::CheckOut)?;
        if let Some(copy) = self.in_library.take(copy) {
            self.checked_out.insert(copy);
        }
        self.journal.record(copy.id(), copy.book(), from, to, CopyEvent::CheckOut);
        self.check_rep();
        Ok(())
    }

    fn checkin(&mut self, copy: &BookCopy) -> Result<()> {
        let (from, to) = self.plan(copy, CopyEvent::CheckIn)?;
        if let Some(copy) = self.checked_out.take(copy) {
            self.in_library.insert(copy);
        }
        self.journal.record(copy.id(), copy.book(), from, to, CopyEvent::CheckIn);
        self.check_rep();
        Ok(())
    }

    fn lose(&mut self, copy: &BookCopy) -> Result<()> {
        let (from, to) = self.plan(copy, CopyEvent::Lose)?;
        if !self.in_library.remove(copy) {
            self.checked_out.remove(copy);
        }
        self.journal.record(copy.id(), copy.book(), from, to, CopyEvent::Lose);
        self.check_rep();
        Ok(())
    }

    fn state_of(&self, copy: &BookCopy) -> Option<TrackingState> {
        if self.in_library.contains(copy) {
            Some(TrackingState::Available)
        } else if self.checked_out.contains(copy) {
            Some(TrackingState::CheckedOut)
        } else {
            None
        }
    }

    fn all_copies(&self, book: &Book) -> HashSet<BookCopy> {
        let mut copies = self.available_copies(book);
        copies.extend(self.checked_out_copies(book));
        copies
    }

    fn available_copies(&self, book: &Book) -> HashSet<BookCopy> {
        Self::copies_in(&self.in_library, book)
    }

    fn checked_out_copies(&self, book: &Book) -> HashSet<BookCopy> {
        Self::copies_in(&self.checked_out, book)
    }

    fn books(&self) -> Vec<Book> {
        let books: HashSet<&Book> =
            self.in_library.iter().chain(&self.checked_out).map(BookCopy::book).collect();
        books.into_iter().cloned().collect()
    }

    fn find(&self, query: &str) -> Vec<Book> {
        let universe: HashSet<Book> = self.books().into_iter().collect();
        self.strategy.find(query, &universe)
    }

    fn journal(&self) -> &TransitionJournal {
        &self.journal
    }

    fn journal_mut(&mut self) -> &mut TransitionJournal {
        &mut self.journal
    }
}

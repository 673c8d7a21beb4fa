use std::collections::HashSet;

use crate::{book::Book, copy::BookCopy, tracking_state::TrackingState};

/// Available and checked-out copies of one book.
///
/// The two sets never intersect and every copy in them is a copy of
/// [`CopyLedger::book`]. Mutators report whether the copy was where the
/// transition needs it; on `false` the ledger is left untouched.
#[derive(Debug, Clone)]
pub struct CopyLedger {
    /// The book all tracked copies belong to
    book: Book,
    /// Copies on the shelf
    available: HashSet<BookCopy>,
    /// Copies lent out
    checked_out: HashSet<BookCopy>,
}

impl CopyLedger {
    /// Create an empty ledger for `book`
    #[must_use]
    pub fn new(book: Book) -> Self {
        Self { book, available: HashSet::new(), checked_out: HashSet::new() }
    }

    /// Verify the representation invariant (debug builds only)
    fn check_rep(&self) {
        debug_assert!(
            self.available.is_disjoint(&self.checked_out),
            "copy both available and checked out for {}",
            self.book
        );
        debug_assert!(
            self.available.iter().chain(&self.checked_out).all(|c| *c.book() == self.book),
            "ledger for {} tracks a copy of another book",
            self.book
        );
    }

    /// The book this ledger tracks
    #[must_use]
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Start tracking a new copy as available. Returns `false` if the copy is
    /// of another book or already tracked.
    pub fn acquire(&mut self, copy: BookCopy) -> bool {
        if *copy.book() != self.book || self.contains(&copy) {
            return false;
        }
        self.available.insert(copy);
        self.check_rep();
        true
    }

    /// Move a copy from checked out to available
    pub fn checkin(&mut self, copy: &BookCopy) -> bool {
        let Some(copy) = self.checked_out.take(copy) else {
            return false;
        };
        self.available.insert(copy);
        self.check_rep();
        true
    }

    /// Move a copy from available to checked out
    pub fn checkout(&mut self, copy: &BookCopy) -> bool {
        let Some(copy) = self.available.take(copy) else {
            return false;
        };
        self.checked_out.insert(copy);
        self.check_rep();
        true
    }

    /// Stop tracking a copy, wherever it is
    pub fn lose(&mut self, copy: &BookCopy) -> bool {
        let removed = self.available.remove(copy) || self.checked_out.remove(copy);
        self.check_rep();
        removed
    }

    /// Whether the copy is tracked here
    #[must_use]
    pub fn contains(&self, copy: &BookCopy) -> bool {
        self.available.contains(copy) || self.checked_out.contains(copy)
    }

    /// Where the copy is tracked, `None` if not at all
    #[must_use]
    pub fn state_of(&self, copy: &BookCopy) -> Option<TrackingState> {
        if self.available.contains(copy) {
            Some(TrackingState::Available)
        } else if self.checked_out.contains(copy) {
            Some(TrackingState::CheckedOut)
        } else {
            None
        }
    }

    /// Independent copy of the available set
    #[must_use]
    pub fn available(&self) -> HashSet<BookCopy> {
        self.available.clone()
    }

    /// Independent copy of the checked-out set
    #[must_use]
    pub fn checked_out(&self) -> HashSet<BookCopy> {
        self.checked_out.clone()
    }

    /// Independent set of every tracked copy
    #[must_use]
    pub fn all(&self) -> HashSet<BookCopy> {
        self.available.union(&self.checked_out).cloned().collect()
    }

    /// Number of tracked copies
    #[must_use]
    pub fn len(&self) -> usize {
        self.available.len().saturating_add(self.checked_out.len())
    }

    /// True when no copy is tracked; such a ledger must be dropped by its owner
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.checked_out.is_empty()
    }
}

#[cfg(test)]
mod tests;

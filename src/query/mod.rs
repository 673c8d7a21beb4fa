//! Search strategies over `{title, author, year}` text.
//!
//! A catalog hands every query to one [`QueryStrategy`] together with its
//! live set of books (the [`Universe`]). Strategies may keep an index that is
//! written once per newly acquired book and never pruned; filtering through
//! the universe at read time hides books that no longer have copies.
//!
//! - **`linear`**: exact title or author match, newest first. Scans the
//!   whole universe, only fit for small catalogs.
//! - **`indexed`**: keyword index with match scoring. Cost depends on the
//!   size of the matched buckets, not on the catalog.
//! - **`tokenizer`**: keyword extraction shared by both.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::book::Book;

pub mod indexed;
pub mod linear;
pub mod tokenizer;

pub use indexed::IndexedQuery;
pub use linear::LinearQuery;

/// The live set of books a query may return
pub trait Universe {
    /// Whether `book` is currently part of the catalog
    fn contains(&self, book: &Book) -> bool;

    /// Every book currently part of the catalog
    fn books(&self) -> Box<dyn Iterator<Item = &Book> + '_>;
}

impl Universe for HashSet<Book> {
    fn contains(&self, book: &Book) -> bool {
        HashSet::contains(self, book)
    }

    fn books(&self) -> Box<dyn Iterator<Item = &Book> + '_> {
        Box::new(self.iter())
    }
}

impl<V> Universe for HashMap<Book, V> {
    fn contains(&self, book: &Book) -> bool {
        self.contains_key(book)
    }

    fn books(&self) -> Box<dyn Iterator<Item = &Book> + '_> {
        Box::new(self.keys())
    }
}

/// A search algorithm a catalog delegates `find` to
pub trait QueryStrategy: fmt::Debug + Send {
    /// Books of `universe` matching `query`, best match first. Never fails:
    /// an empty query or universe yields an empty list.
    fn find(&self, query: &str, universe: &dyn Universe) -> Vec<Book>;

    /// Write-time hook called once per newly acquired book. Calling it again
    /// with the same book has no further effect.
    fn index(&mut self, _book: &Book) {}

    /// Which variant this is
    fn kind(&self) -> StrategyKind;
}

/// Selects a [`QueryStrategy`] variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// [`LinearQuery`]
    Linear,
    /// [`IndexedQuery`]
    #[default]
    Indexed,
}

impl StrategyKind {
    /// Instantiate an empty strategy of this kind
    #[must_use]
    pub fn build(self) -> Box<dyn QueryStrategy> {
        match self {
            Self::Linear => Box::new(LinearQuery),
            Self::Indexed => Box::new(IndexedQuery::new()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Indexed => f.write_str("indexed"),
        }
    }
}

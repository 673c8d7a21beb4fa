//! Library collection engine.
//!
//! Tracks physical copies of books, whether each copy is on the shelf or
//! lent out, and answers free-text queries against the catalog.
//!
//! Two catalogs implement the [`Library`] operations: [`Catalog`] keeps one
//! ledger per book and searches through a keyword index, so its operations
//! do not slow down as the number of titles grows; [`SmallCatalog`] keeps
//! two flat sets of copies and scans them.

pub mod book;
pub mod catalog;
pub mod config;
pub mod copy;
pub mod error;
pub mod events;
pub mod ledger;
pub mod observers;
pub mod query;
pub mod small_catalog;
pub mod tracking_state;

pub use book::Book;
pub use catalog::{Catalog, Library};
pub use config::{CatalogConfig, InventoryEntry};
pub use copy::{BookCopy, Condition, CopyId};
pub use error::{CatalogError, ConfigError, Result};
pub use events::{CopyEvent, StateTransition, TransitionJournal};
pub use ledger::CopyLedger;
pub use observers::{CatalogObserver, TransitionLogger};
pub use query::{IndexedQuery, LinearQuery, QueryStrategy, StrategyKind, Universe};
pub use small_catalog::SmallCatalog;
pub use tracking_state::TrackingState;

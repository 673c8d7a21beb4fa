use crate::book::Book;

use super::{QueryStrategy, StrategyKind, Universe};

/// Exact title or exact author match, newest first.
///
/// Scans the whole universe on every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearQuery;

impl QueryStrategy for LinearQuery {
    fn find(&self, query: &str, universe: &dyn Universe) -> Vec<Book> {
        let mut found: Vec<Book> = universe
            .books()
            .filter(|book| book.title() == query || book.authors().iter().any(|a| a == query))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            b.year()
                .cmp(&a.year())
                .then_with(|| a.title().cmp(b.title()))
                .then_with(|| a.authors().cmp(b.authors()))
        });
        found
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Linear
    }
}

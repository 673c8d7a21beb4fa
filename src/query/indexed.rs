use std::collections::{HashMap, HashSet};

use crate::book::Book;

use super::{
    QueryStrategy, StrategyKind, Universe,
    tokenizer::{keywords, query_terms},
};

/// Score of an exact title match
const TITLE_SCORE: f64 = 4.0;
/// Score of an exact match on one author's full name
const AUTHOR_SCORE: f64 = 3.0;
/// Score of an exact year match
const YEAR_SCORE: f64 = 2.0;

/// Keyword index with scored results.
///
/// The index maps every keyword (see [`keywords`]) to the books indexed
/// under it. Buckets are append-only: a book whose copies are all lost stays
/// in its buckets and is hidden by the universe filter at read time, so index
/// memory grows with catalog churn.
#[derive(Debug, Clone, Default)]
pub struct IndexedQuery {
    /// Keyword to books indexed under it
    index: HashMap<String, HashSet<Book>>,
}

impl IndexedQuery {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the books indexed under `keyword`, empty if none
    #[must_use]
    pub fn bucket(&self, keyword: &str) -> HashSet<Book> {
        self.index.get(keyword).cloned().unwrap_or_default()
    }

    /// Number of distinct keywords in the index
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.index.len()
    }

    /// Books in `universe` indexed under the whole query or any of its terms
    fn candidates<'a>(&'a self, query: &str, universe: &dyn Universe) -> HashSet<&'a Book> {
        let mut found = HashSet::new();
        for term in std::iter::once(query).chain(query.split_whitespace()) {
            if let Some(bucket) = self.index.get(term) {
                found.extend(bucket.iter().filter(|book| universe.contains(book)));
            }
        }
        found
    }
}

impl QueryStrategy for IndexedQuery {
    /// Union of the books indexed under the whole query and under each of its
    /// terms, restricted to `universe`.
    ///
    /// Books that share title and authors sort newest first. Other books sort
    /// by descending [`match_score`], then by title.
    fn find(&self, query: &str, universe: &dyn Universe) -> Vec<Book> {
        let terms = query_terms(query);
        let scored: Vec<(&Book, f64)> = self
            .candidates(query, universe)
            .into_iter()
            .map(|book| (book, match_score(query, &terms, book)))
            .collect();

        // Editions of the same work rank together, at the best edition's score.
        let mut group_score: HashMap<(&str, &[String]), f64> = HashMap::new();
        for (book, score) in &scored {
            group_score
                .entry((book.title(), book.authors()))
                .and_modify(|best| *best = best.max(*score))
                .or_insert(*score);
        }

        let mut ranked: Vec<(f64, &Book)> = scored
            .into_iter()
            .map(|(book, score)| {
                let group = group_score.get(&(book.title(), book.authors())).copied();
                (group.unwrap_or(score), book)
            })
            .collect();

        ranked.sort_by(|(score_a, a), (score_b, b)| {
            score_b
                .total_cmp(score_a)
                .then_with(|| a.title().cmp(b.title()))
                .then_with(|| a.authors().cmp(b.authors()))
                .then_with(|| b.year().cmp(&a.year()))
        });

        tracing::debug!(query, results = ranked.len(), "indexed query");
        ranked.into_iter().map(|(_, book)| book.clone()).collect()
    }

    fn index(&mut self, book: &Book) {
        for word in keywords(book) {
            self.index.entry(word).or_default().insert(book.clone());
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Indexed
    }
}

/// Relevance of `book` to `query`, in `[0, 4]`. Only used for ordering.
///
/// An exact title match scores 4, an exact author name 3 and an exact year 2.
/// Otherwise the score is the share of the book's keyword characters covered
/// by the query `terms`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
pub fn match_score(query: &str, terms: &HashSet<&str>, book: &Book) -> f64 {
    if query == book.title() {
        return TITLE_SCORE;
    }
    if book.authors().iter().any(|author| author == query) {
        return AUTHOR_SCORE;
    }
    if query == book.year().to_string() {
        return YEAR_SCORE;
    }

    let words = keywords(book);
    let total: usize = words.iter().map(|w| w.chars().count()).sum();
    if total == 0 {
        return 0.0;
    }
    let unmatched: usize = words
        .iter()
        .filter(|w| !terms.contains(w.as_str()))
        .map(|w| w.chars().count())
        .sum();

    1.0 - unmatched as f64 / total as f64
}

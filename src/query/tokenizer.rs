use std::collections::HashSet;

use crate::book::Book;

/// Whitespace-separated terms of a query, deduplicated
#[must_use]
pub fn query_terms(query: &str) -> HashSet<&str> {
    query.split_whitespace().collect()
}

/// Every keyword a book is indexed under: the full title, each title word,
/// each full author name, each word of each author name, and the year.
///
/// Keywords keep their original case.
#[must_use]
pub fn keywords(book: &Book) -> HashSet<String> {
    let mut words: HashSet<String> = HashSet::new();

    words.insert(book.title().to_string());
    words.extend(book.title().split_whitespace().map(str::to_string));

    for author in book.authors() {
        words.insert(author.clone());
        words.extend(author.split_whitespace().map(str::to_string));
    }

    words.insert(book.year().to_string());
    words
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// An edition of a book: the words and pictures, not a physical object.
///
/// Identity is the full `(title, authors, year)` tuple. Case and author order
/// are significant, so a book written by "Fred" is a different book from one
/// written by "FRED".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "BookRecord", into = "BookRecord")]
pub struct Book {
    /// Title, with at least one non-whitespace character
    title: String,
    /// Authors in credit order, never empty
    authors: Vec<String>,
    /// Publication year of this edition, Common Era
    year: i32,
}

impl Book {
    /// Make a book.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvariantViolation`] if the title is blank, the
    /// author list is empty, any author name is blank, or the year is negative.
    pub fn new<T, A, S>(title: T, authors: A, year: i32) -> Result<Self>
    where
        T: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let book = Self {
            title: title.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            year,
        };
        book.check_rep()?;
        Ok(book)
    }

    /// Verify the representation invariant
    fn check_rep(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::invariant("book title must contain a non-space character"));
        }
        if self.authors.is_empty() {
            return Err(CatalogError::invariant("book must have at least one author"));
        }
        if let Some(pos) = self.authors.iter().position(|a| a.trim().is_empty()) {
            let reason = format!("author #{pos} of {:?} is blank", self.title);
            return Err(CatalogError::invariant(reason));
        }
        if self.year < 0 {
            return Err(CatalogError::invariant(format!("year {} is negative", self.year)));
        }
        Ok(())
    }

    /// The title of this book
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The authors of this book, in credit order
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// The year this edition was published
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// True when both books share title and author list, whatever the year.
    /// Used only to order search results.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.title == other.title && self.authors == other.authors
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) | {}", self.title, self.year, self.authors.join("; "))
    }
}

/// Unvalidated wire form of a [`Book`]
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookRecord {
    /// Raw title
    title: String,
    /// Raw author list
    authors: Vec<String>,
    /// Raw year
    year: i32,
}

impl TryFrom<BookRecord> for Book {
    type Error = CatalogError;

    fn try_from(record: BookRecord) -> Result<Self> {
        Self::new(record.title, record.authors, record.year)
    }
}

impl From<Book> for BookRecord {
    fn from(book: Book) -> Self {
        Self { title: book.title, authors: book.authors, year: book.year }
    }
}

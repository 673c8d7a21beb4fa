use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Source of process-unique copy identifiers
static NEXT_COPY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one physical copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct CopyId(u64);

impl CopyId {
    /// Allocate the next unused identifier
    fn allocate() -> Self {
        Self(NEXT_COPY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CopyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Physical condition of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Condition {
    /// Fit for lending
    #[default]
    Good,
    /// Needs attention from a librarian
    Damaged,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => f.write_str("good"),
            Self::Damaged => f.write_str("damaged"),
        }
    }
}

/// Shared state behind every handle to one copy
#[derive(Debug)]
struct CopyInner {
    /// Identity of the copy
    id: CopyId,
    /// The edition this is a copy of
    book: Book,
    /// Set while the copy is damaged
    damaged: AtomicBool,
}

/// Handle to one physical copy of a [`Book`].
///
/// Cloning the handle does not make a new copy: all clones refer to the same
/// physical object, and equality is identity. Two copies of the same book are
/// never equal to each other.
#[derive(Debug, Clone)]
pub struct BookCopy {
    /// Shared copy state
    inner: Arc<CopyInner>,
}

impl BookCopy {
    /// Make a new copy of `book`, initially in good condition
    #[must_use]
    pub fn new(book: Book) -> Self {
        Self {
            inner: Arc::new(CopyInner {
                id: CopyId::allocate(),
                book,
                damaged: AtomicBool::new(false),
            }),
        }
    }

    /// Identity of this copy
    #[must_use]
    pub fn id(&self) -> CopyId {
        self.inner.id
    }

    /// The book this is a copy of
    #[must_use]
    pub fn book(&self) -> &Book {
        &self.inner.book
    }

    /// Current physical condition
    #[must_use]
    pub fn condition(&self) -> Condition {
        if self.inner.damaged.load(Ordering::Relaxed) {
            Condition::Damaged
        } else {
            Condition::Good
        }
    }

    /// Record the condition found on inspection. Visible through every handle.
    pub fn set_condition(&self, condition: Condition) {
        self.inner.damaged.store(condition == Condition::Damaged, Ordering::Relaxed);
    }
}

impl PartialEq for BookCopy {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for BookCopy {}

impl Hash for BookCopy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for BookCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nCondition: {}", self.inner.book, self.condition())
    }
}

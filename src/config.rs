use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    book::Book, error::ConfigError, events::DEFAULT_HISTORY_LIMIT, query::StrategyKind,
};

/// Catalog settings, read from JSON.
///
/// Every field is optional in the source text:
///
/// ```json
/// {
///   "strategy": "indexed",
///   "history_limit": 100,
///   "log_transitions": true,
///   "inventory": [
///     { "book": { "title": "Holes", "authors": ["Louis Sachar"], "year": 1998 }, "copies": 2 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Search strategy for [`crate::Catalog`]
    pub strategy: StrategyKind,
    /// Number of transitions the journal retains
    pub history_limit: usize,
    /// Log every transition through `tracing`
    pub log_transitions: bool,
    /// Stock bought when the catalog is built
    pub inventory: Vec<InventoryEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_transitions: true,
            inventory: Vec::new(),
        }
    }
}

/// Copies of one book to buy at start-up
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InventoryEntry {
    /// The book to buy
    pub book: Book,
    /// How many copies
    #[serde(default = "default_copies")]
    pub copies: u32,
}

/// One copy unless stated otherwise
fn default_copies() -> u32 {
    1
}

impl CatalogConfig {
    /// Parse a configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid JSON for the
    /// schema or names an invalid book.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), books = config.inventory.len(), "config loaded");
        Ok(config)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the catalog currently tracks a physical copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TrackingState {
    /// On the shelf, ready for checkout
    #[default]
    Available,
    /// Lent out to a patron
    CheckedOut,
    /// Removed from the collection for good
    Lost,
}

impl TrackingState {
    /// Get a human-readable description of the state
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Available => "Copy is available for checkout",
            Self::CheckedOut => "Copy is checked out",
            Self::Lost => "Copy is lost",
        }
    }

    /// Lost is terminal: no event leaves it
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Lost
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
